use crate::model::{MoveEntry, SpeciesEntry};
use crate::types::{normalize_identifier, TypeChart};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TYPES_FILE: &str = "types.csv";
pub const TYPE_EFFICACY_FILE: &str = "type_efficacy.csv";
pub const MOVES_FILE: &str = "moves.csv";
pub const POKEMON_FILE: &str = "pokemon.csv";
pub const POKEMON_TYPES_FILE: &str = "pokemon_types.csv";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}: missing column {column}")]
    MissingColumn { file: String, column: &'static str },
    #[error("{file}:{line}: invalid number {value:?} in column {column}")]
    InvalidNumber {
        file: String,
        line: usize,
        column: &'static str,
        value: String,
    },
}

pub type DataResult<T> = Result<T, DataError>;

#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    pub chart: TypeChart,
    pub moves: HashMap<String, MoveEntry>,
    pub species: HashMap<String, SpeciesEntry>,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            chart: TypeChart::builtin(),
            ..Self::default()
        }
    }

    pub fn load(dir: &Path) -> DataResult<Self> {
        let types_raw = read_table(dir, TYPES_FILE)?;
        let type_names = parse_types(&types_raw)?;
        let chart = parse_type_efficacy(&read_table(dir, TYPE_EFFICACY_FILE)?, &type_names)?;
        let moves = parse_moves(&read_table(dir, MOVES_FILE)?, &type_names)?;
        let species_types = parse_pokemon_types(&read_table(dir, POKEMON_TYPES_FILE)?)?;
        let species = parse_pokemon(&read_table(dir, POKEMON_FILE)?, &species_types, &type_names)?;
        tracing::info!(
            dir = %dir.display(),
            types = type_names.len(),
            moves = moves.len(),
            species = species.len(),
            "loaded reference data"
        );
        Ok(Self {
            chart,
            moves,
            species,
        })
    }

    pub fn find_move(&self, name: &str) -> Option<&MoveEntry> {
        self.moves.get(&normalize_identifier(name))
    }

    pub fn find_species(&self, name: &str) -> Option<&SpeciesEntry> {
        self.species.get(&normalize_identifier(name))
    }

    /// Types of a species, empty when unknown.
    pub fn species_types(&self, name: &str) -> Vec<String> {
        self.find_species(name)
            .map(|s| s.types.clone())
            .unwrap_or_default()
    }
}

fn read_table(dir: &Path, file: &str) -> DataResult<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
}

struct Table<'a> {
    file: &'a str,
    header: Vec<&'a str>,
    rows: Vec<(usize, Vec<&'a str>)>,
}

impl<'a> Table<'a> {
    fn parse(file: &'a str, raw: &'a str) -> Self {
        let mut lines = raw
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());
        let header: Vec<&str> = lines
            .next()
            .map(|(_, line)| line.split(',').map(str::trim).collect())
            .unwrap_or_default();
        let rows: Vec<(usize, Vec<&str>)> = lines
            .map(|(line_no, line)| (line_no, line.split(',').map(str::trim).collect()))
            .collect();
        Self { file, header, rows }
    }

    fn column(&self, name: &'static str) -> DataResult<usize> {
        self.header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::MissingColumn {
                file: self.file.to_string(),
                column: name,
            })
    }

    fn number<T: std::str::FromStr>(
        &self,
        line: usize,
        row: &[&str],
        col: usize,
        column: &'static str,
    ) -> DataResult<T> {
        let value = row.get(col).copied().unwrap_or("");
        value.parse().map_err(|_| DataError::InvalidNumber {
            file: self.file.to_string(),
            line,
            column,
            value: value.to_string(),
        })
    }
}

pub fn parse_types(raw: &str) -> DataResult<HashMap<u32, String>> {
    let table = Table::parse(TYPES_FILE, raw);
    let id_col = table.column("id")?;
    let name_col = table.column("identifier")?;
    let mut names = HashMap::new();
    for (line, row) in &table.rows {
        let id: u32 = table.number(*line, row, id_col, "id")?;
        let name = row.get(name_col).copied().unwrap_or("").to_lowercase();
        names.insert(id, name);
    }
    Ok(names)
}

/// `type_efficacy.csv`: damage factors are percentages (200 -> 2.0).
pub fn parse_type_efficacy(raw: &str, type_names: &HashMap<u32, String>) -> DataResult<TypeChart> {
    let table = Table::parse(TYPE_EFFICACY_FILE, raw);
    let atk_col = table.column("damage_type_id")?;
    let def_col = table.column("target_type_id")?;
    let factor_col = table.column("damage_factor")?;
    let mut chart = TypeChart::new();
    for (line, row) in &table.rows {
        let atk: u32 = table.number(*line, row, atk_col, "damage_type_id")?;
        let def: u32 = table.number(*line, row, def_col, "target_type_id")?;
        let factor: u32 = table.number(*line, row, factor_col, "damage_factor")?;
        let (Some(atk_name), Some(def_name)) = (type_names.get(&atk), type_names.get(&def)) else {
            continue;
        };
        chart.insert(atk_name, def_name, factor as f32 / 100.0);
    }
    Ok(chart)
}

/// `moves.csv`: empty or zero power marks a variable-power or status move.
pub fn parse_moves(
    raw: &str,
    type_names: &HashMap<u32, String>,
) -> DataResult<HashMap<String, MoveEntry>> {
    let table = Table::parse(MOVES_FILE, raw);
    let name_col = table.column("identifier")?;
    let type_col = table.column("type_id")?;
    let power_col = table.column("power")?;
    let priority_col = table.column("priority").ok();
    let mut moves = HashMap::new();
    for (line, row) in &table.rows {
        let identifier = row.get(name_col).copied().unwrap_or("").to_lowercase();
        let type_id: u32 = table.number(*line, row, type_col, "type_id")?;
        let Some(move_type) = type_names.get(&type_id) else {
            tracing::warn!(move_id = %identifier, type_id, "skipping move with unknown type");
            continue;
        };
        let power = match row.get(power_col).copied().unwrap_or("") {
            "" | "0" => None,
            _ => Some(table.number(*line, row, power_col, "power")?),
        };
        let priority = match priority_col {
            Some(col) if !row.get(col).copied().unwrap_or("").is_empty() => {
                table.number(*line, row, col, "priority")?
            }
            _ => 0,
        };
        moves.insert(
            identifier.clone(),
            MoveEntry {
                identifier,
                move_type: move_type.clone(),
                power,
                priority,
            },
        );
    }
    Ok(moves)
}

/// `pokemon_types.csv`: species id -> type ids in ascending id order.
pub fn parse_pokemon_types(raw: &str) -> DataResult<HashMap<u32, Vec<u32>>> {
    let table = Table::parse(POKEMON_TYPES_FILE, raw);
    let pid_col = table.column("pokemon_id")?;
    let tid_col = table.column("type_id")?;
    let mut species_types: HashMap<u32, Vec<u32>> = HashMap::new();
    for (line, row) in &table.rows {
        let pid: u32 = table.number(*line, row, pid_col, "pokemon_id")?;
        let tid: u32 = table.number(*line, row, tid_col, "type_id")?;
        species_types.entry(pid).or_default().push(tid);
    }
    for ids in species_types.values_mut() {
        ids.sort_unstable();
    }
    Ok(species_types)
}

pub fn parse_pokemon(
    raw: &str,
    species_types: &HashMap<u32, Vec<u32>>,
    type_names: &HashMap<u32, String>,
) -> DataResult<HashMap<String, SpeciesEntry>> {
    let table = Table::parse(POKEMON_FILE, raw);
    let id_col = table.column("id")?;
    let name_col = table.column("identifier")?;
    let mut species = HashMap::new();
    for (line, row) in &table.rows {
        let id: u32 = table.number(*line, row, id_col, "id")?;
        let identifier = row.get(name_col).copied().unwrap_or("").to_lowercase();
        let types = species_types
            .get(&id)
            .map(|ids| ids.iter().filter_map(|tid| type_names.get(tid).cloned()).collect())
            .unwrap_or_default();
        species.insert(
            identifier.clone(),
            SpeciesEntry {
                id,
                identifier,
                types,
            },
        );
    }
    Ok(species)
}
