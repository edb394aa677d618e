use crate::data::ReferenceData;
use crate::facts::{BattleInputs, FactStore};
use crate::model::{ScoredMove, Speed};
use crate::types::normalize_identifier;
use serde::Deserialize;

pub const MAX_MOVES: usize = 4;

/// A move given either by name or with explicit type and power.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MoveSpec {
    Named(String),
    Manual {
        name: String,
        #[serde(rename = "type")]
        move_type: String,
        power: u32,
    },
}

impl MoveSpec {
    pub fn name(&self) -> &str {
        match self {
            MoveSpec::Named(name) => name,
            MoveSpec::Manual { name, .. } => name,
        }
    }
}

fn default_hp() -> f32 {
    100.0
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Scenario {
    pub my_pokemon: String,
    pub enemy_pokemon: String,
    /// Overrides the species lookup when set.
    #[serde(default)]
    pub my_types: Option<Vec<String>>,
    #[serde(default)]
    pub enemy_types: Option<Vec<String>>,
    #[serde(default = "default_hp")]
    pub my_hp_pct: f32,
    #[serde(default = "default_hp")]
    pub enemy_hp_pct: f32,
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
    #[serde(default)]
    pub has_priority_move: bool,
    #[serde(default)]
    pub has_defensive_move: bool,
    #[serde(default)]
    pub speed: Speed,
}

impl Scenario {
    /// Build the input facts for one run.
    ///
    /// Unknown species resolve to an empty type list. Named moves missing from
    /// the move table are skipped; only the first `max_moves` usable moves are kept.
    pub fn resolve(&self, data: &ReferenceData, max_moves: usize) -> FactStore {
        let my_types = self
            .my_types
            .clone()
            .map(lowercase_all)
            .unwrap_or_else(|| data.species_types(&self.my_pokemon));
        let enemy_types = self
            .enemy_types
            .clone()
            .map(lowercase_all)
            .unwrap_or_else(|| data.species_types(&self.enemy_pokemon));
        if my_types.is_empty() {
            tracing::warn!(species = %self.my_pokemon, "no types known for own Pokemon");
        }
        if enemy_types.is_empty() {
            tracing::warn!(species = %self.enemy_pokemon, "no types known for enemy Pokemon");
        }

        let mut has_priority_move = self.has_priority_move;
        let mut my_moves = Vec::new();
        for spec in &self.moves {
            if my_moves.len() >= max_moves {
                break;
            }
            let identifier = normalize_identifier(spec.name());
            let scored = match spec {
                MoveSpec::Named(name) => {
                    let Some(entry) = data.find_move(name) else {
                        tracing::warn!(move_id = %identifier, "unknown move skipped");
                        continue;
                    };
                    has_priority_move |= entry.priority > 0 && entry.power.is_some();
                    ScoredMove::new(
                        name.trim(),
                        identifier,
                        entry.move_type.as_str(),
                        entry.effective_power(),
                        &data.chart,
                        &my_types,
                        &enemy_types,
                    )
                }
                MoveSpec::Manual {
                    name,
                    move_type,
                    power,
                } => ScoredMove::new(
                    name.trim(),
                    identifier,
                    move_type.as_str(),
                    *power,
                    &data.chart,
                    &my_types,
                    &enemy_types,
                ),
            };
            tracing::debug!(
                move_id = %scored.identifier,
                effectiveness = scored.effectiveness,
                score = scored.score,
                "scored move"
            );
            my_moves.push(scored);
        }

        let my_advantage = data.chart.has_type_advantage(&my_types, &enemy_types);
        let enemy_advantage = data.chart.has_type_advantage(&enemy_types, &my_types);

        FactStore::new(BattleInputs {
            my_pokemon: normalize_identifier(&self.my_pokemon),
            enemy_pokemon: normalize_identifier(&self.enemy_pokemon),
            my_types,
            enemy_types,
            my_hp_pct: self.my_hp_pct,
            enemy_hp_pct: self.enemy_hp_pct,
            my_advantage,
            enemy_advantage,
            my_moves,
            has_priority_move,
            has_defensive_move: self.has_defensive_move,
            speed: self.speed,
        })
    }
}

fn lowercase_all(types: Vec<String>) -> Vec<String> {
    types
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MoveEntry, SpeciesEntry};

    fn data() -> ReferenceData {
        let mut data = ReferenceData::builtin();
        for (id, name, types) in [
            (6, "charizard", vec!["flying", "fire"]),
            (3, "venusaur", vec!["poison", "grass"]),
            (9, "blastoise", vec!["water"]),
        ] {
            data.species.insert(
                name.to_string(),
                SpeciesEntry {
                    id,
                    identifier: name.to_string(),
                    types: types.into_iter().map(String::from).collect(),
                },
            );
        }
        for (name, move_type, power, priority) in [
            ("flamethrower", "fire", Some(90), 0),
            ("air-slash", "flying", Some(75), 0),
            ("quick-attack", "normal", Some(40), 1),
            ("roost", "flying", None, 0),
        ] {
            data.moves.insert(
                name.to_string(),
                MoveEntry {
                    identifier: name.to_string(),
                    move_type: move_type.to_string(),
                    power,
                    priority,
                },
            );
        }
        data
    }

    #[test]
    fn species_lookup_sets_types_and_advantage() {
        let scenario = Scenario {
            my_pokemon: "Charizard".to_string(),
            enemy_pokemon: "venusaur".to_string(),
            my_hp_pct: 80.0,
            enemy_hp_pct: 60.0,
            ..Scenario::default()
        };
        let facts = scenario.resolve(&data(), MAX_MOVES);
        let inputs = facts.inputs();
        assert_eq!(inputs.my_pokemon, "charizard");
        assert_eq!(inputs.my_types, vec!["flying", "fire"]);
        assert!(inputs.my_advantage);
        assert!(!inputs.enemy_advantage);
    }

    #[test]
    fn moves_are_scored_and_unknown_ones_skipped() {
        let scenario = Scenario {
            my_pokemon: "charizard".to_string(),
            enemy_pokemon: "venusaur".to_string(),
            moves: vec![
                MoveSpec::Named("Flamethrower".to_string()),
                MoveSpec::Named("not a move".to_string()),
                MoveSpec::Named("roost".to_string()),
                MoveSpec::Manual {
                    name: "Mystery Beam".to_string(),
                    move_type: "Water".to_string(),
                    power: 80,
                },
            ],
            ..Scenario::default()
        };
        let facts = scenario.resolve(&data(), MAX_MOVES);
        let moves = &facts.inputs().my_moves;
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].identifier, "flamethrower");
        assert_eq!(moves[0].effectiveness, 2.0);
        assert!((moves[0].score - 216.0).abs() < 1e-3);
        assert_eq!(moves[1].power, 60);
        assert_eq!(moves[2].identifier, "mystery-beam");
        assert_eq!(moves[2].effectiveness, 0.5);
    }

    #[test]
    fn priority_move_in_table_sets_flag() {
        let scenario = Scenario {
            my_pokemon: "charizard".to_string(),
            enemy_pokemon: "blastoise".to_string(),
            moves: vec![MoveSpec::Named("quick attack".to_string())],
            ..Scenario::default()
        };
        assert!(scenario.resolve(&data(), MAX_MOVES).inputs().has_priority_move);
    }

    #[test]
    fn move_list_is_truncated() {
        let scenario = Scenario {
            moves: vec![MoveSpec::Named("flamethrower".to_string()); 6],
            ..Scenario::default()
        };
        assert_eq!(scenario.resolve(&data(), MAX_MOVES).inputs().my_moves.len(), 4);
    }

    #[test]
    fn explicit_types_override_species() {
        let scenario = Scenario {
            my_pokemon: "unknownmon".to_string(),
            enemy_pokemon: "blastoise".to_string(),
            my_types: Some(vec![" Electric ".to_string()]),
            ..Scenario::default()
        };
        let facts = scenario.resolve(&data(), MAX_MOVES);
        assert_eq!(facts.inputs().my_types, vec!["electric"]);
        assert!(facts.inputs().my_advantage);
    }

    #[test]
    fn scenario_json_accepts_both_move_forms() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "my_pokemon": "charizard",
                "enemy_pokemon": "venusaur",
                "my_hp_pct": 55,
                "moves": ["flamethrower", {"name": "Splash Hit", "type": "water", "power": 50}],
                "speed": "faster"
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.enemy_hp_pct, 100.0);
        assert_eq!(scenario.speed, Speed::Faster);
        assert_eq!(scenario.moves.len(), 2);
        assert_eq!(scenario.moves[1].name(), "Splash Hit");
    }
}
