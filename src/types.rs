// Ref: pokemon-showdown/sim/dex-data.ts: type chart multipliers (trimmed to multipliers only).
use phf::phf_map;
use std::collections::HashMap;

/// Non-neutral matchups of the standard 18-type chart, keyed by attacking type.
static BUILTIN_CHART: phf::Map<&'static str, &'static [(&'static str, f32)]> = phf_map! {
    "normal" => &[("rock", 0.5), ("steel", 0.5), ("ghost", 0.0)],
    "fire" => &[
        ("fire", 0.5), ("water", 0.5), ("rock", 0.5), ("dragon", 0.5),
        ("grass", 2.0), ("ice", 2.0), ("bug", 2.0), ("steel", 2.0),
    ],
    "water" => &[
        ("water", 0.5), ("grass", 0.5), ("dragon", 0.5),
        ("fire", 2.0), ("ground", 2.0), ("rock", 2.0),
    ],
    "electric" => &[
        ("electric", 0.5), ("grass", 0.5), ("dragon", 0.5),
        ("water", 2.0), ("flying", 2.0), ("ground", 0.0),
    ],
    "grass" => &[
        ("fire", 0.5), ("grass", 0.5), ("poison", 0.5), ("flying", 0.5),
        ("bug", 0.5), ("dragon", 0.5), ("steel", 0.5),
        ("water", 2.0), ("ground", 2.0), ("rock", 2.0),
    ],
    "ice" => &[
        ("fire", 0.5), ("water", 0.5), ("ice", 0.5), ("steel", 0.5),
        ("grass", 2.0), ("ground", 2.0), ("flying", 2.0), ("dragon", 2.0),
    ],
    "fighting" => &[
        ("normal", 2.0), ("ice", 2.0), ("rock", 2.0), ("dark", 2.0), ("steel", 2.0),
        ("poison", 0.5), ("flying", 0.5), ("psychic", 0.5), ("bug", 0.5), ("fairy", 0.5),
        ("ghost", 0.0),
    ],
    "poison" => &[
        ("grass", 2.0), ("fairy", 2.0),
        ("poison", 0.5), ("ground", 0.5), ("rock", 0.5), ("ghost", 0.5),
        ("steel", 0.0),
    ],
    "ground" => &[
        ("fire", 2.0), ("electric", 2.0), ("poison", 2.0), ("rock", 2.0), ("steel", 2.0),
        ("grass", 0.5), ("bug", 0.5), ("flying", 0.0),
    ],
    "flying" => &[
        ("grass", 2.0), ("fighting", 2.0), ("bug", 2.0),
        ("electric", 0.5), ("rock", 0.5), ("steel", 0.5),
    ],
    "psychic" => &[
        ("fighting", 2.0), ("poison", 2.0),
        ("psychic", 0.5), ("steel", 0.5), ("dark", 0.0),
    ],
    "bug" => &[
        ("grass", 2.0), ("psychic", 2.0), ("dark", 2.0),
        ("fire", 0.5), ("fighting", 0.5), ("poison", 0.5), ("flying", 0.5),
        ("ghost", 0.5), ("steel", 0.5), ("fairy", 0.5),
    ],
    "rock" => &[
        ("fire", 2.0), ("ice", 2.0), ("flying", 2.0), ("bug", 2.0),
        ("fighting", 0.5), ("ground", 0.5), ("steel", 0.5),
    ],
    "ghost" => &[("ghost", 2.0), ("psychic", 2.0), ("dark", 0.5), ("normal", 0.0)],
    "dragon" => &[("dragon", 2.0), ("steel", 0.5), ("fairy", 0.0)],
    "dark" => &[
        ("psychic", 2.0), ("ghost", 2.0),
        ("fighting", 0.5), ("dark", 0.5), ("fairy", 0.5),
    ],
    "steel" => &[
        ("rock", 2.0), ("ice", 2.0), ("fairy", 2.0),
        ("fire", 0.5), ("water", 0.5), ("electric", 0.5), ("steel", 0.5),
    ],
    "fairy" => &[
        ("fighting", 2.0), ("dragon", 2.0), ("dark", 2.0),
        ("fire", 0.5), ("poison", 0.5), ("steel", 0.5),
    ],
};

/// Attacking type -> defending type -> damage multiplier.
#[derive(Clone, Debug, Default)]
pub struct TypeChart {
    multipliers: HashMap<String, HashMap<String, f32>>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut chart = Self::new();
        for (attacking, entries) in BUILTIN_CHART.entries() {
            for (defending, multiplier) in entries.iter() {
                chart.insert(attacking, defending, *multiplier);
            }
        }
        chart
    }

    pub fn insert(&mut self, attacking: &str, defending: &str, multiplier: f32) {
        self.multipliers
            .entry(attacking.to_ascii_lowercase())
            .or_default()
            .insert(defending.to_ascii_lowercase(), multiplier);
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    pub fn single(&self, attacking: &str, defending: &str) -> f32 {
        self.multipliers
            .get(&attacking.to_ascii_lowercase())
            .and_then(|row| row.get(&defending.to_ascii_lowercase()))
            .copied()
            .unwrap_or(1.0)
    }

    /// Combined multiplier of `attacking` against a (possibly dual) type list.
    pub fn effectiveness(&self, attacking: &str, defending_types: &[String]) -> f32 {
        defending_types
            .iter()
            .map(|t| self.single(attacking, t))
            .product()
    }

    /// True when some attacking type hits the defender harder than neutral.
    pub fn has_type_advantage(&self, attacking_types: &[String], defending_types: &[String]) -> bool {
        if attacking_types.is_empty() || defending_types.is_empty() {
            return false;
        }
        let best = attacking_types
            .iter()
            .map(|t| self.effectiveness(t, defending_types))
            .fold(1.0_f32, f32::max);
        best > 1.0
    }
}

/// Canonical identifier used by the reference tables: `"Mr Mime"` -> `"mr-mime"`.
pub fn normalize_identifier(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn dual_types_multiply() {
        let chart = TypeChart::builtin();
        assert_eq!(chart.effectiveness("ice", &types(&["dragon", "flying"])), 4.0);
        assert_eq!(chart.effectiveness("electric", &types(&["water", "ground"])), 0.0);
        assert_eq!(chart.effectiveness("fire", &types(&["water", "grass"])), 1.0);
    }

    #[test]
    fn missing_pairs_are_neutral() {
        let chart = TypeChart::builtin();
        assert_eq!(chart.single("normal", "fire"), 1.0);
        assert_eq!(chart.single("shadow", "fire"), 1.0);
        assert_eq!(chart.effectiveness("fire", &[]), 1.0);
        assert_eq!(TypeChart::new().single("fire", "grass"), 1.0);
    }

    #[test]
    fn lookups_ignore_case() {
        let chart = TypeChart::builtin();
        assert_eq!(chart.single("Fire", "GRASS"), 2.0);
    }

    #[test]
    fn advantage_needs_strictly_better_than_neutral() {
        let chart = TypeChart::builtin();
        assert!(chart.has_type_advantage(&types(&["water"]), &types(&["fire"])));
        assert!(!chart.has_type_advantage(&types(&["normal"]), &types(&["fire"])));
        assert!(chart.has_type_advantage(
            &types(&["normal", "fighting"]),
            &types(&["steel"])
        ));
        assert!(!chart.has_type_advantage(&[], &types(&["fire"])));
        assert!(!chart.has_type_advantage(&types(&["water"]), &[]));
    }

    #[test]
    fn identifiers_are_hyphenated_lowercase() {
        assert_eq!(normalize_identifier("  Mr Mime "), "mr-mime");
        assert_eq!(normalize_identifier("Water Gun"), "water-gun");
        assert_eq!(normalize_identifier("flamethrower"), "flamethrower");
    }
}
