use crate::types::TypeChart;
use serde::{Deserialize, Serialize};

/// Power assumed for moves whose reference entry has variable or no base power.
pub const DEFAULT_POWER: u32 = 60;

/// Score multiplier for a move sharing one of the user's own types.
pub const STAB_BONUS: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Faster,
    Slower,
    #[default]
    #[serde(alias = "unsure")]
    Unknown,
}

impl Speed {
    pub fn is_faster(self) -> bool {
        self == Speed::Faster
    }

    pub fn is_slower(self) -> bool {
        self == Speed::Slower
    }
}

/// Move row from the reference move table.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveEntry {
    pub identifier: String,
    pub move_type: String,
    /// `None` when the table marks the power as variable (status moves included).
    pub power: Option<u32>,
    pub priority: i32,
}

impl MoveEntry {
    pub fn effective_power(&self) -> u32 {
        self.power.unwrap_or(DEFAULT_POWER)
    }
}

/// Species row from the reference species table.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesEntry {
    pub id: u32,
    pub identifier: String,
    pub types: Vec<String>,
}

/// Candidate move scored against the current defender.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredMove {
    pub name: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u32,
    pub effectiveness: f32,
    pub score: f32,
}

impl ScoredMove {
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        move_type: impl Into<String>,
        power: u32,
        chart: &TypeChart,
        user_types: &[String],
        defender_types: &[String],
    ) -> Self {
        let move_type = move_type.into().to_ascii_lowercase();
        let effectiveness = chart.effectiveness(&move_type, defender_types);
        let mut score = effectiveness * power as f32;
        if user_types.iter().any(|t| t.eq_ignore_ascii_case(&move_type)) {
            score *= STAB_BONUS;
        }
        Self {
            name: name.into(),
            identifier: identifier.into(),
            move_type,
            power,
            effectiveness,
            score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn score_is_effectiveness_times_power() {
        let chart = TypeChart::builtin();
        let mv = ScoredMove::new(
            "Thunderbolt",
            "thunderbolt",
            "electric",
            90,
            &chart,
            &types(&["normal"]),
            &types(&["water"]),
        );
        assert_eq!(mv.effectiveness, 2.0);
        assert_eq!(mv.score, 180.0);
    }

    #[test]
    fn stab_boosts_score() {
        let chart = TypeChart::builtin();
        let mv = ScoredMove::new(
            "Flamethrower",
            "flamethrower",
            "Fire",
            90,
            &chart,
            &types(&["fire", "flying"]),
            &types(&["normal"]),
        );
        assert_eq!(mv.move_type, "fire");
        assert!((mv.score - 108.0).abs() < 1e-3);
    }

    #[test]
    fn variable_power_defaults() {
        let entry = MoveEntry {
            identifier: "seismic-toss".to_string(),
            move_type: "fighting".to_string(),
            power: None,
            priority: 0,
        };
        assert_eq!(entry.effective_power(), DEFAULT_POWER);
    }

    #[test]
    fn speed_parses_lowercase() {
        let speed: Speed = serde_json::from_str("\"slower\"").unwrap();
        assert!(speed.is_slower());
        assert_eq!(Speed::default(), Speed::Unknown);
    }
}
