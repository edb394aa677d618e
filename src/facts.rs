use crate::model::{Recommendation, ScoredMove, Speed};

/// Battle state collected before inference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleInputs {
    pub my_pokemon: String,
    pub enemy_pokemon: String,
    pub my_types: Vec<String>,
    pub enemy_types: Vec<String>,
    pub my_hp_pct: f32,
    pub enemy_hp_pct: f32,
    pub my_advantage: bool,
    pub enemy_advantage: bool,
    pub my_moves: Vec<ScoredMove>,
    pub has_priority_move: bool,
    pub has_defensive_move: bool,
    pub speed: Speed,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct DerivedFacts {
    best_move: Option<ScoredMove>,
    recommendations: Vec<Recommendation>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FactStore {
    inputs: BattleInputs,
    derived: DerivedFacts,
}

impl FactStore {
    /// HP percentages are clamped into `[0, 100]`.
    pub fn new(mut inputs: BattleInputs) -> Self {
        inputs.my_hp_pct = clamp_pct(inputs.my_hp_pct);
        inputs.enemy_hp_pct = clamp_pct(inputs.enemy_hp_pct);
        Self {
            inputs,
            derived: DerivedFacts::default(),
        }
    }

    pub fn inputs(&self) -> &BattleInputs {
        &self.inputs
    }

    pub fn best_move(&self) -> Option<&ScoredMove> {
        self.derived.best_move.as_ref()
    }

    /// Effectiveness of the derived best move, if one was recorded.
    pub fn best_effectiveness(&self) -> Option<f32> {
        self.best_move().map(|m| m.effectiveness)
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.derived.recommendations
    }

    pub fn set_best_move(&mut self, best: ScoredMove) {
        self.derived.best_move = Some(best);
    }

    pub fn recommend(&mut self, text: impl Into<String>, priority: u8) {
        self.derived.recommendations.push(Recommendation {
            text: text.into(),
            priority,
        });
    }

    /// Highest-scoring candidate move; ties keep the earliest candidate.
    pub fn top_scoring_move(&self) -> Option<&ScoredMove> {
        self.inputs.my_moves.iter().fold(None, |best, mv| match best {
            Some(current) if current.score >= mv.score => Some(current),
            _ => Some(mv),
        })
    }
}

fn clamp_pct(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
