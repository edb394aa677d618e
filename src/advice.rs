use crate::engine::InferenceResult;
use crate::model::{Recommendation, ScoredMove};
use serde::Serialize;
use std::fmt;

/// What the user sees after a run.
#[derive(Clone, Debug, Serialize)]
pub struct Advice {
    pub my_pokemon: String,
    pub enemy_pokemon: String,
    pub my_types: Vec<String>,
    pub enemy_types: Vec<String>,
    pub my_hp_pct: f32,
    pub enemy_hp_pct: f32,
    pub my_advantage: bool,
    pub enemy_advantage: bool,
    /// Highest priority first; equal priorities keep firing order.
    pub recommendations: Vec<Recommendation>,
    pub best_move: Option<ScoredMove>,
    pub fired_rules: Vec<&'static str>,
    pub trace: Vec<String>,
}

impl Advice {
    pub fn from_result(result: &InferenceResult) -> Self {
        let mut recommendations = result.facts.recommendations().to_vec();
        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        let inputs = result.facts.inputs();
        Self {
            my_pokemon: inputs.my_pokemon.clone(),
            enemy_pokemon: inputs.enemy_pokemon.clone(),
            my_types: inputs.my_types.clone(),
            enemy_types: inputs.enemy_types.clone(),
            my_hp_pct: inputs.my_hp_pct,
            enemy_hp_pct: inputs.enemy_hp_pct,
            my_advantage: inputs.my_advantage,
            enemy_advantage: inputs.enemy_advantage,
            recommendations,
            best_move: result.facts.best_move().cloned(),
            fired_rules: result.fired_rules.clone(),
            trace: result.trace.clone(),
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

fn type_list(types: &[String]) -> String {
    if types.is_empty() {
        "unknown".to_string()
    } else {
        types.join("/")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} vs {} ===", self.my_pokemon, self.enemy_pokemon)?;
        writeln!(
            f,
            "Types: {} vs {}",
            type_list(&self.my_types),
            type_list(&self.enemy_types)
        )?;
        writeln!(f, "HP: {}% vs {}%", self.my_hp_pct, self.enemy_hp_pct)?;
        writeln!(
            f,
            "Type advantage: you {}, enemy {}",
            yes_no(self.my_advantage),
            yes_no(self.enemy_advantage)
        )?;

        writeln!(f, "\n=== RECOMMENDATIONS ===")?;
        if self.recommendations.is_empty() {
            writeln!(f, "No recommendation was produced.")?;
        }
        for reco in &self.recommendations {
            writeln!(f, "- [{}] {}", reco.priority, reco.text)?;
        }
        if let Some(best) = &self.best_move {
            writeln!(f, "\n=== BEST MOVE ===")?;
            writeln!(
                f,
                "{} (type {}, power {}, effectiveness x{}, score {:.1})",
                best.name, best.move_type, best.power, best.effectiveness, best.score
            )?;
        }
        writeln!(f, "\n=== EXPLANATION (FIRED RULES) ===")?;
        if self.trace.is_empty() {
            writeln!(f, "No rule fired.")?;
        }
        for line in &self.trace {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::forward_chain;
    use crate::facts::{BattleInputs, FactStore};
    use crate::rules::{KnowledgeBase, Rule};

    fn always(_: &FactStore) -> bool {
        true
    }

    fn low(f: &mut FactStore) {
        f.recommend("low", 40);
    }

    fn high_a(f: &mut FactStore) {
        f.recommend("high-a", 90);
    }

    fn high_b(f: &mut FactStore) {
        f.recommend("high-b", 90);
    }

    #[test]
    fn recommendations_sorted_stably_by_priority() {
        let kb = KnowledgeBase::from_rules(vec![
            Rule::new("low", always, low, ""),
            Rule::new("high-a", always, high_a, ""),
            Rule::new("high-b", always, high_b, ""),
        ])
        .unwrap();
        let result = forward_chain(FactStore::new(BattleInputs::default()), &kb);
        let advice = Advice::from_result(&result);
        let texts: Vec<_> = advice.recommendations.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["high-a", "high-b", "low"]);
    }

    #[test]
    fn empty_run_renders_fallback_lines() {
        let kb = KnowledgeBase::default();
        let result = forward_chain(FactStore::new(BattleInputs::default()), &kb);
        let text = Advice::from_result(&result).render_text();
        assert!(text.contains("No recommendation was produced."));
        assert!(text.contains("No rule fired."));
        assert!(!text.contains("BEST MOVE"));
        assert!(text.contains("Types: unknown vs unknown"));
    }

    #[test]
    fn header_summarizes_the_battle_state() {
        let inputs = BattleInputs {
            my_pokemon: "charizard".to_string(),
            enemy_pokemon: "venusaur".to_string(),
            my_types: vec!["flying".to_string(), "fire".to_string()],
            enemy_types: vec!["poison".to_string(), "grass".to_string()],
            my_hp_pct: 65.0,
            enemy_hp_pct: 40.5,
            my_advantage: true,
            ..BattleInputs::default()
        };
        let result = forward_chain(FactStore::new(inputs), &KnowledgeBase::default());
        let advice = Advice::from_result(&result);
        assert_eq!(advice.my_types, vec!["flying", "fire"]);
        assert!(advice.my_advantage);
        assert!(!advice.enemy_advantage);

        let text = advice.render_text();
        let header: Vec<_> = text.lines().take(4).collect();
        assert_eq!(
            header,
            vec![
                "=== charizard vs venusaur ===",
                "Types: flying/fire vs poison/grass",
                "HP: 65% vs 40.5%",
                "Type advantage: you yes, enemy no",
            ]
        );
    }
}
