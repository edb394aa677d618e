use crate::facts::FactStore;
use crate::rules::KnowledgeBase;
use std::collections::HashSet;

pub const DEFAULT_MAX_SWEEPS: usize = 20;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Termination {
    FixedPoint,
    SweepCap,
}

#[derive(Clone, Debug)]
pub struct InferenceResult {
    pub facts: FactStore,
    /// Rule names in firing order, each at most once.
    pub fired_rules: Vec<&'static str>,
    pub trace: Vec<String>,
    pub sweeps: usize,
    pub termination: Termination,
}

impl InferenceResult {
    pub fn has_fired(&self, name: &str) -> bool {
        self.fired_rules.iter().any(|fired| *fired == name)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InferenceEngine {
    pub max_sweeps: usize,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl InferenceEngine {
    pub fn new(max_sweeps: usize) -> Self {
        Self { max_sweeps }
    }

    /// Sweep `kb` in declared order until nothing fires or the cap is hit.
    ///
    /// Writes made by an action are visible to every later rule of the same
    /// sweep. Each rule fires at most once per run.
    pub fn run(&self, mut facts: FactStore, kb: &KnowledgeBase) -> InferenceResult {
        let mut fired: HashSet<&'static str> = HashSet::with_capacity(kb.len());
        let mut fired_rules = Vec::new();
        let mut trace = Vec::new();
        let mut sweeps = 0;
        let mut termination = Termination::SweepCap;

        while sweeps < self.max_sweeps {
            sweeps += 1;
            let mut fired_any = false;
            for rule in kb.rules() {
                if fired.contains(rule.name) || !rule.holds(&facts) {
                    continue;
                }
                rule.fire(&mut facts);
                fired.insert(rule.name);
                fired_rules.push(rule.name);
                trace.push(format!("[{}] {}", rule.name, rule.explanation));
                fired_any = true;
                tracing::debug!(sweep = sweeps, rule = rule.name, "rule fired");
            }
            if !fired_any {
                termination = Termination::FixedPoint;
                break;
            }
        }

        if termination == Termination::SweepCap {
            tracing::debug!(max_sweeps = self.max_sweeps, "sweep cap reached");
        }
        tracing::info!(
            sweeps,
            fired = fired_rules.len(),
            recommendations = facts.recommendations().len(),
            "inference finished"
        );

        InferenceResult {
            facts,
            fired_rules,
            trace,
            sweeps,
            termination,
        }
    }
}

/// Run the engine with the default sweep cap.
pub fn forward_chain(facts: FactStore, kb: &KnowledgeBase) -> InferenceResult {
    InferenceEngine::default().run(facts, kb)
}
