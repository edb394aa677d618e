use crate::facts::FactStore;
use std::collections::HashSet;
use thiserror::Error;

pub type Condition = fn(&FactStore) -> bool;
pub type Action = fn(&mut FactStore);

/// A named condition/action pair with the explanation shown in the trace.
///
/// Conditions must not have side effects; actions are the only writers of
/// derived facts.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub condition: Condition,
    pub action: Action,
    pub explanation: &'static str,
}

impl Rule {
    pub const fn new(
        name: &'static str,
        condition: Condition,
        action: Action,
        explanation: &'static str,
    ) -> Self {
        Self {
            name,
            condition,
            action,
            explanation,
        }
    }

    pub fn holds(&self, facts: &FactStore) -> bool {
        (self.condition)(facts)
    }

    pub fn fire(&self, facts: &mut FactStore) {
        (self.action)(facts)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("explanation", &self.explanation)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KbError {
    #[error("duplicate rule name {0}")]
    DuplicateRule(&'static str),
}

/// Declared order is significant: it is the evaluation order of every sweep.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    pub(crate) rules: Vec<Rule>,
}

impl KnowledgeBase {
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, KbError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name) {
                return Err(KbError::DuplicateRule(rule.name));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &FactStore) -> bool {
        true
    }

    fn noop(_: &mut FactStore) {}

    #[test]
    fn duplicate_names_are_rejected() {
        let err = KnowledgeBase::from_rules(vec![
            Rule::new("dup", always, noop, "first"),
            Rule::new("other", always, noop, "second"),
            Rule::new("dup", always, noop, "third"),
        ])
        .unwrap_err();
        assert_eq!(err, KbError::DuplicateRule("dup"));
    }

    #[test]
    fn lookup_preserves_declared_order() {
        let kb = KnowledgeBase::from_rules(vec![
            Rule::new("b", always, noop, ""),
            Rule::new("a", always, noop, ""),
        ])
        .unwrap();
        assert_eq!(kb.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(kb.get("a").map(|r| r.name), Some("a"));
        assert!(kb.get("missing").is_none());
    }
}
