pub mod advice;
pub mod config;
pub mod data;
pub mod engine;
pub mod facts;
pub mod interactive;
pub mod kb;
pub mod model;
pub mod rules;
pub mod scenario;
pub mod types;

use crate::advice::Advice;
use crate::config::AdvisorConfig;
use crate::data::ReferenceData;
use crate::engine::InferenceEngine;
use crate::rules::KnowledgeBase;
use crate::scenario::Scenario;
use anyhow::Context;
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Interactive,
    Scenario(PathBuf),
    Batch(PathBuf),
}

#[derive(Clone, Debug)]
pub struct CliOptions {
    pub config: AdvisorConfig,
    pub input: InputSource,
    pub json: bool,
}

/// Load the reference tables, falling back to the builtin chart when `dir` does not exist.
pub fn load_reference_data(dir: &Path) -> anyhow::Result<ReferenceData> {
    if !dir.is_dir() {
        tracing::warn!(
            dir = %dir.display(),
            "data directory not found, using builtin type chart without move or species tables"
        );
        return Ok(ReferenceData::builtin());
    }
    ReferenceData::load(dir)
        .with_context(|| format!("Failed to load reference data from {}", dir.display()))
}

pub fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

pub fn load_batch(path: &Path) -> anyhow::Result<Vec<Scenario>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// One full run: resolve facts, infer, and prepare the advice for display.
pub fn advise(
    scenario: &Scenario,
    data: &ReferenceData,
    kb: &KnowledgeBase,
    config: &AdvisorConfig,
) -> Advice {
    let facts = scenario.resolve(data, config.max_moves);
    let result = InferenceEngine::new(config.max_sweeps).run(facts, kb);
    Advice::from_result(&result)
}

/// Evaluate independent scenarios in parallel; each run owns its fact store.
/// Output order matches input order.
pub fn advise_batch(
    scenarios: &[Scenario],
    data: &ReferenceData,
    kb: &KnowledgeBase,
    config: &AdvisorConfig,
) -> Vec<Advice> {
    scenarios
        .par_iter()
        .map(|scenario| advise(scenario, data, kb, config))
        .collect()
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    opts.config.validate()?;
    let data = load_reference_data(&opts.config.data_dir)?;
    let kb = KnowledgeBase::standard();

    let advice = match &opts.input {
        InputSource::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let scenario = interactive::prompt_scenario(&mut stdin.lock(), &mut stdout.lock(), &data)?;
            vec![advise(&scenario, &data, &kb, &opts.config)]
        }
        InputSource::Scenario(path) => {
            let scenario = load_scenario(path)?;
            vec![advise(&scenario, &data, &kb, &opts.config)]
        }
        InputSource::Batch(path) => {
            let scenarios = load_batch(path)?;
            advise_batch(&scenarios, &data, &kb, &opts.config)
        }
    };

    let mut out = std::io::stdout().lock();
    if opts.json {
        let json = match (&opts.input, advice.as_slice()) {
            (InputSource::Batch(_), _) => serde_json::to_string_pretty(&advice)?,
            (_, [single]) => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(&advice)?,
        };
        writeln!(out, "{json}")?;
    } else {
        for item in &advice {
            writeln!(out, "{item}")?;
        }
    }
    Ok(())
}
