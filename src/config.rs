use crate::engine::DEFAULT_MAX_SWEEPS;
use crate::scenario::MAX_MOVES;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max sweeps must be at least 1")]
    ZeroSweeps,
    #[error("move limit must be between 1 and 4, got {0}")]
    MoveLimit(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub data_dir: PathBuf,
    pub max_sweeps: usize,
    pub max_moves: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            max_sweeps: DEFAULT_MAX_SWEEPS,
            max_moves: MAX_MOVES,
        }
    }
}

impl AdvisorConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `ADVISOR_DATA_DIR`
    /// - `ADVISOR_MAX_SWEEPS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("ADVISOR_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(sweeps) = read_env::<usize>("ADVISOR_MAX_SWEEPS") {
            config.max_sweeps = sweeps;
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sweeps == 0 {
            return Err(ConfigError::ZeroSweeps);
        }
        if self.max_moves == 0 || self.max_moves > MAX_MOVES {
            return Err(ConfigError::MoveLimit(self.max_moves));
        }
        Ok(())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
