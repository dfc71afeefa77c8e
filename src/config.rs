use std::fs;

use serde::Deserialize;

use crate::search::{DEFAULT_SPAWN_THRESHOLD, default_num_threads};

/// Runtime tuning read from `config.yaml` in the working directory. Every
/// field is optional; a missing file means defaults throughout.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_threads: Option<usize>,
    pub spawn_threshold: usize,
    pub iddfs_depth_ceiling: Option<u32>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            spawn_threshold: DEFAULT_SPAWN_THRESHOLD,
            iddfs_depth_ceiling: None,
            verbose: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        let Ok(text) = fs::read_to_string("config.yaml") else {
            return Self::default();
        };
        serde_yaml::from_str(&text).expect("failed to parse config.yaml")
    }

    #[must_use]
    pub fn effective_num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(default_num_threads).max(1)
    }
}
