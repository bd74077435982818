// Configuration module for reading Tron.toml
// This module provides OOP-style configuration management for the Tron agent

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
}

/// Identity reported to the judge
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub participant: String,
    pub agent_name: String,
}

/// Timing constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Tron.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Tron.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Tron.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Tron.toml
    pub fn default_hardcoded() -> Self {
        Config {
            agent: AgentConfig {
                participant: "case-closed".to_string(),
                agent_name: "wraparound".to_string(),
            },
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "tron_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Tron.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
