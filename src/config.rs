// Planner configuration
// Capacities, phone prefixes and the full-queue policy shared by every desk

use crate::activity_tree::DEFAULT_MAX_PRIORITY;
use crate::booking::PhoneValidator;
use serde::Deserialize;
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("At least one phone prefix is required")]
    NoPhonePrefixes,

    #[error("Invalid phone prefix: {0}")]
    InvalidPhonePrefix(String),

    #[error("Invalid phone pattern: {0}")]
    InvalidPhonePattern(#[from] regex::Error),
}

// What to do when the itinerary queue is full and a new entry arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    // Drop the oldest entry, then retry the insert
    EvictOldest,
    // Abandon the new entry
    Reject,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub queue_capacity: NonZeroUsize,
    pub ledger_capacity: NonZeroUsize,
    pub phone_prefixes: Vec<String>,
    pub overflow_policy: OverflowPolicy,
    pub max_priority: u32,
}

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_CAPACITY,
            ledger_capacity: DEFAULT_CAPACITY,
            phone_prefixes: ["078", "079", "072", "073"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            overflow_policy: OverflowPolicy::EvictOldest,
            max_priority: DEFAULT_MAX_PRIORITY,
        }
    }
}

impl PlannerConfig {
    // Omitted fields fall back to the defaults above
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phone_prefixes.is_empty() {
            return Err(ConfigError::NoPhonePrefixes);
        }

        // Prefixes are spliced into the phone pattern, so they must be plain digits
        for prefix in &self.phone_prefixes {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) || prefix.len() > 10
            {
                return Err(ConfigError::InvalidPhonePrefix(prefix.clone()));
            }
        }

        Ok(())
    }

    pub fn phone_validator(&self) -> Result<PhoneValidator, ConfigError> {
        self.validate()?;
        Ok(PhoneValidator::new(&self.phone_prefixes)?)
    }
}
