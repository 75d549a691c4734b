use std::time::Duration;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::pacing::{Immediate, Pacing, RandomPacing};

pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// How bot messages are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Bold text and colored chips
    #[default]
    Styled,
    /// Markup stripped, no escape codes
    Plain,
    /// One JSON record per message
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum delay {min}ms is greater than maximum delay {max}ms")]
    InvalidDelayRange { min: u64, max: u64 },
}

/// Settings for one chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub pacing_enabled: bool,
    pub seed: Option<u64>,
    pub output: OutputMode,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            pacing_enabled: true,
            seed: None,
            output: OutputMode::default(),
        }
    }
}

impl ChatConfig {
    pub fn new(
        min_delay_ms: u64,
        max_delay_ms: u64,
        no_delay: bool,
        seed: Option<u64>,
        output: OutputMode,
    ) -> Result<Self, ConfigError> {
        if min_delay_ms > max_delay_ms {
            return Err(ConfigError::InvalidDelayRange {
                min: min_delay_ms,
                max: max_delay_ms,
            });
        }

        Ok(Self {
            min_delay: Duration::from_millis(min_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            pacing_enabled: !no_delay,
            seed,
            output,
        })
    }

    /// Config for tests and scripted runs: no delay, fixed seed, plain output.
    pub fn immediate(seed: u64) -> Self {
        Self {
            pacing_enabled: false,
            seed: Some(seed),
            output: OutputMode::Plain,
            ..Self::default()
        }
    }

    /// Seeded when a seed is configured, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn pacing(&self) -> Box<dyn Pacing> {
        if !self.pacing_enabled {
            return Box::new(Immediate);
        }
        // Offset so pacing and fallback picks don't share a stream.
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Box::new(RandomPacing::new(self.min_delay, self.max_delay, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn rejects_inverted_delay_range() {
        let err = ChatConfig::new(3000, 1000, false, None, OutputMode::Plain).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDelayRange { min: 3000, max: 1000 });
        assert_eq!(
            err.to_string(),
            "minimum delay 3000ms is greater than maximum delay 1000ms"
        );
    }

    #[test]
    fn no_delay_disables_pacing() {
        let config = ChatConfig::new(1000, 2000, true, None, OutputMode::Styled).unwrap();
        assert!(!config.pacing_enabled);
        assert_eq!(config.pacing().next_delay(), Duration::ZERO);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = ChatConfig::immediate(99);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn default_matches_widget_timing() {
        let config = ChatConfig::default();
        assert_eq!(config.min_delay, Duration::from_millis(1000));
        assert_eq!(config.max_delay, Duration::from_millis(2000));
        assert_eq!(config.output, OutputMode::Styled);
    }
}
