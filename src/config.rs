//! Game tuning parameters.
//!
//! [`GameConfig::default`] reproduces the classic settings: three lit keys on
//! the first level, a four second display phase and a 30 ms poll interval.
//! Use [`GameConfig::builder`] to change them; values are validated when the
//! config is built and again when it is handed to an engine, since only the
//! engine knows its pool size.

use crate::types::{INITIAL_LEVEL, INTRO_STEP_MS, LED_LIGHT_DURATION_MS, POLL_INTERVAL_MS};

/// Validated game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    initial_level: usize,
    display_duration_ms: u64,
    poll_interval_ms: u32,
    intro_step_ms: u32,
}

impl GameConfig {
    /// Creates a builder seeded with the default settings.
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Sequence length shown at the start of every game.
    pub fn initial_level(&self) -> usize {
        self.initial_level
    }

    /// How long the active sequence stays lit.
    pub fn display_duration_ms(&self) -> u64 {
        self.display_duration_ms
    }

    /// Delay between run loop iterations.
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// Delay between intro animation frames.
    pub fn intro_step_ms(&self) -> u32 {
        self.intro_step_ms
    }

    /// Checks that the initial level fits a pool of `pool_size` ids.
    pub fn check_pool_size(&self, pool_size: usize) -> Result<(), ConfigError> {
        if self.initial_level > pool_size {
            return Err(ConfigError::InitialLevelExceedsPool {
                level: self.initial_level,
                pool_size,
            });
        }
        Ok(())
    }

    /// Checks that every id of a `pool_size` pool has a key on a matrix of
    /// `num_keys` keys.
    pub fn check_key_count(&self, pool_size: usize, num_keys: usize) -> Result<(), ConfigError> {
        if pool_size > num_keys {
            return Err(ConfigError::PoolExceedsKeys {
                pool_size,
                num_keys,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_level: INITIAL_LEVEL,
            display_duration_ms: LED_LIGHT_DURATION_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            intro_step_ms: INTRO_STEP_MS,
        }
    }
}

/// Builder for [`GameConfig`].
#[derive(Debug, Clone, Copy)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    /// Creates a builder with the default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Sets the sequence length of the first level.
    pub fn initial_level(mut self, level: usize) -> Self {
        self.config.initial_level = level;
        self
    }

    /// Sets how long the active sequence stays lit, in milliseconds.
    pub fn display_duration_ms(mut self, millis: u64) -> Self {
        self.config.display_duration_ms = millis;
        self
    }

    /// Sets the delay between run loop iterations, in milliseconds.
    pub fn poll_interval_ms(mut self, millis: u32) -> Self {
        self.config.poll_interval_ms = millis;
        self
    }

    /// Sets the delay between intro animation frames, in milliseconds.
    pub fn intro_step_ms(mut self, millis: u32) -> Self {
        self.config.intro_step_ms = millis;
        self
    }

    /// Validates and returns the config.
    ///
    /// # Errors
    /// * `ZeroInitialLevel` - the first level would show nothing
    /// * `ZeroDisplayDuration` - the sequence would never be visible
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        if self.config.initial_level == 0 {
            return Err(ConfigError::ZeroInitialLevel);
        }

        if self.config.display_duration_ms == 0 {
            return Err(ConfigError::ZeroDisplayDuration);
        }

        Ok(self.config)
    }
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Initial level of zero.
    ZeroInitialLevel,

    /// Initial level longer than the sequence pool.
    InitialLevelExceedsPool { level: usize, pool_size: usize },

    /// Display duration of zero.
    ZeroDisplayDuration,

    /// Sequence pool holds more ids than the matrix has keys.
    PoolExceedsKeys { pool_size: usize, num_keys: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroInitialLevel => {
                write!(f, "initial level must be at least 1")
            }
            ConfigError::InitialLevelExceedsPool { level, pool_size } => {
                write!(
                    f,
                    "initial level {} exceeds sequence pool size {}",
                    level, pool_size
                )
            }
            ConfigError::ZeroDisplayDuration => {
                write!(f, "display duration must be non-zero")
            }
            ConfigError::PoolExceedsKeys {
                pool_size,
                num_keys,
            } => {
                write!(
                    f,
                    "sequence pool size {} exceeds matrix key count {}",
                    pool_size, num_keys
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
