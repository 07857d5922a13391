#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`GameEngine`**: Runs the display / input / game-over state machine
//! - **`SequencePool`**: The shuffled permutation of ids; each level shows a longer prefix
//! - **`ButtonMatrix`**: Trait to implement for your button/LED hardware
//! - **`Trellis`**: `ButtonMatrix` driver for the HT16K33-based 4x4 Trellis over I2C
//! - **`MemoryMatrix`**: In-memory `ButtonMatrix` for tests and simulation
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`GameConfig`**: Level, display duration and loop timing settings
//! - **`PollReport`** / **`GameEvent`**: What happened during one poll
//!
//! The engine never allocates. Randomness comes from any `rand::RngCore`, so
//! firmware can seed it from a hardware entropy source and tests can use a
//! seeded generator.

pub mod config;
pub mod engine;
pub mod event;
pub mod matrix;
pub mod pool;
pub mod time;
pub mod trellis;
pub mod types;

pub use config::{ConfigError, GameConfig, GameConfigBuilder};
pub use engine::{EngineError, GameEngine};
pub use event::{GameEvent, MAX_EVENTS_PER_POLL, PollReport};
pub use matrix::{ButtonMatrix, MemoryMatrix};
pub use pool::{SequencePool, fisher_yates};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use trellis::{BlinkRate, Trellis};
pub use types::{
    ButtonId, GameOutcome, INITIAL_LEVEL, INTRO_STEP_MS, LED_LIGHT_DURATION_MS, MAX_NUM_LEDS,
    NUM_KEYS, POLL_INTERVAL_MS, Phase, PoolError, TRELLIS_ADDRESS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_fits_trellis_keys() {
        assert!(INITIAL_LEVEL <= MAX_NUM_LEDS);
        assert!(MAX_NUM_LEDS <= NUM_KEYS);
    }
}
