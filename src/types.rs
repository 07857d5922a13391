//! Core game types and compile-time constants.

/// Number of LED positions shuffled into the sequence pool.
pub const MAX_NUM_LEDS: usize = 10;

/// Sequence length shown at the start of every game.
pub const INITIAL_LEVEL: usize = 3;

/// How long the active sequence stays lit before input opens.
pub const LED_LIGHT_DURATION_MS: u64 = 4000;

/// Delay between poll iterations of the run loop.
pub const POLL_INTERVAL_MS: u32 = 30;

/// Delay between frames of the start-up light chain.
pub const INTRO_STEP_MS: u32 = 50;

/// Keys on a single Trellis board.
pub const NUM_KEYS: usize = 16;

/// Default I2C address of the Trellis HT16K33 controller.
pub const TRELLIS_ADDRESS: u8 = 0x74;

/// Identifier of one matrix position.
///
/// A position is both a button (input) and an LED (output), so the same id
/// addresses both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub u8);

impl ButtonId {
    /// Returns the id as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for ButtonId {
    fn from(id: u8) -> Self {
        ButtonId(id)
    }
}

impl From<ButtonId> for usize {
    fn from(id: ButtonId) -> Self {
        id.0 as usize
    }
}

impl core::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameOutcome {
    /// Every level up to the full pool was reproduced.
    Won,
    /// A wrong button was pressed.
    Lost,
}

/// The phase the game is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// The active sequence is lit. Input is ignored.
    Display,
    /// Waiting for the player to reproduce the sequence.
    Input,
    /// The game has ended. The next poll starts a fresh game.
    GameOver(GameOutcome),
}

impl Phase {
    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }
}

/// Errors returned when loading an explicit sequence pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolError {
    /// The id list does not have exactly one entry per pool slot.
    WrongLength { expected: usize, actual: usize },

    /// An id lies outside the pool range.
    OutOfRange(ButtonId),

    /// An id appears more than once.
    Duplicate(ButtonId),
}

impl core::fmt::Display for PoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PoolError::WrongLength { expected, actual } => {
                write!(f, "pool needs {} ids, got {}", expected, actual)
            }
            PoolError::OutOfRange(id) => {
                write!(f, "id {} is outside the pool range", id)
            }
            PoolError::Duplicate(id) => {
                write!(f, "id {} appears more than once", id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PoolError {}
