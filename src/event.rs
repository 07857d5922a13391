//! Events reported by the engine on every poll.

use crate::types::{ButtonId, GameOutcome, Phase};
use heapless::Vec;

/// Capacity of a single [`PollReport`].
pub const MAX_EVENTS_PER_POLL: usize = 40;

/// Something that happened during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameEvent {
    /// A new random sequence was drawn.
    SequenceShuffled,
    /// The first `level` ids of the sequence were lit.
    SequenceShown { level: usize },
    /// The display phase ended and input is open.
    InputOpened,
    /// A key edge was seen during input.
    ButtonPressed(ButtonId),
    /// The press matched the sequence at `position`.
    CorrectPress { id: ButtonId, position: usize },
    /// The press did not match.
    WrongPress { expected: ButtonId, actual: ButtonId },
    /// The level was reproduced. `level` is the new level.
    LevelPassed { level: usize },
    /// The game ended.
    GameOver(GameOutcome),
    /// A fresh game was started after a game over.
    GameReset,
}

/// Logs an event when the `defmt` feature is enabled.
#[inline]
pub(crate) fn log_event(event: &GameEvent) {
    #[cfg(feature = "defmt")]
    defmt::info!("{}", event);
    #[cfg(not(feature = "defmt"))]
    let _ = event;
}

/// Outcome of one [`GameEngine::poll`](crate::engine::GameEngine::poll).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    events: Vec<GameEvent, MAX_EVENTS_PER_POLL>,
    phase: Phase,
    truncated: bool,
}

impl PollReport {
    pub(crate) fn new(phase: Phase) -> Self {
        Self {
            events: Vec::new(),
            phase,
            truncated: false,
        }
    }

    pub(crate) fn push(&mut self, event: GameEvent) {
        log_event(&event);
        if self.events.push(event).is_err() {
            self.truncated = true;
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Events in the order they happened.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Phase after the poll.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True if events were dropped because the report was full.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns true if `event` was reported.
    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}
