//! The Simon-says state machine.
//!
//! Provides [`GameEngine`], which owns the sequence pool, the current level and
//! the player's progress, and drives a [`ButtonMatrix`] through the display,
//! input and game-over phases.

use crate::config::{ConfigError, GameConfig};
use crate::event::{GameEvent, PollReport, log_event};
use crate::matrix::ButtonMatrix;
use crate::pool::SequencePool;
use crate::time::{TimeInstant, TimeSource, has_elapsed};
use crate::types::{ButtonId, GameOutcome, MAX_NUM_LEDS, Phase};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use heapless::Vec;
use rand::RngCore;

/// Errors that can occur while driving the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError<E> {
    /// The matrix failed to flush or sample.
    Matrix(E),
    /// The config does not fit this engine.
    Config(ConfigError),
}

impl<E: core::fmt::Debug> core::fmt::Display for EngineError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::Matrix(err) => write!(f, "matrix error: {:?}", err),
            EngineError::Config(err) => write!(f, "config error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for EngineError<E> {}

impl<E> From<ConfigError> for EngineError<E> {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

/// Runs one Simon-says game after another on a button/LED matrix.
///
/// The engine is polled from a single loop. While the sequence is displayed it
/// only watches the clock; once input opens it samples the matrix and checks
/// every new press against the next id of the sequence. A wrong press or
/// finishing the whole pool ends the game, and the following poll starts a new
/// one with a reshuffled pool.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `M` - Matrix implementation type
/// * `T` - Time source implementation type
/// * `R` - Random number generator used for shuffling
/// * `N` - Sequence pool size, which is also the final level
pub struct GameEngine<
    't,
    I: TimeInstant,
    M: ButtonMatrix,
    T: TimeSource<I>,
    R: RngCore,
    const N: usize = MAX_NUM_LEDS,
> {
    matrix: M,
    time_source: &'t T,
    rng: R,
    config: GameConfig,
    pool: SequencePool<N>,
    level: usize,
    input: Vec<ButtonId, N>,
    phase: Phase,
    phase_start: I,
}

impl<'t, I, M, T, R, const N: usize> GameEngine<'t, I, M, T, R, N>
where
    I: TimeInstant,
    M: ButtonMatrix,
    T: TimeSource<I>,
    R: RngCore,
{
    /// Shuffles a pool and shows the first level with the default config.
    pub fn new(matrix: M, time_source: &'t T, rng: R) -> Result<Self, EngineError<M::Error>> {
        Self::with_config(matrix, time_source, rng, GameConfig::default())
    }

    /// Shuffles a pool and shows the first level.
    pub fn with_config(
        matrix: M,
        time_source: &'t T,
        mut rng: R,
        config: GameConfig,
    ) -> Result<Self, EngineError<M::Error>> {
        let pool = SequencePool::shuffled(&mut rng);
        log_event(&GameEvent::SequenceShuffled);
        Self::with_pool(matrix, time_source, rng, config, pool)
    }

    /// Starts with an explicit pool. Later games still reshuffle.
    ///
    /// # Errors
    /// * `Config` - the initial level is longer than the pool, or the pool
    ///   holds ids the matrix has no key for
    /// * `Matrix` - the first frame could not be flushed
    pub fn with_pool(
        matrix: M,
        time_source: &'t T,
        rng: R,
        config: GameConfig,
        pool: SequencePool<N>,
    ) -> Result<Self, EngineError<M::Error>> {
        config.check_pool_size(N)?;
        config.check_key_count(N, matrix.num_keys())?;

        let mut engine = Self {
            matrix,
            time_source,
            rng,
            config,
            pool,
            level: config.initial_level(),
            input: Vec::new(),
            phase: Phase::Display,
            phase_start: time_source.now(),
        };

        engine.show_sequence();
        engine.flush()?;
        log_event(&GameEvent::SequenceShown {
            level: engine.level,
        });

        Ok(engine)
    }

    /// Advances the game by one step.
    ///
    /// * `Display` - opens input once the display duration has elapsed
    /// * `Input` - samples the matrix and handles every new press in key order
    /// * `GameOver` - starts a new game
    pub fn poll(&mut self) -> Result<PollReport, EngineError<M::Error>> {
        let mut report = PollReport::new(self.phase);

        match self.phase {
            Phase::Display => {
                let now = self.time_source.now();
                if has_elapsed(now, self.phase_start, self.config.display_duration_ms()) {
                    self.open_input()?;
                    report.push(GameEvent::InputOpened);
                }
            }
            Phase::Input => self.poll_input(&mut report)?,
            Phase::GameOver(_) => self.reset(&mut report)?,
        }

        report.set_phase(self.phase);
        Ok(report)
    }

    /// Abandons the current game and starts a new one.
    pub fn restart(&mut self) -> Result<PollReport, EngineError<M::Error>> {
        let mut report = PollReport::new(self.phase);
        self.reset(&mut report)?;
        report.set_phase(self.phase);
        Ok(report)
    }

    /// Plays the start-up light chain, then shows the current level again.
    ///
    /// Every key lights up in order, then goes dark in the same order, one
    /// frame per `intro_step_ms`. The display timer restarts afterwards.
    pub fn play_intro<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), EngineError<M::Error>> {
        let keys = self.matrix.num_keys();
        let step = self.config.intro_step_ms();

        for key in 0..keys {
            self.matrix.set_led(ButtonId(key as u8));
            self.flush()?;
            delay.delay_ms(step);
        }

        for key in 0..keys {
            self.matrix.clear_led(ButtonId(key as u8));
            self.flush()?;
            delay.delay_ms(step);
        }

        self.input.clear();
        self.show_sequence();
        self.flush()
    }

    /// Polls forever, sleeping `poll_interval_ms` between iterations.
    ///
    /// Only returns if the matrix fails.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> Result<Infallible, EngineError<M::Error>> {
        loop {
            delay.delay_ms(self.config.poll_interval_ms());
            self.poll()?;
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the length of the sequence the player must reproduce.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the correct presses made so far in this level.
    pub fn input(&self) -> &[ButtonId] {
        &self.input
    }

    /// Position in the sequence of the next expected press.
    pub fn cursor(&self) -> usize {
        self.input.len()
    }

    /// Returns the id the player must press next, if input is open.
    pub fn expected(&self) -> Option<ButtonId> {
        match self.phase {
            Phase::Input => self.pool.get(self.cursor()),
            _ => None,
        }
    }

    /// Returns the full sequence pool.
    pub fn pool(&self) -> &SequencePool<N> {
        &self.pool
    }

    /// Returns the ids shown for the current level.
    pub fn active_sequence(&self) -> &[ButtonId] {
        self.pool.prefix(self.level)
    }

    /// Returns the config in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the time spent in the current phase.
    pub fn elapsed_in_phase(&self) -> I::Duration {
        self.time_source.now().duration_since(self.phase_start)
    }

    /// Returns a reference to the matrix.
    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    /// Returns a mutable reference to the matrix.
    ///
    /// Changing the display buffer directly is overwritten at the next phase change.
    pub fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    /// Consumes the engine and returns the matrix.
    pub fn into_matrix(self) -> M {
        self.matrix
    }

    fn poll_input(&mut self, report: &mut PollReport) -> Result<(), EngineError<M::Error>> {
        if !self.matrix.read_switches().map_err(EngineError::Matrix)? {
            return Ok(());
        }

        for key in 0..self.matrix.num_keys() {
            // A finished level or a wrong press ends the batch.
            if self.phase != Phase::Input {
                break;
            }

            let id = ButtonId(key as u8);
            if self.matrix.just_pressed(id) {
                self.handle_press(id, report);
            }
        }

        self.flush()
    }

    fn handle_press(&mut self, id: ButtonId, report: &mut PollReport) {
        report.push(GameEvent::ButtonPressed(id));

        let position = self.input.len();
        match self.pool.get(position) {
            Some(expected) if expected == id => {
                if self.input.push(id).is_err() {
                    self.end_game(GameOutcome::Lost, report);
                    return;
                }
                self.matrix.set_led(id);
                report.push(GameEvent::CorrectPress { id, position });

                if self.input.len() >= self.level {
                    self.complete_level(report);
                }
            }
            Some(expected) => {
                report.push(GameEvent::WrongPress {
                    expected,
                    actual: id,
                });
                self.end_game(GameOutcome::Lost, report);
            }
            None => self.end_game(GameOutcome::Lost, report),
        }
    }

    fn complete_level(&mut self, report: &mut PollReport) {
        if !self.pool.matches_prefix(&self.input) {
            self.end_game(GameOutcome::Lost, report);
            return;
        }

        if self.level + 1 > N {
            self.end_game(GameOutcome::Won, report);
            return;
        }

        self.level += 1;
        report.push(GameEvent::LevelPassed { level: self.level });

        self.show_sequence();
        report.push(GameEvent::SequenceShown { level: self.level });
    }

    fn end_game(&mut self, outcome: GameOutcome, report: &mut PollReport) {
        self.input.clear();
        self.phase = Phase::GameOver(outcome);
        report.push(GameEvent::GameOver(outcome));
    }

    fn reset(&mut self, report: &mut PollReport) -> Result<(), EngineError<M::Error>> {
        self.level = self.config.initial_level();
        self.input.clear();
        report.push(GameEvent::GameReset);

        self.pool.shuffle(&mut self.rng);
        report.push(GameEvent::SequenceShuffled);

        self.show_sequence();
        self.flush()?;
        report.push(GameEvent::SequenceShown { level: self.level });
        Ok(())
    }

    /// Lights the active sequence and starts the display timer. Does not flush.
    fn show_sequence(&mut self) {
        self.matrix.clear();
        for &id in self.pool.prefix(self.level) {
            self.matrix.set_led(id);
        }

        self.phase = Phase::Display;
        self.phase_start = self.time_source.now();
    }

    fn open_input(&mut self) -> Result<(), EngineError<M::Error>> {
        self.matrix.clear();
        self.flush()?;

        // Drop edges from keys pressed while the sequence was shown.
        self.matrix.read_switches().map_err(EngineError::Matrix)?;

        self.input.clear();
        self.phase = Phase::Input;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EngineError<M::Error>> {
        self.matrix.write_display().map_err(EngineError::Matrix)
    }
}
