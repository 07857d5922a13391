//! Shared test infrastructure for trellis-simon integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rand::SeedableRng;
use rand::rngs::SmallRng;
use trellis_simon::{
    ButtonId, ButtonMatrix, GameConfig, GameEngine, MemoryMatrix, SequencePool, TimeDuration,
    TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that advances a mock clock instead of sleeping
pub struct MockDelay<'a> {
    timer: &'a MockTimeSource,
    pub total_ms: u64,
    pub calls: usize,
}

impl<'a> MockDelay<'a> {
    pub fn new(timer: &'a MockTimeSource) -> Self {
        Self {
            timer,
            total_ms: 0,
            calls: 0,
        }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let ms = (ns / 1_000_000) as u64;
        self.timer.advance(ms);
        self.total_ms += ms;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.advance(ms as u64);
        self.total_ms += ms as u64;
        self.calls += 1;
    }
}

// ============================================================================
// Mock Matrix
// ============================================================================

/// Matrix whose bus fails once `fail` is set
pub struct FlakyMatrix {
    pub inner: MemoryMatrix,
    pub fail: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

impl FlakyMatrix {
    pub fn new() -> Self {
        Self {
            inner: MemoryMatrix::new(),
            fail: false,
        }
    }
}

impl ButtonMatrix for FlakyMatrix {
    type Error = BusError;

    fn num_keys(&self) -> usize {
        self.inner.num_keys()
    }

    fn set_led(&mut self, id: ButtonId) {
        self.inner.set_led(id);
    }

    fn clear_led(&mut self, id: ButtonId) {
        self.inner.clear_led(id);
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn write_display(&mut self) -> Result<(), BusError> {
        if self.fail {
            return Err(BusError);
        }
        let _ = self.inner.write_display();
        Ok(())
    }

    fn read_switches(&mut self) -> Result<bool, BusError> {
        if self.fail {
            return Err(BusError);
        }
        Ok(self.inner.read_switches().unwrap_or(false))
    }

    fn just_pressed(&self, id: ButtonId) -> bool {
        self.inner.just_pressed(id)
    }
}

// ============================================================================
// Engine Helpers
// ============================================================================

pub type TestEngine<'t> = GameEngine<'t, TestInstant, MemoryMatrix, MockTimeSource, SmallRng>;

/// Pool used by the worked scenarios
pub const SCENARIO_POOL: [u8; 10] = [2, 7, 1, 9, 0, 5, 8, 3, 4, 6];

pub fn ids(raw: &[u8]) -> Vec<ButtonId> {
    raw.iter().map(|&i| ButtonId(i)).collect()
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Engine with the scenario pool, default config, display phase at t=0
pub fn scenario_engine(timer: &MockTimeSource) -> TestEngine<'_> {
    let pool = SequencePool::from_ids(&ids(&SCENARIO_POOL)).unwrap();
    GameEngine::with_pool(MemoryMatrix::new(), timer, rng(42), GameConfig::default(), pool)
        .unwrap()
}

/// Lets the display phase run out and opens input
pub fn open_input(engine: &mut TestEngine<'_>, timer: &MockTimeSource) {
    timer.advance(engine.config().display_duration_ms());
    engine.poll().unwrap();
}

/// Presses each id in its own poll
pub fn press_in_order(engine: &mut TestEngine<'_>, presses: &[ButtonId]) {
    for &id in presses {
        engine.matrix_mut().press(id);
        engine.poll().unwrap();
    }
}

/// Reproduces the current level correctly
pub fn play_level(engine: &mut TestEngine<'_>, timer: &MockTimeSource) {
    open_input(engine, timer);
    let sequence: Vec<ButtonId> = engine.active_sequence().to_vec();
    press_in_order(engine, &sequence);
}
