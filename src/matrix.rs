//! Button/LED matrix hardware abstraction.
//!
//! [`ButtonMatrix`] is the only surface through which the game touches
//! hardware. LED writes go to an in-memory buffer and become visible on
//! [`write_display`](ButtonMatrix::write_display); button state is sampled by
//! [`read_switches`](ButtonMatrix::read_switches) and queried per key with
//! [`just_pressed`](ButtonMatrix::just_pressed).
//!
//! Two implementations ship with the crate: [`Trellis`](crate::trellis::Trellis)
//! for the real HT16K33 board and [`MemoryMatrix`] for tests and simulation.

use crate::types::{ButtonId, NUM_KEYS};
use core::convert::Infallible;

/// Trait for abstracting a combined button/LED matrix.
pub trait ButtonMatrix {
    /// Error raised by bus transfers.
    type Error;

    /// Number of addressable keys.
    fn num_keys(&self) -> usize;

    /// Marks LED `id` on in the display buffer.
    ///
    /// Ids outside `[0, num_keys)` are ignored.
    fn set_led(&mut self, id: ButtonId);

    /// Marks LED `id` off in the display buffer.
    fn clear_led(&mut self, id: ButtonId);

    /// Marks every LED off in the display buffer.
    fn clear(&mut self);

    /// Pushes the display buffer to the hardware.
    fn write_display(&mut self) -> Result<(), Self::Error>;

    /// Samples the buttons. Returns true if any key changed state.
    fn read_switches(&mut self) -> Result<bool, Self::Error>;

    /// Returns true if `id` went down between the last two samples.
    fn just_pressed(&self, id: ButtonId) -> bool;
}

/// In-memory matrix for tests and host simulation.
///
/// Presses are queued with [`press`](MemoryMatrix::press) and reported as
/// edges by the next [`read_switches`](ButtonMatrix::read_switches). The
/// display buffer and the flushed frame are tracked separately so callers can
/// check that output was actually committed.
#[derive(Debug, Clone)]
pub struct MemoryMatrix<const K: usize = NUM_KEYS> {
    buffer: [bool; K],
    shown: [bool; K],
    queued: [bool; K],
    pressed: [bool; K],
    flushes: usize,
}

impl<const K: usize> MemoryMatrix<K> {
    /// Creates a dark matrix with no pending presses.
    pub fn new() -> Self {
        Self {
            buffer: [false; K],
            shown: [false; K],
            queued: [false; K],
            pressed: [false; K],
            flushes: 0,
        }
    }

    /// Queues a press of `id` for the next sample.
    pub fn press(&mut self, id: ButtonId) {
        if let Some(slot) = self.queued.get_mut(id.index()) {
            *slot = true;
        }
    }

    /// Queues several presses for the same sample.
    pub fn press_all(&mut self, ids: &[ButtonId]) {
        for &id in ids {
            self.press(id);
        }
    }

    /// Returns true if LED `id` was on in the last flushed frame.
    pub fn is_lit(&self, id: ButtonId) -> bool {
        self.shown.get(id.index()).copied().unwrap_or(false)
    }

    /// Returns true if LED `id` is on in the unflushed buffer.
    pub fn is_buffered(&self, id: ButtonId) -> bool {
        self.buffer.get(id.index()).copied().unwrap_or(false)
    }

    /// Ids lit in the last flushed frame, ascending.
    pub fn lit(&self) -> heapless::Vec<ButtonId, K> {
        self.shown
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| ButtonId(i as u8))
            .collect()
    }

    /// Number of `write_display` calls so far.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl<const K: usize> Default for MemoryMatrix<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: usize> ButtonMatrix for MemoryMatrix<K> {
    type Error = Infallible;

    fn num_keys(&self) -> usize {
        K
    }

    fn set_led(&mut self, id: ButtonId) {
        if let Some(slot) = self.buffer.get_mut(id.index()) {
            *slot = true;
        }
    }

    fn clear_led(&mut self, id: ButtonId) {
        if let Some(slot) = self.buffer.get_mut(id.index()) {
            *slot = false;
        }
    }

    fn clear(&mut self) {
        self.buffer = [false; K];
    }

    fn write_display(&mut self) -> Result<(), Infallible> {
        self.shown = self.buffer;
        self.flushes += 1;
        Ok(())
    }

    fn read_switches(&mut self) -> Result<bool, Infallible> {
        let changed = self.queued.iter().any(|q| *q) || self.pressed.iter().any(|p| *p);
        self.pressed = self.queued;
        self.queued = [false; K];
        Ok(changed)
    }

    fn just_pressed(&self, id: ButtonId) -> bool {
        self.pressed.get(id.index()).copied().unwrap_or(false)
    }
}
