//! Driver for the 4x4 Trellis keypad and its HT16K33 controller.
//!
//! The HT16K33 scans a key matrix and drives an LED matrix from a single I2C
//! address. The Trellis PCB wires keys and LEDs to controller rows and columns
//! in a scrambled order, so every access goes through a lookup table that maps
//! a key number `0..16` to a controller bit.

use crate::matrix::ButtonMatrix;
use crate::types::{ButtonId, NUM_KEYS, TRELLIS_ADDRESS};
use embedded_hal::i2c::I2c;

const CMD_OSCILLATOR_ON: u8 = 0x21;
const CMD_BLINK: u8 = 0x80;
const BLINK_DISPLAY_ON: u8 = 0x01;
const CMD_BRIGHTNESS: u8 = 0xE0;
const CMD_INTERRUPT_ON: u8 = 0xA1;
const REG_DISPLAY: u8 = 0x00;
const REG_KEYS: u8 = 0x40;

const KEY_BYTES: usize = 6;
const DISPLAY_ROWS: usize = 8;

/// Controller bit for each key's LED. High nibble is the row, low nibble the bit.
const LED_LUT: [u8; NUM_KEYS] = [
    0x3A, 0x37, 0x35, 0x34, //
    0x28, 0x29, 0x23, 0x24, //
    0x16, 0x1B, 0x11, 0x10, //
    0x0E, 0x0D, 0x0C, 0x02,
];

/// Controller bit for each key's switch. High nibble is the byte, low nibble the bit.
const BUTTON_LUT: [u8; NUM_KEYS] = [
    0x07, 0x04, 0x02, 0x22, //
    0x05, 0x06, 0x00, 0x01, //
    0x03, 0x10, 0x30, 0x21, //
    0x13, 0x12, 0x11, 0x31,
];

/// Hardware blink modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkRate {
    Off = 0,
    TwoHz = 1,
    OneHz = 2,
    HalfHz = 3,
}

/// A single Trellis board on an I2C bus.
pub struct Trellis<I2C> {
    i2c: I2C,
    address: u8,
    display: [u16; DISPLAY_ROWS],
    keys: [u8; KEY_BYTES],
    last_keys: [u8; KEY_BYTES],
}

impl<I2C: I2c> Trellis<I2C> {
    /// Wraps a bus. No traffic is generated until [`begin`](Self::begin).
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: TRELLIS_ADDRESS,
            display: [0; DISPLAY_ROWS],
            keys: [0; KEY_BYTES],
            last_keys: [0; KEY_BYTES],
        }
    }

    /// Starts the controller at `address` and blanks the display.
    ///
    /// Turns the oscillator on, disables blinking, sets full brightness and
    /// enables the key interrupt line.
    pub fn begin(&mut self, address: u8) -> Result<(), I2C::Error> {
        self.address = address;
        self.command(CMD_OSCILLATOR_ON)?;
        self.blink_rate(BlinkRate::Off)?;
        self.set_brightness(15)?;
        self.command(CMD_INTERRUPT_ON)?;

        self.clear();
        self.write_display()
    }

    /// Sets display brightness. Values above 15 are clamped.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), I2C::Error> {
        self.command(CMD_BRIGHTNESS | level.min(15))
    }

    /// Sets the hardware blink mode. The display stays on.
    pub fn blink_rate(&mut self, rate: BlinkRate) -> Result<(), I2C::Error> {
        self.command(CMD_BLINK | BLINK_DISPLAY_ON | ((rate as u8) << 1))
    }

    /// Returns true if LED `id` is on in the display buffer.
    pub fn is_led(&self, id: ButtonId) -> bool {
        match LED_LUT.get(id.index()) {
            Some(&bit) => self.display[(bit >> 4) as usize] & (1 << (bit & 0x0F)) != 0,
            None => false,
        }
    }

    /// Returns true if key `id` was down at the last sample.
    pub fn is_pressed(&self, id: ButtonId) -> bool {
        Self::key_down(&self.keys, id)
    }

    /// Returns true if key `id` was down at the previous sample.
    pub fn was_pressed(&self, id: ButtonId) -> bool {
        Self::key_down(&self.last_keys, id)
    }

    /// Returns true if key `id` went up between the last two samples.
    pub fn just_released(&self, id: ButtonId) -> bool {
        !self.is_pressed(id) && self.was_pressed(id)
    }

    /// Bus address in use.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn key_down(keys: &[u8; KEY_BYTES], id: ButtonId) -> bool {
        match BUTTON_LUT.get(id.index()) {
            Some(&bit) => keys[(bit >> 4) as usize] & (1 << (bit & 0x0F)) != 0,
            None => false,
        }
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[cmd])
    }
}

impl<I2C: I2c> ButtonMatrix for Trellis<I2C> {
    type Error = I2C::Error;

    fn num_keys(&self) -> usize {
        NUM_KEYS
    }

    fn set_led(&mut self, id: ButtonId) {
        if let Some(&bit) = LED_LUT.get(id.index()) {
            self.display[(bit >> 4) as usize] |= 1 << (bit & 0x0F);
        }
    }

    fn clear_led(&mut self, id: ButtonId) {
        if let Some(&bit) = LED_LUT.get(id.index()) {
            self.display[(bit >> 4) as usize] &= !(1 << (bit & 0x0F));
        }
    }

    fn clear(&mut self) {
        self.display = [0; DISPLAY_ROWS];
    }

    fn write_display(&mut self) -> Result<(), I2C::Error> {
        let mut frame = [0u8; 1 + DISPLAY_ROWS * 2];
        frame[0] = REG_DISPLAY;
        for (row, word) in self.display.iter().enumerate() {
            let [lo, hi] = word.to_le_bytes();
            frame[1 + row * 2] = lo;
            frame[2 + row * 2] = hi;
        }
        self.i2c.write(self.address, &frame)
    }

    fn read_switches(&mut self) -> Result<bool, I2C::Error> {
        self.last_keys = self.keys;
        self.i2c.write_read(self.address, &[REG_KEYS], &mut self.keys)?;
        Ok(self.keys != self.last_keys)
    }

    fn just_pressed(&self, id: ButtonId) -> bool {
        self.is_pressed(id) && !self.was_pressed(id)
    }
}
