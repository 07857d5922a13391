#![no_std]
#![no_main]

use embedded_hal::delay::DelayNs;
use fugit::RateExtU32;
use panic_halt as _;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, I2C, Sio, Timer,
    clocks::init_clocks_and_plls,
    gpio::{FunctionI2C, Pin, PullUp},
    pac,
    rosc::RingOscillator,
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use rp_pico_demos::time::HardwareTimer;
use trellis_simon::{GameEngine, GameEvent, TRELLIS_ADDRESS, Trellis};

/// Collects a seed from the ring oscillator's jitter
fn entropy_seed(rosc: &RingOscillator<rp_pico::hal::rosc::Enabled>) -> u64 {
    let mut seed = 0u64;
    for _ in 0..64 {
        seed = (seed << 1) | rosc.get_random_bit() as u64;
    }
    seed
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Trellis Simon ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Trellis on I2C0: GPIO4 (SDA), GPIO5 (SCL)
    let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio4.reconfigure();
    let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio5.reconfigure();
    let i2c = I2C::i2c0(
        pac.I2C0,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let mut trellis = Trellis::new(i2c);
    if let Err(e) = trellis.begin(TRELLIS_ADDRESS) {
        rprintln!("Trellis not found at {:#04x}: {:?}", TRELLIS_ADDRESS, e);
        loop {
            cortex_m::asm::wfi();
        }
    }

    rprintln!("Trellis configured at {:#04x}", TRELLIS_ADDRESS);

    // Seed the shuffle from ring oscillator noise
    let rosc = RingOscillator::new(pac.ROSC).initialize();
    let rng = SmallRng::seed_from_u64(entropy_seed(&rosc));

    // Timer doubles as clock and delay
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let time_source = HardwareTimer::new(timer);
    let mut delay = timer;

    rprintln!("=== Hardware Ready ===");

    let mut game = match GameEngine::<_, _, _, _, 10>::new(trellis, &time_source, rng) {
        Ok(game) => game,
        Err(e) => {
            rprintln!("Failed to start game: {:?}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    if let Err(e) = game.play_intro(&mut delay) {
        rprintln!("Intro failed: {:?}", e);
    }

    rprintln!("Sequence: {:?}", game.pool().as_slice());

    let poll_interval = game.config().poll_interval_ms();
    loop {
        delay.delay_ms(poll_interval);

        match game.poll() {
            Ok(report) => {
                for event in report.events() {
                    rprintln!("{:?}", event);
                    if *event == GameEvent::SequenceShuffled {
                        rprintln!("Sequence: {:?}", game.pool().as_slice());
                    }
                }
            }
            Err(e) => rprintln!("Trellis error: {:?}", e),
        }
    }
}
