//! tivaport blinky
//!
//! Cycles the LaunchPad's tri-color LED through pseudo-random colors.
//! Each frame pulses the green pin through the bit-addressed data window,
//! then shows a new color and busy-waits.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use {defmt_rtt as _, panic_probe as _};

use tivaport_drivers::led::{GpioRgbLed, RgbLed};
use tivaport_drivers::rng::Lcg;
use tivaport_hal_tm4c123::regs::{Den, Dir};
use tivaport_hal_tm4c123::{ClockRegister, PinAllocator, Port, PortId};

mod board;
mod config;

/// Main entry point
#[entry]
fn main() -> ! {
    info!("tivaport-blinky starting...");

    let ports = PortId::ALL.map(Port::new);

    // Claim the LED pins; board tables with a pin listed twice show up here
    let mut claims = PinAllocator::new();
    for (channel, (port, pin, _)) in board::LED_PINS {
        if let Err(e) = claims.allocate(port, pin) {
            warn!("LED {} on P{}{}: {}", channel, port, pin, e);
        }
    }

    // Clock every port that carries an LED pin, then make the pins outputs
    for port in ports.iter() {
        let mask = claims.port_mask(port.id());
        if mask == 0 {
            continue;
        }
        port.initialize(
            &[ClockRegister::RunMode],
            &[Dir::set(mask).into(), Den::set(mask).into()],
        );
        if port.is_present() {
            info!("GPIO{} ready, outputs {=u8:#b}", port.id(), mask);
        } else {
            error!("GPIO{} identification mismatch: {=u32:#x}", port.id(), port.primecell_id());
        }
    }

    let (red_port, red_pin, _) = board::LED_RED;
    let (green_port, green_pin, _) = board::LED_GREEN;
    let (blue_port, blue_pin, _) = board::LED_BLUE;

    let mut led = GpioRgbLed::new(
        unwrap!(ports[red_port.index()].pin(red_pin)),
        unwrap!(ports[green_port.index()].pin(green_pin)),
        unwrap!(ports[blue_port.index()].pin(blue_pin)),
        config::LED_THRESHOLD,
        board::LED_INVERTED,
    );
    led.set_intensity(config::LED_INTENSITY);

    let heartbeat = ports[green_port.index()].data_bits(&[green_pin]);
    let mut rng = Lcg::new(config::RNG_SEED);

    info!("Running, {} cycles per frame", config::DELAY_CYCLES);

    loop {
        let color = rng.next_color();

        if board::LED_INVERTED {
            heartbeat.clear();
        } else {
            heartbeat.set();
        }
        led.set_color(color);
        debug!("color r={} g={} b={}", color.red, color.green, color.blue);

        cortex_m::asm::delay(config::DELAY_CYCLES);
    }
}
