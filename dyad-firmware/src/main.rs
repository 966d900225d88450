//! Dyad - two-digit seven-segment display controller
//!
//! Firmware binary for RP2040-based boards. The display wiring comes from
//! display.toml; the host sets the shown number over UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dyad_core::config::{DisplayConfig, LINE_LABELS};
use dyad_core::DigitRenderer;
use dyad_hal_rp2040::{pin_bank, LineProvider, RpLineProvider};

use crate::channels::DISPLAY;
use crate::config::parse_config;

/// Embedded display configuration (compiled into firmware)
/// Edit display.toml and rebuild to rewire
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dyad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // GPIO0/1 belong to UART0 and are never put in the bank
    let bank = pin_bank!(p;
        2 => PIN_2, 3 => PIN_3, 4 => PIN_4, 5 => PIN_5,
        6 => PIN_6, 7 => PIN_7, 8 => PIN_8, 9 => PIN_9,
        10 => PIN_10, 11 => PIN_11, 12 => PIN_12, 13 => PIN_13,
        14 => PIN_14, 15 => PIN_15, 16 => PIN_16, 17 => PIN_17,
        18 => PIN_18, 19 => PIN_19, 20 => PIN_20, 21 => PIN_21,
        22 => PIN_22, 23 => PIN_23, 24 => PIN_24, 25 => PIN_25,
        26 => PIN_26, 27 => PIN_27, 28 => PIN_28, 29 => PIN_29,
    );
    let mut provider = RpLineProvider::new(bank);

    let lines = match provider.acquire(config.lines.as_slice()) {
        Ok(lines) => lines,
        Err(e) => {
            let label = LINE_LABELS.get(e.index).copied().unwrap_or("?");
            error!(
                "Failed to acquire line {} ({}) on gpio{}: {:?}",
                e.index, label, e.pin, e.kind
            );
            error!("Display not started");
            park().await
        }
    };
    info!("Acquired {} display lines", config.lines.as_slice().len());

    {
        let mut renderer = DigitRenderer::new(lines);
        renderer.display(0);
        *DISPLAY.lock().await = Some(renderer);
    }
    info!("Display initialized, showing 0");

    // Setup UART for the control channel
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.control.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.control.baud_rate);

    spawner.spawn(tasks::control_rx_task(rx)).unwrap();
    spawner.spawn(tasks::control_tx_task(tx)).unwrap();

    info!("All tasks spawned, firmware running");

    // The provider keeps the unused pins; nothing else to do here
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat ({} free pins)", free_pins(&provider));
    }
}

/// Parse the embedded configuration, falling back to the board default
fn load_config() -> DisplayConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs layers display.toml over the same defaults and validates it
            warn!("Failed to parse embedded config: {:?}", e);
            warn!("Using board default wiring");
            DisplayConfig::default()
        }
    }
}

fn free_pins(provider: &RpLineProvider) -> usize {
    (0..dyad_hal_rp2040::GPIO_COUNT as u8)
        .filter(|&n| provider.pool().is_available(n))
        .count()
}

/// Idle forever without bringing the display up
async fn park() -> ! {
    loop {
        embassy_time::Timer::after_secs(60).await;
    }
}
