//! Control UART receive task
//!
//! Splits the incoming byte stream into requests and drives the display.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use dyad_core::input::InputError;
use dyad_core::render::clamp_value;
use dyad_protocol::{NakReason, Reply, Request, RequestRouter};

use crate::channels::{Outgoing, DISPLAY, REPLY_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Control RX task - receives requests from the host
#[embassy_executor::task]
pub async fn control_rx_task(mut rx: BufferedUartRx) {
    info!("Control RX task started");

    let mut router = RequestRouter::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(request) = router.feed(byte) {
                        handle_request(request).await;
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Apply one request and queue the reply
async fn handle_request(request: Request) {
    let reply = match request {
        Request::Command(cmd) => {
            debug!("Command: {:?}", cmd);
            show(cmd.requested_value()).await
        }
        Request::Text(Ok(value)) => {
            debug!("Text write: {}", value);
            show(value).await
        }
        Request::Text(Err(InputError::TooLong)) => {
            warn!("Text write too long");
            Reply::Nak(NakReason::TooLong)
        }
        Request::BadFrame(reason) => {
            warn!("Bad frame: {:?}", reason);
            Reply::Nak(reason)
        }
    };

    let outgoing = Outgoing {
        reply,
        text: request.is_text(),
    };
    if REPLY_CHANNEL.try_send(outgoing).is_err() {
        warn!("Reply channel full, dropping reply");
    }
}

/// Put a value on the display and build the acknowledgement
async fn show(value: u32) -> Reply {
    let mut display = DISPLAY.lock().await;
    match display.as_mut() {
        Some(renderer) => {
            renderer.display(value);
            Reply::Ack {
                value: clamp_value(value),
            }
        }
        None => {
            error!("Display not initialized");
            Reply::Nak(NakReason::BadPayload)
        }
    }
}
