//! Control UART transmit task
//!
//! Sends replies back to the host, in the form the request used.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use dyad_protocol::TextReply;

use crate::channels::{Outgoing, REPLY_CHANNEL};

/// Control TX task - sends replies to the host
#[embassy_executor::task]
pub async fn control_tx_task(mut tx: BufferedUartTx) {
    info!("Control TX task started");

    loop {
        let outgoing = REPLY_CHANNEL.receive().await;
        send_reply(&mut tx, outgoing).await;
    }
}

async fn send_reply(tx: &mut BufferedUartTx, outgoing: Outgoing) {
    let result = if outgoing.text {
        let text = TextReply::format(&outgoing.reply);
        tx.write_all(text.as_bytes()).await
    } else {
        let frame = match outgoing.reply.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to build reply frame: {:?}", e);
                return;
            }
        };
        let mut buf = [0u8; 32];
        match frame.encode(&mut buf) {
            Ok(len) => tx.write_all(&buf[..len]).await,
            Err(e) => {
                warn!("Failed to encode reply frame: {:?}", e);
                return;
            }
        }
    };

    match result {
        Ok(()) => trace!("Reply sent: {:?}", outgoing.reply),
        Err(e) => warn!("Failed to send reply: {:?}", e),
    }
}
