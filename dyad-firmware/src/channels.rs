//! Inter-task shared state
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

use dyad_core::DigitRenderer;
use dyad_hal_rp2040::RpLines;
use dyad_protocol::Reply;

/// Channel capacity for outgoing replies
const REPLY_CHANNEL_SIZE: usize = 4;

/// The display device
///
/// `None` until the line table has been acquired. Every update holds the
/// lock for all sixteen segment writes, so readers never see a torn value.
pub static DISPLAY: Mutex<CriticalSectionRawMutex, Option<DigitRenderer<RpLines>>> =
    Mutex::new(None);

/// A reply queued for the control UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outgoing {
    pub reply: Reply,
    /// Client used the text form; answer in text
    pub text: bool,
}

/// Replies from the control RX task to the control TX task
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Outgoing, REPLY_CHANNEL_SIZE> =
    Channel::new();
