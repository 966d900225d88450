//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod control_rx;
pub mod control_tx;

pub use control_rx::control_rx_task;
pub use control_tx::control_tx_task;
