//! Error types for the driver.
//!
//! Every variant here is fatal. The binary logs the error and aborts; the
//! library only reports it so tests can observe which kind occurred.

use std::io;
use std::path::PathBuf;

/// A pixel write that broke the framebuffer's addressing contract.
///
/// This is a programming error in the animation code, never bad input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("parameter '{param}' is {value}, should be less than {limit}")]
pub struct PreconditionViolation {
    pub param: &'static str,
    pub value: u64,
    pub limit: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),

    #[error("failed to open SPI device {}", path.display())]
    OpenDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install SIGINT handler")]
    SignalHandler(#[source] ctrlc::Error),

    #[error("failed to send SPI transfer")]
    Transfer(#[source] io::Error),

    #[error("SPI transfer moved {transferred} bytes")]
    TransportFault { transferred: usize },
}
