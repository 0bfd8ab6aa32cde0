//! Breathing-light driver for a 16×16 RGB LED matrix on an SPI bus.
//!
//! The pieces compose in a straight line:
//! - [`Framebuffer`] holds the pixel grid with bounds-checked writes
//! - [`protocol`] lays the grid out as the single bus transfer the panel expects
//! - [`Transport`] performs that transfer against the device
//! - [`Animator`] runs the pulse, paces frames and blanks the panel on Ctrl+C

pub mod animation;
pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod protocol;
pub mod transport;

pub use animation::{Direction, Pulse};
pub use driver::{Animator, DriverConfig, RunSummary};
pub use error::{Error, PreconditionViolation};
pub use framebuffer::Framebuffer;
pub use transport::{TimingParams, Transport};

#[cfg(feature = "hardware")]
pub use transport::SpiTransport;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ── Panel geometry ─────────────────────────────────────────────────

/// Panel width in pixels.
pub const WIDTH: usize = 16;
/// Panel height in pixels.
pub const HEIGHT: usize = 16;
/// One byte each for red, green and blue.
pub const BYTES_PER_PIXEL: usize = 3;
/// Size of the raw pixel data, without the command byte.
pub const PIXEL_BYTES: usize = WIDTH * HEIGHT * BYTES_PER_PIXEL;

// ── Color ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The same level on all three channels.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

// ── Shutdown signalling ────────────────────────────────────────────

/// Set once by the interrupt handler, polled by the run loop.
///
/// Cloning shares the same flag. Nothing besides the single boolean is
/// touched from the handler.
///
/// # Rust concept: Arc and AtomicBool
/// The handler closure runs outside the main loop, so the flag must be
/// `Send` and safe to write while the loop reads it. `AtomicBool` gives
/// that without a mutex, which matters here: a handler must never block
/// on a lock the interrupted code might be holding. `Arc` lets the
/// handler and the loop each own a handle to the same boolean.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Install a SIGINT (Ctrl+C) handler that raises the returned flag.
pub fn install_interrupt_handler() -> Result<ShutdownFlag, Error> {
    let flag = ShutdownFlag::new();
    let handler_flag = flag.clone();

    ctrlc::set_handler(move || handler_flag.request()).map_err(Error::SignalHandler)?;

    Ok(flag)
}
