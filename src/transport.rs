//! The bus transaction behind each display update.
//!
//! [`Transport`] is the seam between the animator and the hardware: the real
//! implementation talks to a Linux `spidev` node, tests swap in a recorder.

use std::io;

/// Per-transfer bus settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingParams {
    pub speed_hz: u32,
    pub bits_per_word: u8,
    pub delay_usecs: u16,
}

impl Default for TimingParams {
    /// What the panel is specified for: 9 MHz, 8-bit words, no inter-word delay.
    fn default() -> Self {
        Self {
            speed_hz: 9_000_000,
            bits_per_word: 8,
            delay_usecs: 0,
        }
    }
}

/// One blocking, full-duplex transaction per call.
pub trait Transport {
    /// Clock `tx` out while clocking the same number of bytes into `rx`.
    ///
    /// Returns how many bytes moved. Callers treat `Ok(0)` as a fault.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], timing: &TimingParams) -> io::Result<usize>;

    /// Give the underlying device back.
    fn release(self);
}

#[cfg(feature = "hardware")]
pub use spi::SpiTransport;

#[cfg(feature = "hardware")]
mod spi {
    use super::{TimingParams, Transport};
    use crate::error::Error;
    use spidev::{Spidev, SpidevTransfer};
    use std::io;
    use std::path::{Path, PathBuf};

    /// A `/dev/spidevB.C` node opened read/write.
    pub struct SpiTransport {
        spi: Spidev,
        path: PathBuf,
    }

    impl SpiTransport {
        pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
            let path = path.as_ref().to_path_buf();
            let spi = Spidev::open(&path).map_err(|source| Error::OpenDevice {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Opened SPI device {}", path.display());
            Ok(Self { spi, path })
        }
    }

    impl Transport for SpiTransport {
        fn transfer(
            &mut self,
            tx: &[u8],
            rx: &mut [u8],
            timing: &TimingParams,
        ) -> io::Result<usize> {
            if tx.len() != rx.len() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "SPI transmit and receive buffers differ in length",
                ));
            }

            let len = tx.len();
            let mut xfer = SpidevTransfer::read_write(tx, rx);
            xfer.speed_hz = timing.speed_hz;
            xfer.bits_per_word = timing.bits_per_word;
            xfer.delay_usecs = timing.delay_usecs;

            // spidev maps a failed SPI_IOC_MESSAGE to Err; success moved the whole buffer.
            self.spi.transfer(&mut xfer)?;
            Ok(len)
        }

        fn release(self) {
            tracing::info!("Closing SPI device {}", self.path.display());
            drop(self.spi);
        }
    }
}
