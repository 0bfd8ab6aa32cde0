//! The run loop: animate, transmit, pace, and blank the panel on the way out.
//!
//! The animator owns everything that changes per frame (framebuffer, pulse
//! state, transfer buffers) and the transport. It runs on the calling thread;
//! the only thing shared with another context is the [`ShutdownFlag`].

use crate::ShutdownFlag;
use crate::animation::Pulse;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::protocol::FRAME_LEN;
use crate::transport::{TimingParams, Transport};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Runtime settings for one driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub device: PathBuf,
    pub timing: TimingParams,
    /// Sleep between ticks, and before the final blank frame.
    pub interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/spidev0.0"),
            timing: TimingParams::default(),
            interval: Duration::from_millis(5),
        }
    }
}

/// What a finished run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Animation frames sent, not counting the final blank frame.
    pub frames: u64,
}

pub struct Animator<T: Transport> {
    transport: T,
    framebuffer: Framebuffer,
    pulse: Pulse,
    tx: Box<[u8; FRAME_LEN]>,
    rx: Box<[u8; FRAME_LEN]>,
    timing: TimingParams,
    interval: Duration,
    frames: u64,
    slow_ticks: u64,
}

impl<T: Transport> Animator<T> {
    pub fn new(transport: T, config: &DriverConfig) -> Self {
        Self {
            transport,
            framebuffer: Framebuffer::new(),
            pulse: Pulse::new(),
            tx: Box::new([0; FRAME_LEN]),
            rx: Box::new([0; FRAME_LEN]),
            timing: config.timing,
            interval: config.interval,
            frames: 0,
            slow_ticks: 0,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn pulse(&self) -> Pulse {
        self.pulse
    }

    /// Send the framebuffer to the panel.
    fn update(&mut self) -> Result<(), Error> {
        self.framebuffer.serialize_into(&mut self.tx);
        self.rx[0] = 0;

        let transferred = self
            .transport
            .transfer(&self.tx[..], &mut self.rx[..], &self.timing)
            .map_err(Error::Transfer)?;

        if transferred == 0 {
            return Err(Error::TransportFault { transferred });
        }
        Ok(())
    }

    /// Render and send one frame of the pulse, then step the animation.
    ///
    /// Does not sleep; pacing belongs to [`run`](Self::run).
    pub fn tick(&mut self) -> Result<(), Error> {
        let level = u32::from(self.pulse.brightness());
        self.framebuffer.fill(level, level, level)?;
        self.update()?;
        self.frames += 1;
        self.pulse.advance();
        Ok(())
    }

    /// Animate until `shutdown` is raised, then blank the panel and release
    /// the transport.
    ///
    /// The flag is checked once per tick, before rendering. Any error ends the
    /// run at once without the blank frame.
    ///
    /// # Rust concept: consuming `self`
    /// `run` takes the animator by value. Once it returns, the transport has
    /// either been released or dropped along with the animator, so the caller
    /// cannot touch a closed device by accident. The compiler enforces this:
    /// using the animator after `run` is a "use of moved value" error.
    pub fn run(mut self, shutdown: &ShutdownFlag) -> Result<RunSummary, Error> {
        tracing::info!(
            "Pulsing at {} Hz SPI, {} ms per tick",
            self.timing.speed_hz,
            self.interval.as_millis()
        );

        while !shutdown.is_requested() {
            let tick_start = Instant::now();
            self.tick()?;
            let tick_time = tick_start.elapsed();

            if !self.interval.is_zero() && tick_time > self.interval {
                self.slow_ticks += 1;
                if self.slow_ticks <= 5 {
                    tracing::warn!(
                        "Tick {} took {}µs (interval: {}µs)",
                        self.frames,
                        tick_time.as_micros(),
                        self.interval.as_micros()
                    );
                }
            }

            thread::sleep(self.interval);
        }

        self.shutdown()
    }

    fn shutdown(mut self) -> Result<RunSummary, Error> {
        tracing::info!(
            "Shutdown requested after {} frames, blanking display",
            self.frames
        );

        // Let a transaction the interrupt landed on settle first.
        thread::sleep(self.interval);

        self.framebuffer.clear()?;
        self.update()?;

        if self.slow_ticks > 0 {
            tracing::warn!(
                "{} of {} ticks overran the interval",
                self.slow_ticks,
                self.frames
            );
        }

        let summary = RunSummary {
            frames: self.frames,
        };
        self.transport.release();
        Ok(summary)
    }
}
