//! Breathing-light demo for a 16×16 RGB LED matrix on SPI.
//!
//! Fades the whole panel from dark to full white and back until Ctrl+C,
//! then blanks it and exits. Any fault is logged and the process aborts.
//!
//! ## Usage
//! ```sh
//! sudo ./target/release/unicorn-pulse --device /dev/spidev0.0
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This binary requires the 'hardware' feature (spidev).");
    eprintln!("Build with: cargo build --release");
    eprintln!("Tests can run without it: cargo test --no-default-features");
    std::process::exit(1);
}

#[cfg(feature = "hardware")]
fn main() {
    use clap::Parser;
    use std::error::Error as _;
    use std::path::PathBuf;
    use std::time::Duration;
    use tracing_subscriber::EnvFilter;
    use unicorn_pulse::{
        Animator, DriverConfig, Error, SpiTransport, TimingParams, install_interrupt_handler,
    };

    /// Pulse an RGB LED matrix until interrupted
    #[derive(Parser)]
    #[command(name = "unicorn-pulse")]
    #[command(version)]
    struct Args {
        /// SPI device node the panel is attached to
        #[arg(long, default_value = "/dev/spidev0.0")]
        device: PathBuf,

        /// SPI clock rate in Hz
        #[arg(long, default_value = "9000000")]
        speed_hz: u32,

        /// Milliseconds between frames
        #[arg(long, default_value = "5")]
        interval_ms: u64,
    }

    fn run(config: &DriverConfig) -> Result<u64, Error> {
        let shutdown = install_interrupt_handler()?;
        let transport = SpiTransport::open(&config.device)?;
        let summary = Animator::new(transport, config).run(&shutdown)?;
        Ok(summary.frames)
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false) // Disable ANSI color codes for systemd/journald
        .compact()
        .init();

    let args = Args::parse();
    let config = DriverConfig {
        device: args.device,
        timing: TimingParams {
            speed_hz: args.speed_hz,
            ..TimingParams::default()
        },
        interval: Duration::from_millis(args.interval_ms),
    };

    tracing::info!("unicorn-pulse v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Device: {}", config.device.display());

    match run(&config) {
        Ok(frames) => tracing::info!("Shut down cleanly after {} frames", frames),
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            tracing::error!("{}", message);
            std::process::abort();
        }
    }
}
