//! relayctl command-line entry point.

use std::collections::HashSet;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use relayctl_protocol::{ADDR_MAX, ADDR_MIN, DEFAULT_ACK_TIMEOUT, DEFAULT_BAUD};
use relayctl::{Feature, SerialTransport, Switch};
use tracing_subscriber::EnvFilter;

/// USB-to-serial relay switch controller
#[derive(Parser)]
#[command(
    name = "relayctl",
    version,
    about = "Drive LCUS-type USB-to-serial relay switches",
    long_about = None
)]
struct Cli {
    /// Serial port, e.g. /dev/ttyUSB0
    #[arg(short, long)]
    port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Device address (1..=253)
    #[arg(short, long, default_value_t = 1)]
    addr: u8,

    /// Device features to assume (repeatable), e.g. --feature ack
    #[arg(long = "feature", value_name = "FEATURE")]
    features: Vec<Feature>,

    /// Log protocol traffic
    #[arg(short = 'l', long)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Switch the relay on
    On,
    /// Switch the relay off
    Off,
    /// Toggle the relay (requires the ack feature)
    Toggle,
    /// Print the relay state
    Status,
    /// Pulse the relay: off, wait, on (or on, wait, off with --reverse)
    Reset {
        /// Delay between the two edges, in seconds
        #[arg(short, long, default_value_t = 1.0)]
        delay: f64,
        /// Pulse on-then-off instead of off-then-on
        #[arg(short, long)]
        reverse: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("relayctl=debug,relayctl_protocol=debug")
    } else {
        EnvFilter::try_from_env("RELAYCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> relayctl::Result<()> {
    let transport = SerialTransport::open(&cli.port, cli.baud, DEFAULT_ACK_TIMEOUT)?;
    let features: HashSet<Feature> = cli.features.iter().copied().collect();
    let mut switch = Switch::new(transport, cli.addr, features)?;

    match cli.action {
        Action::On => switch.on(),
        Action::Off => switch.off(),
        Action::Toggle => switch.toggle(),
        Action::Status => {
            // With the ack feature the constructor has already queried the
            // device; without it this is the optimistic cache
            println!("{}", switch.status());
            Ok(())
        }
        Action::Reset { delay, reverse } => {
            switch.reset(Duration::from_secs_f64(delay), reverse)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !(ADDR_MIN..=ADDR_MAX).contains(&cli.addr) {
        eprintln!(
            "invalid device address {} (valid range {}..={})",
            cli.addr, ADDR_MIN, ADDR_MAX
        );
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
