//! wifiqr CLI - QR codes for joining Wi-Fi networks.

mod commands;
mod ui;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use wifiqr_core::render::{DEFAULT_MIN_DIMENSION, MAX_MIN_DIMENSION};
use wifiqr_core::{AuthType, EapSettings, Error, ErrorCorrection, RenderConfig, WifiCredential};

use commands::{generate_qr, Invocation, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "wifiqr", version)]
#[command(about = "Generate Wi-Fi network QR codes", long_about = None)]
#[command(disable_help_flag = true, arg_required_else_help = true)]
struct Cli {
    /// Wireless network name (SSID)
    #[arg(short, long)]
    ssid: Option<String>,

    /// Network passphrase
    #[arg(short, long)]
    key: Option<String>,

    /// Encryption protocol: WEP, WPA, WPA2, WPA3, WPA2-EAP or nopass
    #[arg(short, long, default_value = "WPA2")]
    auth: AuthType,

    /// Mark the network as hidden
    #[arg(short = 'h', long)]
    hidden: bool,

    /// Print a text version to the terminal instead of an image
    #[arg(short, long)]
    terminal: bool,

    /// Write output to PATH (.svg for SVG, PNG otherwise; defaults to wifi-qr.png for images)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    force: bool,

    /// EAP method (PEAP, TLS, TTLS, PWD, SIM, AKA, ...)
    #[arg(short, long, help_heading = "Advanced")]
    eap_method: Option<String>,

    /// EAP phase 2 method (MSCHAPV2, GTC, ...)
    #[arg(short = 'p', long, help_heading = "Advanced")]
    ph2: Option<String>,

    /// EAP identity
    #[arg(short, long, help_heading = "Advanced")]
    identity: Option<String>,

    /// EAP anonymous identity
    #[arg(short = 'A', long, help_heading = "Advanced")]
    anonymous_identity: Option<String>,

    /// QR error correction level (L, M, Q, H)
    #[arg(long, default_value = "M", help_heading = "Advanced")]
    ec_level: ErrorCorrection,

    /// Minimum image side length in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_MIN_DIMENSION,
        value_parser = clap::value_parser!(u32).range(1..=MAX_MIN_DIMENSION as i64),
        help_heading = "Advanced"
    )]
    size: u32,

    /// Draw dark modules as blocks in terminal output (for light backgrounds)
    #[arg(long, help_heading = "Advanced")]
    no_invert: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn into_invocation(self) -> wifiqr_core::Result<Invocation> {
        let ssid = self
            .ssid
            .ok_or_else(|| Error::InvalidInput("missing required --ssid".to_string()))?;

        let credential = WifiCredential::new(ssid)
            .with_passphrase(self.key.unwrap_or_default())
            .with_auth(self.auth)
            .with_hidden(self.hidden)
            .with_eap(EapSettings {
                method: self.eap_method,
                anonymous_identity: self.anonymous_identity,
                identity: self.identity,
                phase2: self.ph2,
            });

        let mode = if self.terminal {
            OutputMode::Terminal
        } else {
            OutputMode::Image
        };

        Ok(Invocation {
            credential,
            render: RenderConfig {
                ec_level: self.ec_level,
                min_dimension: self.size,
                invert_text: !self.no_invert,
            },
            mode,
            output: self.output,
            force: self.force,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wifiqr=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let invocation = cli.into_invocation()?;

    generate_qr(&invocation)
}
