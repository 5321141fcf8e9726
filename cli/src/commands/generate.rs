//! Generate command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};
use wifiqr_core::{render_image, render_svg, render_text, RenderConfig, WifiCredential};

use crate::ui::{confirm_overwrite, print_qr_lines};

/// Image written when no output path is given.
pub const DEFAULT_IMAGE_PATH: &str = "wifi-qr.png";

/// How the QR code is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// PNG or SVG file
    Image,
    /// Text glyphs on stdout or in a text file
    Terminal,
}

/// Everything one run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub credential: WifiCredential,
    pub render: RenderConfig,
    pub mode: OutputMode,
    pub output: Option<PathBuf>,
    pub force: bool,
}

/// Encode the credential and deliver the QR code.
pub fn generate_qr(invocation: &Invocation) -> anyhow::Result<()> {
    let credential = &invocation.credential;
    let payload = credential.encode()?;

    info!(
        ssid = %credential.ssid,
        auth = %credential.auth,
        hidden = credential.hidden,
        "created network payload"
    );
    debug!(%payload, "payload");

    match invocation.mode {
        OutputMode::Terminal => {
            let lines = render_text(&payload, &invocation.render)?;
            match &invocation.output {
                Some(path) => {
                    let mut text = lines.join("\n");
                    text.push('\n');
                    write_output(path, text.as_bytes(), invocation.force)?;
                }
                None => print_qr_lines(&lines).context("failed to print QR code")?,
            }
        }
        OutputMode::Image => {
            let path = invocation
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH));
            let bytes = if is_svg(&path) {
                render_svg(&payload, &invocation.render)?.into_bytes()
            } else {
                render_image(&payload, &invocation.render)?
            };
            write_output(&path, &bytes, invocation.force)?;
        }
    }

    Ok(())
}

fn is_svg(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => true,
        Some(ext) if ext.eq_ignore_ascii_case("png") => false,
        other => {
            warn!(extension = ?other, path = %path.display(), "unrecognized image extension, writing PNG");
            false
        }
    }
}

fn write_output(path: &Path, contents: &[u8], force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        let confirmed = confirm_overwrite(path).context("failed to read confirmation")?;
        if !confirmed {
            anyhow::bail!("not overwriting {}", path.display());
        }
    }

    fs::write(path, contents)
        .with_context(|| format!("failed to write QR code to {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote QR code");
    Ok(())
}
