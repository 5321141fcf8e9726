//! QR symbol rendering
//!
//! Turns an encoded payload into something a phone can scan: PNG bytes, an
//! SVG document, or lines of half-block glyphs for a terminal.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::{Error, Result};

/// Default minimum side length of rendered images, in pixels
pub const DEFAULT_MIN_DIMENSION: u32 = 256;

/// Largest accepted minimum side length, in pixels
pub const MAX_MIN_DIMENSION: u32 = 8192;

/// Light modules around the symbol in text output
pub const TEXT_QUIET_ZONE: usize = 2;

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ErrorCorrection::Low),
            "M" | "MEDIUM" => Ok(ErrorCorrection::Medium),
            "Q" | "QUARTILE" => Ok(ErrorCorrection::Quartile),
            "H" | "HIGH" => Ok(ErrorCorrection::High),
            _ => Err(Error::InvalidInput(format!(
                "unrecognized error correction level '{}' (expected L, M, Q or H)",
                s
            ))),
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::Low => "L",
            ErrorCorrection::Medium => "M",
            ErrorCorrection::Quartile => "Q",
            ErrorCorrection::High => "H",
        };
        f.write_str(s)
    }
}

/// Rendering options shared by all output formats
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub ec_level: ErrorCorrection,
    /// Minimum image side length in pixels (PNG and SVG)
    pub min_dimension: u32,
    /// Draw light modules as blocks so the code scans on dark terminals
    pub invert_text: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ec_level: ErrorCorrection::default(),
            min_dimension: DEFAULT_MIN_DIMENSION,
            invert_text: true,
        }
    }
}

fn build_code(payload: &str, config: &RenderConfig) -> Result<QrCode> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), config.ec_level.into())
        .map_err(|e| Error::Render(format!("QR generation failed: {}", e)))?;
    debug!(width = code.width(), ec_level = %config.ec_level, "generated QR symbol");
    Ok(code)
}

fn check_dimension(config: &RenderConfig) -> Result<()> {
    if config.min_dimension > MAX_MIN_DIMENSION {
        return Err(Error::InvalidInput(format!(
            "image size {} exceeds the maximum of {} pixels",
            config.min_dimension, MAX_MIN_DIMENSION
        )));
    }
    Ok(())
}

/// Render the payload as a grayscale PNG image.
pub fn render_image(payload: &str, config: &RenderConfig) -> Result<Vec<u8>> {
    check_dimension(config)?;
    let code = build_code(payload, config)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(config.min_dimension, config.min_dimension)
        .build();

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?;
    Ok(bytes)
}

/// Render the payload as an SVG document.
pub fn render_svg(payload: &str, config: &RenderConfig) -> Result<String> {
    check_dimension(config)?;
    let code = build_code(payload, config)?;
    let svg = code
        .render::<svg::Color>()
        .min_dimensions(config.min_dimension, config.min_dimension)
        .build();
    Ok(svg)
}

/// Render the payload as printable lines.
///
/// Each character covers two vertically stacked modules:
/// `▀` = top filled, `▄` = bottom filled, `█` = both, space = neither.
pub fn render_text(payload: &str, config: &RenderConfig) -> Result<Vec<String>> {
    let code = build_code(payload, config)?;
    let width = code.width();
    let colors = code.to_colors();
    let size = width + 2 * TEXT_QUIET_ZONE;

    let filled = |x: usize, y: usize| -> bool {
        if y >= size {
            return false;
        }
        let inside = (TEXT_QUIET_ZONE..TEXT_QUIET_ZONE + width).contains(&x)
            && (TEXT_QUIET_ZONE..TEXT_QUIET_ZONE + width).contains(&y);
        let dark = inside
            && colors[(y - TEXT_QUIET_ZONE) * width + (x - TEXT_QUIET_ZONE)] == Color::Dark;
        dark != config.invert_text
    };

    let lines: Vec<String> = (0..size)
        .step_by(2)
        .map(|y| {
            (0..size)
                .map(|x| match (filled(x, y), filled(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect();

    Ok(lines)
}
