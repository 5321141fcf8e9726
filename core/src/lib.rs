//! wifiqr Core - Wi-Fi network QR code generation
//!
//! This library turns network credentials into the `WIFI:` payload that
//! phone camera apps recognise, and renders that payload as a QR symbol in
//! PNG, SVG or terminal text form.

pub mod payload;
pub mod render;

mod error;

pub use error::{Error, Result};

// Re-export key types for convenience
pub use payload::{encode, parse, AuthType, EapSettings, WifiCredential};
pub use render::{render_image, render_svg, render_text, ErrorCorrection, RenderConfig};

