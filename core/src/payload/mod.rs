//! `WIFI:` payload model, encoding and parsing

mod codec;
pub mod constants;
mod credential;
mod escape;

pub use codec::{encode, parse};
pub use credential::{AuthType, EapSettings, WifiCredential};
pub use escape::{escape, unescape};
