//! Network credential model

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::constants::{
    MAX_SSID_LEN, WPA_PASSPHRASE_MAX_LEN, WPA_PASSPHRASE_MIN_LEN, WPA_RAW_PSK_LEN,
};
use crate::{Error, Result};

/// Authentication scheme advertised in the `T:` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthType {
    Wep,
    /// WPA, WPA2 and WPA3 personal all share the `WPA` token
    #[default]
    Wpa,
    /// Open network
    Nopass,
    /// WPA2 enterprise
    Wpa2Eap,
}

impl AuthType {
    /// Token written into the payload
    pub fn as_token(&self) -> &'static str {
        match self {
            AuthType::Wep => "WEP",
            AuthType::Wpa => "WPA",
            AuthType::Nopass => "nopass",
            AuthType::Wpa2Eap => "WPA2-EAP",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEP" => Ok(AuthType::Wep),
            "WPA" | "WPA2" | "WPA3" => Ok(AuthType::Wpa),
            "NOPASS" | "NONE" | "OPEN" => Ok(AuthType::Nopass),
            "WPA2-EAP" => Ok(AuthType::Wpa2Eap),
            _ => Err(Error::InvalidInput(format!(
                "unrecognized authentication type '{}' (expected WEP, WPA, WPA2, WPA3, WPA2-EAP or nopass)",
                s
            ))),
        }
    }
}

/// Enterprise (802.1X) settings, only meaningful with [`AuthType::Wpa2Eap`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EapSettings {
    pub method: Option<String>,
    pub anonymous_identity: Option<String>,
    pub identity: Option<String>,
    pub phase2: Option<String>,
}

impl EapSettings {
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.anonymous_identity.is_none()
            && self.identity.is_none()
            && self.phase2.is_none()
    }
}

/// Everything needed to join one wireless network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredential {
    pub ssid: String,
    pub passphrase: Option<String>,
    pub auth: AuthType,
    pub hidden: bool,
    pub eap: Option<EapSettings>,
}

impl WifiCredential {
    /// Create a visible WPA credential with no passphrase yet
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            passphrase: None,
            auth: AuthType::default(),
            hidden: false,
            eap: None,
        }
    }

    /// Set the passphrase; an empty string clears it
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        self.passphrase = (!passphrase.is_empty()).then_some(passphrase);
        self
    }

    pub fn with_auth(mut self, auth: AuthType) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Attach enterprise settings; empty settings are dropped
    pub fn with_eap(mut self, eap: EapSettings) -> Self {
        self.eap = (!eap.is_empty()).then_some(eap);
        self
    }

    /// Encode as a `WIFI:` payload, see [`super::encode`]
    pub fn encode(&self) -> Result<String> {
        super::encode(self)
    }

    /// Passphrase that may appear in the payload. Always `None` for open networks.
    pub fn effective_passphrase(&self) -> Option<&str> {
        match self.auth {
            AuthType::Nopass => None,
            _ => self.passphrase.as_deref().filter(|p| !p.is_empty()),
        }
    }

    /// Check the basic format rules. Soft problems are logged, not rejected.
    pub fn validate(&self) -> Result<()> {
        if self.ssid.is_empty() {
            return Err(Error::InvalidInput("SSID must not be empty".to_string()));
        }
        if self.ssid.len() > MAX_SSID_LEN {
            return Err(Error::InvalidInput(format!(
                "SSID is {} bytes long, the maximum is {}",
                self.ssid.len(),
                MAX_SSID_LEN
            )));
        }

        // Empty values must be `None`, otherwise the payload would not parse back
        // to the same credential.
        if self.passphrase.as_deref() == Some("") {
            return Err(Error::InvalidInput(
                "empty passphrase must be given as no passphrase".to_string(),
            ));
        }
        if self.eap.as_ref().is_some_and(EapSettings::is_empty) {
            return Err(Error::InvalidInput(
                "empty EAP settings must be given as no EAP settings".to_string(),
            ));
        }

        let has_passphrase = self.passphrase.is_some();
        if self.auth == AuthType::Nopass && has_passphrase {
            return Err(Error::InvalidInput(
                "a passphrase was supplied for an open (nopass) network".to_string(),
            ));
        }
        if self.auth != AuthType::Wpa2Eap && self.eap.as_ref().is_some_and(|e| !e.is_empty()) {
            return Err(Error::InvalidInput(format!(
                "EAP settings require WPA2-EAP authentication, got {}",
                self.auth
            )));
        }

        match self.auth {
            AuthType::Wep | AuthType::Wpa if !has_passphrase => {
                warn!(ssid = %self.ssid, auth = %self.auth, "no passphrase supplied for a secured network");
            }
            AuthType::Wpa => {
                let key = self.passphrase.as_deref().unwrap_or_default();
                if !is_valid_wpa_key(key) {
                    warn!(
                        ssid = %self.ssid,
                        len = key.chars().count(),
                        "WPA passphrase length outside {}..={} characters",
                        WPA_PASSPHRASE_MIN_LEN,
                        WPA_PASSPHRASE_MAX_LEN
                    );
                }
            }
            AuthType::Wpa2Eap if self.eap.as_ref().and_then(|e| e.method.as_ref()).is_none() => {
                warn!(ssid = %self.ssid, "WPA2-EAP network without an EAP method");
            }
            _ => {}
        }

        Ok(())
    }
}

/// A WPA-PSK key is either an 8..=63 character passphrase or a raw 256-bit
/// key written as 64 hex digits.
fn is_valid_wpa_key(key: &str) -> bool {
    let len = key.chars().count();
    (WPA_PASSPHRASE_MIN_LEN..=WPA_PASSPHRASE_MAX_LEN).contains(&len)
        || (key.len() == WPA_RAW_PSK_LEN && key.bytes().all(|b| b.is_ascii_hexdigit()))
}
