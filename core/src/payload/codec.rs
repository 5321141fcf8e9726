//! `WIFI:` payload encoding and parsing

use tracing::debug;

use super::constants::*;
use super::credential::{AuthType, EapSettings, WifiCredential};
use super::escape::{escape, unescape};
use crate::{Error, Result};

/// Encode a credential as a `WIFI:` payload.
///
/// Fields are written in the fixed order `T`, `S`, `P`, `H`, followed by the
/// EAP fields for enterprise networks, and the payload ends with `;;`. `P:` is
/// always present and is empty for open networks.
pub fn encode(credential: &WifiCredential) -> Result<String> {
    credential.validate()?;

    let mut payload = String::from(PAYLOAD_SCHEME);
    push_field(&mut payload, FIELD_AUTH, credential.auth.as_token());
    push_field(&mut payload, FIELD_SSID, &credential.ssid);
    push_field(
        &mut payload,
        FIELD_PASSPHRASE,
        credential.effective_passphrase().unwrap_or_default(),
    );
    push_field(
        &mut payload,
        FIELD_HIDDEN,
        if credential.hidden { "true" } else { "false" },
    );

    if credential.auth == AuthType::Wpa2Eap {
        if let Some(eap) = &credential.eap {
            let optional = [
                (FIELD_EAP_METHOD, &eap.method),
                (FIELD_ANONYMOUS_IDENTITY, &eap.anonymous_identity),
                (FIELD_IDENTITY, &eap.identity),
                (FIELD_PHASE2, &eap.phase2),
            ];
            for (key, value) in optional {
                if let Some(value) = value {
                    push_field(&mut payload, key, value);
                }
            }
        }
    }

    payload.push(FIELD_SEPARATOR);

    debug!(ssid = %credential.ssid, auth = %credential.auth, len = payload.len(), "encoded payload");
    Ok(payload)
}

fn push_field(payload: &mut String, key: &str, value: &str) {
    payload.push_str(key);
    payload.push(KEY_SEPARATOR);
    payload.push_str(&escape(value));
    payload.push(FIELD_SEPARATOR);
}

/// Parse a `WIFI:` payload back into a credential.
///
/// Fields may appear in any order and unknown keys are ignored. A missing
/// `T:` means an open network and a missing `H:` means a visible one.
pub fn parse(payload: &str) -> Result<WifiCredential> {
    let body = payload
        .strip_prefix(PAYLOAD_SCHEME)
        .ok_or_else(|| Error::InvalidPayload("missing WIFI: prefix".to_string()))?;

    let mut ssid = None;
    let mut passphrase = None;
    let mut auth = AuthType::Nopass;
    let mut hidden = false;
    let mut eap = EapSettings::default();

    for (key, value) in split_fields(body)? {
        match key {
            FIELD_AUTH => {
                auth = if value.is_empty() {
                    AuthType::Nopass
                } else {
                    value
                        .parse()
                        .map_err(|_| Error::InvalidPayload(format!("unknown auth type '{}'", value)))?
                };
            }
            FIELD_SSID => ssid = Some(value),
            FIELD_PASSPHRASE => passphrase = (!value.is_empty()).then_some(value),
            FIELD_HIDDEN => {
                hidden = match value.to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" | "" => false,
                    _ => {
                        return Err(Error::InvalidPayload(format!(
                            "invalid hidden flag '{}'",
                            value
                        )))
                    }
                };
            }
            FIELD_EAP_METHOD => eap.method = Some(value),
            FIELD_ANONYMOUS_IDENTITY => eap.anonymous_identity = Some(value),
            FIELD_IDENTITY => eap.identity = Some(value),
            FIELD_PHASE2 => eap.phase2 = Some(value),
            _ => debug!(key, "ignoring unknown payload field"),
        }
    }

    Ok(WifiCredential {
        ssid: ssid.ok_or_else(|| Error::InvalidPayload("missing SSID field".to_string()))?,
        passphrase,
        auth,
        hidden,
        eap: (!eap.is_empty()).then_some(eap),
    })
}

/// Split the payload body on unescaped separators. The payload must end with
/// the empty field that terminates it, and nothing may follow.
fn split_fields(body: &str) -> Result<Vec<(&str, String)>> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            ESCAPE_CHAR => escaped = true,
            FIELD_SEPARATOR => {
                let raw = &body[start..i];
                start = i + c.len_utf8();
                if raw.is_empty() {
                    if !body[start..].is_empty() {
                        return Err(Error::InvalidPayload(
                            "unexpected data after terminator".to_string(),
                        ));
                    }
                    return Ok(fields);
                }
                let (key, value) = raw
                    .split_once(KEY_SEPARATOR)
                    .ok_or_else(|| Error::InvalidPayload(format!("field '{}' has no key", raw)))?;
                fields.push((key, unescape(value)?));
            }
            _ => {}
        }
    }

    if !body[start..].is_empty() {
        return Err(Error::InvalidPayload("unterminated field".to_string()));
    }
    Err(Error::InvalidPayload("missing ;; terminator".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wpa_network() {
        let cred = WifiCredential::new("HomeNet").with_passphrase("secret123");
        assert_eq!(
            encode(&cred).unwrap(),
            "WIFI:T:WPA;S:HomeNet;P:secret123;H:false;;"
        );
    }

    #[test]
    fn test_encode_escapes_hidden_network() {
        let cred = WifiCredential::new("Café;Net")
            .with_passphrase("p:a,ss")
            .with_hidden(true);
        let payload = encode(&cred).unwrap();
        assert_eq!(payload, "WIFI:T:WPA;S:Café\\;Net;P:p\\:a\\,ss;H:true;;");
        assert!(payload.contains("S:Café\\;Net;"));
        assert!(payload.contains("P:p\\:a\\,ss;"));
        assert!(payload.contains("H:true;"));
    }

    #[test]
    fn test_encode_open_network() {
        let cred = WifiCredential::new("OpenGuest").with_auth(AuthType::Nopass);
        assert_eq!(
            encode(&cred).unwrap(),
            "WIFI:T:nopass;S:OpenGuest;P:;H:false;;"
        );
    }

    #[test]
    fn test_encode_missing_ssid() {
        let cred = WifiCredential::new("");
        assert!(matches!(encode(&cred), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_encode_nopass_never_leaks_key() {
        let cred = WifiCredential::new("Guest")
            .with_auth(AuthType::Nopass)
            .with_passphrase("leaky-key");
        match encode(&cred) {
            Ok(payload) => panic!("expected rejection, got {}", payload),
            Err(e) => assert!(!e.to_string().contains("leaky-key")),
        }

        // A credential whose auth is flipped to nopass after the key was set is
        // rejected as well.
        let mut cred = WifiCredential::new("Guest").with_passphrase("leaky-key");
        cred.auth = AuthType::Nopass;
        assert!(encode(&cred).is_err());
    }

    #[test]
    fn test_encode_wpa_without_key_emits_empty_field() {
        let cred = WifiCredential::new("NoKey");
        assert_eq!(encode(&cred).unwrap(), "WIFI:T:WPA;S:NoKey;P:;H:false;;");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let cred = WifiCredential::new("Net\"1\"")
            .with_passphrase("a\\b")
            .with_auth(AuthType::Wep)
            .with_hidden(true);
        assert_eq!(encode(&cred).unwrap(), encode(&cred).unwrap());
    }

    #[test]
    fn test_encode_enterprise_fields() {
        let cred = WifiCredential::new("Corp")
            .with_auth(AuthType::Wpa2Eap)
            .with_passphrase("pw")
            .with_eap(EapSettings {
                method: Some("PEAP".to_string()),
                anonymous_identity: Some("anon".to_string()),
                identity: Some("user@corp".to_string()),
                phase2: Some("MSCHAPV2".to_string()),
            });
        assert_eq!(
            encode(&cred).unwrap(),
            "WIFI:T:WPA2-EAP;S:Corp;P:pw;H:false;E:PEAP;A:anon;I:user@corp;PH2:MSCHAPV2;;"
        );
    }

    #[test]
    fn test_reserved_chars_escaped_once() {
        let ssid = r#"a\b;c,d:e"f"#;
        let cred = WifiCredential::new(ssid).with_passphrase(ssid);
        let payload = encode(&cred).unwrap();
        let field = format!("S:{};", r#"a\\b\;c\,d\:e\"f"#);
        assert!(payload.contains(&field));

        // Every reserved character in the value part is preceded by exactly one
        // escape.
        let value = &field[2..field.len() - 1];
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                let next = chars.next().unwrap();
                assert!(RESERVED_CHARS.contains(&next));
            } else {
                assert!(!RESERVED_CHARS.contains(&c), "unescaped {:?}", c);
            }
        }
    }

    #[test]
    fn test_roundtrip() {
        let creds = [
            WifiCredential::new("HomeNet").with_passphrase("secret123"),
            WifiCredential::new("Café;Net")
                .with_passphrase("p:a,ss")
                .with_hidden(true),
            WifiCredential::new("OpenGuest").with_auth(AuthType::Nopass),
            WifiCredential::new(r#"\;,:""#).with_passphrase(r#"";:,\\"#),
            WifiCredential::new("Légacy")
                .with_auth(AuthType::Wep)
                .with_passphrase("0123456789"),
            WifiCredential::new("Corp")
                .with_auth(AuthType::Wpa2Eap)
                .with_eap(EapSettings {
                    method: Some("TTLS".to_string()),
                    identity: Some("me;you".to_string()),
                    ..Default::default()
                }),
        ];
        for cred in creds {
            let payload = encode(&cred).unwrap();
            assert_eq!(parse(&payload).unwrap(), cred, "payload {}", payload);
        }
    }

    #[test]
    fn test_parse_any_field_order() {
        let cred = parse("WIFI:S:Net;T:WEP;P:abc;;").unwrap();
        assert_eq!(cred.ssid, "Net");
        assert_eq!(cred.auth, AuthType::Wep);
        assert_eq!(cred.passphrase.as_deref(), Some("abc"));
        assert!(!cred.hidden);
    }

    #[test]
    fn test_parse_defaults_and_unknown_keys() {
        let cred = parse("WIFI:S:Cafe;X:ignored;;").unwrap();
        assert_eq!(cred.auth, AuthType::Nopass);
        assert_eq!(cred.passphrase, None);
        assert_eq!(cred.eap, None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(parse("S:Net;;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:T:WPA;;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:S:Net"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:S:Net;H:maybe;;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:S:Net;T:WPA9;;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:Net;;"), Err(Error::InvalidPayload(_))));
    }

    #[test]
    fn test_parse_requires_exact_terminator() {
        assert!(matches!(parse("WIFI:S:Net;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:S:Net;;garbage"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:S:Net;;;"), Err(Error::InvalidPayload(_))));
        assert!(matches!(parse("WIFI:"), Err(Error::InvalidPayload(_))));
        assert_eq!(parse("WIFI:S:Net;;").unwrap().ssid, "Net");
    }

    #[test]
    fn test_roundtrip_struct_literals() {
        let creds = [
            WifiCredential {
                ssid: "Net".to_string(),
                passphrase: None,
                auth: AuthType::Wpa,
                hidden: false,
                eap: None,
            },
            WifiCredential {
                ssid: "Corp".to_string(),
                passphrase: Some("pw;1".to_string()),
                auth: AuthType::Wpa2Eap,
                hidden: true,
                eap: Some(EapSettings {
                    method: Some("PEAP".to_string()),
                    anonymous_identity: None,
                    identity: Some(String::new()),
                    phase2: None,
                }),
            },
        ];
        for cred in creds {
            let payload = encode(&cred).unwrap();
            assert_eq!(parse(&payload).unwrap(), cred, "payload {}", payload);
        }
    }

    #[test]
    fn test_encode_rejects_unnormalized_literals() {
        let empty_key = WifiCredential {
            ssid: "Net".to_string(),
            passphrase: Some(String::new()),
            auth: AuthType::Wpa,
            hidden: false,
            eap: None,
        };
        assert!(matches!(encode(&empty_key), Err(Error::InvalidInput(_))));

        let empty_eap = WifiCredential {
            ssid: "Corp".to_string(),
            passphrase: None,
            auth: AuthType::Wpa2Eap,
            hidden: false,
            eap: Some(EapSettings::default()),
        };
        assert!(matches!(encode(&empty_eap), Err(Error::InvalidInput(_))));
    }
}
