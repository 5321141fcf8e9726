//! Payload format constants
//!
//! Field keys and limits of the `WIFI:` convention, kept in one place so the
//! encoder and the parser cannot drift apart.

/// Prefix every payload starts with
pub const PAYLOAD_SCHEME: &str = "WIFI:";

/// Characters that must be backslash-escaped inside a field value
pub const RESERVED_CHARS: [char; 5] = ['\\', ';', ',', ':', '"'];

/// Escape character
pub const ESCAPE_CHAR: char = '\\';

/// Field separator
pub const FIELD_SEPARATOR: char = ';';

/// Key/value separator within a field
pub const KEY_SEPARATOR: char = ':';

/// Maximum SSID length in bytes (IEEE 802.11)
pub const MAX_SSID_LEN: usize = 32;

/// WPA-PSK passphrase length bounds in characters
pub const WPA_PASSPHRASE_MIN_LEN: usize = 8;
pub const WPA_PASSPHRASE_MAX_LEN: usize = 63;

/// Length of a raw WPA-PSK written as hex digits
pub const WPA_RAW_PSK_LEN: usize = 64;

pub const FIELD_AUTH: &str = "T";
pub const FIELD_SSID: &str = "S";
pub const FIELD_PASSPHRASE: &str = "P";
pub const FIELD_HIDDEN: &str = "H";
pub const FIELD_EAP_METHOD: &str = "E";
pub const FIELD_ANONYMOUS_IDENTITY: &str = "A";
pub const FIELD_IDENTITY: &str = "I";
pub const FIELD_PHASE2: &str = "PH2";
