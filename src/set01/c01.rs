// Convert hex to base64.
//
// The exported helpers in this crate that work on text take and return the
// same encoding, so `Encoding` is threaded through all of them.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base64,
}

impl Encoding {
    /// Decode `text`, ignoring any whitespace (line-wrapped base64 files
    /// decode as a single buffer).
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = match self {
            Encoding::Hex => hex::decode(compact)?,
            Encoding::Base64 => STANDARD.decode(compact)?,
        };
        Ok(bytes)
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(bytes),
            Encoding::Base64 => STANDARD.encode(bytes),
        }
    }
}

pub fn hex_to_b64(hex: &str) -> Result<String> {
    let bytes = hex_to_bytes(hex)?;
    Ok(Encoding::Base64.encode(&bytes))
}

pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    Encoding::Hex.decode(hex)
}

pub fn base64_decode(b64: &str) -> Result<Vec<u8>> {
    Encoding::Base64.decode(b64)
}
