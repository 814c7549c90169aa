use std::fmt;

use crate::block_cipher::BlockCipher;
use crate::set01::c07::{ecb_decrypt, ecb_encrypt};
use crate::set02::c10::{cbc_decrypt, cbc_encrypt};
use crate::{Error, Result};

/// Block cipher chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ecb => f.write_str("ECB"),
            Mode::Cbc => f.write_str("CBC"),
        }
    }
}

/// Encrypt block-aligned `plaintext` under `mode`. The IV is ignored for ECB
/// and required for CBC. No padding is applied.
pub fn encrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    mode: Mode,
    iv: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    match mode {
        Mode::Ecb => ecb_encrypt(cipher, plaintext),
        Mode::Cbc => cbc_encrypt(cipher, iv.ok_or(Error::MissingIv)?, plaintext),
    }
}

/// Inverse of [`encrypt`]. Padding, if any, is left in place.
pub fn decrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    mode: Mode,
    iv: Option<&[u8]>,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    match mode {
        Mode::Ecb => ecb_decrypt(cipher, ciphertext),
        Mode::Cbc => cbc_decrypt(cipher, iv.ok_or(Error::MissingIv)?, ciphertext),
    }
}
