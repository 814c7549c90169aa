/// Implement PKCS#7 padding
use crate::config::AES_BLOCK_SIZE;
use crate::set01::c01::Encoding;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pkcs7 {
    block_size: u8,
}

impl Pkcs7 {
    pub const AES: Self = Self {
        block_size: AES_BLOCK_SIZE as u8,
    };

    pub fn new(block_size: usize) -> Result<Self> {
        match u8::try_from(block_size) {
            Ok(block_size) if block_size > 0 => Ok(Self { block_size }),
            _ => Err(Error::InvalidBlockSize(block_size)),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size as usize
    }

    /// Append `k` bytes of value `k`, where `k` brings the length up to the
    /// next multiple of the block size. Aligned input gains a whole block.
    pub fn pad(&self, bytes: &[u8]) -> Vec<u8> {
        let n_pad = self.block_size - (bytes.len() % self.block_size()) as u8;
        let mut out = Vec::with_capacity(bytes.len() + n_pad as usize);
        out.extend_from_slice(bytes);
        out.resize(bytes.len() + n_pad as usize, n_pad);
        out
    }

    /// Strip padding in place. The last byte `k` is the padding length and
    /// the last `k` bytes must all equal `k`. A zero `k` strips nothing. The
    /// buffer is left untouched when the padding is invalid.
    pub fn unpad(&self, bytes: &mut Vec<u8>) -> Result<()> {
        let n_pad = self.padding_len(bytes).ok_or(Error::InvalidPadding)?;
        bytes.truncate(bytes.len() - n_pad);
        Ok(())
    }

    fn padding_len(&self, bytes: &[u8]) -> Option<usize> {
        let n_pad = *bytes.last()?;
        if n_pad as usize > bytes.len() {
            return None;
        }
        let padded = &bytes[bytes.len() - n_pad as usize..];
        padded.iter().all(|&b| b == n_pad).then_some(n_pad as usize)
    }
}

/// Pad encoded text, returning it in the same encoding.
pub fn pkcs7_pad_encoded(text: &str, block_size: usize, encoding: Encoding) -> Result<String> {
    let padded = Pkcs7::new(block_size)?.pad(&encoding.decode(text)?);
    Ok(encoding.encode(&padded))
}
