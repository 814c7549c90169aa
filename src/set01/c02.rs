use crate::set01::c01::Encoding;
use crate::{Error, Result};

pub fn xor_bytes(buf_a: &[u8], buf_b: &[u8]) -> Result<Vec<u8>> {
    if buf_a.len() != buf_b.len() {
        return Err(Error::LengthMismatch {
            left: buf_a.len(),
            right: buf_b.len(),
        });
    }
    Ok(buf_a.iter().zip(buf_b.iter()).map(|(a, b)| a ^ b).collect())
}

/// XOR two equal-length encoded buffers, returning the result in the same
/// encoding.
pub fn fixed_xor_encoded(a: &str, b: &str, encoding: Encoding) -> Result<String> {
    let xored = xor_bytes(&encoding.decode(a)?, &encoding.decode(b)?)?;
    Ok(encoding.encode(&xored))
}
