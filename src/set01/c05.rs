use crate::set01::c01::Encoding;
use crate::Result;

/// Encrypt a message using a repeating-key XOR cipher. An empty key leaves
/// the message unchanged.
pub fn repeating_xor_cipher(message: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return message.to_vec();
    }
    message
        .iter()
        .zip(key.iter().cycle())
        .map(|(m, k)| m ^ k)
        .collect()
}

pub fn repeating_xor_encoded(message: &str, key: &str, encoding: Encoding) -> Result<String> {
    let ciphertext = repeating_xor_cipher(&encoding.decode(message)?, &encoding.decode(key)?);
    Ok(encoding.encode(&ciphertext))
}
