/// In this challenge we are given a file of hex strings. One of those strings
/// has been encrypted using a single-character XOR. Our task is to find it.
///
/// Reading the file is left to the caller; we take its lines.
use crate::set01::c03::brute_force_byte_xor_cipher;
use crate::{hex_to_bytes, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedXorLine {
    pub index: usize,
    pub ciphertext: String,
    pub key: u8,
    pub plaintext: Vec<u8>,
}

/// Return the line whose best single-byte-XOR decryption scores highest.
/// Equal scores go to the later line. `None` only when there are no lines.
pub fn find_byte_xor_encrypted_line<'a, I>(lines: I) -> Result<Option<DetectedXorLine>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, DetectedXorLine)> = None;
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.trim();
        let cracked = brute_force_byte_xor_cipher(&hex_to_bytes(line)?);
        if best.as_ref().map_or(true, |(score, _)| cracked.score >= *score) {
            best = Some((
                cracked.score,
                DetectedXorLine {
                    index,
                    ciphertext: line.to_string(),
                    key: cracked.key,
                    plaintext: cracked.plaintext,
                },
            ));
        }
    }
    Ok(best.map(|(_, detected)| detected))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Error;

    const LINES: [&str; 4] = [
        "789b34caf54f2e220acd941e71b88d5836866d0d858b63549e94be2cacc6",
        "7f5b7ef28f2d9903959f63d3d893dce752779c84162917ec8ff1af4a6422",
        "7b5a4215415d544115415d5015455447414c155c46155f4058455c5b523f",
        "d367e18d5eb6dfa465a5331f758e793ea95a94eb0d15b62a92a709a593a4",
    ];

    #[test]
    fn find_encrypted_line() {
        let detected = find_byte_xor_encrypted_line(LINES).unwrap().unwrap();

        assert_eq!(detected.index, 2);
        assert_eq!(detected.key, 0x35);
        assert_eq!(detected.plaintext, b"Now that the party is jumping\n");
    }

    #[test]
    fn no_lines_detects_nothing() {
        let detected = find_byte_xor_encrypted_line(std::iter::empty()).unwrap();

        assert!(detected.is_none());
    }

    #[test]
    fn malformed_line_is_an_error() {
        let result = find_byte_xor_encrypted_line(["7b5a", "not hex"]);

        assert!(matches!(result, Err(Error::Hex(_))));
    }
}
