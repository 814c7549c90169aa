// In this challenge we are given a ciphertext that was derived by XOR-ing
// every byte of message with a character. We must decipher the message and
// find the key.
//
// To do this we take a brute force approach and loop over each possible u8
// character to give us a candidate message, then keep the candidate that
// looks most like English.
//
// "Looks like English" is deliberately crude: we count spaces, newlines and
// the lowercase letters 'a' to 'y'. Uppercase, digits and 'z' score nothing.
// The scoring has to stay exactly like this, because on ambiguous inputs the
// winner is decided by ties, and ties go to the later key. An input where
// nothing scores therefore decrypts under key 255.

use rayon::prelude::*;

use crate::set01::c01::Encoding;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorCrackResult {
    pub key: u8,
    pub plaintext: Vec<u8>,
    pub score: usize,
}

pub fn brute_force_byte_xor_cipher(bytes: &[u8]) -> XorCrackResult {
    // Scores are computed in parallel but collected in key order, so the
    // fold below sees keys 0..=255 in sequence.
    let scores: Vec<(u8, usize)> = (0..=u8::MAX)
        .into_par_iter()
        .map(|key| (key, score_with_key(bytes, key)))
        .collect();

    let (key, score) = scores
        .into_iter()
        .fold((0, 0), |best, candidate| {
            if candidate.1 >= best.1 {
                candidate
            } else {
                best
            }
        });

    XorCrackResult {
        key,
        plaintext: xor_with_key(bytes, key),
        score,
    }
}

/// Break a single-byte XOR over encoded text. The recovered plaintext is
/// returned in the same encoding as the ciphertext.
pub fn break_single_byte_xor_encoded(ciphertext: &str, encoding: Encoding) -> Result<(u8, String)> {
    let result = brute_force_byte_xor_cipher(&encoding.decode(ciphertext)?);
    Ok((result.key, encoding.encode(&result.plaintext)))
}

pub fn xor_with_key(bytes: &[u8], key: u8) -> Vec<u8> {
    bytes.iter().map(|b| b ^ key).collect()
}

/// Number of spaces, newlines and lowercase 'a'..='y' in `bytes`.
pub fn score_plaintext(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| is_scored(b)).count()
}

fn score_with_key(bytes: &[u8], key: u8) -> usize {
    bytes.iter().filter(|&&b| is_scored(b ^ key)).count()
}

fn is_scored(byte: u8) -> bool {
    matches!(byte, b'a'..=b'y' | b' ' | b'\n')
}
