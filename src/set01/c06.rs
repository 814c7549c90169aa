use tracing::debug;

use crate::config::{KEY_SIZE_DISTANCE_FLOOR, KEY_SIZE_RANGE};
use crate::set01::c01::Encoding;
use crate::set01::c03::brute_force_byte_xor_cipher;
use crate::set01::c05::repeating_xor_cipher;
use crate::{Error, Result};

const N_BLOCKS_TO_COMPARE: usize = 4;

/// Guess the key of a repeating-key XOR ciphertext, returning
/// `(plaintext, key)`.
///
/// This never fails: on short or unusual inputs the answer may simply be
/// wrong.
pub fn brute_force_repeating_xor(bytes: &[u8]) -> (Vec<u8>, Vec<u8>) {
    // Get a best guess at the key size by finding the key size for which the
    // hamming (edit) distance between key-sized blocks is the smallest.
    let key_size = estimate_key_size(bytes);
    debug!(key_size, "estimated repeating xor key size");

    let key = recover_repeating_key(bytes, key_size);
    (repeating_xor_cipher(bytes, &key), key)
}

/// Break repeating-key XOR over encoded text, returning `(key, plaintext)`
/// in the same encoding as the ciphertext.
pub fn break_repeating_xor_encoded(ciphertext: &str, encoding: Encoding) -> Result<(String, String)> {
    let (plaintext, key) = brute_force_repeating_xor(&encoding.decode(ciphertext)?);
    Ok((encoding.encode(&key), encoding.encode(&plaintext)))
}

/// Recover a key of known size. This works because the bytes at positions
/// `i, i + key_size, i + 2 * key_size, ...` were all XOR-ed with the same key
/// byte, so transposing the ciphertext into columns leaves one single-byte
/// XOR cipher per column.
pub fn recover_repeating_key(bytes: &[u8], key_size: usize) -> Vec<u8> {
    (0..key_size)
        .map(|byte_idx| {
            bytes
                .iter()
                .skip(byte_idx)
                .step_by(key_size)
                .copied()
                .collect::<Vec<_>>()
        })
        .map(|column| brute_force_byte_xor_cipher(&column).key)
        .collect()
}

/// Pick the candidate key size whose first four blocks are closest to each
/// other, measured as the mean Hamming distance over all six block pairs
/// normalized by the size.
///
/// Sizes needing more than the available input are not tried, and a size
/// replaces the current guess when its distance is less than *or equal to*
/// the running minimum, so later sizes win ties.
pub fn estimate_key_size(bytes: &[u8]) -> usize {
    let mut key_size = *KEY_SIZE_RANGE.start();
    let mut min_distance = KEY_SIZE_DISTANCE_FLOOR;
    for size in KEY_SIZE_RANGE {
        if bytes.len() < N_BLOCKS_TO_COMPARE * size {
            break;
        }
        let distance = normalized_block_distance(bytes, size);
        if distance <= min_distance {
            min_distance = distance;
            key_size = size;
        }
    }
    key_size
}

fn normalized_block_distance(bytes: &[u8], size: usize) -> f64 {
    let blocks: Vec<&[u8]> = bytes.chunks_exact(size).take(N_BLOCKS_TO_COMPARE).collect();
    let mut total = 0u32;
    let mut n_pairs = 0u32;
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            total += bit_distance(a, b);
            n_pairs += 1;
        }
    }
    f64::from(total) / (f64::from(n_pairs) * size as f64)
}

pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<u32> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(bit_distance(a, b))
}

fn bit_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}
