// Detect AES in ECB mode
//
// The same plaintext block always gives the same ciphertext block under ECB,
// so a ciphertext of English text is likely to contain repeated blocks. A
// random string of bytes (or CBC output) almost never does.

use std::collections::HashSet;

use crate::config::DETECTION_WINDOW;
use crate::{hex_to_bytes, Result};

/// Count repeated `window_size`-byte blocks in `bytes`.
///
/// A block value seen `n` times contributes `n - 1`. Windows are taken at
/// multiples of `window_size`; a trailing partial window is ignored. The
/// count only means something cryptographically when `window_size` matches
/// the cipher's block size.
pub fn count_repeats(bytes: &[u8], window_size: usize) -> usize {
    if window_size == 0 {
        return 0;
    }
    let mut seen_blocks = HashSet::new();
    bytes
        .chunks_exact(window_size)
        .filter(|block| !seen_blocks.insert(*block))
        .count()
}

/// Return `(index, line)` of the hex line with the most repeated 16-byte
/// blocks. Equal counts go to the later line. `None` only when there are
/// no lines.
pub fn find_aes_ecb_line<'a, I>(lines: I) -> Result<Option<(usize, String)>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, usize, &str)> = None;
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.trim();
        let repeats = count_repeats(&hex_to_bytes(line)?, DETECTION_WINDOW);
        if best.map_or(true, |(max_repeats, _, _)| repeats >= max_repeats) {
            best = Some((repeats, index, line));
        }
    }
    Ok(best.map(|(_, index, line)| (index, line.to_string())))
}
