use std::ops::RangeInclusive;

/// Block size of AES-128, in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Largest probe, in bytes, fed to an oracle while searching for its block size.
pub const MAX_BLOCK_PROBE_LEN: usize = 64;

/// Candidate key sizes tried when breaking repeating-key XOR.
pub const KEY_SIZE_RANGE: RangeInclusive<usize> = 2..=40;

/// Starting value of the running minimum in key-size estimation. No
/// normalized distance can exceed it, so the first measured size always
/// replaces the default.
pub const KEY_SIZE_DISTANCE_FLOOR: f64 = 8.0;

/// Bounds for the random bytes the detection oracle wraps around its input.
pub const NOISE_LEN_RANGE: RangeInclusive<usize> = 5..=10;

/// Window size used when counting repeated ciphertext blocks.
pub const DETECTION_WINDOW: usize = AES_BLOCK_SIZE;

/// Plaintext fed to an oracle to decide between ECB and CBC.
pub const DETECTION_PROBE: &[u8] = b"YELLOW SUBMARINEYELLOW SUBMARINEYELLOW SUBMARINE";

/// Tunables for the byte-at-a-time ECB attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackConfig {
    /// Longest probe tried during block-size discovery.
    pub max_probe_len: usize,
    /// Byte used to build probes and fillers.
    pub filler: u8,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            max_probe_len: MAX_BLOCK_PROBE_LEN,
            filler: 0,
        }
    }
}
