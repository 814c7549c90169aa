// An ECB/CBC detection oracle
//
// The oracle wraps the caller's plaintext in 5-10 random bytes on each side,
// pads it and encrypts it under a fresh random key, in either ECB or CBC.
// Feeding it three copies of one block is enough to tell the modes apart:
// whatever the noise length, two full copies of the block land on block
// boundaries, and under ECB those encrypt to equal ciphertext blocks.

use std::sync::{Mutex, PoisonError};

use rand::{CryptoRng, Rng, RngCore};
use tracing::debug;

use crate::block_cipher::Aes128;
use crate::config::{AES_BLOCK_SIZE, DETECTION_PROBE, DETECTION_WINDOW, NOISE_LEN_RANGE};
use crate::mode::{self, Mode};
use crate::oracle::EncryptionOracle;
use crate::set01::c08::count_repeats;
use crate::set02::c09::Pkcs7;
use crate::Result;

pub fn random_bytes<const N: usize>(rng: &mut impl RngCore) -> [u8; N] {
    let mut bytes = [0u8; N];
    rng.fill_bytes(&mut bytes);
    bytes
}

pub fn random_mode<R: RngCore>(rng: &mut R) -> Mode {
    if rng.gen::<bool>() {
        Mode::Ecb
    } else {
        Mode::Cbc
    }
}

/// Oracle whose mode is fixed when it is built. Key, IV and noise are fresh
/// on every call.
pub struct RandomModeOracle<R> {
    rng: Mutex<R>,
    mode: Mode,
}

impl<R: RngCore + CryptoRng> RandomModeOracle<R> {
    pub fn new(mut rng: R) -> Self {
        let mode = random_mode(&mut rng);
        Self {
            rng: Mutex::new(rng),
            mode,
        }
    }

    /// The mode this oracle really uses.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl<R: RngCore + CryptoRng> EncryptionOracle for RandomModeOracle<R> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        encrypt_with_noise(&mut *rng, self.mode, plaintext)
    }
}

/// Encrypt under a mode chosen afresh for this call, reporting the mode
/// alongside the ciphertext.
pub fn encryption_oracle<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
) -> Result<(Vec<u8>, Mode)> {
    let mode = random_mode(rng);
    Ok((encrypt_with_noise(rng, mode, plaintext)?, mode))
}

fn encrypt_with_noise<R: RngCore + CryptoRng>(
    rng: &mut R,
    mode: Mode,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let prefix_len = rng.gen_range(NOISE_LEN_RANGE);
    let postfix_len = rng.gen_range(NOISE_LEN_RANGE);
    let mut salted = vec![0u8; prefix_len];
    rng.fill_bytes(&mut salted);
    salted.extend_from_slice(plaintext);
    let mut postfix = vec![0u8; postfix_len];
    rng.fill_bytes(&mut postfix);
    salted.extend(postfix);

    let cipher = Aes128::from_key(&random_bytes::<AES_BLOCK_SIZE>(rng));
    let iv = random_bytes::<AES_BLOCK_SIZE>(rng);
    mode::encrypt(&cipher, mode, Some(&iv), &Pkcs7::AES.pad(&salted))
}

/// Decide whether `oracle` encrypts in ECB or CBC mode. This is a heuristic:
/// a ciphertext without any repeated block is reported as CBC.
pub fn detect_mode<O: EncryptionOracle + ?Sized>(oracle: &O) -> Result<Mode> {
    let ciphertext = oracle.encrypt(DETECTION_PROBE)?;
    let detected = classify_ciphertext(&ciphertext);
    debug!(%detected, "detected oracle mode");
    Ok(detected)
}

pub fn classify_ciphertext(ciphertext: &[u8]) -> Mode {
    if count_repeats(ciphertext, DETECTION_WINDOW) > 0 {
        Mode::Ecb
    } else {
        Mode::Cbc
    }
}

/// Run the per-call oracle once on the detection probe and return
/// `(actual, detected)`.
pub fn detection_trial<R: RngCore + CryptoRng>(rng: &mut R) -> Result<(Mode, Mode)> {
    let (ciphertext, actual) = encryption_oracle(rng, DETECTION_PROBE)?;
    Ok((actual, classify_ciphertext(&ciphertext)))
}
