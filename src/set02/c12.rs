/// Byte-at-a-time ECB decryption (Simple)
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::block_cipher::Aes128;
use crate::config::{AttackConfig, AES_BLOCK_SIZE};
use crate::mode::Mode;
use crate::oracle::EncryptionOracle;
use crate::set01::c01::Encoding;
use crate::set01::c07::ecb_encrypt;
use crate::set02::c09::Pkcs7;
use crate::set02::c11::{detect_mode, random_bytes};
use crate::{base64_decode, AttackError, Result};

/// Encrypts `prefix || salt` under AES-128-ECB with a key fixed for the
/// oracle's lifetime.
pub struct EcbOracle {
    cipher: Aes128,
    unknown_bytes: Vec<u8>,
}

impl EcbOracle {
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, unknown_bytes: Vec<u8>) -> Self {
        Self::with_key(&random_bytes::<AES_BLOCK_SIZE>(rng), unknown_bytes)
    }

    pub fn from_base64<R: RngCore + CryptoRng>(rng: &mut R, unknown_b64: &str) -> Result<Self> {
        Ok(Self::new(rng, base64_decode(unknown_b64)?))
    }

    pub fn with_key(key: &[u8; AES_BLOCK_SIZE], unknown_bytes: Vec<u8>) -> Self {
        Self {
            cipher: Aes128::from_key(key),
            unknown_bytes,
        }
    }
}

impl EncryptionOracle for EcbOracle {
    fn encrypt(&self, prefix: &[u8]) -> Result<Vec<u8>> {
        let message = [prefix, self.unknown_bytes.as_slice()].concat();
        ecb_encrypt(&self.cipher, &Pkcs7::AES.pad(&message))
    }
}

pub fn byte_at_a_time_aes_ecb_decrypt<O>(oracle: &O) -> Result<Vec<u8>>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    byte_at_a_time_aes_ecb_decrypt_with_config(oracle, AttackConfig::default())
}

/// Recover the secret an ECB oracle appends to its input, returning it in
/// `encoding`.
pub fn byte_at_a_time_aes_ecb_decrypt_encoded<O>(oracle: &O, encoding: Encoding) -> Result<String>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    Ok(encoding.encode(&byte_at_a_time_aes_ecb_decrypt(oracle)?))
}

pub fn byte_at_a_time_aes_ecb_decrypt_with_config<O>(oracle: &O, config: AttackConfig) -> Result<Vec<u8>>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    // Everything below relies on equal plaintext blocks giving equal
    // ciphertext blocks.
    if detect_mode(oracle)? != Mode::Ecb {
        warn!("oracle is not using ECB mode, aborting");
        return Err(AttackError::NotEcb.into());
    }

    let Some(block_size) = detect_block_size(oracle, &config)? else {
        warn!(max_probe_len = config.max_probe_len, "could not detect block size");
        return Err(AttackError::BlockSizeNotFound {
            max_probe_len: config.max_probe_len,
        }
        .into());
    };
    let secret_length = detect_secret_length(oracle, block_size, config.filler)?;
    debug!(block_size, secret_length, "starting byte-at-a-time decryption");

    // The secret is recovered one block at a time. Within a block, a filler
    // of 'block_size - 1 - i' bytes pushes the i-th unknown byte to the end
    // of the block we are looking at, so every other byte of that block is
    // either filler or already known. Trying all 256 values for the last
    // byte and comparing ciphertext blocks tells us which one it is.
    let mut decrypted_bytes: Vec<u8> = Vec::with_capacity(secret_length);
    while decrypted_bytes.len() < secret_length {
        let block = crack_next_block(oracle, &decrypted_bytes, block_size, secret_length, config.filler)?;
        decrypted_bytes.extend_from_slice(&block);
        debug!(recovered = decrypted_bytes.len(), secret_length, "recovered block");
    }
    Ok(decrypted_bytes)
}

/// Grow a probe two bytes at a time until the two halves of its ciphertext
/// match and appending bytes makes the ciphertext jump by exactly that many
/// bytes. `None` if no probe up to `config.max_probe_len` bytes does.
pub fn detect_block_size<O>(oracle: &O, config: &AttackConfig) -> Result<Option<usize>>
where
    O: EncryptionOracle + ?Sized,
{
    let mut probe = Vec::with_capacity(config.max_probe_len);
    for probe_len in (2..=config.max_probe_len).step_by(2) {
        probe.resize(probe_len, config.filler);
        let ciphertext = oracle.encrypt(&probe)?;
        let half = probe_len / 2;
        if let (Some(first), Some(second)) = (ciphertext.get(..half), ciphertext.get(half..probe_len)) {
            if first == second {
                if length_jump(oracle, half, config.filler)?.is_some_and(|(_, _, jump)| jump == half) {
                    return Ok(Some(half));
                }
                // Short probes can match by chance.
                debug!(candidate = half, "ciphertext halves matched but block size did not confirm");
            }
        }
    }
    Ok(None)
}

/// Padding always adds between 1 and `block_size` bytes, so appending bytes
/// one at a time grows the ciphertext by exactly one block within
/// `block_size` steps. If that happens after `k` bytes on top of `n`
/// blocks, the secret is `block_size * n - k` bytes long.
pub fn detect_secret_length<O>(oracle: &O, block_size: usize, filler: u8) -> Result<usize>
where
    O: EncryptionOracle + ?Sized,
{
    let initial_len = oracle.encrypt(&[])?.len();
    if initial_len < block_size {
        warn!(initial_len, block_size, "ciphertext shorter than one block");
        return Err(AttackError::ShortCiphertext {
            needed: block_size,
            actual: initial_len,
        }
        .into());
    }

    match length_jump(oracle, block_size, filler)? {
        Some((initial_len, appended, jump)) if jump == block_size => Ok(initial_len - appended),
        found => {
            warn!(block_size, ?found, "ciphertext length did not grow by one block");
            Err(AttackError::SecretLengthNotFound {
                appended: block_size,
            }
            .into())
        }
    }
}

/// Append filler bytes one at a time, up to `max_appended`, until the
/// ciphertext length changes. Returns `(initial_len, appended, jump)`, or
/// `None` when the empty-input ciphertext is not a whole number of
/// `max_appended`-byte blocks or its length never grows.
fn length_jump<O>(oracle: &O, max_appended: usize, filler: u8) -> Result<Option<(usize, usize, usize)>>
where
    O: EncryptionOracle + ?Sized,
{
    let initial_len = oracle.encrypt(&[])?.len();
    if initial_len == 0 || initial_len % max_appended != 0 {
        return Ok(None);
    }
    let mut input = Vec::with_capacity(max_appended);
    for appended in 1..=max_appended {
        input.push(filler);
        let len = oracle.encrypt(&input)?.len();
        if len != initial_len {
            return Ok(len
                .checked_sub(initial_len)
                .map(|jump| (initial_len, appended, jump)));
        }
    }
    Ok(None)
}

fn crack_next_block<O>(
    oracle: &O,
    decrypted_bytes: &[u8],
    block_size: usize,
    secret_length: usize,
    filler: u8,
) -> Result<Vec<u8>>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    let offset = decrypted_bytes.len();
    let mut block: Vec<u8> = Vec::with_capacity(block_size);
    // Always the last 'block_size - 1' bytes before the unknown one: filler
    // first, then the secret as it is recovered.
    let mut prefix = [vec![filler; block_size - 1].as_slice(), decrypted_bytes].concat();

    while block.len() < block_size {
        let position = offset + block.len();
        let reference = oracle.encrypt(&vec![filler; block_size - block.len() - 1])?;
        let target = block_at(&reference, offset, block_size)?;

        let found = (0..=u8::MAX).into_par_iter().find_map_first(|candidate| {
            let mut candidate_msg = prefix.clone();
            candidate_msg.push(candidate);
            let matched = oracle.encrypt(&candidate_msg).and_then(|ciphertext| {
                block_at(&ciphertext, offset, block_size).map(|candidate_block| candidate_block == target)
            });
            match matched {
                Ok(true) => Some(Ok(candidate)),
                Ok(false) => None,
                Err(err) => Some(Err(err)),
            }
        });
        let byte = match found {
            Some(byte) => byte?,
            None => {
                warn!(position, "no candidate byte matched");
                return Err(AttackError::CandidatesExhausted { position }.into());
            }
        };
        trace!(position, byte, "recovered byte");

        block.push(byte);
        if block.len() == block_size || offset + block.len() == secret_length {
            break;
        }
        // Non-empty here: it holds at least 'block_size - 1' bytes.
        prefix.remove(0);
        prefix.push(byte);
    }
    Ok(block)
}

fn block_at(ciphertext: &[u8], offset: usize, block_size: usize) -> Result<&[u8]> {
    ciphertext.get(offset..offset + block_size).ok_or_else(|| {
        warn!(offset, block_size, actual = ciphertext.len(), "ciphertext too short");
        AttackError::ShortCiphertext {
            needed: offset + block_size,
            actual: ciphertext.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use crate::set02::c10::cbc_encrypt;
    use crate::Error;

    const UNKNOWN_STRING: &str = "Um9sbGluJyBpbiBteSA1LjAKV2l0aCBteSByYWctdG9wIGRvd24gc28gbXkg\
aGFpciBjYW4gYmxvdwpUaGUgZ2lybGllcyBvbiBzdGFuZGJ5IHdhdmluZyBq\
dXN0IHRvIHNheSBoaQpEaWQgeW91IHN0b3A/IE5vLCBJIGp1c3QgZHJvdmUg\
YnkK";
    const KEY: &[u8; 16] = b"YELLOW SUBMARINE";

    #[test]
    fn byte_at_a_time_aes_ecb_decrypt_decrypts_message_with_oracle() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let decoded_secret = base64_decode(UNKNOWN_STRING).unwrap();
        let oracle = EcbOracle::with_key(KEY, decoded_secret.clone());

        let secret_bytes = byte_at_a_time_aes_ecb_decrypt(&oracle).unwrap();

        assert_eq!(secret_bytes.len(), 138);
        assert_eq!(secret_bytes, decoded_secret);
    }

    #[test]
    fn decrypts_secret_from_base64_oracle_with_random_key() {
        let mut rng = StdRng::seed_from_u64(12);
        let oracle = EcbOracle::from_base64(&mut rng, UNKNOWN_STRING).unwrap();

        let secret = byte_at_a_time_aes_ecb_decrypt_encoded(&oracle, Encoding::Base64).unwrap();

        assert_eq!(secret, UNKNOWN_STRING);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(15)]
    #[case(16)]
    #[case(17)]
    #[case(33)]
    fn decrypts_secrets_of_any_length(#[case] len: usize) {
        let secret: Vec<u8> = b"Rollin' in my 5.0, with my rag-top down"
            .iter()
            .cycle()
            .take(len)
            .copied()
            .collect();
        let oracle = EcbOracle::with_key(KEY, secret.clone());

        let recovered = byte_at_a_time_aes_ecb_decrypt(&oracle).unwrap();

        assert_eq!(recovered, secret);
    }

    #[test]
    fn detects_block_size_and_secret_length() {
        let oracle = EcbOracle::with_key(KEY, b"sixteen byte key and then some".to_vec());

        let block_size = detect_block_size(&oracle, &AttackConfig::default()).unwrap();
        let secret_length = detect_secret_length(&oracle, 16, 0).unwrap();

        assert_eq!(block_size, Some(16));
        assert_eq!(secret_length, 30);
    }

    #[test]
    fn closure_oracles_can_be_attacked() {
        let oracle = EcbOracle::with_key(KEY, b"closure secret".to_vec());
        let closure = |prefix: &[u8]| oracle.encrypt(prefix).unwrap();

        let recovered = byte_at_a_time_aes_ecb_decrypt(&closure).unwrap();

        assert_eq!(recovered, b"closure secret");
    }

    #[test]
    fn cbc_oracle_is_rejected() {
        let cipher = Aes128::from_key(KEY);
        let oracle = |prefix: &[u8]| {
            let message = [prefix, b"secret".as_slice()].concat();
            cbc_encrypt(&cipher, &[0; 16], &Pkcs7::AES.pad(&message)).unwrap()
        };

        let result = byte_at_a_time_aes_ecb_decrypt(&oracle);

        assert!(matches!(result, Err(Error::Attack(AttackError::NotEcb))));
    }

    #[test]
    fn block_size_not_found_within_probe_bound() {
        let oracle = EcbOracle::with_key(KEY, b"secret".to_vec());
        let config = AttackConfig {
            max_probe_len: 1,
            ..AttackConfig::default()
        };

        let result = byte_at_a_time_aes_ecb_decrypt_with_config(&oracle, config);

        assert!(matches!(
            result,
            Err(Error::Attack(AttackError::BlockSizeNotFound { max_probe_len: 1 }))
        ));
    }

    #[test]
    fn inconsistent_oracle_exhausts_candidates() {
        // Behaves like an honest ECB oracle except for the reference query of
        // the first byte, whose answer no candidate can reproduce.
        let oracle = EcbOracle::with_key(KEY, b"secret".to_vec());
        let flaky = |prefix: &[u8]| {
            if prefix.len() == 15 {
                vec![0xaa; 32]
            } else {
                oracle.encrypt(prefix).unwrap()
            }
        };

        let result = byte_at_a_time_aes_ecb_decrypt(&flaky);

        assert!(matches!(
            result,
            Err(Error::Attack(AttackError::CandidatesExhausted { position: 0 }))
        ));
    }

    #[test]
    fn chance_match_of_first_two_bytes_is_not_taken_as_block_size() {
        // Every ciphertext starts with two equal bytes, so a 2-byte probe
        // looks like a 1-byte block size.
        let secret = b"fifteen bytes!!".to_vec();
        let oracle = EcbOracle::with_key(KEY, secret.clone());
        let colliding = |prefix: &[u8]| {
            let mut ciphertext = oracle.encrypt(prefix).unwrap();
            ciphertext[1] = ciphertext[0];
            ciphertext
        };

        let block_size = detect_block_size(&colliding, &AttackConfig::default()).unwrap();
        let recovered = byte_at_a_time_aes_ecb_decrypt(&colliding).unwrap();

        assert_eq!(block_size, Some(16));
        assert_eq!(recovered, secret);
    }

    #[test]
    fn wrong_block_size_gives_error_not_wrong_length() {
        let oracle = EcbOracle::with_key(KEY, b"fifteen bytes!!".to_vec());

        let result = detect_secret_length(&oracle, 1, 0);

        assert!(matches!(
            result,
            Err(Error::Attack(AttackError::SecretLengthNotFound { appended: 1 }))
        ));
    }

    #[test]
    fn empty_ciphertext_is_too_short() {
        let empty = |_: &[u8]| Vec::<u8>::new();

        let result = detect_secret_length(&empty, 16, 0);

        assert!(matches!(
            result,
            Err(Error::Attack(AttackError::ShortCiphertext { needed: 16, actual: 0 }))
        ));
    }

    #[test]
    fn constant_length_oracle_has_no_secret_length() {
        let constant = |_: &[u8]| vec![0u8; 32];

        let secret_length = detect_secret_length(&constant, 16, 0);
        let attack = byte_at_a_time_aes_ecb_decrypt(&constant);

        assert!(matches!(
            secret_length,
            Err(Error::Attack(AttackError::SecretLengthNotFound { appended: 16 }))
        ));
        // Its halves always match, but the length never jumps.
        assert!(matches!(
            attack,
            Err(Error::Attack(AttackError::BlockSizeNotFound { max_probe_len: 64 }))
        ));
    }

    #[test]
    fn truncated_candidate_ciphertext_is_too_short() {
        // Candidate queries for the first block are exactly one block long.
        let oracle = EcbOracle::with_key(KEY, b"secret".to_vec());
        let truncating = |prefix: &[u8]| {
            let mut ciphertext = oracle.encrypt(prefix).unwrap();
            if prefix.len() == 16 {
                ciphertext.truncate(8);
            }
            ciphertext
        };

        let result = byte_at_a_time_aes_ecb_decrypt(&truncating);

        assert!(matches!(
            result,
            Err(Error::Attack(AttackError::ShortCiphertext { needed: 16, actual: 8 }))
        ));
    }
}
