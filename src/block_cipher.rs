// The single-block primitive the chaining modes are built on. AES itself
// comes from the RustCrypto `aes` crate; everything above the block level
// (ECB, CBC, padding) is implemented in this crate.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};

use crate::config::AES_BLOCK_SIZE;
use crate::{Error, Result};

/// A keyed permutation over fixed-size blocks.
///
/// Implementations may assume every slice they are handed is exactly
/// `block_size()` bytes long; the mode functions guarantee it.
pub trait BlockCipher {
    fn block_size(&self) -> usize;
    fn encrypt_block(&self, block: &mut [u8]);
    fn decrypt_block(&self, block: &mut [u8]);
}

pub struct Aes128 {
    inner: aes::Aes128,
}

impl Aes128 {
    pub fn new(key: &[u8]) -> Result<Self> {
        let inner = aes::Aes128::new_from_slice(key).map_err(|_| Error::InvalidKeyLength {
            expected: AES_BLOCK_SIZE,
            actual: key.len(),
        })?;
        Ok(Self { inner })
    }

    pub fn from_key(key: &[u8; AES_BLOCK_SIZE]) -> Self {
        Self {
            inner: aes::Aes128::new(&GenericArray::from(*key)),
        }
    }
}

impl BlockCipher for Aes128 {
    fn block_size(&self) -> usize {
        AES_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        self.inner.encrypt_block(GenericArray::from_mut_slice(block));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        self.inner.decrypt_block(GenericArray::from_mut_slice(block));
    }
}

pub(crate) fn ensure_block_aligned(len: usize, block_size: usize) -> Result<()> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize(block_size));
    }
    if len % block_size != 0 {
        return Err(Error::NotBlockAligned { len, block_size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes_128_encrypts_fips_197_vector() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let mut block = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let cipher = Aes128::new(&key).unwrap();

        cipher.encrypt_block(&mut block);

        assert_eq!(hex::encode(&block), "69c4e0d86a7b0430d8cdb78070b4c55a");
        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn aes_128_rejects_short_key() {
        let err = Aes128::new(b"YELLOW SUB").err().unwrap();

        assert!(matches!(
            err,
            Error::InvalidKeyLength {
                expected: 16,
                actual: 10
            }
        ));
    }

    #[test]
    fn ensure_block_aligned_rejects_ragged_length() {
        assert!(ensure_block_aligned(32, 16).is_ok());
        assert!(matches!(
            ensure_block_aligned(33, 16),
            Err(Error::NotBlockAligned {
                len: 33,
                block_size: 16
            })
        ));
        assert!(matches!(
            ensure_block_aligned(16, 0),
            Err(Error::InvalidBlockSize(0))
        ));
    }
}
