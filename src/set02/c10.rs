/// Implement CBC mode
use crate::block_cipher::{ensure_block_aligned, Aes128, BlockCipher};
use crate::set01::c01::Encoding;
use crate::set02::c09::Pkcs7;
use crate::{xor_bytes, Error, Result};

/// `C_i = E(K, P_i ^ C_{i-1})` with `C_{-1} = iv`. The input must already be
/// padded.
pub fn cbc_encrypt<C: BlockCipher + ?Sized>(cipher: &C, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    ensure_iv_len(iv, block_size)?;
    ensure_block_aligned(plaintext.len(), block_size)?;

    let mut ciphertext = Vec::with_capacity(plaintext.len());
    let mut last_block = iv.to_vec();
    for plaintext_block in plaintext.chunks_exact(block_size) {
        let mut block = xor_bytes(plaintext_block, &last_block)?;
        cipher.encrypt_block(&mut block);
        ciphertext.extend_from_slice(&block);
        last_block = block;
    }
    Ok(ciphertext)
}

/// `P_i = D(K, C_i) ^ C_{i-1}` with `C_{-1} = iv`. Padding is left in place.
pub fn cbc_decrypt<C: BlockCipher + ?Sized>(cipher: &C, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    ensure_iv_len(iv, block_size)?;
    ensure_block_aligned(ciphertext.len(), block_size)?;

    let mut message = Vec::with_capacity(ciphertext.len());
    let mut last_block = iv;
    for ciphertext_block in ciphertext.chunks_exact(block_size) {
        let mut block = ciphertext_block.to_vec();
        cipher.decrypt_block(&mut block);
        message.extend(xor_bytes(&block, last_block)?);
        last_block = ciphertext_block;
    }
    Ok(message)
}

/// Decrypt encoded AES-128-CBC ciphertext with an equally encoded key and IV,
/// stripping the PKCS#7 padding. The plaintext comes back in the same
/// encoding.
pub fn decrypt_aes_128_cbc_encoded(
    ciphertext: &str,
    key: &str,
    iv: &str,
    encoding: Encoding,
) -> Result<String> {
    let cipher = Aes128::new(&encoding.decode(key)?)?;
    let mut plaintext = cbc_decrypt(&cipher, &encoding.decode(iv)?, &encoding.decode(ciphertext)?)?;
    Pkcs7::AES.unpad(&mut plaintext)?;
    Ok(encoding.encode(&plaintext))
}

fn ensure_iv_len(iv: &[u8], block_size: usize) -> Result<()> {
    if iv.len() != block_size {
        return Err(Error::InvalidIvLength {
            expected: block_size,
            actual: iv.len(),
        });
    }
    Ok(())
}
