use crate::block_cipher::{ensure_block_aligned, Aes128, BlockCipher};
use crate::set01::c01::Encoding;
use crate::set02::c09::Pkcs7;
use crate::Result;

/// Encrypt each block independently. The input must already be padded.
pub fn ecb_encrypt<C: BlockCipher + ?Sized>(cipher: &C, plaintext: &[u8]) -> Result<Vec<u8>> {
    ensure_block_aligned(plaintext.len(), cipher.block_size())?;
    let mut ciphertext = plaintext.to_vec();
    ciphertext
        .chunks_exact_mut(cipher.block_size())
        .for_each(|block| cipher.encrypt_block(block));
    Ok(ciphertext)
}

pub fn ecb_decrypt<C: BlockCipher + ?Sized>(cipher: &C, ciphertext: &[u8]) -> Result<Vec<u8>> {
    ensure_block_aligned(ciphertext.len(), cipher.block_size())?;
    let mut plaintext = ciphertext.to_vec();
    plaintext
        .chunks_exact_mut(cipher.block_size())
        .for_each(|block| cipher.decrypt_block(block));
    Ok(plaintext)
}

/// Decrypt encoded AES-128-ECB ciphertext under an equally encoded key and
/// strip the PKCS#7 padding. The plaintext comes back in the same encoding.
pub fn decrypt_aes_128_ecb_encoded(ciphertext: &str, key: &str, encoding: Encoding) -> Result<String> {
    let cipher = Aes128::new(&encoding.decode(key)?)?;
    let mut plaintext = ecb_decrypt(&cipher, &encoding.decode(ciphertext)?)?;
    Pkcs7::AES.unpad(&mut plaintext)?;
    Ok(encoding.encode(&plaintext))
}
