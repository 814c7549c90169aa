mod block_cipher;
mod config;
mod error;
mod mode;
mod oracle;
mod set01;
mod set02;

pub use block_cipher::{Aes128, BlockCipher};
pub use config::{
    AttackConfig, AES_BLOCK_SIZE, DETECTION_PROBE, DETECTION_WINDOW, KEY_SIZE_DISTANCE_FLOOR,
    KEY_SIZE_RANGE, MAX_BLOCK_PROBE_LEN, NOISE_LEN_RANGE,
};
pub use error::{AttackError, Error, Result};
pub use mode::{decrypt, encrypt, Mode};
pub use oracle::EncryptionOracle;
pub use set01::c01::{base64_decode, hex_to_b64, hex_to_bytes, Encoding};
pub use set01::c02::{fixed_xor_encoded, xor_bytes};
pub use set01::c03::{
    break_single_byte_xor_encoded, brute_force_byte_xor_cipher, score_plaintext, xor_with_key,
    XorCrackResult,
};
pub use set01::c04::{find_byte_xor_encrypted_line, DetectedXorLine};
pub use set01::c05::{repeating_xor_cipher, repeating_xor_encoded};
pub use set01::c06::{
    break_repeating_xor_encoded, brute_force_repeating_xor, estimate_key_size, hamming_distance,
    recover_repeating_key,
};
pub use set01::c07::{decrypt_aes_128_ecb_encoded, ecb_decrypt, ecb_encrypt};
pub use set01::c08::{count_repeats, find_aes_ecb_line};
pub use set02::c09::{pkcs7_pad_encoded, Pkcs7};
pub use set02::c10::{cbc_decrypt, cbc_encrypt, decrypt_aes_128_cbc_encoded};
pub use set02::c11::{
    classify_ciphertext, detect_mode, detection_trial, encryption_oracle, random_bytes,
    random_mode, RandomModeOracle,
};
pub use set02::c12::{
    byte_at_a_time_aes_ecb_decrypt, byte_at_a_time_aes_ecb_decrypt_encoded,
    byte_at_a_time_aes_ecb_decrypt_with_config, detect_block_size, detect_secret_length, EcbOracle,
};
