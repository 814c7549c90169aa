use crate::Result;

/// A black box that encrypts caller-chosen plaintext under state the caller
/// cannot see.
///
/// For a given instance, the attacks in this crate assume `encrypt` behaves
/// like a function of its input alone. Plain closures returning the
/// ciphertext are oracles too.
pub trait EncryptionOracle {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
}

impl<F> EncryptionOracle for F
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(self(plaintext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_oracles() {
        let reverse = |bytes: &[u8]| bytes.iter().rev().copied().collect::<Vec<u8>>();

        let ciphertext = reverse.encrypt(b"abc").unwrap();

        assert_eq!(ciphertext, b"cba");
    }
}
