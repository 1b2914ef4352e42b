use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use scrypt::Params;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Separator between the encoded salt and the encoded derived key.
const RECORD_SEPARATOR: char = ':';

/// Cost and size knobs of the scrypt key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParameters {
    /// CPU/memory cost, as a power of two (N = 2^log_n)
    pub log_n: u8,
    /// Block size factor
    pub r: u32,
    /// Parallelization factor
    pub p: u32,
    /// Length of the derived key in bytes
    pub key_length: usize,
    /// Length of the random salt in bytes
    pub salt_length: usize,
}

impl Default for HashingParameters {
    fn default() -> Self {
        Self {
            log_n: 14,
            r: 8,
            p: 1,
            key_length: 32,
            salt_length: 16,
        }
    }
}

/// Password hashing implementation.
///
/// Produces credential records of the form `base64(salt):base64(derived_key)`
/// using scrypt. Records are compared, never decoded back into a password.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    key_length: usize,
    salt_length: usize,
}

impl PasswordHasher {
    /// Create a new password hasher with the given cost parameters.
    ///
    /// # Errors
    /// * `InvalidParameters` - scrypt rejects the parameter combination,
    ///   or the key or salt length is zero
    pub fn new(parameters: HashingParameters) -> Result<Self, PasswordError> {
        if parameters.key_length == 0 || parameters.salt_length == 0 {
            return Err(PasswordError::InvalidParameters(
                "key and salt length must be non-zero".to_string(),
            ));
        }

        let params = Params::new(
            parameters.log_n,
            parameters.r,
            parameters.p,
            parameters.key_length,
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            params,
            key_length: parameters.key_length,
            salt_length: parameters.salt_length,
        })
    }

    /// Hash a plaintext password into a credential record.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// `base64(salt):base64(derived_key)`, unpadded standard alphabet
    ///
    /// # Errors
    /// * `SaltGenerationFailed` - The OS entropy source could not be read
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.salt_length];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::SaltGenerationFailed(e.to_string()))?;

        let derived_key = self.derive(password, &salt)?;

        Ok(format!(
            "{}{}{}",
            STANDARD_NO_PAD.encode(&salt),
            RECORD_SEPARATOR,
            STANDARD_NO_PAD.encode(&derived_key)
        ))
    }

    /// Check a plaintext password against a stored credential record.
    ///
    /// Malformed records and derivation failures yield `false`. The final key
    /// comparison runs in constant time.
    pub fn verify(&self, password: &str, record: &str) -> bool {
        let Some((salt, stored_key)) = Self::split_record(record) else {
            return false;
        };

        match self.derive(password, &salt) {
            Ok(derived_key) => derived_key.ct_eq(&stored_key).into(),
            Err(e) => {
                tracing::warn!(error = %e, "Password verification could not derive key");
                false
            }
        }
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, PasswordError> {
        let mut derived_key = vec![0u8; self.key_length];
        scrypt::scrypt(password.as_bytes(), salt, &self.params, &mut derived_key)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(derived_key)
    }

    fn split_record(record: &str) -> Option<(Vec<u8>, Vec<u8>)> {
        let mut parts = record.split(RECORD_SEPARATOR);
        let (salt, key) = match (parts.next(), parts.next(), parts.next()) {
            (Some(salt), Some(key), None) => (salt, key),
            _ => return None,
        };

        let salt = STANDARD_NO_PAD.decode(salt).ok()?;
        let key = STANDARD_NO_PAD.decode(key).ok()?;
        Some((salt, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(HashingParameters {
            log_n: 10,
            ..HashingParameters::default()
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let password = "my_secure_password";

        let record = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &record));
        assert!(!hasher.verify("wrong_password", &record));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let hasher = test_hasher();

        let first = hasher.hash("secret").expect("Failed to hash password");
        let second = hasher.hash("secret").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first));
        assert!(hasher.verify("secret", &second));
        assert!(!hasher.verify("wrong", &first));
        assert!(!hasher.verify("wrong", &second));
    }

    #[test]
    fn test_record_layout() {
        let hasher = test_hasher();
        let record = hasher.hash("secret").expect("Failed to hash password");

        let (salt, key) = record.split_once(':').expect("Missing separator");
        assert_eq!(STANDARD_NO_PAD.decode(salt).unwrap().len(), 16);
        assert_eq!(STANDARD_NO_PAD.decode(key).unwrap().len(), 32);
        assert!(!record.contains('='));
    }

    #[test]
    fn test_verify_malformed_record() {
        let hasher = test_hasher();

        assert!(!hasher.verify("anything", "not-a-valid-record"));
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "a:b:c"));
        assert!(!hasher.verify("anything", "!!!:???"));
    }

    #[test]
    fn test_verify_truncated_key() {
        let hasher = test_hasher();
        let record = hasher.hash("secret").expect("Failed to hash password");
        let truncated = &record[..record.len() - 4];

        assert!(!hasher.verify("secret", truncated));
    }

    #[test]
    fn test_invalid_parameters() {
        let result = PasswordHasher::new(HashingParameters {
            key_length: 0,
            ..HashingParameters::default()
        });
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));

        let result = PasswordHasher::new(HashingParameters {
            log_n: 64,
            ..HashingParameters::default()
        });
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
