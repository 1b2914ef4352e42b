use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::TokenKind;
use super::claims::TokenPair;
use super::claims::WireClaims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Session token authority.
///
/// Mints and verifies RS256-signed tokens. The key pair is loaded once and
/// never mutated, so a single instance can be shared across requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenService {
    /// Create a token service from PEM-encoded RSA keys.
    ///
    /// # Arguments
    /// * `private_key` - PEM private key used for signing
    /// * `public_key` - PEM public key used for verification
    /// * `access_lifetime` - Validity window of access tokens
    /// * `refresh_lifetime` - Validity window of refresh tokens
    ///
    /// # Errors
    /// * `InvalidKey` - Either key is not valid RSA PEM
    /// * `InvalidConfiguration` - A lifetime is not positive
    pub fn from_rsa_pem(
        private_key: &[u8],
        public_key: &[u8],
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Result<Self, JwtError> {
        if access_lifetime <= Duration::zero() || refresh_lifetime <= Duration::zero() {
            return Err(JwtError::InvalidConfiguration(
                "token lifetimes must be positive".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_rsa_pem(private_key)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key)
            .map_err(|e| JwtError::InvalidKey(format!("public key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        // Strict against the local clock.
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            access_lifetime,
            refresh_lifetime,
        })
    }

    /// Lifetime applied when minting a token of the given kind.
    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_lifetime,
            TokenKind::Refresh => self.refresh_lifetime,
        }
    }

    /// Mint an access and a refresh token for an identity.
    ///
    /// Both tokens share issuer, subject and user id; each carries its own
    /// token id and expiry.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed (key misconfiguration)
    pub fn generate_tokens(&self, subject: &str, user_id: Uuid) -> Result<TokenPair, JwtError> {
        let access_token = self.generate_token(subject, user_id, TokenKind::Access)?;
        let refresh_token = self.generate_token(subject, user_id, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a single token of the given kind.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed (key misconfiguration)
    pub fn generate_token(
        &self,
        subject: &str,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_identity(subject, user_id, Utc::now(), self.lifetime(kind));
        self.sign(&claims)
    }

    /// Sign an explicit claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - `expires_at` does not follow `issued_at`, or signing failed
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        if claims.expires_at <= claims.issued_at {
            return Err(JwtError::EncodingFailed(
                "expiration must be later than issue time".to_string(),
            ));
        }

        encode(
            &Header::new(Algorithm::RS256),
            &WireClaims::from(claims),
            &self.encoding_key,
        )
        .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Check whether a token is authentic and currently valid.
    ///
    /// # Returns
    /// * `Ok(true)` - Signature verifies and standard claims pass
    /// * `Ok(false)` - Token is well formed but rejected by claim validation
    ///   (expired, not yet valid, foreign issuer)
    ///
    /// # Errors
    /// * `DecodingFailed` - Token cannot be parsed
    /// * `InvalidToken` - Signature or algorithm does not verify
    pub fn validate_token(&self, token: &str) -> Result<bool, JwtError> {
        match decode::<WireClaims>(token, &self.decoding_key, &self.validation) {
            Ok(_) => Ok(true),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidIssuer => Ok(false),
                _ => Err(Self::map_decode_error(e)),
            },
        }
    }

    /// Verify a token and return its typed claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `DecodingFailed` / `InvalidToken` - Token does not verify
    /// * `MissingClaim` - Subject or expiry is absent
    pub fn get_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<WireClaims>(token, &self.decoding_key, &self.validation)
            .map_err(Self::map_decode_error)?;

        Claims::try_from(token_data.claims)
    }

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `InvalidToken` - Refresh token is expired or otherwise rejected
    /// * `MissingClaim` - Refresh token carries no subject or user id
    /// * `EncodingFailed` - Signing the new token failed
    pub fn refresh_token(&self, refresh_token: &str) -> Result<String, JwtError> {
        if !self.validate_token(refresh_token)? {
            return Err(JwtError::InvalidToken("refresh token rejected".to_string()));
        }

        let claims = self.get_claims(refresh_token)?;
        let user_id = claims
            .user_id
            .ok_or_else(|| JwtError::MissingClaim("uid".to_string()))?;

        self.generate_token(&claims.subject, user_id, TokenKind::Access)
    }

    fn map_decode_error(e: jsonwebtoken::errors::Error) -> JwtError {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidIssuer
            | ErrorKind::ImmatureSignature => JwtError::InvalidToken(e.to_string()),
            _ => JwtError::DecodingFailed(e.to_string()),
        }
    }
}
