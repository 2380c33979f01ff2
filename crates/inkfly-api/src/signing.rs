// Request signing for the Inkpress runtime API.
//
// Every call carries freshly minted auth fields derived from the tenant
// key pair and the current unix timestamp:
//
//   signature = hex(md5(apiKey ++ secretKey ++ timestamp))
//
// Field names, concatenation order, and the lowercase-hex encoding are the
// provider's wire contract. The scheme is weak (unsalted fast digest,
// replayable within one second); it survives here for wire compatibility
// only.

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::Error;

/// One tenant's API credentials.
///
/// Immutable for the life of a client. The secret key is held as a
/// [`SecretString`] so debug output and logs never leak it.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Build credentials, rejecting empty keys before any network I/O.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config {
                message: "API key must not be empty".into(),
            });
        }
        if secret_key.trim().is_empty() {
            return Err(Error::Config {
                message: "secret key must not be empty".into(),
            });
        }
        Ok(Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// The public half of the key pair, as sent on the wire.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Stable tenant identity for cache keying.
    ///
    /// A digest of the key pair with a separator, so it never equals any
    /// wire signature and is safe to persist alongside cached data.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.api_key.as_bytes());
        hasher.update(b":");
        hasher.update(self.secret_key.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Sign the given unix timestamp, producing the wire auth fields.
    pub fn sign_at(&self, timestamp: i64) -> SignedRequest {
        let mut hasher = Md5::new();
        hasher.update(self.api_key.as_bytes());
        hasher.update(self.secret_key.expose_secret().as_bytes());
        hasher.update(timestamp.to_string().as_bytes());
        SignedRequest {
            timestamp,
            api_key: self.api_key.clone(),
            signature: hex::encode(hasher.finalize()),
        }
    }

    /// Sign the current wall-clock time.
    pub fn sign_now(&self) -> SignedRequest {
        self.sign_at(chrono::Utc::now().timestamp())
    }
}

/// Auth fields attached to every request.
///
/// Serialized flat alongside the operation parameters in one JSON body (or
/// as form fields on the raster endpoint).
#[derive(Debug, Clone, Serialize)]
pub struct SignedRequest {
    pub timestamp: i64,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub signature: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_api_key_is_rejected() {
        let result = Credentials::new("", "secret");
        assert!(
            matches!(result, Err(Error::Config { .. })),
            "expected Config error, got: {result:?}"
        );
    }

    #[test]
    fn empty_secret_key_is_rejected() {
        let result = Credentials::new("key", "");
        assert!(
            matches!(result, Err(Error::Config { .. })),
            "expected Config error, got: {result:?}"
        );
    }

    #[test]
    fn whitespace_only_keys_are_rejected() {
        assert!(Credentials::new("   ", "secret").is_err());
        assert!(Credentials::new("key", "   ").is_err());
    }

    #[test]
    fn signature_matches_known_vector() {
        let creds = Credentials::new("demo-key", "demo-secret").unwrap();
        let signed = creds.sign_at(1_700_000_000);
        assert_eq!(signed.signature, "6eb1eb1912a2ba5c61d7bce736cbfa72");
        assert_eq!(signed.api_key, "demo-key");
        assert_eq!(signed.timestamp, 1_700_000_000);
    }

    #[test]
    fn signature_is_deterministic_for_same_timestamp() {
        let creds = Credentials::new("demo-key", "demo-secret").unwrap();
        let first = creds.sign_at(1_700_000_000);
        let second = creds.sign_at(1_700_000_000);
        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn signature_differs_across_timestamps() {
        let creds = Credentials::new("demo-key", "demo-secret").unwrap();
        let first = creds.sign_at(1_700_000_000);
        let second = creds.sign_at(1_700_000_001);
        assert_ne!(first.signature, second.signature);
        assert_eq!(second.signature, "b6a966a784cdabfa0235d5a2c710fe13");
    }

    #[test]
    fn fingerprint_is_stable_and_distinct_per_tenant() {
        let a = Credentials::new("key-a", "secret-a").unwrap();
        let b = Credentials::new("key-b", "secret-b").unwrap();
        assert_eq!(a.fingerprint(), a.fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_never_equals_a_signature() {
        // The separator keeps cache keys out of the signature input space.
        let creds = Credentials::new("key", "secret").unwrap();
        let fingerprint = creds.fingerprint();
        assert_ne!(fingerprint, creds.sign_at(0).signature);
    }

    #[test]
    fn signed_request_serializes_with_wire_field_names() {
        let creds = Credentials::new("demo-key", "demo-secret").unwrap();
        let value = serde_json::to_value(creds.sign_at(1_700_000_000)).unwrap();
        assert_eq!(value["apiKey"], "demo-key");
        assert_eq!(value["timestamp"], 1_700_000_000);
        assert_eq!(value["signature"], "6eb1eb1912a2ba5c61d7bce736cbfa72");
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let creds = Credentials::new("demo-key", "demo-secret").unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("demo-secret"), "secret leaked: {debug}");
    }
}
