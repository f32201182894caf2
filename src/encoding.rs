//! Credential encoding for key provisioning.
//!
//! WARNING: this is a reversible Base64 transform, not encryption. It
//! provides no confidentiality whatsoever; anyone holding the envelope can
//! recover the credential. The server contract expects exactly this encoding
//! under the `encryptedKey` field, so it is preserved for compatibility. A
//! deployment that needs real secrecy must replace it with an authenticated
//! encryption scheme negotiated with the server side; changing only the
//! client would break the wire contract.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::ClientError;

/// The encoded form of a user-supplied API credential
///
/// The raw credential is consumed during sealing and never stored; only the
/// encoded text leaves this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEnvelope {
    encoded_key: String,
}

impl CredentialEnvelope {
    /// Encode a raw credential into an envelope
    pub fn seal(raw_key: &str) -> Self {
        Self {
            encoded_key: encode_credential(raw_key),
        }
    }

    /// The encoded credential text sent on the wire
    pub fn encoded(&self) -> &str {
        &self.encoded_key
    }
}

/// Encode a credential as standard Base64
pub fn encode_credential(raw: &str) -> String {
    STANDARD.encode(raw.as_bytes())
}

/// Decode an encoded credential back to its original text
///
/// Exists because the transform is reversible (see the module warning);
/// the workflow itself never decodes.
pub fn decode_credential(encoded: &str) -> Result<String, ClientError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ClientError::Validation(format!("invalid encoded credential: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ClientError::Validation(format!("invalid encoded credential: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for raw in ["sk-abc123", "", "pässwörd with spaces", "línea\nnueva"] {
            let encoded = encode_credential(raw);
            assert_eq!(decode_credential(&encoded).unwrap(), raw);
        }
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(encode_credential("hello"), "aGVsbG8=");
    }

    #[test]
    fn test_envelope_carries_encoded_text() {
        let envelope = CredentialEnvelope::seal("sk-abc123");
        assert_eq!(envelope.encoded(), encode_credential("sk-abc123"));
        assert_ne!(envelope.encoded(), "sk-abc123");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_credential("not base64 at all!!!").is_err());
    }
}
