use crate::clients::{ApiClient, SetKeyRequest, failure_from_response};
use crate::encoding::CredentialEnvelope;
use crate::error::{ClientError, ErrorDefaults};

const KEY_DEFAULTS: ErrorDefaults = ErrorDefaults {
    rate_limit: "You have reached the daily usage limit",
    server: "Unknown error",
};

/// Client for provisioning the server-side API credential
#[derive(Debug, Clone)]
pub struct KeyProvisioningClient {
    api: ApiClient,
}

impl KeyProvisioningClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Encode and submit a raw credential
    ///
    /// An empty key fails fast without touching the network. The raw key is
    /// held only for the duration of this call and never logged or cached;
    /// only the encoded envelope goes on the wire.
    pub async fn submit(&self, raw_key: &str) -> Result<(), ClientError> {
        if raw_key.trim().is_empty() {
            return Err(ClientError::Validation(
                "API key must not be empty".to_string(),
            ));
        }

        let envelope = CredentialEnvelope::seal(raw_key);
        ::log::info!(
            "Provisioning API key ({} encoded chars)",
            envelope.encoded().len()
        );

        let request = SetKeyRequest {
            encrypted_key: envelope.encoded(),
        };
        let response = self.api.post_json("set-key", &request).await?;

        if !response.status().is_success() {
            let error = failure_from_response(response, &KEY_DEFAULTS).await;
            ::log::warn!("Key provisioning failed: {}", error);
            return Err(error);
        }

        ::log::info!("API key accepted by the server");
        Ok(())
    }
}
