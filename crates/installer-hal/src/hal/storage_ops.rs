//! Storage configuration operations (apply / reset partitioning).

use crate::HalResult;
use serde::Serialize;
use std::fmt;

/// Arguments for a single apply-storage call.
///
/// Either `partitioning` is set (an already computed partitioning, e.g. from
/// mount point mapping) or the encryption fields are, never both.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStorageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt_password: Option<String>,
}

impl ApplyStorageRequest {
    pub fn with_partitioning(partitioning: Option<String>) -> Self {
        Self {
            partitioning,
            ..Self::default()
        }
    }

    pub fn with_encryption(encrypt: bool, password: &str) -> Self {
        Self {
            partitioning: None,
            encrypt: Some(encrypt),
            encrypt_password: encrypt.then(|| password.to_string()),
        }
    }
}

impl fmt::Debug for ApplyStorageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyStorageRequest")
            .field("partitioning", &self.partitioning)
            .field("encrypt", &self.encrypt)
            .field(
                "encrypt_password",
                &self.encrypt_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

pub trait StorageOps {
    /// Apply the storage configuration for the current scenario.
    fn apply_storage(&self, request: &ApplyStorageRequest) -> HalResult<()>;

    /// Drop any partitioning applied so far so the user can reconfigure it.
    fn reset_partitioning(&self) -> HalResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_password() {
        let request = ApplyStorageRequest::with_encryption(true, "hunter2");
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn disabled_encryption_carries_no_password() {
        let request = ApplyStorageRequest::with_encryption(false, "ignored");
        assert_eq!(request.encrypt, Some(false));
        assert!(request.encrypt_password.is_none());
    }

    #[test]
    fn json_payload_omits_unset_fields() {
        let request = ApplyStorageRequest::with_partitioning(Some("/p/1".to_string()));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"partitioning":"/p/1"}"#);
    }
}
