//! Presigned upload contracts.
//!
//! The object-storage collaborator issues a one-shot upload URL per file;
//! the raw bytes go straight to that URL and the returned key is what the
//! design draft references from then on.

use serde::{Deserialize, Serialize};

/// Request for a presigned upload slot: `POST /uploads/presign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Original file name
    pub filename: String,
    /// MIME type as reported by the client
    pub mime_type: String,
}

/// A presigned upload slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    /// URL to PUT the raw bytes to
    pub upload_url: String,
    /// Stable key the uploaded file is retrievable under
    pub file_key: String,
}

/// Public retrieval URL for an uploaded file: `{publicBase}/{fileKey}`.
pub fn public_url(public_base: &str, file_key: &str) -> String {
    format!(
        "{}/{}",
        public_base.trim_end_matches('/'),
        file_key.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_join() {
        assert_eq!(
            public_url("https://cdn.example.com", "uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
        // Stray slashes on either side collapse to one
        assert_eq!(
            public_url("https://cdn.example.com/", "/uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
    }

    #[test]
    fn test_presign_wire_format() {
        let req = PresignRequest {
            filename: "logo.png".to_string(),
            mime_type: "image/png".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"mimeType\""));

        let resp: PresignResponse = serde_json::from_str(
            r#"{"uploadUrl":"https://bucket/put","fileKey":"uploads/logo.png"}"#,
        )
        .unwrap();
        assert_eq!(resp.file_key, "uploads/logo.png");
    }
}
