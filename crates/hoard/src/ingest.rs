//! Ingest service: validate a submission and build its [`WritePlan`].
//!
//! The service is pure planning. It reads the payload, enforces the
//! configured limits, hashes, classifies, and inspects media, then
//! hands an immutable plan to the orchestrator. Nothing here touches
//! the database or the storage backend.

use crate::classify::{classify, Classification};
use crate::media::image_info;
use hoard_core::{hash_full_b32, ContentFormat, ItemKind, PayloadKind, WritePlan};
use hoard_error::{
    HoardResult, StorageError, StorageErrorKind, ValidationError, ValidationErrorKind,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunable limits for the ingest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Shortest code the resolver may assign
    pub min_code_length: usize,
    /// Maximum payload size in bytes
    pub max_size_bytes: u64,
    /// Maximum stored URL length in bytes
    pub max_url_len: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_code_length: 8,
            max_size_bytes: 1 << 20,
            max_url_len: 2048,
        }
    }
}

/// A single submission to ingest.
///
/// Exactly one of `payload_bytes`, `payload_path`, or `link_url` must
/// be set. The remaining fields are optional classification hints and
/// provenance.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    /// In-memory payload
    pub payload_bytes: Option<Vec<u8>>,
    /// Payload on the local filesystem
    pub payload_path: Option<PathBuf>,
    /// Explicit URL submission; classified as a link without detection
    pub link_url: Option<String>,
    /// Original filename hint
    pub filename: Option<String>,
    /// Declared MIME type hint
    pub declared_mime: Option<String>,
    /// Caller-requested format, trusted over all other hints
    pub requested_format: Option<ContentFormat>,
    /// Original creation time, seconds since the epoch
    pub origin_at: Option<i64>,
}

impl IngestRequest {
    /// Request carrying an in-memory payload.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            payload_bytes: Some(data.into()),
            ..Self::default()
        }
    }

    /// Request carrying a payload on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            payload_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Request storing a URL as a link item.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            link_url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Builds validated, immutable write plans from submissions.
#[derive(Debug, Clone)]
pub struct IngestService {
    config: IngestConfig,
}

impl IngestService {
    /// Create a service with the given limits.
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// The limits this service enforces.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Validate a submission and produce its write plan.
    ///
    /// # Errors
    ///
    /// Validation errors for a bad source combination, empty or
    /// oversized payloads, and overlong URLs; classification errors
    /// when no strategy matches; media errors for picture payloads
    /// with undecodable headers.
    #[tracing::instrument(skip(self, request), fields(has_bytes = request.payload_bytes.is_some(), has_path = request.payload_path.is_some()))]
    pub async fn build_plan(&self, request: &IngestRequest) -> HoardResult<WritePlan> {
        let (data, payload_kind) = self.load_payload(request).await?;

        if data.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyPayload).into());
        }
        let size_b = data.len() as u64;
        if size_b > self.config.max_size_bytes {
            return Err(ValidationError::new(ValidationErrorKind::PayloadTooLarge {
                actual: size_b,
                limit: self.config.max_size_bytes,
            })
            .into());
        }

        let hash_full = hash_full_b32(&data);

        // An explicit URL submission skips detection entirely.
        let classification = match &request.link_url {
            Some(url) => Classification::Link(url.clone()),
            None => classify(
                &data,
                request.filename.as_deref(),
                request.declared_mime.as_deref(),
                request.requested_format,
            )?,
        };

        let mut width = None;
        let mut height = None;
        let mut link_url = None;
        match &classification {
            Classification::Link(url) => {
                let url_len = url.len() as u64;
                if url_len > self.config.max_url_len {
                    return Err(ValidationError::new(ValidationErrorKind::UrlTooLong {
                        actual: url_len,
                        limit: self.config.max_url_len,
                    })
                    .into());
                }
                link_url = Some(url.clone());
            }
            Classification::Payload(format) if format.kind() == ItemKind::Picture => {
                // Classification already fixed the format; inspection
                // contributes dimensions and rejects undecodable data.
                let info = image_info(&data)?;
                width = Some(info.width);
                height = Some(info.height);
            }
            Classification::Payload(_) => {}
        }

        Ok(WritePlan {
            hash_full,
            code_min_len: self.config.min_code_length,
            payload_kind,
            kind: classification.kind(),
            size_b: size_b as i64,
            upload_at: chrono::Utc::now().timestamp(),
            format: classification.format(),
            origin_at: request.origin_at,
            payload_bytes: Some(data),
            payload_path: request.payload_path.clone(),
            width,
            height,
            link_url,
        })
    }

    /// Resolve the submission to payload bytes and their source kind.
    async fn load_payload(&self, request: &IngestRequest) -> HoardResult<(Vec<u8>, PayloadKind)> {
        match (&request.payload_bytes, &request.payload_path, &request.link_url) {
            (Some(bytes), None, None) => Ok((bytes.clone(), PayloadKind::Bytes)),
            (None, Some(path), None) => {
                // Size-check from metadata before reading anything in.
                let meta = tokio::fs::metadata(path)
                    .await
                    .map_err(|e| StorageError::new(StorageErrorKind::Read(e.to_string())))?;
                if meta.len() > self.config.max_size_bytes {
                    return Err(ValidationError::new(ValidationErrorKind::PayloadTooLarge {
                        actual: meta.len(),
                        limit: self.config.max_size_bytes,
                    })
                    .into());
                }
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|e| StorageError::new(StorageErrorKind::Read(e.to_string())))?;
                Ok((data, PayloadKind::File))
            }
            (None, None, Some(url)) => Ok((url.clone().into_bytes(), PayloadKind::Bytes)),
            _ => Err(ValidationError::new(ValidationErrorKind::PayloadSource).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoard_error::HoardErrorKind;

    fn service() -> IngestService {
        IngestService::new(IngestConfig::default())
    }

    fn validation_kind(err: hoard_error::HoardError) -> ValidationErrorKind {
        match err.into_kind() {
            HoardErrorKind::Validation(e) => e.kind,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn hintless_text_bytes_plan_has_expected_shape() {
        let request = IngestRequest::from_bytes(b"Hello, World!".to_vec());

        let plan = service().build_plan(&request).await.unwrap();
        assert_eq!(plan.hash_full, "D7GS0E632ZGYMQAVRXHYZ315");
        assert_eq!(plan.kind, ItemKind::Text);
        assert_eq!(plan.format, Some(ContentFormat::Plaintext));
        assert_eq!(plan.size_b, 13);
        assert_eq!(plan.code_min_len, 8);
        assert_eq!(plan.payload_kind, PayloadKind::Bytes);
        assert!(plan.link_url.is_none());
        assert!(plan.width.is_none() && plan.height.is_none());
    }

    #[tokio::test]
    async fn empty_and_oversized_payloads_are_rejected() {
        let svc = IngestService::new(IngestConfig {
            max_size_bytes: 4,
            ..IngestConfig::default()
        });

        let err = svc
            .build_plan(&IngestRequest::from_bytes(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(validation_kind(err), ValidationErrorKind::EmptyPayload);

        // Exactly at the limit passes validation.
        let mut at_limit = IngestRequest::from_bytes(b"abcd".to_vec());
        at_limit.requested_format = Some(ContentFormat::Plaintext);
        svc.build_plan(&at_limit).await.unwrap();

        let err = svc
            .build_plan(&IngestRequest::from_bytes(b"abcde".to_vec()))
            .await
            .unwrap_err();
        assert_eq!(
            validation_kind(err),
            ValidationErrorKind::PayloadTooLarge {
                actual: 5,
                limit: 4
            }
        );
    }

    #[tokio::test]
    async fn source_combinations_must_be_exactly_one() {
        let svc = service();

        let none = IngestRequest::default();
        let err = svc.build_plan(&none).await.unwrap_err();
        assert_eq!(validation_kind(err), ValidationErrorKind::PayloadSource);

        let mut both = IngestRequest::from_bytes(b"x".to_vec());
        both.payload_path = Some(PathBuf::from("/tmp/x"));
        let err = svc.build_plan(&both).await.unwrap_err();
        assert_eq!(validation_kind(err), ValidationErrorKind::PayloadSource);

        let mut url_and_bytes = IngestRequest::from_bytes(b"x".to_vec());
        url_and_bytes.link_url = Some("https://example.com".to_string());
        let err = svc.build_plan(&url_and_bytes).await.unwrap_err();
        assert_eq!(validation_kind(err), ValidationErrorKind::PayloadSource);
    }

    #[tokio::test]
    async fn file_payload_is_read_and_classified() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        tokio::fs::write(&path, b"# heading\n").await.unwrap();

        let mut request = IngestRequest::from_path(&path);
        request.filename = Some("note.md".to_string());

        let plan = service().build_plan(&request).await.unwrap();
        assert_eq!(plan.payload_kind, PayloadKind::File);
        assert_eq!(plan.format, Some(ContentFormat::Markdown));
        assert_eq!(plan.payload_bytes.as_deref(), Some(b"# heading\n".as_slice()));
        assert_eq!(plan.payload_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn explicit_url_becomes_a_link_plan() {
        let request = IngestRequest::from_url("https://example.com/page");
        let plan = service().build_plan(&request).await.unwrap();
        assert_eq!(plan.kind, ItemKind::Link);
        assert_eq!(plan.format, None);
        assert_eq!(plan.link_url.as_deref(), Some("https://example.com/page"));
        assert_eq!(plan.hash_full, hash_full_b32(b"https://example.com/page"));
    }

    #[tokio::test]
    async fn overlong_url_is_rejected_with_both_numbers() {
        let svc = IngestService::new(IngestConfig {
            max_url_len: 30,
            ..IngestConfig::default()
        });
        let url = format!("https://example.com/{}", "a".repeat(40));
        let err = svc
            .build_plan(&IngestRequest::from_url(url.clone()))
            .await
            .unwrap_err();
        assert_eq!(
            validation_kind(err),
            ValidationErrorKind::UrlTooLong {
                actual: url.len() as u64,
                limit: 30
            }
        );
    }

    #[tokio::test]
    async fn detected_link_payload_builds_a_link_plan() {
        let request = IngestRequest::from_bytes(b"https://example.com/detected".to_vec());
        let plan = service().build_plan(&request).await.unwrap();
        assert_eq!(plan.kind, ItemKind::Link);
        assert_eq!(plan.link_url.as_deref(), Some("https://example.com/detected"));
    }

    #[tokio::test]
    async fn unclassifiable_payload_errors() {
        let request = IngestRequest::from_bytes(vec![0x00, 0xff, 0xfe, 0x01]);
        let err = service().build_plan(&request).await.unwrap_err();
        assert!(matches!(err.into_kind(), HoardErrorKind::Classify(_)));
    }
}
