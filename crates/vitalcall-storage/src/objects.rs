use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Result of a GET operation, including the body and ETag.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Write precondition for [`put_object`].
#[derive(Debug, Clone, Copy)]
pub enum Precondition<'a> {
    /// Unconditional overwrite.
    None,
    /// Only write if the stored ETag still matches (optimistic locking).
    IfMatch(&'a str),
    /// Only write if no object exists at the key yet.
    IfAbsent,
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// Put a JSON object to S3 under the given precondition. Returns the new ETag.
///
/// A failed `IfMatch` yields [`StorageError::PreconditionFailed`]; a failed
/// `IfAbsent` yields [`StorageError::AlreadyExists`].
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    precondition: Precondition<'_>,
) -> Result<String, StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(JSON_CONTENT_TYPE)
        .body(ByteStream::from(body));

    req = match precondition {
        Precondition::None => req,
        Precondition::IfMatch(etag) => req.if_match(etag),
        Precondition::IfAbsent => req.if_none_match("*"),
    };

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error();
        let message = err.to_string();
        // S3 answers 412 for a lost precondition and 409 for a concurrent
        // conditional write on the same key.
        let lost = ["PreconditionFailed", "ConditionalRequestConflict"]
            .iter()
            .any(|code| err.code() == Some(*code) || message.contains(code));
        match precondition {
            Precondition::IfMatch(_) if lost => StorageError::PreconditionFailed {
                key: key.to_string(),
            },
            Precondition::IfAbsent if lost => StorageError::AlreadyExists {
                key: key.to_string(),
            },
            _ => StorageError::PutObject(message),
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}
