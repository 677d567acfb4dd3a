//! Narrow wrapper over the multipart/form-data decoder.
//!
//! The "find the part with a filename" selection rule is application logic
//! kept here explicitly; the wire-format splitting is delegated to `multer`.

use crate::error::ImportError;
use bytes::Bytes;
use futures_util::stream;
use log::debug;
use multer::Multipart;
use std::convert::Infallible;

/// Extract the uploaded file payload from a raw multipart body.
///
/// The boundary is derived from the content-type header. When the header
/// declares no boundary at all, the whole body is treated as the payload
/// directly (bare file upload).
pub async fn extract_file_part(body: Bytes, content_type: &str) -> Result<Bytes, ImportError> {
    let boundary = match multer::parse_boundary(content_type) {
        Ok(boundary) => boundary,
        Err(_) => {
            debug!("no multipart boundary declared, using body as payload");
            return Ok(body);
        }
    };

    let mut multipart = Multipart::new(
        stream::once(async move { Ok::<Bytes, Infallible>(body) }),
        boundary,
    );

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            return Ok(field.bytes().await?);
        }
    }

    Err(ImportError::MalformedContainer(
        "multipart body contains no file part".to_string(),
    ))
}
