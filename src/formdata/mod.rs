//! `multipart/form-data` encoding for endpoints that upload files.
//!
//! Payloads are ordinary `Serialize` structs. Wire names, omission and exclusion are driven by
//! the usual serde attributes, so the same struct definition reads the same way whether it is
//! sent as JSON or as a form:
//!
//! * `#[serde(rename = "...")]` sets the wire name,
//! * `#[serde(skip)]` leaves the field out entirely,
//! * `#[serde(skip_serializing_if = "...")]` omits empty values (`Option::is_none` for the
//!   common case; a `None` value is never written anyway).
//!
//! File fields are [`FormFile`]s. Every other field must reduce to a single scalar: strings,
//! booleans, integers, floats, unit enum variants, or an `Option`/newtype around one of those.
//! Anything else is rejected with [`EncodingError::Unsupported`].
//!
//! # Example
//! ```rust,ignore
//! #[derive(Serialize)]
//! struct Upload<'a> {
//!     file: FormFile<'a>,
//!     purpose: String,
//! }
//!
//! let mut source = NamedReader::open("data/train.jsonl")?;
//! let form = marshal(&Upload { file: FormFile::new(&mut source), purpose: "fine-tune".into() })?;
//! assert!(form.content_type.starts_with("multipart/form-data; boundary="));
//! ```

mod file;
mod ser;
mod writer;

pub use self::file::{FormFile, NamedReader, UploadSource};

use serde::Serialize;

use self::{ser::RecordSerializer, writer::MultipartWriter};
use crate::error::EncodingError;

/// An encoded form body and the content type (with boundary) it must be sent with.
#[derive(Debug, Clone)]
pub struct FormData {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Encodes `value` as a `multipart/form-data` body.
///
/// `value` must serialize as a struct. Fields are written in declaration order. On error no
/// partial body is returned.
pub fn marshal<T>(value: &T) -> Result<FormData, EncodingError>
where
    T: Serialize + ?Sized,
{
    let mut writer = MultipartWriter::new();
    value.serialize(RecordSerializer {
        writer: &mut writer,
    })?;

    let content_type = writer.content_type();
    let body = writer.finish();
    tracing::trace!(bytes = body.len(), "encoded multipart form");

    Ok(FormData { body, content_type })
}
