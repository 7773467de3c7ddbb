//! `/files`: upload, list, inspect, download and delete files used by other endpoints
//! (currently fine-tuning).

pub mod response;

use bytes::Bytes;

pub use self::response::*;

use super::*;

/// Payload for [`Client::upload_file`], sent as `multipart/form-data`.
///
/// # Example
/// ```rust,ignore
/// let mut training = NamedReader::open("data/train.jsonl")?;
/// let file = client
///     .upload_file(&UploadFileRequest::new(FormFile::new(&mut training), Purpose::FineTune))
///     .await?;
/// println!("uploaded {} as {}", file.filename, file.id);
/// ```
#[derive(Debug, Serialize)]
pub struct UploadFileRequest<'a> {
    pub file: FormFile<'a>,
    pub purpose: Purpose,
}

impl<'a> UploadFileRequest<'a> {
    pub fn new(file: FormFile<'a>, purpose: Purpose) -> Self {
        UploadFileRequest { file, purpose }
    }
}

// Currently the only available purpose in the API, but if more are added later...
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Purpose {
    #[default]
    FineTune,
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Serialize for Purpose {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

impl Purpose {
    pub fn to_str(&self) -> &str {
        match self {
            Purpose::FineTune => "fine-tune",
        }
    }
}

impl Client {
    /// `GET /files`
    pub async fn files(&self) -> Result<FilesResponse, OaikitError> {
        self.get(Uri::Files.path()).await
    }

    /// `POST /files` (multipart)
    pub async fn upload_file(&self, request: &UploadFileRequest<'_>) -> Result<File, OaikitError> {
        self.post_form(Uri::Files.path(), request).await
    }

    /// `GET /files/{id}`
    pub async fn file(&self, file_id: &str) -> Result<File, OaikitError> {
        self.get(&Uri::Files.item(file_id)).await
    }

    /// `DELETE /files/{id}`
    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, OaikitError> {
        self.delete(&Uri::Files.item(file_id)).await
    }

    /// `GET /files/{id}/content`. The body is returned as-is (JSONL for training files, CSV for
    /// fine-tune result files).
    pub async fn file_content(&self, file_id: &str) -> Result<Bytes, OaikitError> {
        let request = OutboundRequest::new(HttpMethod::Get, self.url(&file_content_path(file_id)));
        self.execute_raw(request).await
    }
}
