use super::*;

/// An uploaded file, as returned by the upload, retrieve and list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub object: String,
    pub bytes: u64,
    pub created_at: u64,
    pub filename: String,
    pub purpose: String,
    // e.g. "uploaded", "processed", "deleted"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesResponse {
    pub object: String,
    pub data: Vec<File>,
}

/// In response to a delete file request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

#[cfg(test)]
mod response_test {
    use super::*;

    #[test]
    fn decode_file_list() {
        let body = r#"{
            "object": "list",
            "data": [
                {
                    "id": "file-ccdDZrC3iZVNiQVeEA6Z66wf", "object": "file", "bytes": 175,
                    "created_at": 1613677385, "filename": "train.jsonl", "purpose": "fine-tune",
                    "status": "processed", "status_details": null
                },
                {
                    "id": "file-XjGxS3KTG0uNmNOK362iJua3", "object": "file", "bytes": 140,
                    "created_at": 1613779121, "filename": "puppy.jsonl", "purpose": "fine-tune"
                }
            ]
        }"#;

        let files: FilesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(files.data.len(), 2);
        assert_eq!(files.data[0].status.as_deref(), Some("processed"));
        assert_eq!(files.data[0].status_details, None);
        assert_eq!(files.data[1].status, None);
    }
}
