use super::*;

/// Response of every image endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub created: u64,
    pub data: Vec<ImageData>,
}

/// One generated image. Exactly one of the fields is set, depending on the requested
/// [`ResponseFormat`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
}

#[cfg(test)]
mod response_test {
    use super::*;

    #[test]
    fn url_or_base64() {
        let body = r#"{
            "created": 1589478378,
            "data": [{ "url": "https://example.test/a.png" }, { "b64_json": "aGVsbG8=" }]
        }"#;

        let response: ImageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data[0].url.as_deref(), Some("https://example.test/a.png"));
        assert_eq!(response.data[0].b64_json, None);
        assert_eq!(response.data[1].b64_json.as_deref(), Some("aGVsbG8="));
    }
}
