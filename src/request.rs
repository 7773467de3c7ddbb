//! The outbound request descriptor and the two ways of giving it a body.

use crate::formdata;

use super::*;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn to_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request, ready to be handed to [`Client::execute`](crate::client::Client::execute).
///
/// `content_type` always describes `body`: it is `None` exactly when there is no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
}

impl OutboundRequest {
    pub fn new<U: Into<String>>(method: HttpMethod, url: U) -> Self {
        OutboundRequest {
            method,
            url: url.into(),
            body: None,
            content_type: None,
        }
    }

    /// Sets `payload`, encoded as JSON, as the body.
    pub fn json<P>(self, payload: &P) -> Result<Self, EncodingError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload)?;
        Ok(OutboundRequest {
            body: Some(body),
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            ..self
        })
    }

    /// Sets `payload`, encoded as `multipart/form-data`, as the body. See [`formdata`] for
    /// which payload shapes are accepted.
    pub fn form<P>(self, payload: &P) -> Result<Self, EncodingError>
    where
        P: Serialize + ?Sized,
    {
        let form = formdata::marshal(payload)?;
        Ok(OutboundRequest {
            body: Some(form.body),
            content_type: Some(form.content_type),
            ..self
        })
    }
}

#[cfg(test)]
mod request_test {
    use std::collections::HashMap;

    use super::*;

    #[derive(Serialize)]
    struct Params {
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        stop: Vec<String>,
        #[serde(skip)]
        #[allow(dead_code)]
        note: String,
    }

    #[test]
    fn bodiless_request_has_no_content_type() {
        let request = OutboundRequest::new(HttpMethod::Get, "https://example.test/v1/models");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://example.test/v1/models");
        assert!(request.body.is_none());
        assert!(request.content_type.is_none());
    }

    #[test]
    fn json_body_omits_empty_and_skipped_fields() {
        let request = OutboundRequest::new(HttpMethod::Post, "https://example.test/v1/completions")
            .json(&Params {
                model: "ada".to_string(),
                suffix: None,
                stop: Vec::new(),
                note: "local only".to_string(),
            })
            .unwrap();

        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "model": "ada" }));
    }

    #[test]
    fn json_body_keeps_populated_fields() {
        let request = OutboundRequest::new(HttpMethod::Post, "https://example.test/v1/completions")
            .json(&Params {
                model: "ada".to_string(),
                suffix: Some("end".to_string()),
                stop: vec!["\n".to_string()],
                note: String::new(),
            })
            .unwrap();

        let body: serde_json::Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "model": "ada", "suffix": "end", "stop": ["\n"] })
        );
    }

    #[test]
    fn json_failure_is_an_encoding_error() {
        // serde_json only accepts string keys.
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);

        let err = OutboundRequest::new(HttpMethod::Post, "https://example.test")
            .json(&bad)
            .unwrap_err();
        assert!(matches!(err, EncodingError::Json(_)));
    }

    #[test]
    fn form_body_carries_boundary_content_type() {
        #[derive(Serialize)]
        struct Form {
            purpose: String,
        }

        let request = OutboundRequest::new(HttpMethod::Post, "https://example.test/v1/files")
            .form(&Form {
                purpose: "fine-tune".to_string(),
            })
            .unwrap();

        let content_type = request.content_type.unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        let body = String::from_utf8(request.body.unwrap()).unwrap();
        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
        assert!(body.contains("name=\"purpose\"\r\n\r\nfine-tune\r\n"));
    }

    #[test]
    fn form_rejects_non_records() {
        let err = OutboundRequest::new(HttpMethod::Post, "https://example.test")
            .form(&42)
            .unwrap_err();
        assert!(matches!(err, EncodingError::NotARecord));
    }

    #[test]
    fn method_strings() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(HttpMethod::Post), reqwest::Method::POST);
    }
}
