//! `/edits`: rewrite an input following an instruction.

pub mod response;

pub use self::response::*;

use crate::completions::{Choice, Usage};

use super::*;

/// Payload for [`Client::edit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl EditRequest {
    pub fn new<M, I>(model: M, instruction: I) -> Self
    where
        M: Into<String>,
        I: Into<String>,
    {
        EditRequest {
            model: model.into(),
            instruction: instruction.into(),
            ..Default::default()
        }
    }
}

impl Client {
    /// `POST /edits`
    pub async fn edit(&self, request: &EditRequest) -> Result<EditResponse, OaikitError> {
        self.post_json(Uri::Edits.path(), request).await
    }
}
