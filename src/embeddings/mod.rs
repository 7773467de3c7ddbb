//! `/embeddings`: vector representations of text.

pub mod response;

pub use self::response::*;

use crate::completions::Usage;

use super::*;

/// Payload for [`Client::embedding`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingRequest {
    pub fn new<M, I, S>(model: M, input: I) -> Self
    where
        M: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EmbeddingRequest {
            model: model.into(),
            input: input.into_iter().map(Into::into).collect(),
            user: None,
        }
    }
}

impl Client {
    /// `POST /embeddings`
    pub async fn embedding(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, OaikitError> {
        self.post_json(Uri::Embeddings.path(), request).await
    }
}
