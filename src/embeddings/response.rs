use super::*;

/// Struct for deserializing a successful call to the embeddings endpoint.
#[derive(Debug, Serialize, Clone, PartialEq, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingObject>,
    pub model: String,
    pub object: String,
    pub usage: Usage,
}

impl EmbeddingResponse {
    /// The embedding vectors in input order. Does not consume self and, therefore, clones the
    /// inner `Vec<f64>`s.
    pub fn extract_embeddings(&self) -> Vec<Vec<f64>> {
        let mut data = self.data.iter().collect::<Vec<_>>();
        data.sort_by_key(|e| e.index);
        data.into_iter().map(|e| e.embedding.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingObject {
    pub embedding: Vec<f64>,
    pub index: u32,
    pub object: String,
}
