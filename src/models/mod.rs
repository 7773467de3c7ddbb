//! `/models`: list and describe the models available to the key, and delete fine-tuned ones.

pub mod response;

pub use self::response::*;

use super::*;

impl Client {
    /// `GET /models`
    pub async fn models(&self) -> Result<ModelsResponse, OaikitError> {
        self.get(Uri::Models.path()).await
    }

    /// `GET /models/{id}`
    pub async fn model(&self, model_id: &str) -> Result<Model, OaikitError> {
        self.get(&Uri::Models.item(model_id)).await
    }

    /// `DELETE /models/{id}`. Only models created by fine-tuning can be deleted.
    pub async fn delete_model(&self, model_id: &str) -> Result<DeleteModelResponse, OaikitError> {
        self.delete(&Uri::Models.item(model_id)).await
    }
}
