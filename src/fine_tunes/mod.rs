//! `/fine-tunes`: create, list, inspect and cancel fine-tuning jobs, and read their events.
//!
//! Training and validation files must already be uploaded (see [`Client::upload_file`]); jobs
//! refer to them by id.

pub mod response;

pub use self::response::*;

use crate::files::File;

use super::*;

/// Payload for [`Client::create_fine_tune`].
///
/// # Example
/// ```rust,ignore
/// let job = client
///     .create_fine_tune(&FineTuneRequest {
///         n_epochs: Some(2),
///         suffix: Some("support-bot".to_string()),
///         ..FineTuneRequest::new("file-XGinujblHPwGLSztz8cPS8XY")
///     })
///     .await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FineTuneRequest {
    /// The id of a file that has *already been uploaded*.
    pub training_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classification_betas: Vec<f64>,
    /// Up to 40 characters appended to the fine-tuned model's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FineTuneRequest {
    pub fn new<F: Into<String>>(training_file: F) -> Self {
        FineTuneRequest {
            training_file: training_file.into(),
            ..Default::default()
        }
    }
}

impl Client {
    /// `POST /fine-tunes`
    pub async fn create_fine_tune(
        &self,
        request: &FineTuneRequest,
    ) -> Result<FineTune, OaikitError> {
        self.post_json(Uri::FineTunes.path(), request).await
    }

    /// `GET /fine-tunes`
    pub async fn fine_tunes(&self) -> Result<FineTunesResponse, OaikitError> {
        self.get(Uri::FineTunes.path()).await
    }

    /// `GET /fine-tunes/{id}`
    pub async fn fine_tune(&self, fine_tune_id: &str) -> Result<FineTune, OaikitError> {
        self.get(&Uri::FineTunes.item(fine_tune_id)).await
    }

    /// `POST /fine-tunes/{id}/cancel`
    pub async fn cancel_fine_tune(&self, fine_tune_id: &str) -> Result<FineTune, OaikitError> {
        self.post(&cancel_fine_tune_path(fine_tune_id)).await
    }

    /// `GET /fine-tunes/{id}/events`
    pub async fn fine_tune_events(
        &self,
        fine_tune_id: &str,
    ) -> Result<FineTuneEventsResponse, OaikitError> {
        self.get(&fine_tune_events_path(fine_tune_id)).await
    }
}
