//! `/moderations`: classify text against the content policy.

pub use moderations_response::*;

use super::*;

/// Payload for [`Client::moderation`]. `model` defaults to the API's `text-moderation-latest`
/// when left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ModerationRequest {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModerationRequest {
            input: input.into_iter().map(Into::into).collect(),
            model: None,
        }
    }
}

impl Client {
    /// `POST /moderations`
    pub async fn moderation(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationResponse, OaikitError> {
        self.post_json(Uri::Moderations.path(), request).await
    }
}

pub mod moderations_response {
    use super::*;

    /// The response doesn't include the input; `results[i]` belongs to `input[i]` of the request.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ModerationResponse {
        pub id: String,
        pub model: String,
        pub results: Vec<Moderation>,
    }

    impl ModerationResponse {
        /// True when any input was flagged.
        pub fn flagged(&self) -> bool {
            self.results.iter().any(|r| r.flagged)
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Moderation {
        pub categories: ModerationCategories,
        pub category_scores: ModerationScores,
        pub flagged: bool,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ModerationCategories {
        pub hate: bool,
        #[serde(rename = "hate/threatening")]
        pub hate_threatening: bool,
        #[serde(rename = "self-harm")]
        pub self_harm: bool,
        pub sexual: bool,
        #[serde(rename = "sexual/minors")]
        pub sexual_minors: bool,
        pub violence: bool,
        #[serde(rename = "violence/graphic")]
        pub violence_graphic: bool,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    pub struct ModerationScores {
        pub hate: f64,
        #[serde(rename = "hate/threatening")]
        pub hate_threatening: f64,
        #[serde(rename = "self-harm")]
        pub self_harm: f64,
        pub sexual: f64,
        #[serde(rename = "sexual/minors")]
        pub sexual_minors: f64,
        pub violence: f64,
        #[serde(rename = "violence/graphic")]
        pub violence_graphic: f64,
    }
}
