use super::*;

pub use chat_response::*;
pub use completion_response::*;

/// Token accounting. Used by completion, chat completion, edit and embedding responses; embeddings
/// leave `completion_tokens` out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

mod completion_response {
    use super::*;

    /// Struct representing a successful response from the completions endpoint.
    ///
    /// # Example
    /// ```rust,ignore
    /// let response = client.completion(&request).await?;
    /// for choice in &response.choices {
    ///     println!("{}: {}", choice.index, choice.text);
    /// }
    /// ```
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CompletionResponse {
        pub id: String,
        pub object: String,
        pub created: u64,
        pub model: String,
        pub choices: Vec<Choice>,
        pub usage: Usage,
    }

    impl CompletionResponse {
        /// Text of the first choice, if any.
        pub fn first_text(&self) -> Option<&str> {
            self.choices.first().map(|c| c.text.as_str())
        }
    }

    /// Substruct of [`CompletionResponse`] (and of edit responses).
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Choice {
        pub text: String,
        pub index: u32,
        #[serde(default)]
        pub logprobs: Option<LogProbsResult>,
        #[serde(default)]
        pub finish_reason: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LogProbsResult {
        pub tokens: Vec<String>,
        pub token_logprobs: Vec<Option<f64>>,
        pub top_logprobs: Vec<Option<HashMap<String, f64>>>,
        pub text_offset: Vec<u32>,
    }
}

mod chat_response {
    use super::*;

    /// For representing a successful response from the `/chat/completions` endpoint.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ChatCompletionResponse {
        pub id: String,
        pub object: String,
        pub created: u64,
        pub model: String,
        pub choices: Vec<ChatChoice>,
        pub usage: Usage,
    }

    impl ChatCompletionResponse {
        /// Returns only the first response message.
        pub fn response_message(&self) -> Option<&ChatMessage> {
            self.choices.first().map(|choice| &choice.message)
        }

        /// Returns all response messages.
        pub fn messages(&self) -> Vec<&ChatMessage> {
            self.choices.iter().map(|choice| &choice.message).collect()
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ChatChoice {
        pub index: u32,
        pub message: ChatMessage,
        #[serde(default)]
        pub finish_reason: Option<String>,
    }
}
