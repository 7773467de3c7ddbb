#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize, Serializer};

pub mod client;
pub mod completions;
pub mod edits;
pub mod embeddings;
pub mod error;
pub mod files;
pub mod fine_tunes;
pub mod formdata;
pub mod images;
pub mod models;
pub mod moderations;
pub mod request;

pub use crate::{
    client::{Client, ClientBuilder, DEFAULT_BASE_URL},
    error::{ApiError, EncodingError, OaikitError},
    formdata::{FormFile, NamedReader, UploadSource},
    request::{HttpMethod, OutboundRequest},
};

use crate::error::*;

/// Endpoint collections, relative to the client's base URL.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub(crate) enum Uri {
    ChatCompletions,
    Completions,
    Edits,
    Embeddings,
    Files,
    FineTunes,
    ImageEdits,
    ImageGenerations,
    ImageVariations,
    Models,
    Moderations,
}

impl Uri {
    pub(crate) fn path(&self) -> &'static str {
        match self {
            Uri::ChatCompletions => "/chat/completions",
            Uri::Completions => "/completions",
            Uri::Edits => "/edits",
            Uri::Embeddings => "/embeddings",
            Uri::Files => "/files",
            Uri::FineTunes => "/fine-tunes",
            Uri::ImageEdits => "/images/edits",
            Uri::ImageGenerations => "/images/generations",
            Uri::ImageVariations => "/images/variations",
            Uri::Models => "/models",
            Uri::Moderations => "/moderations",
        }
    }

    /// Path of a single resource in this collection.
    pub(crate) fn item(&self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }
}

pub(crate) fn file_content_path(file_id: &str) -> String {
    format!("{}/content", Uri::Files.item(file_id))
}

pub(crate) fn cancel_fine_tune_path(fine_tune_id: &str) -> String {
    format!("{}/cancel", Uri::FineTunes.item(fine_tune_id))
}

pub(crate) fn fine_tune_events_path(fine_tune_id: &str) -> String {
    format!("{}/events", Uri::FineTunes.item(fine_tune_id))
}
