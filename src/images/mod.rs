//! `/images`: generate images from a prompt, edit an image, or create variations of one.
//!
//! Generation takes a JSON body. Edits and variations upload the source image, so their payloads
//! hold [`FormFile`]s and are sent as `multipart/form-data`.

pub mod response;

pub use self::response::*;

use super::*;

/// Payload for [`Client::image`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageRequest {
    pub fn new<P: Into<String>>(prompt: P) -> Self {
        ImageRequest {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Payload for [`Client::image_edit`].
///
/// # Example
/// ```rust,ignore
/// let mut image = NamedReader::open("otter.png")?;
/// let request = ImageEditRequest::new(FormFile::new(&mut image), "An otter wearing a hat");
/// let images = client.image_edit(&request).await?;
/// ```
#[derive(Debug, Serialize)]
pub struct ImageEditRequest<'a> {
    pub image: FormFile<'a>,
    /// Transparent areas mark where `image` should be edited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<FormFile<'a>>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl<'a> ImageEditRequest<'a> {
    pub fn new<P: Into<String>>(image: FormFile<'a>, prompt: P) -> Self {
        ImageEditRequest {
            image,
            mask: None,
            prompt: prompt.into(),
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }
}

/// Payload for [`Client::image_variation`].
#[derive(Debug, Serialize)]
pub struct ImageVariationRequest<'a> {
    pub image: FormFile<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl<'a> ImageVariationRequest<'a> {
    pub fn new(image: FormFile<'a>) -> Self {
        ImageVariationRequest {
            image,
            n: None,
            size: None,
            response_format: None,
            user: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ImageSize {
    /// 256x256
    #[serde(rename = "256x256")]
    Small,
    /// 512x512
    #[serde(rename = "512x512")]
    Medium,
    #[default]
    /// 1024x1024 (default)
    #[serde(rename = "1024x1024")]
    Large,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Serialize for ImageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

impl ImageSize {
    pub fn to_str(&self) -> &str {
        match self {
            ImageSize::Small => "256x256",
            ImageSize::Medium => "512x512",
            ImageSize::Large => "1024x1024",
        }
    }
}

/// The format of the generated images. Either a `url` or `b64_json`.
/// The default is `url`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ResponseFormat {
    #[default]
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "b64_json")]
    Base64,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Serialize for ResponseFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

impl ResponseFormat {
    pub fn to_str(&self) -> &str {
        match self {
            ResponseFormat::Url => "url",
            ResponseFormat::Base64 => "b64_json",
        }
    }
}

impl Client {
    /// `POST /images/generations`
    pub async fn image(&self, request: &ImageRequest) -> Result<ImageResponse, OaikitError> {
        self.post_json(Uri::ImageGenerations.path(), request).await
    }

    /// `POST /images/edits` (multipart)
    pub async fn image_edit(
        &self,
        request: &ImageEditRequest<'_>,
    ) -> Result<ImageResponse, OaikitError> {
        self.post_form(Uri::ImageEdits.path(), request).await
    }

    /// `POST /images/variations` (multipart)
    pub async fn image_variation(
        &self,
        request: &ImageVariationRequest<'_>,
    ) -> Result<ImageResponse, OaikitError> {
        self.post_form(Uri::ImageVariations.path(), request).await
    }
}
