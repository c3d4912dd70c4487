use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("profile image '{src}' could not be decoded: {source}")]
    ImageDecode {
        src: String,
        #[source]
        source: image::ImageError,
    },

    #[error("content stream encoding failed: {0}")]
    Encode(String),

    #[error("document serialization failed: {0}")]
    Serialize(#[from] std::io::Error),
}
