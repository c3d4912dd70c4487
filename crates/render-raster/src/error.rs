use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("could not allocate a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error("profile image '{src}' could not be decoded: {source}")]
    ImageDecode {
        src: String,
        #[source]
        source: image::ImageError,
    },

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("PDF assembly failed: {0}")]
    PdfAssembly(String),
}
