use thiserror::Error;

#[derive(Error, Debug)]
pub enum FenceError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Anchor ({lat}, {lon}) is outside the valid range of the planar coordinate system")]
    AnchorOutOfRange { lat: f64, lon: f64 },

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Scale factor must be finite and positive, got {0}")]
    InvalidScale(f64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FenceError>;
