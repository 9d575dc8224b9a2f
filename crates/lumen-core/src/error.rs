use thiserror::Error;

#[derive(Error, Debug)]
pub enum LumenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image {width}x{height} is too elongated for a spatial tile grid")]
    TileGrid { width: usize, height: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LumenError>;
