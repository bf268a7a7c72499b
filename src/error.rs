use thiserror::Error;

/// Errors raised while parsing or decoding swatch data
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Malformed drag transfer data: {0}")]
    MalformedTransfer(#[from] serde_json::Error),
}

/// Errors raised by the palette grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell index {index} is out of range for a grid of {len} cells")]
    OutOfRange { index: usize, len: usize },

    #[error("Unsupported grid dimension {0}, expected 2, 3 or 4")]
    UnsupportedSize(usize),
}

/// Errors raised by the painting engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaintError {
    #[error("No color selected")]
    NoColorSelected,
}

/// Errors that can occur while rendering the artwork layer
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("Failed to load artwork '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid artwork dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Errors that can occur during palette persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize palettes: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access palette store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Palette not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("Invalid palette: {0}")]
    InvalidPalette(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur while exporting images
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
