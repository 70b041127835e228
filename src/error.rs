use thiserror::Error;

pub type GlobeResult<T> = Result<T, GlobeError>;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("country geometry unavailable: {0}")]
    GeometryAsset(String),

    #[error("selection toggle for `{country}` rejected: {reason}")]
    SelectionRejected { country: String, reason: String },
}
