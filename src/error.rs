use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no rendering surface available (attempted: {attempted})")]
    SurfaceUnavailable { attempted: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("scene has been destroyed")]
    SceneDisposed,

    #[error("rendering surface failure: {0}")]
    Surface(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),
}
