/// Errors reported by the parsing boundary, registry lookups and the
/// external collaborators
///
/// The geometry builders themselves never fail; degenerate input is clamped
/// to the smallest valid result instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid bounding box {bbox:?}: {reason}")]
    InvalidBBox { bbox: [f64; 4], reason: &'static str },

    #[error("Unknown map projection: {0:?}")]
    UnknownProjection(String),

    #[error("Unknown spatial reference: wkid {0}")]
    UnknownSpatialReference(u32),

    #[error("Invalid attribute field name for heading expression: {0:?}")]
    InvalidFieldName(String),

    #[error("No geometry given to plan a view for")]
    EmptyInput,

    #[error("Reprojection failed: {0}")]
    Reprojection(String),

    #[error("Viewport navigation failed: {0}")]
    Viewport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
