use thiserror::Error;

/// Errors raised while composing a proportional-symbol map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("missing coordinates: {0}")]
    MissingCoordinates(String),

    #[error("no matching categories: {0}")]
    NoMatchingCategories(String),

    #[error("no data: {0}")]
    NoData(String),

    #[error("invalid mode '{given}', expected one of: {}", .valid.join(", "))]
    InvalidMode {
        given: String,
        valid: &'static [&'static str],
    },

    #[error("invalid value selector '{given}', expected one of: {}", .valid.join(", "))]
    InvalidSelector {
        given: String,
        valid: &'static [&'static str],
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Failure reported by a canvas backend while drawing. The bundled cairo
    /// canvas only fails at export time; other backends report through this.
    #[error("canvas error: {0}")]
    Canvas(#[source] Box<dyn std::error::Error + Send + Sync>),
}
