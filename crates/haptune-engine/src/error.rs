//! Error types for the curve engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// A user-supplied parameter or curve violates an operation's precondition.
///
/// The operation that raised it has been aborted and left all state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Not enough points in the chosen input curve.
    #[error("not enough points: at least {required} required, found {found}")]
    InsufficientPoints {
        /// Minimum number of points the operation needs.
        required: usize,
        /// Number of points available.
        found: usize,
    },

    /// Downsample stride is not smaller than the original curve length.
    #[error("downsample stride {stride} is too large for {available} original points")]
    StrideTooLarge {
        /// Requested stride.
        stride: usize,
        /// Length of the original curve.
        available: usize,
    },

    /// Downsampling would leave fewer than two points.
    #[error("not enough points after downsampling: {found}")]
    InsufficientResult {
        /// Number of points the stride would keep.
        found: usize,
    },

    /// No original curve is available to downsample.
    #[error("no original points available to downsample")]
    NoOriginalPoints,

    /// Synthesis requested without any enabled frequency component.
    #[error("no frequencies selected for vibration")]
    NoEnabledTones,

    /// The sampling grid for synthesis has no samples.
    #[error("sampling grid is empty: curve span {span} at {sampling_rate} samples per 1000 units")]
    EmptyGrid {
        /// Width of the curve domain.
        span: f64,
        /// Sampling rate used for the grid.
        sampling_rate: u32,
    },

    /// A configuration value is outside its accepted range.
    #[error("invalid parameter '{name}': {message}")]
    ParameterOutOfRange {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

/// Errors that can occur in the curve engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Precondition violated by user input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Spline construction failed for ill-conditioned input.
    #[error("spline fitting failed: {message}")]
    NumericalFitting {
        /// Error message.
        message: String,
    },

    /// Malformed curve file content.
    #[error("malformed curve data: {message}")]
    ImportFormat {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a parameter range error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::ParameterOutOfRange {
            name: name.into(),
            message: message.into(),
        })
    }

    /// Creates a numerical fitting error.
    pub fn fitting(message: impl Into<String>) -> Self {
        Self::NumericalFitting {
            message: message.into(),
        }
    }

    /// Creates an import format error.
    pub fn import_format(message: impl Into<String>) -> Self {
        Self::ImportFormat {
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(ValidationError::InsufficientPoints { .. }) => "HAPTUNE_001",
            EngineError::Validation(ValidationError::StrideTooLarge { .. }) => "HAPTUNE_002",
            EngineError::Validation(ValidationError::InsufficientResult { .. }) => "HAPTUNE_003",
            EngineError::Validation(ValidationError::NoOriginalPoints) => "HAPTUNE_004",
            EngineError::Validation(ValidationError::NoEnabledTones) => "HAPTUNE_005",
            EngineError::Validation(ValidationError::EmptyGrid { .. }) => "HAPTUNE_006",
            EngineError::Validation(ValidationError::ParameterOutOfRange { .. }) => "HAPTUNE_007",
            EngineError::NumericalFitting { .. } => "HAPTUNE_010",
            EngineError::ImportFormat { .. } => "HAPTUNE_020",
            EngineError::Io(_) => "HAPTUNE_030",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::NumericalFitting { .. } => "numerical",
            EngineError::ImportFormat { .. } => "import",
            EngineError::Io(_) => "io",
        }
    }

    /// Returns true for errors the caller recovers from by keeping the
    /// previous derived artifact and showing a warning.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::Io(_))
    }
}
