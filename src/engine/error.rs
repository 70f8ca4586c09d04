use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Everything that can go wrong when configuring the boots.
///
/// Force computation itself never fails: degenerate geometry resolves to a
/// clamped magnitude or a zero vector.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("magnet strength {value} is outside [{min}, {max}]")]
    StrengthOutOfRange { value: f32, min: f32, max: f32 },

    #[error("magnet strength {value} is not a multiple of the {step} step from {min}")]
    StrengthOffStep { value: f32, min: f32, step: f32 },

    #[error("invalid magnet bounds: {0}")]
    InvalidBounds(String),

    #[error("container range must be finite and > 0, got {0}")]
    InvalidContainerRange(f32),

    #[error("container range {range} is shorter than the magnet's reach {reach}")]
    ContainerRangeTooShort { range: f32, reach: f32 },

    #[error("failed to parse boots config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
