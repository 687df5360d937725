use thiserror::Error;

use super::super::turbine::ProcessingError;

/// Errors arising when composing and processing a fleet of turbines.
#[derive(Debug, Error)]
pub enum FleetError {
    /// The requested turbine name is not part of this fleet.
    #[error("turbine `{0}` is not part of this fleet")]
    TurbineNotFound(String),

    /// The requested member index exceeds the fleet size.
    #[error("turbine index {index} is out of range for a fleet of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The turbine-name list and processor list differ in length.
    #[error("got {turbines} turbine names for {processors} processors")]
    LengthMismatch { turbines: usize, processors: usize },

    /// A fleet needs at least one member.
    #[error("a fleet needs at least one turbine")]
    Empty,

    /// A member's own processing pipeline failed.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}
