use thiserror::Error;

use crate::records::{DiameterError, Subassembly};

/// Errors raised by the per-turbine processing pipeline.
///
/// All variants are raised synchronously; there are no retries or partial
/// results. Reading a derived table too early is deliberately *not* an error
/// (see the [module docs](crate::processing::turbine)).
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A required subassembly is not present in the input.
    #[error("turbine has no {subassembly} subassembly")]
    MissingSubassembly { subassembly: Subassembly },

    /// A subassembly needed for elevation derivation has no structural cans.
    #[error("{subassembly} subassembly has no structural cans")]
    NoCans { subassembly: Subassembly },

    /// A structural can record has no height.
    #[error("can {element:?} has no height")]
    MissingCanHeight { element: String },

    /// A processing stage was invoked before its prerequisite stage.
    #[error("{stage} requires {prerequisite} to run first")]
    Precedence {
        stage: &'static str,
        prerequisite: &'static str,
    },

    /// A can's outer-diameter field could not be parsed.
    #[error("outer diameter of {element:?} is invalid")]
    Diameter {
        element: String,
        #[source]
        source: DiameterError,
    },

    /// The monopile cans reference no material record.
    #[error("monopile cans reference no material")]
    MissingMaterial,

    /// An element references a material missing from the materials table.
    #[error("material {title:?} is not in the materials table")]
    UnknownMaterial { title: String },
}
