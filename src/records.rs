//! Typed input tables for the geometry processors.
//!
//! The crate does not talk to the metadata database itself. An external
//! data-access layer fetches and validates the raw payloads and hands over
//! the record types in this module: one [`MaterialRecord`] table shared by
//! all turbines, one [`LocationRecord`] per turbine, and one
//! [`SubassemblyRecord`] per support-structure part.
//!
//! Records keep the database units: millimetres for every length and
//! position, kilograms for mass, cubic metres for volume, kg/m³ for density.
//! Converting to model units is the processors' job, so the conversion rules
//! stay in one place.
//!
//! Element classification is a closed enum ([`ElementKind`]) rather than the
//! database's naming convention, so every dispatch over element roles is
//! exhaustive.

mod location;
mod material;
mod subassembly;

pub use location::LocationRecord;
pub use material::MaterialRecord;
pub use subassembly::{
    DiameterError, ElementKind, ElementRecord, Position, Subassembly, SubassemblyRecord,
    TaperedDiameter,
};
