//! Geometry processors.
//!
//! Processors are the primary public interface of this crate.
//!
//! # Organization
//!
//! [`turbine`] owns the per-turbine pipeline: one
//! [`TurbineGeometryProcessor`] takes the raw subassembly tables of a single
//! turbine and derives its structural-section, appurtenance, and assembled
//! full-structure tables. [`fleet`] composes many turbine processors into a
//! [`FleetGeometryProcessor`] that drives each member through the pipeline,
//! concatenates the results into fleet-wide tables, and reports per-turbine
//! summary statistics.
//!
//! Derived tables are populated lazily by explicit processing calls and are
//! immutable once computed; re-invoking a processing stage is a no-op.

pub mod fleet;
pub mod tables;
pub mod turbine;

pub use fleet::{FleetError, FleetGeometryProcessor, TurbineSelector};
pub use turbine::{
    DistributedCategory, ProcessOption, ProcessingError, TurbineGeometryProcessor,
};
