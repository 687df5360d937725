//! # OWT Geometry
//!
//! Geometry and mass-table processing for offshore wind turbine (OWT) support
//! structures.
//!
//! The crate turns typed database records describing a turbine's physical
//! subassemblies (tower, transition piece, monopile foundation) into the
//! structural and mass tables a finite-element model builder needs: per-can
//! elevations, diameters, wall thicknesses, masses and stiffness defaults,
//! lumped and distributed appurtenances, and a continuous full-structure
//! column stitched together at the transition-piece/monopile connection.
//!
//! ## Crate layout
//!
//! - [`records`]: Typed input tables supplied by an external data-access
//!   layer (materials, locations, subassemblies).
//! - [`processing`]: The per-turbine and fleet processors. This is the
//!   primary public interface of the crate.
//! - [`support`]: Supporting utilities used by the processors.
//!
//! ## Units and reference systems
//!
//! Raw records carry database units (millimetres, kilograms); every derived
//! quantity is a [`uom`] quantity. Elevations are in the mLAT datum (metres
//! relative to Lowest Astronomical Tide) except for the mudline-reference
//! monopile table, which uses penetration depth below the seabed.
//!
//! ## Diagnostics
//!
//! Reading a derived table before its processing stage has run is not an
//! error: the accessor emits a [`tracing`] warning naming the missing call
//! and returns the table's current (typically empty) value. Configure a
//! subscriber at the application boundary to surface these warnings.

pub mod processing;
pub mod records;
pub mod support;
