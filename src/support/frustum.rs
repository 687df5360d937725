//! Conical-frustum volumes for tubular cans.
//!
//! A can is a conical frustum (cylindrical when the end diameters match).
//! When a can is cut at a connection elevation its steel volume has to be
//! recomputed analytically: the shell volume is the difference between the
//! outer frustum and the inner frustum obtained by shrinking both end radii
//! by the wall thickness.

use std::f64::consts::FRAC_PI_3;

use uom::si::f64::{Length, Volume};

/// Volume of a solid conical frustum with end radii `r1`, `r2`.
#[must_use]
fn solid_volume(r1: Length, r2: Length, height: Length) -> Volume {
    FRAC_PI_3 * (r1 * r1 + r1 * r2 + r2 * r2) * height
}

/// Steel volume of a tubular can with the given end diameters and wall
/// thickness.
#[must_use]
pub fn shell_volume(
    diameter_top: Length,
    diameter_bottom: Length,
    wall_thickness: Length,
    height: Length,
) -> Volume {
    let r1 = diameter_top / 2.0;
    let r2 = diameter_bottom / 2.0;
    solid_volume(r1, r2, height) - solid_volume(r1 - wall_thickness, r2 - wall_thickness, height)
}
