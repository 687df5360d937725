//! Quantity rounding helpers.
//!
//! Section elevations are rounded to the millimetre so that later equality
//! comparisons (connection checks, load-application altitudes) do not trip
//! over floating-point drift. Fleet summary columns are reported to two
//! decimals.

use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::ton,
};

/// Rounds a value to the given number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Rounds an elevation or length to the millimetre.
#[must_use]
pub fn to_millimetre(length: Length) -> Length {
    Length::new::<meter>(round_to(length.get::<meter>(), 3))
}

/// Rounds a length to two decimals of a metre, for summary reporting.
#[must_use]
pub fn to_centimetre(length: Length) -> Length {
    Length::new::<meter>(round_to(length.get::<meter>(), 2))
}

/// Rounds a mass to two decimals of a tonne, for summary reporting.
#[must_use]
pub fn to_hundredth_tonne(mass: Mass) -> Mass {
    Mass::new::<ton>(round_to(mass.get::<ton>(), 2))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rounds_elevations_to_the_millimetre() {
        let elevation = Length::new::<meter>(-19.000_400_1);

        assert_relative_eq!(to_millimetre(elevation).get::<meter>(), -19.0);
    }

    #[test]
    fn rounds_halfway_values_away_from_zero() {
        assert_relative_eq!(round_to(2.345, 2), 2.35);
        assert_relative_eq!(round_to(-2.345, 2), -2.35);
    }
}
