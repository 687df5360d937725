//! Subassembly merging and full-structure assembly.
//!
//! The transition piece overlaps the monopile: its cans are split at the
//! pile head into the portion merged with the monopile (the substructure)
//! and the portion below the connection (the skirt). With a bolted
//! connection a can boundary coincides with the pile head and both slices
//! are used as-is. Otherwise the boundary can is cut: its diameter at the
//! cut elevation is interpolated linearly within the original depth range,
//! and height, volume, mass, and linear density are recomputed analytically
//! as a conical-frustum shell at the can's original material density. The
//! skirt-side counterpart is cut at the mirrored boundary with the opposite
//! end held fixed, so the two pieces partition the original can.

use uom::si::f64::Length;

use crate::support::frustum;

use super::super::tables::{Can, CanTable};
use super::{ProcessingError, TurbineGeometryProcessor};

/// Which end of a can a connection cut moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutEnd {
    Bottom,
    Top,
}

/// Cuts a can at `altitude`, holding the opposite end fixed.
///
/// The density implied by the can's tabulated mass and volume is preserved;
/// geometry and mass are recomputed from the frustum shell between the new
/// depth range's end diameters.
fn cut_can(can: &mut Can, altitude: Length, end: CutEnd) {
    let span = can.depth_from - can.depth_to;
    let fraction = (altitude - can.depth_to) / span;
    let diameter_at_cut = can.diameter_to + (can.diameter_from - can.diameter_to) * fraction;
    let density = can.density();

    match end {
        CutEnd::Bottom => {
            can.depth_to = altitude;
            can.diameter_to = diameter_at_cut;
        }
        CutEnd::Top => {
            can.depth_from = altitude;
            can.diameter_from = diameter_at_cut;
        }
    }

    let height = can.depth_from - can.depth_to;
    let volume = frustum::shell_volume(
        can.diameter_from,
        can.diameter_to,
        can.wall_thickness,
        height,
    );
    let mass = volume * density;
    can.height = height;
    can.volume = volume;
    can.mass = mass;
    can.linear_density = mass / height;
}

impl TurbineGeometryProcessor {
    /// Merges the transition piece with the monopile into the substructure
    /// and splits off the skirt.
    ///
    /// Idempotent: once merged, further calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Precedence`] unless both the
    /// transition-piece and monopile sections have been processed.
    pub fn assemble_substructure(&mut self) -> Result<(), ProcessingError> {
        if self.merged {
            return Ok(());
        }
        if !(self.processed_tp && self.processed_mp) {
            return Err(ProcessingError::Precedence {
                stage: "assemble_substructure",
                prerequisite: "process_structure for the transition piece and monopile",
            });
        }

        let head = self.pile_head;

        let mut kept: Vec<Can> = self
            .tp_sections
            .iter()
            .filter(|c| c.depth_from > head)
            .copied()
            .collect();
        if let Some(boundary) = kept.last_mut() {
            // Elevations are millimetre-rounded, so exact comparison against
            // the pile head is the bolted-connection test.
            if boundary.depth_to != head {
                cut_can(boundary, head, CutEnd::Bottom);
            }
        }
        let mut substructure = CanTable::new(kept);
        substructure.extend_from(&self.mp_sections);

        let mut skirt: Vec<Can> = self
            .tp_sections
            .iter()
            .filter(|c| c.depth_to < head)
            .copied()
            .collect();
        if let Some(boundary) = skirt.first_mut() {
            if boundary.depth_from != head {
                cut_can(boundary, head, CutEnd::Top);
            }
        }

        self.substructure = substructure;
        self.tp_skirt = CanTable::new(skirt);
        self.merged = true;
        Ok(())
    }

    /// Concatenates tower and substructure into the full structural column,
    /// spanning tower top to pile toe.
    ///
    /// Idempotent: once assembled, further calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Precedence`] unless the substructure has
    /// been assembled and the tower sections processed.
    pub fn assemble_full_structure(&mut self) -> Result<(), ProcessingError> {
        if self.assembled {
            return Ok(());
        }
        if !self.merged {
            return Err(ProcessingError::Precedence {
                stage: "assemble_full_structure",
                prerequisite: "assemble_substructure",
            });
        }
        if !self.processed_tower {
            return Err(ProcessingError::Precedence {
                stage: "assemble_full_structure",
                prerequisite: "process_structure(ProcessOption::Tower)",
            });
        }

        let mut full = self.tower_sections.clone();
        full.extend_from(&self.substructure);
        self.full_structure = full;
        self.assembled = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{length::meter, mass::ton};

    use crate::processing::turbine::test_support::{processor, processor_with_pile_head};
    use crate::processing::{ProcessOption, ProcessingError};

    fn merged_processor() -> crate::processing::TurbineGeometryProcessor {
        let mut owt = processor();
        owt.process_structure(ProcessOption::Full).unwrap();
        owt.assemble_substructure().unwrap();
        owt
    }

    #[test]
    fn merge_needs_processed_sections_first() {
        let mut owt = processor();

        assert!(matches!(
            owt.assemble_substructure(),
            Err(ProcessingError::Precedence {
                stage: "assemble_substructure",
                ..
            })
        ));
    }

    #[test]
    fn non_bolted_boundary_can_is_cut_at_the_pile_head() {
        let owt = merged_processor();

        // The boundary can spans [-5.0, 3.0] with OD 6000/5600; cut at the
        // -1.0 m pile head the interpolated diameter is 5.8 m.
        let boundary = &owt.substructure().rows()[2];
        assert_relative_eq!(boundary.depth_to.get::<meter>(), -1.0);
        assert_relative_eq!(boundary.depth_from.get::<meter>(), 3.0);
        assert_relative_eq!(boundary.diameter_to.get::<meter>(), 5.8);
        assert_relative_eq!(boundary.height.get::<meter>(), 4.0);

        let skirt = &owt.tp_skirt().rows()[0];
        assert_relative_eq!(skirt.depth_from.get::<meter>(), -1.0);
        assert_relative_eq!(skirt.depth_to.get::<meter>(), -5.0);
        assert_relative_eq!(skirt.diameter_from.get::<meter>(), 5.8);
        assert_relative_eq!(skirt.diameter_to.get::<meter>(), 6.0);
    }

    #[test]
    fn cut_preserves_the_boundary_cans_total_mass() {
        let owt = merged_processor();

        let original = owt.transition_piece_sections().rows().last().unwrap();
        let kept = &owt.substructure().rows()[2];
        let skirt = &owt.tp_skirt().rows()[0];

        let recombined = kept.mass.get::<ton>() + skirt.mass.get::<ton>();
        let relative_error = (recombined - original.mass.get::<ton>()).abs()
            / original.mass.get::<ton>();
        assert!(relative_error < 0.01, "mass drift {relative_error}");
    }

    #[test]
    fn substructure_is_elevation_continuous_across_the_connection() {
        let owt = merged_processor();

        let rows = owt.substructure().rows();
        assert_eq!(rows.len(), 6);
        for pair in rows.windows(2) {
            assert!(pair[0].depth_to >= pair[1].depth_to);
            assert_eq!(pair[0].depth_to, pair[1].depth_from);
        }
    }

    #[test]
    fn bolted_connection_leaves_the_boundary_untouched() {
        // Pile head at 3.0 m coincides exactly with a can boundary.
        let mut owt = processor_with_pile_head(3.0);
        owt.process_structure(ProcessOption::Full).unwrap();
        owt.assemble_substructure().unwrap();

        let boundary = owt.substructure().rows()[1];
        assert_relative_eq!(boundary.depth_to.get::<meter>(), 3.0);
        assert_relative_eq!(boundary.diameter_to.get::<meter>(), 5.6);
        let original = owt.transition_piece_sections().rows()[1];
        assert_eq!(boundary, original);

        let skirt = owt.tp_skirt().rows()[0];
        assert_eq!(skirt, *owt.transition_piece_sections().rows().last().unwrap());
    }

    #[test]
    fn full_structure_concatenates_tower_and_substructure() {
        let mut owt = merged_processor();
        owt.assemble_full_structure().unwrap();

        let full = owt.full_structure();
        assert_eq!(
            full.len(),
            owt.tower_sections().len() + owt.substructure().len()
        );
        for pair in full.rows().windows(2) {
            assert!(pair[0].depth_from >= pair[1].depth_from);
        }
        assert_relative_eq!(
            full.rows().last().unwrap().depth_to.get::<meter>(),
            -19.0
        );
    }

    #[test]
    fn full_structure_needs_the_substructure_first() {
        let mut owt = processor();
        owt.process_structure(ProcessOption::Full).unwrap();

        assert!(matches!(
            owt.assemble_full_structure(),
            Err(ProcessingError::Precedence {
                prerequisite: "assemble_substructure",
                ..
            })
        ));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut owt = merged_processor();
        let substructure = owt.substructure().clone();

        owt.assemble_substructure().unwrap();

        assert_eq!(owt.substructure(), &substructure);
    }
}
