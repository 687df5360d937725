//! Lumped and distributed mass appurtenances, plus the RNA.
//!
//! Appurtenance records are distinguished from cans by their element kind
//! and from each other by the height field: a lumped mass has none, a
//! distributed mass always does. Vertical positions are anchored to the
//! elevation the raw offsets are measured from: the tower base for tower
//! items, the transition-piece bottom (tower base minus the top element's
//! offset) for TP and grout items, and the pile toe for monopile items.
//!
//! A category with no matching records yields an empty table, never an
//! error: turbines without secondary steel in a given range are common.

use uom::si::{
    f64::{Length, Mass, MomentOfInertia, Volume},
    length::millimeter,
    mass::kilogram,
    moment_of_inertia::kilogram_square_meter,
    volume::cubic_meter,
};

use crate::records::{ElementKind, Subassembly};

use super::super::tables::{
    DistributedMass, DistributedMassTable, LumpedMass, LumpedMassTable, RnaMass, RnaTable,
};
use super::{DistributedCategory, ProcessingError, TurbineGeometryProcessor};

impl TurbineGeometryProcessor {
    /// Elevation the raw `z` offsets of a subassembly's appurtenances are
    /// measured from.
    fn appurtenance_anchor(
        &self,
        subassembly: Subassembly,
        stage: &'static str,
    ) -> Result<Length, ProcessingError> {
        match subassembly {
            Subassembly::Tower => Ok(self.tower_base),
            Subassembly::TransitionPiece => {
                let record = self.record(subassembly)?;
                // Elements are sorted top to bottom, so the first offset
                // spans the whole transition piece.
                let top_offset = record.elements.first().map_or(0.0, |e| e.z);
                Ok(self.tower_base - Length::new::<millimeter>(top_offset))
            }
            Subassembly::Monopile => self.pile_toe.ok_or(ProcessingError::Precedence {
                stage,
                prerequisite: "process_structure(ProcessOption::Monopile)",
            }),
        }
    }

    /// Builds the lumped-mass table for a subassembly.
    ///
    /// Selects appurtenance records without a height, converts positions to
    /// metres, and anchors elevations as described in the [module
    /// docs](self). Descriptions are carried over only when
    /// `with_description` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Precedence`] for monopile items before the
    /// pile toe has been derived, or
    /// [`ProcessingError::MissingSubassembly`].
    pub fn build_lumped_masses(
        &self,
        subassembly: Subassembly,
        with_description: bool,
    ) -> Result<LumpedMassTable, ProcessingError> {
        let anchor = self.appurtenance_anchor(subassembly, "build_lumped_masses")?;
        let record = self.record(subassembly)?;

        let rows = record
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Appurtenance && e.height.is_none())
            .map(|e| LumpedMass {
                x: Length::new::<millimeter>(e.x),
                y: Length::new::<millimeter>(e.y),
                z: anchor + Length::new::<millimeter>(e.z),
                mass: Mass::new::<kilogram>(e.mass),
                description: if with_description {
                    e.description.clone()
                } else {
                    None
                },
            })
            .collect();

        Ok(LumpedMassTable::new(rows))
    }

    /// Builds the distributed-mass table for a category.
    ///
    /// Selects appurtenance records *with* a height (grout records always
    /// have one). The tower is not a valid category by construction: tower
    /// appurtenances are always lumped.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Precedence`] for monopile items before the
    /// pile toe has been derived, or
    /// [`ProcessingError::MissingSubassembly`].
    pub fn build_distributed_masses(
        &self,
        category: DistributedCategory,
    ) -> Result<DistributedMassTable, ProcessingError> {
        let (subassembly, kind) = match category {
            DistributedCategory::TransitionPiece => {
                (Subassembly::TransitionPiece, ElementKind::Appurtenance)
            }
            DistributedCategory::Monopile => (Subassembly::Monopile, ElementKind::Appurtenance),
            DistributedCategory::Grout => (Subassembly::TransitionPiece, ElementKind::Grout),
        };
        let anchor = self.appurtenance_anchor(subassembly, "build_distributed_masses")?;
        let record = self.record(subassembly)?;

        let rows = record
            .elements
            .iter()
            .filter(|e| e.kind == kind)
            .filter_map(|e| {
                e.height.map(|height| DistributedMass {
                    x: Length::new::<millimeter>(e.x),
                    y: Length::new::<millimeter>(e.y),
                    z: anchor + Length::new::<millimeter>(e.z),
                    height: Length::new::<millimeter>(height),
                    mass: Mass::new::<kilogram>(e.mass),
                    volume: Volume::new::<cubic_meter>(e.volume.unwrap_or(0.0)),
                    description: e.description.clone(),
                })
            })
            .collect();

        Ok(DistributedMassTable::new(rows))
    }

    /// Builds the RNA table from the tower subassembly.
    ///
    /// Converts the recorded moments of inertia to t·m² display units and
    /// anchors the vertical position to the tower base.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingSubassembly`] when the turbine has
    /// no tower.
    pub fn build_rna(&self) -> Result<RnaTable, ProcessingError> {
        let record = self.record(Subassembly::Tower)?;

        let rows = record
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Rna)
            .map(|e| {
                let inertia = |value: f64| MomentOfInertia::new::<kilogram_square_meter>(value);
                let mi = e.moment_of_inertia;
                RnaMass {
                    x: Length::new::<millimeter>(e.x),
                    y: Length::new::<millimeter>(e.y),
                    z: self.tower_base + Length::new::<millimeter>(e.z),
                    mass: Mass::new::<kilogram>(e.mass),
                    ixx: inertia(mi.map_or(0.0, |m| m.x)),
                    iyy: inertia(mi.map_or(0.0, |m| m.y)),
                    izz: inertia(mi.map_or(0.0, |m| m.z)),
                }
            })
            .collect();

        Ok(RnaTable::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{length::meter, mass::ton, moment_of_inertia::kilogram_square_meter};

    use crate::processing::turbine::test_support::processor;
    use crate::processing::{DistributedCategory, ProcessOption};
    use crate::records::Subassembly;

    use super::ProcessingError;

    #[test]
    fn tower_lumped_masses_anchor_to_the_tower_base() {
        let owt = processor();

        let table = owt.build_lumped_masses(Subassembly::Tower, false).unwrap();

        assert_eq!(table.len(), 1);
        // Flange offset 15 m above a 20 m tower base.
        assert_relative_eq!(table.rows()[0].z.get::<meter>(), 35.0);
        assert!(table.rows()[0].description.is_none());
    }

    #[test]
    fn descriptions_are_opt_in() {
        let owt = processor();

        let table = owt.build_lumped_masses(Subassembly::Tower, true).unwrap();

        assert_eq!(
            table.rows()[0].description.as_deref(),
            Some("platform flange")
        );
    }

    #[test]
    fn transition_piece_masses_anchor_to_the_derived_bottom() {
        let owt = processor();

        let lumped = owt
            .build_lumped_masses(Subassembly::TransitionPiece, false)
            .unwrap();

        // TP bottom is 20.0 - 25.0 = -5.0 m; the boat landing offset spans
        // the whole transition piece.
        assert_eq!(lumped.len(), 1);
        assert_relative_eq!(lumped.rows()[0].z.get::<meter>(), 20.0);
    }

    #[test]
    fn monopile_masses_need_the_pile_toe_first() {
        let owt = processor();

        let result = owt.build_lumped_masses(Subassembly::Monopile, false);

        assert!(matches!(
            result,
            Err(ProcessingError::Precedence {
                stage: "build_lumped_masses",
                ..
            })
        ));
    }

    #[test]
    fn monopile_masses_anchor_to_the_pile_toe() {
        let mut owt = processor();
        owt.process_structure(ProcessOption::Monopile).unwrap();

        let lumped = owt.monopile_lumped_masses();

        // Anode bracket 17 m above a -19.0 m toe.
        assert_eq!(lumped.len(), 1);
        assert_relative_eq!(lumped.rows()[0].z.get::<meter>(), -2.0);
    }

    #[test]
    fn empty_categories_yield_empty_tables() {
        let mut owt = processor();
        owt.process_structure(ProcessOption::Monopile).unwrap();

        let distributed = owt
            .build_distributed_masses(DistributedCategory::Monopile)
            .unwrap();

        assert!(distributed.is_empty());
    }

    #[test]
    fn grout_is_modelled_as_distributed_mass() {
        let owt = processor();

        let grout = owt
            .build_distributed_masses(DistributedCategory::Grout)
            .unwrap();
        let tp = owt
            .build_distributed_masses(DistributedCategory::TransitionPiece)
            .unwrap();

        assert_eq!(grout.len(), 1);
        assert_relative_eq!(grout.rows()[0].mass.get::<ton>(), 8.0);
        // The plain TP distributed table must not double-count the grout.
        assert!(tp.iter().all(|m| m.description.as_deref() != Some("grout")));
    }

    #[test]
    fn rna_converts_inertia_and_anchors_to_the_tower_base() {
        let owt = processor();

        let rna = owt.build_rna().unwrap();

        assert_eq!(rna.len(), 1);
        let row = &rna.rows()[0];
        assert_relative_eq!(row.z.get::<meter>(), 51.0);
        assert_relative_eq!(row.mass.get::<ton>(), 350.0);
        assert_relative_eq!(row.ixx.get::<kilogram_square_meter>() * 1e-3, 120_000.0);
    }
}
