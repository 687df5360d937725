//! Structural-section tables.
//!
//! Converts the raw can records of a subassembly into elevation-referenced
//! sections and derives the per-can structural properties the FE model
//! needs. Elevations walk downward from the subassembly's anchor: the tower
//! base for the tower, the transition-piece bottom (tower base minus the
//! summed can heights) for the transition piece, and the pile toe for the
//! monopile. The pile toe itself is derived here, once, as
//! `pile head − Σ can heights`.

use uom::si::{
    f64::{Length, Mass, Pressure, Ratio, Volume},
    length::millimeter,
    mass::kilogram,
    pressure::gigapascal,
    ratio::ratio,
    volume::cubic_meter,
};

use crate::records::{ElementRecord, Subassembly};
use crate::support::rounding::to_millimetre;

use super::super::tables::{Can, CanTable};
use super::{ProcessingError, TurbineGeometryProcessor};

/// Default Young's modulus for structural steel, applied when the element's
/// material record carries no value.
const DEFAULT_YOUNG_MODULUS_GPA: f64 = 210.0;

/// Default Poisson's ratio for structural steel.
const DEFAULT_POISSON_RATIO: f64 = 0.3;

/// A can with its depth range resolved, before property derivation.
#[derive(Debug, Clone)]
pub struct RawSection {
    /// Elevation of the can top in m mLAT, rounded to the millimetre.
    pub depth_from: Length,
    /// Elevation of the can bottom in m mLAT, rounded to the millimetre.
    pub depth_to: Length,
    /// The underlying building-block record.
    pub element: ElementRecord,
}

impl TurbineGeometryProcessor {
    /// Resolves the depth range of every structural can in a subassembly.
    ///
    /// Grout never appears here: it is typed as its own element kind and is
    /// modelled exclusively as distributed mass. For the monopile this also
    /// derives and caches the pile toe (rounded to the millimetre); the
    /// cached value is written only once.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingSubassembly`] when the subassembly
    /// is not part of this turbine, or [`ProcessingError::MissingCanHeight`]
    /// when a structural can has no height.
    pub fn build_structural_sections(
        &mut self,
        subassembly: Subassembly,
    ) -> Result<Vec<RawSection>, ProcessingError> {
        let cans: Vec<ElementRecord> = self.record(subassembly)?.cans().cloned().collect();
        if let Some(can) = cans.iter().find(|e| e.height.is_none()) {
            return Err(ProcessingError::MissingCanHeight {
                element: can.title.clone(),
            });
        }
        let total_height =
            Length::new::<millimeter>(cans.iter().filter_map(|e| e.height).sum::<f64>());

        let anchor = match subassembly {
            Subassembly::Tower => self.tower_base,
            Subassembly::TransitionPiece => self.tower_base - total_height,
            Subassembly::Monopile => {
                let toe = self.pile_head - total_height;
                if self.pile_toe.is_none() {
                    self.pile_toe = Some(to_millimetre(toe));
                }
                toe
            }
        };

        // Elevations are rounded to the millimetre so later boundary
        // comparisons don't trip over floating-point drift.
        Ok(cans
            .into_iter()
            .map(|element| {
                let bottom = anchor + Length::new::<millimeter>(element.z);
                let top = bottom + Length::new::<millimeter>(element.height.unwrap_or(0.0));
                RawSection {
                    depth_from: to_millimetre(top),
                    depth_to: to_millimetre(bottom),
                    element,
                }
            })
            .collect())
    }

    /// Builds the full structural-section table for a subassembly.
    ///
    /// On top of the depth walk this parses the slash-encoded outer
    /// diameters, converts database units to model units (mm to m, kg to
    /// tonnes), computes the linear density, and attaches stiffness
    /// properties from the element's material record, falling back to
    /// 210 GPa and 0.3 for plain structural steel.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Diameter`] when a can's outer-diameter
    /// field is absent or not numeric, or
    /// [`ProcessingError::MissingCanHeight`] for a can without a height.
    pub fn derive_structural_properties(
        &mut self,
        subassembly: Subassembly,
    ) -> Result<CanTable, ProcessingError> {
        let sections = self.build_structural_sections(subassembly)?;

        let mut rows = Vec::with_capacity(sections.len());
        for section in sections {
            let element = &section.element;
            let diameter = element
                .outer_diameter()
                .map_err(|source| ProcessingError::Diameter {
                    element: element.title.clone(),
                    source,
                })?;

            let height = element.height.map(Length::new::<millimeter>).ok_or_else(|| {
                ProcessingError::MissingCanHeight {
                    element: element.title.clone(),
                }
            })?;
            let mass = Mass::new::<kilogram>(element.mass);
            let (young_modulus, poisson_ratio) =
                self.material_stiffness(element.material.as_deref());

            rows.push(Can {
                depth_from: section.depth_from,
                depth_to: section.depth_to,
                height,
                diameter_from: diameter.top,
                diameter_to: diameter.bottom,
                wall_thickness: Length::new::<millimeter>(element.wall_thickness.unwrap_or(0.0)),
                volume: Volume::new::<cubic_meter>(element.volume.unwrap_or(0.0)),
                mass,
                linear_density: mass / height,
                young_modulus,
                poisson_ratio,
            });
        }

        Ok(CanTable::new(rows))
    }

    /// Stiffness properties for an element's material, with steel defaults.
    pub(super) fn material_stiffness(&self, material: Option<&str>) -> (Pressure, Ratio) {
        let record = material.and_then(|title| self.materials.iter().find(|m| m.title == title));
        let young_modulus = Pressure::new::<gigapascal>(
            record
                .and_then(|m| m.young_modulus)
                .unwrap_or(DEFAULT_YOUNG_MODULUS_GPA),
        );
        let poisson_ratio = Ratio::new::<ratio>(
            record
                .and_then(|m| m.poisson_ratio)
                .unwrap_or(DEFAULT_POISSON_RATIO),
        );
        (young_modulus, poisson_ratio)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        length::meter, linear_mass_density::kilogram_per_meter, mass::ton, pressure::gigapascal,
        ratio::ratio,
    };

    use uom::si::f64::Length;

    use crate::processing::turbine::test_support::{fixture_records, processor};
    use crate::records::{ElementKind, Subassembly};

    use super::super::{ProcessingError, TurbineGeometryProcessor};

    #[test]
    fn monopile_depths_walk_down_from_the_pile_toe() {
        let mut owt = processor();

        let sections = owt
            .build_structural_sections(Subassembly::Monopile)
            .unwrap();

        // Heights are [5000, 6000, 7000] mm below a pile head of -1.0 m.
        assert_relative_eq!(owt.pile_toe().unwrap().get::<meter>(), -19.0);
        let depths: Vec<(f64, f64)> = sections
            .iter()
            .map(|s| (s.depth_from.get::<meter>(), s.depth_to.get::<meter>()))
            .collect();
        assert_eq!(depths, vec![(-1.0, -6.0), (-6.0, -12.0), (-12.0, -19.0)]);
    }

    #[test]
    fn consecutive_sections_share_boundary_elevations() {
        let mut owt = processor();

        for subassembly in [
            Subassembly::Tower,
            Subassembly::TransitionPiece,
            Subassembly::Monopile,
        ] {
            let sections = owt.build_structural_sections(subassembly).unwrap();
            for pair in sections.windows(2) {
                assert!(pair[0].depth_from > pair[0].depth_to);
                assert_eq!(pair[0].depth_to, pair[1].depth_from);
            }
        }
    }

    #[test]
    fn pile_toe_is_written_only_once() {
        let mut owt = processor();

        owt.build_structural_sections(Subassembly::Monopile)
            .unwrap();
        let first = owt.pile_toe().unwrap();
        owt.build_structural_sections(Subassembly::Monopile)
            .unwrap();

        assert_eq!(owt.pile_toe().unwrap(), first);
    }

    #[test]
    fn cans_without_a_height_are_rejected() {
        let (materials, mut subassemblies, location) = fixture_records();
        let monopile = subassemblies
            .iter_mut()
            .find(|sa| sa.subassembly == Subassembly::Monopile)
            .unwrap();
        monopile
            .elements
            .iter_mut()
            .find(|e| e.kind == ElementKind::Can)
            .unwrap()
            .height = None;
        let mut owt = TurbineGeometryProcessor::new(
            materials,
            subassemblies,
            &location,
            Some(Length::new::<meter>(20.0)),
            Some(Length::new::<meter>(-1.0)),
        )
        .unwrap();

        let result = owt.build_structural_sections(Subassembly::Monopile);

        assert!(matches!(
            result,
            Err(ProcessingError::MissingCanHeight { .. })
        ));
    }

    #[test]
    fn transition_piece_bottom_comes_from_summed_can_heights() {
        let mut owt = processor();

        let sections = owt
            .build_structural_sections(Subassembly::TransitionPiece)
            .unwrap();

        // Tower base 20.0 m minus 25 m of cans.
        assert_relative_eq!(sections.last().unwrap().depth_to.get::<meter>(), -5.0);
        assert_relative_eq!(sections.first().unwrap().depth_from.get::<meter>(), 20.0);
    }

    #[test]
    fn derived_properties_convert_units_and_split_diameters() {
        let mut owt = processor();

        let table = owt
            .derive_structural_properties(Subassembly::TransitionPiece)
            .unwrap();

        // Boundary can: OD "6000/5600", 8 m high, 67 947 kg.
        let boundary = table.rows().last().unwrap();
        assert_relative_eq!(boundary.diameter_to.get::<meter>(), 6.0);
        assert_relative_eq!(boundary.diameter_from.get::<meter>(), 5.6);
        assert_relative_eq!(boundary.mass.get::<ton>(), 67.947);
        assert_relative_eq!(boundary.height.get::<meter>(), 8.0);
        assert_relative_eq!(
            boundary.linear_density.get::<kilogram_per_meter>() * 1e-3,
            67.947 / 8.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn stiffness_defaults_apply_without_a_material_record() {
        let mut owt = processor();

        let table = owt
            .derive_structural_properties(Subassembly::Tower)
            .unwrap();

        let can = &table.rows()[0];
        assert_relative_eq!(can.young_modulus.get::<gigapascal>(), 210.0);
        assert_relative_eq!(can.poisson_ratio.get::<ratio>(), 0.3);
    }

    #[test]
    fn material_records_override_the_stiffness_defaults() {
        let mut owt = processor();

        let table = owt
            .derive_structural_properties(Subassembly::Monopile)
            .unwrap();

        // Monopile cans reference S355 with an explicit 200 GPa modulus.
        let can = &table.rows()[0];
        assert_relative_eq!(can.young_modulus.get::<gigapascal>(), 200.0);
    }
}
