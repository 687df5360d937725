//! Monopile geometry in the mudline reference system.
//!
//! Geotechnical tools want the pile described by penetration depth below the
//! seabed rather than mLAT elevations. The transform walks consecutive can
//! boundaries from the top down, emitting one segment per boundary pair with
//! the lower can's wall thickness, its average outer diameter, and the
//! monopile material's properties.

use std::fmt;

use uom::si::{
    f64::{Length, Pressure, Ratio},
    length::{meter, millimeter},
    pressure::gigapascal,
    ratio::ratio,
};

use crate::records::Subassembly;

use super::{ProcessingError, TurbineGeometryProcessor};

/// One pile segment in the mudline reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct MudlineSection {
    /// Depth of the segment top below the mudline, in m.
    pub depth_from: Length,
    /// Depth of the segment bottom below the mudline, in m.
    pub depth_to: Length,
    /// Pile material title.
    pub material: String,
    /// Submerged unit weight of the pile material in kN/m³.
    pub submerged_unit_weight: f64,
    pub wall_thickness: Length,
    /// Average outer diameter over the segment.
    pub diameter: Length,
    pub young_modulus: Pressure,
    pub poisson_ratio: Ratio,
}

/// The monopile table in the mudline reference system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MudlineTable {
    rows: Vec<MudlineSection>,
}

impl MudlineTable {
    /// Column labels, with units, in presentation order.
    pub const COLUMNS: [&'static str; 8] = [
        "Depth from [m]",
        "Depth to [m]",
        "Pile material",
        "Pile material submerged unit weight [kN/m3]",
        "Wall thickness [mm]",
        "Diameter [m]",
        "Youngs modulus [GPa]",
        "Poissons ratio [-]",
    ];

    #[must_use]
    pub fn new(rows: Vec<MudlineSection>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[MudlineSection] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &MudlineSection> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for MudlineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::COLUMNS.join("\t"))?;
        for section in &self.rows {
            writeln!(
                f,
                "{:.3}\t{:.3}\t{}\t{:.2}\t{:.1}\t{:.3}\t{:.0}\t{:.2}",
                section.depth_from.get::<meter>(),
                section.depth_to.get::<meter>(),
                section.material,
                section.submerged_unit_weight,
                section.wall_thickness.get::<millimeter>(),
                section.diameter.get::<meter>(),
                section.young_modulus.get::<gigapascal>(),
                section.poisson_ratio.get::<ratio>(),
            )?;
        }
        Ok(())
    }
}

impl TurbineGeometryProcessor {
    /// Recomputes the monopile geometry with the mudline as reference.
    ///
    /// Penetration is the distance from the monopile datum (its toe) to the
    /// seabed. The submerged unit weight is derived from the material
    /// density as `1e-2·ρ − 10` kN/m³.
    ///
    /// When `cutoff` is given, segments ending at or above that depth are
    /// dropped and the first remaining segment's `depth_from` is pinned to
    /// the cutoff. The pinned segment keeps its tabulated diameter and wall
    /// thickness; unlike the connection merge there is no re-interpolation
    /// here (see the tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingSubassembly`] without a monopile,
    /// [`ProcessingError::MissingMaterial`] when no can references a
    /// material, [`ProcessingError::UnknownMaterial`] when the referenced
    /// title is not in the materials table, and
    /// [`ProcessingError::Diameter`] for malformed diameters.
    pub fn monopile_mudline_geometry(
        &self,
        cutoff: Option<Length>,
    ) -> Result<MudlineTable, ProcessingError> {
        let record = self.record(Subassembly::Monopile)?;
        let penetration = self.water_depth - record.bottom_elevation();

        let title = record
            .cans()
            .find_map(|e| e.material.as_deref())
            .ok_or(ProcessingError::MissingMaterial)?;
        let material = self
            .materials
            .iter()
            .find(|m| m.title == title)
            .ok_or_else(|| ProcessingError::UnknownMaterial {
                title: title.to_string(),
            })?;
        let submerged_unit_weight = 1e-2 * material.density - 10.0;
        let (young_modulus, poisson_ratio) = self.material_stiffness(Some(title));

        let cans: Vec<_> = record.cans().collect();
        let mut rows = Vec::with_capacity(cans.len().saturating_sub(1));
        for pair in cans.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            let diameter = lower
                .outer_diameter()
                .map_err(|source| ProcessingError::Diameter {
                    element: lower.title.clone(),
                    source,
                })?;
            rows.push(MudlineSection {
                depth_from: penetration - Length::new::<millimeter>(upper.z),
                depth_to: penetration - Length::new::<millimeter>(lower.z),
                material: title.to_string(),
                submerged_unit_weight,
                wall_thickness: Length::new::<millimeter>(lower.wall_thickness.unwrap_or(0.0)),
                diameter: (diameter.bottom + diameter.top) / 2.0,
                young_modulus,
                poisson_ratio,
            });
        }

        if let Some(cutoff) = cutoff {
            rows.retain(|r| r.depth_to > cutoff);
            if let Some(first) = rows.first_mut() {
                first.depth_from = cutoff;
            }
        }

        Ok(MudlineTable::new(rows))
    }
}
