//! Per-turbine summary statistics.
//!
//! One row per fleet member with its key elevations, subassembly heights,
//! and subassembly masses. Masses include everything attached to the
//! subassembly: cans, lumped and distributed appurtenances, grout on the
//! transition piece, and the RNA on the tower. Values are rounded to the
//! centimetre and the hundredth of a tonne for reporting.

use std::fmt;

use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::ton,
};

use crate::support::rounding::{to_centimetre, to_hundredth_tonne};

use super::super::turbine::{ProcessingError, TurbineGeometryProcessor};

/// Key figures of one processed turbine.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineSummary {
    pub turbine: String,
    pub water_depth: Length,
    pub pile_toe: Length,
    pub pile_head: Length,
    pub tower_base: Length,
    pub monopile_height: Length,
    pub monopile_mass: Mass,
    pub transition_piece_height: Length,
    pub transition_piece_mass: Mass,
    pub tower_height: Length,
    pub tower_mass: Mass,
}

impl TurbineSummary {
    pub(super) fn from_processed(
        turbine: &str,
        owt: &TurbineGeometryProcessor,
    ) -> Result<Self, ProcessingError> {
        let pile_toe = owt.pile_toe().ok_or(ProcessingError::Precedence {
            stage: "summarize",
            prerequisite: "process_structure(ProcessOption::Monopile)",
        })?;

        let monopile_mass = owt.monopile_sections().total_mass()
            + owt.monopile_lumped_masses().total_mass()
            + owt.monopile_distributed_masses().total_mass();
        let transition_piece_mass = owt.transition_piece_sections().total_mass()
            + owt.transition_piece_lumped_masses().total_mass()
            + owt.transition_piece_distributed_masses().total_mass()
            + owt.grout().total_mass();
        let tower_mass = owt.tower_sections().total_mass()
            + owt.tower_lumped_masses().total_mass()
            + owt.rna().total_mass();

        Ok(Self {
            turbine: turbine.to_string(),
            water_depth: to_centimetre(owt.water_depth()),
            pile_toe: to_centimetre(pile_toe),
            pile_head: to_centimetre(owt.pile_head()),
            tower_base: to_centimetre(owt.tower_base()),
            monopile_height: to_centimetre(owt.monopile_sections().total_height()),
            monopile_mass: to_hundredth_tonne(monopile_mass),
            transition_piece_height: to_centimetre(
                owt.transition_piece_sections().total_height(),
            ),
            transition_piece_mass: to_hundredth_tonne(transition_piece_mass),
            tower_height: to_centimetre(owt.tower_sections().total_height()),
            tower_mass: to_hundredth_tonne(tower_mass),
        })
    }
}

/// The fleet summary table, one row per member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    rows: Vec<TurbineSummary>,
}

impl SummaryTable {
    /// Column labels, with units, in presentation order.
    pub const COLUMNS: [&'static str; 11] = [
        "Turbine name",
        "Water depth [m]",
        "Monopile toe [m]",
        "Monopile head [m]",
        "Tower base [m]",
        "Monopile height [m]",
        "Monopile mass [t]",
        "Transition piece height [m]",
        "Transition piece mass [t]",
        "Tower height [m]",
        "Tower mass [t]",
    ];

    #[must_use]
    pub fn new(rows: Vec<TurbineSummary>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[TurbineSummary] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurbineSummary> {
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

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::COLUMNS.join("\t"))?;
        for row in &self.rows {
            writeln!(
                f,
                "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
                row.turbine,
                row.water_depth.get::<meter>(),
                row.pile_toe.get::<meter>(),
                row.pile_head.get::<meter>(),
                row.tower_base.get::<meter>(),
                row.monopile_height.get::<meter>(),
                row.monopile_mass.get::<ton>(),
                row.transition_piece_height.get::<meter>(),
                row.transition_piece_mass.get::<ton>(),
                row.tower_height.get::<meter>(),
                row.tower_mass.get::<ton>(),
            )?;
        }
        Ok(())
    }
}
