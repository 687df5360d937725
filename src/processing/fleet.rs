//! Fleet-wide geometry processing.
//!
//! A [`FleetGeometryProcessor`] drives every member turbine through the full
//! per-turbine pipeline and concatenates the resulting tables fleet-wide,
//! tagging each row with its turbine name and originating subassembly. It
//! also produces the per-turbine [`SummaryTable`] of elevations, heights,
//! and subassembly masses.
//!
//! Like the per-turbine processor, processing is an explicit, idempotent
//! stage: reading a concatenated table before [`process_all`] has run emits
//! a [`tracing`] warning and returns the table's current (empty) value.
//!
//! [`process_all`]: FleetGeometryProcessor::process_all

mod error;
mod summary;

pub use error::FleetError;
pub use summary::{SummaryTable, TurbineSummary};

use std::collections::HashMap;

use tracing::warn;
use uom::si::f64::Length;

use crate::records::Subassembly;

use super::tables::{Can, DistributedMass, LumpedMass, RnaMass};
use super::turbine::{ProcessOption, ProcessingError, TurbineGeometryProcessor};

/// A fleet-table row tagged with the turbine and subassembly it belongs to.
///
/// The RNA is attributed to the tower and grout to the transition piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    pub turbine: String,
    pub subassembly: Subassembly,
    pub row: T,
}

/// Selects one fleet member, by name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurbineSelector {
    Name(String),
    Index(usize),
}

impl From<&str> for TurbineSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TurbineSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for TurbineSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

fn extend_tagged<T: Clone>(
    out: &mut Vec<Tagged<T>>,
    turbine: &str,
    subassembly: Subassembly,
    rows: &[T],
) {
    out.extend(rows.iter().cloned().map(|row| Tagged {
        turbine: turbine.to_string(),
        subassembly,
        row,
    }));
}

/// Processes the geometry of a fleet of turbines.
#[derive(Debug, Clone)]
pub struct FleetGeometryProcessor {
    turbines: Vec<String>,
    members: Vec<TurbineGeometryProcessor>,
    processed: bool,

    tower_sections: Vec<Tagged<Can>>,
    transition_piece_sections: Vec<Tagged<Can>>,
    monopile_sections: Vec<Tagged<Can>>,
    substructures: Vec<Tagged<Can>>,
    tp_skirts: Vec<Tagged<Can>>,
    full_structures: Vec<Tagged<Can>>,
    all_tubular: Vec<Tagged<Can>>,

    rna: Vec<Tagged<RnaMass>>,
    tower_lumped: Vec<Tagged<LumpedMass>>,
    tp_lumped: Vec<Tagged<LumpedMass>>,
    mp_lumped: Vec<Tagged<LumpedMass>>,
    all_lumped: Vec<Tagged<LumpedMass>>,

    tp_distributed: Vec<Tagged<DistributedMass>>,
    mp_distributed: Vec<Tagged<DistributedMass>>,
    grout: Vec<Tagged<DistributedMass>>,
    all_distributed: Vec<Tagged<DistributedMass>>,

    pile_toes: HashMap<String, Length>,
    summary: SummaryTable,
}

impl FleetGeometryProcessor {
    /// Creates a fleet from parallel lists of turbine names and processors.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::LengthMismatch`] when the lists differ in
    /// length and [`FleetError::Empty`] for an empty fleet.
    pub fn new(
        turbines: Vec<String>,
        members: Vec<TurbineGeometryProcessor>,
    ) -> Result<Self, FleetError> {
        if turbines.len() != members.len() {
            return Err(FleetError::LengthMismatch {
                turbines: turbines.len(),
                processors: members.len(),
            });
        }
        if members.is_empty() {
            return Err(FleetError::Empty);
        }

        Ok(Self {
            turbines,
            members,
            processed: false,
            tower_sections: Vec::new(),
            transition_piece_sections: Vec::new(),
            monopile_sections: Vec::new(),
            substructures: Vec::new(),
            tp_skirts: Vec::new(),
            full_structures: Vec::new(),
            all_tubular: Vec::new(),
            rna: Vec::new(),
            tower_lumped: Vec::new(),
            tp_lumped: Vec::new(),
            mp_lumped: Vec::new(),
            all_lumped: Vec::new(),
            tp_distributed: Vec::new(),
            mp_distributed: Vec::new(),
            grout: Vec::new(),
            all_distributed: Vec::new(),
            pile_toes: HashMap::new(),
            summary: SummaryTable::default(),
        })
    }

    /// Runs every member through the full pipeline and concatenates the
    /// resulting tables fleet-wide.
    ///
    /// Idempotent: once processed, further calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Processing`] when any member's pipeline fails;
    /// earlier members stay processed.
    pub fn process_all(&mut self) -> Result<(), FleetError> {
        if self.processed {
            return Ok(());
        }

        for member in &mut self.members {
            member.process_structure(ProcessOption::Full)?;
            member.assemble_substructure()?;
            member.assemble_full_structure()?;
        }

        let mut summaries = Vec::with_capacity(self.members.len());
        for (turbine, owt) in self.turbines.iter().zip(&self.members) {
            use Subassembly::{Monopile, Tower, TransitionPiece};

            extend_tagged(&mut self.tower_sections, turbine, Tower, owt.tower_sections().rows());
            extend_tagged(
                &mut self.transition_piece_sections,
                turbine,
                TransitionPiece,
                owt.transition_piece_sections().rows(),
            );
            extend_tagged(
                &mut self.monopile_sections,
                turbine,
                Monopile,
                owt.monopile_sections().rows(),
            );

            // Merged tables keep transition-piece rows ahead of monopile
            // rows, so the split index recovers each row's origin.
            let tp_rows = owt.substructure().len() - owt.monopile_sections().len();
            let (sub_tp, sub_mp) = owt.substructure().rows().split_at(tp_rows);
            extend_tagged(&mut self.substructures, turbine, TransitionPiece, sub_tp);
            extend_tagged(&mut self.substructures, turbine, Monopile, sub_mp);
            extend_tagged(&mut self.tp_skirts, turbine, TransitionPiece, owt.tp_skirt().rows());

            let (full_tw, full_sub) = owt
                .full_structure()
                .rows()
                .split_at(owt.tower_sections().len());
            let (full_tp, full_mp) = full_sub.split_at(tp_rows);
            extend_tagged(&mut self.full_structures, turbine, Tower, full_tw);
            extend_tagged(&mut self.full_structures, turbine, TransitionPiece, full_tp);
            extend_tagged(&mut self.full_structures, turbine, Monopile, full_mp);

            extend_tagged(&mut self.all_tubular, turbine, Tower, owt.tower_sections().rows());
            extend_tagged(
                &mut self.all_tubular,
                turbine,
                TransitionPiece,
                owt.transition_piece_sections().rows(),
            );
            extend_tagged(&mut self.all_tubular, turbine, Monopile, owt.monopile_sections().rows());

            extend_tagged(&mut self.rna, turbine, Tower, owt.rna().rows());
            extend_tagged(&mut self.tower_lumped, turbine, Tower, owt.tower_lumped_masses().rows());
            extend_tagged(
                &mut self.tp_lumped,
                turbine,
                TransitionPiece,
                owt.transition_piece_lumped_masses().rows(),
            );
            extend_tagged(&mut self.mp_lumped, turbine, Monopile, owt.monopile_lumped_masses().rows());

            // The combined lumped table folds the RNA in as a plain point
            // mass, inertia dropped.
            let rna_lumped: Vec<LumpedMass> =
                owt.rna().iter().map(RnaMass::to_lumped).collect();
            extend_tagged(&mut self.all_lumped, turbine, Tower, &rna_lumped);
            extend_tagged(&mut self.all_lumped, turbine, Tower, owt.tower_lumped_masses().rows());
            extend_tagged(
                &mut self.all_lumped,
                turbine,
                TransitionPiece,
                owt.transition_piece_lumped_masses().rows(),
            );
            extend_tagged(&mut self.all_lumped, turbine, Monopile, owt.monopile_lumped_masses().rows());

            extend_tagged(
                &mut self.tp_distributed,
                turbine,
                TransitionPiece,
                owt.transition_piece_distributed_masses().rows(),
            );
            extend_tagged(
                &mut self.mp_distributed,
                turbine,
                Monopile,
                owt.monopile_distributed_masses().rows(),
            );
            extend_tagged(&mut self.grout, turbine, TransitionPiece, owt.grout().rows());

            extend_tagged(
                &mut self.all_distributed,
                turbine,
                TransitionPiece,
                owt.transition_piece_distributed_masses().rows(),
            );
            extend_tagged(&mut self.all_distributed, turbine, TransitionPiece, owt.grout().rows());
            extend_tagged(
                &mut self.all_distributed,
                turbine,
                Monopile,
                owt.monopile_distributed_masses().rows(),
            );

            let pile_toe = owt.pile_toe().ok_or(ProcessingError::Precedence {
                stage: "process_all",
                prerequisite: "process_structure(ProcessOption::Monopile)",
            })?;
            self.pile_toes.insert(turbine.clone(), pile_toe);

            summaries.push(TurbineSummary::from_processed(turbine, owt)?);
        }
        self.summary = SummaryTable::new(summaries);

        self.processed = true;
        Ok(())
    }

    /// Looks up one member by name or index.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::TurbineNotFound`] or
    /// [`FleetError::IndexOutOfRange`] for a selector that matches nothing.
    pub fn select_turbine(
        &self,
        selector: impl Into<TurbineSelector>,
    ) -> Result<&TurbineGeometryProcessor, FleetError> {
        match selector.into() {
            TurbineSelector::Name(name) => self
                .turbines
                .iter()
                .position(|t| *t == name)
                .map(|i| &self.members[i])
                .ok_or(FleetError::TurbineNotFound(name)),
            TurbineSelector::Index(index) => {
                self.members.get(index).ok_or(FleetError::IndexOutOfRange {
                    index,
                    len: self.members.len(),
                })
            }
        }
    }

    fn read_guard(&self, table: &'static str) {
        if !self.processed {
            warn!(table, "accessed before processing; run `process_all` first");
        }
    }

    /// The member turbine names, in fleet order.
    #[must_use]
    pub fn turbines(&self) -> &[String] {
        &self.turbines
    }

    /// The member processors, in fleet order.
    #[must_use]
    pub fn members(&self) -> &[TurbineGeometryProcessor] {
        &self.members
    }

    /// Tower sections of every member.
    #[must_use]
    pub fn tower_sections(&self) -> &[Tagged<Can>] {
        self.read_guard("tower_sections");
        &self.tower_sections
    }

    /// Transition-piece sections of every member.
    #[must_use]
    pub fn transition_piece_sections(&self) -> &[Tagged<Can>] {
        self.read_guard("transition_piece_sections");
        &self.transition_piece_sections
    }

    /// Monopile sections of every member.
    #[must_use]
    pub fn monopile_sections(&self) -> &[Tagged<Can>] {
        self.read_guard("monopile_sections");
        &self.monopile_sections
    }

    /// Merged substructures of every member.
    #[must_use]
    pub fn substructures(&self) -> &[Tagged<Can>] {
        self.read_guard("substructures");
        &self.substructures
    }

    /// Transition-piece skirts of every member.
    #[must_use]
    pub fn tp_skirts(&self) -> &[Tagged<Can>] {
        self.read_guard("tp_skirts");
        &self.tp_skirts
    }

    /// Full structural columns of every member.
    #[must_use]
    pub fn full_structures(&self) -> &[Tagged<Can>] {
        self.read_guard("full_structures");
        &self.full_structures
    }

    /// All structural cans of every member, tower to monopile.
    #[must_use]
    pub fn all_tubular_sections(&self) -> &[Tagged<Can>] {
        self.read_guard("all_tubular_sections");
        &self.all_tubular
    }

    /// RNA rows of every member.
    #[must_use]
    pub fn rna(&self) -> &[Tagged<RnaMass>] {
        self.read_guard("rna");
        &self.rna
    }

    /// Tower lumped masses of every member.
    #[must_use]
    pub fn tower_lumped_masses(&self) -> &[Tagged<LumpedMass>] {
        self.read_guard("tower_lumped_masses");
        &self.tower_lumped
    }

    /// Transition-piece lumped masses of every member.
    #[must_use]
    pub fn transition_piece_lumped_masses(&self) -> &[Tagged<LumpedMass>] {
        self.read_guard("transition_piece_lumped_masses");
        &self.tp_lumped
    }

    /// Monopile lumped masses of every member.
    #[must_use]
    pub fn monopile_lumped_masses(&self) -> &[Tagged<LumpedMass>] {
        self.read_guard("monopile_lumped_masses");
        &self.mp_lumped
    }

    /// All lumped masses of every member, the RNA included as a point mass.
    #[must_use]
    pub fn all_lumped_masses(&self) -> &[Tagged<LumpedMass>] {
        self.read_guard("all_lumped_masses");
        &self.all_lumped
    }

    /// Transition-piece distributed masses of every member (grout excluded).
    #[must_use]
    pub fn transition_piece_distributed_masses(&self) -> &[Tagged<DistributedMass>] {
        self.read_guard("transition_piece_distributed_masses");
        &self.tp_distributed
    }

    /// Monopile distributed masses of every member.
    #[must_use]
    pub fn monopile_distributed_masses(&self) -> &[Tagged<DistributedMass>] {
        self.read_guard("monopile_distributed_masses");
        &self.mp_distributed
    }

    /// Grout rows of every member.
    #[must_use]
    pub fn grout(&self) -> &[Tagged<DistributedMass>] {
        self.read_guard("grout");
        &self.grout
    }

    /// All distributed masses of every member, grout included.
    #[must_use]
    pub fn all_distributed_masses(&self) -> &[Tagged<DistributedMass>] {
        self.read_guard("all_distributed_masses");
        &self.all_distributed
    }

    /// Pile toe elevation of every member in m mLAT, keyed by turbine name.
    #[must_use]
    pub fn pile_toes(&self) -> &HashMap<String, Length> {
        self.read_guard("pile_toes");
        &self.pile_toes
    }

    /// The per-turbine summary table.
    #[must_use]
    pub fn summary(&self) -> &SummaryTable {
        self.read_guard("summary");
        &self.summary
    }
}
