//! Per-turbine geometry processing.
//!
//! A [`TurbineGeometryProcessor`] owns the raw subassembly tables of one
//! turbine, derives consistent elevation references across its parts, and
//! produces the per-subassembly structural and mass tables plus the
//! assembled full-structure table.
//!
//! The pipeline runs in explicit stages:
//!
//! 1. [`process_structure`](TurbineGeometryProcessor::process_structure)
//!    populates the per-subassembly section and appurtenance tables.
//! 2. [`assemble_substructure`](TurbineGeometryProcessor::assemble_substructure)
//!    merges the transition piece with the monopile at the pile head,
//!    enforcing elevation continuity, and splits off the skirt.
//! 3. [`assemble_full_structure`](TurbineGeometryProcessor::assemble_full_structure)
//!    stitches tower and substructure into one continuous column.
//!
//! Each stage is idempotent and guarded: running a stage twice is a no-op,
//! running one before its prerequisite is a
//! [`Precedence`](ProcessingError::Precedence) error, and reading a derived
//! table before its stage has run emits a [`tracing`] warning and returns
//! the table's current (typically empty) value.

mod appurtenances;
mod assembly;
mod error;
mod mudline;
mod sections;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::ProcessingError;
pub use mudline::{MudlineSection, MudlineTable};
pub use sections::RawSection;

use tracing::warn;
use uom::si::{f64::Length, length::meter};

use crate::records::{LocationRecord, MaterialRecord, Subassembly, SubassemblyRecord};

use super::tables::{CanTable, DistributedMassTable, LumpedMassTable, RnaTable};

/// Which part of the structure a processing run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOption {
    /// All subassemblies.
    Full,
    /// Tower sections, tower lumped masses, and the RNA.
    Tower,
    /// Transition-piece sections, lumped and distributed masses, and grout.
    TransitionPiece,
    /// Monopile sections and lumped and distributed masses.
    Monopile,
}

/// Subassemblies that carry distributed mass appurtenances.
///
/// Tower appurtenances are always lumped, so the tower is deliberately not
/// representable here. Grout lives on the transition piece but is anchored
/// and reported as its own category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributedCategory {
    TransitionPiece,
    Monopile,
    Grout,
}

/// Processes the geometry of a single offshore wind turbine.
#[derive(Debug, Clone)]
pub struct TurbineGeometryProcessor {
    turbine: String,
    materials: Vec<MaterialRecord>,
    tower: Option<SubassemblyRecord>,
    transition_piece: Option<SubassemblyRecord>,
    monopile: Option<SubassemblyRecord>,

    water_depth: Length,
    tower_base: Length,
    pile_head: Length,
    pile_toe: Option<Length>,

    tower_sections: CanTable,
    tp_sections: CanTable,
    mp_sections: CanTable,
    rna: RnaTable,
    tower_lumped: LumpedMassTable,
    tp_lumped: LumpedMassTable,
    mp_lumped: LumpedMassTable,
    tp_distributed: DistributedMassTable,
    mp_distributed: DistributedMassTable,
    grout: DistributedMassTable,
    substructure: CanTable,
    tp_skirt: CanTable,
    full_structure: CanTable,

    processed_tower: bool,
    processed_tp: bool,
    processed_mp: bool,
    merged: bool,
    assembled: bool,
}

impl TurbineGeometryProcessor {
    /// Creates a processor for one turbine.
    ///
    /// `subassemblies` holds the turbine's parts in any order; elements are
    /// re-sorted top to bottom internally. When either anchor override is
    /// absent, both anchors are derived from the data: the tower base from
    /// the tower datum and the pile head from the monopile's highest can.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingSubassembly`] (or
    /// [`ProcessingError::NoCans`]) when anchors must be derived but the
    /// tower or monopile is absent or has no cans.
    pub fn new(
        materials: Vec<MaterialRecord>,
        subassemblies: Vec<SubassemblyRecord>,
        location: &LocationRecord,
        tower_base: Option<Length>,
        pile_head: Option<Length>,
    ) -> Result<Self, ProcessingError> {
        let mut tower = None;
        let mut transition_piece = None;
        let mut monopile = None;
        for mut record in subassemblies {
            // Depth walks and appurtenance anchoring rely on a strict
            // top-to-bottom element order.
            record
                .elements
                .sort_by(|a, b| b.z.partial_cmp(&a.z).unwrap_or(std::cmp::Ordering::Equal));
            match record.subassembly {
                Subassembly::Tower => tower = Some(record),
                Subassembly::TransitionPiece => transition_piece = Some(record),
                Subassembly::Monopile => monopile = Some(record),
            }
        }

        let (tower_base, pile_head) = match (tower_base, pile_head) {
            (Some(base), Some(head)) => (base, head),
            _ => {
                let base = tower
                    .as_ref()
                    .ok_or(ProcessingError::MissingSubassembly {
                        subassembly: Subassembly::Tower,
                    })?
                    .bottom_elevation();
                let mp = monopile
                    .as_ref()
                    .ok_or(ProcessingError::MissingSubassembly {
                        subassembly: Subassembly::Monopile,
                    })?;
                let head = mp.top_elevation().ok_or(ProcessingError::NoCans {
                    subassembly: Subassembly::Monopile,
                })?;
                (base, head)
            }
        };

        Ok(Self {
            turbine: location.title.clone(),
            materials,
            tower,
            transition_piece,
            monopile,
            water_depth: Length::new::<meter>(location.elevation),
            tower_base,
            pile_head,
            pile_toe: None,
            tower_sections: CanTable::default(),
            tp_sections: CanTable::default(),
            mp_sections: CanTable::default(),
            rna: RnaTable::default(),
            tower_lumped: LumpedMassTable::default(),
            tp_lumped: LumpedMassTable::default(),
            mp_lumped: LumpedMassTable::default(),
            tp_distributed: DistributedMassTable::default(),
            mp_distributed: DistributedMassTable::default(),
            grout: DistributedMassTable::default(),
            substructure: CanTable::default(),
            tp_skirt: CanTable::default(),
            full_structure: CanTable::default(),
            processed_tower: false,
            processed_tp: false,
            processed_mp: false,
            merged: false,
            assembled: false,
        })
    }

    /// Populates the derived tables for the requested part of the structure.
    ///
    /// Already-processed parts are skipped, so re-invocation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when a required subassembly is absent or a can's
    /// outer diameter cannot be parsed.
    pub fn process_structure(&mut self, option: ProcessOption) -> Result<(), ProcessingError> {
        match option {
            ProcessOption::Full => {
                self.process_tower_part()?;
                self.process_tp_part()?;
                self.process_mp_part()?;
            }
            ProcessOption::Tower => self.process_tower_part()?,
            ProcessOption::TransitionPiece => self.process_tp_part()?,
            ProcessOption::Monopile => self.process_mp_part()?,
        }
        Ok(())
    }

    fn process_tower_part(&mut self) -> Result<(), ProcessingError> {
        if self.processed_tower {
            return Ok(());
        }
        self.rna = self.build_rna()?;
        self.tower_sections = self.derive_structural_properties(Subassembly::Tower)?;
        self.tower_lumped = self.build_lumped_masses(Subassembly::Tower, false)?;
        self.processed_tower = true;
        Ok(())
    }

    fn process_tp_part(&mut self) -> Result<(), ProcessingError> {
        if self.processed_tp {
            return Ok(());
        }
        self.tp_sections = self.derive_structural_properties(Subassembly::TransitionPiece)?;
        self.tp_lumped = self.build_lumped_masses(Subassembly::TransitionPiece, false)?;
        self.tp_distributed = self.build_distributed_masses(DistributedCategory::TransitionPiece)?;
        self.grout = self.build_distributed_masses(DistributedCategory::Grout)?;
        self.processed_tp = true;
        Ok(())
    }

    fn process_mp_part(&mut self) -> Result<(), ProcessingError> {
        if self.processed_mp {
            return Ok(());
        }
        // Sections first: they derive the pile toe the mass anchors need.
        self.mp_sections = self.derive_structural_properties(Subassembly::Monopile)?;
        self.mp_lumped = self.build_lumped_masses(Subassembly::Monopile, false)?;
        self.mp_distributed = self.build_distributed_masses(DistributedCategory::Monopile)?;
        self.processed_mp = true;
        Ok(())
    }

    fn record(&self, subassembly: Subassembly) -> Result<&SubassemblyRecord, ProcessingError> {
        match subassembly {
            Subassembly::Tower => self.tower.as_ref(),
            Subassembly::TransitionPiece => self.transition_piece.as_ref(),
            Subassembly::Monopile => self.monopile.as_ref(),
        }
        .ok_or(ProcessingError::MissingSubassembly { subassembly })
    }

    fn read_guard(&self, ready: bool, table: &'static str, stage: &'static str) {
        if !ready {
            warn!(
                turbine = %self.turbine,
                table,
                "accessed before processing; run `{stage}` first"
            );
        }
    }

    /// The turbine title this processor was built for.
    #[must_use]
    pub fn turbine(&self) -> &str {
        &self.turbine
    }

    /// Seabed elevation in m mLAT.
    #[must_use]
    pub fn water_depth(&self) -> Length {
        self.water_depth
    }

    /// Tower base elevation in m mLAT.
    #[must_use]
    pub fn tower_base(&self) -> Length {
        self.tower_base
    }

    /// Pile head elevation in m mLAT.
    #[must_use]
    pub fn pile_head(&self) -> Length {
        self.pile_head
    }

    /// Pile toe elevation in m mLAT, once monopile sections are processed.
    #[must_use]
    pub fn pile_toe(&self) -> Option<Length> {
        self.read_guard(
            self.processed_mp,
            "pile_toe",
            "process_structure(ProcessOption::Monopile)",
        );
        self.pile_toe
    }

    /// Tower structural sections.
    #[must_use]
    pub fn tower_sections(&self) -> &CanTable {
        self.read_guard(
            self.processed_tower,
            "tower_sections",
            "process_structure(ProcessOption::Tower)",
        );
        &self.tower_sections
    }

    /// Transition-piece structural sections (grout excluded).
    #[must_use]
    pub fn transition_piece_sections(&self) -> &CanTable {
        self.read_guard(
            self.processed_tp,
            "transition_piece_sections",
            "process_structure(ProcessOption::TransitionPiece)",
        );
        &self.tp_sections
    }

    /// Monopile structural sections.
    #[must_use]
    pub fn monopile_sections(&self) -> &CanTable {
        self.read_guard(
            self.processed_mp,
            "monopile_sections",
            "process_structure(ProcessOption::Monopile)",
        );
        &self.mp_sections
    }

    /// The RNA table.
    #[must_use]
    pub fn rna(&self) -> &RnaTable {
        self.read_guard(
            self.processed_tower,
            "rna",
            "process_structure(ProcessOption::Tower)",
        );
        &self.rna
    }

    /// Tower lumped masses.
    #[must_use]
    pub fn tower_lumped_masses(&self) -> &LumpedMassTable {
        self.read_guard(
            self.processed_tower,
            "tower_lumped_masses",
            "process_structure(ProcessOption::Tower)",
        );
        &self.tower_lumped
    }

    /// Transition-piece lumped masses.
    #[must_use]
    pub fn transition_piece_lumped_masses(&self) -> &LumpedMassTable {
        self.read_guard(
            self.processed_tp,
            "transition_piece_lumped_masses",
            "process_structure(ProcessOption::TransitionPiece)",
        );
        &self.tp_lumped
    }

    /// Monopile lumped masses.
    #[must_use]
    pub fn monopile_lumped_masses(&self) -> &LumpedMassTable {
        self.read_guard(
            self.processed_mp,
            "monopile_lumped_masses",
            "process_structure(ProcessOption::Monopile)",
        );
        &self.mp_lumped
    }

    /// Transition-piece distributed masses (grout excluded).
    #[must_use]
    pub fn transition_piece_distributed_masses(&self) -> &DistributedMassTable {
        self.read_guard(
            self.processed_tp,
            "transition_piece_distributed_masses",
            "process_structure(ProcessOption::TransitionPiece)",
        );
        &self.tp_distributed
    }

    /// Monopile distributed masses.
    #[must_use]
    pub fn monopile_distributed_masses(&self) -> &DistributedMassTable {
        self.read_guard(
            self.processed_mp,
            "monopile_distributed_masses",
            "process_structure(ProcessOption::Monopile)",
        );
        &self.mp_distributed
    }

    /// Grout, modelled as distributed mass.
    #[must_use]
    pub fn grout(&self) -> &DistributedMassTable {
        self.read_guard(
            self.processed_tp,
            "grout",
            "process_structure(ProcessOption::TransitionPiece)",
        );
        &self.grout
    }

    /// Transition piece above the connection merged with the monopile.
    #[must_use]
    pub fn substructure(&self) -> &CanTable {
        self.read_guard(self.merged, "substructure", "assemble_substructure()");
        &self.substructure
    }

    /// Transition-piece portion below the monopile connection.
    #[must_use]
    pub fn tp_skirt(&self) -> &CanTable {
        self.read_guard(self.merged, "tp_skirt", "assemble_substructure()");
        &self.tp_skirt
    }

    /// Tower plus substructure as one continuous column.
    #[must_use]
    pub fn full_structure(&self) -> &CanTable {
        self.read_guard(self.assembled, "full_structure", "assemble_full_structure()");
        &self.full_structure
    }
}
