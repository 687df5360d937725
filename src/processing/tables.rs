//! Derived output tables.
//!
//! These are the in-memory tables handed to the downstream FE-model builder.
//! Each row type is fully unit-typed; the column labels (with their units)
//! are the external contract and are exposed both as constants and through
//! the tables' [`Display`](std::fmt::Display) implementations.

use std::fmt;

use uom::si::{
    f64::{Length, LinearMassDensity, Mass, MassDensity, MomentOfInertia, Pressure, Ratio, Volume},
    length::{meter, millimeter},
    linear_mass_density::kilogram_per_meter,
    mass::ton,
    moment_of_inertia::kilogram_square_meter,
    pressure::gigapascal,
    ratio::ratio,
    volume::cubic_meter,
};

/// One structural can of the support structure.
///
/// `depth_from` is the upper end of the can and `depth_to` the lower end,
/// both in mLAT; `diameter_from`/`diameter_to` are the outer diameters at
/// those ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Can {
    pub depth_from: Length,
    pub depth_to: Length,
    pub height: Length,
    pub diameter_from: Length,
    pub diameter_to: Length,
    pub wall_thickness: Length,
    pub volume: Volume,
    pub mass: Mass,
    pub linear_density: LinearMassDensity,
    pub young_modulus: Pressure,
    pub poisson_ratio: Ratio,
}

impl Can {
    /// Material density implied by the can's tabulated mass and volume.
    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.mass / self.volume
    }
}

/// A point-mass appurtenance with no vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct LumpedMass {
    pub x: Length,
    pub y: Length,
    /// Elevation in mLAT.
    pub z: Length,
    pub mass: Mass,
    pub description: Option<String>,
}

/// A mass appurtenance spread over a vertical span.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributedMass {
    pub x: Length,
    pub y: Length,
    /// Elevation of the lower end in mLAT.
    pub z: Length,
    pub height: Length,
    pub mass: Mass,
    pub volume: Volume,
    pub description: Option<String>,
}

/// The rotor-nacelle assembly modelled as a point mass with inertia.
#[derive(Debug, Clone, PartialEq)]
pub struct RnaMass {
    pub x: Length,
    pub y: Length,
    /// Elevation in mLAT.
    pub z: Length,
    pub mass: Mass,
    pub ixx: MomentOfInertia,
    pub iyy: MomentOfInertia,
    pub izz: MomentOfInertia,
}

impl RnaMass {
    /// Drops the inertia terms, leaving the plain lumped mass used in
    /// fleet-wide lumped-mass tables.
    #[must_use]
    pub fn to_lumped(&self) -> LumpedMass {
        LumpedMass {
            x: self.x,
            y: self.y,
            z: self.z,
            mass: self.mass,
            description: None,
        }
    }
}

/// A table of structural cans, ordered top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanTable {
    rows: Vec<Can>,
}

impl CanTable {
    /// Column labels, with units, in presentation order.
    pub const COLUMNS: [&'static str; 11] = [
        "Depth from [mLAT]",
        "Depth to [mLAT]",
        "Height [m]",
        "Diameter from [m]",
        "Diameter to [m]",
        "Volume [m3]",
        "Wall thickness [mm]",
        "Youngs modulus [GPa]",
        "Poissons ratio [-]",
        "Mass [t]",
        "rho [t/m]",
    ];

    #[must_use]
    pub fn new(rows: Vec<Can>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Can] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Can> {
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

    /// Sum of the can heights.
    #[must_use]
    pub fn total_height(&self) -> Length {
        self.rows.iter().map(|c| c.height).sum()
    }

    /// Sum of the can masses.
    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.rows.iter().map(|c| c.mass).sum()
    }

    /// Appends the rows of `other`, preserving top-to-bottom order.
    pub fn extend_from(&mut self, other: &Self) {
        self.rows.extend(other.rows.iter().copied());
    }
}

impl fmt::Display for CanTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::COLUMNS.join("\t"))?;
        for can in &self.rows {
            writeln!(
                f,
                "{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.1}\t{:.0}\t{:.2}\t{:.3}\t{:.3}",
                can.depth_from.get::<meter>(),
                can.depth_to.get::<meter>(),
                can.height.get::<meter>(),
                can.diameter_from.get::<meter>(),
                can.diameter_to.get::<meter>(),
                can.volume.get::<cubic_meter>(),
                can.wall_thickness.get::<millimeter>(),
                can.young_modulus.get::<gigapascal>(),
                can.poisson_ratio.get::<ratio>(),
                can.mass.get::<ton>(),
                can.linear_density.get::<kilogram_per_meter>() * 1e-3,
            )?;
        }
        Ok(())
    }
}

/// A table of lumped-mass appurtenances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LumpedMassTable {
    rows: Vec<LumpedMass>,
}

impl LumpedMassTable {
    /// Column labels without the optional description column.
    pub const COLUMNS: [&'static str; 4] = ["X [m]", "Y [m]", "Z [mLAT]", "Mass [t]"];

    /// Label of the optional trailing description column.
    pub const DESCRIPTION_COLUMN: &'static str = "Description";

    #[must_use]
    pub fn new(rows: Vec<LumpedMass>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[LumpedMass] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &LumpedMass> {
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

    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.rows.iter().map(|m| m.mass).sum()
    }
}

impl fmt::Display for LumpedMassTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_description = self.rows.iter().any(|m| m.description.is_some());
        write!(f, "{}", Self::COLUMNS.join("\t"))?;
        if with_description {
            write!(f, "\t{}", Self::DESCRIPTION_COLUMN)?;
        }
        writeln!(f)?;
        for m in &self.rows {
            write!(
                f,
                "{:.3}\t{:.3}\t{:.3}\t{:.3}",
                m.x.get::<meter>(),
                m.y.get::<meter>(),
                m.z.get::<meter>(),
                m.mass.get::<ton>(),
            )?;
            if with_description {
                write!(f, "\t{}", m.description.as_deref().unwrap_or(""))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A table of distributed-mass appurtenances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributedMassTable {
    rows: Vec<DistributedMass>,
}

impl DistributedMassTable {
    /// Column labels, with units, in presentation order.
    pub const COLUMNS: [&'static str; 7] = [
        "X [m]",
        "Y [m]",
        "Z [mLAT]",
        "Height [m]",
        "Mass [t]",
        "Volume [m3]",
        "Description",
    ];

    #[must_use]
    pub fn new(rows: Vec<DistributedMass>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[DistributedMass] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistributedMass> {
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

    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.rows.iter().map(|m| m.mass).sum()
    }
}

impl fmt::Display for DistributedMassTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::COLUMNS.join("\t"))?;
        for m in &self.rows {
            writeln!(
                f,
                "{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{}",
                m.x.get::<meter>(),
                m.y.get::<meter>(),
                m.z.get::<meter>(),
                m.height.get::<meter>(),
                m.mass.get::<ton>(),
                m.volume.get::<cubic_meter>(),
                m.description.as_deref().unwrap_or(""),
            )?;
        }
        Ok(())
    }
}

/// The RNA table. A single turbine usually contributes one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RnaTable {
    rows: Vec<RnaMass>,
}

impl RnaTable {
    /// Column labels, with units, in presentation order.
    pub const COLUMNS: [&'static str; 7] = [
        "X [m]",
        "Y [m]",
        "Z [mLAT]",
        "Mass [t]",
        "Ixx [tm2]",
        "Iyy [tm2]",
        "Izz [tm2]",
    ];

    #[must_use]
    pub fn new(rows: Vec<RnaMass>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[RnaMass] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &RnaMass> {
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

    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.rows.iter().map(|m| m.mass).sum()
    }
}

impl fmt::Display for RnaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::COLUMNS.join("\t"))?;
        for m in &self.rows {
            writeln!(
                f,
                "{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
                m.x.get::<meter>(),
                m.y.get::<meter>(),
                m.z.get::<meter>(),
                m.mass.get::<ton>(),
                m.ixx.get::<kilogram_square_meter>() * 1e-3,
                m.iyy.get::<kilogram_square_meter>() * 1e-3,
                m.izz.get::<kilogram_square_meter>() * 1e-3,
            )?;
        }
        Ok(())
    }
}
