use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{f64::Length, length::millimeter};

/// The support-structure parts a turbine is assembled from.
///
/// Displayed with the database codes (`TW`, `TP`, `MP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subassembly {
    Tower,
    TransitionPiece,
    Monopile,
}

impl Subassembly {
    /// The database code for this subassembly.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Tower => "TW",
            Self::TransitionPiece => "TP",
            Self::Monopile => "MP",
        }
    }
}

impl fmt::Display for Subassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The structural role of a single building-block element.
///
/// The database encodes this in the element title; the data-access layer is
/// expected to resolve it into this enum so processors can match on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A cylindrical or conical structural section.
    Can,
    /// A secondary-steel item: lumped when it has no height, distributed
    /// otherwise.
    Appurtenance,
    /// The rotor-nacelle assembly sitting on top of the tower.
    Rna,
    /// Grout between transition piece and monopile. Modelled exclusively as
    /// distributed mass, never as a structural section.
    Grout,
}

/// Position of a subassembly datum in the LAT reference system, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Outer diameters at the two ends of a can, in model units.
///
/// `bottom` and `top` coincide for cylindrical cans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperedDiameter {
    pub bottom: Length,
    pub top: Length,
}

/// An error parsing the outer-diameter field of an element record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiameterError {
    /// The element has no outer-diameter value at all.
    #[error("element has no outer diameter")]
    Missing,
    /// A diameter value could not be parsed as a number.
    #[error("outer diameter is not numeric: {0:?}")]
    NotNumeric(String),
}

/// A single building-block element of a subassembly.
///
/// Vertical offsets (`z`) are measured in mm from the subassembly bottom;
/// `height` is `None` for lumped appurtenances and `Some` for cans and
/// distributed appurtenances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element title as stored in the database.
    pub title: String,
    /// Structural role of the element.
    pub kind: ElementKind,
    /// Outer diameter in mm, encoded as `"bottom/top"` for tapered cans or a
    /// single value for cylindrical ones.
    pub outer_diameter: Option<String>,
    /// Height in mm. Absent for lumped appurtenances.
    pub height: Option<f64>,
    /// Wall thickness in mm. Only meaningful for cans.
    pub wall_thickness: Option<f64>,
    /// Mass in kg.
    pub mass: f64,
    /// Steel volume in m³.
    pub volume: Option<f64>,
    /// Horizontal offset in mm.
    pub x: f64,
    /// Horizontal offset in mm.
    pub y: f64,
    /// Vertical offset from the subassembly bottom in mm.
    pub z: f64,
    /// Mass moments of inertia in kg·m², if recorded (RNA elements).
    pub moment_of_inertia: Option<Position>,
    /// Title of the element's material, if recorded.
    pub material: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

impl ElementRecord {
    /// Parses the outer-diameter field into end diameters in model units.
    ///
    /// The database stores tapered cans as a slash-separated `"bottom/top"`
    /// pair in mm; a plain value applies to both ends.
    ///
    /// # Errors
    ///
    /// Returns a [`DiameterError`] when the field is absent or not numeric.
    pub fn outer_diameter(&self) -> Result<TaperedDiameter, DiameterError> {
        let raw = self.outer_diameter.as_deref().ok_or(DiameterError::Missing)?;

        let parse = |value: &str| -> Result<Length, DiameterError> {
            value
                .trim()
                .parse::<f64>()
                .map(Length::new::<millimeter>)
                .map_err(|_| DiameterError::NotNumeric(value.to_string()))
        };

        match raw.split_once('/') {
            Some((bottom, top)) => Ok(TaperedDiameter {
                bottom: parse(bottom)?,
                top: parse(top)?,
            }),
            None => {
                let d = parse(raw)?;
                Ok(TaperedDiameter { bottom: d, top: d })
            }
        }
    }
}

/// One subassembly of a turbine with all its building-block elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubassemblyRecord {
    /// Which part of the support structure this is.
    pub subassembly: Subassembly,
    /// Datum position of the subassembly bottom in mm LAT.
    pub position: Position,
    /// Building-block elements. Order is not significant; processors sort
    /// top to bottom.
    pub elements: Vec<ElementRecord>,
}

impl SubassemblyRecord {
    /// Elevation of the subassembly bottom in m mLAT.
    #[must_use]
    pub fn bottom_elevation(&self) -> Length {
        Length::new::<millimeter>(self.position.z)
    }

    /// Elevation of the subassembly top in m mLAT, from its highest can.
    ///
    /// Returns `None` when the subassembly has no cans.
    #[must_use]
    pub fn top_elevation(&self) -> Option<Length> {
        self.cans()
            .filter_map(|e| e.height.map(|h| e.z + h))
            .fold(None, |acc, extent| Some(acc.map_or(extent, |a| f64::max(a, extent))))
            .map(|extent| self.bottom_elevation() + Length::new::<millimeter>(extent))
    }

    /// Iterates over the structural cans of this subassembly.
    pub fn cans(&self) -> impl Iterator<Item = &ElementRecord> {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::Can)
    }
}
