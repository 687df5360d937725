use serde::{Deserialize, Serialize};

/// A structural material as stored in the metadata database.
///
/// Stiffness properties are optional in the database; processors fall back to
/// the standard steel defaults (210 GPa, 0.3) when they are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material title, referenced by [`ElementRecord::material`](crate::records::ElementRecord).
    pub title: String,
    /// Density in kg/m³.
    pub density: f64,
    /// Young's modulus in GPa, if recorded.
    pub young_modulus: Option<f64>,
    /// Poisson's ratio, if recorded.
    pub poisson_ratio: Option<f64>,
}
