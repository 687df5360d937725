use serde::{Deserialize, Serialize};

/// An asset location as stored in the metadata database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Location (turbine) title.
    pub title: String,
    /// Seabed elevation in m mLAT. Negative below the datum, so this doubles
    /// as the water depth used in summaries and the mudline transform.
    pub elevation: f64,
}
