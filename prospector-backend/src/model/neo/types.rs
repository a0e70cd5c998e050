///! NeoWs lookup response types
///!
///! Fields the extractor depends on are optional so that an incomplete record
///! still decodes and can be reported as "no usable data" instead of as a
///! failed fetch.

use serde::{Deserialize, Serialize};

/// One object as returned by `GET /neo/rest/v1/neo/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalogRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub estimated_diameter: Option<EstimatedDiameter>,

    #[serde(default)]
    pub is_potentially_hazardous_asteroid: Option<bool>,

    /// Ordered as the catalog lists them
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

/// Diameter estimates keyed by unit; only kilometers are consumed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub kilometers: Option<DiameterRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiameterRange {
    #[serde(default)]
    pub estimated_diameter_min: Option<f64>,

    #[serde(default)]
    pub estimated_diameter_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloseApproach {
    /// e.g. "2024-08-14"
    #[serde(default)]
    pub close_approach_date: Option<String>,

    #[serde(default)]
    pub orbiting_body: Option<String>,

    #[serde(default)]
    pub miss_distance: Option<MissDistance>,

    #[serde(default)]
    pub relative_velocity: Option<RelativeVelocity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissDistance {
    #[serde(default)]
    pub kilometers: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(default)]
    pub kilometers_per_second: Option<Decimal>,
}

/// NeoWs sends most measurements as decimal strings ("40813237.6")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    /// Numeric value, or `None` if the text does not parse to a finite number.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Decimal::Number(n) => *n,
            Decimal::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}
