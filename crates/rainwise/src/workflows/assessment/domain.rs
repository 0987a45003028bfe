use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    #[default]
    Residential,
    Commercial,
    Institutional,
}

impl BuildingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential Building",
            Self::Commercial => "Commercial Building",
            Self::Institutional => "Institutional Building",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Clayey,
    Sandy,
    Rocky,
    #[default]
    Mixed,
}

impl SoilType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clayey => "Clayey (heavy, water-retaining)",
            Self::Sandy => "Sandy (light, well-draining)",
            Self::Rocky => "Rocky (hard, poor drainage)",
            Self::Mixed => "Mixed/Loamy (balanced)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterSource {
    #[default]
    Municipal,
    Borewell,
    Both,
    None,
}

impl WaterSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Municipal => "Municipal Water Supply",
            Self::Borewell => "Borewell/Tubewell",
            Self::Both => "Both Municipal & Borewell",
            Self::None => "No reliable source",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Completed property survey. Only `intake::validate` should construct one from
/// untrusted input; the calculators assume every bound already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSurvey {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Catchment roof area in m².
    pub roof_area: f64,
    /// Unpaved open space in m² available for sub-surface structures.
    pub open_space: f64,
    pub dwellers: u32,
    pub building_type: BuildingType,
    pub soil_type: SoilType,
    pub water_source: WaterSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallIntensity {
    Low,
    Medium,
    High,
}

impl RainfallIntensity {
    /// Provider-side classification of an annual rainfall figure.
    pub fn from_annual_mm(annual_rainfall_mm: f64) -> Self {
        if annual_rainfall_mm > 1200.0 {
            Self::High
        } else if annual_rainfall_mm > 800.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallObservation {
    pub annual_rainfall_mm: f64,
    /// Display-only; not required to sum to `annual_rainfall_mm`.
    pub monthly_distribution: [f64; 12],
    pub rainy_days: u32,
    pub intensity: RainfallIntensity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundwaterQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl GroundwaterQuality {
    /// Provider-side classification by depth to the water table.
    pub fn from_depth(level_meters: f64) -> Self {
        if level_meters < 10.0 {
            Self::Excellent
        } else if level_meters < 20.0 {
            Self::Good
        } else if level_meters < 30.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AquiferType {
    Confined,
    Unconfined,
    Perched,
}

impl AquiferType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confined => "Confined",
            Self::Unconfined => "Unconfined",
            Self::Perched => "Perched",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterObservation {
    pub level_meters: f64,
    pub quality: GroundwaterQuality,
    pub recharge_rate_cm_per_year: f64,
    pub aquifer_type: AquiferType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Tank,
    SoakPit,
    Trench,
    RechargeShaft,
    PercolationPit,
}

impl StructureKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tank => "Storage Tank",
            Self::SoakPit => "Soak Pit",
            Self::Trench => "Recharge Trench",
            Self::RechargeShaft => "Recharge Shaft",
            Self::PercolationPit => "Percolation Pit",
        }
    }

    pub const fn geometry(self) -> Geometry {
        match self {
            Self::Tank | Self::Trench => Geometry::Rectangular,
            Self::SoakPit | Self::RechargeShaft => Geometry::Cylindrical,
            Self::PercolationPit => Geometry::DepthOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Rectangular,
    Cylindrical,
    DepthOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum StructureDimensions {
    Rectangular { length: u32, width: u32, depth: u32 },
    Cylindrical { diameter: u32, depth: u32 },
    DepthOnly { depth: u32 },
}

impl StructureDimensions {
    pub const fn geometry(&self) -> Geometry {
        match self {
            Self::Rectangular { .. } => Geometry::Rectangular,
            Self::Cylindrical { .. } => Geometry::Cylindrical,
            Self::DepthOnly { .. } => Geometry::DepthOnly,
        }
    }

    pub const fn depth(&self) -> u32 {
        match *self {
            Self::Rectangular { depth, .. }
            | Self::Cylindrical { depth, .. }
            | Self::DepthOnly { depth } => depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureCost {
    pub material: f64,
    pub labor: f64,
    pub total: f64,
}

impl StructureCost {
    pub fn new(material: f64, labor: f64) -> Self {
        Self {
            material,
            labor,
            total: material + labor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecommendation {
    pub kind: StructureKind,
    pub name: String,
    pub capacity_liters: u32,
    pub dimensions: StructureDimensions,
    pub cost: StructureCost,
    pub suitability_percent: u8,
    pub diy_friendly: bool,
    pub description: String,
}

impl StructureRecommendation {
    /// Returns `None` when `dimensions` does not have the shape `kind` requires.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: StructureKind,
        name: impl Into<String>,
        capacity_liters: u32,
        dimensions: StructureDimensions,
        cost: StructureCost,
        suitability_percent: u8,
        diy_friendly: bool,
        description: impl Into<String>,
    ) -> Option<Self> {
        if kind.geometry() != dimensions.geometry() {
            return None;
        }

        Some(Self {
            kind,
            name: name.into(),
            capacity_liters,
            dimensions,
            cost,
            suitability_percent: suitability_percent.min(100),
            diy_friendly,
            description: description.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub annual_runoff_m3: f64,
    pub harvestable_m3: f64,
    pub demand_coverage_percent: f64,
    pub annual_cost_savings: f64,
    pub roi_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencyKind {
    Ngo,
    Contractor,
    Government,
}

impl AgencyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ngo => "NGO",
            Self::Contractor => "Contractor",
            Self::Government => "Government",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerAgency {
    pub id: String,
    pub name: String,
    pub kind: AgencyKind,
    pub rating: f32,
    pub contact: String,
    pub location: String,
    pub specializations: Vec<String>,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyScheme {
    pub id: String,
    pub name: String,
    pub subsidy_percent: u8,
    pub eligibility_criteria: Vec<String>,
    pub application_url: String,
    pub description: String,
}

/// Everything a dashboard or report needs from one assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBundle {
    pub rainfall: RainfallObservation,
    pub groundwater: GroundwaterObservation,
    pub recommendations: Vec<StructureRecommendation>,
    pub savings: SavingsProjection,
    pub agencies: Vec<PartnerAgency>,
    pub schemes: Vec<SubsidyScheme>,
}
