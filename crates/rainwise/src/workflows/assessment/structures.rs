//! Candidate harvesting and recharge structures sized from runoff and site
//! constraints.
//!
//! Each rule yields at most one candidate. Sub-surface structures need a
//! minimum open footprint, so the soak pit and trench are gated on
//! `open_space`. Suitability is an ordinal ranking signal (soil permeability
//! and building fit), not a measured probability.

use super::domain::{
    BuildingType, SiteSurvey, SoilType, StructureCost, StructureDimensions, StructureKind,
    StructureRecommendation,
};

const TANK_RUNOFF_SHARE: f64 = 0.30;
const TANK_ROOF_SHARE: f64 = 0.10;
const TANK_MATERIAL_RATE: f64 = 150.0;
const TANK_LABOR_RATE: f64 = 50.0;
const TANK_DIY_LIMIT: f64 = 5.0;

const SOAK_PIT_MIN_OPEN_SPACE: f64 = 10.0;
const SOAK_PIT_DEPTH: u32 = 3;
const SOAK_PIT_MATERIAL_RATE: f64 = 8.0;
const SOAK_PIT_LABOR_RATE: f64 = 12.0;
// Kept at 3.14 so pit diameters match previously issued recommendations.
#[allow(clippy::approx_constant)]
const SOAK_PIT_PI: f64 = 3.14;

const TRENCH_MIN_OPEN_SPACE: f64 = 20.0;
const TRENCH_MAX_LENGTH: f64 = 30.0;
const TRENCH_WIDTH_M: f64 = 0.6;
const TRENCH_DEPTH_M: f64 = 1.5;
const TRENCH_WIDTH_CM: u32 = 60;
const TRENCH_DEPTH_CM: u32 = 150;
const TRENCH_MATERIAL_RATE: f64 = 25.0;
const TRENCH_LABOR_RATE: f64 = 35.0;

/// Generate every applicable structure, best suited first.
///
/// The sort is stable, so equal scores keep generation order
/// (tank, soak pit, trench).
pub fn recommend(survey: &SiteSurvey, runoff_m3: f64) -> Vec<StructureRecommendation> {
    let mut recommendations: Vec<StructureRecommendation> = [
        storage_tank(survey, runoff_m3),
        soak_pit(survey),
        recharge_trench(survey),
    ]
    .into_iter()
    .flatten()
    .collect();

    recommendations.sort_by(|a, b| b.suitability_percent.cmp(&a.suitability_percent));
    recommendations
}

fn storage_tank(survey: &SiteSurvey, runoff_m3: f64) -> Option<StructureRecommendation> {
    let capacity = (runoff_m3 * TANK_RUNOFF_SHARE).min(survey.roof_area * TANK_ROOF_SHARE);
    let edge = (capacity * 1000.0).cbrt();

    let suitability = match survey.building_type {
        BuildingType::Residential => 95,
        BuildingType::Commercial | BuildingType::Institutional => 85,
    };

    StructureRecommendation::new(
        StructureKind::Tank,
        "Overhead Storage Tank",
        whole(capacity),
        StructureDimensions::Rectangular {
            length: whole(edge * 1.2),
            width: whole(edge),
            depth: whole(edge * 0.8),
        },
        StructureCost::new(capacity * TANK_MATERIAL_RATE, capacity * TANK_LABOR_RATE),
        suitability,
        capacity < TANK_DIY_LIMIT,
        "Collects and stores rainwater for immediate use",
    )
}

fn soak_pit(survey: &SiteSurvey) -> Option<StructureRecommendation> {
    if survey.open_space <= SOAK_PIT_MIN_OPEN_SPACE {
        return None;
    }

    let volume = survey.open_space * 0.5;
    let suitability = match survey.soil_type {
        SoilType::Sandy => 90,
        SoilType::Mixed => 75,
        SoilType::Clayey | SoilType::Rocky => 60,
    };

    StructureRecommendation::new(
        StructureKind::SoakPit,
        "Recharge Soak Pit",
        whole(volume),
        StructureDimensions::Cylindrical {
            diameter: whole((volume / SOAK_PIT_PI).sqrt() * 2.0),
            depth: SOAK_PIT_DEPTH,
        },
        StructureCost::new(
            survey.open_space * SOAK_PIT_MATERIAL_RATE,
            survey.open_space * SOAK_PIT_LABOR_RATE,
        ),
        suitability,
        true,
        "Allows rainwater to percolate and recharge groundwater",
    )
}

fn recharge_trench(survey: &SiteSurvey) -> Option<StructureRecommendation> {
    if survey.open_space <= TRENCH_MIN_OPEN_SPACE {
        return None;
    }

    let length = (survey.open_space / 2.0).min(TRENCH_MAX_LENGTH);
    let suitability = match survey.soil_type {
        SoilType::Clayey => 65,
        SoilType::Sandy | SoilType::Rocky | SoilType::Mixed => 85,
    };

    StructureRecommendation::new(
        StructureKind::Trench,
        "Recharge Trench",
        whole(length * TRENCH_WIDTH_M * TRENCH_DEPTH_M),
        StructureDimensions::Rectangular {
            length: whole(length),
            width: TRENCH_WIDTH_CM,
            depth: TRENCH_DEPTH_CM,
        },
        StructureCost::new(length * TRENCH_MATERIAL_RATE, length * TRENCH_LABOR_RATE),
        suitability,
        true,
        "Linear structure for enhanced groundwater recharge",
    )
}

fn whole(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
