use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{BuildingType, Coordinates, SiteSurvey, SoilType, WaterSource};

pub const MIN_ROOF_AREA_M2: f64 = 10.0;

/// Survey as received from a client, before any bound has been checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveySubmission {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub roof_area: Option<f64>,
    #[serde(default)]
    pub open_space: Option<f64>,
    #[serde(default)]
    pub dwellers: Option<u32>,
    #[serde(default)]
    pub building_type: BuildingType,
    #[serde(default)]
    pub soil_type: SoilType,
    #[serde(default)]
    pub water_source: WaterSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raised at the survey boundary, before the engine ever runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("survey rejected: {}", summarize(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check every field rule and build the immutable survey the engine consumes.
///
/// All violations are collected so a client can correct the whole form at once.
pub fn validate(submission: SurveySubmission) -> Result<SiteSurvey, ValidationFailure> {
    let mut violations = Vec::new();

    let location = submission.location.trim().to_string();
    if location.is_empty() {
        violations.push(FieldViolation {
            field: "location",
            message: "please enter a location".to_string(),
        });
    }

    if let Some(coordinates) = submission.coordinates {
        if !(-90.0..=90.0).contains(&coordinates.latitude)
            || !(-180.0..=180.0).contains(&coordinates.longitude)
        {
            violations.push(FieldViolation {
                field: "coordinates",
                message: format!(
                    "({}, {}) is not a valid latitude/longitude pair",
                    coordinates.latitude, coordinates.longitude
                ),
            });
        }
    }

    let roof_area = match submission.roof_area {
        Some(area) if area.is_finite() && area >= MIN_ROOF_AREA_M2 => area,
        _ => {
            violations.push(FieldViolation {
                field: "roof_area",
                message: format!("roof area must be at least {MIN_ROOF_AREA_M2} m²"),
            });
            0.0
        }
    };

    let open_space = match submission.open_space {
        Some(space) if space.is_finite() && space >= 0.0 => space,
        _ => {
            violations.push(FieldViolation {
                field: "open_space",
                message: "open space must be 0 m² or more".to_string(),
            });
            0.0
        }
    };

    let dwellers = match submission.dwellers {
        Some(count) if count >= 1 => count,
        _ => {
            violations.push(FieldViolation {
                field: "dwellers",
                message: "at least one dweller is required".to_string(),
            });
            0
        }
    };

    if !violations.is_empty() {
        return Err(ValidationFailure { violations });
    }

    Ok(SiteSurvey {
        location,
        coordinates: submission.coordinates,
        roof_area,
        open_space,
        dwellers,
        building_type: submission.building_type,
        soil_type: submission.soil_type,
        water_source: submission.water_source,
    })
}
