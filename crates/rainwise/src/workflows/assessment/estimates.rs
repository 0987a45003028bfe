use super::domain::{RainfallObservation, SiteSurvey};

/// Fraction of rain striking a roof that becomes runoff.
pub const RUNOFF_COEFFICIENT: f64 = 0.80;
/// Fraction of runoff captured after first-flush and conveyance losses.
pub const COLLECTION_EFFICIENCY: f64 = 0.85;
/// Domestic per-capita baseline, litres per person per day.
pub const DAILY_PER_CAPITA_DEMAND_LITERS: f64 = 135.0;

const DAYS_PER_YEAR: f64 = 365.0;
const LITERS_PER_M3: f64 = 1000.0;

/// Annual harvestable roof runoff in whole cubic meters.
pub fn estimate_annual_runoff(survey: &SiteSurvey, rainfall: &RainfallObservation) -> f64 {
    let volume = survey.roof_area
        * rainfall.annual_rainfall_mm
        * RUNOFF_COEFFICIENT
        * COLLECTION_EFFICIENCY
        / LITERS_PER_M3;
    volume.round()
}

/// Annual household water demand in whole cubic meters.
pub fn estimate_annual_demand(dwellers: u32) -> f64 {
    (DAILY_PER_CAPITA_DEMAND_LITERS * f64::from(dwellers) * DAYS_PER_YEAR / LITERS_PER_M3).round()
}
