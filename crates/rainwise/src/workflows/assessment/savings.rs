use super::domain::{RainfallObservation, SavingsProjection, SiteSurvey, StructureRecommendation};
use super::estimates::{estimate_annual_demand, estimate_annual_runoff};

/// Second-stage capture loss applied on top of the runoff estimate. The two
/// 0.85 factors compound to roughly 72% overall.
pub const HARVEST_EFFICIENCY: f64 = 0.85;
/// Average municipal water tariff per m³.
pub const WATER_COST_PER_M3: f64 = 30.0;

/// Sum of the all-in cost across every recommended structure.
pub fn total_investment(recommendations: &[StructureRecommendation]) -> f64 {
    recommendations
        .iter()
        .map(|recommendation| recommendation.cost.total)
        .sum()
}

pub fn project(
    survey: &SiteSurvey,
    rainfall: &RainfallObservation,
    recommendations: &[StructureRecommendation],
) -> SavingsProjection {
    let annual_runoff_m3 = estimate_annual_runoff(survey, rainfall);
    let harvestable_m3 = (annual_runoff_m3 * HARVEST_EFFICIENCY).round();
    let total_demand_m3 = estimate_annual_demand(survey.dwellers);

    let demand_coverage_percent = if total_demand_m3 > 0.0 {
        (harvestable_m3 / total_demand_m3 * 100.0).min(100.0).round()
    } else {
        0.0
    };

    let annual_cost_savings = harvestable_m3 * WATER_COST_PER_M3;
    let investment = total_investment(recommendations);
    let roi_years = if investment > 0.0 && annual_cost_savings > 0.0 {
        (investment / annual_cost_savings * 10.0).round() / 10.0
    } else {
        0.0
    };

    SavingsProjection {
        annual_runoff_m3,
        harvestable_m3,
        demand_coverage_percent,
        annual_cost_savings,
        roi_years,
    }
}
