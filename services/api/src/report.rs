use chrono::{DateTime, Local};
use rainwise::workflows::assessment::{
    AssessmentBundle, SiteSurvey, StructureDimensions, StructureRecommendation,
};
use std::fmt::Write;

/// Plain-text assessment summary for terminal output.
pub(crate) fn render_assessment(
    survey: &SiteSurvey,
    bundle: &AssessmentBundle,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_assessment(&mut out, survey, bundle, generated_at);
    out
}

fn write_assessment(
    out: &mut String,
    survey: &SiteSurvey,
    bundle: &AssessmentBundle,
    generated_at: DateTime<Local>,
) -> std::fmt::Result {
    let savings = &bundle.savings;

    writeln!(out, "Rainwater harvesting assessment: {}", survey.location)?;
    writeln!(out, "Generated {}", generated_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(
        out,
        "Site: {} m² roof, {} m² open space, {} dwellers ({}, {}, {})",
        survey.roof_area,
        survey.open_space,
        survey.dwellers,
        survey.building_type.label(),
        survey.soil_type.label(),
        survey.water_source.label()
    )?;

    writeln!(out, "\nKey metrics")?;
    writeln!(out, "- Annual runoff: {} m³", savings.annual_runoff_m3)?;
    writeln!(out, "- Harvestable: {} m³", savings.harvestable_m3)?;
    writeln!(
        out,
        "- Household demand covered: {}%",
        savings.demand_coverage_percent
    )?;
    writeln!(
        out,
        "- Annual savings: ₹{:.0}",
        savings.annual_cost_savings
    )?;
    if savings.roi_years > 0.0 {
        writeln!(out, "- Payback period: {:.1} years", savings.roi_years)?;
    } else {
        writeln!(out, "- Payback period: n/a")?;
    }

    let rainfall = &bundle.rainfall;
    let groundwater = &bundle.groundwater;
    writeln!(out, "\nEnvironment")?;
    writeln!(
        out,
        "- Rainfall: {} mm/year over {} rainy days ({} intensity)",
        rainfall.annual_rainfall_mm,
        rainfall.rainy_days,
        rainfall.intensity.label()
    )?;
    writeln!(
        out,
        "- Groundwater: {} m deep, {} quality, {} aquifer, recharge {} cm/year",
        groundwater.level_meters,
        groundwater.quality.label(),
        groundwater.aquifer_type.label(),
        groundwater.recharge_rate_cm_per_year
    )?;

    writeln!(out, "\nRecommended structures")?;
    for (rank, recommendation) in bundle.recommendations.iter().enumerate() {
        write_recommendation(out, rank + 1, recommendation)?;
    }
    if bundle.recommendations.len() == 1 {
        writeln!(out, "  (no open space for recharge structures)")?;
    }

    if bundle.agencies.is_empty() {
        writeln!(out, "\nCertified agencies: none nearby")?;
    } else {
        writeln!(out, "\nCertified agencies")?;
        for agency in &bundle.agencies {
            writeln!(
                out,
                "- {} ({}), {:.1} km, rated {:.1}, {}",
                agency.name,
                agency.kind.label(),
                agency.distance_km,
                agency.rating,
                agency.contact
            )?;
        }
    }

    if bundle.schemes.is_empty() {
        writeln!(out, "\nSubsidy schemes: none")?;
    } else {
        writeln!(out, "\nSubsidy schemes")?;
        for scheme in &bundle.schemes {
            writeln!(
                out,
                "- {}: {}% ({}) {}",
                scheme.name,
                scheme.subsidy_percent,
                scheme.eligibility_criteria.join(", "),
                scheme.application_url
            )?;
        }
    }

    Ok(())
}

fn write_recommendation(
    out: &mut String,
    rank: usize,
    recommendation: &StructureRecommendation,
) -> std::fmt::Result {
    let dimensions = match recommendation.dimensions {
        StructureDimensions::Rectangular {
            length,
            width,
            depth,
        } => format!("{length} x {width} x {depth}"),
        StructureDimensions::Cylindrical { diameter, depth } => {
            format!("diameter {diameter}, depth {depth}")
        }
        StructureDimensions::DepthOnly { depth } => format!("depth {depth}"),
    };

    writeln!(
        out,
        "{}. {} [{}% suitable{}]",
        rank,
        recommendation.name,
        recommendation.suitability_percent,
        if recommendation.diy_friendly {
            ", DIY friendly"
        } else {
            ""
        }
    )?;
    writeln!(
        out,
        "   capacity {}, dimensions {}, cost ₹{:.0} (material ₹{:.0}, labor ₹{:.0})",
        recommendation.capacity_liters,
        dimensions,
        recommendation.cost.total,
        recommendation.cost.material,
        recommendation.cost.labor
    )?;
    writeln!(out, "   {}", recommendation.description)
}
