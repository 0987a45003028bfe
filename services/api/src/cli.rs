use crate::infra::{RegionalEnvironmentalData, StaticPartnerDirectory};
use crate::report::render_assessment;
use crate::server;
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use rainwise::config::AppConfig;
use rainwise::error::AppError;
use rainwise::workflows::assessment::{
    validate, AssessmentResponse, AssessmentService, BuildingType, SoilType, SurveySubmission,
    WaterSource,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "rainwise",
    about = "Assess rooftop rainwater harvesting potential and serve the assessment API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one assessment against the bundled regional catalog
    Assess(AssessArgs),
    /// List the regions the bundled catalog can resolve
    Regions,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// City or neighbourhood, e.g. "Adyar, Chennai"
    #[arg(long)]
    pub(crate) location: String,
    /// Roof catchment area in m²
    #[arg(long)]
    pub(crate) roof_area: f64,
    /// Unpaved open space in m²
    #[arg(long, default_value_t = 0.0)]
    pub(crate) open_space: f64,
    /// Number of people living on the site
    #[arg(long)]
    pub(crate) dwellers: u32,
    /// residential, commercial or institutional
    #[arg(long, default_value = "residential", value_parser = parse_choice::<BuildingType>)]
    pub(crate) building_type: BuildingType,
    /// clayey, sandy, rocky or mixed
    #[arg(long, default_value = "mixed", value_parser = parse_choice::<SoilType>)]
    pub(crate) soil_type: SoilType,
    /// municipal, borewell, both or none
    #[arg(long, default_value = "municipal", value_parser = parse_choice::<WaterSource>)]
    pub(crate) water_source: WaterSource,
    /// Print the JSON response instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

/// Parse a snake_case choice using the type's own serde names.
pub(crate) fn parse_choice<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("'{raw}' is not a recognised option"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assessment(args).await,
        Command::Regions => {
            list_regions();
            Ok(())
        }
    }
}

async fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let json = args.json;

    let survey = validate(SurveySubmission {
        location: args.location,
        coordinates: None,
        roof_area: Some(args.roof_area),
        open_space: Some(args.open_space),
        dwellers: Some(args.dwellers),
        building_type: args.building_type,
        soil_type: args.soil_type,
        water_source: args.water_source,
    })?;

    let service = AssessmentService::new(
        Arc::new(RegionalEnvironmentalData::default()),
        Arc::new(StaticPartnerDirectory),
        config.assessment,
    );
    let bundle = service.run(&survey).await?;

    if json {
        let response = AssessmentResponse {
            location: survey.location.clone(),
            generated_at: Utc::now(),
            bundle,
        };
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_assessment(&survey, &bundle, Local::now()));
    }

    Ok(())
}

fn list_regions() {
    let catalog = RegionalEnvironmentalData::default();
    println!("Catalog regions");
    for region in catalog.regions() {
        let aliases = if region.aliases.is_empty() {
            String::new()
        } else {
            format!(" (also: {})", region.aliases.join(", "))
        };
        println!(
            "- {}{}: {} mm/year, groundwater at {} m",
            region.name, aliases, region.annual_rainfall_mm, region.groundwater_level_m
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_choices_case_insensitively() {
        assert_eq!(
            parse_choice::<BuildingType>("Commercial"),
            Ok(BuildingType::Commercial)
        );
        assert_eq!(parse_choice::<SoilType>(" sandy "), Ok(SoilType::Sandy));
        assert_eq!(parse_choice::<WaterSource>("none"), Ok(WaterSource::None));
        assert!(parse_choice::<SoilType>("peat").is_err());
    }

    #[test]
    fn assess_command_parses_flags() {
        let cli = Cli::try_parse_from([
            "rainwise",
            "assess",
            "--location",
            "Chennai",
            "--roof-area",
            "150",
            "--open-space",
            "50",
            "--dwellers",
            "4",
            "--soil-type",
            "sandy",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.location, "Chennai");
                assert_eq!(args.roof_area, 150.0);
                assert_eq!(args.dwellers, 4);
                assert_eq!(args.building_type, BuildingType::Residential);
                assert_eq!(args.soil_type, SoilType::Sandy);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
