use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::config::AssessmentConfig;
use crate::workflows::assessment::domain::{
    AgencyKind, AquiferType, BuildingType, GroundwaterObservation, GroundwaterQuality,
    PartnerAgency, RainfallIntensity, RainfallObservation, SiteSurvey, SoilType, SubsidyScheme,
    WaterSource,
};
use crate::workflows::assessment::intake::SurveySubmission;
use crate::workflows::assessment::providers::{
    EnvironmentalDataSource, LookupFailure, LookupSource, PartnerDirectory,
};
use crate::workflows::assessment::service::AssessmentService;

/// Residential, sandy-soil site used throughout the worked example.
pub(super) fn survey() -> SiteSurvey {
    SiteSurvey {
        location: "Chennai".to_string(),
        coordinates: None,
        roof_area: 150.0,
        open_space: 50.0,
        dwellers: 4,
        building_type: BuildingType::Residential,
        soil_type: SoilType::Sandy,
        water_source: WaterSource::Municipal,
    }
}

pub(super) fn survey_with_open_space(open_space: f64) -> SiteSurvey {
    SiteSurvey {
        open_space,
        ..survey()
    }
}

pub(super) fn submission() -> SurveySubmission {
    SurveySubmission {
        location: "  Chennai ".to_string(),
        coordinates: None,
        roof_area: Some(150.0),
        open_space: Some(50.0),
        dwellers: Some(4),
        building_type: BuildingType::Residential,
        soil_type: SoilType::Sandy,
        water_source: WaterSource::Municipal,
    }
}

pub(super) fn rainfall(annual_rainfall_mm: f64) -> RainfallObservation {
    RainfallObservation {
        annual_rainfall_mm,
        monthly_distribution: [
            20.0, 10.0, 15.0, 25.0, 50.0, 60.0, 90.0, 120.0, 130.0, 250.0, 300.0, 150.0,
        ],
        rainy_days: 72,
        intensity: RainfallIntensity::from_annual_mm(annual_rainfall_mm),
    }
}

pub(super) fn groundwater() -> GroundwaterObservation {
    GroundwaterObservation {
        level_meters: 12.5,
        quality: GroundwaterQuality::from_depth(12.5),
        recharge_rate_cm_per_year: 14.2,
        aquifer_type: AquiferType::Unconfined,
    }
}

pub(super) fn agencies() -> Vec<PartnerAgency> {
    vec![
        PartnerAgency {
            id: "1".to_string(),
            name: "EcoWater Solutions".to_string(),
            kind: AgencyKind::Contractor,
            rating: 4.8,
            contact: "+91-9876543210".to_string(),
            location: "Within 5km".to_string(),
            specializations: vec!["Residential RWH".to_string(), "Maintenance".to_string()],
            distance_km: 3.2,
        },
        PartnerAgency {
            id: "2".to_string(),
            name: "Green Earth Foundation".to_string(),
            kind: AgencyKind::Ngo,
            rating: 4.6,
            contact: "+91-9876543211".to_string(),
            location: "Within 8km".to_string(),
            specializations: vec!["Community Projects".to_string(), "Training".to_string()],
            distance_km: 6.8,
        },
    ]
}

pub(super) fn schemes() -> Vec<SubsidyScheme> {
    vec![SubsidyScheme {
        id: "1".to_string(),
        name: "Municipal RWH Incentive".to_string(),
        subsidy_percent: 30,
        eligibility_criteria: vec!["Urban Areas".to_string()],
        application_url: "https://municipal.gov.in/rwh-incentive".to_string(),
        description: "Property tax rebate and installation incentives".to_string(),
    }]
}

/// Environment provider answering every location with the same readings,
/// optionally after a per-location delay.
pub(super) struct FixedEnvironment {
    annual_rainfall_mm: f64,
    delays: HashMap<String, Duration>,
}

impl FixedEnvironment {
    pub(super) fn new(annual_rainfall_mm: f64) -> Self {
        Self {
            annual_rainfall_mm,
            delays: HashMap::new(),
        }
    }

    pub(super) fn with_delay(mut self, location: &str, delay: Duration) -> Self {
        self.delays.insert(location.to_string(), delay);
        self
    }

    async fn pause_for(&self, location: &str) {
        if let Some(delay) = self.delays.get(location) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl EnvironmentalDataSource for FixedEnvironment {
    async fn fetch_rainfall(&self, location: &str) -> Result<RainfallObservation, LookupFailure> {
        self.pause_for(location).await;
        Ok(rainfall(self.annual_rainfall_mm))
    }

    async fn fetch_groundwater(
        &self,
        location: &str,
    ) -> Result<GroundwaterObservation, LookupFailure> {
        self.pause_for(location).await;
        Ok(groundwater())
    }
}

/// Resolves groundwater but never rainfall.
pub(super) struct UnresolvedRainfall;

#[async_trait]
impl EnvironmentalDataSource for UnresolvedRainfall {
    async fn fetch_rainfall(&self, location: &str) -> Result<RainfallObservation, LookupFailure> {
        Err(LookupFailure::UnresolvedLocation {
            provider: LookupSource::Rainfall,
            location: location.to_string(),
        })
    }

    async fn fetch_groundwater(
        &self,
        _location: &str,
    ) -> Result<GroundwaterObservation, LookupFailure> {
        Ok(groundwater())
    }
}

pub(super) struct FixedDirectory;

#[async_trait]
impl PartnerDirectory for FixedDirectory {
    async fn fetch_agencies(&self, _location: &str) -> Result<Vec<PartnerAgency>, LookupFailure> {
        Ok(agencies())
    }

    async fn fetch_schemes(&self, _location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure> {
        Ok(schemes())
    }
}

/// Agencies resolve, the scheme registry is down.
pub(super) struct OfflineSchemes;

#[async_trait]
impl PartnerDirectory for OfflineSchemes {
    async fn fetch_agencies(&self, _location: &str) -> Result<Vec<PartnerAgency>, LookupFailure> {
        Ok(agencies())
    }

    async fn fetch_schemes(&self, _location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure> {
        Err(LookupFailure::Unavailable {
            provider: LookupSource::Schemes,
            reason: "registry offline".to_string(),
        })
    }
}

/// Never answers within any reasonable timeout.
pub(super) struct StalledDirectory;

#[async_trait]
impl PartnerDirectory for StalledDirectory {
    async fn fetch_agencies(&self, _location: &str) -> Result<Vec<PartnerAgency>, LookupFailure> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(agencies())
    }

    async fn fetch_schemes(&self, _location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure> {
        Ok(schemes())
    }
}

pub(super) fn build_service<E, D>(environment: E, directory: D) -> AssessmentService<E, D>
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    AssessmentService::new(
        Arc::new(environment),
        Arc::new(directory),
        AssessmentConfig::default(),
    )
}

pub(super) fn fixed_service() -> AssessmentService<FixedEnvironment, FixedDirectory> {
    build_service(FixedEnvironment::new(1000.0), FixedDirectory)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
