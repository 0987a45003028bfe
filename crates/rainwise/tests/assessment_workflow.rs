use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use rainwise::config::AssessmentConfig;
use rainwise::workflows::assessment::{
    assessment_router, estimate_annual_demand, estimate_annual_runoff, project, recommend,
    validate, AgencyKind, AquiferType, AssessmentError, AssessmentService, BuildingType,
    EnvironmentalDataSource, GroundwaterObservation, GroundwaterQuality, LookupFailure,
    LookupSource, PartnerAgency, PartnerDirectory, RainfallIntensity, RainfallObservation,
    SoilType, StructureKind, SubsidyScheme, SurveySubmission, WaterSource,
};
use serde_json::Value;
use tower::ServiceExt;

/// Two cities with fixed readings; anything else is unknown.
struct Catalog;

#[async_trait]
impl EnvironmentalDataSource for Catalog {
    async fn fetch_rainfall(&self, location: &str) -> Result<RainfallObservation, LookupFailure> {
        let annual_rainfall_mm = match location {
            "Chennai" => 1000.0,
            "Jaipur" => 560.0,
            other => {
                return Err(LookupFailure::UnresolvedLocation {
                    provider: LookupSource::Rainfall,
                    location: other.to_string(),
                })
            }
        };

        Ok(RainfallObservation {
            annual_rainfall_mm,
            monthly_distribution: [annual_rainfall_mm / 12.0; 12],
            rainy_days: 60,
            intensity: RainfallIntensity::from_annual_mm(annual_rainfall_mm),
        })
    }

    async fn fetch_groundwater(
        &self,
        _location: &str,
    ) -> Result<GroundwaterObservation, LookupFailure> {
        Ok(GroundwaterObservation {
            level_meters: 18.0,
            quality: GroundwaterQuality::from_depth(18.0),
            recharge_rate_cm_per_year: 9.5,
            aquifer_type: AquiferType::Unconfined,
        })
    }
}

struct Directory;

#[async_trait]
impl PartnerDirectory for Directory {
    async fn fetch_agencies(&self, _location: &str) -> Result<Vec<PartnerAgency>, LookupFailure> {
        Ok(vec![PartnerAgency {
            id: "3".to_string(),
            name: "State Water Board".to_string(),
            kind: AgencyKind::Government,
            rating: 4.2,
            contact: "1800-123-4567".to_string(),
            location: "District Office".to_string(),
            specializations: vec!["Subsidies".to_string()],
            distance_km: 15.0,
        }])
    }

    async fn fetch_schemes(&self, _location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure> {
        Ok(Vec::new())
    }
}

fn service() -> AssessmentService<Catalog, Directory> {
    AssessmentService::new(
        Arc::new(Catalog),
        Arc::new(Directory),
        AssessmentConfig {
            lookup_timeout: Duration::from_secs(1),
        },
    )
}

fn submission(location: &str) -> SurveySubmission {
    SurveySubmission {
        location: location.to_string(),
        roof_area: Some(150.0),
        open_space: Some(50.0),
        dwellers: Some(4),
        building_type: BuildingType::Residential,
        soil_type: SoilType::Sandy,
        water_source: WaterSource::Borewell,
        ..SurveySubmission::default()
    }
}

#[tokio::test]
async fn chennai_household_gets_full_assessment() {
    let survey = validate(submission("Chennai")).expect("valid survey");
    let bundle = service().run(&survey).await.expect("assessment");

    let kinds: Vec<_> = bundle.recommendations.iter().map(|rec| rec.kind).collect();
    assert_eq!(
        kinds,
        vec![StructureKind::Tank, StructureKind::SoakPit, StructureKind::Trench]
    );
    assert_eq!(bundle.savings.annual_runoff_m3, 102.0);
    assert_eq!(bundle.savings.harvestable_m3, 87.0);
    assert_eq!(bundle.savings.demand_coverage_percent, 44.0);
    assert_eq!(bundle.savings.annual_cost_savings, 2610.0);
    assert_eq!(bundle.savings.roi_years, 2.1);
    assert_eq!(bundle.groundwater.quality, GroundwaterQuality::Good);
    assert!(bundle.schemes.is_empty());
}

#[tokio::test]
async fn pipeline_functions_agree_with_service() {
    let survey = validate(submission("Jaipur")).expect("valid survey");
    let rainfall = Catalog.fetch_rainfall("Jaipur").await.expect("rainfall");

    let runoff = estimate_annual_runoff(&survey, &rainfall);
    let recommendations = recommend(&survey, runoff);
    let savings = project(&survey, &rainfall, &recommendations);

    let bundle = service().run(&survey).await.expect("assessment");
    assert_eq!(bundle.recommendations, recommendations);
    assert_eq!(bundle.savings, savings);
    assert_eq!(estimate_annual_demand(survey.dwellers), 197.0);
}

#[tokio::test]
async fn unknown_location_fails_without_partial_results() {
    let survey = validate(submission("Atlantis")).expect("valid survey");
    let err = service().run(&survey).await.expect_err("unknown location");

    assert!(matches!(
        err,
        AssessmentError::Lookup(LookupFailure::UnresolvedLocation {
            provider: LookupSource::Rainfall,
            ..
        })
    ));
}

#[tokio::test]
async fn http_round_trip_serves_assessment() {
    let router = assessment_router(Arc::new(service()));
    let body = serde_json::to_vec(&submission("Chennai")).expect("encode");

    let response = router
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(payload["location"], "Chennai");
    assert_eq!(payload["agencies"][0]["kind"], "government");
    assert_eq!(payload["rainfall"]["intensity"], "medium");
}
