//! Rainwater harvesting assessment: survey intake, the deterministic
//! runoff / structure / savings pipeline, and the orchestrator that gathers
//! environmental and directory data for it.

pub mod domain;
pub mod estimates;
pub mod intake;
pub mod providers;
pub mod router;
pub mod savings;
pub mod service;
pub mod structures;

#[cfg(test)]
mod tests;

pub use domain::{
    AgencyKind, AquiferType, AssessmentBundle, BuildingType, Coordinates, Geometry,
    GroundwaterObservation, GroundwaterQuality, PartnerAgency, RainfallIntensity,
    RainfallObservation, SavingsProjection, SiteSurvey, SoilType, StructureCost,
    StructureDimensions, StructureKind, StructureRecommendation, SubsidyScheme, WaterSource,
};
pub use estimates::{estimate_annual_demand, estimate_annual_runoff};
pub use intake::{validate, FieldViolation, SurveySubmission, ValidationFailure};
pub use providers::{EnvironmentalDataSource, LookupFailure, LookupSource, PartnerDirectory};
pub use router::{assessment_router, AssessmentRequest, AssessmentResponse};
pub use savings::{project, total_investment};
pub use service::{AssessmentError, AssessmentService, AssessmentSessions, SessionTicket};
pub use structures::recommend;
