use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use super::domain::{GroundwaterObservation, PartnerAgency, RainfallObservation, SubsidyScheme};

/// The four lookups an assessment waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Rainfall,
    Groundwater,
    Agencies,
    Schemes,
}

impl LookupSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rainfall => "rainfall",
            Self::Groundwater => "groundwater",
            Self::Agencies => "certified agencies",
            Self::Schemes => "subsidy schemes",
        }
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A provider could not answer for the requested location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    #[error("{provider} lookup could not resolve location '{location}'")]
    UnresolvedLocation {
        provider: LookupSource,
        location: String,
    },
    #[error("{provider} lookup timed out after {after_ms} ms")]
    TimedOut { provider: LookupSource, after_ms: u64 },
    #[error("{provider} provider unavailable: {reason}")]
    Unavailable {
        provider: LookupSource,
        reason: String,
    },
}

impl LookupFailure {
    pub fn provider(&self) -> LookupSource {
        match self {
            Self::UnresolvedLocation { provider, .. }
            | Self::TimedOut { provider, .. }
            | Self::Unavailable { provider, .. } => *provider,
        }
    }
}

/// Rainfall and groundwater observations keyed by a free-text location.
#[async_trait]
pub trait EnvironmentalDataSource: Send + Sync {
    async fn fetch_rainfall(&self, location: &str) -> Result<RainfallObservation, LookupFailure>;
    async fn fetch_groundwater(
        &self,
        location: &str,
    ) -> Result<GroundwaterObservation, LookupFailure>;
}

/// Directory of implementation partners and subsidy programmes.
#[async_trait]
pub trait PartnerDirectory: Send + Sync {
    /// Agencies nearest first.
    async fn fetch_agencies(&self, location: &str) -> Result<Vec<PartnerAgency>, LookupFailure>;
    async fn fetch_schemes(&self, location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure>;
}
