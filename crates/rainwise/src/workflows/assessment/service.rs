use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::config::AssessmentConfig;

use super::domain::{AssessmentBundle, SavingsProjection, SiteSurvey};
use super::estimates::estimate_annual_runoff;
use super::providers::{EnvironmentalDataSource, LookupFailure, LookupSource, PartnerDirectory};
use super::savings::project;
use super::structures::recommend;

/// Orchestrates the four provider lookups and the calculation pipeline.
pub struct AssessmentService<E, D> {
    environment: Arc<E>,
    directory: Arc<D>,
    config: AssessmentConfig,
    sessions: AssessmentSessions,
}

impl<E, D> AssessmentService<E, D>
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    pub fn new(environment: Arc<E>, directory: Arc<D>, config: AssessmentConfig) -> Self {
        Self {
            environment,
            directory,
            config,
            sessions: AssessmentSessions::new(),
        }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn sessions(&self) -> &AssessmentSessions {
        &self.sessions
    }

    /// Run one assessment. Any lookup failure aborts the whole run; no bundle
    /// is ever assembled from a subset of the lookups.
    pub async fn run(&self, survey: &SiteSurvey) -> Result<AssessmentBundle, AssessmentError> {
        let location = survey.location.as_str();
        info!(%location, dwellers = survey.dwellers, "starting assessment");

        let joined = tokio::try_join!(
            self.bounded(
                LookupSource::Rainfall,
                self.environment.fetch_rainfall(location)
            ),
            self.bounded(
                LookupSource::Groundwater,
                self.environment.fetch_groundwater(location)
            ),
            self.bounded(
                LookupSource::Agencies,
                self.directory.fetch_agencies(location)
            ),
            self.bounded(
                LookupSource::Schemes,
                self.directory.fetch_schemes(location)
            ),
        );

        let (rainfall, groundwater, agencies, schemes) = match joined {
            Ok(results) => results,
            Err(failure) => {
                warn!(%location, provider = %failure.provider(), error = %failure, "assessment aborted");
                return Err(failure.into());
            }
        };

        let runoff_m3 = estimate_annual_runoff(survey, &rainfall);
        let recommendations = recommend(survey, runoff_m3);
        let savings = project(survey, &rainfall, &recommendations);
        verify_projection(&savings)?;

        info!(
            %location,
            runoff_m3,
            structures = recommendations.len(),
            coverage = savings.demand_coverage_percent,
            roi_years = savings.roi_years,
            "assessment complete"
        );

        Ok(AssessmentBundle {
            rainfall,
            groundwater,
            recommendations,
            savings,
            agencies,
            schemes,
        })
    }

    /// Run an assessment on behalf of a session; if a newer run was started in
    /// the same session, or the session was released, before this one
    /// finished, the result is discarded.
    pub async fn run_in_session(
        &self,
        session_id: &str,
        survey: &SiteSurvey,
    ) -> Result<AssessmentBundle, AssessmentError> {
        let ticket = self.sessions.issue(session_id);
        let outcome = self.run(survey).await;

        if !self.sessions.complete(&ticket) {
            debug!(session_id, issued = ticket.issued, "discarding superseded assessment");
            return Err(AssessmentError::Superseded);
        }

        outcome
    }

    async fn bounded<T, F>(&self, provider: LookupSource, lookup: F) -> Result<T, LookupFailure>
    where
        F: Future<Output = Result<T, LookupFailure>>,
    {
        let limit = self.config.lookup_timeout;
        match tokio::time::timeout(limit, lookup).await {
            Ok(result) => result,
            Err(_) => Err(LookupFailure::TimedOut {
                provider,
                after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

fn verify_projection(savings: &SavingsProjection) -> Result<(), AssessmentError> {
    let figures = [
        ("annual_runoff_m3", savings.annual_runoff_m3),
        ("harvestable_m3", savings.harvestable_m3),
        ("demand_coverage_percent", savings.demand_coverage_percent),
        ("annual_cost_savings", savings.annual_cost_savings),
        ("roi_years", savings.roi_years),
    ];

    if let Some((name, value)) = figures
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(AssessmentError::Computation(format!(
            "{name} evaluated to {value}"
        )));
    }

    if savings.harvestable_m3 > savings.annual_runoff_m3 {
        return Err(AssessmentError::Computation(format!(
            "harvestable volume {} exceeds runoff {}",
            savings.harvestable_m3, savings.annual_runoff_m3
        )));
    }

    Ok(())
}

/// Latest generation issued per session, so only the newest run is applied.
///
/// Generations come from one registry-wide counter, so a ticket issued before
/// a release can never match one issued after it. Entries are dropped as soon
/// as their latest run completes.
#[derive(Debug, Default)]
pub struct AssessmentSessions {
    next_generation: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl AssessmentSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn latest(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new run for `session_id`, superseding any run still in flight.
    pub fn issue(&self, session_id: &str) -> SessionTicket {
        let mut latest = self.latest();
        let issued = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        latest.insert(session_id.to_string(), issued);

        SessionTicket {
            session_id: session_id.to_string(),
            issued,
        }
    }

    /// True while no newer run was issued and the session was not released.
    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        self.latest().get(&ticket.session_id) == Some(&ticket.issued)
    }

    /// Retire a finished run. Returns whether it was still the latest one; the
    /// session entry is removed only in that case.
    pub fn complete(&self, ticket: &SessionTicket) -> bool {
        let mut latest = self.latest();
        if latest.get(&ticket.session_id) == Some(&ticket.issued) {
            latest.remove(&ticket.session_id);
            true
        } else {
            false
        }
    }

    /// Drop a session the client has closed; any run still in flight for it
    /// is discarded when it finishes.
    pub fn release(&self, session_id: &str) -> bool {
        self.latest().remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.latest().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    session_id: String,
    issued: u64,
}

impl SessionTicket {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn generation(&self) -> u64 {
        self.issued
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("unable to complete assessment for this location: {0}")]
    Lookup(#[from] LookupFailure),
    #[error("assessment produced an invalid result: {0}")]
    Computation(String),
    #[error("assessment superseded by a newer request in the same session")]
    Superseded,
}
