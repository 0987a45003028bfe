use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use rainwise::workflows::assessment::{
    AgencyKind, AquiferType, EnvironmentalDataSource, GroundwaterObservation, GroundwaterQuality,
    LookupFailure, LookupSource, PartnerAgency, PartnerDirectory, RainfallIntensity,
    RainfallObservation, SubsidyScheme,
};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Long-run readings for one catalog region.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Region {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) annual_rainfall_mm: f64,
    pub(crate) monthly_rainfall_mm: [f64; 12],
    pub(crate) rainy_days: u32,
    pub(crate) groundwater_level_m: f64,
    pub(crate) recharge_rate_cm_per_year: f64,
    pub(crate) aquifer_type: AquiferType,
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl Region {
    /// Word offset of the earliest whole-word mention of the name or an alias.
    fn first_mention(&self, location: &[String]) -> Option<usize> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .filter_map(|phrase| {
                let phrase = words(phrase);
                if phrase.is_empty() {
                    return None;
                }
                location
                    .windows(phrase.len())
                    .position(|window| window == phrase.as_slice())
            })
            .min()
    }

    fn rainfall(&self) -> RainfallObservation {
        RainfallObservation {
            annual_rainfall_mm: self.annual_rainfall_mm,
            monthly_distribution: self.monthly_rainfall_mm,
            rainy_days: self.rainy_days,
            intensity: RainfallIntensity::from_annual_mm(self.annual_rainfall_mm),
        }
    }

    fn groundwater(&self) -> GroundwaterObservation {
        GroundwaterObservation {
            level_meters: self.groundwater_level_m,
            quality: GroundwaterQuality::from_depth(self.groundwater_level_m),
            recharge_rate_cm_per_year: self.recharge_rate_cm_per_year,
            aquifer_type: self.aquifer_type,
        }
    }
}

fn builtin_regions() -> Vec<Region> {
    vec![
        Region {
            name: "Chennai",
            aliases: &["madras"],
            annual_rainfall_mm: 1400.0,
            monthly_rainfall_mm: [
                25.0, 8.0, 4.0, 15.0, 45.0, 50.0, 90.0, 115.0, 120.0, 280.0, 350.0, 140.0,
            ],
            rainy_days: 60,
            groundwater_level_m: 12.5,
            recharge_rate_cm_per_year: 14.2,
            aquifer_type: AquiferType::Unconfined,
        },
        Region {
            name: "Bengaluru",
            aliases: &["bangalore"],
            annual_rainfall_mm: 970.0,
            monthly_rainfall_mm: [
                3.0, 7.0, 12.0, 45.0, 115.0, 85.0, 110.0, 135.0, 195.0, 180.0, 65.0, 20.0,
            ],
            rainy_days: 62,
            groundwater_level_m: 24.0,
            recharge_rate_cm_per_year: 9.8,
            aquifer_type: AquiferType::Confined,
        },
        Region {
            name: "Mumbai",
            aliases: &["bombay"],
            annual_rainfall_mm: 2400.0,
            monthly_rainfall_mm: [
                1.0, 1.0, 0.0, 1.0, 15.0, 520.0, 840.0, 580.0, 340.0, 90.0, 15.0, 5.0,
            ],
            rainy_days: 95,
            groundwater_level_m: 7.5,
            recharge_rate_cm_per_year: 21.0,
            aquifer_type: AquiferType::Unconfined,
        },
        Region {
            name: "Delhi",
            aliases: &["gurugram", "noida"],
            annual_rainfall_mm: 790.0,
            monthly_rainfall_mm: [
                19.0, 20.0, 15.0, 10.0, 30.0, 75.0, 210.0, 240.0, 125.0, 15.0, 5.0, 8.0,
            ],
            rainy_days: 40,
            groundwater_level_m: 28.5,
            recharge_rate_cm_per_year: 6.1,
            aquifer_type: AquiferType::Unconfined,
        },
        Region {
            name: "Jaipur",
            aliases: &["pink city"],
            annual_rainfall_mm: 560.0,
            monthly_rainfall_mm: [
                8.0, 7.0, 4.0, 4.0, 12.0, 60.0, 180.0, 170.0, 75.0, 10.0, 3.0, 3.0,
            ],
            rainy_days: 35,
            groundwater_level_m: 41.0,
            recharge_rate_cm_per_year: 4.3,
            aquifer_type: AquiferType::Confined,
        },
        Region {
            name: "Kolkata",
            aliases: &["calcutta"],
            annual_rainfall_mm: 1600.0,
            monthly_rainfall_mm: [
                10.0, 25.0, 35.0, 55.0, 130.0, 280.0, 350.0, 330.0, 300.0, 150.0, 20.0, 5.0,
            ],
            rainy_days: 80,
            groundwater_level_m: 8.2,
            recharge_rate_cm_per_year: 18.5,
            aquifer_type: AquiferType::Perched,
        },
    ]
}

/// Rainfall and groundwater served from the built-in regional catalog.
///
/// A location resolves when it mentions a region name or alias as whole words,
/// ignoring case, so "T. Nagar, Chennai" and "madras" both land on Chennai.
/// When several regions are mentioned the one named first wins.
#[derive(Debug, Clone)]
pub(crate) struct RegionalEnvironmentalData {
    regions: Arc<Vec<Region>>,
}

impl Default for RegionalEnvironmentalData {
    fn default() -> Self {
        Self {
            regions: Arc::new(builtin_regions()),
        }
    }
}

impl RegionalEnvironmentalData {
    pub(crate) fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub(crate) fn resolve(&self, location: &str) -> Option<&Region> {
        let location = words(location);
        self.regions
            .iter()
            .filter_map(|region| region.first_mention(&location).map(|at| (at, region)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, region)| region)
    }

    fn lookup(&self, provider: LookupSource, location: &str) -> Result<&Region, LookupFailure> {
        self.resolve(location)
            .ok_or_else(|| LookupFailure::UnresolvedLocation {
                provider,
                location: location.to_string(),
            })
    }
}

#[async_trait]
impl EnvironmentalDataSource for RegionalEnvironmentalData {
    async fn fetch_rainfall(&self, location: &str) -> Result<RainfallObservation, LookupFailure> {
        self.lookup(LookupSource::Rainfall, location)
            .map(Region::rainfall)
    }

    async fn fetch_groundwater(
        &self,
        location: &str,
    ) -> Result<GroundwaterObservation, LookupFailure> {
        self.lookup(LookupSource::Groundwater, location)
            .map(Region::groundwater)
    }
}

/// Fixed directory of certified installers and subsidy programmes.
#[derive(Debug, Clone, Default)]
pub(crate) struct StaticPartnerDirectory;

#[allow(clippy::too_many_arguments)]
fn agency(
    id: &str,
    name: &str,
    kind: AgencyKind,
    rating: f32,
    contact: &str,
    location: &str,
    specializations: &[&str],
    distance_km: f64,
) -> PartnerAgency {
    PartnerAgency {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        rating,
        contact: contact.to_string(),
        location: location.to_string(),
        specializations: specializations.iter().map(ToString::to_string).collect(),
        distance_km,
    }
}

fn scheme(
    id: &str,
    name: &str,
    subsidy_percent: u8,
    eligibility_criteria: &[&str],
    application_url: &str,
    description: &str,
) -> SubsidyScheme {
    SubsidyScheme {
        id: id.to_string(),
        name: name.to_string(),
        subsidy_percent,
        eligibility_criteria: eligibility_criteria.iter().map(ToString::to_string).collect(),
        application_url: application_url.to_string(),
        description: description.to_string(),
    }
}

#[async_trait]
impl PartnerDirectory for StaticPartnerDirectory {
    async fn fetch_agencies(&self, _location: &str) -> Result<Vec<PartnerAgency>, LookupFailure> {
        let mut agencies = vec![
            agency(
                "3",
                "AquaTech Engineers",
                AgencyKind::Contractor,
                4.9,
                "+91-9876543212",
                "Within 10km",
                &["Large Scale", "Commercial"],
                9.1,
            ),
            agency(
                "1",
                "EcoWater Solutions",
                AgencyKind::Contractor,
                4.8,
                "+91-9876543210",
                "Within 5km",
                &["Residential RWH", "Maintenance"],
                3.2,
            ),
            agency(
                "2",
                "Green Earth Foundation",
                AgencyKind::Ngo,
                4.6,
                "+91-9876543211",
                "Within 8km",
                &["Community Projects", "Training"],
                6.8,
            ),
        ];

        agencies.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(agencies)
    }

    async fn fetch_schemes(&self, _location: &str) -> Result<Vec<SubsidyScheme>, LookupFailure> {
        Ok(vec![
            scheme(
                "1",
                "Jal Shakti Abhiyan - RWH Subsidy",
                50,
                &["Residential Buildings", "Plot Area > 100 sqm"],
                "https://jalshakti.gov.in/rwh-subsidy",
                "Up to ₹50,000 subsidy for rainwater harvesting systems",
            ),
            scheme(
                "2",
                "State Water Conservation Scheme",
                75,
                &["Rural Areas", "BPL Families"],
                "https://state-water.gov.in/conservation",
                "Enhanced subsidy for rural and economically weaker sections",
            ),
            scheme(
                "3",
                "Municipal RWH Incentive",
                30,
                &["Urban Areas", "Property Tax Payers"],
                "https://municipal.gov.in/rwh-incentive",
                "Property tax rebate and installation incentives",
            ),
        ])
    }
}
