use crate::client::traits::SearchTransport;
use crate::client::types::SearchQuery;
use crate::error::{Result, SearchError};
use crate::models::{
    ComparisonMetrics, FactorGroup, Listing, Price, ResultPage, ScoreBreakdown, SuburbMetrics,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const STREETS: [&str; 8] = [
    "Beach Street",
    "Park Road",
    "Hill Avenue",
    "Garden Drive",
    "River Lane",
    "Maple Terrace",
    "Crown Place",
    "Victoria Court",
];

const PROPERTY_TYPES: [&str; 5] = ["House", "Apartment", "Townhouse", "Unit", "Villa"];

/// In-memory backend serving a fixed listing set with the endpoint's pagination rules
pub struct FixtureTransport {
    suburb: String,
    metrics: SuburbMetrics,
    listings: Vec<Listing>,
    fail_next: Mutex<Option<SearchError>>,
    requests: Mutex<Vec<SearchQuery>>,
}

impl FixtureTransport {
    pub fn new(suburb: &str, metrics: SuburbMetrics, listings: Vec<Listing>) -> Self {
        Self {
            suburb: suburb.to_string(),
            metrics,
            listings,
            fail_next: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Demo data set used when no endpoint is configured
    pub fn demo(suburb: &str, count: usize) -> Self {
        info!("📋 Generating {} demo listings for {}", count, suburb);
        let metrics = SuburbMetrics {
            suburb_score: 82.0,
            walkability: 74.0,
            population_growth: 3.4,
        };
        let listings = (0..count).map(|i| demo_listing(suburb, i)).collect();
        Self::new(suburb, metrics, listings)
    }

    /// Make the next request fail with `error`
    pub fn fail_next(&self, error: SearchError) {
        *lock(&self.fail_next) = Some(error);
    }

    /// Queries received so far, oldest first
    pub fn requests(&self) -> Vec<SearchQuery> {
        lock(&self.requests).clone()
    }

    fn page(&self, query: &SearchQuery) -> ResultPage {
        let total = self.listings.len();
        let start = query.offset.min(total);
        let end = query.offset.saturating_add(query.limit).min(total);
        let listings = self.listings[start..end].to_vec();

        ResultPage {
            suburb: query.term.clone(),
            suburb_metrics: self.metrics.clone(),
            count: listings.len(),
            listings,
            total: total as u64,
            offset: query.offset,
            limit: query.limit,
            has_more: query.offset.saturating_add(query.limit) < total,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SearchTransport for FixtureTransport {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<ResultPage> {
        lock(&self.requests).push(query.clone());

        if let Some(err) = lock(&self.fail_next).take() {
            debug!("Fixture failing request for '{}': {}", query.term, err);
            return Err(err);
        }

        if !query.term.eq_ignore_ascii_case(&self.suburb) {
            return Ok(ResultPage {
                suburb: query.term.clone(),
                suburb_metrics: self.metrics.clone(),
                listings: Vec::new(),
                count: 0,
                total: 0,
                offset: query.offset,
                limit: query.limit,
                has_more: false,
            });
        }

        Ok(self.page(query))
    }

    fn source_name(&self) -> &'static str {
        "Fixture"
    }
}

/// Deterministic listing for demos and tests. Scores descend with `index`.
pub fn demo_listing(suburb: &str, index: usize) -> Listing {
    let property_type = PROPERTY_TYPES[index % PROPERTY_TYPES.len()];
    let bedrooms = 1 + (index % 4) as u32;
    let price = 550_000.0 + (index as f64 * 37_500.0);
    let score = (91.0 - index as f64 * 2.5).max(20.0);

    let address = match property_type {
        "Apartment" | "Unit" => format!(
            "Unit {}/{} {}, {}",
            index % 12 + 1,
            20 + index * 3,
            STREETS[index % STREETS.len()],
            suburb
        ),
        _ => format!("{} {}, {}", 10 + index * 7, STREETS[index % STREETS.len()], suburb),
    };

    Listing {
        address,
        price: Some(Price::Amount(price)),
        bedrooms,
        bathrooms: bedrooms.min(2),
        parking_spaces: (index % 3) as u32,
        internal_area: 70.0 + (index % 6) as f64 * 25.0,
        land_size: None,
        property_type: property_type.to_string(),
        days_on_market: 3 + (index as u32 * 9) % 120,
        opportunity_score: score,
        badges: demo_badges(index),
        insights: vec![
            format!("{}% below suburb median", 5 + index % 10),
            "Recently renovated".to_string(),
            format!("{} parking spaces", index % 3),
        ],
        price_per_bedroom: (price / bedrooms as f64).round(),
        price_per_sqm: None,
        distance_to_train: 0.3 + (index % 5) as f64 * 0.6,
        distance_to_shops: 0.2 + (index % 4) as f64 * 0.5,
        recently_renovated: index % 4 == 0,
        score_breakdown: demo_breakdown(score),
        comparison_metrics: ComparisonMetrics {
            price_vs_median_pct: -15.0 + index as f64 * 1.5,
            size_vs_avg_pct: 12.0 - (index % 7) as f64 * 5.0,
            parking_vs_avg: (index % 3) as f64 - 1.0,
            days_vs_avg: (index as f64 * 9.0) % 120.0 - 40.0,
            price_per_bedroom: None,
            suburb_avg_price_per_bedroom: None,
        },
    }
}

fn demo_badges(index: usize) -> Vec<String> {
    let pool = [
        "Great Value",
        "Transit Hub",
        "Fresh Listing",
        "Family Home",
        "Investor Special",
    ];
    pool.iter()
        .enumerate()
        .filter(|(i, _)| (index + i) % 3 == 0)
        .map(|(_, b)| b.to_string())
        .collect()
}

fn demo_breakdown(score: f64) -> ScoreBreakdown {
    ScoreBreakdown {
        suburb_factors: factor_group(
            score * 0.4,
            40.0,
            &["suburb_quality", "population_growth", "walkability"],
        ),
        value_factors: factor_group(
            score * 0.35,
            35.0,
            &["price_per_bedroom", "vs_suburb_median", "price_per_sqm"],
        ),
        feature_factors: factor_group(
            score * 0.25,
            25.0,
            &["property_type", "parking", "renovation", "amenities", "market_velocity"],
        ),
    }
}

fn factor_group(points: f64, max: f64, names: &[&str]) -> FactorGroup {
    let total = round1(points);
    let each = round1(total / names.len() as f64);
    FactorGroup {
        total,
        max,
        components: names.iter().map(|n| (n.to_string(), each)).collect(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
