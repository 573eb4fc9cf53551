use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Asking price as sent by the search endpoint
///
/// Agents publish either a number or a free-form string ("Auction", "$1.2m - $1.3m").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

/// Suburb-level metrics returned alongside every first page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuburbMetrics {
    pub suburb_score: f64,
    pub walkability: f64,
    pub population_growth: f64,
}

/// One factor group of the opportunity score
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FactorGroup {
    pub total: f64,
    pub max: f64,
    /// Component name -> points, in server order
    #[serde(default)]
    pub components: IndexMap<String, f64>,
}

/// Server-side decomposition of the opportunity score
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub suburb_factors: FactorGroup,
    pub value_factors: FactorGroup,
    pub feature_factors: FactorGroup,
}

/// Deltas of a listing against its suburb's medians and averages
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComparisonMetrics {
    pub price_vs_median_pct: f64,
    pub size_vs_avg_pct: f64,
    pub parking_vs_avg: f64,
    pub days_vs_avg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_bedroom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb_avg_price_per_bedroom: Option<f64>,
}

/// A scored property listing. The address doubles as its identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub address: String,
    #[serde(default)]
    pub price: Option<Price>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub parking_spaces: u32,
    #[serde(default)]
    pub internal_area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_size: Option<f64>,
    pub property_type: String,
    #[serde(default)]
    pub days_on_market: u32,
    pub opportunity_score: f64,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub price_per_bedroom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_sqm: Option<f64>,
    #[serde(default)]
    pub distance_to_train: f64,
    #[serde(default)]
    pub distance_to_shops: f64,
    #[serde(default)]
    pub recently_renovated: bool,
    #[serde(default)]
    pub score_breakdown: ScoreBreakdown,
    #[serde(default)]
    pub comparison_metrics: ComparisonMetrics,
}

/// One page of search results, exactly as the endpoint sends it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    pub suburb: String,
    pub suburb_metrics: SuburbMetrics,
    #[serde(rename = "properties", default)]
    pub listings: Vec<Listing>,
    pub count: usize,
    pub total: u64,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Suburb overview kept by the session; replaced on every new search
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuburbOverview {
    pub name: String,
    pub metrics: SuburbMetrics,
}
