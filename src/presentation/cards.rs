//! Projection of listings into card view-models.

use super::classify::{
    badge_style, is_fresh_listing, market_velocity_verdict, parking_verdict, price_verdict,
    score_label, score_tier, size_verdict, ScoreLabel, ScoreTier, Verdict,
};
use super::format;
use crate::models::{FactorGroup, Listing};
use serde::Serialize;

/// Insights shown on the collapsed card; the rest are dropped
pub const SUMMARY_INSIGHT_LIMIT: usize = 2;

const VIEW_DETAILS: &str = "View Details";
const HIDE_DETAILS: &str = "Hide Details";

/// Known score components: wire name, display label, maximum points
const COMPONENTS: [(&str, &str, f64); 11] = [
    ("suburb_quality", "Suburb Quality", 20.0),
    ("population_growth", "Population Growth", 10.0),
    ("walkability", "Walkability", 10.0),
    ("price_per_bedroom", "Price per Bedroom", 15.0),
    ("vs_suburb_median", "vs Suburb Median", 10.0),
    ("price_per_sqm", "Price per m²", 10.0),
    ("property_type", "Property Type", 8.0),
    ("parking", "Parking", 5.0),
    ("renovation", "Renovation", 4.0),
    ("amenities", "Amenities", 5.0),
    ("market_velocity", "Market Velocity", 3.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeView {
    pub label: String,
    pub class: &'static str,
    pub icon: &'static str,
}

/// Summary view of one listing, with details filled in only when expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardViewModel {
    /// Position in the loaded result set
    pub index: usize,
    pub address: String,
    pub property_type: String,
    pub price: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub parking: String,
    pub area: String,
    pub badges: Vec<BadgeView>,
    pub insights: Vec<String>,
    pub fresh: bool,
    pub price_per_bedroom: String,
    pub days_on_market: String,
    pub score: String,
    pub tier: ScoreTier,
    pub label: ScoreLabel,
    pub expanded: bool,
    pub toggle_label: &'static str,
    pub details: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    pub label: String,
    pub points: f64,
    pub max: Option<f64>,
}

impl ComponentLine {
    /// `15/20`, or just the points for components without a known maximum
    pub fn score_text(&self) -> String {
        match self.max {
            Some(max) => format!("{}/{}", format::number(self.points), format::number(max)),
            None => format::number(self.points),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSection {
    pub title: &'static str,
    pub total: f64,
    pub max: f64,
    /// `total / max` clamped to `[0, 1]`, for progress bars
    pub completion: f64,
    pub components: Vec<ComponentLine>,
}

impl BreakdownSection {
    fn from_group(title: &'static str, group: &FactorGroup) -> Self {
        let completion = if group.max > 0.0 {
            (group.total / group.max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let components = group
            .components
            .iter()
            .map(|(name, points)| {
                let known = COMPONENTS.iter().find(|(wire, _, _)| *wire == name.as_str());
                ComponentLine {
                    label: known
                        .map(|(_, label, _)| label.to_string())
                        .unwrap_or_else(|| format::title_case(&name.replace('_', " "))),
                    points: *points,
                    max: known.map(|(_, _, max)| *max),
                }
            })
            .collect();

        Self {
            title,
            total: group.total,
            max: group.max,
            completion,
            components,
        }
    }

    /// `32.5/40`
    pub fn score_text(&self) -> String {
        format!("{}/{}", format::number(self.total), format::number(self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub verdict: Verdict,
}

/// Expanded part of a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub sections: Vec<BreakdownSection>,
    pub comparisons: Vec<ComparisonRow>,
    /// Price per bedroom against the suburb, when the server sends both
    pub price_per_bedroom_vs_suburb: Option<(String, String)>,
    pub amenities: Vec<String>,
}

pub fn project_details(listing: &Listing) -> DetailView {
    let breakdown = &listing.score_breakdown;
    let metrics = &listing.comparison_metrics;

    let mut amenities = vec![
        format!("{}km to train station", format::number(listing.distance_to_train)),
        format!("{}km to shops", format::number(listing.distance_to_shops)),
    ];
    if listing.recently_renovated {
        amenities.push("Recently renovated".to_string());
    }
    if let Some(land) = listing.land_size.filter(|l| *l > 0.0) {
        amenities.push(format!("{}m² land", format::number(land)));
    }

    DetailView {
        sections: vec![
            BreakdownSection::from_group("Suburb Factors", &breakdown.suburb_factors),
            BreakdownSection::from_group("Value Factors", &breakdown.value_factors),
            BreakdownSection::from_group("Feature Factors", &breakdown.feature_factors),
        ],
        comparisons: vec![
            ComparisonRow {
                label: "Price vs Median",
                verdict: price_verdict(metrics.price_vs_median_pct),
            },
            ComparisonRow {
                label: "Size",
                verdict: size_verdict(metrics.size_vs_avg_pct),
            },
            ComparisonRow {
                label: "Parking",
                verdict: parking_verdict(metrics.parking_vs_avg),
            },
            ComparisonRow {
                label: "Days on Market",
                verdict: market_velocity_verdict(metrics.days_vs_avg),
            },
        ],
        price_per_bedroom_vs_suburb: metrics
            .price_per_bedroom
            .zip(metrics.suburb_avg_price_per_bedroom)
            .map(|(this, avg)| (format::currency(this), format::currency(avg))),
        amenities,
    }
}

pub fn project_card(listing: &Listing, index: usize, expanded: bool) -> CardViewModel {
    let score = listing.opportunity_score;

    CardViewModel {
        index,
        address: listing.address.clone(),
        property_type: listing.property_type.clone(),
        price: format::price(listing.price.as_ref()),
        bedrooms: format::plural(listing.bedrooms, "bed"),
        bathrooms: format::plural(listing.bathrooms, "bath"),
        parking: format!("{} parking", listing.parking_spaces),
        area: format!("{}m²", format::number(listing.internal_area)),
        badges: listing
            .badges
            .iter()
            .map(|label| {
                let style = badge_style(label);
                BadgeView {
                    label: label.clone(),
                    class: style.class,
                    icon: style.icon,
                }
            })
            .collect(),
        insights: listing
            .insights
            .iter()
            .take(SUMMARY_INSIGHT_LIMIT)
            .cloned()
            .collect(),
        fresh: is_fresh_listing(listing.days_on_market),
        price_per_bedroom: format!("{}/bed", format::currency(listing.price_per_bedroom)),
        days_on_market: format!("{} days", listing.days_on_market),
        score: format!("{score:.1}"),
        tier: score_tier(score),
        label: score_label(score),
        expanded,
        toggle_label: if expanded { HIDE_DETAILS } else { VIEW_DETAILS },
        details: expanded.then(|| project_details(listing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixture::demo_listing;
    use crate::models::Price;

    #[test]
    fn test_fresh_excellent_card() {
        let mut listing = demo_listing("Richmond", 0);
        listing.opportunity_score = 82.0;
        listing.days_on_market = 5;

        let card = project_card(&listing, 0, false);
        assert_eq!(card.tier, ScoreTier::High);
        assert_eq!(card.label, ScoreLabel::Excellent);
        assert!(card.fresh);
        assert_eq!(card.score, "82.0");
    }

    #[test]
    fn test_collapsed_card_has_no_details() {
        let listing = demo_listing("Richmond", 3);
        let card = project_card(&listing, 7, false);
        assert_eq!(card.index, 7);
        assert!(card.details.is_none());
        assert_eq!(card.toggle_label, "View Details");

        let expanded = project_card(&listing, 7, true);
        assert_eq!(expanded.toggle_label, "Hide Details");
        let details = expanded.details.unwrap();
        assert_eq!(details.sections.len(), 3);
        assert_eq!(details.comparisons.len(), 4);
    }

    #[test]
    fn test_summary_fields() {
        let mut listing = demo_listing("Richmond", 0);
        listing.bedrooms = 1;
        listing.bathrooms = 2;
        listing.price = Some(Price::Text("Auction".to_string()));
        listing.badges = vec!["Great Value".to_string(), "Waterfront".to_string()];
        listing.insights = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let card = project_card(&listing, 0, false);
        assert_eq!(card.bedrooms, "1 bed");
        assert_eq!(card.bathrooms, "2 baths");
        assert_eq!(card.price, "Auction");
        assert_eq!(card.insights, vec!["a", "b"]);
        assert_eq!(card.badges[0].icon, "🏆");
        assert_eq!(card.badges[1].class, "default");

        listing.price = None;
        assert_eq!(project_card(&listing, 0, false).price, "Price on application");
    }

    #[test]
    fn test_breakdown_sections_and_verdicts() {
        let mut listing = demo_listing("Richmond", 0);
        listing.score_breakdown.suburb_factors = FactorGroup {
            total: 30.0,
            max: 40.0,
            components: [("suburb_quality".to_string(), 15.0), ("schools".to_string(), 15.0)]
                .into_iter()
                .collect(),
        };
        listing.score_breakdown.value_factors.max = 0.0;
        listing.comparison_metrics.price_vs_median_pct = -12.0;

        let details = project_details(&listing);
        let suburb = &details.sections[0];
        assert_eq!(suburb.completion, 0.75);
        assert_eq!(suburb.score_text(), "30/40");
        assert_eq!(suburb.components[0].score_text(), "15/20");
        assert_eq!(suburb.components[1].label, "Schools");
        assert_eq!(suburb.components[1].max, None);
        assert_eq!(details.sections[1].completion, 0.0);
        assert_eq!(details.comparisons[0].verdict.label, "12% below");
    }

    #[test]
    fn test_amenity_lines() {
        let mut listing = demo_listing("Richmond", 1);
        listing.distance_to_train = 1.2;
        listing.distance_to_shops = 0.8;
        listing.recently_renovated = true;

        let details = project_details(&listing);
        assert_eq!(
            details.amenities,
            vec!["1.2km to train station", "0.8km to shops", "Recently renovated"]
        );
    }
}
