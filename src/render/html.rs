use crate::presentation::cards::{BadgeView, BreakdownSection, DetailView};
use crate::presentation::format;
use crate::presentation::CardViewModel;
use crate::session::{LoadMoreControl, SearchSession, SessionState};
use maud::{html, Markup, DOCTYPE};

/// Full results page for the current session
pub fn results_page(session: &SearchSession) -> Markup {
    let title = session
        .suburb()
        .map(|s| format!("Properties in {}", format::title_case(&s.name)))
        .unwrap_or_else(|| "Suburb Scout".to_string());

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                @if let Some(message) = session.notice() {
                    div class="error-message" { (message) }
                }
                @if session.state() == SessionState::Searching {
                    div class="loading-state" { "Searching..." }
                }
                (results_section(session))
            }
        }
    }
}

pub fn results_section(session: &SearchSession) -> Markup {
    let Some(suburb) = session.suburb() else {
        return html! {};
    };
    let cards = session.cards();

    html! {
        section class="results-section" {
            div class="suburb-overview" {
                h2 class="suburb-name" { (format::title_case(&suburb.name)) }
                div class="suburb-metric" { "Suburb Score " span { (format!("{:.0}", suburb.metrics.suburb_score)) } }
                div class="suburb-metric" { "Walkability " span { (format!("{:.0}", suburb.metrics.walkability)) } }
                div class="suburb-metric" { "Population Growth " span { (format!("{:.1}%", suburb.metrics.population_growth)) } }
            }
            @if let Some(insights) = session.insights() {
                div class="insights-summary" {
                    p { "Found " strong { (insights.total) } " properties in " (format::title_case(&suburb.name)) }
                    @if !insights.breakdown().is_empty() {
                        p class="summary-breakdown" {
                            @for (i, (label, count)) in insights.breakdown().into_iter().enumerate() {
                                @if i > 0 { ", " }
                                span class=(label.css_class()) { (count) " " (label.phrase()) }
                            }
                            " opportunities"
                        }
                    }
                }
            }
            @if cards.is_empty() {
                div class="empty-state" { "No properties found" }
            } @else {
                div class="properties-grid" {
                    @for card in &cards {
                        (property_card(card))
                    }
                }
            }
            @match session.load_more_control() {
                LoadMoreControl::Enabled => {
                    button class="load-more-btn" { "Load More Properties" }
                }
                LoadMoreControl::Busy => {
                    button class="load-more-btn" disabled { "Loading..." }
                }
                LoadMoreControl::Hidden => {}
            }
        }
    }
}

fn badge(badge: &BadgeView) -> Markup {
    html! {
        span class={ "badge badge-" (badge.class) } { (badge.icon) " " (badge.label) }
    }
}

/// One listing card; the detail panel is only emitted for expanded cards
pub fn property_card(card: &CardViewModel) -> Markup {
    html! {
        div class="property-card" data-property-index=(card.index) {
            div class="property-image-placeholder" {
                div class="property-type-badge" { (card.property_type) }
                @if card.fresh {
                    div class="fresh-badge" { "NEW" }
                }
            }
            div class="property-content" {
                div class="property-header" {
                    h4 class="property-address" { (card.address) }
                    div class="property-price" { (card.price) }
                }
                @if !card.badges.is_empty() {
                    div class="property-badges" {
                        @for b in &card.badges { (badge(b)) }
                    }
                }
                div class="property-details" {
                    span class="detail-item" { (card.bedrooms) }
                    span class="detail-item" { (card.bathrooms) }
                    span class="detail-item" { (card.parking) }
                    span class="detail-item" { (card.area) }
                }
                @if !card.insights.is_empty() {
                    div class="property-insights" {
                        @for insight in &card.insights {
                            div class="insight-item" { "• " (insight) }
                        }
                    }
                }
                div class="property-meta" {
                    span class="meta-item" title="Price per bedroom" { (card.price_per_bedroom) }
                    span class="meta-item" title="Days on market" { (card.days_on_market) }
                }
                div class={ "opportunity-score " (card.tier.css_class()) } {
                    div class="score-header" {
                        div class="score-label" { "Opportunity Score" }
                        div class="score-value" { (card.score) }
                    }
                    div class="score-badge" { (card.label.title()) }
                }
                button class="view-details-btn" data-property-index=(card.index) {
                    span class="btn-text" { (card.toggle_label) }
                    span class="btn-arrow" { @if card.expanded { "▲" } @else { "▼" } }
                }
                @if let Some(details) = &card.details {
                    div class="property-details-expanded" { (detail_view(details)) }
                }
            }
        }
    }
}

fn breakdown_section(section: &BreakdownSection) -> Markup {
    html! {
        div class="score-section" {
            div class="score-section-header" {
                span class="section-title" { (section.title) }
                span class="section-score" { (section.score_text()) }
            }
            div class="progress-bar" {
                div class="progress-fill" style=(format!("width: {:.1}%", section.completion * 100.0)) {}
            }
            div class="score-components" {
                @for line in &section.components {
                    div class="component-item" {
                        span { (line.label) ":" }
                        span { (line.score_text()) }
                    }
                }
            }
        }
    }
}

fn detail_view(details: &DetailView) -> Markup {
    html! {
        div class="details-content" {
            h5 { "Score Breakdown" }
            @for section in &details.sections { (breakdown_section(section)) }
            h5 { "Property vs Suburb Average" }
            div class="comparison-table" {
                @for row in &details.comparisons {
                    div class="comparison-row" {
                        div class="comparison-label" { (row.label) }
                        div class={ "comparison-verdict " (row.verdict.tone.css_class()) } { (row.verdict.to_string()) }
                    }
                }
                @if let Some((this, avg)) = &details.price_per_bedroom_vs_suburb {
                    div class="comparison-row" {
                        div class="comparison-label" { "Price per Bedroom" }
                        div class="comparison-this" { (this) }
                        div class="comparison-avg" { (avg) }
                    }
                }
            }
            div class="additional-info" {
                @for line in &details.amenities {
                    div class="info-item" { (line) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FixtureTransport;

    #[tokio::test]
    async fn test_page_lists_cards_and_load_more() {
        let transport = FixtureTransport::demo("Richmond", 20);
        let mut session = SearchSession::default();
        session.search(&transport, "richmond").await.unwrap();
        session.toggle_details(0);

        let html = results_page(&session).into_string();
        assert!(html.contains("Found <strong>20</strong> properties in Richmond"));
        assert_eq!(html.matches("class=\"property-card\"").count(), 15);
        assert_eq!(html.matches("class=\"details-content\"").count(), 1);
        assert!(html.contains("Load More Properties"));
    }

    #[test]
    fn test_idle_session_renders_no_results() {
        let session = SearchSession::default();
        let html = results_page(&session).into_string();
        assert!(!html.contains("results-section"));
        assert!(html.contains("<title>Suburb Scout</title>"));
    }
}
