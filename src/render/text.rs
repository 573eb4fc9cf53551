use crate::presentation::format;
use crate::presentation::CardViewModel;
use crate::session::{LoadMoreControl, SearchSession};

/// Join rendered lines, each terminated by a newline
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Suburb overview and insight summary
pub fn overview(session: &SearchSession) -> String {
    let Some(suburb) = session.suburb() else {
        return String::new();
    };

    let mut lines = vec![
        format!("📍 {}", format::title_case(&suburb.name)),
        format!(
            "   Suburb score {:.0} · Walkability {:.0} · Population growth {:.1}%",
            suburb.metrics.suburb_score, suburb.metrics.walkability, suburb.metrics.population_growth
        ),
    ];
    if let Some(insights) = session.insights() {
        lines.push(format!("   {}", insights.headline(&suburb.name)));
        let breakdown = insights.breakdown_text();
        if !breakdown.is_empty() {
            lines.push(format!("   {}", breakdown));
        }
    }
    block(lines)
}

/// One card as an indented block, details included when expanded
pub fn card(card: &CardViewModel) -> String {
    let fresh = if card.fresh { " [NEW]" } else { "" };

    let mut lines = vec![
        format!("{}. {} ({}){}", card.index + 1, card.address, card.price, fresh),
        format!(
            "   {} · {}, {}, {}, {}",
            card.property_type, card.bedrooms, card.bathrooms, card.parking, card.area
        ),
        format!(
            "   Opportunity score {} ({}) · {} · {} on market",
            card.score, card.label, card.price_per_bedroom, card.days_on_market
        ),
    ];
    if !card.badges.is_empty() {
        let badges: Vec<String> = card
            .badges
            .iter()
            .map(|b| format!("{} {}", b.icon, b.label))
            .collect();
        lines.push(format!("   {}", badges.join("  ")));
    }
    lines.extend(card.insights.iter().map(|insight| format!("   • {}", insight)));

    if let Some(details) = &card.details {
        for section in &details.sections {
            lines.push(format!(
                "   {} {} ({:.0}%)",
                section.title,
                section.score_text(),
                section.completion * 100.0
            ));
            lines.extend(
                section
                    .components
                    .iter()
                    .map(|line| format!("     {}: {}", line.label, line.score_text())),
            );
        }
        lines.extend(
            details
                .comparisons
                .iter()
                .map(|row| format!("   {}: {}", row.label, row.verdict)),
        );
        if let Some((this, avg)) = &details.price_per_bedroom_vs_suburb {
            lines.push(format!("   Price per bedroom: {} vs suburb {}", this, avg));
        }
        lines.extend(details.amenities.iter().map(|line| format!("   {}", line)));
    }
    block(lines)
}

/// Footer line describing the load-more control
pub fn load_more_hint(session: &SearchSession) -> Option<String> {
    match session.load_more_control() {
        LoadMoreControl::Enabled => Some(format!(
            "Showing {} of {}, more available",
            session.listings().len(),
            session.results().total()
        )),
        LoadMoreControl::Busy => Some("Loading...".to_string()),
        LoadMoreControl::Hidden => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FixtureTransport;

    #[tokio::test]
    async fn test_overview_and_cards() {
        let transport = FixtureTransport::demo("Richmond", 3);
        let mut session = SearchSession::default();
        session.search(&transport, "Richmond").await.unwrap();

        let text = overview(&session);
        assert!(text.contains("Found 3 properties in Richmond"));
        assert!(load_more_hint(&session).is_none());

        session.toggle_details(0);
        let expanded = card(&session.card(0).unwrap());
        assert!(expanded.starts_with("1. "));
        assert!(expanded.contains("Suburb Factors"));
        assert!(expanded.contains("Price vs Median"));

        let collapsed = card(&session.card(1).unwrap());
        assert!(!collapsed.contains("Suburb Factors"));
    }

    #[test]
    fn test_block_terminates_every_line() {
        assert_eq!(block(vec!["a".to_string(), "b".to_string()]), "a\nb\n");
        assert_eq!(block(Vec::new()), "");
    }

    #[test]
    fn test_overview_is_empty_before_search() {
        assert!(overview(&SearchSession::default()).is_empty());
    }
}
