use super::{format_number, NO_VALUE};
use crate::recommend::Recommendation;

/// Labelled nutrient value shown on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub value: String,
}

/// Display card for one recommendation; activating it re-queries with
/// `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationCard {
    pub name: String,
    pub company: String,
    pub badges: Vec<Badge>,
    pub seals: Vec<String>,
}

/// Project recommendations into cards, keeping at most `limit` when set.
pub fn render_cards(
    recommendations: &[Recommendation],
    limit: Option<usize>,
) -> Vec<RecommendationCard> {
    recommendations
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|rec| RecommendationCard {
            name: rec.name.clone(),
            company: rec.company.clone(),
            badges: vec![
                badge("Cal", rec.calories, ""),
                badge("Prot", rec.protein, "g"),
                badge("Fat", rec.fat, "g"),
                badge("Carbs", rec.carbs, "g"),
            ],
            seals: rec.seals.clone(),
        })
        .collect()
}

fn badge(label: &'static str, value: Option<f64>, unit: &str) -> Badge {
    let value = match value {
        Some(value) => format!("{}{unit}", format_number(value)),
        None => NO_VALUE.to_string(),
    };
    Badge { label, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::item;

    #[test]
    fn cards_show_core_nutrients() {
        let mut rec = item("Cobb Salad", "B", "Salad");
        rec.carbs = None;
        let cards = render_cards(&[rec], None);
        let card = &cards[0];
        assert_eq!(card.name, "Cobb Salad");
        assert_eq!(card.company, "B");
        let badges = card
            .badges
            .iter()
            .map(|b| format!("{}: {}", b.label, b.value))
            .collect::<Vec<_>>();
        assert_eq!(
            badges,
            vec![
                "Cal: 300".to_string(),
                "Prot: 10g".to_string(),
                "Fat: 15g".to_string(),
                format!("Carbs: {NO_VALUE}"),
            ]
        );
    }

    #[test]
    fn limit_caps_cards() {
        let recs = (0..8)
            .map(|idx| item(&format!("Dish {idx}"), "A", "x"))
            .collect::<Vec<_>>();
        assert_eq!(render_cards(&recs, Some(6)).len(), 6);
        assert_eq!(render_cards(&recs, None).len(), 8);
        assert!(render_cards(&[], Some(6)).is_empty());
    }
}
