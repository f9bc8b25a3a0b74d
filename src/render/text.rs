//! Plain-text output for non-interactive commands.
use super::{Cell, RecommendationCard, SuggestionEntry, TableView, COLUMNS};
use crate::catalog::Facets;

pub fn format_table(view: &TableView) -> String {
    let headers = COLUMNS.iter().map(|c| c.header().to_string()).collect::<Vec<_>>();
    let rows = view
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(Cell::display).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&format!("{} result(s)\n", rows.len()));
    out
}

pub fn format_cards(base: Option<&str>, cards: &[RecommendationCard]) -> String {
    let mut out = String::new();
    match base {
        Some(base) => out.push_str(&format!("Recommendations for {base}:\n")),
        None => out.push_str("Recommendations:\n"),
    }
    if cards.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for card in cards {
        let badges = card
            .badges
            .iter()
            .map(|b| format!("{}: {}", b.label, b.value))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("  {} ({})  {badges}\n", card.name, card.company));
        if !card.seals.is_empty() {
            out.push_str(&format!("    seals: {}\n", card.seals.join(", ")));
        }
    }
    out
}

pub fn format_suggestions(entries: &[SuggestionEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{}\t{}\n", entry.name, entry.company));
    }
    out
}

pub fn format_facets(facets: &Facets) -> String {
    let mut out = String::new();
    for (label, values) in [
        ("restaurants", facets.restaurants()),
        ("categories", facets.categories()),
        ("seals", facets.seals()),
    ] {
        out.push_str(&format!("{label} ({}):\n", values.len()));
        for value in values {
            out.push_str(&format!("  {value}\n"));
        }
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{caesar_salad, item};
    use crate::render::{render_cards, NO_VALUE};

    #[test]
    fn table_text_has_header_rows_and_count() {
        let mut view = TableView::default();
        view.render(&[caesar_salad(), item("Fries", "B", "Sides")]);
        let text = format_table(&view);
        let lines = text.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("Company"));
        assert!(lines[0].ends_with("Seals"));
        assert!(lines[1].contains("Caesar Salad"));
        assert!(lines[1].ends_with(NO_VALUE));
        assert_eq!(lines[3], "2 result(s)");
    }

    #[test]
    fn empty_table_still_prints_header() {
        let view = TableView::default();
        let text = format_table(&view);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("0 result(s)\n"));
    }

    #[test]
    fn facets_and_suggestions_list_one_value_per_line() {
        let mut soda = item("Soda", "B", "Drinks");
        soda.seals = vec!["High sugars".to_string()];
        let facets = Facets::derive(&[caesar_salad(), soda.clone()]);
        assert_eq!(
            format_facets(&facets),
            "restaurants (2):\n  A\n  B\ncategories (2):\n  Drinks\n  Salad\nseals (1):\n  High sugars\n"
        );
        let entries = crate::render::render_suggestions(&[soda]);
        assert_eq!(format_suggestions(&entries), "Soda\tB\n");
    }

    #[test]
    fn empty_panel_is_explicit() {
        let text = format_cards(Some("Caesar Salad"), &[]);
        assert_eq!(text, "Recommendations for Caesar Salad:\n  (none)\n");
        let cards = render_cards(&[item("Cobb Salad", "B", "Salad")], None);
        assert!(format_cards(None, &cards).contains("Cobb Salad (B)  Cal: 300"));
    }
}
