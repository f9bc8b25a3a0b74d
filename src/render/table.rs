use super::{format_number, NO_VALUE};
use crate::catalog::Item;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Company,
    Name,
    Category,
    Calories,
    Protein,
    Fat,
    Carbs,
    SaturatedFat,
    Sodium,
    Sugars,
    Seals,
}

/// Fixed column schema, in display order.
pub const COLUMNS: [Column; 11] = [
    Column::Company,
    Column::Name,
    Column::Category,
    Column::Calories,
    Column::Protein,
    Column::Fat,
    Column::Carbs,
    Column::SaturatedFat,
    Column::Sodium,
    Column::Sugars,
    Column::Seals,
];

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Company => "Company",
            Column::Name => "Name",
            Column::Category => "Category",
            Column::Calories => "Calories",
            Column::Protein => "Protein",
            Column::Fat => "Fat",
            Column::Carbs => "Carbs",
            Column::SaturatedFat => "Sat. fat",
            Column::Sodium => "Sodium",
            Column::Sugars => "Sugars",
            Column::Seals => "Seals",
        }
    }

    fn project(self, item: &Item) -> Cell {
        match self {
            Column::Company => Cell::text(&item.company),
            Column::Name => Cell::text(&item.name),
            Column::Category => Cell::text(&item.category),
            Column::Calories => Cell::number(item.calories),
            Column::Protein => Cell::number(item.protein),
            Column::Fat => Cell::number(item.fat),
            Column::Carbs => Cell::number(item.carbs),
            Column::SaturatedFat => Cell::number(item.saturated_fat),
            Column::Sodium => Cell::number(item.sodium),
            Column::Sugars => Cell::number(item.sugars),
            Column::Seals => {
                if item.seals.is_empty() {
                    Cell::Missing
                } else {
                    Cell::Badges(item.seals.clone())
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Badges(Vec<String>),
    Missing,
}

impl Cell {
    fn text(value: &str) -> Cell {
        if value.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(value.to_string())
        }
    }

    fn number(value: Option<f64>) -> Cell {
        match value {
            Some(value) => Cell::Text(format_number(value)),
            None => Cell::Missing,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Badges(badges) => badges
                .iter()
                .map(|badge| format!("[{badge}]"))
                .collect::<Vec<_>>()
                .join(" "),
            Cell::Missing => NO_VALUE.to_string(),
        }
    }
}

/// One rendered result row. Row `k` always projects result `k`, which
/// is what row activation re-queries with.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

/// Result table body. Each render replaces every row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableView {
    rows: Vec<TableRow>,
}

impl TableView {
    pub fn render(&mut self, results: &[Item]) {
        self.rows = results
            .iter()
            .map(|item| TableRow {
                cells: COLUMNS.iter().map(|column| column.project(item)).collect(),
            })
            .collect();
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}
