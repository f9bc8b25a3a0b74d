use crate::catalog::Item;

/// One picklist entry; picking it re-queries with `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionEntry {
    pub name: String,
    pub company: String,
}

pub fn render_suggestions(matches: &[Item]) -> Vec<SuggestionEntry> {
    matches
        .iter()
        .map(|item| SuggestionEntry {
            name: item.name.clone(),
            company: item.company.clone(),
        })
        .collect()
}
