use std::collections::HashMap;

use super::aggregate::CurriculumItem;
use super::year::resolve_year_number;

pub const UNKNOWN_YEAR_LABEL: &str = "Unknown Year";
pub const UNKNOWN_TERM_LABEL: &str = "Term";

/// Rows of one term, referenced by their position in the flat list
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup {
    pub term: String,
    pub item_indices: Vec<usize>,
}

impl TermGroup {
    pub fn total_units(&self, items: &[CurriculumItem]) -> f64 {
        self.item_indices
            .iter()
            .filter_map(|&i| items.get(i))
            .filter_map(|item| item.units_value())
            .sum()
    }
}

/// Terms of one year label
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup {
    pub year_label: String,
    /// Resolved year of the first row seen under this label
    pub year: Option<u32>,
    pub terms: Vec<TermGroup>,
}

impl YearGroup {
    pub fn item_count(&self) -> usize {
        self.terms.iter().map(|t| t.item_indices.len()).sum()
    }
}

/// Nested view for the edit form.
///
/// Years and terms appear in the order they are first met in `items`.
pub fn group_for_edit(items: &[CurriculumItem]) -> Vec<YearGroup> {
    let mut years: Vec<YearGroup> = Vec::new();
    let mut year_pos: HashMap<&str, usize> = HashMap::new();
    let mut term_pos: Vec<HashMap<&str, usize>> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let ykey = item.year_key();
        let yi = *year_pos.entry(ykey).or_insert_with(|| {
            years.push(YearGroup {
                year_label: ykey.to_string(),
                year: resolve_year_number(item),
                terms: Vec::new(),
            });
            term_pos.push(HashMap::new());
            years.len() - 1
        });

        let tkey = item.term_key();
        let terms = &mut years[yi].terms;
        let ti = *term_pos[yi].entry(tkey).or_insert_with(|| {
            terms.push(TermGroup {
                term: tkey.to_string(),
                item_indices: Vec::new(),
            });
            terms.len() - 1
        });
        terms[ti].item_indices.push(index);
    }

    years
}

/// Nested view for the read-only summary.
///
/// Years are ordered by resolved year number with unknown years last, terms
/// by name. Rows inside a term stay in insertion order.
pub fn group_for_summary(items: &[CurriculumItem]) -> Vec<YearGroup> {
    let mut years = group_for_edit(items);
    years.sort_by_key(|g| (g.year.is_none(), g.year.unwrap_or(0)));
    for year in &mut years {
        year.terms.sort_by(|a, b| a.term.cmp(&b.term));
    }
    years
}
