use chrono::Datelike;

use super::grouping::{UNKNOWN_TERM_LABEL, UNKNOWN_YEAR_LABEL};
use super::year::{parse_year_label, resolve_year_number, TERM_LABELS};
use crate::domain::a001_department::aggregate::DepartmentId;
use crate::domain::a002_program::aggregate::ProgramId;
use crate::domain::common::aggregate_id::numeric_id;

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Curriculum version identifier; present only for saved curricula
    CurriculumId
);

// ============================================================================
// Fields
// ============================================================================

/// Top-level fields that carry validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurriculumField {
    DepartmentId,
    ProgramCode,
    ProgramName,
}

impl CurriculumField {
    /// Key used in the error map
    pub fn key(&self) -> &'static str {
        match self {
            CurriculumField::DepartmentId => "departmentId",
            CurriculumField::ProgramCode => "programCode",
            CurriculumField::ProgramName => "programName",
        }
    }
}

/// Editable columns of a subject row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    YearLabel,
    Term,
    SubjectCode,
    Prerequisite,
    EquivSubjectCode,
    Description,
    Units,
}

impl ItemField {
    /// Key used in the per-item error map
    pub fn key(&self) -> &'static str {
        match self {
            ItemField::YearLabel => "yearLabel",
            ItemField::Term => "semester",
            ItemField::SubjectCode => "subjectCode",
            ItemField::Prerequisite => "prerequisite",
            ItemField::EquivSubjectCode => "equivSubjectCode",
            ItemField::Description => "description",
            ItemField::Units => "units",
        }
    }
}

// ============================================================================
// Item
// ============================================================================

/// One subject row tagged with a year and a term.
///
/// `units` holds the raw text typed by the administrator; it is only checked
/// to be numeric at save time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurriculumItem {
    /// Structured year; wins over `year_label` when present
    pub year: Option<u32>,
    pub year_label: String,
    pub term: String,
    pub subject_code: String,
    pub prerequisite: String,
    pub equiv_subject_code: String,
    pub description: String,
    pub units: String,
}

impl CurriculumItem {
    /// Empty subject row placed in the given bucket
    pub fn blank(year_label: &str, term: &str) -> Self {
        Self {
            year: parse_year_label(year_label),
            year_label: year_label.to_string(),
            term: term.to_string(),
            ..Self::default()
        }
    }

    /// Units as a number, `None` when blank or not numeric
    pub fn units_value(&self) -> Option<f64> {
        let trimmed = self.units.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Year bucket name as grouped; blank labels share a placeholder
    pub fn year_key(&self) -> &str {
        if self.year_label.trim().is_empty() {
            UNKNOWN_YEAR_LABEL
        } else {
            &self.year_label
        }
    }

    /// Term bucket name as grouped; blank terms share a placeholder
    pub fn term_key(&self) -> &str {
        if self.term.trim().is_empty() {
            UNKNOWN_TERM_LABEL
        } else {
            &self.term
        }
    }

    pub fn in_bucket(&self, year_key: &str, term_key: &str) -> bool {
        self.year_key() == year_key && self.term_key() == term_key
    }

    pub fn has_units(&self) -> bool {
        !self.units.trim().is_empty()
    }

    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::YearLabel => &self.year_label,
            ItemField::Term => &self.term,
            ItemField::SubjectCode => &self.subject_code,
            ItemField::Prerequisite => &self.prerequisite,
            ItemField::EquivSubjectCode => &self.equiv_subject_code,
            ItemField::Description => &self.description,
            ItemField::Units => &self.units,
        }
    }

    /// Set one column. Changing the year label re-resolves the numeric year
    /// so both resolution paths keep pointing at the same bucket.
    pub fn set(&mut self, field: ItemField, value: String) {
        match field {
            ItemField::YearLabel => {
                self.year = parse_year_label(&value);
                self.year_label = value;
            }
            ItemField::Term => self.term = value,
            ItemField::SubjectCode => self.subject_code = value,
            ItemField::Prerequisite => self.prerequisite = value,
            ItemField::EquivSubjectCode => self.equiv_subject_code = value,
            ItemField::Description => self.description = value,
            ItemField::Units => self.units = value,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Curriculum under edit: program metadata plus a flat list of subject rows.
///
/// Row order is insertion order; grouping is always done by year/term.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curriculum {
    pub curriculum_id: Option<CurriculumId>,
    pub program_id: Option<ProgramId>,
    pub program_code: String,
    pub program_name: String,
    pub duration_in_years: Option<u32>,
    pub department_id: Option<DepartmentId>,
    pub department_name: Option<String>,
    pub version_name: Option<String>,
    pub effectivity_year: Option<i32>,
    pub items: Vec<CurriculumItem>,
    /// Created through "New curriculum" rather than loaded from the server
    pub is_new: bool,
}

impl Curriculum {
    /// Empty shell for the create flow
    pub fn new_shell(department_id: Option<DepartmentId>) -> Self {
        Self {
            department_id,
            effectivity_year: Some(chrono::Utc::now().year()),
            is_new: true,
            ..Self::default()
        }
    }

    /// Whether saving issues an update rather than a create
    pub fn is_update(&self) -> bool {
        self.curriculum_id.is_some()
    }

    pub fn item(&self, index: usize) -> Option<&CurriculumItem> {
        self.items.get(index)
    }

    /// Append a blank subject row to a bucket. Returns its position.
    pub fn add_item(&mut self, year_label: &str, term: &str) -> usize {
        self.items.push(CurriculumItem::blank(year_label, term));
        self.items.len() - 1
    }

    /// Append a blank row under the first term title not yet used in the
    /// given year. Returns its position.
    pub fn add_term(&mut self, year_label: &str) -> usize {
        let used: Vec<String> = self
            .items
            .iter()
            .filter(|i| i.year_label == year_label)
            .map(|i| i.term.trim().to_lowercase())
            .collect();

        let term = TERM_LABELS
            .iter()
            .map(|t| t.to_string())
            .chain((TERM_LABELS.len() + 1..).map(|n| format!("Term {}", n)))
            .find(|candidate| !used.contains(&candidate.to_lowercase()))
            .unwrap_or_default();

        self.add_item(year_label, &term)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<CurriculumItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Positions of the rows in one bucket, keyed the way grouping names it
    pub fn bucket_indices(&self, year_key: &str, term_key: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, i)| i.in_bucket(year_key, term_key))
            .map(|(index, _)| index)
            .collect()
    }

    /// Remove every row of one bucket, named by its grouped year and term
    /// keys. Returns how many rows were dropped.
    pub fn remove_bucket(&mut self, year_key: &str, term_key: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.in_bucket(year_key, term_key));
        before - self.items.len()
    }

    /// Point edit through a row position. Returns `false` for a stale index.
    pub fn update_item(&mut self, index: usize, field: ItemField, value: String) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Highest resolved year across all rows, 0 when none resolve
    pub fn max_resolved_year(&self) -> u32 {
        self.items
            .iter()
            .filter_map(resolve_year_number)
            .max()
            .unwrap_or(0)
    }

    /// Sum of numeric units; non-numeric cells count as zero
    pub fn total_units(&self) -> f64 {
        self.items.iter().filter_map(|i| i.units_value()).sum()
    }

    /// Title for headers: name, else code, else a placeholder
    pub fn title(&self) -> String {
        if !self.program_name.trim().is_empty() {
            self.program_name.clone()
        } else if !self.program_code.trim().is_empty() {
            self.program_code.clone()
        } else {
            "New curriculum".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_curriculum::grouping::group_for_edit;

    fn sample() -> Curriculum {
        let mut c = Curriculum::new_shell(Some(DepartmentId(1)));
        c.add_item("First Year", "First Term");
        c.add_item("First Year", "Second Term");
        c.add_item("Second Year", "First Term");
        c
    }

    #[test]
    fn test_new_shell() {
        let c = Curriculum::new_shell(None);
        assert!(c.is_new);
        assert!(!c.is_update());
        assert!(c.items.is_empty());
        assert!(c.effectivity_year.is_some());
        assert_eq!(c.title(), "New curriculum");
    }

    #[test]
    fn test_add_item_resolves_year_from_label() {
        let c = sample();
        assert_eq!(c.items[0].year, Some(1));
        assert_eq!(c.items[2].year, Some(2));
        assert_eq!(c.max_resolved_year(), 2);
    }

    #[test]
    fn test_add_term_picks_next_unused_title() {
        let mut c = sample();
        let idx = c.add_term("First Year");
        assert_eq!(c.items[idx].term, "Third Term");

        let idx = c.add_term("Second Year");
        assert_eq!(c.items[idx].term, "Second Term");

        let idx = c.add_term("Third Year");
        assert_eq!(c.items[idx].term, "First Term");
        assert_eq!(c.items[idx].year, Some(3));
    }

    #[test]
    fn test_add_term_past_table() {
        let mut c = Curriculum::default();
        for _ in 0..7 {
            c.add_term("First Year");
        }
        assert_eq!(c.items[5].term, "Sixth Term");
        assert_eq!(c.items[6].term, "Term 7");
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut c = sample();
        assert!(c.remove_item(10).is_none());
        assert_eq!(c.items.len(), 3);
        assert!(c.remove_item(1).is_some());
        assert_eq!(c.items.len(), 2);
    }

    #[test]
    fn test_remove_bucket() {
        let mut c = sample();
        c.add_item("First Year", "First Term");
        assert_eq!(c.remove_bucket("First Year", "First Term"), 2);
        assert_eq!(c.items.len(), 2);
    }

    #[test]
    fn test_remove_bucket_with_blank_label_and_term() {
        let mut c = Curriculum::default();
        c.add_item("", "");
        c.add_item("First Year", "  ");
        c.add_item("First Year", "First Term");

        let buckets: Vec<(String, String)> = group_for_edit(&c.items)
            .into_iter()
            .flat_map(|g| {
                let label = g.year_label;
                g.terms.into_iter().map(move |t| (label.clone(), t.term))
            })
            .collect();
        assert_eq!(buckets[0], (UNKNOWN_YEAR_LABEL.to_string(), UNKNOWN_TERM_LABEL.to_string()));

        assert_eq!(c.bucket_indices(UNKNOWN_YEAR_LABEL, UNKNOWN_TERM_LABEL), vec![0]);
        for (label, term) in &buckets {
            assert_eq!(c.remove_bucket(label, term), 1);
        }
        assert!(c.items.is_empty());
    }

    #[test]
    fn test_update_year_label_re_resolves_year() {
        let mut c = sample();
        assert!(c.update_item(0, ItemField::YearLabel, "Fourth Year".into()));
        assert_eq!(c.items[0].year, Some(4));

        assert!(c.update_item(0, ItemField::YearLabel, "Bridging".into()));
        assert_eq!(c.items[0].year, None);

        assert!(!c.update_item(99, ItemField::Units, "3".into()));
    }

    #[test]
    fn test_total_units_ignores_non_numeric() {
        let mut c = sample();
        c.update_item(0, ItemField::Units, "3".into());
        c.update_item(1, ItemField::Units, "abc".into());
        c.update_item(2, ItemField::Units, " 2.5 ".into());
        assert_eq!(c.total_units(), 5.5);
    }
}
