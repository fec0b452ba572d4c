use std::collections::BTreeSet;

use super::aggregate::{Curriculum, CurriculumItem};
use super::year::{resolve_year_number, year_label_for, SEED_TERM};

/// Longest program the duration field accepts; larger input is clamped
pub const MAX_DURATION_YEARS: u32 = 12;

/// What a duration change did to the row list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Input was empty or non-positive; duration cleared, rows kept
    Cleared,
    Unchanged,
    Shrunk { removed: usize },
    Grown { seeded_years: Vec<u32> },
}

/// Result of [`apply_duration_change`]
#[derive(Debug, Clone, PartialEq)]
pub struct DurationChange {
    pub duration_in_years: Option<u32>,
    pub items: Vec<CurriculumItem>,
    pub outcome: ResizeOutcome,
}

/// Integer from a numeric text field, read like a leading-integer parse:
/// surrounding whitespace and trailing garbage are ignored ("3.5" → 3).
/// Empty, non-numeric, zero, negative and overflowing input give `None`;
/// anything above [`MAX_DURATION_YEARS`] is clamped to it.
pub fn parse_duration_input(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if len == 0 || negative {
        return None;
    }
    unsigned[..len]
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .map(|n| n.min(MAX_DURATION_YEARS))
}

/// Blank row placed in the first term of a year added by growth
pub fn seed_item(year: u32) -> CurriculumItem {
    CurriculumItem {
        year: Some(year),
        year_label: year_label_for(year),
        term: SEED_TERM.to_string(),
        ..CurriculumItem::default()
    }
}

/// Resize the row list to a new declared duration.
///
/// Shrink and grow are measured against `max(stored duration, highest
/// resolved year)`, not the stored duration alone, since imported rows can
/// sit beyond it. Rows whose year cannot be resolved are never touched.
/// Re-applying the same input is a no-op.
pub fn apply_duration_change(
    items: &[CurriculumItem],
    stored_duration: Option<u32>,
    input: &str,
) -> DurationChange {
    let Some(next) = parse_duration_input(input) else {
        return DurationChange {
            duration_in_years: None,
            items: items.to_vec(),
            outcome: ResizeOutcome::Cleared,
        };
    };

    let current_max = items
        .iter()
        .filter_map(resolve_year_number)
        .max()
        .unwrap_or(0);
    let baseline = stored_duration.unwrap_or(0).max(current_max);

    let (items, outcome) = if next < baseline {
        let kept: Vec<CurriculumItem> = items
            .iter()
            .filter(|item| match resolve_year_number(item) {
                Some(year) => year <= next,
                None => true,
            })
            .cloned()
            .collect();
        let removed = items.len() - kept.len();
        (kept, ResizeOutcome::Shrunk { removed })
    } else if next > baseline {
        let present: BTreeSet<u32> = items.iter().filter_map(resolve_year_number).collect();
        let seeded_years: Vec<u32> = (baseline + 1..=next)
            .filter(|year| !present.contains(year))
            .collect();
        let mut grown = items.to_vec();
        grown.extend(seeded_years.iter().map(|&year| seed_item(year)));
        (grown, ResizeOutcome::Grown { seeded_years })
    } else {
        (items.to_vec(), ResizeOutcome::Unchanged)
    };

    DurationChange {
        duration_in_years: Some(next),
        items,
        outcome,
    }
}

impl Curriculum {
    /// Apply a duration edit in place
    pub fn change_duration(&mut self, input: &str) -> ResizeOutcome {
        let change = apply_duration_change(&self.items, self.duration_in_years, input);
        self.duration_in_years = change.duration_in_years;
        self.items = change.items;
        change.outcome
    }
}
