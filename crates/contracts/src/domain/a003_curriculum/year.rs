use super::aggregate::CurriculumItem;

/// Ordinal year labels used for generation and fallback parsing
pub const YEAR_LABELS: [&str; 6] = [
    "First Year",
    "Second Year",
    "Third Year",
    "Fourth Year",
    "Fifth Year",
    "Sixth Year",
];

/// Ordinal term titles offered when adding a term to a year
pub const TERM_LABELS: [&str; 6] = [
    "First Term",
    "Second Term",
    "Third Term",
    "Fourth Term",
    "Fifth Term",
    "Sixth Term",
];

/// Term assigned to rows seeded by a duration change
pub const SEED_TERM: &str = "First Term";

/// Year an item belongs to.
///
/// The numeric `year` wins; otherwise the label is parsed. `None` means
/// "unknown year" and such rows are never created or removed automatically.
pub fn resolve_year_number(item: &CurriculumItem) -> Option<u32> {
    match item.year {
        Some(year) if year > 0 => Some(year),
        _ => parse_year_label(&item.year_label),
    }
}

/// Year number from free text: ordinal table first (case-insensitive
/// substring), then the first run of digits.
///
/// The digit fallback takes any number it finds, so "Room 201 Elective"
/// resolves to 201.
pub fn parse_year_label(label: &str) -> Option<u32> {
    let normalized = label.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(pos) = YEAR_LABELS
        .iter()
        .position(|candidate| normalized.contains(&candidate.to_lowercase()))
    {
        return Some(pos as u32 + 1);
    }

    first_digit_run(&normalized)
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|year| *year > 0)
}

/// Display label for a year: table entry for 1–6, ordinal suffix beyond.
pub fn year_label_for(year: u32) -> String {
    match year {
        0 => super::grouping::UNKNOWN_YEAR_LABEL.to_string(),
        1..=6 => YEAR_LABELS[year as usize - 1].to_string(),
        _ => format!("{}{} Year", year, ordinal_suffix(year)),
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn first_digit_run(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(year: Option<u32>, label: &str) -> CurriculumItem {
        CurriculumItem {
            year,
            year_label: label.to_string(),
            ..CurriculumItem::default()
        }
    }

    #[test]
    fn test_numeric_year_wins_over_label() {
        assert_eq!(resolve_year_number(&item(Some(2), "First Year")), Some(2));
    }

    #[test]
    fn test_label_fallback() {
        assert_eq!(resolve_year_number(&item(None, "Second Year")), Some(2));
        assert_eq!(resolve_year_number(&item(None, "  SIXTH YEAR ")), Some(6));
        assert_eq!(resolve_year_number(&item(None, "Third Year - Summer")), Some(3));
        assert_eq!(resolve_year_number(&item(Some(0), "Fourth Year")), Some(4));
    }

    #[test]
    fn test_digit_run_fallback() {
        assert_eq!(parse_year_label("Year 3"), Some(3));
        assert_eq!(parse_year_label("7th Year"), Some(7));
        assert_eq!(parse_year_label("Room 201 Elective"), Some(201));
        assert_eq!(parse_year_label("Year 0"), None);
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve_year_number(&item(None, "Bridging")), None);
        assert_eq!(resolve_year_number(&item(None, "")), None);
        assert_eq!(resolve_year_number(&item(None, "Unknown Year")), None);
    }

    #[test]
    fn test_year_labels() {
        assert_eq!(year_label_for(1), "First Year");
        assert_eq!(year_label_for(6), "Sixth Year");
        assert_eq!(year_label_for(7), "7th Year");
        assert_eq!(year_label_for(11), "11th Year");
        assert_eq!(year_label_for(12), "12th Year");
        assert_eq!(year_label_for(13), "13th Year");
        assert_eq!(year_label_for(21), "21st Year");
        assert_eq!(year_label_for(22), "22nd Year");
        assert_eq!(year_label_for(23), "23rd Year");
        assert_eq!(year_label_for(111), "111th Year");
    }

    #[test]
    fn test_label_round_trip_one_to_twenty() {
        for n in 1..=20 {
            let label = year_label_for(n);
            let resolved = parse_year_label(&label).unwrap();
            assert_eq!(resolved, n, "label {label}");
            assert_eq!(year_label_for(resolved), label);
        }
    }
}
