//! Generic list helpers (search, sort)

use std::cmp::Ordering;

/// Rows that can be narrowed by a free-text filter
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Rows that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sort a list by the given field
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Keep rows matching the filter; a blank filter keeps everything
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Case-insensitive "contains"
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        count: u32,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                "count" => self.count.cmp(&other.count),
                _ => Ordering::Equal,
            }
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ignore_case(self.name, filter)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "BS Nursing", count: 40 },
            Row { name: "BS Accountancy", count: 52 },
            Row { name: "AB Psychology", count: 38 },
        ]
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "count", true);
        assert_eq!(items[0].name, "AB Psychology");

        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "BS Nursing");
        assert_eq!(items[2].name, "AB Psychology");
    }

    #[test]
    fn test_filter_list() {
        assert_eq!(filter_list(rows(), "  ").len(), 3);
        let found = filter_list(rows(), "bs ");
        assert_eq!(found.len(), 2);
        assert!(filter_list(rows(), "engineering").is_empty());
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "count", true), " ⇅");
    }
}
