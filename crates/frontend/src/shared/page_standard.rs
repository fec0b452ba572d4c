//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a003_curriculum--list"`) and a `data-page-category`.

/// List of records
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_curriculum--list"));
        assert!(!is_valid_page_id("a003_curriculum"));
        assert!(!is_valid_page_id("--detail"));
    }
}
