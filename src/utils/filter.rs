//! Client-side substring filtering of fetched lists.

/// Items that expose text fields for case-insensitive matching.
pub trait Searchable {
    fn search_fields(&self) -> [Option<&str>; 4];
}

/// Whether any field contains `term`, ignoring case.
pub fn matches<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter `items`, keeping every item when `term` is empty.
///
/// Whitespace is matched literally, so a term of spaces only keeps items
/// whose fields contain that run of spaces.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| matches(*item, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        title: Option<&'static str>,
        id: &'static str,
    }

    impl Searchable for Item {
        fn search_fields(&self) -> [Option<&str>; 4] {
            [self.title, None, None, Some(self.id)]
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                title: Some("Segment Tree"),
                id: "ABCD1234",
            },
            Item {
                title: None,
                id: "tlke2okg",
            },
        ]
    }

    #[test]
    fn empty_term_keeps_everything() {
        let items = items();
        assert_eq!(filter_items(&items, "").len(), 2);
    }

    #[test]
    fn whitespace_term_is_matched_literally() {
        let items = items();
        let found = filter_items(&items, " ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ABCD1234");
        assert!(filter_items(&items, "  ").is_empty());
    }

    #[test]
    fn match_is_case_insensitive() {
        let items = items();
        let found = filter_items(&items, "segment");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ABCD1234");

        let found = filter_items(&items, "TLKE");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "tlke2okg");
    }

    #[test]
    fn missing_fields_never_match() {
        let items = items();
        assert!(filter_items(&items, "tree").iter().all(|i| i.title.is_some()));
        assert!(filter_items(&items, "nothing here").is_empty());
    }
}
