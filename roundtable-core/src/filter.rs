//! Filter Engine: pure selection of knights and comments for a category.

use crate::model::{Catalog, Category, Comment, Knight, Selection};

/// Knights belonging to `selection`, in display order.
///
/// For [`Selection::All`] the fixed categories come first (Historical,
/// Legendary, Fictional), then any other groups in payload order. A named
/// selection the catalog does not contain yields an empty list.
pub fn select_by_category(catalog: &Catalog, selection: &Selection) -> Vec<Knight> {
    match selection {
        Selection::All => {
            let fixed = Category::ALL.map(|c| c.as_str());
            let extra = catalog.group_names().filter(|name| !fixed.contains(name));

            fixed
                .into_iter()
                .chain(extra)
                .filter_map(|name| catalog.group(name))
                .flat_map(|group| group.values().cloned())
                .collect()
        }
        Selection::Category(name) => catalog
            .group(name)
            .map(|group| group.values().cloned().collect())
            .unwrap_or_default(),
    }
}

/// Comments shown for `selection`.
///
/// `All` shows every comment; a named selection shows comments whose
/// `category` matches exactly.
pub fn filter_comments(comments: &[Comment], selection: &Selection) -> Vec<Comment> {
    match selection {
        Selection::All => comments.to_vec(),
        Selection::Category(name) => comments
            .iter()
            .filter(|c| c.category == *name)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_knight("Fictional", "q", Knight::new("Don Quixote", "Knight of the Sorrowful Face"))
            .with_knight("Historical", "w", Knight::new("William Marshal", "Earl of Pembroke"))
            .with_knight("Historical", "c", Knight::new("El Cid", "Campeador"))
            .with_knight("Legendary", "l", Knight::new("Lancelot", "Sir"))
            .with_knight("Legendary", "g", Knight::new("Gawain", "Sir"))
    }

    fn names(knights: &[Knight]) -> Vec<&str> {
        knights.iter().map(|k| k.name.as_str()).collect()
    }

    #[test]
    fn test_named_category_preserves_order() {
        let catalog = sample_catalog();
        let knights = select_by_category(&catalog, &Selection::from(Category::Historical));
        assert_eq!(names(&knights), ["William Marshal", "El Cid"]);
    }

    #[test]
    fn test_all_uses_fixed_category_order() {
        let catalog = sample_catalog();
        let knights = select_by_category(&catalog, &Selection::All);
        assert_eq!(
            names(&knights),
            ["William Marshal", "El Cid", "Lancelot", "Gawain", "Don Quixote"]
        );
    }

    #[test]
    fn test_all_has_no_duplicates_or_omissions() {
        let catalog = sample_catalog().with_knight("Mythic", "b", Knight::new("Beowulf", "Hero"));
        let knights = select_by_category(&catalog, &Selection::All);
        assert_eq!(knights.len(), catalog.len());

        let unique: HashSet<&str> = knights.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(unique.len(), knights.len());
        assert_eq!(knights.last().map(|k| k.name.as_str()), Some("Beowulf"));
    }

    #[test]
    fn test_all_tolerates_missing_groups() {
        let catalog = Catalog::new().with_knight("Legendary", "p", Knight::new("Percival", "Sir"));
        let knights = select_by_category(&catalog, &Selection::All);
        assert_eq!(names(&knights), ["Percival"]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = sample_catalog();
        assert!(select_by_category(&catalog, &Selection::parse("Unknown")).is_empty());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog = sample_catalog();
        let first = select_by_category(&catalog, &Selection::All);
        let second = select_by_category(&catalog, &Selection::All);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_comments() {
        let comments = vec![
            Comment { id: "1".into(), category: "Historical".into(), comment: "a".into() },
            Comment { id: "2".into(), category: "All".into(), comment: "b".into() },
            Comment { id: "3".into(), category: "Historical".into(), comment: "c".into() },
        ];

        let historical = filter_comments(&comments, &Selection::parse("Historical"));
        let ids: Vec<&str> = historical.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);

        assert_eq!(filter_comments(&comments, &Selection::All).len(), 3);
        assert!(filter_comments(&comments, &Selection::parse("Fictional")).is_empty());
    }
}
