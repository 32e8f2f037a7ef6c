//! Case-insensitive substring filtering of the master list

use crate::repository::DisplayRecord;

/// Indices of the records matching `query`, in master-list order.
///
/// An empty query matches everything. Otherwise a record matches when the
/// lowercased query is a substring of its lowercased identifier or username.
/// Stateless; the view is rebuilt from scratch on every call.
pub fn filter(records: &[DisplayRecord], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }

    let query = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record.identifier.to_lowercase().contains(&query)
                || (!record.username.is_empty() && record.username.to_lowercase().contains(&query))
        })
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ItemRepository;
    use crate::store::memory::{MemoryEntry, MemoryStore};

    fn repo() -> ItemRepository {
        let store = MemoryStore::new(vec![
            MemoryEntry::new("Email", &[("username", "alice")], b""),
            MemoryEntry::new("Bank", &[("application", "web"), ("username", "bob")], b""),
            MemoryEntry::new("GitHub", &[("username", "Alice.Dev")], b""),
            MemoryEntry::new("", &[("app_id", "org.chromium")], b""),
            MemoryEntry::new("", &[], b""),
        ]);
        ItemRepository::load(&store).unwrap()
    }

    fn is_subsequence(sub: &[usize], of: &[usize]) -> bool {
        let mut rest = of.iter();
        sub.iter().all(|x| rest.any(|y| y == x))
    }

    #[test]
    fn test_empty_query_is_identity() {
        let repo = repo();
        assert_eq!(filter(repo.records(), ""), (0..repo.len()).collect::<Vec<_>>());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn test_matches_identifier_or_username() {
        let repo = repo();
        let names = |q: &str| -> Vec<String> {
            filter(repo.records(), q)
                .into_iter()
                .map(|i| repo.records()[i].identifier.clone())
                .collect()
        };

        assert_eq!(names("ali"), vec!["Email", "GitHub"]);
        assert_eq!(names("web"), vec!["Bank: web"]);
        assert_eq!(names("chrom"), vec!["org.chromium"]);
        assert_eq!(names("unknown"), vec!["Unknown Item"]);
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let repo = repo();
        for q in ["ali", "BANK", "GitHub", "e", "x", "Item"] {
            assert_eq!(
                filter(repo.records(), q),
                filter(repo.records(), &q.to_uppercase()),
                "query {q:?}"
            );
        }
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let repo = repo();
        let all = filter(repo.records(), "");
        for q in ["a", "b", "e", "i", "ob", "web", "nothing"] {
            let view = filter(repo.records(), q);
            assert!(is_subsequence(&view, &all), "query {q:?} gave {view:?}");
        }
    }

    #[test]
    fn test_appending_never_widens() {
        let repo = repo();
        let wide = filter(repo.records(), "a");
        let narrow = filter(repo.records(), "al");
        assert!(is_subsequence(&narrow, &wide));
    }
}
