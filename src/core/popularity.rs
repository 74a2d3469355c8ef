use crate::core::catalog::BookCatalog;
use crate::domain::model::Book;
use std::cmp::Reverse;

/// Ranks the catalog by borrow count, highest first, ties by ascending id.
#[derive(Debug, Clone, Copy)]
pub struct PopularityRanker<'a> {
    catalog: &'a BookCatalog,
}

impl<'a> PopularityRanker<'a> {
    pub fn new(catalog: &'a BookCatalog) -> Self {
        Self { catalog }
    }

    /// Up to `k` books by descending borrow count, ties by ascending id.
    pub fn top(&self, k: usize) -> Vec<Book> {
        let mut ranked: Vec<&Book> = self.catalog.all().iter().collect();
        ranked.sort_by_key(|book| (Reverse(book.times_borrowed), book.id));
        ranked.into_iter().take(k).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(counts: &[(i64, u64)]) -> BookCatalog {
        let mut catalog = BookCatalog::new();
        for &(id, n) in counts {
            catalog
                .insert(Book::new(id, format!("Book_{}", id)).with_times_borrowed(n))
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_tie_broken_by_id() {
        let catalog = catalog(&[(102, 3), (103, 1), (101, 3)]);
        let top: Vec<_> = PopularityRanker::new(&catalog).top(2).iter().map(|b| b.id).collect();
        assert_eq!(top, vec![101, 102]);
    }

    #[test]
    fn test_k_larger_than_catalog() {
        let catalog = catalog(&[(1, 0), (2, 5)]);
        let top = PopularityRanker::new(&catalog).top(10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, 2);
    }

    #[test]
    fn test_zero_k_and_empty_catalog() {
        let full = catalog(&[(1, 1)]);
        assert!(PopularityRanker::new(&full).top(0).is_empty());
        assert!(PopularityRanker::new(&BookCatalog::new()).top(3).is_empty());
    }

    #[test]
    fn test_ranking_is_non_increasing() {
        let catalog = catalog(&[(5, 2), (4, 9), (3, 2), (2, 0), (1, 9), (6, 4)]);
        let top = PopularityRanker::new(&catalog).top(6);
        for pair in top.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.times_borrowed > b.times_borrowed
                || (a.times_borrowed == b.times_borrowed && a.id < b.id));
        }
    }
}
