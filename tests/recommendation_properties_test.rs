use library_recommender::core::SnapshotStore;
use library_recommender::{
    Book, BookCatalog, LibraryError, LibraryService, RecommendationEngine, Result,
    UserInteractionGraph,
};
use proptest::prelude::*;
use std::collections::HashMap;

const BOOKS: i64 = 15;

/// Discards every snapshot; these tests only look at the in-memory model.
struct NullStore;

impl SnapshotStore for NullStore {
    fn load(&self, borrow_limit: usize) -> Result<(BookCatalog, UserInteractionGraph)> {
        Ok((BookCatalog::new(), UserInteractionGraph::new(borrow_limit)))
    }

    fn save(&self, _: &BookCatalog, _: &UserInteractionGraph) -> Result<()> {
        Ok(())
    }
}

/// Replays `borrows` against a fresh library, skipping rejected requests.
fn library(borrows: &[(i64, i64)], borrow_limit: usize) -> LibraryService<NullStore> {
    let mut catalog = BookCatalog::new();
    for id in 0..BOOKS {
        catalog.insert(Book::new(id, format!("Book_{}", id))).unwrap();
    }
    let mut service =
        LibraryService::from_parts(NullStore, catalog, UserInteractionGraph::new(borrow_limit));

    for &(user, book) in borrows {
        match service.borrow(user, book) {
            Ok(_) => {}
            Err(LibraryError::AlreadyBorrowed { .. }) | Err(LibraryError::CapacityExceeded { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    service
}

fn borrow_sequence() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0_i64..10, 0_i64..BOOKS), 0..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Recommendations never repeat a book the user already holds.
    #[test]
    fn prop_recommendations_exclude_owned_books(
        borrows in borrow_sequence(),
        limit in 1_usize..8
    ) {
        let service = library(&borrows, limit);
        for &user in service.graph().users() {
            let owned = service.graph().neighbors(user).unwrap();
            for rec in service.recommend(user).unwrap() {
                prop_assert!(!owned.contains(&rec.book.id), "user {} owns {}", user, rec.book.id);
                prop_assert!(rec.score > 0);
            }
        }
    }

    /// Co-borrow similarity reads the same from either side.
    #[test]
    fn prop_similarity_is_symmetric(borrows in borrow_sequence(), limit in 1_usize..8) {
        let service = library(&borrows, limit);
        let graph = service.graph();
        let engine = RecommendationEngine::new(graph, service.catalog());
        for &u in graph.users() {
            let from_u = engine.similar_users(u).unwrap();
            for &v in graph.users().iter().filter(|&&v| v != u) {
                prop_assert_eq!(graph.shared_count(u, v), graph.shared_count(v, u));
                let from_v = engine.similar_users(v).unwrap();
                prop_assert_eq!(from_u.get(&v), from_v.get(&u));
            }
        }
    }

    /// The reverse-index scoring agrees with a pairwise scan of all users.
    #[test]
    fn prop_scores_match_pairwise_scan(borrows in borrow_sequence(), limit in 1_usize..8) {
        let service = library(&borrows, limit);
        let graph = service.graph();
        for &u in graph.users() {
            let mine = graph.neighbors(u).unwrap();
            let mut expected: HashMap<i64, u64> = HashMap::new();
            for &v in graph.users().iter().filter(|&&v| v != u) {
                let shared = graph.shared_count(u, v) as u64;
                if shared == 0 {
                    continue;
                }
                for b in graph.neighbors(v).unwrap().difference(mine) {
                    *expected.entry(*b).or_insert(0) += shared;
                }
            }
            let mut expected: Vec<(i64, u64)> = expected.into_iter().collect();
            expected.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

            let actual: Vec<(i64, u64)> = service
                .recommend(u)
                .unwrap()
                .into_iter()
                .map(|r| (r.book.id, r.score))
                .collect();
            prop_assert_eq!(actual, expected, "user {}", u);
        }
    }

    /// Counters move with edges and nobody exceeds the borrow limit.
    #[test]
    fn prop_counters_match_borrowers(borrows in borrow_sequence(), limit in 1_usize..8) {
        let service = library(&borrows, limit);
        for book in service.catalog().all() {
            let borrowers = service.graph().borrowers(book.id).map_or(0, |b| b.len());
            prop_assert_eq!(book.times_borrowed as usize, borrowers, "book {}", book.id);
        }
        for &user in service.graph().users() {
            prop_assert!(service.graph().borrowed_count(user) <= limit);
        }
    }

    /// Rankings are non-increasing in borrow count with ties broken by id,
    /// and a shorter ranking is a prefix of a longer one.
    #[test]
    fn prop_popularity_is_ordered(
        borrows in borrow_sequence(),
        limit in 1_usize..8,
        k in 0_usize..20
    ) {
        let service = library(&borrows, limit);
        let top = service.top_popular(BOOKS as usize);
        prop_assert_eq!(top.len(), BOOKS as usize);
        for pair in top.windows(2) {
            let ordered = pair[0].times_borrowed > pair[1].times_borrowed
                || (pair[0].times_borrowed == pair[1].times_borrowed && pair[0].id < pair[1].id);
            prop_assert!(ordered, "{:?} before {:?}", pair[0], pair[1]);
        }
        let shorter = service.top_popular(k);
        prop_assert_eq!(shorter.len(), k.min(top.len()));
        prop_assert_eq!(shorter.as_slice(), &top[..shorter.len()]);
    }
}
