//! User-based collaborative filtering.
//!
//! Similarity between two users is the raw number of books both have
//! borrowed. Every other user with a non-zero similarity adds that
//! similarity to the score of each book they hold that the target user does
//! not. Results are ordered by score descending, then by book id ascending.

use crate::core::catalog::BookCatalog;
use crate::core::graph::UserInteractionGraph;
use crate::domain::model::{BookId, Recommendation, UserId};
use crate::utils::error::{LibraryError, Result};
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    graph: &'a UserInteractionGraph,
    catalog: &'a BookCatalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(graph: &'a UserInteractionGraph, catalog: &'a BookCatalog) -> Self {
        Self { graph, catalog }
    }

    /// Similarity of every user sharing at least one book with `user_id`.
    pub fn similar_users(&self, user_id: UserId) -> Result<HashMap<UserId, u64>> {
        let my_books = self
            .graph
            .neighbors(user_id)
            .ok_or(LibraryError::UnknownUser { user_id })?;

        let mut shared: HashMap<UserId, u64> = HashMap::new();
        for book_id in my_books {
            let Some(borrowers) = self.graph.borrowers(*book_id) else {
                continue;
            };
            for &other in borrowers.iter().filter(|&&other| other != user_id) {
                *shared.entry(other).or_insert(0) += 1;
            }
        }
        Ok(shared)
    }

    /// Books held by similar users but not by `user_id`, ordered by score
    /// then id.
    pub fn recommend(&self, user_id: UserId) -> Result<Vec<Recommendation>> {
        let similar = self.similar_users(user_id)?;
        let my_books = self
            .graph
            .neighbors(user_id)
            .ok_or(LibraryError::UnknownUser { user_id })?;

        let mut scores: HashMap<BookId, u64> = HashMap::new();
        for (other, similarity) in &similar {
            let Some(their_books) = self.graph.neighbors(*other) else {
                continue;
            };
            for book_id in their_books.difference(my_books) {
                *scores.entry(*book_id).or_insert(0) += similarity;
            }
        }

        let mut ranked: Vec<(BookId, u64)> = scores.into_iter().filter(|(_, s)| *s > 0).collect();
        ranked.sort_by_key(|&(book_id, score)| (Reverse(score), book_id));

        tracing::debug!(
            user_id,
            neighbours = similar.len(),
            candidates = ranked.len(),
            "Computed recommendations"
        );

        Ok(ranked
            .into_iter()
            .filter_map(|(book_id, score)| match self.catalog.get(book_id) {
                Ok(book) => Some(Recommendation {
                    book: book.clone(),
                    score,
                }),
                Err(_) => {
                    tracing::warn!(book_id, "Recommended book missing from catalog, skipping");
                    None
                }
            })
            .collect())
    }
}
