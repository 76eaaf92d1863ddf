//! Crawl frontier: pending queue plus visited set
//!
//! A URL is marked visited the moment it is accepted into `pending`, so the
//! same URL can never be queued twice, no matter how many pages link to it.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of URLs to handle, with the set of every URL ever accepted
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    pending: VecDeque<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the seed
    pub fn with_seed(seed: Url) -> Self {
        let mut frontier = Self::new();
        frontier.offer(seed);
        frontier
    }

    /// Enqueues `url` unless it was seen before
    ///
    /// The visited check and both insertions happen in this one call.
    /// Returns true if the URL was accepted.
    pub fn offer(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    /// Offers every URL in order; returns how many were accepted
    pub fn offer_all(&mut self, urls: impl IntoIterator<Item = Url>) -> usize {
        let mut accepted = 0;
        for url in urls {
            if self.offer(url) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Takes the oldest pending URL (breadth-first order)
    pub fn next_url(&mut self) -> Option<Url> {
        self.pending.pop_front()
    }

    /// Returns the number of URLs waiting to be handled
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the number of URLs ever accepted
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Returns whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending URLs in dequeue order
    pub fn pending(&self) -> impl Iterator<Item = &Url> {
        self.pending.iter()
    }
}
