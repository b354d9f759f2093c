// Shared state of one crawl: the visited set and the edge list.
//
// Every concurrent branch of the crawl writes here. `claim` is the one
// operation that must be atomic: checking whether a URL is visited and
// recording it happen under the same shard lock of the DashMap, so two
// branches racing on the same URL cannot both win.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use url::Url;

use crate::graph::{CrawlGraph, Edge};

#[derive(Debug, Default)]
pub(crate) struct CrawlState {
    visited: DashMap<String, u32>,
    edges: Mutex<Vec<Edge>>,
}

impl CrawlState {
    pub(crate) fn is_claimed(&self, url: &Url) -> bool {
        self.visited.contains_key(url.as_str())
    }

    /// Records `url` at `depth` if nobody has yet. Returns true for the
    /// caller that gets to fetch and explore it.
    pub(crate) fn claim(&self, url: &Url, depth: u32) -> bool {
        match self.visited.entry(url.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(depth);
                true
            }
        }
    }

    pub(crate) fn record_edges<'a>(&self, source: &Url, targets: impl IntoIterator<Item = &'a Url>) {
        // A panic while holding the lock cannot leave the Vec half-written
        let mut edges = self.edges.lock().unwrap_or_else(PoisonError::into_inner);
        edges.extend(
            targets
                .into_iter()
                .map(|target| Edge::new(source.as_str(), target.as_str())),
        );
    }

    pub(crate) fn into_graph(self) -> CrawlGraph {
        CrawlGraph {
            visited: self.visited.into_iter().collect::<BTreeMap<_, _>>(),
            edges: self.edges.into_inner().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_once() {
        let state = CrawlState::default();
        let url = Url::parse("http://a.test/page").unwrap();

        assert!(!state.is_claimed(&url));
        assert!(state.claim(&url, 2));
        assert!(!state.claim(&url, 3));
        assert!(state.is_claimed(&url));

        let graph = state.into_graph();
        assert_eq!(graph.depth_of("http://a.test/page"), Some(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_claims_have_one_winner() {
        let state = Arc::new(CrawlState::default());
        let url = Url::parse("http://a.test/contested").unwrap();

        let tasks: Vec<_> = (1..=32)
            .map(|depth| {
                let state = Arc::clone(&state);
                let url = url.clone();
                tokio::spawn(async move { state.claim(&url, depth) })
            })
            .collect();

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        let state = Arc::try_unwrap(state).unwrap();
        assert_eq!(state.into_graph().visited.len(), 1);
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let state = CrawlState::default();
        let source = Url::parse("http://a.test/").unwrap();
        let targets = [
            Url::parse("http://a.test/z").unwrap(),
            Url::parse("http://a.test/a").unwrap(),
        ];

        state.record_edges(&source, &targets);
        state.record_edges(&source, &targets[..1]);

        let graph = state.into_graph();
        let recorded: Vec<_> = graph.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(
            recorded,
            vec!["http://a.test/z", "http://a.test/a", "http://a.test/z"]
        );
    }
}
