// Crawl counters. They are a side channel: nothing in here changes what
// ends up in the graph.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::fetch::{FetchFailure, FetchOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureCounts {
    pub timeout: usize,
    pub connect: usize,
    pub status: usize,
    pub not_html: usize,
    pub body: usize,
    pub other: usize,
}

impl FailureCounts {
    pub fn total(&self) -> usize {
        self.timeout + self.connect + self.status + self.not_html + self.body + self.other
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages recorded in the visited set
    pub pages_claimed: usize,
    /// Claimed pages whose fetch returned HTML
    pub pages_fetched: usize,
    pub failures: FailureCounts,
    /// Times a candidate URL was turned away by robots.txt. A URL linked
    /// from several pages is counted once per rejection.
    pub robots_rejections: usize,
    /// Edges added to the graph
    pub links_recorded: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    pages_claimed: AtomicUsize,
    pages_fetched: AtomicUsize,
    robots_rejections: AtomicUsize,
    links_recorded: AtomicUsize,
    timeout: AtomicUsize,
    connect: AtomicUsize,
    status: AtomicUsize,
    not_html: AtomicUsize,
    body: AtomicUsize,
    other: AtomicUsize,
}

impl StatsRecorder {
    pub(crate) fn page_claimed(&self) {
        self.pages_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn robots_rejected(&self) {
        self.robots_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn links_recorded(&self, count: usize) {
        self.links_recorded.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn fetch_finished(&self, outcome: &FetchOutcome) {
        let counter = match outcome.failure() {
            None => &self.pages_fetched,
            Some(FetchFailure::Timeout) => &self.timeout,
            Some(FetchFailure::Connect) => &self.connect,
            Some(FetchFailure::Status(_)) => &self.status,
            Some(FetchFailure::NotHtml) => &self.not_html,
            Some(FetchFailure::Body) => &self.body,
            Some(FetchFailure::Other) => &self.other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, elapsed: Duration) -> CrawlStats {
        let load = |counter: &AtomicUsize| counter.load(Ordering::Relaxed);
        CrawlStats {
            pages_claimed: load(&self.pages_claimed),
            pages_fetched: load(&self.pages_fetched),
            failures: FailureCounts {
                timeout: load(&self.timeout),
                connect: load(&self.connect),
                status: load(&self.status),
                not_html: load(&self.not_html),
                body: load(&self.body),
                other: load(&self.other),
            },
            robots_rejections: load(&self.robots_rejections),
            links_recorded: load(&self.links_recorded),
            elapsed,
        }
    }
}
