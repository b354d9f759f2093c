// src/graph.rs
// =============================================================================
// The crawl result: which pages were visited (with their depth) and which
// links were seen between pages.
//
// - visited: URL -> depth, seed = 1. A URL appears at most once.
// - edges: (source, target) in discovery order. Duplicates are allowed and
//   targets may never have been visited ("dangling" edges, e.g. past the
//   depth limit or blocked by robots.txt).
//
// The graph can be saved as JSON and reloaded later without crawling again.
// `visited` is a BTreeMap so the file is stable: save -> load -> save gives
// the same bytes.
// =============================================================================

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CartographerError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlGraph {
    pub visited: BTreeMap<String, u32>,
    pub edges: Vec<Edge>,
}

/// A node as seen by a graph consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    /// None for targets of dangling edges
    pub depth: Option<u32>,
    pub in_degree: usize,
    pub out_degree: usize,
}

impl CrawlGraph {
    pub fn depth_of(&self, url: &str) -> Option<u32> {
        self.visited.get(url).copied()
    }

    /// Edges whose target was never visited
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| !self.visited.contains_key(&edge.target))
    }

    /// Builds the node set a downstream graph would contain: every visited
    /// URL plus every edge endpoint. Degrees count distinct edges, so a link
    /// recorded twice between the same pair counts once.
    pub fn nodes(&self) -> BTreeMap<&str, NodeSummary> {
        let mut nodes: BTreeMap<&str, NodeSummary> = self
            .visited
            .iter()
            .map(|(url, depth)| {
                (
                    url.as_str(),
                    NodeSummary {
                        depth: Some(*depth),
                        in_degree: 0,
                        out_degree: 0,
                    },
                )
            })
            .collect();

        let distinct: HashSet<(&str, &str)> = self
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect();

        for (source, target) in distinct {
            nodes
                .entry(source)
                .or_insert_with(|| empty_node(self.depth_of(source)))
                .out_degree += 1;
            nodes
                .entry(target)
                .or_insert_with(|| empty_node(self.depth_of(target)))
                .in_degree += 1;
        }

        nodes
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| CartographerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Saved {} node(s) and {} edge(s) to {}",
            self.visited.len(),
            self.edges.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CartographerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

fn empty_node(depth: Option<u32>) -> NodeSummary {
    NodeSummary {
        depth,
        in_degree: 0,
        out_degree: 0,
    }
}
