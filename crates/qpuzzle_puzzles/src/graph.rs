//! Graphs and the built-in example catalog

use qpuzzle_core::{QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Undirected edge between two vertex indices
pub type Edge = (usize, usize);

/// Small undirected graph with a known chromatic number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Display name
    pub name: String,

    /// Number of vertices, indexed `0..vertices`
    pub vertices: usize,

    /// Edge list
    pub edges: Vec<Edge>,

    /// Minimum number of colors for a proper coloring
    pub chromatic: usize,
}

impl Graph {
    /// Create a graph, rejecting self-loops and out-of-range endpoints
    pub fn new(
        name: impl Into<String>,
        vertices: usize,
        edges: Vec<Edge>,
        chromatic: usize,
    ) -> QpuzzleResult<Self> {
        if let Some(&(a, b)) = edges
            .iter()
            .find(|&&(a, b)| a == b || a >= vertices || b >= vertices)
        {
            return Err(QpuzzleError::InvalidEdge(a, b));
        }
        Ok(Self {
            name: name.into(),
            vertices,
            edges,
            chromatic,
        })
    }

    /// Vertices adjacent to `v`, in edge-list order
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter_map(move |&(a, b)| {
            if a == v {
                Some(b)
            } else if b == v {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Number of edges touching `v`
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Greatest degree over all vertices
    pub fn max_degree(&self) -> usize {
        (0..self.vertices).map(|v| self.degree(v)).max().unwrap_or(0)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (V={}, E={}, chromatic={})",
            self.name,
            self.vertices,
            self.edges.len(),
            self.chromatic
        )
    }
}

// ============================================================================
// Catalog
// ============================================================================

struct CatalogEntry {
    name: &'static str,
    vertices: usize,
    edges: &'static [Edge],
    chromatic: usize,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Triangle (K3)",
        vertices: 3,
        edges: &[(0, 1), (1, 2), (2, 0)],
        chromatic: 3,
    },
    CatalogEntry {
        name: "Square Cycle",
        vertices: 4,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 0)],
        chromatic: 2,
    },
    CatalogEntry {
        name: "Pentagon Cycle",
        vertices: 5,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
        chromatic: 3,
    },
    CatalogEntry {
        name: "Hexagon Cycle",
        vertices: 6,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)],
        chromatic: 2,
    },
    CatalogEntry {
        name: "Complete K4",
        vertices: 4,
        edges: &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        chromatic: 4,
    },
    CatalogEntry {
        name: "Complete K5",
        vertices: 5,
        edges: &[
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 3),
            (2, 4),
            (3, 4),
        ],
        chromatic: 5,
    },
    CatalogEntry {
        name: "Bipartite K2,3",
        vertices: 5,
        edges: &[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)],
        chromatic: 2,
    },
    // Hub 0 plus an even rim cycle 1-2-3-4
    CatalogEntry {
        name: "Wheel W4",
        vertices: 5,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 1), (0, 2), (0, 3), (0, 4)],
        chromatic: 3,
    },
    CatalogEntry {
        name: "Star S5",
        vertices: 6,
        edges: &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)],
        chromatic: 2,
    },
    // Hexagon with chords 0-3 and 1-4; both chords join opposite parity classes
    CatalogEntry {
        name: "Complex Mixed",
        vertices: 6,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (0, 3), (1, 4)],
        chromatic: 2,
    },
];

impl CatalogEntry {
    fn to_graph(&self) -> Graph {
        Graph {
            name: self.name.to_string(),
            vertices: self.vertices,
            edges: self.edges.to_vec(),
            chromatic: self.chromatic,
        }
    }
}

/// Every catalog graph, in display order
pub fn catalog() -> Vec<Graph> {
    CATALOG.iter().map(CatalogEntry::to_graph).collect()
}

/// Catalog graph names, in display order
pub fn catalog_names() -> Vec<&'static str> {
    CATALOG.iter().map(|e| e.name).collect()
}

/// Look up a catalog graph by name (case-insensitive)
pub fn find_graph(name: &str) -> QpuzzleResult<Graph> {
    CATALOG
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
        .map(CatalogEntry::to_graph)
        .ok_or_else(|| QpuzzleError::UnknownGraph(name.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
