//! Graph coloring validation and greedy search

use crate::graph::{Edge, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Color id; negative values mean "uncolored"
pub type Color = i32;

/// Marker for a vertex without a color
pub const UNCOLORED: Color = -1;

/// Partial or full assignment vertex -> color
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coloring(BTreeMap<usize, Color>);

impl Coloring {
    /// Empty coloring
    pub fn new() -> Self {
        Self::default()
    }

    /// Coloring where vertex `i` gets `colors[i]`
    pub fn from_colors(colors: &[Color]) -> Self {
        Self(colors.iter().copied().enumerate().collect())
    }

    /// Set the color of `vertex`
    pub fn assign(&mut self, vertex: usize, color: Color) {
        self.0.insert(vertex, color);
    }

    /// Color of `vertex`, if the vertex appears in the mapping
    pub fn get(&self, vertex: usize) -> Option<Color> {
        self.0.get(&vertex).copied()
    }

    /// Whether `vertex` carries a non-negative color
    pub fn is_colored(&self, vertex: usize) -> bool {
        self.get(vertex).is_some_and(|c| c >= 0)
    }

    /// Number of vertices in the mapping
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(vertex, color)` in vertex order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.0.iter().map(|(&v, &c)| (v, c))
    }

    /// Number of distinct non-negative colors in use
    pub fn colors_used(&self) -> usize {
        self.0.values().filter(|&&c| c >= 0).collect::<BTreeSet<_>>().len()
    }

    /// Every vertex of `graph` carries a non-negative color
    pub fn is_complete(&self, graph: &Graph) -> bool {
        (0..graph.vertices).all(|v| self.is_colored(v))
    }
}

impl fmt::Display for Coloring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(v, c)| {
                if c >= 0 {
                    format!("{}:{}", v, c)
                } else {
                    format!("{}:-", v)
                }
            })
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Edges whose endpoints share the same non-negative color
pub fn conflicts(graph: &Graph, coloring: &Coloring) -> Vec<Edge> {
    graph
        .edges
        .iter()
        .copied()
        .filter(|&(a, b)| match (coloring.get(a), coloring.get(b)) {
            (Some(ca), Some(cb)) => ca == cb && ca >= 0,
            _ => false,
        })
        .collect()
}

/// No edge connects two vertices with the same non-negative color
pub fn is_valid_coloring(graph: &Graph, coloring: &Coloring) -> bool {
    conflicts(graph, coloring).is_empty()
}

// ============================================================================
// Greedy Search
// ============================================================================

/// Smallest color in `0..k` not used by an already-colored neighbor of `vertex`
pub fn smallest_free_color(
    graph: &Graph,
    coloring: &Coloring,
    vertex: usize,
    k: usize,
) -> Option<Color> {
    let used: BTreeSet<Color> = graph
        .neighbors(vertex)
        .filter_map(|n| coloring.get(n))
        .filter(|&c| c >= 0)
        .collect();
    (0..k as Color).find(|c| !used.contains(c))
}

/// Greedy coloring in vertex-index order with at most `k` colors
///
/// Returns `None` as soon as some vertex has no legal color.
pub fn greedy_coloring(graph: &Graph, k: usize) -> Option<Coloring> {
    let mut coloring = Coloring::new();
    for vertex in 0..graph.vertices {
        let color = smallest_free_color(graph, &coloring, vertex, k)?;
        coloring.assign(vertex, color);
    }
    Some(coloring)
}

// ============================================================================
// Color Budget
// ============================================================================

/// How a requested color count compares with the chromatic number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorBudget {
    /// Fewer colors than the chromatic number
    Impossible { required: usize },
    /// Exactly the chromatic number
    Optimal,
    /// More colors than needed
    OverColoring { required: usize },
}

/// Compare `k` with the graph's chromatic number
pub fn assess_color_count(graph: &Graph, k: usize) -> ColorBudget {
    use std::cmp::Ordering;
    match k.cmp(&graph.chromatic) {
        Ordering::Less => ColorBudget::Impossible {
            required: graph.chromatic,
        },
        Ordering::Equal => ColorBudget::Optimal,
        Ordering::Greater => ColorBudget::OverColoring {
            required: graph.chromatic,
        },
    }
}

impl fmt::Display for ColorBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorBudget::Impossible { required } => {
                write!(f, "impossible: needs at least {} colors", required)
            }
            ColorBudget::Optimal => write!(f, "optimal"),
            ColorBudget::OverColoring { required } => {
                write!(f, "over-coloring: only {} colors needed", required)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{catalog, find_graph};

    #[test]
    fn test_edgeless_graph_always_valid() {
        let g = Graph::new("empty", 4, vec![], 1).unwrap();
        assert!(is_valid_coloring(&g, &Coloring::from_colors(&[0, 0, 0, 0])));
        assert!(is_valid_coloring(&g, &Coloring::from_colors(&[3, 1, 3, 7])));
        assert!(is_valid_coloring(&g, &Coloring::new()));
    }

    #[test]
    fn test_conflict_detection() {
        let tri = find_graph("Triangle (K3)").unwrap();
        let bad = Coloring::from_colors(&[0, 1, 1]);
        assert!(!is_valid_coloring(&tri, &bad));
        assert_eq!(conflicts(&tri, &bad), vec![(1, 2)]);
        assert!(is_valid_coloring(&tri, &Coloring::from_colors(&[0, 1, 2])));
    }

    #[test]
    fn test_uncolored_vertices_never_conflict() {
        let tri = find_graph("Triangle (K3)").unwrap();
        let partial = Coloring::from_colors(&[UNCOLORED, UNCOLORED, 0]);
        assert!(is_valid_coloring(&tri, &partial));

        let mut missing = Coloring::new();
        missing.assign(0, 1);
        assert!(is_valid_coloring(&tri, &missing));
        assert!(!missing.is_complete(&tri));
    }

    #[test]
    fn test_greedy_fails_below_chromatic_number() {
        for g in catalog() {
            if g.chromatic > 1 {
                assert!(
                    greedy_coloring(&g, g.chromatic - 1).is_none(),
                    "{} colored with too few colors",
                    g.name
                );
            }
        }
    }

    #[test]
    fn test_greedy_reaches_chromatic_number_on_catalog() {
        for g in catalog() {
            let coloring = greedy_coloring(&g, g.chromatic)
                .unwrap_or_else(|| panic!("{} not colored with chromatic count", g.name));
            assert!(is_valid_coloring(&g, &coloring));
            assert!(coloring.is_complete(&g));
            assert!(coloring.colors_used() <= g.chromatic);
        }
    }

    #[test]
    fn test_greedy_bipartite_order() {
        let k23 = find_graph("Bipartite K2,3").unwrap();
        let coloring = greedy_coloring(&k23, 2).unwrap();
        assert_eq!(coloring, Coloring::from_colors(&[0, 0, 1, 1, 1]));
    }

    #[test]
    fn test_smallest_free_color() {
        let square = find_graph("Square Cycle").unwrap();
        let partial = Coloring::from_colors(&[0, 1]);
        assert_eq!(smallest_free_color(&square, &partial, 2, 2), Some(0));
        assert_eq!(smallest_free_color(&square, &partial, 3, 2), Some(1));

        let k4 = find_graph("Complete K4").unwrap();
        let three = Coloring::from_colors(&[0, 1, 2]);
        assert_eq!(smallest_free_color(&k4, &three, 3, 3), None);
    }

    #[test]
    fn test_assess_color_count() {
        let pentagon = find_graph("Pentagon Cycle").unwrap();
        assert_eq!(
            assess_color_count(&pentagon, 2),
            ColorBudget::Impossible { required: 3 }
        );
        assert_eq!(assess_color_count(&pentagon, 3), ColorBudget::Optimal);
        assert_eq!(
            assess_color_count(&pentagon, 4),
            ColorBudget::OverColoring { required: 3 }
        );
    }

    #[test]
    fn test_display() {
        let c = Coloring::from_colors(&[0, UNCOLORED, 2]);
        assert_eq!(c.to_string(), "{0:0, 1:-, 2:2}");
    }
}
