//! Read-only CSR (compressed sparse row) graph (spec §3, §4.1).
//!
//! Grounded on `examples/original_source/src/graph.c`: binary search over a sorted
//! per-row slice of `col_index`, a degree query from adjacent `row_index` offsets, and an
//! O(1) neighbour-slice view. The original's `int`/`unsigned int` fields become `i32`
//! here so that node IDs stay signed end to end, matching spec §3 ("Node ID. Signed
//! 32-bit integer").

/// Immutable compressed-sparse-row graph. Built once at load time; never mutated during
/// a run (spec §1 non-goal: "no graph mutation at runtime").
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    row_index: Vec<i32>,
    col_index: Vec<i32>,
    values: Vec<i32>,
}

impl Graph {
    /// Build a graph from its three CSR arrays. `row_index` must have `n + 1` entries
    /// with `row_index[0] == 0`; each row's slice of `col_index` must already be sorted
    /// ascending (the load-time invariant binary search depends on).
    pub fn new(row_index: Vec<i32>, col_index: Vec<i32>, values: Vec<i32>) -> Self {
        let n = row_index.len().saturating_sub(1);
        Graph {
            n,
            row_index,
            col_index,
            values,
        }
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.col_index.len()
    }

    fn row_range(&self, u: i32) -> Option<std::ops::Range<usize>> {
        if u < 0 || u as usize >= self.n {
            return None;
        }
        let u = u as usize;
        let start = *self.row_index.get(u)? as usize;
        let end = *self.row_index.get(u + 1)? as usize;
        Some(start..end)
    }

    /// `row_index[u+1] - row_index[u]`, or `None` if `u` is out of range.
    pub fn degree(&self, u: i32) -> Option<i32> {
        self.row_range(u).map(|r| (r.end - r.start) as i32)
    }

    /// The neighbour slice for `u` (ascending order), or `None` if `u` is out of range.
    pub fn neighbors(&self, u: i32) -> Option<&[i32]> {
        let r = self.row_range(u)?;
        Some(&self.col_index[r])
    }

    /// `true` iff `v` appears in `u`'s neighbour slice. Uses binary search, per the
    /// load-bearing invariant that each row's neighbours are sorted ascending.
    pub fn has_edge(&self, u: i32, v: i32) -> bool {
        match self.neighbors(u) {
            Some(row) => row.binary_search(&v).is_ok(),
            None => false,
        }
    }

    /// Weight of edge `(u, v)`, or `0` if the edge does not exist (zero sentinel,
    /// spec §4.1).
    pub fn get_weight(&self, u: i32, v: i32) -> i32 {
        let Some(range) = self.row_range(u) else {
            return 0;
        };
        let row = &self.col_index[range.clone()];
        match row.binary_search(&v) {
            Ok(idx) => self.values[range.start + idx],
            Err(_) => 0,
        }
    }

    /// Source node, destination node, and weight of the edge at global edge index
    /// `eiter`, if it exists under node `u`'s row (used by `ENEXT`). Returns `None` when
    /// `eiter` has run past the end of `u`'s row.
    pub fn edge_at(&self, u: i32, eiter: u32) -> Option<(i32, i32)> {
        let range = self.row_range(u)?;
        let idx = range.start + eiter as usize;
        if idx >= range.end {
            return None;
        }
        Some((self.col_index[idx], self.values[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the 6-node undirected graph from
    /// `examples/original_source/test/baseline/src/shortestpath.c`, as an unweighted
    /// CSR (weights set to 1 for every edge).
    fn shortestpath_graph() -> Graph {
        // adjacency matrix, row i lists neighbours of node i ascending.
        let rows: [&[i32]; 6] = [
            &[1, 2, 5],
            &[0, 2, 3],
            &[0, 1, 3, 5],
            &[1, 2, 4],
            &[3, 5],
            &[0, 2, 4],
        ];
        let mut row_index = vec![0i32];
        let mut col_index = Vec::new();
        for row in rows.iter() {
            col_index.extend_from_slice(row);
            row_index.push(col_index.len() as i32);
        }
        let values = vec![1; col_index.len()];
        Graph::new(row_index, col_index, values)
    }

    #[test]
    fn degree_matches_row_span() {
        let g = shortestpath_graph();
        assert_eq!(g.degree(2), Some(4));
        assert_eq!(g.degree(4), Some(2));
    }

    #[test]
    fn has_edge_uses_sorted_slice() {
        let g = shortestpath_graph();
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(0, 3));
        assert!(g.has_edge(2, 5));
    }

    #[test]
    fn degree_out_of_range_is_none() {
        let g = shortestpath_graph();
        assert_eq!(g.degree(99), None);
        assert!(!g.has_edge(99, 0));
    }

    #[test]
    fn get_weight_zero_sentinel_for_missing_edge() {
        let g = shortestpath_graph();
        assert_eq!(g.get_weight(0, 3), 0);
        assert_eq!(g.get_weight(0, 1), 1);
    }

    #[test]
    fn neighbors_view_has_no_copy_semantics_surprises() {
        let g = shortestpath_graph();
        assert_eq!(g.neighbors(0), Some(&[1, 2, 5][..]));
    }
}
