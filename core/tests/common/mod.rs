//! Shared graph fixtures for integration tests, built from the real CSR data in
//! `examples/original_source/test/baseline/`.

use gxvm_core::graph::Graph;

/// The 6-node undirected graph from `shortestpath.c`, unweighted (all weights 1).
pub fn shortestpath_graph() -> Graph {
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

/// The 6-node weighted digraph from `sssp.c`.
pub fn sssp_graph() -> Graph {
    let row_index = vec![0, 3, 6, 10, 13, 15, 18];
    let col_index = vec![
        1, 2, 5, // node 0
        0, 2, 3, // node 1
        0, 1, 3, 5, // node 2
        1, 2, 4, // node 3
        3, 5, // node 4
        0, 2, 4, // node 5
    ];
    let values = vec![
        7, 9, 14, // node 0
        7, 10, 15, // node 1
        9, 10, 11, 2, // node 2
        15, 11, 6, // node 3
        6, 9, // node 4
        14, 2, 9, // node 5
    ];
    Graph::new(row_index, col_index, values)
}
