//! Keyboard adjacency tables consumed by the spatial-pattern estimator.
//!
//! Loading these from persistent storage is out of scope (see the crate's
//! Non-goals) — they are embedded constants, built once at first use by a
//! small stagger-aware generator rather than hand-transcribed key-by-key.
//! The generator models each row as a horizontal line of keys offset by a
//! fractional key-width (the real physical stagger between e.g. the QWERTY
//! number row and the letter rows below it); two keys are adjacent if their
//! rounded positions differ by half a key-width in the expected direction.
//!
//! This is a representative embedding, not the exact production dataset:
//! match *producers* (which would walk these graphs to detect spatial
//! patterns in a password) are themselves out of scope, so only the degree
//! and cardinality statistics the estimator needs have to be faithful.

use std::collections::HashMap;

/// A named adjacency graph the spatial estimator can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Graph {
    Qwerty,
    Dvorak,
    Keypad,
    KeypadMac,
}

impl Graph {
    /// Whether this graph belongs to the "full keyboard" family (as opposed
    /// to a numeric keypad) for the purposes of §4.2's starting-position and
    /// average-degree lookup.
    pub fn is_full_keyboard(self) -> bool {
        matches!(self, Graph::Qwerty | Graph::Dvorak)
    }
}

type AdjacencyGraph = HashMap<char, Vec<Option<char>>>;

/// Builds a 6-neighbor-slot graph for a staggered, row-based keyboard.
/// `rows` pairs each row's characters (left to right) with that row's
/// horizontal offset, in half-key-width units, relative to row 0.
fn build_staggered_graph(rows: &[(&str, i32)]) -> AdjacencyGraph {
    // position of a key, in half-key-width units
    let positions: Vec<Vec<(char, i32)>> = rows
        .iter()
        .map(|(row, offset)| {
            row.chars()
                .enumerate()
                .map(|(col, ch)| (ch, *offset + 2 * col as i32))
                .collect()
        })
        .collect();

    let find_at = |row_idx: i32, pos: i32| -> Option<char> {
        let row = positions.get(row_idx as usize)?;
        row.iter().find(|(_, p)| *p == pos).map(|(c, _)| *c)
    };

    let mut graph = AdjacencyGraph::new();
    for (row_idx, row) in positions.iter().enumerate() {
        for &(ch, pos) in row {
            let neighbors = vec![
                find_at(row_idx as i32 - 1, pos - 1),
                find_at(row_idx as i32 - 1, pos + 1),
                find_at(row_idx as i32, pos - 2),
                find_at(row_idx as i32, pos + 2),
                find_at(row_idx as i32 + 1, pos - 1),
                find_at(row_idx as i32 + 1, pos + 1),
            ];
            graph.insert(ch, neighbors);
        }
    }
    graph
}

/// Builds an 8-neighbor-slot graph for a plain (non-staggered) numeric-pad
/// grid: up, down, left, right, and the four diagonals.
fn build_grid_graph(rows: &[&str]) -> AdjacencyGraph {
    let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
    let at = |r: i32, c: i32| -> Option<char> {
        if r < 0 || c < 0 {
            return None;
        }
        grid.get(r as usize)
            .and_then(|row| row.get(c as usize))
            .copied()
            .filter(|ch| *ch != ' ')
    };
    let mut graph = AdjacencyGraph::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &ch) in row.iter().enumerate() {
            if ch == ' ' {
                continue;
            }
            let r = r as i32;
            let c = c as i32;
            let neighbors = vec![
                at(r - 1, c - 1),
                at(r - 1, c),
                at(r - 1, c + 1),
                at(r, c - 1),
                at(r, c + 1),
                at(r + 1, c - 1),
                at(r + 1, c),
                at(r + 1, c + 1),
            ];
            graph.insert(ch, neighbors);
        }
    }
    graph
}

lazy_static! {
    /// US QWERTY, unshifted layer. Offsets (in half-key-width units,
    /// relative to the number row) approximate real physical stagger.
    pub static ref QWERTY: AdjacencyGraph = build_staggered_graph(&[
        ("1234567890-=", 0),
        ("qwertyuiop[]", 1),
        ("asdfghjkl;'", 2),
        ("zxcvbnm,./", 3),
    ]);

    /// Dvorak simplified keyboard, unshifted layer.
    pub static ref DVORAK: AdjacencyGraph = build_staggered_graph(&[
        ("1234567890[]", 0),
        ("',.pyfgcrl/=", 1),
        ("aoeuidhtns-", 2),
        (";qjkxbmwvz", 3),
    ]);

    /// Numeric keypad, standard layout.
    pub static ref KEYPAD: AdjacencyGraph = build_grid_graph(&[
        "/*-",
        "789+",
        "456 ",
        "123 ",
        " 0. ",
    ]);

    /// Numeric keypad, Mac layout (division/multiply on the top row, plus
    /// folded into the right column).
    pub static ref KEYPAD_MAC: AdjacencyGraph = build_grid_graph(&[
        "=/* ",
        "789-",
        "456+",
        "123 ",
        " 0. ",
    ]);
}
