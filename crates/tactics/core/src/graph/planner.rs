//! Dijkstra search over the learned terrain graph.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use super::TerrainGraph;
use crate::state::{Grid, Position};

/// Cheapest path found by [`shortest_path`], start cell included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    cells: Vec<Position>,
    cost: u64,
}

impl ShortestPath {
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Sum of learned edge weights along the path.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn start(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    pub fn destination(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Number of moves needed to follow the path.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Cells still to walk, next cell first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    cells: VecDeque<Position>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn peek(&self) -> Option<Position> {
        self.cells.front().copied()
    }

    pub fn pop(&mut self) -> Option<Position> {
        self.cells.pop_front()
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

impl From<ShortestPath> for Route {
    /// Drops the start cell: the unit already stands there.
    fn from(path: ShortestPath) -> Self {
        let mut cells = VecDeque::from(path.cells);
        cells.pop_front();
        Self { cells }
    }
}

/// Cheapest path from `start` to the first settled cell within `range` of
/// `target` on both axes.
///
/// Ties between equally cheap frontier cells settle the lowest row first,
/// then the lowest column. Returns `None` when `start` is off the graph or
/// no such cell is reachable. A start cell already within range yields a
/// single-cell path.
pub fn shortest_path(
    graph: &TerrainGraph,
    start: Position,
    target: Position,
    range: u32,
) -> Option<ShortestPath> {
    if !graph.contains(start) {
        return None;
    }

    let dimensions = graph.dimensions();
    let mut distance = Grid::filled(dimensions, u64::MAX);
    let mut parent: Grid<Option<Position>> = Grid::filled(dimensions, None);
    let mut settled = Grid::filled(dimensions, false);
    let mut frontier = BinaryHeap::new();

    if let Some(slot) = distance.get_mut(start) {
        *slot = 0;
    }
    frontier.push(Reverse((0u64, start.y, start.x)));

    while let Some(Reverse((cost, y, x))) = frontier.pop() {
        let current = Position::new(x, y);
        match settled.get_mut(current) {
            Some(done) if !*done => *done = true,
            _ => continue,
        }

        if current.within_box(target, range) {
            return Some(ShortestPath {
                cells: unwind(&parent, start, current),
                cost,
            });
        }

        for (_, next, weight) in graph.neighbours(current) {
            let candidate = cost.saturating_add(u64::from(weight));
            let Some(best) = distance.get_mut(next) else {
                continue;
            };
            if candidate < *best {
                *best = candidate;
                if let Some(slot) = parent.get_mut(next) {
                    *slot = Some(current);
                }
                frontier.push(Reverse((candidate, next.y, next.x)));
            }
        }
    }

    tracing::debug!(%start, %target, range, "no route on terrain graph");
    None
}

fn unwind(parent: &Grid<Option<Position>>, start: Position, end: Position) -> Vec<Position> {
    let mut cells = vec![end];
    let mut cursor = end;
    while cursor != start {
        match parent.get(cursor).copied().flatten() {
            Some(previous) => {
                cells.push(previous);
                cursor = previous;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}
