//! 8-connected terrain graph with directional, learnable edge weights.

use crate::env::{MapDimensions, TerrainOracle};
use crate::state::{Direction, Grid, Position};

/// Cost assigned to every traversable edge before training.
pub const INITIAL_EDGE_COST: u32 = (i32::MAX / 2) as u32;

/// Weight of a directional edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeWeight {
    /// No traversal possible: map boundary or unwalkable destination.
    Impassable,
    Cost(u32),
}

impl EdgeWeight {
    pub const INITIAL: Self = EdgeWeight::Cost(INITIAL_EDGE_COST);

    pub fn cost(self) -> Option<u32> {
        match self {
            EdgeWeight::Impassable => None,
            EdgeWeight::Cost(cost) => Some(cost),
        }
    }

    pub fn is_passable(self) -> bool {
        matches!(self, EdgeWeight::Cost(_))
    }

    /// Adds `error` to a finite cost, saturating at 0 and `u32::MAX`.
    /// Impassable edges stay impassable.
    pub fn adjusted(self, error: i64) -> Self {
        match self {
            EdgeWeight::Impassable => EdgeWeight::Impassable,
            EdgeWeight::Cost(cost) => {
                let value = (i64::from(cost) + error).clamp(0, i64::from(u32::MAX));
                EdgeWeight::Cost(value as u32)
            }
        }
    }
}

/// One cell of the terrain graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub visited: bool,
    edges: [EdgeWeight; Direction::COUNT],
}

impl Node {
    const ISOLATED: Self = Self {
        visited: false,
        edges: [EdgeWeight::Impassable; Direction::COUNT],
    };

    pub fn edge(&self, direction: Direction) -> EdgeWeight {
        self.edges[direction.slot()]
    }

    pub fn edges(&self) -> impl Iterator<Item = (Direction, EdgeWeight)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, self.edges[direction.slot()]))
    }
}

/// Per-agent weighted graph over every grid cell.
///
/// Built once from static walkability. An edge from A towards B is passable
/// iff both A and B are walkable cells on the map, so construction is
/// symmetric; training adjusts both directions of an edge together but does
/// not re-check symmetry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGraph {
    nodes: Grid<Node>,
}

impl TerrainGraph {
    pub fn build<T: TerrainOracle + ?Sized>(terrain: &T) -> Self {
        let nodes = Grid::from_fn(terrain.dimensions(), |position| {
            if !terrain.is_walkable(position) {
                return Node::ISOLATED;
            }
            let mut node = Node::ISOLATED;
            for direction in Direction::ALL {
                if terrain.is_walkable(position.step(direction)) {
                    node.edges[direction.slot()] = EdgeWeight::INITIAL;
                }
            }
            node
        });
        Self { nodes }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.nodes.dimensions()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.nodes.contains(position)
    }

    pub fn node(&self, position: Position) -> Option<&Node> {
        self.nodes.get(position)
    }

    /// Edge leaving `position` towards `direction`; off-grid is impassable.
    pub fn edge(&self, position: Position, direction: Direction) -> EdgeWeight {
        self.nodes
            .get(position)
            .map_or(EdgeWeight::Impassable, |node| node.edge(direction))
    }

    /// Adds `error` to the edge leaving `position` towards `direction`.
    pub fn adjust_edge(&mut self, position: Position, direction: Direction, error: i64) {
        if let Some(node) = self.nodes.get_mut(position) {
            let slot = direction.slot();
            node.edges[slot] = node.edges[slot].adjusted(error);
        }
    }

    /// Adds `error` to both directions of the edge between `position` and its
    /// neighbour in `direction`. Returns the neighbour.
    pub fn adjust_both(&mut self, position: Position, direction: Direction, error: i64) -> Position {
        let next = position.step(direction);
        self.adjust_edge(position, direction, error);
        self.adjust_edge(next, direction.opposite(), error);
        next
    }

    pub fn mark_visited(&mut self, position: Position) {
        if let Some(node) = self.nodes.get_mut(position) {
            node.visited = true;
        }
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.nodes.get(position).is_some_and(|node| node.visited)
    }

    pub fn visited_count(&self) -> usize {
        self.nodes.values().filter(|node| node.visited).count()
    }

    /// Passable edges leaving `position` as `(direction, neighbour, cost)`.
    pub fn neighbours(
        &self,
        position: Position,
    ) -> impl Iterator<Item = (Direction, Position, u32)> + '_ {
        self.nodes.get(position).into_iter().flat_map(move |node| {
            node.edges().filter_map(move |(direction, weight)| {
                weight
                    .cost()
                    .map(|cost| (direction, position.step(direction), cost))
            })
        })
    }
}
