//! The 3x3 play grid

use serde::{Deserialize, Serialize};

use crate::consts::GRID_CELLS;

/// Identifies one placed obstacle so a late expiry can tell whether the
/// obstacle it was scheduled for is still on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleToken(pub u64);

/// Content of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    /// A can worth points
    Collectible,
    /// A penalty item that reverts to empty on its own
    Obstacle(ObstacleToken),
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, CellState::Collectible)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, CellState::Obstacle(_))
    }
}

/// Nine fixed cells, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [CellState; GRID_CELLS],
    next_token: u64,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; GRID_CELLS],
            next_token: 1,
        }
    }

    pub fn cells(&self) -> &[CellState; GRID_CELLS] {
        &self.cells
    }

    /// Cell content, `None` for indices off the grid
    pub fn get(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells = [CellState::Empty; GRID_CELLS];
    }

    /// Empty a single cell
    pub fn clear_cell(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = CellState::Empty;
        }
    }

    /// Remove any can on the board and put a fresh one at `index`.
    /// An obstacle already there is replaced.
    pub fn place_collectible(&mut self, index: usize) {
        for cell in self.cells.iter_mut().filter(|c| c.is_collectible()) {
            *cell = CellState::Empty;
        }
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = CellState::Collectible;
        }
    }

    /// Place an obstacle if the cell is empty, returning its token
    pub fn place_obstacle(&mut self, index: usize) -> Option<ObstacleToken> {
        let cell = self.cells.get_mut(index)?;
        if !cell.is_empty() {
            return None;
        }
        let token = ObstacleToken(self.next_token);
        self.next_token += 1;
        *cell = CellState::Obstacle(token);
        Some(token)
    }

    /// Remove the obstacle at `index` only if it is the one identified by `token`
    pub fn expire_obstacle(&mut self, index: usize, token: ObstacleToken) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell == CellState::Obstacle(token) => {
                *cell = CellState::Empty;
                true
            }
            _ => false,
        }
    }

    pub fn collectible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_collectible()).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_obstacle()).count()
    }

    /// Index of the can currently on the board
    pub fn collectible_index(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.is_collectible())
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_collectible_keeps_only_one() {
        let mut grid = Grid::new();
        grid.place_collectible(0);
        grid.place_collectible(4);
        grid.place_collectible(8);
        assert_eq!(grid.collectible_count(), 1);
        assert_eq!(grid.collectible_index(), Some(8));
    }

    #[test]
    fn test_collectible_overlays_obstacle() {
        let mut grid = Grid::new();
        let token = grid.place_obstacle(3).unwrap();
        grid.place_collectible(3);
        assert_eq!(grid.get(3), Some(CellState::Collectible));
        // The old expiry must not remove the can
        assert!(!grid.expire_obstacle(3, token));
        assert_eq!(grid.get(3), Some(CellState::Collectible));
    }

    #[test]
    fn test_collectible_spawn_leaves_obstacles() {
        let mut grid = Grid::new();
        grid.place_obstacle(1).unwrap();
        grid.place_collectible(2);
        grid.place_collectible(5);
        assert_eq!(grid.obstacle_count(), 1);
        assert!(grid.get(1).unwrap().is_obstacle());
    }

    #[test]
    fn test_obstacle_needs_empty_cell() {
        let mut grid = Grid::new();
        grid.place_collectible(2);
        assert_eq!(grid.place_obstacle(2), None);
        let first = grid.place_obstacle(6).unwrap();
        assert_eq!(grid.place_obstacle(6), None);
        assert!(grid.expire_obstacle(6, first));
        assert!(grid.get(6).unwrap().is_empty());
    }

    #[test]
    fn test_stale_token_does_not_expire_new_obstacle() {
        let mut grid = Grid::new();
        let old = grid.place_obstacle(7).unwrap();
        grid.clear_cell(7);
        let new = grid.place_obstacle(7).unwrap();
        assert_ne!(old, new);
        assert!(!grid.expire_obstacle(7, old));
        assert!(grid.expire_obstacle(7, new));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut grid = Grid::new();
        assert_eq!(grid.get(9), None);
        assert_eq!(grid.place_obstacle(42), None);
        grid.clear_cell(100);
        grid.place_collectible(9);
        assert!(grid.is_clear());
    }
}
