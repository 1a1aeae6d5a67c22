//! Mutable grid with structural resize.

use tracing::debug;

use crate::domain::entities::Grid;
use crate::domain::enums::Direction;
use crate::domain::error::DomainResult;
use crate::domain::factory::{check_grid, check_player, check_size};
use crate::domain::mutable::{out_of_bounds, MutableTile};
use crate::domain::view::GridView;

#[derive(Debug, Clone)]
pub struct MutableGrid {
    tiles: Vec<Vec<MutableTile>>,
    size: usize,
    player_x: usize,
    player_y: usize,
    player_direction: Direction,
}

impl MutableGrid {
    /// Blank `size`×`size` grid, player at the origin facing right.
    pub fn new(size: usize) -> DomainResult<Self> {
        check_size(size)?;
        Ok(Self {
            tiles: blank_rows(size, size),
            size,
            player_x: 0,
            player_y: 0,
            player_direction: Direction::Right,
        })
    }

    pub fn from_parts(
        tiles: Vec<Vec<MutableTile>>,
        size: usize,
        player_x: usize,
        player_y: usize,
        player_direction: Direction,
    ) -> DomainResult<Self> {
        check_grid(&tiles, size, player_x, player_y)?;
        Ok(Self {
            tiles,
            size,
            player_x,
            player_y,
            player_direction,
        })
    }

    pub fn tile_mut(&mut self, row: usize, column: usize) -> Option<&mut MutableTile> {
        self.tiles.get_mut(row).and_then(|r| r.get_mut(column))
    }

    pub fn set_tile(&mut self, row: usize, column: usize, tile: MutableTile) -> DomainResult<()> {
        let size = self.size;
        let slot = self
            .tile_mut(row, column)
            .ok_or_else(|| out_of_bounds("tiles", row.max(column), size))?;
        *slot = tile;
        Ok(())
    }

    pub fn set_player_x(&mut self, player_x: usize) -> DomainResult<()> {
        check_player(player_x, self.player_y, self.size)?;
        self.player_x = player_x;
        Ok(())
    }

    pub fn set_player_y(&mut self, player_y: usize) -> DomainResult<()> {
        check_player(self.player_x, player_y, self.size)?;
        self.player_y = player_y;
        Ok(())
    }

    pub fn set_player_position(&mut self, player_x: usize, player_y: usize) -> DomainResult<()> {
        check_player(player_x, player_y, self.size)?;
        self.player_x = player_x;
        self.player_y = player_y;
        Ok(())
    }

    pub fn set_player_direction(&mut self, direction: Direction) {
        self.player_direction = direction;
    }

    /// Change the grid dimensions without rescaling.
    ///
    /// The top-left `min(old, new)` block keeps its tiles at the same
    /// coordinates; newly exposed rows and columns get blank tiles; shrinking
    /// drops the excluded rows and columns. A player left outside the new
    /// bounds is clamped onto the last row/column.
    pub fn resize(&mut self, new_size: usize) -> DomainResult<()> {
        check_size(new_size)?;
        if new_size == self.size {
            return Ok(());
        }
        debug!("resize: {} -> {}", self.size, new_size);

        self.tiles.truncate(new_size);
        for row in &mut self.tiles {
            row.truncate(new_size);
            row.resize_with(new_size, MutableTile::default);
        }
        let missing = new_size - self.tiles.len();
        self.tiles.extend(blank_rows(missing, new_size));

        self.size = new_size;
        self.player_x = self.player_x.min(new_size - 1);
        self.player_y = self.player_y.min(new_size - 1);
        Ok(())
    }

    pub fn freeze(&self) -> Grid {
        Grid {
            tiles: self
                .tiles
                .iter()
                .map(|row| row.iter().map(MutableTile::freeze).collect())
                .collect(),
            size: self.size,
            player_x: self.player_x,
            player_y: self.player_y,
            player_direction: self.player_direction,
        }
    }
}

fn blank_rows(rows: usize, columns: usize) -> Vec<Vec<MutableTile>> {
    (0..rows)
        .map(|_| (0..columns).map(|_| MutableTile::default()).collect())
        .collect()
}

impl GridView for MutableGrid {
    type Tile = MutableTile;

    fn tiles(&self) -> &[Vec<MutableTile>] {
        &self.tiles
    }

    fn size(&self) -> usize {
        self.size
    }

    fn player_x(&self) -> usize {
        self.player_x
    }

    fn player_y(&self) -> usize {
        self.player_y
    }

    fn player_direction(&self) -> Direction {
        self.player_direction
    }
}

impl From<&Grid> for MutableGrid {
    fn from(g: &Grid) -> Self {
        Self {
            tiles: g
                .tiles
                .iter()
                .map(|row| row.iter().map(MutableTile::from).collect())
                .collect(),
            size: g.size,
            player_x: g.player_x,
            player_y: g.player_y,
            player_direction: g.player_direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::TileView;

    /// 3x3 grid where tile (r, c) holds `r * 3 + c` balls.
    fn numbered() -> MutableGrid {
        let mut grid = MutableGrid::new(3).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let balls = (r * 3 + c) as i32;
                grid.tile_mut(r, c).unwrap().set_balls(balls).unwrap();
                grid.tile_mut(r, c).unwrap().set_barrier_left(true);
            }
        }
        grid
    }

    #[test]
    fn given_new_grid_when_created_then_blank_with_player_at_origin() {
        let grid = MutableGrid::new(2).unwrap();
        assert_eq!(grid.size(), 2);
        assert_eq!((grid.player_x(), grid.player_y()), (0, 0));
        assert_eq!(grid.player_direction(), Direction::Right);
        assert!(MutableGrid::new(0).is_err());
    }

    #[test]
    fn given_3x3_when_resized_to_5x5_then_keeps_block_and_fills_blanks() {
        let mut grid = numbered();
        grid.resize(5).unwrap();

        assert_eq!(grid.size(), 5);
        assert_eq!(grid.tiles().len(), 5);
        for r in 0..5 {
            assert_eq!(grid.tiles()[r].len(), 5);
            for c in 0..5 {
                let tile = grid.tile(r, c).unwrap();
                if r < 3 && c < 3 {
                    assert_eq!(tile.balls(), (r * 3 + c) as u32);
                    assert!(tile.barrier_left());
                } else {
                    assert_eq!(tile.balls(), 0);
                    assert!(!tile.barrier_left() && !tile.barrier_top());
                    assert_eq!(tile.color(), None);
                }
            }
        }
    }

    #[test]
    fn given_3x3_when_resized_to_2x2_then_keeps_top_left_block() {
        let mut grid = numbered();
        grid.resize(2).unwrap();
        let balls: Vec<Vec<u32>> = grid
            .tiles()
            .iter()
            .map(|row| row.iter().map(|t| t.balls()).collect())
            .collect();
        assert_eq!(balls, vec![vec![0, 1], vec![3, 4]]);
    }

    #[test]
    fn given_player_outside_when_shrinking_then_clamped() {
        let mut grid = numbered();
        grid.set_player_position(2, 1).unwrap();
        grid.resize(2).unwrap();
        assert_eq!((grid.player_x(), grid.player_y()), (1, 1));
    }

    #[test]
    fn given_same_size_when_resizing_then_noop() {
        let mut grid = numbered();
        let before = grid.clone();
        grid.resize(3).unwrap();
        assert_eq!(grid, before);
        assert!(grid.resize(0).is_err());
        assert_eq!(grid.size(), 3);
    }

    #[test]
    fn given_out_of_range_player_when_setting_then_rejected() {
        let mut grid = MutableGrid::new(3).unwrap();
        assert!(grid.set_player_x(3).is_err());
        assert!(grid.set_player_y(7).is_err());
        grid.set_player_x(2).unwrap();
        assert_eq!(grid.player_x(), 2);
        assert!(grid.set_tile(3, 0, MutableTile::default()).is_err());
    }
}
