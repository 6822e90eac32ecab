use crate::tiles::TILE_SIZE;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tile position in grid coordinates. `y` grows downward: row 0 is the
/// top of the sky, larger `y` is deeper underground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert from a game-pixel position to the containing grid cell
    pub fn from_pixel(pixel: Vec2) -> Self {
        Self {
            x: (pixel.x / TILE_SIZE).floor() as i32,
            y: (pixel.y / TILE_SIZE).floor() as i32,
        }
    }

    /// Top-left pixel of this cell in game space
    pub fn to_pixel(&self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    /// Center pixel of this cell in game space
    pub fn center_pixel(&self) -> Vec2 {
        self.to_pixel() + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Cell offset by (dx, dy) grid units
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<IVec2> for GridPos {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<GridPos> for IVec2 {
    fn from(pos: GridPos) -> Self {
        IVec2::new(pos.x, pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixel() {
        // Origin cell
        let pos = GridPos::from_pixel(Vec2::new(0.0, 0.0));
        assert_eq!(pos, GridPos::new(0, 0));

        // Interior pixels map to the containing cell
        let pos = GridPos::from_pixel(Vec2::new(31.9, 31.9));
        assert_eq!(pos, GridPos::new(0, 0));

        // Cell boundaries belong to the next cell
        let pos = GridPos::from_pixel(Vec2::new(32.0, 64.0));
        assert_eq!(pos, GridPos::new(1, 2));

        // Negative pixels floor toward negative infinity
        let pos = GridPos::from_pixel(Vec2::new(-0.1, -32.0));
        assert_eq!(pos, GridPos::new(-1, -1));
    }

    #[test]
    fn test_pixel_round_trip() {
        for (x, y) in [(0, 0), (3, 7), (39, 119), (12, 8)] {
            let cell = GridPos::new(x, y);
            assert_eq!(GridPos::from_pixel(cell.to_pixel()), cell);
            assert_eq!(GridPos::from_pixel(cell.center_pixel()), cell);
        }
    }

    #[test]
    fn test_translated() {
        let pos = GridPos::new(10, 8);
        assert_eq!(pos.translated(1, 0), GridPos::new(11, 8));
        assert_eq!(pos.translated(0, -1), GridPos::new(10, 7));
    }
}
