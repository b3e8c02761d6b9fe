//! Partitioning of a pixel grid into disjoint square tiles.

use crate::error::BmpError;

/// A rectangular region of the grid, anchored at its top-left corner.
///
/// Nominally `side x side`; tiles in the last column or row are clamped to
/// the remaining pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x - self.x < self.width && y >= self.y && y - self.y < self.height
    }
}

/// Row-major layout of tiles covering a `width` x `height` grid.
///
/// Tile centers start at `(radius, radius)` and advance by `2 * radius + 1`
/// in each direction, so every pixel belongs to exactly one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    side: u32,
    cols: u32,
    rows: u32,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, radius: u32) -> Result<Self, BmpError> {
        if radius == 0 {
            return Err(BmpError::InvalidParameter(
                "binarization radius must be at least 1".into(),
            ));
        }
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidParameter(format!(
                "cannot tile an empty {width}x{height} grid"
            )));
        }
        let side = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| BmpError::InvalidParameter(format!("radius {radius} too large")))?;
        Ok(Self {
            width,
            height,
            side,
            cols: width.div_ceil(side),
            rows: height.div_ceil(side),
        })
    }

    /// Nominal tile side length, `2 * radius + 1`.
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tile in column `col` of tile row `row`, clamped to the grid.
    pub fn tile(&self, col: u32, row: u32) -> Tile {
        let x = col * self.side;
        let y = row * self.side;
        Tile {
            x,
            y,
            width: self.side.min(self.width - x),
            height: self.side.min(self.height - y),
        }
    }

    /// All tiles, left to right then top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.tile(col, row)))
    }
}

/// Collect the tiles covering a `width` x `height` grid for `radius`.
pub fn tiles(width: u32, height: u32, radius: u32) -> Result<Vec<Tile>, BmpError> {
    Ok(TileGrid::new(width, height, radius)?.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u32, y: u32, width: u32, height: u32) -> Tile {
        Tile {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn exact_multiple() {
        let t = tiles(6, 3, 1).unwrap();
        assert_eq!(t, vec![rect(0, 0, 3, 3), rect(3, 0, 3, 3)]);
    }

    #[test]
    fn edges_are_clamped() {
        let grid = TileGrid::new(7, 4, 1).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (3, 2));
        assert_eq!(grid.tile(2, 0), rect(6, 0, 1, 3));
        assert_eq!(grid.tile(2, 1), rect(6, 3, 1, 1));
    }

    #[test]
    fn covers_every_pixel_once() {
        for (w, h, r) in [(1, 1, 1), (10, 7, 1), (13, 29, 2), (64, 5, 3), (5, 64, 40)] {
            let t = tiles(w, h, r).unwrap();
            let area: u64 = t.iter().map(Tile::area).sum();
            assert_eq!(area, u64::from(w) * u64::from(h), "{w}x{h} r={r}");
            for y in 0..h {
                for x in 0..w {
                    let hits = t.iter().filter(|tile| tile.contains(x, y)).count();
                    assert_eq!(hits, 1, "pixel ({x}, {y}) in {w}x{h} r={r}");
                }
            }
        }
    }

    #[test]
    fn radius_must_be_positive() {
        assert!(matches!(
            TileGrid::new(4, 4, 0),
            Err(BmpError::InvalidParameter(_))
        ));
    }
}
