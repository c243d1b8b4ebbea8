use rand::Rng;

/// Cell code for walkable empty space.
pub const EMPTY: i16 = 0;
/// Cell code for a solid wall cube.
pub const WALL: i16 = 1;
/// Cell code for a room with a textured floor and ceiling.
pub const FLOOR_CEIL: i16 = 2;
/// Sentinel returned for queries outside the grid. Distinct from every
/// valid cell code; casting loops treat it as "keep marching".
pub const OUT_OF_BOUNDS: i16 = -1;

/// Square tile grid the rays march through.
///
/// Built once at level load; immutable for the whole lifetime of a frame.
/// All lookups floor-truncate their coordinates and answer out-of-range
/// queries with [`OUT_OF_BOUNDS`] instead of panicking.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from raw cell codes. `cells.len()` must be `size*size`.
    pub fn from_cells(size: usize, cells: Vec<u8>) -> Self {
        assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Empty interior enclosed by a solid wall ring.
    pub fn bordered(size: usize) -> Self {
        let mut cells = vec![0u8; size * size];
        for i in 0..size {
            cells[i] = WALL as u8; // north edge
            cells[(size - 1) * size + i] = WALL as u8; // south edge
            cells[i * size] = WALL as u8; // west edge
            cells[i * size + size - 1] = WALL as u8; // east edge
        }
        Self { size, cells }
    }

    /// Random overworld: hash-noise wall clusters inside a solid ring,
    /// with rectangular floor/ceiling rooms carved at intervals.
    pub fn generate<R: Rng>(size: usize, rng: &mut R) -> Self {
        let mut grid = Self::bordered(size);
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                if rng.r#gen::<f32>() < 0.12 {
                    grid.cells[y * size + x] = WALL as u8;
                }
            }
        }
        // carve a few walled rooms that get a floor and a ceiling
        let room = 5usize;
        let mut y = 2;
        while y + room < size - 1 {
            let mut x = 2;
            while x + room < size - 1 {
                if rng.r#gen::<f32>() < 0.25 {
                    for ry in y..y + room {
                        for rx in x..x + room {
                            let edge = ry == y || ry == y + room - 1 || rx == x || rx == x + room - 1;
                            let mid = ry == y + room / 2 && rx == x;
                            grid.cells[ry * size + rx] = if edge && !mid {
                                WALL as u8
                            } else {
                                FLOOR_CEIL as u8
                            };
                        }
                    }
                }
                x += room + 3;
            }
            y += room + 3;
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell code at integer coordinates, [`OUT_OF_BOUNDS`] outside the grid.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> i16 {
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            return OUT_OF_BOUNDS;
        }
        self.cells[y as usize * self.size + x as usize] as i16
    }

    /// Cell code at world coordinates (floor-truncating).
    #[inline]
    pub fn get(&self, x: f32, y: f32) -> i16 {
        self.cell(x.floor() as i32, y.floor() as i32)
    }

    /// First empty interior cell, centered; spawn point for the demo.
    pub fn spawn_point(&self) -> Option<(f32, f32)> {
        for y in 0..self.size {
            for x in 0..self.size {
                if self.cell(x as i32, y as i32) == EMPTY {
                    return Some((x as f32 + 0.5, y as f32 + 0.5));
                }
            }
        }
        None
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_sentinel_never_panic() {
        let g = Grid::bordered(8);
        assert_eq!(g.cell(-1, 0), OUT_OF_BOUNDS);
        assert_eq!(g.cell(0, -1), OUT_OF_BOUNDS);
        assert_eq!(g.cell(8, 3), OUT_OF_BOUNDS);
        assert_eq!(g.get(-0.001, 4.0), OUT_OF_BOUNDS);
        assert_eq!(g.get(1e9, 1e9), OUT_OF_BOUNDS);
    }

    #[test]
    fn get_floor_truncates() {
        let g = Grid::bordered(8);
        // (0.9, 0.9) is still inside the border cell (0,0)
        assert_eq!(g.get(0.9, 0.9), WALL);
        assert_eq!(g.get(1.1, 1.7), EMPTY);
    }

    #[test]
    fn bordered_ring_is_solid() {
        let g = Grid::bordered(6);
        for i in 0..6 {
            assert_eq!(g.cell(i, 0), WALL);
            assert_eq!(g.cell(i, 5), WALL);
            assert_eq!(g.cell(0, i), WALL);
            assert_eq!(g.cell(5, i), WALL);
        }
        assert_eq!(g.cell(2, 3), EMPTY);
    }

    #[test]
    fn generated_world_keeps_its_ring() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0x9E37_79B9_7F4A_7C15);
        let g = Grid::generate(16, &mut rng);
        for i in 0..16 {
            assert_eq!(g.cell(i, 0), WALL);
            assert_eq!(g.cell(i, 15), WALL);
            assert_eq!(g.cell(0, i), WALL);
            assert_eq!(g.cell(15, i), WALL);
        }
        assert!(g.spawn_point().is_some());
    }
}
