//! Food placement on free grid cells

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::NoSpaceError;
use super::state::{Cell, GridBounds};

/// Chooses where the next food appears
pub trait FoodPlacer {
    /// Return a cell inside `bounds` that is not in `occupied`
    fn place(&mut self, bounds: GridBounds, occupied: &HashSet<Cell>)
        -> Result<Cell, NoSpaceError>;
}

/// Cells of the grid not covered by `occupied`, in row-major order
pub fn free_cells(bounds: GridBounds, occupied: &HashSet<Cell>) -> Vec<Cell> {
    bounds.cells().filter(|cell| !occupied.contains(cell)).collect()
}

/// Pick a free cell uniformly at random
///
/// Builds the free list and indexes into it, so the cost stays bounded as
/// the board fills up.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridBounds,
    occupied: &HashSet<Cell>,
) -> Result<Cell, NoSpaceError> {
    let free = free_cells(bounds, occupied);
    if free.is_empty() {
        return Err(NoSpaceError {
            width: bounds.width,
            height: bounds.height,
        });
    }

    Ok(free[rng.gen_range(0..free.len())])
}

/// Default placer backed by a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomFoodPlacer {
    rng: StdRng,
}

impl RandomFoodPlacer {
    /// Placer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible placer
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomFoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodPlacer for RandomFoodPlacer {
    fn place(
        &mut self,
        bounds: GridBounds,
        occupied: &HashSet<Cell>,
    ) -> Result<Cell, NoSpaceError> {
        place_food(&mut self.rng, bounds, occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cells_excludes_occupied() {
        let bounds = GridBounds::new(5, 5);
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(4, 4)].into_iter().collect();

        let free = free_cells(bounds, &occupied);

        assert_eq!(free.len(), 23);
        assert!(!free.contains(&Cell::new(0, 0)));
        assert!(!free.contains(&Cell::new(4, 4)));
    }

    #[test]
    fn test_places_on_free_cell() {
        let bounds = GridBounds::new(5, 5);
        let occupied: HashSet<Cell> = bounds.cells().take(20).collect();
        let mut placer = RandomFoodPlacer::seeded(7);

        for _ in 0..100 {
            let cell = placer.place(bounds, &occupied).unwrap();
            assert!(bounds.contains(cell));
            assert!(!occupied.contains(&cell));
        }
    }

    #[test]
    fn test_single_free_cell_is_chosen() {
        let bounds = GridBounds::new(5, 5);
        let last = Cell::new(2, 3);
        let occupied: HashSet<Cell> = bounds.cells().filter(|&c| c != last).collect();
        let mut placer = RandomFoodPlacer::seeded(1);

        assert_eq!(placer.place(bounds, &occupied), Ok(last));
    }

    #[test]
    fn test_full_board_reports_no_space() {
        let bounds = GridBounds::new(5, 5);
        let occupied: HashSet<Cell> = bounds.cells().collect();
        let mut placer = RandomFoodPlacer::seeded(1);

        assert_eq!(
            placer.place(bounds, &occupied),
            Err(NoSpaceError {
                width: 5,
                height: 5
            })
        );
    }

    #[test]
    fn test_seeded_placers_agree() {
        let bounds = GridBounds::new(10, 10);
        let occupied = HashSet::new();
        let mut a = RandomFoodPlacer::seeded(42);
        let mut b = RandomFoodPlacer::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.place(bounds, &occupied), b.place(bounds, &occupied));
        }
    }

    #[test]
    fn test_placement_reaches_every_free_cell() {
        // 2 free cells; both should show up over many draws
        let bounds = GridBounds::new(5, 5);
        let a = Cell::new(0, 0);
        let b = Cell::new(4, 4);
        let occupied: HashSet<Cell> = bounds.cells().filter(|&c| c != a && c != b).collect();
        let mut placer = RandomFoodPlacer::seeded(3);

        let draws: Vec<Cell> = (0..200)
            .map(|_| placer.place(bounds, &occupied).unwrap())
            .collect();

        let hits_a = draws.iter().filter(|&&c| c == a).count();
        assert!(hits_a > 50 && hits_a < 150, "biased placement: {hits_a}/200");
    }
}
