//! Placement Engine
//!
//! Assigns each component a deterministic position on a square-ish
//! uniform grid: components sit at cell centres, row-major. This is
//! intentionally not a physically-aware or congestion-aware placer;
//! downstream geometry depends on these exact positions.

use crate::model::Position;

/// Grid position of component `index` out of `total` on a
/// `width`×`height` mm board.
///
/// `columns = max(1, floor(sqrt(total)))`; the board is divided into
/// `columns × ceil(total / columns)` cells and each component is
/// centred in its cell.
pub fn place(index: usize, total: usize, width: f64, height: f64) -> Position {
    let columns = ((total as f64).sqrt().floor() as usize).max(1);
    let rows = total.div_ceil(columns).max(1);
    let row = index / columns;
    let col = index % columns;
    let cell_width = width / columns as f64;
    let cell_height = height / rows as f64;
    Position {
        x: col as f64 * cell_width + cell_width / 2.0,
        y: row as f64 * cell_height + cell_height / 2.0,
    }
}

/// Positions for all components of a run. `total = 0` yields an
/// empty set rather than dividing by zero.
pub fn place_all(total: usize, width: f64, height: f64) -> Vec<Position> {
    (0..total).map(|i| place(i, total, width, height)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_components() {
        assert!(place_all(0, 100.0, 80.0).is_empty());
    }

    #[test]
    fn test_positions_distinct_and_inside_board() {
        for total in 1..=25 {
            let positions = place_all(total, 100.0, 80.0);
            assert_eq!(positions.len(), total);
            for p in &positions {
                assert!(p.x > 0.0 && p.x < 100.0, "x out of board: {:?}", p);
                assert!(p.y > 0.0 && p.y < 80.0, "y out of board: {:?}", p);
            }
            for i in 0..total {
                for j in (i + 1)..total {
                    assert!(
                        positions[i] != positions[j],
                        "duplicate position for {} and {}",
                        i,
                        j
                    );
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = place_all(7, 120.0, 90.0);
        let b = place_all(7, 120.0, 90.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_component_is_centred() {
        let p = place(0, 1, 100.0, 80.0);
        assert_eq!(p, Position { x: 50.0, y: 40.0 });
    }

    #[test]
    fn test_four_components_form_two_by_two_grid() {
        let positions = place_all(4, 100.0, 80.0);
        assert_eq!(positions[0], Position { x: 25.0, y: 20.0 });
        assert_eq!(positions[1], Position { x: 75.0, y: 20.0 });
        assert_eq!(positions[2], Position { x: 25.0, y: 60.0 });
        assert_eq!(positions[3], Position { x: 75.0, y: 60.0 });
    }
}
