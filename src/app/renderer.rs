use std::fmt;

use crate::maze::{Cell, Coord, Direction, Grid};

/// Width of a cell body in characters.
pub const CELL_WIDTH: usize = 3;

const EMPTY_BODY: &str = "   ";
const OVERFLOW_BODY: &str = "###";

/// Draws the maze as ASCII art: `+---+` corners and walls, `|` between cells
/// that are not linked east, `---` under cells that are not linked south.
pub fn render_ascii(grid: &Grid) -> String {
    render_with(grid, |_| EMPTY_BODY.to_string())
}

/// Like [`render_ascii`], with each cell's distance label centred in its body.
/// Unset labels are blank, labels wider than a cell are drawn as `###`.
pub fn render_distances(grid: &Grid) -> String {
    render_with(grid, |cell| match cell.distance() {
        None => EMPTY_BODY.to_string(),
        Some(d) => {
            let label = format!("{:^width$}", d, width = CELL_WIDTH);
            if label.len() > CELL_WIDTH {
                OVERFLOW_BODY.to_string()
            } else {
                label
            }
        }
    })
}

fn render_with<F>(grid: &Grid, body: F) -> String
where
    F: Fn(&Cell) -> String,
{
    let mut output = String::from("+");
    (0..grid.columns()).for_each(|_| output.push_str("---+"));
    output.push('\n');

    for row in 0..grid.rows() {
        let mut top = String::from("|");
        let mut bottom = String::from("+");
        for col in 0..grid.columns() {
            let cell = &grid[Coord::new(row, col)];

            top.push_str(&body(cell));
            top.push(if cell.is_linked(Direction::East) { ' ' } else { '|' });

            bottom.push_str(if cell.is_linked(Direction::South) {
                "   "
            } else {
                "---"
            });
            bottom.push('+');
        }
        output.push_str(&top);
        output.push('\n');
        output.push_str(&bottom);
        output.push('\n');
    }
    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_ascii(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::label_distances;

    #[test]
    fn test_single_cell() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(render_ascii(&grid), "+---+\n|   |\n+---+\n");
        assert_eq!(grid.to_string(), render_ascii(&grid));
    }

    #[test]
    fn test_open_walls() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.link(Coord::new(0, 0), Direction::East).unwrap();
        grid.link(Coord::new(0, 1), Direction::South).unwrap();
        grid.link(Coord::new(1, 1), Direction::West).unwrap();

        let expected = "\
+---+---+
|       |
+---+   +
|       |
+---+---+
";
        assert_eq!(render_ascii(&grid), expected);
    }

    #[test]
    fn test_distance_labels() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.link(Coord::new(0, 0), Direction::East).unwrap();
        grid.link(Coord::new(0, 1), Direction::East).unwrap();

        assert_eq!(render_distances(&grid), "+---+---+---+\n|           |\n+---+---+---+\n");

        label_distances(&mut grid, Coord::new(0, 0)).unwrap();
        assert_eq!(render_distances(&grid), "+---+---+---+\n| 0   1   2 |\n+---+---+---+\n");
    }

    #[test]
    fn test_wide_labels_overflow() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.cells_mut().for_each(|cell| cell.set_distance(Some(1234)));
        assert_eq!(render_distances(&grid), "+---+\n|###|\n+---+\n");
    }
}
