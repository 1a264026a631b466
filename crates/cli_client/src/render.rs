//! Text rendering of the grid and status line

use gridlink_core::{ConnectionState, Position, GRID_SIZE};

pub const TITLE: &str = "Grid Interativo";

const ACTIVE_CELL: &str = "[●]";
const EMPTY_CELL: &str = "[ ]";

/// `Status: Conectado` / `Status: Desconectado`
pub fn status_line(state: ConnectionState) -> String {
    format!("Status: {}", state.label())
}

/// One string per grid row, `y = 0` first, with column and row labels
///
/// A position off the grid marks no cell.
pub fn grid_rows(position: Position) -> Vec<String> {
    let mut rows = Vec::with_capacity(GRID_SIZE as usize + 1);

    let header: String = (0..GRID_SIZE).map(|x| format!(" {} ", x)).collect();
    rows.push(format!("   {}", header));

    for y in 0..GRID_SIZE {
        let cells: String = (0..GRID_SIZE)
            .map(|x| {
                if position.is_on_grid() && position == Position::new(x, y) {
                    ACTIVE_CELL
                } else {
                    EMPTY_CELL
                }
            })
            .collect();
        rows.push(format!("{}  {}", y, cells));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(ConnectionState::Connected), "Status: Conectado");
        assert_eq!(status_line(ConnectionState::Disconnected), "Status: Desconectado");
    }

    #[test]
    fn test_grid_marks_exactly_one_cell() {
        let rows = grid_rows(Position::new(2, 3));
        assert_eq!(rows.len(), 9);

        let marked: usize = rows.iter().map(|r| r.matches(ACTIVE_CELL).count()).sum();
        assert_eq!(marked, 1);
        // Row for y = 3, third cell
        assert!(rows[4].starts_with("3  [ ][ ][●]"));
    }

    #[test]
    fn test_off_grid_position_marks_nothing() {
        for position in [Position::new(8, 0), Position::new(-1, 3), Position::new(0, 99)] {
            let rows = grid_rows(position);
            assert!(rows.iter().all(|r| !r.contains(ACTIVE_CELL)), "{:?}", position);
        }
    }
}
