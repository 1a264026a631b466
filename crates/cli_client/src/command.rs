//! Commands typed on stdin

use anyhow::{bail, Context, Result};
use gridlink_core::{Position, GRID_SIZE};

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a new active cell (the "click")
    Select(Position),
    /// Redraw without doing anything
    Redraw,
    Help,
    Quit,
}

pub const HELP: &str = "Commands: `x y` or `x,y` selects a cell (0-7), `h` help, `q` quit";

/// Parse one input line
pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    match line {
        "" => return Ok(Command::Redraw),
        "q" | "quit" | "exit" | "/exit" => return Ok(Command::Quit),
        "h" | "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let [x, y] = parts.as_slice() else {
        bail!("Expected two coordinates, got {:?}", line);
    };

    let x: i64 = x.parse().with_context(|| format!("Invalid x coordinate: {}", x))?;
    let y: i64 = y.parse().with_context(|| format!("Invalid y coordinate: {}", y))?;

    let position = Position::new(x, y);
    if !position.is_on_grid() {
        bail!("Cell ({}, {}) is outside the {}x{} grid", x, y, GRID_SIZE, GRID_SIZE);
    }

    Ok(Command::Select(position))
}
