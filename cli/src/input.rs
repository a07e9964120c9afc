use anyhow::{Context, bail};
use tilesweep_core::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    NewGame,
    Quit,
    Help,
}

/// Parses one line of player input.
///
/// Accepts a linear index (`12`), a `row col` pair (`1 4` or `1,4`), or one of
/// `n`/`new`, `q`/`quit`, `h`/`help`/`?`.
pub fn parse_command(line: &str, side: Coord) -> anyhow::Result<Command> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "n" | "new" => return Ok(Command::NewGame),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "h" | "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [index] => {
            let index = index
                .parse()
                .with_context(|| format!("'{index}' is not a cell index"))?;
            Ok(Command::Select(index))
        }
        [row, col] => {
            let row: usize = row
                .parse()
                .with_context(|| format!("'{row}' is not a row"))?;
            let col: usize = col
                .parse()
                .with_context(|| format!("'{col}' is not a column"))?;
            let side = usize::from(side);
            if row >= side || col >= side {
                bail!("({row}, {col}) is outside a {side}x{side} board");
            }
            Ok(Command::Select(row * side + col))
        }
        [] => bail!("empty input"),
        _ => bail!("expected an index or a row and column, got '{line}'"),
    }
}
