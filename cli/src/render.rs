use tilesweep_core::{BoardSnapshot, CellView, GamePhase, GameSession};

pub fn cell_glyph(view: CellView) -> char {
    match view {
        CellView::Covered => '#',
        CellView::Clear => '.',
        CellView::Numbered(count) => char::from_digit(u32::from(count), 10).unwrap_or('?'),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
    }
}

/// Grid with column numbers on top and row numbers on the left.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let side = usize::from(snapshot.side());
    let width = side.saturating_sub(1).to_string().len();

    let header: String = (0..side).map(|col| format!(" {col:>width$}")).collect();
    let mut out = format!("{:width$} {header}\n", "");

    for (row, cells) in snapshot.rows().enumerate() {
        out.push_str(&format!("{row:>width$} "));
        for &view in cells {
            out.push_str(&format!(" {:>width$}", cell_glyph(view)));
        }
        out.push('\n');
    }
    out
}

pub fn render_status(game: &GameSession) -> String {
    match game.phase() {
        GamePhase::Playing => format!(
            "score: {}, safe cells left: {}",
            game.score(),
            game.remaining_safe_cells()
        ),
        GamePhase::Won => format!("You won! score: {}", game.score()),
        GamePhase::Lost => format!("You lost. score: {}", game.score()),
    }
}
