//! Text renderings of a module grid for terminals and pipes.

use crate::grid::ModuleGrid;

const DARK_BLOCK: &str = "██";
const LIGHT_BLOCK: &str = "  ";

/// Two characters per module so the symbol looks square, one line per row.
pub fn blocks(grid: &ModuleGrid) -> String {
    let mut out = String::with_capacity((grid.width() * DARK_BLOCK.len() + 1) * grid.width());
    for row in grid.rows() {
        for &dark in row {
            out.push_str(if dark { DARK_BLOCK } else { LIGHT_BLOCK });
        }
        out.push('\n');
    }
    out
}

/// `1` for dark, `0` for light, row-major with no separators.
pub fn bits(grid: &ModuleGrid) -> String {
    grid.rows()
        .flatten()
        .map(|&dark| if dark { '1' } else { '0' })
        .collect()
}
