use crate::error::{Error, Result};
use qrcode::{Color, QrCode};

/// Square grid of QR modules, `true` is a dark module.
/// Cells are stored row-major, `modules[y * width + x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    pub fn new(width: usize, modules: Vec<bool>) -> Result<ModuleGrid> {
        if width == 0 || modules.len() != width * width {
            return Err(Error::InvalidGrid {
                width,
                cells: modules.len(),
            });
        }
        Ok(ModuleGrid { width, modules })
    }

    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<ModuleGrid> {
        let width = rows.len();
        let mut modules = Vec::with_capacity(width * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                let cells = rows.iter().map(|r| r.as_ref().len()).sum();
                return Err(Error::InvalidGrid { width, cells });
            }
            modules.extend_from_slice(row);
        }
        ModuleGrid::new(width, modules)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells outside the grid read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.modules.chunks_exact(self.width)
    }

    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i % width, i / width))
    }
}

impl From<&QrCode> for ModuleGrid {
    fn from(code: &QrCode) -> ModuleGrid {
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        ModuleGrid {
            width: code.width(),
            modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::grid::ModuleGrid;

    #[test]
    fn test_grid_from_rows() {
        let grid = ModuleGrid::from_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(grid.width(), 2);
        assert!(grid.is_dark(0, 0));
        assert!(!grid.is_dark(1, 0));
        assert!(!grid.is_dark(0, 1));
        assert!(grid.is_dark(1, 1));
        assert!(!grid.is_dark(2, 1), "out of range reads as light");
    }

    #[test]
    fn test_grid_rejects_empty_and_ragged() {
        assert!(matches!(
            ModuleGrid::new(0, vec![]),
            Err(Error::InvalidGrid { width: 0, cells: 0 })
        ));
        assert!(matches!(
            ModuleGrid::new(2, vec![true; 3]),
            Err(Error::InvalidGrid { width: 2, cells: 3 })
        ));
        let ragged: Vec<Vec<bool>> = vec![vec![true, false], vec![true]];
        assert!(matches!(
            ModuleGrid::from_rows(&ragged),
            Err(Error::InvalidGrid { width: 2, cells: 3 })
        ));
    }

    #[test]
    fn test_dark_modules_positions() {
        let grid = ModuleGrid::from_rows(&[
            [true, false, true],
            [false, true, false],
            [true, false, true],
        ])
        .unwrap();
        let dark: Vec<(usize, usize)> = grid.dark_modules().collect();
        assert_eq!(dark, vec![(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)]);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn test_grid_from_qrcode() {
        let code = qrcode::QrCode::new(b"01234567").unwrap();
        let grid = ModuleGrid::from(&code);
        assert_eq!(grid.width(), code.width());
        // finder pattern corners are always dark
        assert!(grid.is_dark(0, 0));
        assert!(grid.is_dark(grid.width() - 1, 0));
        assert!(grid.is_dark(0, grid.width() - 1));
    }
}
