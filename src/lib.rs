use crate::encoder::{EcLevel, SymbolEncoder};
use crate::grid::ModuleGrid;
use crate::img::{OutputFormat, RenderConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod encoder;
pub mod error;
pub mod grid;
pub mod img;
pub mod term;

pub use crate::encoder::QrCodeEncoder;
pub use crate::error::{Error, Result};
pub use crate::img::{render, Canvas, BLACK, RGB, WHITE};

/// Settings for one text -> image run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Imager {
    pub config: RenderConfig,
    pub level: EcLevel,
    /// `None` picks the smallest version that fits
    pub version: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub image_width: u32,
    pub image_height: u32,
    pub modules: usize,
}

impl Imager {
    pub fn new(config: RenderConfig) -> Imager {
        Imager {
            config,
            ..Imager::default()
        }
    }

    pub fn with_level(mut self, level: EcLevel) -> Imager {
        self.level = level;
        self
    }

    pub fn with_version(mut self, version: Option<u8>) -> Imager {
        self.version = version;
        self
    }

    pub fn encode(&self, encoder: &impl SymbolEncoder, text: &str) -> Result<ModuleGrid> {
        encoder.encode(text.as_bytes(), self.level, self.version)
    }

    /// Encodes, renders and writes `text` to `path`, format chosen by the extension.
    pub fn save(&self, encoder: &impl SymbolEncoder, text: &str, path: &Path) -> Result<Summary> {
        let grid = self.encode(encoder, text)?;
        self.save_grid(&grid, path)
    }

    pub fn save_grid(&self, grid: &ModuleGrid, path: &Path) -> Result<Summary> {
        let canvas = img::render(grid, &self.config)?;
        let format = OutputFormat::from_path(path);
        debug!("output format {:?} for {}", format, path.display());
        img::save(path, &canvas, format)?;
        Ok(Summary {
            path: path.to_path_buf(),
            format,
            image_width: canvas.width(),
            image_height: canvas.height(),
            modules: grid.width(),
        })
    }
}
