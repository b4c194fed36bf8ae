use crate::error::{Error, Result};
use crate::grid::ModuleGrid;
use std::path::Path;
use tracing::debug;

pub mod ppm {
    use crate::error::Result;
    use crate::img::Canvas;
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;
    use tracing::{debug, info};

    //plain format breaks the line after this many pixels
    const PIXELS_PER_LINE: usize = 5;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Encoding {
        Plain, // P3
        Raw,   // P6
    }

    pub fn write_plain(canvas: &Canvas, writer: &mut impl Write) -> std::io::Result<()> {
        write!(writer, "P3\n{} {}\n255\n", canvas.width, canvas.height)?;
        for (i, pix) in canvas.pixels.iter().enumerate() {
            write!(writer, "{} {} {} ", pix.0, pix.1, pix.2)?;
            if i % PIXELS_PER_LINE == PIXELS_PER_LINE - 1 {
                writer.write_all(b"\n")?;
            }
        }
        if canvas.pixels.len() % PIXELS_PER_LINE != 0 {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn write_raw(canvas: &Canvas, writer: &mut impl Write) -> std::io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", canvas.width, canvas.height)?;
        writer.write_all(&canvas.to_rgb_bytes())
    }

    /// Creates or truncates `path`. Only returns `Ok` once every byte is flushed.
    pub fn save(path: &Path, canvas: &Canvas, encoding: Encoding) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        debug!(
            "writing {:?} ppm {}x{} to {}",
            encoding,
            canvas.width,
            canvas.height,
            path.display()
        );
        match encoding {
            Encoding::Plain => write_plain(canvas, &mut writer)?,
            Encoding::Raw => write_raw(canvas, &mut writer)?,
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        info!("saved ppm image to {}", path.display());
        Ok(())
    }
}

pub mod png {
    use crate::error::{Error, Result};
    use crate::img::Canvas;
    use image::{ImageFormat, RgbImage};
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;
    use tracing::info;

    pub fn save(path: &Path, canvas: &Canvas) -> Result<()> {
        let img = RgbImage::from_raw(canvas.width, canvas.height, canvas.to_rgb_bytes())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "canvas {}x{} does not match its pixel buffer",
                    canvas.width, canvas.height
                ))
            })?;
        let mut writer = BufWriter::new(File::create(path)?);
        img.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        info!("saved png image to {}", path.display());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGB(pub u8, pub u8, pub u8);

pub const WHITE: RGB = RGB(255, 255, 255);
pub const BLACK: RGB = RGB(0, 0, 0);

/// Pixel edge length of a module and the quiet zone width in modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    module_size: u32,
    margin: u32,
}

impl RenderConfig {
    pub const DEFAULT_MODULE_SIZE: u32 = 4;
    pub const DEFAULT_MARGIN: u32 = 4;

    pub fn new(module_size: u32, margin: u32) -> Result<RenderConfig> {
        if module_size == 0 {
            return Err(Error::InvalidArgument(
                "module size must be at least 1 pixel".to_string(),
            ));
        }
        Ok(RenderConfig {
            module_size,
            margin,
        })
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Edge length in pixels for a grid `grid_width` modules wide, if it can be allocated.
    pub fn image_size(&self, grid_width: usize) -> Result<u32> {
        let too_large = || {
            Error::InvalidArgument(format!(
                "image for {} modules with margin {} at {}px per module is too large",
                grid_width, self.margin, self.module_size
            ))
        };
        let size = u32::try_from(grid_width)
            .ok()
            .and_then(|w| self.margin.checked_mul(2)?.checked_add(w))
            .and_then(|modules| modules.checked_mul(self.module_size))
            .ok_or_else(too_large)?;
        (size as usize)
            .checked_mul(size as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .ok_or_else(too_large)?;
        Ok(size)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            module_size: Self::DEFAULT_MODULE_SIZE,
            margin: Self::DEFAULT_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<RGB>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, bg_color: RGB) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![bg_color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<RGB> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[RGB] {
        &self.pixels
    }

    pub fn set_colour(&mut self, x: u32, y: u32, colour: RGB) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = colour;
        }
    }

    // saturated offsets land outside the canvas and are dropped by set_colour
    pub fn fill_module(&mut self, x: u32, y: u32, config: &RenderConfig, colour: RGB) {
        let pixel_size = config.module_size;
        let start_x = x.saturating_add(config.margin).saturating_mul(pixel_size);
        let start_y = y.saturating_add(config.margin).saturating_mul(pixel_size);
        for dy in 0..pixel_size {
            for dx in 0..pixel_size {
                self.set_colour(start_x.saturating_add(dx), start_y.saturating_add(dy), colour);
            }
        }
    }

    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::with_capacity(self.pixels.len() * 3);
        for pix in &self.pixels {
            output.push(pix.0);
            output.push(pix.1);
            output.push(pix.2);
        }
        output
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Stamps a block per dark module onto a white canvas.
pub fn render(grid: &ModuleGrid, config: &RenderConfig) -> Result<Canvas> {
    let size = config.image_size(grid.width())?;
    debug!(
        "render {}x{} modules -> {}x{} px (module {}px, margin {})",
        grid.width(),
        grid.width(),
        size,
        size,
        config.module_size,
        config.margin
    );
    let mut canvas = Canvas::new(size, size, WHITE);
    for (x, y) in grid.dark_modules() {
        canvas.fill_module(x as u32, y as u32, config, BLACK);
    }
    Ok(canvas)
}

/// Colours every pixel from the module it maps back to. Same output as [render].
pub fn render_backmapped(grid: &ModuleGrid, config: &RenderConfig) -> Result<Canvas> {
    let size = config.image_size(grid.width())?;
    let width = grid.width() as u32;
    let margin = config.margin;
    let mut canvas = Canvas::new(size, size, WHITE);
    for py in 0..size {
        for px in 0..size {
            let (mx, my) = (px / config.module_size, py / config.module_size);
            // outside [margin, margin + width) is quiet zone
            let in_symbol =
                mx >= margin && my >= margin && mx - margin < width && my - margin < width;
            if in_symbol && grid.is_dark((mx - margin) as usize, (my - margin) as usize) {
                canvas.set_colour(px, py, BLACK);
            }
        }
    }
    Ok(canvas)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm(ppm::Encoding),
    Png,
}

impl OutputFormat {
    /// `.png` (any case) selects PNG, everything else plain PPM.
    pub fn from_path(path: &Path) -> OutputFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Ppm(ppm::Encoding::Plain),
        }
    }
}

pub fn save(path: &Path, canvas: &Canvas, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Ppm(encoding) => ppm::save(path, canvas, encoding),
        OutputFormat::Png => png::save(path, canvas),
    }
}
