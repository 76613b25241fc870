//! Drawing through an external rasterizer

mod screen;

pub use screen::draw_screen;

use crate::state::ScreenMetrics;

/// Images the rasterizer is expected to have loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Background,
    BackgroundAlt,
    ProgressEmpty,
    ProgressFill,
    Indeterminate(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Normal,
    Big,
}

/// Immediate-mode drawing surface, double buffered.
///
/// Rectangles are given as corner coordinates. Nothing is visible until `flip`.
pub trait Canvas: Send {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8);
    fn set_font(&mut self, font: Font);

    /// Character cell of the current font as `(width, height)`
    fn char_size(&self) -> (i32, i32);

    fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Copy a `w`×`h` region of `surface` starting at (`sx`, `sy`) to (`dx`, `dy`)
    #[allow(clippy::too_many_arguments)]
    fn blit(&mut self, surface: Surface, sx: i32, sy: i32, w: i32, h: i32, dx: i32, dy: i32);

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32);

    fn text(&mut self, x: i32, y: i32, text: &str);

    /// Draw text clipped to `max_x`/`max_y`. Negative limits disable clipping.
    fn text_cut(&mut self, x: i32, y: i32, text: &str, max_x: i32, max_y: i32);

    /// Size of a loaded surface, `None` if it failed to load
    fn surface_size(&self, surface: Surface) -> Option<(i32, i32)>;

    fn flip(&mut self);
}

impl ScreenMetrics {
    /// Measure the canvas using the normal font
    pub fn measure(canvas: &mut dyn Canvas) -> Self {
        canvas.set_font(Font::Normal);
        let (char_width, char_height) = canvas.char_size();
        let progress_bar_width = canvas
            .surface_size(Surface::ProgressEmpty)
            .map(|(width, _)| width)
            .unwrap_or(0);

        Self {
            width: canvas.width(),
            height: canvas.height(),
            char_width,
            char_height,
            progress_bar_width,
        }
    }
}
