//! Canvas that renders nowhere and traces its draw calls

use bootmenu_core::{Canvas, Font, Surface};
use tracing::{debug, trace};

const BAR_SIZE: (i32, i32) = (280, 24);
const BACKGROUND_SIZE: (i32, i32) = (200, 200);

pub struct HeadlessCanvas {
    width: i32,
    height: i32,
    font: Font,
    frames: u64,
}

impl HeadlessCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            font: Font::Normal,
            frames: 0,
        }
    }
}

impl Canvas for HeadlessCanvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        trace!(r, g, b, a, "color");
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn char_size(&self) -> (i32, i32) {
        match self.font {
            Font::Normal => (10, 18),
            Font::Big => (16, 30),
        }
    }

    fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        trace!(x1, y1, x2, y2, "fill");
    }

    fn blit(&mut self, surface: Surface, sx: i32, sy: i32, w: i32, h: i32, dx: i32, dy: i32) {
        trace!(?surface, sx, sy, w, h, dx, dy, "blit");
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32) {
        trace!(x1, y1, x2, y2, width, "line");
    }

    fn text(&mut self, x: i32, y: i32, text: &str) {
        trace!(x, y, text, "text");
    }

    fn text_cut(&mut self, x: i32, y: i32, text: &str, max_x: i32, max_y: i32) {
        trace!(x, y, text, max_x, max_y, "text_cut");
    }

    fn surface_size(&self, surface: Surface) -> Option<(i32, i32)> {
        match surface {
            Surface::Background | Surface::BackgroundAlt => Some(BACKGROUND_SIZE),
            Surface::ProgressEmpty | Surface::ProgressFill => Some(BAR_SIZE),
            Surface::Indeterminate(0) => Some(BAR_SIZE),
            Surface::Indeterminate(_) => None,
        }
    }

    fn flip(&mut self) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            debug!(frames = self.frames, "headless frames presented");
        }
    }
}
