use super::{Canvas, Font, Surface};
use crate::state::{Background, ItemKind, ProgressKind, SharedUiState};

const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const ACCENT: (u8, u8, u8) = (0, 170, 255);
const LEGACY_BLUE: (u8, u8, u8) = (64, 96, 255);
const SEPARATOR: (u8, u8, u8) = (164, 164, 164);
const LOG_YELLOW: (u8, u8, u8) = (255, 255, 0);

fn color(canvas: &mut dyn Canvas, (r, g, b): (u8, u8, u8), a: u8) {
    canvas.set_color(r, g, b, a);
}

/// Paint one full frame. Does not flip.
pub fn draw_screen(state: &SharedUiState, canvas: &mut dyn Canvas, clock: &str) {
    draw_background(state, canvas);
    draw_progress(state, canvas);

    if state.show_text {
        draw_menu(state, canvas);
        draw_log(state, canvas);
        draw_status_bar(state, canvas, clock);
        draw_tabs(state, canvas);

        let divider = state.config.layout.status_bar_height + state.config.layout.tab_bar_height;
        let width = canvas.width();
        color(canvas, ACCENT, 255);
        canvas.line(0, divider, width, divider, 4);
    }

    if state.config.display.debug_pointer {
        if let Some((x, y)) = state.pointer {
            canvas.set_color(255, 0, 0, 255);
            canvas.fill(x - 2, y - 2, x + 3, y + 3);
        }
    }
}

fn draw_background(state: &SharedUiState, canvas: &mut dyn Canvas) {
    let (width, height) = (canvas.width(), canvas.height());
    color(canvas, BLACK, 255);
    canvas.fill(0, 0, width, height);

    let surface = match state.background {
        Some(Background::Default) => Surface::Background,
        Some(Background::Alt) => Surface::BackgroundAlt,
        None => return,
    };
    if let Some((w, h)) = canvas.surface_size(surface) {
        canvas.blit(surface, 0, 0, w, h, (width - w) / 2, (height - h) / 2);
    }
}

fn draw_progress(state: &SharedUiState, canvas: &mut dyn Canvas) {
    let progress = &state.progress;
    if progress.kind() == ProgressKind::None {
        return;
    }
    let Some((width, height)) = canvas.surface_size(Surface::ProgressEmpty) else {
        return;
    };

    let icon_height = canvas
        .surface_size(Surface::BackgroundAlt)
        .map(|(_, h)| h)
        .unwrap_or(0);
    let dx = (canvas.width() - width) / 2;
    let dy = (3 * canvas.height() + icon_height - 2 * height) / 4 - 5;

    color(canvas, BLACK, 255);
    canvas.fill(dx, dy, dx + width, dy + height);

    match progress.kind() {
        ProgressKind::Determinate => {
            let pos = progress.fill_width(width);
            if pos > 0 {
                canvas.blit(Surface::ProgressFill, 0, 0, pos, height, dx, dy);
            }
            if pos < width - 1 {
                canvas.blit(Surface::ProgressEmpty, pos, 0, width - pos, height, dx + pos, dy);
            }
            if pos > 0 && state.config.display.show_percent && progress.percent() > 0.0 {
                let label = format!("{:3.0} %", progress.percent() * 100.0);
                color(canvas, WHITE, 255);
                canvas.text(dx + 8, dy - 4, &label);
            }
        }
        ProgressKind::Indeterminate => {
            let frame = Surface::Indeterminate(progress.frame());
            if canvas.surface_size(frame).is_some() {
                canvas.blit(frame, 0, 0, width, height, dx, dy);
            }
        }
        ProgressKind::None => {}
    }
}

fn draw_menu(state: &SharedUiState, canvas: &mut dyn Canvas) {
    let menu = &state.menu;
    let Some(selected) = menu.selected() else {
        return;
    };
    let viewport = menu.viewport();

    for (index, item) in menu.items().iter().enumerate() {
        let Some(rect) = menu.item_rect(index) else {
            continue;
        };
        if rect.bottom <= viewport.top || rect.top >= viewport.bottom {
            continue;
        }

        let (base, font) = match item.kind {
            ItemKind::Small => (WHITE, Font::Big),
            ItemKind::Legacy => (LEGACY_BLUE, Font::Normal),
            ItemKind::Full => (WHITE, Font::Normal),
        };

        if index == selected {
            color(canvas, base, 255);
            canvas.fill(rect.left, rect.top, rect.right, rect.bottom);
            color(canvas, BLACK, 255);
        } else {
            color(canvas, base, 255);
        }

        canvas.set_font(font);
        let (_, char_height) = canvas.char_size();
        let middle = rect.top + rect.height() / 2 + char_height / 2;

        match (&item.kind, &item.description) {
            (ItemKind::Full, Some(description)) => {
                canvas.text_cut(
                    rect.left,
                    middle - char_height / 2,
                    &item.title,
                    rect.right,
                    rect.bottom,
                );
                canvas.text_cut(
                    rect.left,
                    middle + char_height / 2,
                    description,
                    rect.right,
                    rect.bottom,
                );
            }
            _ => canvas.text_cut(rect.left, middle, &item.title, rect.right, rect.bottom),
        }

        if item.kind != ItemKind::Legacy {
            color(canvas, SEPARATOR, 255);
            canvas.line(rect.left, rect.bottom, rect.right, rect.bottom, 1);
        }
    }
}

/// Log rows sit on the bottom edge of the menu area, newest last
fn draw_log(state: &SharedUiState, canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Normal);
    color(canvas, LOG_YELLOW, 255);
    let (_, char_height) = canvas.char_size();
    let viewport = state.menu.viewport();
    let count = state.log.rows() as i32;

    for (row, line) in state.log.visible_rows().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = viewport.bottom - (count - 1 - row as i32) * char_height - 1;
        canvas.text(viewport.left - 3, y, line);
    }
}

fn draw_status_bar(state: &SharedUiState, canvas: &mut dyn Canvas, clock: &str) {
    let bar_height = state.config.layout.status_bar_height;
    let width = canvas.width();

    color(canvas, BLACK, 160);
    canvas.fill(0, 0, width, bar_height);

    canvas.set_font(Font::Normal);
    let (char_width, char_height) = canvas.char_size();
    let x = width - clock.chars().count() as i32 * char_width - 10;
    color(canvas, ACCENT, 255);
    canvas.text(x, char_height / 2 + bar_height / 2, clock);
}

fn draw_tabs(state: &SharedUiState, canvas: &mut dyn Canvas) {
    let top = state.config.layout.status_bar_height;
    let bottom = top + state.config.layout.tab_bar_height;
    let width = canvas.width();

    color(canvas, BLACK, 255);
    canvas.fill(0, top, width, bottom);

    let (char_width, char_height) = canvas.char_size();
    let mut left = 0;
    for (index, tab) in state.menu.tabs().iter().enumerate() {
        let tab_width = tab.chars().count() as i32 * char_width + 40;

        color(canvas, BLACK, 255);
        canvas.fill(left, top, left + tab_width, bottom);
        color(canvas, WHITE, 255);
        canvas.text(left + 20, top + char_height / 2 + (bottom - top) / 2, tab);

        if index == state.menu.active_tab() {
            color(canvas, ACCENT, 255);
            canvas.fill(left, bottom - 10, left + tab_width, bottom);
        }
        left += tab_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::state::{MenuItem, MenuRequest, ScreenMetrics};
    use std::collections::HashMap;
    use std::time::Instant;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Color(u8, u8, u8, u8),
        Fill(i32, i32, i32, i32),
        Blit(Surface, i32, i32, i32, i32, i32, i32),
        Line(i32, i32, i32, i32, i32),
        Text(i32, i32, String),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        surfaces: HashMap<Surface, (i32, i32)>,
    }

    impl Recorder {
        fn with_surfaces() -> Self {
            let mut surfaces = HashMap::new();
            surfaces.insert(Surface::ProgressEmpty, (200, 20));
            surfaces.insert(Surface::ProgressFill, (200, 20));
            surfaces.insert(Surface::BackgroundAlt, (100, 100));
            Self { ops: Vec::new(), surfaces }
        }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(_, _, text) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for Recorder {
        fn width(&self) -> i32 {
            480
        }
        fn height(&self) -> i32 {
            854
        }
        fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
            self.ops.push(Op::Color(r, g, b, a));
        }
        fn set_font(&mut self, _font: Font) {}
        fn char_size(&self) -> (i32, i32) {
            (10, 18)
        }
        fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
            self.ops.push(Op::Fill(x1, y1, x2, y2));
        }
        fn blit(&mut self, surface: Surface, sx: i32, sy: i32, w: i32, h: i32, dx: i32, dy: i32) {
            self.ops.push(Op::Blit(surface, sx, sy, w, h, dx, dy));
        }
        fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32) {
            self.ops.push(Op::Line(x1, y1, x2, y2, width));
        }
        fn text(&mut self, x: i32, y: i32, text: &str) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }
        fn text_cut(&mut self, x: i32, y: i32, text: &str, _max_x: i32, _max_y: i32) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }
        fn surface_size(&self, surface: Surface) -> Option<(i32, i32)> {
            self.surfaces.get(&surface).copied()
        }
        fn flip(&mut self) {}
    }

    fn state(canvas: &mut Recorder) -> SharedUiState {
        let metrics = ScreenMetrics::measure(canvas);
        let mut state = SharedUiState::new(&UiConfig::default(), metrics);
        state.start_session(MenuRequest {
            tabs: vec!["Boot".into(), "Tools".into()],
            items: vec![
                MenuItem::new(ItemKind::Small, "Normal boot"),
                MenuItem::new(ItemKind::Small, "Recovery"),
            ],
            ..MenuRequest::default()
        });
        state
    }

    #[test]
    fn hidden_text_skips_menu_and_chrome() {
        let mut canvas = Recorder::with_surfaces();
        let mut state = state(&mut canvas);
        state.show_text = false;

        draw_screen(&state, &mut canvas, "10:42");
        assert!(canvas.texts().is_empty());
        assert_eq!(canvas.ops[1], Op::Fill(0, 0, 480, 854));
    }

    #[test]
    fn menu_tabs_and_clock_are_drawn() {
        let mut canvas = Recorder::with_surfaces();
        let mut state = state(&mut canvas);
        state.menu.set_active_tab(1);
        state.menu.select(1);
        state.log.print("installing");

        draw_screen(&state, &mut canvas, "10:42");

        assert_eq!(
            canvas.texts(),
            vec!["Normal boot", "Recovery", "installing", "10:42", "Boot", "Tools"]
        );
        // highlight of the second 80px row
        assert!(canvas.ops.contains(&Op::Fill(25, 210, 455, 290)));
        // active tab marker under "Tools", which starts after the 80px "Boot" tab
        assert!(canvas.ops.contains(&Op::Fill(80, 120, 170, 130)));
        assert_eq!(canvas.ops.last(), Some(&Op::Line(0, 130, 480, 130, 4)));
    }

    #[test]
    fn determinate_progress_splits_fill_and_empty() {
        let mut canvas = Recorder::with_surfaces();
        let mut state = state(&mut canvas);
        state.show_text = false;
        state.progress.set(ProgressKind::Determinate, 0.5, 0, Instant::now());

        draw_screen(&state, &mut canvas, "");

        // dx = (480 - 200) / 2, dy = (3 * 854 + 100 - 40) / 4 - 5
        let (dx, dy) = (140, 650);
        assert!(canvas.ops.contains(&Op::Blit(Surface::ProgressFill, 0, 0, 100, 20, dx, dy)));
        assert!(canvas
            .ops
            .contains(&Op::Blit(Surface::ProgressEmpty, 100, 0, 100, 20, dx + 100, dy)));
        assert_eq!(canvas.texts(), vec![" 50 %"]);
    }

    #[test]
    fn missing_surfaces_are_skipped() {
        let mut canvas = Recorder::default();
        let mut state = state(&mut canvas);
        state.background = Some(Background::Alt);
        state.progress.show_indeterminate();

        draw_screen(&state, &mut canvas, "10:42");
        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Blit(..))));
    }

    #[test]
    fn debug_pointer_marks_last_touch() {
        let mut canvas = Recorder::with_surfaces();
        let mut state = state(&mut canvas);
        state.config.display.debug_pointer = true;
        state.pointer = Some((50, 60));

        draw_screen(&state, &mut canvas, "10:42");
        assert_eq!(canvas.ops.last(), Some(&Op::Fill(48, 58, 53, 63)));
    }
}
