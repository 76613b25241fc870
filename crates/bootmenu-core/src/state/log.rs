/// Scrolling text log drawn under the menu.
///
/// A ring of `rows` lines. Text wraps at `cols` characters and once every
/// row has been used the oldest line scrolls out.
#[derive(Debug, Clone)]
pub struct LogOverlay {
    rows: Vec<String>,
    cols: usize,
    row: usize,
    col: usize,
    top: usize,
}

impl LogOverlay {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![String::new(); rows],
            cols,
            row: 0,
            col: 0,
            top: 1,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn print(&mut self, text: &str) {
        let count = self.rows.len();
        if count == 0 || self.cols == 0 {
            return;
        }

        for ch in text.chars() {
            if ch == '\n' || self.col >= self.cols {
                self.col = 0;
                self.row = (self.row + 1) % count;
                if self.row == self.top {
                    self.top = (self.top + 1) % count;
                }
                self.rows[self.row].clear();
            }
            if ch != '\n' {
                self.rows[self.row].push(ch);
                self.col += 1;
            }
        }
    }

    /// Lines in screen order, oldest first
    pub fn visible_rows(&self) -> impl Iterator<Item = &str> + '_ {
        let count = self.rows.len();
        (0..count).map(move |i| self.rows[(i + self.top) % count].as_str())
    }
}
