use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Rect;

/// Visual density of a menu row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Large-font list row
    #[default]
    Small,
    /// Compact row in the classic recovery style
    Legacy,
    /// Full-height row with room for a description
    Full,
}

impl ItemKind {
    pub fn height(&self) -> i32 {
        match self {
            ItemKind::Small => 80,
            ItemKind::Legacy => 18,
            ItemKind::Full => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub kind: ItemKind,
    pub title: CompactString,
    pub description: Option<CompactString>,
}

impl MenuItem {
    pub fn new(kind: ItemKind, title: impl Into<CompactString>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<CompactString>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Everything needed to present one menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuRequest {
    pub headers: Vec<String>,
    pub tabs: Vec<String>,
    pub items: Vec<MenuItem>,
    pub initial_selection: usize,
}

impl MenuRequest {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Item list, selection and scroll position of the current menu session
#[derive(Debug, Clone)]
pub struct MenuModel {
    items: Vec<MenuItem>,
    headers: SmallVec<[CompactString; 4]>,
    tabs: SmallVec<[CompactString; 4]>,
    active_tab: usize,
    selected: usize,
    /// First item of the keyboard-navigation window
    show_start: usize,
    scroll_offset: i32,
    viewport: Rect,
    content_height: i32,
    active: bool,
}

impl MenuModel {
    pub fn new(viewport: Rect) -> Self {
        Self {
            items: Vec::new(),
            headers: SmallVec::new(),
            tabs: SmallVec::new(),
            active_tab: 0,
            selected: 0,
            show_start: 0,
            scroll_offset: 0,
            viewport,
            content_height: 0,
            active: false,
        }
    }

    /// Replace the current session. Header lines are cut to `header_cols - 1` characters.
    pub fn start_session(&mut self, request: MenuRequest, header_cols: usize) {
        let keep = header_cols.saturating_sub(1);
        self.headers = request
            .headers
            .iter()
            .map(|line| line.chars().take(keep).collect())
            .collect();
        self.tabs = request
            .tabs
            .iter()
            .map(|tab| CompactString::from(tab.as_str()))
            .collect();
        if self.active_tab >= self.tabs.len() {
            self.active_tab = 0;
        }

        self.items = request.items;
        self.content_height = self.items.iter().map(|item| item.kind.height()).sum();
        self.scroll_offset = 0;
        self.show_start = 0;
        self.active = !self.items.is_empty();
        self.selected = if self.active {
            request.initial_selection % self.items.len()
        } else {
            0
        };
    }

    pub fn end_session(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selected(&self) -> Option<usize> {
        self.active.then_some(self.selected)
    }

    /// Select `target`, wrapping it into range, and keep it on screen
    pub fn select(&mut self, target: isize) -> Option<usize> {
        if !self.active {
            return None;
        }

        let count = self.items.len() as isize;
        self.selected = target.rem_euclid(count) as usize;
        self.ensure_visible();
        Some(self.selected)
    }

    pub fn move_by(&mut self, delta: isize) -> Option<usize> {
        let current = self.selected()? as isize;
        self.select(current + delta)
    }

    fn ensure_visible(&mut self) {
        let selected = self.selected;
        if selected < self.show_start {
            self.show_start = selected;
        }

        let selected_bottom = self.item_top(selected) + self.items[selected].kind.height();
        while self.show_start < selected
            && selected_bottom - self.item_top(self.show_start) > self.viewport.height()
        {
            self.show_start += 1;
        }

        self.scroll_offset = self.clamp_offset(-self.item_top(self.show_start));
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn headers(&self) -> &[CompactString] {
        &self.headers
    }

    pub fn tabs(&self) -> &[CompactString] {
        &self.tabs
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    /// Clamped to the last tab once a session has supplied them
    pub fn set_active_tab(&mut self, tab: usize) {
        self.active_tab = if self.tabs.is_empty() {
            tab
        } else {
            tab.min(self.tabs.len() - 1)
        };
    }

    /// Advance to the next tab, wrapping after the last one
    pub fn next_tab(&mut self) -> usize {
        self.active_tab = if self.active_tab + 1 >= self.tabs.len() {
            0
        } else {
            self.active_tab + 1
        };
        self.active_tab
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: i32) {
        self.scroll_offset = offset;
    }

    /// Legal scroll range as `(lowest, highest)`. The highest is always 0.
    pub fn scroll_bounds(&self) -> (i32, i32) {
        let lowest = (self.viewport.height() - self.content_height).min(0);
        (lowest, 0)
    }

    pub fn clamp_offset(&self, offset: i32) -> i32 {
        let (lowest, highest) = self.scroll_bounds();
        offset.clamp(lowest, highest)
    }

    /// Top of item `index` in content coordinates
    fn item_top(&self, index: usize) -> i32 {
        self.items[..index].iter().map(|item| item.kind.height()).sum()
    }

    /// On-screen rectangle of item `index`, including the scroll offset
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let item = self.items.get(index)?;
        let top = self.viewport.top + self.scroll_offset + self.item_top(index);
        Some(Rect {
            left: self.viewport.left,
            top,
            right: self.viewport.right,
            bottom: top + item.kind.height(),
        })
    }

    /// Item containing the point. Parts scrolled outside the viewport never match.
    pub fn item_at(&self, x: i32, y: i32) -> Option<usize> {
        if !self.viewport.contains(x, y) {
            return None;
        }
        (0..self.items.len()).find(|&i| {
            self.item_rect(i)
                .map(|rect| rect.contains(x, y))
                .unwrap_or(false)
        })
    }
}
