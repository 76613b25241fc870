use std::time::Instant;

use tracing::debug;

use super::{BounceAnimation, MenuModel};
use crate::config::GestureConfig;
use crate::messages::{TouchEvent, TouchPhase, TouchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pressed,
    Scrolling,
}

/// Tap versus scroll recognition for a single contact
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    phase: GesturePhase,
    start_x: i32,
    start_y: i32,
    start_time: Option<Instant>,
    base_offset: i32,
    inside_at_start: bool,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one touch event. Only a tap that starts and ends on the same item
    /// activates it.
    pub fn handle(
        &mut self,
        touch: &TouchEvent,
        menu: &mut MenuModel,
        bounce: &mut Option<BounceAnimation>,
        config: &GestureConfig,
    ) -> TouchResult {
        if !menu.is_active() {
            self.reset();
            return TouchResult::Empty;
        }

        match touch.phase {
            TouchPhase::Start => {
                self.start(touch, menu, bounce);
                TouchResult::Empty
            }
            TouchPhase::Drag => {
                self.drag(touch, menu, config);
                TouchResult::Empty
            }
            TouchPhase::Release => self.release(touch, menu, bounce, config),
        }
    }

    fn start(
        &mut self,
        touch: &TouchEvent,
        menu: &MenuModel,
        bounce: &mut Option<BounceAnimation>,
    ) {
        if bounce.take().is_some() {
            debug!("touch cancelled bounce");
        }

        *self = Self {
            phase: GesturePhase::Pressed,
            start_x: touch.x,
            start_y: touch.y,
            start_time: Some(touch.time),
            base_offset: menu.scroll_offset(),
            inside_at_start: menu.viewport().contains(touch.x, touch.y),
        };
    }

    fn drag(&mut self, touch: &TouchEvent, menu: &mut MenuModel, config: &GestureConfig) {
        let dy = touch.y - self.start_y;

        if self.phase == GesturePhase::Pressed && self.inside_at_start {
            let elapsed = self
                .start_time
                .map(|start| touch.time.saturating_duration_since(start))
                .unwrap_or_default();
            if elapsed <= config.scroll_window() && dy.abs() >= config.scroll_threshold_px {
                debug!(dy, elapsed_ms = elapsed.as_millis() as u64, "gesture became scroll");
                self.phase = GesturePhase::Scrolling;
            }
        }

        if self.phase == GesturePhase::Scrolling {
            menu.set_scroll_offset(self.base_offset + dy);
        }
    }

    fn release(
        &mut self,
        touch: &TouchEvent,
        menu: &MenuModel,
        bounce: &mut Option<BounceAnimation>,
        config: &GestureConfig,
    ) -> TouchResult {
        let result = match self.phase {
            GesturePhase::Idle => TouchResult::Empty,
            GesturePhase::Pressed => self.tapped_item(touch, menu),
            GesturePhase::Scrolling => {
                let offset = menu.scroll_offset();
                let target = menu.clamp_offset(offset);
                if target != offset {
                    debug!(offset, target, "scroll out of bounds, bouncing back");
                    *bounce = Some(BounceAnimation::new(
                        offset,
                        target,
                        touch.time,
                        config.bounce_duration(),
                    ));
                }
                TouchResult::Empty
            }
        };

        self.reset();
        result
    }

    fn tapped_item(&self, touch: &TouchEvent, menu: &MenuModel) -> TouchResult {
        let hit = menu
            .item_at(self.start_x, self.start_y)
            .filter(|&index| menu.item_at(touch.x, touch.y) == Some(index));

        match hit {
            Some(index) => {
                debug!(index, "item activated by tap");
                TouchResult::ItemActivated(index)
            }
            None => TouchResult::Empty,
        }
    }
}
