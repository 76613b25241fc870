/// What a key press means to the menu, as decided by the device policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Ignore the key
    NoAction,
    /// Move the highlight one item up
    HighlightUp,
    /// Move the highlight one item down
    HighlightDown,
    /// Invoke the highlighted item
    SelectItem,
    /// Leave the menu without a selection
    Cancel,
    /// Switch to the next tab
    NextTab,
    /// Invoke a specific item regardless of the highlight
    Invoke(usize),
}

/// Outcome of feeding one touch event to the gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchResult {
    #[default]
    Empty,
    ItemActivated(usize),
}

/// Outcome of one menu presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResult {
    Selected(usize),
    GoBack,
    /// The user switched tabs; carries the newly active tab
    NextTab(usize),
}

/// Maps raw key codes to menu actions. Implemented by the device layer.
pub trait KeyMapper {
    fn handle_key(&self, code: u16, visible: bool) -> MenuAction;
}
