//! Logical menu controls and the input capability consumed by the menu.

/// The logical actions a menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Move the selection up.
    Previous,
    /// Move the selection down.
    Next,
    /// Activate the selected item.
    Accept,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Previous, Control::Next, Control::Accept];

    fn slot(self) -> usize {
        match self {
            Control::Previous => 0,
            Control::Next => 1,
            Control::Accept => 2,
        }
    }
}

/// Per-frame input provided by the host.
pub trait InputSource {
    /// True only on the frame the control went from released to pressed.
    fn is_just_pressed(&mut self, control: Control) -> bool;

    /// Keep the rest of the host from reacting to input this frame.
    fn disable_other_input(&mut self);
}

/// Turns level-triggered "is held" samples into edge-triggered presses.
///
/// Feed it one sample per frame with [`EdgeTrigger::update`]; afterwards
/// [`EdgeTrigger::just_pressed`] reports controls that were up last frame and
/// are down now.
#[derive(Debug, Clone, Default)]
pub struct EdgeTrigger {
    held: [bool; 3],
    pressed: [bool; 3],
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the held state of every control for a new frame.
    pub fn update(&mut self, mut is_held: impl FnMut(Control) -> bool) {
        for control in Control::ALL {
            let slot = control.slot();
            let now = is_held(control);
            self.pressed[slot] = now && !self.held[slot];
            self.held[slot] = now;
        }
    }

    pub fn just_pressed(&self, control: Control) -> bool {
        self.pressed[control.slot()]
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.slot()]
    }
}
