use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Alignment, Canvas, Font, PointF, Rgba, ScaledText};
use crate::event::{Handlers, SelectedArgs};

/// Horizontal padding between the panel edge and item text.
pub const ITEM_PADDING: f32 = 24.0;

/// Text scale of item titles and subtitles.
pub const ITEM_SCALE: f32 = 0.68;

/// Identity of an item inside a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Text colors for each display state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemColors {
    #[serde(default = "default_not_selected")]
    pub not_selected: Rgba,
    #[serde(default = "default_selected")]
    pub selected: Rgba,
    #[serde(default = "default_disabled")]
    pub disabled: Rgba,
    #[serde(default = "default_header")]
    pub header: Rgba,
}

fn default_not_selected() -> Rgba {
    Rgba::from_rgb(221, 221, 221)
}

fn default_selected() -> Rgba {
    Rgba::from_rgb(255, 255, 255)
}

fn default_disabled() -> Rgba {
    Rgba::from_rgb(110, 110, 110)
}

fn default_header() -> Rgba {
    Rgba::from_rgb(172, 203, 241)
}

impl Default for ItemColors {
    fn default() -> Self {
        Self {
            not_selected: default_not_selected(),
            selected: default_selected(),
            disabled: default_disabled(),
            header: default_header(),
        }
    }
}

/// The inputs of an item layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemLayout {
    /// Left edge of the row.
    pub position: PointF,
    /// Width of the owning panel.
    pub width: f32,
    pub selected: bool,
    pub header: bool,
}

/// A single row of a [`Menu`](super::Menu).
#[derive(Debug)]
pub struct MenuItem {
    id: ItemId,
    enabled: bool,
    colors: ItemColors,
    title: ScaledText,
    subtitle: ScaledText,
    last_layout: Option<ItemLayout>,
    selected: Handlers<SelectedArgs>,
    activated: Handlers<()>,
    enabled_changed: Handlers<bool>,
}

impl MenuItem {
    /// Create an enabled item with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(ItemId::new(), title)
    }

    /// Create an item with a caller supplied id.
    pub fn with_id(id: ItemId, title: impl Into<String>) -> Self {
        let colors = ItemColors::default();
        let title = ScaledText::new(PointF::ZERO, title, ITEM_SCALE, Font::ChaletComprimeCologne)
            .with_color(colors.not_selected);
        let subtitle = ScaledText::new(PointF::ZERO, "", ITEM_SCALE, Font::ChaletComprimeCologne)
            .with_color(colors.not_selected)
            .with_alignment(Alignment::Right);

        Self {
            id,
            enabled: true,
            colors,
            title,
            subtitle,
            last_layout: None,
            selected: Handlers::new(),
            activated: Handlers::new(),
            enabled_changed: Handlers::new(),
        }
    }

    /// Set the right-aligned subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle.text = subtitle.into();
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title.text
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title.text = title.into();
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle.text
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle.text = subtitle.into();
    }

    pub fn title_text(&self) -> &ScaledText {
        &self.title
    }

    pub fn subtitle_text(&self) -> &ScaledText {
        &self.subtitle
    }

    pub fn colors(&self) -> &ItemColors {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: ItemColors) {
        self.colors = colors;
        self.recalculate();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the item.
    ///
    /// Changing the state replays the last layout so the color follows and
    /// then fires the enabled-changed notification.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.recalculate();
        let mut value = enabled;
        self.enabled_changed.emit(&mut value);
    }

    /// The layout applied by the last [`MenuItem::recalculate_with`] call.
    pub fn last_layout(&self) -> Option<ItemLayout> {
        self.last_layout
    }

    /// Place the item and pick its color.
    pub fn recalculate_with(&mut self, layout: ItemLayout) {
        self.last_layout = Some(layout);

        let ItemLayout {
            position, width, ..
        } = layout;
        self.title.position = PointF::new(position.x + ITEM_PADDING, position.y);
        self.subtitle.position = PointF::new(position.x + width - ITEM_PADDING, position.y);
        self.update_color(layout.selected, layout.header);
    }

    /// Replay the last known layout.
    ///
    /// Items that were never laid out only get their color refreshed.
    pub fn recalculate(&mut self) {
        match self.last_layout {
            Some(layout) => self.recalculate_with(layout),
            None => self.update_color(false, false),
        }
    }

    /// Pick the text color for the given state.
    ///
    /// Header wins over everything, then disabled, then selected.
    pub fn update_color(&mut self, selected: bool, header: bool) {
        let color = if header {
            self.colors.header
        } else if !self.enabled {
            self.colors.disabled
        } else if selected {
            self.colors.selected
        } else {
            self.colors.not_selected
        };
        self.title.color = color;
        self.subtitle.color = color;
    }

    /// Change only the selection highlight, keeping the rest of the layout.
    pub(crate) fn set_highlighted(&mut self, selected: bool) {
        match self.last_layout {
            Some(layout) => self.recalculate_with(ItemLayout { selected, ..layout }),
            None => self.update_color(selected, false),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.title.draw(canvas);
        if !self.subtitle.text.is_empty() {
            self.subtitle.draw(canvas);
        }
    }

    pub fn on_selected(&mut self, callback: impl FnMut(&mut SelectedArgs) + 'static) {
        self.selected.subscribe(callback);
    }

    pub fn on_activated(&mut self, callback: impl FnMut(&mut ()) + 'static) {
        self.activated.subscribe(callback);
    }

    pub fn on_enabled_changed(&mut self, callback: impl FnMut(&mut bool) + 'static) {
        self.enabled_changed.subscribe(callback);
    }

    pub(crate) fn notify_selected(&mut self, args: &mut SelectedArgs) {
        self.selected.emit(args);
    }

    pub(crate) fn notify_activated(&mut self) {
        self.activated.fire();
    }
}
