//! The San Andreas style list menu.
//!
//! A [`Menu`] owns its [`MenuItem`]s, lays them out below an optional header
//! and moves a selection cursor over them in response to edge-triggered
//! [`Control`] presses.

mod container;
mod item;
mod pool;

pub use container::Container;
pub use item::{ITEM_PADDING, ITEM_SCALE, ItemColors, ItemId, ItemLayout, MenuItem};
pub use pool::{MenuId, MenuPool, PoolError};

use std::fmt;

use thiserror::Error;

use crate::element::{Canvas, Font, PointF, Rgba, ScaledRectangle, ScaledText, SizeF};
use crate::event::{CancelArgs, Handlers, SelectedArgs};
use crate::input::{Control, InputSource};
use crate::screen::{NoSafeZone, SafeZone};

/// Default panel width.
pub const DEFAULT_WIDTH: f32 = 497.0;

/// Height of one item row.
pub const ROW_HEIGHT: f32 = 39.0;

/// Distance from the panel top to the header row, or to the first item
/// when there is no header.
pub const HEADER_OFFSET: f32 = 37.0;

/// Distance from the panel top to the first item when a header is present.
pub const ITEMS_OFFSET_WITH_HEADER: f32 = 84.0;

/// Panel height on top of the rows, without and with a header.
pub const PANEL_PADDING: f32 = 126.0;
pub const PANEL_PADDING_WITH_HEADER: f32 = 163.0;

/// Position of the title relative to the panel origin.
pub const TITLE_OFFSET: PointF = PointF::new(28.0, -40.0);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("item {0} is already part of the menu")]
    DuplicateItem(ItemId),

    #[error("item {0} is not part of the menu")]
    ItemNotInMenu(ItemId),

    #[error("the menu does not have any items")]
    InvalidState,

    #[error("index {index} is out of range, the menu has {count} item(s)")]
    OutOfRange { index: usize, count: usize },
}

/// A navigable list menu.
pub struct Menu {
    visible: bool,
    index: usize,
    width: f32,
    offset: PointF,
    safe_zone_aware: bool,
    safe_zone: Box<dyn SafeZone>,
    header: Option<MenuItem>,
    title: ScaledText,
    background: ScaledRectangle,
    items: Vec<MenuItem>,
    opening: Handlers<CancelArgs>,
    shown: Handlers<()>,
    closing: Handlers<CancelArgs>,
    closed: Handlers<()>,
    selected_index_changed: Handlers<SelectedArgs>,
}

impl Menu {
    /// Create an empty, closed menu.
    pub fn new(title: impl Into<String>) -> Self {
        let title = ScaledText::new(PointF::ZERO, title, 1.25, Font::Monospace)
            .with_color(Rgba::from_rgb(221, 221, 221))
            .with_outline(true);
        let background = ScaledRectangle::new(PointF::ZERO, SizeF::ZERO)
            .with_color(Rgba::from_argb(125, 0, 0, 0));

        let mut menu = Self {
            visible: false,
            index: 0,
            width: DEFAULT_WIDTH,
            offset: PointF::ZERO,
            safe_zone_aware: false,
            safe_zone: Box::new(NoSafeZone),
            header: None,
            title,
            background,
            items: Vec::new(),
            opening: Handlers::new(),
            shown: Handlers::new(),
            closing: Handlers::new(),
            closed: Handlers::new(),
            selected_index_changed: Handlers::new(),
        };
        menu.recalculate();
        menu
    }

    // Properties

    pub fn title(&self) -> &str {
        &self.title.text
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title.text = title.into();
    }

    pub fn title_text(&self) -> &ScaledText {
        &self.title
    }

    pub fn background(&self) -> &ScaledRectangle {
        &self.background
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.recalculate();
    }

    /// Offset of the panel from the top left corner of the screen.
    pub fn offset(&self) -> PointF {
        self.offset
    }

    pub fn set_offset(&mut self, offset: PointF) {
        self.offset = offset;
        self.recalculate();
    }

    pub fn is_safe_zone_aware(&self) -> bool {
        self.safe_zone_aware
    }

    pub fn set_safe_zone_aware(&mut self, aware: bool) {
        self.safe_zone_aware = aware;
        self.recalculate();
    }

    /// Replace the resolver used when the menu is safe-zone aware.
    pub fn set_safe_zone(&mut self, safe_zone: impl SafeZone + 'static) {
        self.safe_zone = Box::new(safe_zone);
        self.recalculate();
    }

    pub fn header(&self) -> Option<&MenuItem> {
        self.header.as_ref()
    }

    pub fn header_mut(&mut self) -> Option<&mut MenuItem> {
        self.header.as_mut()
    }

    /// Set or remove the header row, returning the previous one.
    pub fn set_header(&mut self, header: Option<MenuItem>) -> Option<MenuItem> {
        let previous = std::mem::replace(&mut self.header, header);
        self.recalculate();
        previous
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Visibility

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the menu through [`Menu::open`] and [`Menu::close`].
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        if visible {
            self.open();
        } else {
            self.close();
        }
    }

    /// Open the menu unless an opening handler cancels it.
    ///
    /// Returns whether the menu is visible afterwards.
    pub fn open(&mut self) -> bool {
        if self.visible {
            return true;
        }
        if self.opening.emit_cancelable() {
            log::debug!("opening of menu '{}' was canceled", self.title.text);
            return false;
        }

        self.visible = true;
        log::debug!("menu '{}' opened", self.title.text);
        self.shown.fire();
        self.trigger_selected();
        true
    }

    /// Close the menu unless a closing handler cancels it.
    ///
    /// Returns whether the menu is hidden afterwards.
    pub fn close(&mut self) -> bool {
        if !self.visible {
            return true;
        }
        if self.closing.emit_cancelable() {
            log::debug!("closing of menu '{}' was canceled", self.title.text);
            return false;
        }

        self.visible = false;
        log::debug!("menu '{}' closed", self.title.text);
        self.closed.fire();
        true
    }

    // Selection

    /// Index of the selected item, `None` when there is nothing to select.
    pub fn selected_index(&self) -> Option<usize> {
        if self.index < self.items.len() {
            Some(self.index)
        } else {
            None
        }
    }

    /// Select an item by index.
    ///
    /// Re-highlights every item and, while the menu is visible, fires the
    /// item's selected notification followed by the menu's.
    pub fn set_selected_index(&mut self, index: usize) -> Result<(), MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::InvalidState);
        }
        if index >= self.items.len() {
            return Err(MenuError::OutOfRange {
                index,
                count: self.items.len(),
            });
        }
        self.select(index);
        Ok(())
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected_index().map(|index| &self.items[index])
    }

    pub fn selected_item_mut(&mut self) -> Option<&mut MenuItem> {
        self.selected_index().map(|index| &mut self.items[index])
    }

    pub fn set_selected_item(&mut self, id: ItemId) -> Result<(), MenuError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(MenuError::ItemNotInMenu(id))?;
        self.set_selected_index(index)
    }

    /// Move the selection up, wrapping to the last item.
    pub fn select_previous(&mut self) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        let target = match self.selected_index() {
            Some(0) | None => last,
            Some(index) => index - 1,
        };
        self.select(target);
    }

    /// Move the selection down, wrapping to the first item.
    pub fn select_next(&mut self) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        let target = match self.selected_index() {
            Some(index) if index < last => index + 1,
            _ => 0,
        };
        self.select(target);
    }

    /// Fire the activated notification of the selected item.
    pub fn activate_selected(&mut self) {
        if let Some(item) = self.selected_item_mut() {
            log::trace!("activating item {}", item.id());
            item.notify_activated();
        }
    }

    // Contents

    /// Append an item. Fails if an item with the same id is already present.
    pub fn add(&mut self, item: MenuItem) -> Result<ItemId, MenuError> {
        let id = item.id();
        if self.contains(id) {
            log::warn!("refusing to add item {id} twice to menu '{}'", self.title.text);
            return Err(MenuError::DuplicateItem(id));
        }
        self.items.push(item);
        self.recalculate();
        Ok(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Remove an item, returning it if it was part of the menu.
    pub fn remove(&mut self, id: ItemId) -> Option<MenuItem> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        let previous = self.selected_id();
        let item = self.items.remove(position);
        self.after_removal(previous);
        Some(item)
    }

    /// Remove every item the predicate matches.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&MenuItem) -> bool) -> usize {
        let before = self.items.len();
        let previous = self.selected_id();
        self.items.retain(|item| !predicate(item));
        let removed = before - self.items.len();
        if removed > 0 {
            self.after_removal(previous);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index = 0;
        self.recalculate();
    }

    // Frame

    /// Lay out the panel, title, header and items.
    pub fn recalculate(&mut self) {
        let origin = if self.safe_zone_aware {
            self.safe_zone.real_position(self.offset)
        } else {
            self.offset
        };
        let has_header = self.header.is_some();
        let padding = if has_header {
            PANEL_PADDING_WITH_HEADER
        } else {
            PANEL_PADDING
        };

        self.background.position = origin;
        self.background.size = SizeF::new(
            self.width,
            ROW_HEIGHT * self.items.len() as f32 + padding,
        );
        self.title.position = origin.offset(TITLE_OFFSET.x, TITLE_OFFSET.y);

        if let Some(header) = &mut self.header {
            header.recalculate_with(ItemLayout {
                position: origin.offset(0.0, HEADER_OFFSET),
                width: self.width,
                selected: false,
                header: true,
            });
        }

        let top = if has_header {
            ITEMS_OFFSET_WITH_HEADER
        } else {
            HEADER_OFFSET
        };
        let selected = self.selected_index();
        for (i, item) in self.items.iter_mut().enumerate() {
            item.recalculate_with(ItemLayout {
                position: origin.offset(0.0, top + ROW_HEIGHT * i as f32),
                width: self.width,
                selected: selected == Some(i),
                header: false,
            });
        }
    }

    /// Draw the menu and handle navigation for one frame.
    ///
    /// Input is only looked at when there are items. At most one of
    /// previous, next and accept is handled per frame, in that order.
    pub fn process(&mut self, canvas: &mut dyn Canvas, input: &mut dyn InputSource) {
        self.background.draw(canvas);
        self.title.draw(canvas);
        if let Some(header) = &self.header {
            header.draw(canvas);
        }
        for item in &self.items {
            item.draw(canvas);
        }

        if self.items.is_empty() {
            return;
        }

        input.disable_other_input();

        if input.is_just_pressed(Control::Previous) {
            self.select_previous();
        } else if input.is_just_pressed(Control::Next) {
            self.select_next();
        } else if input.is_just_pressed(Control::Accept) {
            self.activate_selected();
        }
    }

    // Notifications

    pub fn on_opening(&mut self, callback: impl FnMut(&mut CancelArgs) + 'static) {
        self.opening.subscribe(callback);
    }

    pub fn on_shown(&mut self, callback: impl FnMut(&mut ()) + 'static) {
        self.shown.subscribe(callback);
    }

    pub fn on_closing(&mut self, callback: impl FnMut(&mut CancelArgs) + 'static) {
        self.closing.subscribe(callback);
    }

    pub fn on_closed(&mut self, callback: impl FnMut(&mut ()) + 'static) {
        self.closed.subscribe(callback);
    }

    pub fn on_selected_index_changed(&mut self, callback: impl FnMut(&mut SelectedArgs) + 'static) {
        self.selected_index_changed.subscribe(callback);
    }

    /// Commit an index already known to be in range.
    fn select(&mut self, index: usize) {
        self.index = index;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_highlighted(i == index);
        }
        log::trace!("menu '{}' selected index {index}", self.title.text);
        self.trigger_selected();
    }

    fn trigger_selected(&mut self) {
        if !self.visible {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };
        let item = &mut self.items[index];
        let mut args = SelectedArgs {
            index,
            item: item.id(),
        };
        item.notify_selected(&mut args);
        self.selected_index_changed.emit(&mut args);
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.selected_index().map(|index| self.items[index].id())
    }

    /// Clamp the index and announce the selection if it now lands on a
    /// different item.
    fn after_removal(&mut self, previous: Option<ItemId>) {
        if self.index >= self.items.len() {
            self.index = self.items.len().saturating_sub(1);
        }
        self.recalculate();
        let current = self.selected_id();
        if current.is_some() && current != previous {
            log::trace!(
                "menu '{}' selection moved to index {} after removal",
                self.title.text,
                self.index
            );
            self.trigger_selected();
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title.text)
            .field("visible", &self.visible)
            .field("index", &self.index)
            .field("width", &self.width)
            .field("offset", &self.offset)
            .field("safe_zone_aware", &self.safe_zone_aware)
            .field("header", &self.header)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl Container<MenuItem> for Menu {
    type Id = ItemId;
    type Error = MenuError;

    fn add(&mut self, entry: MenuItem) -> Result<ItemId, MenuError> {
        Menu::add(self, entry)
    }

    fn remove(&mut self, id: ItemId) -> Option<MenuItem> {
        Menu::remove(self, id)
    }

    fn remove_where(&mut self, predicate: &mut dyn FnMut(&MenuItem) -> bool) -> usize {
        Menu::remove_where(self, predicate)
    }

    fn contains(&self, id: ItemId) -> bool {
        Menu::contains(self, id)
    }

    fn clear(&mut self) {
        Menu::clear(self)
    }

    fn process(&mut self, canvas: &mut dyn Canvas, input: &mut dyn InputSource) {
        Menu::process(self, canvas, input)
    }

    fn recalculate(&mut self) {
        Menu::recalculate(self)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::EdgeTrigger;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Drawn {
        Text(String),
        Rectangle(SizeF),
    }

    /// Canvas that remembers what was drawn, in order.
    #[derive(Default)]
    pub(crate) struct Recorder(pub Vec<Drawn>);

    impl Canvas for Recorder {
        fn draw_text(&mut self, text: &ScaledText) {
            self.0.push(Drawn::Text(text.text.clone()));
        }

        fn draw_rectangle(&mut self, rectangle: &ScaledRectangle) {
            self.0.push(Drawn::Rectangle(rectangle.size));
        }
    }

    /// Input that reports a fixed set of presses and records queries.
    #[derive(Default)]
    pub(crate) struct Scripted {
        pub pressed: Vec<Control>,
        pub queried: Vec<Control>,
        pub disabled: usize,
    }

    impl Scripted {
        pub(crate) fn pressing(control: Control) -> Self {
            Self {
                pressed: vec![control],
                ..Self::default()
            }
        }
    }

    impl InputSource for Scripted {
        fn is_just_pressed(&mut self, control: Control) -> bool {
            self.queried.push(control);
            self.pressed.contains(&control)
        }

        fn disable_other_input(&mut self) {
            self.disabled += 1;
        }
    }

    /// Input backed by held keys, converted to edges once per frame.
    struct Held {
        trigger: EdgeTrigger,
    }

    impl Held {
        fn frame(&mut self, held: Option<Control>) -> &mut Self {
            self.trigger.update(|control| Some(control) == held);
            self
        }
    }

    impl InputSource for Held {
        fn is_just_pressed(&mut self, control: Control) -> bool {
            self.trigger.just_pressed(control)
        }

        fn disable_other_input(&mut self) {}
    }

    /// Safe zone whose inset can be changed after the menu is laid out.
    struct Shifting(Rc<Cell<f32>>);

    impl SafeZone for Shifting {
        fn real_position(&self, offset: PointF) -> PointF {
            offset.offset(self.0.get(), self.0.get())
        }
    }

    fn menu_with(count: usize) -> (Menu, Vec<ItemId>) {
        let mut menu = Menu::new("Garage");
        let ids: Vec<ItemId> = (0..count)
            .map(|i| menu.add(MenuItem::new(format!("Item {i}"))).unwrap())
            .collect();
        (menu, ids)
    }

    fn item_y(menu: &Menu, index: usize) -> f32 {
        menu.items()[index].title_text().position.y
    }

    #[test]
    fn test_new_menu_is_closed_and_empty() {
        let menu = Menu::new("Garage");
        assert!(!menu.is_visible());
        assert!(menu.is_empty());
        assert_eq!(menu.selected_index(), None);
        assert!(menu.selected_item().is_none());
        assert_eq!(menu.background().size, SizeF::new(497.0, 126.0));
    }

    #[test]
    fn test_selected_index_starts_at_zero() {
        let (menu, ids) = menu_with(3);
        assert_eq!(menu.selected_index(), Some(0));
        assert_eq!(menu.selected_item().map(MenuItem::id), Some(ids[0]));
    }

    #[test]
    fn test_background_size_and_header_offset() {
        let (mut menu, _) = menu_with(3);
        assert_eq!(menu.background().size, SizeF::new(497.0, 243.0));
        assert_eq!(item_y(&menu, 0), 37.0);

        menu.set_header(Some(MenuItem::new("Vehicles")));
        assert_eq!(menu.background().size, SizeF::new(497.0, 280.0));
        assert_eq!(item_y(&menu, 0), 84.0);

        let header = menu.header().unwrap();
        assert_eq!(header.title_text().position, PointF::new(24.0, 37.0));
        assert_eq!(header.title_text().color, header.colors().header);

        let previous = menu.set_header(None);
        assert!(previous.is_some());
        assert_eq!(menu.background().size, SizeF::new(497.0, 243.0));
    }

    #[test]
    fn test_rows_step_by_row_height() {
        let (mut menu, _) = menu_with(3);
        menu.set_offset(PointF::new(69.0, 350.0));

        assert_eq!(item_y(&menu, 0), 387.0);
        assert_eq!(item_y(&menu, 1), 426.0);
        assert_eq!(item_y(&menu, 2), 465.0);
        assert_eq!(menu.items()[2].title_text().position.x, 93.0);
        assert_eq!(menu.title_text().position, PointF::new(97.0, 310.0));
        assert_eq!(menu.background().position, PointF::new(69.0, 350.0));
    }

    #[test]
    fn test_width_moves_subtitles() {
        let mut menu = Menu::new("Shop");
        menu.add(MenuItem::new("Pistol").with_subtitle("$400")).unwrap();
        menu.set_width(300.0);

        assert_eq!(menu.items()[0].subtitle_text().position.x, 276.0);
        assert_eq!(menu.background().size.width, 300.0);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let (mut menu, _) = menu_with(4);
        menu.set_header(Some(MenuItem::new("Header")));
        let before: Vec<ScaledText> = menu.items().iter().map(|i| i.title_text().clone()).collect();

        menu.recalculate();
        menu.recalculate();

        let after: Vec<ScaledText> = menu.items().iter().map(|i| i.title_text().clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_duplicate_fails_and_leaves_list_unchanged() {
        let (mut menu, ids) = menu_with(3);
        menu.set_selected_index(2).unwrap();

        let result = menu.add(MenuItem::with_id(ids[1], "Copy"));

        assert_eq!(result, Err(MenuError::DuplicateItem(ids[1])));
        assert_eq!(menu.len(), 3);
        let order: Vec<ItemId> = menu.items().iter().map(MenuItem::id).collect();
        assert_eq!(order, ids);
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn test_remove_absent_item_does_not_recalculate() {
        let inset = Rc::new(Cell::new(0.0));
        let (mut menu, ids) = menu_with(2);
        menu.set_safe_zone(Shifting(Rc::clone(&inset)));
        menu.set_safe_zone_aware(true);
        assert_eq!(item_y(&menu, 1), 76.0);

        inset.set(10.0);
        assert!(menu.remove(ItemId::new()).is_none());
        assert_eq!(menu.remove_where(|_| false), 0);
        assert_eq!(item_y(&menu, 1), 76.0);

        assert!(menu.remove(ids[0]).is_some());
        assert_eq!(item_y(&menu, 0), 47.0);
    }

    #[test]
    fn test_remove_where_matches_predicate() {
        let (mut menu, ids) = menu_with(5);
        let removed = menu.remove_where(|item| item.title().ends_with('1') || item.title().ends_with('3'));

        assert_eq!(removed, 2);
        let remaining: Vec<ItemId> = menu.items().iter().map(MenuItem::id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
        assert!(!menu.contains(ids[1]));
        assert_eq!(menu.background().size.height, 39.0 * 3.0 + 126.0);
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let (mut menu, ids) = menu_with(3);
        menu.set_selected_index(2).unwrap();

        menu.remove(ids[2]);

        assert_eq!(menu.selected_index(), Some(1));
        let selected = menu.selected_item().unwrap();
        assert_eq!(selected.title_text().color, selected.colors().selected);
    }

    #[test]
    fn test_removing_selected_item_announces_new_selection() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, ids) = menu_with(2);
        let item_log = Rc::clone(&log);
        menu.items[0].on_selected(move |args| item_log.borrow_mut().push(format!("item {}", args.index)));
        let menu_log = Rc::clone(&log);
        menu.on_selected_index_changed(move |args| menu_log.borrow_mut().push(format!("menu {}", args.index)));

        menu.set_selected_index(1).unwrap();
        menu.open();
        log.borrow_mut().clear();

        menu.remove(ids[1]);

        assert_eq!(menu.selected_index(), Some(0));
        assert_eq!(*log.borrow(), vec!["item 0", "menu 0"]);
    }

    #[test]
    fn test_removing_other_item_keeps_selection_quiet() {
        let count = Rc::new(Cell::new(0));
        let (mut menu, ids) = menu_with(3);
        let seen = Rc::clone(&count);
        menu.on_selected_index_changed(move |_| seen.set(seen.get() + 1));
        menu.open();
        count.set(0);

        menu.remove(ids[2]);
        assert_eq!(menu.remove_where(|_| false), 0);

        assert_eq!(menu.selected_index(), Some(0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_removal_while_closed_announces_nothing() {
        let count = Rc::new(Cell::new(0));
        let (mut menu, ids) = menu_with(2);
        let seen = Rc::clone(&count);
        menu.on_selected_index_changed(move |_| seen.set(seen.get() + 1));
        menu.set_selected_index(1).unwrap();

        menu.remove(ids[1]);

        assert_eq!(menu.selected_index(), Some(0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_clear_empties_menu() {
        let (mut menu, _) = menu_with(3);
        menu.set_selected_index(1).unwrap();
        menu.clear();

        assert!(menu.is_empty());
        assert_eq!(menu.selected_index(), None);
        assert_eq!(menu.background().size.height, 126.0);

        menu.add(MenuItem::new("Again")).unwrap();
        assert_eq!(menu.selected_index(), Some(0));
    }

    #[test]
    fn test_set_selected_index_errors() {
        let mut menu = Menu::new("Empty");
        assert_eq!(menu.set_selected_index(0), Err(MenuError::InvalidState));

        let (mut menu, _) = menu_with(2);
        assert_eq!(
            menu.set_selected_index(2),
            Err(MenuError::OutOfRange { index: 2, count: 2 })
        );
        assert_eq!(menu.selected_index(), Some(0));
    }

    #[test]
    fn test_set_selected_item() {
        let (mut menu, ids) = menu_with(3);
        menu.set_selected_item(ids[2]).unwrap();
        assert_eq!(menu.selected_index(), Some(2));

        let stranger = ItemId::new();
        assert_eq!(
            menu.set_selected_item(stranger),
            Err(MenuError::ItemNotInMenu(stranger))
        );
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn test_selection_highlight_follows_index() {
        let (mut menu, _) = menu_with(3);
        menu.set_selected_index(1).unwrap();

        let colors = ItemColors::default();
        let shown: Vec<Rgba> = menu.items().iter().map(|i| i.title_text().color).collect();
        assert_eq!(shown, vec![colors.not_selected, colors.selected, colors.not_selected]);

        // The highlight survives a later layout pass
        menu.recalculate();
        assert_eq!(menu.items()[1].title_text().color, colors.selected);
    }

    #[test]
    fn test_disabled_item_keeps_disabled_color_when_selected() {
        let (mut menu, ids) = menu_with(2);
        menu.item_mut(ids[1]).unwrap().set_enabled(false);
        menu.set_selected_index(1).unwrap();

        let item = menu.item(ids[1]).unwrap();
        assert_eq!(item.title_text().color, item.colors().disabled);

        menu.item_mut(ids[1]).unwrap().set_enabled(true);
        let item = menu.item(ids[1]).unwrap();
        assert_eq!(item.title_text().color, item.colors().selected);
    }

    #[test]
    fn test_selection_events_only_while_visible() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, _) = menu_with(3);
        let item_log = Rc::clone(&log);
        menu.items[2].on_selected(move |args| item_log.borrow_mut().push(format!("item {}", args.index)));
        let menu_log = Rc::clone(&log);
        menu.on_selected_index_changed(move |args| menu_log.borrow_mut().push(format!("menu {}", args.index)));

        menu.set_selected_index(2).unwrap();
        assert!(log.borrow().is_empty());

        menu.set_selected_index(0).unwrap();
        menu.open();
        log.borrow_mut().clear();

        menu.set_selected_index(2).unwrap();
        assert_eq!(*log.borrow(), vec!["item 2", "menu 2"]);
    }

    #[test]
    fn test_open_announces_selection() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut menu, ids) = menu_with(2);

        let shown = Rc::clone(&log);
        menu.on_shown(move |_| shown.borrow_mut().push("shown".to_string()));
        let selected = Rc::clone(&log);
        let first = ids[0];
        menu.on_selected_index_changed(move |args| {
            assert_eq!(args.item, first);
            selected.borrow_mut().push(format!("selected {}", args.index));
        });

        menu.set_visible(true);

        assert!(menu.is_visible());
        assert_eq!(*log.borrow(), vec!["shown", "selected 0"]);
    }

    #[test]
    fn test_open_canceled() {
        let shown = Rc::new(Cell::new(false));
        let mut menu = Menu::new("Locked");
        menu.on_opening(|args| args.cancel = true);
        let flag = Rc::clone(&shown);
        menu.on_shown(move |_| flag.set(true));

        assert!(!menu.open());
        menu.set_visible(true);

        assert!(!menu.is_visible());
        assert!(!shown.get());
    }

    #[test]
    fn test_close_and_cancel_close() {
        let allow = Rc::new(Cell::new(false));
        let closed = Rc::new(Cell::new(0));
        let mut menu = Menu::new("Sticky");
        let gate = Rc::clone(&allow);
        menu.on_closing(move |args| args.cancel = !gate.get());
        let counter = Rc::clone(&closed);
        menu.on_closed(move |_| counter.set(counter.get() + 1));

        menu.open();
        assert!(!menu.close());
        assert!(menu.is_visible());
        assert_eq!(closed.get(), 0);

        allow.set(true);
        menu.set_visible(false);
        assert!(!menu.is_visible());
        assert_eq!(closed.get(), 1);

        // Already closed, nothing fires
        menu.set_visible(false);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let (mut menu, _) = menu_with(4);
        let mut canvas = Recorder::default();

        menu.process(&mut canvas, &mut Scripted::pressing(Control::Previous));
        assert_eq!(menu.selected_index(), Some(3));

        menu.process(&mut canvas, &mut Scripted::pressing(Control::Previous));
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn test_next_wraps_to_first() {
        let (mut menu, _) = menu_with(3);
        menu.set_selected_index(2).unwrap();
        let mut canvas = Recorder::default();

        menu.process(&mut canvas, &mut Scripted::pressing(Control::Next));
        assert_eq!(menu.selected_index(), Some(0));

        menu.process(&mut canvas, &mut Scripted::pressing(Control::Next));
        assert_eq!(menu.selected_index(), Some(1));
    }

    #[test]
    fn test_single_item_wraps_onto_itself() {
        let (mut menu, _) = menu_with(1);
        menu.select_next();
        assert_eq!(menu.selected_index(), Some(0));
        menu.select_previous();
        assert_eq!(menu.selected_index(), Some(0));
    }

    #[test]
    fn test_accept_activates_selected_item() {
        let activated = Rc::new(Cell::new(0));
        let (mut menu, ids) = menu_with(3);
        let counter = Rc::clone(&activated);
        menu.item_mut(ids[1]).unwrap().on_activated(move |_| counter.set(counter.get() + 1));
        menu.set_selected_index(1).unwrap();

        let mut input = Scripted::pressing(Control::Accept);
        menu.process(&mut Recorder::default(), &mut input);

        assert_eq!(activated.get(), 1);
        assert_eq!(input.disabled, 1);
        assert_eq!(input.queried, Control::ALL.to_vec());
    }

    #[test]
    fn test_one_action_per_frame() {
        let (mut menu, _) = menu_with(3);
        let mut input = Scripted {
            pressed: Control::ALL.to_vec(),
            ..Scripted::default()
        };

        menu.process(&mut Recorder::default(), &mut input);

        assert_eq!(input.queried, vec![Control::Previous]);
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn test_empty_menu_draws_but_never_reads_input() {
        let mut menu = Menu::new("Nothing");
        let mut canvas = Recorder::default();
        let mut input = Scripted::pressing(Control::Next);

        menu.process(&mut canvas, &mut input);

        assert_eq!(
            canvas.0,
            vec![
                Drawn::Rectangle(SizeF::new(497.0, 126.0)),
                Drawn::Text("Nothing".to_string()),
            ]
        );
        assert!(input.queried.is_empty());
        assert_eq!(input.disabled, 0);
    }

    #[test]
    fn test_draw_order() {
        let mut menu = Menu::new("Shop");
        menu.set_header(Some(MenuItem::new("Guns")));
        menu.add(MenuItem::new("Pistol").with_subtitle("$400")).unwrap();
        menu.add(MenuItem::new("Shotgun")).unwrap();
        let mut canvas = Recorder::default();

        menu.process(&mut canvas, &mut Scripted::default());

        assert_eq!(
            canvas.0,
            vec![
                Drawn::Rectangle(SizeF::new(497.0, 241.0)),
                Drawn::Text("Shop".to_string()),
                Drawn::Text("Guns".to_string()),
                Drawn::Text("Pistol".to_string()),
                Drawn::Text("$400".to_string()),
                Drawn::Text("Shotgun".to_string()),
            ]
        );
    }

    #[test]
    fn test_held_key_moves_once() {
        let (mut menu, _) = menu_with(5);
        let mut input = Held {
            trigger: EdgeTrigger::new(),
        };
        let mut canvas = Recorder::default();

        for _ in 0..3 {
            menu.process(&mut canvas, input.frame(Some(Control::Next)));
        }
        assert_eq!(menu.selected_index(), Some(1));

        menu.process(&mut canvas, input.frame(None));
        menu.process(&mut canvas, input.frame(Some(Control::Next)));
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn test_safe_zone_aware_moves_origin() {
        let (mut menu, _) = menu_with(1);
        menu.set_offset(PointF::new(10.0, 10.0));
        menu.set_safe_zone(Shifting(Rc::new(Cell::new(50.0))));
        assert_eq!(menu.background().position, PointF::new(10.0, 10.0));

        menu.set_safe_zone_aware(true);
        assert_eq!(menu.background().position, PointF::new(60.0, 60.0));
        assert_eq!(item_y(&menu, 0), 97.0);
    }

    #[test]
    fn test_container_trait_delegates() {
        fn fill<C: Container<MenuItem, Id = ItemId, Error = MenuError>>(container: &mut C) -> ItemId {
            container.add(MenuItem::new("Generic")).unwrap()
        }

        let mut menu = Menu::new("Generic");
        let id = fill(&mut menu);
        assert!(Container::contains(&menu, id));
        assert_eq!(Container::remove_where(&mut menu, &mut |_: &MenuItem| true), 1);
        assert!(menu.is_empty());
    }
}
