use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use super::{Container, Menu};
use crate::element::Canvas;
use crate::input::InputSource;

/// Identity of a menu inside a [`MenuPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(Uuid);

impl MenuId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("menu {0} is already part of the pool")]
    DuplicateMenu(MenuId),
}

/// The set of menus a host processes every frame.
#[derive(Debug, Default)]
pub struct MenuPool {
    menus: Vec<(MenuId, Menu)>,
}

impl MenuPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a menu under a fresh id.
    pub fn add(&mut self, menu: Menu) -> MenuId {
        let id = MenuId::new();
        self.menus.push((id, menu));
        id
    }

    /// Add a menu under an id previously handed out by this pool.
    ///
    /// Used to put back a menu taken out with [`MenuPool::remove`].
    pub fn insert(&mut self, id: MenuId, menu: Menu) -> Result<(), PoolError> {
        if self.contains(id) {
            return Err(PoolError::DuplicateMenu(id));
        }
        self.menus.push((id, menu));
        Ok(())
    }

    pub fn get(&self, id: MenuId) -> Option<&Menu> {
        self.menus
            .iter()
            .find(|(menu_id, _)| *menu_id == id)
            .map(|(_, menu)| menu)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus
            .iter_mut()
            .find(|(menu_id, _)| *menu_id == id)
            .map(|(_, menu)| menu)
    }

    pub fn contains(&self, id: MenuId) -> bool {
        self.menus.iter().any(|(menu_id, _)| *menu_id == id)
    }

    pub fn remove(&mut self, id: MenuId) -> Option<Menu> {
        let position = self.menus.iter().position(|(menu_id, _)| *menu_id == id)?;
        Some(self.menus.remove(position).1)
    }

    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Menu) -> bool) -> usize {
        let before = self.menus.len();
        self.menus.retain(|(_, menu)| !predicate(menu));
        before - self.menus.len()
    }

    pub fn clear(&mut self) {
        self.menus.clear();
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn are_any_visible(&self) -> bool {
        self.menus.iter().any(|(_, menu)| menu.is_visible())
    }

    /// Close every visible menu. Menus whose closing is canceled stay open.
    pub fn hide_all(&mut self) {
        for (_, menu) in &mut self.menus {
            menu.close();
        }
    }

    /// Process every visible menu, in insertion order.
    pub fn process(&mut self, canvas: &mut dyn Canvas, input: &mut dyn InputSource) {
        for (_, menu) in &mut self.menus {
            if menu.is_visible() {
                menu.process(canvas, input);
            }
        }
    }

    /// Lay out every menu again, for example after the safe zone changed.
    pub fn recalculate(&mut self) {
        for (_, menu) in &mut self.menus {
            menu.recalculate();
        }
    }
}

impl Container<Menu> for MenuPool {
    type Id = MenuId;
    type Error = PoolError;

    fn add(&mut self, entry: Menu) -> Result<MenuId, PoolError> {
        Ok(MenuPool::add(self, entry))
    }

    fn remove(&mut self, id: MenuId) -> Option<Menu> {
        MenuPool::remove(self, id)
    }

    fn remove_where(&mut self, predicate: &mut dyn FnMut(&Menu) -> bool) -> usize {
        MenuPool::remove_where(self, predicate)
    }

    fn contains(&self, id: MenuId) -> bool {
        MenuPool::contains(self, id)
    }

    fn clear(&mut self) {
        MenuPool::clear(self)
    }

    fn process(&mut self, canvas: &mut dyn Canvas, input: &mut dyn InputSource) {
        MenuPool::process(self, canvas, input)
    }

    fn recalculate(&mut self) {
        MenuPool::recalculate(self)
    }
}
