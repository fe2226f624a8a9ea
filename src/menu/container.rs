use crate::element::Canvas;
use crate::input::InputSource;

/// Something that owns a list of `T` and takes part in the frame loop.
///
/// Both [`Menu`](super::Menu) (over items) and [`MenuPool`](super::MenuPool)
/// (over menus) implement it, so a host can nest them.
pub trait Container<T> {
    type Id: Copy + Eq;
    type Error;

    /// Add a new entry, failing if the same id is already present.
    fn add(&mut self, entry: T) -> Result<Self::Id, Self::Error>;

    /// Remove the entry with this id, returning it if it was present.
    fn remove(&mut self, id: Self::Id) -> Option<T>;

    /// Remove every entry the predicate matches. Returns how many were removed.
    fn remove_where(&mut self, predicate: &mut dyn FnMut(&T) -> bool) -> usize;

    fn contains(&self, id: Self::Id) -> bool;

    fn clear(&mut self);

    /// Draw and react to input for one frame.
    fn process(&mut self, canvas: &mut dyn Canvas, input: &mut dyn InputSource);

    /// Lay the contents out again.
    fn recalculate(&mut self);
}
