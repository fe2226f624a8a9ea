//! Synchronous multicast notifications.
//!
//! Every notification point is a [`Handlers`] list. Callbacks run inline, in
//! registration order, while the triggering call is still on the stack.
//! Cancelable notifications pass [`CancelArgs`] so any handler can veto.

use std::fmt;

use crate::menu::ItemId;

/// Arguments of a cancelable notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelArgs {
    pub cancel: bool,
}

/// Arguments of a selection notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedArgs {
    /// Index of the selected item in the menu.
    pub index: usize,
    /// Id of the selected item.
    pub item: ItemId,
}

/// An ordered list of callbacks.
pub struct Handlers<A> {
    callbacks: Vec<Box<dyn FnMut(&mut A)>>,
}

impl<A> Handlers<A> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback. Callbacks run in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&mut A) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Invoke every callback with the same arguments.
    pub fn emit(&mut self, args: &mut A) {
        for callback in &mut self.callbacks {
            callback(args);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl Handlers<()> {
    /// Emit a notification without arguments.
    pub fn fire(&mut self) {
        self.emit(&mut ());
    }
}

impl Handlers<CancelArgs> {
    /// Emit a cancelable notification and report whether it was canceled.
    pub fn emit_cancelable(&mut self) -> bool {
        let mut args = CancelArgs::default();
        self.emit(&mut args);
        args.cancel
    }
}

impl<A> Default for Handlers<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Handlers<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
