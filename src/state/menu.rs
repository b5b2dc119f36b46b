//! Account menu open/closed state and its outside-click listener.
//!
//! DESIGN
//! ======
//! The listener is tied to transitions, not to rendering: entering `Open`
//! installs exactly one document click listener, leaving `Open` (by toggle,
//! outside click, or teardown) removes it. `AccountMenu` owns the only
//! registration handle, so "listener present" and "menu open" can be
//! checked against each other after every transition.
//!
//! The installed handler holds a weak reference back to the menu. A
//! dropped menu therefore never receives clicks, and no reference cycle
//! keeps it alive through the document.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::util::outside_click::{ClickHandler, ClickSurface};

/// Whether the account menu is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// State after the menu trigger is activated.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// State after a document click; only an outside click while open closes.
    #[must_use]
    pub fn after_document_click(self, inside_menu: bool) -> Self {
        match self {
            Self::Open if !inside_menu => Self::Closed,
            other => other,
        }
    }
}

struct Slot<R> {
    state: MenuState,
    listener: Option<R>,
}

struct Inner<S: ClickSurface> {
    surface: S,
    contains: Box<dyn Fn(&S::Target) -> bool>,
    on_change: Box<dyn Fn(MenuState)>,
    slot: RefCell<Slot<S::Registration>>,
}

impl<S: ClickSurface> Inner<S> {
    fn state(&self) -> MenuState {
        self.slot.borrow().state
    }

    fn transition(self: &Rc<Self>, next: MenuState) {
        {
            let mut slot = self.slot.borrow_mut();
            if slot.state == next {
                return;
            }
            slot.state = next;
        }
        self.sync_listener();
        (self.on_change)(next);
    }

    fn sync_listener(self: &Rc<Self>) {
        let (open, listening) = {
            let slot = self.slot.borrow();
            (slot.state.is_open(), slot.listener.is_some())
        };
        if open && !listening {
            let weak = Rc::downgrade(self);
            let handler: ClickHandler<S::Target> = Rc::new(move |target: &S::Target| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_document_click(target);
                }
            });
            let registration = self.surface.listen(handler);
            self.slot.borrow_mut().listener = Some(registration);
        } else if !open && listening {
            self.remove_listener();
        }
    }

    fn remove_listener(&self) {
        let taken = self.slot.borrow_mut().listener.take();
        if let Some(registration) = taken {
            self.surface.unlisten(registration);
        }
    }

    fn handle_document_click(self: &Rc<Self>, target: &S::Target) {
        let inside = (self.contains)(target);
        let next = self.state().after_document_click(inside);
        self.transition(next);
    }
}

/// Controller for the header's account menu.
///
/// `contains` answers "is this click target inside the menu subtree?" and is
/// evaluated at click time. `on_change` is told about every state change so
/// the view can re-render.
pub struct AccountMenu<S: ClickSurface> {
    inner: Rc<Inner<S>>,
}

impl<S: ClickSurface> AccountMenu<S> {
    pub fn new<C, F>(surface: S, contains: C, on_change: F) -> Self
    where
        C: Fn(&S::Target) -> bool + 'static,
        F: Fn(MenuState) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                surface,
                contains: Box::new(contains),
                on_change: Box::new(on_change),
                slot: RefCell::new(Slot { state: MenuState::Closed, listener: None }),
            }),
        }
    }

    pub fn state(&self) -> MenuState {
        self.inner.state()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Whether the document listener is currently installed.
    pub fn is_listening(&self) -> bool {
        self.inner.slot.borrow().listener.is_some()
    }

    /// Menu trigger activated.
    pub fn toggle(&self) {
        let next = self.state().toggled();
        self.inner.transition(next);
    }

    pub fn open(&self) {
        self.inner.transition(MenuState::Open);
    }

    pub fn close(&self) {
        self.inner.transition(MenuState::Closed);
    }

    /// Remove the listener and reset to `Closed` without notifying the view.
    ///
    /// Called when the owning component unmounts; safe to call repeatedly.
    pub fn teardown(&self) {
        self.inner.remove_listener();
        self.inner.slot.borrow_mut().state = MenuState::Closed;
    }
}

impl<S: ClickSurface> Drop for AccountMenu<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
