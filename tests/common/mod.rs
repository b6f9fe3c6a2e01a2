//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use policy_canvas::{ListenerHost, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
/// Also acts as the pointer [`ListenerHost`] so attach/detach order is visible.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// Listener ids in attach order
    pub attached: Rc<RefCell<Vec<ListenerId>>>,
    /// Listener ids in detach order
    pub detached: Rc<RefCell<Vec<ListenerId>>>,
    /// Count of proceed calls
    pub proceed: Rc<RefCell<usize>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners attached and not yet detached.
    pub fn active_listeners(&self) -> usize {
        self.attached.borrow().len() - self.detached.borrow().len()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.attached.borrow_mut().clear();
        self.detached.borrow_mut().clear();
        *self.proceed.borrow_mut() = 0;
    }
}

impl ListenerHost for CallbackTracker {
    fn attach(&self, id: ListenerId) {
        self.attached.borrow_mut().push(id);
    }

    fn detach(&self, id: ListenerId) {
        self.detached.borrow_mut().push(id);
    }
}
