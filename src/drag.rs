//! Drag session controller for repositioning placed nodes.
//!
//! A session runs **Idle → Armed → Dragging → Idle**: pointer-down on a node
//! arms it, each pointer-move drags, pointer-up ends it.
//!
//! While a session exists the host must deliver pointer-move and pointer-up
//! events from anywhere in the window, not just over the canvas. That global
//! subscription is modelled as a [`ListenerGuard`] owned by the session: it is
//! attached when the session starts and detached when the session value is
//! dropped, whichever way the session ends.
//!
//! Attach and detach are queued rather than sent straight to the
//! [`ListenerHost`]. The owner takes them with
//! [`DragController::take_pending`] and delivers them once it holds no borrow
//! of the editor, so a host may query the editor from inside its callbacks.

use crate::canvas::CanvasFrame;
use crate::grid::GridPoint;
use crate::registry::{NodeId, NodeRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Observable phase of the drag controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Pointer is down on a node, no move seen yet.
    Armed(NodeId),
    Dragging(NodeId),
}

/// Handle identifying one attachment of the global pointer listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Host side of the global pointer-move/pointer-up subscription.
///
/// Implement this on the UI layer to start and stop routing window-wide
/// pointer events to the editor.
pub trait ListenerHost {
    fn attach(&self, id: ListenerId);
    fn detach(&self, id: ListenerId);
}

/// [`ListenerHost`] that only counts attachments.
///
/// Clones share their counters. Useful on its own when the host always routes
/// pointer events, and for checking that listeners never pile up.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    active: Rc<Cell<usize>>,
    total: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners currently attached.
    pub fn active(&self) -> usize {
        self.active.get()
    }

    /// Attachments made over the registry's lifetime.
    pub fn total_attached(&self) -> usize {
        self.total.get()
    }
}

impl ListenerHost for ListenerRegistry {
    fn attach(&self, _id: ListenerId) {
        self.active.set(self.active.get() + 1);
        self.total.set(self.total.get() + 1);
    }

    fn detach(&self, _id: ListenerId) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

/// A listener change waiting to be delivered to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerEvent {
    Attach(ListenerId),
    Detach(ListenerId),
}

type EventQueue = Rc<RefCell<Vec<ListenerEvent>>>;

/// Scoped attachment of the global pointer listeners.
///
/// Queues an attach when acquired and a detach when dropped.
pub struct ListenerGuard {
    id: ListenerId,
    queue: EventQueue,
}

impl ListenerGuard {
    fn acquire(id: ListenerId, queue: EventQueue) -> Self {
        queue.borrow_mut().push(ListenerEvent::Attach(id));
        Self { id, queue }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.queue.borrow_mut().push(ListenerEvent::Detach(self.id));
    }
}

/// Listener events taken out of a [`DragController`], in the order they happened.
#[must_use = "listener events do nothing until delivered"]
pub struct PendingListenerEvents {
    host: Rc<dyn ListenerHost>,
    events: Vec<ListenerEvent>,
}

impl PendingListenerEvents {
    pub fn events(&self) -> &[ListenerEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forward every event to the host.
    pub fn deliver(self) {
        for event in self.events {
            match event {
                ListenerEvent::Attach(id) => self.host.attach(id),
                ListenerEvent::Detach(id) => self.host.detach(id),
            }
        }
    }
}

/// An in-progress node reposition.
struct DragSession {
    node_id: NodeId,
    /// Pointer position relative to the node origin at grab time
    grab_offset: (f32, f32),
    dragging: bool,
    _listeners: ListenerGuard,
}

/// Drives drag sessions against a [`NodeRegistry`].
pub struct DragController {
    session: Option<DragSession>,
    host: Rc<dyn ListenerHost>,
    queue: EventQueue,
    next_listener: u64,
}

impl DragController {
    pub fn new(host: Rc<dyn ListenerHost>) -> Self {
        Self {
            session: None,
            host,
            queue: EventQueue::default(),
            next_listener: 1,
        }
    }

    /// Take the listener events queued since the last call.
    pub fn take_pending(&mut self) -> PendingListenerEvents {
        let events = std::mem::take(&mut *self.queue.borrow_mut());
        PendingListenerEvents {
            host: self.host.clone(),
            events,
        }
    }

    /// Deliver queued listener events right away.
    pub fn flush(&mut self) {
        self.take_pending().deliver();
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            None => DragState::Idle,
            Some(s) if s.dragging => DragState::Dragging(s.node_id),
            Some(s) => DragState::Armed(s.node_id),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Node targeted by the active session, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.node_id)
    }

    /// Grab offset of the active session, if any.
    pub fn grab_offset(&self) -> Option<(f32, f32)> {
        self.session.as_ref().map(|s| s.grab_offset)
    }

    /// Arm a session on `node_id`.
    ///
    /// A still-running session is ended first, so its listeners are detached
    /// before the new ones attach.
    pub fn begin(&mut self, node_id: NodeId, grab_offset: (f32, f32)) {
        self.end();
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        tracing::debug!(node = %node_id, ?grab_offset, "drag session armed");
        self.session = Some(DragSession {
            node_id,
            grab_offset,
            dragging: false,
            _listeners: ListenerGuard::acquire(id, self.queue.clone()),
        });
    }

    /// Apply a pointer-move in client coordinates.
    ///
    /// Moves only the targeted node and returns its new position. Returns
    /// `None` when idle, and resets the session without touching the registry
    /// if the target has been deleted.
    pub fn pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        frame: &CanvasFrame,
        registry: &mut NodeRegistry,
    ) -> Option<GridPoint> {
        let session = self.session.as_mut()?;
        let target = session.node_id;
        if !registry.contains(target) {
            tracing::debug!(node = %target, "drag target vanished, resetting session");
            self.session = None;
            return None;
        }

        session.dragging = true;
        let position = frame.place(client_x, client_y, session.grab_offset);
        match registry.set_position(target, position) {
            Ok(changed) => {
                if changed {
                    tracing::trace!(node = %target, x = position.x, y = position.y, "node dragged");
                }
                Some(position)
            }
            Err(err) => {
                tracing::debug!(%err, "drag update rejected, resetting session");
                self.session = None;
                None
            }
        }
    }

    /// End the session (pointer-up). Returns the node it targeted.
    pub fn end(&mut self) -> Option<NodeId> {
        let session = self.session.take()?;
        tracing::debug!(node = %session.node_id, "drag session ended");
        Some(session.node_id)
    }

    /// End the session if it targets `node_id`.
    pub fn node_removed(&mut self, node_id: NodeId) {
        if self.target() == Some(node_id) {
            self.end();
        }
    }
}

impl Drop for DragController {
    fn drop(&mut self) {
        self.session = None;
        self.flush();
    }
}
