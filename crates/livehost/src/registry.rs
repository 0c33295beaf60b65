//! Pooled registry of live notification sessions.
//!
//! Sessions live in an arena of slots addressed by index. Live slots are
//! threaded onto a doubly linked list (by index) so removal is O(1) and
//! broadcast walks them in registration order. Released slots go onto a LIFO
//! free list and are reused by the next registration, so sustained
//! connect/disconnect churn does not grow the arena.
//!
//! Each slot carries a generation counter that is bumped on release. A
//! [`SessionHandle`] records the generation it was issued for, so a handle
//! that outlives its session is detected instead of removing whichever session
//! later reused the slot.
//!
//! Register, deregister and broadcast all run under a single mutex, and
//! broadcast holds it for the full walk. [`Session::send`] must not block.

use crate::error::{RegistryError, SessionError};
use parking_lot::Mutex;
use std::sync::Arc;

/// An outbound notification endpoint.
pub trait Session: Send + 'static {
    /// Queue `message` for delivery. Called with the registry lock held, so
    /// implementations must return without waiting on I/O.
    fn send(&self, message: &str) -> Result<(), SessionError>;
}

/// Opaque handle returned by [`ConnectionRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    index: usize,
    generation: u64,
}

impl SessionHandle {
    /// Arena slot backing this handle.
    pub fn slot(&self) -> usize {
        self.index
    }
}

/// Node occupancy counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    /// Nodes holding a session.
    pub live: usize,
    /// Nodes waiting in the free list.
    pub pooled: usize,
    /// Nodes ever allocated (`live + pooled`).
    pub allocated: usize,
}

/// Outcome of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sessions that accepted the message.
    pub delivered: usize,
    /// Sessions whose send failed. Their owners are responsible for
    /// deregistering them.
    pub failed: Vec<SessionHandle>,
}

struct Node<S> {
    session: Option<S>,
    generation: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slots<S> {
    nodes: Vec<Node<S>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    live: usize,
}

impl<S> Slots<S> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            live: 0,
        }
    }

    fn acquire(&mut self, session: S) -> SessionHandle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.nodes.push(Node {
                    session: None,
                    generation: 0,
                    prev: None,
                    next: None,
                });
                self.nodes.len() - 1
            }
        };

        let tail = self.tail;
        let node = &mut self.nodes[index];
        node.session = Some(session);
        node.prev = tail;
        node.next = None;
        let generation = node.generation;

        match tail {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.live += 1;

        SessionHandle { index, generation }
    }

    fn release(&mut self, handle: SessionHandle) -> Result<S, RegistryError> {
        let stale = RegistryError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
        };
        let node = self.nodes.get_mut(handle.index).ok_or(stale)?;
        if node.generation != handle.generation || node.session.is_none() {
            return Err(stale);
        }

        let session = node.session.take().ok_or(stale)?;
        let (prev, next) = (node.prev.take(), node.next.take());
        node.generation = node.generation.wrapping_add(1);

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }

        self.free.push(handle.index);
        self.live -= 1;
        Ok(session)
    }
}

/// Thread-safe collection of live sessions with node pooling.
pub struct ConnectionRegistry<S> {
    slots: Mutex<Slots<S>>,
}

impl<S: Session> ConnectionRegistry<S> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots::new()),
        }
    }

    /// Insert a session, reusing a pooled node when one is available.
    pub fn register(&self, session: S) -> SessionHandle {
        let handle = self.slots.lock().acquire(session);
        tracing::debug!(slot = handle.index, "session registered");
        handle
    }

    /// Register a session and tie its removal to the returned guard.
    pub fn register_scoped(self: &Arc<Self>, session: S) -> SessionGuard<S> {
        let handle = self.register(session);
        SessionGuard {
            registry: Arc::clone(self),
            handle,
        }
    }

    /// Remove a session in O(1) and return its node to the pool.
    ///
    /// The session is handed back so the caller controls when it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if the handle was already
    /// deregistered. The registry is left untouched in that case.
    pub fn deregister(&self, handle: SessionHandle) -> Result<S, RegistryError> {
        let result = self.slots.lock().release(handle);
        match &result {
            Ok(_) => tracing::debug!(slot = handle.index, "session deregistered"),
            Err(e) => tracing::error!("Deregistration rejected: {}", e),
        }
        result
    }

    /// Send `message` to every live session.
    ///
    /// A failing session does not stop delivery to the others; it is logged
    /// and listed in the report.
    pub fn broadcast(&self, message: &str) -> BroadcastReport {
        let slots = self.slots.lock();
        let mut report = BroadcastReport::default();

        let mut cursor = slots.head;
        while let Some(index) = cursor {
            let node = &slots.nodes[index];
            cursor = node.next;

            let Some(session) = node.session.as_ref() else {
                continue;
            };
            match session.send(message) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(slot = index, "Failed to notify session: {}", e);
                    report.failed.push(SessionHandle {
                        index,
                        generation: node.generation,
                    });
                }
            }
        }

        report
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.slots.lock().live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegistryStats {
        let slots = self.slots.lock();
        RegistryStats {
            live: slots.live,
            pooled: slots.free.len(),
            allocated: slots.nodes.len(),
        }
    }
}

impl<S: Session> Default for ConnectionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregisters its session exactly once when dropped.
pub struct SessionGuard<S: Session> {
    registry: Arc<ConnectionRegistry<S>>,
    handle: SessionHandle,
}

impl<S: Session> SessionGuard<S> {
    pub fn handle(&self) -> SessionHandle {
        self.handle
    }
}

impl<S: Session> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        // Errors are already logged by deregister.
        let _ = self.registry.deregister(self.handle);
    }
}
