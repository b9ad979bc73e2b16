//! Mutation-observation contract between the core and the host DOM.
//!
//! The host page is a single-page app; the only signal for "something
//! changed" is a DOM mutation batch. The core subscribes through
//! [`MutationSource::observe`] and stops listening by cancelling the
//! returned handle. Each page controller holds at most one observer at a
//! time.

use std::cell::Cell;
use std::rc::Rc;

/// Which mutations a subscription wants to hear about. Mirrors the options
/// the host observer API takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationFilter {
    pub child_list: bool,
    pub subtree: bool,
    pub attributes: bool,
}

impl MutationFilter {
    /// Attribute + subtree changes, what a page controller watches on its
    /// container.
    pub fn attributes_subtree() -> MutationFilter {
        MutationFilter {
            child_list: false,
            subtree: true,
            attributes: true,
        }
    }

    /// Child-list + subtree changes on the document body, the proxy signal
    /// for SPA navigation.
    pub fn child_list_subtree() -> MutationFilter {
        MutationFilter {
            child_list: true,
            subtree: true,
            attributes: false,
        }
    }
}

/// Callback invoked once per mutation batch.
pub type MutationCallback = Box<dyn FnMut()>;

/// Something that can deliver DOM mutation batches for a subtree.
///
/// Contract: callbacks run on the host's single-threaded event loop, one
/// batch at a time, and are never invoked reentrantly from inside a render
/// the core itself triggers. After [`ObserverHandle::cancel`] no further
/// callbacks fire.
pub trait MutationSource {
    fn observe(&self, filter: MutationFilter, callback: MutationCallback) -> ObserverHandle;
}

/// Subscription handle; cancelling disconnects the underlying observer.
pub struct ObserverHandle {
    active: Rc<Cell<bool>>,
}

impl ObserverHandle {
    pub fn new() -> (ObserverHandle, Rc<Cell<bool>>) {
        let active = Rc::new(Cell::new(true));
        (
            ObserverHandle {
                active: Rc::clone(&active),
            },
            active,
        )
    }

    /// Stop all future callbacks. Idempotent.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}
