//! Host Capabilities
//!
//! The refresh signal and resize notifications are injected rather than read
//! from ambient globals, so the field runs the same under a window, a
//! headless loop, or a test.

use std::collections::{BTreeSet, VecDeque};

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Identifies one resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Schedules callbacks on the display refresh signal.
pub trait FrameScheduler {
    /// Asks for one callback on the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Best-effort: the callback may still fire afterwards.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Delivers container resize notifications.
pub trait ResizeEvents {
    fn subscribe_resize(&mut self) -> ListenerId;

    fn unsubscribe_resize(&mut self, id: ListenerId);
}

/// Everything a mounted field needs from its host.
pub trait Host: FrameScheduler + ResizeEvents {}

impl<T: FrameScheduler + ResizeEvents + ?Sized> Host for T {}

/// Deterministic in-memory host for headless runs and tests.
///
/// Requested frames queue up until [`next_frame`](Self::next_frame) hands
/// them out, one per simulated refresh.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_handle: u64,
    next_listener: u64,
    queued: VecDeque<FrameHandle>,
    listeners: BTreeSet<ListenerId>,
    requested: u64,
    cancelled: u64,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest pending frame, as the next refresh would.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.queued.pop_front()
    }

    pub fn pending_frames(&self) -> usize {
        self.queued.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Live subscriptions, to fan a resize out to.
    pub fn listeners(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.iter().copied()
    }

    pub fn frames_requested(&self) -> u64 {
        self.requested
    }

    pub fn frames_cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_handle);
        self.queued.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queued.len();
        self.queued.retain(|h| *h != handle);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}

impl ResizeEvents for ManualHost {
    fn subscribe_resize(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_fifo() {
        let mut host = ManualHost::new();
        let a = host.request_frame();
        let b = host.request_frame();
        assert_ne!(a, b);
        assert_eq!(host.next_frame(), Some(a));
        assert_eq!(host.next_frame(), Some(b));
        assert_eq!(host.next_frame(), None);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut host = ManualHost::new();
        let a = host.request_frame();
        host.cancel_frame(a);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.frames_cancelled(), 1);

        // Cancelling an already-fired handle is a no-op
        host.cancel_frame(a);
        assert_eq!(host.frames_cancelled(), 1);
    }

    #[test]
    fn test_listeners() {
        let mut host = ManualHost::new();
        let id = host.subscribe_resize();
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.listeners().collect::<Vec<_>>(), vec![id]);

        host.unsubscribe_resize(id);
        host.unsubscribe_resize(id);
        assert_eq!(host.listener_count(), 0);
    }
}
