/// Slot for the one pending frame callback of a coalesced handler.
///
/// `H` is a handle that cancels its callback when dropped, like
/// `gloo::render::AnimationFrame`. Scheduling again drops the previous handle.
#[derive(Debug)]
pub struct PendingFrame<H> {
    handle: Option<H>,
}

impl<H> Default for PendingFrame<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> PendingFrame<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle`, cancelling whatever was pending before.
    pub fn schedule(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    /// Called from inside the callback once it runs.
    pub fn complete(&mut self) -> Option<H> {
        self.handle.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Handle {
        id: u32,
        cancelled: Rc<RefCell<Vec<u32>>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.cancelled.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn rescheduling_cancels_previous_frame() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut pending = PendingFrame::new();

        for id in 1..=3 {
            pending.schedule(Handle {
                id,
                cancelled: cancelled.clone(),
            });
        }

        assert_eq!(*cancelled.borrow(), vec![1, 2]);
    }

    #[test]
    fn completed_frame_is_no_longer_pending() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut pending = PendingFrame::new();
        pending.schedule(Handle {
            id: 7,
            cancelled: cancelled.clone(),
        });

        let finished = pending.complete();
        assert!(finished.is_some());
        assert!(pending.complete().is_none());
        assert!(cancelled.borrow().is_empty());
        drop(finished);
        assert_eq!(*cancelled.borrow(), vec![7]);
    }
}
