//! Owned `requestAnimationFrame` loop

use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type FrameCallback = Rc<RefCell<dyn FnMut(f64)>>;
type PendingFrame = Rc<RefCell<Option<AnimationFrame>>>;

/// Calls `on_frame` once per display refresh until dropped.
///
/// Dropping the loop cancels the pending frame, so no callback runs after the
/// owner is torn down.
pub struct FrameLoop {
    pending: PendingFrame,
}

impl FrameLoop {
    pub fn start(on_frame: impl FnMut(f64) + 'static) -> Self {
        let pending: PendingFrame = Rc::new(RefCell::new(None));
        let on_frame: FrameCallback = Rc::new(RefCell::new(on_frame));
        schedule(&pending, on_frame);
        Self { pending }
    }
}

fn schedule(pending: &PendingFrame, on_frame: FrameCallback) {
    // Weak so the scheduled frame never keeps a dropped loop alive
    let owner: Weak<RefCell<Option<AnimationFrame>>> = Rc::downgrade(pending);
    let frame = request_animation_frame(move |timestamp| {
        {
            let mut callback = on_frame.borrow_mut();
            (&mut *callback)(timestamp);
        }
        if let Some(pending) = owner.upgrade() {
            schedule(&pending, on_frame);
        }
    });
    *pending.borrow_mut() = Some(frame);
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        // AnimationFrame cancels itself on drop
        self.pending.borrow_mut().take();
    }
}
