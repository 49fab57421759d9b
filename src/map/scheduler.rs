use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};

use crate::lens::RedrawHandle;

/// Coalesces redraw requests into at most one pending animation frame.
#[derive(Default)]
pub struct RedrawScheduler {
    this: RefCell<Weak<RedrawScheduler>>,
    frame: RefCell<Option<AnimationFrame>>,
    draw: RefCell<Option<Rc<dyn Fn()>>>,
}

impl RedrawScheduler {
    pub fn new() -> Rc<Self> {
        let scheduler = Rc::new(Self::default());
        *scheduler.this.borrow_mut() = Rc::downgrade(&scheduler);
        scheduler
    }

    pub fn set_draw(&self, draw: Rc<dyn Fn()>) {
        *self.draw.borrow_mut() = Some(draw);
    }

    /// Cancels any pending frame and forgets the draw callback.
    pub fn stop(&self) {
        self.frame.borrow_mut().take();
        self.draw.borrow_mut().take();
    }
}

impl RedrawHandle for RedrawScheduler {
    fn request_redraw(&self) {
        if self.frame.borrow().is_some() || self.draw.borrow().is_none() {
            return;
        }
        let this = self.this.borrow().clone();
        let handle = request_animation_frame(move |_| {
            let Some(scheduler) = this.upgrade() else {
                return;
            };
            scheduler.frame.borrow_mut().take();
            let draw = scheduler.draw.borrow().clone();
            if let Some(draw) = draw {
                draw();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}
