use crate::surface::{HostCallback, SurfaceHost, Task};
use spdlog::trace;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

/// Decorator over a host's readiness handler.
///
/// Runs the queued actions on the next content-ready notification, then
/// forwards the notification. Every other notification is forwarded untouched.
pub struct ReadinessInterceptor {
    original: Option<Rc<dyn HostCallback>>,
    pending: RefCell<Vec<Task>>,
}

impl ReadinessInterceptor {
    /// Returns the interceptor installed on `host`, installing one in front of
    /// the current handler if there is none yet.
    pub fn install<H: SurfaceHost + ?Sized>(host: &H) -> Rc<Self> {
        let original = host.callback();
        if let Some(existing) = original.clone().and_then(|cb| cb.as_readiness_interceptor()) {
            return existing;
        }

        let interceptor = Rc::new(Self {
            original,
            pending: RefCell::new(Vec::new()),
        });
        host.set_callback(interceptor.clone());
        trace!("readiness interceptor installed");
        interceptor
    }

    pub fn add_action(&self, action: Task) {
        self.pending.borrow_mut().push(action);
    }

    pub fn pending_actions(&self) -> usize {
        self.pending.borrow().len()
    }

    /// The handler this interceptor forwards to.
    pub fn original(&self) -> Option<&Rc<dyn HostCallback>> {
        self.original.as_ref()
    }
}

impl HostCallback for ReadinessInterceptor {
    fn on_content_changed(&self) {
        // Actions queued while these run wait for the next notification.
        let actions = mem::take(&mut *self.pending.borrow_mut());
        for action in actions {
            action();
        }
        if let Some(original) = &self.original {
            original.on_content_changed();
        }
    }

    fn on_window_focus_changed(&self, has_focus: bool) {
        if let Some(original) = &self.original {
            original.on_window_focus_changed(has_focus);
        }
    }

    fn on_attached_to_window(&self) {
        if let Some(original) = &self.original {
            original.on_attached_to_window();
        }
    }

    fn on_detached_from_window(&self) {
        if let Some(original) = &self.original {
            original.on_detached_from_window();
        }
    }

    fn as_readiness_interceptor(self: Rc<Self>) -> Option<Rc<ReadinessInterceptor>> {
        Some(self)
    }
}
