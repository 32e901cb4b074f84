//! Seams between the trackers and the platform's rendering objects.
//!
//! A platform adapter implements these traits over its own views and windows;
//! [`crate::sim`] implements them in memory.

use crate::error::SurfaceError;
use crate::render_wait::ReadinessInterceptor;
use std::rc::Rc;

pub type ListenerId = u64;

/// Unit of work for a surface's main-thread queue.
pub type Task = Box<dyn FnOnce()>;

/// Receives a notification after each completed render pass.
pub trait DrawListener {
    fn on_draw(&self);
}

/// A rendering surface: the root view of a screen.
pub trait RenderSurface {
    /// False once the draw-notification channel has been torn down. A dead
    /// channel never delivers another render pass.
    fn is_alive(&self) -> bool;

    fn is_attached(&self) -> bool;

    /// Runs `action` once, on the next attach notification.
    fn do_on_attach(&self, action: Task);

    fn add_draw_listener(&self, listener: Rc<dyn DrawListener>) -> Result<ListenerId, SurfaceError>;

    fn remove_draw_listener(&self, id: ListenerId) -> Result<(), SurfaceError>;

    /// Enqueues `task` at the back of the main-thread queue.
    fn post(&self, task: Task);

    /// Enqueues `task` so that it runs before anything already queued.
    fn post_at_front(&self, task: Task);
}

/// Handler chain for readiness notifications coming from a [`SurfaceHost`].
pub trait HostCallback {
    /// The host's content is ready; its surface exists from now on.
    fn on_content_changed(&self);

    fn on_window_focus_changed(&self, _has_focus: bool) {}

    fn on_attached_to_window(&self) {}

    fn on_detached_from_window(&self) {}

    /// Identifies an installed [`ReadinessInterceptor`] so it is never stacked twice.
    fn as_readiness_interceptor(self: Rc<Self>) -> Option<Rc<ReadinessInterceptor>> {
        None
    }
}

/// Owner of a screen's render pipeline (a window). Its surface may not exist yet.
pub trait SurfaceHost {
    /// The surface if the pipeline is already initialized.
    fn peek_surface(&self) -> Option<Rc<dyn RenderSurface>>;

    /// The surface, created on demand.
    fn surface(&self) -> Rc<dyn RenderSurface>;

    fn callback(&self) -> Option<Rc<dyn HostCallback>>;

    fn set_callback(&self, callback: Rc<dyn HostCallback>);
}
