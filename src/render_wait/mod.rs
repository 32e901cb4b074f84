//! Waiting for the next render pass of a surface.
//!
//! Both entry points return immediately; the action runs later, on the UI
//! thread, when the platform reports a completed render pass.

mod hook;
mod interceptor;

pub use interceptor::ReadinessInterceptor;

use crate::surface::{RenderSurface, SurfaceHost};
use hook::NextRenderHook;
use spdlog::trace;
use std::rc::Rc;

/// Runs `on_rendered` right after the next render pass of `surface`, once.
///
/// A surface whose draw channel is already dead makes this a no-op. A surface
/// that is not attached yet gets its hook on the next attach.
pub fn wait_for_next_render<S>(surface: &Rc<S>, on_rendered: impl FnOnce() + 'static)
where
    S: RenderSurface + ?Sized + 'static,
{
    if !surface.is_alive() {
        trace!("surface is not observable, dropping render wait");
        return;
    }

    let weak = Rc::downgrade(surface);
    let hook = NextRenderHook::new(weak.clone(), on_rendered);

    if surface.is_attached() {
        NextRenderHook::install(hook, &**surface);
    } else {
        surface.do_on_attach(Box::new(move || {
            if let Some(surface) = weak.upgrade() {
                NextRenderHook::install(hook, &*surface);
            }
        }));
    }
}

/// Runs `on_rendered` after the first render pass of the host's surface.
///
/// The action is posted to the front of the main queue so that it runs as
/// soon as the render pass has fully completed. If the host has no surface
/// yet, the wait starts when the host reports its content is ready.
pub fn wait_for_first_render<H>(host: &Rc<H>, on_rendered: impl FnOnce() + 'static)
where
    H: SurfaceHost + ?Sized + 'static,
{
    if let Some(surface) = host.peek_surface() {
        post_after_next_render(&surface, on_rendered);
        return;
    }

    let weak_host = Rc::downgrade(host);
    ReadinessInterceptor::install(&**host).add_action(Box::new(move || {
        if let Some(host) = weak_host.upgrade() {
            post_after_next_render(&host.surface(), on_rendered);
        }
    }));
}

fn post_after_next_render(surface: &Rc<dyn RenderSurface>, action: impl FnOnce() + 'static) {
    let weak = Rc::downgrade(surface);
    wait_for_next_render(surface, move || {
        if let Some(surface) = weak.upgrade() {
            surface.post_at_front(Box::new(action));
        }
    });
}
