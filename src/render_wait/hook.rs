use crate::surface::{DrawListener, ListenerId, RenderSurface};
use spdlog::{debug, trace};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// One-shot draw listener: runs its action on the first render pass it sees and
/// then detaches itself.
pub(crate) struct NextRenderHook<S: ?Sized> {
    surface: Weak<S>,
    action: RefCell<Option<Box<dyn FnOnce()>>>,
    fired: Cell<bool>,
    id: Cell<Option<ListenerId>>,
}

impl<S: RenderSurface + ?Sized + 'static> NextRenderHook<S> {
    pub(crate) fn new(surface: Weak<S>, action: impl FnOnce() + 'static) -> Rc<Self> {
        Rc::new(Self {
            surface,
            action: RefCell::new(Some(Box::new(action))),
            fired: Cell::new(false),
            id: Cell::new(None),
        })
    }

    pub(crate) fn install(hook: Rc<Self>, surface: &S) {
        let listener: Rc<dyn DrawListener> = hook.clone();
        match surface.add_draw_listener(listener) {
            Ok(id) => {
                trace!("render hook {} installed", id);
                hook.id.set(Some(id));
            }
            Err(err) => debug!("render hook not installed: {}", err),
        }
    }

    fn detach(surface: &Weak<S>, id: ListenerId) {
        let Some(surface) = surface.upgrade() else {
            return;
        };
        if !surface.is_alive() {
            return;
        }
        // Some platforms throw here for surfaces that are being torn down.
        if let Err(err) = surface.remove_draw_listener(id) {
            debug!("ignoring failure to detach render hook {}: {}", id, err);
        }
    }
}

impl<S: RenderSurface + ?Sized + 'static> DrawListener for NextRenderHook<S> {
    fn on_draw(&self) {
        if self.fired.replace(true) {
            return;
        }

        let action = self.action.borrow_mut().take();
        if let Some(action) = action {
            action();
        }

        // Listeners cannot be removed while the surface is dispatching.
        if let (Some(surface), Some(id)) = (self.surface.upgrade(), self.id.get()) {
            let weak = self.surface.clone();
            surface.post(Box::new(move || Self::detach(&weak, id)));
        }
    }
}
