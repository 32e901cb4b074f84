//! In-memory implementations of the surface traits.
//!
//! They model a single UI thread: a [`MainQueue`] of tasks, surfaces that
//! dispatch render passes to their draw listeners, and hosts that create a
//! surface when content is set. Useful for tests, demos and for replaying
//! recorded lifecycles.

use crate::error::SurfaceError;
use crate::surface::{DrawListener, HostCallback, ListenerId, RenderSurface, SurfaceHost, Task};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

/// The UI thread's task queue. Clones share the queue.
#[derive(Clone, Default)]
pub struct MainQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl MainQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }

    pub fn post_at_front(&self, task: Task) {
        self.tasks.borrow_mut().push_front(task);
    }

    /// Runs tasks until the queue is empty, including tasks posted meanwhile.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.tasks.borrow_mut().pop_front();
            let Some(task) = task else {
                return ran;
            };
            task();
            ran += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

pub struct SimSurface {
    queue: MainQueue,
    alive: Cell<bool>,
    attached: Cell<bool>,
    attach_actions: RefCell<Vec<Task>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn DrawListener>)>>,
    next_id: Cell<ListenerId>,
    render_passes: Cell<u64>,
    refuse_detach: Cell<bool>,
}

impl SimSurface {
    /// A detached surface.
    pub fn new(queue: &MainQueue) -> Rc<Self> {
        Rc::new(Self {
            queue: queue.clone(),
            alive: Cell::new(true),
            attached: Cell::new(false),
            attach_actions: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            render_passes: Cell::new(0),
            refuse_detach: Cell::new(false),
        })
    }

    pub fn attached(queue: &MainQueue) -> Rc<Self> {
        let surface = Self::new(queue);
        surface.attach();
        surface
    }

    pub fn attach(&self) {
        if self.attached.replace(true) {
            return;
        }
        let actions = mem::take(&mut *self.attach_actions.borrow_mut());
        for action in actions {
            action();
        }
    }

    pub fn detach(&self) {
        self.attached.set(false);
    }

    /// Tears down the draw channel: listeners are dropped and no pass is ever
    /// delivered again.
    pub fn kill(&self) {
        self.alive.set(false);
        self.listeners.borrow_mut().clear();
    }

    /// Makes every following `remove_draw_listener` fail, like some vendor
    /// builds do for surfaces in the middle of teardown.
    pub fn refuse_detach(&self, refuse: bool) {
        self.refuse_detach.set(refuse);
    }

    /// Delivers one completed render pass to the current listeners.
    pub fn render_pass(&self) {
        if !self.alive.get() || !self.attached.get() {
            return;
        }
        self.render_passes.set(self.render_passes.get() + 1);

        let listeners: Vec<Rc<dyn DrawListener>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener.on_draw();
        }
    }

    pub fn render_passes(&self) -> u64 {
        self.render_passes.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl RenderSurface for SimSurface {
    fn is_alive(&self) -> bool {
        self.alive.get()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn do_on_attach(&self, action: Task) {
        if self.attached.get() {
            action();
        } else {
            self.attach_actions.borrow_mut().push(action);
        }
    }

    fn add_draw_listener(&self, listener: Rc<dyn DrawListener>) -> Result<ListenerId, SurfaceError> {
        if !self.alive.get() {
            return Err(SurfaceError::NotAlive);
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        Ok(id)
    }

    fn remove_draw_listener(&self, id: ListenerId) -> Result<(), SurfaceError> {
        if self.refuse_detach.get() {
            return Err(SurfaceError::Refused("surface is being torn down".into()));
        }
        let mut listeners = self.listeners.borrow_mut();
        let position = listeners
            .iter()
            .position(|(listener_id, _)| *listener_id == id)
            .ok_or(SurfaceError::UnknownListener(id))?;
        listeners.remove(position);
        Ok(())
    }

    fn post(&self, task: Task) {
        self.queue.post(task);
    }

    fn post_at_front(&self, task: Task) {
        self.queue.post_at_front(task);
    }
}

/// A window: owns the readiness handler chain and lazily creates its surface.
pub struct SimHost {
    queue: MainQueue,
    surface: RefCell<Option<Rc<SimSurface>>>,
    callback: RefCell<Option<Rc<dyn HostCallback>>>,
}

impl SimHost {
    pub fn new(queue: &MainQueue) -> Rc<Self> {
        Rc::new(Self {
            queue: queue.clone(),
            surface: RefCell::new(None),
            callback: RefCell::new(None),
        })
    }

    pub fn with_callback(queue: &MainQueue, callback: Rc<dyn HostCallback>) -> Rc<Self> {
        let host = Self::new(queue);
        host.set_callback(callback);
        host
    }

    fn ensure_surface(&self) -> Rc<SimSurface> {
        self.surface
            .borrow_mut()
            .get_or_insert_with(|| SimSurface::new(&self.queue))
            .clone()
    }

    /// Sets the content view: the surface is created and attached, then the
    /// handler chain is told the content changed.
    pub fn set_content(&self) {
        self.ensure_surface().attach();
        if let Some(callback) = self.callback() {
            callback.on_content_changed();
        }
    }

    pub fn focus_changed(&self, has_focus: bool) {
        if let Some(callback) = self.callback() {
            callback.on_window_focus_changed(has_focus);
        }
    }

    pub fn sim_surface(&self) -> Option<Rc<SimSurface>> {
        self.surface.borrow().clone()
    }
}

impl SurfaceHost for SimHost {
    fn peek_surface(&self) -> Option<Rc<dyn RenderSurface>> {
        self.sim_surface().map(|surface| surface as Rc<dyn RenderSurface>)
    }

    fn surface(&self) -> Rc<dyn RenderSurface> {
        self.ensure_surface()
    }

    fn callback(&self) -> Option<Rc<dyn HostCallback>> {
        self.callback.borrow().clone()
    }

    fn set_callback(&self, callback: Rc<dyn HostCallback>) {
        *self.callback.borrow_mut() = Some(callback);
    }
}
