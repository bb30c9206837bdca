use std::sync::{Arc, Mutex};

use crate::core::{GraphEngine, Tick};
use crate::render::{ChartSurface, RenderAdapter};

/// The overlay root: engine state plus its render adapter, shared between
/// the feed task and the animation loop. Both writers finish their mutation
/// before unlocking, so no partial state is ever visible across tasks.
pub struct Overlay {
    pub engine: GraphEngine,
    adapter: RenderAdapter,
}

pub type SharedOverlay = Arc<Mutex<Overlay>>;

impl Overlay {
    pub fn new(surface: Box<dyn ChartSurface>) -> Self {
        Self {
            engine: GraphEngine::new(),
            adapter: RenderAdapter::new(surface),
        }
    }

    pub fn shared(surface: Box<dyn ChartSurface>) -> SharedOverlay {
        Arc::new(Mutex::new(Self::new(surface)))
    }

    /// One animation step; `Finished` means the buffer drained and the loop
    /// should stop after a final clearing redraw
    pub fn animate(&mut self, dt_ms: f64) -> Tick {
        self.engine.animate(dt_ms)
    }

    pub fn redraw(&mut self) {
        self.adapter.redraw(&self.engine);
    }
}
