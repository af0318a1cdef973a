// ============================================================================
// SCHEDULER - Timers periódicos y tareas async del navegador
// ============================================================================
// Los view models no tocan gloo-timers ni spawn_local directamente:
// así los tests pueden avanzar los timers a mano
// ============================================================================

use std::future::Future;
use std::pin::Pin;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Timer activo; drop o `cancel()` lo detiene
pub struct TimerHandle {
    release: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub trait Scheduler {
    /// Ejecuta `task` cada `period_ms` hasta soltar el handle
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerHandle;

    /// Lanza una tarea en el event loop sin esperarla
    fn spawn(&self, task: LocalTask);
}

/// setInterval + cola de microtareas del navegador
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TimerHandle {
        let interval = Interval::new(period_ms, move || task());
        TimerHandle::new(move || { interval.cancel(); })
    }

    fn spawn(&self, task: LocalTask) {
        spawn_local(task);
    }
}
