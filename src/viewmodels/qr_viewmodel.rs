// ============================================================================
// QR VIEWMODEL - Ciclo de refresco del QR y reloj en pantalla
// ============================================================================
// Refresco automático cada intervalo + manual; el reloj va por separado
// para que su tick solo reescriba el texto del reloj
// ============================================================================

use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::config::QrConfig;
use crate::models::qr::{format_clock, format_date, generate_payload, next_refresh_label};
use crate::models::QrPayload;
use crate::services::{BrowserScheduler, QrRenderer, Scheduler, ServiceError, TimerHandle};
use crate::state::{ReactiveState, Subscription};

pub const QR_HTTP_ERROR: &str = "Failed to fetch QR code";
pub const QR_CONNECTION_ERROR: &str = "Error connecting to QR service";

/// Estado visible de la tarjeta QR
#[derive(Debug, Clone, PartialEq)]
pub struct QrSnapshot {
    pub image: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub payload: Option<QrPayload>,
}

impl Default for QrSnapshot {
    fn default() -> Self {
        // El primer refresco se lanza al montar: se arranca cargando
        Self {
            image: None,
            loading: true,
            error: None,
            last_refreshed: None,
            payload: None,
        }
    }
}

fn user_message(error: &ServiceError) -> &'static str {
    if error.is_transport() {
        QR_CONNECTION_ERROR
    } else {
        QR_HTTP_ERROR
    }
}

pub struct QrViewModel {
    renderer: Rc<dyn QrRenderer>,
    scheduler: Rc<dyn Scheduler>,
    offset: FixedOffset,
    interval: Duration,
    refresh_interval_ms: u32,
    clock_tick_ms: u32,
    state: ReactiveState<QrSnapshot>,
    clock: ReactiveState<String>,
}

impl QrViewModel {
    pub fn new(renderer: Rc<dyn QrRenderer>, config: &QrConfig) -> Self {
        Self {
            renderer,
            scheduler: Rc::new(BrowserScheduler),
            offset: config.utc_offset(),
            interval: config.refresh_interval(),
            refresh_interval_ms: config.refresh_interval_ms(),
            clock_tick_ms: config.clock_tick_ms,
            state: ReactiveState::new(QrSnapshot::default()),
            clock: ReactiveState::new(String::new()),
        }
    }

    pub fn with_scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn snapshot(&self) -> QrSnapshot {
        self.state.get()
    }

    pub fn clock_text(&self) -> String {
        self.clock.get()
    }

    /// Hora del próximo refresco automático estimado, o "Soon"
    pub fn next_refresh_label(&self) -> String {
        let last = self.state.with(|s| s.last_refreshed);
        next_refresh_label(last, self.interval, self.offset)
    }

    /// Fecha del último refresco ("..." hasta el primero)
    pub fn last_refreshed_label(&self) -> String {
        self.state
            .with(|s| s.last_refreshed)
            .map(|last| format_date(last, self.offset))
            .unwrap_or_else(|| "...".to_string())
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&QrSnapshot) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe_clock(&self, callback: impl Fn(&String) + 'static) -> Subscription {
        self.clock.subscribe(callback)
    }

    pub fn tick_clock(&self, now: DateTime<Utc>) {
        self.clock.set(format_clock(now, self.offset));
    }

    pub async fn refresh(&self) {
        self.refresh_at(Utc::now()).await;
    }

    /// Un refresco completo. Sin control de solapamiento: la última
    /// respuesta en llegar es la que queda.
    pub async fn refresh_at(&self, now: DateTime<Utc>) {
        let payload = generate_payload(now, self.offset);
        let data = payload.to_json();
        log::info!("🔄 [QR] Refrescando QR: {} {}", payload.date, payload.time);

        self.state.update(|s| {
            s.loading = true;
            s.last_refreshed = Some(now);
            s.payload = Some(payload);
        });

        let result = self.renderer.render(&data).await;

        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(image) => {
                    log::info!("✅ [QR] Imagen actualizada");
                    s.image = Some(image);
                    s.error = None;
                }
                Err(e) => {
                    log::error!("❌ [QR] Error obteniendo imagen: {}", e);
                    s.error = Some(user_message(&e).to_string());
                }
            }
        });
    }

    /// Refresco manual: no toca el timer automático
    pub fn trigger_refresh(self: &Rc<Self>) {
        let vm = self.clone();
        self.scheduler.spawn(Box::pin(async move { vm.refresh().await }));
    }

    /// Monta el ciclo: refresco inmediato + timers de refresco y reloj.
    /// Los timers solo se crean aquí; los refrescos manuales no los tocan.
    pub fn mount(self: &Rc<Self>) -> QrTimers {
        let now = Utc::now();
        self.tick_clock(now);

        let vm = self.clone();
        self.scheduler.spawn(Box::pin(async move { vm.refresh_at(now).await }));

        let vm = self.clone();
        let refresh = self
            .scheduler
            .every(self.refresh_interval_ms, Box::new(move || vm.trigger_refresh()));

        let vm = self.clone();
        let clock = self
            .scheduler
            .every(self.clock_tick_ms, Box::new(move || vm.tick_clock(Utc::now())));

        log::info!(
            "⏱️ [QR] Timers activos (refresco cada {} ms, reloj cada {} ms)",
            self.refresh_interval_ms,
            self.clock_tick_ms
        );

        QrTimers {
            refresh: Some(refresh),
            clock: Some(clock),
        }
    }
}

/// Timers del ciclo QR. Drop o `cancel()` los detiene.
pub struct QrTimers {
    refresh: Option<TimerHandle>,
    clock: Option<TimerHandle>,
}

impl QrTimers {
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let had_timers = self.refresh.is_some() || self.clock.is_some();
        if let Some(refresh) = self.refresh.take() {
            refresh.cancel();
        }
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
        if had_timers {
            log::info!("🛑 [QR] Timers detenidos");
        }
    }
}

impl Drop for QrTimers {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LocalTask;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// Renderer que responde con una cola fija y registra los payloads
    struct ScriptedRenderer {
        responses: RefCell<VecDeque<Result<String, ServiceError>>>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedRenderer {
        fn new(responses: Vec<Result<String, ServiceError>>) -> Rc<Self> {
            Rc::new(Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl QrRenderer for ScriptedRenderer {
        async fn render(&self, data: &str) -> Result<String, ServiceError> {
            self.requests.borrow_mut().push(data.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ServiceError::Network("sin respuesta".into())))
        }
    }

    /// Renderer que espera a que el test libere cada respuesta
    struct GatedRenderer {
        gates: RefCell<VecDeque<oneshot::Receiver<Result<String, ServiceError>>>>,
    }

    #[async_trait(?Send)]
    impl QrRenderer for GatedRenderer {
        async fn render(&self, _data: &str) -> Result<String, ServiceError> {
            let gate = self.gates.borrow_mut().pop_front().expect("gate");
            gate.await.expect("sender alive")
        }
    }

    struct ManualTimer {
        period_ms: u32,
        task: Rc<RefCell<Box<dyn FnMut()>>>,
        active: Rc<Cell<bool>>,
    }

    /// Scheduler que el test avanza a mano
    #[derive(Default)]
    struct ManualScheduler {
        timers: RefCell<Vec<ManualTimer>>,
        spawned: RefCell<Vec<LocalTask>>,
    }

    impl ManualScheduler {
        fn active_periods(&self) -> Vec<u32> {
            self.timers
                .borrow()
                .iter()
                .filter(|t| t.active.get())
                .map(|t| t.period_ms)
                .collect()
        }

        fn fire(&self, period_ms: u32) {
            let tasks: Vec<_> = self
                .timers
                .borrow()
                .iter()
                .filter(|t| t.active.get() && t.period_ms == period_ms)
                .map(|t| t.task.clone())
                .collect();
            for task in tasks {
                (task.borrow_mut())();
            }
        }

        async fn run_spawned(&self) {
            loop {
                let batch: Vec<LocalTask> = self.spawned.borrow_mut().drain(..).collect();
                if batch.is_empty() {
                    break;
                }
                for task in batch {
                    task.await;
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerHandle {
            let active = Rc::new(Cell::new(true));
            self.timers.borrow_mut().push(ManualTimer {
                period_ms,
                task: Rc::new(RefCell::new(task)),
                active: active.clone(),
            });
            TimerHandle::new(move || active.set(false))
        }

        fn spawn(&self, task: LocalTask) {
            self.spawned.borrow_mut().push(task);
        }
    }

    fn mounted(responses: usize) -> (Rc<ScriptedRenderer>, Rc<ManualScheduler>, Rc<QrViewModel>) {
        let renderer = ScriptedRenderer::new((0..responses).map(|i| Ok(format!("img-{}", i))).collect());
        let scheduler = Rc::new(ManualScheduler::default());
        let vm = Rc::new(
            QrViewModel::new(renderer.clone(), &QrConfig::default())
                .with_scheduler(scheduler.clone()),
        );
        (renderer, scheduler, vm)
    }

    const REFRESH_MS: u32 = 5 * 60 * 1000;
    const CLOCK_MS: u32 = 1000;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    fn view_model(renderer: Rc<dyn QrRenderer>) -> QrViewModel {
        QrViewModel::new(renderer, &QrConfig::default())
    }

    #[test]
    fn starts_loading_with_no_image() {
        let vm = view_model(ScriptedRenderer::new(vec![]));
        let snapshot = vm.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.image, None);
        assert_eq!(vm.next_refresh_label(), "Soon");
        assert_eq!(vm.last_refreshed_label(), "...");
    }

    #[tokio::test]
    async fn successful_refresh_stores_the_image() {
        let renderer = ScriptedRenderer::new(vec![Ok("https://qr/img-1.png".into())]);
        let vm = view_model(renderer.clone());

        vm.refresh_at(at(0, 0, 0)).await;

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.image.as_deref(), Some("https://qr/img-1.png"));
        assert_eq!(snapshot.error, None);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.last_refreshed, Some(at(0, 0, 0)));
        assert_eq!(
            renderer.requests.borrow().as_slice(),
            [r#"{"date":"01/01/2024","time":"05:30:00"}"#.to_string()]
        );
        assert_eq!(vm.next_refresh_label(), "05:35:00");
        assert_eq!(vm.last_refreshed_label(), "01/01/2024");
    }

    #[tokio::test]
    async fn http_failure_keeps_the_previous_image() {
        let renderer = ScriptedRenderer::new(vec![
            Ok("img-1".into()),
            Err(ServiceError::http(500, "Internal Server Error")),
        ]);
        let vm = view_model(renderer);

        vm.refresh_at(at(0, 0, 0)).await;
        vm.refresh_at(at(0, 5, 0)).await;

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.image.as_deref(), Some("img-1"));
        assert_eq!(snapshot.error.as_deref(), Some(QR_HTTP_ERROR));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.last_refreshed, Some(at(0, 5, 0)));
    }

    #[tokio::test]
    async fn transport_failure_reports_a_connection_error() {
        let renderer = ScriptedRenderer::new(vec![Err(ServiceError::Network("offline".into()))]);
        let vm = view_model(renderer);

        vm.refresh_at(at(12, 0, 0)).await;

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some(QR_CONNECTION_ERROR));
        assert_eq!(snapshot.image, None);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn success_after_failure_clears_the_error() {
        let renderer = ScriptedRenderer::new(vec![
            Err(ServiceError::Network("offline".into())),
            Ok("img-2".into()),
        ]);
        let vm = view_model(renderer);

        vm.refresh_at(at(0, 0, 0)).await;
        vm.refresh_at(at(0, 5, 0)).await;

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.error, None);
        assert_eq!(snapshot.image.as_deref(), Some("img-2"));
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let renderer = ScriptedRenderer::new(vec![Ok("img".into())]);
        let vm = view_model(renderer);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = vm.subscribe(move |s| sink.borrow_mut().push(s.loading));

        vm.refresh_at(at(0, 0, 0)).await;

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn last_response_to_arrive_wins() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let renderer = Rc::new(GatedRenderer {
            gates: RefCell::new(VecDeque::from([rx1, rx2])),
        });
        let vm = view_model(renderer);

        let driver = async {
            tx2.send(Ok("img-2".to_string())).unwrap();
            let mut spins = 0;
            while vm.snapshot().image.as_deref() != Some("img-2") {
                spins += 1;
                assert!(spins < 100, "second refresh never resolved");
                tokio::task::yield_now().await;
            }
            tx1.send(Ok("img-1".to_string())).unwrap();
        };

        tokio::join!(vm.refresh_at(at(0, 0, 0)), vm.refresh_at(at(0, 5, 0)), driver);

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.image.as_deref(), Some("img-1"));
        assert_eq!(snapshot.last_refreshed, Some(at(0, 5, 0)));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn mount_refreshes_at_once_then_on_every_interval() {
        let (renderer, scheduler, vm) = mounted(3);

        let timers = vm.mount();
        assert_eq!(scheduler.active_periods(), vec![REFRESH_MS, CLOCK_MS]);
        scheduler.run_spawned().await;
        assert_eq!(renderer.requests.borrow().len(), 1);
        assert_eq!(vm.snapshot().image.as_deref(), Some("img-0"));

        scheduler.fire(REFRESH_MS);
        scheduler.run_spawned().await;
        scheduler.fire(REFRESH_MS);
        scheduler.run_spawned().await;
        assert_eq!(renderer.requests.borrow().len(), 3);
        assert_eq!(vm.snapshot().image.as_deref(), Some("img-2"));

        drop(timers);
    }

    #[tokio::test]
    async fn manual_refresh_leaves_the_automatic_timer_alone() {
        let (renderer, scheduler, vm) = mounted(4);
        let _timers = vm.mount();
        scheduler.run_spawned().await;

        vm.trigger_refresh();
        scheduler.run_spawned().await;
        assert_eq!(renderer.requests.borrow().len(), 2);
        // Mismo timer automático: ni recreado ni cancelado
        assert_eq!(scheduler.timers.borrow().len(), 2);
        assert_eq!(scheduler.active_periods(), vec![REFRESH_MS, CLOCK_MS]);

        scheduler.fire(REFRESH_MS);
        scheduler.run_spawned().await;
        assert_eq!(renderer.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn clock_timer_never_requests_an_image() {
        let (renderer, scheduler, vm) = mounted(1);
        let _timers = vm.mount();
        scheduler.run_spawned().await;

        for _ in 0..3 {
            scheduler.fire(CLOCK_MS);
        }
        scheduler.run_spawned().await;

        assert_eq!(renderer.requests.borrow().len(), 1);
        assert_eq!(vm.clock_text().len(), "HH:MM:SS".len());
    }

    #[tokio::test]
    async fn dropping_the_timers_stops_both_intervals() {
        let (renderer, scheduler, vm) = mounted(1);
        let timers = vm.mount();
        scheduler.run_spawned().await;

        drop(timers);
        assert!(scheduler.active_periods().is_empty());

        scheduler.fire(REFRESH_MS);
        scheduler.run_spawned().await;
        assert_eq!(renderer.requests.borrow().len(), 1);
    }

    #[test]
    fn clock_tick_only_touches_the_clock() {
        let vm = view_model(ScriptedRenderer::new(vec![]));
        let qr_hits = Rc::new(RefCell::new(0));
        let sink = qr_hits.clone();
        let _sub = vm.subscribe(move |_| *sink.borrow_mut() += 1);

        vm.tick_clock(at(0, 0, 1));
        vm.tick_clock(at(0, 0, 2));

        assert_eq!(vm.clock_text(), "05:30:02");
        assert_eq!(*qr_hits.borrow(), 0);
        assert_eq!(vm.snapshot(), QrSnapshot::default());
    }
}
