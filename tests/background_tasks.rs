//! Background tasks driven on a paused clock

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use futures::future::BoxFuture;
use tokio::time::sleep;

use orbital_countdown::{
    services::StatusTextSource,
    state::{
        scene_clock::{IDLE_STEP, RUNNING_STEP},
        AppState, DisplayMode, LogKind, TimerStatus,
    },
    tasks::{Scheduler, TaskPeriods},
};

struct SlowSource {
    calls: AtomicUsize,
    delay: Duration,
}

impl StatusTextSource for SlowSource {
    fn fetch(&self, seconds_remaining: u64) -> BoxFuture<'_, String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            sleep(self.delay).await;
            format!("relay {} at {}", call, seconds_remaining)
        })
    }
}

fn console(duration: u64, delay: Duration) -> (Arc<AppState>, Arc<SlowSource>) {
    let source = Arc::new(SlowSource { calls: AtomicUsize::new(0), delay });
    let state = Arc::new(AppState::new(duration, DisplayMode::Dark, source.clone()));
    (state, source)
}

fn status_entries(state: &AppState) -> Vec<String> {
    state
        .get_log()
        .unwrap()
        .into_iter()
        .filter(|e| e.kind == LogKind::Status)
        .map(|e| e.text)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn countdown_ticks_only_while_running() {
    let (state, _) = console(300, Duration::ZERO);
    let mut scheduler = Scheduler::new(Arc::clone(&state), TaskPeriods::default());
    scheduler.start_countdown();

    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.get_timer_state().unwrap().seconds_remaining, 300);

    state.toggle().unwrap();
    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(state.get_timer_state().unwrap().seconds_remaining, 290);

    state.toggle().unwrap();
    sleep(Duration::from_secs(30)).await;
    let timer = state.get_timer_state().unwrap();
    assert_eq!(timer.status, TimerStatus::Paused);
    assert_eq!(timer.seconds_remaining, 290);

    state.toggle().unwrap();
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(state.get_timer_state().unwrap().seconds_remaining, 287);

    scheduler.shutdown();
}

#[tokio::test(start_paused = true)]
async fn countdown_completes_once() {
    let (state, _) = console(3, Duration::ZERO);
    let mut scheduler = Scheduler::new(Arc::clone(&state), TaskPeriods::default());
    scheduler.start_countdown();

    state.toggle().unwrap();
    sleep(Duration::from_secs(10)).await;

    let timer = state.get_timer_state().unwrap();
    assert_eq!(timer.status, TimerStatus::Completed);
    assert_eq!(timer.seconds_remaining, 0);
    let alerts = state.get_log().unwrap().iter().filter(|e| e.kind == LogKind::Alert).count();
    assert_eq!(alerts, 1);

    scheduler.shutdown();
}

#[tokio::test(start_paused = true)]
async fn poll_is_gated_on_running() {
    let (state, source) = console(300, Duration::ZERO);
    let mut scheduler = Scheduler::new(Arc::clone(&state), TaskPeriods::default());
    scheduler.start_status_poll();

    sleep(Duration::from_secs(130)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(status_entries(&state).is_empty());

    state.toggle().unwrap();
    sleep(Duration::from_secs(41)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(status_entries(&state), vec!["relay 0 at 300".to_string()]);

    state.toggle().unwrap();
    sleep(Duration::from_secs(120)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    scheduler.shutdown();
}

#[tokio::test(start_paused = true)]
async fn overlapping_fetches_and_late_results() {
    let (state, source) = console(300, Duration::from_secs(100));
    let mut scheduler = Scheduler::new(Arc::clone(&state), TaskPeriods::default());
    scheduler.start_status_poll();
    state.toggle().unwrap();

    sleep(Duration::from_secs(85)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.fetches_in_flight(), 2);

    // First fetch lands at 140s
    sleep(Duration::from_secs(60)).await;
    assert_eq!(status_entries(&state).len(), 1);

    scheduler.shutdown();
    sleep(Duration::from_secs(200)).await;

    assert_eq!(state.fetches_in_flight(), 0);
    assert_eq!(status_entries(&state).len(), 1);
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn animation_speed_follows_timer() {
    let (state, _) = console(300, Duration::ZERO);
    let mut scheduler = Scheduler::new(Arc::clone(&state), TaskPeriods::default());
    scheduler.start_animation();

    sleep(Duration::from_millis(500)).await;
    let idle = state.scene_frame().unwrap();
    assert!(idle.frame > 0);
    assert!((idle.t - idle.frame as f64 * IDLE_STEP).abs() < 1e-9);

    state.toggle().unwrap();
    state.resize_viewport(1000, 500).unwrap();
    sleep(Duration::from_millis(500)).await;
    let running = state.scene_frame().unwrap();
    let frames = (running.frame - idle.frame) as f64;
    assert!(frames > 0.0);
    assert!((running.t - idle.t - frames * RUNNING_STEP).abs() < 1e-9);
    assert_eq!(running.viewport.aspect, 2.0);

    scheduler.shutdown();
    assert!(!scheduler.is_active());
    let frozen = state.scene_frame().unwrap().frame;
    sleep(Duration::from_secs(1)).await;
    assert_eq!(state.scene_frame().unwrap().frame, frozen);
}
