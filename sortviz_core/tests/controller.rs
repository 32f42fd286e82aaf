use std::time::Duration;

use sortviz_core::controller::SortController;
use sortviz_core::engine::{EngineConfig, RunOutcome, SortKind, StepReceiver};
use sortviz_core::model::ArrayModel;
use tokio::time::{sleep, Instant};
use utilities::events::{sorted, staircase, EventLog};

fn session(size: usize, algorithm: SortKind) -> (SortController, StepReceiver) {
    let (mut controller, events) = SortController::new(EngineConfig::default().with_size(size));
    controller.select_algorithm(algorithm);
    (controller, events)
}

fn steps_so_far(events: &mut StepReceiver) -> usize {
    EventLog::drain(events).steps().count()
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_the_run() {
    // Selection sort on 8 bars always takes 28 comparisons plus 7 exchanges.
    let (mut controller, mut events) = session(8, SortKind::Selection);
    assert!(controller.start());

    // Steps land at 0s, 1s and 2s.
    sleep(Duration::from_millis(2550)).await;
    assert!(controller.toggle_pause());
    let mut taken = steps_so_far(&mut events);
    assert_eq!(taken, 3);

    sleep(Duration::from_millis(500)).await;
    taken += steps_so_far(&mut events);
    let frozen = controller.snapshot();
    assert_eq!(taken, 3);

    sleep(Duration::from_secs(10)).await;
    taken += steps_so_far(&mut events);
    assert_eq!(taken, 3, "no steps while paused");
    assert_eq!(controller.snapshot(), frozen);
    assert!(controller.is_running());

    assert!(!controller.toggle_pause());
    let report = controller.wait().await.unwrap();
    taken += EventLog::drain(&mut events).steps().count();

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.stats.steps, 35);
    assert_eq!(taken, 35);
}

#[tokio::test(start_paused = true)]
async fn cancel_leaves_a_shuffled_permutation() {
    for algorithm in SortKind::ALL {
        let (mut controller, mut events) = session(10, algorithm);
        assert!(controller.start());

        sleep(Duration::from_millis(3500)).await;
        assert!(controller.cancel());
        assert!(!controller.is_running());

        let report = controller.wait().await.unwrap();
        assert_eq!(report.outcome, RunOutcome::Cancelled, "{algorithm}");
        assert_eq!(report.stats.steps, 4, "{algorithm}");

        let frame = controller.snapshot();
        assert_eq!(frame.evaluated, None, "{algorithm}");
        assert_eq!(sorted(&frame.values), staircase(10), "{algorithm}");

        let log = EventLog::drain(&mut events);
        assert_eq!(log.reports, [report]);
        assert_eq!(log.frames.last().unwrap().evaluated, None);

        // Nothing happens after the run has wound down.
        sleep(Duration::from_secs(5)).await;
        assert!(EventLog::drain(&mut events).frames.is_empty());
        assert_eq!(controller.snapshot(), frame);
    }
}

#[tokio::test(start_paused = true)]
async fn start_is_ignored_while_running() {
    let (mut controller, mut events) = session(6, SortKind::Bubble);
    assert!(controller.start());
    sleep(Duration::from_millis(1500)).await;
    assert!(!controller.start());

    let report = controller.wait().await.unwrap();
    assert_eq!(report.outcome, RunOutcome::Completed);

    let log = EventLog::drain(&mut events);
    assert_eq!(log.reports.len(), 1);

    // Done, so a new start is allowed again and runs over the sorted array.
    assert!(controller.start());
    let again = controller.wait().await.unwrap();
    assert_eq!(again.stats.moves, 0);
}

#[tokio::test(start_paused = true)]
async fn mute_silences_the_ticks() {
    let model = ArrayModel::from_values(vec![5.0, 3.0, 1.0, 4.0, 2.0]);
    let (mut controller, mut events) = SortController::with_model(EngineConfig::default(), model);
    assert!(controller.toggle_mute());
    controller.start();

    let log = EventLog::until_finished(&mut events).await;
    assert_eq!(log.ticks, 0);
    assert_eq!(log.moves().count(), 7);
    assert_eq!(log.reports[0].stats.moves, 7);
}

#[tokio::test(start_paused = true)]
async fn unmuting_mid_run_brings_the_ticks_back() {
    let model = ArrayModel::from_values((1..=6).rev().map(|i| i as f32).collect());
    let (mut controller, mut events) = SortController::with_model(EngineConfig::default(), model);
    controller.toggle_mute();
    controller.start();

    sleep(Duration::from_millis(4500)).await;
    let muted = EventLog::drain(&mut events);
    assert_eq!(muted.ticks, 0);
    assert!(muted.moves().count() > 0);

    controller.toggle_mute();
    let rest = EventLog::until_finished(&mut events).await;
    assert_eq!(rest.ticks, rest.moves().count());
    assert!(rest.ticks > 0);
}

#[tokio::test(start_paused = true)]
async fn algorithm_is_fixed_for_the_run() {
    let (mut controller, _events) = session(5, SortKind::Bubble);
    controller.start();
    sleep(Duration::from_millis(1500)).await;

    controller.select_algorithm(SortKind::Merge);
    assert_eq!(controller.algorithm(), SortKind::Merge);

    let report = controller.wait().await.unwrap();
    assert_eq!(report.algorithm, SortKind::Bubble);
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_rebuilds_the_array() {
    let (mut controller, mut events) = session(20, SortKind::Selection);
    controller.start();
    sleep(Duration::from_millis(2500)).await;

    controller.stop_and_reset(Some(5));
    assert_eq!(controller.size(), 5);
    assert!(!controller.is_running());

    let report = controller.wait().await.unwrap();
    assert_eq!(report.outcome, RunOutcome::Cancelled);

    let frame = controller.snapshot();
    assert_eq!(frame.values.len(), 5);
    assert_eq!(frame.evaluated, None);
    assert_eq!(sorted(&frame.values), staircase(5));

    // Once the 5-bar frame is out, the old run never draws over it.
    let log = EventLog::drain(&mut events);
    let reset_at = log
        .frames
        .iter()
        .position(|frame| frame.values.len() == 5)
        .unwrap();
    assert!(log.frames[reset_at..]
        .iter()
        .all(|frame| frame.values.len() == 5 && frame.step.is_none()));
}

#[tokio::test(start_paused = true)]
async fn reset_while_idle_keeps_the_size() {
    let (mut controller, mut events) = session(7, SortKind::Insertion);
    EventLog::drain(&mut events);

    controller.stop_and_reset(None);
    assert_eq!(controller.size(), 7);
    assert_eq!(sorted(&controller.snapshot().values), staircase(7));
    assert_eq!(EventLog::drain(&mut events).frames.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn speed_divides_the_delay() {
    let (mut controller, _events) = session(8, SortKind::Selection);
    controller.set_speed(4.0);
    assert_eq!(controller.speed(), 4.0);

    let started = Instant::now();
    controller.start();
    let report = controller.wait().await.unwrap();
    let elapsed = started.elapsed();

    // 35 steps of 250ms each.
    assert_eq!(report.stats.steps, 35);
    assert!(elapsed >= Duration::from_millis(8750), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(8800), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn slow_speeds_use_the_base_delay() {
    let (mut controller, _events) = session(3, SortKind::Selection);
    controller.set_speed(0.25);

    let started = Instant::now();
    controller.start();
    let report = controller.wait().await.unwrap();

    // 3 comparisons and 2 exchanges at one second each.
    assert_eq!(report.stats.steps, 5);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(5), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(5050), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn a_single_bar_finishes_at_once() {
    let (mut controller, mut events) = session(1, SortKind::Merge);
    controller.start();
    let report = controller.wait().await.unwrap();

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.stats.steps, 0);

    let log = EventLog::drain(&mut events);
    assert_eq!(log.reports, [report]);
    assert_eq!(log.steps().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_ends_a_paused_run() {
    let (mut controller, mut events) = session(8, SortKind::Selection);
    controller.start();
    sleep(Duration::from_millis(1500)).await;
    assert!(controller.toggle_pause());
    sleep(Duration::from_secs(5)).await;

    let cancelled_at = Instant::now();
    assert!(controller.cancel());
    assert!(!controller.is_paused());

    let report = controller.wait().await.unwrap();
    let wound_down = cancelled_at.elapsed();
    assert!(
        wound_down <= EngineConfig::default().pause_poll,
        "{wound_down:?}"
    );

    assert_eq!(report.outcome, RunOutcome::Cancelled);
    assert_eq!(report.stats.steps, 2);
    assert_eq!(controller.snapshot().evaluated, None);

    let log = EventLog::drain(&mut events);
    assert_eq!(log.reports, [report]);
}

#[tokio::test(start_paused = true)]
async fn reset_ends_a_paused_run() {
    let (mut controller, mut events) = session(12, SortKind::Bubble);
    controller.start();
    sleep(Duration::from_millis(2500)).await;
    controller.toggle_pause();
    sleep(Duration::from_secs(3)).await;

    controller.stop_and_reset(Some(6));
    assert!(!controller.is_paused());

    let report = controller.wait().await.unwrap();
    assert_eq!(report.outcome, RunOutcome::Cancelled);

    let frame = controller.snapshot();
    assert_eq!(frame.evaluated, None);
    assert_eq!(sorted(&frame.values), staircase(6));

    let log = EventLog::drain(&mut events);
    let reset_at = log
        .frames
        .iter()
        .position(|frame| frame.values.len() == 6)
        .unwrap();
    assert_eq!(log.frames.len(), reset_at + 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reset_frame_is_never_overdrawn() {
    for _ in 0..200 {
        let config = EngineConfig::default()
            .with_size(200)
            .with_base_delay(Duration::ZERO);
        let (mut controller, mut events) = SortController::new(config);
        controller.start();
        sleep(Duration::from_micros(200)).await;

        controller.stop_and_reset(Some(5));
        controller.wait().await;

        let log = EventLog::drain(&mut events);
        let reset_at = log
            .frames
            .iter()
            .position(|frame| frame.values.len() == 5)
            .unwrap();
        let stale = log.frames[reset_at..]
            .iter()
            .filter(|frame| frame.values.len() != 5)
            .count();
        assert_eq!(stale, 0);
        assert_eq!(log.frames.last().unwrap().values.len(), 5);
    }
}
