//! End-to-end tests for the FanNode → FanService → Sequencer pipeline.
//!
//! A simulated receiver answers both IR frames and status reads, so every
//! test checks what the fan would really end up doing, not just which
//! frames were sent.

use super::mock_hw::{ManualClock, RecordingSink, SimulatedFan};

use panafan::app::events::FanEvent;
use panafan::config::FanConfig;
use panafan::fan::{DesiredState, Oscillation, Speed, TimerSetting};
use panafan::ir::Command;
use panafan::node::FanNode;

type Node = FanNode<SimulatedFan, RecordingSink, ManualClock>;

/// Node started at t=0 with one poll (t=10) already done.  The clock is
/// left at zero: frames take no time and `run_until` alone moves the
/// timeline.
fn started(fan: SimulatedFan) -> Node {
    let mut node = FanNode::new(
        FanConfig::default(),
        fan,
        RecordingSink::new(),
        ManualClock::new(),
    );
    node.setup();
    node.run_until(10);
    node
}

#[test]
fn first_poll_publishes_observed_state() {
    let node = started(SimulatedFan::running(1));

    let state = node.observed().expect("first poll should publish");
    assert_eq!(state.speed, Speed::Low);
    assert_eq!(state.oscillation, Oscillation::Off);
    assert_eq!(state.timer, TimerSetting::Off);
    assert!(node.entity().on);
    assert_eq!(node.timer_label(), "---");
    assert_eq!(
        node.sink().events[0],
        FanEvent::Started { poll_interval_ms: 10 }
    );
}

#[test]
fn nothing_is_observed_before_the_first_poll() {
    let mut node = FanNode::new(
        FanConfig::default(),
        SimulatedFan::new(),
        RecordingSink::new(),
        ManualClock::new(),
    );
    node.setup();
    node.run_until(9);
    assert_eq!(node.observed(), None);
}

#[test]
fn speed_request_is_paced_and_then_re_observed() {
    let mut node = started(SimulatedFan::running(1));
    node.request(DesiredState::new().power(true).speed(Speed::High));

    // first step goes out at once, second 300 ms later
    assert_eq!(node.hw().received, vec![Command::SpeedStep]);
    node.run_until(309);
    assert_eq!(node.hw().received.len(), 1);
    node.run_until(310);
    assert_eq!(node.hw().received.len(), 2);

    // published state only moves once the burst is over
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::Low));
    node.run_until(359);
    assert!(node.is_processing());
    node.run_until(360);
    assert!(!node.is_processing());
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::High));
    assert_eq!(node.entity().speed, Speed::High);
}

#[test]
fn polling_is_suspended_during_a_burst() {
    let mut node = started(SimulatedFan::running(1));
    assert_eq!(node.hw().reads, 1);

    node.request(DesiredState::new().power(true).speed(Speed::High));
    node.run_until(359);
    assert_eq!(node.hw().reads, 1, "no status read while sending");

    node.run_until(360);
    assert!(node.hw().reads >= 2, "quiescence step re-reads the panel");
}

#[test]
fn request_during_burst_is_dropped() {
    let mut node = started(SimulatedFan::running(1));
    node.request(DesiredState::new().power(true).speed(Speed::Medium).oscillating(true));
    node.request(DesiredState::new().power(false));

    node.run_until(2_000);
    assert_eq!(
        node.hw().received,
        vec![Command::SpeedStep, Command::OscillateToggle]
    );
    assert!(node.hw().on);
    assert_eq!(node.sink().count(|e| *e == FanEvent::RequestDropped), 1);
}

#[test]
fn turning_back_on_resumes_from_remembered_speed() {
    let mut node = started(SimulatedFan::running(1));

    node.request(DesiredState::new().power(false));
    node.run_until(60);
    assert!(!node.entity().on);
    assert_eq!(node.entity().speed, Speed::Low);

    node.request(DesiredState::new().power(true).speed(Speed::Medium));
    node.run_until(1_000);

    assert_eq!(
        node.hw().received,
        vec![Command::PowerToggle, Command::PowerToggle, Command::SpeedStep]
    );
    assert!(node.entity().on);
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::Medium));
}

#[test]
fn burst_releases_after_spacing_plus_quiescence() {
    let mut node = started(SimulatedFan::running(1));
    node.request(DesiredState::new().power(true).speed(Speed::High).oscillating(true));
    let n = node.hw().received.len() as u64 + node.service().sequencer().queue_len() as u64;
    assert_eq!(n, 3);

    let deadline = 10 + 300 * (n - 1) + 50;
    node.run_until(deadline);
    assert!(!node.is_processing());
    assert_eq!(node.service().sequencer().queue_len(), 0);
    assert_eq!(node.sink().count(|e| *e == FanEvent::ProcessingFinished), 1);
}

#[test]
fn matching_request_sends_nothing() {
    let mut node = started(SimulatedFan::running(2));
    node.request(DesiredState::new().power(true).speed(Speed::Medium).oscillating(false));
    assert!(node.hw().received.is_empty());
    assert!(!node.is_processing());
}

#[test]
fn set_timer_button_only_works_while_running() {
    let mut node = started(SimulatedFan::new());
    node.press_set_timer();
    assert!(node.hw().received.is_empty());

    let mut node = started(SimulatedFan::running(3));
    node.press_set_timer();
    node.run_until(60);
    assert_eq!(node.hw().received, vec![Command::TimerCycle]);
    assert_eq!(node.timer_label(), "1.0h");

    node.cycle_timer();
    node.run_until(200);
    assert_eq!(node.timer_label(), "3.0h");
}

#[test]
fn timer_press_joins_a_burst_in_flight() {
    let mut node = started(SimulatedFan::running(1));
    node.request(DesiredState::new().power(true).speed(Speed::Medium));
    // queue already empty, waiting out the quiescence step
    node.press_set_timer();

    node.run_until(60);
    assert!(node.is_processing(), "timer press still pending");
    node.run_until(360);
    assert_eq!(
        node.hw().received,
        vec![Command::SpeedStep, Command::TimerCycle]
    );
    node.run_until(410);
    assert!(!node.is_processing());
    assert_eq!(node.timer_label(), "1.0h");
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::Medium));
}

#[test]
fn bus_failure_skips_one_cycle() {
    let mut node = started(SimulatedFan::running(1));
    let before = node.observed();

    node.hw_mut().fail_next_reads(1);
    node.hw_mut().level = 3;
    node.run_until(20);

    assert_eq!(node.observed(), before);
    assert!(!node.is_processing());
    assert!(
        node.sink()
            .events
            .iter()
            .any(|e| matches!(e, FanEvent::BusReadFailed(_)))
    );

    // next tick picks the change up
    node.run_until(30);
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::High));
}

#[test]
fn failed_read_at_burst_end_still_releases() {
    let mut node = started(SimulatedFan::running(1));
    node.request(DesiredState::new().power(true).speed(Speed::High));
    node.run_until(359);
    assert!(node.is_processing());

    // the quiescence re-read and the tick right after it both fail
    node.hw_mut().fail_next_reads(2);
    node.run_until(360);

    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::Low));
    assert!(!node.is_processing());
    assert_eq!(node.sink().count(|e| matches!(e, FanEvent::BusReadFailed(_))), 2);
    assert_eq!(node.sink().count(|e| *e == FanEvent::ProcessingFinished), 1);

    node.run_until(370);
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::High));
}

/// Frames hold the clock for their airtime, and the loop runs every 5 ms
/// like `main` does.  Spacing and quiescence count from the end of a
/// frame, not from when it was due.
#[test]
fn pacing_counts_from_end_of_frame() {
    let clock = ManualClock::new();
    let fan = SimulatedFan::running(1).with_airtime(clock.clone());
    let mut node = FanNode::new(FanConfig::default(), fan, RecordingSink::new(), clock.clone());
    node.setup();
    while clock.now() < 10 {
        clock.advance(5);
        node.run();
    }
    assert!(node.observed().is_some());

    node.request(DesiredState::new().power(true).speed(Speed::High));
    while clock.now() < 2_000 {
        clock.advance(5);
        node.run();
    }

    let frames = node.hw().frames.clone();
    assert_eq!(frames.len(), 2);
    let (first_start, first_end) = frames[0];
    assert_eq!(first_start, 10);
    assert!(first_end > first_start, "frame takes airtime");
    assert_eq!(frames[1].0 - first_end, 300);

    let last_end = frames[1].1;
    let resume_read = node
        .hw()
        .read_times
        .iter()
        .copied()
        .find(|t| *t >= last_end)
        .expect("panel re-read after the burst");
    assert_eq!(resume_read, last_end + 50);
    assert!(!node.is_processing());
    assert_eq!(node.observed().map(|s| s.speed), Some(Speed::High));
}

#[test]
fn external_changes_are_published_once() {
    let mut node = started(SimulatedFan::running(1));
    let changes = |node: &Node| node.sink().count(|e| matches!(e, FanEvent::StateChanged { .. }));
    assert_eq!(changes(&node), 1);

    // someone uses the handheld remote
    node.hw_mut().swing = true;
    node.run_until(100);
    assert_eq!(changes(&node), 2);
    assert!(node.entity().oscillating);
}

#[test]
fn traits_match_the_model() {
    let node = started(SimulatedFan::new());
    let t = node.traits();
    assert!(t.oscillation && t.speed && !t.direction);
    assert_eq!(t.speed_count, 3);
}
