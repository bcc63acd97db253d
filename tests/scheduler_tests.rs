mod common;
use chrono::Duration as ChronoDuration;
use common::{at, monday, tod};
use rtimeprompt::core::clock::ManualClock;
use rtimeprompt::core::dispatcher::Dispatcher;
use rtimeprompt::core::schedule::ScheduleTable;
use rtimeprompt::core::scheduler::{SchedulerLoop, SchedulerState};
use rtimeprompt::core::status::{NoStatus, status_feed};
use rtimeprompt::models::prompt::PromptOrigin;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn three_checkpoints() -> ScheduleTable {
    ScheduleTable::new(vec![tod("09:30"), tod("10:00"), tod("10:30")])
}

fn scheduler(clock: &ManualClock, dispatcher: &Dispatcher, catch_up: bool) -> SchedulerLoop {
    SchedulerLoop::new(
        three_checkpoints(),
        dispatcher.requester(),
        Arc::new(NoStatus),
        Arc::new(clock.clone()),
        Duration::from_millis(10),
        catch_up,
    )
}

fn drain_origins(dispatcher: &Dispatcher) -> Vec<PromptOrigin> {
    std::iter::from_fn(|| dispatcher.try_next()).map(|e| e.origin).collect()
}

#[test]
fn test_first_poll_fires_elapsed_checkpoints_once_in_order() {
    let clock = ManualClock::new(monday(10, 15));
    let dispatcher = Dispatcher::new();
    let mut sched = scheduler(&clock, &dispatcher, true);

    let report = sched.poll_once();
    assert_eq!(report.fired, vec![tod("09:30"), tod("10:00")]);
    assert_eq!(report.next_checkpoint, Some(tod("10:30")));
    assert_eq!(
        drain_origins(&dispatcher),
        vec![
            PromptOrigin::Scheduled(tod("09:30")),
            PromptOrigin::Scheduled(tod("10:00"))
        ]
    );

    // second poll inside the same half hour
    clock.advance(ChronoDuration::minutes(5));
    assert!(sched.poll_once().fired.is_empty());
    assert!(dispatcher.try_next().is_none());
}

#[test]
fn test_without_catch_up_only_future_checkpoints_fire() {
    let clock = ManualClock::new(monday(10, 15));
    let dispatcher = Dispatcher::new();
    let mut sched = scheduler(&clock, &dispatcher, false);

    assert!(sched.poll_once().fired.is_empty());
    clock.set(monday(10, 30));
    assert_eq!(sched.poll_once().fired, vec![tod("10:30")]);
    assert_eq!(drain_origins(&dispatcher).len(), 1);
}

#[test]
fn test_missed_wakes_raise_one_prompt_per_checkpoint() {
    let clock = ManualClock::new(monday(9, 20));
    let dispatcher = Dispatcher::new();
    let mut sched = scheduler(&clock, &dispatcher, true);

    assert!(sched.poll_once().fired.is_empty());
    clock.set(monday(10, 5));
    assert_eq!(sched.poll_once().fired, vec![tod("09:30"), tod("10:00")]);
    assert_eq!(dispatcher.pending(), 2);
}

#[test]
fn test_weekend_checkpoints_are_suppressed() {
    // 2024-01-13 is a Saturday
    let clock = ManualClock::new(at(2024, 1, 13, 10, 15));
    let dispatcher = Dispatcher::new();
    let mut sched = scheduler(&clock, &dispatcher, true);

    let report = sched.poll_once();
    assert!(report.fired.is_empty());
    assert_eq!(report.suppressed, vec![tod("09:30"), tod("10:00")]);
    assert!(dispatcher.try_next().is_none());

    // Monday morning: only Monday's checkpoints
    clock.set(at(2024, 1, 15, 9, 31));
    assert_eq!(sched.poll_once().fired, vec![tod("09:30")]);
}

#[test]
fn test_backward_clock_jump_does_not_refire() {
    let clock = ManualClock::new(monday(10, 1));
    let dispatcher = Dispatcher::new();
    let mut sched = scheduler(&clock, &dispatcher, true);

    assert_eq!(sched.poll_once().fired.len(), 2);
    clock.set(monday(9, 10));
    assert!(sched.poll_once().fired.is_empty());
    clock.set(monday(10, 2));
    assert!(sched.poll_once().fired.is_empty());
    assert_eq!(dispatcher.pending(), 2);
}

#[test]
fn test_status_is_published_every_poll() {
    let clock = ManualClock::new(monday(8, 0));
    let dispatcher = Dispatcher::new();
    let (feed, statuses) = status_feed();
    let mut sched = SchedulerLoop::new(
        three_checkpoints(),
        dispatcher.requester(),
        Arc::new(feed),
        Arc::new(clock.clone()),
        Duration::from_millis(10),
        true,
    );

    sched.poll_once();
    let status = statuses.try_recv().unwrap();
    assert_eq!(status.now, monday(8, 0));
    assert_eq!(status.next_checkpoint, Some(tod("09:30")));

    clock.set(monday(18, 0));
    sched.poll_once();
    assert_eq!(statuses.try_recv().unwrap().next_checkpoint, None);
}

#[test]
fn test_unread_status_is_replaced_by_the_newest() {
    let clock = ManualClock::new(monday(8, 0));
    let dispatcher = Dispatcher::new();
    let (feed, statuses) = status_feed();
    let mut sched = SchedulerLoop::new(
        three_checkpoints(),
        dispatcher.requester(),
        Arc::new(feed),
        Arc::new(clock.clone()),
        Duration::from_millis(10),
        true,
    );

    // the foreground is busy with a prompt for three polls
    sched.poll_once();
    clock.set(monday(9, 45));
    sched.poll_once();
    clock.set(monday(10, 15));
    sched.poll_once();

    let status = statuses.try_recv().unwrap();
    assert_eq!(status.now, monday(10, 15));
    assert_eq!(status.next_checkpoint, Some(tod("10:30")));
    assert!(statuses.try_recv().is_err());
}

#[test]
fn test_spawned_loop_fires_and_stops_promptly() {
    let clock = ManualClock::new(monday(10, 15));
    let dispatcher = Dispatcher::new();
    let mut handle = scheduler(&clock, &dispatcher, true).spawn().unwrap();
    assert_eq!(handle.state(), SchedulerState::Running);

    let first = dispatcher.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
    let second = dispatcher.receiver().recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first.origin, PromptOrigin::Scheduled(tod("09:30")));
    assert_eq!(second.origin, PromptOrigin::Scheduled(tod("10:00")));

    // prompts still queued: stopping must not wait on them
    clock.set(monday(10, 45));
    let started = Instant::now();
    handle.stop();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(handle.state(), SchedulerState::Stopped);

    // nothing is raised after stop
    let queued = dispatcher.discard_pending();
    clock.set(monday(23, 0));
    std::thread::sleep(Duration::from_millis(50));
    assert!(queued <= 1);
    assert!(dispatcher.try_next().is_none());
}

#[test]
fn test_dropping_the_handle_stops_the_loop() {
    let clock = ManualClock::new(monday(8, 0));
    let dispatcher = Dispatcher::new();
    let handle = scheduler(&clock, &dispatcher, true).spawn().unwrap();
    drop(handle);

    clock.set(monday(11, 0));
    std::thread::sleep(Duration::from_millis(50));
    assert!(dispatcher.try_next().is_none());
}
