mod common;
use common::tod;
use rtimeprompt::core::dispatcher::Dispatcher;
use rtimeprompt::models::prompt::PromptOrigin;
use rtimeprompt::models::time_of_day::TimeOfDay;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_requests_are_delivered_in_order() {
    let dispatcher = Dispatcher::new();
    let requester = dispatcher.requester();

    assert!(requester.request_prompt(PromptOrigin::Scheduled(tod("09:30"))));
    assert!(requester.request_prompt(PromptOrigin::Manual));

    let first = dispatcher.try_next().unwrap();
    let second = dispatcher.try_next().unwrap();
    assert_eq!(first.origin, PromptOrigin::Scheduled(tod("09:30")));
    assert_eq!(second.origin, PromptOrigin::Manual);
    assert!(first.seq < second.seq);
    assert!(dispatcher.try_next().is_none());
}

#[test]
fn test_request_never_blocks_the_producer() {
    let dispatcher = Dispatcher::new();
    let requester = dispatcher.requester();

    let started = Instant::now();
    let producer = thread::spawn(move || {
        for _ in 0..1000 {
            requester.request_prompt(PromptOrigin::Manual);
        }
    });
    producer.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(dispatcher.pending(), 1000);
}

#[test]
fn test_background_producer_order_is_preserved() {
    let dispatcher = Dispatcher::new();
    let requester = dispatcher.requester();

    let producer = thread::spawn(move || {
        for i in 0..200u32 {
            let at = TimeOfDay::new(i / 60, i % 60).unwrap();
            requester.request_prompt(PromptOrigin::Scheduled(at));
        }
    });

    let mut seen = Vec::new();
    while seen.len() < 200 {
        match dispatcher.receiver().recv_timeout(Duration::from_secs(5)) {
            Ok(event) => seen.push(event),
            Err(e) => panic!("producer stalled: {e}"),
        }
    }
    producer.join().unwrap();

    assert!(seen.windows(2).all(|w| w[0].seq < w[1].seq));
    let origins: Vec<_> = seen.iter().map(|e| e.origin).collect();
    let expected: Vec<_> = (0..200u32)
        .map(|i| PromptOrigin::Scheduled(TimeOfDay::new(i / 60, i % 60).unwrap()))
        .collect();
    assert_eq!(origins, expected);
}

#[test]
fn test_request_after_foreground_is_gone_reports_false() {
    let dispatcher = Dispatcher::new();
    let requester = dispatcher.requester();
    drop(dispatcher);
    assert!(!requester.request_prompt(PromptOrigin::Manual));
}

#[test]
fn test_discard_pending_drops_queued_requests() {
    let dispatcher = Dispatcher::new();
    let requester = dispatcher.requester();
    for _ in 0..3 {
        requester.request_prompt(PromptOrigin::Manual);
    }
    assert_eq!(dispatcher.discard_pending(), 3);
    assert_eq!(dispatcher.pending(), 0);
}
