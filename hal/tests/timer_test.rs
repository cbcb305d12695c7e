//! Tick counter and delay tests, with a thread standing in for the timer
//! interrupt

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use hal::timer::{TickCounter, TickDelay};

/// Clears the ticker's run flag on drop, so a panicking test body still
/// lets the ticker thread exit.
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Runs `f` while a background thread ticks `counter` every 200us.
fn with_ticker<R>(counter: &TickCounter, f: impl FnOnce() -> R) -> R {
    let running = AtomicBool::new(true);
    thread::scope(|s| {
        s.spawn(|| {
            while running.load(Ordering::Relaxed) {
                counter.tick();
                thread::sleep(Duration::from_micros(200));
            }
        });
        let _stop = StopOnDrop(&running);
        f()
    })
}

#[test]
fn test_delay_waits_for_requested_ticks() {
    let counter = TickCounter::new();
    let waited = with_ticker(&counter, || {
        let start = counter.now();
        counter.delay_ms(5);
        counter.elapsed_since(start)
    });
    assert!(waited >= 5, "returned after {} ticks", waited);
}

#[test]
fn test_delay_across_counter_wrap() {
    let counter = TickCounter::starting_at(u32::MAX - 2);
    let waited = with_ticker(&counter, || {
        let start = counter.now();
        counter.delay_ms(5);
        counter.elapsed_since(start)
    });
    assert!(waited >= 5, "returned after {} ticks", waited);
}

#[test]
fn test_delay_ns_adapter_delay_ms() {
    let counter = TickCounter::new();
    let waited = with_ticker(&counter, || {
        let mut delay = TickDelay::new(&counter);
        let start = counter.now();
        delay.delay_ms(3);
        counter.elapsed_since(start)
    });
    assert!(waited >= 3, "returned after {} ticks", waited);
}

#[test]
fn test_delay_ns_adapter_rounds_up_to_whole_ticks() {
    let counter = TickCounter::new();
    let waited = with_ticker(&counter, || {
        let mut delay = TickDelay::new(&counter);
        let start = counter.now();
        delay.delay_us(1_500);
        counter.elapsed_since(start)
    });
    assert!(waited >= 2, "returned after {} ticks", waited);
}

#[test]
fn test_shared_counter_is_visible_across_threads() {
    static TICKS: TickCounter = TickCounter::new();

    thread::spawn(|| {
        for _ in 0..1_000 {
            TICKS.tick();
        }
    })
    .join()
    .unwrap();

    assert_eq!(TICKS.now(), 1_000);
}

#[test]
fn test_ticker_stops_when_body_panics() {
    let counter = TickCounter::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_ticker(&counter, || panic!("delay assertion failed"))
    }));
    assert!(result.is_err());

    // The ticker thread has been joined, so the count no longer moves
    let settled = counter.now();
    thread::sleep(Duration::from_millis(2));
    assert_eq!(counter.now(), settled);
}
