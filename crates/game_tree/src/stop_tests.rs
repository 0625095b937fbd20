use super::*;
use std::thread;

#[test]
fn test_new_signal_is_clear() {
    let stop = StopSignal::new();
    assert!(!stop.is_stopped());
}

#[test]
fn test_clones_share_flag() {
    let stop = StopSignal::new();
    let other = stop.clone();
    other.stop();
    assert!(stop.is_stopped());

    stop.reset();
    assert!(!other.is_stopped());
}

#[test]
fn test_stop_from_another_thread() {
    let stop = StopSignal::new();
    let remote = stop.clone();
    thread::spawn(move || remote.stop())
        .join()
        .expect("stopper thread panicked");
    assert!(stop.is_stopped());
}
