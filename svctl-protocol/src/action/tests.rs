use super::*;
use crate::status::{TAI_OFFSET, WANT_UP};

const START: u64 = TAI_OFFSET + 1_000;

fn status(pid: u32, state: RunState) -> Status {
    Status {
        age: START,
        nanos: 0,
        pid,
        paused: 0,
        want: if pid == 0 { WANT_DOWN } else { WANT_UP },
        term: 0,
        run_state: state,
    }
}

#[test]
fn up_requires_pid_and_running_state() {
    assert!(check(b"u", &status(10, RunState::Running), START));
    assert!(!check(b"u", &status(0, RunState::Running), START));
    assert!(!check(b"u", &status(10, RunState::Finishing), START));
    assert!(!check(b"u", &status(0, RunState::Stopped), START));
}

#[test]
fn down_requires_no_pid_and_stopped_state() {
    assert!(check(b"d", &status(0, RunState::Stopped), START));
    assert!(!check(b"d", &status(10, RunState::Running), START));
    assert!(!check(b"d", &status(0, RunState::Finishing), START));
}

#[test]
fn term_waits_for_a_fresh_record() {
    let mut s = status(10, RunState::Running);
    s.age = START - 1;
    assert!(!check(b"t", &s, START), "stale record must not satisfy term");

    s.age = START;
    assert!(check(b"t", &s, START));

    s.term = 1;
    assert!(!check(b"t", &s, START), "pending TERM must not satisfy term");
}

#[test]
fn term_on_stopped_service_that_wants_down() {
    let mut s = status(0, RunState::Stopped);
    s.age = START - 100;
    assert!(check(b"t", &s, START));
    assert!(check(b"k", &s, START));

    s.want = WANT_UP;
    assert!(!check(b"k", &s, START));
}

#[test]
fn once_rules() {
    let mut stopped = status(0, RunState::Stopped);
    stopped.age = START - 1;
    assert!(!check(b"o", &stopped, START));
    stopped.age = START + 2;
    assert!(check(b"o", &stopped, START));

    let mut running = status(10, RunState::Running);
    assert!(!check(b"o", &running, START));
    running.want = WANT_DOWN;
    assert!(check(b"o", &running, START));
}

#[test]
fn pause_and_cont_only_matter_with_a_process() {
    let mut s = status(10, RunState::Running);
    assert!(!check(b"p", &s, START));
    assert!(check(b"c", &s, START));

    s.paused = 1;
    assert!(check(b"p", &s, START));
    assert!(!check(b"c", &s, START));

    let stopped = status(0, RunState::Stopped);
    assert!(check(b"p", &stopped, START));
    assert!(check(b"c", &stopped, START));
}

#[test]
fn plain_signals_and_exit_are_fire_and_forget() {
    let s = status(0, RunState::Stopped);
    for action in [b"h", b"a", b"i", b"q", b"1", b"2", b"x"] {
        assert!(check(action, &s, u64::MAX), "{:?}", action);
    }
}

#[test]
fn restart_needs_every_byte() {
    let mut s = status(11, RunState::Running);
    assert!(check(b"tcu", &s, START));

    s.paused = 1;
    assert!(!check(b"tcu", &s, START));

    s.paused = 0;
    s.age = START - 1;
    assert!(!check(b"tcu", &s, START));
}

#[test]
fn up_stays_satisfied_as_the_service_ages() {
    let mut s = status(10, RunState::Running);
    assert!(check(b"u", &s, START));
    for age in [START + 1, START + 60, START + 86_400] {
        s.age = age;
        assert!(check(b"u", &s, START));
    }
}

#[test]
fn term_stays_satisfied_once_fresh() {
    let mut s = status(10, RunState::Running);
    for age in [START, START + 1, START + 1_000] {
        s.age = age;
        assert!(check(b"t", &s, START));
    }
}

#[test]
fn should_write_skips_what_runsv_already_wants() {
    let running = status(10, RunState::Running);
    assert!(!should_write(b"u", &running));
    assert!(should_write(b"d", &running));
    assert!(should_write(b"tcu", &running));
    assert!(should_write(b"h", &running));

    let mut stopping = status(10, RunState::Running);
    stopping.want = WANT_DOWN;
    stopping.term = 1;
    assert!(!should_write(b"d", &stopping));

    stopping.term = 0;
    assert!(should_write(b"d", &stopping));

    assert!(!should_write(b"", &running));
}

#[test]
fn unwritten_up_converges_once_runsv_catches_up() {
    let mut s = status(0, RunState::Stopped);
    s.want = WANT_UP;
    assert!(!should_write(b"u", &s));

    // runsv brings the service up on its next pass
    s.pid = 99;
    s.run_state = RunState::Running;
    assert!(check(b"u", &s, s.age));
}

#[test]
fn action_byte_mapping() {
    assert_eq!(ActionByte::from(b'u'), ActionByte::Up);
    assert_eq!(ActionByte::from(b'x'), ActionByte::Exit);
    assert_eq!(ActionByte::from(b'h'), ActionByte::Signal(b'h'));
    assert_eq!(ActionByte::from(b'1'), ActionByte::Signal(b'1'));
}
