//! End-to-end command scenarios against fake supervisors

use std::time::Duration;

use svctl_tests::{Initial, TestServiceTree, wait_for_control, wait_for_pid_change};

const WAIT: Duration = Duration::from_secs(2);

fn line_for<'a>(lines: &'a [String], name: &str) -> &'a str {
    let prefix = format!("{name} ");
    match lines.iter().find(|l| l.starts_with(&prefix)) {
        Some(line) => line,
        None => panic!("no line for {name} in {lines:?}"),
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// `u r0 r1` brings both services up, writing `u` once to each.
#[tokio::test]
async fn up_starts_both_services() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("u r0 r1").await;

    let lines = output.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    for name in ["r0", "r1"] {
        let line = line_for(&lines, name);
        assert!(
            line.starts_with(&format!("{name}   RUNNING (pid 1001)   ")),
            "{line}"
        );
        assert!(line.ends_with('s'));
        assert_eq!(tree.supervisor(name).received(), b"u");
    }
    assert!(tree.supervisor("o").received().is_empty());
}

/// `restart r1` writes `tcu` and reports the new pid.
#[tokio::test]
async fn restart_replaces_process() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.supervised("r1", Initial::Running).unwrap();
    let before = tree.supervisor("r1").pid();
    let (mut controller, output) = tree.controller();

    controller.dispatch("restart r1").await;

    let sup = tree.supervisor("r1");
    assert_eq!(sup.received(), b"tcu");
    let after = wait_for_pid_change(sup, before, WAIT).await.unwrap();
    assert_eq!(after, before + 1);
    let lines = output.lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with(&format!("r1   RUNNING (pid {})   ", sup.pid())),
        "{}",
        lines[0]
    );
}

/// `reload r1` sends HUP and keeps the process.
#[tokio::test]
async fn reload_keeps_pid() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.supervised("r1", Initial::Running).unwrap();
    let before = tree.supervisor("r1").pid();
    let (mut controller, output) = tree.controller();

    controller.dispatch("reload r1").await;

    let sup = tree.supervisor("r1");
    wait_for_control(sup, b"h", WAIT).await.unwrap();
    assert_eq!(sup.pid(), before);
    let lines = output.lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with(&format!("r1   RUNNING (pid {before})   ")),
        "{}",
        lines[0]
    );
}

#[tokio::test]
async fn down_stops_service() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.supervised("r0", Initial::Running).unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("stop r0").await;

    assert_eq!(tree.supervisor("r0").received(), b"d");
    let lines = output.lines();
    assert!(lines[0].starts_with("r0   STOPPED   "), "{}", lines[0]);
}

#[tokio::test]
async fn once_runs_without_restart() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("once o").await;

    let sup = tree.supervisor("o");
    assert_eq!(sup.received(), b"o");
    assert_eq!(sup.status().want, b'd');
    assert!(output.lines()[0].starts_with("o   RUNNING (pid 1001)   "));
}

#[tokio::test]
async fn pause_then_continue() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.supervised("r0", Initial::Running).unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("pause r0").await;
    assert!(tree.supervisor("r0").status().is_paused());

    controller.dispatch("cont r0").await;
    let sup = tree.supervisor("r0");
    assert!(!sup.status().is_paused());
    assert_eq!(sup.received(), b"pc");
    assert_eq!(output.lines().len(), 2);
}

/// Nothing is written when runsv already wants the service up.
#[tokio::test]
async fn redundant_up_is_not_written() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.supervised("r0", Initial::Running).unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("up r0").await;

    assert!(tree.supervisor("r0").received().is_empty());
    assert!(output.lines()[0].starts_with("r0   RUNNING (pid 1000)   "));
}

/// A service matched by two patterns gets one waiter.
#[tokio::test]
async fn overlapping_patterns_write_once() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("up r* r0").await;

    assert_eq!(tree.supervisor("r0").received(), b"u");
    assert_eq!(tree.supervisor("r1").received(), b"u");
    assert_eq!(output.lines().len(), 2);
}

// ============================================================================
// Failures
// ============================================================================

/// `u w` without `supervise/ok` reports the probe failure and never
/// touches `control`.
#[tokio::test]
async fn missing_supervisor_reports_error() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("u w").await;

    assert_eq!(output.lines(), ["w   ERROR   unable to open supervise/ok"]);
    assert!(!tree.base().join("w/supervise/control").exists());
}

#[tokio::test]
async fn unknown_action() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("n w").await;

    assert_eq!(output.lines(), ["n: unable to find action"]);
}

#[tokio::test]
async fn unmatched_service() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("u i").await;

    assert_eq!(output.lines(), ["i: unable to find service"]);
    for name in ["r0", "r1", "o"] {
        assert!(tree.supervisor(name).received().is_empty());
    }
}

/// A supervisor that never acts makes the waiter give up after 7 seconds.
#[tokio::test]
async fn unresponsive_supervisor_times_out() {
    let mut tree = TestServiceTree::new().unwrap();
    tree.ignoring("s", Initial::Stopped).unwrap();
    let (mut controller, output) = tree.controller();

    let started = std::time::Instant::now();
    controller.dispatch("up s").await;

    assert!(started.elapsed() >= Duration::from_secs(7));
    assert_eq!(tree.supervisor("s").received(), b"u");
    let lines = output.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("TIMEOUT: s   STOPPED   "), "{}", lines[0]);
}

// ============================================================================
// Meta commands
// ============================================================================

#[tokio::test]
async fn help_for_one_action() {
    let tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("help up").await;
    assert_eq!(
        output.take(),
        [
            "up NAMES...   Starts service(s) with matching NAMES.",
            "              NAMES support globing with '*' and '?'.",
        ]
    );

    controller.dispatch("help wrongaction").await;
    assert_eq!(output.take(), ["wrongaction: unable to find action"]);
}

#[tokio::test]
async fn status_lists_services_and_logs() {
    let mut tree = TestServiceTree::standard().unwrap();
    tree.supervised("r0/log", Initial::Running).unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("status").await;

    let lines = output.lines();
    let names: Vec<&str> = lines
        .iter()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(names, ["o", "r0", "r0/log", "r1", "w"]);
    assert!(lines[2].starts_with("r0/log   RUNNING (pid 1000)   "), "{}", lines[2]);
    assert!(lines[4].starts_with("w        ERROR   "), "{}", lines[4]);
}

#[tokio::test]
async fn status_after_supervisor_exit() {
    let mut tree = TestServiceTree::standard().unwrap();
    let (mut controller, output) = tree.controller();

    controller.dispatch("status r0").await;
    assert!(output.take()[0].starts_with("r0   STOPPED   "));

    tree.detach("r0");
    controller.dispatch("status r0").await;
    assert_eq!(output.take(), ["r0   ERROR   unable to open supervise/ok"]);
}
