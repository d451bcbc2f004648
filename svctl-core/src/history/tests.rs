use super::*;
use tempfile::TempDir;

#[test]
fn missing_file_is_empty() {
    let tmp = TempDir::new().unwrap();
    let history = History::load(&tmp.path().join("hist")).unwrap();
    assert!(history.is_empty());
}

#[test]
fn save_creates_directory_and_reloads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("svctl").join("hist");

    let mut history = History::new();
    history.push("u r0 r1");
    history.push("status");
    history.save(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "u r0 r1\nstatus\n");
    let loaded = History::load(&path).unwrap();
    assert_eq!(loaded.entries().collect::<Vec<_>>(), ["u r0 r1", "status"]);
}

#[test]
fn blank_and_repeated_lines_are_dropped() {
    let mut history = History::new();
    history.push("");
    history.push("   ");
    history.push("restart web");
    history.push("restart web");
    history.push("s");
    history.push("restart web");

    assert_eq!(
        history.entries().collect::<Vec<_>>(),
        ["restart web", "s", "restart web"]
    );
}

#[test]
fn oldest_entries_fall_off() {
    let mut history = History::new();
    for i in 0..HISTORY_LIMIT + 5 {
        history.push(&format!("u svc{i}"));
    }
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.entries().next(), Some("u svc5"));
}

#[test]
fn unreadable_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    // a directory cannot be read as a file
    let err = History::load(tmp.path()).unwrap_err();
    assert!(matches!(err, HistoryError::Io { .. }));
}
