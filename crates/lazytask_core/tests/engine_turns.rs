use lazytask_core::{DuplicatePolicy, Engine, EngineConfig, TaskFile, TaskList};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> (Engine, PathBuf) {
    let path = dir.path().join("data").join("tasks.txt");
    (Engine::open(&EngineConfig::new(&path)), path)
}

fn saved(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn todo_adds_one_not_done_task_and_persists() {
    let dir = TempDir::new().unwrap();
    let (mut engine, path) = engine_in(&dir);

    let reply = engine.handle("todo read book");

    assert_eq!(
        reply,
        "Got it. I've added this task:\n[T][ ] read book\nNow you have 1 tasks in the list."
    );
    assert_eq!(engine.tasks().size(), 1);
    assert!(!engine.tasks().get(1).unwrap().is_done());
    assert_eq!(saved(&path), "T | 0 | read book\n");
}

#[test]
fn deadline_reply_uses_pretty_date() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine_in(&dir);

    let reply = engine.handle("deadline submit report /by 2019-12-02 1800");

    assert!(reply.contains("[D][ ] submit report (by: Dec 2 2019 18:00)"));
}

#[test]
fn mark_unmark_and_delete_replies() {
    let dir = TempDir::new().unwrap();
    let (mut engine, path) = engine_in(&dir);
    engine.handle("todo a");
    engine.handle("todo b");

    assert_eq!(
        engine.handle("mark 2"),
        "Nice! I've marked this task as done:\n[T][X] b"
    );
    assert_eq!(saved(&path), "T | 0 | a\nT | 1 | b\n");
    assert_eq!(
        engine.handle("unmark 2"),
        "OK, I've marked this task as not done yet:\n[T][ ] b"
    );
    assert_eq!(
        engine.handle("delete 1"),
        "Noted. I've removed this task:\n[T][ ] a\nNow you have 1 tasks in the list."
    );
    assert_eq!(saved(&path), "T | 0 | b\n");
}

#[test]
fn out_of_range_index_leaves_store_and_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let (mut engine, path) = engine_in(&dir);
    engine.handle("todo a");
    engine.handle("todo b");
    let before = saved(&path);

    let reply = engine.handle("mark 99");

    assert_eq!(
        reply,
        "Error: Task number 99 is out of range. Valid range: 1..2."
    );
    assert_eq!(engine.tasks().size(), 2);
    assert!(!engine.tasks().get(2).unwrap().is_done());
    assert_eq!(saved(&path), before);
}

#[test]
fn parse_errors_are_reported_as_text() {
    let dir = TempDir::new().unwrap();
    let (mut engine, path) = engine_in(&dir);

    assert!(engine.handle("deadline /by 2019-12-02").starts_with("Error: "));
    assert!(engine.handle("mark x").starts_with("Error: "));
    assert!(engine
        .handle("event x /from 2019-12-03 /to 2019-12-02")
        .starts_with("Error: event end"));
    assert_eq!(engine.tasks().size(), 0);
    assert!(!path.exists());
}

#[test]
fn list_and_find_format_numbered_lines() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine_in(&dir);

    assert_eq!(engine.handle("list"), "No tasks in your list.");
    engine.handle("todo read book");
    engine.handle("todo buy milk");
    engine.handle("deadline return BOOK /by 2019-12-02");

    assert_eq!(
        engine.handle("list"),
        "Here are the tasks in your list:\n1.[T][ ] read book\n2.[T][ ] buy milk\n\
         3.[D][ ] return BOOK (by: Dec 2 2019)"
    );
    assert_eq!(
        engine.handle("find book"),
        "Here are the matching tasks in your list:\n1.[T][ ] read book\n\
         2.[D][ ] return BOOK (by: Dec 2 2019)"
    );
    assert_eq!(engine.handle("find xyz"), "No tasks in your list.");
}

#[test]
fn on_lists_only_tasks_on_that_date() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine_in(&dir);
    engine.handle("todo unrelated");
    engine.handle("deadline return book /by 2019-12-02 1800");
    engine.handle("event fair /from next week /to later");

    assert_eq!(
        engine.handle("on 2019-12-02"),
        "Here are the tasks on Dec 2 2019:\n2.[D][ ] return book (by: Dec 2 2019 18:00)"
    );
    assert_eq!(engine.handle("on 2019-12-01"), "No tasks on this date.");
    assert!(engine.handle("on someday").starts_with("Error: "));
}

#[test]
fn sort_is_a_view_and_does_not_reorder_the_store() {
    let dir = TempDir::new().unwrap();
    let (mut engine, path) = engine_in(&dir);
    engine.handle("todo banana");
    engine.handle("todo Apple");
    engine.handle("deadline cherry /by 2019-12-01");
    let before = saved(&path);

    assert_eq!(
        engine.handle("sort by name"),
        "Here are the tasks in your list (by name):\n1.[T][ ] Apple\n2.[T][ ] banana\n\
         3.[D][ ] cherry (by: Dec 1 2019)"
    );
    assert!(engine
        .handle("sort by time")
        .contains("1.[D][ ] cherry (by: Dec 1 2019)\n2.[T][ ] banana\n3.[T][ ] Apple"));
    assert!(engine
        .handle("sort sideways")
        .contains("1.[T][ ] banana\n2.[T][ ] Apple"));
    assert_eq!(engine.tasks().get(1).unwrap().description(), "banana");
    assert_eq!(saved(&path), before);
}

#[test]
fn duplicate_add_is_rejected_unless_allowed() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine_in(&dir);
    engine.handle("todo Read book");

    let reply = engine.handle("todo read BOOK");
    assert_eq!(
        reply,
        "Error: This task is already in your list: [T][ ] Read book"
    );
    assert_eq!(engine.tasks().size(), 1);

    let config = EngineConfig::new(dir.path().join("other.txt"))
        .with_duplicate_policy(DuplicatePolicy::Allow);
    let mut lenient = Engine::open(&config);
    lenient.handle("todo same");
    lenient.handle("todo same");
    assert_eq!(lenient.tasks().size(), 2);
}

#[test]
fn bye_signals_exit_and_blank_input_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine_in(&dir);

    let blank = engine.respond("   ");
    assert_eq!(blank.text, "");
    assert!(!blank.exit);

    let bye = engine.respond("bye");
    assert_eq!(bye.text, "Bye. Hope to see you again soon!");
    assert!(bye.exit);
}

#[test]
fn engine_reloads_previous_session() {
    let dir = TempDir::new().unwrap();
    let (mut first, path) = engine_in(&dir);
    first.handle("event meeting /from 2019-12-02 1800 /to 2019-12-02 2000");
    first.handle("mark 1");
    drop(first);

    let second = Engine::open(&EngineConfig::new(&path));

    assert_eq!(second.tasks().size(), 1);
    assert_eq!(
        second.tasks().get(1).unwrap().to_string(),
        "[E][X] meeting (from: Dec 2 2019 18:00 to: Dec 2 2019 20:00)"
    );
    assert!(second.greeting().contains("You have 1 task in your list."));
}

#[test]
fn save_failure_warns_once_and_continues_in_memory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "plain file").unwrap();
    let file = TaskFile::new(blocker.join("tasks.txt"));
    let mut engine = Engine::with_tasks(TaskList::default(), file);

    let first = engine.handle("todo a");
    assert!(first.starts_with("Got it. I've added this task:"));
    assert!(first.contains("Warning: could not save tasks"));
    assert!(!engine.is_persisting());

    let second = engine.handle("todo b");
    assert!(!second.contains("Warning"));
    assert_eq!(engine.tasks().size(), 2);
}

#[test]
fn unreadable_save_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");
    std::fs::create_dir(&path).unwrap();

    let engine = Engine::open(&EngineConfig::new(&path));

    assert_eq!(engine.tasks().size(), 0);
}
