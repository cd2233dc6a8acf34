use chrono::NaiveDate;
use lazytask_core::{decode, decode_line, encode, Task, TaskFile, TaskType};

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::todo("read book").unwrap(),
        Task::deadline("return book", "2019-12-02 1800")
            .unwrap()
            .with_done(true),
        Task::deadline("pay rent", "end of month").unwrap(),
        Task::event("project meeting", "2019-12-02", "2019-12-03 1000").unwrap(),
    ]
}

#[test]
fn encode_produces_one_line_per_task() {
    let lines = encode(&sample_tasks());
    assert_eq!(
        lines,
        [
            "T | 0 | read book",
            "D | 1 | return book | 2019-12-02 1800",
            "D | 0 | pay rent | end of month",
            "E | 0 | project meeting | 2019-12-02 | 2019-12-03 1000",
        ]
    );
}

#[test]
fn encode_then_decode_is_lossless() {
    let tasks = sample_tasks();
    let decoded = decode(encode(&tasks));
    assert_eq!(decoded, tasks);
}

#[test]
fn decoded_done_deadline_occurs_on_its_date() {
    let task = decode_line("D | 1 | return book | 2019-12-02 1800").unwrap();

    assert_eq!(task.task_type(), TaskType::Deadline);
    assert!(task.is_done());
    assert!(task.occurs_on(NaiveDate::from_ymd_opt(2019, 12, 2).unwrap()));
    assert!(!task.occurs_on(NaiveDate::from_ymd_opt(2019, 12, 1).unwrap()));
}

#[test]
fn decode_skips_malformed_lines_and_keeps_the_rest() {
    let lines = [
        "T | 0 | read book",
        "garbage without delimiters",
        "D | 1 | return book | 2019-12-02 1800",
        "Q | 0 | unknown tag",
        "E | 0 | backwards | 2019-12-03 | 2019-12-02",
        "E | 0 | too short | 2019-12-02",
        "T | 2 | bad flag",
        "",
        "E | 1 | camp | 2019-12-02 | 2019-12-04",
        "   ",
    ];

    let tasks = decode(lines);

    let descriptions = tasks
        .iter()
        .map(|t| t.description().to_string())
        .collect::<Vec<_>>();
    assert_eq!(descriptions, ["read book", "return book", "camp"]);
}

#[test]
fn file_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let file = TaskFile::new(dir.path().join("data").join("tasks.txt"));
    let tasks = sample_tasks();
    assert_eq!(file.path(), dir.path().join("data").join("tasks.txt"));

    file.save(&tasks).unwrap();
    let loaded = file.load().unwrap();

    assert_eq!(loaded, tasks);
}

#[test]
fn file_save_overwrites_instead_of_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let file = TaskFile::new(&path);

    file.save(&sample_tasks()).unwrap();
    file.save(&[Task::todo("only one").unwrap()]).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "T | 0 | only one\n"
    );

    file.save(&[]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert!(file.load().unwrap().is_empty());
}

#[test]
fn file_load_tolerates_corruption_and_trailing_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    std::fs::write(
        &path,
        "T | 0 | one\nT | 1\nD | 0 | two | 2019-12-02\n\n\n",
    )
    .unwrap();

    let loaded = TaskFile::new(&path).load().unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].description(), "two");
}
