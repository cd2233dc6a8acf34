use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lazytask(data_file: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("lazytask"));
    cmd.arg("--data-file").arg(data_file).arg("--no-log");
    cmd
}

#[test]
fn session_persists_tasks_between_runs() {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("data").join("tasks.txt");

    lazytask(&data_file)
        .write_stdin("deadline submit report /by 2019-12-02 1800\nmark 1\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[D][ ] submit report (by: Dec 2 2019 18:00)",
        ))
        .stdout(predicate::str::contains("Nice! I've marked this task as done:"));

    assert_eq!(
        std::fs::read_to_string(&data_file).unwrap(),
        "D | 1 | submit report | 2019-12-02 1800\n"
    );

    lazytask(&data_file)
        .write_stdin("list\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 1 task in your list."))
        .stdout(predicate::str::contains(
            "1.[D][X] submit report (by: Dec 2 2019 18:00)",
        ));
}

#[test]
fn command_errors_do_not_end_the_session() {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("tasks.txt");

    lazytask(&data_file)
        .write_stdin("blah\nmark 99\ntodo still works\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: I'm sorry, but I don't know what that means :-(",
        ))
        .stdout(predicate::str::contains("Error: There are no tasks in your list yet."))
        .stdout(predicate::str::contains("Now you have 1 tasks in the list."))
        .stdout(predicate::str::contains("Bye. Hope to see you again soon!"));
}

#[test]
fn allow_duplicates_env_accepts_numeric_and_word_flags() {
    for value in ["1", "yes"] {
        let temp = TempDir::new().unwrap();
        let data_file = temp.path().join("tasks.txt");

        lazytask(&data_file)
            .env("LAZYTASK_ALLOW_DUPLICATES", value)
            .write_stdin("todo a\ntodo a\nbye\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Now you have 2 tasks in the list."));

        assert_eq!(
            std::fs::read_to_string(&data_file).unwrap(),
            "T | 0 | a\nT | 0 | a\n"
        );
    }
}

#[test]
fn duplicates_are_rejected_without_env_flag() {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("tasks.txt");

    lazytask(&data_file)
        .env_remove("LAZYTASK_ALLOW_DUPLICATES")
        .write_stdin("todo a\ntodo a\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: This task is already in your list: [T][ ] a",
        ));
}

#[test]
fn help_mentions_data_file_flag() {
    Command::new(cargo::cargo_bin!("lazytask"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-file"));
}
