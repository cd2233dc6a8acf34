//! Reply text shared by console and GUI front-ends.

use crate::model::moment::format_date;
use crate::model::task::Task;
use chrono::NaiveDate;

pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
pub const EMPTY_LIST: &str = "No tasks in your list.";
pub const NOTHING_ON_DATE: &str = "No tasks on this date.";

const LOGO: &str = r" _                     _____         _
| |    __ _ _____   _|_   _|_ _ ___| | __
| |   / _` |_  / | | | | |/ _` / __| |/ /
| |__| (_| |/ /| |_| | | | (_| \__ \   <
|_____\__,_/___|\__, | |_|\__,_|___/_|\_\
                |___/
";

pub fn added(task: &Task, count: usize) -> String {
    format!("Got it. I've added this task:\n{task}\nNow you have {count} tasks in the list.")
}

pub fn marked(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n{task}")
}

pub fn unmarked(task: &Task) -> String {
    format!("OK, I've marked this task as not done yet:\n{task}")
}

pub fn removed(task: &Task, count: usize) -> String {
    format!("Noted. I've removed this task:\n{task}\nNow you have {count} tasks in the list.")
}

/// `header` followed by one `N.<task>` line per entry, or [`EMPTY_LIST`].
pub fn numbered<'a>(header: &str, entries: impl IntoIterator<Item = (usize, &'a Task)>) -> String {
    let lines = entries
        .into_iter()
        .map(|(number, task)| format!("{number}.{task}"))
        .collect::<Vec<_>>();
    if lines.is_empty() {
        return EMPTY_LIST.to_string();
    }
    format!("{header}\n{}", lines.join("\n"))
}

/// Tasks on `date`, numbered by their position in the full list.
pub fn on_date<'a>(date: NaiveDate, entries: impl IntoIterator<Item = (usize, &'a Task)>) -> String {
    let entries = entries.into_iter().collect::<Vec<_>>();
    if entries.is_empty() {
        return NOTHING_ON_DATE.to_string();
    }
    numbered(
        &format!("Here are the tasks on {}:", format_date(date)),
        entries,
    )
}

pub fn persistence_warning(reason: &str) -> String {
    format!("Warning: could not save tasks ({reason}). Continuing in memory only.")
}

pub fn greeting(task_count: usize) -> String {
    let noun = if task_count == 1 { "task" } else { "tasks" };
    format!(
        "{LOGO}\nHello! I'm LazyTask.\nYou have {task_count} {noun} in your list.\n\
         Try: todo, deadline, event, list, find, on, sort. Type 'bye' to exit."
    )
}
