use super::{Command, ParseError};
use crate::model::moment::parse_query_date;
use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(\S+)(?:\s+(.*))?$").expect("valid keyword regex"));
static BY_FLAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/by\b").expect("valid /by regex"));
static FROM_FLAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/from\b").expect("valid /from regex"));
static TO_FLAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/to\b").expect("valid /to regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Parses one input line into a [`Command`].
///
/// # Errors
/// - `UnknownCommand` for empty input or an unrecognized keyword.
/// - Command-specific errors as documented on [`ParseError`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    let Some(captures) = KEYWORD_RE.captures(trimmed) else {
        return Err(ParseError::UnknownCommand(String::new()));
    };
    let keyword = captures
        .get(1)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    match keyword.as_str() {
        "bye" if body.is_empty() => Ok(Command::Bye),
        "list" if body.is_empty() => Ok(Command::List),
        "mark" => parse_index(body).map(Command::Mark),
        "unmark" => parse_index(body).map(Command::Unmark),
        "delete" => parse_index(body).map(Command::Delete),
        "todo" => parse_todo(body),
        "deadline" => parse_deadline(body),
        "event" => parse_event(body),
        "on" => parse_on(body),
        "find" => parse_find(body),
        "sort" => Ok(Command::Sort(normalize_sort_mode(body))),
        _ => Err(ParseError::UnknownCommand(trimmed.to_string())),
    }
}

fn parse_index(body: &str) -> Result<i64, ParseError> {
    body.parse::<i64>()
        .map_err(|_| ParseError::InvalidIndex(body.to_string()))
}

fn parse_todo(body: &str) -> Result<Command, ParseError> {
    if body.is_empty() {
        return Err(ParseError::EmptyDescription);
    }
    Ok(Command::Todo {
        description: body.to_string(),
    })
}

fn parse_deadline(body: &str) -> Result<Command, ParseError> {
    let by_at = single_flag(body, &BY_FLAG_RE, "deadline", "/by")?;
    let description = required_part(&body[..by_at], "deadline", "description")?;
    let by = required_part(&body[by_at + "/by".len()..], "deadline", "time")?;
    Ok(Command::Deadline { description, by })
}

fn parse_event(body: &str) -> Result<Command, ParseError> {
    let from_at = single_flag(body, &FROM_FLAG_RE, "event", "/from")?;
    let to_at = single_flag(body, &TO_FLAG_RE, "event", "/to")?;
    if to_at <= from_at {
        return Err(ParseError::MisorderedFlags {
            command: "event",
            first: "/from",
            second: "/to",
        });
    }

    let description = required_part(&body[..from_at], "event", "description")?;
    let from = required_part(&body[from_at + "/from".len()..to_at], "event", "start")?;
    let to = required_part(&body[to_at + "/to".len()..], "event", "end")?;
    Ok(Command::Event {
        description,
        from,
        to,
    })
}

fn parse_on(body: &str) -> Result<Command, ParseError> {
    parse_query_date(body)
        .map(Command::On)
        .ok_or_else(|| ParseError::InvalidDate(body.to_string()))
}

fn parse_find(body: &str) -> Result<Command, ParseError> {
    if body.is_empty() {
        return Err(ParseError::EmptyField {
            command: "find",
            field: "keyword",
        });
    }
    Ok(Command::Find(body.to_string()))
}

fn normalize_sort_mode(body: &str) -> String {
    WHITESPACE_RE.replace_all(body, " ").to_lowercase()
}

/// Byte offset of the only occurrence of `flag` in `body`.
fn single_flag(
    body: &str,
    pattern: &Regex,
    command: &'static str,
    flag: &'static str,
) -> Result<usize, ParseError> {
    let mut matches = pattern.find_iter(body);
    let first = matches
        .next()
        .ok_or(ParseError::MissingFlag { command, flag })?;
    if matches.next().is_some() {
        return Err(ParseError::DuplicateFlag { command, flag });
    }
    Ok(first.start())
}

fn required_part(
    text: &str,
    command: &'static str,
    field: &'static str,
) -> Result<String, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyField { command, field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_sort_mode, parse, single_flag, BY_FLAG_RE};
    use crate::command::{Command, ParseError};

    #[test]
    fn keyword_is_case_insensitive_and_tolerates_spacing() {
        assert_eq!(parse("  LIST  ").unwrap(), Command::List);
        assert_eq!(parse("Mark    3").unwrap(), Command::Mark(3));
        assert_eq!(
            parse("ToDo   read   book").unwrap(),
            Command::Todo {
                description: "read   book".to_string()
            }
        );
    }

    #[test]
    fn single_flag_reports_missing_and_duplicate() {
        assert_eq!(single_flag("a /BY b", &BY_FLAG_RE, "deadline", "/by"), Ok(2));
        assert!(matches!(
            single_flag("a b", &BY_FLAG_RE, "deadline", "/by"),
            Err(ParseError::MissingFlag { flag: "/by", .. })
        ));
        assert!(matches!(
            single_flag("a /by b /by c", &BY_FLAG_RE, "deadline", "/by"),
            Err(ParseError::DuplicateFlag { flag: "/by", .. })
        ));
    }

    #[test]
    fn flags_must_end_at_a_word_boundary() {
        assert_eq!(
            parse("deadline fix /bypass valve /by 2019-12-02").unwrap(),
            Command::Deadline {
                description: "fix /bypass valve".to_string(),
                by: "2019-12-02".to_string(),
            }
        );
        assert_eq!(
            parse("event plan /tomorrow /from mon /to tue").unwrap(),
            Command::Event {
                description: "plan /tomorrow".to_string(),
                from: "mon".to_string(),
                to: "tue".to_string(),
            }
        );
    }

    #[test]
    fn sort_mode_collapses_whitespace() {
        assert_eq!(normalize_sort_mode("By   NAME"), "by name");
        assert_eq!(normalize_sort_mode(""), "");
    }
}
