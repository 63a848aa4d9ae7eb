/*!
The task file format (§6): a positional, whitespace-separated text
format enumerating facts, the initial cube, the goal's partial cube,
and actions.

```text
<fact-count>
<fact-count initial values, 0/1>
<fact-count goal values, -1/0/1>
<action-count>
(per action)
  <precondition-count> <precondition fact indices...>
  <fact-count effect values, -1/0/+1>
```

An effect value of `+1` adds the fact, `-1` deletes it, `0` leaves it
unchanged — the per-fact encoding named directly in spec.md §3.1.
*/

use std::io::Read;
use std::path::Path;

use crate::task::{Action, Task};
use crate::types::err::ParseError;

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            inner: input.split_whitespace(),
        }
    }

    fn next_token(&mut self) -> Result<&'a str, ParseError> {
        self.inner.next().ok_or(ParseError::UnexpectedEof)
    }

    fn next_usize(&mut self) -> Result<usize, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }

    fn next_u32(&mut self) -> Result<u32, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }

    fn next_i8(&mut self) -> Result<i8, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }
}

/// Reads a task from anything [Read], e.g. an opened task file.
pub fn read_task(mut reader: impl Read) -> Result<Task, ParseError> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|_| ParseError::NoTaskFile)?;

    let mut tokens = Tokens::new(&buf);

    let fact_count = tokens.next_usize()?;

    let mut initial = Vec::with_capacity(fact_count);
    for _ in 0..fact_count {
        initial.push(tokens.next_u32()? != 0);
    }

    let mut goal = Vec::with_capacity(fact_count);
    for _ in 0..fact_count {
        let v = tokens.next_i8()?;
        if !(-1..=1).contains(&v) {
            return Err(ParseError::BadInteger);
        }
        goal.push(v);
    }

    let action_count = tokens.next_usize()?;
    let mut actions = Vec::with_capacity(action_count);
    for _ in 0..action_count {
        let pre_count = tokens.next_usize()?;
        let mut pre = Vec::with_capacity(pre_count);
        for _ in 0..pre_count {
            let f = tokens.next_u32()?;
            if f as usize >= fact_count {
                return Err(ParseError::IndexOutOfBounds);
            }
            pre.push(f);
        }

        let mut add = Vec::new();
        let mut del = Vec::new();
        for fact in 0..fact_count {
            match tokens.next_i8()? {
                1 => add.push(fact as u32),
                -1 => del.push(fact as u32),
                0 => {}
                _ => return Err(ParseError::BadInteger),
            }
        }

        actions.push(Action { pre, add, del });
    }

    Task::new(fact_count, actions, initial, goal).ok_or(ParseError::IndexOutOfBounds)
}

/// Reads a task from a file path, expanding `$NAME` references the way
/// [crate::cli] does for both task and certificate paths (§6).
pub fn read_task_file(path: &Path) -> Result<Task, ParseError> {
    let file = std::fs::File::open(path).map_err(|_| ParseError::NoTaskFile)?;
    read_task(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_fact_task() {
        // 1 fact, initial false, goal true, 1 action (no pre, adds fact 0)
        let text = "1\n0\n1\n1\n0\n1\n";
        let task = read_task(text.as_bytes()).unwrap();
        assert_eq!(task.fact_count(), 1);
        assert_eq!(task.action_count(), 1);
        assert!(!task.initial()[0]);
        assert_eq!(task.goal()[0], 1);
        assert_eq!(task.action(0).add, vec![0]);
    }

    #[test]
    fn rejects_out_of_range_precondition() {
        let text = "1\n0\n-1\n1\n1 5\n0\n";
        assert!(matches!(
            read_task(text.as_bytes()),
            Err(ParseError::IndexOutOfBounds)
        ));
    }
}
