/*!
Hand-rolled argument parsing for the `verify` binary (§6 "CLI"):

```text
verify <task-file> <certificate-file> [--timeout=<seconds>] [--discard_formulas]
```

Paths may contain `$NAME` references, expanded from the environment:
the name runs from `$` up to (but not including) the next `/`, is
upper-cased, and looked up with [std::env::var].
*/

use std::time::Duration;

use crate::config::Config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliError {
    MissingTaskPath,
    MissingCertificatePath,
    UnknownFlag(String),
    BadTimeout(String),
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub task_path: String,
    pub certificate_path: String,
    pub config: Config,
}

/// Expands every `$NAME` reference in `path` from the environment.
pub fn expand_env(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut name = String::new();
        while let Some(&(_, next)) = chars.peek() {
            if next == '/' {
                break;
            }
            name.push(next);
            chars.next();
        }
        match std::env::var(name.to_uppercase()) {
            Ok(value) => out.push_str(&value),
            Err(_) => {
                out.push('$');
                out.push_str(&name);
            }
        }
    }
    out
}

/// Parses argv (excluding argv[0]) into a [CliConfig].
pub fn parse_args(args: &[String]) -> Result<CliConfig, CliError> {
    let mut positional = Vec::with_capacity(2);
    let mut config = Config::default();

    for arg in args {
        if let Some(rest) = arg.strip_prefix("--timeout=") {
            let secs: u64 = rest.parse().map_err(|_| CliError::BadTimeout(rest.to_string()))?;
            config.time_limit = Some(Duration::from_secs(secs));
        } else if arg == "--discard_formulas" {
            config.discard_formulas = true;
        } else if let Some(rest) = arg.strip_prefix("--") {
            return Err(CliError::UnknownFlag(rest.to_string()));
        } else {
            positional.push(arg.clone());
        }
    }

    let mut positional = positional.into_iter();
    let task_path = positional.next().ok_or(CliError::MissingTaskPath)?;
    let certificate_path = positional.next().ok_or(CliError::MissingCertificatePath)?;

    Ok(CliConfig {
        task_path: expand_env(&task_path),
        certificate_path: expand_env(&certificate_path),
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_and_flags() {
        let args: Vec<String> = vec!["task.txt", "cert.txt", "--timeout=5", "--discard_formulas"]
            .into_iter()
            .map(String::from)
            .collect();
        let cli = parse_args(&args).unwrap();
        assert_eq!(cli.task_path, "task.txt");
        assert_eq!(cli.certificate_path, "cert.txt");
        assert_eq!(cli.config.time_limit, Some(Duration::from_secs(5)));
        assert!(cli.config.discard_formulas);
    }

    #[test]
    fn expands_dollar_name_up_to_next_slash() {
        std::env::set_var("BENCH_ROOT", "/opt/bench");
        assert_eq!(expand_env("$bench_root/tasks/p01.pddl"), "/opt/bench/tasks/p01.pddl");
        std::env::remove_var("BENCH_ROOT");
    }

    #[test]
    fn rejects_missing_paths() {
        assert!(matches!(parse_args(&[]), Err(CliError::MissingTaskPath)));
        assert!(matches!(
            parse_args(&["task.txt".to_string()]),
            Err(CliError::MissingCertificatePath)
        ));
    }
}
