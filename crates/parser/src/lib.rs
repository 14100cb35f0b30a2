#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Build-file instruction parser
//!
//! Turns raw build-file text into an ordered sequence of typed
//! [`Instruction`] values. The contract is deliberately narrow:
//!
//! ```text
//! parse(text) -> Result<Vec<Instruction>, ParseError>
//! ```
//!
//! Directives this frontend does not recognize become
//! [`Instruction::Other`]; rejecting those is the translator's job, so
//! that an evolving upstream directive set surfaces as an explicit
//! translation error instead of a parse failure.

mod args;
mod duration;
mod lines;

use df2b_errors::ParseError;
use df2b_types::{Instruction, KeyValue};
use std::time::Duration;
use tracing::debug;

use crate::args::{parse_json_array, parse_pairs, split_quoted, unquote};
use crate::duration::parse_duration;
use crate::lines::{fold, LogicalLine};

/// Parse build-file text into an ordered instruction sequence.
///
/// # Errors
///
/// Returns the first `ParseError` encountered; a syntax error anywhere
/// in the text is fatal to the whole stage.
pub fn parse(text: &str) -> Result<Vec<Instruction>, ParseError> {
    let folded = fold(text)?;
    let mut instructions = Vec::with_capacity(folded.len());
    for logical in folded {
        instructions.push(parse_line(&logical)?);
    }
    Ok(instructions)
}

fn parse_line(logical: &LogicalLine) -> Result<Instruction, ParseError> {
    let line = logical.line;
    let (word, rest) = match logical.text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (logical.text.as_str(), ""),
    };
    let directive = word.to_ascii_uppercase();

    match directive.as_str() {
        "FROM" => parse_from(rest, line),
        "ENV" => parse_env(rest, line),
        "LABEL" => Ok(Instruction::Label {
            pairs: parse_pairs(rest, "LABEL", line)?,
        }),
        "WORKDIR" => {
            require(rest, "WORKDIR", 1, line)?;
            Ok(Instruction::Workdir {
                path: rest.to_string(),
            })
        }
        "EXPOSE" => {
            require(rest, "EXPOSE", 1, line)?;
            Ok(Instruction::Expose {
                ports: rest.split_whitespace().map(str::to_string).collect(),
            })
        }
        "STOPSIGNAL" => {
            require(rest, "STOPSIGNAL", 1, line)?;
            Ok(Instruction::StopSignal {
                signal: rest.to_string(),
            })
        }
        "USER" => {
            require(rest, "USER", 1, line)?;
            Ok(Instruction::User {
                user: rest.to_string(),
            })
        }
        "VOLUME" => parse_volume(rest, line),
        "ARG" => parse_arg(rest, line),
        "ONBUILD" => {
            require(rest, "ONBUILD", 1, line)?;
            Ok(Instruction::OnBuild {
                expression: rest.to_string(),
            })
        }
        "ADD" => {
            let (sources, dest, chown, _) = parse_paths_with_options(rest, "ADD", false, line)?;
            Ok(Instruction::Add {
                sources,
                dest,
                chown,
            })
        }
        "COPY" => {
            let (sources, dest, chown, from) = parse_paths_with_options(rest, "COPY", true, line)?;
            Ok(Instruction::Copy {
                sources,
                dest,
                from,
                chown,
            })
        }
        "HEALTHCHECK" => parse_healthcheck(rest, line),
        "RUN" => {
            require(rest, "RUN", 1, line)?;
            let (shell, tokens) = parse_command_forms(rest);
            Ok(Instruction::Run { shell, tokens })
        }
        "CMD" => {
            let (shell, tokens) = parse_optional_command(rest);
            Ok(Instruction::Cmd { shell, tokens })
        }
        "ENTRYPOINT" => {
            let (shell, tokens) = parse_optional_command(rest);
            Ok(Instruction::Entrypoint { shell, tokens })
        }
        "SHELL" => {
            if !rest.starts_with('[') {
                return Err(ParseError::JsonArrayRequired {
                    directive: "SHELL".to_string(),
                    line,
                });
            }
            Ok(Instruction::Shell {
                tokens: parse_json_array(rest, line)?,
            })
        }
        "MAINTAINER" => {
            require(rest, "MAINTAINER", 1, line)?;
            Ok(Instruction::Maintainer {
                name: rest.to_string(),
            })
        }
        _ => Ok(Instruction::Other {
            name: directive,
            arguments: rest.to_string(),
        }),
    }
}

fn require(rest: &str, directive: &str, required: usize, line: usize) -> Result<(), ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument {
            directive: directive.to_string(),
            required,
            line,
        });
    }
    Ok(())
}

fn parse_from(rest: &str, line: usize) -> Result<Instruction, ParseError> {
    let mut tokens = rest.split_whitespace().peekable();

    // Multi-platform resolution is out of scope; accept and discard.
    while let Some(token) = tokens.peek().copied() {
        if let Some(platform) = token.strip_prefix("--platform=") {
            debug!(platform, "ignoring FROM platform selector");
            tokens.next();
        } else {
            break;
        }
    }

    let Some(base) = tokens.next() else {
        return Err(ParseError::MissingArgument {
            directive: "FROM".to_string(),
            required: 1,
            line,
        });
    };

    let alias = match tokens.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case("as") => match tokens.next() {
            Some(alias) => alias.to_string(),
            None => {
                return Err(ParseError::MissingArgument {
                    directive: "FROM".to_string(),
                    required: 3,
                    line,
                })
            }
        },
        _ => String::new(),
    };

    Ok(Instruction::Stage {
        base: base.to_string(),
        alias,
    })
}

fn parse_env(rest: &str, line: usize) -> Result<Instruction, ParseError> {
    require(rest, "ENV", 1, line)?;

    // Legacy one-pair form: `ENV KEY value with spaces`. The modern
    // form is recognized by `=` inside the first word.
    let first = rest.split_whitespace().next().unwrap_or_default();
    if first.contains('=') {
        Ok(Instruction::Env {
            pairs: parse_pairs(rest, "ENV", line)?,
        })
    } else {
        let value = rest[first.len()..].trim_start();
        Ok(Instruction::Env {
            pairs: vec![KeyValue::new(first, value)],
        })
    }
}

fn parse_volume(rest: &str, line: usize) -> Result<Instruction, ParseError> {
    require(rest, "VOLUME", 1, line)?;
    let paths = if rest.starts_with('[') {
        parse_json_array(rest, line)?
    } else {
        split_quoted(rest, "VOLUME", line)?
    };
    if paths.is_empty() {
        return Err(ParseError::MissingArgument {
            directive: "VOLUME".to_string(),
            required: 1,
            line,
        });
    }
    Ok(Instruction::Volume { paths })
}

fn parse_arg(rest: &str, line: usize) -> Result<Instruction, ParseError> {
    require(rest, "ARG", 1, line)?;
    let spec = rest.split_whitespace().next().unwrap_or_default();
    // `ARG K` (no default), `ARG K=` (explicit empty default) and
    // `ARG K=v` are three distinct declarations.
    match spec.split_once('=') {
        Some((name, default)) => Ok(Instruction::Arg {
            name: name.to_string(),
            default: Some(unquote(default).to_string()),
        }),
        None => Ok(Instruction::Arg {
            name: spec.to_string(),
            default: None,
        }),
    }
}

fn parse_paths_with_options(
    rest: &str,
    directive: &str,
    allow_from: bool,
    line: usize,
) -> Result<(Vec<String>, String, String, String), ParseError> {
    require(rest, directive, 2, line)?;

    let mut chown = String::new();
    let mut from = String::new();
    let mut remainder = rest;

    loop {
        let trimmed = remainder.trim_start();
        if !trimmed.starts_with("--") {
            remainder = trimmed;
            break;
        }
        let (option, tail) = match trimmed.split_once(char::is_whitespace) {
            Some((option, tail)) => (option, tail),
            None => (trimmed, ""),
        };
        if let Some(value) = option.strip_prefix("--chown=") {
            chown = unquote(value).to_string();
        } else if allow_from && option.starts_with("--from=") {
            from = option["--from=".len()..].to_string();
        } else {
            return Err(ParseError::UnknownOption {
                directive: directive.to_string(),
                option: option.to_string(),
                line,
            });
        }
        remainder = tail;
    }

    let mut paths = if remainder.starts_with('[') {
        parse_json_array(remainder, line)?
    } else {
        split_quoted(remainder, directive, line)?
    };

    if paths.len() < 2 {
        return Err(ParseError::MissingArgument {
            directive: directive.to_string(),
            required: 2,
            line,
        });
    }
    let dest = paths.pop().unwrap_or_default();
    Ok((paths, dest, chown, from))
}

fn parse_healthcheck(rest: &str, line: usize) -> Result<Instruction, ParseError> {
    require(rest, "HEALTHCHECK", 1, line)?;

    if rest.eq_ignore_ascii_case("none") {
        return Ok(Instruction::Healthcheck {
            test: vec!["NONE".to_string()],
            interval: Duration::ZERO,
            timeout: Duration::ZERO,
            start_period: Duration::ZERO,
            retries: 0,
        });
    }

    let mut interval = Duration::ZERO;
    let mut timeout = Duration::ZERO;
    let mut start_period = Duration::ZERO;
    let mut retries = 0u32;
    let mut remainder = rest;

    loop {
        let trimmed = remainder.trim_start();
        if !trimmed.starts_with("--") {
            remainder = trimmed;
            break;
        }
        let (option, tail) = match trimmed.split_once(char::is_whitespace) {
            Some((option, tail)) => (option, tail),
            None => (trimmed, ""),
        };
        if let Some(value) = option.strip_prefix("--interval=") {
            interval = parse_duration(value, line)?;
        } else if let Some(value) = option.strip_prefix("--timeout=") {
            timeout = parse_duration(value, line)?;
        } else if let Some(value) = option.strip_prefix("--start-period=") {
            start_period = parse_duration(value, line)?;
        } else if let Some(value) = option.strip_prefix("--retries=") {
            retries = value.parse().map_err(|_| ParseError::InvalidNumber {
                value: value.to_string(),
                line,
            })?;
        } else {
            return Err(ParseError::UnknownOption {
                directive: "HEALTHCHECK".to_string(),
                option: option.to_string(),
                line,
            });
        }
        remainder = tail;
    }

    let (keyword, command) = match remainder.split_once(char::is_whitespace) {
        Some((keyword, command)) => (keyword, command.trim()),
        None => (remainder, ""),
    };
    if !keyword.eq_ignore_ascii_case("cmd") {
        return Err(ParseError::MissingArgument {
            directive: "HEALTHCHECK".to_string(),
            required: 1,
            line,
        });
    }
    require(command, "HEALTHCHECK", 2, line)?;

    // Exec-form probes keep their argv; shell-form probes collapse to a
    // single CMD-SHELL payload, mirroring the upstream parser.
    let test = if command.starts_with('[') {
        let mut test = vec!["CMD".to_string()];
        test.extend(parse_json_array(command, line)?);
        test
    } else {
        vec!["CMD-SHELL".to_string(), command.to_string()]
    };

    Ok(Instruction::Healthcheck {
        test,
        interval,
        timeout,
        start_period,
        retries,
    })
}

/// RUN form selection: a leading JSON array of strings is exec form;
/// anything else is shell form carried as one token.
fn parse_command_forms(rest: &str) -> (bool, Vec<String>) {
    if rest.starts_with('[') {
        if let Ok(tokens) = serde_json::from_str::<Vec<String>>(rest) {
            return (false, tokens);
        }
    }
    (true, vec![rest.to_string()])
}

/// CMD/ENTRYPOINT variant of the same rule, with the absent-arguments
/// case preserved as `None` rather than an empty list.
fn parse_optional_command(rest: &str) -> (bool, Option<Vec<String>>) {
    if rest.is_empty() {
        return (false, None);
    }
    let (shell, tokens) = parse_command_forms(rest);
    (shell, Some(tokens))
}
