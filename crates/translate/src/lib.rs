#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Instruction-to-command translation engine
//!
//! The core of df2b: one rule per [`Instruction`] variant, mapping its
//! structured fields to a `buildah` command line. Translation is a pure
//! function of the instruction value — no cross-instruction state, and
//! byte-identical output for identical input.
//!
//! Every configuration-style rule shares a two-stage template: the
//! inner options string is computed first, then interpolated into
//! `{tool} config {options} {container}`. An empty options string
//! degrades to a valid no-flag invocation (with a doubled space) instead
//! of a malformed one.
//!
//! Known quoting gaps, kept so downstream consumers see stable output:
//! shell-variable references inside USER are not re-quoted, and single
//! quotes embedded in MAINTAINER names or ONBUILD expressions are not
//! escaped.

pub mod engine;

pub use engine::{Engine, StageOutcome};

use df2b_errors::TranslateError;
use df2b_types::{Instruction, KeyValue, StageContext, Tooling, TranslationLine};

/// Translate one instruction into its output line.
///
/// The stage context is carried for diagnostics only; it never affects
/// the rendered text.
///
/// # Errors
///
/// Returns `TranslateError` for the generic fallback variant (unknown
/// instruction kind) and for structurally invalid field combinations
/// such as an empty healthcheck test vector. Absent-but-well-defined
/// fields (empty pair lists, empty option strings) are not errors.
pub fn translate(
    ctx: &StageContext,
    instruction: &Instruction,
    tooling: &Tooling,
) -> Result<TranslationLine, TranslateError> {
    match instruction {
        Instruction::Stage { base, alias } => Ok(translate_stage(base, alias)),
        Instruction::Env { pairs } => Ok(config_line(tooling, &pair_options("--env", pairs))),
        Instruction::Workdir { path } => {
            Ok(config_line(tooling, &format!("--workingdir {path}")))
        }
        Instruction::Expose { ports } => {
            Ok(config_line(tooling, &repeat_options("--port", ports)))
        }
        Instruction::StopSignal { signal } => {
            Ok(config_line(tooling, &format!("--stop-signal {signal}")))
        }
        Instruction::User { user } => Ok(config_line(tooling, &format!("--user {user}"))),
        Instruction::Volume { paths } => {
            Ok(config_line(tooling, &repeat_options("--volume", paths)))
        }
        Instruction::Arg { name, default } => Ok(translate_arg(tooling, name, default.as_deref())),
        Instruction::OnBuild { expression } => {
            Ok(config_line(tooling, &format!("--onbuild '{expression}'")))
        }
        Instruction::Add {
            sources,
            dest,
            chown,
        } => translate_copyish(ctx, tooling, "add", sources, dest, "", chown),
        Instruction::Copy {
            sources,
            dest,
            from,
            chown,
        } => translate_copyish(ctx, tooling, "copy", sources, dest, from, chown),
        Instruction::Healthcheck {
            test,
            interval,
            timeout,
            start_period,
            retries,
        } => translate_healthcheck(ctx, tooling, test, *interval, *timeout, *start_period, *retries),
        Instruction::Run { shell, tokens } => Ok(translate_run(tooling, *shell, tokens)),
        Instruction::Label { pairs } => Ok(config_line(tooling, &pair_options("--label", pairs))),
        Instruction::Maintainer { name } => {
            Ok(config_line(tooling, &format!("--label maintainer='{name}'")))
        }
        Instruction::Shell { tokens } => {
            let rendered = render_exec_array(tokens);
            Ok(config_line(tooling, &format!("--shell '{}'", rendered.trim())))
        }
        Instruction::Cmd { shell, tokens } => {
            Ok(translate_command_slot(tooling, "--cmd", *shell, tokens.as_deref()))
        }
        Instruction::Entrypoint { shell, tokens } => Ok(translate_command_slot(
            tooling,
            "--entrypoint",
            *shell,
            tokens.as_deref(),
        )),
        Instruction::Other { name, .. } => Err(TranslateError::UnknownInstruction {
            stage: ctx.id.clone(),
            kind: name.clone(),
        }),
    }
}

/// Outer half of the two-stage template shared by all config rules.
fn config_line(tooling: &Tooling, options: &str) -> TranslationLine {
    TranslationLine::command(format!(
        "{} config {options} {}",
        tooling.tool, tooling.container
    ))
}

fn repeat_options(flag: &str, values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{flag} {v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pair_options(flag: &str, pairs: &[KeyValue]) -> String {
    pairs
        .iter()
        .map(|kv| format!("{flag} {kv}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn translate_stage(base: &str, alias: &str) -> TranslationLine {
    // The stage declaration has no buildah equivalent; it is emitted as
    // a diagnostic line instead of a command.
    if alias.is_empty() {
        TranslationLine::diagnostic(format!("FROM {base}"))
    } else {
        TranslationLine::diagnostic(format!("FROM {base} as {alias}"))
    }
}

fn translate_arg(tooling: &Tooling, name: &str, default: Option<&str>) -> TranslationLine {
    // `None` and `Some("")` must stay distinguishable in the output.
    let options = match default {
        Some(value) => format!("--arg {name}={value}"),
        None => format!("--arg {name}"),
    };
    config_line(tooling, &options)
}

fn translate_copyish(
    ctx: &StageContext,
    tooling: &Tooling,
    subcommand: &str,
    sources: &[String],
    dest: &str,
    from: &str,
    chown: &str,
) -> Result<TranslationLine, TranslateError> {
    if sources.is_empty() || dest.is_empty() {
        return Err(TranslateError::MissingPaths {
            stage: ctx.id.clone(),
            kind: subcommand.to_ascii_uppercase(),
        });
    }

    let mut options = Vec::new();
    if !from.is_empty() {
        options.push(format!("--from {from}"));
    }
    if !chown.is_empty() {
        options.push(format!("--chown {chown}"));
    }

    Ok(TranslationLine::command(format!(
        "{} {} {} {} {} {}",
        tooling.tool,
        subcommand,
        options.join(" "),
        tooling.container,
        sources.join(" "),
        dest
    )))
}

fn translate_healthcheck(
    ctx: &StageContext,
    tooling: &Tooling,
    test: &[String],
    interval: std::time::Duration,
    timeout: std::time::Duration,
    start_period: std::time::Duration,
    retries: u32,
) -> Result<TranslationLine, TranslateError> {
    if test.is_empty() {
        return Err(TranslateError::EmptyHealthcheck {
            stage: ctx.id.clone(),
        });
    }

    let mut options = format!("--healthcheck '{}'", test.join(" "));
    if retries != 0 {
        options.push_str(&format!(" --healthcheck-retries {retries}"));
    }
    if !interval.is_zero() {
        options.push_str(&format!(" --healthcheck-interval {}s", interval.as_secs()));
    }
    if !start_period.is_zero() {
        options.push_str(&format!(
            " --healthcheck-start-period {}s",
            start_period.as_secs()
        ));
    }
    if !timeout.is_zero() {
        options.push_str(&format!(" --healthcheck-timeout {}s", timeout.as_secs()));
    }

    Ok(config_line(tooling, &options))
}

fn translate_run(tooling: &Tooling, shell: bool, tokens: &[String]) -> TranslationLine {
    let joined = tokens.join(" ");
    let payload = if shell {
        format!("{} -c '{joined}'", tooling.shell)
    } else {
        joined
    };

    // A shell-form command whose first token starts with `-` would be
    // eaten as an option by the target tool; separate it explicitly.
    let needs_separator = shell
        && tokens
            .first()
            .is_some_and(|first| first.starts_with('-'));
    let separator = if needs_separator { "-- " } else { "" };

    TranslationLine::command(format!(
        "{} run [options] {} {separator}{payload}",
        tooling.tool, tooling.container
    ))
}

fn translate_command_slot(
    tooling: &Tooling,
    flag: &str,
    shell: bool,
    tokens: Option<&[String]>,
) -> TranslationLine {
    // Normalize the absent/null token list to empty before rendering so
    // the output never contains the literal text "null".
    let tokens = tokens.unwrap_or_default();
    let payload = if shell {
        tokens.join(" ")
    } else {
        render_exec_array(tokens)
    };
    config_line(tooling, &format!("{flag} '{}'", payload.trim()))
}

/// Compact array-literal rendering of an exec-form token list. An empty
/// list renders as the empty string, never as `null` or `[]`.
fn render_exec_array(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return String::new();
    }
    // Serializing a list of strings cannot fail.
    serde_json::to_string(tokens).unwrap_or_default()
}
