//! Stage-level driver
//!
//! Walks `Idle → ParsingStage → TranslatingInstructions → Idle` once
//! per input record. A failed stage records its identifier and reason
//! and the engine resumes at `Idle`; one bad stage never aborts the
//! surrounding stream.

use df2b_errors::Error;
use df2b_types::{StageContext, Tooling, TranslationLine};
use tracing::{debug, error, warn};

use crate::translate;

/// Driver state, advanced once per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    ParsingStage,
    TranslatingInstructions,
}

/// Result of running one stage through the engine.
///
/// `lines` preserves source instruction order; a failed instruction
/// contributes no line but never reorders its siblings. `errors` holds
/// the parse rejection or every translation failure, each carrying the
/// stage identifier.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub stage: StageContext,
    pub lines: Vec<TranslationLine>,
    pub errors: Vec<Error>,
}

impl StageOutcome {
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable reason for the failure, when there is one.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        self.errors.first().map(ToString::to_string)
    }
}

/// Record-at-a-time translation engine.
///
/// Single-threaded and synchronous: each record is fully parsed and
/// fully translated before the caller hands over the next one. The
/// engine holds no per-stage state between records.
#[derive(Debug, Clone)]
pub struct Engine {
    tooling: Tooling,
    state: State,
}

impl Engine {
    #[must_use]
    pub fn new(tooling: Tooling) -> Self {
        Self {
            tooling,
            state: State::Idle,
        }
    }

    /// Parse and translate one stage's build-file text.
    pub fn run_stage(&mut self, ctx: StageContext, text: &str) -> StageOutcome {
        debug_assert_eq!(self.state, State::Idle);

        self.enter(State::ParsingStage, &ctx);
        let instructions = match df2b_parser::parse(text) {
            Ok(instructions) => instructions,
            Err(err) => {
                error!(stage = %ctx, error = %err, "stage rejected by parser");
                self.enter(State::Idle, &ctx);
                return StageOutcome {
                    stage: ctx,
                    lines: Vec::new(),
                    errors: vec![err.into()],
                };
            }
        };

        self.enter(State::TranslatingInstructions, &ctx);
        let mut lines = Vec::with_capacity(instructions.len());
        let mut errors = Vec::new();
        for instruction in &instructions {
            match translate(&ctx, instruction, &self.tooling) {
                Ok(line) => lines.push(line),
                Err(err) => {
                    // The failed instruction's line is omitted; its
                    // siblings keep their positions.
                    warn!(
                        stage = %ctx,
                        kind = instruction.kind(),
                        error = %err,
                        "instruction failed to translate"
                    );
                    errors.push(err.into());
                }
            }
        }

        if let Some(first) = errors.first() {
            error!(stage = %ctx, reason = %first, "stage failed");
        }

        self.enter(State::Idle, &ctx);
        StageOutcome {
            stage: ctx,
            lines,
            errors,
        }
    }

    fn enter(&mut self, next: State, ctx: &StageContext) {
        debug!(stage = %ctx, from = ?self.state, to = ?next, "engine transition");
        self.state = next;
    }
}
