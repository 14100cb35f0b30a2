#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Shared type definitions for the df2b translation pipeline
//!
//! The central type is [`Instruction`], a closed sum over every
//! build-file directive kind the translator understands. Keeping the
//! enum closed means the translation rules are checked for
//! exhaustiveness at compile time; forward compatibility with new
//! directive kinds goes through the explicit [`Instruction::Other`]
//! fallback instead of a silent catch-all.

pub mod instruction;
pub mod line;
pub mod stage;
pub mod tooling;

pub use instruction::{Instruction, KeyValue};
pub use line::TranslationLine;
pub use stage::StageContext;
pub use tooling::Tooling;
