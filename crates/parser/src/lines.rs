//! Logical-line assembly
//!
//! Build files are line oriented with three wrinkles: full-line
//! comments, an optional `# escape=` parser directive, and line
//! continuations. This module folds raw text into logical lines and
//! records the source line each one started on.

use df2b_errors::ParseError;

/// One folded instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// 1-based source line the instruction started on.
    pub line: usize,
}

const DEFAULT_ESCAPE: char = '\\';

/// Read the `# escape=` parser directive, if present.
///
/// Parser directives are only honored in the comment block before the
/// first instruction, matching upstream build-file semantics. Unknown
/// directives (e.g. `# syntax=`) are ignored.
fn escape_char(text: &str) -> Result<char, ParseError> {
    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some(comment) = trimmed.strip_prefix('#') else {
            break;
        };
        let comment = comment.trim();
        if let Some(value) = comment.strip_prefix("escape=") {
            return match value.trim() {
                "\\" => Ok('\\'),
                "`" => Ok('`'),
                other => Err(ParseError::InvalidEscapeDirective {
                    value: other.to_string(),
                }),
            };
        }
    }
    Ok(DEFAULT_ESCAPE)
}

/// Fold raw build-file text into logical lines.
///
/// Comments and blank lines vanish, including comment lines that occur
/// in the middle of a continuation.
pub fn fold(text: &str) -> Result<Vec<LogicalLine>, ParseError> {
    let escape = escape_char(text)?;
    let mut folded = Vec::new();

    let mut pending: Option<LogicalLine> = None;
    let mut last_line = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        last_line = number;
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (content, continues) = match trimmed.strip_suffix(escape) {
            Some(stripped) => (stripped, true),
            None => (trimmed, false),
        };

        match pending.as_mut() {
            Some(partial) => {
                partial.text.push(' ');
                partial.text.push_str(content.trim());
            }
            None => {
                pending = Some(LogicalLine {
                    text: content.trim_end().to_string(),
                    line: number,
                });
            }
        }

        if !continues {
            if let Some(mut done) = pending.take() {
                done.text = done.text.trim().to_string();
                if !done.text.is_empty() {
                    folded.push(done);
                }
            }
        }
    }

    if pending.is_some() {
        return Err(ParseError::DanglingContinuation { line: last_line });
    }

    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_plain_lines() {
        let lines = fold("FROM alpine\nRUN echo hi\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "FROM alpine");
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[1].text, "RUN echo hi");
        assert_eq!(lines[1].line, 2);
    }

    #[test]
    fn test_fold_continuation() {
        let lines = fold("RUN apt-get update \\\n    && apt-get install -y curl\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "RUN apt-get update && apt-get install -y curl");
        assert_eq!(lines[0].line, 1);
    }

    #[test]
    fn test_comment_inside_continuation() {
        let lines = fold("RUN echo a \\\n# interleaved comment\n    echo b\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "RUN echo a echo b");
    }

    #[test]
    fn test_escape_directive_backtick() {
        let text = "# escape=`\nRUN echo a `\n    echo b\n";
        let lines = fold(text).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "RUN echo a echo b");
    }

    #[test]
    fn test_escape_directive_only_before_instructions() {
        // Once an instruction has been seen, a later escape "directive"
        // is just a comment.
        let text = "FROM alpine\n# escape=`\nRUN echo a \\\n    echo b\n";
        let lines = fold(text).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "RUN echo a echo b");
    }

    #[test]
    fn test_invalid_escape_directive() {
        let err = fold("# escape=%\nFROM alpine\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEscapeDirective { .. }));
    }

    #[test]
    fn test_dangling_continuation() {
        let err = fold("RUN echo a \\\n").unwrap_err();
        assert!(matches!(err, ParseError::DanglingContinuation { .. }));
    }
}
