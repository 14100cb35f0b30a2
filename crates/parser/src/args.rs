//! Argument-level helpers shared by the directive grammars

use df2b_errors::ParseError;
use df2b_types::KeyValue;

/// Split an argument string into words, honoring single quotes, double
/// quotes, and backslash escapes. Quote characters are consumed; the
/// escaped character is kept verbatim.
pub fn split_quoted(s: &str, directive: &str, line: usize) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else if c == '\\' && q == '"' {
                    match chars.next() {
                        Some(escaped) => word.push(escaped),
                        None => {
                            return Err(ParseError::UnterminatedQuote {
                                directive: directive.to_string(),
                                line,
                            })
                        }
                    }
                } else {
                    word.push(c);
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    in_word = true;
                    match chars.next() {
                        Some(escaped) => word.push(escaped),
                        None => word.push('\\'),
                    }
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut word));
                        in_word = false;
                    }
                }
                c => {
                    in_word = true;
                    word.push(c);
                }
            },
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnterminatedQuote {
            directive: directive.to_string(),
            line,
        });
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Parse a `KEY=VALUE KEY2=VALUE2 ...` list (ENV/LABEL modern form).
pub fn parse_pairs(s: &str, directive: &str, line: usize) -> Result<Vec<KeyValue>, ParseError> {
    let mut pairs = Vec::new();
    for word in split_quoted(s, directive, line)? {
        let Some(eq) = word.find('=') else {
            return Err(ParseError::InvalidKeyValue { pair: word, line });
        };
        if eq == 0 {
            return Err(ParseError::InvalidKeyValue { pair: word, line });
        }
        let (key, value) = word.split_at(eq);
        pairs.push(KeyValue::new(key, &value[1..]));
    }
    Ok(pairs)
}

/// Decode a JSON array of strings (`["a", "b"]`).
pub fn parse_json_array(s: &str, line: usize) -> Result<Vec<String>, ParseError> {
    serde_json::from_str::<Vec<String>>(s).map_err(|e| ParseError::MalformedJsonArray {
        message: e.to_string(),
        line,
    })
}

/// Strip one layer of symmetric quotes from a scalar value.
pub fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
