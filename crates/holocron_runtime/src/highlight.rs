//! Syntax highlighting for the REPL.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use holocron_foundation::EntityKind;

/// Highlighter for query text.
pub struct QueryHighlighter {}

impl QueryHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut in_string = false;
        let mut in_comment = false;

        while let Some(c) = chars.next() {
            if in_comment {
                result.push(c);
                continue;
            }

            match c {
                // Comments
                '#' if !in_string => {
                    in_comment = true;
                    result.push_str("\x1b[2;3m"); // dim italic
                    result.push(c);
                }

                // Strings
                '"' => {
                    if in_string {
                        result.push(c);
                        result.push_str("\x1b[0m");
                        in_string = false;
                    } else {
                        result.push_str("\x1b[33m"); // yellow
                        result.push(c);
                        in_string = true;
                    }
                }

                // Escape in string
                '\\' if in_string => {
                    result.push(c);
                    if let Some(next) = chars.next() {
                        result.push(next);
                    }
                }

                // Numbers
                c if !in_string
                    && (c.is_ascii_digit()
                        || (c == '-' && chars.peek().is_some_and(char::is_ascii_digit))) =>
                {
                    result.push_str("\x1b[35m"); // magenta
                    result.push(c);
                    take_while(&mut chars, &mut result, |n| {
                        n.is_ascii_digit() || matches!(n, '.' | 'e' | 'E' | '+' | '-')
                    });
                    result.push_str("\x1b[0m");
                }

                // Delimiters - bright
                '(' | ')' | '{' | '}' if !in_string => {
                    result.push_str("\x1b[1m"); // bold
                    result.push(c);
                    result.push_str("\x1b[0m");
                }

                // Names
                c if (c.is_alphabetic() || c == '_') && !in_string => {
                    let mut word = String::from(c);
                    take_while(&mut chars, &mut word, |n| n.is_alphanumeric() || n == '_');
                    let color = word_color(&word);
                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str("\x1b[0m");
                    }
                }

                _ => result.push(c),
            }
        }

        // Reset at end
        if in_comment || in_string {
            result.push_str("\x1b[0m");
        }

        Cow::Owned(result)
    }
}

impl Default for QueryHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn take_while(chars: &mut Peekable<Chars<'_>>, out: &mut String, pred: impl Fn(char) -> bool) {
    while let Some(next) = chars.next_if(|&n| pred(n)) {
        out.push(next);
    }
}

fn word_color(word: &str) -> &'static str {
    match word {
        // Literals - blue
        "true" | "false" | "null" => "\x1b[34m",
        // Root designators - bold green
        _ if EntityKind::from_designator(word).is_some() => "\x1b[1;32m",
        // Unit names and other enum values - cyan
        _ if word.len() > 1 && word.chars().all(|c| c.is_ascii_uppercase() || c == '_') => {
            "\x1b[36m"
        }
        _ => "",
    }
}
