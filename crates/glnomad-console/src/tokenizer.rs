//! Console line tokenizer.
//!
//! Splits a line into arguments the way the editor console always has:
//! whitespace separates, `"..."` groups, and `//` or `/*` ends the line.
//! A `//` directly after `<lowercase letter>:` is part of a URL scheme and
//! does not start a comment, so `http://host` survives as one argument.

use std::ops::Range;

/// Most arguments kept from one line. Anything after is dropped.
pub const MAX_ARGS: usize = 1024;

/// Size of the line buffer, terminator included. Longer lines are cut to
/// `MAX_CMD_LINE - 1` bytes before tokenizing.
pub const MAX_CMD_LINE: usize = 8192;

/// The arguments of one console line.
///
/// Each call to [`TokenizedCommand::tokenize`] produces an independent value;
/// there is no shared "current command".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedCommand {
    raw: String,
    /// Every argument, back to back.
    buffer: String,
    /// One range into `buffer` per argument.
    spans: Vec<Range<usize>>,
}

impl TokenizedCommand {
    /// Tokenize `line`. With `ignore_quotes`, `"` is an ordinary character.
    pub fn tokenize(line: &str, ignore_quotes: bool) -> Self {
        let raw = clamp_line(line);
        let Scan {
            buffer,
            spans,
            truncated,
        } = scan(raw, !ignore_quotes);
        if truncated {
            log::debug!("Command line truncated at {MAX_ARGS} arguments");
        }
        Self {
            raw: raw.to_owned(),
            buffer,
            spans,
        }
    }

    /// Number of arguments.
    pub fn argc(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Argument `index`, or `""` when out of range.
    pub fn argv(&self, index: usize) -> &str {
        self.spans
            .get(index)
            .map_or("", |span| &self.buffer[span.clone()])
    }

    /// All arguments in order.
    pub fn args(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(|span| &self.buffer[span.clone()])
    }

    /// Arguments from `start` on, joined by single spaces.
    pub fn args_from(&self, start: usize) -> String {
        self.args().skip(start).collect::<Vec<_>>().join(" ")
    }

    /// The line as tokenized, after length clamping.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Shorthand for [`TokenizedCommand::tokenize`].
pub fn tokenize(line: &str, ignore_quotes: bool) -> TokenizedCommand {
    TokenizedCommand::tokenize(line, ignore_quotes)
}

fn clamp_line(line: &str) -> &str {
    let max = MAX_CMD_LINE - 1;
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Whether a comment marker starts at `at`.
fn comment_at(bytes: &[u8], at: usize) -> bool {
    match (bytes[at], bytes.get(at + 1)) {
        (b'/', Some(b'*')) => true,
        (b'/', Some(b'/')) => {
            let scheme = at >= 2 && bytes[at - 1] == b':' && bytes[at - 2].is_ascii_lowercase();
            !scheme
        },
        _ => false,
    }
}

struct Scan {
    buffer: String,
    spans: Vec<Range<usize>>,
    /// Arguments were left over after `MAX_ARGS`.
    truncated: bool,
}

fn scan(line: &str, honour_quotes: bool) -> Scan {
    let bytes = line.as_bytes();
    let mut buffer = String::with_capacity(line.len());
    let mut spans = Vec::new();
    let mut push = |token: &str| {
        let start = buffer.len();
        buffer.push_str(token);
        spans.push(start..buffer.len());
    };

    let mut pos = 0;
    let mut count = 0;
    while count < MAX_ARGS {
        while pos < bytes.len() && bytes[pos] <= b' ' {
            pos += 1;
        }
        if pos == bytes.len() {
            break;
        }

        if honour_quotes && bytes[pos] == b'"' {
            let body = pos + 1;
            // Unterminated: drop the partial token and stop.
            let Some(len) = bytes[body..].iter().position(|&b| b == b'"') else {
                break;
            };
            push(&line[body..body + len]);
            count += 1;
            pos = body + len + 1;
            continue;
        }

        let start = pos;
        let mut comment = false;
        while pos < bytes.len() && bytes[pos] > b' ' {
            if honour_quotes && bytes[pos] == b'"' {
                break;
            }
            if comment_at(bytes, pos) {
                comment = true;
                break;
            }
            pos += 1;
        }
        if pos > start {
            push(&line[start..pos]);
            count += 1;
        }
        if comment {
            return Scan {
                buffer,
                spans,
                truncated: false,
            };
        }
    }

    while pos < bytes.len() && bytes[pos] <= b' ' {
        pos += 1;
    }
    let truncated = count == MAX_ARGS && pos < bytes.len() && !comment_at(bytes, pos);
    Scan {
        buffer,
        spans,
        truncated,
    }
}
