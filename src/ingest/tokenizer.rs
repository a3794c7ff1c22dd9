use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// One CSV record reshaped as `token, tick, dimensions...`.
///
/// Nothing is validated here: an empty token, a missing tick or a
/// non-numeric tick all pass through (the tick becomes NaN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub token: String,
    pub tick: f64,
    pub dimensions: SmallVec<[String; 4]>,
}

impl Row {
    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let token = fields.next().unwrap_or_default();
        let tick = fields
            .next()
            .map_or(f64::NAN, |raw| coerce_number(&raw));
        Self {
            token,
            tick,
            dimensions: fields.collect(),
        }
    }
}

/// Lazily tokenizes CSV text into rows, in textual order.
///
/// A single trailing line break does not produce a row; every other line,
/// blank lines included, does. Restart by calling `tokenize` again.
pub fn tokenize(text: &str) -> Rows<'_> {
    Rows::new(text)
}

/// Iterator returned by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
    eof: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Delimiter,
    EndOfLine,
    EndOfInput,
}

impl<'a> Rows<'a> {
    fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut end = bytes.len();
        if end > 0 && bytes[end - 1] == b'\n' {
            end -= 1;
        }
        if end > 0 && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        Self {
            text,
            pos: 0,
            end,
            eof: end == 0,
        }
    }

    fn next_record(&mut self) -> Option<Vec<String>> {
        if self.eof {
            return None;
        }

        let mut fields = Vec::new();
        loop {
            let (field, terminator) = self.next_field();
            fields.push(field);
            match terminator {
                Terminator::Delimiter => {}
                Terminator::EndOfLine => return Some(fields),
                Terminator::EndOfInput => {
                    self.eof = true;
                    return Some(fields);
                }
            }
        }
    }

    fn next_field(&mut self) -> (String, Terminator) {
        let bytes = self.text.as_bytes();
        if self.pos < self.end && bytes[self.pos] == QUOTE {
            let open = self.pos + 1;
            let mut close = open;
            while close < self.end {
                if bytes[close] == QUOTE {
                    if close + 1 < self.end && bytes[close + 1] == QUOTE {
                        close += 2;
                        continue;
                    }
                    break;
                }
                close += 1;
            }
            let close = close.min(self.end);
            let field = self.text[open..close].replace("\"\"", "\"");
            self.pos = (close + 1).min(self.end);
            // Anything between the closing quote and the terminator is dropped.
            let (_, terminator) = self.scan_to_terminator();
            return (field, terminator);
        }

        let start = self.pos;
        let (stop, terminator) = self.scan_to_terminator();
        (self.text[start..stop].to_owned(), terminator)
    }

    fn scan_to_terminator(&mut self) -> (usize, Terminator) {
        let bytes = self.text.as_bytes();
        while self.pos < self.end {
            let at = self.pos;
            self.pos += 1;
            match bytes[at] {
                b'\n' => return (at, Terminator::EndOfLine),
                b'\r' => {
                    if self.pos < self.end && bytes[self.pos] == b'\n' {
                        self.pos += 1;
                    }
                    return (at, Terminator::EndOfLine);
                }
                DELIMITER => return (at, Terminator::Delimiter),
                _ => {}
            }
        }
        (self.end, Terminator::EndOfInput)
    }
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().map(Row::from_fields)
    }
}

/// Lenient numeric coercion used for ticks and standard sensor values.
///
/// Surrounding whitespace is ignored and a blank string is zero. Decimal
/// and exponent forms, signed `Infinity` and `0x`/`0o`/`0b` integers are
/// accepted; anything else is NaN rather than an error.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |value| value as f64);
        }
    }

    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
