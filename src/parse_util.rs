use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Unexpected end of line at column {col}, expected {exp}")]
    UnexpectedEol { col: usize, exp: &'static str },

    #[error("Expected {exp} at column {col}, but got '{got}'")]
    UnexpectedToken {
        col: usize,
        exp: &'static str,
        got: char,
    },
}

/// A line being scanned, along with the column of its first unconsumed byte.
///
/// Columns are kept so that errors can point into the line they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    col: usize,
}

impl<'a> Scanner<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, col: 0 }
    }

    pub const fn col(&self) -> usize {
        self.col
    }
}

/// Takes the next byte from the line. If none is found, the scanner is left as-is.
pub const fn take_1(s: Scanner<'_>) -> (Option<u8>, Scanner<'_>) {
    let [b, bytes @ ..] = s.bytes else {
        return (None, s);
    };

    let rest = Scanner {
        bytes,
        col: s.col + 1,
    };

    (Some(*b), rest)
}

/// Like `take_1`, but doesn't consume the byte
pub fn peek_1(s: Scanner<'_>) -> Option<u8> {
    let [b, _bytes @ ..] = s.bytes else {
        return None;
    };

    Some(*b)
}

/// Decodes the character starting at the next byte, for error reporting.
///
/// Every byte a scanner consumes is ascii, so the next byte always starts a character.
fn next_char(s: Scanner<'_>) -> char {
    String::from_utf8_lossy(s.bytes)
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Expects the next byte to be `b`.
pub fn expect<'a>(b: u8, exp: &'static str, s: Scanner<'a>) -> ScanResult<Scanner<'a>> {
    let (_, rest) = expect_fn(|a| a == b, exp, s)?;

    Ok(rest)
}

/// Expects the next byte to satisfy `P`, and returns it.
pub fn expect_fn<'a, P>(p: P, exp: &'static str, s: Scanner<'a>) -> ScanResult<(u8, Scanner<'a>)>
where
    P: Fn(u8) -> bool,
{
    let col = s.col;

    let (Some(a), rest) = take_1(s) else {
        return Err(ScanError::UnexpectedEol { col, exp });
    };

    if !p(a) {
        return Err(ScanError::UnexpectedToken {
            col,
            exp,
            got: next_char(s),
        });
    }

    Ok((a, rest))
}

/// Checks that nothing is left on the line.
pub fn expect_end(s: Scanner<'_>) -> ScanResult<()> {
    match peek_1(s) {
        None => Ok(()),
        Some(_) => Err(ScanError::UnexpectedToken {
            col: s.col,
            exp: "end of line",
            got: next_char(s),
        }),
    }
}

/// Splits `text` at every linebreak.
///
/// A linebreak is any of
/// * `\n`
/// * `\r`
/// * `\r\n`
///
/// Empty text has no lines, and a trailing linebreak doesn't start a new one.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text).filter(|text| !text.is_empty());

    std::iter::from_fn(move || {
        let text = rest?;

        let Some(i) = text.find(['\n', '\r']) else {
            rest = None;
            return Some(text);
        };

        let n = if text[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = Some(&text[i + n..]).filter(|text| !text.is_empty());

        Some(&text[..i])
    })
}
