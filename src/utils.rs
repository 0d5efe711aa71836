use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    str::FromStr,
};

use tracing::debug;

/// Whitespace separated tokens over a line reader. Several tokens typed on
/// one line are handed out one by one, like a scanner.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// Writes `prompt`, then reads tokens until one parses as `T`, writing
/// `retry` after each rejected token. Returns `None` at end of input.
pub fn prompt_parse<T, R, W>(
    input: &mut TokenReader<R>,
    out: &mut W,
    prompt: &str,
    retry: &str,
) -> io::Result<Option<T>>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", prompt)?;
    out.flush()?;
    loop {
        let Some(token) = input.next_token()? else {
            return Ok(None);
        };
        match token.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                debug!("Could not parse {:?}", token);
                write!(out, "{}", retry)?;
                out.flush()?;
            }
        }
    }
}
