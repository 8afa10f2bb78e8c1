mod code;
mod logger;
mod position;

use once_cell::unsync::OnceCell;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// Line and column of a byte offset into the source, 1-indexed.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A borrowed view of the source bytes, with lazily computed line breaks so
/// [`Code::position_at`] can answer without rescanning from the start.
pub struct Code<'c> {
    pub value: &'c [u8],
    line_breaks: OnceCell<Vec<usize>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
/// Debug-only trace level for the tokenizer, parser and evaluator.
///
/// Ordered so `trace >= Trace::Parse` etc. reads naturally; see
/// [`crate::Config`] for how a level is selected.
pub enum Trace {
    Off,
    Tokens,
    Parse,
    Eval,
}
