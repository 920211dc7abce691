//! Quoting state machine shared by the bulk parser and the streaming reader

use crate::column::{Column, Dialect};
use crate::record::Record;

/// Whether the scanner is inside a quoted section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    Quoting,
}

/// Class of a single input character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Separator,
    Newline,
    Quote,
    Other,
}

impl CharClass {
    /// Classify a character for the given dialect
    ///
    /// Only LF is a newline. CR is ordinary content.
    pub fn of(c: char, dialect: &Dialect) -> Self {
        if c == dialect.separator {
            CharClass::Separator
        } else if c == '\n' {
            CharClass::Newline
        } else if c == dialect.quote {
            CharClass::Quote
        } else {
            CharClass::Other
        }
    }
}

/// What the scanner does with the current character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the character to the field buffer
    Append,
    /// Append the current and the next quote character, consuming both
    AppendEscapedQuote,
    /// End the current field
    CloseField,
    /// End the current field and the current record
    CloseRecord,
}

/// The transition table
///
/// # Arguments
/// - `state` - Current quoting state
/// - `class` - Class of the current character
/// - `next_is_quote` - Whether the character right after this one is the quote character
///
/// # Returns
/// The action to perform and the state to move to
pub fn transition(state: QuoteState, class: CharClass, next_is_quote: bool) -> (Action, QuoteState) {
    use CharClass::*;
    use QuoteState::*;

    match (state, class) {
        (Unquoted, Separator) => (Action::CloseField, Unquoted),
        (Unquoted, Newline) => (Action::CloseRecord, Unquoted),
        // The opening quote stays in the buffer so the decoder can strip it
        (Unquoted, Quote) => (Action::Append, Quoting),
        (Unquoted, Other) => (Action::Append, Unquoted),
        (Quoting, Quote) if next_is_quote => (Action::AppendEscapedQuote, Quoting),
        (Quoting, Quote) => (Action::Append, Unquoted),
        (Quoting, Separator | Newline | Other) => (Action::Append, Quoting),
    }
}

/// Incremental scanner building one record at a time
#[derive(Debug)]
pub(crate) struct Scanner {
    dialect: Dialect,
    state: QuoteState,
    buffer: String,
    record: Record,
}

impl Scanner {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: QuoteState::Unquoted,
            buffer: String::new(),
            record: Record::new(),
        }
    }

    pub(crate) fn state(&self) -> QuoteState {
        self.state
    }

    /// Scan `text` until it is exhausted or a record boundary is hit
    ///
    /// # Returns
    /// `Some(offset)` with the byte offset just past the line feed that ended
    /// the record, or `None` when the whole text was consumed. The completed
    /// record is left in place for [`Scanner::take_record`].
    pub(crate) fn feed(&mut self, text: &str) -> Option<usize> {
        let quote = self.dialect.quote;
        let mut chars = text.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            let next_is_quote = chars.peek().is_some_and(|&(_, n)| n == quote);
            let class = CharClass::of(c, &self.dialect);
            let (action, state) = transition(self.state, class, next_is_quote);
            self.state = state;

            match action {
                Action::Append => self.buffer.push(c),
                Action::AppendEscapedQuote => {
                    self.buffer.push(c);
                    self.buffer.push(quote);
                    chars.next();
                }
                Action::CloseField => self.close_field(),
                Action::CloseRecord => {
                    self.close_field();
                    return Some(pos + c.len_utf8());
                }
            }
        }

        None
    }

    /// Decode the buffered token and append it to the current record
    pub(crate) fn close_field(&mut self) {
        let column = Column::from_token(&self.buffer, &self.dialect);
        self.record.push(column);
        self.buffer.clear();
    }

    pub(crate) fn has_pending_field(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Take the record built so far and start a new one
    pub(crate) fn take_record(&mut self) -> Record {
        self.state = QuoteState::Unquoted;
        self.buffer.clear();
        std::mem::take(&mut self.record)
    }

    /// Close a pending field if there is one and hand out the record, if any
    pub(crate) fn finish(&mut self) -> Option<Record> {
        if self.has_pending_field() {
            self.close_field();
        }
        let record = self.take_record();
        (!record.is_empty()).then_some(record)
    }
}
