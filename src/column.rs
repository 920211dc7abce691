//! Column (field) implementation and the field codec

use std::borrow::Cow;

use crate::value::Value;

/// Separator and quote characters shared by the codec, the parsers and the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator, `,` by default
    pub separator: char,
    /// Quote character, `"` by default
    pub quote: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            separator: ',',
            quote: '"',
        }
    }
}

impl Dialect {
    /// Tab separated values with the usual quote character
    pub fn tsv() -> Self {
        Self {
            separator: '\t',
            quote: '"',
        }
    }

    /// Check if a stringified value has to be quoted on output
    fn needs_quotes(&self, text: &str) -> bool {
        text.chars()
            .any(|c| c == self.quote || c == self.separator || c == '\r' || c == '\n')
    }
}

/// Encode a value to its CSV field form
///
/// The value is stringified first (null becomes the empty string). An empty
/// result is returned as is, even when `force_quote` is set. Otherwise the text
/// is wrapped in quote characters, with every embedded quote doubled, when it
/// contains the quote, the separator, CR or LF, or when `force_quote` is set.
///
/// # Arguments
/// - `value` - The value to encode
/// - `force_quote` - Quote the field even when its text does not require it
/// - `dialect` - Separator and quote characters
///
/// # Returns
/// The field text as it should appear in a CSV line
pub fn encode(value: &Value, force_quote: bool, dialect: &Dialect) -> String {
    let text = value.to_string();
    encode_str(&text, force_quote, dialect).into_owned()
}

/// Same as [`encode`] for text that has already been stringified
pub fn encode_str<'a>(text: &'a str, force_quote: bool, dialect: &Dialect) -> Cow<'a, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }
    if !force_quote && !dialect.needs_quotes(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 2);
    out.push(dialect.quote);
    for c in text.chars() {
        if c == dialect.quote {
            out.push(c);
        }
        out.push(c);
    }
    out.push(dialect.quote);
    Cow::Owned(out)
}

/// Decode a CSV field token back to its text
///
/// A token wrapped in quote characters loses exactly one leading and one
/// trailing quote. Every doubled quote is then collapsed into one. Unbalanced
/// quotes are passed through without error.
pub fn decode(token: &str, dialect: &Dialect) -> String {
    let q = dialect.quote;
    let q_len = q.len_utf8();
    let inner = if token.len() >= 2 * q_len && token.starts_with(q) && token.ends_with(q) {
        &token[q_len..token.len() - q_len]
    } else {
        token
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == q && chars.peek() == Some(&q) {
            chars.next();
        }
    }
    out
}

/// A single column (field) of a CSV record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    value: Value,
    force_quote: bool,
}

impl Column {
    /// Create a column holding the given value
    pub fn new<V: Into<Value>>(value: V) -> Self {
        Self {
            value: value.into(),
            force_quote: false,
        }
    }

    /// Create a column that is always quoted on output (unless empty)
    pub fn quoted<V: Into<Value>>(value: V) -> Self {
        Self {
            value: value.into(),
            force_quote: true,
        }
    }

    /// Create an empty column
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a column from a raw field token, decoding its quoting
    pub fn from_token(token: &str, dialect: &Dialect) -> Self {
        Self::new(decode(token, dialect))
    }

    /// Get the stored value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the stored value
    pub fn set_value<V: Into<Value>>(&mut self, value: V) {
        self.value = value.into();
    }

    /// Get the stringified value, borrowed when the value is already text
    pub fn text(&self) -> Cow<'_, str> {
        match &self.value {
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn force_quote(&self) -> bool {
        self.force_quote
    }

    pub fn set_force_quote(&mut self, force_quote: bool) {
        self.force_quote = force_quote;
    }

    /// Check if the column stringifies to the empty string
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Encode this column to its CSV field form
    pub fn to_csv_value(&self, dialect: &Dialect) -> String {
        encode_str(&self.text(), self.force_quote, dialect).into_owned()
    }
}

impl From<Value> for Column {
    fn from(value: Value) -> Self {
        Column::new(value)
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Column::new(value)
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::new(value)
    }
}
