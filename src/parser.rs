use std::fmt;

/// Leading digit of a status code. Displays as `4XX` for `404`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusClass(u8);

impl StatusClass {
    pub fn from_digit(digit: u8) -> Option<Self> {
        digit.is_ascii_digit().then_some(Self(digit))
    }

    pub fn digit(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}XX", self.digit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine {
    Status(StatusClass),
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("status code column {column} out of range (line has {fields} fields)")]
    MalformedLine { column: usize, fields: usize },
    #[error("field {field:?} does not start with a status code digit")]
    NotAStatusCode { field: String },
}

/// Classify one access-log line.
///
/// `#` lines are directives/comments and never yield a status. Everything
/// else is split on whitespace and the field at `column` must start with a
/// digit.
pub fn parse_line(line: &str, column: usize) -> Result<ParsedLine, ParseError> {
    if line.starts_with('#') {
        return Ok(ParsedLine::Comment);
    }

    let mut fields = line.split_whitespace();
    let Some(field) = fields.nth(column) else {
        return Err(ParseError::MalformedLine {
            column,
            fields: line.split_whitespace().count(),
        });
    };

    field
        .bytes()
        .next()
        .and_then(StatusClass::from_digit)
        .map(ParsedLine::Status)
        .ok_or_else(|| ParseError::NotAStatusCode {
            field: field.to_string(),
        })
}
