use std::fmt::{self, Display};

/// The unit the diff compares. A document range flattens into exactly one
/// token per position.
///
/// `detail` and `marks` hold the canonical encoding of whatever the
/// [`TokenEncoder`](crate::tokenizer::TokenEncoder) considers significant
/// about a node or a character's marks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Character { ch: char, marks: String },
    Leaf { kind: String, detail: String },
    Open { kind: String, detail: String },
    /// End of a container, optionally tagged with the container's type id.
    Close(u32),
    /// Stands in for the content of fenced nodes which are known to be equal
    /// on both sides.
    ForcedMatch,
}

impl Token {
    #[must_use]
    pub fn character(ch: char) -> Self {
        Token::Character {
            ch,
            marks: String::new(),
        }
    }

    #[must_use]
    pub fn open(kind: impl Into<String>) -> Self {
        Token::Open {
            kind: kind.into(),
            detail: String::new(),
        }
    }

    /// Whether this opens a container of one of the given types.
    #[must_use]
    pub fn opens_any(&self, kinds: &[String]) -> bool {
        matches!(self, Token::Open { kind, .. } if kinds.contains(kind))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Character { ch, .. } => write!(f, "{ch}"),
            Token::Leaf { kind, .. } => write!(f, "[{kind}]"),
            Token::Open { kind, .. } => write!(f, "<{kind}>"),
            Token::Close(_) => write!(f, "</>"),
            Token::ForcedMatch => write!(f, "#"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_differs_from_characters() {
        assert_ne!(Token::Close(0), Token::character('\0'));
        assert_ne!(Token::ForcedMatch, Token::Close(0));
    }

    #[test]
    fn test_opens_any() {
        let kinds = vec!["heading".to_owned()];
        assert!(Token::open("heading").opens_any(&kinds));
        assert!(!Token::open("paragraph").opens_any(&kinds));
        assert!(!Token::Close(0).opens_any(&kinds));
    }
}
