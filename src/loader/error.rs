use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadErrorKind {
    #[error("unexpected character `{0}`")]
    Unexpected(char),
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("unclosed string literal")]
    UnclosedString,
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("invalid name `{0}`")]
    InvalidName(String),
    #[error("class `{0}` is already defined")]
    DuplicateClass(String),
    #[error("function `{func}` is already defined in class `{class}`")]
    DuplicateFunction { class: String, func: String },
    #[error("loop head `/` must be followed by a name")]
    LoopWithoutCondition,
    #[error("loop tail `\\` without an open loop")]
    UnmatchedLoopTail,
    #[error("loop is never closed with `\\`")]
    UnclosedLoop,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, (line, column): (usize, usize)) -> Self {
        Self { kind, line, column }
    }

    pub fn render(&self) -> String {
        format!("load error at {}:{}: {}", self.line, self.column, self.kind)
    }
}
