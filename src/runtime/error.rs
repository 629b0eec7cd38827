use thiserror::Error;

#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
    pub position: Option<usize>,
    pub stack: Option<Vec<String>>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            stack: None,
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::TypeError, message)
    }

    pub fn bad_token(message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::BadToken, message)
    }

    /// Records the failing token. The innermost activation wins, so an
    /// error bubbling out of a nested call keeps the callee's position.
    pub fn at(mut self, position: usize) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }

        self
    }

    pub fn with_stack(mut self, stack: Vec<String>) -> Self {
        if self.stack.is_none() {
            self.stack = Some(stack);
        }

        self
    }

    pub fn render(&self) -> String {
        format!("runtime error: {}: {}", self.kind, self.message)
    }

    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = vec![];

        if let Some(position) = self.position {
            lines.push(format!("  at token {position}"));
        }

        if let Some(stack) = &self.stack {
            if stack.is_empty() {
                lines.push("  stack: <empty>".to_string());
            } else {
                lines.push("  stack (top first):".to_string());
                for value in stack.iter().rev() {
                    lines.push(format!("    {value}"));
                }
            }
        }

        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    #[error("stack underflow")]
    StackUnderflow,
    #[error("type error")]
    TypeError,
    #[error("uninitialized read")]
    UninitializedRead,
    #[error("unresolved name")]
    UnresolvedName,
    #[error("bad scope")]
    BadScope,
    #[error("loop depth exceeded")]
    LoopDepthExceeded,
    #[error("bad token")]
    BadToken,
    #[error("not supported")]
    NotSupported,
    #[error("divide by zero")]
    DivideByZero,
    #[error("out of range")]
    OutOfRange,
    #[error("call depth exceeded")]
    CallDepthExceeded,
    #[error("output failed")]
    OutputFailed,
}
