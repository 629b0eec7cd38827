use thiserror::Error;

use crate::loader::LoadError;
use crate::runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    LoadError(#[from] LoadError),
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no program given, pass a file, --inline or --stdin")]
    NoInput,
}

impl InterpreterError {
    pub fn render(&self) -> String {
        match self {
            InterpreterError::LoadError(err) => err.render(),
            InterpreterError::RuntimeError(err) => err.render(),
            other => other.to_string(),
        }
    }

    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            InterpreterError::RuntimeError(err) => err.diagnostics(),
            _ => vec![],
        }
    }
}
