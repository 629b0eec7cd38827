pub mod driver;
pub mod loader;
pub mod runtime;
pub mod symbol_map;

pub use driver::{Config, Driver, InterpreterError};
pub use loader::{load_program, LoadError};
pub use runtime::{Environment, Limits, RuntimeError, VM};
pub use symbol_map::SymbolMap;
