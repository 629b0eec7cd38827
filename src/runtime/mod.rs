mod builtin_funcs;
mod call_frame;
mod constants;
mod environment;
mod error;
mod object;
mod recursion;
mod scope;
mod stack;
mod token;
mod value;
mod vm;

#[cfg(test)]
mod tests;

pub use builtin_funcs::{
    ARITH_CLASS, BUILTIN_CLASSES, INPUT_CLASS, OUTPUT_CLASS, STRING_CLASS, VAR_CLASS,
};
pub use constants::{
    BUILTIN_CLASS_COUNT, CONSTRUCTOR_NAME, DESTRUCTOR_NAME, MAIN_CLASS_NAME, MAIN_FUNC_NAME,
    MAX_CALL_DEPTH, MAX_LOOP_DEPTH, STACK_GROW_INCREMENT, STACK_SHRINK_MARGIN,
};
pub use environment::{Class, Environment, Func};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use object::{Heap, Instance, ObjectRef};
pub use scope::resolve;
pub use stack::Stack;
pub use token::{Token, FUNC_END, LOOP_HEAD, LOOP_TAIL, OPERATORS};
pub use value::{FuncRef, Value};
pub use vm::{Limits, VM};
