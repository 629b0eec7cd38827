//! Runtime configuration constants for the Glass VM
//!
//! This module centralizes the limits and reserved names used throughout the runtime.

/// Number of value slots the operand stack grows by when it is full
pub const STACK_GROW_INCREMENT: usize = 1000;

/// Margin below capacity the stack length has to drop before shrinking
///
/// Kept larger than the grow increment so a stack hovering around one
/// capacity boundary does not reallocate on every push/pop pair.
pub const STACK_SHRINK_MARGIN: usize = 1500;

/// Maximum number of nested loops within a single function activation
pub const MAX_LOOP_DEPTH: usize = 64;

/// Maximum depth of nested function activations
///
/// Each `?` nests one native call, so this turns runaway recursion into a
/// runtime error instead of a host stack overflow.
pub const MAX_CALL_DEPTH: usize = 1000;

/// Number of built-in classes, always occupying class indices 0..5
pub const BUILTIN_CLASS_COUNT: usize = 5;

/// Function run once on every new instance of a class declaring it
pub const CONSTRUCTOR_NAME: &str = "c__";

/// Reserved in the class table, never invoked
pub const DESTRUCTOR_NAME: &str = "d__";

pub const MAIN_CLASS_NAME: &str = "M";
pub const MAIN_FUNC_NAME: &str = "m";
