use crate::symbol_map::SymbolMap;

use super::constants::{STACK_GROW_INCREMENT, STACK_SHRINK_MARGIN};
use super::error::{RuntimeError, RuntimeErrorKind};
use super::value::Value;

/// The operand stack shared by every activation of one run.
///
/// Capacity is managed explicitly: it grows by `STACK_GROW_INCREMENT` when
/// full and only shrinks (by `STACK_SHRINK_MARGIN`) once the length has
/// fallen more than that margin below it.
#[derive(Debug)]
pub struct Stack {
    values: Vec<Value>,
    capacity: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            values: Vec::with_capacity(STACK_GROW_INCREMENT),
            capacity: STACK_GROW_INCREMENT,
        }
    }

    pub fn push(&mut self, value: Value) {
        if self.values.len() >= self.capacity {
            self.capacity += STACK_GROW_INCREMENT;
            self.values.reserve_exact(self.capacity - self.values.len());
        }

        self.values.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        let value = self.values.pop().ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::StackUnderflow,
                "cannot pop from an empty stack",
            )
        })?;

        if self.capacity > STACK_SHRINK_MARGIN
            && self.values.len() < self.capacity - STACK_SHRINK_MARGIN
        {
            self.capacity -= STACK_SHRINK_MARGIN;
            self.values.shrink_to(self.capacity);
        }

        Ok(value)
    }

    /// Looks `depth` values below the top without removing anything;
    /// `peek(0)` is the top.
    pub fn peek(&self, depth: usize) -> Result<&Value, RuntimeError> {
        let len = self.values.len();

        if depth >= len {
            return Err(RuntimeError::new(
                RuntimeErrorKind::StackUnderflow,
                format!("cannot peek {depth} below the top of a stack holding {len} values"),
            ));
        }

        Ok(&self.values[len - 1 - depth])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn dump(&self, syms: &SymbolMap) -> Vec<String> {
        self.values.iter().map(|value| value.render(syms)).collect()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = Stack::new();

        for n in 0..5 {
            stack.push(Value::Number(n));
        }

        for n in (0..5).rev() {
            assert_eq!(stack.pop().unwrap(), Value::Number(n));
        }

        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        let err = stack.pop().unwrap_err();

        assert_eq!(err.kind, RuntimeErrorKind::StackUnderflow);

        stack.push(Value::Number(1));
        stack.pop().unwrap();

        assert_eq!(stack.pop().unwrap_err().kind, RuntimeErrorKind::StackUnderflow);
    }

    #[test]
    fn peek_counts_down_from_the_top() {
        let mut stack = Stack::new();

        stack.push(Value::Number(10));
        stack.push(Value::Str("x".to_string()));

        assert_eq!(stack.peek(0).unwrap(), &Value::Str("x".to_string()));
        assert_eq!(stack.peek(1).unwrap(), &Value::Number(10));
        assert_eq!(stack.peek(2).unwrap_err().kind, RuntimeErrorKind::StackUnderflow);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn capacity_grows_and_shrinks_with_hysteresis() {
        let mut stack = Stack::new();

        assert_eq!(stack.capacity(), STACK_GROW_INCREMENT);

        for n in 0..=STACK_GROW_INCREMENT {
            stack.push(Value::Number(n as i64));
        }

        let grown = 2 * STACK_GROW_INCREMENT;
        assert_eq!(stack.capacity(), grown);

        // hovering at the boundary never shrinks
        stack.pop().unwrap();
        stack.push(Value::Number(0));
        stack.pop().unwrap();
        assert_eq!(stack.capacity(), grown);

        while stack.len() >= grown - STACK_SHRINK_MARGIN {
            stack.pop().unwrap();
        }

        assert_eq!(stack.capacity(), grown - STACK_SHRINK_MARGIN);
    }
}
