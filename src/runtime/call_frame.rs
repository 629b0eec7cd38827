use super::error::{RuntimeError, RuntimeErrorKind};
use super::object::ObjectRef;
use super::value::{FuncRef, Value};

/// One activation of a user-defined function.
pub struct CallFrame {
    func: FuncRef,
    ip: usize,
    locals: Vec<Value>,
    loop_heads: Vec<usize>,
}

impl CallFrame {
    pub fn new(func: FuncRef, start: usize, slot_count: usize) -> Self {
        Self {
            func,
            ip: start,
            locals: vec![Value::None; slot_count],
            loop_heads: vec![],
        }
    }

    pub fn receiver(&self) -> ObjectRef {
        self.func.receiver
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn set_ip(&mut self, ip: usize) {
        self.ip = ip;
    }

    pub fn locals_mut(&mut self) -> &mut [Value] {
        &mut self.locals
    }

    /// Records `head` as the innermost loop unless it already is, which is
    /// the case when a loop tail jumped back to re-test the condition.
    pub fn enter_loop(&mut self, head: usize, max_depth: usize) -> Result<(), RuntimeError> {
        if self.loop_heads.last() == Some(&head) {
            return Ok(());
        }

        if self.loop_heads.len() >= max_depth {
            return Err(RuntimeError::new(
                RuntimeErrorKind::LoopDepthExceeded,
                format!("loops nested deeper than {max_depth}"),
            ));
        }

        self.loop_heads.push(head);

        Ok(())
    }

    pub fn exit_loop(&mut self) {
        self.loop_heads.pop();
    }

    pub fn innermost_loop(&self) -> Option<usize> {
        self.loop_heads.last().copied()
    }

    pub fn loop_depth(&self) -> usize {
        self.loop_heads.len()
    }
}
