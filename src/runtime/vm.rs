use std::io::Write;

use crate::symbol_map::SymID;

use super::builtin_funcs;
use super::call_frame::CallFrame;
use super::constants::{MAIN_CLASS_NAME, MAIN_FUNC_NAME, MAX_CALL_DEPTH, MAX_LOOP_DEPTH};
use super::environment::Environment;
use super::error::{RuntimeError, RuntimeErrorKind};
use super::object::{Heap, ObjectRef};
use super::recursion::ensure_sufficient_stack;
use super::scope;
use super::stack::Stack;
use super::token::{Token, LOOP_HEAD, LOOP_TAIL};
use super::value::{FuncRef, Value};

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_loop_depth: usize,
    pub max_call_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_loop_depth: MAX_LOOP_DEPTH,
            max_call_depth: MAX_CALL_DEPTH,
        }
    }
}

enum Flow {
    Next,
    Jump(usize),
    Return,
}

/// Interprets the token stream of an `Environment`.
///
/// The VM owns everything that changes during a run: global storage, the
/// instance heap and the operand stack. Nested calls reuse all three; only
/// the `CallFrame` is per activation.
pub struct VM<'env> {
    env: &'env Environment,
    globals: Vec<Value>,
    heap: Heap,
    stack: Stack,
    out: Box<dyn Write + 'env>,
    limits: Limits,
    depth: usize,
}

impl<'env> VM<'env> {
    pub fn new(env: &'env Environment, out: Box<dyn Write + 'env>, limits: Limits) -> Self {
        Self {
            env,
            globals: vec![Value::None; env.syms().len()],
            heap: Heap::new(),
            stack: Stack::new(),
            out,
            limits,
            depth: 0,
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn global(&self, name: SymID) -> Option<&Value> {
        self.globals.get(name.index())
    }

    pub fn field(&self, obj: ObjectRef, name: SymID) -> Option<&Value> {
        self.heap.get(obj).slots().get(name.index())
    }

    /// Instantiates `M`, then runs its `m`. Output is flushed whether or not
    /// the run succeeds; a failure carries a dump of the stack.
    pub fn run_main(&mut self) -> Result<(), RuntimeError> {
        let result = self.run_entry();
        let flushed = self
            .out
            .flush()
            .map_err(|err| RuntimeError::new(RuntimeErrorKind::OutputFailed, err.to_string()));

        match result {
            Ok(()) => flushed,
            Err(err) => Err(err.with_stack(self.stack.dump(self.env.syms()))),
        }
    }

    fn run_entry(&mut self) -> Result<(), RuntimeError> {
        let env = self.env;
        let class = env
            .syms()
            .lookup(MAIN_CLASS_NAME)
            .and_then(|name| env.class_by_name(name))
            .ok_or_else(|| unresolved(format!("program has no main class `{MAIN_CLASS_NAME}`")))?;

        let receiver = self.instantiate(class)?;

        let func = env
            .syms()
            .lookup(MAIN_FUNC_NAME)
            .and_then(|name| env.class(class)?.func_index(name))
            .ok_or_else(|| {
                unresolved(format!(
                    "class `{MAIN_CLASS_NAME}` has no main function `{MAIN_FUNC_NAME}`"
                ))
            })?;

        self.call(FuncRef {
            class,
            func,
            receiver,
        })
    }

    /// Allocates an instance of `class` and runs its constructor, if the
    /// class declares one, against the new instance.
    pub fn instantiate(&mut self, class: usize) -> Result<ObjectRef, RuntimeError> {
        let obj = self.heap.alloc(class, self.env.syms().len());

        tracing::debug!(class, object = %obj, "instantiate");

        if let Some(func) = self.env.constructor(class) {
            self.call(FuncRef {
                class,
                func,
                receiver: obj,
            })?;
        }

        Ok(obj)
    }

    /// Runs `func` to completion on the shared stack.
    pub fn call(&mut self, func: FuncRef) -> Result<(), RuntimeError> {
        let env = self.env;

        if env.is_builtin(func.class) {
            return builtin_funcs::call(
                func.class,
                func.func,
                &mut self.stack,
                env.syms(),
                self.out.as_mut(),
            );
        }

        let start = env.func_start(func.class, func.func).ok_or_else(|| {
            unresolved(format!(
                "class {} has no function {}",
                func.class, func.func
            ))
        })?;

        if self.depth >= self.limits.max_call_depth {
            return Err(RuntimeError::new(
                RuntimeErrorKind::CallDepthExceeded,
                format!("calls nested deeper than {}", self.limits.max_call_depth),
            ));
        }

        tracing::debug!(
            class = func.class,
            func = func.func,
            receiver = %func.receiver,
            depth = self.depth,
            "call"
        );

        let mut frame = CallFrame::new(func, start, env.syms().len());

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.run_frame(&mut frame));
        self.depth -= 1;

        result
    }

    fn run_frame(&mut self, frame: &mut CallFrame) -> Result<(), RuntimeError> {
        loop {
            let ip = frame.ip();
            let token = self.env.token(ip).ok_or_else(|| {
                RuntimeError::bad_token(format!("token {ip} is past the end of the program"))
            })?;

            match self.step(frame, ip, token).map_err(|err| err.at(ip))? {
                Flow::Next => frame.set_ip(ip + 1),
                Flow::Jump(target) => frame.set_ip(target),
                Flow::Return => return Ok(()),
            }
        }
    }

    fn step(&mut self, frame: &mut CallFrame, ip: usize, token: Token) -> Result<Flow, RuntimeError> {
        match token {
            Token::Name(id) => self.stack.push(Value::Name(id)),
            Token::Number(n) => self.stack.push(Value::Number(n)),
            Token::Str(idx) => {
                let s = self.env.string(idx).ok_or_else(|| {
                    RuntimeError::bad_token(format!("string literal {idx} does not exist"))
                })?;

                self.stack.push(Value::Str(s.to_string()));
            }
            Token::Peek(depth) => {
                let value = self.stack.peek(depth)?.clone();

                self.stack.push(value);
            }
            Token::Op(op) => return self.operator(frame, ip, op),
        }

        Ok(Flow::Next)
    }

    fn operator(&mut self, frame: &mut CallFrame, ip: usize, op: char) -> Result<Flow, RuntimeError> {
        match op {
            ',' => {
                self.stack.pop()?;
            }
            '^' | ']' => return Ok(Flow::Return),
            '=' => {
                let value = self.stack.pop()?;
                let name = self.pop_name(op)?;

                *self.slot(frame, name)? = value;
            }
            '!' => {
                let class_name = self.pop_name(op)?;
                let target = self.pop_name(op)?;
                let class = self.env.class_by_name(class_name).ok_or_else(|| {
                    unresolved(format!("`{}` is not a class", self.display(class_name)))
                })?;
                let obj = self.instantiate(class)?;

                *self.slot(frame, target)? = Value::Object(obj);
            }
            '.' => {
                let func_name = self.pop_name(op)?;
                let obj_name = self.pop_name(op)?;
                let func = self.bind(frame, obj_name, func_name)?;

                self.stack.push(Value::Func(func));
            }
            '?' => match self.stack.pop()? {
                Value::Func(func) => self.call(func)?,
                other => {
                    return Err(RuntimeError::type_error(format!(
                        "operand of `?` must be a function, found {}",
                        other.type_str()
                    )))
                }
            },
            '*' => {
                let name = self.pop_name(op)?;
                let value = self.read(frame, name)?;

                self.stack.push(value);
            }
            '$' => {
                let name = self.pop_name(op)?;
                let receiver = frame.receiver();

                *self.slot(frame, name)? = Value::Object(receiver);
            }
            LOOP_HEAD => return self.loop_head(frame, ip),
            LOOP_TAIL => {
                let head = frame.innermost_loop().ok_or_else(|| {
                    RuntimeError::bad_token("loop tail `\\` without an open loop")
                })?;

                return Ok(Flow::Jump(head));
            }
            _ => {
                return Err(RuntimeError::bad_token(format!("unknown operator `{op}`")));
            }
        }

        Ok(Flow::Next)
    }

    fn loop_head(&mut self, frame: &mut CallFrame, ip: usize) -> Result<Flow, RuntimeError> {
        let cond = match self.env.token(ip + 1) {
            Some(Token::Name(id)) => id,
            _ => {
                return Err(RuntimeError::bad_token(
                    "loop head `/` must be followed by a name",
                ))
            }
        };

        frame.enter_loop(ip, self.limits.max_loop_depth)?;

        let truthy = match self.read(frame, cond)? {
            Value::Number(n) => n != 0,
            other => {
                return Err(RuntimeError::type_error(format!(
                    "loop condition `{}` must hold a number, found {}",
                    self.display(cond),
                    other.type_str()
                )))
            }
        };

        tracing::trace!(head = ip, truthy, depth = frame.loop_depth(), "loop");

        if truthy {
            return Ok(Flow::Jump(ip + 2));
        }

        let tail = self.find_loop_tail(ip)?;
        frame.exit_loop();

        Ok(Flow::Jump(tail + 1))
    }

    /// Scans forward from the loop head at `head` to its matching tail.
    fn find_loop_tail(&self, head: usize) -> Result<usize, RuntimeError> {
        let mut nested = 0;
        let mut ip = head + 1;

        loop {
            match self.env.token(ip) {
                Some(Token::Op(LOOP_HEAD)) => nested += 1,
                Some(Token::Op(LOOP_TAIL)) if nested == 0 => return Ok(ip),
                Some(Token::Op(LOOP_TAIL)) => nested -= 1,
                Some(token) if token.is_func_end() => break,
                Some(_) => {}
                None => break,
            }

            ip += 1;
        }

        Err(RuntimeError::bad_token(format!(
            "loop head at token {head} has no matching `\\`"
        )))
    }

    fn bind(
        &mut self,
        frame: &mut CallFrame,
        obj_name: SymID,
        func_name: SymID,
    ) -> Result<FuncRef, RuntimeError> {
        let receiver = match self.read(frame, obj_name)? {
            Value::Object(obj) => obj,
            other => {
                return Err(RuntimeError::type_error(format!(
                    "`{}` must hold an object, found {}",
                    self.display(obj_name),
                    other.type_str()
                )))
            }
        };

        let class = self.heap.get(receiver).class();
        let func = self
            .env
            .class(class)
            .and_then(|c| c.func_index(func_name))
            .ok_or_else(|| {
                let class_name = self
                    .env
                    .class(class)
                    .map(|c| self.display(c.name))
                    .unwrap_or_else(|| class.to_string());

                unresolved(format!(
                    "class `{class_name}` has no function `{}`",
                    self.display(func_name)
                ))
            })?;

        Ok(FuncRef {
            class,
            func,
            receiver,
        })
    }

    fn read(&mut self, frame: &mut CallFrame, name: SymID) -> Result<Value, RuntimeError> {
        let value = self.slot(frame, name)?.clone();

        if value.is_none() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::UninitializedRead,
                format!("`{}` has no value in the current scope", self.display(name)),
            ));
        }

        Ok(value)
    }

    fn slot<'a>(&'a mut self, frame: &'a mut CallFrame, name: SymID) -> Result<&'a mut Value, RuntimeError> {
        let receiver = self.heap.get_mut(frame.receiver());

        scope::resolve(
            self.env.syms(),
            name,
            &mut self.globals,
            receiver.slots_mut(),
            frame.locals_mut(),
        )
    }

    fn pop_name(&mut self, op: char) -> Result<SymID, RuntimeError> {
        match self.stack.pop()? {
            Value::Name(id) => Ok(id),
            other => Err(RuntimeError::type_error(format!(
                "operand of `{op}` must be a name, found {}",
                other.type_str()
            ))),
        }
    }

    fn display(&self, name: SymID) -> String {
        self.env.syms().display(name)
    }
}

fn unresolved(message: String) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::UnresolvedName, message)
}
