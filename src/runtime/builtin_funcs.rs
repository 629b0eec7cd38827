use std::io::Write;

use crate::symbol_map::SymbolMap;

use super::constants::BUILTIN_CLASS_COUNT;
use super::error::{RuntimeError, RuntimeErrorKind};
use super::stack::Stack;
use super::value::Value;

pub const ARITH_CLASS: usize = 0;
pub const STRING_CLASS: usize = 1;
pub const VAR_CLASS: usize = 2;
pub const OUTPUT_CLASS: usize = 3;
pub const INPUT_CLASS: usize = 4;

/// Built-in classes and their functions, in the order programs index them.
pub const BUILTIN_CLASSES: [(&str, &[&str]); BUILTIN_CLASS_COUNT] = [
    ("A", &["a", "s", "m", "d", "mod", "f", "e", "ne", "lt", "le", "gt", "ge"]),
    ("S", &["l", "i", "si", "a", "d", "e", "ns", "sn"]),
    ("V", &["n", "d"]),
    ("O", &["o", "on"]),
    ("I", &["l", "c", "e"]),
];

/// Runs built-in function `func` of built-in class `class`. Arguments and
/// results travel on `stack`; `O` writes to `out`.
pub fn call(
    class: usize,
    func: usize,
    stack: &mut Stack,
    syms: &SymbolMap,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let (class_name, funcs) = BUILTIN_CLASSES.get(class).ok_or_else(|| {
        RuntimeError::bad_token(format!("class {class} is not a built-in class"))
    })?;
    let func_name = funcs.get(func).ok_or_else(|| {
        RuntimeError::bad_token(format!("{class_name} has no function {func}"))
    })?;
    let qualified = format!("{class_name}.{func_name}");

    match class {
        ARITH_CLASS => arith(func_name, &qualified, stack),
        STRING_CLASS => string(func_name, &qualified, stack),
        OUTPUT_CLASS => output(func_name, &qualified, stack, syms, out),
        VAR_CLASS | INPUT_CLASS => Err(RuntimeError::new(
            RuntimeErrorKind::NotSupported,
            format!("class {class_name} is reserved and not supported ({qualified})"),
        )),
        _ => unreachable!("class index checked against BUILTIN_CLASSES"),
    }
}

fn arith(func: &str, qualified: &str, stack: &mut Stack) -> Result<(), RuntimeError> {
    let y = pop_number(stack, qualified)?;

    // reserved for fractional numbers; integers pass through untouched
    if func == "f" {
        stack.push(Value::Number(y));
        return Ok(());
    }

    let x = pop_number(stack, qualified)?;

    let result = match func {
        "a" => x.wrapping_add(y),
        "s" => x.wrapping_sub(y),
        "m" => x.wrapping_mul(y),
        "d" => nonzero(y, qualified).map(|y| x.wrapping_div(y))?,
        "mod" => nonzero(y, qualified).map(|y| x.wrapping_rem(y))?,
        "e" => (x == y) as i64,
        "ne" => (x != y) as i64,
        "lt" => (x < y) as i64,
        "le" => (x <= y) as i64,
        "gt" => (x > y) as i64,
        "ge" => (x >= y) as i64,
        _ => unreachable!("A functions are listed in BUILTIN_CLASSES"),
    };

    stack.push(Value::Number(result));

    Ok(())
}

fn string(func: &str, qualified: &str, stack: &mut Stack) -> Result<(), RuntimeError> {
    match func {
        "l" => {
            let s = pop_string(stack, qualified)?;

            stack.push(Value::Number(s.chars().count() as i64));
        }
        "i" => {
            let idx = pop_number(stack, qualified)?;
            let s = pop_string(stack, qualified)?;
            let chars: Vec<char> = s.chars().collect();
            let idx = char_index(idx, chars.len(), qualified)?;

            stack.push(Value::Str(chars[idx].to_string()));
        }
        "si" => {
            let replacement = single_char(pop_string(stack, qualified)?, qualified)?;
            let idx = pop_number(stack, qualified)?;
            let s = pop_string(stack, qualified)?;
            let mut chars: Vec<char> = s.chars().collect();
            let idx = char_index(idx, chars.len(), qualified)?;

            chars[idx] = replacement;
            stack.push(Value::Str(chars.into_iter().collect()));
        }
        "a" => {
            let y = pop_string(stack, qualified)?;
            let mut x = pop_string(stack, qualified)?;

            x.push_str(&y);
            stack.push(Value::Str(x));
        }
        "d" => {
            let idx = pop_number(stack, qualified)?;
            let s = pop_string(stack, qualified)?;
            let chars: Vec<char> = s.chars().collect();
            // splitting at the end is allowed and leaves an empty tail
            let idx = char_index(idx, chars.len() + 1, qualified)?;

            stack.push(Value::Str(chars[..idx].iter().collect()));
            stack.push(Value::Str(chars[idx..].iter().collect()));
        }
        "e" => {
            let y = pop_string(stack, qualified)?;
            let x = pop_string(stack, qualified)?;

            stack.push(Value::Number((x == y) as i64));
        }
        "ns" => {
            let n = pop_number(stack, qualified)?;
            let byte = u8::try_from(n).map_err(|_| {
                RuntimeError::new(
                    RuntimeErrorKind::OutOfRange,
                    format!("{qualified} expects a character code in 0..=255, found {n}"),
                )
            })?;

            stack.push(Value::Str(char::from(byte).to_string()));
        }
        "sn" => {
            let c = single_char(pop_string(stack, qualified)?, qualified)?;
            let code = c as u32;

            if code > 255 {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::OutOfRange,
                    format!("{qualified} expects a character code in 0..=255, found {code}"),
                ));
            }

            stack.push(Value::Number(code as i64));
        }
        _ => unreachable!("S functions are listed in BUILTIN_CLASSES"),
    }

    Ok(())
}

fn output(
    func: &str,
    qualified: &str,
    stack: &mut Stack,
    syms: &SymbolMap,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let written = match (func, stack.pop()?) {
        ("o", Value::Name(id)) => writeln!(out, "{}", syms.display(id)),
        ("o", Value::Str(s)) => write!(out, "{s}"),
        ("on", Value::Number(n)) => writeln!(out, "{n}"),
        ("o", other) => {
            return Err(RuntimeError::type_error(format!(
                "{qualified} expects a string or a name, found {}",
                other.type_str()
            )))
        }
        (_, other) => {
            return Err(RuntimeError::type_error(format!(
                "{qualified} expects a number, found {}",
                other.type_str()
            )))
        }
    };

    written.map_err(|err| RuntimeError::new(RuntimeErrorKind::OutputFailed, err.to_string()))
}

fn pop_number(stack: &mut Stack, qualified: &str) -> Result<i64, RuntimeError> {
    match stack.pop()? {
        Value::Number(n) => Ok(n),
        other => Err(RuntimeError::type_error(format!(
            "{qualified} expects a number, found {}",
            other.type_str()
        ))),
    }
}

fn pop_string(stack: &mut Stack, qualified: &str) -> Result<String, RuntimeError> {
    match stack.pop()? {
        Value::Str(s) => Ok(s),
        other => Err(RuntimeError::type_error(format!(
            "{qualified} expects a string, found {}",
            other.type_str()
        ))),
    }
}

fn single_char(s: String, qualified: &str) -> Result<char, RuntimeError> {
    let mut chars = s.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(RuntimeError::type_error(format!(
            "{qualified} expects a single character, found {s:?}"
        ))),
    }
}

fn char_index(idx: i64, len: usize, qualified: &str) -> Result<usize, RuntimeError> {
    usize::try_from(idx)
        .ok()
        .filter(|idx| *idx < len)
        .ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::OutOfRange,
                format!("{qualified} index {idx} is out of range"),
            )
        })
}

fn nonzero(y: i64, qualified: &str) -> Result<i64, RuntimeError> {
    if y == 0 {
        return Err(RuntimeError::new(
            RuntimeErrorKind::DivideByZero,
            format!("{qualified} by zero"),
        ));
    }

    Ok(y)
}
