use std::fmt::Display;

use crate::symbol_map::{SymID, SymbolMap};

use super::object::ObjectRef;

/// A function bound to the instance it will run against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FuncRef {
    pub class: usize,
    pub func: usize,
    pub receiver: ObjectRef,
}

/// Everything that can sit on the stack or in a variable slot.
///
/// `Str` owns its text, so cloning a value (which is what pushing a copy
/// of a literal or of another stack slot does) never shares storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Number(i64),
    Name(SymID),
    Str(String),
    Object(ObjectRef),
    Func(FuncRef),
}

impl Value {
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Number(_) => "number",
            Value::Name(_) => "name",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Func(_) => "function",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Renders the value for diagnostics, resolving names to their text.
    pub fn render(&self, syms: &SymbolMap) -> String {
        match self {
            Value::Name(id) => format!("Name({})", syms.display(*id)),
            _ => self.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Name(id) => write!(f, "Name({id})"),
            Value::Str(s) => write!(f, "String({s:?})"),
            Value::Object(obj) => write!(f, "Object({obj})"),
            Value::Func(func) => write!(
                f,
                "Func(class {}, func {}, {})",
                func.class, func.func, func.receiver
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_resolves_names() {
        let mut syms = SymbolMap::new();
        let id = syms.get_id("_count");

        assert_eq!(Value::Name(id).render(&syms), "Name(_count)");
        assert_eq!(Value::Number(-4).render(&syms), "Number(-4)");
        assert_eq!(Value::Str("a\nb".to_string()).render(&syms), "String(\"a\\nb\")");
        assert_eq!(Value::None.render(&syms), "None");
    }

    #[test]
    fn cloned_strings_are_independent() {
        let original = Value::Str("abc".to_string());
        let mut copy = original.clone();

        if let Value::Str(s) = &mut copy {
            s.push('d');
        }

        assert_eq!(original, Value::Str("abc".to_string()));
        assert_eq!(copy, Value::Str("abcd".to_string()));
    }
}
