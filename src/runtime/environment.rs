use crate::symbol_map::{SymID, SymbolMap};

use super::builtin_funcs::BUILTIN_CLASSES;
use super::constants::{
    BUILTIN_CLASS_COUNT, CONSTRUCTOR_NAME, DESTRUCTOR_NAME, MAIN_CLASS_NAME, MAIN_FUNC_NAME,
};
use super::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub name: SymID,
    /// Offset of the first body token. Built-in functions have no body.
    pub start: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: SymID,
    pub funcs: Vec<Func>,
}

impl Class {
    pub fn func_index(&self, name: SymID) -> Option<usize> {
        self.funcs.iter().position(|func| func.name == name)
    }
}

/// The loaded program: names, classes, one flat token stream holding
/// every function body, and the string literal table.
///
/// Built by the loader and only read afterwards; run-time state (globals,
/// instances, the stack) lives in the VM.
#[derive(Debug, Clone)]
pub struct Environment {
    syms: SymbolMap,
    classes: Vec<Class>,
    tokens: Vec<Token>,
    strings: Vec<String>,
}

impl Environment {
    /// An environment holding only the built-in classes, in canonical order.
    pub fn new() -> Self {
        let mut syms = SymbolMap::new();

        for reserved in [CONSTRUCTOR_NAME, DESTRUCTOR_NAME, MAIN_CLASS_NAME, MAIN_FUNC_NAME] {
            syms.get_id(reserved);
        }

        let classes = BUILTIN_CLASSES
            .iter()
            .map(|(class_name, func_names)| Class {
                name: syms.get_id(class_name),
                funcs: func_names
                    .iter()
                    .map(|func_name| Func {
                        name: syms.get_id(func_name),
                        start: None,
                    })
                    .collect(),
            })
            .collect();

        Self {
            syms,
            classes,
            tokens: vec![],
            strings: vec![],
        }
    }

    pub(crate) fn intern(&mut self, name: &str) -> SymID {
        self.syms.get_id(name)
    }

    pub(crate) fn add_class(&mut self, name: SymID) -> usize {
        self.classes.push(Class {
            name,
            funcs: vec![],
        });

        self.classes.len() - 1
    }

    /// Registers a function whose body starts at the next pushed token.
    pub(crate) fn begin_func(&mut self, class: usize, name: SymID) -> usize {
        let start = self.tokens.len();
        let funcs = &mut self.classes[class].funcs;

        funcs.push(Func {
            name,
            start: Some(start),
        });

        funcs.len() - 1
    }

    pub(crate) fn push_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn add_string(&mut self, s: String) -> usize {
        self.strings.push(s);
        self.strings.len() - 1
    }

    pub fn syms(&self) -> &SymbolMap {
        &self.syms
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class(&self, idx: usize) -> Option<&Class> {
        self.classes.get(idx)
    }

    pub fn class_by_name(&self, name: SymID) -> Option<usize> {
        self.classes.iter().position(|class| class.name == name)
    }

    pub fn is_builtin(&self, class: usize) -> bool {
        class < BUILTIN_CLASS_COUNT
    }

    pub fn func_start(&self, class: usize, func: usize) -> Option<usize> {
        self.classes.get(class)?.funcs.get(func)?.start
    }

    pub fn constructor(&self, class: usize) -> Option<usize> {
        let name = self.syms.lookup(CONSTRUCTOR_NAME)?;

        self.classes.get(class)?.func_index(name)
    }

    pub fn token(&self, ip: usize) -> Option<Token> {
        self.tokens.get(ip).copied()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn string(&self, idx: usize) -> Option<&str> {
        self.strings.get(idx).map(String::as_str)
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Dumps every user-defined function body in source syntax, one
    /// function per line.
    pub fn render_tokens(&self) -> String {
        let mut out = String::new();

        for class in self.classes.iter().skip(BUILTIN_CLASS_COUNT) {
            out.push_str(&format!("class {}\n", self.syms.display(class.name)));

            for func in class.funcs.iter() {
                out.push_str(&format!("  {}: ", self.syms.display(func.name)));

                if let Some(start) = func.start {
                    for token in self.tokens[start..].iter() {
                        out.push_str(&token.render(&self.syms, &self.strings));

                        if token.is_func_end() {
                            break;
                        }
                    }
                }

                out.push('\n');
            }
        }

        out
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::token::FUNC_END;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_occupy_the_first_five_classes() {
        let env = Environment::new();
        let names: Vec<String> = env
            .classes()
            .iter()
            .map(|class| env.syms().display(class.name))
            .collect();

        assert_eq!(names, vec!["A", "S", "V", "O", "I"]);

        let arith = env.class(0).unwrap();
        let sub = env.syms().lookup("s").unwrap();
        let floor = env.syms().lookup("f").unwrap();
        assert_eq!(arith.func_index(sub), Some(1));
        assert_eq!(arith.func_index(floor), Some(5));
        assert!(env.is_builtin(4));
        assert!(!env.is_builtin(5));
    }

    #[test]
    fn user_functions_record_their_start() {
        let mut env = Environment::new();
        let name = env.intern("C");
        let class = env.add_class(name);
        let ctor = env.intern(CONSTRUCTOR_NAME);
        let x = env.intern("x");

        env.push_token(Token::Number(0));
        let func = env.begin_func(class, ctor);
        env.push_token(Token::Name(x));
        env.push_token(FUNC_END);

        assert_eq!(class, BUILTIN_CLASS_COUNT);
        assert_eq!(env.func_start(class, func), Some(1));
        assert_eq!(env.constructor(class), Some(func));
        assert_eq!(env.constructor(0), None);
        assert_eq!(env.class_by_name(name), Some(class));
        assert_eq!(env.render_tokens(), "class C\n  c__: (x)]\n");
    }
}
