mod error;
mod lexer;

pub use error::{LoadError, LoadErrorKind};
pub use lexer::{Lexeme, Lexer, Pos};

use crate::runtime::{Environment, Token, FUNC_END, LOOP_HEAD, LOOP_TAIL, OPERATORS};
use crate::symbol_map::{Scope, SymID};

/// Loads Glass source into an `Environment` ready to run.
///
/// A program is a sequence of classes `{Name [func ...] ...}`. Function
/// bodies are flattened into the environment's token stream, each one
/// terminated by `]`. Loop heads and tails are checked to pair up within
/// their function; how deep they nest is left to the VM.
pub fn load_program(source: &str) -> Result<Environment, LoadError> {
    let mut loader = Loader {
        lexer: Lexer::new(source),
        env: Environment::new(),
    };

    loop {
        match loader.next()? {
            (Lexeme::End, _) => break,
            (Lexeme::Char('{'), _) => loader.class()?,
            (other, pos) => return Err(expected("`{`", &other, pos)),
        }
    }

    tracing::debug!(
        classes = loader.env.classes().len(),
        names = loader.env.syms().len(),
        tokens = loader.env.tokens().len(),
        "loaded program"
    );

    Ok(loader.env)
}

struct Loader<'a> {
    lexer: Lexer<'a>,
    env: Environment,
}

impl Loader<'_> {
    fn next(&mut self) -> Result<(Lexeme, Pos), LoadError> {
        self.lexer.next_lexeme()
    }

    fn class(&mut self) -> Result<(), LoadError> {
        let (name, pos) = self.name("class name")?;

        if self.env.class_by_name(name).is_some() {
            let text = self.env.syms().display(name);
            return Err(LoadError::new(LoadErrorKind::DuplicateClass(text), pos));
        }

        let class = self.env.add_class(name);

        loop {
            match self.next()? {
                (Lexeme::Char('['), _) => self.function(class)?,
                (Lexeme::Char('}'), _) => return Ok(()),
                (Lexeme::End, pos) => {
                    return Err(LoadError::new(LoadErrorKind::UnexpectedEof("`}`"), pos))
                }
                (other, pos) => return Err(expected("`[` or `}`", &other, pos)),
            }
        }
    }

    fn function(&mut self, class: usize) -> Result<(), LoadError> {
        let (name, pos) = self.name("function name")?;
        let owner = &self.env.classes()[class];

        if owner.func_index(name).is_some() {
            return Err(LoadError::new(
                LoadErrorKind::DuplicateFunction {
                    class: self.env.syms().display(owner.name),
                    func: self.env.syms().display(name),
                },
                pos,
            ));
        }

        self.env.begin_func(class, name);

        let mut open_loops: Vec<Pos> = vec![];

        loop {
            let (lexeme, pos) = self.next()?;

            let token = match lexeme {
                Lexeme::Name(text) => Token::Name(self.intern(text, pos)?),
                Lexeme::Number(n) => Token::Number(n),
                Lexeme::Peek(depth) => Token::Peek(depth),
                Lexeme::Str(s) => Token::Str(self.env.add_string(s)),
                Lexeme::Char(']') => {
                    if let Some(loop_pos) = open_loops.pop() {
                        return Err(LoadError::new(LoadErrorKind::UnclosedLoop, loop_pos));
                    }

                    self.env.push_token(FUNC_END);
                    return Ok(());
                }
                Lexeme::Char(LOOP_HEAD) => {
                    self.env.push_token(Token::Op(LOOP_HEAD));

                    let cond = match self.next()? {
                        (Lexeme::Name(text), cond_pos) => self.intern(text, cond_pos)?,
                        (_, cond_pos) => {
                            return Err(LoadError::new(LoadErrorKind::LoopWithoutCondition, cond_pos))
                        }
                    };

                    open_loops.push(pos);
                    Token::Name(cond)
                }
                Lexeme::Char(LOOP_TAIL) => {
                    if open_loops.pop().is_none() {
                        return Err(LoadError::new(LoadErrorKind::UnmatchedLoopTail, pos));
                    }

                    Token::Op(LOOP_TAIL)
                }
                Lexeme::Char(c) if OPERATORS.contains(&c) => Token::Op(c),
                Lexeme::Char(c) => return Err(LoadError::new(LoadErrorKind::Unexpected(c), pos)),
                Lexeme::End => {
                    return Err(LoadError::new(LoadErrorKind::UnexpectedEof("`]`"), pos))
                }
            };

            self.env.push_token(token);
        }
    }

    fn name(&mut self, what: &'static str) -> Result<(SymID, Pos), LoadError> {
        match self.next()? {
            (Lexeme::Name(text), pos) => Ok((self.intern(text, pos)?, pos)),
            (other, pos) => Err(expected(what, &other, pos)),
        }
    }

    fn intern(&mut self, text: String, pos: Pos) -> Result<SymID, LoadError> {
        if Scope::of(&text).is_none() {
            return Err(LoadError::new(LoadErrorKind::InvalidName(text), pos));
        }

        Ok(self.env.intern(&text))
    }
}

fn expected(what: &'static str, found: &Lexeme, pos: Pos) -> LoadError {
    let kind = match found {
        Lexeme::End => LoadErrorKind::UnexpectedEof(what),
        other => LoadErrorKind::Expected {
            expected: what,
            found: other.describe(),
        },
    };

    LoadError::new(kind, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::BUILTIN_CLASS_COUNT;
    use pretty_assertions::assert_eq;

    fn load_err(source: &str) -> LoadError {
        load_program(source).unwrap_err()
    }

    #[test]
    fn load_hello_world() {
        let env = load_program(r#"{M[m(_o)O!"Hello World\n"(_o)o.?]}"#).unwrap();

        assert_eq!(env.classes().len(), BUILTIN_CLASS_COUNT + 1);
        assert_eq!(env.strings(), &["Hello World\n".to_string()]);
        assert_eq!(
            env.render_tokens(),
            "class M\n  m: (_o)(O)!\"Hello World\\n\"(_o)(o).?]\n"
        );
    }

    #[test]
    fn functions_share_one_token_stream() {
        let source = "
            'a counter'
            {(Counter)
                [(c__) (n) <0> =]
                [(inc) (n) (n)* <1> (_a)A! (_a)a.? =]
            }
            {M [m (_c)(Counter)! (_c)(inc).?]}
        ";
        let env = load_program(source).unwrap();
        let counter = env.class_by_name(env.syms().lookup("Counter").unwrap()).unwrap();

        assert_eq!(env.func_start(counter, 0), Some(0));
        assert_eq!(env.func_start(counter, 1), Some(4));
        assert_eq!(env.token(3), Some(FUNC_END));
        assert_eq!(env.constructor(counter), Some(0));
        assert!(env.tokens().last().unwrap().is_func_end());
    }

    #[test]
    fn loops_must_pair_up() {
        assert!(load_program(r"{M[m/(_a)/(_b)\\]}").is_ok());

        let err = load_err(r"{M[m/(_a)]}");
        assert_eq!(err.kind, LoadErrorKind::UnclosedLoop);
        assert_eq!((err.line, err.column), (1, 5));

        let err = load_err(r"{M[m\]}");
        assert_eq!(err.kind, LoadErrorKind::UnmatchedLoopTail);

        let err = load_err(r"{M[m/<1>\]}");
        assert_eq!(err.kind, LoadErrorKind::LoopWithoutCondition);
    }

    #[test]
    fn structure_errors() {
        assert_eq!(load_err("{M[m]").kind, LoadErrorKind::UnexpectedEof("`}`"));
        assert_eq!(load_err("{M[m").kind, LoadErrorKind::UnexpectedEof("`]`"));
        assert_eq!(load_err("{M[m#]}").kind, LoadErrorKind::Unexpected('#'));
        assert_eq!(
            load_err("M").kind,
            LoadErrorKind::Expected {
                expected: "`{`",
                found: "name `M`".to_string()
            }
        );
        assert_eq!(
            load_err("{<1>}").kind,
            LoadErrorKind::Expected {
                expected: "class name",
                found: "number <1>".to_string()
            }
        );
    }

    #[test]
    fn duplicate_definitions_are_rejected() {
        assert_eq!(
            load_err("{M[m]}{M[m]}").kind,
            LoadErrorKind::DuplicateClass("M".to_string())
        );
        assert_eq!(
            load_err("{A[a]}").kind,
            LoadErrorKind::DuplicateClass("A".to_string())
        );
        assert_eq!(
            load_err("{M[m][m]}").kind,
            LoadErrorKind::DuplicateFunction {
                class: "M".to_string(),
                func: "m".to_string()
            }
        );
    }

    #[test]
    fn render_reports_the_position() {
        let err = load_err("{M[m\n  &]}");

        assert_eq!(err.render(), "load error at 2:3: unexpected character `&`");
    }
}
