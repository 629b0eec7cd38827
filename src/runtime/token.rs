use crate::symbol_map::{SymID, SymbolMap};

/// One positional element of the flat token stream. Function bodies are
/// runs of tokens ending in `Op(']')`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Op(char),
    Name(SymID),
    Number(i64),
    /// Index into the string literal table.
    Str(usize),
    /// Copy the value this many positions below the top.
    Peek(usize),
}

pub const FUNC_END: Token = Token::Op(']');
pub const LOOP_HEAD: char = '/';
pub const LOOP_TAIL: char = '\\';

/// Characters the loader turns into `Op` tokens.
pub const OPERATORS: &[char] = &[',', '^', '=', '!', '.', '?', '*', '$', LOOP_HEAD, LOOP_TAIL];

impl Token {
    pub fn is_func_end(&self) -> bool {
        *self == FUNC_END
    }

    /// Renders the token back in source syntax.
    pub fn render(&self, syms: &SymbolMap, strings: &[String]) -> String {
        match self {
            Token::Op(c) => c.to_string(),
            Token::Name(id) => format!("({})", syms.display(*id)),
            Token::Number(n) => format!("<{n}>"),
            Token::Str(idx) => match strings.get(*idx) {
                Some(s) => format!("{s:?}"),
                None => format!("\"<missing string {idx}>\""),
            },
            Token::Peek(depth) => format!("({depth})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_uses_source_syntax() {
        let mut syms = SymbolMap::new();
        let name = syms.get_id("_o");
        let strings = vec!["hi\n".to_string()];

        let rendered: String = [
            Token::Name(name),
            Token::Number(-3),
            Token::Str(0),
            Token::Peek(1),
            Token::Op('?'),
            FUNC_END,
        ]
        .iter()
        .map(|token| token.render(&syms, &strings))
        .collect();

        assert_eq!(rendered, "(_o)<-3>\"hi\\n\"(1)?]");
    }
}
