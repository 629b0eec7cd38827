use core::iter::Peekable;
use core::str::Chars;

use super::error::{LoadError, LoadErrorKind};

/// Source position as (line, column), both starting at 1.
pub type Pos = (usize, usize);

#[derive(Clone, PartialEq, Debug)]
pub enum Lexeme {
    /// Structural character or operator.
    Char(char),
    Name(String),
    Number(i64),
    Peek(usize),
    Str(String),
    End,
}

impl Lexeme {
    pub fn describe(&self) -> String {
        match self {
            Lexeme::Char(c) => format!("`{c}`"),
            Lexeme::Name(name) => format!("name `{name}`"),
            Lexeme::Number(n) => format!("number <{n}>"),
            Lexeme::Peek(depth) => format!("stack depth ({depth})"),
            Lexeme::Str(_) => "string literal".to_string(),
            Lexeme::End => "end of input".to_string(),
        }
    }
}

/// Splits Glass source into lexemes. Whitespace and `'...'` comments are
/// insignificant everywhere outside string literals, including inside
/// parenthesized names and number brackets.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    pub fn pos(&self) -> Pos {
        (self.line, self.column)
    }

    pub fn next_lexeme(&mut self) -> Result<(Lexeme, Pos), LoadError> {
        self.skip_ignored()?;

        let pos = self.pos();
        let c = match self.advance() {
            Some(c) => c,
            None => return Ok((Lexeme::End, pos)),
        };

        let lexeme = match c {
            c if c.is_ascii_alphabetic() => Lexeme::Name(c.to_string()),
            '(' => self.lex_paren()?,
            '<' => Lexeme::Number(self.lex_number(pos)?),
            '"' => Lexeme::Str(self.lex_string(pos)?),
            c => Lexeme::Char(c),
        };

        Ok((lexeme, pos))
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn skip_ignored(&mut self) -> Result<(), LoadError> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('\'') => {
                    let start = self.pos();
                    self.advance();

                    loop {
                        match self.advance() {
                            Some('\'') => break,
                            Some(_) => {}
                            None => return Err(LoadError::new(LoadErrorKind::UnclosedComment, start)),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn peek_significant(&mut self) -> Result<Option<char>, LoadError> {
        self.skip_ignored()?;

        Ok(self.chars.peek().copied())
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), LoadError> {
        self.skip_ignored()?;

        let pos = self.pos();

        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(LoadError::new(
                LoadErrorKind::Expected {
                    expected: what,
                    found: format!("`{c}`"),
                },
                pos,
            )),
            None => Err(LoadError::new(LoadErrorKind::UnexpectedEof(what), pos)),
        }
    }

    /// `(name)` or `(depth)`, opening paren already consumed.
    fn lex_paren(&mut self) -> Result<Lexeme, LoadError> {
        let pos = self.pos();
        let first = self.peek_significant()?;

        let lexeme = match first {
            Some(c) if c.is_ascii_digit() => {
                let digits = self.take_while(|c| c.is_ascii_digit())?;
                let depth = digits
                    .parse()
                    .map_err(|_| LoadError::new(LoadErrorKind::InvalidNumber(digits.clone()), pos))?;

                Lexeme::Peek(depth)
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                Lexeme::Name(self.take_while(|c| c.is_ascii_alphanumeric() || c == '_')?)
            }
            Some(c) => {
                return Err(LoadError::new(
                    LoadErrorKind::Expected {
                        expected: "a name or a stack depth",
                        found: format!("`{c}`"),
                    },
                    self.pos(),
                ))
            }
            None => {
                return Err(LoadError::new(
                    LoadErrorKind::UnexpectedEof("a name or a stack depth"),
                    self.pos(),
                ))
            }
        };

        self.expect(')', "`)`")?;

        Ok(lexeme)
    }

    /// `<-12>`, opening bracket already consumed.
    fn lex_number(&mut self, start: Pos) -> Result<i64, LoadError> {
        let mut text = String::new();

        if self.peek_significant()? == Some('-') {
            self.advance();
            text.push('-');
        }

        text.push_str(&self.take_while(|c| c.is_ascii_digit())?);
        self.expect('>', "`>`")?;

        text.parse()
            .map_err(|_| LoadError::new(LoadErrorKind::InvalidNumber(text.clone()), start))
    }

    /// Body of a string literal, opening quote already consumed.
    fn lex_string(&mut self, start: Pos) -> Result<String, LoadError> {
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => return Ok(s),
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some(other) => {
                        s.push('\\');
                        s.push(other);
                    }
                    None => break,
                },
                Some(c) => s.push(c),
                None => break,
            }
        }

        Err(LoadError::new(LoadErrorKind::UnclosedString, start))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Result<String, LoadError> {
        let mut text = String::new();

        while let Some(c) = self.peek_significant()? {
            if !pred(c) {
                break;
            }

            self.advance();
            text.push(c);
        }

        Ok(text)
    }
}
