use crate::error::{SchemeError, SchemeResult};
use crate::token::Token;
use crate::util::{Code, Trace};

fn is_starting_symbol(b: u8) -> bool {
    matches!(b, b'<' | b'=' | b'>' | b'A'..=b'z' | b'*' | b'/' | b'#')
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_inside_symbol(b: u8) -> bool {
    is_starting_symbol(b) || matches!(b, b'!' | b'-' | b'?') || is_digit(b)
}

/// Hand-written tokenizer over a byte stream, pre-loading its first token on
/// construction so callers can inspect [`Tokenizer::token`] before the first
/// [`Tokenizer::advance`].
pub struct Tokenizer<'c> {
    code: Code<'c>,
    pointer: usize,
    current: Token,
    is_end: bool,
    trace: Trace,
}

impl<'c> Tokenizer<'c> {
    pub fn new(code: Code<'c>, trace: Trace) -> SchemeResult<Self> {
        let mut tokenizer = Tokenizer {
            code,
            pointer: 0,
            current: Token::Dot,
            is_end: false,
            trace,
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn token(&self) -> &Token {
        &self.current
    }

    /// Byte offset of the token currently held by [`Tokenizer::token`].
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    fn peek(&self) -> Option<u8> {
        self.code.value.get(self.pointer).copied()
    }

    fn bump(&mut self) -> u8 {
        let b = self.code.value[self.pointer];
        self.pointer += 1;
        b
    }

    /// Advance to the next token, or mark the stream ended.
    ///
    /// Mirrors the original reader's `Next()`: skip whitespace, then classify
    /// a single leading byte into one of the fixed token shapes.
    pub fn advance(&mut self) -> SchemeResult<()> {
        while let Some(b) = self.peek() {
            if b > 32 {
                break;
            }
            self.pointer += 1;
        }
        if self.peek().is_none() {
            self.is_end = true;
            return Ok(());
        }

        let start = self.pointer;
        let c1 = self.bump();
        self.current = match c1 {
            b'(' => Token::OpenParen,
            b')' => Token::CloseParen,
            b'.' => Token::Dot,
            b'\'' => Token::Quote,
            b'+' => self.read_signed_integer(b'+'),
            b'-' => self.read_signed_integer(b'-'),
            b if is_digit(b) => {
                let mut digits = String::new();
                digits.push(b as char);
                while let Some(d) = self.peek() {
                    if !is_digit(d) {
                        break;
                    }
                    digits.push(self.bump() as char);
                }
                Token::Integer(digits.parse().unwrap_or(0))
            }
            b'#' => self.read_hash(),
            b if is_starting_symbol(b) => {
                let mut name = String::new();
                name.push(b as char);
                while let Some(d) = self.peek() {
                    if !is_inside_symbol(d) {
                        break;
                    }
                    name.push(self.bump() as char);
                }
                Token::Sym(name)
            }
            _ => {
                return Err(SchemeError::syntax(format!(
                    "illegal character at {}",
                    self.code.obtain_position(start)
                )));
            }
        };
        self.trace.token(&self.code, start, &self.current);
        Ok(())
    }

    fn read_signed_integer(&mut self, sign: u8) -> Token {
        let mut digits = String::new();
        digits.push(sign as char);
        while let Some(d) = self.peek() {
            if !is_digit(d) {
                break;
            }
            digits.push(self.bump() as char);
        }
        if digits.len() == 1 {
            Token::Sym((sign as char).to_string())
        } else {
            Token::Integer(digits.parse().unwrap_or(0))
        }
    }

    fn read_hash(&mut self) -> Token {
        let Some(c2) = self.peek() else {
            return Token::Sym("#".to_string());
        };
        self.pointer += 1;
        let mut stack = String::new();
        stack.push('#');
        stack.push(c2 as char);

        match self.peek() {
            None => bool_or_sym(c2, stack),
            Some(next) if next <= 32 => bool_or_sym(c2, stack),
            Some(next) if is_inside_symbol(next) => {
                while let Some(d) = self.peek() {
                    if !is_inside_symbol(d) {
                        break;
                    }
                    stack.push(self.bump() as char);
                }
                Token::Sym(stack)
            }
            Some(_) => Token::Sym(stack),
        }
    }
}

fn bool_or_sym(c2: u8, stack: String) -> Token {
    match c2 {
        b't' => Token::BoolTrue,
        b'f' => Token::BoolFalse,
        _ => Token::Sym(stack),
    }
}
