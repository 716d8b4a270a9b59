//! Lexical analysis: the character stream becomes a token stream.
//!
//! The scanner walks the source once with a single forward cursor and at
//! most two characters of lookahead; it never backtracks. Numeric width is
//! decided here: `0x` prefixes lex as ints, `0b` prefixes as unsigned
//! bytes, decimals with a fractional part as doubles and everything else
//! as ints. Errors are reported inline and scanning continues, so one bad
//! character cannot hide the rest of the diagnostics.

mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub use token::*;

use crate::{
	error::{
		report,
		scanner::{ScanError, ScanErrorType, ScannerError},
	},
	interpreter::value::{self, Value},
};

/// A scanner over the source text.
pub struct Scanner<'a> {
	source:      &'a str,
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// One past the character last consumed
	cursor:      usize,
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source, source_iter: source.char_indices().peekable(), start: 0, cursor: 0, line: 1 }
	}

	/// Scans the whole source. Lexical errors are reported inline and
	/// counted; the token vector is always terminated by an EOF sentinel.
	pub fn scan_tokens(mut self) -> anyhow::Result<(Vec<Token>, usize)> {
		let mut tokens = Vec::new();
		let mut error_count = 0;
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = index;
			match self.scan_token(&mut tokens) {
				Ok(()) => {}
				Err(ScannerError::ScanError(error)) => {
					report(error.line, "Scanner", &error);
					error_count += 1;
				}
				Err(ScannerError::InternalError(error)) => return Err(error),
			}
		}
		tokens.push(Token::new(Eof, "", self.line, self.cursor, 0));
		Ok((tokens, error_count))
	}

	fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		match next_char {
			'(' => self.add_token(tokens, LeftParen),
			')' => self.add_token(tokens, RightParen),
			'{' => self.add_token(tokens, LeftBrace),
			'}' => self.add_token(tokens, RightBrace),
			',' => self.add_token(tokens, Comma),
			'-' => self.add_token(tokens, Minus),
			'+' => self.add_token(tokens, Plus),
			';' => self.add_token(tokens, Semicolon),
			'*' => self.add_token(tokens, Star),
			'!' => {
				let r#type = if self.match_next('=') { BangEqual } else { Bang };
				self.add_token(tokens, r#type);
			}
			'=' => {
				let r#type = if self.match_next('=') { EqualEqual } else { Equal };
				self.add_token(tokens, r#type);
			}
			'<' => {
				let r#type = if self.match_next('=') {
					LessEqual
				} else if self.match_next('<') {
					ShiftLeft
				} else {
					Less
				};
				self.add_token(tokens, r#type);
			}
			'>' => {
				let r#type = if self.match_next('=') {
					GreaterEqual
				} else if self.match_next('>') {
					ShiftRight
				} else {
					Greater
				};
				self.add_token(tokens, r#type);
			}
			'/' => {
				if self.match_next('/') {
					while self.peek().is_some_and(|c| c != '\n') {
						self.advance();
					}
				} else if self.match_next('*') {
					self.block_comment()?;
				} else {
					self.add_token(tokens, Slash);
				}
			}
			' ' | '\r' | '\t' => {}
			'\n' => self.line += 1,
			'"' => self.string(tokens)?,
			'\'' => self.character(tokens)?,
			'0' => self.radix_number(tokens)?,
			c if c.is_ascii_digit() => self.number(tokens)?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(tokens),
			c => return Err(ScanError::new(self.line, ScanErrorType::UnexpectedCharacter(c)).into()),
		}
		Ok(())
	}

	fn add_token(&mut self, tokens: &mut Vec<Token>, r#type: TokenType) {
		let lexeme = &self.source[self.start..self.cursor];
		tokens.push(Token::new(r#type, lexeme, self.line, self.start, self.cursor - self.start));
	}

	fn add_literal(&mut self, tokens: &mut Vec<Token>, r#type: TokenType, literal: Value) {
		let lexeme = &self.source[self.start..self.cursor];
		tokens.push(Token::with_literal(r#type, lexeme, literal, self.line, self.start, self.cursor - self.start));
	}

	/// Consume the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek one character past `peek` without consuming anything
	fn peek_second(&mut self) -> Option<char> {
		let mut lookahead = self.source_iter.clone();
		lookahead.next()?;
		lookahead.next().map(|(_, c)| c)
	}

	fn block_comment(&mut self) -> Result<(), ScannerError> {
		while let Some(c) = self.peek() {
			if c == '*' && self.peek_second() == Some('/') {
				self.advance();
				self.advance();
				return Ok(());
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}
		Err(ScanError::new(self.line, ScanErrorType::UnterminatedBlockComment).into())
	}

	fn string(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		while self.peek().is_some_and(|c| c != '"') {
			if self.peek() == Some('\n') {
				self.line += 1;
			}
			self.advance();
		}

		if self.peek().is_none() {
			return Err(ScanError::new(self.line, ScanErrorType::UnterminatedString).into());
		}
		self.advance(); // the closing "

		let value = self.source[self.start + 1..self.cursor - 1].to_string();
		self.add_literal(tokens, String, Value::StringValue(value));
		Ok(())
	}

	fn character(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		while self.peek().is_some_and(|c| c != '\'') {
			if self.peek() == Some('\n') {
				self.line += 1;
			}
			self.advance();
		}

		if self.peek().is_none() {
			return Err(ScanError::new(self.line, ScanErrorType::UnterminatedCharacter).into());
		}
		self.advance(); // the closing '

		let inner = &self.source[self.start + 1..self.cursor - 1];
		let mut chars = inner.chars();
		match (chars.next(), chars.next()) {
			(Some(value), None) => {
				self.add_literal(tokens, String, Value::Character(value));
				Ok(())
			}
			_ => Err(ScanError::new(self.line, ScanErrorType::WrongCharSize).into()),
		}
	}

	fn number(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// Look for a fractional part.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
			let parsed =
				self.source[self.start..self.cursor].parse().context("Failed to parse number literal")?;
			self.add_literal(tokens, Number, Value::Number(value::Number::Double(parsed)));
			return Ok(());
		}

		match self.source[self.start..self.cursor].parse::<i64>() {
			Ok(parsed) => {
				self.add_literal(tokens, Number, Value::Number(value::Number::Int(parsed)));
				Ok(())
			}
			Err(_) => Err(ScanError::new(self.line, ScanErrorType::NumberOutOfRange).into()),
		}
	}

	/// Numeric formats introduced by a leading zero: `0x` hex ints, `0b`
	/// binary bytes, plain decimals otherwise.
	fn radix_number(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		if self.peek() == Some('x') && self.peek_second().is_some_and(|c| c.is_ascii_hexdigit()) {
			self.advance(); // consume 'x'
			while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
				self.advance();
			}
			return match i64::from_str_radix(&self.source[self.start + 2..self.cursor], 16) {
				Ok(parsed) => {
					self.add_literal(tokens, Number, Value::Number(value::Number::Int(parsed)));
					Ok(())
				}
				Err(_) => Err(ScanError::new(self.line, ScanErrorType::NumberOutOfRange).into()),
			};
		}

		if self.peek() == Some('b') && self.peek_second().is_some_and(|c| c == '0' || c == '1') {
			self.advance(); // consume 'b'
			let mut count = 0;
			while self.peek().is_some_and(|c| c == '0' || c == '1') {
				self.advance();
				count += 1;
			}
			if count > 8 {
				return Err(ScanError::new(self.line, ScanErrorType::TooManyBits(count)).into());
			}
			let parsed = u8::from_str_radix(&self.source[self.start + 2..self.cursor], 2)
				.context("Failed to parse binary literal")?;
			self.add_literal(tokens, Number, Value::Number(value::Number::Byte(parsed)));
			return Ok(());
		}

		self.number(tokens)
	}

	fn identifier(&mut self, tokens: &mut Vec<Token>) {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let r#type = TokenType::keyword_or_identifier(&self.source[self.start..self.cursor]);
		self.add_token(tokens, r#type);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::interpreter::value::Number as Num;

	fn scan(input: &str) -> (Vec<Token>, usize) { Scanner::new(input).scan_tokens().unwrap() }

	fn kinds(input: &str) -> Vec<TokenType> {
		let (tokens, errors) = scan(input);
		assert_eq!(errors, 0, "unexpected scan errors in {input:?}");
		tokens.into_iter().map(|token| token.r#type).collect()
	}

	fn errors(input: &str) -> usize { scan(input).1 }

	#[test]
	fn scan_punctuation_and_operators() {
		assert_eq!(kinds("(){}"), vec![LeftParen, RightParen, LeftBrace, RightBrace, Eof]);
		assert_eq!(kinds("! != = == < <= > >="), vec![
			Bang,
			BangEqual,
			Equal,
			EqualEqual,
			Less,
			LessEqual,
			Greater,
			GreaterEqual,
			Eof
		]);
		assert_eq!(kinds("<< >>"), vec![ShiftLeft, ShiftRight, Eof]);
		assert_eq!(kinds("+ - * / ; ,"), vec![Plus, Minus, Star, Slash, Semicolon, Comma, Eof]);
	}

	#[test]
	fn scan_keywords_and_identifiers() {
		assert_eq!(kinds("and or fun return nil"), vec![And, Or, Fun, Return, Nil, Eof]);
		assert_eq!(kinds("foo _bar baz42"), vec![Identifier, Identifier, Identifier, Eof]);
		// reserved kinds with no keyword entry lex as identifiers
		assert_eq!(kinds("class super this"), vec![Identifier, Identifier, Identifier, Eof]);
	}

	#[test]
	fn scan_numbers_pick_a_width() {
		let (tokens, errors) = scan("42 3.14 0x10 0b1010 0");
		assert_eq!(errors, 0);
		let literals: Vec<Value> = tokens.into_iter().filter_map(|token| token.literal).collect();
		assert_eq!(literals, vec![
			Value::Number(Num::Int(42)),
			Value::Number(Num::Double(3.14)),
			Value::Number(Num::Int(16)),
			Value::Number(Num::Byte(10)),
			Value::Number(Num::Int(0)),
		]);
	}

	#[test]
	fn scan_binary_literal_limits() {
		assert_eq!(errors("0b11111111"), 0);
		assert_eq!(errors("0b111111111"), 1);
	}

	#[test]
	fn scan_number_out_of_range() {
		assert_eq!(errors("99999999999999999999999999"), 1);
		assert_eq!(errors("0xFFFFFFFFFFFFFFFF"), 1);
		assert_eq!(errors("0x7FFFFFFFFFFFFFFF"), 0);
	}

	#[test]
	fn scan_strings_and_characters() {
		let (tokens, error_count) = scan("\"hello\" 'x'");
		assert_eq!(error_count, 0);
		assert_eq!(tokens[0].literal, Some(Value::StringValue("hello".to_string())));
		assert_eq!(tokens[1].literal, Some(Value::Character('x')));
		assert_eq!(tokens[0].r#type, String);
		assert_eq!(tokens[1].r#type, String);

		assert_eq!(errors("\"unterminated"), 1);
		assert_eq!(errors("'unterminated"), 1);
		assert_eq!(errors("'ab'"), 1);
	}

	#[test]
	fn scan_multiline_string_advances_lines() {
		let (tokens, errors) = scan("\"a\nb\" x");
		assert_eq!(errors, 0);
		assert_eq!(tokens[0].literal, Some(Value::StringValue("a\nb".to_string())));
		assert_eq!(tokens[1].line, 2);
	}

	#[test]
	fn scan_comments() {
		assert_eq!(kinds("1 // the rest is gone"), vec![Number, Eof]);
		assert_eq!(kinds("1 /* gone \n still gone */ 2"), vec![Number, Number, Eof]);
		assert_eq!(errors("/* never closed"), 1);
		// block comments do not nest
		assert_eq!(kinds("/* /* */ 1"), vec![Number, Eof]);
	}

	#[test]
	fn scan_line_counting() {
		let (tokens, _) = scan("a\nb\r\n/* x\ny */ c");
		assert_eq!(tokens[0].line, 1);
		assert_eq!(tokens[1].line, 2);
		assert_eq!(tokens[2].line, 4);
	}

	#[test]
	fn scan_unexpected_characters() {
		assert_eq!(errors("@"), 1);
		assert_eq!(errors("."), 1);
		assert_eq!(errors("a @ b # c"), 2);
	}

	#[test]
	fn lexemes_match_source_offsets() {
		let source = "var answer = 40 + 0x2;";
		let (tokens, errors) = scan(source);
		assert_eq!(errors, 0);
		for token in &tokens {
			assert_eq!(&source[token.offset..token.offset + token.length], token.lexeme);
		}
	}
}
