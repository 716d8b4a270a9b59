#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal scanner error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A lexical error located on a source line.
#[derive(thiserror::Error, Debug)]
#[error("{r#type}")]
pub struct ScanError {
	pub line:   usize,
	pub r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(line: usize, r#type: ScanErrorType) -> Self { Self { line, r#type } }
}

#[derive(Debug)]
pub enum ScanErrorType {
	UnexpectedCharacter(char),
	UnterminatedString,
	/// A character literal missing its closing quote.
	UnterminatedCharacter,
	UnterminatedBlockComment,
	/// A character literal holding more or less than one character.
	WrongCharSize,
	/// A binary literal wider than the byte it must fit into.
	TooManyBits(usize),
	/// An integer literal outside the host integer range.
	NumberOutOfRange,
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnexpectedCharacter(c) => write!(f, "Unexpected character '{c}'."),
			UnterminatedString => write!(f, "Unterminated string."),
			UnterminatedCharacter => write!(f, "Unterminated single quotes."),
			UnterminatedBlockComment => write!(f, "Unterminated block comment."),
			WrongCharSize => write!(f, "Wrong size of char."),
			TooManyBits(count) => write!(f, "Max 8 bits, got {count}."),
			NumberOutOfRange => write!(f, "Number literal out of range."),
		}
	}
}
