/// Errors that can occur during parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal parser error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered in the token stream
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A syntax error located at a token.
#[derive(thiserror::Error, Debug)]
#[error("at {location}. {r#type}")]
pub struct ParseError {
	pub line:     usize,
	/// `'lexeme'` of the offending token, or `end` at end of input.
	pub location: String,
	pub r#type:   ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, location: String, r#type: ParseErrorType) -> Self {
		Self { line, location, r#type }
	}
}

#[derive(Debug)]
pub enum ParseErrorType {
	/// Missing `(` after the named construct.
	ExpectLeftParen(String),
	/// Missing `)` after the named construct.
	ExpectRightParen(String),
	/// Missing `;` after the named construct.
	ExpectSemicolon(String),
	/// Missing `{` before the named function body.
	ExpectLeftBrace(String),
	ExpectRightBrace,
	ExpectVariableName,
	ExpectParameterName,
	ExpectFunctionName,
	ExpectExpression,
	/// `=` whose left-hand side was not a bare identifier.
	InvalidAssignmentTarget,
	/// `return` with no enclosing `fun` declaration.
	ReturnOutsideFunction,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectLeftParen(what) => write!(f, "Expect '(' after {what}."),
			ExpectRightParen(what) => write!(f, "Expect ')' after {what}."),
			ExpectSemicolon(what) => write!(f, "Expect ';' after {what}."),
			ExpectLeftBrace(name) => write!(f, "Expect '{{' before {name} body."),
			ExpectRightBrace => write!(f, "Expect '}}' after block."),
			ExpectVariableName => write!(f, "Expect variable name."),
			ExpectParameterName => write!(f, "Expect parameter name."),
			ExpectFunctionName => write!(f, "Expect function name."),
			ExpectExpression => write!(f, "Expect expression."),
			InvalidAssignmentTarget => write!(f, "Invalid assignment target."),
			ReturnOutsideFunction => write!(f, "Return statement is outside of function scope."),
		}
	}
}
