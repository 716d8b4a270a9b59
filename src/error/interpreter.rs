use crate::interpreter::value::Value;

/// Control events that unwind statement execution: a `return` carrying its
/// value back to the function-invocation frame, or a runtime error
/// aborting the whole statement batch.
#[derive(Debug)]
pub enum Unwind {
	Return(Value),
	Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
	fn from(error: RuntimeError) -> Self { Unwind::Error(error) }
}

/// A runtime error located on the line of the operator or call that
/// raised it.
#[derive(thiserror::Error, Debug)]
#[error("{r#type}")]
pub struct RuntimeError {
	pub line:   usize,
	pub r#type: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(line: usize, r#type: RuntimeErrorType) -> Self { Self { line, r#type } }
}

#[derive(Debug)]
pub enum RuntimeErrorType {
	UndefinedVariable(String),
	NotCallable,
	Arity { expected: usize, got: usize },
	/// The operator exists but not for these operand widths.
	NoOperation { op: String, operands: &'static str },
	SecondOperandNotNumber,
	FirstOperandNotNumberOrString,
	UnaryOperandNotNumber,
	DivisionByZero,
	ArgumentsNotNumbers,
	ArgumentNotNumber,
	ArgumentNotString,
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'."),
			NotCallable => write!(f, "Can only call functions."),
			Arity { expected, got } => write!(f, "Expect {expected} arguments but got {got}."),
			NoOperation { op, operands } => write!(f, "there is no operation '{op}' for {operands}"),
			SecondOperandNotNumber => write!(f, "Second operand should be number."),
			FirstOperandNotNumberOrString => write!(f, "First operand should be number or string."),
			UnaryOperandNotNumber => write!(f, "Unary operand for '-' should be number"),
			DivisionByZero => write!(f, "Division by zero."),
			ArgumentsNotNumbers => write!(f, "args should be numbers"),
			ArgumentNotNumber => write!(f, "argument is required to be a number"),
			ArgumentNotString => write!(f, "argument is required to be a string"),
		}
	}
}
