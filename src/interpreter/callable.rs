use std::{
	io::Write,
	rc::Rc,
	time::{SystemTime, UNIX_EPOCH},
};

use crate::{
	error::interpreter::{RuntimeError, RuntimeErrorType, Unwind},
	interpreter::{
		value::{Number, Value},
		Interpreter,
	},
	scanner::Token,
	statement::Function,
};

/// A callable runtime value: one of the built-in natives, or a function
/// the program declared. User functions hold their declaration and no
/// closure; invocation frames resolve against globals.
#[derive(Debug, Clone)]
pub enum Callable {
	Clock,
	Pow,
	Log2,
	Prn,
	Type,
	Function(Rc<Function>),
}

/// The natives installed into the global scope by both the checker and
/// the interpreter.
pub fn natives() -> [(&'static str, Callable); 5] {
	[
		("clock", Callable::Clock),
		("pow", Callable::Pow),
		("log2", Callable::Log2),
		("prn", Callable::Prn),
		("type", Callable::Type),
	]
}

impl Callable {
	pub fn arity(&self) -> usize {
		match self {
			Callable::Clock => 0,
			Callable::Pow => 2,
			Callable::Log2 | Callable::Prn | Callable::Type => 1,
			Callable::Function(declaration) => declaration.params.len(),
		}
	}

	pub fn name(&self) -> String {
		match self {
			Callable::Function(declaration) => format!("<fun {}>", declaration.name.lexeme),
			_ => "<fun native>".to_string(),
		}
	}

	/// Applies the callable. The arity was checked at the call site;
	/// `paren` locates runtime errors at the closing parenthesis of the
	/// call.
	pub fn call<W: Write>(
		&self,
		interpreter: &mut Interpreter<W>,
		paren: &Token,
		arguments: Vec<Value>,
	) -> Result<Value, Unwind> {
		match self {
			Callable::Clock => {
				let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("Time went backwards");
				Ok(Value::Number(Number::Int(now.as_secs() as i64)))
			}
			Callable::Pow => match (arguments[0].as_number(), arguments[1].as_number()) {
				(Some(base), Some(exp)) => {
					Ok(Value::Number(Number::Double(base.as_double().powf(exp.as_double()))))
				}
				_ => Err(RuntimeError::new(paren.line, RuntimeErrorType::ArgumentsNotNumbers).into()),
			},
			Callable::Log2 => match arguments[0].as_number() {
				Some(number) => Ok(Value::Number(Number::Double(number.as_double().log2()))),
				None => Err(RuntimeError::new(paren.line, RuntimeErrorType::ArgumentNotNumber).into()),
			},
			Callable::Prn => match &arguments[0] {
				Value::StringValue(expression) => Ok(Value::StringValue(polish_notation(expression))),
				_ => Err(RuntimeError::new(paren.line, RuntimeErrorType::ArgumentNotString).into()),
			},
			Callable::Type => Ok(Value::StringValue(arguments[0].type_name().to_string())),
			Callable::Function(declaration) => interpreter.call_function(declaration, arguments),
		}
	}
}

impl PartialEq for Callable {
	/// Callables compare by identity: the same native, or the same
	/// underlying declaration.
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Callable::Function(l), Callable::Function(r)) => Rc::ptr_eq(l, r),
			(Callable::Function(_), _) | (_, Callable::Function(_)) => false,
			_ => std::mem::discriminant(self) == std::mem::discriminant(other),
		}
	}
}

fn priority(ch: char) -> Option<u8> {
	match ch {
		'(' | ')' => Some(0),
		',' | '[' | ']' => Some(1),
		'+' | '-' => Some(2),
		'*' | '/' => Some(3),
		_ => None,
	}
}

/// Rewrites an infix expression into space-separated reverse Polish
/// notation. `[ ... ]` opens an argument region where commas separate
/// arguments; closing it emits `@K` with the argument count. Unknown
/// characters are skipped, though they still end an alphanumeric run.
pub fn polish_notation(expression: &str) -> String {
	let mut result = String::new();
	let mut op_stack: Vec<char> = Vec::new();

	let mut count_arguments = 0;
	let mut flag_args = false;
	let mut arg = false;
	for ch in expression.chars() {
		if ch.is_alphanumeric() {
			result.push(ch);
			arg = true;
			continue;
		}
		if arg {
			result.push(' ');
			arg = false;
			if flag_args && count_arguments == 0 {
				count_arguments = 1;
			}
		}

		match ch {
			' ' => {}
			'(' => op_stack.push(ch),
			'[' => {
				flag_args = true;
				op_stack.push(ch);
			}
			')' => {
				while op_stack.last().is_some_and(|&top| top != '(') {
					if let Some(op) = op_stack.pop() {
						result.push(op);
						result.push(' ');
					}
				}
				if op_stack.last() == Some(&'(') {
					op_stack.pop();
				}
			}
			']' => {
				while op_stack.last().is_some_and(|&top| top != '[') {
					if let Some(op) = op_stack.pop() {
						result.push(op);
						result.push(' ');
					}
				}
				if op_stack.last() == Some(&'[') {
					op_stack.pop();
				}
				result.push('@');
				result.push_str(&count_arguments.to_string());
				result.push(' ');
				count_arguments = 0;
				flag_args = false;
			}
			',' => {
				count_arguments += 1;
				while op_stack.last().is_some_and(|&top| top != '[') {
					if let Some(op) = op_stack.pop() {
						result.push(op);
						result.push(' ');
					}
				}
			}
			'+' | '-' | '*' | '/' => {
				while op_stack.last().is_some_and(|&top| priority(ch) <= priority(top)) {
					if let Some(op) = op_stack.pop() {
						result.push(op);
						result.push(' ');
					}
				}
				op_stack.push(ch);
			}
			_ => {}
		}
	}

	if arg {
		result.push(' ');
	}
	while let Some(op) = op_stack.pop() {
		result.push(op);
		result.push(' ');
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn operators_order_by_precedence() {
		assert_eq!(polish_notation("a+b*c"), "a b c * + ");
		assert_eq!(polish_notation("a*b+c"), "a b * c + ");
		assert_eq!(polish_notation("a-b-c"), "a b - c - ");
	}

	#[test]
	fn parentheses_group() {
		assert_eq!(polish_notation("(a+b)*c"), "a b + c * ");
		assert_eq!(polish_notation("a*(b+c)"), "a b c + * ");
	}

	#[test]
	fn brackets_count_arguments() {
		assert_eq!(polish_notation("f[a,b]"), "f a b @2 ");
		assert_eq!(polish_notation("f[x]"), "f x @1 ");
		assert_eq!(polish_notation("f[]"), "f @0 ");
		assert_eq!(polish_notation("f[a+b,c]"), "f a b + c @2 ");
	}

	#[test]
	fn spaces_and_unknown_characters_are_skipped() {
		assert_eq!(polish_notation("a + b"), "a b + ");
		assert_eq!(polish_notation("a # b"), "a b ");
	}

	#[test]
	fn native_identity() {
		assert_eq!(Callable::Clock, Callable::Clock);
		assert_ne!(Callable::Clock, Callable::Pow);
		assert_eq!(Callable::Clock.arity(), 0);
		assert_eq!(Callable::Pow.arity(), 2);
		assert_eq!(Callable::Prn.name(), "<fun native>");
	}
}
