//! The tree-walking evaluator.
//!
//! Statements execute for their effects; expressions evaluate to values.
//! Two out-of-band events travel up the walk as the error half of a
//! `Result`: a return-unwind, converted back into a plain value at the
//! function-invocation frame, and a runtime error, which aborts the whole
//! statement batch. Every scope or frame pushed on the environment is
//! popped on all three exit paths.

pub mod callable;
pub mod value;

use std::{io::Write, rc::Rc};

use crate::{
	environment::Environment,
	error::interpreter::{RuntimeError, RuntimeErrorType, Unwind},
	interpreter::{
		callable::{natives, Callable},
		value::Value,
	},
	parser::expression::Expression,
	scanner::TokenType,
	statement::{Function, Statement},
};

/// Evaluates statement batches against a persistent global environment.
/// `print` output goes through the owned sink so embedders and tests can
/// capture it.
pub struct Interpreter<W: Write> {
	environment: Environment,
	out:         W,
}

impl<W: Write> Interpreter<W> {
	pub fn new(out: W) -> Self {
		let mut environment = Environment::new();
		for (name, native) in natives() {
			environment.define(name, Value::Callable(native));
		}
		Self { environment, out }
	}

	/// Runs a batch to completion or to its first runtime error.
	pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
		for statement in statements {
			match self.execute(statement) {
				Ok(()) => {}
				// the parser rejects `return` outside of a function body
				Err(Unwind::Return(_)) => break,
				Err(Unwind::Error(error)) => return Err(error),
			}
		}
		Ok(())
	}

	fn execute(&mut self, statement: &Statement) -> Result<(), Unwind> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.out, "{value}").expect("Writing to program output should always succeed.");
			}
			Statement::Var { name, initializer } => {
				let value = match initializer {
					Some(initializer) => self.evaluate(initializer)?,
					None => Value::Nil,
				};
				self.environment.define(&name.lexeme, value);
			}
			Statement::Block(statements) => {
				self.environment.begin_scope();
				let result = self.execute_all(statements);
				self.environment.end_scope();
				result?;
			}
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition)?.to_bool() {
					self.execute(then_branch)?;
				} else if let Some(else_branch) = else_branch {
					self.execute(else_branch)?;
				}
			}
			Statement::While { condition, body } => {
				while self.evaluate(condition)?.to_bool() {
					self.execute(body)?;
				}
			}
			Statement::Function(declaration) => {
				let callable = Value::Callable(Callable::Function(declaration.clone()));
				self.environment.define(&declaration.name.lexeme, callable);
			}
			Statement::Return { value, .. } => {
				let value = match value {
					Some(expression) => self.evaluate(expression)?,
					None => Value::Nil,
				};
				return Err(Unwind::Return(value));
			}
		}
		Ok(())
	}

	fn execute_all(&mut self, statements: &[Statement]) -> Result<(), Unwind> {
		for statement in statements {
			self.execute(statement)?;
		}
		Ok(())
	}

	/// Invokes a user function: a fresh frame over the globals with the
	/// parameters bound in order. A return-unwind out of the body becomes
	/// the call result; normal completion yields nil.
	pub(crate) fn call_function(
		&mut self,
		declaration: &Rc<Function>,
		arguments: Vec<Value>,
	) -> Result<Value, Unwind> {
		let locals = self.environment.take_locals();
		self.environment.begin_scope();
		for (param, argument) in declaration.params.iter().zip(arguments) {
			self.environment.define(&param.lexeme, argument);
		}

		let result = self.execute_all(&declaration.body);

		self.environment.end_scope();
		self.environment.restore_locals(locals);

		match result {
			Ok(()) => Ok(Value::Nil),
			Err(Unwind::Return(value)) => Ok(value),
			Err(error) => Err(error),
		}
	}

	fn evaluate(&mut self, expression: &Expression) -> Result<Value, Unwind> {
		Ok(match expression {
			Expression::Literal(value) => value.clone(),
			Expression::Grouping(inner) => self.evaluate(inner)?,
			Expression::Unary { operator, right } => {
				let right = self.evaluate(right)?;
				match operator.r#type {
					TokenType::Bang => Value::Boolean(!right.to_bool()),
					_ => match right.as_number() {
						Some(number) => Value::Number(number.negated()),
						None => {
							return Err(RuntimeError::new(
								operator.line,
								RuntimeErrorType::UnaryOperandNotNumber,
							)
							.into());
						}
					},
				}
			}
			Expression::Binary { left, operator, right } => {
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				left.binary_op(operator, &right)?
			}
			Expression::Logical { left, operator, right } => {
				let left = self.evaluate(left)?;
				match operator.r#type {
					TokenType::Or if left.to_bool() => left,
					TokenType::And if !left.to_bool() => left,
					_ => self.evaluate(right)?,
				}
			}
			Expression::Variable(name) => self.environment.get(name)?,
			Expression::Assign { target, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(target, value.clone())?;
				value
			}
			Expression::Call { callee, paren, arguments } => {
				let callee = self.evaluate(callee)?;
				let mut argument_values = Vec::new();
				for argument in arguments {
					argument_values.push(self.evaluate(argument)?);
				}

				let Value::Callable(callable) = callee else {
					return Err(RuntimeError::new(paren.line, RuntimeErrorType::NotCallable).into());
				};
				if argument_values.len() != callable.arity() {
					return Err(RuntimeError::new(
						paren.line,
						RuntimeErrorType::Arity {
							expected: callable.arity(),
							got:      argument_values.len(),
						},
					)
					.into());
				}
				callable.call(self, paren, argument_values)?
			}
		})
	}
}
