//! The static checker: a pre-evaluation walk over the statement list that
//! verifies every referenced name resolves somewhere on the scope chain
//! and that no scope declares the same name twice. The chain it maintains
//! has exactly the runtime shape, including the globals-only parent of
//! function frames, so what the checker accepts the interpreter can
//! resolve. It stores placeholders, never evaluates, and keeps going
//! after a violation so one batch reports everything at once.

use std::rc::Rc;

use crate::{
	environment::Environment,
	error::{
		checker::{CheckError, CheckErrorType},
		report,
	},
	interpreter::{
		callable::{natives, Callable},
		value::Value,
	},
	parser::expression::Expression,
	scanner::Token,
	statement::{Function, Statement},
};

pub struct Checker {
	environment: Environment,
	error_count: usize,
}

impl Checker {
	pub fn new() -> Self {
		let mut environment = Environment::new();
		for (name, native) in natives() {
			environment.define(name, Value::Callable(native));
		}
		Self { environment, error_count: 0 }
	}

	/// Checks one statement batch and returns the number of violations.
	/// Global declarations persist into later batches, which is what lets
	/// a prompt session build state line by line.
	pub fn check(&mut self, statements: &[Statement]) -> usize {
		let before = self.error_count;
		for statement in statements {
			self.consider_statement(statement);
		}
		self.error_count - before
	}

	fn consider_statement(&mut self, statement: &Statement) {
		match statement {
			Statement::Expression(expression) | Statement::Print(expression) => {
				self.consider_expression(expression);
			}
			Statement::Var { name, initializer } => {
				if let Some(initializer) = initializer {
					self.consider_expression(initializer);
				}
				self.check_duplication(name);
				self.environment.define(&name.lexeme, Value::Nil);
			}
			Statement::Block(statements) => {
				self.environment.begin_scope();
				for statement in statements {
					self.consider_statement(statement);
				}
				self.environment.end_scope();
			}
			Statement::If { condition, then_branch, else_branch } => {
				self.consider_expression(condition);
				self.consider_statement(then_branch);
				if let Some(else_branch) = else_branch {
					self.consider_statement(else_branch);
				}
			}
			Statement::While { condition, body } => {
				self.consider_expression(condition);
				self.consider_statement(body);
			}
			Statement::Function(declaration) => self.consider_function(declaration),
			Statement::Return { value, .. } => {
				if let Some(value) = value {
					self.consider_expression(value);
				}
			}
		}
	}

	fn consider_function(&mut self, declaration: &Rc<Function>) {
		self.check_duplication(&declaration.name);
		self.environment
			.define(&declaration.name.lexeme, Value::Callable(Callable::Function(declaration.clone())));

		// the body resolves against globals plus its own frame, exactly
		// like an invocation at runtime
		let locals = self.environment.take_locals();
		self.environment.begin_scope();
		for param in &declaration.params {
			self.environment.define(&param.lexeme, Value::Nil);
		}
		for statement in &declaration.body {
			self.consider_statement(statement);
		}
		self.environment.end_scope();
		self.environment.restore_locals(locals);
	}

	fn consider_expression(&mut self, expression: &Expression) {
		match expression {
			Expression::Literal(_) => {}
			Expression::Unary { right, .. } => self.consider_expression(right),
			Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
				self.consider_expression(left);
				self.consider_expression(right);
			}
			Expression::Grouping(inner) => self.consider_expression(inner),
			Expression::Variable(name) => self.check_declaration(name),
			Expression::Assign { target, value } => {
				self.check_declaration(target);
				self.consider_expression(value);
			}
			Expression::Call { callee, arguments, .. } => {
				self.consider_expression(callee);
				for argument in arguments {
					self.consider_expression(argument);
				}
			}
		}
	}

	fn check_declaration(&mut self, name: &Token) {
		if !self.environment.contains(&name.lexeme) {
			self.error(name.line, CheckErrorType::NotDeclared(name.lexeme.clone()));
		}
	}

	fn check_duplication(&mut self, name: &Token) {
		if self.environment.contains_local(&name.lexeme) {
			self.error(name.line, CheckErrorType::Duplication(name.lexeme.clone()));
		}
	}

	fn error(&mut self, line: usize, r#type: CheckErrorType) {
		let error = CheckError::new(line, r#type);
		report(error.line, "Checker", &error);
		self.error_count += 1;
	}
}

impl Default for Checker {
	fn default() -> Self { Self::new() }
}
