use std::io::{self, Write};

use crate::{
	interpreter::{
		callable::{natives, Callable},
		value::Value,
	},
	parser::expression::Expression,
	statement::Statement,
};

/// Renders the identifier table: one `|name|type|value|` row per declared
/// name and per distinct literal. Literals already shown are skipped, and
/// the skip-list survives across batches so a prompt session never
/// repeats a row.
pub struct IdPrinter<W: Write> {
	out:  W,
	seen: Vec<Value>,
}

impl<W: Write> IdPrinter<W> {
	pub fn new(out: W) -> Self { Self { out, seen: Vec::new() } }

	/// The header and one row per built-in; printed once per session.
	pub fn print_natives(&mut self) -> io::Result<()> {
		writeln!(self.out, " /{:^13}/{:^13}/{:^15}/", "Name", "Type", "Value")?;
		for (name, native) in natives() {
			self.row(name, &Value::Callable(native))?;
		}
		Ok(())
	}

	pub fn print(&mut self, statements: &[Statement]) -> io::Result<()> {
		for statement in statements {
			self.statement(statement)?;
		}
		Ok(())
	}

	fn statement(&mut self, statement: &Statement) -> io::Result<()> {
		match statement {
			Statement::Expression(expression) | Statement::Print(expression) => {
				self.expression(expression)
			}
			Statement::Var { name, initializer } => {
				self.row(&name.lexeme, &Value::Nil)?;
				if let Some(initializer) = initializer {
					self.expression(initializer)?;
				}
				Ok(())
			}
			Statement::Block(statements) => self.print(statements),
			Statement::If { condition, then_branch, else_branch } => {
				self.expression(condition)?;
				self.statement(then_branch)?;
				if let Some(else_branch) = else_branch {
					self.statement(else_branch)?;
				}
				Ok(())
			}
			Statement::While { condition, body } => {
				self.expression(condition)?;
				self.statement(body)
			}
			Statement::Function(declaration) => {
				self.row(
					&declaration.name.lexeme,
					&Value::Callable(Callable::Function(declaration.clone())),
				)?;
				for param in &declaration.params {
					self.row(&param.lexeme, &Value::Nil)?;
				}
				for statement in &declaration.body {
					self.statement(statement)?;
				}
				Ok(())
			}
			Statement::Return { value, .. } => {
				if let Some(value) = value {
					self.expression(value)?;
				}
				Ok(())
			}
		}
	}

	fn expression(&mut self, expression: &Expression) -> io::Result<()> {
		match expression {
			Expression::Literal(value) => {
				if self.seen.contains(value) {
					return Ok(());
				}
				self.seen.push(value.clone());
				self.row("<anonymous>", value)
			}
			Expression::Unary { right, .. } => self.expression(right),
			Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
				self.expression(left)?;
				self.expression(right)
			}
			Expression::Grouping(inner) => self.expression(inner),
			Expression::Variable(_) => Ok(()),
			Expression::Assign { value, .. } => self.expression(value),
			Expression::Call { callee, arguments, .. } => {
				self.expression(callee)?;
				for argument in arguments {
					self.expression(argument)?;
				}
				Ok(())
			}
		}
	}

	fn row(&mut self, name: &str, value: &Value) -> io::Result<()> {
		writeln!(self.out, "|{:^13}|{:^13}|{:^15}|", name, value.type_name(), value.to_string())
	}
}
