use std::io::{self, Write};

use crate::{
	colors::{COLOR_ARG, COLOR_EXPR, COLOR_INNER, COLOR_LITERAL, COLOR_OP, COLOR_STMT, WHITE},
	parser::expression::Expression,
	statement::Statement,
};

/// Renders the statement tree as an indented outline with parenthesized,
/// color-annotated expressions.
pub struct AstPrinter<W: Write> {
	out:  W,
	nest: usize,
}

impl<W: Write> AstPrinter<W> {
	pub fn new(out: W) -> Self { Self { out, nest: 0 } }

	pub fn print(&mut self, statements: &[Statement]) -> io::Result<()> {
		write!(self.out, "{COLOR_STMT}")?;
		for statement in statements {
			self.statement(statement)?;
		}
		write!(self.out, "{WHITE}")
	}

	fn statement(&mut self, statement: &Statement) -> io::Result<()> {
		match statement {
			Statement::Expression(expression) => {
				self.println("ExpressionStmt:")?;
				self.nest += 1;
				self.pad("Expr: ")?;
				self.expression_line(expression)?;
				self.nest -= 1;
			}
			Statement::Print(expression) => {
				self.println("PrintStmt:")?;
				self.nest += 1;
				self.pad("Expr: ")?;
				self.expression_line(expression)?;
				self.nest -= 1;
			}
			Statement::Var { name, initializer } => {
				self.println("VarStmt:")?;
				self.nest += 1;
				self.println(&format!("VarName: {COLOR_INNER}{}", name.lexeme))?;
				if let Some(initializer) = initializer {
					self.pad(&format!("{COLOR_STMT}InitExpr: "))?;
					self.expression_line(initializer)?;
				}
				self.nest -= 1;
			}
			Statement::Block(statements) => {
				self.println("BlockStmt:")?;
				self.nest += 1;
				for statement in statements {
					self.statement(statement)?;
				}
				self.nest -= 1;
			}
			Statement::If { condition, then_branch, else_branch } => {
				self.println("IfStmt:")?;
				self.nest += 1;
				self.pad("Condition: ")?;
				self.expression_line(condition)?;
				self.println("ThenBranch: ")?;
				self.nest += 1;
				self.statement(then_branch)?;
				self.nest -= 1;
				if let Some(else_branch) = else_branch {
					self.println("ElseBranch: ")?;
					self.nest += 1;
					self.statement(else_branch)?;
					self.nest -= 1;
				}
				self.nest -= 1;
			}
			Statement::While { condition, body } => {
				self.println("WhileStmt:")?;
				self.nest += 1;
				self.pad("Condition: ")?;
				self.expression_line(condition)?;
				self.println("Body: ")?;
				self.nest += 1;
				self.statement(body)?;
				self.nest -= 1;
				self.nest -= 1;
			}
			Statement::Function(declaration) => {
				self.println(&format!("FunctionStmt: {COLOR_INNER}{}", declaration.name.lexeme))?;
				self.nest += 1;
				let params: Vec<&str> =
					declaration.params.iter().map(|param| param.lexeme.as_str()).collect();
				self.println(&format!("{COLOR_STMT}Parameters: {COLOR_INNER}{}", params.join(" ")))?;
				self.println(&format!("{COLOR_STMT}Body: "))?;
				self.nest += 1;
				for statement in &declaration.body {
					self.statement(statement)?;
				}
				self.nest -= 1;
				self.nest -= 1;
			}
			Statement::Return { value, .. } => {
				self.println("ReturnStmt:")?;
				self.nest += 1;
				if let Some(value) = value {
					self.pad("Expr: ")?;
					self.expression_line(value)?;
				}
				self.nest -= 1;
			}
		}
		Ok(())
	}

	fn expression_line(&mut self, expression: &Expression) -> io::Result<()> {
		write!(self.out, "{COLOR_EXPR}")?;
		self.expression(expression)?;
		writeln!(self.out)?;
		write!(self.out, "{COLOR_STMT}")
	}

	fn expression(&mut self, expression: &Expression) -> io::Result<()> {
		match expression {
			Expression::Literal(value) => {
				write!(self.out, "{COLOR_LITERAL}<{value}>{COLOR_EXPR}")
			}
			Expression::Variable(name) => write!(self.out, "{}", name.lexeme),
			Expression::Unary { operator, right } => {
				self.parenthesize(&operator.lexeme, &[right.as_ref()])
			}
			Expression::Binary { left, operator, right }
			| Expression::Logical { left, operator, right } => {
				self.parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()])
			}
			Expression::Grouping(inner) => self.parenthesize("group", &[inner.as_ref()]),
			Expression::Assign { target, value } => {
				let target = Expression::Variable(target.clone());
				self.parenthesize("=", &[&target, value.as_ref()])
			}
			Expression::Call { callee, arguments, .. } => {
				let mut parts: Vec<&Expression> = vec![callee];
				parts.extend(arguments.iter());
				self.parenthesize("()", &parts)
			}
		}
	}

	fn parenthesize(&mut self, name: &str, expressions: &[&Expression]) -> io::Result<()> {
		write!(self.out, "({COLOR_OP}{name}")?;
		for expression in expressions {
			write!(self.out, " {COLOR_ARG}")?;
			self.expression(expression)?;
			write!(self.out, "{COLOR_EXPR}")?;
		}
		write!(self.out, ")")
	}

	fn pad(&mut self, text: &str) -> io::Result<()> {
		write!(self.out, "{}{text}", "\t".repeat(self.nest))
	}

	fn println(&mut self, text: &str) -> io::Result<()> {
		writeln!(self.out, "{}{text}", "\t".repeat(self.nest))
	}
}
