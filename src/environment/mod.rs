use std::collections::HashMap;

use crate::{
	error::interpreter::{RuntimeError, RuntimeErrorType},
	interpreter::value::Value,
	scanner::Token,
};

type Scope = HashMap<String, Value>;

/// The lexical scope chain shared by the checker and the interpreter:
/// the first scope is the globals, the last is the innermost. Lookups
/// walk the chain from innermost to globals.
pub struct Environment {
	scopes: Vec<Scope>,
}

impl Environment {
	pub fn new() -> Self { Self { scopes: vec![Scope::new()] } }

	/// Binds a name in the innermost scope, replacing any binding already
	/// there.
	pub fn define(&mut self, name: &str, value: Value) {
		if let Some(scope) = self.scopes.last_mut() {
			scope.insert(name.to_string(), value);
		}
	}

	pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
		for scope in self.scopes.iter().rev() {
			if let Some(value) = scope.get(&name.lexeme) {
				return Ok(value.clone());
			}
		}
		Err(RuntimeError::new(name.line, RuntimeErrorType::UndefinedVariable(name.lexeme.clone())))
	}

	/// Reassigns the closest existing binding of the name.
	pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
		for scope in self.scopes.iter_mut().rev() {
			if let Some(slot) = scope.get_mut(&name.lexeme) {
				*slot = value;
				return Ok(());
			}
		}
		Err(RuntimeError::new(name.line, RuntimeErrorType::UndefinedVariable(name.lexeme.clone())))
	}

	/// True when the name is bound anywhere on the chain.
	pub fn contains(&self, name: &str) -> bool {
		self.scopes.iter().rev().any(|scope| scope.contains_key(name))
	}

	/// True when the name is bound in the innermost scope.
	pub fn contains_local(&self, name: &str) -> bool {
		self.scopes.last().is_some_and(|scope| scope.contains_key(name))
	}

	pub fn begin_scope(&mut self) { self.scopes.push(Scope::new()); }

	pub fn end_scope(&mut self) {
		// the global scope never pops
		if self.scopes.len() > 1 {
			self.scopes.pop();
		}
	}

	/// Detaches every scope above the globals. Function frames resolve
	/// against globals alone, so invocation takes the locals out and puts
	/// them back afterwards.
	pub fn take_locals(&mut self) -> Vec<Scope> { self.scopes.split_off(1) }

	pub fn restore_locals(&mut self, locals: Vec<Scope>) {
		self.scopes.truncate(1);
		self.scopes.extend(locals);
	}
}

impl Default for Environment {
	fn default() -> Self { Self::new() }
}
