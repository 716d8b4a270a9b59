/// A declaration violation found by the static checker.
#[derive(thiserror::Error, Debug)]
#[error("{r#type}")]
pub struct CheckError {
	pub line:   usize,
	pub r#type: CheckErrorType,
}

impl CheckError {
	pub fn new(line: usize, r#type: CheckErrorType) -> Self { Self { line, r#type } }
}

#[derive(Debug)]
pub enum CheckErrorType {
	/// A name referenced before any declaration on the scope chain.
	NotDeclared(String),
	/// A second declaration of a name in the same scope.
	Duplication(String),
}

impl std::fmt::Display for CheckErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CheckErrorType::NotDeclared(name) => write!(f, "'{name}' wasn't declared."),
			CheckErrorType::Duplication(name) => write!(f, "Duplication of '{name}'."),
		}
	}
}
