use std::{
	fs::read_to_string,
	io::{self, Write},
	path::Path,
	process::ExitCode,
};

use anyhow::Context;

use crate::{
	checker::Checker,
	cli::Cli,
	colors::{GREEN, RESET, YELLOW},
	error::report,
	interpreter::Interpreter,
	parser::Parser,
	printer::{ast::AstPrinter, ids::IdPrinter, lex_table},
	scanner::Scanner,
};

/// The driver: runs source batches through scanner, parser, checker and
/// interpreter, owns the passes whose state persists between batches, and
/// carries the two outcome flags the embedding inspects.
pub struct Zrv {
	print_ast:             bool,
	print_id_table:        bool,
	print_lex_table:       bool,
	interpret:             bool,
	natives_printed:       bool,
	checker:               Checker,
	interpreter:           Interpreter<io::Stdout>,
	id_printer:            IdPrinter<io::Stdout>,
	pub had_error:         bool,
	pub had_runtime_error: bool,
}

impl Zrv {
	pub fn new(cli: &Cli) -> Self {
		Self {
			print_ast: cli.ast,
			print_id_table: cli.id_table,
			print_lex_table: cli.lex_table,
			interpret: cli.interpret(),
			natives_printed: false,
			checker: Checker::new(),
			interpreter: Interpreter::new(io::stdout()),
			id_printer: IdPrinter::new(io::stdout()),
			had_error: false,
			had_runtime_error: false,
		}
	}

	/// Runs a script file; the outcome flags become the exit code, with
	/// runtime errors taking precedence over static ones.
	pub fn run_file(&mut self, path: &Path) -> anyhow::Result<ExitCode> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)?;

		if self.had_runtime_error {
			return Ok(ExitCode::from(70));
		}
		if self.had_error {
			return Ok(ExitCode::from(64));
		}
		Ok(ExitCode::SUCCESS)
	}

	/// The interactive prompt. Input continues on `... ` lines while the
	/// running brace balance stays positive; an empty input ends the
	/// session; both outcome flags reset between interactions while the
	/// checker's and interpreter's globals carry over.
	pub fn run_prompt(&mut self) -> anyhow::Result<ExitCode> {
		let stdin = io::stdin();
		loop {
			print!("{YELLOW}>> {GREEN}");
			io::stdout().flush().context("Failed flush")?;

			let mut source = String::new();
			let mut brace_count = 0i32;
			loop {
				let mut input = String::new();
				if stdin.read_line(&mut input).context("Failed read line")? == 0 {
					println!("{RESET}");
					return Ok(ExitCode::SUCCESS);
				}
				for ch in input.chars() {
					if ch == '{' {
						brace_count += 1;
					}
					if ch == '}' {
						brace_count -= 1;
					}
				}
				source.push_str(&input);
				if brace_count <= 0 {
					break;
				}
				print!("{YELLOW}... {GREEN}");
				io::stdout().flush().context("Failed flush")?;
			}
			print!("{RESET}");

			if source.trim().is_empty() {
				break;
			}
			self.run(source.trim())?;
			self.had_error = false;
			self.had_runtime_error = false;
		}
		Ok(ExitCode::SUCCESS)
	}

	/// One batch through the pipeline. The evaluator only runs when every
	/// earlier stage was clean; the debug printers run instead of it when
	/// their flags are set.
	fn run(&mut self, source: &str) -> anyhow::Result<()> {
		let (tokens, scan_errors) = Scanner::new(source).scan_tokens()?;

		if self.print_lex_table {
			lex_table(&mut io::stdout(), &tokens)?;
		}

		let (statements, parse_errors) = Parser::new(tokens).parse()?;
		let check_errors = self.checker.check(&statements);

		if scan_errors + parse_errors + check_errors > 0 {
			self.had_error = true;
			return Ok(());
		}

		if self.print_ast {
			AstPrinter::new(io::stdout()).print(&statements)?;
		}

		if self.print_id_table {
			if !self.natives_printed {
				self.id_printer.print_natives()?;
				self.natives_printed = true;
			}
			self.id_printer.print(&statements)?;
		}

		if self.interpret {
			if let Err(error) = self.interpreter.interpret(&statements) {
				report(error.line, "Interprete", &error);
				self.had_runtime_error = true;
			}
		}

		Ok(())
	}
}
