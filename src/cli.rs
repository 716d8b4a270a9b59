use std::path::PathBuf;

use clap::Parser;

/// CLI arguments. Auto-help is disabled so `-h` stays an ordinary flag:
/// the usage text and the exit codes are part of the tool's contract.
#[derive(Parser, Debug)]
#[command(name = "zrv", disable_help_flag = true)]
pub struct Cli {
	/// Prints the usage message
	#[arg(short = 'h', long = "help")]
	pub help: bool,

	/// Prints the abstract syntax tree
	#[arg(short = 'a', long = "ast")]
	pub ast: bool,

	/// Prints the table of identifiers
	#[arg(short = 'i', long = "id-table")]
	pub id_table: bool,

	/// Prints the table of lexeme kinds per line
	#[arg(short = 'l', long = "lex-table")]
	pub lex_table: bool,

	/// Script to run; the interactive prompt starts when omitted
	pub script: Option<PathBuf>,
}

impl Cli {
	/// Any flag turns interpretation off; the flags compose freely.
	pub fn interpret(&self) -> bool { !(self.help || self.ast || self.id_table || self.lex_table) }

	pub fn usage() -> String {
		[
			"Usage: zrv [keys] [script]",
			"Any flag will turn interpretation off. Can be combined together.",
			"Available keys:",
			"\t-h\t--help\t\tprints this message",
			"\t-a\t--ast\t\tprints abstract syntax tree",
			"\t-i\t--id-table\tprints table of identifiers",
			"\t-l\t--lex-table\tprints table of lexemes types",
		]
		.join("\n")
	}
}
