use std::process::ExitCode;

use clap::Parser;
use zrv::{
	cli::Cli,
	colors::{RED, RESET},
	Zrv,
};

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(error) => {
			eprintln!("{RED}{error}{RESET}");
			return ExitCode::from(64);
		}
	};

	if cli.help {
		println!("{}", Cli::usage());
		return ExitCode::SUCCESS;
	}

	let mut zrv = Zrv::new(&cli);
	let result = match &cli.script {
		Some(path) => zrv.run_file(path),
		None => zrv.run_prompt(),
	};

	match result {
		Ok(code) => code,
		Err(error) => {
			eprintln!("{RED}Failed run: {error}{RESET}");
			ExitCode::from(64)
		}
	}
}
