use zrv::{
	checker::Checker,
	interpreter::Interpreter,
	parser::Parser,
	scanner::Scanner,
	statement::Statement,
	RuntimeError,
};

fn pipeline(code: &str) -> Vec<Statement> {
	let (tokens, scan_errors) = Scanner::new(code).scan_tokens().expect("scanner should not fail");
	assert_eq!(scan_errors, 0, "scan errors in {code:?}");
	let (statements, parse_errors) = Parser::new(tokens).parse().expect("parser should not fail");
	assert_eq!(parse_errors, 0, "parse errors in {code:?}");
	let mut checker = Checker::new();
	assert_eq!(checker.check(&statements), 0, "check errors in {code:?}");
	statements
}

/// Runs a program through the whole pipeline and returns its stdout.
fn run(code: &str) -> String {
	let statements = pipeline(code);
	let mut buffer = Vec::new();
	{
		let mut interpreter = Interpreter::new(&mut buffer);
		interpreter.interpret(&statements).expect("program should run cleanly");
	}
	String::from_utf8(buffer).expect("program output should be UTF-8")
}

fn run_error(code: &str) -> RuntimeError {
	let statements = pipeline(code);
	let mut interpreter = Interpreter::new(Vec::new());
	interpreter.interpret(&statements).expect_err("program should hit a runtime error")
}

fn check_errors(code: &str) -> usize {
	let (tokens, _) = Scanner::new(code).scan_tokens().expect("scanner should not fail");
	let (statements, _) = Parser::new(tokens).parse().expect("parser should not fail");
	Checker::new().check(&statements)
}

#[test]
fn expression_evaluation() {
	assert_eq!(run("print 1 + 2 * 3;"), "7\n");
	assert_eq!(run("print \"foo\" + 1;"), "foo1\n");
	assert_eq!(run("print prn(\"a+b*c\");"), "a b c * + \n");
}

#[test]
fn block_scoping() {
	let code = "var a = 1; { var a = 2; print a; } print a;";
	assert_eq!(run(code), "2\n1\n");
}

#[test]
fn functions_and_recursion() {
	assert_eq!(run("fun f() {} print f();"), "nil\n");
	let fib = "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(10);";
	assert_eq!(run(fib), "55\n");
}

#[test]
fn for_loops_match_their_desugaring() {
	let for_loop = "for (var i = 0; i < 4; i = i + 1) print i;";
	let desugared = "{ var i = 0; while (i < 4) { print i; i = i + 1; } }";
	assert_eq!(run(for_loop), "0\n1\n2\n3\n");
	assert_eq!(run(for_loop), run(desugared));
}

#[test]
fn logical_operators_short_circuit() {
	let code = "\
		var calls = 0;\n\
		fun side() { calls = calls + 1; return true; }\n\
		false and side();\n\
		true or side();\n\
		print calls;\n\
		true and side();\n\
		false or side();\n\
		print calls;";
	assert_eq!(run(code), "0\n2\n");
}

#[test]
fn number_classification() {
	let code = "print type(0x10); print type(0b1010); print type(3.0); print type(3);";
	assert_eq!(run(code), "integer\nunsigned byte\ndouble\ninteger\n");
}

#[test]
fn numeric_promotion() {
	assert_eq!(run("print 0b1 + 1; print type(0b1 + 1);"), "2\ninteger\n");
	assert_eq!(run("print 1 + 1.0; print type(1 + 1.0);"), "2\ndouble\n");
	assert_eq!(run("print 1 << 2;"), "4\n");
	let error = run_error("print 1.0 << 2;");
	assert_eq!(error.to_string(), "there is no operation '<<' for doubles");
}

#[test]
fn runtime_errors_carry_their_line() {
	let error = run_error("var a = 1;\nprint a / 0;");
	assert_eq!(error.line, 2);
	assert_eq!(error.to_string(), "Division by zero.");

	let error = run_error("var x = 1;\n\nx();");
	assert_eq!(error.line, 3);
	assert_eq!(error.to_string(), "Can only call functions.");

	let error = run_error("fun f(a, b) {} f(1);");
	assert_eq!(error.to_string(), "Expect 2 arguments but got 1.");
}

#[test]
fn checker_catches_scope_violations() {
	assert_eq!(check_errors("{ var a = 1; } print a;"), 1);
	assert_eq!(check_errors("var a = 1; var a = 2;"), 1);
	assert_eq!(check_errors("var a = 1; { var a = 2; print a; }"), 0);
	assert_eq!(check_errors("print missing;"), 1);
}

#[test]
fn parser_rejects_return_outside_functions() {
	let (tokens, _) = Scanner::new("return 1;").scan_tokens().unwrap();
	let (statements, errors) = Parser::new(tokens).parse().unwrap();
	assert_eq!(errors, 1);
	assert!(statements.is_empty());
}

#[test]
fn globals_are_the_only_closure() {
	// a function declared inside a block cannot see the block's locals
	let code = "{ var hidden = 1; fun peek() { return hidden; } }";
	assert_eq!(check_errors(code), 1);

	// but it always sees, and can mutate, the globals
	let code = "var n = 1; fun double() { n = n + n; } double(); double(); print n;";
	assert_eq!(run(code), "4\n");
}

#[test]
fn character_literals() {
	assert_eq!(run("print 'x';"), "x\n");
	assert_eq!(run("print type('x');"), "character\n");
	assert_eq!(run("print \"pre\" + 'x';"), "prex\n");
}

#[test]
fn stringification() {
	assert_eq!(run("print nil;"), "nil\n");
	assert_eq!(run("print true; print false;"), "true\nfalse\n");
	assert_eq!(run("print 2.5; print 2.0;"), "2.5\n2\n");
	assert_eq!(run("fun greet() {} print greet;"), "<fun greet>\n");
	assert_eq!(run("print clock;"), "<fun native>\n");
}

#[test]
fn prn_handles_argument_regions() {
	assert_eq!(run("print prn(\"f[a,b+c]\");"), "f a b c + @2 \n");
	assert_eq!(run("print prn(\"(a+b)*c\");"), "a b + c * \n");
}

#[test]
fn byte_arithmetic_widens_and_unary_wraps() {
	assert_eq!(run("print 0b11111111 + 1;"), "256\n");
	assert_eq!(run("print type(-0b1); print -0b1;"), "unsigned byte\n255\n");
}

#[test]
fn state_survives_batches_like_a_prompt_session() {
	let mut checker = Checker::new();
	let mut buffer = Vec::new();
	{
		let mut interpreter = Interpreter::new(&mut buffer);
		for line in ["var a = 1;", "fun next() { a = a + 1; return a; }", "next();", "print next();"] {
			let (tokens, _) = Scanner::new(line).scan_tokens().unwrap();
			let (statements, _) = Parser::new(tokens).parse().unwrap();
			assert_eq!(checker.check(&statements), 0);
			interpreter.interpret(&statements).unwrap();
		}
	}
	assert_eq!(String::from_utf8(buffer).unwrap(), "3\n");
}
