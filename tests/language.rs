use std::fs;

use pascaline::{
    ast::Statement,
    error::{Error, LexError, ParseError, RuntimeError},
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::parse,
    },
    run_with_input,
};
use walkdir::WalkDir;

/// Runs a program on empty input and returns its output lines.
fn run_lines(source: &str) -> Vec<String> {
    run_lines_with_input(source, "")
}

/// Runs a program on the given input text and returns its output lines.
fn run_lines_with_input(source: &str, input: &str) -> Vec<String> {
    let output = run_with_input(source, input)
        .unwrap_or_else(|e| panic!("Program failed: {e}\nSource:\n{source}"));
    output.lines().map(str::to_string).collect()
}

/// Runs a program expected to fail during execution and returns the error.
fn runtime_error(source: &str) -> RuntimeError {
    match run_with_input(source, "") {
        Err(Error::Runtime(e)) => e,
        Err(other) => panic!("Expected a runtime error, got: {other}"),
        Ok(output) => panic!("Program succeeded but was expected to fail:\n{output}"),
    }
}

/// Runs a program expected to be rejected by the parser and returns the
/// error.
fn syntax_error(source: &str) -> ParseError {
    match run_with_input(source, "") {
        Err(Error::Syntax(e)) => e,
        Err(other) => panic!("Expected a syntax error, got: {other}"),
        Ok(output) => panic!("Program parsed but was expected to fail:\n{output}"),
    }
}

#[test]
fn demo_programs_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "pas")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_with_input(&source, "") {
            panic!("Demo {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

#[test]
fn hello_world_prints_one_line() {
    let source = "
        program test;
        begin
            writeln('Hello World');
        end.
    ";
    assert_eq!(run_lines(source), ["Hello World"]);
}

#[test]
fn identical_runs_produce_identical_output() {
    let source = "
        program test;
        var i: integer;
        begin
            for i := 1 to 5 do
                writeln(i * i);
        end.
    ";
    assert_eq!(run_lines(source), run_lines(source));
}

#[test]
fn integer_arithmetic() {
    let source = "
        program test;
        var x, y: integer;
        begin
            x := 10;
            y := 5;
            writeln(x + y);
            writeln(x - y);
            writeln(x * y);
            writeln(x div y);
        end.
    ";
    assert_eq!(run_lines(source), ["15", "5", "50", "2"]);
}

#[test]
fn boolean_operators_and_textual_forms() {
    let source = "
        program test;
        var a, b: boolean;
        begin
            a := true;
            b := false;
            writeln(a and b);
            writeln(a or b);
            writeln(not a);
        end.
    ";
    assert_eq!(run_lines(source), ["False", "True", "False"]);
}

#[test]
fn real_division_and_formatting() {
    let source = "
        program test;
        begin
            writeln(1 / 2);
            writeln(4 / 2);
            writeln(1.5 + 1);
        end.
    ";
    // `/` always yields a real, and reals keep their decimal point.
    assert_eq!(run_lines(source), ["0.5", "2.0", "2.5"]);
}

#[test]
fn integer_division_rounds_toward_negative_infinity() {
    let source = "
        program test;
        begin
            writeln(7 div 2);
            writeln(-7 div 2);
            writeln(-7 mod 2);
            writeln(7 mod -2);
            writeln(7.9 div 2);
        end.
    ";
    assert_eq!(run_lines(source), ["3", "-4", "1", "-1", "3"]);
}

#[test]
fn division_family_rejects_zero() {
    for operator in ["div", "mod", "/"] {
        let source = format!(
                             "
        program test;
        begin
            writeln(1 {operator} 0);
        end.
    "
        );
        assert_eq!(runtime_error(&source), RuntimeError::DivisionByZero);
    }
}

#[test]
fn string_concatenation_and_comparison() {
    let source = "
        program test;
        begin
            writeln('foo' + 'bar');
            if 'abc' < 'abd' then
                writeln('ordered');
            writeln('a' = 'a');
        end.
    ";
    assert_eq!(run_lines(source), ["foobar", "ordered", "True"]);
}

#[test]
fn string_escape_sequences() {
    let source = "
        program test;
        begin
            writeln('a\\tb');
            writeln('it\\'s');
            writeln(\"double \\\"quoted\\\"\");
        end.
    ";
    assert_eq!(run_lines(source), ["a\tb", "it's", "double \"quoted\""]);
}

#[test]
fn mixing_strings_and_numbers_is_unsupported() {
    let source = "
        program test;
        begin
            writeln('a' + 1);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UnsupportedBinary { operator: "+".to_string() });
}

#[test]
fn if_else_picks_the_right_branch() {
    let source = "
        program test;
        var x: integer;
        begin
            x := 10;
            if x > 5 then
                writeln('greater')
            else
                writeln('smaller');
        end.
    ";
    assert_eq!(run_lines(source), ["greater"]);
}

#[test]
fn dangling_else_parses_to_plain_assignments() {
    let source = "
        program test;
        var x, y: integer;
        begin
            if x > 0 then y := 1 else y := 0;
        end.
    ";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Block(statements) = &program.body else {
        panic!("program body is a block")
    };
    assert_eq!(statements.len(), 1);

    let Statement::If { then_branch,
                        else_branch, .. } = &statements[0]
    else {
        panic!("expected an if statement, got {:?}", statements[0])
    };
    assert!(matches!(**then_branch, Statement::Assignment { .. }));
    assert!(matches!(else_branch.as_deref(), Some(Statement::Assignment { .. })));
}

#[test]
fn dangling_else_attaches_to_nearest_then() {
    let source = "
        program test;
        var x: integer;
        begin
            if x > 0 then if x > 10 then writeln('big') else writeln('small');
        end.
    ";
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();

    let Statement::Block(statements) = &program.body else {
        panic!("program body is a block")
    };
    let Statement::If { then_branch,
                        else_branch, .. } = &statements[0]
    else {
        panic!("expected an if statement")
    };

    assert!(else_branch.is_none(), "the else belongs to the inner if");
    let Statement::If { else_branch: inner_else, .. } = &**then_branch else {
        panic!("the then branch is the inner if")
    };
    assert!(inner_else.is_some());
}

#[test]
fn while_loop_counts() {
    let source = "
        program test;
        var i: integer;
        begin
            i := 1;
            while i <= 3 do
            begin
                writeln(i);
                i := i + 1;
            end;
        end.
    ";
    assert_eq!(run_lines(source), ["1", "2", "3"]);
}

#[test]
fn truthiness_drives_conditions() {
    let source = "
        program test;
        var n: integer = 3;
        begin
            while n do
            begin
                writeln(n);
                n := n - 1;
            end;
            if 'text' then
                writeln('non-empty');
            if 0 then
                writeln('never')
            else
                writeln('zero is false');
        end.
    ";
    assert_eq!(run_lines(source),
               ["3", "2", "1", "non-empty", "zero is false"]);
}

#[test]
fn for_loop_is_inclusive() {
    let source = "
        program test;
        var i: integer;
        begin
            for i := 1 to 3 do
                writeln(i);
        end.
    ";
    assert_eq!(run_lines(source), ["1", "2", "3"]);
}

#[test]
fn for_loop_with_reversed_bounds_runs_zero_times() {
    let source = "
        program test;
        var i: integer;
        begin
            for i := 5 to 1 do
                writeln(i);
            writeln('done');
        end.
    ";
    assert_eq!(run_lines(source), ["done"]);
}

#[test]
fn for_loop_variable_does_not_outlive_the_loop() {
    let source = "
        program test;
        begin
            for i := 1 to 3 do
                writeln(i);
            writeln(i);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedVariable { name: "i".to_string() });
}

#[test]
fn for_loop_bounds_must_be_integers() {
    let source = "
        program test;
        var i: integer;
        begin
            for i := 1 to 2.5 do
                writeln(i);
        end.
    ";
    assert_eq!(runtime_error(source), RuntimeError::ForBoundNotInteger);
}

#[test]
fn arrays_store_and_read_back() {
    let source = "
        program test;
        var arr: array[3] of integer;
        var i: integer;
        begin
            arr[0] := 10;
            arr[1] := 20;
            arr[2] := 30;
            for i := 0 to 2 do
                writeln(arr[i]);
        end.
    ";
    assert_eq!(run_lines(source), ["10", "20", "30"]);
}

#[test]
fn array_cells_start_at_the_element_default() {
    let source = "
        program test;
        var xs: array[2] of integer;
        var ss: array[2] of string;
        begin
            writeln(xs[0]);
            writeln(ss[1] = '');
        end.
    ";
    assert_eq!(run_lines(source), ["0", "True"]);
}

#[test]
fn array_index_out_of_bounds_fails() {
    let source = "
        program test;
        var arr: array[3] of integer;
        begin
            writeln(arr[3]);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::IndexOutOfBounds { index: 3, size: 3 });
}

#[test]
fn negative_array_index_fails() {
    let source = "
        program test;
        var arr: array[3] of integer;
        begin
            arr[-1] := 5;
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::IndexOutOfBounds { index: -1, size: 3 });
}

#[test]
fn array_index_must_be_an_integer() {
    let source = "
        program test;
        var arr: array[3] of integer;
        begin
            writeln(arr[1.5]);
        end.
    ";
    assert_eq!(runtime_error(source), RuntimeError::IndexNotInteger);
}

#[test]
fn indexing_a_scalar_fails() {
    let source = "
        program test;
        var x: integer;
        begin
            writeln(x[0]);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::NotAnArray { name: "x".to_string() });
}

#[test]
fn assignment_requires_a_declared_variable() {
    let source = "
        program test;
        begin
            x := 1;
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedVariable { name: "x".to_string() });
}

#[test]
fn variable_initializers_run_in_declaration_order() {
    let source = "
        program test;
        var x: integer = 5;
        var y: integer = x + 1;
        begin
            writeln(x);
            writeln(y);
        end.
    ";
    assert_eq!(run_lines(source), ["5", "6"]);
}

#[test]
fn procedures_mutate_globals() {
    let source = "
        program test;
        var count: integer;
        procedure bump;
        begin
            count := count + 1;
        end
        begin
            bump;
            bump;
            writeln(count);
        end.
    ";
    assert_eq!(run_lines(source), ["2"]);
}

#[test]
fn parameters_pass_by_value() {
    let source = "
        program test;
        var x: integer = 10;
        procedure change(x: integer);
        begin
            x := 99;
        end
        begin
            change(x);
            writeln(x);
        end.
    ";
    assert_eq!(run_lines(source), ["10"]);
}

#[test]
fn callees_never_see_caller_locals() {
    let source = "
        program test;
        procedure inner;
        begin
            writeln(x);
        end
        procedure outer;
        var x: integer;
        begin
            x := 5;
            inner;
        end
        begin
            outer;
        end.
    ";
    // Call frames are rooted at the global environment, so `inner` cannot
    // read `outer`'s local even though `outer` is the caller.
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedVariable { name: "x".to_string() });
}

#[test]
fn recursive_functions_work() {
    let source = "
        program test;
        function fact(n: integer): integer;
        begin
            if n <= 1 then return 1;
            return n * fact(n - 1);
        end
        begin
            writeln(fact(5));
        end.
    ";
    assert_eq!(run_lines(source), ["120"]);
}

#[test]
fn function_without_return_yields_the_declared_default() {
    let source = "
        program test;
        function silent: integer;
        begin
            writeln('ran');
        end
        begin
            writeln(silent());
        end.
    ";
    assert_eq!(run_lines(source), ["ran", "0"]);
}

#[test]
fn bare_return_yields_a_false_value() {
    let source = "
        program test;
        function nothing: integer;
        begin
            return;
        end
        begin
            if nothing() then
                writeln('truthy')
            else
                writeln('falsy');
        end.
    ";
    assert_eq!(run_lines(source), ["falsy"]);
}

#[test]
fn return_unwinds_nested_loops() {
    let source = "
        program test;
        function find: integer;
        var i, j: integer;
        begin
            for i := 0 to 9 do
                for j := 0 to 9 do
                    if i * j = 12 then return i * 10 + j;
            return -1;
        end
        begin
            writeln(find());
        end.
    ";
    assert_eq!(run_lines(source), ["26"]);
}

#[test]
fn logical_operators_evaluate_both_operands() {
    let source = "
        program test;
        var hits: integer;
        function touch(v: boolean): boolean;
        begin
            hits := hits + 1;
            return v;
        end
        begin
            if touch(false) and touch(true) then
                writeln('unexpected');
            writeln(hits);
        end.
    ";
    // No short-circuit: both calls happen even though the left side is
    // already false.
    assert_eq!(run_lines(source), ["2"]);
}

#[test]
fn arity_is_checked_exactly() {
    let source = "
        program test;
        function double(n: integer): integer;
        begin
            return n * 2;
        end
        begin
            writeln(double(1, 2));
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::ArityMismatch { name:     "double".to_string(),
                                             expected: 1,
                                             found:    2, });
}

#[test]
fn unknown_callees_are_reported() {
    let source = "
        program test;
        begin
            mystery(1);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedProcedure { name: "mystery".to_string() });

    let source = "
        program test;
        var x: integer;
        begin
            x := mystery(1);
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedFunction { name: "mystery".to_string() });
}

#[test]
fn writeln_concatenates_without_separators() {
    let source = "
        program test;
        var x: integer = 7;
        begin
            writeln('x = ', x, '!');
        end.
    ";
    assert_eq!(run_lines(source), ["x = 7!"]);
}

#[test]
fn empty_writeln_emits_a_blank_line() {
    let source = "
        program test;
        begin
            writeln('a');
            writeln();
            writeln;
            writeln('b');
        end.
    ";
    assert_eq!(run_lines(source), ["a", "", "", "b"]);
}

#[test]
fn readln_coerces_by_content() {
    let source = "
        program test;
        var a, b, c: string;
        begin
            readln(a);
            readln(b);
            readln(c);
            writeln(a);
            writeln(b);
            writeln(c);
            writeln(a + 1);
        end.
    ";
    // `42` became an integer (so adding 1 works), `3.5` a real, and the
    // last line stayed a string.
    assert_eq!(run_lines_with_input(source, "42\n3.5\nhello\n"),
               ["42", "3.5", "hello", "43"]);
}

#[test]
fn readln_stops_quietly_at_end_of_input() {
    let source = "
        program test;
        var a, b: integer;
        begin
            readln(a, b);
            writeln(a);
            writeln(b);
        end.
    ";
    assert_eq!(run_lines_with_input(source, "7\n"), ["7", "0"]);
}

#[test]
fn readln_into_array_cells() {
    let source = "
        program test;
        var xs: array[2] of integer;
        begin
            readln(xs[0], xs[1]);
            writeln(xs[0] + xs[1]);
        end.
    ";
    assert_eq!(run_lines_with_input(source, "3\n4\n"), ["7"]);
}

#[test]
fn keywords_are_case_insensitive() {
    let source = "
        PROGRAM Test;
        VAR x: INTEGER;
        BEGIN
            x := 2;
            WriteLn(X + 1);
        END.
    ";
    // Keywords fold case; identifiers do not, so `X` is a different name.
    assert_eq!(runtime_error(source),
               RuntimeError::UndefinedVariable { name: "X".to_string() });

    let source = "
        PROGRAM Test;
        VAR x: INTEGER;
        BEGIN
            x := 2;
            WriteLn(x + 1);
        END.
    ";
    assert_eq!(run_lines(source), ["3"]);
}

#[test]
fn comments_are_skipped() {
    let source = "
        program test;
        // a line comment
        var x: integer;
        begin
            x := { inline } 40 + 2;
            { a comment
              spanning lines }
            writeln(x);
        end.
    ";
    assert_eq!(run_lines(source), ["42"]);
}

#[test]
fn unterminated_string_absorbs_the_rest_of_the_input() {
    let tokens = tokenize("writeln('abc").unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
    assert_eq!(kinds,
               [Token::Writeln,
                Token::LParen,
                Token::Str("abc".to_string()),
                Token::Eof]);
}

#[test]
fn tokens_carry_line_and_column() {
    let tokens = tokenize("x := 1;\n  y := 2;").unwrap();

    let (_, first) = &tokens[0];
    assert_eq!((first.line, first.column), (1, 1));

    let y = tokens.iter()
                  .find(|(token, _)| *token == Token::Identifier("y".to_string()))
                  .map(|(_, pos)| *pos)
                  .unwrap();
    assert_eq!((y.line, y.column), (2, 3));
}

#[test]
fn lexical_errors_carry_the_character_and_position() {
    let source = "program test;\nbegin\n  writeln(@);\nend.";
    match run_with_input(source, "") {
        Err(Error::Lex(LexError::UnexpectedCharacter { character,
                                                       line,
                                                       column, })) => {
            assert_eq!(character, '@');
            assert_eq!((line, column), (3, 11));
        },
        other => panic!("Expected a lexical error, got: {other:?}"),
    }
}

#[test]
fn syntax_errors_carry_the_offending_position() {
    let source = "program test;\nbegin\n    if 1 writeln('x');\nend.";
    match syntax_error(source) {
        ParseError::ExpectedToken { expected,
                                    line,
                                    column, .. } => {
            assert_eq!(expected, "'then'");
            assert_eq!((line, column), (3, 10));
        },
        other => panic!("Expected a missing-token error, got: {other}"),
    }
}

#[test]
fn missing_program_header_is_rejected() {
    let source = "begin writeln('x'); end.";
    assert!(matches!(syntax_error(source), ParseError::ExpectedToken { .. }));
}

#[test]
fn stray_tokens_inside_blocks_are_recovered() {
    let source = "
        program test;
        begin
            ;
            writeln('first');
            begin
                writeln('nested');
            end;
            writeln('last');
        end.
    ";
    // One-token-skip recovery: the stray semicolons never abort the parse.
    assert_eq!(run_lines(source), ["first", "nested", "last"]);
}

#[test]
fn grouped_declarations_share_their_type() {
    let source = "
        program test;
        var a, b, c: integer;
        var s, t: string;
        begin
            writeln(a + b + c);
            writeln(s = t);
        end.
    ";
    assert_eq!(run_lines(source), ["0", "True"]);
}

#[test]
fn parameter_groups_share_their_type() {
    let source = "
        program test;
        function add3(a, b: integer; c: integer): integer;
        begin
            return a + b + c;
        end
        begin
            writeln(add3(1, 2, 3));
        end.
    ";
    assert_eq!(run_lines(source), ["6"]);
}

#[test]
fn locals_shadow_globals_inside_calls() {
    let source = "
        program test;
        var x: integer = 1;
        procedure shadow;
        var x: integer;
        begin
            x := 99;
            writeln(x);
        end
        begin
            shadow;
            writeln(x);
        end.
    ";
    assert_eq!(run_lines(source), ["99", "1"]);
}

#[test]
fn unary_operators_apply() {
    let source = "
        program test;
        var x: integer = 5;
        begin
            writeln(-x);
            writeln(+x);
            writeln(not true);
            writeln(not 0);
        end.
    ";
    assert_eq!(run_lines(source), ["-5", "5", "False", "True"]);
}

#[test]
fn negating_a_string_is_unsupported() {
    let source = "
        program test;
        begin
            writeln(-'abc');
        end.
    ";
    assert_eq!(runtime_error(source),
               RuntimeError::UnsupportedUnary { operator: "-".to_string() });
}

#[test]
fn operator_precedence_follows_the_ladder() {
    let source = "
        program test;
        begin
            writeln(2 + 3 * 4);
            writeln((2 + 3) * 4);
            writeln(1 + 1 = 2);
            writeln(1 < 2 and 3 < 4);
        end.
    ";
    assert_eq!(run_lines(source), ["14", "20", "True", "True"]);
}
