// Integration tests for the minipas front end

use std::fs;
use std::path::Path;

use minipas::parser::ast::{Expression, Node, Program, Statement};
use minipas::parser::{Lexer, Parser};

fn parse(source: &str) -> (Option<Program>, Parser) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser)
}

#[test]
fn test_minimal_program() {
    let (program, parser) = parse("program Test; begin x := 1; end.");

    assert!(parser.errors().is_empty(), "{:?}", parser.errors().messages());
    assert!(parser.lexer().errors().is_empty());

    let program = program.expect("Parsing failed");
    assert_eq!(program.name.value, "test");

    let statements = &program.block.body.statements;
    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::Assignment(assign) => {
                assert_eq!(assign.target.value, "x");
                assert!(matches!(*assign.value, Expression::Integer(ref i) if i.value == 1));
            }
            other => panic!("Expected assignment, got {other}"),
        },
        other => panic!("Expected expression statement, got {other}"),
    }
}

#[test]
fn test_render_while_program() {
    let (program, parser) = parse("program t; begin while i < 3 do i := i + 1; end.");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors().messages());

    let expected = [
        "Program: {",
        "\tIdentifier: t",
        "\tBlock: {",
        "\t\tBegin: {",
        "\t\t\tWhile: {",
        "\t\t\t\tCondition: (i < 3)",
        "\t\t\t\tBody: {",
        "\t\t\t\t\tExpression: {",
        "\t\t\t\t\t\tAssignment: {",
        "\t\t\t\t\t\t\tIdentifier: i",
        "\t\t\t\t\t\t\tValue: (i + 1)",
        "\t\t\t\t\t\t}",
        "\t\t\t\t\t}",
        "\t\t\t\t}",
        "\t\t\t}",
        "\t\t}",
        "\t}",
        "}",
    ]
    .join("\n");

    assert_eq!(program.unwrap().to_string(), expected);
}

#[test]
fn test_render_declarations() {
    let source = r#"
        program t;
        var a, b: integer;
        procedure p(var s: string);
        begin
        end;
        begin
        end.
    "#;
    let (program, parser) = parse(source);
    assert!(parser.errors().is_empty(), "{:?}", parser.errors().messages());

    let expected = [
        "Program: {",
        "\tIdentifier: t",
        "\tBlock: {",
        "\t\tVar: {",
        "\t\t\tDeclaration: {",
        "\t\t\t\tIdentifiers: {a, b}",
        "\t\t\t\tType: integer",
        "\t\t\t}",
        "\t\t}",
        "\t\tProcedure: {",
        "\t\t\tIdentifier: p",
        "\t\t\tParameters: {",
        "\t\t\t\tParameter block: {",
        "\t\t\t\t\tVar: true",
        "\t\t\t\t\tDeclarations: {",
        "\t\t\t\t\t\tDeclaration: {",
        "\t\t\t\t\t\t\tIdentifiers: {s}",
        "\t\t\t\t\t\t\tType: string",
        "\t\t\t\t\t\t}",
        "\t\t\t\t\t}",
        "\t\t\t\t}",
        "\t\t\t}",
        "\t\t\tBlock: {",
        "\t\t\t\tBegin: {",
        "\t\t\t\t}",
        "\t\t\t}",
        "\t\t}",
        "\t\tBegin: {",
        "\t\t}",
        "\t}",
        "}",
    ]
    .join("\n");

    assert_eq!(program.unwrap().to_string(), expected);
}

#[test]
fn test_sample_program() {
    let path = Path::new("demos/sample.pas");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let (program, parser) = parse(&source);
    assert!(parser.lexer().errors().is_empty(), "{:?}", parser.lexer().errors().messages());
    assert!(parser.errors().is_empty(), "{:?}", parser.errors().messages());

    let program = program.expect("Parsing failed");
    assert_eq!(program.name.value, "sample");

    let vars = program.block.var_section.as_ref().expect("Missing var section");
    assert_eq!(vars.declarations.len(), 3);
    assert_eq!(vars.declarations[0].names.len(), 2);

    let routines = &program.block.routines;
    assert_eq!(routines.len(), 2);
    assert!(routines[0].is_function());
    assert_eq!(routines[0].name.value, "sum");
    assert!(routines[0].block.var_section.is_some());
    assert!(!routines[1].is_function());
    assert!(routines[1].parameters[0].is_var);
    assert!(!routines[1].parameters[1].is_var);

    let body = &program.block.body.statements;
    assert_eq!(body.len(), 4);
    match &body[3] {
        Statement::Conditional(cond) => {
            assert!(cond.alternative.is_some());
            assert_eq!(cond.condition.to_string(), "done");
        }
        other => panic!("Expected conditional, got {other}"),
    }

    let rendered = program.to_string();
    assert!(rendered.contains("Call: {"));
    assert!(rendered.contains("Value: ((not (total < 0)) and true)"));
    assert!(rendered.contains("\"total: \""));
    assert!(rendered.contains("'x'"));
}

#[test]
fn test_missing_begin() {
    let (program, parser) = parse("program Test; end.");

    assert!(program.is_none());
    assert!(!parser.errors().is_empty());
    assert!(parser
        .errors()
        .iter()
        .any(|error| error.to_string().contains("BEGIN")));
}

#[test]
fn test_chained_assignment_is_dropped() {
    let (program, parser) = parse("program t; begin a := b := 1; end.");

    assert_eq!(
        parser.errors().messages(),
        vec!["Line 1: multiple assignment operators in a single expression".to_string()]
    );
    let program = program.expect("Program should survive a dropped statement");
    assert!(program.block.body.statements.is_empty());
}

#[test]
fn test_precedence_nesting() {
    let (program, parser) = parse("program t; begin x := 1 + 2 * 3; end.");
    assert!(parser.errors().is_empty());

    let program = program.unwrap();
    let Statement::Expression(stmt) = &program.block.body.statements[0] else {
        panic!("Expected expression statement");
    };
    let Expression::Assignment(assign) = &stmt.expression else {
        panic!("Expected assignment");
    };
    match assign.value.as_ref() {
        Expression::Infix(sum) => {
            assert_eq!(sum.operator, "+");
            assert!(matches!(*sum.left, Expression::Integer(ref i) if i.value == 1));
            match sum.right.as_ref() {
                Expression::Infix(product) => {
                    assert_eq!(product.operator, "*");
                    assert_eq!(product.to_string(), "(2 * 3)");
                }
                other => panic!("Expected product, got {other}"),
            }
        }
        other => panic!("Expected sum, got {other}"),
    }
}

#[test]
fn test_call_arguments() {
    let (program, parser) = parse("program t; begin foo(1, 2); bar(); end.");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors().messages());

    let program = program.unwrap();
    let calls: Vec<_> = program
        .block
        .body
        .statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::Call(call) => (call.function.value.clone(), call.arguments.len()),
                other => panic!("Expected call, got {other}"),
            },
            other => panic!("Expected expression statement, got {other}"),
        })
        .collect();

    assert_eq!(calls, vec![("foo".to_string(), 2), ("bar".to_string(), 0)]);
}

#[test]
fn test_visit_tokens_covers_tree() {
    let (program, _) = parse("program t; begin x := 1 + 2; end.");
    let program = program.unwrap();

    let mut literals = Vec::new();
    program.visit_tokens(&mut |token| literals.push(token.literal.clone()));

    // program, name, block `;`, begin, statement head, `:=`, x, `+`, 1, 2
    assert_eq!(literals.len(), 10);
    assert_eq!(literals[0], "program");
    assert!(literals.iter().any(|l| l == ":="));
    assert!(literals.iter().any(|l| l == "+"));
}

#[test]
fn test_error_reports_token_line() {
    let source = "program t;\nbegin\n  x := 1;\n  y := ;\nend.";
    let (_, parser) = parse(source);

    assert_eq!(
        parser.errors().messages(),
        vec!["Line 4: no prefix parse function for `;`".to_string()]
    );
}

#[test]
fn test_lexer_and_parser_errors_are_separate() {
    let (_, parser) = parse("program t; begin x := 1 @ 2; end.");

    let lexer_messages = parser.lexer().errors().messages();
    assert_eq!(lexer_messages.len(), 1);
    assert!(lexer_messages[0].contains("invalid character"));
    assert!(parser
        .errors()
        .iter()
        .all(|error| !error.to_string().contains("invalid character")));
}

#[test]
fn test_empty_char_literal_keeps_following_statements() {
    let (program, parser) = parse("program t; begin c := ''; d := 'x'; end.");

    assert_eq!(parser.lexer().errors().len(), 1);
    let program = program.expect("Program should survive a bad literal");

    let statements = &program.block.body.statements;
    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::Assignment(assign) => {
                assert_eq!(assign.target.value, "d");
                assert!(matches!(*assign.value, Expression::Char(ref c) if c.value == 'x'));
            }
            other => panic!("Expected assignment, got {other}"),
        },
        other => panic!("Expected expression statement, got {other}"),
    }
}
