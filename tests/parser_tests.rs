// File: tests/parser_tests.rs
//
// End-to-end tests for the Quill front end: source text in, syntax tree
// (or the first syntax error) out.

use quill::lexer::{tokenize, tokenize_all, TokenKind};
use quill::parser::{parse, parse_tokens};
use quill::{
    parse_source, parse_source_with_config, BinaryOp, Block, Branch, DivisionMode, Expr,
    LexErrorReason, ParserConfig, Span, Stmt, SyntaxError,
};

fn parse_ok(source: &str) -> Block {
    parse_source(source).unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
}

fn n(v: f64) -> Expr {
    Expr::number(v)
}

fn print_stmt(text: &str) -> Stmt {
    Stmt::Print {
        value: Expr::string(text),
    }
}

#[test]
fn comments_and_whitespace_produce_no_tokens() {
    let sources = [
        "",
        "\n\n\t  ",
        "(# just a comment #)",
        "(# outer (# inner #) still outer #)\n  (# second #)",
        "(#\nmulti\nline\n#)",
    ];

    for source in sources {
        let tokens = tokenize_all(source).unwrap();
        assert_eq!(tokens.len(), 1, "source {:?}", source);
        assert_eq!(tokens[0].kind, TokenKind::End);
    }
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    let program = parse_ok("{ print 1 + 2 * 3; }");

    assert_eq!(
        program.statements,
        vec![Stmt::Print {
            value: Expr::binary(
                BinaryOp::Add,
                n(1.0),
                Expr::binary(BinaryOp::Mul, n(2.0), n(3.0))
            )
        }]
    );
}

#[test]
fn globals_locals_and_conditional() {
    let program = parse_ok(
        r#"{ global x 1; local y 2; if x < y { print "less"; } else { print "ge"; }; }"#,
    );

    assert_eq!(program.len(), 3);
    assert_eq!(
        program.statements[0],
        Stmt::AssignGlobal {
            name: "x".into(),
            value: n(1.0)
        }
    );
    assert_eq!(
        program.statements[1],
        Stmt::AssignLocal {
            name: "y".into(),
            value: n(2.0)
        }
    );
    assert_eq!(
        program.statements[2],
        Stmt::Conditional {
            branches: vec![Branch {
                condition: Expr::binary(BinaryOp::Lt, Expr::var("x"), Expr::var("y")),
                body: Block::new(vec![print_stmt("less")]),
            }],
            otherwise: Some(Block::new(vec![print_stmt("ge")])),
        }
    );
}

#[test]
fn function_declaration_and_call() {
    let program = parse_ok("{ fn add(a b) { return a + b; }; print add(1 2); }");

    assert_eq!(
        program.statements,
        vec![
            Stmt::DeclareFunction {
                name: "add".into(),
                params: vec!["a".into(), "b".into()],
                body: Block::new(vec![Stmt::Return {
                    value: Expr::binary(BinaryOp::Add, Expr::var("a"), Expr::var("b")),
                }]),
            },
            Stmt::Print {
                value: Expr::call("add", vec![n(1.0), n(2.0)]),
            },
        ]
    );
}

#[test]
fn equality_is_right_associative() {
    let program = parse_ok("{ a == b == c; }");

    assert_eq!(
        program.statements,
        vec![Stmt::Expression {
            expr: Expr::binary(
                BinaryOp::Eq,
                Expr::var("a"),
                Expr::binary(BinaryOp::Eq, Expr::var("b"), Expr::var("c")),
            )
        }]
    );
    assert_ne!(
        program.statements[0],
        Stmt::Expression {
            expr: Expr::binary(
                BinaryOp::Eq,
                Expr::binary(BinaryOp::Eq, Expr::var("a"), Expr::var("b")),
                Expr::var("c"),
            )
        }
    );
}

#[test]
fn unterminated_string_is_a_lex_error_at_the_quote() {
    let err = tokenize_all("print \"abc;").unwrap_err();
    assert_eq!(err.reason, LexErrorReason::UnterminatedString);
    assert_eq!(err.span, Span::new(6, 1, 7));

    match parse_source("{ print \"abc; }") {
        Err(SyntaxError::Lex(e)) => {
            assert_eq!(e.reason, LexErrorReason::UnterminatedString);
            assert_eq!(e.span, Span::new(8, 1, 9));
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}

#[test]
fn missing_closing_brace_fails_at_end_of_input() {
    let source = "{ print 1;";

    match parse_source(source) {
        Err(SyntaxError::Parse(e)) => {
            assert!(e.at_end_of_input());
            assert_eq!(e.span.offset, source.len());
            assert!(e.expected.contains(&"`}`".to_string()));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn missing_brace_in_nested_block() {
    match parse_source("{ while x { print x; ") {
        Err(SyntaxError::Parse(e)) => assert!(e.at_end_of_input()),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn relexing_joined_lexemes_gives_the_same_tree() {
    let source = r#"
        (# fizz-ish #)
        {
            global n 15;
            fn check(k) {
                if 0 == k - (k / 3) * 3 { return "fizz"; }
                elif !k { return None; }
                else { return -k; };
            };
            while n > 0 {
                print check(n) ; global n n - 1;
            };
            print "tab\tand \"quotes\"" ;
        }
    "#;

    let original = parse_ok(source);

    let tokens = tokenize_all(source).unwrap();
    let rebuilt: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    let rebuilt = rebuilt.join(" ");

    assert_eq!(parse_ok(&rebuilt), original);
}

#[test]
fn first_error_wins() {
    // The parse error at `)` comes before the bad character at the end.
    match parse_source("{ print ); $ }") {
        Err(SyntaxError::Parse(e)) => assert_eq!(e.found, "`)`"),
        other => panic!("expected a parse error, got {:?}", other),
    }

    // The bad character comes first here.
    assert!(matches!(
        parse_source("{ print $ ); }"),
        Err(SyntaxError::Lex(_))
    ));
}

#[test]
fn parses_pre_lexed_tokens() {
    let tokens = tokenize_all("{ print x; }").unwrap();
    let program = parse_tokens(tokens).unwrap();
    assert_eq!(
        program.statements,
        vec![Stmt::Print {
            value: Expr::var("x")
        }]
    );
}

#[test]
fn token_stream_without_end_marker() {
    let tokens: Vec<_> = tokenize("{ }").filter(|t| !matches!(t, Ok(t) if t.is_end())).collect();
    assert_eq!(tokens.len(), 2);
    assert!(parse(tokens).unwrap().is_empty());
}

#[test]
fn division_mode_is_configurable() {
    let legacy = ParserConfig::default().with_division(DivisionMode::LegacySubtraction);
    let source = "{ print 6 / 2; }";

    let distinct = parse_source(source).unwrap();
    let legacy = parse_source_with_config(source, &legacy).unwrap();

    assert_eq!(
        distinct.statements[0],
        Stmt::Print {
            value: Expr::binary(BinaryOp::Div, n(6.0), n(2.0))
        }
    );
    assert_eq!(
        legacy.statements[0],
        Stmt::Print {
            value: Expr::binary(BinaryOp::Sub, n(6.0), n(2.0))
        }
    );
}

#[test]
fn json_hand_off_uses_rule_names() {
    let program = parse_ok("{ fn f(a) { return -a; }; if !f(1) { print True; }; }");
    let json = serde_json::to_value(&program).unwrap();

    let decl = &json["statements"][0];
    assert_eq!(decl["kind"], "declare_function");
    assert_eq!(decl["params"], serde_json::json!(["a"]));
    assert_eq!(decl["body"]["statements"][0]["kind"], "return");
    assert_eq!(decl["body"]["statements"][0]["value"]["kind"], "unary");
    assert_eq!(decl["body"]["statements"][0]["value"]["op"], "negate");

    let cond = &json["statements"][1];
    assert_eq!(cond["kind"], "conditional");
    assert_eq!(cond["branches"][0]["condition"]["op"], "neg");
    assert_eq!(cond["branches"][0]["condition"]["operand"]["kind"], "call");
    assert!(cond["otherwise"].is_null());

    let back: Block = serde_json::from_value(json).unwrap();
    assert_eq!(back, program);
}

#[test]
fn independent_parses_run_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("{{ global x{} {}; print x{} * 2; }}", i, i, i);
                parse_source(&source).map(|b| b.len())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 2);
    }
}

#[test]
fn demo_scripts_parse() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");
    let mut count = 0;

    for entry in std::fs::read_dir(dir).unwrap().filter_map(Result::ok) {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "ql") {
            let source = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e));
            count += 1;
            if let Err(e) = parse_source(&source) {
                panic!("demo {:?} failed:\n{}", path, e);
            }
        }
    }

    assert!(count > 0, "no demo scripts found in {}", dir);
}

#[test]
fn default_nesting_limit_fits_a_small_thread_stack() {
    fn parens(depth: usize) -> String {
        format!("{{ print {}1{}; }}", "(".repeat(depth), ")".repeat(depth))
    }

    let limit = ParserConfig::default().max_depth;

    let result = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            // The block and the outer expression take two levels.
            let deepest = parse_source(&parens(limit - 2)).map(|b| b.len());
            let too_deep = parse_source(&parens(limit - 1));
            (deepest, too_deep)
        })
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(result.0.unwrap(), 1);
    assert!(matches!(
        result.1,
        Err(SyntaxError::NestingTooDeep { limit: l, .. }) if l == limit
    ));
}

#[test]
fn synthesized_end_sits_past_the_last_token() {
    let source = "{ print 1;";
    let tokens: Vec<_> = tokenize(source)
        .filter(|t| !matches!(t, Ok(t) if t.is_end()))
        .collect();

    match parse(tokens) {
        Err(SyntaxError::Parse(e)) => {
            assert!(e.at_end_of_input());
            assert_eq!(e.span, Span::new(source.len(), 1, source.len() + 1));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn huge_number_literal_is_rejected() {
    match parse_source("{ print 1e400; }") {
        Err(SyntaxError::Lex(e)) => {
            assert_eq!(e.reason, LexErrorReason::InvalidNumber("1e400".to_string()));
            assert_eq!(e.span, Span::new(8, 1, 9));
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}
