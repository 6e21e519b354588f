// Integration tests for the Jack syntax analyzer

use jackdaw::formats::{serialize_tokens, serialize_tree, to_json};
use jackdaw::parser::{Expected, Lexer, NodeKind, ParseError, Parser, TokenKind};
use jackdaw::{analyze, JackError, ParserConfig, TypeNamePolicy};

const SQUARE_GAME: &str = r#"
/** Implements a square moved by the arrow keys. */
class SquareGame {
    field Square square; // not allowed: class types are rejected for fields
}
"#;

const MAIN: &str = r#"
// Computes the average of a sequence of integers.
class Main {
    static int count;

    function void main() {
        var Array a;
        var int length, i, sum;

        let length = Keyboard.readInt("How many numbers? ");
        let a = Array.new(length);
        let i = 0;
        while (i < length) {
            let a[i] = Keyboard.readInt("Enter a number: ");
            let sum = sum + a[i];
            let i = i + 1;
        }
        if (length > 0) {
            do Output.printString("The average is ");
            do Output.printInt(sum / length);
        } else {
            do Output.printString("Nothing to average");
        }
        return;
    }

    method boolean isEmpty(int n, char c) {
        return ~(n = 0) & (c = 32);
    }
}
"#;

fn parse(source: &str) -> Result<jackdaw::ParseTree, ParseError> {
    Parser::from_source(source)
        .expect("Lexing failed")
        .parse_class()
}

#[test]
fn test_full_class_parses() {
    let tree = parse(MAIN).expect("Parsing failed");

    assert_eq!(tree.label, NodeKind::Class);
    assert_eq!(tree.children_labeled(NodeKind::ClassVarDec).count(), 1);
    assert_eq!(tree.children_labeled(NodeKind::Subroutine).count(), 2);

    let main = tree
        .children_labeled(NodeKind::Subroutine)
        .next()
        .expect("main subroutine");
    let body = main
        .children_labeled(NodeKind::SubroutineBody)
        .next()
        .expect("body");
    assert_eq!(body.children_labeled(NodeKind::VarDec).count(), 2);

    let statements = body
        .children_labeled(NodeKind::Statements)
        .next()
        .expect("statements");
    let kinds: Vec<&str> = statements
        .children
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "letStatement",
            "letStatement",
            "letStatement",
            "whileStatement",
            "ifStatement",
            "returnStatement",
        ]
    );
}

#[test]
fn test_leaves_reproduce_tokens() {
    let tokens = Lexer::new(MAIN).tokenize().expect("Lexing failed");
    let texts: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();

    let tree = Parser::new(tokens.clone())
        .parse_class()
        .expect("Parsing failed");

    assert_eq!(tree.leaf_values(), texts);
    for (leaf, token) in tree.leaves().iter().zip(&tokens) {
        assert_eq!(leaf.label, NodeKind::Token(token.kind));
    }
}

#[test]
fn test_field_with_class_type_is_rejected() {
    let err = parse(SQUARE_GAME).unwrap_err();
    let found = err.found().expect("a token was found");
    assert_eq!(found.kind, TokenKind::Identifier);
    assert_eq!(found.text, "Square");
    assert_eq!(err.location().map(|l| l.line), Some(4));
    assert_eq!(
        err.to_string(),
        "expected keyword 'int' or 'char' or 'boolean', found identifier 'Square' at line 4, column 11"
    );
}

#[test]
fn test_trailing_tokens_after_class() {
    let err = parse("class A { } class B { }").unwrap_err();
    assert_eq!(err.expected(), &Expected::EndOfInput);
}

#[test]
fn test_truncated_class_reports_end_of_input() {
    let err = parse("class Main { function void main() { return;").unwrap_err();
    assert!(err.found().is_none());
    assert!(err.to_string().ends_with("found end of input"));
}

#[test]
fn test_restricted_type_names() {
    let source = "class Main { function Game make(Board b) { return null; } }";
    let config =
        ParserConfig::default().with_type_names(TypeNamePolicy::only(["Game", "Board"]));
    assert!(analyze(source, &config).is_ok());

    let narrow = ParserConfig::default().with_type_names(TypeNamePolicy::only(["Game"]));
    match analyze(source, &narrow) {
        Err(JackError::Parse(err)) => {
            assert_eq!(err.expected(), &Expected::Type);
            assert_eq!(err.found().map(|t| t.text.as_str()), Some("Board"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_lex_errors_surface_through_analyze() {
    let err = analyze("class Main { static int x = 40000; }", &ParserConfig::default())
        .unwrap_err();
    assert!(matches!(err, JackError::Lex(_)));
}

#[test]
fn test_program_rule() {
    let tree = Parser::from_source("class Empty { }")
        .expect("Lexing failed")
        .parse_program()
        .expect("Parsing failed");
    assert_eq!(tree.children.len(), 4);
    assert_eq!(serialize_tree(&tree).lines().count(), 6);
}

#[test]
fn test_tag_output_for_small_class() {
    let source = "class A {\n  function void f() {\n    do g(1, x);\n    return;\n  }\n}\n";
    let tree = parse(source).expect("Parsing failed");
    let expected = "\
<class>
  <keyword> class </keyword>
  <identifier> A </identifier>
  <symbol> { </symbol>
  <subroutine>
    <keyword> function </keyword>
    <keyword> void </keyword>
    <identifier> f </identifier>
    <symbol> ( </symbol>
    <parameterList>
    </parameterList>
    <symbol> ) </symbol>
    <subroutineBody>
      <symbol> { </symbol>
      <statements>
        <doStatement>
          <keyword> do </keyword>
          <expression>
            <term>
              <identifier> g </identifier>
              <symbol> ( </symbol>
              <expressionList>
                <expression>
                  <term>
                    <integerConstant> 1 </integerConstant>
                  </term>
                </expression>
                <symbol> , </symbol>
                <expression>
                  <term>
                    <identifier> x </identifier>
                  </term>
                </expression>
              </expressionList>
              <symbol> ) </symbol>
            </term>
          </expression>
          <symbol> ; </symbol>
        </doStatement>
        <returnStatement>
          <keyword> return </keyword>
          <symbol> ; </symbol>
        </returnStatement>
      </statements>
      <symbol> } </symbol>
    </subroutineBody>
  </subroutine>
  <symbol> } </symbol>
</class>
";
    assert_eq!(serialize_tree(&tree), expected);
}

#[test]
fn test_token_listing_and_json() {
    let (tokens, tree) =
        analyze("class A { }", &ParserConfig::default()).expect("Analysis failed");
    assert_eq!(
        serialize_tokens(&tokens),
        "<tokens>\n<keyword> class </keyword>\n<identifier> A </identifier>\n<symbol> { </symbol>\n<symbol> } </symbol>\n</tokens>\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&to_json(&tree).expect("Serialization failed")).expect("valid json");
    assert_eq!(json["label"], "class");
    assert_eq!(json["children"][1]["value"], "A");
}
