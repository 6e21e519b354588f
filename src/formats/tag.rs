//! Nested tagged text serialization
//!
//! Serializes a parse tree to the XML-like layout used by the classic Jack
//! analyzer test files.
//!
//! ## Format
//!
//! - Interior node → `<label>` and `</label>` on their own lines, children
//!   indented two spaces in between (also when there are no children)
//! - Leaf → `<kind> text </kind>` on one line
//! - `<`, `>`, `&` and `"` in token text are escaped
//!
//! ## Example
//!
//! ```text
//! <returnStatement>
//!   <keyword> return </keyword>
//!   <expression>
//!     <term>
//!       <identifier> x </identifier>
//!     </term>
//!   </expression>
//!   <symbol> ; </symbol>
//! </returnStatement>
//! ```

use crate::parser::ast::ParseTree;
use crate::parser::lexer::Token;

/// Serialize a tree, one element per line
pub fn serialize_tree(tree: &ParseTree) -> String {
    let mut result = String::new();
    serialize_node(tree, 0, &mut result);
    result
}

fn serialize_node(node: &ParseTree, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    let label = node.label.as_str();

    if node.is_leaf() {
        output.push_str(&format!(
            "{}<{}> {} </{}>\n",
            indent,
            label,
            escape_xml(&node.value),
            label
        ));
        return;
    }

    output.push_str(&format!("{}<{}>\n", indent, label));
    for child in &node.children {
        serialize_node(child, indent_level + 1, output);
    }
    output.push_str(&format!("{}</{}>\n", indent, label));
}

/// Serialize a flat token listing wrapped in `<tokens>`
pub fn serialize_tokens(tokens: &[Token]) -> String {
    let mut result = String::from("<tokens>\n");
    for token in tokens {
        let kind = token.kind.as_str();
        result.push_str(&format!("<{}> {} </{}>\n", kind, escape_xml(&token.text), kind));
    }
    result.push_str("</tokens>\n");
    result
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    #[test]
    fn test_serialize_return_statement() {
        let tree = Parser::from_source("return x;")
            .unwrap()
            .compile_return()
            .unwrap();
        let expected = "\
<returnStatement>
  <keyword> return </keyword>
  <expression>
    <term>
      <identifier> x </identifier>
    </term>
  </expression>
  <symbol> ; </symbol>
</returnStatement>
";
        assert_eq!(serialize_tree(&tree), expected);
    }

    #[test]
    fn test_empty_interior_node() {
        let tree = Parser::new(Vec::new()).compile_parameter_list().unwrap();
        assert_eq!(serialize_tree(&tree), "<parameterList>\n</parameterList>\n");
    }

    #[test]
    fn test_escaping() {
        let tree = Parser::from_source("a < b & c")
            .unwrap()
            .compile_expression()
            .unwrap();
        let text = serialize_tree(&tree);
        assert!(text.contains("  <symbol> &lt; </symbol>\n"));
        assert!(text.contains("  <symbol> &amp; </symbol>\n"));
    }

    #[test]
    fn test_serialize_tokens() {
        let tokens = vec![
            Token::keyword("do"),
            Token::string("say \"hi\""),
            Token::symbol(">"),
        ];
        assert_eq!(
            serialize_tokens(&tokens),
            "<tokens>\n<keyword> do </keyword>\n<stringConstant> say &quot;hi&quot; </stringConstant>\n<symbol> &gt; </symbol>\n</tokens>\n"
        );
    }
}
