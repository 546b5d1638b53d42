//! JavaScript / TypeScript language adapter
//!
//! Extracts variable declarations with tree-sitter and resolves every read
//! of each declared name through a [`ScopeGraph`].
//!
//! Extraction runs in two passes over the syntax tree:
//! 1. Declare: create scopes, bind every name (declarations, parameters,
//!    imports, destructured names) and emit one record per declarator with a
//!    simple identifier target.
//! 2. Resolve: walk every identifier read and attach its location to the
//!    binding it resolves to.

use crate::{Error, Result};
use crate::language::{AdapterFamily, LanguageTag};
use crate::scope::{NameResolver, ScopeGraph, ScopeId, ScopeKind};
use crate::variable::{self, SourceLocation, ValueKind, VariableRecord, NO_VALUE, TEMPLATE_PLACEHOLDER};
use super::framework::LanguageAdapter;
use std::collections::{HashMap, HashSet};
use tree_sitter::{Language, Node, Parser, Tree};

/// Grammar-based adapter for the JavaScript family
pub struct JavaScriptAdapter {
    language: Language,
    language_name: &'static str,
    tag: LanguageTag,
}

impl JavaScriptAdapter {
    fn new(language: Language, language_name: &'static str, tag: LanguageTag) -> Self {
        Self {
            language,
            language_name,
            tag,
        }
    }

    /// JavaScript, JSX included
    pub fn javascript() -> Self {
        Self::new(tree_sitter_javascript::LANGUAGE.into(), "JavaScript", LanguageTag::JavaScript)
    }

    pub fn typescript() -> Self {
        Self::new(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(), "TypeScript", LanguageTag::TypeScript)
    }

    pub fn tsx() -> Self {
        Self::new(tree_sitter_typescript::LANGUAGE_TSX.into(), "TypeScript JSX", LanguageTag::Tsx)
    }

    /// Parse `text`, failing on any syntax error in the tree
    fn parse(&self, text: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Grammar(format!("Failed to set language: {}", e)))?;

        let tree = parser.parse(text, None).ok_or(Error::Parse {
            language: self.tag,
            line: None,
            offset: None,
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let error_node = first_error(root);
            tracing::debug!(
                language = %self.tag,
                line = error_node.map(|n| n.start_position().row + 1),
                "syntax error in source"
            );
            return Err(Error::Parse {
                language: self.tag,
                line: error_node.map(|n| n.start_position().row + 1),
                offset: error_node.map(|n| n.start_byte()),
            });
        }
        Ok(tree)
    }
}

impl LanguageAdapter for JavaScriptAdapter {
    fn language_name(&self) -> &str {
        self.language_name
    }

    fn languages(&self) -> &[LanguageTag] {
        std::slice::from_ref(&self.tag)
    }

    fn family(&self) -> AdapterFamily {
        AdapterFamily::Grammar
    }

    fn extract(&self, text: &str) -> Result<Vec<VariableRecord>> {
        let tree = self.parse(text)?;
        let root = tree.root_node();

        // Pass 1: scopes, bindings and records
        let mut declarations = DeclarationCollector::new(text);
        declarations.declare(root, ScopeId::root());
        let DeclarationCollector {
            mut graph,
            node_scopes,
            binding_sites,
            mut records,
            ..
        } = declarations;

        // Pass 2: reference sites
        {
            let mut references = ReferenceWalker {
                source: text,
                node_scopes: &node_scopes,
                binding_sites: &binding_sites,
                resolver: NameResolver::new(&mut graph),
            };
            references.walk(root, ScopeId::root());
        }

        for binding in graph.bindings() {
            for &index in &binding.declarations {
                if let Some(record) = records.get_mut(index) {
                    record.reference_locations = binding.references.clone();
                }
            }
        }

        variable::sort_by_position(&mut records);
        tracing::debug!(language = %self.tag, records = records.len(), "extracted declarations");
        Ok(records)
    }
}

/// Initializer expression translated out of the raw tree
#[derive(Debug, PartialEq)]
enum Initializer<'t> {
    Str(&'t str),
    Number(&'t str),
    Boolean(bool),
    Array(&'t str),
    Object(&'t str),
    Function(&'t str),
    Identifier(&'t str),
    /// Literal segments between interpolations
    Template(Vec<&'t str>),
    Other(&'t str),
}

impl<'t> Initializer<'t> {
    fn from_node(node: Node<'t>, source: &'t str) -> Self {
        let text = node_text(node, source);
        match node.kind() {
            "string" => Initializer::Str(text),
            "number" => Initializer::Number(text),
            "true" => Initializer::Boolean(true),
            "false" => Initializer::Boolean(false),
            "array" => Initializer::Array(text),
            "object" => Initializer::Object(text),
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                Initializer::Function(text)
            }
            "identifier" => Initializer::Identifier(text),
            "template_string" => Initializer::Template(template_segments(node, source)),
            "parenthesized_expression" => match sole_named_child(node) {
                Some(inner) => Initializer::from_node(inner, source),
                None => Initializer::Other(text),
            },
            _ => Initializer::Other(text),
        }
    }

    fn classify(self) -> (ValueKind, String) {
        match self {
            Initializer::Str(text) => (ValueKind::String, text.to_string()),
            Initializer::Number(text) => (ValueKind::Number, text.to_string()),
            Initializer::Boolean(value) => (ValueKind::Boolean, value.to_string()),
            Initializer::Array(text) => (ValueKind::Array, text.to_string()),
            Initializer::Object(text) => (ValueKind::Object, text.to_string()),
            Initializer::Function(text) => (ValueKind::Function, text.to_string()),
            Initializer::Identifier(name) => (ValueKind::Reference, name.to_string()),
            Initializer::Template(segments) => {
                (ValueKind::TemplateString, segments.join(TEMPLATE_PLACEHOLDER))
            }
            Initializer::Other(text) => (ValueKind::Unknown, text.to_string()),
        }
    }
}

/// Pass 1 state
struct DeclarationCollector<'t> {
    source: &'t str,
    graph: ScopeGraph,
    /// Scope created by each scope-owning node, keyed by node id
    node_scopes: HashMap<usize, ScopeId>,
    /// Node ids of identifiers in binding position
    binding_sites: HashSet<usize>,
    records: Vec<VariableRecord>,
}

impl<'t> DeclarationCollector<'t> {
    fn new(source: &'t str) -> Self {
        Self {
            source,
            graph: ScopeGraph::new(),
            node_scopes: HashMap::new(),
            binding_sites: HashSet::new(),
            records: Vec::new(),
        }
    }

    fn declare(&mut self, node: Node<'t>, scope: ScopeId) {
        let scope = match scope_kind(node) {
            Some(kind) => {
                let inner = self.graph.add_scope(scope, kind);
                self.node_scopes.insert(node.id(), inner);
                self.bind_scope_owner(node, scope, inner);
                inner
            }
            None => scope,
        };

        match node.kind() {
            "variable_declarator" => self.declare_variable(node, scope),
            "for_in_statement" => self.declare_loop_variable(node, scope),
            "import_specifier" => {
                if let Some(local) = node
                    .child_by_field_name("alias")
                    .or_else(|| node.child_by_field_name("name"))
                {
                    self.bind_pattern(local, ScopeId::root());
                }
            }
            "import_clause" | "namespace_import" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "identifier" {
                        self.bind_pattern(child, ScopeId::root());
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.declare(child, scope);
        }
    }

    fn declare_variable(&mut self, node: Node<'t>, scope: ScopeId) {
        let Some(target) = node.child_by_field_name("name") else {
            return;
        };
        let is_var = node.parent().is_some_and(|p| p.kind() == "variable_declaration");
        let target_scope = if is_var { self.graph.hoisting_scope(scope) } else { scope };

        if target.kind() != "identifier" {
            tracing::trace!(target_kind = target.kind(), "skipping non-identifier declaration target");
            self.bind_pattern(target, target_scope);
            return;
        }

        let (kind, value) = match node.child_by_field_name("value") {
            Some(init) => Initializer::from_node(init, self.source).classify(),
            None => (ValueKind::Uninitialized, NO_VALUE.to_string()),
        };
        self.push_record(target, target_scope, kind, value);
    }

    /// `for (const x of xs)` / `for (var k in obj)`
    fn declare_loop_variable(&mut self, node: Node<'t>, scope: ScopeId) {
        let Some(keyword) = node.child_by_field_name("kind") else {
            return;
        };
        let Some(target) = node.child_by_field_name("left") else {
            return;
        };
        let target_scope = if keyword.kind() == "var" {
            self.graph.hoisting_scope(scope)
        } else {
            scope
        };

        if target.kind() == "identifier" {
            self.push_record(target, target_scope, ValueKind::Uninitialized, NO_VALUE.to_string());
        } else {
            self.bind_pattern(target, target_scope);
        }
    }

    fn push_record(&mut self, target: Node<'t>, scope: ScopeId, kind: ValueKind, value: String) {
        let name = node_text(target, self.source);
        let index = self.records.len();
        tracing::trace!(variable = name, kind = %kind, line = target.start_position().row + 1, "declaration");
        self.records.push(VariableRecord::new(name, value, kind, location(target)));
        self.binding_sites.insert(target.id());
        self.graph.bind(scope, name, Some(index));
    }

    /// Bind names introduced by the node that owns a new scope
    fn bind_scope_owner(&mut self, node: Node<'t>, outer: ScopeId, inner: ScopeId) {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" | "function_signature"
            | "class_declaration" | "abstract_class_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind_name(name, outer);
                }
            }
            "function_expression" | "function" | "generator_function" | "class" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind_name(name, inner);
                }
            }
            "catch_clause" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    self.bind_pattern(param, inner);
                }
            }
            _ => {}
        }

        if let Some(param) = node.child_by_field_name("parameter") {
            // Arrow function with a single bare parameter: `x => x`
            if node.kind() == "arrow_function" {
                self.bind_pattern(param, inner);
            }
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for param in params.named_children(&mut cursor) {
                self.bind_pattern(param, inner);
            }
        }
    }

    /// Bind a class or function name regardless of its identifier flavour
    fn bind_name(&mut self, name: Node<'t>, scope: ScopeId) {
        self.binding_sites.insert(name.id());
        self.graph.bind(scope, node_text(name, self.source), None);
    }

    /// Bind every name in a parameter or destructuring pattern
    fn bind_pattern(&mut self, pattern: Node<'t>, scope: ScopeId) {
        match pattern.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                self.bind_name(pattern, scope);
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = pattern.child_by_field_name("left") {
                    self.bind_pattern(left, scope);
                }
            }
            "pair_pattern" => {
                if let Some(value) = pattern.child_by_field_name("value") {
                    self.bind_pattern(value, scope);
                }
            }
            "required_parameter" | "optional_parameter" => {
                if let Some(inner) = pattern.child_by_field_name("pattern") {
                    self.bind_pattern(inner, scope);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = pattern.walk();
                for child in pattern.named_children(&mut cursor) {
                    self.bind_pattern(child, scope);
                }
            }
            _ => {}
        }
    }
}

/// Pass 2 state
struct ReferenceWalker<'a, 'g> {
    source: &'a str,
    node_scopes: &'a HashMap<usize, ScopeId>,
    binding_sites: &'a HashSet<usize>,
    resolver: NameResolver<'g>,
}

impl ReferenceWalker<'_, '_> {
    fn walk(&mut self, node: Node, scope: ScopeId) {
        let scope = self.node_scopes.get(&node.id()).copied().unwrap_or(scope);

        if matches!(node.kind(), "identifier" | "shorthand_property_identifier") {
            if self.is_reference(node) {
                let name = node_text(node, self.source);
                self.resolver.record_reference(scope, name, location(node));
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.walk(child, scope);
        }
    }

    /// Whether an identifier reads a variable
    fn is_reference(&self, node: Node) -> bool {
        if self.binding_sites.contains(&node.id()) {
            return false;
        }
        let Some(parent) = node.parent() else {
            return true;
        };
        let in_field = |field: &str| {
            parent
                .child_by_field_name(field)
                .is_some_and(|n| n.id() == node.id())
        };

        if is_destructured_write(node) {
            return false;
        }

        match parent.kind() {
            // Writes; `n++` still reads `n`
            "assignment_expression" | "augmented_assignment_expression" | "for_in_statement" => {
                !in_field("left")
            }
            // Module plumbing
            "export_specifier" => !in_field("alias"),
            "import_specifier" | "import_clause" | "namespace_import" => false,
            // JSX tag names: only capitalized components read a variable
            "jsx_closing_element" => false,
            "jsx_opening_element" | "jsx_self_closing_element" if in_field("name") => {
                node_text(node, self.source)
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_uppercase())
            }
            _ => true,
        }
    }
}

/// Whether `node` is a target inside a pattern on the left of an assignment,
/// as in `[a, { b: c }] = pair`
fn is_destructured_write(node: Node) -> bool {
    let mut child = node;
    while let Some(parent) = child.parent() {
        match parent.kind() {
            "array_pattern" | "object_pattern" | "rest_pattern" => {}
            "pair_pattern" if is_field(parent, "value", child) => {}
            "assignment_pattern" | "object_assignment_pattern" if is_field(parent, "left", child) => {}
            "assignment_expression" | "for_in_statement" => {
                return child.id() != node.id() && is_field(parent, "left", child);
            }
            _ => return false,
        }
        child = parent;
    }
    false
}

fn is_field(parent: Node, field: &str, child: Node) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == child.id())
}

/// The scope a node opens, if any
fn scope_kind(node: Node) -> Option<ScopeKind> {
    if !node.is_named() {
        return None;
    }
    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_expression"
        | "function" | "generator_function" | "arrow_function" | "method_definition"
        | "function_signature" | "method_signature" | "abstract_method_signature"
        | "call_signature" | "construct_signature" | "function_type" | "class_static_block" => {
            Some(ScopeKind::Function)
        }
        "class" | "class_declaration" | "abstract_class_declaration" => Some(ScopeKind::Class),
        "statement_block" if !is_owned_body(node) => Some(ScopeKind::Block),
        "for_statement" | "for_in_statement" | "catch_clause" | "switch_statement" => {
            Some(ScopeKind::Block)
        }
        _ => None,
    }
}

/// A block that is the body of a function or catch clause shares its owner's scope
fn is_owned_body(block: Node) -> bool {
    let Some(parent) = block.parent() else {
        return false;
    };
    let owns_body = matches!(
        parent.kind(),
        "function_declaration" | "generator_function_declaration" | "function_expression"
            | "function" | "generator_function" | "arrow_function" | "method_definition"
            | "class_static_block" | "catch_clause"
    );
    owns_body
        && parent
            .child_by_field_name("body")
            .is_some_and(|body| body.id() == block.id())
}

/// First ERROR or MISSING node in document order
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

/// Literal text between the backticks, split at each `${...}` substitution
fn template_segments<'t>(node: Node<'t>, source: &'t str) -> Vec<&'t str> {
    let end = node.end_byte().saturating_sub(1);
    let mut segments = Vec::new();
    let mut position = node.start_byte() + 1;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "template_substitution" {
            segments.push(source.get(position..child.start_byte()).unwrap_or(""));
            position = child.end_byte();
        }
    }
    segments.push(source.get(position..end.max(position)).unwrap_or(""));
    segments
}

fn sole_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let mut children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");
    let first = children.next()?;
    match children.next() {
        Some(_) => None,
        None => Some(first),
    }
}

fn node_text<'t>(node: Node, source: &'t str) -> &'t str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn location(node: Node) -> SourceLocation {
    let position = node.start_position();
    SourceLocation::new(position.row + 1, position.column + 1, node.start_byte())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_js(source: &str) -> Vec<VariableRecord> {
        JavaScriptAdapter::javascript()
            .extract(source)
            .expect("Failed to extract")
    }

    fn find<'r>(records: &'r [VariableRecord], name: &str) -> &'r VariableRecord {
        records
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no record named {}", name))
    }

    #[test]
    fn test_literal_kinds() {
        let source = r#"
const a = "hi";
const b = [1, 2];
const c = 42;
const d = true;
const e = { key: 1 };
const f = (x) => x * 2;
const g = function named() { return 1; };
const h = a;
const i = `Hello ${a} and ${c}!`;
const j = a + c;
let k;
const l = ("wrapped");
"#;
        let records = extract_js(source);
        let summary: Vec<(&str, &str, &str)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.kind.as_str(), r.assigned_value.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a", "string", "\"hi\""),
                ("b", "array", "[1, 2]"),
                ("c", "number", "42"),
                ("d", "boolean", "true"),
                ("e", "object", "{ key: 1 }"),
                ("f", "function", "(x) => x * 2"),
                ("g", "function", "function named() { return 1; }"),
                ("h", "reference", "a"),
                ("i", "template string", "Hello ${...} and ${...}!"),
                ("j", "unknown", "a + c"),
                ("k", "uninitialized", NO_VALUE),
                ("l", "string", "\"wrapped\""),
            ]
        );
    }

    #[test]
    fn test_template_with_leading_substitution() {
        let records = extract_js("const t = `${greeting}`;");
        assert_eq!(records[0].kind, ValueKind::TemplateString);
        assert_eq!(records[0].assigned_value, "${...}");
    }

    #[test]
    fn test_references_in_document_order() {
        let source = "const total = 1;\nlog(total);\nconst twice = total + total;\n";
        let records = extract_js(source);
        let total = find(&records, "total");
        assert_eq!(total.reference_lines(), vec![2, 3, 3]);
        assert_ne!(total.reference_locations[1], total.reference_locations[2]);
        assert!(find(&records, "twice").reference_locations.is_empty());
    }

    #[test]
    fn test_function_scope_shadowing() {
        let source = r#"const x = 1;
function f() {
  const x = 2;
  return x;
}
console.log(x);
"#;
        let records = extract_js(source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference_lines(), vec![6]);
        assert_eq!(records[1].reference_lines(), vec![4]);
    }

    #[test]
    fn test_block_scope_shadowing() {
        let source = r#"let x = 1;
{
  let x = 2;
  use(x);
  use(x);
}
use(x);
"#;
        let records = extract_js(source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].assigned_value, "1");
        assert_eq!(records[0].reference_lines(), vec![7]);
        assert_eq!(records[1].reference_lines(), vec![4, 5]);
    }

    #[test]
    fn test_parameters_shadow_outer_declarations() {
        let source = r#"const value = 1;
function f(value) { return value; }
const g = value => value;
const h = ({ value }) => value;
const k = (a = value) => a;
"#;
        let records = extract_js(source);
        let outer = find(&records, "value");
        assert_eq!(outer.reference_lines(), vec![5]);
    }

    #[test]
    fn test_destructuring_targets_are_skipped() {
        let records = extract_js("const { a, b } = obj;\nconst [c, ...rest] = list;\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_destructured_names_still_shadow() {
        let source = r#"const a = 1;
function g(o) {
  const { a } = o;
  return a;
}
"#;
        let records = extract_js(source);
        assert_eq!(records.len(), 1);
        assert!(records[0].reference_locations.is_empty());
    }

    #[test]
    fn test_var_hoists_to_function_scope() {
        let source = r#"function f(c) {
  if (c) {
    var v = 1;
  }
  return v;
}
"#;
        let records = extract_js(source);
        assert_eq!(find(&records, "v").reference_lines(), vec![5]);
    }

    #[test]
    fn test_redeclared_var_records_share_references() {
        let records = extract_js("var x = 1;\nvar x = 2;\nuse(x);\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference_lines(), vec![3]);
        assert_eq!(records[1].reference_lines(), vec![3]);
    }

    #[test]
    fn test_writes_are_not_references() {
        let source = "let n = 0;\nn = 5;\nn += 1;\nn++;\nuse(n);\n";
        let records = extract_js(source);
        assert_eq!(records[0].reference_lines(), vec![4, 5]);
    }

    #[test]
    fn test_destructuring_assignment_targets_are_writes() {
        let source = "let i = 0;\ni++;\nlet s = 'a';\n[s] = ['b'];\nlet a = 1, b = 2, d = 3;\n({ k: a, m: [b = d] } = obj);\n";
        let records = extract_js(source);
        assert_eq!(find(&records, "i").reference_lines(), vec![2]);
        assert!(find(&records, "s").reference_lines().is_empty());
        assert!(find(&records, "a").reference_lines().is_empty());
        assert!(find(&records, "b").reference_lines().is_empty());
        assert_eq!(find(&records, "d").reference_lines(), vec![6]);
    }

    #[test]
    fn test_shorthand_property_reads_variable() {
        let records = extract_js("const port = 80;\nconst cfg = { port };\n");
        assert_eq!(find(&records, "port").reference_lines(), vec![2]);
    }

    #[test]
    fn test_for_of_declares_loop_variable() {
        let source = "const items = [1];\nfor (const item of items) {\n  use(item);\n}\n";
        let records = extract_js(source);
        let item = find(&records, "item");
        assert_eq!(item.kind, ValueKind::Uninitialized);
        assert_eq!(item.reference_lines(), vec![3]);
        assert_eq!(find(&records, "items").reference_lines(), vec![2]);
    }

    #[test]
    fn test_jsx_component_references() {
        let source = r#"const Button = () => <button />;
const title = "Hi";
const App = () => <div><Button label={title} /></div>;
"#;
        let records = extract_js(source);
        assert_eq!(find(&records, "Button").reference_lines(), vec![3]);
        assert_eq!(find(&records, "title").reference_lines(), vec![3]);
    }

    #[test]
    fn test_import_alias_binds_without_record() {
        let source = "import { a as b } from './m';\nconst c = b;\n";
        let records = extract_js(source);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ValueKind::Reference);
    }

    #[test]
    fn test_malformed_source_is_parse_error() {
        let adapter = JavaScriptAdapter::javascript();
        match adapter.extract("const ok = 1;\nconst x = ;\n") {
            Err(Error::Parse { language, line, .. }) => {
                assert_eq!(language, LanguageTag::JavaScript);
                assert_eq!(line, Some(2));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_typescript_annotations() {
        let source = r#"const n: number = 5;
let s: string;
interface Shape { area(n: number): number }
function f(n: number): number { return n; }
use(n);
"#;
        let records = JavaScriptAdapter::typescript().extract(source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ValueKind::Number);
        assert_eq!(records[1].kind, ValueKind::Uninitialized);
        assert_eq!(records[0].reference_lines(), vec![5]);
    }

    #[test]
    fn test_tsx_component() {
        let source = "const label: string = 'x';\nconst el = <Comp text={label} />;\n";
        let records = JavaScriptAdapter::tsx().extract(source).unwrap();
        assert_eq!(find(&records, "label").reference_lines(), vec![2]);
        assert_eq!(find(&records, "el").kind, ValueKind::Unknown);
    }

    #[test]
    fn test_empty_source() {
        assert!(extract_js("").is_empty());
    }
}
