//! Best-effort, file-local resolution of Go static types.
//!
//! The linter needs to answer one question about an expression: is its
//! underlying type a slice? There is no full type checker here. Instead, the
//! table is filled from the declarations visible in the analyzed file (var
//! and const specs, short variable declarations, parameters, struct fields,
//! function results, type declarations) and expressions are resolved against
//! it. Resolution is fail-open: an expression whose type cannot be
//! determined resolves to `None` and never matches any rule.

use rustc_hash::FxHashMap;
use tree_sitter::Node;

const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    Slice(Box<GoType>),
    Array(Box<GoType>),
    // The value type; the key type is never needed.
    Map(Box<GoType>),
    Chan,
    Pointer(Box<GoType>),
    Func { result: Option<Box<GoType>> },
    Named(String),
    Basic(String),
    Struct,
    Interface,
    // Present but undetermined, e.g. the element of a slice whose element
    // type could not be parsed. Never matches anything.
    Opaque,
}

#[derive(Debug, Default)]
pub struct TypeTable {
    // Variable name -> declared or inferred type. Flat across scopes.
    vars: FxHashMap<String, GoType>,
    // Struct field name -> type, keyed by field name only. This makes
    // `obj.field` resolvable without tracking which struct `obj` is.
    fields: FxHashMap<String, GoType>,
    // Function or method name -> single result type (None when the function
    // has zero or multiple results).
    funcs: FxHashMap<String, Option<GoType>>,
    // Declared type name -> its definition, for underlying-type resolution.
    named: FxHashMap<String, GoType>,
}

impl TypeTable {
    pub fn from_tree(root: &Node<'_>, source: &str) -> Self {
        let mut table = TypeTable::default();
        table.collect_declarations(root, source);
        // Value-based inference (`s := []int{}`) may refer to functions or
        // types declared later in the file, so it runs as a second pass.
        table.collect_inferred(root, source);
        table
    }

    /// Whether the expression's resolved underlying type is a slice. Arrays,
    /// maps, channels, pointers and unresolved types all return false.
    pub fn is_slice(&self, expr: &Node<'_>, source: &str) -> bool {
        match self.resolve_expr(expr, source) {
            Some(ty) => matches!(self.underlying(&ty), GoType::Slice(_)),
            None => false,
        }
    }

    /// Resolves a named type to its underlying definition, following local
    /// `type A B` chains. Unknown names resolve to themselves.
    pub fn underlying(&self, ty: &GoType) -> GoType {
        let mut current = ty.clone();
        for _ in 0..32 {
            match &current {
                GoType::Named(name) => match self.named.get(name) {
                    Some(next) => current = next.clone(),
                    None => break,
                },
                _ => break,
            }
        }
        current
    }

    pub fn resolve_expr(&self, expr: &Node<'_>, source: &str) -> Option<GoType> {
        match expr.kind() {
            "identifier" => self.vars.get(&source[expr.byte_range()]).cloned(),
            "selector_expression" => {
                let field = expr.child_by_field_name("field")?;
                self.fields.get(&source[field.byte_range()]).cloned()
            }
            "index_expression" => {
                let operand = expr.child_by_field_name("operand")?;
                let ty = self.resolve_expr(&operand, source)?;
                match self.underlying(&ty) {
                    GoType::Slice(elem) | GoType::Array(elem) => Some(*elem),
                    GoType::Map(value) => Some(*value),
                    _ => None,
                }
            }
            "slice_expression" => {
                let operand = expr.child_by_field_name("operand")?;
                let ty = self.resolve_expr(&operand, source)?;
                match self.underlying(&ty) {
                    GoType::Slice(elem) => Some(GoType::Slice(elem)),
                    GoType::Array(elem) => Some(GoType::Slice(elem)),
                    GoType::Basic(name) if name == "string" => Some(GoType::Basic(name)),
                    _ => None,
                }
            }
            "call_expression" => self.resolve_call(expr, source),
            "parenthesized_expression" => {
                let inner = expr.named_child(0)?;
                self.resolve_expr(&inner, source)
            }
            "composite_literal" => {
                let ty = expr.child_by_field_name("type")?;
                parse_type(&ty, source)
            }
            "unary_expression" => {
                let operator = expr.child_by_field_name("operator")?;
                let operand = expr.child_by_field_name("operand")?;
                match &source[operator.byte_range()] {
                    "&" => Some(GoType::Pointer(Box::new(
                        self.resolve_expr(&operand, source).unwrap_or(GoType::Opaque),
                    ))),
                    "*" => match self.resolve_expr(&operand, source)? {
                        GoType::Pointer(inner) => Some(*inner),
                        _ => None,
                    },
                    _ => None,
                }
            }
            "func_literal" => Some(GoType::Func {
                result: single_result(expr.child_by_field_name("result"), source)
                    .map(Box::new),
            }),
            "type_assertion_expression" => {
                let ty = expr.child_by_field_name("type")?;
                parse_type(&ty, source)
            }
            _ => None,
        }
    }

    fn resolve_call(&self, expr: &Node<'_>, source: &str) -> Option<GoType> {
        let function = expr.child_by_field_name("function")?;

        if function.kind() == "identifier" {
            let name = &source[function.byte_range()];
            // `make([]T, ...)` and `append(s, ...)` carry their slice type in
            // the first argument.
            if name == "make" || name == "new" {
                let arguments = expr.child_by_field_name("arguments")?;
                let first = arguments.named_child(0)?;
                let ty = parse_type(&first, source)?;
                return match name {
                    "make" => Some(ty),
                    _ => Some(GoType::Pointer(Box::new(ty))),
                };
            }
            if name == "append" {
                let arguments = expr.child_by_field_name("arguments")?;
                let first = arguments.named_child(0)?;
                return self.resolve_expr(&first, source);
            }
            if let Some(result) = self.funcs.get(name) {
                return result.clone();
            }
        }

        // A call through an expression of function type, e.g. a variable
        // holding a func literal.
        match self.resolve_expr(&function, source)? {
            GoType::Func { result } => result.map(|boxed| *boxed),
            _ => None,
        }
    }

    fn insert_var(&mut self, name: &Node<'_>, source: &str, ty: GoType) {
        if name.kind() == "identifier" {
            self.vars.insert(source[name.byte_range()].to_string(), ty);
        }
    }

    fn collect_declarations(&mut self, node: &Node<'_>, source: &str) {
        match node.kind() {
            "var_spec" | "const_spec" => {
                if let Some(ty_node) = node.child_by_field_name("type")
                    && let Some(ty) = parse_type(&ty_node, source)
                {
                    let mut cursor = node.walk();
                    let names: Vec<Node> =
                        node.children_by_field_name("name", &mut cursor).collect();
                    for name in names {
                        self.insert_var(&name, source, ty.clone());
                    }
                }
            }
            "parameter_declaration" => {
                if let Some(ty_node) = node.child_by_field_name("type")
                    && let Some(ty) = parse_type(&ty_node, source)
                {
                    let mut cursor = node.walk();
                    let names: Vec<Node> =
                        node.children_by_field_name("name", &mut cursor).collect();
                    for name in names {
                        self.insert_var(&name, source, ty.clone());
                    }
                }
            }
            "variadic_parameter_declaration" => {
                // Inside the function body a variadic parameter is a slice.
                if let Some(name) = node.child_by_field_name("name")
                    && let Some(ty_node) = node.child_by_field_name("type")
                {
                    let elem = parse_type(&ty_node, source).unwrap_or(GoType::Opaque);
                    self.insert_var(&name, source, GoType::Slice(Box::new(elem)));
                }
            }
            "type_spec" | "type_alias" => {
                if let Some(name) = node.child_by_field_name("name")
                    && let Some(ty_node) = node.child_by_field_name("type")
                    && let Some(ty) = parse_type(&ty_node, source)
                {
                    self.named.insert(source[name.byte_range()].to_string(), ty);
                }
            }
            "field_declaration" => {
                if let Some(ty_node) = node.child_by_field_name("type")
                    && let Some(ty) = parse_type(&ty_node, source)
                {
                    let mut cursor = node.walk();
                    let names: Vec<Node> =
                        node.children_by_field_name("name", &mut cursor).collect();
                    for name in names {
                        self.fields
                            .insert(source[name.byte_range()].to_string(), ty.clone());
                    }
                }
            }
            "function_declaration" | "method_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let result = single_result(node.child_by_field_name("result"), source);
                    self.funcs
                        .insert(source[name.byte_range()].to_string(), result);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            self.collect_declarations(&child, source);
        }
    }

    fn collect_inferred(&mut self, node: &Node<'_>, source: &str) {
        match node.kind() {
            "short_var_declaration" => {
                if let Some(left) = node.child_by_field_name("left")
                    && let Some(right) = node.child_by_field_name("right")
                {
                    self.infer_assignment(&left, &right, source);
                }
            }
            "var_spec" => {
                // `var s = []int{}`: no explicit type, infer from the value.
                if node.child_by_field_name("type").is_none()
                    && let Some(value) = node.child_by_field_name("value")
                {
                    let mut cursor = node.walk();
                    let names: Vec<Node> =
                        node.children_by_field_name("name", &mut cursor).collect();
                    drop(cursor);
                    let mut cursor = value.walk();
                    let values: Vec<Node> = value.named_children(&mut cursor).collect();
                    drop(cursor);
                    for (name, value) in names.iter().zip(values.iter()) {
                        if let Some(ty) = self.resolve_expr(value, source) {
                            self.insert_var(name, source, ty);
                        }
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            self.collect_inferred(&child, source);
        }
    }

    fn infer_assignment(&mut self, left: &Node<'_>, right: &Node<'_>, source: &str) {
        let mut cursor = left.walk();
        let names: Vec<Node> = left.named_children(&mut cursor).collect();
        drop(cursor);
        let mut cursor = right.walk();
        let values: Vec<Node> = right.named_children(&mut cursor).collect();
        drop(cursor);

        for (name, value) in names.iter().zip(values.iter()) {
            if let Some(ty) = self.resolve_expr(value, source) {
                self.insert_var(name, source, ty);
            }
        }
    }
}

/// Maps a type node from the parse tree into the `GoType` model. Returns
/// `None` for constructs the model does not cover.
pub fn parse_type(node: &Node<'_>, source: &str) -> Option<GoType> {
    match node.kind() {
        "slice_type" => {
            let elem = node.child_by_field_name("element")?;
            Some(GoType::Slice(Box::new(
                parse_type(&elem, source).unwrap_or(GoType::Opaque),
            )))
        }
        "array_type" | "implicit_length_array_type" => {
            let elem = node.child_by_field_name("element")?;
            Some(GoType::Array(Box::new(
                parse_type(&elem, source).unwrap_or(GoType::Opaque),
            )))
        }
        "map_type" => {
            let value = node.child_by_field_name("value")?;
            Some(GoType::Map(Box::new(
                parse_type(&value, source).unwrap_or(GoType::Opaque),
            )))
        }
        "channel_type" => Some(GoType::Chan),
        "pointer_type" => {
            let inner = node.named_child(0)?;
            Some(GoType::Pointer(Box::new(
                parse_type(&inner, source).unwrap_or(GoType::Opaque),
            )))
        }
        "function_type" => Some(GoType::Func {
            result: single_result(node.child_by_field_name("result"), source).map(Box::new),
        }),
        "type_identifier" => {
            let name = &source[node.byte_range()];
            if BUILTIN_TYPES.contains(&name) {
                Some(GoType::Basic(name.to_string()))
            } else {
                Some(GoType::Named(name.to_string()))
            }
        }
        // Package-qualified and generic types are kept as opaque names: they
        // never resolve locally, so they never match.
        "qualified_type" | "generic_type" => {
            Some(GoType::Named(source[node.byte_range()].to_string()))
        }
        "parenthesized_type" => {
            let inner = node.named_child(0)?;
            parse_type(&inner, source)
        }
        "struct_type" => Some(GoType::Struct),
        "interface_type" => Some(GoType::Interface),
        _ => None,
    }
}

// A function result contributes a type only when it is a single type: either
// a bare type node or a parameter list with exactly one unnamed entry.
fn single_result(result: Option<Node<'_>>, source: &str) -> Option<GoType> {
    let result = result?;
    if result.kind() != "parameter_list" {
        return parse_type(&result, source);
    }
    if result.named_child_count() != 1 {
        return None;
    }
    let only = result.named_child(0)?;
    if only.kind() == "parameter_declaration" {
        let ty = only.child_by_field_name("type")?;
        return parse_type(&ty, source);
    }
    None
}
