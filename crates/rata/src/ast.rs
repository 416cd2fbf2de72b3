//! Syntax tree produced by the parser and walked by the evaluator
//!
//! Pure data. Every node exclusively owns its children; function and lambda
//! bodies sit behind an `Arc` only so a closure value can share them at
//! runtime without copying the subtree.

use std::fmt;
use std::sync::Arc;

/// A parsed source unit: `library` imports followed by one `module` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Module name
    pub name: String,
    /// `library Name [as alias]` statements preceding the module
    pub imports: Vec<LibraryImport>,
    /// Leading `"""..."""` of the module body
    pub docstring: Option<String>,
    /// Body statements in source order
    pub body: Vec<Stmt>,
}

impl Module {
    /// Collect the module docstring and every docstring attached to a
    /// function literal bound by a top-level assignment.
    ///
    /// The module's own entry is keyed by the module name.
    pub fn docstrings(&self) -> Vec<(String, String)> {
        let mut docs = Vec::new();
        if let Some(doc) = &self.docstring {
            docs.push((self.name.clone(), doc.clone()));
        }
        for stmt in &self.body {
            if let Stmt::Assignment(Assignment {
                name,
                value: Expr::Function(func),
            }) = stmt
            {
                if let Some(doc) = &func.docstring {
                    docs.push((name.clone(), doc.clone()));
                }
            }
        }
        docs
    }
}

/// `library Name` or `library Name as alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryImport {
    /// Imported module name
    pub module_name: String,
    /// Optional local alias
    pub alias: Option<String>,
}

/// A statement inside a module, function body, branch, or REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = expr`
    Assignment(Assignment),
    /// `return expr`
    Return(Return),
    /// A free-standing `"""..."""`
    Docstring(Docstring),
    /// Any expression
    Expr(Expr),
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Bound name
    pub name: String,
    /// Right-hand side
    pub value: Expr,
}

/// Explicit early exit from a function body.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    /// Returned expression
    pub value: Expr,
}

/// Inert documentation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// Trimmed content
    pub content: String,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `42`, `"text"`, `true`, `nil`
    Literal(Literal),
    /// `name`
    Identifier(Identifier),
    /// `Module.name`
    QualifiedIdentifier(QualifiedIdentifier),
    /// `:name`
    Symbol(Symbol),
    /// `{a, b}`
    Tuple(Tuple),
    /// `[a, b]`
    Vector(Vector),
    /// `a + b`
    BinaryOp(BinaryOp),
    /// `f(a, b)`, also the desugared form of `a |> f(b)`
    FunctionCall(FunctionCall),
    /// `if c { ... } else { ... }`
    If(If),
    /// `function(a, b) { ... }`
    Function(Function),
    /// `~ .x + .y`
    Lambda(Lambda),
    /// `.x`
    LambdaParam(LambdaParam),
    /// `f"..{expr}.."`
    InterpolatedString(InterpolatedString),
}

/// A constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The constant value
    pub value: LiteralValue,
}

/// Payload of a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    Str(String),
    /// Boolean
    Bool(bool),
    /// `nil`
    Nil,
}

/// A plain name reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The name
    pub name: String,
}

/// `module.name` where `module` is a module name, an alias, or `__module__`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedIdentifier {
    /// Module name or alias
    pub module: String,
    /// Member name
    pub name: String,
}

/// `:name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol name without the colon
    pub name: String,
}

/// `{e1, e2, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// Elements in order
    pub elements: Vec<Expr>,
}

/// `[e1, e2, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    /// Elements in order
    pub elements: Vec<Expr>,
}

/// Binary operators. Pipes never appear here; they are desugared to calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `^`
    Pow,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `and`
    And,
    /// `or`
    Or,
}

impl BinaryOperator {
    /// Source spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Rem => "%",
            BinaryOperator::Pow => "^",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEq => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEq => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    /// Left operand
    pub left: Box<Expr>,
    /// Operator
    pub operator: BinaryOperator,
    /// Right operand
    pub right: Box<Expr>,
}

/// A call. The callee is any expression; arguments are evaluated left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Callee
    pub function: Box<Expr>,
    /// Arguments
    pub args: Vec<Expr>,
}

/// Conditional expression.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    /// Condition (truthiness applies)
    pub condition: Box<Expr>,
    /// Statements run when the condition is truthy
    pub then_branch: Vec<Stmt>,
    /// Statements run otherwise; `None` yields `nil`
    pub else_branch: Option<Vec<Stmt>>,
}

/// A function literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Declared parameters
    pub params: Vec<Parameter>,
    /// Body statements
    pub body: Arc<Vec<Stmt>>,
    /// Leading `"""..."""` of the body
    pub docstring: Option<String>,
}

/// A function parameter with an optional (unchecked) type annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Annotated type name
    pub type_name: Option<String>,
}

/// `~ expr`. Parameters are the distinct placeholder names in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    /// Single body expression
    pub body: Arc<Expr>,
    /// Inferred parameter names
    pub params: Vec<String>,
}

/// `.name` inside a lambda body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaParam {
    /// Placeholder name without the dot
    pub name: String,
}

/// `f"..."` split into literal text and embedded expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedString {
    /// Parts in source order
    pub parts: Vec<StringPart>,
}

/// One segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// Literal text (escapes already processed)
    Literal(String),
    /// `{expr}`
    Expr(Expr),
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════════

impl Expr {
    /// Integer literal
    pub fn int(n: i64) -> Self {
        Expr::Literal(Literal {
            value: LiteralValue::Int(n),
        })
    }

    /// Float literal
    pub fn float(n: f64) -> Self {
        Expr::Literal(Literal {
            value: LiteralValue::Float(n),
        })
    }

    /// String literal
    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            value: LiteralValue::Str(s.into()),
        })
    }

    /// Identifier reference
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier { name: name.into() })
    }

    /// Qualified reference
    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::QualifiedIdentifier(QualifiedIdentifier {
            module: module.into(),
            name: name.into(),
        })
    }

    /// Call expression
    pub fn call(function: Expr, args: Vec<Expr>) -> Self {
        Expr::FunctionCall(FunctionCall {
            function: Box::new(function),
            args,
        })
    }

    /// Binary operation
    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp(BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docstrings_collects_module_and_functions() {
        let documented = Function {
            params: vec![],
            body: Arc::new(vec![]),
            docstring: Some("Does a thing.".to_string()),
        };
        let bare = Function {
            docstring: None,
            ..documented.clone()
        };
        let module = Module {
            name: "M".to_string(),
            imports: vec![],
            docstring: Some("Module docs.".to_string()),
            body: vec![
                Stmt::Assignment(Assignment {
                    name: "f".to_string(),
                    value: Expr::Function(documented),
                }),
                Stmt::Assignment(Assignment {
                    name: "g".to_string(),
                    value: Expr::Function(bare),
                }),
                Stmt::Expr(Expr::int(1)),
            ],
        };

        assert_eq!(
            module.docstrings(),
            vec![
                ("M".to_string(), "Module docs.".to_string()),
                ("f".to_string(), "Does a thing.".to_string()),
            ]
        );
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinaryOperator::LessEq.to_string(), "<=");
        assert_eq!(BinaryOperator::And.as_str(), "and");
    }
}
