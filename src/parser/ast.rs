// AST (Abstract Syntax Tree) definitions for minipas

use std::fmt;

use super::token::Token;

/// Behaviour shared by every node in the tree.
pub trait Node: fmt::Display {
    /// The token that introduced this node.
    fn token(&self) -> &Token;

    /// Structural debug rendering. The first line is not indented; nested
    /// lines are indented with `depth + 1` tabs and the closing brace with
    /// `depth` tabs.
    fn render(&self, depth: usize) -> String;

    /// Visit every token owned by this subtree exactly once, pre-order.
    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token));
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// `Label: {`, one line per entry, then the closing brace.
fn braced(label: &str, depth: usize, lines: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("{label}: {{\n");
    for line in lines {
        out.push_str(&indent(depth + 1));
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&indent(depth));
    out.push('}');
    out
}

macro_rules! display_via_render {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.render(0))
                }
            }
        )*
    };
}

display_via_render!(
    Program,
    Block,
    VarSection,
    Declaration,
    Routine,
    Parameter,
    BeginEnd,
    Statement,
    Conditional,
    While,
    ExpressionStatement,
    Expression,
    PrefixExpression,
    InfixExpression,
    Assignment,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    BooleanLiteral,
    StringLiteral,
    CharLiteral,
    TypeName,
    Call,
);

// ===== Declarations =====

/// Root node: `program <name>; <block>.`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub token: Token, // `program`
    pub name: Identifier,
    pub block: Block,
}

impl Node for Program {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        braced(
            "Program",
            depth,
            [
                format!("Identifier: {}", self.name.render(depth + 1)),
                self.block.render(depth + 1),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.name.visit_tokens(visit);
        self.block.visit_tokens(visit);
    }
}

/// Declarations followed by the mandatory `begin ... end` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub token: Token,
    pub var_section: Option<VarSection>,
    pub routines: Vec<Routine>,
    pub body: BeginEnd,
}

impl Node for Block {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        let lines = self
            .var_section
            .iter()
            .map(|vars| vars.render(child))
            .chain(self.routines.iter().map(|routine| routine.render(child)))
            .chain(std::iter::once(self.body.render(child)));
        braced("Block", depth, lines)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        if let Some(vars) = &self.var_section {
            vars.visit_tokens(visit);
        }
        for routine in &self.routines {
            routine.visit_tokens(visit);
        }
        self.body.visit_tokens(visit);
    }
}

/// `var` followed by one or more declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSection {
    pub token: Token,
    pub declarations: Vec<Declaration>,
}

impl Node for VarSection {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        braced(
            "Var",
            depth,
            self.declarations.iter().map(|decl| decl.render(depth + 1)),
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        for decl in &self.declarations {
            decl.visit_tokens(visit);
        }
    }
}

/// `a, b, c: integer`. The name list is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub token: Token, // `:`
    pub names: Vec<Identifier>,
    pub ty: TypeName,
}

impl Node for Declaration {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let names = self
            .names
            .iter()
            .map(|name| name.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        braced(
            "Declaration",
            depth,
            [
                format!("Identifiers: {{{names}}}"),
                format!("Type: {}", self.ty.render(depth + 1)),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        for name in &self.names {
            name.visit_tokens(visit);
        }
        self.ty.visit_tokens(visit);
    }
}

/// Function or procedure declaration. A missing return type means procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub token: Token, // `function` or `procedure`
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeName>,
    pub block: Block,
}

impl Routine {
    pub fn is_function(&self) -> bool {
        self.return_type.is_some()
    }
}

impl Node for Routine {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        let label = if self.is_function() {
            "Function"
        } else {
            "Procedure"
        };

        let mut lines = vec![
            format!("Identifier: {}", self.name.render(child)),
            braced(
                "Parameters",
                child,
                self.parameters.iter().map(|param| param.render(child + 1)),
            ),
        ];
        if let Some(ty) = &self.return_type {
            lines.push(format!("Return type: {}", ty.render(child)));
        }
        lines.push(self.block.render(child));

        braced(label, depth, lines)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.name.visit_tokens(visit);
        for param in &self.parameters {
            param.visit_tokens(visit);
        }
        if let Some(ty) = &self.return_type {
            ty.visit_tokens(visit);
        }
        self.block.visit_tokens(visit);
    }
}

/// Parameter group, optionally passed by reference (`var`).
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub token: Token,
    pub is_var: bool,
    pub declarations: Vec<Declaration>,
}

impl Node for Parameter {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        braced(
            "Parameter block",
            depth,
            [
                format!("Var: {}", self.is_var),
                braced(
                    "Declarations",
                    child,
                    self.declarations.iter().map(|decl| decl.render(child + 1)),
                ),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        for decl in &self.declarations {
            decl.visit_tokens(visit);
        }
    }
}

// ===== Statements =====

/// `begin ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct BeginEnd {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl Node for BeginEnd {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        braced(
            "Begin",
            depth,
            self.statements.iter().map(|stmt| stmt.render(depth + 1)),
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        for stmt in &self.statements {
            stmt.visit_tokens(visit);
        }
    }
}

/// Anything that can appear inside `begin ... end`
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    BeginEnd(BeginEnd),
    Conditional(Conditional),
    While(While),
    Expression(ExpressionStatement),
}

impl Node for Statement {
    fn token(&self) -> &Token {
        match self {
            Statement::BeginEnd(stmt) => stmt.token(),
            Statement::Conditional(stmt) => stmt.token(),
            Statement::While(stmt) => stmt.token(),
            Statement::Expression(stmt) => stmt.token(),
        }
    }

    fn render(&self, depth: usize) -> String {
        match self {
            Statement::BeginEnd(stmt) => stmt.render(depth),
            Statement::Conditional(stmt) => stmt.render(depth),
            Statement::While(stmt) => stmt.render(depth),
            Statement::Expression(stmt) => stmt.render(depth),
        }
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        match self {
            Statement::BeginEnd(stmt) => stmt.visit_tokens(visit),
            Statement::Conditional(stmt) => stmt.visit_tokens(visit),
            Statement::While(stmt) => stmt.visit_tokens(visit),
            Statement::Expression(stmt) => stmt.visit_tokens(visit),
        }
    }
}

/// `if <condition> then <stmt> [else <stmt>]`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub token: Token,
    pub condition: Expression,
    pub consequence: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
}

impl Node for Conditional {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        let mut lines = vec![
            format!("Condition: {}", self.condition.render(child)),
            braced("Consequence", child, [self.consequence.render(child + 1)]),
        ];
        if let Some(alternative) = &self.alternative {
            lines.push(braced("Alternative", child, [alternative.render(child + 1)]));
        }
        braced("Conditional", depth, lines)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.condition.visit_tokens(visit);
        self.consequence.visit_tokens(visit);
        if let Some(alternative) = &self.alternative {
            alternative.visit_tokens(visit);
        }
    }
}

/// `while <condition> do <stmt>`
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub token: Token,
    pub condition: Expression,
    pub body: Box<Statement>,
}

impl Node for While {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        braced(
            "While",
            depth,
            [
                format!("Condition: {}", self.condition.render(child)),
                braced("Body", child, [self.body.render(child + 1)]),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.condition.visit_tokens(visit);
        self.body.visit_tokens(visit);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token, // first token of the expression
    pub expression: Expression,
}

impl Node for ExpressionStatement {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        braced("Expression", depth, [self.expression.render(depth + 1)])
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.expression.visit_tokens(visit);
    }
}

// ===== Expressions =====

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Assignment(Assignment),
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Boolean(BooleanLiteral),
    Str(StringLiteral),
    Char(CharLiteral),
    Call(Call),
}

impl Expression {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expression::Prefix(expr) => expr,
            Expression::Infix(expr) => expr,
            Expression::Assignment(expr) => expr,
            Expression::Identifier(expr) => expr,
            Expression::Integer(expr) => expr,
            Expression::Float(expr) => expr,
            Expression::Boolean(expr) => expr,
            Expression::Str(expr) => expr,
            Expression::Char(expr) => expr,
            Expression::Call(expr) => expr,
        }
    }
}

impl Node for Expression {
    fn token(&self) -> &Token {
        self.as_node().token()
    }

    fn render(&self, depth: usize) -> String {
        self.as_node().render(depth)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        self.as_node().visit_tokens(visit);
    }
}

/// `-x`, `not x`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl Node for PrefixExpression {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let right = self.right.render(depth);
        if self.operator.chars().all(|c| c.is_ascii_alphabetic()) {
            format!("({} {right})", self.operator)
        } else {
            format!("({}{right})", self.operator)
        }
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.right.visit_tokens(visit);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Node for InfixExpression {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        format!(
            "({} {} {})",
            self.left.render(depth),
            self.operator,
            self.right.render(depth)
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.left.visit_tokens(visit);
        self.right.visit_tokens(visit);
    }
}

/// `target := value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub token: Token, // `:=`
    pub target: Identifier,
    pub value: Box<Expression>,
}

impl Node for Assignment {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        braced(
            "Assignment",
            depth,
            [
                format!("Identifier: {}", self.target.render(depth + 1)),
                format!("Value: {}", self.value.render(depth + 1)),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.target.visit_tokens(visit);
        self.value.visit_tokens(visit);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

impl Node for Identifier {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, _depth: usize) -> String {
        self.value.clone()
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// One of the five built-in type names.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub token: Token,
}

impl TypeName {
    pub fn name(&self) -> &str {
        &self.token.literal
    }
}

// Leaf literals render their source text verbatim.
macro_rules! leaf_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn token(&self) -> &Token {
                    &self.token
                }

                fn render(&self, _depth: usize) -> String {
                    self.token.literal.clone()
                }

                fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
                    visit(&self.token);
                }
            }
        )*
    };
}

leaf_node!(IntegerLiteral, FloatLiteral, BooleanLiteral, TypeName);

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Node for StringLiteral {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, _depth: usize) -> String {
        format!("\"{}\"", self.value)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharLiteral {
    pub token: Token,
    pub value: char,
}

impl Node for CharLiteral {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, _depth: usize) -> String {
        format!("'{}'", self.value)
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
    }
}

/// `name(arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub token: Token, // `(`
    pub function: Identifier,
    pub arguments: Vec<Expression>,
}

impl Node for Call {
    fn token(&self) -> &Token {
        &self.token
    }

    fn render(&self, depth: usize) -> String {
        let child = depth + 1;
        braced(
            "Call",
            depth,
            [
                format!("Identifier: {}", self.function.render(child)),
                braced(
                    "Arguments",
                    child,
                    self.arguments.iter().map(|arg| arg.render(child + 1)),
                ),
            ],
        )
    }

    fn visit_tokens(&self, visit: &mut dyn FnMut(&Token)) {
        visit(&self.token);
        self.function.visit_tokens(visit);
        for arg in &self.arguments {
            arg.visit_tokens(visit);
        }
    }
}
