//! Syntax tree for TypeScript declaration files
//!
//! Every container (the file itself, a namespace body, an interface body, a
//! class body, an object type literal) holds an ordered list of
//! [`Declaration`]s, and every type position holds a [`TypeNode`]. Both enums
//! are closed; [`SyntaxKind`] names each variant so callers can dispatch on
//! it and render it back in error messages.

use std::fmt;

use crate::atom::Atom;
use crate::lexer::Span;

/// A parsed declaration file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: Atom,
    /// Top-level declarations, always terminated by [`Declaration::EndOfFile`]
    pub members: Vec<Declaration>,
    pub span: Span,
}

/// Closed enumeration of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Declarations
    FunctionDeclaration,
    ModuleDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    VariableStatement,
    Constructor,
    ImportDeclaration,
    ExportAssignment,
    ExportDeclaration,
    NamespaceExportDeclaration,
    TypeAliasDeclaration,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    MethodSignature,
    PropertySignature,
    EmptyStatement,
    EndOfFileToken,

    // Type expressions
    Identifier,
    QualifiedName,
    TypeLiteral,
    ArrayType,
    FunctionType,
    ConstructorType,
    StringLiteral,
    StringKeyword,
    NumberKeyword,
    BooleanKeyword,
    AnyKeyword,
    VoidKeyword,
    TypeReference,
    TypeQuery,
    LiteralType,
    UnionType,
    IntersectionType,
    TupleType,
    IndexedAccessType,
    TypeOperator,
    TypePredicate,
    ConditionalType,
    MappedType,
    TemplateLiteralType,
    ImportType,
}

impl SyntaxKind {
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::FunctionDeclaration => "FunctionDeclaration",
            SyntaxKind::ModuleDeclaration => "ModuleDeclaration",
            SyntaxKind::ClassDeclaration => "ClassDeclaration",
            SyntaxKind::InterfaceDeclaration => "InterfaceDeclaration",
            SyntaxKind::EnumDeclaration => "EnumDeclaration",
            SyntaxKind::VariableStatement => "VariableStatement",
            SyntaxKind::Constructor => "Constructor",
            SyntaxKind::ImportDeclaration => "ImportDeclaration",
            SyntaxKind::ExportAssignment => "ExportAssignment",
            SyntaxKind::ExportDeclaration => "ExportDeclaration",
            SyntaxKind::NamespaceExportDeclaration => "NamespaceExportDeclaration",
            SyntaxKind::TypeAliasDeclaration => "TypeAliasDeclaration",
            SyntaxKind::CallSignature => "CallSignature",
            SyntaxKind::ConstructSignature => "ConstructSignature",
            SyntaxKind::IndexSignature => "IndexSignature",
            SyntaxKind::MethodSignature => "MethodSignature",
            SyntaxKind::PropertySignature => "PropertySignature",
            SyntaxKind::EmptyStatement => "EmptyStatement",
            SyntaxKind::EndOfFileToken => "EndOfFileToken",
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::QualifiedName => "QualifiedName",
            SyntaxKind::TypeLiteral => "TypeLiteral",
            SyntaxKind::ArrayType => "ArrayType",
            SyntaxKind::FunctionType => "FunctionType",
            SyntaxKind::ConstructorType => "ConstructorType",
            SyntaxKind::StringLiteral => "StringLiteral",
            SyntaxKind::StringKeyword => "StringKeyword",
            SyntaxKind::NumberKeyword => "NumberKeyword",
            SyntaxKind::BooleanKeyword => "BooleanKeyword",
            SyntaxKind::AnyKeyword => "AnyKeyword",
            SyntaxKind::VoidKeyword => "VoidKeyword",
            SyntaxKind::TypeReference => "TypeReference",
            SyntaxKind::TypeQuery => "TypeQuery",
            SyntaxKind::LiteralType => "LiteralType",
            SyntaxKind::UnionType => "UnionType",
            SyntaxKind::IntersectionType => "IntersectionType",
            SyntaxKind::TupleType => "TupleType",
            SyntaxKind::IndexedAccessType => "IndexedAccessType",
            SyntaxKind::TypeOperator => "TypeOperator",
            SyntaxKind::TypePredicate => "TypePredicate",
            SyntaxKind::ConditionalType => "ConditionalType",
            SyntaxKind::MappedType => "MappedType",
            SyntaxKind::TemplateLiteralType => "TemplateLiteralType",
            SyntaxKind::ImportType => "ImportType",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: Atom,
    pub span: Span,
}

// ============ DECLARATIONS ============

#[derive(Debug, Clone)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Module(ModuleDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Variable(VariableStatement),
    Constructor(ConstructorDeclaration),
    Import(ImportDeclaration),
    ExportAssignment(ExportAssignment),
    Export(ExportDeclaration),
    NamespaceExport(NamespaceExportDeclaration),
    TypeAlias(TypeAliasDeclaration),
    CallSignature(SignatureDeclaration),
    ConstructSignature(SignatureDeclaration),
    IndexSignature(IndexSignature),
    MethodSignature(MethodSignature),
    PropertySignature(PropertySignature),
    Empty(Span),
    EndOfFile(Span),
}

impl Declaration {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Declaration::Function(_) => SyntaxKind::FunctionDeclaration,
            Declaration::Module(_) => SyntaxKind::ModuleDeclaration,
            Declaration::Class(_) => SyntaxKind::ClassDeclaration,
            Declaration::Interface(_) => SyntaxKind::InterfaceDeclaration,
            Declaration::Enum(_) => SyntaxKind::EnumDeclaration,
            Declaration::Variable(_) => SyntaxKind::VariableStatement,
            Declaration::Constructor(_) => SyntaxKind::Constructor,
            Declaration::Import(_) => SyntaxKind::ImportDeclaration,
            Declaration::ExportAssignment(_) => SyntaxKind::ExportAssignment,
            Declaration::Export(_) => SyntaxKind::ExportDeclaration,
            Declaration::NamespaceExport(_) => SyntaxKind::NamespaceExportDeclaration,
            Declaration::TypeAlias(_) => SyntaxKind::TypeAliasDeclaration,
            Declaration::CallSignature(_) => SyntaxKind::CallSignature,
            Declaration::ConstructSignature(_) => SyntaxKind::ConstructSignature,
            Declaration::IndexSignature(_) => SyntaxKind::IndexSignature,
            Declaration::MethodSignature(_) => SyntaxKind::MethodSignature,
            Declaration::PropertySignature(_) => SyntaxKind::PropertySignature,
            Declaration::Empty(_) => SyntaxKind::EmptyStatement,
            Declaration::EndOfFile(_) => SyntaxKind::EndOfFileToken,
        }
    }

    /// Modifiers written in front of the declaration, if it can carry any.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Declaration::Function(d) => d.modifiers,
            Declaration::Module(d) => d.modifiers,
            Declaration::Class(d) => d.modifiers,
            Declaration::Interface(d) => d.modifiers,
            Declaration::Enum(d) => d.modifiers,
            Declaration::Variable(d) => d.modifiers,
            Declaration::Constructor(d) => d.modifiers,
            Declaration::TypeAlias(d) => d.modifiers,
            Declaration::IndexSignature(d) => d.modifiers,
            Declaration::MethodSignature(d) => d.modifiers,
            Declaration::PropertySignature(d) => d.modifiers,
            Declaration::Import(_)
            | Declaration::ExportAssignment(_)
            | Declaration::Export(_)
            | Declaration::NamespaceExport(_)
            | Declaration::CallSignature(_)
            | Declaration::ConstructSignature(_)
            | Declaration::Empty(_)
            | Declaration::EndOfFile(_) => Modifiers::default(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Function(d) => d.span,
            Declaration::Module(d) => d.span,
            Declaration::Class(d) => d.span,
            Declaration::Interface(d) => d.span,
            Declaration::Enum(d) => d.span,
            Declaration::Variable(d) => d.span,
            Declaration::Constructor(d) => d.span,
            Declaration::Import(d) => d.span,
            Declaration::ExportAssignment(d) => d.span,
            Declaration::Export(d) => d.span,
            Declaration::NamespaceExport(d) => d.span,
            Declaration::TypeAlias(d) => d.span,
            Declaration::CallSignature(d) | Declaration::ConstructSignature(d) => d.span,
            Declaration::IndexSignature(d) => d.span,
            Declaration::MethodSignature(d) => d.span,
            Declaration::PropertySignature(d) => d.span,
            Declaration::Empty(span) | Declaration::EndOfFile(span) => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub export: bool,
    pub declare: bool,
    pub default: bool,
    pub abstract_: bool,
    pub static_: bool,
    pub readonly: bool,
    pub accessibility: Option<Accessibility>,
}

/// Parameters and return annotation shared by every callable form.
#[derive(Debug, Clone)]
pub struct Signature {
    pub type_parameters: Option<TypeParameters>,
    pub params: Vec<Parameter>,
    pub return_type: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: ParameterName,
    pub type_annotation: Option<TypeNode>,
    pub optional: bool,
    pub rest: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ParameterName {
    Identifier(Identifier),
    /// `{ a, b }` or `[a, b]`; the pattern itself is not kept
    Pattern(Span),
}

impl ParameterName {
    /// Name a parameter is rendered under; patterns have no name of their own.
    pub fn text(&self) -> &str {
        match self {
            ParameterName::Identifier(id) => id.name.as_str(),
            ParameterName::Pattern(_) => "arg",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeParameters {
    pub params: Vec<TypeParameter>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub name: Identifier,
    pub constraint: Option<Box<TypeNode>>,
    pub default: Option<Box<TypeNode>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub modifiers: Modifiers,
    /// `None` only for `export default function (...)`
    pub id: Option<Identifier>,
    pub signature: Signature,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ModuleName {
    Identifier(Identifier),
    /// `declare module "jquery"`; holds the unquoted text
    String(Atom, Span),
}

impl ModuleName {
    /// Name as TypeScript reports it: string module names keep their quotes.
    pub fn text(&self) -> String {
        match self {
            ModuleName::Identifier(id) => id.name.to_string(),
            ModuleName::String(value, _) => format!("\"{}\"", value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModuleDeclaration {
    pub modifiers: Modifiers,
    pub name: ModuleName,
    /// `None` for the shorthand `declare module "m";`. A dotted name
    /// `namespace A.B { }` is stored as `A` whose body holds the single
    /// module declaration `B`.
    pub body: Option<Vec<Declaration>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    pub modifiers: Modifiers,
    pub id: Option<Identifier>,
    pub type_parameters: Option<TypeParameters>,
    pub extends: Option<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    pub modifiers: Modifiers,
    pub id: Identifier,
    pub type_parameters: Option<TypeParameters>,
    pub extends: Vec<TypeNode>,
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    pub modifiers: Modifiers,
    pub const_: bool,
    pub id: Identifier,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: Atom,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone)]
pub struct VariableStatement {
    pub modifiers: Modifiers,
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    /// `None` for destructuring patterns
    pub id: Option<Identifier>,
    pub type_annotation: Option<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstructorDeclaration {
    pub modifiers: Modifiers,
    pub signature: Signature,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportDeclaration {
    pub clause: ImportClause,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ImportClause {
    /// `import x = A.B;` or `import x = require("m");`
    Equals {
        name: Identifier,
        reference: ModuleReference,
    },
    /// Any ES import form; only the module specifier is kept.
    Module { specifier: Atom },
}

#[derive(Debug, Clone)]
pub enum ModuleReference {
    Entity(TypeNode),
    External(Atom),
}

/// `export = x;` or `export default x;`
#[derive(Debug, Clone)]
pub struct ExportAssignment {
    /// Entity name being exported; `None` for any other expression
    pub expression: Option<TypeNode>,
    pub export_equals: bool,
    pub span: Span,
}

/// `export { a, b as c } [from "m"];` or `export * from "m";`
#[derive(Debug, Clone)]
pub struct ExportDeclaration {
    pub names: Vec<Atom>,
    pub source: Option<Atom>,
    pub span: Span,
}

/// `export as namespace X;`
#[derive(Debug, Clone)]
pub struct NamespaceExportDeclaration {
    pub name: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeAliasDeclaration {
    pub modifiers: Modifiers,
    pub id: Identifier,
    pub type_parameters: Option<TypeParameters>,
    pub type_annotation: TypeNode,
    pub span: Span,
}

/// Call signature `(a: T): R` or construct signature `new (a: T): R`
#[derive(Debug, Clone)]
pub struct SignatureDeclaration {
    pub signature: Signature,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexSignature {
    pub modifiers: Modifiers,
    pub key: Identifier,
    pub key_type: Box<TypeNode>,
    pub value_type: Option<Box<TypeNode>>,
    pub span: Span,
}

/// Property names may be identifiers, keywords, strings or numbers.
#[derive(Debug, Clone)]
pub enum PropertyName {
    Identifier(Identifier),
    String(Atom, Span),
    Number(Atom, Span),
    /// `[Symbol.iterator]`
    Computed(Span),
}

impl PropertyName {
    pub fn text(&self) -> Option<&str> {
        match self {
            PropertyName::Identifier(id) => Some(id.name.as_str()),
            PropertyName::String(value, _) | PropertyName::Number(value, _) => {
                Some(value.as_str())
            }
            PropertyName::Computed(_) => None,
        }
    }
}

/// Method in an interface, type literal or class body
#[derive(Debug, Clone)]
pub struct MethodSignature {
    pub modifiers: Modifiers,
    pub name: PropertyName,
    pub optional: bool,
    pub signature: Signature,
    pub span: Span,
}

/// Property in an interface, type literal or class body. Accessors
/// (`get x(): T`, `set x(v: T)`) are stored as properties of their type.
#[derive(Debug, Clone)]
pub struct PropertySignature {
    pub modifiers: Modifiers,
    pub name: PropertyName,
    pub optional: bool,
    pub type_annotation: Option<Box<TypeNode>>,
    pub span: Span,
}

// ============ TYPE EXPRESSIONS ============

#[derive(Debug, Clone)]
pub enum TypeNode {
    Identifier(Identifier),
    Qualified(QualifiedName),
    Object(ObjectType),
    Array(ArrayType),
    Function(FunctionType),
    Constructor(FunctionType),
    StringLiteral(StringLiteralType),
    Keyword(KeywordType),
    /// `Name<Args>`
    Reference(TypeReference),
    /// `typeof x`
    Query(TypeQuery),
    /// `undefined`, `never`, `this`, `true`, `42` and similar tokens
    Literal(LiteralType),
    Union(TypeList),
    Intersection(TypeList),
    Tuple(TypeList),
    IndexedAccess(IndexedAccessType),
    /// `keyof T`, `unique symbol`, `readonly T[]`
    Operator(TypeOperator),
    /// `x is T`, `asserts x`
    Predicate(TypePredicate),
    Conditional(ConditionalType),
    Mapped(Span),
    /// `` `on${string}` ``, kept as raw source text
    TemplateLiteral(LiteralType),
    /// `import("m").T`, `typeof import("m")`
    Import(ImportType),
}

impl TypeNode {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            TypeNode::Identifier(_) => SyntaxKind::Identifier,
            TypeNode::Qualified(_) => SyntaxKind::QualifiedName,
            TypeNode::Object(_) => SyntaxKind::TypeLiteral,
            TypeNode::Array(_) => SyntaxKind::ArrayType,
            TypeNode::Function(_) => SyntaxKind::FunctionType,
            TypeNode::Constructor(_) => SyntaxKind::ConstructorType,
            TypeNode::StringLiteral(_) => SyntaxKind::StringLiteral,
            TypeNode::Keyword(k) => match k.keyword {
                TypeKeyword::String => SyntaxKind::StringKeyword,
                TypeKeyword::Number => SyntaxKind::NumberKeyword,
                TypeKeyword::Boolean => SyntaxKind::BooleanKeyword,
                TypeKeyword::Any => SyntaxKind::AnyKeyword,
                TypeKeyword::Void => SyntaxKind::VoidKeyword,
            },
            TypeNode::Reference(_) => SyntaxKind::TypeReference,
            TypeNode::Query(_) => SyntaxKind::TypeQuery,
            TypeNode::Literal(_) => SyntaxKind::LiteralType,
            TypeNode::Union(_) => SyntaxKind::UnionType,
            TypeNode::Intersection(_) => SyntaxKind::IntersectionType,
            TypeNode::Tuple(_) => SyntaxKind::TupleType,
            TypeNode::IndexedAccess(_) => SyntaxKind::IndexedAccessType,
            TypeNode::Operator(_) => SyntaxKind::TypeOperator,
            TypeNode::Predicate(_) => SyntaxKind::TypePredicate,
            TypeNode::Conditional(_) => SyntaxKind::ConditionalType,
            TypeNode::Mapped(_) => SyntaxKind::MappedType,
            TypeNode::TemplateLiteral(_) => SyntaxKind::TemplateLiteralType,
            TypeNode::Import(_) => SyntaxKind::ImportType,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self,
            TypeNode::Keyword(KeywordType {
                keyword: TypeKeyword::Void,
                ..
            })
        )
    }
}

/// `A.B.C`: `left` is an identifier or another qualified name, `right` is
/// always an identifier.
#[derive(Debug, Clone)]
pub struct QualifiedName {
    pub left: Box<TypeNode>,
    pub right: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionType {
    pub signature: Signature,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteralType {
    pub value: Atom,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKeyword {
    String,
    Number,
    Boolean,
    Any,
    Void,
}

#[derive(Debug, Clone)]
pub struct KeywordType {
    pub keyword: TypeKeyword,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeReference {
    /// Identifier or qualified name
    pub name: Box<TypeNode>,
    pub type_arguments: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeQuery {
    /// Identifier or qualified name
    pub name: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LiteralType {
    pub text: Atom,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeList {
    pub types: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexedAccessType {
    pub object_type: Box<TypeNode>,
    pub index_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeOperator {
    pub operator: Atom,
    pub type_annotation: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypePredicate {
    pub asserts: bool,
    pub parameter: Atom,
    pub type_annotation: Option<Box<TypeNode>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConditionalType {
    pub check_type: Box<TypeNode>,
    pub extends_type: Box<TypeNode>,
    pub true_type: Box<TypeNode>,
    pub false_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportType {
    pub is_typeof: bool,
    pub module: Atom,
    /// Names after the call: `import("m").A.B` gives `A`, `B`
    pub qualifier: Vec<Atom>,
    pub type_arguments: Vec<TypeNode>,
    pub span: Span,
}
