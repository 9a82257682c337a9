//! Parser for TypeScript declaration files
//!
//! Recursive descent over the declaration grammar. Anything that only
//! matters at runtime (function bodies, initializers, decorators) is skipped
//! token-wise so that ordinary `.ts` sources with bodies still parse.

use crate::ast::*;
use crate::atom::{Atom, AtomTable, CheapClone};
use crate::error::TranslateError;
use crate::lexer::{Lexer, LexerCheckpoint, Span, Token, TokenKind};

/// Parser for TypeScript declaration files
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    /// File name reported in syntax errors
    file: Option<String>,
}

/// Saved parser position for speculative parsing
struct ParserState {
    checkpoint: LexerCheckpoint,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, atoms: &'a mut AtomTable) -> Self {
        let mut lexer = Lexer::new(source, atoms);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::eof(0, 1, 1),
            file: None,
        }
    }

    #[inline]
    fn intern(&mut self, s: &str) -> Atom {
        self.lexer.atoms().get_or_insert(s)
    }

    /// Parse a complete declaration file.
    ///
    /// The member list always ends with [`Declaration::EndOfFile`].
    pub fn parse_source_file(&mut self, name: &str) -> Result<SourceFile, TranslateError> {
        self.file = Some(name.to_string());
        let start = self.current.span;

        let mut members = vec![];
        while !self.is_at_end() {
            members.push(self.parse_declaration()?);
        }
        let eof = self.current.span;
        members.push(Declaration::EndOfFile(eof));

        Ok(SourceFile {
            name: self.intern(name),
            members,
            span: Span::new(start.start, eof.end, start.line, start.column),
        })
    }

    // ============ DECLARATIONS ============

    fn parse_declaration(&mut self) -> Result<Declaration, TranslateError> {
        self.skip_decorators()?;
        let start = self.current.span;

        if self.match_token(&TokenKind::Semicolon) {
            return Ok(Declaration::Empty(start));
        }

        let mut modifiers = Modifiers::default();
        if self.match_token(&TokenKind::Export) {
            if self.match_token(&TokenKind::Eq) {
                return self.parse_export_assignment(start, true);
            }
            if self.check(&TokenKind::LBrace) || self.check(&TokenKind::Star) {
                return self.parse_export_declaration(start);
            }
            // `export type { A }` but not `export type A = ...`
            if self.check(&TokenKind::Type)
                && matches!(
                    self.peek_token().kind,
                    TokenKind::LBrace | TokenKind::Star
                )
            {
                self.advance();
                return self.parse_export_declaration(start);
            }
            if self.check_word("as") {
                return self.parse_namespace_export(start);
            }
            if self.match_token(&TokenKind::Default) {
                if !self.starts_default_declaration() {
                    return self.parse_export_assignment(start, false);
                }
                modifiers.default = true;
            }
            modifiers.export = true;
        }

        if self.check(&TokenKind::Declare) && self.next_starts_declaration() {
            self.advance();
            modifiers.declare = true;
        }
        if self.check(&TokenKind::Abstract) && self.peek_token().kind == TokenKind::Class {
            self.advance();
            modifiers.abstract_ = true;
        }

        match self.current.kind.clone() {
            TokenKind::Function => Ok(Declaration::Function(
                self.parse_function_declaration(start, modifiers)?,
            )),
            TokenKind::Class => Ok(Declaration::Class(self.parse_class(start, modifiers)?)),
            TokenKind::Interface => Ok(Declaration::Interface(
                self.parse_interface(start, modifiers)?,
            )),
            TokenKind::Enum => Ok(Declaration::Enum(self.parse_enum(start, modifiers, false)?)),
            TokenKind::Const if self.peek_token().kind == TokenKind::Enum => {
                self.advance();
                Ok(Declaration::Enum(self.parse_enum(start, modifiers, true)?))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => Ok(Declaration::Variable(
                self.parse_variable_statement(start, modifiers)?,
            )),
            TokenKind::Namespace | TokenKind::Module => {
                self.advance();
                Ok(Declaration::Module(self.parse_module(start, modifiers)?))
            }
            TokenKind::Identifier(word)
                if word == "global"
                    && (modifiers.declare || self.peek_token().kind == TokenKind::LBrace) =>
            {
                Ok(Declaration::Module(self.parse_module(start, modifiers)?))
            }
            TokenKind::Type => Ok(Declaration::TypeAlias(
                self.parse_type_alias(start, modifiers)?,
            )),
            TokenKind::Import => Ok(Declaration::Import(self.parse_import(start)?)),
            _ => Err(self.unexpected_token("declaration")),
        }
    }

    fn parse_function_declaration(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<FunctionDeclaration, TranslateError> {
        self.require_token(&TokenKind::Function)?;
        self.match_token(&TokenKind::Star);

        let id = if self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
            None
        } else {
            Some(self.parse_binding_identifier()?)
        };
        let signature = self.parse_signature()?;
        self.skip_body_or_semicolon()?;

        let span = self.span_from(start);
        Ok(FunctionDeclaration {
            modifiers,
            id,
            signature,
            span,
        })
    }

    /// Parse a namespace after its `namespace`/`module` keyword.
    fn parse_module(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<ModuleDeclaration, TranslateError> {
        let name = match &self.current.kind {
            TokenKind::String(value) => {
                let value = value.cheap_clone();
                let span = self.current.span;
                self.advance();
                ModuleName::String(value, span)
            }
            _ => ModuleName::Identifier(self.parse_binding_identifier()?),
        };

        // namespace A.B.C { }
        let mut nested = vec![];
        while self.match_token(&TokenKind::Dot) {
            nested.push(self.parse_identifier_name()?);
        }

        let body = if self.check(&TokenKind::LBrace) {
            Some(self.parse_module_block()?)
        } else {
            self.expect_semicolon()?;
            None
        };

        let span = self.span_from(start);
        let body = nested.into_iter().rev().fold(body, |body, id| {
            let inner_span = Span::new(id.span.start, span.end, id.span.line, id.span.column);
            Some(vec![Declaration::Module(ModuleDeclaration {
                modifiers: Modifiers {
                    export: true,
                    ..Modifiers::default()
                },
                name: ModuleName::Identifier(id),
                body,
                span: inner_span,
            })])
        });

        Ok(ModuleDeclaration {
            modifiers,
            name,
            body,
            span,
        })
    }

    fn parse_module_block(&mut self) -> Result<Vec<Declaration>, TranslateError> {
        self.require_token(&TokenKind::LBrace)?;
        let mut body = vec![];
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.parse_declaration()?);
        }
        self.require_token(&TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_class(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<ClassDeclaration, TranslateError> {
        self.require_token(&TokenKind::Class)?;
        let id = if self.is_identifier_like() {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;

        let extends = if self.match_token(&TokenKind::Extends) {
            Some(self.parse_type_reference_node()?)
        } else {
            None
        };

        let mut implements = vec![];
        if self.match_token(&TokenKind::Implements) {
            implements.push(self.parse_type_reference_node()?);
            while self.match_token(&TokenKind::Comma) {
                implements.push(self.parse_type_reference_node()?);
            }
        }

        self.require_token(&TokenKind::LBrace)?;
        let mut members = vec![];
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.match_token(&TokenKind::Semicolon) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        self.require_token(&TokenKind::RBrace)?;

        let span = self.span_from(start);
        Ok(ClassDeclaration {
            modifiers,
            id,
            type_parameters,
            extends,
            implements,
            members,
            span,
        })
    }

    fn parse_class_member(&mut self) -> Result<Declaration, TranslateError> {
        self.skip_decorators()?;
        let start = self.current.span;
        let modifiers = self.parse_member_modifiers();

        if self.check_word("constructor")
            && matches!(self.peek_token().kind, TokenKind::LParen | TokenKind::Lt)
        {
            self.advance();
            let signature = self.parse_signature()?;
            if self.check(&TokenKind::LBrace) {
                self.skip_balanced()?;
            }
            self.skip_member_terminator();
            let span = self.span_from(start);
            return Ok(Declaration::Constructor(ConstructorDeclaration {
                modifiers,
                signature,
                span,
            }));
        }

        if self.check(&TokenKind::LBracket) && self.is_index_signature() {
            return self.parse_index_signature(start, modifiers);
        }

        self.parse_named_member(start, modifiers, true)
    }

    fn parse_interface(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<InterfaceDeclaration, TranslateError> {
        self.require_token(&TokenKind::Interface)?;
        let id = self.parse_binding_identifier()?;
        let type_parameters = self.parse_optional_type_parameters()?;

        let mut extends = vec![];
        if self.match_token(&TokenKind::Extends) {
            extends.push(self.parse_type_reference_node()?);
            while self.match_token(&TokenKind::Comma) {
                extends.push(self.parse_type_reference_node()?);
            }
        }

        self.require_token(&TokenKind::LBrace)?;
        let members = self.parse_type_members()?;
        self.require_token(&TokenKind::RBrace)?;

        let span = self.span_from(start);
        Ok(InterfaceDeclaration {
            modifiers,
            id,
            type_parameters,
            extends,
            members,
            span,
        })
    }

    fn parse_enum(
        &mut self,
        start: Span,
        modifiers: Modifiers,
        const_: bool,
    ) -> Result<EnumDeclaration, TranslateError> {
        self.require_token(&TokenKind::Enum)?;
        let id = self.parse_binding_identifier()?;
        self.require_token(&TokenKind::LBrace)?;

        let mut members = vec![];
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let member_start = self.current.span;
            let name = self.parse_property_name()?;
            if self.match_token(&TokenKind::Eq) {
                self.skip_initializer()?;
            }
            let name = match name.text() {
                Some(text) => self.intern(text),
                None => self.intern(""),
            };
            let span = self.span_from(member_start);
            members.push(EnumMember { name, span });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.require_token(&TokenKind::RBrace)?;

        let span = self.span_from(start);
        Ok(EnumDeclaration {
            modifiers,
            const_,
            id,
            members,
            span,
        })
    }

    fn parse_variable_statement(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<VariableStatement, TranslateError> {
        let kind = match &self.current.kind {
            TokenKind::Var => VariableKind::Var,
            TokenKind::Let => VariableKind::Let,
            TokenKind::Const => VariableKind::Const,
            _ => return Err(self.unexpected_token("variable declaration")),
        };
        self.advance();

        let mut declarations = vec![self.parse_variable_declarator()?];
        while self.match_token(&TokenKind::Comma) {
            declarations.push(self.parse_variable_declarator()?);
        }
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(VariableStatement {
            modifiers,
            kind,
            declarations,
            span,
        })
    }

    fn parse_variable_declarator(&mut self) -> Result<VariableDeclarator, TranslateError> {
        let start = self.current.span;
        let id = if self.check(&TokenKind::LBrace) || self.check(&TokenKind::LBracket) {
            self.skip_balanced()?;
            None
        } else {
            Some(self.parse_binding_identifier()?)
        };
        self.match_token(&TokenKind::Bang);

        let type_annotation = if self.match_token(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        if self.match_token(&TokenKind::Eq) {
            self.skip_initializer()?;
        }

        let span = self.span_from(start);
        Ok(VariableDeclarator {
            id,
            type_annotation,
            span,
        })
    }

    fn parse_type_alias(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<TypeAliasDeclaration, TranslateError> {
        self.require_token(&TokenKind::Type)?;
        let id = self.parse_binding_identifier()?;
        let type_parameters = self.parse_optional_type_parameters()?;
        self.require_token(&TokenKind::Eq)?;
        let type_annotation = self.parse_type()?;
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(TypeAliasDeclaration {
            modifiers,
            id,
            type_parameters,
            type_annotation,
            span,
        })
    }

    fn parse_import(&mut self, start: Span) -> Result<ImportDeclaration, TranslateError> {
        self.require_token(&TokenKind::Import)?;

        // import type ...
        if self.check(&TokenKind::Type) && self.peek_token().kind != TokenKind::Eq {
            self.advance();
        }

        // import "module";
        if let TokenKind::String(specifier) = &self.current.kind {
            let specifier = specifier.cheap_clone();
            self.advance();
            self.expect_semicolon()?;
            let span = self.span_from(start);
            return Ok(ImportDeclaration {
                clause: ImportClause::Module { specifier },
                span,
            });
        }

        // import x = A.B;  import x = require("m");
        if self.is_identifier_like() && self.peek_token().kind == TokenKind::Eq {
            let name = self.parse_binding_identifier()?;
            self.require_token(&TokenKind::Eq)?;
            let reference = if self.check_word("require")
                && self.peek_token().kind == TokenKind::LParen
            {
                self.advance();
                self.require_token(&TokenKind::LParen)?;
                let specifier = self.parse_string()?;
                self.require_token(&TokenKind::RParen)?;
                ModuleReference::External(specifier)
            } else {
                ModuleReference::Entity(self.parse_entity_name()?)
            };
            self.expect_semicolon()?;
            let span = self.span_from(start);
            return Ok(ImportDeclaration {
                clause: ImportClause::Equals { name, reference },
                span,
            });
        }

        // Default, namespace and named bindings are not kept
        while !self.check_word("from") && !self.is_at_end() {
            if self.check(&TokenKind::LBrace) {
                self.skip_balanced()?;
            } else {
                self.advance();
            }
        }
        if !self.match_word("from") {
            return Err(self.unexpected_token("'from'"));
        }
        let specifier = self.parse_string()?;
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(ImportDeclaration {
            clause: ImportClause::Module { specifier },
            span,
        })
    }

    /// `export = x;` and `export default x;`, positioned after `=` / `default`.
    fn parse_export_assignment(
        &mut self,
        start: Span,
        export_equals: bool,
    ) -> Result<Declaration, TranslateError> {
        let mut expression = None;
        if self.is_identifier_like() {
            let entity = self.parse_entity_name()?;
            if self.at_statement_end() {
                expression = Some(entity);
            }
        }
        if !self.at_statement_end() {
            self.skip_initializer()?;
            expression = None;
        }
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(Declaration::ExportAssignment(ExportAssignment {
            expression,
            export_equals,
            span,
        }))
    }

    /// `export { a, b as c } from "m";` and `export * from "m";`
    fn parse_export_declaration(&mut self, start: Span) -> Result<Declaration, TranslateError> {
        let mut names = vec![];
        if self.match_token(&TokenKind::Star) {
            if self.match_word("as") {
                names.push(self.parse_identifier_name()?.name);
            }
        } else {
            self.require_token(&TokenKind::LBrace)?;
            while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                if self.check(&TokenKind::Type) && Self::is_name_token(&self.peek_token().kind) {
                    self.advance();
                }
                let local = self.parse_identifier_name()?;
                let exported = if self.match_word("as") {
                    self.parse_identifier_name()?
                } else {
                    local
                };
                names.push(exported.name);

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            self.require_token(&TokenKind::RBrace)?;
        }

        let source = if self.match_word("from") {
            Some(self.parse_string()?)
        } else {
            None
        };
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(Declaration::Export(ExportDeclaration {
            names,
            source,
            span,
        }))
    }

    /// `export as namespace X;`, positioned at `as`.
    fn parse_namespace_export(&mut self, start: Span) -> Result<Declaration, TranslateError> {
        self.advance();
        self.require_token(&TokenKind::Namespace)?;
        let name = self.parse_binding_identifier()?;
        self.expect_semicolon()?;

        let span = self.span_from(start);
        Ok(Declaration::NamespaceExport(NamespaceExportDeclaration {
            name,
            span,
        }))
    }

    // ============ MEMBERS ============

    fn parse_type_members(&mut self) -> Result<Vec<Declaration>, TranslateError> {
        let mut members = vec![];
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            members.push(self.parse_type_member()?);
        }
        Ok(members)
    }

    fn parse_type_member(&mut self) -> Result<Declaration, TranslateError> {
        let start = self.current.span;

        // Call signature: (a: T): R
        if self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
            let signature = self.parse_signature()?;
            self.skip_member_terminator();
            let span = self.span_from(start);
            return Ok(Declaration::CallSignature(SignatureDeclaration {
                signature,
                span,
            }));
        }

        // Construct signature: new (a: T): R
        if self.check(&TokenKind::New)
            && matches!(self.peek_token().kind, TokenKind::LParen | TokenKind::Lt)
        {
            self.advance();
            let signature = self.parse_signature()?;
            self.skip_member_terminator();
            let span = self.span_from(start);
            return Ok(Declaration::ConstructSignature(SignatureDeclaration {
                signature,
                span,
            }));
        }

        let modifiers = self.parse_member_modifiers();
        if self.check(&TokenKind::LBracket) && self.is_index_signature() {
            return self.parse_index_signature(start, modifiers);
        }

        self.parse_named_member(start, modifiers, false)
    }

    /// Methods, properties and accessors. Class members may carry bodies and
    /// initializers, which are skipped.
    fn parse_named_member(
        &mut self,
        start: Span,
        modifiers: Modifiers,
        in_class: bool,
    ) -> Result<Declaration, TranslateError> {
        if (self.check_word("get") || self.check_word("set")) && self.next_is_member_name() {
            let setter = self.check_word("set");
            self.advance();
            let name = self.parse_property_name()?;
            let signature = self.parse_signature()?;
            if in_class && self.check(&TokenKind::LBrace) {
                self.skip_balanced()?;
            }
            self.skip_member_terminator();

            let type_annotation = if setter {
                signature
                    .params
                    .into_iter()
                    .next()
                    .and_then(|param| param.type_annotation)
                    .map(Box::new)
            } else {
                signature.return_type
            };
            let span = self.span_from(start);
            return Ok(Declaration::PropertySignature(PropertySignature {
                modifiers,
                name,
                optional: false,
                type_annotation,
                span,
            }));
        }

        self.match_token(&TokenKind::Star);
        let name = self.parse_property_name()?;
        let optional = self.match_token(&TokenKind::Question);
        if !optional {
            self.match_token(&TokenKind::Bang);
        }

        if self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
            let signature = self.parse_signature()?;
            if in_class && self.check(&TokenKind::LBrace) {
                self.skip_balanced()?;
            }
            self.skip_member_terminator();
            let span = self.span_from(start);
            return Ok(Declaration::MethodSignature(MethodSignature {
                modifiers,
                name,
                optional,
                signature,
                span,
            }));
        }

        let type_annotation = if self.match_token(&TokenKind::Colon) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        if self.match_token(&TokenKind::Eq) {
            self.skip_initializer()?;
        }
        self.skip_member_terminator();

        let span = self.span_from(start);
        Ok(Declaration::PropertySignature(PropertySignature {
            modifiers,
            name,
            optional,
            type_annotation,
            span,
        }))
    }

    /// `[key: string]: T`
    fn parse_index_signature(
        &mut self,
        start: Span,
        modifiers: Modifiers,
    ) -> Result<Declaration, TranslateError> {
        self.require_token(&TokenKind::LBracket)?;
        let key = self.parse_binding_identifier()?;
        self.require_token(&TokenKind::Colon)?;
        let key_type = Box::new(self.parse_type()?);
        self.require_token(&TokenKind::RBracket)?;
        self.match_token(&TokenKind::Question);

        let value_type = if self.match_token(&TokenKind::Colon) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        self.skip_member_terminator();

        let span = self.span_from(start);
        Ok(Declaration::IndexSignature(IndexSignature {
            modifiers,
            key,
            key_type,
            value_type,
            span,
        }))
    }

    /// Modifiers in front of a class or interface member. A modifier word
    /// directly followed by `(`, `:` or `?` is the member's name instead.
    fn parse_member_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            let is_modifier = matches!(
                self.current.kind,
                TokenKind::Public
                    | TokenKind::Private
                    | TokenKind::Protected
                    | TokenKind::Static
                    | TokenKind::Abstract
                    | TokenKind::Readonly
                    | TokenKind::Declare
            ) || self.check_word("override")
                || self.check_word("accessor");
            if !is_modifier || !self.next_is_member_name() {
                break;
            }

            match self.current.kind {
                TokenKind::Public => modifiers.accessibility = Some(Accessibility::Public),
                TokenKind::Private => modifiers.accessibility = Some(Accessibility::Private),
                TokenKind::Protected => modifiers.accessibility = Some(Accessibility::Protected),
                TokenKind::Static => modifiers.static_ = true,
                TokenKind::Abstract => modifiers.abstract_ = true,
                TokenKind::Readonly => modifiers.readonly = true,
                TokenKind::Declare => modifiers.declare = true,
                _ => {}
            }
            self.advance();
        }
        modifiers
    }

    // ============ SIGNATURES ============

    fn parse_signature(&mut self) -> Result<Signature, TranslateError> {
        let type_parameters = self.parse_optional_type_parameters()?;
        let params = self.parse_parameters()?;
        let return_type = if self.match_token(&TokenKind::Colon) {
            Some(Box::new(self.parse_return_type()?))
        } else {
            None
        };
        Ok(Signature {
            type_parameters,
            params,
            return_type,
        })
    }

    /// Parse a parameter list: (a: T, b?: T, ...rest: T[], { x }: P = {})
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, TranslateError> {
        self.require_token(&TokenKind::LParen)?;

        let mut params = vec![];
        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            self.skip_decorators()?;
            let start = self.current.span;

            // Constructor parameter properties
            while matches!(
                self.current.kind,
                TokenKind::Public | TokenKind::Private | TokenKind::Protected | TokenKind::Readonly
            ) && self.next_is_parameter_name()
            {
                self.advance();
            }

            let rest = self.match_token(&TokenKind::DotDotDot);
            let name = match self.current.kind {
                TokenKind::LBrace | TokenKind::LBracket => {
                    self.skip_balanced()?;
                    ParameterName::Pattern(self.span_from(start))
                }
                TokenKind::This => {
                    let span = self.current.span;
                    self.advance();
                    ParameterName::Identifier(Identifier {
                        name: self.intern("this"),
                        span,
                    })
                }
                _ => ParameterName::Identifier(self.parse_binding_identifier()?),
            };
            let optional = self.match_token(&TokenKind::Question);

            let type_annotation = if self.match_token(&TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            if self.match_token(&TokenKind::Eq) {
                self.skip_initializer()?;
            }

            let span = self.span_from(start);
            params.push(Parameter {
                name,
                type_annotation,
                optional,
                rest,
                span,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.require_token(&TokenKind::RParen)?;
        Ok(params)
    }

    /// Return annotations may be type predicates: `x is T`, `asserts x`.
    fn parse_return_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;

        let asserts = self.check_word("asserts")
            && matches!(self.peek_token().kind, TokenKind::Identifier(_) | TokenKind::This);
        if asserts {
            self.advance();
        }

        if asserts
            || ((self.is_identifier_like() || self.check(&TokenKind::This))
                && self.peek_is_word("is"))
        {
            let parameter = if self.match_token(&TokenKind::This) {
                self.intern("this")
            } else {
                self.parse_binding_identifier()?.name
            };
            let type_annotation = if self.match_word("is") {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            let span = self.span_from(start);
            return Ok(TypeNode::Predicate(TypePredicate {
                asserts,
                parameter,
                type_annotation,
                span,
            }));
        }

        self.parse_type()
    }

    fn parse_optional_type_parameters(
        &mut self,
    ) -> Result<Option<TypeParameters>, TranslateError> {
        if !self.check(&TokenKind::Lt) {
            return Ok(None);
        }

        let start = self.current.span;
        self.advance();

        let mut params = vec![];
        while !self.check(&TokenKind::Gt) && !self.is_at_end() {
            let param_start = self.current.span;
            if self.check(&TokenKind::Const) {
                self.advance();
            }
            let name = self.parse_binding_identifier()?;

            let constraint = if self.match_token(&TokenKind::Extends) {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            let default = if self.match_token(&TokenKind::Eq) {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };

            let span = self.span_from(param_start);
            params.push(TypeParameter {
                name,
                constraint,
                default,
                span,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.require_token(&TokenKind::Gt)?;

        let span = self.span_from(start);
        Ok(Some(TypeParameters { params, span }))
    }

    fn parse_type_arguments(&mut self) -> Result<Vec<TypeNode>, TranslateError> {
        self.require_token(&TokenKind::Lt)?;
        let mut args = vec![];
        while !self.check(&TokenKind::Gt) && !self.is_at_end() {
            args.push(self.parse_type()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.require_token(&TokenKind::Gt)?;
        Ok(args)
    }

    // ============ TYPES ============

    /// Parse a type, including conditional types: `A extends B ? C : D`
    pub fn parse_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        let check_type = self.parse_union_type()?;
        if !self.match_token(&TokenKind::Extends) {
            return Ok(check_type);
        }

        let extends_type = self.parse_union_type()?;
        self.require_token(&TokenKind::Question)?;
        let true_type = self.parse_type()?;
        self.require_token(&TokenKind::Colon)?;
        let false_type = self.parse_type()?;

        let span = self.span_from(start);
        Ok(TypeNode::Conditional(ConditionalType {
            check_type: Box::new(check_type),
            extends_type: Box::new(extends_type),
            true_type: Box::new(true_type),
            false_type: Box::new(false_type),
            span,
        }))
    }

    fn parse_union_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        self.match_token(&TokenKind::Pipe);
        let first = self.parse_intersection_type()?;

        if !self.check(&TokenKind::Pipe) {
            return Ok(first);
        }

        let mut types = vec![first];
        while self.match_token(&TokenKind::Pipe) {
            types.push(self.parse_intersection_type()?);
        }

        let span = self.span_from(start);
        Ok(TypeNode::Union(TypeList { types, span }))
    }

    fn parse_intersection_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        self.match_token(&TokenKind::Amp);
        let first = self.parse_type_operator()?;

        if !self.check(&TokenKind::Amp) {
            return Ok(first);
        }

        let mut types = vec![first];
        while self.match_token(&TokenKind::Amp) {
            types.push(self.parse_type_operator()?);
        }

        let span = self.span_from(start);
        Ok(TypeNode::Intersection(TypeList { types, span }))
    }

    /// `keyof T`, `readonly T[]`, `unique symbol`, `infer U`
    fn parse_type_operator(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;

        let operator = if self.check(&TokenKind::Keyof) {
            "keyof"
        } else if self.check(&TokenKind::Readonly) {
            "readonly"
        } else if (self.check_word("unique") || self.check_word("infer"))
            && matches!(self.peek_token().kind, TokenKind::Identifier(_))
        {
            if self.check_word("unique") {
                "unique"
            } else {
                "infer"
            }
        } else {
            return self.parse_postfix_type();
        };
        self.advance();

        let operand = self.parse_type_operator()?;
        let operator = self.intern(operator);
        let span = self.span_from(start);
        Ok(TypeNode::Operator(TypeOperator {
            operator,
            type_annotation: Box::new(operand),
            span,
        }))
    }

    /// Array shorthand `T[]` and indexed access `T[K]`
    fn parse_postfix_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        let mut ty = self.parse_primary_type()?;

        // A `[` on a new line starts the next member, not an index
        while self.check(&TokenKind::LBracket) && !self.lexer.had_newline_before() {
            self.advance();
            if self.match_token(&TokenKind::RBracket) {
                ty = TypeNode::Array(ArrayType {
                    element_type: Box::new(ty),
                    span: self.span_from(start),
                });
            } else {
                let index_type = self.parse_type()?;
                self.require_token(&TokenKind::RBracket)?;
                ty = TypeNode::IndexedAccess(IndexedAccessType {
                    object_type: Box::new(ty),
                    index_type: Box::new(index_type),
                    span: self.span_from(start),
                });
            }
        }

        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;

        match self.current.kind.clone() {
            TokenKind::Any => {
                self.advance();
                Ok(self.keyword_type(TypeKeyword::Any, start))
            }
            TokenKind::Void => {
                self.advance();
                Ok(self.keyword_type(TypeKeyword::Void, start))
            }
            TokenKind::Identifier(name) => {
                let keyword = match name.as_str() {
                    "string" => Some(TypeKeyword::String),
                    "number" => Some(TypeKeyword::Number),
                    "boolean" => Some(TypeKeyword::Boolean),
                    _ => None,
                };
                if let Some(keyword) = keyword {
                    self.advance();
                    return Ok(self.keyword_type(keyword, start));
                }
                if matches!(
                    name.as_str(),
                    "undefined" | "never" | "unknown" | "object" | "symbol" | "bigint"
                ) {
                    self.advance();
                    return Ok(TypeNode::Literal(LiteralType {
                        text: name,
                        span: start,
                    }));
                }
                self.parse_type_reference_node()
            }
            // `null` evaluates like a name bound in the base scope
            TokenKind::Null => {
                self.advance();
                Ok(TypeNode::Identifier(Identifier {
                    name: self.intern("null"),
                    span: start,
                }))
            }
            TokenKind::This | TokenKind::True | TokenKind::False => {
                let text = self.current.kind.keyword_text().unwrap_or_default();
                let text = self.intern(text);
                self.advance();
                Ok(TypeNode::Literal(LiteralType { text, span: start }))
            }
            TokenKind::Number(text) => {
                self.advance();
                Ok(TypeNode::Literal(LiteralType { text, span: start }))
            }
            TokenKind::Minus => {
                self.advance();
                let TokenKind::Number(digits) = &self.current.kind else {
                    return Err(self.unexpected_token("number"));
                };
                let text = format!("-{}", digits);
                self.advance();
                let text = self.intern(&text);
                Ok(TypeNode::Literal(LiteralType {
                    text,
                    span: self.span_from(start),
                }))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(TypeNode::StringLiteral(StringLiteralType { value, span: start }))
            }
            TokenKind::Template(text) => {
                self.advance();
                Ok(TypeNode::TemplateLiteral(LiteralType { text, span: start }))
            }
            TokenKind::Import => self.parse_import_type(start, false),
            TokenKind::Typeof if self.peek_token().kind == TokenKind::Import => {
                self.advance();
                self.parse_import_type(start, true)
            }
            TokenKind::Typeof => {
                self.advance();
                let name = self.parse_entity_name()?;
                if self.check(&TokenKind::Lt) {
                    self.parse_type_arguments()?;
                }
                let span = self.span_from(start);
                Ok(TypeNode::Query(TypeQuery {
                    name: Box::new(name),
                    span,
                }))
            }
            TokenKind::LBrace => {
                if self.is_mapped_type() {
                    self.skip_balanced()?;
                    return Ok(TypeNode::Mapped(self.span_from(start)));
                }
                self.advance();
                let members = self.parse_type_members()?;
                self.require_token(&TokenKind::RBrace)?;
                let span = self.span_from(start);
                Ok(TypeNode::Object(ObjectType { members, span }))
            }
            TokenKind::LBracket => self.parse_tuple_type(start),
            TokenKind::LParen => {
                if let Some(func_type) = self.try_parse_function_type()? {
                    return Ok(func_type);
                }
                // Parentheses only group; the inner type is used directly
                self.advance();
                let inner = self.parse_type()?;
                self.require_token(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Lt => {
                let signature = self.parse_arrow_signature()?;
                let span = self.span_from(start);
                Ok(TypeNode::Function(FunctionType { signature, span }))
            }
            TokenKind::New => self.parse_constructor_type(start),
            TokenKind::Abstract if self.peek_token().kind == TokenKind::New => {
                self.advance();
                self.parse_constructor_type(start)
            }
            kind if Self::is_contextual_keyword(&kind) => self.parse_type_reference_node(),
            _ => Err(self.unexpected_token("type")),
        }
    }

    /// `import("module").Name<Args>`, positioned at `import`
    fn parse_import_type(
        &mut self,
        start: Span,
        is_typeof: bool,
    ) -> Result<TypeNode, TranslateError> {
        self.require_token(&TokenKind::Import)?;
        self.require_token(&TokenKind::LParen)?;
        let module = self.parse_string()?;
        self.require_token(&TokenKind::RParen)?;

        let mut qualifier = Vec::new();
        while self.match_token(&TokenKind::Dot) {
            qualifier.push(self.parse_identifier_name()?.name);
        }
        let type_arguments = if self.check(&TokenKind::Lt) {
            self.parse_type_arguments()?
        } else {
            Vec::new()
        };

        Ok(TypeNode::Import(ImportType {
            is_typeof,
            module,
            qualifier,
            type_arguments,
            span: self.span_from(start),
        }))
    }

    fn keyword_type(&self, keyword: TypeKeyword, start: Span) -> TypeNode {
        TypeNode::Keyword(KeywordType {
            keyword,
            span: self.span_from(start),
        })
    }

    /// Try to parse a function type expression: (a: T, b: T) => R
    ///
    /// Returns `Ok(None)` and rewinds if the parenthesis turns out to be a
    /// grouping instead.
    fn try_parse_function_type(&mut self) -> Result<Option<TypeNode>, TranslateError> {
        let start = self.current.span;
        let state = self.save();

        let params = match self.parse_parameters() {
            Ok(params) => params,
            Err(_) => {
                self.rewind(state);
                return Ok(None);
            }
        };

        // Must have => after params for it to be a function type
        if !self.match_token(&TokenKind::Arrow) {
            self.rewind(state);
            return Ok(None);
        }

        let return_type = Box::new(self.parse_return_type()?);
        let span = self.span_from(start);
        Ok(Some(TypeNode::Function(FunctionType {
            signature: Signature {
                type_parameters: None,
                params,
                return_type: Some(return_type),
            },
            span,
        })))
    }

    /// `<T>(a: T) => R`, also the tail of a constructor type
    fn parse_arrow_signature(&mut self) -> Result<Signature, TranslateError> {
        let type_parameters = self.parse_optional_type_parameters()?;
        let params = self.parse_parameters()?;
        self.require_token(&TokenKind::Arrow)?;
        let return_type = Some(Box::new(self.parse_return_type()?));
        Ok(Signature {
            type_parameters,
            params,
            return_type,
        })
    }

    fn parse_constructor_type(&mut self, start: Span) -> Result<TypeNode, TranslateError> {
        self.require_token(&TokenKind::New)?;
        let signature = self.parse_arrow_signature()?;
        let span = self.span_from(start);
        Ok(TypeNode::Constructor(FunctionType { signature, span }))
    }

    fn parse_tuple_type(&mut self, start: Span) -> Result<TypeNode, TranslateError> {
        self.require_token(&TokenKind::LBracket)?;

        let mut types = vec![];
        while !self.check(&TokenKind::RBracket) && !self.is_at_end() {
            self.match_token(&TokenKind::DotDotDot);
            // Named members: [first: string, rest?: number]
            if self.is_tuple_member_label() {
                self.advance();
                self.match_token(&TokenKind::Question);
                self.require_token(&TokenKind::Colon)?;
            }
            types.push(self.parse_type()?);
            self.match_token(&TokenKind::Question);

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.require_token(&TokenKind::RBracket)?;

        let span = self.span_from(start);
        Ok(TypeNode::Tuple(TypeList { types, span }))
    }

    /// Entity name optionally followed by type arguments: `A.B<T>`
    fn parse_type_reference_node(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        let name = self.parse_entity_name()?;
        if !self.check(&TokenKind::Lt) {
            return Ok(name);
        }

        let type_arguments = self.parse_type_arguments()?;
        let span = self.span_from(start);
        Ok(TypeNode::Reference(TypeReference {
            name: Box::new(name),
            type_arguments,
            span,
        }))
    }

    /// `A`, `A.B`, `A.B.C` as nested qualified names
    fn parse_entity_name(&mut self) -> Result<TypeNode, TranslateError> {
        let start = self.current.span;
        let mut node = if self.check(&TokenKind::This) {
            self.advance();
            TypeNode::Identifier(Identifier {
                name: self.intern("this"),
                span: start,
            })
        } else {
            TypeNode::Identifier(self.parse_binding_identifier()?)
        };

        while self.match_token(&TokenKind::Dot) {
            let right = self.parse_identifier_name()?;
            node = TypeNode::Qualified(QualifiedName {
                left: Box::new(node),
                right: Box::new(TypeNode::Identifier(right)),
                span: self.span_from(start),
            });
        }

        Ok(node)
    }

    // ============ NAMES ============

    /// Identifier in a binding position; contextual keywords are allowed.
    fn parse_binding_identifier(&mut self) -> Result<Identifier, TranslateError> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.cheap_clone();
                self.advance();
                Ok(Identifier { name, span })
            }
            kind if Self::is_contextual_keyword(kind) => {
                let text = kind.keyword_text().unwrap_or_default();
                let name = self.intern(text);
                self.advance();
                Ok(Identifier { name, span })
            }
            _ => Err(self.unexpected_token("identifier")),
        }
    }

    /// Identifier after a dot or in an export list; any reserved word is allowed.
    fn parse_identifier_name(&mut self) -> Result<Identifier, TranslateError> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.cheap_clone();
                self.advance();
                Ok(Identifier { name, span })
            }
            kind => match kind.keyword_text() {
                Some(text) => {
                    let name = self.intern(text);
                    self.advance();
                    Ok(Identifier { name, span })
                }
                None => Err(self.unexpected_token("identifier")),
            },
        }
    }

    fn parse_property_name(&mut self) -> Result<PropertyName, TranslateError> {
        let span = self.current.span;
        match self.current.kind.clone() {
            TokenKind::String(value) => {
                self.advance();
                Ok(PropertyName::String(value, span))
            }
            TokenKind::Number(value) => {
                self.advance();
                Ok(PropertyName::Number(value, span))
            }
            TokenKind::LBracket => {
                self.skip_balanced()?;
                Ok(PropertyName::Computed(self.span_from(span)))
            }
            // Unreachable from outside the class, so treated like a computed name
            TokenKind::PrivateName(_) => {
                self.advance();
                Ok(PropertyName::Computed(span))
            }
            _ => Ok(PropertyName::Identifier(self.parse_identifier_name()?)),
        }
    }

    fn parse_string(&mut self) -> Result<Atom, TranslateError> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let value = value.cheap_clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected_token("string")),
        }
    }

    // ============ SKIPPING ============

    /// Skip a bracketed group starting at the current token, nested groups included.
    fn skip_balanced(&mut self) -> Result<(), TranslateError> {
        let start = self.current.span;
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(TranslateError::syntax_error_in(
                        self.file.as_deref(),
                        "Unterminated block",
                        start.line,
                        start.column,
                    ));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip an initializer expression up to the next `,` or `;`, a closing
    /// bracket, or a line break at the same nesting depth.
    fn skip_initializer(&mut self) -> Result<(), TranslateError> {
        let mut consumed = false;
        loop {
            match self.current.kind {
                TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
                | TokenKind::Eof => return Ok(()),
                _ if consumed && self.lexer.had_newline_before() => return Ok(()),
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => {
                    self.skip_balanced()?;
                }
                _ => self.advance(),
            }
            consumed = true;
        }
    }

    fn skip_body_or_semicolon(&mut self) -> Result<(), TranslateError> {
        if self.check(&TokenKind::LBrace) {
            self.skip_balanced()
        } else {
            self.expect_semicolon()
        }
    }

    fn skip_member_terminator(&mut self) {
        if !self.match_token(&TokenKind::Semicolon) {
            self.match_token(&TokenKind::Comma);
        }
    }

    fn skip_decorators(&mut self) -> Result<(), TranslateError> {
        while self.match_token(&TokenKind::At) {
            self.parse_entity_name()?;
            if self.check(&TokenKind::LParen) {
                self.skip_balanced()?;
            }
        }
        Ok(())
    }

    // ============ LOOKAHEAD ============

    fn is_index_signature(&mut self) -> bool {
        let state = self.save();
        self.advance();
        let result = self.is_identifier_like() && {
            self.advance();
            self.check(&TokenKind::Colon)
        };
        self.rewind(state);
        result
    }

    /// `{ [K in T]: X }`, optionally with `readonly` / `+readonly` / `-readonly`
    fn is_mapped_type(&mut self) -> bool {
        let state = self.save();
        self.advance();
        if matches!(self.current.kind, TokenKind::Minus | TokenKind::Invalid('+')) {
            self.advance();
        }
        self.match_token(&TokenKind::Readonly);
        let result = self.match_token(&TokenKind::LBracket) && self.is_identifier_like() && {
            self.advance();
            self.check_word("in")
        };
        self.rewind(state);
        result
    }

    fn is_tuple_member_label(&mut self) -> bool {
        if !self.is_identifier_like() {
            return false;
        }
        let state = self.save();
        self.advance();
        self.match_token(&TokenKind::Question);
        let result = self.check(&TokenKind::Colon);
        self.rewind(state);
        result
    }

    fn next_is_member_name(&mut self) -> bool {
        let next = self.peek_token().kind;
        Self::is_name_token(&next)
            || matches!(
                next,
                TokenKind::String(_)
                    | TokenKind::Number(_)
                    | TokenKind::PrivateName(_)
                    | TokenKind::LBracket
                    | TokenKind::Star
            )
    }

    fn next_is_parameter_name(&mut self) -> bool {
        let next = self.peek_token().kind;
        Self::is_name_token(&next)
            || matches!(
                next,
                TokenKind::LBrace | TokenKind::LBracket | TokenKind::DotDotDot
            )
    }

    fn next_starts_declaration(&mut self) -> bool {
        match self.peek_token().kind {
            TokenKind::Function
            | TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Enum
            | TokenKind::Namespace
            | TokenKind::Module
            | TokenKind::Abstract
            | TokenKind::Type
            | TokenKind::Import => true,
            TokenKind::Identifier(word) => word == "global",
            _ => false,
        }
    }

    fn starts_default_declaration(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Function | TokenKind::Class | TokenKind::Interface | TokenKind::Abstract
        )
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) || self.lexer.had_newline_before()
    }

    /// Reserved words that still work as ordinary names in declarations.
    fn is_contextual_keyword(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Type
                | TokenKind::Namespace
                | TokenKind::Module
                | TokenKind::Declare
                | TokenKind::Abstract
                | TokenKind::Readonly
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Static
                | TokenKind::Let
                | TokenKind::Any
        )
    }

    fn is_name_token(kind: &TokenKind) -> bool {
        matches!(kind, TokenKind::Identifier(_)) || kind.keyword_text().is_some()
    }

    // ============ HELPERS ============

    fn save(&self) -> ParserState {
        ParserState {
            checkpoint: self.lexer.checkpoint(),
            current: self.current.clone(),
            previous: self.previous.clone(),
        }
    }

    fn rewind(&mut self, state: ParserState) {
        self.lexer.restore(state.checkpoint);
        self.current = state.current;
        self.previous = state.previous;
    }

    fn peek_token(&mut self) -> Token {
        let checkpoint = self.lexer.checkpoint();
        let next = self.lexer.next_token();
        self.lexer.restore(checkpoint);
        next
    }

    fn peek_is_word(&mut self, word: &str) -> bool {
        matches!(self.peek_token().kind, TokenKind::Identifier(ref w) if w == word)
    }

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    fn require_token(&mut self, kind: &TokenKind) -> Result<(), TranslateError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_token(&format!("{:?}", kind)))
        }
    }

    fn expect_semicolon(&mut self) -> Result<(), TranslateError> {
        if self.match_token(&TokenKind::Semicolon) {
            return Ok(());
        }

        // ASI: accept if at end, before }, or after newline
        if self.is_at_end() || self.check(&TokenKind::RBrace) || self.lexer.had_newline_before() {
            return Ok(());
        }

        Err(self.unexpected_token("';'"))
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn check_word(&self, word: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(s) if s == word)
    }

    fn match_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn is_identifier_like(&self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_))
            || Self::is_contextual_keyword(&self.current.kind)
    }

    fn span_from(&self, start: Span) -> Span {
        Span::new(
            start.start,
            self.previous.span.end,
            start.line,
            start.column,
        )
    }

    fn unexpected_token(&self, expected: &str) -> TranslateError {
        TranslateError::syntax_error_in(
            self.file.as_deref(),
            format!("Unexpected {:?}, expected {}", self.current.kind, expected),
            self.current.span.line,
            self.current.span.column,
        )
    }
}
