//! Syntax tree → Tern document translation
//!
//! The walk has three mutually recursive parts:
//!
//! - the container walker visits the members of a file, namespace body,
//!   interface, class or object type and merges what each contributes;
//! - the type evaluator maps one type expression to a [`TypeDoc`];
//! - `flatten` turns a structural result into a name by registering it in
//!   the definitions table, for positions that need a type string.
//!
//! Every walk carries a [`ScopeChain`] which supplies name bindings and the
//! path used to name synthesized definitions.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::{
    Declaration, ImportClause, ModuleReference, Signature, SourceFile, TypeKeyword, TypeNode,
};
use crate::atom::CheapClone;
use crate::doc::{Definitions, Document, TYPE_KEY, TypeDoc, TypeMap, add_member};
use crate::error::TranslateError;
use crate::scope::ScopeChain;

/// Translation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Also translate interfaces, classes, enums, variables and
    /// `import x = ...` aliases. Off by default, where those declarations
    /// are recognized but contribute nothing.
    pub full_declarations: bool,
}

/// What one declaration adds to its container.
enum Contribution {
    Member { name: String, doc: TypeDoc },
    Members(Vec<(String, TypeDoc)>),
    /// Constructor descriptor for the enclosing class
    ConstructorSignature(String),
    /// Chain to use for the remaining siblings
    Alias(ScopeChain),
    Nothing,
}

/// Per-translation state. The definitions table lives here, so independent
/// translations never share anything.
pub struct Translator<'o> {
    options: &'o TranslateOptions,
    definitions: Definitions,
}

impl<'o> Translator<'o> {
    pub fn new(options: &'o TranslateOptions) -> Self {
        Self {
            options,
            definitions: Definitions::new(),
        }
    }

    /// Translate a parsed file into a document named after the file.
    pub fn translate_file(&mut self, file: &SourceFile) -> Result<Document, TranslateError> {
        debug!(
            file = %file.name,
            members = file.members.len(),
            full = self.options.full_declarations,
            "translating declaration file"
        );
        self.definitions = Definitions::new();

        let members = self.walk_container(&file.members, &ScopeChain::base(), None)?;
        let definitions = std::mem::take(&mut self.definitions);

        debug!(
            file = %file.name,
            members = members.len(),
            definitions = definitions.len(),
            "translation finished"
        );
        Ok(Document::new(members, file.name.as_str(), definitions))
    }

    // ============ CONTAINERS ============

    fn walk_container(
        &mut self,
        members: &[Declaration],
        chain: &ScopeChain,
        mut class: Option<&mut TypeMap>,
    ) -> Result<TypeMap, TranslateError> {
        let mut data = TypeMap::default();
        let mut chain = chain.cheap_clone();

        for member in members {
            let routed = class.is_some() && self.is_static(member);
            match self.walk_member(member, &chain)? {
                Contribution::Member { name, doc } => {
                    let target = match (routed, class.as_deref_mut()) {
                        (true, Some(cls)) => cls,
                        _ => &mut data,
                    };
                    add_member(target, &name, doc);
                }
                Contribution::Members(entries) => {
                    let target = match (routed, class.as_deref_mut()) {
                        (true, Some(cls)) => cls,
                        _ => &mut data,
                    };
                    for (name, doc) in entries {
                        add_member(target, &name, doc);
                    }
                }
                Contribution::ConstructorSignature(signature) => {
                    if let Some(cls) = class.as_deref_mut() {
                        if !cls.contains_key(TYPE_KEY) {
                            cls.insert(TYPE_KEY.to_string(), TypeDoc::Name(signature));
                        }
                    }
                }
                Contribution::Alias(extended) => chain = extended,
                Contribution::Nothing => {}
            }
        }

        Ok(data)
    }

    fn walk_member(
        &mut self,
        member: &Declaration,
        chain: &ScopeChain,
    ) -> Result<Contribution, TranslateError> {
        let full = self.options.full_declarations;

        match member {
            Declaration::Function(func) => {
                let Some(id) = &func.id else {
                    trace!("skipping anonymous function declaration");
                    return Ok(Contribution::Nothing);
                };
                let descriptor = self.signature(&func.signature, &chain.enter(id.name.as_str()))?;
                Ok(Contribution::Member {
                    name: id.name.to_string(),
                    doc: TypeDoc::Name(descriptor),
                })
            }
            Declaration::Module(module) => {
                let body = match &module.body {
                    Some(body) => self.walk_container(body, chain, None)?,
                    None => TypeMap::default(),
                };
                Ok(Contribution::Member {
                    name: module.name.text(),
                    doc: TypeDoc::Object(body),
                })
            }
            Declaration::PropertySignature(prop) => {
                let Some(name) = prop.name.text() else {
                    trace!("skipping computed property");
                    return Ok(Contribution::Nothing);
                };
                let doc = self.walk_annotation(prop.type_annotation.as_deref(), &chain.enter(name))?;
                Ok(Contribution::Member {
                    name: name.to_string(),
                    doc,
                })
            }
            Declaration::MethodSignature(method) => {
                let Some(name) = method.name.text() else {
                    trace!("skipping computed method");
                    return Ok(Contribution::Nothing);
                };
                let descriptor = self.signature(&method.signature, &chain.enter(name))?;
                Ok(Contribution::Member {
                    name: name.to_string(),
                    doc: TypeDoc::Name(descriptor),
                })
            }

            Declaration::Interface(iface) if full => {
                let body = self.walk_container(&iface.members, chain, None)?;
                Ok(Contribution::Member {
                    name: iface.id.name.to_string(),
                    doc: TypeDoc::Object(body),
                })
            }
            Declaration::Class(class) if full => {
                let Some(id) = &class.id else {
                    trace!("skipping anonymous class declaration");
                    return Ok(Contribution::Nothing);
                };
                let mut inner = TypeMap::default();
                let prototype = self.walk_container(&class.members, chain, Some(&mut inner))?;
                inner.insert("prototype".to_string(), TypeDoc::Object(prototype));
                Ok(Contribution::Member {
                    name: id.name.to_string(),
                    doc: TypeDoc::Object(inner),
                })
            }
            Declaration::Constructor(ctor) if full => Ok(Contribution::ConstructorSignature(
                self.signature(&ctor.signature, chain)?,
            )),
            Declaration::Enum(decl) if full => Ok(Contribution::Member {
                name: decl.id.name.to_string(),
                doc: TypeDoc::from("number"),
            }),
            Declaration::Variable(stmt) if full => {
                let mut entries = Vec::with_capacity(stmt.declarations.len());
                for declarator in &stmt.declarations {
                    let Some(id) = &declarator.id else {
                        continue;
                    };
                    let doc = self.walk_annotation(
                        declarator.type_annotation.as_ref(),
                        &chain.enter(id.name.as_str()),
                    )?;
                    entries.push((id.name.to_string(), doc));
                }
                Ok(Contribution::Members(entries))
            }
            Declaration::Import(import) if full => match &import.clause {
                ImportClause::Equals { name, reference } => {
                    let value = match reference {
                        ModuleReference::Entity(entity) => self.flatten(entity, chain)?,
                        ModuleReference::External(module) => module.to_string(),
                    };
                    trace!(alias = %name.name, value = %value, "binding import alias");
                    Ok(Contribution::Alias(
                        chain.bind(name.name.as_str(), TypeDoc::Name(value)),
                    ))
                }
                ImportClause::Module { .. } => Ok(Contribution::Nothing),
            },

            Declaration::Import(_)
            | Declaration::Interface(_)
            | Declaration::Class(_)
            | Declaration::Enum(_)
            | Declaration::Variable(_)
            | Declaration::Constructor(_)
            | Declaration::ExportAssignment(_)
            | Declaration::CallSignature(_)
            | Declaration::ConstructSignature(_)
            | Declaration::IndexSignature(_)
            | Declaration::Empty(_)
            | Declaration::EndOfFile(_) => {
                trace!(kind = %member.kind(), "skipping declaration");
                Ok(Contribution::Nothing)
            }

            Declaration::TypeAlias(_) | Declaration::Export(_) | Declaration::NamespaceExport(_) => {
                Err(TranslateError::unknown_declaration(member.kind()))
            }
        }
    }

    /// Whether a class member goes on the class itself instead of its prototype.
    fn is_static(&self, member: &Declaration) -> bool {
        self.options.full_declarations && member.modifiers().static_
    }

    // ============ TYPES ============

    fn walk_type(&mut self, node: &TypeNode, chain: &ScopeChain) -> Result<TypeDoc, TranslateError> {
        match node {
            TypeNode::Identifier(id) => Ok(chain
                .lookup(id.name.as_str())
                .cloned()
                .unwrap_or_else(|| TypeDoc::from(id.name.as_str()))),
            // The right-hand name is never looked up
            TypeNode::Qualified(name) => {
                let left = self.flatten(&name.left, chain)?;
                let right = self.flatten(&name.right, &ScopeChain::empty())?;
                Ok(TypeDoc::Name(format!("{}.{}", left, right)))
            }
            TypeNode::Object(object) => Ok(TypeDoc::Object(self.walk_container(
                &object.members,
                chain,
                None,
            )?)),
            TypeNode::Array(array) => {
                let element = self.flatten(&array.element_type, chain)?;
                Ok(TypeDoc::Name(format!("[{}]", element)))
            }
            TypeNode::Function(func) => Ok(TypeDoc::Name(self.signature(&func.signature, chain)?)),
            TypeNode::StringLiteral(_) => Ok(TypeDoc::from("string")),
            TypeNode::Keyword(keyword) => Ok(TypeDoc::from(match keyword.keyword {
                TypeKeyword::String => "string",
                TypeKeyword::Number => "number",
                TypeKeyword::Boolean => "bool",
                TypeKeyword::Any | TypeKeyword::Void => "?",
            })),
            TypeNode::Reference(_) => Ok(TypeDoc::unknown()),
            TypeNode::Query(query) => self.walk_type(&query.name, &ScopeChain::empty()),
            TypeNode::Literal(literal) => Ok(TypeDoc::from(literal.text.as_str())),
            TypeNode::Constructor(_)
            | TypeNode::Union(_)
            | TypeNode::Intersection(_)
            | TypeNode::Tuple(_)
            | TypeNode::IndexedAccess(_)
            | TypeNode::Operator(_)
            | TypeNode::Predicate(_)
            | TypeNode::Conditional(_)
            | TypeNode::Mapped(_)
            | TypeNode::TemplateLiteral(_)
            | TypeNode::Import(_) => Err(TranslateError::unrecognized_type(node.kind())),
        }
    }

    fn walk_annotation(
        &mut self,
        node: Option<&TypeNode>,
        chain: &ScopeChain,
    ) -> Result<TypeDoc, TranslateError> {
        match node {
            Some(node) => self.walk_type(node, chain),
            None => Ok(TypeDoc::unknown()),
        }
    }

    /// Evaluate `node` and name the result if it is structural.
    fn flatten(&mut self, node: &TypeNode, chain: &ScopeChain) -> Result<String, TranslateError> {
        match self.walk_type(node, chain)? {
            TypeDoc::Name(name) => Ok(name),
            doc @ TypeDoc::Object(_) => {
                let key = self.definitions.register(&chain.build_path(), doc);
                trace!(name = %key, "registered definition");
                Ok(key)
            }
        }
    }

    fn flatten_annotation(
        &mut self,
        node: Option<&TypeNode>,
        chain: &ScopeChain,
    ) -> Result<String, TranslateError> {
        match node {
            Some(node) => self.flatten(node, chain),
            None => Ok("?".to_string()),
        }
    }

    /// `fn(a: T, b?: U) -> R`. The return suffix is left out when the return
    /// annotation is missing or is `void`.
    fn signature(&mut self, signature: &Signature, chain: &ScopeChain) -> Result<String, TranslateError> {
        let mut descriptor = String::from("fn(");

        for (i, param) in signature.params.iter().enumerate() {
            if i > 0 {
                descriptor.push_str(", ");
            }
            let name = param.name.text();
            let ty = self.flatten_annotation(param.type_annotation.as_ref(), &chain.enter(name))?;
            descriptor.push_str(name);
            if param.optional {
                descriptor.push('?');
            }
            descriptor.push_str(": ");
            descriptor.push_str(&ty);
        }
        descriptor.push(')');

        if let Some(ret) = signature.return_type.as_deref() {
            if !ret.is_void() {
                let ret = self.flatten(ret, &chain.enter("!ret"))?;
                descriptor.push_str(" -> ");
                descriptor.push_str(&ret);
            }
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomTable;
    use crate::parser::Parser;

    #[allow(clippy::unwrap_used)]
    fn translate(source: &str, options: &TranslateOptions) -> Document {
        let mut atoms = AtomTable::new();
        let file = Parser::new(source, &mut atoms)
            .parse_source_file("test")
            .unwrap();
        Translator::new(options).translate_file(&file).unwrap()
    }

    #[test]
    fn test_translator_resets_definitions_between_files() {
        let options = TranslateOptions::default();
        let mut atoms = AtomTable::new();
        let file = Parser::new("declare function f(): { a: number };", &mut atoms)
            .parse_source_file("test")
            .ok();
        let Some(file) = file else {
            panic!("parse failed");
        };
        let mut translator = Translator::new(&options);
        let first = translator.translate_file(&file).ok();
        let second = translator.translate_file(&file).ok();
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(
            second.as_ref().and_then(|d| d.definitions()).map(|d| d.len()),
            Some(1)
        );
    }

    #[test]
    fn test_static_routing_only_in_full_mode() {
        let source = "declare class A { static make(): A; size: number; }";
        let doc = translate(source, &TranslateOptions::default());
        assert!(doc.get("A").is_none());

        let full = TranslateOptions {
            full_declarations: true,
        };
        let doc = translate(source, &full);
        let class = doc.get("A").and_then(TypeDoc::as_object);
        assert_eq!(
            class.and_then(|c| c.get("make")),
            Some(&TypeDoc::from("fn() -> A"))
        );
        let prototype = class
            .and_then(|c| c.get("prototype"))
            .and_then(TypeDoc::as_object);
        assert_eq!(prototype.and_then(|p| p.get("size")), Some(&TypeDoc::from("number")));
        assert!(prototype.is_some_and(|p| !p.contains_key("make")));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: TranslateOptions = serde_json::from_str("{}").unwrap_or_default();
        assert!(!options.full_declarations);
        let options: TranslateOptions =
            serde_json::from_str(r#"{"full_declarations":true}"#).unwrap_or_default();
        assert!(options.full_declarations);
    }
}
