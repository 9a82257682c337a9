//! Tern type documents
//!
//! A translated type is either a type string (`"number"`, `"fn(a: string)"`,
//! `"mylib.Options"`) or a structural mapping of member names to nested
//! types. Mappings keep insertion order so output is deterministic and
//! follows declaration order.

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

/// Member name → type, in declaration order
pub type TypeMap = IndexMap<String, TypeDoc, BuildHasherDefault<FxHasher>>;

/// Type of a structural mapping when it is also callable or aliased
pub const TYPE_KEY: &str = "!type";
/// Name of the translated library
pub const NAME_KEY: &str = "!name";
/// Definitions synthesized for anonymous structural types
pub const DEFINE_KEY: &str = "!define";

/// The output value for one type position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDoc {
    Name(String),
    Object(TypeMap),
}

impl TypeDoc {
    /// Placeholder for a type that could not be resolved.
    pub fn unknown() -> Self {
        TypeDoc::Name("?".to_string())
    }

    pub fn object() -> Self {
        TypeDoc::Object(TypeMap::default())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            TypeDoc::Name(name) => Some(name),
            TypeDoc::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypeMap> {
        match self {
            TypeDoc::Name(_) => None,
            TypeDoc::Object(map) => Some(map),
        }
    }
}

impl From<&str> for TypeDoc {
    fn from(name: &str) -> Self {
        TypeDoc::Name(name.to_string())
    }
}

impl From<String> for TypeDoc {
    fn from(name: String) -> Self {
        TypeDoc::Name(name)
    }
}

impl From<TypeMap> for TypeDoc {
    fn from(map: TypeMap) -> Self {
        TypeDoc::Object(map)
    }
}

/// Merge `value` into `map` under `name`.
///
/// A name written fully in double quotes (`"jquery"`) is stored without
/// them. When the name is already present:
///
/// - mapping + string: the string becomes the mapping's `!type` unless one is set;
/// - string + mapping: the mapping replaces the string and keeps it as `!type`;
/// - mapping + mapping: shallow merge, later members win;
/// - string + string: the first definition is kept.
pub fn add_member(map: &mut TypeMap, name: &str, value: TypeDoc) {
    let name = strip_quotes(name);
    let entry = match map.entry(name.to_string()) {
        Entry::Vacant(vacant) => {
            vacant.insert(value);
            return;
        }
        Entry::Occupied(occupied) => occupied.into_mut(),
    };

    match value {
        TypeDoc::Name(name) => {
            if let TypeDoc::Object(known) = entry {
                if !known.contains_key(TYPE_KEY) {
                    known.insert(TYPE_KEY.to_string(), TypeDoc::Name(name));
                }
            }
        }
        TypeDoc::Object(mut members) => match entry {
            TypeDoc::Object(known) => known.extend(members),
            TypeDoc::Name(_) => {
                let previous = std::mem::replace(entry, TypeDoc::object());
                members.insert(TYPE_KEY.to_string(), previous);
                *entry = TypeDoc::Object(members);
            }
        },
    }
}

fn strip_quotes(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(name)
}

/// Registry of names synthesized for anonymous structural types.
#[derive(Debug, Default)]
pub struct Definitions {
    entries: TypeMap,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `doc` under the first free key among `base`, `base0`, `base1`, ...
    /// and return that key.
    pub fn register(&mut self, base: &str, doc: TypeDoc) -> String {
        let mut key = base.to_string();
        let mut suffix = 0usize;
        while self.entries.contains_key(&key) {
            key = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.entries.insert(key.clone(), doc);
        key
    }

    pub fn get(&self, key: &str) -> Option<&TypeDoc> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> TypeMap {
        self.entries
    }
}

/// A translated declaration file.
///
/// Serializes as one JSON object: the file's members, then `!name`, then
/// `!define` when any definitions were synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    members: TypeMap,
}

impl Document {
    pub(crate) fn new(mut members: TypeMap, name: &str, definitions: Definitions) -> Self {
        members.insert(NAME_KEY.to_string(), TypeDoc::from(name));
        if !definitions.is_empty() {
            members.insert(
                DEFINE_KEY.to_string(),
                TypeDoc::Object(definitions.into_map()),
            );
        }
        Self { members }
    }

    /// All top-level entries, `!name` and `!define` included.
    pub fn members(&self) -> &TypeMap {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&TypeDoc> {
        self.members.get(name)
    }

    pub fn name(&self) -> Option<&str> {
        self.members.get(NAME_KEY).and_then(TypeDoc::as_name)
    }

    pub fn definitions(&self) -> Option<&TypeMap> {
        self.members.get(DEFINE_KEY).and_then(TypeDoc::as_object)
    }

    pub fn to_json(&self) -> Result<String, TranslateError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TranslateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, TranslateError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, &str)]) -> TypeDoc {
        TypeDoc::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), TypeDoc::from(*v)))
                .collect(),
        )
    }

    #[test]
    fn test_add_member_inserts_and_strips_quotes() {
        let mut map = TypeMap::default();
        add_member(&mut map, "\"jquery\"", TypeDoc::from("fn()"));
        add_member(&mut map, "\"partial", TypeDoc::from("number"));
        assert_eq!(map.get("jquery"), Some(&TypeDoc::from("fn()")));
        assert_eq!(map.get("\"partial"), Some(&TypeDoc::from("number")));
    }

    #[test]
    fn test_add_member_string_onto_object_sets_type() {
        let mut map = TypeMap::default();
        add_member(&mut map, "f", object(&[("x", "number")]));
        add_member(&mut map, "f", TypeDoc::from("fn()"));
        add_member(&mut map, "f", TypeDoc::from("fn(a: number)"));
        assert_eq!(
            map.get("f"),
            Some(&object(&[("x", "number"), ("!type", "fn()")]))
        );
    }

    #[test]
    fn test_add_member_object_onto_string_keeps_type() {
        let mut map = TypeMap::default();
        add_member(&mut map, "f", TypeDoc::from("fn()"));
        add_member(&mut map, "f", object(&[("x", "number")]));
        assert_eq!(
            map.get("f"),
            Some(&object(&[("x", "number"), ("!type", "fn()")]))
        );
    }

    #[test]
    fn test_add_member_objects_merge_later_wins() {
        let mut map = TypeMap::default();
        add_member(&mut map, "ns", object(&[("a", "number"), ("b", "string")]));
        add_member(&mut map, "ns", object(&[("b", "bool"), ("c", "?")]));
        assert_eq!(
            map.get("ns"),
            Some(&object(&[("a", "number"), ("b", "bool"), ("c", "?")]))
        );
    }

    #[test]
    fn test_add_member_first_string_wins() {
        let mut map = TypeMap::default();
        add_member(&mut map, "f", TypeDoc::from("fn()"));
        add_member(&mut map, "f", TypeDoc::from("fn(a: number)"));
        assert_eq!(map.get("f"), Some(&TypeDoc::from("fn()")));
    }

    #[test]
    fn test_register_suffixes() {
        let mut defs = Definitions::new();
        assert_eq!(defs.register("f.ret", object(&[("a", "number")])), "f.ret");
        assert_eq!(defs.register("f.ret", object(&[("b", "number")])), "f.ret0");
        assert_eq!(defs.register("f.ret", object(&[("c", "number")])), "f.ret1");
        assert_eq!(defs.len(), 3);
        assert!(defs.get("f.ret0").is_some());
    }

    #[test]
    fn test_document_layout() {
        let mut members = TypeMap::default();
        members.insert("f".to_string(), TypeDoc::from("fn()"));
        let doc = Document::new(members.clone(), "lib", Definitions::new());
        assert_eq!(doc.name(), Some("lib"));
        assert!(doc.definitions().is_none());
        assert_eq!(doc.to_json().ok().as_deref(), Some(r#"{"f":"fn()","!name":"lib"}"#));

        let mut defs = Definitions::new();
        defs.register("", object(&[("x", "number")]));
        let doc = Document::new(members, "lib", defs);
        assert_eq!(
            doc.to_json().ok().as_deref(),
            Some(r#"{"f":"fn()","!name":"lib","!define":{"":{"x":"number"}}}"#)
        );
    }
}
