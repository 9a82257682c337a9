//! Interned names for the syntax tree.
//!
//! Declaration files repeat the same handful of names (`string`, `number`,
//! parameter names, namespace names) many times. The lexer interns every
//! identifier and string literal through an [`AtomTable`] so that identical
//! text shares a single `Rc<str>` allocation for the lifetime of one parse.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Marker trait for types whose `clone()` is O(1).
///
/// Use `cheap_clone()` instead of `clone()` for these types so that the
/// intent is visible at the call site: only a reference count is bumped.
pub trait CheapClone: Clone {
    fn cheap_clone(&self) -> Self {
        self.clone()
    }
}

impl<T: ?Sized> CheapClone for Rc<T> {}

/// An interned, reference-counted string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Rc<str>);

impl CheapClone for Atom {}

impl Atom {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for Atom {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom(s.into())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom(s.into())
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicating store for [`Atom`]s.
///
/// One table is created per parse; the tree produced by the parser holds
/// cheap clones of the atoms stored here.
pub struct AtomTable {
    /// Keyed by `Box<str>` to avoid a second indirection through `Rc`.
    atoms: FxHashMap<Box<str>, Atom>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self {
            atoms: FxHashMap::default(),
        }
    }

    /// Table pre-seeded with the names every declaration file uses.
    pub fn with_common_names() -> Self {
        let mut table = Self::new();
        for name in COMMON_NAMES {
            table.get_or_insert(name);
        }
        table
    }

    /// Get the shared atom for `s`, inserting it on first use.
    pub fn get_or_insert(&mut self, s: &str) -> Atom {
        if let Some(existing) = self.atoms.get(s) {
            return existing.cheap_clone();
        }
        let atom = Atom::from(s);
        self.atoms.insert(s.into(), atom.cheap_clone());
        atom
    }

    pub fn get(&self, s: &str) -> Option<Atom> {
        self.atoms.get(s).map(CheapClone::cheap_clone)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}

const COMMON_NAMES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "undefined",
    "object",
    "symbol",
    "Function",
    "Object",
    "Array",
    "Promise",
    "callback",
    "options",
    "value",
    "name",
];
