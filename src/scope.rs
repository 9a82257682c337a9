//! Scope chain threaded through the translation walk
//!
//! A chain is an immutable, singly linked list of frames. Extending a chain
//! never touches the frames it extends, so sibling walks share their common
//! tail through `Rc`. Two frame kinds exist:
//!
//! - binding frames map a name to an already translated type (used for name
//!   lookup: `any` and `null` in the base chain, `import x = ...` aliases);
//! - path frames record a label used to name anonymous types synthesized
//!   underneath them (parameter names, `!ret`, member names).

use std::rc::Rc;

use crate::atom::CheapClone;
use crate::doc::TypeDoc;

#[derive(Debug)]
enum Frame {
    Binding { name: String, value: TypeDoc },
    Path { enter: String },
}

#[derive(Debug)]
struct Link {
    frame: Frame,
    prev: ScopeChain,
}

/// Persistent scope chain. Cloning is O(1).
#[derive(Debug, Clone, Default)]
pub struct ScopeChain(Option<Rc<Link>>);

impl CheapClone for ScopeChain {}

impl ScopeChain {
    /// The chain with no frames; names resolve to themselves under it.
    pub fn empty() -> Self {
        Self(None)
    }

    /// Chain every file is walked under: `any` and `null` resolve to `?`.
    pub fn base() -> Self {
        Self::empty()
            .bind("null", TypeDoc::unknown())
            .bind("any", TypeDoc::unknown())
    }

    /// Extend with a binding frame.
    pub fn bind(&self, name: impl Into<String>, value: TypeDoc) -> Self {
        self.push(Frame::Binding {
            name: name.into(),
            value,
        })
    }

    /// Extend with a path frame.
    pub fn enter(&self, label: impl Into<String>) -> Self {
        self.push(Frame::Path {
            enter: label.into(),
        })
    }

    fn push(&self, frame: Frame) -> Self {
        Self(Some(Rc::new(Link {
            frame,
            prev: self.cheap_clone(),
        })))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(self.0.as_deref(), |link| link.prev.0.as_deref())
    }

    /// Value of the innermost binding frame named `name`.
    pub fn lookup(&self, name: &str) -> Option<&TypeDoc> {
        self.links().find_map(|link| match &link.frame {
            Frame::Binding { name: bound, value } if bound == name => Some(value),
            _ => None,
        })
    }

    /// Dotted path of all path-frame labels, outermost first.
    ///
    /// Every label is reduced to `[A-Za-z0-9_$]`; labels left empty are
    /// dropped. `!ret` under `add` therefore becomes `add.ret`.
    pub fn build_path(&self) -> String {
        let mut parts: Vec<String> = self
            .links()
            .filter_map(|link| match &link.frame {
                Frame::Path { enter } => {
                    let part: String = enter
                        .chars()
                        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
                        .collect();
                    (!part.is_empty()).then_some(part)
                }
                Frame::Binding { .. } => None,
            })
            .collect();
        parts.reverse();
        parts.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_chain_bindings() {
        let chain = ScopeChain::base();
        assert_eq!(chain.lookup("any"), Some(&TypeDoc::unknown()));
        assert_eq!(chain.lookup("null"), Some(&TypeDoc::unknown()));
        assert_eq!(chain.lookup("Foo"), None);
        assert_eq!(chain.build_path(), "");
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let chain = ScopeChain::base()
            .bind("x", TypeDoc::from("outer"))
            .enter("f")
            .bind("x", TypeDoc::from("inner"));
        assert_eq!(chain.lookup("x"), Some(&TypeDoc::from("inner")));
    }

    #[test]
    fn test_build_path_outermost_first() {
        let chain = ScopeChain::base().enter("add").enter("!ret");
        assert_eq!(chain.build_path(), "add.ret");

        let chain = ScopeChain::empty().enter("a-b").enter("!!").enter("c$");
        assert_eq!(chain.build_path(), "ab.c$");
    }

    #[test]
    fn test_extension_leaves_parent_untouched() {
        let parent = ScopeChain::base().enter("parent");
        let child = parent.enter("child");
        assert_eq!(parent.build_path(), "parent");
        assert_eq!(child.build_path(), "parent.child");
        assert!(ScopeChain::empty().is_empty());
        assert!(!parent.is_empty());
    }
}
