//! Expression trees made of atoms and lists.
use delegate::delegate;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;
use std::hash::{Hash, Hasher};

use crate::printer::{to_string, to_string_indented, Print, Printer};

/// An s-expression node: either an atom or a list of nodes.
///
/// Trees own their children exclusively. Reading a tree from several threads
/// is fine; appending requires `&mut` access and therefore exclusive access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sexp {
    Atom(SmolStr),
    List(List),
}

/// Error when using a node in a way that does not fit its variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("cannot {operation} an atomic expression")]
    NotAList { operation: &'static str },
    #[error("index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

impl Sexp {
    pub fn atom(value: impl Into<SmolStr>) -> Self {
        Sexp::Atom(value.into())
    }

    /// Creates an empty list node.
    pub fn list() -> Self {
        Sexp::List(List::new())
    }

    #[inline]
    pub fn is_atomic(&self) -> bool {
        matches!(self, Sexp::Atom(_))
    }

    /// Length of the longest path from this node down to a leaf.
    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            Sexp::Atom(_) => 0,
            Sexp::List(list) => list.depth(),
        }
    }

    pub fn as_atom(&self) -> Option<&SmolStr> {
        match self {
            Sexp::Atom(atom) => Some(atom),
            Sexp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Sexp::Atom(_) => None,
            Sexp::List(list) => Some(list),
        }
    }

    fn list_or(&self, operation: &'static str) -> Result<&List, NodeError> {
        self.as_list().ok_or(NodeError::NotAList { operation })
    }

    /// Number of direct children.
    pub fn len(&self) -> Result<usize, NodeError> {
        Ok(self.list_or("take the length of")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, NodeError> {
        Ok(self.list_or("take the length of")?.is_empty())
    }

    /// The child at `index`.
    pub fn get(&self, index: usize) -> Result<&Sexp, NodeError> {
        let list = self.list_or("index into")?;
        list.get(index).ok_or(NodeError::OutOfBounds {
            index,
            len: list.len(),
        })
    }

    /// Appends `child` to this list.
    pub fn add(&mut self, child: impl Into<Sexp>) -> Result<(), NodeError> {
        match self {
            Sexp::Atom(_) => Err(NodeError::NotAList {
                operation: "add a child to",
            }),
            Sexp::List(list) => {
                list.push(child);
                Ok(())
            }
        }
    }

    /// Iterates over the direct children in insertion order.
    pub fn iter(&self) -> Result<std::slice::Iter<'_, Sexp>, NodeError> {
        Ok(self.list_or("iterate over")?.iter())
    }

    /// Renders the node with each nested non-empty list on its own line.
    pub fn to_indented_string(&self) -> String {
        to_string_indented(self)
    }
}

impl std::fmt::Display for Sexp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_string(self))
    }
}

impl Print for Sexp {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Sexp::Atom(atom) => printer.atom(atom),
            Sexp::List(list) => printer.print(list),
        }
    }
}

impl From<SmolStr> for Sexp {
    fn from(value: SmolStr) -> Self {
        Self::Atom(value)
    }
}

impl From<String> for Sexp {
    fn from(value: String) -> Self {
        Self::Atom(value.into())
    }
}

impl From<&str> for Sexp {
    fn from(value: &str) -> Self {
        Self::Atom(value.into())
    }
}

impl From<List> for Sexp {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl Arbitrary for Sexp {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        // Bare atoms only, so that the literal rendering lexes back unchanged.
        let leaf = "[a-zA-Z0-9_+*/<>=!?.-]{1,8}".prop_map(Sexp::from);
        leaf.prop_recursive(8, 256, 10, |inner| {
            proptest::collection::vec(inner, 0..10)
                .prop_map(|items| Sexp::List(items.into_iter().collect()))
        })
        .boxed()
    }
}

/// An ordered sequence of child nodes that keeps track of its depth.
///
/// The depth is 0 for an empty list and otherwise one more than the deepest
/// child. It is updated on every [`List::push`] and never shrinks, since
/// children cannot be removed or mutated in place.
///
/// Dropping a list does not recurse, so trees of any depth can be released.
/// Printing, comparing, hashing and cloning still recurse once per level.
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Vec<Sexp>,
    depth: usize,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn push(&mut self, child: impl Into<Sexp>) {
        let child = child.into();
        self.depth = self.depth.max(child.depth() + 1);
        self.items.push(child);
    }

    pub fn as_slice(&self) -> &[Sexp] {
        &self.items
    }

    pub fn into_vec(mut self) -> Vec<Sexp> {
        std::mem::take(&mut self.items)
    }

    /// Renders the list with each nested non-empty list on its own line.
    pub fn to_indented_string(&self) -> String {
        to_string_indented(self)
    }

    delegate! {
        to self.items {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn get(&self, index: usize) -> Option<&Sexp>;
            pub fn iter(&self) -> std::slice::Iter<'_, Sexp>;
        }
    }
}

impl Drop for List {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.items);
        while let Some(child) = pending.pop() {
            if let Sexp::List(mut list) = child {
                pending.append(&mut list.items);
            }
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for List {}

impl Hash for List {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl std::fmt::Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_string(self))
    }
}

impl Print for List {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.list(|printer| printer.print(&self.items))
    }
}

impl<T: Into<Sexp>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

impl<T: Into<Sexp>> Extend<T> for List {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Sexp;
    type IntoIter = std::slice::Iter<'a, Sexp>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Sexp;
    type IntoIter = std::vec::IntoIter<Sexp>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
