use std::{
    fmt::Display,
    ops::Deref,
};

use itertools::Itertools;

/// Append-only list of diagnostics collected during a single pass over the input.
///
/// Both front-end stages keep going after an error, so they hand back all of
/// their diagnostics at once instead of bailing out on the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics<E>(Vec<E>);

impl<E> Default for Diagnostics<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E> Diagnostics<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: E) {
        self.0.push(error)
    }
}

impl<E> From<E> for Diagnostics<E> {
    fn from(e: E) -> Self {
        Self(vec![e])
    }
}

impl<E> Deref for Diagnostics<E> {
    type Target = [E];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> IntoIterator for Diagnostics<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'d, E> IntoIterator for &'d Diagnostics<E> {
    type Item = &'d E;
    type IntoIter = std::slice::Iter<'d, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<E: Display> Display for Diagnostics<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}
