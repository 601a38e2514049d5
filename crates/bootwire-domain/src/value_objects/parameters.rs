//! Invocation arguments

use std::slice;

/// Arguments captured at process start
///
/// Bound as its own type rather than as `Vec<String>`, so an application
/// binding of a plain string list never collides with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Parameters(Vec<String>);

impl Parameters {
    /// Capture `args` in order
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Arguments as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no arguments were given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in invocation order
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Take ownership of the arguments
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Parameters {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
