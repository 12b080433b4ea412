//! Case paths: extracting and embedding one variant of an action enum.

use std::fmt;

/// Extracts a child value from one variant of a parent enum and embeds it back.
///
/// Built by hand from two functions, or with the [`case_path!`](crate::case_path)
/// macro for tuple variants holding a single value.
pub struct CasePath<P, C> {
    extract: fn(P) -> Result<C, P>,
    embed: fn(C) -> P,
}

impl<P, C> CasePath<P, C> {
    pub fn new(extract: fn(P) -> Result<C, P>, embed: fn(C) -> P) -> Self {
        Self { extract, embed }
    }

    /// The child value if `parent` is this case, otherwise `parent` unchanged.
    pub fn extract(&self, parent: P) -> Result<C, P> {
        (self.extract)(parent)
    }

    pub fn embed(&self, child: C) -> P {
        (self.embed)(child)
    }

    pub(crate) fn embedder(&self) -> fn(C) -> P {
        self.embed
    }
}

impl<P, C> Clone for CasePath<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for CasePath<P, C> {}

impl<P, C> fmt::Debug for CasePath<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CasePath")
    }
}

/// Build a [`CasePath`](crate::architecture::CasePath) for a single-field tuple variant.
///
/// ```
/// use casestudies::case_path;
///
/// #[derive(Debug, PartialEq)]
/// enum Parent { Child(u8), Other }
///
/// let path = case_path!(Parent::Child);
/// assert_eq!(path.extract(Parent::Child(3)), Ok(3));
/// assert_eq!(path.extract(Parent::Other), Err(Parent::Other));
/// assert_eq!(path.embed(4), Parent::Child(4));
/// ```
#[macro_export]
macro_rules! case_path {
    ($($variant:ident)::+) => {
        $crate::architecture::CasePath::new(
            |parent| match parent {
                $($variant)::+(child) => Ok(child),
                #[allow(unreachable_patterns)]
                other => Err(other),
            },
            $($variant)::+,
        )
    };
}
