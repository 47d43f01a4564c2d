//! Assignability checking and its error type.

use std::fmt;

use crate::lattice::SolidType;

/// A subtype-assignability failure.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeError {
    /// The annotated or expected type.
    pub expected: SolidType,
    /// The type of the offending value or expression.
    pub found: SolidType,
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type `{}` is not assignable to type `{}`",
            self.found, self.expected
        )
    }
}

impl std::error::Error for TypeError {}

/// Check that `found` may be assigned where `expected` is required.
pub fn check_assignable(found: &SolidType, expected: &SolidType) -> Result<(), TypeError> {
    if found.is_subtype_of(expected) {
        Ok(())
    } else {
        Err(TypeError {
            expected: expected.clone(),
            found: found.clone(),
        })
    }
}
