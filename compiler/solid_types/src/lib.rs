//! Structural type lattice for the Solid compiler.
//!
//! [`SolidType`] models types as an algebra: builtins, unit types over
//! concrete [`SolidObject`] values, structural interfaces, and symbolic
//! union/intersection/difference. The lattice operations answer the
//! questions semantic validation asks — `includes`, `intersect`, `union`,
//! `subtract`, `is_subtype_of` — with NEVER at the bottom and UNKNOWN at
//! the top.

mod error;
mod lattice;
mod object;

pub use error::{check_assignable, TypeError};
pub use lattice::SolidType;
pub use object::SolidObject;
