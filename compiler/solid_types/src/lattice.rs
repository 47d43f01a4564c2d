//! The structural type lattice.
//!
//! Every public operation runs the algebraic fast paths first (NEVER and
//! UNKNOWN absorption, mutual-subtype collapse) and only then falls through
//! to the per-variant structural `*_inner` logic. The fast paths are what
//! keep the algebra lawful: they normalize the easy shapes so the
//! structural cases only ever see genuinely mixed operands.

use std::collections::BTreeMap;
use std::fmt;

use crate::object::SolidObject;

/// A Solid static type.
///
/// `Union`/`Intersection`/`Difference` are symbolic: operands are kept as
/// written except where the fast paths collapse them. Emptiness and
/// universality are answered by [`is_empty`](SolidType::is_empty) and
/// [`is_universe`](SolidType::is_universe) rather than by normal forms.
#[derive(Clone, Debug, PartialEq)]
pub enum SolidType {
    /// Bottom: no values.
    Never,
    /// Top: all values.
    Unknown,
    /// The type of statements and absent results. Has no values, but is
    /// distinct from `Never`: it is a legal annotation, not a contradiction.
    Void,
    /// Supertype of every value-bearing type.
    Obj,
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// Unit type: exactly one value.
    Constant(SolidObject),
    /// Structural object type: required members and their types.
    Interface(BTreeMap<String, SolidType>),
    Union(Box<SolidType>, Box<SolidType>),
    Intersection(Box<SolidType>, Box<SolidType>),
    Difference(Box<SolidType>, Box<SolidType>),
}

impl SolidType {
    /// Unit-type convenience constructor.
    pub fn constant(value: SolidObject) -> SolidType {
        SolidType::Constant(value)
    }

    /// Interface convenience constructor.
    pub fn interface<I, K>(members: I) -> SolidType
    where
        I: IntoIterator<Item = (K, SolidType)>,
        K: Into<String>,
    {
        SolidType::Interface(
            members
                .into_iter()
                .map(|(k, t)| (k.into(), t))
                .collect(),
        )
    }

    // === Inclusion ===

    /// Whether `value` inhabits this type.
    pub fn includes(&self, value: &SolidObject) -> bool {
        match self {
            SolidType::Never | SolidType::Void => false,
            SolidType::Unknown | SolidType::Obj => true,
            SolidType::Null => matches!(value, SolidObject::Null),
            SolidType::Bool => matches!(value, SolidObject::Boolean(_)),
            SolidType::Int => matches!(value, SolidObject::Int16(_)),
            SolidType::Float => matches!(value, SolidObject::Float64(_)),
            SolidType::Str => matches!(value, SolidObject::Str(_)),
            SolidType::Constant(unit) => unit.identical(value),
            // Interface shapes are not inhabited by scalar runtime values.
            SolidType::Interface(_) => false,
            SolidType::Union(a, b) => a.includes(value) || b.includes(value),
            SolidType::Intersection(a, b) => a.includes(value) && b.includes(value),
            SolidType::Difference(a, b) => a.includes(value) && !b.includes(value),
        }
    }

    // === Short-Circuit Flags ===

    /// Whether this type provably has no values.
    pub fn is_empty(&self) -> bool {
        match self {
            SolidType::Never => true,
            SolidType::Union(a, b) => a.is_empty() && b.is_empty(),
            SolidType::Intersection(a, b) => {
                a.is_empty() || b.is_empty() || !a.overlaps(b)
            }
            SolidType::Difference(a, b) => a.is_empty() || a.is_subtype_of(b),
            _ => false,
        }
    }

    /// Whether this type provably contains all values.
    pub fn is_universe(&self) -> bool {
        match self {
            SolidType::Unknown => true,
            SolidType::Union(a, b) => a.is_universe() || b.is_universe(),
            SolidType::Intersection(a, b) => a.is_universe() && b.is_universe(),
            SolidType::Difference(a, b) => a.is_universe() && b.is_empty(),
            _ => false,
        }
    }

    /// Whether the two types share at least one value. Exact for builtins,
    /// constants, and their unions; conservatively `true` for interface
    /// pairs and intersections it cannot refute.
    pub fn overlaps(&self, other: &SolidType) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.is_universe() || other.is_universe() {
            return true;
        }
        match (self, other) {
            (SolidType::Union(a, b), _) => a.overlaps(other) || b.overlaps(other),
            (_, SolidType::Union(a, b)) => self.overlaps(a) || self.overlaps(b),
            (SolidType::Intersection(a, b), _) => a.overlaps(other) && b.overlaps(other),
            (_, SolidType::Intersection(a, b)) => self.overlaps(a) && self.overlaps(b),
            (SolidType::Difference(a, _), _) => a.overlaps(other),
            (_, SolidType::Difference(a, _)) => self.overlaps(a),
            (SolidType::Constant(unit), _) => other.includes(unit),
            (_, SolidType::Constant(unit)) => self.includes(unit),
            (SolidType::Interface(_), SolidType::Interface(_) | SolidType::Obj)
            | (SolidType::Obj, SolidType::Interface(_)) => true,
            (SolidType::Obj, t) | (t, SolidType::Obj) => !matches!(t, SolidType::Void),
            _ => self == other,
        }
    }

    // === Lattice Operations ===

    /// Greatest lower bound, as far as the algebra can tell.
    pub fn intersect(&self, other: &SolidType) -> SolidType {
        if self.is_empty() || other.is_empty() {
            return SolidType::Never;
        }
        if self.is_universe() {
            return other.clone();
        }
        if other.is_universe() {
            return self.clone();
        }
        if self.is_subtype_of(other) {
            return self.clone();
        }
        if other.is_subtype_of(self) {
            return other.clone();
        }
        self.intersect_inner(other)
    }

    fn intersect_inner(&self, other: &SolidType) -> SolidType {
        match (self, other) {
            // Distribute over union operands so disjoint arms drop out.
            (SolidType::Union(a, b), _) => a.intersect(other).union(&b.intersect(other)),
            (_, SolidType::Union(a, b)) => self.intersect(a).union(&self.intersect(b)),
            (SolidType::Interface(a), SolidType::Interface(b)) => {
                // Key union, member intersection.
                let mut members = a.clone();
                for (key, member) in b {
                    let merged = match a.get(key) {
                        Some(existing) => existing.intersect(member),
                        None => member.clone(),
                    };
                    members.insert(key.clone(), merged);
                }
                SolidType::Interface(members)
            }
            _ if !self.overlaps(other) => SolidType::Never,
            _ => SolidType::Intersection(Box::new(self.clone()), Box::new(other.clone())),
        }
    }

    /// Least upper bound, as far as the algebra can tell.
    pub fn union(&self, other: &SolidType) -> SolidType {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        if self.is_universe() || other.is_universe() {
            return SolidType::Unknown;
        }
        if self.is_subtype_of(other) {
            return other.clone();
        }
        if other.is_subtype_of(self) {
            return self.clone();
        }
        self.union_inner(other)
    }

    fn union_inner(&self, other: &SolidType) -> SolidType {
        match (self, other) {
            (SolidType::Interface(a), SolidType::Interface(b)) => {
                // Key intersection, member union.
                let members: BTreeMap<String, SolidType> = a
                    .iter()
                    .filter_map(|(key, member)| {
                        b.get(key).map(|theirs| (key.clone(), member.union(theirs)))
                    })
                    .collect();
                SolidType::Interface(members)
            }
            _ => SolidType::Union(Box::new(self.clone()), Box::new(other.clone())),
        }
    }

    /// Set difference: the values of `self` outside `other`.
    pub fn subtract(&self, other: &SolidType) -> SolidType {
        if self.is_empty() || other.is_universe() {
            return SolidType::Never;
        }
        if other.is_empty() {
            return self.clone();
        }
        if self.is_subtype_of(other) {
            return SolidType::Never;
        }
        if !self.overlaps(other) {
            return self.clone();
        }
        match self {
            SolidType::Union(a, b) => a.subtract(other).union(&b.subtract(other)),
            _ => SolidType::Difference(Box::new(self.clone()), Box::new(other.clone())),
        }
    }

    // === Subtyping ===

    /// Whether every value of `self` is a value of `other`.
    pub fn is_subtype_of(&self, other: &SolidType) -> bool {
        if self == other {
            return true;
        }
        if self.is_empty() {
            return true;
        }
        if other.is_empty() {
            return false;
        }
        if other.is_universe() {
            return true;
        }
        if self.is_universe() {
            return false;
        }
        if let SolidType::Intersection(c, d) = other {
            return self.is_subtype_of(c) && self.is_subtype_of(d);
        }
        if let SolidType::Union(a, b) = self {
            return a.is_subtype_of(other) && b.is_subtype_of(other);
        }
        if let SolidType::Union(c, d) = other {
            if self.is_subtype_of(c) || self.is_subtype_of(d) {
                return true;
            }
        }
        if let SolidType::Intersection(a, b) = self {
            if a.is_subtype_of(other) || b.is_subtype_of(other) {
                return true;
            }
        }
        if let SolidType::Difference(c, d) = other {
            return self.is_subtype_of(c) && !self.overlaps(d);
        }
        if let SolidType::Difference(a, _) = self {
            if a.is_subtype_of(other) {
                return true;
            }
        }
        self.is_subtype_of_structural(other)
    }

    fn is_subtype_of_structural(&self, other: &SolidType) -> bool {
        match (self, other) {
            (SolidType::Constant(unit), _) => other.includes(unit),
            (SolidType::Interface(a), SolidType::Interface(b)) => {
                // Width and depth: every supertype member exists here with a
                // compatible type.
                b.iter().all(|(key, theirs)| {
                    a.get(key).is_some_and(|ours| ours.is_subtype_of(theirs))
                })
            }
            (
                SolidType::Interface(_)
                | SolidType::Null
                | SolidType::Bool
                | SolidType::Int
                | SolidType::Float
                | SolidType::Str,
                SolidType::Obj,
            ) => true,
            _ => false,
        }
    }

    /// Extensional equality: mutual subtyping.
    pub fn equals(&self, other: &SolidType) -> bool {
        self.is_subtype_of(other) && other.is_subtype_of(self)
    }
}

impl fmt::Display for SolidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolidType::Never => f.write_str("never"),
            SolidType::Unknown => f.write_str("unknown"),
            SolidType::Void => f.write_str("void"),
            SolidType::Obj => f.write_str("obj"),
            SolidType::Null => f.write_str("null"),
            SolidType::Bool => f.write_str("bool"),
            SolidType::Int => f.write_str("int"),
            SolidType::Float => f.write_str("float"),
            SolidType::Str => f.write_str("str"),
            SolidType::Constant(unit) => write!(f, "{unit}"),
            SolidType::Interface(members) => {
                f.write_str("{")?;
                for (i, (key, member)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {member}")?;
                }
                f.write_str("}")
            }
            SolidType::Union(a, b) => write!(f, "({a} | {b})"),
            SolidType::Intersection(a, b) => write!(f, "({a} & {b})"),
            SolidType::Difference(a, b) => write!(f, "({a} - {b})"),
        }
    }
}
