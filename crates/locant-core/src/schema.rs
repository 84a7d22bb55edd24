//! `JsonSchema`: the trait `#[derive(JsonSchema)]` implements for a struct.
//!
//! Each member's parse/serialize call is monomorphized directly into the
//! generated `parse`/`write` bodies as a concrete function call -- not
//! stored in a homogeneous table of function pointers or trait objects,
//! since sibling members routinely have unrelated concrete types (an
//! `f64` next to a `Vec<Tweet>` next to an `Option<String>`). `MEMBERS`
//! below exists only for the metadata every member *does* share: its name
//! and hash, used for the unknown-member policy and by the path navigator.

use crate::error::Result;
use crate::locations::ClassLocations;
use crate::policy::ParseOptions;

/// The name and precomputed hash of one schema member, used for the
/// unknown-member check and for `path`-based lookups. Does not carry the
/// member's Rust type -- see the module doc.
#[derive(Debug, Clone, Copy)]
pub struct MemberMeta {
    /// The member's JSON name (after any `#[locant(rename = "...")]`).
    pub name: &'static str,
    /// `hash::name_hash(name.as_bytes())`, precomputed at derive time.
    pub hash: u32,
}

/// Implemented by `#[derive(JsonSchema)]` for every tagged struct.
///
/// `parse` receives an already-built `ClassLocations` (one forward scan over
/// the object's members, done once by `class::discover_positions`) indexed
/// by each member's schema position, so `require`/`require_as_string` read
/// their member with a single array access rather than re-scanning the
/// document or a name-keyed table per field.
pub trait JsonSchema: Sized {
    /// Name and hash of every declared member, in declaration order.
    const MEMBERS: &'static [MemberMeta];

    /// Construct `Self` from a class's discovered member locations.
    fn parse(locations: &ClassLocations<'_>, options: ParseOptions) -> Result<Self>;

    /// Write `Self` as a JSON object into `sink`.
    fn write(&self, sink: &mut dyn crate::ser::Sink) -> std::fmt::Result;
}
