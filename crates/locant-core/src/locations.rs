//! The Locations Table: a per-parse cache mapping member names to their
//! value slices, built by a single forward scan over a class's members.

use smallvec::SmallVec;

use crate::hash::name_hash;
use crate::slice::ValueSlice;

/// One located member: its name, name hash, and value slice.
///
/// `SmallVec`-backed rather than the fixed-arity array the original design
/// used (the C++ original sizes this at compile time from the number of
/// schema members via a variadic template -- Rust has no equivalent
/// generic-over-arity mechanism short of per-arity macro expansion). 16
/// inline slots cover the large majority of real-world object schemas
/// without a heap allocation; wider schemas spill to the heap
/// transparently.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    hash: u32,
    name: &'a [u8],
    value: ValueSlice<'a>,
}

impl<'a> Location<'a> {
    /// The member's name as it appeared in the document (no unescaping).
    #[must_use]
    pub const fn name(&self) -> &'a [u8] {
        self.name
    }

    /// The member's value slice.
    #[must_use]
    pub const fn value(&self) -> ValueSlice<'a> {
        self.value
    }
}

/// Default inline capacity before a `LocationsTable` spills to the heap.
pub const INLINE_MEMBERS: usize = 16;

/// The set of locations discovered for one class (JSON object), built by a
/// single in-order scan (see `class::discover_locations`).
///
/// Lookups are by schema order at construction time; re-parsing a member by
/// name (for path navigation, or for a member a previous pass skipped) uses
/// `find`. If the schema's member-name hashes collide, callers fall back to
/// a byte compare on every candidate -- see `hash::hashes_collide`.
#[derive(Debug, Clone, Default)]
pub struct LocationsTable<'a> {
    entries: SmallVec<[Location<'a>; INLINE_MEMBERS]>,
}

impl<'a> LocationsTable<'a> {
    /// An empty table, ready to be filled by a forward scan.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Record a located member. If a member with the same name was already
    /// recorded, it is overwritten in place -- last occurrence wins, per
    /// JSON's "objects may repeat keys, last one counts" convention, while
    /// preserving the original position (and thus scan order) of the first
    /// occurrence.
    pub fn insert(&mut self, name: &'a [u8], value: ValueSlice<'a>) {
        let hash = name_hash(name);
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|loc| loc.hash == hash && loc.name == name)
        {
            existing.value = value;
        } else {
            self.entries.push(Location { hash, name, value });
        }
    }

    /// Look up a member by exact name, using the hash as a fast
    /// pre-filter and a byte compare to resolve any collision.
    #[must_use]
    pub fn find(&self, name: &[u8]) -> Option<ValueSlice<'a>> {
        let hash = name_hash(name);
        self.entries
            .iter()
            .find(|loc| loc.hash == hash && loc.name == name)
            .map(|loc| loc.value)
    }

    /// The number of distinct members recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no members were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate located members in scan (document) order.
    pub fn iter(&self) -> impl Iterator<Item = &Location<'a>> {
        self.entries.iter()
    }

    /// An offset suitable for error reporting when no more specific one is
    /// available: the first located member's value offset, or `0` for an
    /// empty object.
    #[must_use]
    pub fn base_offset(&self) -> usize {
        self.entries.first().map_or(0, |loc| loc.value.offset)
    }
}

/// Per-class-parse member locations indexed directly by schema position
/// (`T::MEMBERS`' declaration order), matching spec.md §3's Locations Table
/// shape: a record per compile-time schema position, missing until
/// discovered. Built by one forward scan over the object's members
/// (`class::discover_positions`); `require`/`require_as_string` then read
/// their own position with a single array index rather than a name-keyed
/// scan repeated once per member.
#[derive(Debug, Clone)]
pub struct ClassLocations<'a> {
    slots: SmallVec<[Option<ValueSlice<'a>>; INLINE_MEMBERS]>,
    base_offset: usize,
}

impl<'a> ClassLocations<'a> {
    /// An all-missing table sized for a schema of `len` members, for the
    /// object starting at `base_offset` in the document (the offset used in
    /// error reporting when a required member was never located).
    #[must_use]
    pub fn new(len: usize, base_offset: usize) -> Self {
        Self {
            slots: SmallVec::from_elem(None, len),
            base_offset,
        }
    }

    /// Record (or, for a repeated key, overwrite) the value located at
    /// schema position `pos` -- last occurrence wins, since a later match
    /// for the same position simply replaces the earlier slot.
    pub fn set(&mut self, pos: usize, value: ValueSlice<'a>) {
        self.slots[pos] = Some(value);
    }

    /// O(1) read of the member located at schema position `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<ValueSlice<'a>> {
        self.slots[pos]
    }

    /// The offset of the enclosing object, for error reporting when no
    /// more specific offset is available.
    #[must_use]
    pub const fn base_offset(&self) -> usize {
        self.base_offset
    }
}
