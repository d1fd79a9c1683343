//! Stable node identities.
//!
//! An [`Identity`] is derived from three ingredients: a tag for the control
//! type, a caller supplied discriminator, and a token for the call site. The
//! parent's identity is folded in as well, so the same call site nested under
//! two different parents yields two different nodes. The mix is a
//! deterministic non-cryptographic hash, so identities are stable across
//! frames and across runs of the same binary.
//!
//! Collisions are not detected here. Two simultaneously alive elements that
//! hash to the same identity are a caller error.

use std::{any::type_name, fmt, panic::Location};

/// Stable identity of a node across frames.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity(u32);

impl Identity {
    /// The identity reserved for the root node.
    pub const ROOT: Self = Self(0);

    /// Wrap a raw identity value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Is this the root identity?
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hash of a control type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeTag(u32);

impl TypeTag {
    /// Tag derived from the Rust type name of `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Tag derived from an explicit name.
    pub fn named(name: &str) -> Self {
        Self(finish(mix_bytes(0, name.as_bytes())))
    }

    /// The raw tag value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A token standing for the place in the caller's code that declared a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CallSite(u32);

impl CallSite {
    /// The source location of the caller. Functions that forward their own
    /// caller's location must be marked `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// A call site for an explicit source location.
    pub fn from_location(location: &Location<'_>) -> Self {
        let mut h = mix_bytes(0, location.file().as_bytes());
        h = mix_u32(h, location.line());
        h = mix_u32(h, location.column());
        Self(finish(h))
    }

    /// An explicit caller-chosen key. This is the portable choice when source
    /// locations are not stable enough, e.g. across builds.
    pub const fn key(key: u32) -> Self {
        Self(key)
    }

    /// The raw token value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Resolve the identity of a call.
///
/// Identical arguments always produce identical identities. Loop indices and
/// other per-iteration values belong in `discriminator`. The result is never
/// [`Identity::ROOT`].
pub fn resolve(
    tag: TypeTag,
    discriminator: i32,
    site: CallSite,
    parent: Identity,
) -> Identity {
    let mut h = mix_u32(0, tag.0);
    h = mix_u32(h, discriminator as u32);
    h = mix_u32(h, site.0);
    h = mix_u32(h, parent.0);
    match finish(h) {
        0 => Identity(1),
        v => Identity(v),
    }
}

/// One-at-a-time accumulation of a byte slice.
fn mix_bytes(mut hash: u32, bytes: &[u8]) -> u32 {
    for b in bytes {
        hash = hash.wrapping_add(*b as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash
}

/// Accumulate a 32-bit value, byte by byte.
fn mix_u32(hash: u32, value: u32) -> u32 {
    mix_bytes(hash, &value.to_le_bytes())
}

/// Final avalanche step.
fn finish(mut hash: u32) -> u32 {
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
