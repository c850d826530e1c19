//! Compile-time optional witness values.
//!
//! Gadgets are written once and run under two kinds of driver: one that
//! carries concrete witness values (the prover, and the native/constrained
//! equivalence tests) and one that only shapes the constraint system
//! (counting, key generation). `Maybe<T>` lets the same gadget code handle
//! both without an `Option` discriminant:
//!
//! - `Always<T>` is a transparent wrapper around `T`;
//! - `Empty<T>` is zero-sized and never holds a value.
//!
//! Which one is in play is fixed by the driver's [`MaybeKind`]. Witness
//! closures handed to [`MaybeKind::just`] are never invoked for `Empty`, so
//! witness computation is eliminated entirely from shape-only synthesis.

use core::marker::PhantomData;

use crate::error::Error;

/// Kind marker selecting `Always` or `Empty` for every witness of a driver.
///
/// Constructors live here rather than on [`Maybe`] so that generic code
/// producing `K::Rebind<R>` never relies on projecting through `Maybe::Kind`.
pub trait MaybeKind: Copy + Clone + Default + 'static {
    /// The container for a `T` under this kind.
    type Rebind<T>: Maybe<T, Kind = Self>;

    /// Whether containers of this kind hold a value.
    const HAS_VALUE: bool;

    /// Build a container by running `f` (only when the kind holds values).
    fn just<R>(f: impl FnOnce() -> R) -> Self::Rebind<R>;

    /// Fallible variant of [`MaybeKind::just`].
    fn with<R>(f: impl FnOnce() -> Result<R, Error>) -> Result<Self::Rebind<R>, Error>;

    /// Clone a container without requiring `Rebind<T>: Clone` bounds at call sites.
    fn clone_rebind<T: Clone>(value: &Self::Rebind<T>) -> Self::Rebind<T>;
}

/// Option-like operations whose variant is known at compile time.
pub trait Maybe<T>: Sized {
    /// The kind this container belongs to.
    type Kind: MaybeKind;

    /// Extract the value.
    ///
    /// # Panics
    ///
    /// Panics for `Empty`; synthesis code only calls this inside witness
    /// closures or behind a `has_witness()` guard.
    fn take(self) -> T;

    /// Borrow the value. Same panic contract as [`Maybe::take`].
    fn snag(&self) -> &T;

    /// Convert to a standard `Option<T>`.
    fn into_option(self) -> Option<T>;

    /// Whether this container holds a value (a compile-time constant).
    fn has_value() -> bool {
        Self::Kind::HAS_VALUE
    }
}

// === Always ===

/// A `Maybe<T>` that always holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Always<T>(pub T);

/// Kind marker for [`Always`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlwaysKind;

impl MaybeKind for AlwaysKind {
    type Rebind<T> = Always<T>;
    const HAS_VALUE: bool = true;

    #[inline(always)]
    fn just<R>(f: impl FnOnce() -> R) -> Always<R> {
        Always(f())
    }

    #[inline(always)]
    fn with<R>(f: impl FnOnce() -> Result<R, Error>) -> Result<Always<R>, Error> {
        f().map(Always)
    }

    #[inline(always)]
    fn clone_rebind<T: Clone>(value: &Always<T>) -> Always<T> {
        Always(value.0.clone())
    }
}

impl<T> Maybe<T> for Always<T> {
    type Kind = AlwaysKind;

    #[inline(always)]
    fn take(self) -> T {
        self.0
    }

    #[inline(always)]
    fn snag(&self) -> &T {
        &self.0
    }

    #[inline(always)]
    fn into_option(self) -> Option<T> {
        Some(self.0)
    }
}

impl<T> Always<T> {
    /// Apply `f` to the held value.
    #[inline(always)]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Always<U> {
        Always(f(self.0))
    }

    /// Borrow the held value as an `Always<&T>`.
    #[inline(always)]
    pub fn view(&self) -> Always<&T> {
        Always(&self.0)
    }
}

impl<T> From<T> for Always<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Always(value)
    }
}

// === Empty ===

/// A `Maybe<T>` that never holds a value. Zero-sized for every `T`.
pub struct Empty<T>(PhantomData<T>);

/// Kind marker for [`Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyKind;

impl<T> Empty<T> {
    /// Create the empty container.
    #[inline(always)]
    pub const fn new() -> Self {
        Empty(PhantomData)
    }
}

// Manual impls: deriving would demand `T: Clone` etc. for a value that never exists.
impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Empty::new()
    }
}

impl<T> core::fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Empty")
    }
}

impl MaybeKind for EmptyKind {
    type Rebind<T> = Empty<T>;
    const HAS_VALUE: bool = false;

    #[inline(always)]
    fn just<R>(_f: impl FnOnce() -> R) -> Empty<R> {
        Empty::new()
    }

    #[inline(always)]
    fn with<R>(_f: impl FnOnce() -> Result<R, Error>) -> Result<Empty<R>, Error> {
        Ok(Empty::new())
    }

    #[inline(always)]
    fn clone_rebind<T: Clone>(_value: &Empty<T>) -> Empty<T> {
        Empty::new()
    }
}

impl<T> Maybe<T> for Empty<T> {
    type Kind = EmptyKind;

    fn take(self) -> T {
        unreachable!("Empty::take() called - witness accessed during shape-only synthesis")
    }

    fn snag(&self) -> &T {
        unreachable!("Empty::snag() called - witness accessed during shape-only synthesis")
    }

    #[inline(always)]
    fn into_option(self) -> Option<T> {
        None
    }
}
