//! Structural self-checks for meshes and synthesized geometry.
//!
//! [`DebugInvariants::validate_invariants`] always runs the check and reports
//! the first violation. [`DebugInvariants::debug_assert_invariants`] panics on
//! a violation, but only in debug builds or with the `strict-invariants`
//! feature; release builds compile it to nothing.

use crate::mesh_error::MeshGeoError;

/// Values whose internal consistency can be checked after construction.
pub trait DebugInvariants {
    /// Label used in panic messages, e.g. `"Mesh"`.
    const KIND: &'static str;

    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshGeoError>;

    /// Panic on a violated invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "{}", Self::KIND);
    }
}

/// Run a fallible check and panic with context on error when invariant
/// checking is enabled. The context takes `format!` arguments.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        if let Err(e) = $expr {
            panic!("[invariants] {}: {}", format_args!($($ctx)*), e);
        }
    };
}
