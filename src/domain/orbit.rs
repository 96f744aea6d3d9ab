//! Orbit registry entries.
//!
//! An orbit is an ordered list of pool IDs a routed swap walks through.
//! A start pool maps to either a legacy single path (caller picks the
//! direction) or a dual pair of paths with an oscillator: the NEG side
//! always trades asset-in, the POS side always trades usdc-in, and the
//! active side flips after every successful routed swap.

use serde::{Deserialize, Serialize};

use crate::domain::PoolId;

/// Which side of a dual orbit is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitSide {
    /// Asset-in side.
    Neg,
    /// Usdc-in side.
    Pos,
}

impl OrbitSide {
    /// The opposite side.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Neg => Self::Pos,
            Self::Pos => Self::Neg,
        }
    }

    /// Trade direction this side forces on every hop.
    #[must_use]
    pub const fn asset_to_usdc(self) -> bool {
        matches!(self, Self::Neg)
    }
}

/// A registered orbit for a start pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrbitEntry {
    /// Single path; the swap request's direction flag applies.
    Legacy(Vec<PoolId>),
    /// Oscillating pair of paths; the request's direction flag is ignored.
    Dual {
        /// Path used when the NEG side is active (asset-in).
        neg: Vec<PoolId>,
        /// Path used when the POS side is active (usdc-in).
        pos: Vec<PoolId>,
        /// Currently active side. Flips after each successful swap.
        active: OrbitSide,
    },
}

impl OrbitEntry {
    /// The path and direction the next routed swap will use.
    ///
    /// For a legacy orbit the caller's `asset_to_usdc` wins; for a dual
    /// orbit the active side dictates both path and direction.
    #[must_use]
    pub fn resolve(&self, asset_to_usdc: bool) -> (&[PoolId], bool) {
        match self {
            Self::Legacy(path) => (path, asset_to_usdc),
            Self::Dual { neg, pos, active } => match active {
                OrbitSide::Neg => (neg, true),
                OrbitSide::Pos => (pos, false),
            },
        }
    }

    /// Flips the active side of a dual orbit. No-op on a legacy orbit.
    ///
    /// Returns the new active side when a flip happened.
    pub const fn flip(&mut self) -> Option<OrbitSide> {
        match self {
            Self::Legacy(_) => None,
            Self::Dual { active, .. } => {
                *active = active.toggled();
                Some(*active)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn legacy_honors_caller_direction() {
        let path = vec![PoolId::new(), PoolId::new()];
        let entry = OrbitEntry::Legacy(path.clone());
        let (resolved, dir) = entry.resolve(false);
        assert_eq!(resolved, path.as_slice());
        assert!(!dir);
        let (_, dir) = entry.resolve(true);
        assert!(dir);
    }

    #[test]
    fn dual_ignores_caller_direction_and_flips() {
        let neg = vec![PoolId::new()];
        let pos = vec![PoolId::new()];
        let mut entry = OrbitEntry::Dual {
            neg: neg.clone(),
            pos: pos.clone(),
            active: OrbitSide::Neg,
        };

        // Caller says usdc-in, NEG side forces asset-in.
        let (path, dir) = entry.resolve(false);
        assert_eq!(path, neg.as_slice());
        assert!(dir);

        assert_eq!(entry.flip(), Some(OrbitSide::Pos));
        let (path, dir) = entry.resolve(true);
        assert_eq!(path, pos.as_slice());
        assert!(!dir);
    }

    #[test]
    fn legacy_flip_is_a_no_op() {
        let mut entry = OrbitEntry::Legacy(vec![PoolId::new()]);
        assert_eq!(entry.flip(), None);
    }
}
