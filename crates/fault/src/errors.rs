//! Error types for the fault dispute game solvers.

use thiserror::Error;

/// The [SolverError] enum holds the typed errors the claim solver can signal. These
/// indicate misuse of the solver or an unplayable claim; trace accessor failures are
/// surfaced verbatim instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    /// A step was attempted against a claim that is not at the maximum game depth.
    #[error("cannot step on non-leaf claims")]
    StepNonLeafNode,
    /// A step was attempted against a claim the solver itself made.
    #[error("cannot step on claims we agree with")]
    StepAgreedClaim,
    /// A step was attempted against a claim that disputes an invalid path.
    #[error("cannot step on claims that dispute invalid paths")]
    StepIgnoreInvalidPath,
    /// A bisection move was requested for a claim at the maximum game depth.
    #[error("the maximum game depth has been reached")]
    GameDepthReached,
}
