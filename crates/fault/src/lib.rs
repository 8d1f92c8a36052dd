#![doc = include_str!("../README.md")]

mod clock;
pub use clock::{pack_clock, Clock};

mod errors;
pub use errors::SolverError;

mod position;
pub use position::{compute_gindex, Position};

mod resolution;
pub use resolution::{create_bidirectional_tree, resolve, BidirectionalTree};

mod response;
pub use response::{Action, OracleData, StepData, VMStatus};

mod rules;
pub use rules::{check_rules, resulting_position};

mod solver;
pub use solver::FaultDisputeSolver;

mod solvers;
pub use solvers::HonestClaimSolver;

mod state;
pub use state::{AgreedClaimTracker, ClaimData, FaultDisputeState};

mod traits;
pub use traits::{ChessClock, FaultClaimSolver, Gindex, TraceAccessor, TraceProvider};

pub mod providers;

pub mod prelude {
    pub use super::{
        check_rules, compute_gindex, create_bidirectional_tree, pack_clock, resolve,
        resulting_position, Action, AgreedClaimTracker, BidirectionalTree, ChessClock, ClaimData,
        Clock, FaultClaimSolver, FaultDisputeSolver, FaultDisputeState, Gindex, HonestClaimSolver,
        OracleData, Position, SolverError, StepData, TraceAccessor, TraceProvider, VMStatus,
    };
}

#[cfg(test)]
mod test_util;
