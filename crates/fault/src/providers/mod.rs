//! This module contains trace providers and accessors for the fault dispute game
//! solver.

mod alphabet;
pub use self::alphabet::AlphabetTraceProvider;

mod simple;
pub use self::simple::SimpleTraceAccessor;
