//! This module contains helpers for composing validation rules over a piece of state.
//!
//! Rules are evaluated independently and their failures accumulated rather than
//! short-circuited, so a single validation pass reports every violated rule at once.
//! This is primarily used to test the validity of solving algorithms against various
//! resolution methods.

use anyhow::{anyhow, Result};

/// Joins the outcomes of a set of independently evaluated rules into a single result.
///
/// Returns `Ok(())` if every rule passed. Otherwise, returns an error whose message
/// contains the failure of each violated rule, one per line.
pub fn join_errors(results: impl IntoIterator<Item = Result<()>>) -> Result<()> {
    let failures = results
        .into_iter()
        .filter_map(|result| result.err().map(|e| format!("{e:#}")))
        .collect::<Vec<_>>();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(failures.join("\n")))
    }
}
