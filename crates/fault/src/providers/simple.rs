//! This module contains a [crate::TraceAccessor] implementation for single-level
//! games, adapting a [TraceProvider] directly.

use crate::{
    compute_gindex, ClaimData, FaultDisputeState, Gindex, OracleData, Position, TraceAccessor,
    TraceProvider,
};
use alloy_primitives::{Bytes, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use thorin_primitives::Claim;

/// The [SimpleTraceAccessor] serves a single bisection level from one
/// [TraceProvider]. The observed claim carries no agreement frame at a single level,
/// so it is ignored.
pub struct SimpleTraceAccessor<P>
where
    P: TraceProvider,
{
    pub provider: P,
}

impl<P> SimpleTraceAccessor<P>
where
    P: TraceProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> TraceAccessor for SimpleTraceAccessor<P>
where
    P: TraceProvider + Send + Sync,
{
    async fn get(
        &self,
        _: &FaultDisputeState,
        _: &ClaimData,
        position: Position,
    ) -> Result<Claim> {
        self.provider.state_hash(position).await
    }

    /// The step at trace index `t` executes from the state at `t - 1`, so the witness
    /// is the provider's state and proof there; the very first step executes from the
    /// absolute prestate, which needs no proof.
    async fn get_step_data(
        &self,
        game: &FaultDisputeState,
        _: &ClaimData,
        position: Position,
    ) -> Result<(Bytes, Bytes, Option<OracleData>)> {
        let trace_index = position.trace_index(game.max_depth());
        let Some(prestate_index) = trace_index.checked_sub(U256::from(1)) else {
            let pre_state = self.provider.absolute_prestate(position).await?;
            return Ok((pre_state, Bytes::new(), None));
        };

        let prestate_index = u128::try_from(prestate_index)
            .map_err(|_| anyhow!("prestate index {} exceeds the position domain", prestate_index))?;
        let prestate_position = compute_gindex(game.max_depth(), prestate_index);
        let pre_state = self.provider.state_at(prestate_position).await?;
        let proof = self.provider.proof_at(prestate_position).await?;
        Ok((pre_state, proof, None))
    }
}
