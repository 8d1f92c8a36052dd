//! This module contains the implementation of the [crate::TraceProvider] trait for
//! the mock Alphabet VM.

use crate::{Gindex, Position, TraceProvider, VMStatus};
use alloy_primitives::{keccak256, Bytes, U256};
use alloy_sol_types::{sol, SolType};
use anyhow::Result;
use async_trait::async_trait;
use thorin_primitives::Claim;

type AlphabetClaimConstruction = sol! { tuple(uint256, uint256) };

/// The [AlphabetTraceProvider] is a [TraceProvider] that serves the honest trace of
/// the mock Alphabet VM: the state at trace index `i` is the letter `i + 1` positions
/// after the absolute prestate letter.
pub struct AlphabetTraceProvider {
    /// The absolute prestate of the alphabet VM: the ascii representation of the
    /// letter prior to the first in the honest trace.
    pub absolute_prestate: u8,
    /// The maximum depth of the dispute game position tree.
    pub max_depth: u8,
}

impl AlphabetTraceProvider {
    pub fn new(absolute_prestate: u8, max_depth: u8) -> Self {
        Self {
            absolute_prestate,
            max_depth,
        }
    }

    /// Returns the raw state byte at the given trace index.
    pub fn state_byte(&self, trace_index: U256) -> u8 {
        let letter = trace_index + U256::from(self.absolute_prestate) + U256::from(1);
        // Traces past the end of the alphabet saturate.
        u8::try_from(letter).unwrap_or(u8::MAX)
    }

    /// Returns the claim commitment at the given position: the keccak of the
    /// abi-encoded `(trace_index, state)` pair, with the VM status in the first byte.
    pub fn encode_claim(&self, position: Position) -> Claim {
        let trace_index = position.trace_index(self.max_depth);
        let state = U256::from(self.state_byte(trace_index));
        let mut claim = keccak256(AlphabetClaimConstruction::abi_encode(&(trace_index, state)));
        claim[0] = VMStatus::Invalid as u8;
        claim
    }
}

#[async_trait]
impl TraceProvider for AlphabetTraceProvider {
    async fn absolute_prestate(&self, _: Position) -> Result<Bytes> {
        Ok(Bytes::from(vec![self.absolute_prestate]))
    }

    async fn state_at(&self, position: Position) -> Result<Bytes> {
        let trace_index = position.trace_index(self.max_depth);
        Ok(Bytes::from(vec![self.state_byte(trace_index)]))
    }

    async fn state_hash(&self, position: Position) -> Result<Claim> {
        Ok(self.encode_claim(position))
    }

    async fn proof_at(&self, _: Position) -> Result<Bytes> {
        Ok(Bytes::new())
    }
}
