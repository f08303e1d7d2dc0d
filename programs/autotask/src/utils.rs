use anchor_lang::prelude::*;

use crate::constants::{GAS_HASH_BASE, GAS_HASH_WORD, OK, REVERT_SELECTOR};
use crate::errors::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfGas;

impl From<OutOfGas> for anchor_lang::error::Error {
    fn from(_: OutOfGas) -> Self {
        error!(ErrorCode::OutOfGas)
    }
}

/// Gas budget of one call frame. Exceeding the limit burns all of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    consumed: u64,
    out_of_gas: bool,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            consumed: 0,
            out_of_gas: false,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.consumed
    }

    /// Set once a charge failed. Spending exactly the remaining gas does not
    /// set it.
    pub fn ran_out_of_gas(&self) -> bool {
        self.out_of_gas
    }

    pub fn charge(&mut self, amount: u64) -> std::result::Result<(), OutOfGas> {
        if amount > self.remaining() {
            self.consumed = self.limit;
            self.out_of_gas = true;
            return Err(OutOfGas);
        }
        self.consumed += amount;
        Ok(())
    }

    /// Child frame limited to `stipend`, capped at what is left here.
    pub fn sub_meter(&self, stipend: u64) -> GasMeter {
        GasMeter::new(stipend.min(self.remaining()))
    }

    pub fn absorb(&mut self, child: &GasMeter) {
        self.consumed = self.consumed.saturating_add(child.consumed).min(self.limit);
    }
}

pub fn hash_gas(encoded_len: usize) -> u64 {
    let words = (encoded_len as u64).div_ceil(32);
    GAS_HASH_BASE.saturating_add(GAS_HASH_WORD.saturating_mul(words))
}

pub fn starts_with_ok(result: &str) -> bool {
    result.starts_with(OK)
}

/// Return data a user proxy produces when one of its calls reverted with a
/// reason.
pub fn encode_revert_reason(reason: &str) -> Vec<u8> {
    let mut data = REVERT_SELECTOR.to_vec();
    let bytes = reason.as_bytes();
    let len = reason_len_prefix(bytes.len());
    data.extend_from_slice(&len.to_le_bytes());
    data.extend_from_slice(&bytes[..len as usize]);
    data
}

/// Reasons longer than `u32::MAX` bytes are cut to that length.
fn reason_len_prefix(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

pub fn decode_revert_reason(return_data: &[u8]) -> Option<String> {
    let body = return_data.strip_prefix(REVERT_SELECTOR.as_slice())?;
    let len_bytes: [u8; 4] = body.get(..4)?.try_into().ok()?;
    let len = u32::from_le_bytes(len_bytes) as usize;
    let reason = body.get(4..4usize.checked_add(len)?)?;
    String::from_utf8(reason.to_vec()).ok()
}
