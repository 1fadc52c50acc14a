//! cartpow: canonical Cartesian power enumeration for Gaussian basis shells.
//!
//! A shell of type L contains every Cartesian monomial x^nx y^ny z^nz with
//! nx + ny + nz = L. This crate walks those triples in the fixed libcint
//! order (nx descending, then ny descending) for one shell, and walks the
//! row-major product of two shells while keeping the basis indices and a
//! padded block offset up to date. Integral drivers read the current pair
//! after each step to address their output arrays.
//!
//! ```
//! use cartpow::{PairStep, ShellPairStepper};
//!
//! // p × p pair written into rows 5 wide
//! let mut st = ShellPairStepper::new(1, 1, 5)?;
//! let mut offsets = vec![st.offset()];
//! while st.advance() == PairStep::Advanced {
//!     offsets.push(st.offset());
//! }
//! assert_eq!(offsets, [0, 1, 2, 5, 6, 7, 10, 11, 12]);
//! # Ok::<(), cartpow::StepperError>(())
//! ```
//!
//! # ABI
//! Two C entry points are exported for callers that keep triples in plain
//! `int64_t[3]` arrays:
//! ```c
//! int cartpow_advance(int64_t *n);
//! int cartpow_shell_nbasis(int shell_type);
//! ```

pub mod error;
pub mod types;
pub mod iter_pow;
pub mod block;

// Re-export commonly used types
pub use error::StepperError;
pub use types::{basis_size, cart_powers, ncart, shell_nbasis, Powers, ANG_MAX};
pub use iter_pow::{
    advance_powers, PairIndex, PairIndices, PairStep, ShellPairStepper, ShellPowers, ShellStep,
    ShellStepper,
};
pub use block::{fill_basis_matrix, fill_pair_block, pair_block_len};

// ─────────────────────────────────────────────────────────────────
// C-ABI exports
// ─────────────────────────────────────────────────────────────────

/// Advance an `int64_t[3]` triple in place.
///
/// Returns 1 when it moved to the next triple, 0 when it wrapped back to
/// `(L, 0, 0)`, and -1 for a null pointer, a negative entry, or entries
/// whose sum exceeds `i64::MAX` (the triple is then left unchanged).
///
/// # Safety
/// `n` must be null or valid for reads and writes of 3 `i64`.
#[no_mangle]
pub unsafe extern "C" fn cartpow_advance(n: *mut i64) -> i32 {
    if n.is_null() {
        return -1;
    }
    let raw = std::slice::from_raw_parts_mut(n, 3);
    if raw.iter().any(|&v| v < 0) {
        return -1;
    }
    // every advanced entry is bounded by the sum
    if raw.iter().try_fold(0i64, |acc, &v| acc.checked_add(v)).is_none() {
        return -1;
    }
    let mut powers: Powers = [raw[0] as usize, raw[1] as usize, raw[2] as usize];
    let step = advance_powers(&mut powers);
    for (dst, src) in raw.iter_mut().zip(powers) {
        *dst = src as i64;
    }
    match step {
        ShellStep::Advanced => 1,
        ShellStep::Wrapped => 0,
    }
}

/// Number of Cartesian functions in a shell, or -1 for a rejected shell type.
#[no_mangle]
pub extern "C" fn cartpow_shell_nbasis(shell_type: i32) -> i32 {
    match shell_nbasis(shell_type) {
        Ok(n) => n as i32,
        Err(_) => -1,
    }
}
