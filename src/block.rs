//! Scatter per-pair values into padded row-major blocks.
//!
//! A shell pair (I, J) occupies a `ncart(l_I) × ncart(l_J)` sub-block of a
//! larger `nbasis × nbasis` matrix. Passing the matrix row width as
//! `max_nbasis` lets the pair stepper's `offset` address that sub-block
//! directly, starting from the slice that begins at the block's corner.
//!
//! # Parallelism
//! `fill_basis_matrix` hands each shell row `I` its own disjoint slice of
//! rows `[lo_I, hi_I)` and its own stepper, so no state is shared between
//! workers.

use rayon::prelude::*;

use crate::error::{Result, StepperError};
use crate::iter_pow::pair::padded_block_len;
use crate::iter_pow::PairIndices;
use crate::types::{check_shell_type, ncart, shell_nbasis, Powers};

/// Smallest buffer that holds a shell-pair block with rows `max_nbasis` wide.
pub fn pair_block_len(shell_type0: i32, shell_type1: i32, max_nbasis: usize) -> Result<usize> {
    let nb0 = shell_nbasis(shell_type0)?;
    let nb1 = shell_nbasis(shell_type1)?;
    padded_block_len(nb0, nb1, max_nbasis).ok_or(StepperError::BlockTooLarge { max_nbasis })
}

/// Write `f(n0, n1)` at `out[offset]` for every pair of shells
/// `(shell_type0, shell_type1)`. Padding slots are left untouched.
///
/// Returns the number of elements written.
pub fn fill_pair_block<T, F>(
    out: &mut [T],
    shell_type0: i32,
    shell_type1: i32,
    max_nbasis: usize,
    mut f: F,
) -> Result<usize>
where
    F: FnMut(&Powers, &Powers) -> T,
{
    let pairs = PairIndices::new(shell_type0, shell_type1, max_nbasis)?;
    let required = pair_block_len(shell_type0, shell_type1, max_nbasis)?;
    if out.len() < required {
        return Err(StepperError::BufferTooSmall { len: out.len(), required });
    }
    let n = pairs.len();
    for p in pairs {
        out[p.offset] = f(&p.n0, &p.n1);
    }
    Ok(n)
}

/// Fill the full row-major `nbasis × nbasis` matrix of a basis given by its
/// shell types, one shell row per rayon task.
///
/// `out` must hold exactly `nbasis²` elements. Returns `nbasis`.
pub fn fill_basis_matrix<T, F>(out: &mut [T], shell_types: &[i32], f: F) -> Result<usize>
where
    T: Send,
    F: Fn(&Powers, &Powers) -> T + Sync,
{
    // ao_loc[i] = first basis function of shell i
    let mut ao_loc = Vec::with_capacity(shell_types.len() + 1);
    ao_loc.push(0usize);
    for &st in shell_types {
        let l = check_shell_type(st)?;
        ao_loc.push(ao_loc[ao_loc.len() - 1] + ncart(l));
    }
    let nbasis = ao_loc[shell_types.len()];
    let required = nbasis
        .checked_mul(nbasis)
        .ok_or(StepperError::BlockTooLarge { max_nbasis: nbasis })?;
    if out.len() != required {
        return Err(StepperError::BufferTooSmall { len: out.len(), required });
    }

    let mut rows: Vec<(i32, &mut [T])> = Vec::with_capacity(shell_types.len());
    let mut rest = out;
    for (i, &st) in shell_types.iter().enumerate() {
        let nrows = ao_loc[i + 1] - ao_loc[i];
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(nrows * nbasis);
        rows.push((st, head));
        rest = tail;
    }

    rows.into_par_iter().try_for_each(|(st0, row)| {
        for (j, &st1) in shell_types.iter().enumerate() {
            fill_pair_block(&mut row[ao_loc[j]..], st0, st1, nbasis, &f)?;
        }
        Ok::<(), StepperError>(())
    })?;
    log::debug!("filled {nbasis}x{nbasis} matrix over {} shells", shell_types.len());
    Ok(nbasis)
}
