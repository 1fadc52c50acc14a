//! Shell-level constants and helpers shared by the steppers.
//!
//! A shell of type `l` holds every Cartesian monomial x^nx y^ny z^nz with
//! nx + ny + nz = l, i.e. ncart(l) = (l+1)(l+2)/2 basis functions.

use crate::error::{Result, StepperError};
use crate::iter_pow::ShellPowers;

// ─── Limits (cint.h) ────────────────────────────────────────────────────────
/// Highest accepted shell type.
pub const ANG_MAX: usize = 15;
/// Number of accepted shell types, `0..LMAX1`.
pub const LMAX1:   usize = ANG_MAX + 1;

/// Exponent triple (nx, ny, nz) of one Cartesian basis function.
pub type Powers = [usize; 3];

/// Number of Cartesian GTOs for angular momentum l: (l+1)(l+2)/2
#[inline]
pub fn ncart(l: usize) -> usize { (l + 1) * (l + 2) / 2 }

/// Validate a signed shell type and return it as an angular momentum.
pub fn check_shell_type(shell_type: i32) -> Result<usize> {
    if shell_type < 0 {
        log::debug!("rejecting negative shell type {shell_type}");
        return Err(StepperError::NegativeShellType { shell_type });
    }
    let l = shell_type as usize;
    if l >= LMAX1 {
        log::debug!("rejecting shell type {shell_type} above ANG_MAX");
        return Err(StepperError::ShellTypeTooHigh { shell_type, max: ANG_MAX });
    }
    Ok(l)
}

/// Basis count of a shell given by its signed shell type.
pub fn shell_nbasis(shell_type: i32) -> Result<usize> {
    check_shell_type(shell_type).map(ncart)
}

/// Total number of Cartesian basis functions over a list of shells.
pub fn basis_size(shell_types: &[i32]) -> Result<usize> {
    shell_types
        .iter()
        .try_fold(0, |acc, &st| -> Result<usize> { Ok(acc + shell_nbasis(st)?) })
}

/// All `(nx, ny, nz)` triples of shell `l` in canonical order:
/// nx descending, then ny descending within each nx block.
pub fn cart_powers(l: usize) -> Vec<Powers> {
    ShellPowers::new(l).collect()
}
