//! Single-shell stepping through the canonical Cartesian order.
//!
//! For a shell of type L the order starts at (L, 0, 0) and ends at
//! (0, 0, L): nx descends from L to 0, and for each nx, ny descends from
//! L - nx to 0 with nz = L - nx - ny implied.

use crate::types::{ncart, Powers};

/// Outcome of one single-shell step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStep {
    /// Moved to the next triple of the shell.
    Advanced,
    /// Was at (0, 0, L) and restarted at (L, 0, 0).
    Wrapped,
}

impl ShellStep {
    #[inline]
    pub fn is_advanced(self) -> bool { self == ShellStep::Advanced }
}

/// Move `n` in place to the next triple of its shell.
///
/// `n` must already sum to the shell type; the sum is preserved by every
/// transition, so the shell type never needs to be passed in.
#[inline]
pub fn advance_powers(n: &mut Powers) -> ShellStep {
    if n[1] == 0 {
        if n[0] == 0 {
            // (0, 0, L) -> (L, 0, 0)
            n[0] = n[2];
            n[2] = 0;
            return ShellStep::Wrapped;
        }
        // next row: (nx, 0, nz) -> (nx-1, nz+1, 0)
        n[1] = n[2] + 1;
        n[2] = 0;
        n[0] -= 1;
    } else {
        n[1] -= 1;
        n[2] += 1;
    }
    ShellStep::Advanced
}

/// One exponent triple cycling through its shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellStepper {
    n: Powers,
}

impl ShellStepper {
    /// Stepper positioned at (l, 0, 0).
    #[inline]
    pub fn new(l: usize) -> Self {
        ShellStepper { n: [l, 0, 0] }
    }

    #[inline]
    pub fn reset(&mut self, l: usize) {
        self.n = [l, 0, 0];
    }

    #[inline]
    pub fn advance(&mut self) -> ShellStep {
        advance_powers(&mut self.n)
    }

    #[inline] pub fn powers(&self) -> Powers { self.n }
    #[inline] pub fn shell_type(&self) -> usize { self.n[0] + self.n[1] + self.n[2] }
    #[inline] pub fn nbasis(&self) -> usize { ncart(self.shell_type()) }
}
