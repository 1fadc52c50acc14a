//! Cartesian power steppers and their iterator adaptors.

pub mod single;
pub mod pair;

pub use single::{advance_powers, ShellStep, ShellStepper};
pub use pair::{PairStep, ShellPairStepper};

use crate::error::Result;
use crate::types::{ncart, Powers};

/// Iterator over one shell's triples in canonical order.
#[derive(Debug, Clone)]
pub struct ShellPowers {
    stepper: ShellStepper,
    remaining: usize,
}

impl ShellPowers {
    pub fn new(l: usize) -> Self {
        ShellPowers { stepper: ShellStepper::new(l), remaining: ncart(l) }
    }
}

impl Iterator for ShellPowers {
    type Item = Powers;

    fn next(&mut self) -> Option<Powers> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.stepper.powers();
        self.stepper.advance();
        self.remaining -= 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ShellPowers {}

/// Position of a [`ShellPairStepper`] at one step of its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairIndex {
    pub n0: Powers,
    pub n1: Powers,
    pub ibasis0: usize,
    pub ibasis1: usize,
    pub offset: usize,
}

/// Iterator over one full cycle of a shell pair, starting at the first pair.
#[derive(Debug, Clone)]
pub struct PairIndices {
    stepper: ShellPairStepper,
    remaining: usize,
}

impl PairIndices {
    pub fn new(shell_type0: i32, shell_type1: i32, max_nbasis: usize) -> Result<Self> {
        let stepper = ShellPairStepper::new(shell_type0, shell_type1, max_nbasis)?;
        let remaining = stepper.npairs();
        Ok(PairIndices { stepper, remaining })
    }

    /// Stride of the padded block being addressed.
    pub fn block_skip(&self) -> usize { self.stepper.skip() }
}

impl Iterator for PairIndices {
    type Item = PairIndex;

    fn next(&mut self) -> Option<PairIndex> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.stepper.index();
        self.stepper.advance();
        self.remaining -= 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PairIndices {}
