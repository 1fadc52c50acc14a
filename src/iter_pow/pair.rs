//! Synchronized stepping over the Cartesian product of two shells.
//!
//! Shell 0 is the outer loop and shell 1 the inner loop. Besides the two
//! triples the stepper tracks the per-shell basis indices and a combined
//! `offset` into a row-major block whose rows are `max_nbasis` wide, so a
//! shell pair can be written straight into a sub-block of a larger matrix:
//!
//! ```text
//!   offset = ibasis0 * max_nbasis + ibasis1
//! ```
//!
//! The offset is kept incrementally: +1 per inner step and +`skip` when
//! the inner shell wraps, with `skip = max_nbasis - ncart(l1) + 1`.

use crate::error::{Result, StepperError};
use crate::iter_pow::single::{ShellStep, ShellStepper};
use crate::iter_pow::PairIndex;
use crate::types::{check_shell_type, ncart, Powers};

/// Outcome of one pair step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStep {
    /// Moved to the next basis-function pair.
    Advanced,
    /// The whole product was consumed; both triples are back at their
    /// first element and all indices are zero.
    Exhausted,
}

impl PairStep {
    #[inline]
    pub fn is_advanced(self) -> bool { self == PairStep::Advanced }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellPairStepper {
    n0: ShellStepper,
    n1: ShellStepper,
    shell_type0: usize,
    shell_type1: usize,
    ibasis0: usize,
    ibasis1: usize,
    offset: usize,
    skip: usize,
}

impl ShellPairStepper {
    /// Build a stepper positioned at the first pair.
    ///
    /// Fails if either shell type is outside `0..=ANG_MAX` or if
    /// `max_nbasis` cannot hold the inner shell.
    pub fn new(shell_type0: i32, shell_type1: i32, max_nbasis: usize) -> Result<Self> {
        let (l0, l1, skip) = validate(shell_type0, shell_type1, max_nbasis)?;
        Ok(ShellPairStepper {
            n0: ShellStepper::new(l0),
            n1: ShellStepper::new(l1),
            shell_type0: l0,
            shell_type1: l1,
            ibasis0: 0,
            ibasis1: 0,
            offset: 0,
            skip,
        })
    }

    /// Re-initialize for a (possibly different) shell pair.
    ///
    /// On error the current state is left as it was.
    pub fn reset(&mut self, shell_type0: i32, shell_type1: i32, max_nbasis: usize) -> Result<()> {
        let (l0, l1, skip) = validate(shell_type0, shell_type1, max_nbasis)?;
        self.n0.reset(l0);
        self.n1.reset(l1);
        self.shell_type0 = l0;
        self.shell_type1 = l1;
        self.ibasis0 = 0;
        self.ibasis1 = 0;
        self.offset = 0;
        self.skip = skip;
        Ok(())
    }

    /// Step to the next pair, inner shell first.
    pub fn advance(&mut self) -> PairStep {
        if let ShellStep::Advanced = self.n1.advance() {
            self.offset += 1;
            self.ibasis1 += 1;
            return PairStep::Advanced;
        }
        self.ibasis1 = 0;
        match self.n0.advance() {
            ShellStep::Advanced => {
                self.offset += self.skip;
                self.ibasis0 += 1;
                PairStep::Advanced
            }
            ShellStep::Wrapped => {
                self.offset = 0;
                self.ibasis0 = 0;
                PairStep::Exhausted
            }
        }
    }

    #[inline] pub fn n0(&self) -> Powers { self.n0.powers() }
    #[inline] pub fn n1(&self) -> Powers { self.n1.powers() }
    #[inline] pub fn shell_type0(&self) -> usize { self.shell_type0 }
    #[inline] pub fn shell_type1(&self) -> usize { self.shell_type1 }
    #[inline] pub fn ibasis0(&self) -> usize { self.ibasis0 }
    #[inline] pub fn ibasis1(&self) -> usize { self.ibasis1 }
    #[inline] pub fn offset(&self) -> usize { self.offset }
    #[inline] pub fn skip(&self) -> usize { self.skip }

    /// Number of pairs in one full cycle.
    #[inline]
    pub fn npairs(&self) -> usize { ncart(self.shell_type0) * ncart(self.shell_type1) }

    /// Snapshot of the current position.
    pub fn index(&self) -> PairIndex {
        PairIndex {
            n0: self.n0(),
            n1: self.n1(),
            ibasis0: self.ibasis0,
            ibasis1: self.ibasis1,
            offset: self.offset,
        }
    }
}

/// `(nb0 - 1) * max_nbasis + nb1`, the extent of a padded pair block.
/// Every offset reached while stepping is below it.
pub(crate) fn padded_block_len(nb0: usize, nb1: usize, max_nbasis: usize) -> Option<usize> {
    (nb0 - 1).checked_mul(max_nbasis)?.checked_add(nb1)
}

fn validate(
    shell_type0: i32,
    shell_type1: i32,
    max_nbasis: usize,
) -> Result<(usize, usize, usize)> {
    let l0 = check_shell_type(shell_type0)?;
    let l1 = check_shell_type(shell_type1)?;
    let nbasis = ncart(l1);
    if max_nbasis < nbasis {
        log::debug!("max_nbasis {max_nbasis} cannot hold shell type {l1}");
        return Err(StepperError::BasisWidthTooSmall { max_nbasis, nbasis });
    }
    if padded_block_len(ncart(l0), nbasis, max_nbasis).is_none() {
        log::debug!("max_nbasis {max_nbasis} overflows the block offset");
        return Err(StepperError::BlockTooLarge { max_nbasis });
    }
    let skip = max_nbasis - nbasis + 1;
    log::trace!("shell pair ({l0}, {l1}) reset, max_nbasis={max_nbasis} skip={skip}");
    Ok((l0, l1, skip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ANG_MAX;
    use proptest::prelude::*;

    /// Collect (ibasis0, ibasis1, offset) before each of `npairs` advances.
    fn trace(st: &mut ShellPairStepper) -> (Vec<(usize, usize, usize)>, Vec<PairStep>) {
        let mut states = Vec::new();
        let mut steps = Vec::new();
        for _ in 0..st.npairs() {
            states.push((st.ibasis0(), st.ibasis1(), st.offset()));
            steps.push(st.advance());
        }
        (states, steps)
    }

    #[test]
    fn p_p_traversal() {
        let mut st = ShellPairStepper::new(1, 1, 3).unwrap();
        assert_eq!(st.skip(), 1);
        let (states, steps) = trace(&mut st);

        let ib0: Vec<usize> = states.iter().map(|s| s.0).collect();
        let ib1: Vec<usize> = states.iter().map(|s| s.1).collect();
        let off: Vec<usize> = states.iter().map(|s| s.2).collect();
        assert_eq!(ib0, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
        assert_eq!(ib1, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
        assert_eq!(off, (0..9).collect::<Vec<_>>());

        assert!(steps[..8].iter().all(|s| *s == PairStep::Advanced));
        assert_eq!(steps[8], PairStep::Exhausted);
        assert_eq!((st.ibasis0(), st.ibasis1(), st.offset()), (0, 0, 0));
        assert_eq!(st.n0(), [1, 0, 0]);
        assert_eq!(st.n1(), [1, 0, 0]);
    }

    #[test]
    fn s_s_exhausts_in_one_step() {
        let mut st = ShellPairStepper::new(0, 0, 1).unwrap();
        assert_eq!(st.advance(), PairStep::Exhausted);
        assert_eq!((st.ibasis0(), st.ibasis1(), st.offset()), (0, 0, 0));
        assert_eq!(st.n0(), [0, 0, 0]);
        assert_eq!(st.n1(), [0, 0, 0]);
    }

    #[test]
    fn skip_pads_rows() {
        let mut st = ShellPairStepper::new(1, 1, 5).unwrap();
        assert_eq!(st.skip(), 3);
        let (states, _) = trace(&mut st);
        let off: Vec<usize> = states.iter().map(|s| s.2).collect();
        assert_eq!(off, vec![0, 1, 2, 5, 6, 7, 10, 11, 12]);
    }

    #[test]
    fn triples_follow_row_major_product() {
        let mut st = ShellPairStepper::new(1, 2, 6).unwrap();
        assert_eq!(st.npairs(), 18);
        for _ in 0..7 {
            st.advance();
        }
        // second p function, second d function
        assert_eq!(st.n0(), [0, 1, 0]);
        assert_eq!(st.n1(), [1, 1, 0]);
        assert_eq!((st.ibasis0(), st.ibasis1(), st.offset()), (1, 1, 7));
    }

    #[test]
    fn reset_restores_initial_state() {
        let fresh = ShellPairStepper::new(2, 1, 4).unwrap();
        let mut st = fresh.clone();
        for _ in 0..5 {
            st.advance();
        }
        assert_ne!(st, fresh);
        st.reset(2, 1, 4).unwrap();
        assert_eq!(st, fresh);
        st.reset(2, 1, 4).unwrap();
        assert_eq!(st, fresh);
    }

    #[test]
    fn reset_switches_shells() {
        let mut st = ShellPairStepper::new(0, 0, 1).unwrap();
        st.reset(3, 1, 3).unwrap();
        assert_eq!(st.n0(), [3, 0, 0]);
        assert_eq!(st.n1(), [1, 0, 0]);
        assert_eq!(st.npairs(), 30);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            ShellPairStepper::new(1, 2, 5),
            Err(StepperError::BasisWidthTooSmall { max_nbasis: 5, nbasis: 6 })
        );
        assert_eq!(
            ShellPairStepper::new(-1, 0, 1),
            Err(StepperError::NegativeShellType { shell_type: -1 })
        );
        assert!(matches!(
            ShellPairStepper::new(0, 20, 1000),
            Err(StepperError::ShellTypeTooHigh { shell_type: 20, .. })
        ));
    }

    #[test]
    fn rejects_block_wider_than_address_space() {
        assert_eq!(
            ShellPairStepper::new(1, 0, usize::MAX),
            Err(StepperError::BlockTooLarge { max_nbasis: usize::MAX })
        );
        // a single-row block never multiplies the width
        let mut st = ShellPairStepper::new(0, 1, usize::MAX).unwrap();
        assert_eq!(st.skip(), usize::MAX - 2);
        while st.advance().is_advanced() {}
        assert_eq!(st.offset(), 0);

        let max_nbasis = usize::MAX / 2;
        let mut st = ShellPairStepper::new(1, 0, max_nbasis).unwrap();
        let offsets: Vec<usize> = (0..2).map(|_| { st.advance(); st.offset() }).collect();
        assert_eq!(offsets, vec![max_nbasis, 2 * max_nbasis]);
        assert_eq!(st.advance(), PairStep::Exhausted);
    }

    #[test]
    fn failed_reset_keeps_state() {
        let mut st = ShellPairStepper::new(1, 1, 3).unwrap();
        st.advance();
        let before = st.clone();
        assert!(st.reset(1, 2, 3).is_err());
        assert_eq!(st, before);
    }

    proptest! {
        #[test]
        fn cycle_matches_nested_loops(
            l0 in 0..=6i32,
            l1 in 0..=6i32,
            pad in 0..4usize,
        ) {
            let max_nbasis = ncart(l1 as usize) + pad;
            let mut st = ShellPairStepper::new(l0, l1, max_nbasis).unwrap();
            let n = st.npairs();
            for i in 0..n {
                let (i0, i1) = (i / ncart(l1 as usize), i % ncart(l1 as usize));
                prop_assert_eq!(st.ibasis0(), i0);
                prop_assert_eq!(st.ibasis1(), i1);
                prop_assert_eq!(st.offset(), i0 * max_nbasis + i1);
                let n0 = st.n0();
                let n1 = st.n1();
                prop_assert_eq!(n0.iter().sum::<usize>(), l0 as usize);
                prop_assert_eq!(n1.iter().sum::<usize>(), l1 as usize);
                let step = st.advance();
                prop_assert_eq!(step.is_advanced(), i + 1 < n);
            }
            prop_assert_eq!(st, ShellPairStepper::new(l0, l1, max_nbasis).unwrap());
        }

        #[test]
        fn skip_formula(l1 in 0..=ANG_MAX, pad in 0..100usize) {
            let nb = ncart(l1);
            let st = ShellPairStepper::new(0, l1 as i32, nb + pad).unwrap();
            prop_assert_eq!(st.skip(), pad + 1);
        }
    }
}
