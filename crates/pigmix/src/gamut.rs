//! Enumerating the ratio combinations of two or three pigments.
//!
//! A gamut samples all mixtures of two or three pigments whose ratios are
//! multiples of `1/steps` and add up to one. For two pigments, that makes for
//! `steps + 1` combinations. For three pigments, it makes for `(steps + 1)(steps
//! + 2)/2` combinations, which cover the ternary simplex. The number of steps
//! is limited to [`MAX_STEPS`].
//!
//! ```
//! # use pigmix::gamut::RatioCombinations;
//! # use std::num::NonZeroUsize;
//! let steps = NonZeroUsize::new(2).unwrap();
//! let ratios: Vec<_> = RatioCombinations::new(3, steps)?
//!     .map(|combination| combination.to_vec())
//!     .collect();
//!
//! assert_eq!(ratios, vec![
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.0, 0.5, 0.5],
//!     vec![0.0, 1.0, 0.0],
//!     vec![0.5, 0.0, 0.5],
//!     vec![0.5, 0.5, 0.0],
//!     vec![1.0, 0.0, 0.0],
//! ]);
//! # Ok::<(), pigmix::error::InvalidSelectionError>(())
//! ```

use core::num::NonZeroUsize;

use crate::convert::DisplayColor;
use crate::error::InvalidSelectionError;
use crate::Float;

/// The smallest number of pigments in a gamut.
pub const MIN_PIGMENTS: usize = 2;

/// The largest number of pigments in a gamut.
pub const MAX_PIGMENTS: usize = 3;

/// The largest number of steps per gamut edge.
///
/// A three-pigment gamut at this resolution has 501,501 samples.
pub const MAX_STEPS: usize = 1_000;

/// Check that a gamut or selection has two or three pigments.
pub(crate) fn check_count(count: usize) -> Result<(), InvalidSelectionError> {
    if (MIN_PIGMENTS..=MAX_PIGMENTS).contains(&count) {
        Ok(())
    } else {
        Err(InvalidSelectionError::Count {
            actual: count,
            min: MIN_PIGMENTS,
            max: MAX_PIGMENTS,
        })
    }
}

/// The ratios of a two- or three-pigment mixture, adding up to one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum RatioCombination {
    Pair([Float; 2]),
    Triple([Float; 3]),
}

impl RatioCombination {
    /// Get the ratios as a slice.
    pub fn as_slice(&self) -> &[Float] {
        match *self {
            Self::Pair(ref ratios) => ratios,
            Self::Triple(ref ratios) => ratios,
        }
    }

    /// Get the ratios as a vector.
    pub fn to_vec(&self) -> Vec<Float> {
        self.as_slice().to_vec()
    }

    /// Get the ratios as a triple, padding pairs with zero.
    pub fn to_triple(&self) -> [Float; 3] {
        match *self {
            Self::Pair([a, b]) => [a, b, 0.0],
            Self::Triple(ratios) => ratios,
        }
    }
}

impl AsRef<[Float]> for RatioCombination {
    fn as_ref(&self) -> &[Float] {
        self.as_slice()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// An iterator over all ratio combinations at the given resolution.
///
/// For two pigments, the iterator yields `(i/steps, (steps - i)/steps)` for
/// increasing `i`. For three pigments, it yields `(i/steps, j/steps,
/// k/steps)` with `i + j + k = steps`, with `i` the outer and `j` the inner
/// loop, both increasing.
#[derive(Debug)]
pub struct RatioCombinations {
    arity: usize,
    steps: usize,
    i: usize,
    j: usize,
    remaining: usize,
}

impl RatioCombinations {
    /// Create a new iterator for the given number of pigments.
    ///
    /// This method fails if the count is not two or three or if the steps
    /// exceed [`MAX_STEPS`].
    pub fn new(count: usize, steps: NonZeroUsize) -> Result<Self, InvalidSelectionError> {
        check_count(count)?;

        let steps = steps.get();
        if MAX_STEPS < steps {
            return Err(InvalidSelectionError::TooManySteps {
                steps,
                max: MAX_STEPS,
            });
        }
        let remaining = if count == 2 {
            steps + 1
        } else {
            (steps + 1) * (steps + 2) / 2
        };

        Ok(Self {
            arity: count,
            steps,
            i: 0,
            j: 0,
            remaining,
        })
    }

    #[inline]
    fn ratio(&self, n: usize) -> Float {
        n as Float / self.steps as Float
    }
}

impl Iterator for RatioCombinations {
    type Item = RatioCombination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let i = self.i;
        if self.arity == 2 {
            self.i += 1;
            return Some(RatioCombination::Pair([
                self.ratio(i),
                self.ratio(self.steps - i),
            ]));
        }

        let j = self.j;
        if i + j == self.steps {
            self.i += 1;
            self.j = 0;
        } else {
            self.j += 1;
        }

        Some(RatioCombination::Triple([
            self.ratio(i),
            self.ratio(j),
            self.ratio(self.steps - i - j),
        ]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl core::iter::ExactSizeIterator for RatioCombinations {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl core::iter::FusedIterator for RatioCombinations {}

// --------------------------------------------------------------------------------------------------------------------

/// A gamut sample combining the ratios with the resulting color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GamutSample {
    pub ratios: RatioCombination,
    pub color: DisplayColor,
}
