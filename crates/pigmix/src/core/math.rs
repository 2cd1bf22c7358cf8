use crate::Float;

/// A floating point accumulator.
///
/// Unlike plain summation with the `+` operator, this struct minimizes the
/// cumulative error by using [Kahan's algorithm with Neumaier's
/// improvements](https://en.wikipedia.org/wiki/Kahan_summation_algorithm).
#[derive(Debug, Default)]
pub(crate) struct Sum {
    sum: Float,
    compensation: Float,
}

impl Sum {
    /// Create a new, zero-valued sum.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// Get the accumulated value.
    #[inline]
    pub fn value(&self) -> Float {
        self.sum + self.compensation
    }
}

impl core::ops::AddAssign<Float> for Sum {
    fn add_assign(&mut self, rhs: Float) {
        let t = self.sum + rhs;
        if rhs.abs() < self.sum.abs() {
            self.compensation += (self.sum - t) + rhs;
        } else {
            self.compensation += (rhs - t) + self.sum;
        }
        self.sum = t;
    }
}

/// Three floating point accumulators side by side.
///
/// This struct sums triples componentwise, e.g., the weighted observer values
/// that make up tristimulus values.
#[derive(Debug, Default)]
pub(crate) struct ThreeSum {
    sums: [Sum; 3],
}

impl ThreeSum {
    /// Create a new, zero-valued triple sum.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sums: [Sum::new(), Sum::new(), Sum::new()],
        }
    }

    /// Get the accumulated triple.
    #[inline]
    pub fn value(&self) -> [Float; 3] {
        [
            self.sums[0].value(),
            self.sums[1].value(),
            self.sums[2].value(),
        ]
    }
}

impl core::ops::AddAssign<[Float; 3]> for ThreeSum {
    fn add_assign(&mut self, rhs: [Float; 3]) {
        self.sums[0] += rhs[0];
        self.sums[1] += rhs[1];
        self.sums[2] += rhs[2];
    }
}

#[cfg(test)]
mod test {
    use super::{Sum, ThreeSum};

    #[test]
    fn test_sum() {
        let mut sum = Sum::new();
        sum += 1.0;
        sum += 1e30;
        sum += 1.0;
        sum += -1e30;
        assert_eq!(sum.value(), 2.0, "compensated sum");
        assert_eq!(1.0 + 1e30 + 1.0 - 1e30, 0.0, "naive sum");
    }

    #[test]
    fn test_three_sum() {
        let mut sum = ThreeSum::new();
        sum += [1.0, 2.0, 3.0];
        sum += [0.5, 0.25, 0.125];
        assert_eq!(sum.value(), [1.5, 2.25, 3.125], "componentwise sums");
    }
}
