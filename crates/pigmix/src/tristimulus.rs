//! Integrating reflectance spectra to CIE XYZ.

use crate::core::ThreeSum;
use crate::data::SpectralData;
use crate::reflectance::ReflectanceSpectrum;
use crate::Float;

/// CIE XYZ tristimulus values.
///
/// Values are normalized so that a perfect reflector under the dataset's
/// illuminant has Y = 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Tristimulus {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Tristimulus {
    /// Create new tristimulus values.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Get the xy chromaticity.
    ///
    /// For black, i.e., all zero tristimulus values, this method returns the
    /// origin.
    pub fn chromaticity(&self) -> [Float; 2] {
        let sum = self.x + self.y + self.z;
        if sum == 0.0 {
            [0.0, 0.0]
        } else {
            [self.x / sum, self.y / sum]
        }
    }
}

impl From<[Float; 3]> for Tristimulus {
    fn from(value: [Float; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Tristimulus> for [Float; 3] {
    fn from(value: Tristimulus) -> Self {
        [value.x, value.y, value.z]
    }
}

/// Integrate the reflectance spectrum with the dataset's observer and
/// illuminant.
///
/// This function computes a rectangular Riemann sum with the dataset's step
/// and divides by the dataset's normalization factor.
pub fn integrate(data: &SpectralData, spectrum: &ReflectanceSpectrum) -> Tristimulus {
    let mut sum = ThreeSum::new();
    for ((&reflectance, &power), &[x, y, z]) in spectrum
        .values()
        .iter()
        .zip(data.illuminant())
        .zip(data.observer())
    {
        let weight = reflectance * power;
        sum += [weight * x, weight * y, weight * z];
    }

    let scale = data.step() / data.normalization();
    let [x, y, z] = sum.value();
    Tristimulus::new(x * scale, y * scale, z * scale)
}

#[cfg(test)]
mod test {
    use super::{integrate, Tristimulus};
    use crate::reflectance::{mix, Mixture};
    use crate::test_util::{fixture, perfect_reflector};
    use crate::Pigment;

    #[test]
    fn test_white_point() {
        let data = fixture();
        let white = integrate(&data, &perfect_reflector(&data));
        assert!((white.y - 1.0).abs() < 1e-12, "{:?}", white);
        assert!((white.x - 0.95047).abs() < 1e-3, "{:?}", white);
        assert!((white.z - 1.08883).abs() < 1e-3, "{:?}", white);

        let [x, y] = white.chromaticity();
        assert!((x - 0.3127).abs() < 1e-3, "x = {}", x);
        assert!((y - 0.3290).abs() < 1e-3, "y = {}", y);
    }

    #[test]
    fn test_black() {
        assert_eq!(Tristimulus::default().chromaticity(), [0.0, 0.0], "black chromaticity");
    }

    #[test]
    fn test_luminance() {
        let data = fixture();
        let white = integrate(&data, &mix(&data, &Mixture::single(Pigment::White)).unwrap());
        let black = integrate(&data, &mix(&data, &Mixture::single(Pigment::Black)).unwrap());
        assert!(0.8 < white.y && white.y < 0.9, "{:?}", white);
        assert!(0.0 < black.y && black.y < 0.05, "{:?}", black);
    }
}
