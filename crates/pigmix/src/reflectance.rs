//! Mixing pigments with the Kubelka-Munk model.
//!
//! The Kubelka-Munk model describes an opaque paint layer by its absorption
//! coefficient K and scattering coefficient S. Mixing pigments mixes these
//! coefficients linearly, weighted by each pigment's share of the mixture.
//! The reflectance of an infinitely thick layer then is
//!
//! ```text
//! R∞ = 1 + K/S - √((K/S)² + 2·K/S)
//! ```
//!
//! Since a layer without scattering reflects nothing, this module treats S = 0
//! as full absorption, including for K = 0.
//!
//! Real paint layers also reflect some light at their surface, which the
//! Saunderson correction accounts for. It is disabled by default.

use crate::core::Sum;
use crate::data::SpectralData;
use crate::error::{InvalidMixtureError, InvalidSelectionError};
use crate::gamut::RatioCombination;
use crate::{Float, Pigment};

/// A mixture of pigments in given ratios.
///
/// A mixture is never empty, all ratios are finite and non-negative, and the
/// total is positive. Ratios are relative; scaling all of them by the same
/// factor results in the same mixture.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Mixture {
    parts: Vec<(Pigment, Float)>,
    #[serde(skip)]
    scale: Float,
    total: Float,
}

/// Add up the ratios.
///
/// This function returns the scale and the total of the ratios divided by the
/// scale. The scale is one unless the ratios are too large to add up, in
/// which case it is the largest ratio.
fn add_up(parts: &[(Pigment, Float)]) -> (Float, Float) {
    let mut total = Sum::new();
    for &(_, ratio) in parts {
        total += ratio;
    }

    let total = total.value();
    if total.is_finite() {
        return (1.0, total);
    }

    let largest = parts.iter().map(|&(_, ratio)| ratio).fold(0.0, Float::max);
    let mut total = Sum::new();
    for &(_, ratio) in parts {
        total += ratio / largest;
    }
    (largest, total.value())
}

impl Mixture {
    /// Create a new mixture from pigments and their ratios.
    pub fn new(parts: Vec<(Pigment, Float)>) -> Result<Self, InvalidMixtureError> {
        if parts.is_empty() {
            return Err(InvalidMixtureError::Empty);
        }

        for &(pigment, ratio) in &parts {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(InvalidMixtureError::BadRatio {
                    pigment: pigment.name(),
                    ratio,
                });
            }
        }

        let (scale, total) = add_up(&parts);
        if !total.is_finite() || total <= 0.0 {
            return Err(InvalidMixtureError::ZeroTotal(total));
        }

        Ok(Self { parts, scale, total })
    }

    /// Create a new mixture with only the given pigment.
    pub fn single(pigment: Pigment) -> Self {
        Self {
            parts: vec![(pigment, 1.0)],
            scale: 1.0,
            total: 1.0,
        }
    }

    /// Create a new mixture from a gamut's pigments and ratio combination.
    pub(crate) fn of_combination(pigments: &[Pigment], ratios: &RatioCombination) -> Self {
        let parts: Vec<_> = pigments
            .iter()
            .copied()
            .zip(ratios.as_slice().iter().copied())
            .collect();

        let (scale, total) = add_up(&parts);
        Self {
            parts,
            scale,
            total,
        }
    }

    /// Get the number of pigments in this mixture.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Determine whether this mixture is empty, which it never is.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Get the total of all ratios.
    ///
    /// The total is infinite for ratios too large to add up. Weights remain
    /// well-defined regardless.
    pub fn total(&self) -> Float {
        self.scale * self.total
    }

    /// Get an iterator over the pigments and their ratios.
    pub fn iter(&self) -> impl Iterator<Item = (Pigment, Float)> + '_ {
        self.parts.iter().copied()
    }

    /// Get an iterator over the pigments and their weights, i.e., their ratios
    /// divided by the total.
    pub fn weights(&self) -> impl Iterator<Item = (Pigment, Float)> + '_ {
        self.parts
            .iter()
            .map(|&(pigment, ratio)| (pigment, ratio / self.scale / self.total))
    }
}

impl From<Pigment> for Mixture {
    fn from(value: Pigment) -> Self {
        Mixture::single(value)
    }
}

impl TryFrom<&[(Pigment, Float)]> for Mixture {
    type Error = InvalidMixtureError;

    fn try_from(value: &[(Pigment, Float)]) -> Result<Self, Self::Error> {
        Mixture::new(value.to_vec())
    }
}

impl<const N: usize> TryFrom<[(Pigment, Float); N]> for Mixture {
    type Error = InvalidMixtureError;

    fn try_from(value: [(Pigment, Float); N]) -> Result<Self, Self::Error> {
        Mixture::new(value.to_vec())
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The Saunderson correction for surface reflection.
///
/// The correction computes `R' = (1 - k1)(1 - k2)·R / (1 - k2·R)`, with `k1`
/// the fraction of incoming light reflected at the surface and `k2` the
/// fraction of light inside the layer reflected back at the surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Saunderson {
    k1: Float,
    k2: Float,
}

impl Saunderson {
    /// Create a new correction.
    ///
    /// This method returns `None` unless both coefficients are in `[0, 1)`.
    pub fn new(k1: Float, k2: Float) -> Option<Self> {
        let valid = |k: Float| (0.0..1.0).contains(&k);
        (valid(k1) && valid(k2)).then_some(Self { k1, k2 })
    }

    /// Get the external reflection coefficient.
    pub fn k1(&self) -> Float {
        self.k1
    }

    /// Get the internal reflection coefficient.
    pub fn k2(&self) -> Float {
        self.k2
    }

    /// Correct the reflectance.
    #[inline]
    pub fn apply(&self, reflectance: Float) -> Float {
        (1.0 - self.k1) * (1.0 - self.k2) * reflectance / (-self.k2).mul_add(reflectance, 1.0)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A reflectance spectrum.
///
/// Each value is in `[0, 1]` and corresponds to the wavelength with the same
/// index in the dataset the spectrum was computed from.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ReflectanceSpectrum(Vec<Float>);

impl ReflectanceSpectrum {
    /// Create a new reflectance spectrum from measured values.
    ///
    /// Values are clamped to `[0, 1]`, with not-a-number becoming zero.
    pub fn new(mut values: Vec<Float>) -> Self {
        for value in values.iter_mut() {
            *value = if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, 1.0)
            };
        }
        Self(values)
    }

    /// Get the number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Determine whether this spectrum is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the values.
    pub fn values(&self) -> &[Float] {
        &self.0
    }

    /// Apply the Saunderson correction to this spectrum.
    #[must_use]
    pub fn corrected(mut self, correction: &Saunderson) -> Self {
        for value in self.0.iter_mut() {
            *value = correction.apply(*value);
        }
        self
    }
}

impl AsRef<[Float]> for ReflectanceSpectrum {
    fn as_ref(&self) -> &[Float] {
        &self.0
    }
}

impl core::ops::Index<usize> for ReflectanceSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Compute the reflectance of an infinitely thick layer.
///
/// Without scattering, the layer absorbs all light and the reflectance is
/// zero. The result is clamped to `[0, 1]`.
pub fn kubelka_munk(k: Float, s: Float) -> Float {
    if s == 0.0 {
        return 0.0;
    }

    let ks = k / s;
    if !ks.is_finite() {
        return 0.0;
    }

    let ks2 = ks * (ks + 2.0);
    (1.0 + ks - ks2.sqrt()).clamp(0.0, 1.0)
}

/// Compute the reflectance spectrum of the mixture.
///
/// This function fails if the dataset has no data for one of the mixture's
/// pigments.
pub fn mix(
    data: &SpectralData,
    mixture: &Mixture,
) -> Result<ReflectanceSpectrum, InvalidSelectionError> {
    let mut k = vec![0.0; data.len()];
    let mut s = vec![0.0; data.len()];

    for (pigment, weight) in mixture.weights() {
        let spectrum = data.spectrum(pigment)?;
        for (mixed, value) in k.iter_mut().zip(spectrum.k()) {
            *mixed = weight.mul_add(*value, *mixed);
        }
        for (mixed, value) in s.iter_mut().zip(spectrum.s()) {
            *mixed = weight.mul_add(*value, *mixed);
        }
    }

    let opaque = s.iter().filter(|s| **s == 0.0).count();
    if 0 < opaque {
        log::warn!(
            "treating {} of {} wavelengths without scattering as fully absorbing",
            opaque,
            s.len()
        );
    }

    let values = k
        .into_iter()
        .zip(s)
        .map(|(k, s)| kubelka_munk(k, s))
        .collect();
    Ok(ReflectanceSpectrum(values))
}

#[cfg(test)]
mod test {
    use super::{kubelka_munk, mix, Mixture, Saunderson};
    use crate::error::{InvalidMixtureError, InvalidSelectionError};
    use crate::test_util::fixture;
    use crate::{Float, Pigment};

    #[test]
    fn test_kubelka_munk() {
        assert_eq!(kubelka_munk(0.0, 1.0), 1.0, "no absorption");
        assert_eq!(kubelka_munk(1.0, 0.0), 0.0, "no scattering");
        assert_eq!(kubelka_munk(0.0, 0.0), 0.0, "neither");

        // K/S = 1 yields 2 - √3.
        let r = kubelka_munk(0.5, 0.5);
        assert!((r - (2.0 - (3.0 as Float).sqrt())).abs() < 1e-12, "{}", r);

        let mut previous = 1.0;
        for ks in [0.001, 0.01, 0.1, 1.0, 10.0, 100.0] {
            let r = kubelka_munk(ks, 1.0);
            assert!(0.0 < r && r < previous, "{} {}", ks, r);
            previous = r;
        }
    }

    #[test]
    fn test_mixture_validation() {
        assert_eq!(Mixture::new(vec![]), Err(InvalidMixtureError::Empty), "empty");
        assert_eq!(
            Mixture::new(vec![(Pigment::White, 0.0), (Pigment::Black, 0.0)]),
            Err(InvalidMixtureError::ZeroTotal(0.0)),
            "all zero"
        );
        assert_eq!(
            Mixture::try_from([(Pigment::White, 2.0), (Pigment::Black, -1.0)]),
            Err(InvalidMixtureError::BadRatio {
                pigment: "Black",
                ratio: -1.0
            }),
            "negative"
        );
        assert!(Mixture::try_from([(Pigment::White, Float::NAN)]).is_err(), "NaN");
        assert!(Mixture::try_from([(Pigment::White, Float::INFINITY)]).is_err(), "infinity");

        let mixture = Mixture::try_from([(Pigment::White, 3.0), (Pigment::Black, 1.0)]).unwrap();
        assert_eq!(mixture.total(), 4.0, "total");
        assert_eq!(
            mixture.weights().collect::<Vec<_>>(),
            vec![(Pigment::White, 0.75), (Pigment::Black, 0.25)],
            "weights"
        );
    }

    #[test]
    fn test_huge_ratios() {
        let huge = Mixture::try_from([(Pigment::White, Float::MAX), (Pigment::Black, Float::MAX)]).unwrap();
        assert_eq!(
            huge.weights().collect::<Vec<_>>(),
            vec![(Pigment::White, 0.5), (Pigment::Black, 0.5)],
            "weights of {:?}",
            huge
        );
        assert!(huge.total().is_infinite(), "total {}", huge.total());

        let data = fixture();
        let unit = Mixture::try_from([(Pigment::White, 1.0), (Pigment::Black, 1.0)]).unwrap();
        assert_eq!(mix(&data, &huge), mix(&data, &unit), "huge and unit ratios");
    }

    #[test]
    fn test_single_pigment() {
        let data = fixture();
        let white = mix(&data, &Mixture::single(Pigment::White)).unwrap();
        assert_eq!(white.len(), data.len(), "one value per wavelength");

        let scaled = Mixture::try_from([(Pigment::White, 7.0)]).unwrap();
        assert_eq!(mix(&data, &scaled).unwrap(), white, "scaled");

        // A zero ratio contributes nothing.
        let padded = Mixture::try_from([(Pigment::White, 1.0), (Pigment::Black, 0.0)]).unwrap();
        assert_eq!(mix(&data, &padded).unwrap(), white, "padded");

        let expected = kubelka_munk(0.01, 1.0);
        for value in white.values() {
            assert!((value - expected).abs() < 1e-12, "{} {}", value, expected);
        }
    }

    #[test]
    fn test_mix_between() {
        let data = fixture();
        let white = mix(&data, &Mixture::single(Pigment::White)).unwrap();
        let black = mix(&data, &Mixture::single(Pigment::Black)).unwrap();
        let gray = Mixture::try_from([(Pigment::White, 1.0), (Pigment::Black, 1.0)]).unwrap();
        let gray = mix(&data, &gray).unwrap();

        for index in 0..data.len() {
            assert!(
                black[index] < gray[index] && gray[index] < white[index],
                "gray at index {}",
                index
            );
        }
    }

    #[test]
    fn test_unavailable() {
        let data = fixture();
        assert_eq!(
            mix(&data, &Mixture::single(Pigment::PyrroleOrange)),
            Err(InvalidSelectionError::Unavailable("Pyrrole Orange")),
            "pigment without data"
        );
    }

    #[test]
    fn test_saunderson() {
        assert!(Saunderson::new(1.0, 0.2).is_none(), "k1 out of range");
        assert!(Saunderson::new(0.1, -0.2).is_none(), "k2 out of range");

        let correction = Saunderson::new(0.1, 0.2).unwrap();
        assert_eq!(correction.apply(0.0), 0.0, "black stays black");
        assert!((correction.apply(1.0) - 0.9).abs() < 1e-12, "{}", correction.apply(1.0));
        assert!((correction.apply(0.5) - 0.4).abs() < 1e-12, "{}", correction.apply(0.5));

        let identity = Saunderson::new(0.0, 0.0).unwrap();
        let data = fixture();
        let white = mix(&data, &Mixture::single(Pigment::White)).unwrap();
        assert_eq!(white.clone().corrected(&identity), white, "identity correction");
    }
}
