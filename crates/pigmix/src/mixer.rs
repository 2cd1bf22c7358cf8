//! The entry points for computing pigment colors.
//!
//! A [`Mixer`] combines a loaded spectral dataset with options. Since it can
//! only be created from a dataset, computing colors before the dataset has
//! been loaded is impossible. It is cheap to clone and can be shared between
//! threads.

use alloc::sync::Arc;
use core::num::NonZeroUsize;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::convert::{mix_light, DisplayColor};
use crate::data::SpectralData;
use crate::error::{Error, InvalidSelectionError};
use crate::gamut::{check_count, GamutSample, RatioCombinations};
use crate::opt::Options;
use crate::reflectance::{mix, Mixture, ReflectanceSpectrum};
use crate::ternary::{CornerLabel, TernaryPlot, TernaryPoint};
use crate::tristimulus::{integrate, Tristimulus};
use crate::{Float, Pigment};

/// The result of mixing pigments both ways.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MixResult {
    /// The color of mixing paint per Kubelka-Munk.
    pub km: DisplayColor,
    /// The color of mixing the pigments' colors as light.
    pub light: DisplayColor,
}

/// A pigment mixer.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "pigmix"))]
#[derive(Clone, Debug)]
pub struct Mixer {
    data: Arc<SpectralData>,
    options: Options,
}

impl Mixer {
    /// Create a new mixer.
    pub fn new(data: Arc<SpectralData>, options: Options) -> Self {
        Self { data, options }
    }

    /// Get the spectral dataset.
    pub fn data(&self) -> &SpectralData {
        &self.data
    }

    /// Get the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Turn a selection of pigment names and ratios into a mixture.
    ///
    /// A selection has two or three pigments, given by their exact names, and
    /// exactly as many ratios. All pigments must be included in the dataset.
    pub fn select<S: AsRef<str>>(&self, names: &[S], ratios: &[Float]) -> Result<Mixture, Error> {
        check_count(names.len())?;
        if names.len() != ratios.len() {
            return Err(InvalidSelectionError::ArityMismatch {
                names: names.len(),
                ratios: ratios.len(),
            }
            .into());
        }

        let mut parts = Vec::with_capacity(names.len());
        for (name, ratio) in names.iter().zip(ratios) {
            let pigment: Pigment = name.as_ref().parse()?;
            self.data.spectrum(pigment)?;
            parts.push((pigment, *ratio));
        }

        Ok(Mixture::new(parts)?)
    }

    /// Compute the mixture's reflectance spectrum.
    ///
    /// If enabled, the spectrum includes the Saunderson correction.
    pub fn reflectance(
        &self,
        mixture: &Mixture,
    ) -> Result<ReflectanceSpectrum, InvalidSelectionError> {
        let mut spectrum = mix(&self.data, mixture)?;
        if let Some(correction) = self.options.saunderson() {
            spectrum = spectrum.corrected(&correction);
        }
        Ok(spectrum)
    }

    /// Compute the mixture's tristimulus values.
    pub fn tristimulus(&self, mixture: &Mixture) -> Result<Tristimulus, InvalidSelectionError> {
        Ok(integrate(&self.data, &self.reflectance(mixture)?))
    }

    /// Compute the color of the pigment by itself.
    pub fn color_of(&self, pigment: Pigment) -> Result<DisplayColor, InvalidSelectionError> {
        self.mix_km(&Mixture::single(pigment))
    }

    /// Compute the color of the mixture per Kubelka-Munk.
    pub fn mix_km(&self, mixture: &Mixture) -> Result<DisplayColor, InvalidSelectionError> {
        let tristimulus = self.tristimulus(mixture)?;
        let color = DisplayColor::from(&tristimulus);
        log::trace!("mixed {:?} as paint into {}", mixture, color);
        Ok(color)
    }

    /// Compute the color of mixing the colors of the mixture's pigments as
    /// light.
    pub fn mix_light(&self, mixture: &Mixture) -> Result<DisplayColor, InvalidSelectionError> {
        let mut colors = Vec::with_capacity(mixture.len());
        for (pigment, weight) in mixture.weights() {
            colors.push((self.color_of(pigment)?, weight));
        }

        let color = mix_light(colors);
        log::trace!("mixed {:?} as light into {}", mixture, color);
        Ok(color)
    }

    /// Compute the color of the mixture both ways.
    pub fn mix(&self, mixture: &Mixture) -> Result<MixResult, InvalidSelectionError> {
        Ok(MixResult {
            km: self.mix_km(mixture)?,
            light: self.mix_light(mixture)?,
        })
    }

    /// Sample the gamut of two or three pigments with the configured number of
    /// steps.
    pub fn gamut(&self, pigments: &[Pigment]) -> Result<Vec<GamutSample>, InvalidSelectionError> {
        self.gamut_with_steps(pigments, self.options.steps())
    }

    /// Sample the gamut of two or three pigments with the given number of
    /// steps.
    ///
    /// This method validates the pigments before computing any colors, so it
    /// either fails or returns the complete gamut.
    pub fn gamut_with_steps(
        &self,
        pigments: &[Pigment],
        steps: NonZeroUsize,
    ) -> Result<Vec<GamutSample>, InvalidSelectionError> {
        let combinations = RatioCombinations::new(pigments.len(), steps)?;
        for pigment in pigments {
            self.data.spectrum(*pigment)?;
        }

        log::debug!(
            "sampling gamut of {:?} with {} combinations",
            pigments,
            combinations.len()
        );

        let mut samples = Vec::with_capacity(combinations.len());
        for ratios in combinations {
            let mixture = Mixture::of_combination(pigments, &ratios);
            samples.push(GamutSample {
                ratios,
                color: self.mix_km(&mixture)?,
            });
        }
        Ok(samples)
    }

    /// Label the corners of the ternary plot for three pigments.
    ///
    /// Unlike [`Mixer::ternary_plot`], this method only computes the colors
    /// of the three pigments by themselves.
    pub fn corners(
        &self,
        pigments: &[Pigment; 3],
    ) -> Result<[CornerLabel; 3], InvalidSelectionError> {
        let label = |pigment: Pigment, point| -> Result<CornerLabel, InvalidSelectionError> {
            Ok(CornerLabel {
                pigment,
                point,
                color: self.color_of(pigment)?,
            })
        };

        let [first, second, third] = *pigments;
        let [bottom_left, bottom_right, top] = self.options.canvas().corners();
        Ok([
            label(first, bottom_left)?,
            label(second, bottom_right)?,
            label(third, top)?,
        ])
    }

    /// Compute the ternary plot of three pigments with the configured steps
    /// and canvas.
    pub fn ternary_plot(&self, pigments: &[Pigment; 3]) -> Result<TernaryPlot, InvalidSelectionError> {
        let canvas = *self.options.canvas();
        let corners = self.corners(pigments)?;

        let points = self
            .gamut(pigments)?
            .into_iter()
            .map(|sample| {
                let ratios = sample.ratios.to_triple();
                TernaryPoint {
                    ratios,
                    point: canvas.project(&ratios),
                    color: sample.color,
                }
            })
            .collect();

        Ok(TernaryPlot {
            canvas,
            corners,
            points,
        })
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl Mixer {
    /// Load the spectral dataset from the JSON file and create a mixer with
    /// options from the environment. <i class=python-only>Python only!</i>
    #[staticmethod]
    pub fn load(path: &str) -> PyResult<Self> {
        let options = Options::from_environment();
        let data = SpectralData::from_path(path, &options)?;
        Ok(Self::new(Arc::new(data), options))
    }

    /// Compute the color of the pigment by itself. <i class=python-only>Python
    /// only!</i>
    #[pyo3(name = "color_of")]
    pub fn py_color_of(&self, pigment: Pigment) -> PyResult<DisplayColor> {
        Ok(self.color_of(pigment)?)
    }

    /// Compute the Kubelka-Munk and light mixing colors for the selection. <i
    /// class=python-only>Python only!</i>
    #[pyo3(name = "mix")]
    #[allow(clippy::needless_pass_by_value)]
    pub fn py_mix(
        &self,
        names: Vec<String>,
        ratios: Vec<Float>,
    ) -> PyResult<(DisplayColor, DisplayColor)> {
        let mixture = self.select(&names, &ratios)?;
        let result = self.mix(&mixture)?;
        Ok((result.km, result.light))
    }

    /// Sample the gamut of the named pigments. <i class=python-only>Python
    /// only!</i>
    #[pyo3(name = "gamut")]
    #[allow(clippy::needless_pass_by_value)]
    pub fn py_gamut(&self, names: Vec<String>) -> PyResult<Vec<(Vec<Float>, DisplayColor)>> {
        let pigments = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Pigment>, _>>()?;

        Ok(self
            .gamut(&pigments)?
            .into_iter()
            .map(|sample| (sample.ratios.to_vec(), sample.color))
            .collect())
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!(
            "Mixer(samples={}, pigments={})",
            self.data.len(),
            self.data.pigments().count()
        )
    }
}

#[cfg(test)]
mod test {
    use super::Mixer;
    use crate::error::{Error, InvalidMixtureError, InvalidSelectionError};
    use crate::gamut::MAX_STEPS;
    use crate::opt::Options;
    use crate::reflectance::{Mixture, Saunderson};
    use crate::test_util::fixture;
    use crate::{Float, Pigment};
    use alloc::sync::Arc;
    use core::num::NonZeroUsize;

    fn mixer() -> Mixer {
        Mixer::new(Arc::new(fixture()), Options::default())
    }

    #[test]
    fn test_select() {
        let mixer = mixer();
        let mixture = mixer.select(&["White", "Black"], &[1.0, 3.0]).unwrap();
        assert_eq!(
            mixture.iter().collect::<Vec<_>>(),
            vec![(Pigment::White, 1.0), (Pigment::Black, 3.0)],
            "parts in selection order"
        );

        assert_eq!(
            mixer.select(&["White"], &[1.0]),
            Err(Error::InvalidSelection(InvalidSelectionError::Count {
                actual: 1,
                min: 2,
                max: 3
            })),
            "single pigment"
        );
        assert_eq!(
            mixer.select(&["White", "Black"], &[1.0]),
            Err(Error::InvalidSelection(InvalidSelectionError::ArityMismatch {
                names: 2,
                ratios: 1
            })),
            "missing ratio"
        );
        assert_eq!(
            mixer.select(&["White", "black"], &[1.0, 1.0]),
            Err(Error::InvalidSelection(InvalidSelectionError::UnknownPigment(
                "black".to_owned()
            ))),
            "names are case-sensitive"
        );
        assert_eq!(
            mixer.select(&["White", "Pyrrole Orange"], &[1.0, 1.0]),
            Err(Error::InvalidSelection(InvalidSelectionError::Unavailable(
                "Pyrrole Orange"
            ))),
            "pigment without data"
        );
        assert_eq!(
            mixer.select(&["White", "Black"], &[0.0, 0.0]),
            Err(Error::InvalidMixture(InvalidMixtureError::ZeroTotal(0.0))),
            "zero ratios"
        );
    }

    #[test]
    fn test_single_and_mixed() {
        let mixer = mixer();
        for pigment in mixer.data().pigments() {
            let color = mixer.color_of(pigment).unwrap();
            assert_eq!(
                mixer.mix_km(&Mixture::single(pigment)).unwrap(),
                color,
                "{} by itself",
                pigment
            );

            let doubled = Mixture::try_from([(pigment, 0.5), (pigment, 1.5)]).unwrap();
            assert_eq!(mixer.mix_km(&doubled).unwrap(), color, "{} twice", pigment);
        }
    }

    #[test]
    fn test_huge_ratios() {
        let mixer = mixer();
        let unit = mixer.select(&["White", "Black"], &[1.0, 1.0]).unwrap();
        let huge = mixer
            .select(&["White", "Black"], &[Float::MAX, Float::MAX])
            .unwrap();

        let gray = mixer.mix(&unit).unwrap();
        assert_eq!(mixer.mix(&huge).unwrap(), gray, "huge ratios mix like unit ratios");
        assert_ne!(gray.km[1], 0, "gray is not black");
    }

    #[test]
    fn test_neutral_gray() {
        let mixer = mixer();
        let white = mixer.color_of(Pigment::White).unwrap();
        let black = mixer.color_of(Pigment::Black).unwrap();
        let gray = Mixture::try_from([(Pigment::White, 0.5), (Pigment::Black, 0.5)]).unwrap();
        let result = mixer.mix(&gray).unwrap();

        for color in [white, black, result.km, result.light] {
            assert!(color[0].abs_diff(color[1]) <= 1, "{}", color);
            assert!(color[1].abs_diff(color[2]) <= 1, "{}", color);
        }
        assert!(
            black[1] < result.km[1] && result.km[1] < white[1],
            "{} between {} and {}",
            result.km,
            black,
            white
        );
        assert!(
            black[1] < result.light[1] && result.light[1] < white[1],
            "{} between {} and {}",
            result.light,
            black,
            white
        );

        // Paint darkens much faster than light.
        assert!(result.km[1] < result.light[1], "{:?}", result);
    }

    #[test]
    fn test_gamut_endpoints() {
        let mixer = mixer();
        let pigments = [Pigment::HansaYellow, Pigment::CobaltBlue];
        let gamut = mixer
            .gamut_with_steps(&pigments, NonZeroUsize::new(10).unwrap())
            .unwrap();

        assert_eq!(gamut.len(), 11, "number of samples");
        assert_eq!(gamut[0].ratios.as_slice(), &[0.0, 1.0], "first ratios");
        assert_eq!(
            gamut[0].color,
            mixer.color_of(Pigment::CobaltBlue).unwrap(),
            "first sample is second pigment"
        );
        assert_eq!(
            gamut[10].color,
            mixer.color_of(Pigment::HansaYellow).unwrap(),
            "last sample is first pigment"
        );
    }

    #[test]
    fn test_gamut_errors() {
        let mixer = mixer();
        assert!(
            matches!(
                mixer.gamut(&[Pigment::White]),
                Err(InvalidSelectionError::Count { actual: 1, .. })
            ),
            "too few pigments"
        );
        assert!(
            matches!(
                mixer.gamut(&[Pigment::White, Pigment::Black, Pigment::HansaYellow, Pigment::CobaltBlue]),
                Err(InvalidSelectionError::Count { actual: 4, .. })
            ),
            "too many pigments"
        );
        assert_eq!(
            mixer.gamut(&[Pigment::White, Pigment::PyrroleOrange]),
            Err(InvalidSelectionError::Unavailable("Pyrrole Orange")),
            "pigment without data"
        );

        for steps in [MAX_STEPS + 1, usize::MAX] {
            assert_eq!(
                mixer.gamut_with_steps(
                    &[Pigment::White, Pigment::Black, Pigment::CobaltBlue],
                    NonZeroUsize::new(steps).unwrap()
                ),
                Err(InvalidSelectionError::TooManySteps {
                    steps,
                    max: MAX_STEPS
                }),
                "{} steps",
                steps
            );
        }
    }

    #[test]
    fn test_corners() {
        let mixer = mixer();
        let pigments = [Pigment::White, Pigment::Black, Pigment::PyrroleRed];
        let corners = mixer.corners(&pigments).unwrap();
        let points = mixer.options().canvas().corners();

        for ((corner, pigment), point) in corners.iter().zip(pigments).zip(points) {
            assert_eq!(corner.pigment, pigment, "pigment");
            assert_eq!(corner.point, point, "{} point", pigment);
            assert_eq!(corner.color, mixer.color_of(pigment).unwrap(), "{} color", pigment);
        }

        assert_eq!(
            mixer.corners(&[Pigment::White, Pigment::Black, Pigment::PyrroleOrange]),
            Err(InvalidSelectionError::Unavailable("Pyrrole Orange")),
            "pigment without data"
        );
    }

    #[test]
    fn test_ternary_plot() {
        let mixer = mixer();
        let pigments = [Pigment::HansaYellow, Pigment::CobaltBlue, Pigment::PyrroleRed];
        let plot = mixer.ternary_plot(&pigments).unwrap();

        assert_eq!(plot.points.len(), 231, "number of points");
        assert_eq!(plot.corners, mixer.corners(&pigments).unwrap(), "corners");
        for corner in &plot.corners {
            let pure = plot
                .points
                .iter()
                .find(|p| p.point == corner.point)
                .unwrap();
            assert_eq!(pure.color, corner.color, "{} at its corner", corner.pigment);
        }
    }

    #[test]
    fn test_saunderson() {
        let data = Arc::new(fixture());
        let plain = Mixer::new(data.clone(), Options::default());
        let identity = Mixer::new(
            data.clone(),
            Options::builder()
                .saunderson(Saunderson::new(0.0, 0.0))
                .build(),
        );
        let corrected = Mixer::new(
            data,
            Options::builder()
                .saunderson(Saunderson::new(0.1, 0.2))
                .build(),
        );

        let white = plain.color_of(Pigment::White).unwrap();
        assert_eq!(
            identity.color_of(Pigment::White).unwrap(),
            white,
            "identity correction"
        );
        let darker = corrected.color_of(Pigment::White).unwrap();
        assert!(darker[1] < white[1], "{} {}", darker, white);
    }
}
