//! The spectral dataset underlying all color computations.
//!
//! A dataset samples the absorption coefficient K and the scattering
//! coefficient S of each pigment, the standard observer's color matching
//! functions x̄, ȳ, z̄, and an illuminant's relative power at the same,
//! uniformly spaced wavelengths. It is loaded once, validated, and then
//! shared read-only by all computations.
//!
//! There are three ways of creating a [`SpectralData`] instance:
//!
//!   * [`SpectralData::from_json_str`], [`SpectralData::from_reader`], and
//!     [`SpectralData::from_path`] parse a JSON array of records, one per
//!     wavelength, with fields `wavelength`, `x_bar`, `y_bar`, `z_bar`, the
//!     illuminant column (`power` by default), as well as `k <key>` and `s
//!     <key>` for each pigment [key](crate::Pigment::key).
//!   * [`SpectralData::from_samples`] assembles already parsed
//!     [`SpectralSample`]s.
//!   * [`SpectralDataBuilder`] joins per-pigment absorption and scattering
//!     measurements with the [CIE reference tables](crate::cie) on
//!     wavelength.
//!
//! Since loading happens once but computations may be requested at any time,
//! [`SpectralStore`] offers a process-wide, initialize-once home for the
//! dataset. It reports [`DataNotReadyError`] until the dataset has been
//! stored.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::cie::{Illuminant, Observer, CIE_ILLUMINANT_D65, CIE_OBSERVER_2DEG_1931};
use crate::core::Sum;
use crate::error::{DataNotReadyError, DatasetError, InvalidSelectionError};
use crate::opt::Options;
use crate::{Float, Mixer, Pigment};

/// The relative tolerance for uniformly spaced wavelengths.
const AXIS_TOLERANCE: Float = 1e-6;

/// A pigment's absorption and scattering coefficients at one wavelength.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Coefficients {
    /// The absorption coefficient K.
    pub k: Float,
    /// The scattering coefficient S.
    pub s: Float,
}

/// One wavelength's worth of spectral data.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralSample {
    /// The wavelength in nanometers.
    pub wavelength: Float,
    /// The color matching functions' values x̄, ȳ, z̄.
    pub observer: [Float; 3],
    /// The illuminant's relative power.
    pub power: Float,
    /// The coefficients of all pigments measured at this wavelength.
    pub pigments: BTreeMap<Pigment, Coefficients>,
}

impl SpectralSample {
    /// Create a new sample without pigments.
    pub fn new(wavelength: Float, observer: [Float; 3], power: Float) -> Self {
        Self {
            wavelength,
            observer,
            power,
            pigments: BTreeMap::new(),
        }
    }

    /// Add the pigment's coefficients to this sample.
    #[must_use]
    pub fn with(mut self, pigment: Pigment, k: Float, s: Float) -> Self {
        self.pigments.insert(pigment, Coefficients { k, s });
        self
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A pigment's absorption and scattering spectra.
#[derive(Clone, Debug, Default)]
pub struct PigmentSpectrum {
    k: Vec<Float>,
    s: Vec<Float>,
}

impl PigmentSpectrum {
    /// Get the absorption coefficients.
    #[inline]
    pub fn k(&self) -> &[Float] {
        &self.k
    }

    /// Get the scattering coefficients.
    #[inline]
    pub fn s(&self) -> &[Float] {
        &self.s
    }
}

/// A validated, immutable spectral dataset.
///
/// All spectra share the same wavelength axis, which increases in constant
/// steps. The dataset also caches the normalization factor Δλ·Σ I·ȳ, i.e., the
/// luminance of a perfect reflector, used when integrating tristimulus values.
#[derive(Clone, Debug)]
pub struct SpectralData {
    wavelengths: Vec<Float>,
    step: Float,
    observer: Vec<[Float; 3]>,
    illuminant: Vec<Float>,
    pigments: [Option<PigmentSpectrum>; Pigment::COUNT],
    normalization: Float,
}

impl SpectralData {
    /// Parse the JSON text into a dataset.
    pub fn from_json_str(text: &str, options: &Options) -> Result<Self, DatasetError> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(text)?;
        Self::from_records(&records, options)
    }

    /// Read and parse JSON from the reader into a dataset.
    pub fn from_reader<R: std::io::Read>(reader: R, options: &Options) -> Result<Self, DatasetError> {
        let records: Vec<Map<String, Value>> =
            serde_json::from_reader(std::io::BufReader::new(reader))?;
        Self::from_records(&records, options)
    }

    /// Read and parse the JSON file at the given path into a dataset.
    pub fn from_path<P: AsRef<std::path::Path>>(
        path: P,
        options: &Options,
    ) -> Result<Self, DatasetError> {
        log::debug!("loading spectral dataset from {}", path.as_ref().display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, options)
    }

    fn from_records(records: &[Map<String, Value>], options: &Options) -> Result<Self, DatasetError> {
        let Some(first) = records.first() else {
            return Err(DatasetError::TooFewSamples(0));
        };

        // A pigment is part of the dataset if the first record has its columns.
        let columns: Vec<(Pigment, String, String)> = Pigment::all()
            .map(|pigment| (pigment, pigment.k_column(), pigment.s_column()))
            .filter(|&(_, ref k, ref s)| number(first, k).is_some() && number(first, s).is_some())
            .collect();

        let illuminant = options.illuminant_column();
        let mut samples = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let mut sample = SpectralSample::new(
                field(index, record, "wavelength")?,
                [
                    field(index, record, "x_bar")?,
                    field(index, record, "y_bar")?,
                    field(index, record, "z_bar")?,
                ],
                field(index, record, illuminant)?,
            );

            for &(pigment, ref k, ref s) in &columns {
                sample = sample.with(pigment, field(index, record, k)?, field(index, record, s)?);
            }

            samples.push(sample);
        }

        Self::from_samples(samples)
    }

    /// Assemble a dataset from the given samples.
    ///
    /// The samples must be sorted by wavelength, with wavelengths increasing
    /// in constant steps. The pigments measured by the first sample determine
    /// the pigments of the dataset. All other samples must measure at least
    /// the same pigments.
    pub fn from_samples(samples: Vec<SpectralSample>) -> Result<Self, DatasetError> {
        let &[ref first, ref second, ..] = samples.as_slice() else {
            return Err(DatasetError::TooFewSamples(samples.len()));
        };

        let origin = first.wavelength;
        let step = second.wavelength - first.wavelength;
        let second_wavelength = second.wavelength;
        let available: Vec<Pigment> = first.pigments.keys().copied().collect();

        let mut wavelengths = Vec::with_capacity(samples.len());
        let mut observer = Vec::with_capacity(samples.len());
        let mut illuminant = Vec::with_capacity(samples.len());
        let mut pigments: [Option<PigmentSpectrum>; Pigment::COUNT] = Default::default();
        for pigment in available.iter() {
            pigments[pigment.index()] = Some(PigmentSpectrum {
                k: Vec::with_capacity(samples.len()),
                s: Vec::with_capacity(samples.len()),
            });
        }

        if !origin.is_finite() {
            return Err(bad_value(0, "wavelength", origin));
        } else if !step.is_finite() {
            return Err(bad_value(1, "wavelength", second_wavelength));
        }

        let mut luminance = Sum::new();
        for (index, sample) in samples.into_iter().enumerate() {
            let expected = (index as Float).mul_add(step, origin);
            if step <= 0.0 || (sample.wavelength - expected).abs() > AXIS_TOLERANCE * step {
                return Err(DatasetError::NonUniformAxis {
                    record: index,
                    wavelength: sample.wavelength,
                    expected,
                });
            }

            for (field, value) in ["x_bar", "y_bar", "z_bar"].iter().zip(sample.observer) {
                if !value.is_finite() {
                    return Err(bad_value(index, field, value));
                }
            }
            check_non_negative(index, "power", sample.power)?;

            for pigment in available.iter() {
                let Some(coefficients) = sample.pigments.get(pigment) else {
                    return Err(DatasetError::MissingField {
                        record: index,
                        field: pigment.k_column(),
                    });
                };

                check_non_negative(index, &pigment.k_column(), coefficients.k)?;
                check_non_negative(index, &pigment.s_column(), coefficients.s)?;

                if let Some(spectrum) = pigments[pigment.index()].as_mut() {
                    spectrum.k.push(coefficients.k);
                    spectrum.s.push(coefficients.s);
                }
            }

            luminance += sample.power * sample.observer[1];
            wavelengths.push(sample.wavelength);
            observer.push(sample.observer);
            illuminant.push(sample.power);
        }

        let normalization = step * luminance.value();
        if !normalization.is_finite() || normalization <= 0.0 {
            return Err(DatasetError::NoLuminance(normalization));
        }

        log::debug!(
            "loaded {} spectral samples from {}nm in {}nm steps for pigments {:?}",
            wavelengths.len(),
            origin,
            step,
            available,
        );

        Ok(Self {
            wavelengths,
            step,
            observer,
            illuminant,
            pigments,
            normalization,
        })
    }

    /// Get the number of samples, which is at least two.
    #[inline]
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// Determine whether this dataset is empty, which it never is.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Get the wavelength step Δλ.
    #[inline]
    pub fn step(&self) -> Float {
        self.step
    }

    /// Get the wavelengths.
    #[inline]
    pub fn wavelengths(&self) -> &[Float] {
        &self.wavelengths
    }

    /// Get the color matching functions' values.
    #[inline]
    pub fn observer(&self) -> &[[Float; 3]] {
        &self.observer
    }

    /// Get the illuminant's relative power.
    #[inline]
    pub fn illuminant(&self) -> &[Float] {
        &self.illuminant
    }

    /// Get the normalization factor Δλ·Σ I·ȳ.
    #[inline]
    pub fn normalization(&self) -> Float {
        self.normalization
    }

    /// Determine whether the dataset includes the pigment.
    #[inline]
    pub fn is_available(&self, pigment: Pigment) -> bool {
        self.pigments[pigment.index()].is_some()
    }

    /// Get an iterator over the pigments included in this dataset.
    pub fn pigments(&self) -> impl Iterator<Item = Pigment> + '_ {
        Pigment::all().filter(|pigment| self.is_available(*pigment))
    }

    /// Get the absorption and scattering spectra for the pigment.
    pub fn spectrum(&self, pigment: Pigment) -> Result<&PigmentSpectrum, InvalidSelectionError> {
        self.pigments[pigment.index()]
            .as_ref()
            .ok_or_else(|| InvalidSelectionError::Unavailable(pigment.name()))
    }

    /// Reassemble the sample at the given index.
    pub fn sample(&self, index: usize) -> Option<SpectralSample> {
        let wavelength = *self.wavelengths.get(index)?;
        let mut sample = SpectralSample::new(wavelength, self.observer[index], self.illuminant[index]);
        for pigment in self.pigments() {
            if let Some(spectrum) = self.pigments[pigment.index()].as_ref() {
                sample = sample.with(pigment, spectrum.k[index], spectrum.s[index]);
            }
        }
        Some(sample)
    }
}

fn number(record: &Map<String, Value>, name: &str) -> Option<Float> {
    record.get(name).and_then(Value::as_f64).map(|n| n as Float)
}

fn field(index: usize, record: &Map<String, Value>, name: &str) -> Result<Float, DatasetError> {
    number(record, name).ok_or_else(|| DatasetError::MissingField {
        record: index,
        field: name.to_owned(),
    })
}

fn bad_value(index: usize, name: &str, value: Float) -> DatasetError {
    DatasetError::BadValue {
        record: index,
        field: name.to_owned(),
        value,
    }
}

fn check_non_negative(index: usize, name: &str, value: Float) -> Result<(), DatasetError> {
    if value.is_finite() && 0.0 <= value {
        Ok(())
    } else {
        Err(bad_value(index, name, value))
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A builder joining pigment measurements with an observer and illuminant.
///
/// Each pigment is measured as a table of wavelength, absorption, and
/// scattering. When building the dataset, only wavelengths present in every
/// pigment table as well as the observer and illuminant tables are retained.
/// By default, the builder uses [`CIE_OBSERVER_2DEG_1931`] and
/// [`CIE_ILLUMINANT_D65`].
#[derive(Debug)]
pub struct SpectralDataBuilder {
    observer: &'static Observer,
    illuminant: &'static Illuminant,
    measurements: BTreeMap<Pigment, Vec<(Float, Coefficients)>>,
}

impl Default for SpectralDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralDataBuilder {
    /// Create a new builder using the CIE reference tables.
    pub fn new() -> Self {
        Self {
            observer: &CIE_OBSERVER_2DEG_1931,
            illuminant: &CIE_ILLUMINANT_D65,
            measurements: BTreeMap::new(),
        }
    }

    /// Set the observer.
    pub fn observer(&mut self, observer: &'static Observer) -> &mut Self {
        self.observer = observer;
        self
    }

    /// Set the illuminant.
    pub fn illuminant(&mut self, illuminant: &'static Illuminant) -> &mut Self {
        self.illuminant = illuminant;
        self
    }

    /// Add the pigment's measurements as (wavelength, K, S) triples.
    pub fn pigment(&mut self, pigment: Pigment, table: &[(Float, Float, Float)]) -> &mut Self {
        let table = table
            .iter()
            .map(|&(wavelength, k, s)| (wavelength, Coefficients { k, s }))
            .collect();
        self.measurements.insert(pigment, table);
        self
    }

    /// Add the pigment's measurements by sampling the function at the
    /// observer's wavelengths.
    pub fn pigment_with<F>(&mut self, pigment: Pigment, coefficients: F) -> &mut Self
    where
        F: Fn(Float) -> (Float, Float),
    {
        let table: Vec<_> = self
            .observer
            .wavelengths()
            .map(move |wavelength| {
                let (k, s) = coefficients(wavelength);
                (wavelength, k, s)
            })
            .collect();
        self.pigment(pigment, &table)
    }

    /// Join the measurements with observer and illuminant and validate the
    /// result.
    pub fn build(&self) -> Result<SpectralData, DatasetError> {
        let Some((_, anchor)) = self.measurements.iter().next() else {
            return Err(DatasetError::TooFewSamples(0));
        };

        let mut samples = Vec::with_capacity(anchor.len());
        'outer: for &(wavelength, _) in anchor.iter() {
            let (Some(observer), Some(power)) =
                (self.observer.at(wavelength), self.illuminant.at(wavelength))
            else {
                continue;
            };

            let mut sample = SpectralSample::new(wavelength, observer, power);
            for (pigment, table) in self.measurements.iter() {
                let Some(&(_, coefficients)) = table.iter().find(|&&(w, _)| w == wavelength) else {
                    continue 'outer;
                };
                sample = sample.with(*pigment, coefficients.k, coefficients.s);
            }
            samples.push(sample);
        }

        samples.sort_by(|s1, s2| s1.wavelength.total_cmp(&s2.wavelength));
        log::debug!(
            "joined {} pigments with {} and {} into {} samples",
            self.measurements.len(),
            self.observer.label(),
            self.illuminant.label(),
            samples.len()
        );
        SpectralData::from_samples(samples)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A process-wide, initialize-once home for the spectral dataset.
///
/// ```
/// # use pigmix::data::SpectralStore;
/// static STORE: SpectralStore = SpectralStore::new();
///
/// assert!(!STORE.is_ready());
/// assert!(STORE.get().is_err());
/// ```
#[derive(Debug, Default)]
pub struct SpectralStore {
    cell: OnceLock<Arc<SpectralData>>,
}

impl SpectralStore {
    /// Create a new, empty store.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Store the dataset.
    ///
    /// This method fails if the store already holds a dataset, which it keeps.
    pub fn initialize(&self, data: SpectralData) -> Result<Arc<SpectralData>, DatasetError> {
        let data = Arc::new(data);
        self.cell
            .set(data.clone())
            .map_err(|_| DatasetError::AlreadyInitialized)?;
        log::debug!("spectral store is ready with {} samples", data.len());
        Ok(data)
    }

    /// Determine whether the store holds a dataset.
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Get the dataset.
    pub fn get(&self) -> Result<Arc<SpectralData>, DataNotReadyError> {
        self.cell.get().cloned().ok_or(DataNotReadyError)
    }

    /// Create a mixer for the dataset.
    pub fn mixer(&self, options: Options) -> Result<Mixer, DataNotReadyError> {
        Ok(Mixer::new(self.get()?, options))
    }
}
