use crate::cie::{CIE_ILLUMINANT_D65, CIE_OBSERVER_2DEG_1931};
use crate::data::{SpectralData, SpectralDataBuilder};
use crate::reflectance::ReflectanceSpectrum;
use crate::{Float, Pigment};

/// Create a dataset with synthetic pigments on the CIE 10nm tables.
///
/// White and black are spectrally flat. Yellow absorbs below 500nm, blue
/// above 500nm, and red below 590nm. Pyrrole orange and the remaining
/// pigments are missing.
pub(crate) fn fixture() -> SpectralData {
    SpectralDataBuilder::new()
        .pigment_with(Pigment::White, |_| (0.01, 1.0))
        .pigment_with(Pigment::Black, |_| (10.0, 0.5))
        .pigment_with(Pigment::CobaltBlue, |w| {
            (if 500.0 < w { 3.0 } else { 0.05 }, 0.8)
        })
        .pigment_with(Pigment::HansaYellow, |w| {
            (if w < 500.0 { 4.0 } else { 0.02 }, 1.0)
        })
        .pigment_with(Pigment::PyrroleRed, |w| {
            (if w < 590.0 { 5.0 } else { 0.03 }, 1.0)
        })
        .build()
        .unwrap()
}

/// Create the JSON text for a dataset with spectrally flat pigments.
pub(crate) fn json_fixture(pigments: &[(Pigment, Float, Float)]) -> String {
    let records: Vec<_> = CIE_OBSERVER_2DEG_1931
        .wavelengths()
        .map(|wavelength| {
            let [x, y, z] = CIE_OBSERVER_2DEG_1931.at(wavelength).unwrap();
            let mut record = serde_json::json!({
                "wavelength": wavelength,
                "x_bar": x,
                "y_bar": y,
                "z_bar": z,
                "power": CIE_ILLUMINANT_D65.at(wavelength).unwrap(),
            });

            for &(pigment, k, s) in pigments {
                record[pigment.k_column()] = serde_json::json!(k);
                record[pigment.s_column()] = serde_json::json!(s);
            }
            record
        })
        .collect();

    serde_json::to_string(&records).unwrap()
}

/// Create the reflectance spectrum of a perfect reflector.
pub(crate) fn perfect_reflector(data: &SpectralData) -> ReflectanceSpectrum {
    ReflectanceSpectrum::new(vec![1.0; data.len()])
}
