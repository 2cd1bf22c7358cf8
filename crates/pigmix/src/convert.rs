//! Converting tristimulus values to display colors and mixing light.
//!
//! [`DisplayColor`] is the 24-bit sRGB color shown to users. Tristimulus values
//! become display colors by converting to linear sRGB with the IEC 61966-2-1
//! matrix, clipping to the unit cube, applying sRGB's piecewise gamma, and
//! scaling to 8 bits.
//!
//! [`mix_light`] mixes display colors additively, as if projecting colored
//! lights onto the same spot. It undoes gamma with a plain power of 2.2,
//! which only approximates the inverse of sRGB's gamma.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{
    clip, decode_gamma, decode_gamma_approx, encode_gamma, from_8bit, linear_srgb_to_xyz, to_8bit,
    xyz_to_linear_srgb, ThreeSum,
};
use crate::tristimulus::Tristimulus;
use crate::Float;

/// A 24-bit sRGB display color.
///
/// ```
/// # use pigmix::DisplayColor;
/// let sand = DisplayColor::new(0xee, 0xdc, 0xad);
/// assert_eq!(format!("{}", sand), "rgb(238, 220, 173)");
/// assert_eq!(sand.to_hex(), "#eedcad");
/// ```
#[cfg_attr(
    feature = "pyffi",
    doc = "Since there is no Python feature equivalent to trait implementations in
    Rust, the Python class for `DisplayColor` provides equivalent functionality
    through [`DisplayColor::coordinates`], [`DisplayColor::__len__`], and
    [`DisplayColor::__getitem__`]. These methods are not available in Rust."
)]
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, sequence, module = "pigmix")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct DisplayColor([u8; 3]);

#[cfg(feature = "pyffi")]
#[pymethods]
impl DisplayColor {
    /// Create a new display color from its coordinates. <i
    /// class=python-only>Python only!</i>
    #[new]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Access this display color's coordinates. <i class=python-only>Python
    /// only!</i>
    pub fn coordinates(&self) -> [u8; 3] {
        self.0
    }

    /// Get this display color's length, which is 3. <i
    /// class=python-only>Python only!</i>
    pub fn __len__(&self) -> usize {
        3
    }

    /// Get the coordinate at the given index. <i class=python-only>Python
    /// only!</i>
    pub fn __getitem__(&self, index: isize) -> PyResult<u8> {
        match index {
            -3..=-1 => Ok(self.0[(3 + index) as usize]),
            0..=2 => Ok(self.0[index as usize]),
            _ => Err(pyo3::exceptions::PyIndexError::new_err(
                "Invalid coordinate index",
            )),
        }
    }

    /// Format this display color in hashed hexadecimal notation.
    pub fn to_hex(&self) -> String {
        self.do_to_hex()
    }

    /// Get the xy chromaticity of this display color.
    pub fn chromaticity(&self) -> [Float; 2] {
        self.to_xyz().chromaticity()
    }

    /// Convert this display color to its debug representation. <i
    /// class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("DisplayColor({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }

    /// Convert this display color to its CSS notation. <i
    /// class=python-only>Python only!</i>
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

#[cfg(not(feature = "pyffi"))]
impl DisplayColor {
    /// Create a new display color from its coordinates.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Format this display color in hashed hexadecimal notation.
    pub fn to_hex(&self) -> String {
        self.do_to_hex()
    }

    /// Get the xy chromaticity of this display color.
    pub fn chromaticity(&self) -> [Float; 2] {
        self.to_xyz().chromaticity()
    }
}

impl DisplayColor {
    fn do_to_hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Convert this display color to linear sRGB, undoing gamma exactly.
    pub fn to_linear(&self) -> [Float; 3] {
        let [r, g, b] = self.0;
        [
            decode_gamma(from_8bit(r)),
            decode_gamma(from_8bit(g)),
            decode_gamma(from_8bit(b)),
        ]
    }

    /// Convert this display color to tristimulus values.
    pub fn to_xyz(&self) -> Tristimulus {
        linear_srgb_to_xyz(&self.to_linear()).into()
    }
}

impl AsRef<[u8; 3]> for DisplayColor {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl core::ops::Index<usize> for DisplayColor {
    type Output = u8;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[u8; 3]> for DisplayColor {
    fn from(value: [u8; 3]) -> Self {
        DisplayColor::new(value[0], value[1], value[2])
    }
}

impl From<DisplayColor> for [u8; 3] {
    fn from(value: DisplayColor) -> Self {
        value.0
    }
}

impl From<&Tristimulus> for DisplayColor {
    /// Convert the tristimulus values to a display color.
    ///
    /// This method converts to linear sRGB, clips to the unit cube, applies
    /// gamma, and scales to 8 bits.
    fn from(value: &Tristimulus) -> Self {
        let [r, g, b] = clip(&xyz_to_linear_srgb(&(*value).into()));
        DisplayColor::new(
            to_8bit(encode_gamma(r)),
            to_8bit(encode_gamma(g)),
            to_8bit(encode_gamma(b)),
        )
    }
}

impl From<Tristimulus> for DisplayColor {
    fn from(value: Tristimulus) -> Self {
        DisplayColor::from(&value)
    }
}

impl core::fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "rgb({}, {}, {})", r, g, b)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Mix display colors as light.
///
/// Each color contributes with the given weight. Weights should be
/// non-negative and add up to one.
pub fn mix_light<I>(colors: I) -> DisplayColor
where
    I: IntoIterator<Item = (DisplayColor, Float)>,
{
    let mut sum = ThreeSum::new();
    for (color, weight) in colors {
        let [r, g, b] = color.0;
        sum += [
            weight * decode_gamma_approx(from_8bit(r)),
            weight * decode_gamma_approx(from_8bit(g)),
            weight * decode_gamma_approx(from_8bit(b)),
        ];
    }

    let [r, g, b] = sum.value();
    DisplayColor::new(
        to_8bit(encode_gamma(r)),
        to_8bit(encode_gamma(g)),
        to_8bit(encode_gamma(b)),
    )
}

#[cfg(test)]
mod test {
    use super::{mix_light, DisplayColor};
    use crate::tristimulus::Tristimulus;
    use crate::Float;

    #[test]
    fn test_from_tristimulus() {
        assert_eq!(
            DisplayColor::from(Tristimulus::default()),
            DisplayColor::new(0, 0, 0),
            "black"
        );
        assert_eq!(
            DisplayColor::from(Tristimulus::new(0.95047, 1.0, 1.08883)),
            DisplayColor::new(255, 255, 255),
            "D65 white point"
        );

        // Out-of-gamut values are clipped.
        assert_eq!(
            DisplayColor::from(Tristimulus::new(2.0, 2.0, 2.0)),
            DisplayColor::new(255, 255, 255),
            "too bright"
        );
        assert_eq!(
            DisplayColor::from(Tristimulus::new(0.0, 0.6, 0.0)),
            DisplayColor::new(0, 255, 0),
            "only Y"
        );
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(
            DisplayColor::from(Tristimulus::new(Float::NAN, Float::NAN, Float::NAN)),
            DisplayColor::new(0, 0, 0),
            "all NaN"
        );

        let color = DisplayColor::from(Tristimulus::new(Float::NAN, 0.5, 0.5));
        assert_eq!(color, DisplayColor::new(0, 0, 0), "any NaN poisons all channels");
    }

    #[test]
    fn test_format() {
        let color = DisplayColor::new(255, 0, 10);
        assert_eq!(format!("{}", color), "rgb(255, 0, 10)", "CSS notation");
        assert_eq!(color.to_hex(), "#ff000a", "hex notation");
        assert_eq!(color[2], 10, "blue");
        assert_eq!(<[u8; 3]>::from(color), [255, 0, 10], "coordinates");
        assert_eq!(serde_json::to_string(&color).unwrap(), "[255,0,10]", "JSON");
    }

    #[test]
    fn test_to_xyz() {
        let white = DisplayColor::new(255, 255, 255).to_xyz();
        assert!((white.y - 1.0).abs() < 1e-6, "{:?}", white);

        let [x, y] = DisplayColor::new(255, 255, 255).chromaticity();
        assert!((x - 0.3127).abs() < 1e-4, "x = {}", x);
        assert!((y - 0.3290).abs() < 1e-4, "y = {}", y);

        assert_eq!(
            DisplayColor::new(0, 0, 0).chromaticity(),
            [0.0, 0.0],
            "black chromaticity"
        );

        for color in [
            DisplayColor::new(255, 0, 0),
            DisplayColor::new(12, 200, 99),
            DisplayColor::new(1, 1, 1),
        ] {
            assert_eq!(DisplayColor::from(color.to_xyz()), color, "{} via XYZ", color);
        }
    }

    #[test]
    fn test_mix_light() {
        let red = DisplayColor::new(255, 0, 0);
        let blue = DisplayColor::new(0, 0, 255);

        assert_eq!(mix_light([(red, 1.0)]), red, "red only");
        assert_eq!(mix_light([(red, 0.0), (blue, 1.0)]), blue, "blue only");

        // 0.5^(1/2.2) encoded with sRGB's gamma.
        let purple = mix_light([(red, 0.5), (blue, 0.5)]);
        assert_eq!(purple, DisplayColor::new(188, 0, 188), "red and blue");

        let gray = mix_light([
            (DisplayColor::new(255, 255, 255), 0.5),
            (DisplayColor::new(0, 0, 0), 0.5),
        ]);
        assert_eq!(gray[0], gray[1], "{} is gray", gray);
        assert_eq!(gray[1], gray[2], "{} is gray", gray);
    }
}
