//! Flame Length from Fireline Intensity
//!
//! Published power-law correlations of the form `L = a × I^b`, compiled by
//! Finney and Grumstrup (2023). Their own gas-burner model adds a flame depth
//! term: `L = a × I^b / D^c`.
//!
//! # Scientific References
//! - Byram, G.M. (1959). "Combustion of forest fuels". In: Forest Fire:
//!   Control and Use
//! - Nelson, R.M., Adkins, C.W. (1986). "Flame characteristics of wind-driven
//!   surface fires". Canadian Journal of Forest Research, 16(6), 1293-1300
//! - Cruz, M.G., Alexander, M.E. (2018). "Fire behaviour modelling in
//!   semi-arid mallee-heath shrublands"
//! - Finney, M.A., Grumstrup, T.P. (2023). "Measurements of flame length and
//!   fireline intensity"

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FlameError, FlameResult};
use crate::physics::guards::{floor_at_zero, non_negative, positive};

/// Fire spread direction the correlation was fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FireCategory {
    /// No wind, flat ground
    NoWind,
    /// Backing fire
    Backing,
    /// Heading fire
    Heading,
}

/// Coefficients of a flame length correlation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerLawParams {
    /// Multiplier `a`
    pub coefficient: f64,
    /// Intensity exponent `b`
    pub intensity_exponent: f64,
    /// Flame depth exponent `c` (Finney and Grumstrup 2023 only)
    pub depth_exponent: Option<f64>,
}

impl PowerLawParams {
    const fn new(coefficient: f64, intensity_exponent: f64) -> Self {
        Self {
            coefficient,
            intensity_exponent,
            depth_exponent: None,
        }
    }
}

/// Published flame length correlations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlameLengthModel {
    FonsNoWind,
    ThomasNoWind,
    YuanaNoWind,
    BarbonNoWind,
    NelsonBack,
    FernandesBack,
    ClarkBack,
    VegaBack,
    ByramHead,
    Anderson1Head,
    Anderson2Head,
    NewmanHead,
    SneeuwjagtHead,
    Nelson1Head,
    ClarkHead,
    Nelson2Head,
    VanWilgenHead,
    BurrowsHead,
    MarsdenSmedleyHead,
    Weise1Head,
    CatchpoleHead,
    Fernandes1Head,
    ButlerHead,
    FernandesHead,
    Nelson3Head,
    Nelson4Head,
    Weise2Head,
    DaviesHead,
    FinneyHead,
}

struct ModelEntry {
    model: FlameLengthModel,
    token: &'static str,
    params: PowerLawParams,
    category: FireCategory,
    reference: &'static str,
}

const TWO_THIRDS: f64 = 2.0 / 3.0;

// Order must match the enum declaration; `entry` indexes by discriminant.
#[rustfmt::skip]
static CATALOG: [ModelEntry; 29] = {
    use FireCategory::{Backing, Heading, NoWind};
    use FlameLengthModel as M;
    const fn e(
        model: FlameLengthModel,
        token: &'static str,
        a: f64,
        b: f64,
        category: FireCategory,
        reference: &'static str,
    ) -> ModelEntry {
        ModelEntry { model, token, params: PowerLawParams::new(a, b), category, reference }
    }
    [
        e(M::FonsNoWind, "Fons_NOWIND", 0.024018, TWO_THIRDS, NoWind, "Fons et al. (1963); cribs; lab"),
        e(M::ThomasNoWind, "Thomas_NOWIND", 0.026700, TWO_THIRDS, NoWind, "Thomas (1963); cribs; lab + field"),
        e(M::YuanaNoWind, "Yuana_NOWIND", 0.034000, TWO_THIRDS, NoWind, "Yuana and Cox (1996); gas slot burner; lab"),
        e(M::BarbonNoWind, "Barbon_iNOWIND", 0.062000, 0.5336, NoWind, "Barboni et al.; pine needles; lab + field"),
        e(M::NelsonBack, "Nelson_BACK", 0.027973, TWO_THIRDS, Backing, "Nelson (1980); needles; lab + field"),
        e(M::FernandesBack, "Fernandes_BACK", 0.029000, 0.7240, Backing, "Fernandes et al. (2009); pine needles; field"),
        e(M::ClarkBack, "Clark_BACK", 0.001600, 1.7450, Backing, "Clark (1983); grass; field"),
        e(M::VegaBack, "Vega_BACK", 0.087000, 0.4930, Backing, "Vega et al. (1998); shrubs; field"),
        e(M::ByramHead, "Byram_HEAD", 0.0775, 0.4600, Heading, "Byram (1959); needles; field"),
        e(M::Anderson1Head, "Anderson1_HEAD", 0.013876, 0.6510, Heading, "Anderson et al. (1966); lodgepole pine slash; field"),
        e(M::Anderson2Head, "Anderson2_HEAD", 0.008800, 0.6700, Heading, "Anderson et al. (1966); Douglas-fir slash; field"),
        e(M::NewmanHead, "Newman_HEAD", 0.05770, 0.5000, Heading, "Newman (1974); field"),
        e(M::SneeuwjagtHead, "Sneewujagt_HEAD", 0.037680, 0.5000, Heading, "Sneeuwjagt and Frandsen (1977); needles; field"),
        e(M::Nelson1Head, "Nelson1_HEAD", 0.044230, 0.5000, Heading, "Nelson (1980); needles; field"),
        e(M::ClarkHead, "Clark_HEAD", 0.000722, 0.9934, Heading, "Clark (1983); grass; field"),
        e(M::Nelson2Head, "Nelson2_HEAD", 0.047500, 0.4930, Heading, "Nelson and Adkins (1986); needles/palmetto; lab + field"),
        e(M::VanWilgenHead, "VanWilgen_HEAD", 0.046000, 0.4128, Heading, "Van Wilgen (1986); grass; field"),
        e(M::BurrowsHead, "Burrows_HEAD", 0.040480, 0.5740, Heading, "Burrows (1994); needles; field"),
        e(M::MarsdenSmedleyHead, "MarsdenSmedley_HEAD", 0.148, 0.403, Heading, "Marsden-Smedley and Catchpole (1995); button grass; field"),
        e(M::Weise1Head, "Weise1_HEAD", 0.016000, 0.7000, Heading, "Weise and Biging (1996); excelsior and birch sticks; lab"),
        e(M::CatchpoleHead, "Catchpole_HEAD", 0.032500, 0.5600, Heading, "Catchpole et al. (1998); heath; field"),
        e(M::Fernandes1Head, "Fernandes1_HEAD", 0.051600, 0.4530, Heading, "Fernandes et al. (2000); shrubs; field"),
        e(M::ButlerHead, "Butler_HEAD", 0.017500, TWO_THIRDS, Heading, "Butler et al. (2004); crown fire"),
        e(M::FernandesHead, "Fernandes_HEAD", 0.045000, 0.5430, Heading, "Fernandes et al. (2009); needles; field"),
        e(M::Nelson3Head, "Nelson3_HEAD", 0.014200, TWO_THIRDS, Heading, "Nelson et al. (2012); southern needles; lab"),
        e(M::Nelson4Head, "Nelson4_HEAD", 0.015500, TWO_THIRDS, Heading, "Nelson et al. (2012); southern needles; field"),
        e(M::Weise2Head, "Weise2_HEAD", 0.2000000, 0.3400, Heading, "Weise et al. (2016); chaparral; lab"),
        e(M::DaviesHead, "Davies_HEAD", 0.220000, 0.2900, Heading, "Davies et al. (2019); heathlands; field"),
        ModelEntry {
            model: M::FinneyHead,
            token: "Finney_HEAD",
            params: PowerLawParams { coefficient: 0.01051, intensity_exponent: 0.774, depth_exponent: Some(0.161) },
            category: Heading,
            reference: "Finney and Grumstrup (2023); gas slot burner; lab",
        },
    ]
};

impl FlameLengthModel {
    /// Every model in catalog order
    pub fn all() -> impl Iterator<Item = FlameLengthModel> {
        CATALOG.iter().map(|entry| entry.model)
    }

    /// Tokens accepted by [`FromStr`]
    pub fn tokens() -> Vec<&'static str> {
        CATALOG.iter().map(|entry| entry.token).collect()
    }

    fn entry(self) -> &'static ModelEntry {
        &CATALOG[self as usize]
    }

    pub fn token(self) -> &'static str {
        self.entry().token
    }

    /// Model coefficients without evaluating the correlation
    pub fn params(self) -> PowerLawParams {
        self.entry().params
    }

    pub fn category(self) -> FireCategory {
        self.entry().category
    }

    /// Published source, fuel type and setting
    pub fn reference(self) -> &'static str {
        self.entry().reference
    }

    /// Whether the correlation needs a flame depth input
    pub fn requires_flame_depth(self) -> bool {
        self.params().depth_exponent.is_some()
    }
}

impl FromStr for FlameLengthModel {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        CATALOG
            .iter()
            .find(|entry| entry.token == s)
            .map(|entry| entry.model)
            .ok_or_else(|| FlameError::UnsupportedModel {
                calculation: "flame_length",
                model: s.to_string(),
                supported: Self::tokens(),
            })
    }
}

impl fmt::Display for FlameLengthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Calculate flame length
///
/// # Arguments
/// * `model` - Flame length correlation
/// * `fire_intensity` - Head fire intensity (kW/m)
/// * `flame_depth` - Head fire flame depth (m), required by `Finney_HEAD`
///   and ignored otherwise
///
/// # Returns
/// Flame length in metres
pub fn flame_length(
    model: FlameLengthModel,
    fire_intensity: f64,
    flame_depth: Option<f64>,
) -> FlameResult<f64> {
    non_negative("fire_intensity", fire_intensity)?;
    let params = model.params();

    let length = params.coefficient * fire_intensity.powf(params.intensity_exponent);
    let length = match params.depth_exponent {
        Some(c) => {
            let depth = flame_depth.ok_or(FlameError::MissingArgument {
                calculation: "flame_length",
                parameter: "flame_depth",
            })?;
            length / positive("flame_depth", depth)?.powf(c)
        }
        None => length,
    };

    Ok(floor_at_zero(length))
}
