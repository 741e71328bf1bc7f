//! Random dark palette generation.
//!
//! Each [`Family`] draws one seed color from a fixed hue band, saturation
//! range and lightness window. The seed anchors a 24-step light-to-dark
//! gradient, and the darkest color of every group of four steps is kept,
//! giving six colors per family and 36 per palette.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::colors::{hls_to_hex, Color, Hls};

/// Number of gradient steps generated per seed color.
pub const GRADIENT_STEPS: usize = 24;
/// Number of groups the gradient is split into.
pub const GROUPS: usize = 6;
/// Colors contributed by each family.
pub const PICKS_PER_FAMILY: usize = GRADIENT_STEPS / (GRADIENT_STEPS / GROUPS);
/// Colors in one generated palette.
pub const PALETTE_SIZE: usize = PICKS_PER_FAMILY * Family::ALL.len();
/// Colors a theme takes from the front of a palette.
pub const THEME_COLORS: usize = 9;

/// Saturation of [`PaletteGenerator::random_dark`] colors when unset.
const DARK_SATURATION: f64 = 0.5;
/// Lightness of a red [`PaletteGenerator::random_dark`] color when unset.
const DARK_LIGHTNESS_BASE: f64 = 0.2;
/// Lightness added across the hue wheel when unset.
const DARK_LIGHTNESS_SPAN: f64 = 0.3;

/// Lightness of the pale end of a gradient.
const TINT_LIGHTNESS: f64 = 0.95;
/// Fraction of the seed saturation kept at the pale end of a gradient.
const TINT_SATURATION: f64 = 0.15;

/// A hue-based group of dark colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Red,
    Purple,
    Orange,
    Green,
    Blue,
    Black,
}

impl Family {
    /// Palette order.
    pub const ALL: [Family; 6] = [
        Family::Red,
        Family::Purple,
        Family::Orange,
        Family::Green,
        Family::Blue,
        Family::Black,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Family::Red => "red",
            Family::Purple => "purple",
            Family::Orange => "orange",
            Family::Green => "green",
            Family::Blue => "blue",
            Family::Black => "black",
        }
    }

    /// Inclusive bounds of the integer hue draw.
    pub const fn hue_range(self) -> (u32, u32) {
        match self {
            Family::Red => (0, 20),
            Family::Orange => (20, 60),
            Family::Purple => (270, 330),
            Family::Green => (90, 150),
            Family::Blue => (180, 240),
            Family::Black => (1, 30),
        }
    }

    /// Divisor mapping the hue draw into `[0, 1]`.
    ///
    /// Black divides by 36, not 360, so its hue spans most of the wheel.
    pub const fn hue_divisor(self) -> f64 {
        match self {
            Family::Black => 36.0,
            _ => 360.0,
        }
    }

    /// Inclusive saturation bounds in percent.
    pub const fn saturation_range(self) -> (u32, u32) {
        match self {
            Family::Red | Family::Blue => (75, 100),
            Family::Orange | Family::Purple | Family::Green => (60, 100),
            Family::Black => (100, 100),
        }
    }

    /// Lower lightness bound in percent when the caller supplies none.
    pub const fn default_lightness(self) -> u32 {
        match self {
            Family::Red => 15,
            Family::Orange | Family::Green => 10,
            Family::Purple => 20,
            Family::Black | Family::Blue => 0,
        }
    }

    /// Width of the lightness window in percent.
    pub const fn lightness_span(self) -> u32 {
        match self {
            Family::Red => 25,
            Family::Orange | Family::Green => 10,
            Family::Purple => 20,
            Family::Black => 5,
            Family::Blue => 15,
        }
    }

    /// Inclusive lightness bounds in percent. A lightness of zero counts
    /// as unset.
    pub fn lightness_range(self, lightness: Option<u32>) -> (u32, u32) {
        let min = lightness
            .filter(|l| *l > 0)
            .unwrap_or_else(|| self.default_lightness())
            .min(100);
        (min, (min + self.lightness_span()).min(100))
    }
}

/// Generates palettes from a random source.
///
/// Use [`PaletteGenerator::seeded`] for reproducible output.
#[derive(Debug)]
pub struct PaletteGenerator<R: Rng> {
    rng: R,
}

impl PaletteGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PaletteGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one HLS sample for a family.
    pub fn sample(&mut self, family: Family, lightness: Option<u32>) -> Hls {
        let (hue_lo, hue_hi) = family.hue_range();
        let (sat_lo, sat_hi) = family.saturation_range();
        let (light_lo, light_hi) = family.lightness_range(lightness);

        let h = f64::from(self.rng.gen_range(hue_lo..=hue_hi)) / family.hue_divisor();
        let s = f64::from(self.rng.gen_range(sat_lo..=sat_hi)) / 100.0;
        let l = f64::from(self.rng.gen_range(light_lo..=light_hi)) / 100.0;

        debug!(family = family.name(), h, l, s, "sampled seed color");
        Hls::new(h, l, s)
    }

    /// The seed color a family's gradient is anchored on.
    pub fn seed_color(&mut self, family: Family, lightness: Option<u32>) -> Color {
        Color::from_hls(self.sample(family, lightness))
    }

    /// Six colors for one family.
    pub fn family_colors(&mut self, family: Family, lightness: Option<u32>) -> Vec<String> {
        let seed = self.seed_color(family, lightness);
        pick_darkest(&light_gradient(seed, GRADIENT_STEPS))
            .into_iter()
            .map(|c| c.to_hex())
            .collect()
    }

    /// One palette: six colors per family in [`Family::ALL`] order.
    pub fn generate_palette(&mut self, lightness: Option<u32>) -> Vec<String> {
        Family::ALL
            .into_iter()
            .flat_map(|family| self.family_colors(family, lightness))
            .collect()
    }

    /// `count` independent palettes.
    pub fn generate_palettes(&mut self, count: usize, lightness: Option<u32>) -> Vec<Vec<String>> {
        (0..count).map(|_| self.generate_palette(lightness)).collect()
    }

    /// The leading colors of a fresh palette, used as a theme's accents.
    pub fn create_theme_palette(&mut self, lightness: Option<u32>) -> Vec<String> {
        let mut palette = self.generate_palette(lightness);
        palette.truncate(THEME_COLORS);
        palette
    }

    /// `count` dark colors of any hue. Unset components are drawn per
    /// color: a uniform hue, saturation 0.5, and a lightness rising from
    /// 0.2 to 0.5 with the hue.
    pub fn random_dark(
        &mut self,
        count: usize,
        hue: Option<f64>,
        saturation: Option<f64>,
        lightness: Option<f64>,
    ) -> Vec<String> {
        (0..count)
            .map(|_| {
                let h = hue.unwrap_or_else(|| self.rng.gen::<f64>());
                let s = saturation.unwrap_or(DARK_SATURATION);
                let l = lightness.unwrap_or(DARK_LIGHTNESS_BASE + h * DARK_LIGHTNESS_SPAN);
                hls_to_hex(Hls::new(h, l, s))
            })
            .collect()
    }
}

/// Linear RGB ramp of `steps` colors from a pale tint of `seed` to `seed`.
pub fn light_gradient(seed: Color, steps: usize) -> Vec<Color> {
    let hls = seed.to_hls();
    let tint = Color::from_hls(Hls::new(hls.h, TINT_LIGHTNESS, hls.s * TINT_SATURATION));

    match steps {
        0 => Vec::new(),
        1 => vec![seed],
        _ => {
            let last = (steps - 1) as f64;
            (0..steps)
                .map(|i| tint.mix(&seed, i as f64 / last))
                .collect()
        }
    }
}

/// The last color of every group of `len / GROUPS` colors.
pub fn pick_darkest<T: Clone>(gradient: &[T]) -> Vec<T> {
    let counts = (gradient.len() / GROUPS).max(1);
    (0..gradient.len())
        .filter(|c| c % counts == 0)
        .filter_map(|c| gradient.get(c + (counts - 1)).cloned())
        .collect()
}
