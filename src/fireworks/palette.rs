//! Per-burst colour schemes. One style is rolled per explosion so every burst
//! reads as a single firework.

use crate::rng::Rng;

/// HSL colour; hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_css(self) -> String {
        format!("hsl({:.1}, {:.0}%, {:.1}%)", self.h, self.s, self.l)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstStyle {
    /// Every spark its own random hue.
    Rainbow,
    /// One hue, lightness varies per spark.
    SingleHue { hue: f64 },
    /// Sparks split between a hue and its complement.
    Complementary { hue: f64 },
}

impl BurstStyle {
    /// Rainbow 40%, single hue 30%, complementary 30%.
    pub fn roll(rng: &mut Rng) -> Self {
        let style = rng.next_f64();
        if style > 0.6 {
            BurstStyle::Rainbow
        } else if style > 0.3 {
            BurstStyle::SingleHue { hue: rng.range(0.0, 360.0) }
        } else {
            BurstStyle::Complementary { hue: rng.range(0.0, 360.0) }
        }
    }

    /// Colour for one spark of this burst.
    pub fn spark_color(&self, rng: &mut Rng) -> Hsl {
        match *self {
            BurstStyle::Rainbow => Hsl::new(rng.range(0.0, 360.0), 100.0, 60.0),
            BurstStyle::SingleHue { hue } => Hsl::new(hue, 100.0, rng.range(50.0, 80.0)),
            BurstStyle::Complementary { hue } => {
                if rng.chance(0.5) {
                    Hsl::new(hue, 100.0, 60.0)
                } else {
                    Hsl::new((hue + 180.0) % 360.0, 100.0, 70.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formatting() {
        assert_eq!(Hsl::new(120.0, 100.0, 60.0).to_css(), "hsl(120.0, 100%, 60.0%)");
    }

    #[test]
    fn single_hue_keeps_hue() {
        let mut rng = Rng::new(3);
        let style = BurstStyle::SingleHue { hue: 42.0 };
        for _ in 0..50 {
            let c = style.spark_color(&mut rng);
            assert_eq!(c.h, 42.0);
            assert!((50.0..80.0).contains(&c.l));
        }
    }

    #[test]
    fn complementary_uses_two_hues() {
        let mut rng = Rng::new(11);
        let style = BurstStyle::Complementary { hue: 300.0 };
        let hues: Vec<f64> = (0..100).map(|_| style.spark_color(&mut rng).h).collect();
        assert!(hues.iter().all(|h| *h == 300.0 || *h == 120.0));
        assert!(hues.contains(&300.0) && hues.contains(&120.0));
    }

    #[test]
    fn all_styles_eventually_rolled() {
        let mut rng = Rng::new(5);
        let (mut rainbow, mut single, mut comp) = (0, 0, 0);
        for _ in 0..300 {
            match BurstStyle::roll(&mut rng) {
                BurstStyle::Rainbow => rainbow += 1,
                BurstStyle::SingleHue { .. } => single += 1,
                BurstStyle::Complementary { .. } => comp += 1,
            }
        }
        assert!(rainbow > 0 && single > 0 && comp > 0);
    }
}
