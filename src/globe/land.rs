//! Coarse continent table for the point-cloud globe.
//!
//! Each rule is a lat/lon box with ordered exceptions; rules are tested in order
//! and the first box containing the point decides. Good enough to read as a map
//! at a few thousand dots, not a coastline dataset.

/// Inclusive latitude / longitude box in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLonBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Sub-region of a rule that overrides its verdict.
#[derive(Clone, Copy, Debug)]
pub struct Exception {
    pub area: LatLonBox,
    pub land: bool,
}

/// One landmass approximation.
#[derive(Clone, Copy, Debug)]
pub struct LandRule {
    pub name: &'static str,
    pub bounds: LatLonBox,
    /// First matching exception wins; otherwise the whole box is land.
    pub exceptions: &'static [Exception],
}

impl LandRule {
    fn verdict(&self, lat: f64, lon: f64) -> Option<bool> {
        if !self.bounds.contains(lat, lon) {
            return None;
        }
        let land = self
            .exceptions
            .iter()
            .find(|e| e.area.contains(lat, lon))
            .map_or(true, |e| e.land);
        Some(land)
    }
}

const fn land(area: LatLonBox) -> Exception {
    Exception { area, land: true }
}

const fn sea(area: LatLonBox) -> Exception {
    Exception { area, land: false }
}

/// Ordered rule table. Asia first with the most detail around the target city.
pub static LAND_RULES: &[LandRule] = &[
    LandRule {
        name: "Mainland Asia",
        bounds: LatLonBox::new(15.0, 55.0, 70.0, 135.0),
        exceptions: &[
            land(LatLonBox::new(10.0, 25.0, 60.0, 90.0)), // India
            sea(LatLonBox::new(-90.0, 25.0, -180.0, 80.0)), // Arabian Sea
            // South China Sea; Guangzhou (23.1) stays land
            sea(LatLonBox::new(-90.0, 22.5, 108.0, 180.0)),
            sea(LatLonBox::new(30.0, 40.0, 122.0, 180.0)), // Yellow / East China Sea
        ],
    },
    LandRule {
        name: "Taiwan",
        bounds: LatLonBox::new(21.5, 25.5, 119.5, 122.5),
        exceptions: &[],
    },
    LandRule {
        name: "Hainan",
        bounds: LatLonBox::new(18.0, 20.5, 108.0, 111.5),
        exceptions: &[],
    },
    LandRule {
        name: "Japan",
        bounds: LatLonBox::new(30.0, 46.0, 129.0, 146.0),
        exceptions: &[],
    },
    LandRule {
        name: "Philippines",
        bounds: LatLonBox::new(5.0, 19.0, 116.0, 127.0),
        exceptions: &[],
    },
    LandRule {
        name: "Indonesia / Malaysia",
        bounds: LatLonBox::new(-10.0, 7.0, 95.0, 142.0),
        exceptions: &[],
    },
    LandRule {
        name: "Europe",
        bounds: LatLonBox::new(36.0, 70.0, -10.0, 40.0),
        exceptions: &[],
    },
    LandRule {
        name: "United Kingdom",
        bounds: LatLonBox::new(50.0, 60.0, -10.0, 2.0),
        exceptions: &[],
    },
    LandRule {
        name: "Africa",
        bounds: LatLonBox::new(-35.0, 37.0, -18.0, 52.0),
        exceptions: &[sea(LatLonBox::new(-90.0, 12.0, 51.0, 180.0))], // Horn
    },
    LandRule {
        name: "Madagascar",
        bounds: LatLonBox::new(-26.0, -12.0, 43.0, 51.0),
        exceptions: &[],
    },
    LandRule {
        name: "South America",
        bounds: LatLonBox::new(-56.0, 13.0, -82.0, -34.0),
        exceptions: &[],
    },
    LandRule {
        name: "North America",
        bounds: LatLonBox::new(15.0, 72.0, -130.0, -55.0),
        exceptions: &[sea(LatLonBox::new(50.0, 70.0, -95.0, -75.0))], // Hudson Bay
    },
    LandRule {
        name: "Australia",
        bounds: LatLonBox::new(-40.0, -10.0, 112.0, 154.0),
        exceptions: &[],
    },
];

/// Land/water verdict for a latitude / longitude in degrees.
pub fn is_land(lat: f64, lon: f64) -> bool {
    classify(LAND_RULES, lat, lon)
}

/// Evaluate an arbitrary ordered rule table.
pub fn classify(rules: &[LandRule], lat: f64, lon: f64) -> bool {
    rules.iter().find_map(|r| r.verdict(lat, lon)).unwrap_or(false)
}
