//! Orientation classification for uploaded video streams.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Tolerance band on the width/height ratio when matching 16:9 and 9:16.
const RATIO_TOLERANCE: f64 = 0.05;

/// Closed three-way classification of a video stream's geometry.
///
/// Derived from the first video stream's width/height; used only to pick the
/// storage key prefix, never persisted on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify stream geometry against 16:9 and 9:16 with a 0.05 ratio tolerance.
    ///
    /// Total over all positive dimensions: anything that matches neither band
    /// is `Other`, never a failure.
    pub fn classify(width: u32, height: u32) -> Self {
        let ratio = width as f64 / height as f64;
        if (ratio - LANDSCAPE_RATIO).abs() < RATIO_TOLERANCE {
            Orientation::Landscape
        } else if (ratio - PORTRAIT_RATIO).abs() < RATIO_TOLERANCE {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    /// Storage key prefix for this orientation.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.key_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_resolutions_classify_as_expected() {
        assert_eq!(Orientation::classify(1920, 1080), Orientation::Landscape);
        assert_eq!(Orientation::classify(1280, 720), Orientation::Landscape);
        assert_eq!(Orientation::classify(1080, 1920), Orientation::Portrait);
        assert_eq!(Orientation::classify(720, 1280), Orientation::Portrait);
        assert_eq!(Orientation::classify(1000, 1000), Orientation::Other);
        assert_eq!(Orientation::classify(640, 480), Orientation::Other);
    }

    #[test]
    fn tolerance_edge_is_exclusive() {
        // 16/9 + 0.05 = ~1.82778. 18278x10000 falls just outside the band;
        // one pixel narrower falls inside.
        assert_eq!(Orientation::classify(18278, 10000), Orientation::Other);
        assert_eq!(Orientation::classify(18277, 10000), Orientation::Landscape);
        // Below the band: 16/9 - 0.05 = ~1.7278.
        assert_eq!(Orientation::classify(17277, 10000), Orientation::Other);
        assert_eq!(Orientation::classify(17278, 10000), Orientation::Landscape);
    }

    #[test]
    fn portrait_band_mirrors_landscape_band() {
        // 9/16 = 0.5625; band is (0.5125, 0.6125) exclusive.
        assert_eq!(Orientation::classify(6124, 10000), Orientation::Portrait);
        assert_eq!(Orientation::classify(6126, 10000), Orientation::Other);
        assert_eq!(Orientation::classify(5126, 10000), Orientation::Portrait);
        assert_eq!(Orientation::classify(5124, 10000), Orientation::Other);
    }

    #[test]
    fn prefix_covers_all_variants() {
        assert_eq!(Orientation::Landscape.key_prefix(), "landscape");
        assert_eq!(Orientation::Portrait.key_prefix(), "portrait");
        assert_eq!(Orientation::Other.key_prefix(), "other");
    }
}
