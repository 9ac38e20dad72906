use crate::error::{SaccadeError, SaccadeResult};

/// The 19 trajectory patterns.
///
/// Serde names match the identifiers used by settings files; the six `BookN`
/// variants are the fixed-geometry forms that only honor `pattern_stretch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Linear,
    Zigzag,
    Spiral,
    Scurve,
    Serpentine,
    HorizontalScan,
    DiagonalZigzag,
    MultiColumn,
    Chunking,
    MetaGuiding,
    FixationReduction,
    Peripheral,
    Schulte,
    #[serde(rename = "bookpattern1")]
    Book1,
    #[serde(rename = "bookpattern2")]
    Book2,
    #[serde(rename = "bookpattern3")]
    Book3,
    #[serde(rename = "bookpattern4")]
    Book4,
    #[serde(rename = "bookpattern5")]
    Book5,
    #[serde(rename = "bookpattern6")]
    Book6,
}

impl Pattern {
    pub const ALL: [Pattern; 19] = [
        Pattern::Linear,
        Pattern::Zigzag,
        Pattern::Spiral,
        Pattern::Scurve,
        Pattern::Serpentine,
        Pattern::HorizontalScan,
        Pattern::DiagonalZigzag,
        Pattern::MultiColumn,
        Pattern::Chunking,
        Pattern::MetaGuiding,
        Pattern::FixationReduction,
        Pattern::Peripheral,
        Pattern::Schulte,
        Pattern::Book1,
        Pattern::Book2,
        Pattern::Book3,
        Pattern::Book4,
        Pattern::Book5,
        Pattern::Book6,
    ];

    /// True for the one variant whose traversal order is randomized.
    pub fn is_randomized(self) -> bool {
        matches!(self, Pattern::Schulte)
    }
}

/// The externally owned configuration record.
///
/// Read by both the pattern generator and the playback scheduler.
/// `point_size` and `point_color` are presentation-only: they round-trip
/// through serde for the settings surface but nothing in the core reads them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target reading rate in words per minute.
    pub speed: u32,
    pub pattern: Pattern,
    /// Oscillation count for the periodic patterns.
    pub cycles: u32,
    pub point_size: u32,
    pub point_color: String,
    /// Words between fixation pauses (fixation-reduction pattern).
    pub fixation_distance: u32,
    /// Words per highlighted chunk (chunking pattern).
    pub chunk_size: u32,
    /// Multiplier dividing computed delays; higher moves the point faster.
    pub point_speed: f64,
    /// Percent of usable width where the sweep starts, 0..=100.
    pub start_position: u8,
    /// Percent of usable width where the sweep ends, 0..=100.
    ///
    /// The settings surface keeps `end_position >= start_position + 20`;
    /// the core tolerates any pair and treats a reversed range as degenerate.
    pub end_position: u8,
    /// Amplitude/spacing multiplier for the six book patterns.
    pub pattern_stretch: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 300,
            pattern: Pattern::Linear,
            cycles: 3,
            point_size: 15,
            point_color: "#ff0000".to_string(),
            fixation_distance: 3,
            chunk_size: 4,
            point_speed: 0.3,
            start_position: 0,
            end_position: 100,
            pattern_stretch: 1.0,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> SaccadeResult<()> {
        if self.speed == 0 {
            return Err(SaccadeError::validation("speed must be > 0 WPM"));
        }
        if self.cycles == 0 {
            return Err(SaccadeError::validation("cycles must be > 0"));
        }
        if self.fixation_distance == 0 {
            return Err(SaccadeError::validation("fixation_distance must be > 0"));
        }
        if self.chunk_size == 0 {
            return Err(SaccadeError::validation("chunk_size must be > 0"));
        }
        if !(self.point_speed > 0.0 && self.point_speed.is_finite()) {
            return Err(SaccadeError::validation(
                "point_speed must be a positive finite multiplier",
            ));
        }
        if !(self.pattern_stretch > 0.0 && self.pattern_stretch.is_finite()) {
            return Err(SaccadeError::validation(
                "pattern_stretch must be a positive finite multiplier",
            ));
        }
        if self.start_position > 100 {
            return Err(SaccadeError::validation("start_position must be 0..=100"));
        }
        if self.end_position > 100 {
            return Err(SaccadeError::validation("end_position must be 0..=100"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn zero_multipliers_are_rejected() {
        let mut s = Settings::default();
        s.point_speed = 0.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.pattern_stretch = f64::NAN;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.speed = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn reversed_positions_still_validate() {
        // The settings surface enforces end >= start + 20; the core only
        // range-checks the individual values.
        let mut s = Settings::default();
        s.start_position = 90;
        s.end_position = 10;
        s.validate().unwrap();
    }

    #[test]
    fn pattern_names_round_trip_through_serde() {
        for p in Pattern::ALL {
            let json = serde_json::to_string(&p).unwrap();
            let back: Pattern = serde_json::from_str(&json).unwrap();
            assert_eq!(p, back);
        }
        assert_eq!(serde_json::to_string(&Pattern::Book4).unwrap(), "\"bookpattern4\"");
        assert_eq!(
            serde_json::from_str::<Pattern>("\"horizontalscan\"").unwrap(),
            Pattern::HorizontalScan
        );
    }
}
