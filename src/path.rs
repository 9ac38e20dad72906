use crate::region::Point;

/// Pattern-specific metadata carried by a [`PathPoint`].
///
/// The core never interprets these beyond the optional duration override;
/// they exist for the caller's renderer (chunk highlight boxes, fixation
/// markers, peripheral focus boxes, column colors, ...).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointMeta {
    /// Midpoint of a word chunk.
    Chunk { chunk_size: u32 },
    /// A deliberately prolonged reading fixation.
    Fixation,
    /// Peripheral-vision focus spanning `focus_width` pixels.
    Peripheral { focus_width: f64 },
    SCurve,
    Serpentine,
    /// One of the alternating horizontal scan lines.
    Scan { line: u32 },
    DiagonalZigzag,
    /// One of the parallel column bands.
    Column { index: u32 },
    /// A fixed book pattern; 5 also records its sweep direction.
    Book {
        pattern: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<ScanDirection>,
    },
    /// A cell of the randomized 5x5 grid, `order` is the 1-based
    /// row-major cell number (stable under shuffling).
    Cell { order: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDirection {
    Forward,
    Reverse,
}

/// One guiding-point position plus optional metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PointMeta>,
    /// Per-step delay override in milliseconds, divided by `point_speed`
    /// like the baseline delay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

impl PathPoint {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            meta: None,
            duration_ms: None,
        }
    }

    pub fn with_meta(x: f64, y: f64, meta: PointMeta) -> Self {
        Self {
            x,
            y,
            meta: Some(meta),
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The ordered guiding-point sequence for one pattern + settings + page.
///
/// Regenerated wholesale on every settings or page change, never mutated in
/// place; the scheduler only ever reads the current one.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trajectory {
    pub points: Vec<PathPoint>,
}

impl Trajectory {
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathPoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_serializes_with_kind_tag() {
        let p = PathPoint::with_meta(1.0, 2.0, PointMeta::Column { index: 2 });
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["meta"]["kind"], "column");
        assert_eq!(json["meta"]["index"], 2);
        assert!(json.get("duration_ms").is_none());
    }

    #[test]
    fn bare_point_round_trips() {
        let p = PathPoint::at(10.5, -3.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: PathPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn duration_override_round_trips() {
        let p = PathPoint::with_meta(0.0, 0.0, PointMeta::Fixation).with_duration(200.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: PathPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration_ms, Some(200.0));
    }
}
