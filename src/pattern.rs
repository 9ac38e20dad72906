//! Trajectory generation: `(bounds, settings) -> Trajectory`.
//!
//! Every generator is a pure function of its inputs; the one exception is
//! the randomized grid (`schulte`), which shuffles its traversal order.
//! Degenerate bounds (either axis reversed) yield an empty trajectory,
//! never an error.

use std::f64::consts::PI;

use rand::{Rng, seq::SliceRandom};

use crate::{
    path::{PathPoint, PointMeta, ScanDirection, Trajectory},
    region::ReadingBounds,
    settings::{Pattern, Settings},
};

/// Generates the trajectory for the current pattern.
///
/// The `schulte` variant draws its shuffle order from the thread rng; use
/// [`generate_with_rng`] when reproducibility matters.
pub fn generate(bounds: ReadingBounds, settings: &Settings) -> Trajectory {
    generate_with_rng(bounds, settings, &mut rand::thread_rng())
}

#[tracing::instrument(skip_all, fields(pattern = ?settings.pattern))]
pub fn generate_with_rng<R: Rng + ?Sized>(
    bounds: ReadingBounds,
    settings: &Settings,
    rng: &mut R,
) -> Trajectory {
    if bounds.is_degenerate() {
        tracing::debug!("degenerate bounds, empty trajectory");
        return Trajectory::default();
    }

    let points = match settings.pattern {
        Pattern::Linear => linear(bounds),
        Pattern::Zigzag => zigzag(bounds, settings.cycles),
        Pattern::Spiral => spiral(bounds, settings.cycles),
        Pattern::Scurve => s_curve(bounds, settings.cycles),
        Pattern::Serpentine => serpentine(bounds),
        Pattern::HorizontalScan => horizontal_scan(bounds),
        Pattern::DiagonalZigzag => diagonal_zigzag(bounds),
        Pattern::MultiColumn => multi_column(bounds),
        Pattern::Chunking => chunking(bounds, settings.chunk_size),
        Pattern::MetaGuiding => meta_guiding(bounds),
        Pattern::FixationReduction => fixation_reduction(bounds, settings.fixation_distance),
        Pattern::Peripheral => peripheral(bounds),
        Pattern::Schulte => schulte(bounds, rng),
        Pattern::Book1 => book1(bounds, settings.pattern_stretch),
        Pattern::Book2 => book2(bounds, settings.pattern_stretch),
        Pattern::Book3 => book3(bounds, settings.pattern_stretch),
        Pattern::Book4 => book4(bounds, settings.pattern_stretch),
        Pattern::Book5 => book5(bounds, settings.pattern_stretch),
        Pattern::Book6 => book6(bounds, settings.pattern_stretch),
    };

    tracing::debug!(points = points.len(), "trajectory generated");
    Trajectory::new(points)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Row baselines from `start` to `end` inclusive, stepped by `step`.
///
/// A non-positive or non-finite step yields no rows; a zero-height range
/// yields exactly one.
fn row_positions(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite()) || end < start {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut y = start;
    while y <= end {
        rows.push(y);
        y += step;
    }
    rows
}

fn linear(b: ReadingBounds) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 30.0;
    const POINTS_PER_LINE: u32 = 100;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=POINTS_PER_LINE {
            let x = lerp(b.start_x, b.end_x, f64::from(i) / f64::from(POINTS_PER_LINE));
            points.push(PathPoint::at(x, y));
        }
    }
    points
}

fn zigzag(b: ReadingBounds, cycles: u32) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 30.0;
    const POINTS_PER_LINE: u32 = 20;
    const ZIGZAG_HEIGHT: f64 = 15.0;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let x = lerp(b.start_x, b.end_x, progress);
            let wave = (progress * PI * 2.0 * f64::from(cycles)).sin() * ZIGZAG_HEIGHT;
            points.push(PathPoint::at(x, y + wave));
        }
    }
    points
}

fn spiral(b: ReadingBounds, cycles: u32) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 30.0;
    const POINTS_PER_LINE: u32 = 20;
    const AMPLITUDE: f64 = 30.0;

    let height = b.height();
    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        // Single-row regions get phase 0 instead of 0/0.
        let line_progress = if height > 0.0 { (y - b.start_y) / height } else { 0.0 };

        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let angle = progress * PI * 2.0 * f64::from(cycles) + line_progress * PI * 2.0;
            let offset = angle.sin() * AMPLITUDE * (1.0 - line_progress * 0.5);
            points.push(PathPoint::at(lerp(b.start_x, b.end_x, progress) + offset, y));
        }
    }
    points
}

fn s_curve(b: ReadingBounds, cycles: u32) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 35.0;
    const POINTS_PER_LINE: u32 = 25;
    const CURVE_INTENSITY: f64 = 40.0;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let x = lerp(b.start_x, b.end_x, progress);
            let wave = (progress * PI * 2.0 * f64::from(cycles)).sin() * CURVE_INTENSITY;
            // Damped toward the line ends so rows join smoothly.
            let damping = (progress * PI).sin();
            points.push(PathPoint::with_meta(
                x + wave * damping,
                y + wave * 0.2,
                PointMeta::SCurve,
            ));
        }
    }
    points
}

fn serpentine(b: ReadingBounds) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 30.0;
    const POINTS_PER_LINE: u32 = 30;
    const WAVE_HEIGHT: f64 = 25.0;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let x = lerp(b.start_x, b.end_x, progress);
            let wave = (progress * PI * 6.0).sin() * WAVE_HEIGHT * (progress * PI).sin();
            points.push(PathPoint::with_meta(x, y + wave, PointMeta::Serpentine));
        }
    }
    points
}

fn horizontal_scan(b: ReadingBounds) -> Vec<PathPoint> {
    const SCAN_LINES: u32 = 8;
    const POINTS_PER_SCAN: u32 = 15;

    let scan_height = b.height() / f64::from(SCAN_LINES);
    let mut points = Vec::new();
    for scan in 0..=SCAN_LINES {
        let y = b.start_y + f64::from(scan) * scan_height;
        let reverse = scan % 2 == 1;

        for i in 0..=POINTS_PER_SCAN {
            let forward = f64::from(i) / f64::from(POINTS_PER_SCAN);
            let progress = if reverse { 1.0 - forward } else { forward };
            points.push(PathPoint::with_meta(
                lerp(b.start_x, b.end_x, progress),
                y,
                PointMeta::Scan { line: scan },
            ));
        }
    }
    points
}

fn diagonal_zigzag(b: ReadingBounds) -> Vec<PathPoint> {
    const DIAGONALS: u32 = 6;
    const POINTS_PER_DIAGONAL: u32 = 20;
    const ZIGZAG_AMPLITUDE: f64 = 15.0;

    let mut points = Vec::new();
    for diag in 0..DIAGONALS {
        let downward_right = diag % 2 == 0;

        for i in 0..=POINTS_PER_DIAGONAL {
            let progress = f64::from(i) / f64::from(POINTS_PER_DIAGONAL);
            let x = if downward_right {
                lerp(b.start_x, b.end_x, progress)
            } else {
                lerp(b.end_x, b.start_x, progress)
            };
            let y = lerp(b.start_y, b.end_y, progress);

            let offset = (progress * PI * 8.0).sin() * ZIGZAG_AMPLITUDE;
            points.push(PathPoint::with_meta(
                x + offset,
                y + offset * 0.3,
                PointMeta::DiagonalZigzag,
            ));
        }
    }
    points
}

fn multi_column(b: ReadingBounds) -> Vec<PathPoint> {
    const COLUMNS: u32 = 3;
    const COLUMN_MARGIN: f64 = 20.0;
    const LINE_HEIGHT: f64 = 35.0;
    const POINTS_PER_LINE: u32 = 8;

    let column_width = b.width() / f64::from(COLUMNS);
    let mut points = Vec::new();
    for col in 0..COLUMNS {
        let col_start = b.start_x + f64::from(col) * column_width + COLUMN_MARGIN;
        let col_end = b.start_x + f64::from(col + 1) * column_width - COLUMN_MARGIN;

        for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
            for i in 0..=POINTS_PER_LINE {
                let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
                points.push(PathPoint::with_meta(
                    lerp(col_start, col_end, progress),
                    y,
                    PointMeta::Column { index: col },
                ));
            }
        }
    }
    points
}

fn chunking(b: ReadingBounds, chunk_size: u32) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 35.0;
    const WORDS_PER_LINE: u32 = 12;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        let mut chunk = 0;
        while chunk < WORDS_PER_LINE {
            let midpoint =
                (f64::from(chunk) + f64::from(chunk_size) / 2.0) / f64::from(WORDS_PER_LINE);
            points.push(PathPoint::with_meta(
                lerp(b.start_x, b.end_x, midpoint),
                y,
                PointMeta::Chunk { chunk_size },
            ));
            chunk += chunk_size;
        }
    }
    points
}

fn meta_guiding(b: ReadingBounds) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 32.0;
    const POINTS_PER_LINE: u32 = 8;
    const CURVE: f64 = 10.0;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let x = lerp(b.start_x, b.end_x, progress);
            let curve = (progress * PI).sin() * CURVE;
            points.push(PathPoint::at(x + curve, y + curve * 0.2));
        }
    }
    points
}

fn fixation_reduction(b: ReadingBounds, fixation_distance: u32) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 40.0;
    const PX_PER_WORD: f64 = 50.0;
    const FIXATION_PAUSE_MS: f64 = 200.0;

    let width = b.width();
    // At least one interval, so narrow regions get the row endpoints.
    let fixations = ((width / (f64::from(fixation_distance) * PX_PER_WORD)).floor() as u32).max(1);

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        for i in 0..=fixations {
            let x = b.start_x + width * f64::from(i) / f64::from(fixations);
            points.push(
                PathPoint::with_meta(x, y, PointMeta::Fixation).with_duration(FIXATION_PAUSE_MS),
            );
        }
    }
    points
}

fn peripheral(b: ReadingBounds) -> Vec<PathPoint> {
    const LINE_HEIGHT: f64 = 45.0;

    let center_offset = b.width() * 0.3;
    let focus_width = center_offset * 2.0;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, LINE_HEIGHT) {
        points.push(PathPoint::with_meta(
            b.start_x + center_offset,
            y,
            PointMeta::Peripheral { focus_width },
        ));
        points.push(PathPoint::with_meta(
            b.end_x - center_offset,
            y,
            PointMeta::Peripheral { focus_width },
        ));
    }
    points
}

/// 5x5 grid of cell centers, traversal order shuffled uniformly.
fn schulte<R: Rng + ?Sized>(b: ReadingBounds, rng: &mut R) -> Vec<PathPoint> {
    const GRID: u32 = 5;

    let cell_width = b.width() / f64::from(GRID);
    let cell_height = b.height() / f64::from(GRID);

    let mut points = Vec::with_capacity((GRID * GRID) as usize);
    for row in 0..GRID {
        for col in 0..GRID {
            let order = points.len() as u32 + 1;
            points.push(PathPoint::with_meta(
                b.start_x + f64::from(col) * cell_width + cell_width / 2.0,
                b.start_y + f64::from(row) * cell_height + cell_height / 2.0,
                PointMeta::Cell { order },
            ));
        }
    }
    points.shuffle(rng);
    points
}

// The six book patterns reproduce fixed diagrams from a reference training
// method; pattern_stretch scales every spacing/amplitude constant.

fn book1(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    let line_spacing = 35.0 * stretch;
    let amplitude = 25.0 * stretch;
    const POINTS_PER_LINE: u32 = 80;

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, line_spacing) {
        for i in 0..=POINTS_PER_LINE {
            let progress = f64::from(i) / f64::from(POINTS_PER_LINE);
            let x = lerp(b.start_x, b.end_x, progress);
            let wave = (progress * PI * 4.0).sin() * amplitude;
            points.push(PathPoint::with_meta(
                x,
                y + wave,
                PointMeta::Book {
                    pattern: 1,
                    direction: None,
                },
            ));
        }
    }
    points
}

fn book2(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    const TOTAL_POINTS: u32 = 400;

    let width = b.width();
    let height = b.height();

    let mut points = Vec::with_capacity(TOTAL_POINTS as usize + 1);
    for i in 0..=TOTAL_POINTS {
        let vertical_progress = f64::from(i) / f64::from(TOTAL_POINTS);
        let y = b.start_y + height * vertical_progress;
        let wave = (vertical_progress * PI * 8.0).sin() * (width * 0.4 * stretch);
        points.push(PathPoint::with_meta(
            b.start_x + width * 0.5 + wave,
            y,
            PointMeta::Book {
                pattern: 2,
                direction: None,
            },
        ));
    }
    points
}

fn book3(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    let line_height = 30.0 * stretch;
    let spread = 0.25 * stretch;

    let left = (0.25 - spread).max(0.05);
    let right = (0.75 + spread).min(0.95);

    let meta = PointMeta::Book {
        pattern: 3,
        direction: None,
    };

    let mut points = Vec::new();
    for y in row_positions(b.start_y, b.end_y, line_height) {
        points.push(PathPoint::with_meta(lerp(b.start_x, b.end_x, left), y, meta));
        points.push(PathPoint::with_meta(lerp(b.start_x, b.end_x, 0.5), y, meta));
        points.push(PathPoint::with_meta(lerp(b.start_x, b.end_x, right), y, meta));
    }
    points
}

fn book4(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    const POINTS_PER_LOOP: u32 = 50;

    let loop_height = 60.0 * stretch;
    if !(loop_height > 0.0 && loop_height.is_finite()) {
        return Vec::new();
    }
    let loops = (b.height() / loop_height).floor() as u32;
    let scale = b.width() * 0.3 * stretch;
    let center_x = b.start_x + b.width() * 0.5;

    let mut points = Vec::new();
    for l in 0..loops {
        let center_y = b.start_y + (f64::from(l) + 0.5) * loop_height;

        for i in 0..=POINTS_PER_LOOP {
            // Two full turns trace the lemniscate's both lobes.
            let t = f64::from(i) / f64::from(POINTS_PER_LOOP) * PI * 4.0;
            let denom = 1.0 + t.sin() * t.sin();
            points.push(PathPoint::with_meta(
                center_x + scale * t.cos() / denom,
                center_y + (loop_height * 0.3) * t.sin() * t.cos() / denom,
                PointMeta::Book {
                    pattern: 4,
                    direction: None,
                },
            ));
        }
    }
    points
}

fn book5(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    const POINTS_PER_SCAN: u32 = 60;

    let scan_lines = ((12.0 / stretch).floor() as u32).max(1);
    let spacing = b.height() / f64::from(scan_lines);

    let mut points = Vec::new();
    for scan in 0..=scan_lines {
        let y = b.start_y + f64::from(scan) * spacing;
        let reverse = scan % 2 == 1;
        let direction = if reverse {
            ScanDirection::Reverse
        } else {
            ScanDirection::Forward
        };

        for i in 0..=POINTS_PER_SCAN {
            let forward = f64::from(i) / f64::from(POINTS_PER_SCAN);
            let progress = if reverse { 1.0 - forward } else { forward };
            points.push(PathPoint::with_meta(
                lerp(b.start_x, b.end_x, progress),
                y,
                PointMeta::Book {
                    pattern: 5,
                    direction: Some(direction),
                },
            ));
        }
    }
    points
}

fn book6(b: ReadingBounds, stretch: f64) -> Vec<PathPoint> {
    const TOTAL_POINTS: u32 = 300;
    const WAVE_FREQ: f64 = 15.0;

    let amplitude = 40.0 * stretch;
    let width = b.width();
    let height = b.height();

    let mut points = Vec::with_capacity(TOTAL_POINTS as usize + 1);
    for i in 0..=TOTAL_POINTS {
        let progress = f64::from(i) / f64::from(TOTAL_POINTS);
        let base_x = b.start_x + width * progress;
        let base_y = b.start_y + height * progress;

        let zigzag_x = (progress * PI * WAVE_FREQ).sin() * amplitude;
        let zigzag_y = (progress * PI * WAVE_FREQ * 0.7).cos() * (amplitude * 0.5);

        points.push(PathPoint::with_meta(
            base_x + zigzag_x,
            base_y + zigzag_y,
            PointMeta::Book {
                pattern: 6,
                direction: None,
            },
        ));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn bounds() -> ReadingBounds {
        ReadingBounds::new(0.0, 0.0, 1000.0, 300.0)
    }

    #[test]
    fn linear_produces_even_rows() {
        let settings = Settings {
            pattern: Pattern::Linear,
            ..Settings::default()
        };
        let t = generate(bounds(), &settings);
        // Rows at y = 0, 30, ..., 300 with 101 points each.
        assert_eq!(t.len(), 11 * 101);
        assert_eq!(t.points[0], PathPoint::at(0.0, 0.0));
        assert_eq!(t.points[100].x, 1000.0);
        assert_eq!(t.points[101].y, 30.0);
    }

    #[test]
    fn degenerate_bounds_yield_empty() {
        let reversed_x = ReadingBounds::new(500.0, 0.0, 100.0, 300.0);
        let reversed_y = ReadingBounds::new(0.0, 300.0, 1000.0, 100.0);
        for p in Pattern::ALL {
            let settings = Settings {
                pattern: p,
                ..Settings::default()
            };
            assert!(generate(reversed_x, &settings).is_empty(), "{p:?}");
            assert!(generate(reversed_y, &settings).is_empty(), "{p:?}");
        }
    }

    #[test]
    fn schulte_covers_all_cells_once() {
        let settings = Settings {
            pattern: Pattern::Schulte,
            ..Settings::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let t = generate_with_rng(bounds(), &settings, &mut rng);
        assert_eq!(t.len(), 25);

        let mut orders: Vec<u32> = t
            .iter()
            .map(|p| match p.meta {
                Some(PointMeta::Cell { order }) => order,
                other => panic!("unexpected meta {other:?}"),
            })
            .collect();
        orders.sort_unstable();
        assert_eq!(orders, (1..=25).collect::<Vec<_>>());

        // Cell centers regardless of order.
        for p in t.iter() {
            let col = ((p.x - 100.0) / 200.0).round();
            let row = ((p.y - 30.0) / 60.0).round();
            assert_eq!(p.x, 100.0 + col * 200.0);
            assert_eq!(p.y, 30.0 + row * 60.0);
        }
    }

    #[test]
    fn fixation_points_carry_pause_duration() {
        let settings = Settings {
            pattern: Pattern::FixationReduction,
            fixation_distance: 3,
            ..Settings::default()
        };
        let t = generate(bounds(), &settings);
        assert!(!t.is_empty());
        for p in t.iter() {
            assert_eq!(p.meta, Some(PointMeta::Fixation));
            assert_eq!(p.duration_ms, Some(200.0));
        }
        // width 1000 / (3 words * 50px) -> 6 intervals, 7 points per row.
        assert_eq!(t.len() % 7, 0);
    }

    #[test]
    fn narrow_fixation_region_has_no_nan() {
        let settings = Settings {
            pattern: Pattern::FixationReduction,
            fixation_distance: 10,
            ..Settings::default()
        };
        let narrow = ReadingBounds::new(0.0, 0.0, 40.0, 100.0);
        let t = generate(narrow, &settings);
        assert!(!t.is_empty());
        assert!(t.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn single_row_spiral_is_finite() {
        let flat = ReadingBounds::new(0.0, 100.0, 1000.0, 100.0);
        let settings = Settings {
            pattern: Pattern::Spiral,
            ..Settings::default()
        };
        let t = generate(flat, &settings);
        assert_eq!(t.len(), 21);
        assert!(t.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn book5_survives_large_stretch() {
        let settings = Settings {
            pattern: Pattern::Book5,
            pattern_stretch: 20.0,
            ..Settings::default()
        };
        let t = generate(bounds(), &settings);
        assert!(!t.is_empty());
        assert!(t.iter().all(|p| p.is_finite()));
    }
}
