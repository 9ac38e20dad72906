//! Standalone training widgets: the oscillating-point eye exerciser and the
//! numbered-grid reaction game. Neither shares state with the trajectory
//! engine; the host renders them from the pure state exposed here.

use rand::{Rng, seq::SliceRandom};

use crate::region::Point;

/// Exercise field dimensions the figures are laid out in. Hosts scale the
/// returned positions to their own viewport.
pub const FIELD_WIDTH: f64 = 400.0;
pub const FIELD_HEIGHT: f64 = 300.0;

/// Seconds each figure runs before the exerciser moves to the next.
pub const FIGURE_SECONDS: f64 = 10.0;

/// The five eye-exercise figures, each a pure function of elapsed seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExercisePattern {
    Figure8,
    Circle,
    Diagonal,
    Corners,
    Center,
}

impl ExercisePattern {
    pub const ALL: [ExercisePattern; 5] = [
        ExercisePattern::Figure8,
        ExercisePattern::Circle,
        ExercisePattern::Diagonal,
        ExercisePattern::Corners,
        ExercisePattern::Center,
    ];

    /// The figure active after `elapsed` seconds of auto-cycling.
    pub fn cycle(elapsed: f64) -> Self {
        let slot = (elapsed.max(0.0) / FIGURE_SECONDS) as usize;
        Self::ALL[slot % Self::ALL.len()]
    }

    /// Point position at `elapsed` seconds, within the exercise field.
    pub fn position(self, elapsed: f64) -> Point {
        const CORNERS: [(f64, f64); 8] = [
            (50.0, 50.0),
            (350.0, 50.0),
            (350.0, 250.0),
            (50.0, 250.0),
            (200.0, 50.0),
            (350.0, 150.0),
            (200.0, 250.0),
            (50.0, 150.0),
        ];

        match self {
            Self::Figure8 => Point::new(
                200.0 + elapsed.sin() * 150.0,
                150.0 + (elapsed * 2.0).sin() * 100.0,
            ),
            Self::Circle => Point::new(
                200.0 + elapsed.cos() * 120.0,
                150.0 + elapsed.sin() * 120.0,
            ),
            Self::Diagonal => {
                let d = elapsed.rem_euclid(4.0) / 4.0;
                Point::new(50.0 + d * 300.0, 50.0 + d * 200.0)
            }
            Self::Corners => {
                let idx = elapsed.rem_euclid(8.0) as usize;
                let (x, y) = CORNERS[idx % CORNERS.len()];
                Point::new(x, y)
            }
            Self::Center => Point::new(200.0, 150.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clicked number was the expected one.
    Correct,
    /// Wrong number; the expected one is unchanged.
    Wrong,
    /// The clicked number was 25 and the board is done.
    Completed,
}

/// The numbered-grid reaction game: find 1..=25 in ascending order on a
/// shuffled 5x5 board.
#[derive(Clone, Debug)]
pub struct SchulteBoard {
    cells: [u8; 25],
    expected: u8,
}

impl SchulteBoard {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Same unbiased shuffle as the schulte trajectory pattern.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = [0u8; 25];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u8 + 1;
        }
        cells.shuffle(rng);
        Self { cells, expected: 1 }
    }

    /// Row-major board contents.
    pub fn cells(&self) -> &[u8; 25] {
        &self.cells
    }

    /// The number the player must find next; `None` once completed.
    pub fn expected(&self) -> Option<u8> {
        (self.expected <= 25).then_some(self.expected)
    }

    pub fn is_completed(&self) -> bool {
        self.expected > 25
    }

    pub fn click(&mut self, number: u8) -> ClickOutcome {
        if self.is_completed() || number != self.expected {
            return ClickOutcome::Wrong;
        }
        self.expected += 1;
        if self.is_completed() {
            ClickOutcome::Completed
        } else {
            ClickOutcome::Correct
        }
    }
}

impl Default for SchulteBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn figures_stay_inside_the_field() {
        for pattern in ExercisePattern::ALL {
            for step in 0..200 {
                let p = pattern.position(step as f64 * 0.25);
                assert!((0.0..=FIELD_WIDTH).contains(&p.x), "{pattern:?} x={}", p.x);
                assert!((0.0..=FIELD_HEIGHT).contains(&p.y), "{pattern:?} y={}", p.y);
            }
        }
    }

    #[test]
    fn cycle_switches_every_ten_seconds() {
        assert_eq!(ExercisePattern::cycle(0.0), ExercisePattern::Figure8);
        assert_eq!(ExercisePattern::cycle(9.9), ExercisePattern::Figure8);
        assert_eq!(ExercisePattern::cycle(10.0), ExercisePattern::Circle);
        assert_eq!(ExercisePattern::cycle(45.0), ExercisePattern::Center);
        assert_eq!(ExercisePattern::cycle(50.0), ExercisePattern::Figure8);
    }

    #[test]
    fn board_holds_each_number_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = SchulteBoard::with_rng(&mut rng);
        let mut seen = board.cells().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn clicks_must_ascend() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = SchulteBoard::with_rng(&mut rng);

        assert_eq!(board.click(2), ClickOutcome::Wrong);
        assert_eq!(board.expected(), Some(1));

        for n in 1..25 {
            assert_eq!(board.click(n), ClickOutcome::Correct);
        }
        assert_eq!(board.click(25), ClickOutcome::Completed);
        assert!(board.is_completed());
        assert_eq!(board.expected(), None);
        assert_eq!(board.click(1), ClickOutcome::Wrong);
    }
}
