#![forbid(unsafe_code)]

pub mod error;
pub mod guide;
pub mod path;
pub mod pattern;
pub mod playback;
pub mod region;
pub mod session;
pub mod settings;
pub mod training;

pub use error::{SaccadeError, SaccadeResult};
pub use path::{PathPoint, PointMeta, ScanDirection, Trajectory};
pub use playback::{Advance, Clock, Phase, Scheduler, StdClock, Tick};
pub use region::{PAGE_MARGIN, PageRect, Point, ReadingBounds, Rect};
pub use session::{PageSource, ReaderSession};
pub use settings::{Pattern, Settings};
pub use training::{ClickOutcome, ExercisePattern, SchulteBoard};
