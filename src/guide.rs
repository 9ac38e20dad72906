//! # Saccade guide
//!
//! A standalone walkthrough of the crate's architecture and public API.
//! If you are looking for copy/paste commands, start with the repository
//! `README.md`. If you are integrating or extending, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Settings`](crate::Settings): the externally owned configuration record
//! - [`ReadingBounds`](crate::ReadingBounds): the pixel region patterns sweep over
//! - [`Trajectory`](crate::Trajectory): the ordered guiding-point sequence
//! - [`PathPoint`](crate::PathPoint) / [`PointMeta`](crate::PointMeta): one position
//!   plus the pattern tag the host's renderer interprets
//! - [`Scheduler`](crate::Scheduler): the playback cursor state machine
//! - [`ReaderSession`](crate::ReaderSession): the coordinating object tying the above together
//!
//! The pipeline is explicitly staged:
//!
//! 1. Map the page rectangle to bounds: [`ReadingBounds::from_page`](crate::ReadingBounds::from_page)
//! 2. Generate the trajectory: [`pattern::generate`](crate::pattern::generate)
//! 3. Walk it at WPM-derived delays: [`Scheduler::start`](crate::Scheduler::start) /
//!    [`Scheduler::advance`](crate::Scheduler::advance)
//!
//! [`ReaderSession`](crate::ReaderSession) wires steps (1)+(2) to every settings or
//! page change and owns the scheduler for step (3).
//!
//! ---
//!
//! ## "No presentation in the core" (and why)
//!
//! The generators attach [`PointMeta`](crate::PointMeta) tags (chunk midpoints,
//! fixation pauses, peripheral focus widths, column indices, ...) instead of
//! touching any visual state. The host's overlay renderer is the only
//! interpreter of those tags, which keeps generation deterministic and
//! testable: the same bounds and settings always produce the same sequence,
//! except for the randomized grid pattern, which is the one documented
//! exception.
//!
//! ---
//!
//! ## Cancellation (the part worth reading twice)
//!
//! The scheduler never sleeps. `start`/`advance` return an epoch-tagged
//! [`Tick`](crate::Tick) and a delay; the driver waits, then presents the tick
//! back. `pause`, `reset`, and `start` each bump the epoch, so any tick issued
//! before a transition answers [`Advance::Stale`](crate::Advance::Stale) and
//! cannot move the cursor. A timer continuation left over from before a reset
//! is therefore inert by construction, not by careful bookkeeping in the host.
//!
//! Driving the loop:
//!
//! ```rust
//! use saccade::{Advance, PageRect, ReaderSession, Settings};
//!
//! # fn main() -> saccade::SaccadeResult<()> {
//! struct OnePage;
//!
//! impl saccade::PageSource for OnePage {
//!     fn page_count(&self) -> u32 {
//!         1
//!     }
//!     fn page_rect(&self, _page: u32) -> saccade::SaccadeResult<PageRect> {
//!         Ok(PageRect::new(0.0, 0.0, 900.0, 700.0))
//!     }
//! }
//!
//! let mut session = ReaderSession::new(Settings::default())?;
//! session.load_page(&OnePage, 1)?;
//!
//! let mut tick = session.start()?;
//! while let Advance::Emitted { point, delay, next } = session.advance(tick) {
//!     // position the guiding indicator at (point.x, point.y),
//!     // then wait `delay` before the next step
//!     let _ = (point, delay);
//!     tick = next;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For headless use, [`ReaderSession::play`](crate::ReaderSession::play) runs the
//! same loop against a [`Clock`](crate::Clock).
