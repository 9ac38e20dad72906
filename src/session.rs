//! The coordinating object: settings + trajectory + scheduler + current page.
//!
//! A settings mutation or a page change regenerates the trajectory; the
//! scheduler always reads the current one, and regeneration forces a reset
//! so a sequence computed from a stale page rectangle is never advanced.

use crate::{
    error::{SaccadeError, SaccadeResult},
    path::{PathPoint, Trajectory},
    pattern,
    playback::{Advance, Clock, Phase, Scheduler, Tick},
    region::{PageRect, ReadingBounds},
    settings::Settings,
};

/// Supplies rendered-page bounding rectangles, 1-based page indices.
/// Document decoding and rasterization live behind this boundary.
pub trait PageSource {
    fn page_count(&self) -> u32;
    fn page_rect(&self, page: u32) -> SaccadeResult<PageRect>;
}

#[derive(Clone, Copy, Debug)]
struct PageView {
    index: u32,
    rect: PageRect,
}

pub struct ReaderSession {
    settings: Settings,
    trajectory: Trajectory,
    scheduler: Scheduler,
    page: Option<PageView>,
}

impl ReaderSession {
    pub fn new(settings: Settings) -> SaccadeResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            trajectory: Trajectory::default(),
            scheduler: Scheduler::new(),
            page: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn cursor(&self) -> usize {
        self.scheduler.cursor()
    }

    pub fn current_page(&self) -> Option<u32> {
        self.page.map(|p| p.index)
    }

    pub fn bounds(&self) -> Option<ReadingBounds> {
        self.page.map(|p| {
            ReadingBounds::from_page(
                p.rect,
                self.settings.start_position,
                self.settings.end_position,
            )
        })
    }

    /// Replaces the settings record, then regenerates.
    pub fn set_settings(&mut self, settings: Settings) -> SaccadeResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.regenerate();
        Ok(())
    }

    /// Applies a mutation to a copy of the settings; commits and
    /// regenerates only if the result validates.
    pub fn update_settings(
        &mut self,
        mutate: impl FnOnce(&mut Settings),
    ) -> SaccadeResult<()> {
        let mut next = self.settings.clone();
        mutate(&mut next);
        self.set_settings(next)
    }

    /// Loads a page (1-based) from the source and regenerates.
    /// Any active playback is paused first: the old trajectory belongs to a
    /// page rectangle that is about to go away.
    #[tracing::instrument(skip(self, source))]
    pub fn load_page(&mut self, source: &dyn PageSource, page: u32) -> SaccadeResult<()> {
        let count = source.page_count();
        if page == 0 || page > count {
            return Err(SaccadeError::validation(format!(
                "page {page} out of range 1..={count}"
            )));
        }

        self.scheduler.pause();
        let rect = source.page_rect(page)?;
        self.page = Some(PageView { index: page, rect });
        self.regenerate();
        Ok(())
    }

    /// No-op at the first page.
    pub fn previous_page(&mut self, source: &dyn PageSource) -> SaccadeResult<()> {
        let Some(current) = self.current_page() else {
            return Ok(());
        };
        if current <= 1 {
            return Ok(());
        }
        self.load_page(source, current - 1)
    }

    /// No-op at the last page.
    pub fn next_page(&mut self, source: &dyn PageSource) -> SaccadeResult<()> {
        let Some(current) = self.current_page() else {
            return Ok(());
        };
        if current >= source.page_count() {
            return Ok(());
        }
        self.load_page(source, current + 1)
    }

    /// Regenerates the trajectory from the current page and settings and
    /// resets the scheduler (documented replacement policy).
    pub fn regenerate(&mut self) {
        self.trajectory = match self.page {
            Some(p) => {
                let bounds = ReadingBounds::from_page(
                    p.rect,
                    self.settings.start_position,
                    self.settings.end_position,
                );
                pattern::generate(bounds, &self.settings)
            }
            None => Trajectory::default(),
        };
        self.scheduler.trajectory_replaced();
    }

    pub fn start(&mut self) -> SaccadeResult<Tick> {
        self.scheduler.start(&self.trajectory)
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    pub fn advance(&mut self, tick: Tick) -> Advance {
        self.scheduler
            .advance(tick, &self.trajectory, &self.settings)
    }

    /// Drives playback to completion on the current thread, invoking the
    /// point-reached callback once per advance.
    ///
    /// The loop owns the session for its duration, so the only way out is
    /// exhaustion; interactive hosts should drive `start`/`advance`
    /// themselves and keep ticks cancellable via `pause`/`reset`.
    pub fn play(
        &mut self,
        clock: &mut dyn Clock,
        on_point: &mut dyn FnMut(&PathPoint),
    ) -> SaccadeResult<()> {
        let mut tick = self.start()?;
        loop {
            match self.advance(tick) {
                Advance::Emitted { point, delay, next } => {
                    on_point(&point);
                    clock.sleep(delay);
                    tick = next;
                }
                Advance::Finished | Advance::Stale => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Pattern;
    use std::time::Duration;

    struct FixedPages {
        rects: Vec<PageRect>,
    }

    impl PageSource for FixedPages {
        fn page_count(&self) -> u32 {
            self.rects.len() as u32
        }

        fn page_rect(&self, page: u32) -> SaccadeResult<PageRect> {
            self.rects
                .get(page as usize - 1)
                .copied()
                .ok_or_else(|| SaccadeError::validation("no such page"))
        }
    }

    struct InstantClock {
        slept: Vec<Duration>,
    }

    impl Clock for InstantClock {
        fn sleep(&mut self, duration: Duration) {
            self.slept.push(duration);
        }
    }

    fn source() -> FixedPages {
        FixedPages {
            rects: vec![
                PageRect::new(0.0, 0.0, 1100.0, 400.0),
                PageRect::new(0.0, 0.0, 1100.0, 700.0),
            ],
        }
    }

    fn session() -> ReaderSession {
        let settings = Settings {
            pattern: Pattern::Peripheral,
            point_speed: 1.0,
            ..Settings::default()
        };
        ReaderSession::new(settings).unwrap()
    }

    #[test]
    fn start_without_a_page_reports_empty_trajectory() {
        let mut s = session();
        assert!(matches!(
            s.start(),
            Err(SaccadeError::EmptyTrajectory(_))
        ));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn load_page_generates_and_navigation_is_clamped() {
        let src = source();
        let mut s = session();

        s.load_page(&src, 1).unwrap();
        assert_eq!(s.current_page(), Some(1));
        assert!(!s.trajectory().is_empty());

        // First page: previous is a no-op.
        s.previous_page(&src).unwrap();
        assert_eq!(s.current_page(), Some(1));

        s.next_page(&src).unwrap();
        assert_eq!(s.current_page(), Some(2));

        // Last page: next is a no-op.
        s.next_page(&src).unwrap();
        assert_eq!(s.current_page(), Some(2));

        assert!(s.load_page(&src, 0).is_err());
        assert!(s.load_page(&src, 3).is_err());
    }

    #[test]
    fn page_change_while_playing_forces_reset() {
        let src = source();
        let mut s = session();
        s.load_page(&src, 1).unwrap();

        let tick = s.start().unwrap();
        let Advance::Emitted { .. } = s.advance(tick) else {
            panic!("expected emission");
        };
        assert_eq!(s.cursor(), 1);

        s.next_page(&src).unwrap();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.cursor(), 0);

        // The pre-navigation tick is dead.
        assert_eq!(s.advance(tick), Advance::Stale);
    }

    #[test]
    fn settings_change_regenerates_and_resets() {
        let src = source();
        let mut s = session();
        s.load_page(&src, 1).unwrap();

        let before = s.trajectory().len();
        let tick = s.start().unwrap();

        s.update_settings(|cfg| cfg.pattern = Pattern::Linear).unwrap();
        assert_ne!(s.trajectory().len(), before);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.advance(tick), Advance::Stale);
    }

    #[test]
    fn invalid_settings_mutation_is_rolled_back() {
        let src = source();
        let mut s = session();
        s.load_page(&src, 1).unwrap();
        let before = s.trajectory().clone();

        assert!(s.update_settings(|cfg| cfg.point_speed = 0.0).is_err());
        assert_eq!(s.settings().point_speed, 1.0);
        assert_eq!(s.trajectory(), &before);
    }

    #[test]
    fn play_emits_every_point_with_computed_delays() {
        let src = source();
        let mut s = session();
        s.load_page(&src, 1).unwrap();
        let expected = s.trajectory().len();

        let mut clock = InstantClock { slept: Vec::new() };
        let mut seen = 0usize;
        s.play(&mut clock, &mut |_| seen += 1).unwrap();

        assert_eq!(seen, expected);
        assert_eq!(clock.slept.len(), expected);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.cursor(), 0);
    }
}
