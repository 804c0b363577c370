//! Carousel state machine
//!
//! `Carousel` owns the active slide, the drag in progress and the handles of
//! its two timers. Rendering and scheduling go through the injected
//! `CarouselView` and `Scheduler`, so every transition runs without a browser
//! or a real clock.

use std::time::Duration;

use tracing::{debug, trace};

use super::schedule::{Scheduler, TimerHandle, TimerKind, TimerQueue};
use super::types::{CarouselConfig, CarouselError, CarouselState, GestureSession, Mode, Swipe};
use super::view::{CarouselView, SlideOffset};

pub struct Carousel<V, S> {
    slide_count: usize,
    active_index: usize,
    gesture: Option<GestureSession>,
    auto_timer: Option<TimerHandle>,
    resume_timer: Option<TimerHandle>,
    config: CarouselConfig,
    view: V,
    scheduler: S,
}

impl<V: CarouselView, S: Scheduler> Carousel<V, S> {
    /// Create a carousel over `slide_count` slides with default timings
    pub fn new(slide_count: usize, view: V, scheduler: S) -> Result<Self, CarouselError> {
        Self::with_config(slide_count, CarouselConfig::default(), view, scheduler)
    }

    pub fn with_config(
        slide_count: usize,
        config: CarouselConfig,
        view: V,
        scheduler: S,
    ) -> Result<Self, CarouselError> {
        if slide_count == 0 {
            return Err(CarouselError::NoSlides);
        }

        Ok(Self {
            slide_count,
            active_index: 0,
            gesture: None,
            auto_timer: None,
            resume_timer: None,
            config,
            view,
            scheduler,
        })
    }

    /// Show the first slide and begin auto-advancing
    pub fn start(&mut self) {
        self.render();
        self.start_auto_timer();
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<GestureSession> {
        self.gesture
    }

    pub fn mode(&self) -> Mode {
        if self.auto_timer.is_some() {
            Mode::AutoAdvancing
        } else if self.resume_timer.is_some() {
            Mode::ResumePending
        } else {
            Mode::Paused
        }
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active_index,
            slide_count: self.slide_count,
            mode: self.mode(),
            dragging: self.is_dragging(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Project the active index onto the view
    pub fn render(&mut self) {
        self.view.translate(SlideOffset::settled(self.active_index));
        self.view.highlight_dot(self.active_index);
    }

    /// Move to the next slide, wrapping after the last
    pub fn advance(&mut self) {
        self.active_index = (self.active_index + 1) % self.slide_count;
        self.render();
    }

    /// (Re)arm the repeating advance timer.
    ///
    /// Any advance timer already running is cancelled first, so at most one
    /// is ever live.
    pub fn start_auto_timer(&mut self) {
        self.stop_auto_timer();
        let handle = self
            .scheduler
            .schedule_repeating(TimerKind::Advance, self.config.advance_interval);
        self.auto_timer = Some(handle);
    }

    pub fn stop_auto_timer(&mut self) {
        if let Some(handle) = self.auto_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_resume(&mut self) {
        if let Some(handle) = self.resume_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn pause(&mut self) {
        self.stop_auto_timer();
        self.cancel_resume();
    }

    /// Stop auto-advancing and restart it after the grace period
    pub fn schedule_resume(&mut self) {
        self.schedule_resume_after(self.config.resume_delay);
    }

    /// Stop auto-advancing and restart it after `delay`.
    ///
    /// A pending resume is replaced, so the last call wins.
    pub fn schedule_resume_after(&mut self, delay: Duration) {
        self.pause();
        let handle = self.scheduler.schedule_once(TimerKind::Resume, delay);
        self.resume_timer = Some(handle);
    }

    pub fn on_gesture_start(&mut self, x: f64) {
        self.gesture = Some(GestureSession {
            start_x: x,
            start_index: self.active_index,
        });
        self.pause();
        debug!(
            "Carousel drag started at x={} on slide {}",
            x, self.active_index
        );
    }

    /// Preview the drag without committing a slide change
    pub fn on_gesture_move(&mut self, x: f64) {
        let Some(gesture) = self.gesture else {
            return;
        };
        let delta = x - gesture.start_x;
        self.view.translate(SlideOffset::dragged(self.active_index, delta));
    }

    /// Finish a drag. Returns `None` if no drag was in progress.
    pub fn on_gesture_end(&mut self, x: f64) -> Option<Swipe> {
        let gesture = self.gesture.take()?;
        let delta = x - gesture.start_x;
        let threshold = self.config.swipe_threshold_px;

        let swipe = if delta > threshold && self.active_index > 0 {
            self.active_index -= 1;
            Swipe::Previous
        } else if delta < -threshold && self.active_index < self.slide_count - 1 {
            self.active_index += 1;
            Swipe::Next
        } else {
            Swipe::SnapBack
        };

        debug!(
            "Carousel drag from slide {} ended: delta={} {:?}, now on slide {}",
            gesture.start_index, delta, swipe, self.active_index
        );
        self.render();
        self.schedule_resume();
        Some(swipe)
    }

    /// Jump straight to slide `index`
    pub fn on_dot_select(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.slide_count {
            return Err(CarouselError::SlideOutOfRange {
                index,
                slide_count: self.slide_count,
            });
        }

        self.active_index = index;
        self.render();
        self.schedule_resume();
        Ok(())
    }

    /// Pause while the pointer hovers the carousel; no resume is scheduled
    pub fn on_pointer_enter(&mut self) {
        self.pause();
    }

    /// Resume after the grace period. During a drag the timers stay off;
    /// the gesture end schedules the resume.
    pub fn on_pointer_leave(&mut self) {
        if self.is_dragging() {
            return;
        }
        self.schedule_resume();
    }

    /// Handle a timer firing.
    ///
    /// Returns `false` for handles the carousel no longer holds; those timers
    /// were cancelled and have no effect. A live timer firing mid-drag is
    /// cancelled instead of run: nothing advances under the user's finger.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        let live = self.auto_timer == Some(handle) || self.resume_timer == Some(handle);
        if live && self.is_dragging() {
            debug!("Dropping {:?} timer fired during a drag", handle.kind());
            self.pause();
            return false;
        }

        if self.auto_timer == Some(handle) {
            self.advance();
            true
        } else if self.resume_timer == Some(handle) {
            self.resume_timer = None;
            debug!(
                "Carousel resuming auto-advance on slide {}",
                self.active_index
            );
            self.start_auto_timer();
            true
        } else {
            trace!("Ignoring stale {:?} timer {}", handle.kind(), handle.id());
            false
        }
    }
}

impl<V: CarouselView> Carousel<V, TimerQueue> {
    /// Fire every timer due up to `now`, in deadline order, then move the
    /// clock to `now`. Returns the number of timers that took effect.
    pub fn run_until(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(handle) = self.scheduler.pop_due(now) {
            if self.on_timer(handle) {
                fired += 1;
            }
        }
        self.scheduler.set_now(now);
        fired
    }

    /// Let `elapsed` pass on the virtual clock
    pub fn run_for(&mut self, elapsed: Duration) -> usize {
        let now = self.scheduler.now() + elapsed;
        self.run_until(now)
    }
}
