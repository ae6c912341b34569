// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a style from one snapshot to another.
//!
//! A [`StyleAnimation`] owns copies of a start and an end [`Style`] and writes
//! their [`mix`](crate::mix()) into a shared target style whenever the caller
//! reports progress. It does not keep time itself: an external driver (a frame
//! clock, a timer wheel, a test) calls [`StyleAnimation::tick`] with a ratio in
//! `0..=MIX_MAX` and finally [`StyleAnimation::complete`].
//!
//! [`progress_at`] and the easing functions turn elapsed time into such a
//! ratio.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_state_style::{MIX_MAX, Style, StyleAnimation, props};
//!
//! let key = props::RADIUS.default_state();
//! let mut start = Style::new();
//! start.set_scalar(key, 0).unwrap();
//! let mut end = Style::new();
//! end.set_scalar(key, 8).unwrap();
//!
//! let target = Rc::new(RefCell::new(Style::new()));
//! let mut anim = StyleAnimation::begin(&target, &start, &end).unwrap();
//! assert_eq!(target.borrow().get_scalar(key), Some((0, 0)));
//!
//! anim.tick(MIX_MAX / 2).unwrap();
//! assert_eq!(target.borrow().get_scalar(key), Some((4, 0)));
//!
//! anim.tick(MIX_MAX).unwrap();
//! anim.complete();
//! assert_eq!(target.borrow().get_scalar(key), Some((8, 0)));
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use crate::error::StyleError;
use crate::mix::{MIX_MAX, mix_into};
use crate::style::Style;

/// Maps a linear ratio in `0..=MIX_MAX` to an eased ratio in the same range.
pub type Easing = fn(u16) -> u16;

/// No easing.
#[must_use]
pub fn linear(t: u16) -> u16 {
    t.min(MIX_MAX)
}

/// Quadratic acceleration from zero velocity.
#[must_use]
pub fn ease_in(t: u16) -> u16 {
    let t = u32::from(t.min(MIX_MAX));
    u16::try_from((t * t) >> 8).unwrap_or(MIX_MAX)
}

/// Quadratic deceleration to zero velocity.
#[must_use]
pub fn ease_out(t: u16) -> u16 {
    MIX_MAX - ease_in(MIX_MAX - t.min(MIX_MAX))
}

/// [`ease_in`] for the first half, [`ease_out`] for the second.
#[must_use]
pub fn ease_in_out(t: u16) -> u16 {
    let t = t.min(MIX_MAX);
    let half = MIX_MAX / 2;
    if t < half {
        ease_in(t * 2) / 2
    } else {
        half + ease_out(t * 2 - MIX_MAX) / 2
    }
}

/// Holds the start until the very end.
#[must_use]
pub fn step(t: u16) -> u16 {
    if t >= MIX_MAX { MIX_MAX } else { 0 }
}

/// Converts elapsed time into an eased ratio.
///
/// A zero `duration` is immediately finished. Elapsed time beyond `duration`
/// saturates at [`MIX_MAX`].
///
/// ```rust
/// use core::time::Duration;
/// use understory_state_style::{MIX_MAX, linear, progress_at};
///
/// let total = Duration::from_millis(200);
/// assert_eq!(progress_at(Duration::ZERO, total, linear), 0);
/// assert_eq!(progress_at(Duration::from_millis(50), total, linear), MIX_MAX / 4);
/// assert_eq!(progress_at(Duration::from_secs(1), total, linear), MIX_MAX);
/// assert_eq!(progress_at(Duration::ZERO, Duration::ZERO, linear), MIX_MAX);
/// ```
#[must_use]
pub fn progress_at(elapsed: Duration, duration: Duration, easing: Easing) -> u16 {
    if duration.is_zero() {
        return easing(MIX_MAX);
    }
    let raw = elapsed.as_nanos().saturating_mul(u128::from(MIX_MAX)) / duration.as_nanos();
    easing(u16::try_from(raw).unwrap_or(MIX_MAX).min(MIX_MAX))
}

/// An in-flight transition of a shared style.
///
/// The animation holds only a weak reference to its target: dropping the
/// target turns further ticks into no-ops. Dropping the animation itself is
/// the same as [`cancel`](Self::cancel).
pub struct StyleAnimation {
    target: Weak<RefCell<Style>>,
    start: Style,
    end: Style,
    on_change: Option<Box<dyn FnMut(&Style)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
    finished: bool,
}

impl StyleAnimation {
    /// Starts a transition of `target` from `start` to `end`.
    ///
    /// Both endpoints are copied, so they may change or be dropped afterwards.
    /// `target` is immediately reset to a copy of `start`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is currently borrowed. Unlike a tick, starting an
    /// animation cannot be skipped: the target must begin at `start`.
    pub fn begin(
        target: &Rc<RefCell<Style>>,
        start: &Style,
        end: &Style,
    ) -> Result<Self, StyleError> {
        target.borrow_mut().copy_from(start)?;
        tracing::debug!(
            start_records = start.record_count(),
            end_records = end.record_count(),
            "style animation started"
        );
        Ok(Self {
            target: Rc::downgrade(target),
            start: start.clone(),
            end: end.clone(),
            on_change: None,
            on_complete: None,
            finished: false,
        })
    }

    /// Sets a callback invoked with the target after every tick.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&Style) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Sets a callback invoked once by [`complete`](Self::complete).
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Returns the start snapshot.
    #[must_use]
    pub fn start(&self) -> &Style {
        &self.start
    }

    /// Returns the end snapshot.
    #[must_use]
    pub fn end(&self) -> &Style {
        &self.end
    }

    /// Returns `true` while the target style is still alive.
    #[must_use]
    pub fn is_target_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Writes the mix at `progress` (`0..=MIX_MAX`) into the target.
    ///
    /// The change callback sees the target while it is only borrowed shared,
    /// so it may read the target through its own handle. If the target is
    /// gone or currently borrowed elsewhere the tick is skipped.
    pub fn tick(&mut self, progress: u16) -> Result<(), StyleError> {
        let Some(target) = self.target.upgrade() else {
            tracing::trace!(progress, "style animation target dropped; tick skipped");
            return Ok(());
        };
        {
            let Ok(mut style) = target.try_borrow_mut() else {
                tracing::warn!(progress, "style animation target busy; tick skipped");
                return Ok(());
            };
            mix_into(&self.start, &self.end, progress, &mut style)?;
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&target.borrow());
        }
        Ok(())
    }

    /// Finishes the animation, invoking the completion callback.
    ///
    /// The target keeps whatever the last tick wrote.
    pub fn complete(mut self) {
        self.finished = true;
        tracing::debug!("style animation completed");
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }

    /// Abandons the animation without invoking the completion callback.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for StyleAnimation {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!("style animation cancelled");
        }
    }
}

impl fmt::Debug for StyleAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleAnimation")
            .field("target_alive", &self.is_target_alive())
            .field("start", &self.start)
            .field("end", &self.end)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
