use ratatui::style::Color;
use std::time::Duration;
use std::time::Instant;

/// Redraw interval while a cursor transition is running (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorAnimation {
    /// Cursor fades in at its new cell.
    #[default]
    Fade,
    /// Cursor slides over from the previous cell.
    Slide,
}

impl CursorAnimation {
    pub fn easing(self) -> Easing {
        match self {
            CursorAnimation::Fade => Easing::EaseInOut,
            CursorAnimation::Slide => Easing::EaseIn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    EaseIn,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` to eased progress. `t` is clamped to `0.0..=1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::EaseIn => t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Cursor state for one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    /// Cell the cursor belongs to.
    pub index: usize,
    /// Cell the cursor was in before the current transition, if it was visible.
    pub from: Option<usize>,
    /// Eased transition progress in `0.0..=1.0`.
    pub progress: f32,
    pub blink_on: bool,
}

impl CursorFrame {
    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Remembers where the cursor was and when it last moved.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorTracker {
    target: Option<usize>,
    previous: Option<usize>,
    changed_at: Option<Instant>,
}

impl CursorTracker {
    /// Records the cursor target for this frame. `None` means the cursor is hidden.
    ///
    /// A different target than last time restarts the transition at `now`.
    pub fn update(&mut self, target: Option<usize>, now: Instant) {
        if self.changed_at.is_some() && target == self.target {
            return;
        }
        self.previous = self.target;
        self.target = target;
        self.changed_at = Some(now);
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn frame(
        &self,
        now: Instant,
        animation: CursorAnimation,
        duration: Duration,
        blink: Option<Duration>,
    ) -> Option<CursorFrame> {
        let index = self.target?;
        let elapsed = self.elapsed(now);
        let linear = if duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / duration.as_secs_f32()
        };

        let blink_on = match blink {
            Some(half) if !half.is_zero() && elapsed >= duration => {
                let settled = elapsed - duration;
                (settled.as_nanos() / half.as_nanos()) % 2 == 0
            }
            _ => true,
        };

        Some(CursorFrame {
            index,
            from: self.previous,
            progress: animation.easing().apply(linear),
            blink_on,
        })
    }

    /// Whether the cursor needs redraws to progress (transition running or blinking).
    pub fn is_animating(&self, now: Instant, duration: Duration, blink: Option<Duration>) -> bool {
        if self.target.is_none() {
            return false;
        }
        blink.is_some_and(|half| !half.is_zero()) || self.elapsed(now) < duration
    }

    /// How long the current frame stays valid.
    ///
    /// While the transition runs this is one animation tick (at most [`FRAME_INTERVAL`]); after
    /// it, the time until the next blink edge. `None` means nothing changes until the next input.
    pub fn next_frame_in(
        &self,
        now: Instant,
        duration: Duration,
        blink: Option<Duration>,
    ) -> Option<Duration> {
        self.target?;
        let elapsed = self.elapsed(now);
        if elapsed < duration {
            return Some(FRAME_INTERVAL.min(duration - elapsed));
        }
        let half = blink.filter(|half| !half.is_zero())?;
        let settled = (elapsed - duration).as_nanos();
        let into_phase = settled % half.as_nanos();
        let remaining = half.as_nanos() - into_phase;
        Some(Duration::from_nanos(
            u64::try_from(remaining).unwrap_or(u64::MAX),
        ))
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.changed_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
    }
}

/// Realizes a partially transparent cursor on a terminal.
///
/// RGB colors are blended toward `background`; other colors cannot be blended, so they appear
/// once the cursor is at least half opaque. Returns `None` when nothing should be drawn.
pub fn fade_color(color: Color, background: Color, opacity: f32) -> Option<Color> {
    let opacity = opacity.clamp(0.0, 1.0);
    if let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, background) {
        if opacity <= 0.0 {
            return None;
        }
        let mix = |fg: u8, bg: u8| -> u8 {
            (bg as f32 + (fg as f32 - bg as f32) * opacity).round() as u8
        };
        return Some(Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb)));
    }
    (opacity >= 0.5).then_some(color)
}

/// Linear interpolation between two columns.
pub fn lerp_col(from: u16, to: u16, t: f32) -> u16 {
    let t = t.clamp(0.0, 1.0);
    (from as f32 + (to as f32 - from as f32) * t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn easing_hits_endpoints_and_clamps() {
        for e in [Easing::EaseIn, Easing::EaseInOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(-3.0), 0.0);
            assert_eq!(e.apply(7.0), 1.0);
        }
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn animation_kinds_pick_their_curves() {
        assert_eq!(CursorAnimation::Fade.easing(), Easing::EaseInOut);
        assert_eq!(CursorAnimation::Slide.easing(), Easing::EaseIn);
    }

    #[test]
    fn moving_the_cursor_restarts_the_transition() {
        let t0 = Instant::now();
        let mut tracker = CursorTracker::default();
        tracker.update(Some(0), t0);
        tracker.update(Some(0), t0 + 500 * MS);
        let f = tracker
            .frame(t0 + 500 * MS, CursorAnimation::Slide, 200 * MS, None)
            .unwrap();
        assert!(f.is_settled());

        tracker.update(Some(1), t0 + 500 * MS);
        let f = tracker
            .frame(t0 + 600 * MS, CursorAnimation::Slide, 200 * MS, None)
            .unwrap();
        assert_eq!(f.index, 1);
        assert_eq!(f.from, Some(0));
        assert!(f.progress > 0.0 && f.progress < 1.0);
    }

    #[test]
    fn hidden_cursor_has_no_frame() {
        let t0 = Instant::now();
        let mut tracker = CursorTracker::default();
        tracker.update(None, t0);
        assert!(
            tracker
                .frame(t0, CursorAnimation::Fade, 200 * MS, Some(500 * MS))
                .is_none()
        );
        assert!(!tracker.is_animating(t0, 200 * MS, Some(500 * MS)));
    }

    #[test]
    fn blink_alternates_after_transition() {
        let t0 = Instant::now();
        let mut tracker = CursorTracker::default();
        tracker.update(Some(2), t0);
        let at = |ms: u64| {
            tracker
                .frame(
                    t0 + Duration::from_millis(ms),
                    CursorAnimation::Fade,
                    200 * MS,
                    Some(500 * MS),
                )
                .unwrap()
                .blink_on
        };
        assert!(at(100));
        assert!(at(450));
        assert!(!at(750));
        assert!(at(1250));
    }

    #[test]
    fn next_frame_waits_for_the_next_blink_edge() {
        let t0 = Instant::now();
        let mut tracker = CursorTracker::default();
        tracker.update(Some(1), t0);
        let next = |ms: u64, blink: Option<Duration>| {
            tracker.next_frame_in(t0 + Duration::from_millis(ms), 200 * MS, blink)
        };
        assert_eq!(next(100, Some(500 * MS)), Some(FRAME_INTERVAL));
        assert_eq!(next(190, Some(500 * MS)), Some(10 * MS));
        assert_eq!(next(200, Some(500 * MS)), Some(500 * MS));
        assert_eq!(next(450, Some(500 * MS)), Some(250 * MS));
        assert_eq!(next(950, Some(500 * MS)), Some(250 * MS));
        assert_eq!(next(450, None), None);
        assert_eq!(next(450, Some(Duration::ZERO)), None);

        tracker.update(None, t0);
        assert_eq!(
            tracker.next_frame_in(t0, 200 * MS, Some(500 * MS)),
            None
        );
    }

    #[test]
    fn zero_duration_is_settled_immediately() {
        let t0 = Instant::now();
        let mut tracker = CursorTracker::default();
        tracker.update(Some(0), t0);
        let f = tracker
            .frame(t0, CursorAnimation::Fade, Duration::ZERO, None)
            .unwrap();
        assert_eq!(f.progress, 1.0);
    }

    #[test]
    fn fade_blends_rgb_and_thresholds_named_colors() {
        assert_eq!(
            fade_color(Color::Rgb(200, 100, 0), Color::Rgb(0, 0, 0), 0.5),
            Some(Color::Rgb(100, 50, 0))
        );
        assert_eq!(fade_color(Color::Blue, Color::Reset, 0.4), None);
        assert_eq!(fade_color(Color::Blue, Color::Reset, 0.6), Some(Color::Blue));
    }

    #[test]
    fn lerp_col_interpolates() {
        assert_eq!(lerp_col(2, 10, 0.0), 2);
        assert_eq!(lerp_col(2, 10, 0.5), 6);
        assert_eq!(lerp_col(10, 2, 1.0), 2);
    }
}
