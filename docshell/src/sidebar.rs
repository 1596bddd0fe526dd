//! Interruption-safe sidebar show/hide animation
//!
//! Every transition is tagged with a [`TransitionId`]. The resting offset is
//! written eagerly when a transition starts, but only the most recent
//! transition may finalize visibility once it settles. A `hide` that was
//! overtaken by a `show` therefore never hides the sidebar.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Duration of every sidebar transition
pub const TRANSITION_DURATION: Duration = Duration::from_millis(250);

/// Easing curve of every sidebar transition
pub const TRANSITION_EASING: Easing = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);

/// Timing function of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    CubicBezier(f64, f64, f64, f64),
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({:?}, {:?}, {:?}, {:?})", x1, y1, x2, y2)
            }
        }
    }
}

/// Identifies one sidebar transition; later transitions have larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

/// A margin-left transition of the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub id: TransitionId,
    /// Starting left margin in pixels
    pub from: f64,
    /// Final left margin in pixels
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

/// Presentation state of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl fmt::Display for SidebarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Shown => "shown",
            Self::Hiding => "hiding",
        };
        f.write_str(name)
    }
}

/// Runs transitions; `play` resolves once the transition has settled
#[async_trait(?Send)]
pub trait AnimationDriver {
    async fn play(&self, transition: &Transition);
}

/// Driver that lets the transition's duration elapse on the tokio clock
#[derive(Debug, Default, Clone, Copy)]
pub struct TimedAnimationDriver;

#[async_trait(?Send)]
impl AnimationDriver for TimedAnimationDriver {
    async fn play(&self, transition: &Transition) {
        log::debug!(
            "Sidebar transition {:?}: {}px -> {}px over {:?} ({})",
            transition.id,
            transition.from,
            transition.to,
            transition.duration,
            transition.easing
        );
        tokio::time::sleep(transition.duration).await;
    }
}

/// Sidebar presentation state machine
#[derive(Debug, Clone)]
pub struct SidebarAnimator {
    state: SidebarState,
    /// Removed from layout and hit-testing
    hidden: bool,
    /// Resting left margin in pixels
    margin_left: f64,
    /// Measured width; `None` while the width is `auto`
    width: Option<f64>,
    next_id: u64,
    current: Option<TransitionId>,
}

impl SidebarAnimator {
    /// A fully shown sidebar of the given measured width
    pub fn new(width: Option<f64>) -> Self {
        Self {
            state: SidebarState::Shown,
            hidden: false,
            margin_left: 0.0,
            width,
            next_id: 0,
            current: None,
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn margin_left(&self) -> f64 {
        self.margin_left
    }

    /// Most recently started transition
    pub fn current_transition(&self) -> Option<TransitionId> {
        self.current
    }

    fn mint(&mut self) -> TransitionId {
        self.next_id += 1;
        let id = TransitionId(self.next_id);
        self.current = Some(id);
        id
    }

    fn offscreen_offset(&self) -> f64 {
        -self.width.unwrap_or(0.0)
    }

    fn transition(&mut self, from: f64, to: f64) -> Transition {
        let id = self.mint();
        self.margin_left = to;
        Transition {
            id,
            from,
            to,
            duration: TRANSITION_DURATION,
            easing: TRANSITION_EASING,
        }
    }

    /// Start sliding the sidebar in
    ///
    /// A hidden sidebar is put back into layout first so the transition has a
    /// starting geometry. It starts off-screen by its width unless a margin
    /// is already set (e.g., an interrupted hide).
    pub fn show(&mut self) -> Transition {
        self.hidden = false;

        let from = match self.width {
            Some(width) if self.margin_left == 0.0 => -width,
            _ => self.margin_left,
        };

        self.state = SidebarState::Showing;
        self.transition(from, 0.0)
    }

    /// Start sliding the sidebar out from its current offset
    pub fn hide(&mut self) -> Transition {
        self.hidden = false;

        let from = self.margin_left;
        let to = self.offscreen_offset();

        self.state = SidebarState::Hiding;
        self.transition(from, to)
    }

    /// Finalize a settled transition
    ///
    /// # Returns
    /// * `true` - `id` was the current transition and the state was finalized
    /// * `false` - `id` was superseded; nothing changed
    pub fn settle(&mut self, id: TransitionId) -> bool {
        if self.current != Some(id) {
            log::debug!("Skipping finalize of superseded transition {:?}", id);
            return false;
        }

        match self.state {
            SidebarState::Hiding => {
                self.hidden = true;
                self.state = SidebarState::Hidden;
            }
            SidebarState::Showing => {
                self.state = SidebarState::Shown;
            }
            SidebarState::Hidden | SidebarState::Shown => {}
        }
        true
    }
}
