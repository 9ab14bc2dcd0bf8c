#![forbid(unsafe_code)]

//! Bank home-screen mockup.
//!
//! A single presentational module parameterized by viewport: it lays out a
//! top bar, the account cards, promotions, and a bottom navigation bar, and
//! reports every walkthrough target through one [`LayoutPass`].
//!
//! ```text
//! ┌────────────────────────────┐
//! │ (profile)         (search) │  top bar
//! │ ┌────────────────────────┐ │
//! │ │ balance                │ │
//! │ ├────────────────────────┤ │
//! │ │ quick_actions          │ │
//! │ └────────────────────────┘ │
//! │ ┌────────────────────────┐ │
//! │ │ transfer               │ │  transaction history
//! │ └────────────────────────┘ │
//! │   promotions               │
//! │ ───────── ( FAB ) ──────── │  bottomCard = bar + FAB
//! └────────────────────────────┘
//! ```

use coachmark::{Anchor, HighlightShape, LayoutPass, Rect, Size};

pub const PROFILE: &str = "profile";
pub const SEARCH: &str = "search";
pub const BALANCE: &str = "balance";
pub const QUICK_ACTIONS: &str = "quick_actions";
pub const TRANSFER: &str = "transfer";
pub const PROMOTIONS: &str = "promotions";
pub const BOTTOM_CARD: &str = "bottomCard";

/// Every key the screen can report.
pub const ALL_KEYS: [&str; 7] = [
    PROFILE,
    SEARCH,
    BALANCE,
    QUICK_ACTIONS,
    TRANSFER,
    PROMOTIONS,
    BOTTOM_CARD,
];

const TOP_BAR_HEIGHT: f32 = 140.0;
const SIDE_INSET: f32 = 16.0;
const PROFILE_SIZE: f32 = 56.0;
const SEARCH_SIZE: f32 = 40.0;
const BALANCE_HEIGHT: f32 = 128.0;
const QUICK_ACTIONS_HEIGHT: f32 = 76.0;
const HISTORY_HEIGHT: f32 = 112.0;
const PROMOTION_HEIGHT: f32 = 60.0;
const PROMOTION_GAP: f32 = 16.0;
const BOTTOM_BAR_HEIGHT: f32 = 80.0;
/// The bar's highlight reaches above the bar to take in the raised FAB.
const BOTTOM_BAR_LIFT: f32 = 30.0;
const FAB_SIZE: f32 = 70.0;
/// The FAB is anchored against a viewport shortened by this much.
const FAB_BASELINE_RAISE: f32 = 15.0;

/// One laid-out element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeElement {
    pub key: &'static str,
    pub rect: Rect,
    pub shape: HighlightShape,
}

/// The home screen for one viewport.
#[derive(Debug, Clone)]
pub struct HomeScreen {
    viewport: Size,
    hidden: Vec<String>,
}

impl HomeScreen {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            hidden: Vec::new(),
        }
    }

    /// Leave `key` unmounted: it is laid out but never reported.
    #[must_use]
    pub fn hide(mut self, key: impl Into<String>) -> Self {
        self.hidden.push(key.into());
        self
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Lay out every element, hidden ones included.
    pub fn elements(&self) -> Vec<HomeElement> {
        let Size { width, height } = self.viewport;
        let content_width = (width - 2.0 * SIDE_INSET).max(0.0);
        let mut out = Vec::with_capacity(8);

        out.push(HomeElement {
            key: PROFILE,
            rect: Rect::new(SIDE_INSET, 24.0, PROFILE_SIZE, PROFILE_SIZE),
            shape: HighlightShape::Circle,
        });
        out.push(HomeElement {
            key: SEARCH,
            rect: Rect::new(width - SIDE_INSET - SEARCH_SIZE, 32.0, SEARCH_SIZE, SEARCH_SIZE),
            shape: HighlightShape::Circle,
        });

        let mut y = TOP_BAR_HEIGHT + SIDE_INSET;
        out.push(HomeElement {
            key: BALANCE,
            rect: Rect::new(SIDE_INSET, y, content_width, BALANCE_HEIGHT),
            shape: HighlightShape::RoundedRect,
        });
        y += BALANCE_HEIGHT;
        out.push(HomeElement {
            key: QUICK_ACTIONS,
            rect: Rect::new(SIDE_INSET, y, content_width, QUICK_ACTIONS_HEIGHT),
            shape: HighlightShape::RoundedRect,
        });
        y += QUICK_ACTIONS_HEIGHT + 6.0;

        // History card is 4 px wider on each side than the account cards.
        out.push(HomeElement {
            key: TRANSFER,
            rect: Rect::new(SIDE_INSET - 4.0, y, content_width + 8.0, HISTORY_HEIGHT),
            shape: HighlightShape::RoundedRect,
        });
        y += HISTORY_HEIGHT + 8.0;
        out.push(HomeElement {
            key: PROMOTIONS,
            rect: Rect::new(
                SIDE_INSET,
                y,
                content_width,
                2.0 * PROMOTION_HEIGHT + PROMOTION_GAP,
            ),
            shape: HighlightShape::RoundedRect,
        });

        let bar_top = height - BOTTOM_BAR_HEIGHT;
        out.push(HomeElement {
            key: BOTTOM_CARD,
            rect: Rect::new(
                0.0,
                bar_top - BOTTOM_BAR_LIFT,
                width,
                BOTTOM_BAR_HEIGHT + BOTTOM_BAR_LIFT,
            ),
            shape: HighlightShape::RoundedRect,
        });
        out.push(HomeElement {
            key: BOTTOM_CARD,
            rect: Anchor::BottomCenter.place(
                Size::new(FAB_SIZE, FAB_SIZE),
                Size::new(width, height - FAB_BASELINE_RAISE),
            ),
            shape: HighlightShape::Circle,
        });
        out
    }

    /// Report every visible element and commit as one full pass, dropping
    /// whatever a previous layout left behind.
    pub fn report(&self, mut pass: LayoutPass<'_>) -> u64 {
        for element in self.elements() {
            if self.hidden.iter().any(|k| k == element.key) {
                continue;
            }
            pass.report(element.key, element.rect, element.shape);
        }
        pass.commit()
    }
}
