#![no_main]

use arbitrary::Arbitrary;
use coachmark_core::{Rect, Size};
use coachmark_layout::{PlacementConfig, PlacementSide, solve_card_position};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    viewport: (u16, u16),
    card: (u16, u16),
    rects: Vec<(u16, u16, u16, u16)>,
}

fuzz_target!(|input: Input| {
    let viewport = Size::new(f32::from(input.viewport.0), f32::from(input.viewport.1));
    let card = Size::new(f32::from(input.card.0), f32::from(input.card.1));
    let rects: Vec<Rect> = input
        .rects
        .iter()
        .take(16)
        .map(|&(x, y, w, h)| Rect::new(f32::from(x), f32::from(y), f32::from(w), f32::from(h)))
        .collect();
    let config = PlacementConfig::default();

    let placed = solve_card_position(&rects, viewport, card, &config);
    assert!(placed.offset.x.is_finite() && placed.offset.y.is_finite());

    if rects.is_empty() || !viewport.is_measured() {
        assert_eq!(placed.side, PlacementSide::Fallback);
        return;
    }

    let m = config.margin;
    if let PlacementSide::Gap { after } = placed.side {
        // A gap card never leaves its gap, margins or not.
        let mut sorted = rects.clone();
        sorted.sort_by(|a, b| a.top().total_cmp(&b.top()));
        assert!(placed.offset.y >= sorted[after].bottom() - 1e-3, "{placed:?}");
        assert!(placed.offset.y + card.height <= sorted[after + 1].top() + 1e-3, "{placed:?}");
    } else if viewport.height >= card.height + 2.0 * m {
        // Whenever the card fits between the margins, it stays inside them.
        assert!(placed.offset.y >= m - 1e-3, "{placed:?}");
        assert!(placed.offset.y + card.height <= viewport.height - m + 1e-3, "{placed:?}");
    }
    assert!(placed.offset.x >= m);
});
