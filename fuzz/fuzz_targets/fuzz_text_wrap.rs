#![no_main]

use coachmark_render::text::{display_width, truncate_to_width, wrap_text};
use libfuzzer_sys::fuzz_target;
use unicode_segmentation::UnicodeSegmentation;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 2048 {
        return;
    }

    let _width = display_width(text);

    for max_width in [1, 10, 31, 80] {
        for line in wrap_text(text, max_width) {
            // A single grapheme wider than the line is the only allowed overflow.
            let w = display_width(&line);
            assert!(
                w <= max_width || line.graphemes(true).count() == 1,
                "wrapped line exceeds {max_width}: width={w} {line:?}"
            );
        }

        let cut = truncate_to_width(text, max_width);
        assert!(display_width(cut) <= max_width);
        assert!(text.starts_with(cut));
    }
});
