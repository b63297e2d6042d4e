// =====
// TESTS: 5
// =====
//
// Property-based invariant tests for window evaluation.
//
// 1. Refresh total equals the sum of per-message heights.
// 2. The returned range covers the overscanned viewport in cumulative space.
// 3. No smaller range satisfies the coverage (start maximal, end minimal).
// 4. Evaluation is idempotent for identical inputs.
// 5. A successful load_earlier retreats the next start by a full chunk.

use proptest::prelude::*;

use chat_window::{WindowConfig, WindowManager};

fn heights_strategy(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1u32..=400, 1..=max_len)
}

fn build_manager(heights: &[u32], overscan: f32, chunk: usize) -> WindowManager {
    let config = WindowConfig {
        activation_threshold: 1,
        overscan,
        load_chunk_size: chunk,
        ..WindowConfig::default()
    };
    let mut mgr = WindowManager::new(config).unwrap();
    let ids: Vec<String> = (0..heights.len()).map(|i| format!("m{i}")).collect();
    mgr.set_messages(ids.clone());
    for (id, px) in ids.iter().zip(heights) {
        #[allow(clippy::cast_precision_loss)]
        mgr.report_height(id, *px as f32);
    }
    mgr
}

// Integer-valued f32 sums stay exact well past these magnitudes, so the
// naive prefix computed here must match the crate's bit for bit.
#[allow(clippy::cast_precision_loss)]
fn naive_prefix(heights: &[u32]) -> Vec<f32> {
    let mut prefix = vec![0.0f32];
    let mut cursor = 0.0f32;
    for &px in heights {
        cursor += px as f32;
        prefix.push(cursor);
    }
    prefix
}

proptest! {
    #[test]
    fn refresh_total_matches_height_sum(heights in heights_strategy(120)) {
        let mut mgr = build_manager(&heights, 100.0, 10);
        mgr.evaluate(0.0, 300.0);
        let total = mgr.refresh().total_height;
        let expected = *naive_prefix(&heights).last().unwrap();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn range_covers_overscanned_viewport(
        heights in heights_strategy(120),
        scroll_frac in 0.0f32..1.2,
        viewport in 0.0f32..=800.0,
        overscan in 0.0f32..=500.0,
    ) {
        let prefix = naive_prefix(&heights);
        let total = *prefix.last().unwrap();
        let scroll_top = total * scroll_frac;

        let mut mgr = build_manager(&heights, overscan, 10);
        let state = mgr.evaluate(scroll_top, viewport);
        prop_assert!(state.enabled);

        let low = (scroll_top - overscan).max(0.0);
        let high = scroll_top + viewport + overscan;

        prop_assert!(state.start < state.end && state.end <= heights.len());
        prop_assert_eq!(state.pad_top, prefix[state.start]);
        prop_assert_eq!(state.visible_height, prefix[state.end] - prefix[state.start]);
        // Coverage: the slice spans the whole overscanned band that exists.
        prop_assert!(prefix[state.start] <= low);
        prop_assert!(prefix[state.end] >= high.min(total));
    }

    #[test]
    fn range_is_minimal(
        heights in heights_strategy(120),
        scroll_frac in 0.0f32..1.2,
        viewport in 0.0f32..=800.0,
        overscan in 0.0f32..=500.0,
    ) {
        let prefix = naive_prefix(&heights);
        let total = *prefix.last().unwrap();
        let scroll_top = total * scroll_frac;

        let mut mgr = build_manager(&heights, overscan, 10);
        let state = mgr.evaluate(scroll_top, viewport);

        let low = (scroll_top - overscan).max(0.0);
        let high = scroll_top + viewport + overscan;

        // start is the largest index still covering the band floor.
        if state.start + 1 < heights.len() {
            prop_assert!(prefix[state.start + 1] > low);
        }
        // end is the smallest exclusive index clearing the band ceiling.
        if state.end > state.start + 1 {
            prop_assert!(prefix[state.end - 1] <= high);
        }
    }

    #[test]
    fn evaluation_is_idempotent(
        heights in heights_strategy(120),
        scroll_frac in 0.0f32..1.2,
        viewport in 0.0f32..=800.0,
    ) {
        let prefix = naive_prefix(&heights);
        let scroll_top = *prefix.last().unwrap() * scroll_frac;

        let mut mgr = build_manager(&heights, 200.0, 10);
        let first = mgr.evaluate(scroll_top, viewport);
        let second = mgr.evaluate(scroll_top, viewport);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn load_earlier_retreats_start_by_chunk(
        heights in heights_strategy(120),
        scroll_frac in 0.0f32..1.0,
        chunk in 1usize..=20,
    ) {
        let prefix = naive_prefix(&heights);
        let scroll_top = *prefix.last().unwrap() * scroll_frac;

        let mut mgr = build_manager(&heights, 0.0, chunk);
        let before = mgr.evaluate(scroll_top, 200.0);

        if mgr.load_earlier() {
            let after = mgr.evaluate(scroll_top, 200.0);
            prop_assert!(after.start <= before.start.saturating_sub(chunk));
            prop_assert!(after.end >= after.start + 1);
        } else {
            prop_assert_eq!(before.start, 0);
        }
    }
}
