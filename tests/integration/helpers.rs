use chat_window::{WindowConfig, WindowManager};

/// Build a manager with the knobs under test. Estimated height stays at the
/// default; every test that cares about exact geometry measures all messages.
pub fn manager(threshold: usize, chunk: usize, overscan: f32) -> WindowManager {
    let config = WindowConfig {
        activation_threshold: threshold,
        load_chunk_size: chunk,
        overscan,
        ..WindowConfig::default()
    };
    WindowManager::new(config).unwrap()
}

/// Attach messages `m0..mN` and report one measured height per message.
pub fn seed(mgr: &mut WindowManager, heights: &[f32]) -> Vec<String> {
    let ids: Vec<String> = (0..heights.len()).map(|i| format!("m{i}")).collect();
    mgr.set_messages(ids.clone());
    for (id, px) in ids.iter().zip(heights) {
        mgr.report_height(id, *px);
    }
    ids
}

/// The reference transcript used across the scenario tests: five messages
/// totalling 870 px.
pub const HEIGHTS: [f32; 5] = [100.0, 200.0, 150.0, 300.0, 120.0];
