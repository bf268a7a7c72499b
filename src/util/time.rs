/// Milliseconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Milliseconds since the UNIX epoch, from the page clock offset by the
/// navigation start time
#[cfg(target_arch = "wasm32")]
pub fn unix_millis() -> u64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| (perf.timing().navigation_start() + perf.now()) as u64)
        .unwrap_or(0)
}

/// Whole seconds since the UNIX epoch, as stored on saved palettes
pub fn timestamp_secs() -> u64 {
    unix_millis() / 1000
}
