/// A fresh 64-bit seed drawn from the browser's `Math.random`.
pub(crate) fn js_random_seed() -> u64 {
    let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let low = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (high << 32) | low
}

/// Inline style giving an element its player's color.
pub(crate) fn player_color_style(color: privatizace_core::PlayerColor) -> String {
    format!("--player-color: {}", color.hex())
}
