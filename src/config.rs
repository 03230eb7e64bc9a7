use wayfinder_core::TourConfig;

pub(crate) fn load_tour_config() -> TourConfig {
    let mut config = TourConfig::default();
    if let Some(ms) = env_ms(option_env!("WAYFINDER_POLL_MS")) {
        config.poll_interval_ms = ms.max(1);
    }
    if let Some(ms) = env_ms(option_env!("WAYFINDER_COOLDOWN_MS")) {
        config.advance_cooldown_ms = ms;
    }
    if let Some(ms) = env_ms(option_env!("WAYFINDER_CLICK_DELAY_MS")) {
        config.click_advance_delay_ms = ms;
    }
    config
}

fn env_ms(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}
