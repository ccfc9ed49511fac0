// src/config.rs

use std::str::FromStr;

pub const DURATION_ENV: &str = "POLYANIM_DURATION";
pub const LOOP_ENV: &str = "POLYANIM_LOOP";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub animation_duration_secs: f32,
    pub looping: bool,
    pub clear_color: wgpu::Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Animated Polygons".to_string(),
            window_width: 1024,
            window_height: 768,
            animation_duration_secs: 3.0,
            looping: true,
            clear_color: wgpu::Color { r: 0.05, g: 0.05, b: 0.1, a: 1.0 },
        }
    }
}

impl AppConfig {
    /// Defaults, with `POLYANIM_DURATION` (seconds) and `POLYANIM_LOOP`
    /// (`true`/`false`) applied when set. Unparsable values are logged and skipped.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(duration) = read_env::<f32>(DURATION_ENV) {
            config.animation_duration_secs = duration;
        }
        if let Some(looping) = read_env::<bool>(LOOP_ENV) {
            config.looping = looping;
        }
        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: could not parse it", key, raw);
            None
        }
    }
}
