use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use gloo::timers::future::TimeoutFuture;

use crate::services::config::DEFAULT_REFRESH_INTERVAL_MS;
use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, PartialEq, Debug)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    /// Delay before the first tick; defaults to one full interval
    pub initial_delay_ms: Option<u32>,
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            initial_delay_ms: None,
        }
    }
}

impl PeriodicRefreshConfig {
    pub fn every(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            ..Self::default()
        }
    }

    fn first_delay_ms(&self) -> u32 {
        self.initial_delay_ms.unwrap_or(self.interval_ms)
    }
}

/// Result from the periodic refresh hook
pub struct UsePeriodicRefreshResult {
    pub is_running: bool,
    pub tick_count: u32,
    pub last_refresh_time: Option<f64>,
}

/// Fire `refresh_fn` every `config.interval_ms` while mounted and not paused.
///
/// The first tick happens after the initial delay, not immediately; callers
/// do their own load on mount. Each run of the effect gets a generation
/// number, and a loop stops as soon as the generation moves on, which covers
/// unmount, pause and config changes alike. Failures are the callback's
/// business: the next tick simply fires again.
#[hook]
pub fn use_periodic_refresh(
    config: PeriodicRefreshConfig,
    refresh_fn: Callback<()>,
    pause_when: bool,
) -> UsePeriodicRefreshResult {
    let is_running = use_state(|| false);
    let tick_count = use_state(|| 0u32);
    let last_refresh_time = use_state(|| Option::<f64>::None);
    let generation = use_mut_ref(|| 0u32);

    // Always call the newest callback, not the one captured when the loop began
    let latest_fn = use_mut_ref(|| refresh_fn.clone());
    *latest_fn.borrow_mut() = refresh_fn;

    {
        let is_running = is_running.clone();
        let tick_count = tick_count.clone();
        let last_refresh_time = last_refresh_time.clone();
        let generation = generation.clone();
        let latest_fn = latest_fn.clone();

        use_effect_with((config, pause_when), move |(config, is_paused)| {
            let my_generation = {
                let mut current = generation.borrow_mut();
                *current = current.wrapping_add(1);
                *current
            };

            if *is_paused {
                Logger::debug_with_component("periodic-refresh", "refresh paused");
                is_running.set(false);
            } else {
                Logger::debug_with_component(
                    "periodic-refresh",
                    &format!("refresh every {} ms", config.interval_ms),
                );
                is_running.set(true);

                let config = config.clone();
                let generation = generation.clone();
                spawn_local(async move {
                    let mut delay = config.first_delay_ms();
                    let mut ticks = 0u32;
                    loop {
                        TimeoutFuture::new(delay).await;
                        if *generation.borrow() != my_generation {
                            break;
                        }

                        let callback = latest_fn.borrow().clone();
                        callback.emit(());

                        ticks = ticks.saturating_add(1);
                        tick_count.set(ticks);
                        last_refresh_time.set(Some(js_sys::Date::now()));
                        delay = config.interval_ms;
                    }
                });
            }

            move || {
                let mut current = generation.borrow_mut();
                *current = current.wrapping_add(1);
            }
        });
    }

    UsePeriodicRefreshResult {
        is_running: *is_running,
        tick_count: *tick_count,
        last_refresh_time: *last_refresh_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = PeriodicRefreshConfig::default();
        assert_eq!(config.interval_ms, 300_000);
        assert_eq!(config.initial_delay_ms, None);
        assert_eq!(config.first_delay_ms(), 300_000);
    }

    #[wasm_bindgen_test]
    fn test_config_staggered() {
        let config = PeriodicRefreshConfig {
            initial_delay_ms: Some(15000),
            ..PeriodicRefreshConfig::every(60_000)
        };
        assert_eq!(config.first_delay_ms(), 15000);
        assert_eq!(config.interval_ms, 60_000);
    }
}
