use yew::prelude::*;
use shared::DashboardStats;
use wasm_bindgen_futures::spawn_local;

use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseDashboardStatsResult {
    pub stats: DashboardStats,
    pub loading: bool,
    pub refresh: Callback<()>,
}

/// Overview figures. A failed fetch leaves every card at zero.
#[hook]
pub fn use_dashboard_stats(api_client: &ApiClient) -> UseDashboardStatsResult {
    let stats = use_state(DashboardStats::default);
    let loading = use_state(|| true);
    let toaster = use_toaster();

    let refresh = {
        let api_client = api_client.clone();
        let stats = stats.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let stats = stats.clone();
            let loading = loading.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.get_dashboard_stats().await {
                    Ok(data) => stats.set(data),
                    Err(e) => {
                        Logger::error_with_component("overview", &format!("stats fetch failed: {}", e));
                        toaster.error(format!("Could not load dashboard figures: {}", e));
                        stats.set(DashboardStats::default());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UseDashboardStatsResult {
        stats: (*stats).clone(),
        loading: *loading,
        refresh,
    }
}
