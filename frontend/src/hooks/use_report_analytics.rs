use std::collections::HashMap;
use std::rc::Rc;
use yew::prelude::*;
use shared::{ReportAnalytics, ReportFormat, ReportType};
use wasm_bindgen_futures::spawn_local;

use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::download::save_bytes;
use crate::services::logging::Logger;

/// Analytics per report type, kept for the lifetime of the reports page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportCache {
    pub analytics: HashMap<ReportType, ReportAnalytics>,
    pub loading: Option<ReportType>,
}

impl ReportCache {
    pub fn get(&self, report_type: ReportType) -> Option<&ReportAnalytics> {
        self.analytics.get(&report_type)
    }

    pub fn is_loading(&self, report_type: ReportType) -> bool {
        self.loading == Some(report_type)
    }
}

pub enum ReportAction {
    Loading(ReportType),
    Loaded(ReportAnalytics),
}

impl Reducible for ReportCache {
    type Action = ReportAction;

    fn reduce(self: Rc<Self>, action: ReportAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ReportAction::Loading(report_type) => next.loading = Some(report_type),
            ReportAction::Loaded(analytics) => {
                if next.loading == Some(analytics.report_type) {
                    next.loading = None;
                }
                next.analytics.insert(analytics.report_type, analytics);
            }
        }
        Rc::new(next)
    }
}

pub struct UseReportAnalyticsResult {
    pub selected: ReportType,
    pub cache: ReportCache,
    pub exporting: Option<ReportFormat>,
    pub actions: UseReportAnalyticsActions,
}

impl UseReportAnalyticsResult {
    pub fn current(&self) -> Option<&ReportAnalytics> {
        self.cache.get(self.selected)
    }
}

#[derive(Clone, PartialEq)]
pub struct UseReportAnalyticsActions {
    pub select: Callback<ReportType>,
    pub refresh: Callback<ReportType>,
    pub export: Callback<ReportFormat>,
}

/// Loads each report type the first time its tab is opened. When the
/// analytics endpoint fails the tab shows built-in sample figures marked as
/// such, so the page never renders empty charts because of a network error.
#[hook]
pub fn use_report_analytics(api_client: &ApiClient) -> UseReportAnalyticsResult {
    let cache = use_reducer(ReportCache::default);
    let selected = use_state(|| ReportType::Orphans);
    let exporting = use_state(|| Option::<ReportFormat>::None);
    let toaster = use_toaster();

    let fetch = {
        let api_client = api_client.clone();
        let dispatcher = cache.dispatcher();
        let toaster = toaster.clone();

        use_callback((), move |report_type: ReportType, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let toaster = toaster.clone();

            dispatcher.dispatch(ReportAction::Loading(report_type));
            spawn_local(async move {
                let analytics = match api_client.get_report_analytics(report_type).await {
                    Ok(dto) => ReportAnalytics::from(dto),
                    Err(e) => {
                        Logger::warn_with_component(
                            "reports",
                            &format!("{} analytics unavailable, showing sample data: {}", report_type.label(), e),
                        );
                        toaster.info(format!("{} report: showing sample data ({})", report_type.label(), e));
                        ReportAnalytics::sample(report_type)
                    }
                };
                dispatcher.dispatch(ReportAction::Loaded(analytics));
            });
        })
    };

    {
        let fetch = fetch.clone();
        let cached = cache.get(*selected).is_some() || cache.is_loading(*selected);
        use_effect_with(*selected, move |report_type| {
            if !cached {
                fetch.emit(*report_type);
            }
            || ()
        });
    }

    let select = {
        let selected = selected.clone();
        use_callback((), move |report_type: ReportType, _| selected.set(report_type))
    };

    let export = {
        let api_client = api_client.clone();
        let exporting = exporting.clone();
        let report_type = *selected;
        let toaster = toaster.clone();

        use_callback(report_type, move |format: ReportFormat, report_type| {
            let api_client = api_client.clone();
            let exporting = exporting.clone();
            let toaster = toaster.clone();
            let report_type = *report_type;

            exporting.set(Some(format));
            spawn_local(async move {
                let file_name = format.file_name(report_type);
                match api_client.export_report(report_type, format).await {
                    Ok(bytes) => match save_bytes(&bytes, &file_name, format.mime_type()) {
                        Ok(()) => toaster.success(format!("Downloaded {}", file_name)),
                        Err(e) => {
                            Logger::error_with_component("reports", &format!("saving {} failed: {}", file_name, e));
                            toaster.error(format!("Could not save {}: {}", file_name, e));
                        }
                    },
                    Err(e) => {
                        Logger::error_with_component("reports", &format!("export {} failed: {}", file_name, e));
                        toaster.error(format!("Could not export {}: {}", file_name, e));
                    }
                }
                exporting.set(None);
            });
        })
    };

    UseReportAnalyticsResult {
        selected: *selected,
        cache: (*cache).clone(),
        exporting: *exporting,
        actions: UseReportAnalyticsActions {
            select,
            refresh: fetch,
            export,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_cache_keeps_each_type() {
        let cache = Rc::new(ReportCache::default());
        let cache = cache.reduce(ReportAction::Loading(ReportType::Staff));
        assert!(cache.is_loading(ReportType::Staff));

        let cache = cache.reduce(ReportAction::Loaded(ReportAnalytics::sample(ReportType::Staff)));
        let cache = cache.reduce(ReportAction::Loaded(ReportAnalytics::sample(ReportType::Inventory)));
        assert_eq!(cache.loading, None);
        assert!(cache.get(ReportType::Staff).is_some_and(|a| a.is_sample()));
        assert!(cache.get(ReportType::Inventory).is_some());
        assert!(cache.get(ReportType::Orphans).is_none());
    }
}
