use yew::prelude::*;
use shared::{ReportFormat, ReportType};

use crate::components::analytics_chart::AnalyticsChart;
use crate::components::stat_card::StatCard;
use crate::hooks::use_report_analytics::use_report_analytics;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ReportsPageProps {
    pub api_client: ApiClient,
}

#[function_component(ReportsPage)]
pub fn reports_page(props: &ReportsPageProps) -> Html {
    let reports = use_report_analytics(&props.api_client);
    let selected = reports.selected;
    let loading = reports.cache.is_loading(selected);

    let on_refresh = {
        let refresh = reports.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(selected))
    };

    let export_button = |format: ReportFormat, label: &'static str| {
        let export = reports.actions.export.clone();
        let busy = reports.exporting == Some(format);
        let onclick = Callback::from(move |_: MouseEvent| export.emit(format));
        html! {
            <button class="btn btn-secondary" {onclick} disabled={reports.exporting.is_some()}>
                {if busy { "Exporting..." } else { label }}
            </button>
        }
    };

    html! {
        <section class="page reports-page">
            <div class="page-header">
                <h2>{"Reports"}</h2>
                <button class="btn btn-secondary" onclick={on_refresh} disabled={loading}>
                    {if loading { "Loading..." } else { "Refresh" }}
                </button>
                {export_button(ReportFormat::Pdf, "Export PDF")}
                {export_button(ReportFormat::Excel, "Export Excel")}
            </div>

            <nav class="report-tabs">
                {for ReportType::ALL.iter().map(|report_type| {
                    let report_type = *report_type;
                    let select = reports.actions.select.clone();
                    let onclick = Callback::from(move |_: MouseEvent| select.emit(report_type));
                    html! {
                        <button
                            class={classes!("tab", (report_type == selected).then_some("active"))}
                            {onclick}
                        >
                            {report_type.label()}
                        </button>
                    }
                })}
            </nav>

            {match reports.current() {
                None => html! { <div class="loading">{"Loading report..."}</div> },
                Some(analytics) => html! {
                    <>
                        {if analytics.is_sample() {
                            html! {
                                <div class="sample-banner">
                                    {"The report service could not be reached. These figures are sample data, not your records."}
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                        <div class="stat-grid">
                            {for analytics.summary.iter().map(|stat| html! {
                                <StatCard label={stat.label} value={stat.value.to_string()} />
                            })}
                        </div>
                        <div class="chart-grid">
                            {for analytics.charts.iter().map(|panel| html! {
                                <AnalyticsChart key={panel.title} panel={panel.clone()} />
                            })}
                        </div>
                    </>
                },
            }}
        </section>
    }
}
