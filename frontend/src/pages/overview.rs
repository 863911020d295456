use yew::prelude::*;
use shared::format::format_amount;

use crate::components::stat_card::StatCard;
use crate::hooks::use_dashboard_stats::use_dashboard_stats;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct OverviewPageProps {
    pub api_client: ApiClient,
}

#[function_component(OverviewPage)]
pub fn overview_page(props: &OverviewPageProps) -> Html {
    let dashboard = use_dashboard_stats(&props.api_client);
    let stats = &dashboard.stats;

    let on_refresh = {
        let refresh = dashboard.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <section class="page overview-page">
            <div class="page-header">
                <h2>{"Overview"}</h2>
                <button class="btn btn-secondary" onclick={on_refresh} disabled={dashboard.loading}>
                    {if dashboard.loading { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <div class="stat-grid">
                <StatCard label="Centres" value={stats.total_centres.to_string()} icon="fas fa-building" />
                <StatCard label="Branches" value={stats.total_branches.to_string()} icon="fas fa-code-branch" />
                <StatCard label="Staff" value={stats.total_staff.to_string()} icon="fas fa-users" />
                <StatCard label="Orphans" value={stats.total_orphans.to_string()} icon="fas fa-child" />
                <StatCard label="Inventory items" value={stats.inventory_items.to_string()} icon="fas fa-boxes" />
                <StatCard label="Low stock" value={stats.low_stock_items.to_string()} icon="fas fa-exclamation-triangle" />
                <StatCard label="Active campaigns" value={stats.active_campaigns.to_string()} icon="fas fa-hand-holding-heart" />
                <StatCard
                    label={format!("Raised of {}", format_amount(stats.total_goal))}
                    value={format_amount(stats.total_raised)}
                    icon="fas fa-donate"
                    progress={stats.fundraising_percent()}
                />
            </div>
        </section>
    }
}
