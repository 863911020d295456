use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    /// Renders a progress bar underneath, 0..=100
    #[prop_or_default]
    pub progress: Option<f64>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            {props.icon.as_ref().map(|icon| html! { <i class={classes!("stat-icon", icon.to_string())}></i> }).unwrap_or_default()}
            <div class="stat-value">{props.value.clone()}</div>
            <div class="stat-label">{props.label.clone()}</div>
            {props.progress.map(|p| html! {
                <div class="progress-bar">
                    <div class="progress-fill" style={format!("width: {:.0}%", p.clamp(0.0, 100.0))}></div>
                </div>
            }).unwrap_or_default()}
        </div>
    }
}
