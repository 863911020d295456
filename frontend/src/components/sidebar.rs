use yew::prelude::*;
use shared::{Role, Section};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub role: Role,
    pub active: Section,
    pub on_select: Callback<Section>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <nav class="sidebar">
            <ul>
                {for props.role.sections().iter().map(|section| {
                    let section = *section;
                    let class = if section == props.active { "sidebar-item active" } else { "sidebar-item" };
                    let onclick = {
                        let on_select = props.on_select.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(section))
                    };
                    html! {
                        <li class={class} {onclick}>{section.label()}</li>
                    }
                })}
            </ul>
        </nav>
    }
}
