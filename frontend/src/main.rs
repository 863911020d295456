use yew::prelude::*;
use shared::{Role, Section, Session};

mod components;
mod hooks;
mod pages;
mod services;

use components::header::Header;
use components::sidebar::Sidebar;
use components::toast::ToastHost;
use hooks::use_notifications::use_notifications;
use hooks::use_toasts::{use_toast_host, Toaster};
use pages::branches::BranchesPage;
use pages::centres::CentresPage;
use pages::fundraisers::FundraisersPage;
use pages::inventory::InventoryPage;
use pages::notifications::NotificationsPage;
use pages::overview::OverviewPage;
use pages::reports::ReportsPage;
use pages::staff::StaffPage;
use services::session::SessionStore;
use services::{ApiClient, ConsoleConfig, Logger};

/// Section to show for a role, falling back to the overview when the
/// requested one is outside its scope
fn visible_section(role: Role, requested: Section) -> Section {
    if role.can_open(requested) {
        requested
    } else {
        Section::Overview
    }
}

/// Branch a session's data requests are narrowed to; only supervisors are pinned
fn branch_scope(session: &Session) -> Option<String> {
    match session.role {
        Role::Supervisor => session.branch_id.clone(),
        _ => None,
    }
}

#[derive(Properties, PartialEq)]
struct ConsoleProps {
    session: Session,
    api_client: ApiClient,
    config: ConsoleConfig,
    on_sign_out: Callback<()>,
}

#[function_component(Console)]
fn console(props: &ConsoleProps) -> Html {
    let role = props.session.role;
    let requested = use_state(|| Section::Overview);
    let scope = branch_scope(&props.session);
    let notifications = use_notifications(
        &props.api_client,
        role.can_view_notifications(),
        scope.clone(),
        props.config.page_size,
        props.config.refresh_interval_ms,
    );

    let active = visible_section(role, *requested);

    let on_select = {
        let requested = requested.clone();
        Callback::from(move |section: Section| requested.set(section))
    };

    let on_open_notifications = {
        let requested = requested.clone();
        Callback::from(move |_: ()| requested.set(Section::Notifications))
    };

    let api_client = props.api_client.clone();
    let page_size = props.config.page_size;

    let content = match active {
        Section::Overview => html! { <OverviewPage {api_client} /> },
        Section::Centres => html! { <CentresPage {api_client} {page_size} /> },
        Section::Staff => html! { <StaffPage {api_client} {page_size} /> },
        Section::Branches => html! { <BranchesPage {api_client} {page_size} /> },
        Section::Inventory => html! { <InventoryPage {api_client} {page_size} branch_id={scope} /> },
        Section::Fundraisers => html! { <FundraisersPage {api_client} {page_size} /> },
        Section::Notifications => html! {
            <NotificationsPage state={notifications.state.clone()} actions={notifications.actions.clone()} />
        },
        Section::Reports => html! { <ReportsPage {api_client} /> },
    };

    html! {
        <>
            <Header
                {role}
                unread_count={notifications.state.unread_count()}
                {on_open_notifications}
                on_sign_out={props.on_sign_out.clone()}
            />
            <div class="layout">
                <Sidebar {role} {active} {on_select} />
                <main class="main">
                    <div class="container">
                        {content}
                    </div>
                </main>
            </div>
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| {
        let config = ConsoleConfig::load();
        Logger::set_level(config.log_level);
        Logger::info_with_component("app", &format!("console starting against {}", config.api_url));
        config
    });
    let api_client = use_memo(config.clone(), |config| ApiClient::from_config(config));
    let session = use_state(SessionStore::load);
    let (toasts, toaster) = use_toast_host();

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            SessionStore::clear();
            Logger::info_with_component("app", "signed out");
            session.set(None);
        })
    };

    html! {
        <ContextProvider<Toaster> context={toaster}>
            {match (*session).clone() {
                Some(session) => html! {
                    <Console
                        {session}
                        api_client={(*api_client).clone()}
                        config={(*config).clone()}
                        {on_sign_out}
                    />
                },
                None => html! {
                    <main class="main signed-out">
                        <div class="container">
                            <h1>{"OIMS Admin Console"}</h1>
                            <p>{"You are not signed in. Sign in through the OIMS portal, then reload this page."}</p>
                        </div>
                    </main>
                },
            }}
            <ToastHost state={toasts} />
        </ContextProvider<Toaster>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_out_of_scope_section_falls_back() {
        assert_eq!(visible_section(Role::Supervisor, Section::Centres), Section::Overview);
        assert_eq!(visible_section(Role::Superuser, Section::Centres), Section::Centres);
        assert_eq!(visible_section(Role::OrphanageAdmin, Section::Reports), Section::Reports);
    }

    #[wasm_bindgen_test]
    fn test_only_supervisors_are_branch_scoped() {
        let session = |role| Session {
            token: "t".into(),
            role,
            branch_id: Some("br-3".into()),
        };
        assert_eq!(branch_scope(&session(Role::Supervisor)).as_deref(), Some("br-3"));
        assert_eq!(branch_scope(&session(Role::OrphanageAdmin)), None);
        assert_eq!(branch_scope(&session(Role::Superuser)), None);
    }
}
