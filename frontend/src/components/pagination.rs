use yew::prelude::*;
use shared::PaginationWindow;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub window: PaginationWindow,
    pub on_page: Callback<usize>,
}

/// Prev / numbered / next controls. Buttons that would leave
/// `[1, total_pages]` are disabled rather than hidden.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let window = props.window;
    if window.total_pages() <= 1 {
        return html! {
            <div class="pagination">
                {window.caption().map(|c| html! { <span class="pagination-caption">{c}</span> }).unwrap_or_default()}
            </div>
        };
    }

    let go = |page: usize| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    html! {
        <div class="pagination">
            {window.caption().map(|c| html! { <span class="pagination-caption">{c}</span> }).unwrap_or_default()}
            <button class="page-button" disabled={!window.has_previous()} onclick={go(window.previous().current_page)}>
                {"‹ Prev"}
            </button>
            {for window.page_numbers().into_iter().map(|page| {
                let class = if page == window.current_page { "page-button active" } else { "page-button" };
                html! { <button class={class} onclick={go(page)}>{page}</button> }
            })}
            <button class="page-button" disabled={!window.has_next()} onclick={go(window.next().current_page)}>
                {"Next ›"}
            </button>
        </div>
    }
}
