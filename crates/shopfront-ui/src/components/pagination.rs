//! Previous/Next pager for the product list.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub page: u32,
    pub can_prev: bool,
    pub can_next: bool,
    #[prop_or_default]
    pub on_prev: Callback<()>,
    #[prop_or_default]
    pub on_next: Callback<()>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let go_prev = {
        let on_prev = props.on_prev.clone();
        Callback::from(move |_| on_prev.emit(()))
    };
    let go_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_| on_next.emit(()))
    };

    html! {
        <div class="pagination">
            <button disabled={!props.can_prev} onclick={go_prev}>{"Previous"}</button>
            <span class="muted">{format!("Page {}", props.page)}</span>
            <button disabled={!props.can_next} onclick={go_next}>{"Next"}</button>
        </div>
    }
}
