//! Top navigation bar, rendered only for authenticated sessions.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::auth::api::end_session;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(Header)]
pub(crate) fn header() -> Html {
    let authenticated = use_selector(|store: &AppStore| store.session.authenticated());
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    if !*authenticated {
        return Html::default();
    }
    let Some(api_ctx) = api_ctx else {
        return Html::default();
    };

    let logout = {
        let dispatch = app_dispatch();
        Callback::from(move |_| {
            end_session(&dispatch, &api_ctx);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <header class="app-header">
            <nav>
                <Link<Route> classes="brand" to={Route::Products}>{"Shopfront"}</Link<Route>>
                <button class="danger" onclick={logout}>{"Logout"}</button>
            </nav>
        </header>
    }
}
