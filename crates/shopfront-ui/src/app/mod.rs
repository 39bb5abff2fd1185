//! App shell: store hydration, routing, and the root component.

use crate::components::header::Header;
use crate::components::toast::ToastHost;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::auth::view::LoginPage;
use crate::features::products::view::{
    AddProductPage, EditProductPage, ProductDetailPage, ProductsPage,
};
use api::ApiCtx;
use preferences::{api_base_url, load_token};
pub(crate) use routes::Route;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
pub(crate) mod preferences;
mod routes;

#[function_component(ShopfrontApp)]
pub(crate) fn shopfront_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());
    let hydrated = use_state(|| false);
    let token = use_selector(|store: &AppStore| store.session.token.clone());

    // One-time hydration: adopt a persisted token before any page renders,
    // so guarded routes see the settled session.
    {
        let api_ctx = (*api_ctx).clone();
        let hydrated = hydrated.clone();
        use_effect_with_deps(
            move |_| {
                let dispatch = app_dispatch();
                if let Some(token) = load_token() {
                    api_ctx.client.set_token(Some(token.clone()));
                    dispatch.reduce_mut(|store| store.session.set_token(token));
                }
                hydrated.set(true);
                || ()
            },
            (),
        );
    }
    // Keep the client's auth header in step with the session slice.
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |token: &Rc<Option<String>>| {
                api_ctx.client.set_token((**token).clone());
                || ()
            },
            token,
        );
    }

    if !*hydrated {
        return html! { <main class="splash"><p class="muted">{"Loading..."}</p></main> };
    }

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Header />
                <Switch<Route> render={switch} />
                <ToastHost />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomeRedirect /> },
        Route::Login => html! { <LoginPage /> },
        Route::Products => html! { <RequireSession><ProductsPage /></RequireSession> },
        Route::AddProduct => html! { <RequireSession><AddProductPage /></RequireSession> },
        Route::ProductDetail { slug } => {
            html! { <RequireSession><ProductDetailPage {slug} /></RequireSession> }
        }
        Route::EditProduct { slug } => {
            html! { <RequireSession><EditProductPage {slug} /></RequireSession> }
        }
        Route::NotFound => html! {
            <div class="placeholder">
                <h2>{"Not found"}</h2>
                <p class="muted">{"Use navigation to return to a supported view."}</p>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct RequireSessionProps {
    #[prop_or_default]
    pub children: Children,
}

/// Gate: unauthenticated sessions are sent to the login page instead of
/// rendering the wrapped view.
#[function_component(RequireSession)]
fn require_session(props: &RequireSessionProps) -> Html {
    let authenticated = use_selector(|store: &AppStore| store.session.authenticated());
    if *authenticated {
        html! { <>{ for props.children.iter() }</> }
    } else {
        html! { <Redirect<Route> to={Route::Login} /> }
    }
}

#[function_component(HomeRedirect)]
fn home_redirect() -> Html {
    let authenticated = use_selector(|store: &AppStore| store.session.authenticated());
    if *authenticated {
        html! { <Redirect<Route> to={Route::Products} /> }
    } else {
        html! { <Redirect<Route> to={Route::Login} /> }
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ShopfrontApp>::with_root(root).render();
    } else {
        yew::Renderer::<ShopfrontApp>::new().render();
    }
}
