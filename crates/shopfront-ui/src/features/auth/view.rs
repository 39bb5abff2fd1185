//! Login page.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::app_dispatch;
use crate::features::auth::api::{establish_session, login};
use crate::features::auth::logic::validate_email;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let email = use_state(String::new);
    let error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let Some(api_ctx) = api_ctx else {
        return Html::default();
    };

    let on_input = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                email.set(input.value());
            }
        })
    };

    let submit = {
        let email = email.clone();
        let error = error.clone();
        let busy = busy.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            let value = (*email).trim().to_string();
            if let Err(message) = validate_email(&value) {
                error.set(Some(message));
                return;
            }
            error.set(None);
            busy.set(true);
            let api_ctx = api_ctx.clone();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();
            let dispatch = app_dispatch();
            yew::platform::spawn_local(async move {
                match login(&api_ctx, &value).await {
                    Ok(token) => {
                        establish_session(&dispatch, &api_ctx, token);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Products);
                        }
                    }
                    Err(err) => {
                        error.set(Some(format!("Login failed: {err}")));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="card">
                <header>
                    <h2 class="muted">{"Shopfront"}</h2>
                    <h1>{"Login"}</h1>
                </header>
                <p class="muted">{"Welcome back! Please enter your email to continue."}</p>
                <label class="stack">
                    <span>{"Email Address"}</span>
                    <input
                        type="email"
                        placeholder="you@example.com"
                        value={(*email).clone()}
                        oninput={on_input}
                        disabled={*busy}
                    />
                </label>
                {if let Some(message) = &*error {
                    html! { <p class="error-text">{message}</p> }
                } else { html! {} }}
                <div class="actions">
                    <button class="solid" onclick={submit} disabled={*busy}>
                        {if *busy { "Logging in..." } else { "Login" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
