//! Product pages: list, detail, and the create/edit form.
//!
//! # Design
//! - Pages are controllers: selectors for store reads, `spawn_local` for API
//!   work, store transitions for writes.
//! - Page/category state lives in the URL; only the debounced search term
//!   and transient dialogs are component-local.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::pagination::Pagination;
use crate::components::search_input::SearchInput;
use crate::core::logic::format_price;
use crate::core::store::{AppStore, app_dispatch};
use crate::core::toasts::push_toast;
use crate::features::auth::api::end_session;
use crate::features::categories::api::load_categories;
use crate::features::products::api::{
    create_product, delete_product, load_product_by_slug, load_products, update_product,
};
use crate::features::products::form::{FormErrors, ProductFormState};
use crate::features::products::state::{
    ListParams, ListQuery, ListSource, begin_list_load, bump_epoch, remove_product, select_detail,
    set_categories, set_list_error, set_products, upsert_detail,
};
use crate::models::{FetchStatus, ToastKind};
use gloo::console;
use shopfront_api_models::{Product, ProductPatch};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{use_selector, use_selector_with_deps};

const DELETE_PROMPT: &str =
    "Are you sure you want to delete this product? This action cannot be undone.";
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

#[function_component(ProductsPage)]
pub(crate) fn products_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let search = use_state(String::new);
    let pending_delete = use_state(|| None as Option<String>);
    let dispatch = app_dispatch();

    let products = use_selector(|store: &AppStore| store.catalog.products.clone());
    let list_status = use_selector(|store: &AppStore| store.catalog.list_status.clone());
    let categories = use_selector(|store: &AppStore| store.catalog.categories.clone());
    let epoch = use_selector(|store: &AppStore| store.catalog.epoch);

    let params = location
        .as_ref()
        .and_then(|location| location.query::<ListParams>().ok())
        .unwrap_or_default();
    let query = ListQuery::from_params(&params).with_search((*search).clone());
    let source = query.source();

    // Category options for the filter dropdown.
    {
        let api_ctx = api_ctx.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match load_categories(&api_ctx).await {
                            Ok(categories) => dispatch.reduce_mut(|store| {
                                set_categories(&mut store.catalog, categories);
                            }),
                            Err(err) => {
                                console::error!("failed to load categories", err.to_string());
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    // Active list read; re-runs when the data source or refresh epoch change.
    {
        let api_ctx = api_ctx.clone();
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |(source, _epoch): &(ListSource, u64)| {
                if let Some(api_ctx) = api_ctx {
                    let source = source.clone();
                    dispatch.reduce_mut(|store| begin_list_load(&mut store.catalog));
                    yew::platform::spawn_local(async move {
                        match load_products(&api_ctx, &source).await {
                            Ok(items) => dispatch.reduce_mut(|store| {
                                set_products(&mut store.catalog, items);
                            }),
                            Err(err) if err.is_unauthorized() => {
                                end_session(&dispatch, &api_ctx);
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::Login);
                                }
                            }
                            Err(err) => {
                                console::error!("failed to load products", err.to_string());
                                dispatch.reduce_mut(|store| {
                                    set_list_error(
                                        &mut store.catalog,
                                        "Failed to load products.".to_string(),
                                    );
                                });
                            }
                        }
                    });
                }
                || ()
            },
            (source, *epoch),
        );
    }

    let push_params = {
        let navigator = navigator.clone();
        Callback::from(move |params: ListParams| {
            if let Some(navigator) = &navigator {
                navigator.push_with_query(&Route::Products, &params).ok();
            }
        })
    };
    let on_category = {
        let query = query.clone();
        let push_params = push_params.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let value = select.value();
                let next = query.with_category(if value.is_empty() { None } else { Some(value) });
                push_params.emit(next.to_params());
            }
        })
    };
    let on_prev = {
        let query = query.clone();
        let push_params = push_params.clone();
        Callback::from(move |()| push_params.emit(query.prev_page().to_params()))
    };
    let on_next = {
        let query = query.clone();
        Callback::from(move |()| push_params.emit(query.next_page().to_params()))
    };
    let on_search = {
        let search = search.clone();
        Callback::from(move |term: String| search.set(term))
    };
    let open_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |id: String| pending_delete.set(Some(id)))
    };
    let close_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |()| pending_delete.set(None))
    };
    let confirm_delete = {
        let api_ctx = api_ctx.clone();
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |()| {
            let Some(id) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                match delete_product(&api_ctx, &id).await {
                    Ok(deleted) => dispatch.reduce_mut(|store| {
                        remove_product(&mut store.catalog, &deleted.id);
                        bump_epoch(&mut store.catalog);
                        push_toast(
                            &mut store.toasts,
                            ToastKind::Success,
                            "Product deleted".to_string(),
                        );
                    }),
                    Err(err) if err.is_unauthorized() => {
                        end_session(&dispatch, &api_ctx);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        push_toast(
                            &mut store.toasts,
                            ToastKind::Error,
                            format!("Failed to delete product: {err}"),
                        );
                    }),
                }
            });
        })
    };

    let rows = (*products).clone();
    let searching = query.searching();
    html! {
        <>
            <main class="products-page">
                <div class="page-head">
                    <h1>{"Products"}</h1>
                    <div class="toolbar">
                        <select onchange={on_category}>
                            <option value="" selected={query.category_id.is_none()}>
                                {"All Categories"}
                            </option>
                            {for categories.iter().map(|category| html! {
                                <option
                                    value={category.id.clone()}
                                    selected={query.category_id.as_deref() == Some(category.id.as_str())}
                                >
                                    {category.name.clone()}
                                </option>
                            })}
                        </select>
                        <SearchInput
                            value={(*search).clone()}
                            placeholder="Search by name..."
                            on_search={on_search}
                        />
                        <Link<Route> classes="solid" to={Route::AddProduct}>{"Add Product"}</Link<Route>>
                    </div>
                </div>
                {match &*list_status {
                    FetchStatus::Loading => html! { <p class="muted">{"Loading products..."}</p> },
                    FetchStatus::Failed(message) => html! { <p class="error-text">{message.clone()}</p> },
                    FetchStatus::Idle | FetchStatus::Ready => html! {},
                }}
                {if rows.is_empty() && !list_status.is_loading() {
                    html! { <p class="muted">{"No products found."}</p> }
                } else {
                    html! {
                        <div class="product-grid">
                            {for rows.iter().map(|product| product_card(product, open_delete.clone()))}
                        </div>
                    }
                }}
                {if searching {
                    html! {}
                } else {
                    html! {
                        <Pagination
                            page={query.page}
                            can_prev={query.can_prev()}
                            can_next={query.can_next(rows.len())}
                            on_prev={on_prev}
                            on_next={on_next}
                        />
                    }
                }}
            </main>
            <ConfirmModal
                open={pending_delete.is_some()}
                title="Delete Product"
                message={DELETE_PROMPT}
                on_close={close_delete}
                on_confirm={confirm_delete}
            />
        </>
    }
}

fn product_card(product: &Rc<Product>, on_delete: Callback<String>) -> Html {
    let id = product.id.clone();
    let delete = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        on_delete.emit(id.clone());
    });
    let image = product
        .images
        .first()
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    html! {
        <Link<Route> classes="product-card" to={Route::ProductDetail { slug: product.slug.clone() }}>
            <img src={image} alt={product.name.clone()} />
            <div class="body">
                <h3>{product.name.clone()}</h3>
                <p class="price">{format_price(product.price)}</p>
            </div>
            <button class="danger" aria-label="Delete product" onclick={delete}>{"✕"}</button>
        </Link<Route>>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ProductDetailProps {
    pub slug: String,
}

#[function_component(ProductDetailPage)]
pub(crate) fn product_detail_page(props: &ProductDetailProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let status = use_state(FetchStatus::default);
    let modal_open = use_state(|| false);
    let dispatch = app_dispatch();
    let epoch = use_selector(|store: &AppStore| store.catalog.epoch);
    let detail = use_selector_with_deps(
        |store: &AppStore, slug: &String| select_detail(&store.catalog, slug),
        props.slug.clone(),
    );

    {
        let api_ctx = api_ctx.clone();
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        let status = status.clone();
        use_effect_with_deps(
            move |(slug, _epoch): &(String, u64)| {
                if let Some(api_ctx) = api_ctx {
                    let slug = slug.clone();
                    status.set(FetchStatus::Loading);
                    yew::platform::spawn_local(async move {
                        match load_product_by_slug(&api_ctx, &slug).await {
                            Ok(product) => {
                                dispatch.reduce_mut(|store| {
                                    upsert_detail(&mut store.catalog, product);
                                });
                                status.set(FetchStatus::Ready);
                            }
                            Err(err) if err.is_unauthorized() => {
                                end_session(&dispatch, &api_ctx);
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::Login);
                                }
                            }
                            Err(err) => {
                                console::error!("failed to load product", err.to_string());
                                status.set(FetchStatus::Failed(
                                    "Failed to load product details.".to_string(),
                                ));
                            }
                        }
                    });
                }
                || ()
            },
            (props.slug.clone(), *epoch),
        );
    }

    let Some(product) = (*detail).clone() else {
        return match &*status {
            FetchStatus::Failed(message) => html! {
                <main class="detail-page"><p class="error-text">{message.clone()}</p></main>
            },
            _ => html! {
                <main class="detail-page"><p class="muted">{"Loading product details..."}</p></main>
            },
        };
    };

    let edit = {
        let navigator = navigator.clone();
        let slug = props.slug.clone();
        Callback::from(move |_| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::EditProduct { slug: slug.clone() });
            }
        })
    };
    let open_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_| modal_open.set(true))
    };
    let close_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |()| modal_open.set(false))
    };
    let confirm_delete = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let modal_open = modal_open.clone();
        let id = product.id.clone();
        Callback::from(move |()| {
            modal_open.set(false);
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            let dispatch = app_dispatch();
            let navigator = navigator.clone();
            let id = id.clone();
            yew::platform::spawn_local(async move {
                match delete_product(&api_ctx, &id).await {
                    Ok(deleted) => {
                        dispatch.reduce_mut(|store| {
                            remove_product(&mut store.catalog, &deleted.id);
                            bump_epoch(&mut store.catalog);
                            push_toast(
                                &mut store.toasts,
                                ToastKind::Success,
                                "Product deleted".to_string(),
                            );
                        });
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Products);
                        }
                    }
                    Err(err) if err.is_unauthorized() => {
                        end_session(&dispatch, &api_ctx);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        push_toast(
                            &mut store.toasts,
                            ToastKind::Error,
                            format!("Failed to delete product: {err}"),
                        );
                    }),
                }
            });
        })
    };

    let image = product
        .images
        .first()
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    html! {
        <>
            <main class="detail-page">
                <Link<Route> classes="back-link" to={Route::Products}>{"← Back to Products"}</Link<Route>>
                <div class="detail-grid">
                    <img src={image} alt={product.name.clone()} />
                    <div class="detail-body">
                        <h1>{product.name.clone()}</h1>
                        <p class="muted">{product.category.name.clone()}</p>
                        <p>{product.description.clone()}</p>
                        <p class="price">{format_price(product.price)}</p>
                        <div class="actions">
                            <button class="solid" onclick={edit}>{"Edit"}</button>
                            <button class="danger" onclick={open_modal}>{"Delete"}</button>
                        </div>
                    </div>
                </div>
            </main>
            <ConfirmModal
                open={*modal_open}
                title="Delete Product"
                message={DELETE_PROMPT}
                on_close={close_modal}
                on_confirm={confirm_delete}
            />
        </>
    }
}

#[function_component(AddProductPage)]
pub(crate) fn add_product_page() -> Html {
    html! {
        <main class="form-page">
            <h1>{"Create New Product"}</h1>
            <ProductForm />
        </main>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct EditProductProps {
    pub slug: String,
}

#[function_component(EditProductPage)]
pub(crate) fn edit_product_page(props: &EditProductProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let status = use_state(FetchStatus::default);
    let dispatch = app_dispatch();
    let detail = use_selector_with_deps(
        |store: &AppStore, slug: &String| select_detail(&store.catalog, slug),
        props.slug.clone(),
    );

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let status = status.clone();
        use_effect_with_deps(
            move |slug: &String| {
                if let Some(api_ctx) = api_ctx {
                    let slug = slug.clone();
                    status.set(FetchStatus::Loading);
                    yew::platform::spawn_local(async move {
                        match load_product_by_slug(&api_ctx, &slug).await {
                            Ok(product) => {
                                dispatch.reduce_mut(|store| {
                                    upsert_detail(&mut store.catalog, product);
                                });
                                status.set(FetchStatus::Ready);
                            }
                            Err(err) if err.is_unauthorized() => {
                                end_session(&dispatch, &api_ctx);
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::Login);
                                }
                            }
                            Err(err) => {
                                console::error!("failed to load product", err.to_string());
                                status.set(FetchStatus::Failed(
                                    "Could not load product data.".to_string(),
                                ));
                            }
                        }
                    });
                }
                || ()
            },
            props.slug.clone(),
        );
    }

    match ((*detail).clone(), &*status) {
        (Some(product), _) => html! {
            <main class="form-page">
                <h1>{"Edit Product"}</h1>
                <ProductForm initial={Some((*product).clone())} />
            </main>
        },
        (None, FetchStatus::Failed(message)) => html! {
            <main class="form-page"><p class="error-text">{message.clone()}</p></main>
        },
        (None, _) => html! {
            <main class="form-page"><p class="muted">{"Loading form..."}</p></main>
        },
    }
}

#[derive(Properties, PartialEq)]
struct ProductFormProps {
    #[prop_or_default]
    pub initial: Option<Product>,
}

#[function_component(ProductForm)]
fn product_form(props: &ProductFormProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let dispatch = app_dispatch();
    let form = use_state(|| {
        props
            .initial
            .as_ref()
            .map_or_else(ProductFormState::default, ProductFormState::from_product)
    });
    let errors = use_state(FormErrors::default);
    let submit_error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);
    let image_input = use_state(String::new);
    let categories = use_selector(|store: &AppStore| store.catalog.categories.clone());

    // The record may still be loading when the edit page first renders.
    {
        let form = form.clone();
        use_effect_with_deps(
            move |initial: &Option<Product>| {
                if let Some(product) = initial {
                    form.set(ProductFormState::from_product(product));
                }
                || ()
            },
            props.initial.clone(),
        );
    }
    // Category options; the form is reachable directly via /products/add.
    {
        let api_ctx = api_ctx.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match load_categories(&api_ctx).await {
                            Ok(categories) => dispatch.reduce_mut(|store| {
                                set_categories(&mut store.catalog, categories);
                            }),
                            Err(err) => {
                                console::error!("failed to load categories", err.to_string());
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let text_field = {
        let form = form.clone();
        move |apply: fn(&mut ProductFormState, String)| {
            let form = form.clone();
            Callback::from(move |event: InputEvent| {
                if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                    let mut next = (*form).clone();
                    apply(&mut next, input.value());
                    form.set(next);
                }
            })
        }
    };
    let on_name = text_field(|state, value| state.name = value);
    let on_price = text_field(|state, value| state.price = value);
    let on_description = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                let mut next = (*form).clone();
                next.description = area.value();
                form.set(next);
            }
        })
    };
    let on_category = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let mut next = (*form).clone();
                next.category_id = select.value();
                form.set(next);
            }
        })
    };
    let on_image_input = {
        let image_input = image_input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                image_input.set(input.value());
            }
        })
    };
    let on_add_image = {
        let form = form.clone();
        let image_input = image_input.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            if next.add_image(&image_input) {
                form.set(next);
                image_input.set(String::new());
            }
        })
    };
    let on_remove_image = {
        let form = form.clone();
        Callback::from(move |index: usize| {
            let mut next = (*form).clone();
            next.remove_image(index);
            form.set(next);
        })
    };

    let on_submit = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let dispatch = dispatch.clone();
        let form = form.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();
        let busy = busy.clone();
        let initial = props.initial.clone();
        Callback::from(move |_| {
            match form.submit() {
                Err(field_errors) => errors.set(field_errors),
                Ok(payload) => {
                    errors.set(FormErrors::default());
                    submit_error.set(None);
                    let Some(api_ctx) = api_ctx.clone() else {
                        return;
                    };
                    busy.set(true);
                    let navigator = navigator.clone();
                    let dispatch = dispatch.clone();
                    let submit_error = submit_error.clone();
                    let busy = busy.clone();
                    let initial_id = initial.as_ref().map(|product| product.id.clone());
                    yew::platform::spawn_local(async move {
                        let result = if let Some(id) = initial_id {
                            update_product(&api_ctx, &id, &ProductPatch::from(payload)).await
                        } else {
                            create_product(&api_ctx, &payload).await
                        };
                        match result {
                            Ok(saved) => {
                                dispatch.reduce_mut(|store| {
                                    upsert_detail(&mut store.catalog, saved);
                                    bump_epoch(&mut store.catalog);
                                    push_toast(
                                        &mut store.toasts,
                                        ToastKind::Success,
                                        "Product saved".to_string(),
                                    );
                                });
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::Products);
                                }
                            }
                            Err(err) if err.is_unauthorized() => {
                                end_session(&dispatch, &api_ctx);
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::Login);
                                }
                            }
                            Err(err) => {
                                submit_error.set(Some(format!("Failed to save product: {err}")));
                            }
                        }
                        busy.set(false);
                    });
                }
            }
        })
    };

    let submit_label = if *busy {
        "Saving..."
    } else if props.initial.is_some() {
        "Save Changes"
    } else {
        "Create Product"
    };

    html! {
        <div class="card product-form">
            <label class="stack">
                <span>{"Name"}</span>
                <input type="text" value={form.name.clone()} oninput={on_name} />
                {field_error(&errors.name)}
            </label>
            <label class="stack">
                <span>{"Category"}</span>
                <select onchange={on_category} disabled={categories.is_empty()}>
                    <option value="" selected={form.category_id.is_empty()}>
                        {if categories.is_empty() { "Loading..." } else { "Select a category" }}
                    </option>
                    {for categories.iter().map(|category| html! {
                        <option
                            value={category.id.clone()}
                            selected={form.category_id == category.id}
                        >
                            {category.name.clone()}
                        </option>
                    })}
                </select>
                {field_error(&errors.category)}
            </label>
            <label class="stack">
                <span>{"Description"}</span>
                <textarea rows="4" value={form.description.clone()} oninput={on_description} />
                {field_error(&errors.description)}
            </label>
            <label class="stack">
                <span>{"Price"}</span>
                <input type="number" step="0.01" value={form.price.clone()} oninput={on_price} />
                {field_error(&errors.price)}
            </label>
            <div class="stack">
                <span>{"Image URLs"}</span>
                <div class="image-entry">
                    <input
                        type="url"
                        placeholder="https://example.com/image.png"
                        value={(*image_input).clone()}
                        oninput={on_image_input}
                    />
                    <button class="solid" onclick={on_add_image}>{"Add"}</button>
                </div>
                {field_error(&errors.images)}
                <div class="image-rows">
                    {for form.images.iter().enumerate().map(|(index, image)| {
                        let on_remove = {
                            let on_remove_image = on_remove_image.clone();
                            Callback::from(move |_| on_remove_image.emit(index))
                        };
                        let row_error = errors.image_urls.get(index).cloned().flatten();
                        html! {
                            <div class="image-row">
                                <input readonly={true} value={image.url.clone()} />
                                <button class="danger" onclick={on_remove}>{"Remove"}</button>
                                {field_error(&row_error)}
                            </div>
                        }
                    })}
                </div>
            </div>
            {if let Some(message) = &*submit_error {
                html! { <p class="error-text">{message.clone()}</p> }
            } else { html! {} }}
            <button class="solid submit" onclick={on_submit} disabled={*busy}>
                {submit_label}
            </button>
        </div>
    }
}

fn field_error(error: &Option<String>) -> Html {
    match error {
        Some(message) => html! { <p class="error-text">{message.clone()}</p> },
        None => html! {},
    }
}
