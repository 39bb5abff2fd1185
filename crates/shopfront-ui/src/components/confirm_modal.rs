//! Confirmation dialog for destructive actions.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_confirm: Callback<()>,
}

#[function_component(ConfirmModal)]
pub(crate) fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.open {
        return Html::default();
    }
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };

    html! {
        <div class="modal-overlay" role="dialog" aria-modal="true">
            <div class="card">
                <h2>{props.title.clone()}</h2>
                <p class="muted">{props.message.clone()}</p>
                <div class="actions">
                    <button class="ghost" onclick={close}>{"Cancel"}</button>
                    <button class="danger" onclick={confirm}>{props.confirm_label.clone()}</button>
                </div>
            </div>
        </div>
    }
}
