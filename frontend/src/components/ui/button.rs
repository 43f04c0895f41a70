use shared::{ButtonSize, ButtonVariant};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    #[prop_or_default]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub size: ButtonSize,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    // No-op while disabled.
    let onclick = {
        let disabled = props.disabled;
        let onclick = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            if !disabled {
                onclick.emit(e);
            }
        })
    };

    html! {
        <button
            class={classes!(
                "btn",
                props.variant.class(),
                props.size.class(),
                props.disabled.then_some("btn-disabled"),
                props.class.clone()
            )}
            disabled={props.disabled}
            title={props.title.clone()}
            {onclick}
        >
            { for props.children.iter() }
        </button>
    }
}
