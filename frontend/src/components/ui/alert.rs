use shared::AlertVariant;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    #[prop_or_default]
    pub variant: AlertVariant,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    html! {
        <div role="alert" class={classes!("alert", props.variant.class(), props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertDescriptionProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AlertDescription)]
pub fn alert_description(props: &AlertDescriptionProps) -> Html {
    html! {
        <div class={classes!("alert-description", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}
