use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    html! {
        <div class={classes!("card", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

#[function_component(CardHeader)]
pub fn card_header(props: &CardProps) -> Html {
    html! {
        <div class={classes!("card-header", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

#[function_component(CardTitle)]
pub fn card_title(props: &CardProps) -> Html {
    html! {
        <h3 class={classes!("card-title", props.class.clone())}>
            { for props.children.iter() }
        </h3>
    }
}

#[function_component(CardContent)]
pub fn card_content(props: &CardProps) -> Html {
    html! {
        <div class={classes!("card-content", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}
