use shared::ui::clamp_percent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressProps {
    /// Percentage, expected pre-scaled to 0..=100.
    #[prop_or_default]
    pub value: f64,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Progress)]
pub fn progress(props: &ProgressProps) -> Html {
    let value = clamp_percent(props.value);

    html! {
        <div
            class={classes!("progress", props.class.clone())}
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={format!("{:.0}", value)}
        >
            <div
                class="progress-indicator"
                style={format!("transform: translateX(-{}%)", 100.0 - value)}
            ></div>
        </div>
    }
}
