use super::super::{Model, Msg};
use super::ui::Button;
use shared::{ButtonSize, ButtonVariant};
use yew::prelude::*;

/// Renders the application header with the live wall clock
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-clock"></i>{" Analog Clock Time Detector"}</h1>
            <p class="wall-clock">{ model.wall_clock.to_string() }</p>
            <Button
                variant={ButtonVariant::Outline}
                size={ButtonSize::Icon}
                class={classes!("reset-btn")}
                title={AttrValue::from("Reset")}
                onclick={ctx.link().callback(|_: MouseEvent| Msg::Reset)}
            >
                <i class="fa-solid fa-xmark"></i>
            </Button>
        </header>
    }
}
