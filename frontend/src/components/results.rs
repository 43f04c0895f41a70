use super::super::{Model, Msg};
use super::ui::{Button, Card, CardContent, CardHeader, CardTitle, Progress};
use super::utils::{render_error_message, truncate_file_name};
use shared::ButtonSize;
use yew::prelude::*;

pub fn render_results_panel(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <Card class={classes!("results-panel")}>
            <CardHeader>
                <CardTitle>{"Detection"}</CardTitle>
            </CardHeader>
            <CardContent>
                <Button
                    class={classes!("detect-btn")}
                    size={ButtonSize::Lg}
                    disabled={!model.detector.can_submit()}
                    onclick={ctx.link().callback(|_: MouseEvent| Msg::Detect)}
                >
                    { render_detect_button_content(model) }
                </Button>
                { render_error_message(model) }
                { render_detection_result(model) }
            </CardContent>
        </Card>
    }
}

fn render_detect_button_content(model: &Model) -> Html {
    if model.detector.is_loading() {
        return html! { <><i class="fa-solid fa-rotate-right fa-spin"></i>{" Detecting..."}</> };
    }

    match model.detector.image() {
        Some(image) => html! {
            <><i class="fa-solid fa-clock"></i>{ format!(" Detect Time \"{}\"", truncate_file_name(&image.name())) }</>
        },
        None => html! { <><i class="fa-solid fa-clock"></i>{" Detect Time"}</> },
    }
}

fn render_detection_result(model: &Model) -> Html {
    let Some(result) = model.detector.result() else {
        return html! {};
    };
    let confidence = result.confidence_percent();

    html! {
        <div class="detection-result">
            <div class="detected-time">
                <p class="time-value">{ result.time.to_string() }</p>
                <p class="time-label">{"Detected Time"}</p>
            </div>
            <div class="confidence-meter">
                <div class="meter-row">
                    <span class="meter-label">{"Confidence"}</span>
                    <span class="meter-value">{ format!("{:.1}%", confidence) }</span>
                </div>
                <Progress value={confidence} />
            </div>
            {
                if let Some(image) = &result.annotated_image {
                    html! {
                        <img
                            class="detection-image"
                            src={image.clone()}
                            alt="Detection visualization"
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
