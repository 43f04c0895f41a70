use super::super::{Model, Msg, PickedImage};
use super::utils::first_file;
use crate::api;
use gloo_file::File as GlooFile;
use js_sys::Date;
use shared::{ClockTime, Command, DetectionFailure, DetectionResult, Event, Generation};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// Feeds one event through the detector and runs whatever it asks for.
fn dispatch(model: &mut Model, ctx: &Context<Model>, event: Event<PickedImage>) -> bool {
    let state = std::mem::take(&mut model.detector);
    let (next, command) = state.reduce(event);
    model.detector = next;

    if let Some(Command::Detect { generation, image }) = command {
        send_detection_request(model, ctx, generation, image);
    }

    true
}

pub fn handle_image_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    dispatch(model, ctx, Event::Select(PickedImage(file)))
}

pub fn handle_detect(model: &mut Model, ctx: &Context<Model>) -> bool {
    dispatch(model, ctx, Event::Submit)
}

pub fn handle_detection_finished(
    model: &mut Model,
    ctx: &Context<Model>,
    generation: Generation,
    outcome: Result<DetectionResult, DetectionFailure>,
) -> bool {
    dispatch(model, ctx, Event::Completed { generation, outcome })
}

pub fn handle_reset(model: &mut Model, ctx: &Context<Model>) -> bool {
    dispatch(model, ctx, Event::Reset)
}

pub fn handle_tick(model: &mut Model) -> bool {
    let now = current_wall_clock();
    if now == model.wall_clock {
        return false;
    }
    model.wall_clock = now;
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_file(&file_list))
    {
        ctx.link().send_message(Msg::ImageSelected(file));
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(file_list) = event.clipboard_data().and_then(|data| data.files()) {
        if let Some(file) = first_file(&file_list) {
            event.prevent_default();
            ctx.link().send_message(Msg::ImageSelected(file));
            return true;
        }
    }
    false
}

pub fn current_wall_clock() -> ClockTime {
    let now = Date::new_0();
    ClockTime::new(
        now.get_hours() as u8,
        now.get_minutes() as u8,
        now.get_seconds() as u8,
    )
}

fn send_detection_request(
    model: &Model,
    ctx: &Context<Model>,
    generation: Generation,
    image: PickedImage,
) {
    let link = ctx.link().clone();
    let url = model.config.detect_time_url();
    let timeout_ms = model.config.request_timeout_ms;

    spawn_local(async move {
        log::info!("Sending {} to {} ({})", image.name(), url, generation);
        let outcome = api::detect_time(&url, image.file(), timeout_ms).await;

        match &outcome {
            Ok(result) => log::info!(
                "Detected {} with confidence {:.3} ({})",
                result.time,
                result.confidence,
                generation
            ),
            Err(DetectionFailure::Rejected {
                status,
                technical_details,
                ..
            }) => {
                log::error!("Detection rejected with status {}", status);
                if let Some(details) = technical_details {
                    gloo_console::error!("Error details:", details.clone());
                }
            }
            Err(e) => log::error!("Detection failed: {}", e),
        }

        link.send_message(Msg::DetectionFinished(generation, outcome));
    });
}
