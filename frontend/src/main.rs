mod api;
mod components;
mod config;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results_panel;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Interval;
use shared::{
    ApiConfig, ClockTime, DetectionFailure, DetectionResult, DetectorState, Generation,
    ImageSource,
};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Models
#[derive(Clone)]
struct PickedImage(GlooFile);

impl PickedImage {
    fn file(&self) -> &GlooFile {
        &self.0
    }

    fn name(&self) -> String {
        self.0.name()
    }
}

impl ImageSource for PickedImage {
    type Preview = ObjectUrl;

    fn content_type(&self) -> String {
        self.0.raw_mime_type()
    }

    // Dropping the ObjectUrl revokes it.
    fn create_preview(&self) -> ObjectUrl {
        ObjectUrl::from(self.0.clone())
    }
}

// Yew msg components
enum Msg {
    // Selection
    ImageSelected(GlooFile),
    Reset,

    // Detection
    Detect,
    DetectionFinished(Generation, Result<DetectionResult, DetectionFailure>),

    // UI states
    SetDragging(bool),
    Tick,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
struct Model {
    detector: DetectorState<PickedImage>,
    config: ApiConfig,
    is_dragging: bool,
    wall_clock: ClockTime,
    paste_listener: Option<EventListener>,
    clock_interval: Option<Interval>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            detector: DetectorState::new(),
            config: config::resolve_api_config(),
            is_dragging: false,
            wall_clock: handlers::current_wall_clock(),
            paste_listener: None,
            clock_interval: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        } else {
            log::warn!("No global window; paste support disabled");
        }

        let link = ctx.link().clone();
        model.clock_interval = Some(Interval::new(1000, move || link.send_message(Msg::Tick)));

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Selection
            Msg::ImageSelected(file) => handlers::handle_image_selected(self, ctx, file),
            Msg::Reset => handlers::handle_reset(self, ctx),

            // Detection
            Msg::Detect => handlers::handle_detect(self, ctx),
            Msg::DetectionFinished(generation, outcome) => {
                handlers::handle_detection_finished(self, ctx, generation, outcome)
            }

            // UI states
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::Tick => handlers::handle_tick(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header(self, ctx) }

                <main class="main-content">
                    { render_preview_area(self, ctx) }
                    { render_results_panel(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Analog Clock Time Detector | Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
