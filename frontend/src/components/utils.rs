use super::super::Model;
use super::ui::{Alert, AlertDescription};
use gloo_file::File as GlooFile;
use shared::AlertVariant;
use web_sys::FileList;
use yew::prelude::*;

const MAX_NAME_CHARS: usize = 20;

/// First file of a picker/drop/paste payload. Content type checks happen in
/// the detector, which ignores anything that is not an image.
pub fn first_file(file_list: &FileList) -> Option<GlooFile> {
    file_list.item(0).map(GlooFile::from)
}

pub fn truncate_file_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = model.detector.error() {
        html! {
            <Alert variant={AlertVariant::Destructive} class={classes!("error-message")}>
                <i class="fa-solid fa-circle-exclamation"></i>
                <AlertDescription>{ error_msg }</AlertDescription>
            </Alert>
        }
    } else {
        html! {}
    }
}
