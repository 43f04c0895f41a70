use super::super::{Model, Msg};
use super::utils::first_file;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        // Allows picking the same file again after a reset.
        input.set_value("");

        file.map(Msg::ImageSelected)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <div class="upload-section">
            <label
                for="image-upload"
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drop your clock image here"}</p>
                    <p class="file-types">{"or click to browse files, or paste"}</p>
                </div>
                <input
                    type="file"
                    id="image-upload"
                    accept="image/*"
                    style="display: none;"
                    onchange={handle_change}
                />
            </label>
        </div>
    }
}
