use super::super::{Model, Msg};
use super::upload_section::render_upload_section;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let (Some(image), Some(url)) = (model.detector.image(), model.detector.preview()) else {
        return render_upload_section(model, ctx);
    };

    let link = ctx.link();

    // Dropping onto the preview replaces the image instead of letting the
    // browser navigate to the file.
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
        <div
            id="preview-container"
            class={classes!(model.is_dragging.then_some("drag-over"))}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
        >
            <img id="clock-preview" src={url.to_string()} alt="Clock preview" />
            <p class="preview-filename">{ image.name() }</p>
        </div>
    }
}
