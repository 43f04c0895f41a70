use futures::future::{select, Either};
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::api::{interpret_response, UPLOAD_FIELD};
use shared::{DetectionFailure, DetectionResult};
use web_sys::FormData;

/// Uploads `file` to the detection service, optionally racing a timeout.
pub async fn detect_time(
    url: &str,
    file: &GlooFile,
    timeout_ms: Option<u32>,
) -> Result<DetectionResult, DetectionFailure> {
    match timeout_ms {
        Some(ms) => {
            let request = Box::pin(post_image(url, file));
            let timer = Box::pin(TimeoutFuture::new(ms));
            match select(request, timer).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(_) => Err(DetectionFailure::TimedOut(ms)),
            }
        }
        None => post_image(url, file).await,
    }
}

async fn post_image(url: &str, file: &GlooFile) -> Result<DetectionResult, DetectionFailure> {
    let form_data = FormData::new()
        .map_err(|e| DetectionFailure::Transport(format!("Failed to build form data: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, file.as_ref(), &file.name())
        .map_err(|e| DetectionFailure::Transport(format!("Failed to attach image: {:?}", e)))?;

    let request = Request::post(url)
        .body(form_data)
        .map_err(|e| DetectionFailure::Transport(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| DetectionFailure::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DetectionFailure::MalformedResponse(e.to_string()))?;

    interpret_response(status, &body)
}
