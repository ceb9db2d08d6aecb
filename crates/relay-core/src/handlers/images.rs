// Image generation handler

use axum::{extract::Json, extract::State, http::StatusCode, response::IntoResponse, response::Response};
use tracing::{error, info};

use relay_types::protocol::relay::{ImageFailureResponse, ImageGenerationBody, ImageGenerationResponse};

use crate::server::AppState;

/// `POST /generate-image`. Blocks until the job reaches a terminal outcome.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Json(body): Json<ImageGenerationBody>,
) -> Response {
    let request = body.into_request(&state.image_defaults);

    match state.poller.run(&request).await.into_result() {
        Ok(image_url) => {
            info!("[Images] Generated image: {}", image_url);
            (StatusCode::OK, Json(ImageGenerationResponse { image_url })).into_response()
        },
        Err(e) => {
            error!("[Images] Final error in image generation: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ImageFailureResponse::from(&e))).into_response()
        },
    }
}
