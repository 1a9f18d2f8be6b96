//! `POST /api/chat`.
//!
//! Accepts either a JSON body `{ "message": "..." }` or a multipart form with
//! a `message` text field and an optional `file` field.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;
use crate::extraction::UploadedFile;
use crate::prompt;
use crate::upload::{self, StoredUpload, UploadError};

/// JSON request body.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

/// Successful chat response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    /// Text produced by the model.
    pub reply: String,
}

/// A chat turn as submitted by the client.
///
/// When a file is present it has already been written to temporary storage.
#[derive(Debug)]
pub struct ChatSubmission {
    /// Typed message, empty when none was sent.
    pub message: String,
    /// The uploaded file, if the form carried one.
    pub upload: Option<StoredUpload>,
}

impl FromRequest<AppState> for ChatSubmission {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            read_multipart(multipart, state).await
        } else {
            let Json(body) = Json::<ChatRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self {
                message: body.message.unwrap_or_default(),
                upload: None,
            })
        }
    }
}

async fn read_multipart(
    mut multipart: Multipart,
    state: &AppState,
) -> Result<ChatSubmission, ApiError> {
    let mut message = String::new();
    let mut stored: Option<StoredUpload> = None;

    let result: Result<(), ApiError> = async {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(UploadError::from)
            .map_err(|e| ApiError::from_upload(e, state.config.server.is_development()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let has_file = field.file_name().is_some_and(|n| !n.is_empty());

            match name.as_str() {
                "message" => {
                    message = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                }
                "file" if has_file => {
                    if stored.is_some() {
                        return Err(ApiError::BadRequest(
                            "Only one file can be uploaded per message".to_string(),
                        ));
                    }
                    let upload = upload::store_field(field, &state.config.uploads)
                        .await
                        .map_err(|e| {
                            ApiError::from_upload(e, state.config.server.is_development())
                        })?;
                    stored = Some(upload);
                }
                _ => {}
            }
        }
        Ok(())
    }
    .await;

    match result {
        Ok(()) => Ok(ChatSubmission {
            message,
            upload: stored,
        }),
        Err(err) => {
            if let Some(upload) = stored {
                upload.discard().await;
            }
            Err(err)
        }
    }
}

/// Extract the file (if any), ask the model, and clean up the upload.
pub async fn chat_handler(
    State(state): State<AppState>,
    submission: ChatSubmission,
) -> Result<Json<ChatReply>, ApiError> {
    let ChatSubmission { message, upload } = submission;

    tracing::info!(
        name: "chat.request",
        message_length = message.len(),
        filename = upload.as_ref().map(|u| u.file().original_name.as_str()),
        "Received chat request"
    );

    let outcome = respond(&state, &message, upload.as_ref().map(StoredUpload::file)).await;

    // The upload is removed whether or not the model answered.
    if let Some(upload) = upload {
        upload.discard().await;
    }

    outcome.map(|reply| Json(ChatReply { reply }))
}

async fn respond(
    state: &AppState,
    message: &str,
    file: Option<&UploadedFile>,
) -> Result<String, ApiError> {
    let file_info = match file {
        Some(file) => Some(state.extractor.extract(file).await),
        None => None,
    };

    let user_prompt = prompt::user_prompt(message, file_info.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Message or file is required".to_string()))?;

    let reply = state.llm.complete(prompt::conversation(user_prompt)).await?;

    tracing::info!(reply_length = reply.len(), "Chat reply generated");
    Ok(reply)
}
