//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use crate::upload::{UploadError, DEFAULT_MEDIA_TYPE};
use apiflow_collection::{is_collection_document, CollectionTransformer, UseCaseSummarizer};
use apiflow_llm::{
    ActionGenerator, ActionOutcome, CodeRewriteGenerator, DocumentAnalyzer, LLMError,
    ScriptGenerator, XmlMappingGenerator,
};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// JSON-to-XML mapping endpoint
pub(super) async fn generate_json(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<GenerateJsonRequest>,
) -> Result<Json<DataResponse<String>>, ServerError> {
    info!("Received XML mapping request ({} chars)", payload.prompt.len());

    let generator = XmlMappingGenerator::new(state.client.clone(), state.generator.clone());
    let text = generator
        .generate(payload.system_prompt.as_deref(), &payload.prompt)
        .await?;

    Ok(Json(DataResponse::ok(text)))
}

/// Code completion endpoint
pub(super) async fn rewrite(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<RewriteRequest>,
) -> Result<Json<DataResponse<String>>, ServerError> {
    let language = payload.language.unwrap_or_default();
    info!("Received rewrite request, language='{}'", language);

    let generator = CodeRewriteGenerator::new(state.client.clone(), state.generator.clone());
    let code = generator
        .generate(&payload.code, &payload.instructions, &language)
        .await?;

    Ok(Json(DataResponse::ok(code)))
}

/// Script generation endpoint
pub(super) async fn deluge(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ScriptRequest>,
) -> Result<Json<DataResponse<String>>, ServerError> {
    info!("Received script generation request");

    let generator = ScriptGenerator::new(state.client.clone(), state.generator.clone());
    let script = generator
        .generate(&payload.prompt, payload.language.as_deref())
        .await?;

    Ok(Json(DataResponse::ok(script)))
}

/// Action generation endpoint
pub(super) async fn create_actions(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CreateActionRequest>,
) -> Result<Json<CreateActionResponse>, ServerError> {
    let service_name = payload.service_name.filter(|s| !s.is_empty());
    let user_prompt = payload.user_prompt.filter(|s| !s.is_empty());

    let (Some(service_name), Some(user_prompt)) = (service_name, user_prompt) else {
        return Err(ServerError::InvalidRequest(
            "serviceName and userPrompt are required".to_string(),
        ));
    };

    info!("Received action request for service '{}'", service_name);

    let generator = ActionGenerator::new(state.client.clone(), state.generator.clone());
    let outcome = match generator.generate(&service_name, &user_prompt).await {
        Ok(outcome) => outcome,
        // The validation message is the whole error text
        Err(LLMError::GenerationFailed(msg)) => return Err(ServerError::ProviderError(msg)),
        Err(e) => return Err(e.into()),
    };

    let response = match outcome {
        ActionOutcome::Action(mut action) => {
            if let Some(unique_name) = payload.unique_name {
                action.insert("uniqueName".to_string(), unique_name);
            }
            let display_name = match action.get("display_name") {
                Some(Value::String(name)) => name.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            CreateActionResponse {
                success: true,
                action: Some(action),
                message: format!(
                    "Action '{}' created successfully for service '{}'",
                    display_name, service_name
                ),
            }
        }
        ActionOutcome::Information(text) => CreateActionResponse {
            success: true,
            action: None,
            message: text,
        },
    };

    Ok(Json(response))
}

/// File part of an upload form
struct UploadedFile {
    data: Vec<u8>,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// Fields of an upload form
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    prompt: Option<String>,
    media_type: Option<String>,
}

fn multipart_error(err: MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::FileTooLarge
    } else {
        UploadError::Malformed(err.body_text()).into()
    }
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, ServerError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .filter(|t| !t.is_empty())
                    .map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!("Received file part, {} bytes", data.len());
                form.file = Some(UploadedFile {
                    data: data.to_vec(),
                    content_type,
                    file_name,
                });
            }
            "prompt" => form.prompt = Some(field.text().await.map_err(multipart_error)?),
            "mediaType" => {
                form.media_type = Some(field.text().await.map_err(multipart_error)?)
                    .filter(|t| !t.is_empty())
            }
            other => debug!("Ignoring form field '{}'", other),
        }
    }

    Ok(form)
}

/// Upload endpoint: collections are transformed, other files analyzed
pub(super) async fn generate_app(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let form = read_upload_form(&mut multipart).await?;
    let file = form.file.ok_or(UploadError::NoFile)?;

    let media_type = file
        .content_type
        .or(form.media_type)
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());

    let staged = state.upload.stage(&file.data, &media_type)?;
    info!(
        file = file.file_name.as_deref().unwrap_or("<unnamed>"),
        media_type = %staged.media_type(),
        size = staged.size(),
        "Received upload"
    );

    let content = staged.read().await?;
    staged.discard();

    let document = serde_json::from_slice::<Value>(&content)
        .ok()
        .filter(is_collection_document);

    match document {
        Some(document) => {
            let transformer =
                CollectionTransformer::new(state.client.clone(), state.transformer.clone());
            let definition = transformer.transform_document(document).await?;

            let summarizer =
                UseCaseSummarizer::new(state.client.clone(), state.transformer.generator.clone());
            let message = summarizer.summarize(&definition).await;

            Ok(Json(GenerateAppResponse {
                success: true,
                service_name: definition.service.display_name.clone(),
                data: definition,
                message,
            })
            .into_response())
        }
        None => {
            let analyzer = DocumentAnalyzer::new(state.client.clone(), state.generator.clone());
            let text = analyzer
                .analyze(form.prompt.as_deref(), content, &media_type)
                .await?;

            Ok(Json(DataResponse::ok(text)).into_response())
        }
    }
}
