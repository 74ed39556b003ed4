use super::AppState;
use crate::core::extract::pdf_text;
use crate::domain::model::Discover;
use askama::Template;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

#[derive(Template)]
#[template(path = "discover.html")]
struct DiscoverPage {
    discover: Discover,
}

#[derive(Template)]
#[template(path = "extract.html")]
struct ExtractPage {
    filename: String,
    text: String,
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("template error: {}", e),
        )
            .into_response(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn index() -> Response {
    render(IndexPage)
}

#[derive(Debug, Deserialize)]
pub struct DiscoverForm {
    pub topic: String,
}

/// One submit click: cache lookup, on a miss the two collaborator calls plus
/// a persist. Failures abort the whole run and surface as plain text, the
/// original's unhandled-failure behavior.
pub async fn discover(State(state): State<AppState>, Form(form): Form<DiscoverForm>) -> Response {
    match state.compass.discover(&form.topic).await {
        Ok(discover) => render(DiscoverPage { discover }),
        Err(e) => {
            tracing::error!(topic = %form.topic, error = %e, "discover failed");
            (StatusCode::BAD_GATEWAY, format!("discover failed: {}", e)).into_response()
        }
    }
}

pub async fn extract(mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((filename, bytes.to_vec()));
                        break;
                    }
                    Err(e) => {
                        return (StatusCode::BAD_REQUEST, format!("upload failed: {}", e))
                            .into_response()
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("upload failed: {}", e)).into_response()
            }
        }
    }

    let Some((filename, bytes)) = upload else {
        return (StatusCode::BAD_REQUEST, "no file field in upload").into_response();
    };

    match pdf_text(&bytes) {
        Ok(text) => render(ExtractPage { filename, text }),
        Err(e) => {
            tracing::error!(%filename, error = %e, "PDF extraction failed");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("PDF extraction failed: {}", e),
            )
                .into_response()
        }
    }
}
