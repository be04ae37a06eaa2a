use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use lol_html::{HtmlRewriter, Settings, element};
use maud::Markup;
use tokio::fs;
use tokio_util::bytes::Bytes;

use crate::errors::AppError;

/// Loads the page shell and injects the rendered partial into the #content
/// placeholder. The HTMX attributes that trigger the initial load are removed
/// so the client does not overwrite server-rendered content.
async fn serve_full_page(content_markup: Markup) -> Result<Response, AppError> {
    let shell_content = match fs::read("static/index.html").await {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            tracing::error!("Cannot read page shell static/index.html: {}", e);
            return Err(AppError::Unexpected(
                "Failed to load the page shell".to_string(),
            ));
        }
    };

    let content_string = content_markup.into_string();
    let mut response_body = Vec::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("#content", |el| {
                el.set_inner_content(&content_string, lol_html::html_content::ContentType::Html);
                el.remove_attribute("hx-trigger");
                el.remove_attribute("hx-get");
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| response_body.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(&shell_content) {
        return Err(AppError::Unexpected(format!(
            "Failed to render the page shell: {}",
            e
        )));
    }
    if let Err(e) = rewriter.end() {
        return Err(AppError::Unexpected(format!(
            "Failed to render the page shell: {}",
            e
        )));
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(response_body))
        .unwrap())
}

/// Returns a bare partial for HTMX requests and a full page for direct
/// navigation (F5, bookmarks).
pub async fn build_response(
    headers: HeaderMap,
    page_content: Markup,
) -> Result<Response, AppError> {
    if headers.contains_key("HX-Request") {
        Ok(page_content.into_response())
    } else {
        serve_full_page(page_content).await
    }
}
