//! Sample pages: list, detail, create, edit, delete.

use crate::error::{error_page, AppError};
use crate::extractors::{IncomingFlash, PageForm};
use crate::flash::{set_cookie, FlashMessage, FlashStore};
use crate::state::AppState;
use crate::views::{self, CreatePage, DetailPage, EditPage, IndexPage, SampleView};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

/// Submitted create/edit form. A missing field is treated like an empty one.
#[derive(Deserialize, Debug)]
pub struct NameForm {
    pub name: Option<String>,
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

fn redirect_with_flash(store: &FlashStore, to: &str, msg: FlashMessage) -> Response {
    let key = store.put(msg);
    ([(header::SET_COOKIE, set_cookie(&key))], Redirect::to(to)).into_response()
}

pub async fn index(
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    tracing::info!("index page requested");
    let samples = state.service.find_all().await?;
    let html = views::render_index(&IndexPage {
        title: "Samples",
        app_name: &state.app_name,
        profile: state.profile.as_str(),
        current_time: views::current_time(),
        samples: samples.iter().map(SampleView::from).collect(),
        flash: flash.message.clone(),
    })?;
    Ok((flash.response_headers(), Html(html)).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(id = %id_str, "detail page requested");
    let id = parse_id(&id_str)?;
    let sample = state
        .service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("sample not found: id={}", id)))?;
    let html = views::render_detail(&DetailPage {
        title: format!("Detail - {}", sample.name),
        sample: SampleView::from(&sample),
    })?;
    Ok(Html(html).into_response())
}

pub async fn create_form(flash: IncomingFlash) -> Result<Response, AppError> {
    tracing::info!("create form requested");
    let html = views::render_create(&CreatePage {
        title: "New sample",
        flash: flash.message.clone(),
    })?;
    Ok((flash.response_headers(), Html(html)).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<NameForm>,
) -> Result<Response, AppError> {
    match state.service.create(form.name.as_deref()).await {
        Ok(sample) => Ok(redirect_with_flash(
            &state.flash,
            "/",
            FlashMessage::success(format!("Created sample: {}", sample.name)),
        )),
        Err(AppError::Validation(msg)) => {
            tracing::warn!(reason = %msg, "create rejected");
            Ok(redirect_with_flash(
                &state.flash,
                "/create",
                FlashMessage::error(format!("Error: {}", msg)),
            ))
        }
        Err(e) => Err(e),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    tracing::info!(id = %id_str, "edit form requested");
    let id = parse_id(&id_str)?;
    let sample = state
        .service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("sample not found: id={}", id)))?;
    let html = views::render_edit(&EditPage {
        title: format!("Edit - {}", sample.name),
        sample: SampleView::from(&sample),
        flash: flash.message.clone(),
    })?;
    Ok((flash.response_headers(), Html(html)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    PageForm(form): PageForm<NameForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    match state.service.update(id, form.name.as_deref()).await {
        Ok(sample) => Ok(redirect_with_flash(
            &state.flash,
            "/",
            FlashMessage::success(format!("Updated sample: {}", sample.name)),
        )),
        Err(AppError::Validation(msg)) => {
            tracing::warn!(id, reason = %msg, "update rejected");
            Ok(redirect_with_flash(
                &state.flash,
                &format!("/edit/{}", id),
                FlashMessage::error(format!("Error: {}", msg)),
            ))
        }
        Err(e) => Err(e),
    }
}

/// Always redirects to the list; the flash message reports the outcome.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Response {
    let outcome = match parse_id(&id_str) {
        Ok(id) => state.service.delete(id).await,
        Err(e) => Err(e),
    };
    let msg = match outcome {
        Ok(()) => FlashMessage::success("Deleted sample"),
        Err(e) => {
            tracing::warn!(id = %id_str, error = %e, "delete failed");
            FlashMessage::error(format!("Error: {}", e.user_message()))
        }
    };
    redirect_with_flash(&state.flash, "/", msg)
}

/// Fallback for unrouted paths.
pub async fn not_found(uri: Uri) -> Response {
    tracing::warn!(uri = %uri, "no route");
    error_page(
        StatusCode::NOT_FOUND,
        "Page not found",
        "The page you are looking for does not exist.",
    )
}
