//! Post handlers.

use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{Either, HttpResponse, web};
use chrono::NaiveDate;
use futures::StreamExt;
use validator::Validate;

use quill_core::domain::PostContent;
use quill_core::ports::ImageStore;
use quill_shared::dto::PostRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound for a single uploaded image.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Form fields that may carry an uploaded file instead of a URL.
const IMAGE_FIELDS: [&str; 2] = ["image1", "image2"];

fn into_content(req: PostRequest) -> (PostContent, Option<NaiveDate>) {
    let content = PostContent {
        category: req.category,
        title: req.title,
        image1: req.image1,
        intro_content: req.intro_content,
        content1: req.content1,
        quote: req.quote,
        quote_author: req.quote_author,
        main_content: req.main_content,
        image2: req.image2,
        final_content: req.final_content,
    };
    (content, req.created_at)
}

/// Read a multipart post form, storing `image1`/`image2` file parts.
///
/// Empty file parts are skipped; empty text fields count as absent.
async fn read_post_form(mut form: Multipart, images: &dyn ImageStore) -> AppResult<PostRequest> {
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = form.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(e.to_string()))?;
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
            if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest(format!(
                    "{name} exceeds the upload size limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match file_name {
            Some(file_name) if IMAGE_FIELDS.contains(&name.as_str()) => {
                if bytes.is_empty() {
                    continue;
                }
                let url = images.save(&file_name, &bytes).await?;
                fields.insert(name, url);
            }
            _ => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| AppError::BadRequest(format!("{name} is not valid UTF-8")))?;
                fields.insert(name, text);
            }
        }
    }

    let mut take = |key: &str| fields.remove(key).filter(|v| !v.trim().is_empty());

    Ok(PostRequest {
        category: take("category").unwrap_or_default(),
        title: take("title").unwrap_or_default(),
        image1: take("image1"),
        intro_content: take("intro_content"),
        content1: take("content1"),
        quote: take("quote"),
        quote_author: take("quote_author"),
        main_content: take("main_content"),
        image2: take("image2"),
        final_content: take("final_content"),
        created_at: None,
    })
}

/// GET /posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.list_posts().await?))
}

/// GET /posts/recent
pub async fn recent_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.recent_posts().await?))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.get_post(path.into_inner()).await?))
}

/// POST /posts/ - JSON body or multipart form with optional image files.
pub async fn create_post(
    state: web::Data<AppState>,
    body: Either<web::Json<PostRequest>, Multipart>,
) -> AppResult<HttpResponse> {
    let req = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => read_post_form(form, state.images.as_ref()).await?,
    };
    req.validate()?;

    // Creation always stamps today's date.
    let (content, _) = into_content(req);
    let post = state.blog.create_post(content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /posts/{id} - full replace.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let (content, created_at) = into_content(req);
    let post = state
        .blog
        .update_post(path.into_inner(), content, created_at)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id} - returns the deleted post.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.delete_post(path.into_inner()).await?))
}
