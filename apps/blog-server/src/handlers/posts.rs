//! Blog pages: list, detail, create and edit.

use actix_web::{HttpResponse, web};

use blog_core::DomainError;
use blog_core::forms::{PostForm, ValidationErrors};

use crate::middleware::auth::OptionalIdentity;
use crate::state::AppState;
use crate::views::{
    PageResult, PostDetailTemplate, PostEditTemplate, PostListTemplate, redirect_to_detail, render,
};

/// GET / - published posts, newest first.
pub async fn post_list(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let posts = state.posts.list_published().await?;
    render(&PostListTemplate { posts })
}

/// GET /post/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> PageResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    render(&PostDetailTemplate { post })
}

/// GET /post/new/
pub async fn post_new_form() -> PageResult<HttpResponse> {
    render(&PostEditTemplate::new_post(
        PostForm::default(),
        ValidationErrors::default(),
    ))
}

/// POST /post/new/
pub async fn post_new(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();

    match state.posts.create(identity.principal(), &form).await {
        Ok(post) => Ok(redirect_to_detail(post.id)),
        Err(DomainError::Validation(errors)) => {
            render(&PostEditTemplate::new_post(form, errors))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /post/{id}/edit/
pub async fn post_edit_form(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let form = state.posts.edit_form(id).await?;
    render(&PostEditTemplate::edit_post(
        id,
        form,
        ValidationErrors::default(),
    ))
}

/// POST /post/{id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();

    match state.posts.edit(identity.principal(), id, &form).await {
        Ok(post) => Ok(redirect_to_detail(post.id)),
        Err(DomainError::Validation(errors)) => {
            render(&PostEditTemplate::edit_post(id, form, errors))
        }
        Err(e) => Err(e.into()),
    }
}
