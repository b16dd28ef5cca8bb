//! Server-rendered pages: templates, rendering and the HTML error page.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use askama::Template;

use blog_core::DomainError;
use blog_core::domain::Post;
use blog_core::forms::{PostForm, ValidationErrors};

const HTML: &str = "text/html; charset=utf-8";

#[derive(Template)]
#[template(path = "blog/post_list.html")]
pub struct PostListTemplate {
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "blog/post_detail.html")]
pub struct PostDetailTemplate {
    pub post: Post,
}

/// Shared by the create and edit pages.
#[derive(Template)]
#[template(path = "blog/post_edit.html")]
pub struct PostEditTemplate {
    pub action: String,
    pub form: PostForm,
    pub errors: ValidationErrors,
}

impl PostEditTemplate {
    pub fn new_post(form: PostForm, errors: ValidationErrors) -> Self {
        Self {
            action: "/post/new/".to_string(),
            form,
            errors,
        }
    }

    pub fn edit_post(id: i64, form: PostForm, errors: ValidationErrors) -> Self {
        Self {
            action: format!("/post/{id}/edit/"),
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "blog/error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: &'static str,
    pub detail: String,
}

pub fn detail_url(id: i64) -> String {
    format!("/post/{id}/")
}

/// Render `template` as a 200 HTML page.
pub fn render<T: Template>(template: &T) -> PageResult<HttpResponse> {
    let body = template.render().map_err(|e| {
        tracing::error!(error = %e, "Template rendering failed");
        PageError::Internal("Template rendering failed".to_string())
    })?;

    Ok(HttpResponse::Ok().content_type(HTML).body(body))
}

/// Redirect-after-post to the detail page of `id`.
pub fn redirect_to_detail(id: i64) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, detail_url(id)))
        .finish()
}

/// Errors surfaced to browsers as HTML error pages.
#[derive(Debug)]
pub enum PageError {
    NotFound(String),
    Unauthorized,
    BadRequest(String),
    Internal(String),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PageError::Unauthorized => write!(f, "Unauthorized"),
            PageError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::Unauthorized => StatusCode::UNAUTHORIZED,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (title, detail) = match self {
            PageError::NotFound(detail) => ("Not Found", detail.clone()),
            PageError::Unauthorized => (
                "Unauthorized",
                "You need to log in to write posts.".to_string(),
            ),
            PageError::BadRequest(detail) => ("Bad Request", detail.clone()),
            PageError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ("Internal Server Error", "Something went wrong.".to_string())
            }
        };

        let status = self.status_code();
        let page = ErrorTemplate {
            status: status.as_u16(),
            title,
            detail,
        };

        match page.render() {
            Ok(body) => HttpResponse::build(status).content_type(HTML).body(body),
            Err(_) => HttpResponse::build(status).body(title),
        }
    }
}

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                PageError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(errors) => PageError::BadRequest(errors.to_string()),
            DomainError::Unauthorized => PageError::Unauthorized,
            DomainError::Internal(msg) => PageError::Internal(msg),
        }
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn post(title: &str, text: &str) -> Post {
        let now = Utc.with_ymd_and_hms(2018, 9, 11, 8, 30, 0).unwrap();
        let mut post = Post::draft(Uuid::new_v4(), title.to_string(), text.to_string(), now)
            .with_id(3);
        post.publish(now);
        post
    }

    #[test]
    fn test_list_escapes_user_text() {
        let page = PostListTemplate {
            posts: vec![post("<script>alert(1)</script>", "a & b")],
        };

        let html = page.render().unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&#60;script&#62;"));
        assert!(!html.contains("a & b"));
        assert!(html.contains(r#"href="/post/3/""#));
    }

    #[test]
    fn test_detail_shows_publish_date() {
        let page = PostDetailTemplate {
            post: post("Title", "Text"),
        };

        let html = page.render().unwrap();

        assert!(html.contains("September 11, 2018, 08:30"));
        assert!(html.contains(r#"href="/post/3/edit/""#));
    }

    #[test]
    fn test_edit_form_shows_field_errors() {
        let errors = PostForm::new("", "body").validate().unwrap_err();
        let page = PostEditTemplate::new_post(PostForm::new("", "body"), errors);

        let html = page.render().unwrap();

        assert!(html.contains("This field is required."));
        assert!(html.contains(r#"action="/post/new/""#));
        assert!(html.contains(">body</textarea>"));
    }

    #[test]
    fn test_not_found_page_status() {
        let response = PageError::from(DomainError::post_not_found(9)).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
