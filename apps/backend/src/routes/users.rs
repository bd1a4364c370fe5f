use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub const CREATED_MESSAGE: &str = "user created";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Missing fields deserialize as empty strings so they reach validation and
/// come back as `invalid_input`, not as a JSON parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default, alias = "Name")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: String,
    pub message: String,
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = app_state.users.list().await?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let user = app_state.users.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn create_user(
    body: web::Json<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateUserRequest { id, name } = body.into_inner();
    let user = User::new(id, name);
    user.validate()?;
    app_state.users.create(&user).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse {
        id: user.id,
        message: CREATED_MESSAGE.to_string(),
    }))
}

async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::http(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{} {}", req.method(), req.path()),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_user))
            .default_service(web::to(method_not_allowed)),
    );
}
