use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::api::{
    ApiV1PreviewQueryParams, api_v1_categories as api_v1_categories_service,
    api_v1_category as api_v1_category_service, api_v1_preview as api_v1_preview_service,
};

#[get("/v1/categories")]
pub async fn api_v1_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match api_v1_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => {
            log::error!("Failed to serve categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/categories/{slug}")]
pub async fn api_v1_category(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_v1_category_service(&slug, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to serve category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/preview")]
pub async fn api_v1_preview(
    params: web::Query<ApiV1PreviewQueryParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match api_v1_preview_service(params.into_inner(), server_config.preview_quota, repo.get_ref()) {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(err) => {
            log::error!("Failed to serve preview: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
