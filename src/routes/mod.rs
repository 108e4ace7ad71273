use actix_identity::Identity;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::OwnerSession;
use crate::navigation::Router;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod auth;
pub mod categories;
pub mod cv;
pub mod main;
pub mod portfolio;
pub mod sub_categories;

/// Dashboard location every mutation returns to.
pub fn dashboard_url(router: &Router) -> String {
    format!("/{}", router.tokens().dashboard)
}

pub fn login_url(router: &Router) -> String {
    format!("/{}", router.tokens().login)
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(flash_messages: &IncomingFlashMessages, signed_in: bool) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("signed_in", &signed_in);
    context
}

/// Owner session carried by the identity cookie, if any.
pub fn owner_session(identity: Option<&Identity>) -> Option<OwnerSession> {
    let identity = identity?;
    match identity.id() {
        Ok(email) => Some(OwnerSession { email }),
        Err(e) => {
            log::warn!("Ignoring unreadable identity: {e}");
            None
        }
    }
}

/// Flashes the outcome of a dashboard mutation and returns to the dashboard.
/// Gateway failures are shown with their raw message.
pub fn finish_mutation<T>(result: ServiceResult<T>, success: &str, router: &Router) -> HttpResponse {
    match result {
        Ok(_) => FlashMessage::success(success).send(),
        Err(ServiceError::Unauthorized) => return redirect(&login_url(router)),
        Err(ServiceError::NotFound) => FlashMessage::error("العنصر المطلوب غير موجود.").send(),
        Err(ServiceError::Form(message)) | Err(ServiceError::Gateway(message)) => {
            FlashMessage::error(message).send()
        }
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
    }
    redirect(&dashboard_url(router))
}

/// Flashes a rejected form and returns to the dashboard.
pub fn reject_form(message: impl Into<String>, router: &Router) -> HttpResponse {
    FlashMessage::error(message.into()).send();
    redirect(&dashboard_url(router))
}
