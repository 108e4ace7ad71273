use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthChange;
use crate::forms::auth::{LoginForm, LoginFormPayload};
use crate::models::config::ServerConfig;
use crate::navigation::Router;
use crate::navigation::events::AuthEvents;
use crate::routes::{dashboard_url, login_url, redirect};
use crate::services::ServiceError;
use crate::services::auth::sign_in;

#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    router: web::Data<Router>,
    server_config: web::Data<ServerConfig>,
    auth_events: web::Data<AuthEvents>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&login_url(&router));
        }
    };

    let session = match sign_in(payload, &server_config.owner) {
        Ok(session) => session,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect(&login_url(&router));
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("تعذر تسجيل الدخول حالياً.").send();
            return redirect(&login_url(&router));
        }
    };

    if let Err(e) = Identity::login(&request.extensions(), session.email.clone()) {
        log::error!("Failed to attach identity: {e}");
        FlashMessage::error("تعذر تسجيل الدخول حالياً.").send();
        return redirect(&login_url(&router));
    }

    auth_events.emit(&AuthChange::SignedIn(session));
    redirect(&dashboard_url(&router))
}

#[post("/auth/logout")]
pub async fn logout(
    identity: Option<Identity>,
    auth_events: web::Data<AuthEvents>,
) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
        auth_events.emit(&AuthChange::SignedOut);
    }
    redirect("/")
}
