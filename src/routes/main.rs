use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::models::config::{ContactConfig, ServerConfig};
use crate::navigation::Router;
use crate::navigation::meta::SiteMeta;
use crate::repository::DieselRepository;
use crate::routes::{base_context, owner_session, render_template};
use crate::services::main::{PageKind, PageSettings, PageView, show_page};
use crate::storage::LocalMediaStorage;

fn template_for(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Home => "main/index.html",
        PageKind::Category => "main/category.html",
        PageKind::Login => "auth/login.html",
        PageKind::Dashboard => "dashboard/index.html",
        PageKind::NotFound => "main/not_found.html",
    }
}

fn page_context(
    mut context: Context,
    page_view: &PageView,
    router: &Router,
    site: &SiteMeta,
    contact: &ContactConfig,
) -> Context {
    context.insert("tokens", router.tokens());
    context.insert("site", site);
    context.insert("contact", contact);
    context.insert("page", page_view);
    context
}

/// Serves every page of the site. The request path is routed exactly like an
/// address fragment: `/`, `/contact`, `/category/<slug>`, the login token and
/// the dashboard token.
#[get("/{tail:.*}")]
pub async fn page(
    request: HttpRequest,
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalMediaStorage>,
    router: web::Data<Router>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = owner_session(identity.as_ref());
    let settings = PageSettings {
        router: router.get_ref(),
        site: &server_config.site,
        preview_quota: server_config.preview_quota,
    };

    let page = show_page(
        request.path(),
        session.as_ref(),
        &settings,
        repo.get_ref(),
        storage.get_ref(),
    );

    let context = page_context(
        base_context(&flash_messages, page.signed_in),
        &page,
        &router,
        &server_config.site,
        &server_config.contact,
    );
    let template = template_for(page.kind);

    match page.kind {
        PageKind::NotFound => {
            let body = tera.render(template, &context).unwrap_or_else(|e| {
                log::error!("Failed to render template '{template}': {e}");
                String::new()
            });
            HttpResponse::NotFound().body(body)
        }
        _ => render_template(&tera, template, &context),
    }
}
