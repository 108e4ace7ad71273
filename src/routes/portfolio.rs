use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{Responder, post, web};

use crate::forms::portfolio::{
    AddPortfolioItemForm, AddPortfolioItemFormPayload, UpdatePortfolioItemForm,
    UpdatePortfolioItemFormPayload,
};
use crate::navigation::Router;
use crate::repository::DieselRepository;
use crate::routes::{finish_mutation, owner_session, reject_form};
use crate::services::portfolio::{
    add_item as add_item_service, delete_item as delete_item_service,
    update_item as update_item_service,
};
use crate::storage::LocalMediaStorage;

#[post("/dashboard/items")]
pub async fn add_item(
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalMediaStorage>,
    router: web::Data<Router>,
    MultipartForm(form): MultipartForm<AddPortfolioItemForm>,
) -> impl Responder {
    let payload: AddPortfolioItemFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = add_item_service(payload, session.as_ref(), repo.get_ref(), storage.get_ref());
    finish_mutation(result, "تم نشر العمل بنجاح.", &router)
}

#[post("/dashboard/items/{item_id}/update")]
pub async fn update_item(
    item_id: web::Path<i32>,
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    router: web::Data<Router>,
    web::Form(form): web::Form<UpdatePortfolioItemForm>,
) -> impl Responder {
    let payload: UpdatePortfolioItemFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = update_item_service(item_id.into_inner(), payload, session.as_ref(), repo.get_ref());
    finish_mutation(result, "تم تحديث العمل.", &router)
}

#[post("/dashboard/items/{item_id}/delete")]
pub async fn delete_item(
    item_id: web::Path<i32>,
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    router: web::Data<Router>,
) -> impl Responder {
    let session = owner_session(identity.as_ref());
    let result = delete_item_service(item_id.into_inner(), session.as_ref(), repo.get_ref());
    finish_mutation(result, "تم حذف العمل.", &router)
}
