use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{Responder, post, web};

use crate::forms::categories::{
    AddCategoryForm, AddCategoryFormPayload, UpdateCategoryForm, UpdateCategoryFormPayload,
};
use crate::navigation::Router;
use crate::repository::DieselRepository;
use crate::routes::{finish_mutation, owner_session, reject_form};
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    update_category as update_category_service,
};
use crate::storage::LocalMediaStorage;

#[post("/dashboard/categories")]
pub async fn add_category(
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalMediaStorage>,
    router: web::Data<Router>,
    MultipartForm(form): MultipartForm<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = add_category_service(payload, session.as_ref(), repo.get_ref(), storage.get_ref());
    finish_mutation(result, "تمت إضافة القسم بنجاح.", &router)
}

#[post("/dashboard/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalMediaStorage>,
    router: web::Data<Router>,
    MultipartForm(form): MultipartForm<UpdateCategoryForm>,
) -> impl Responder {
    let payload: UpdateCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = update_category_service(
        category_id.into_inner(),
        payload,
        session.as_ref(),
        repo.get_ref(),
        storage.get_ref(),
    );
    finish_mutation(result, "تم تحديث القسم.", &router)
}

#[post("/dashboard/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    router: web::Data<Router>,
) -> impl Responder {
    let session = owner_session(identity.as_ref());
    let result = delete_category_service(category_id.into_inner(), session.as_ref(), repo.get_ref());
    finish_mutation(result, "تم حذف القسم.", &router)
}
