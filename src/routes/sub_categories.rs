use actix_identity::Identity;
use actix_web::{Responder, post, web};

use crate::forms::sub_categories::{AddSubCategoryForm, AddSubCategoryFormPayload};
use crate::navigation::Router;
use crate::repository::DieselRepository;
use crate::routes::{finish_mutation, owner_session, reject_form};
use crate::services::sub_categories::{
    add_sub_category as add_sub_category_service,
    delete_sub_category as delete_sub_category_service,
};

#[post("/dashboard/sub-categories")]
pub async fn add_sub_category(
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    router: web::Data<Router>,
    web::Form(form): web::Form<AddSubCategoryForm>,
) -> impl Responder {
    let payload: AddSubCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = add_sub_category_service(payload, session.as_ref(), repo.get_ref());
    finish_mutation(result, "تمت إضافة القسم الفرعي.", &router)
}

#[post("/dashboard/sub-categories/{sub_category_id}/delete")]
pub async fn delete_sub_category(
    sub_category_id: web::Path<i32>,
    identity: Option<Identity>,
    repo: web::Data<DieselRepository>,
    router: web::Data<Router>,
) -> impl Responder {
    let session = owner_session(identity.as_ref());
    let result =
        delete_sub_category_service(sub_category_id.into_inner(), session.as_ref(), repo.get_ref());
    finish_mutation(result, "تم حذف القسم الفرعي.", &router)
}
