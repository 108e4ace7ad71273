use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::cv::{UploadCvForm, UploadCvFormError, UploadCvFormPayload};
use crate::navigation::Router;
use crate::routes::{finish_mutation, owner_session, redirect, reject_form};
use crate::services::cv::{CV_MISSING, cv_link, upload_cv as upload_cv_service};
use crate::storage::LocalMediaStorage;

const PDF_ONLY: &str = "يرجى اختيار ملف بصيغة PDF فقط";

#[post("/dashboard/cv")]
pub async fn upload_cv(
    identity: Option<Identity>,
    storage: web::Data<LocalMediaStorage>,
    router: web::Data<Router>,
    MultipartForm(form): MultipartForm<UploadCvForm>,
) -> impl Responder {
    let payload: UploadCvFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(UploadCvFormError::MissingFile | UploadCvFormError::NotPdf) => {
            return reject_form(PDF_ONLY, &router);
        }
        Err(e) => return reject_form(e.to_string(), &router),
    };

    let session = owner_session(identity.as_ref());
    let result = upload_cv_service(payload, session.as_ref(), storage.get_ref());
    finish_mutation(result, "تم رفع السيرة الذاتية بنجاح.", &router)
}

/// Redirects to the latest CV.
#[get("/cv")]
pub async fn download_cv(storage: web::Data<LocalMediaStorage>) -> impl Responder {
    match cv_link(storage.get_ref(), chrono::Utc::now().timestamp_millis()) {
        Some(url) => redirect(&url),
        None => {
            FlashMessage::warning(CV_MISSING).send();
            redirect("/")
        }
    }
}
