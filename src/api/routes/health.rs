use actix_web::{get, HttpResponse, Responder};

use crate::models::ApiResponse;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::<()>::no_data())
}
