use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::customer::CustomerProfile;
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::identity::AuthenticatedUser;

use super::CustomerServiceData;

/// Also used by the storefront to prefill the shipping form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub detail_address: String,
}

/// GET /user
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "Profile of the caller", body = ProfileDto),
        (status = 401, description = "No authenticated identity"),
        (status = 404, description = "No profile yet"),
    ),
    tag = "user"
)]
pub async fn get_profile(
    service: CustomerServiceData,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = web::block(move || service.profile(&user.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let profile = profile.ok_or(DomainError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(ProfileDto {
        name: profile.name,
        phone: profile.phone,
        address: profile.address,
        detail_address: profile.detail_address,
    }))
}

/// PUT /user
///
/// Creates the customer record for the identity on first call.
#[utoipa::path(
    put,
    path = "/user",
    request_body = ProfileDto,
    responses(
        (status = 200, description = "Profile saved", body = ProfileDto),
        (status = 400, description = "Name missing"),
        (status = 401, description = "No authenticated identity"),
    ),
    tag = "user"
)]
pub async fn save_profile(
    service: CustomerServiceData,
    user: AuthenticatedUser,
    body: web::Json<ProfileDto>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let profile = CustomerProfile {
        name: body.name.clone(),
        phone: body.phone.clone(),
        address: body.address.clone(),
        detail_address: body.detail_address.clone(),
    };

    web::block(move || service.save_profile(&user.email, profile))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(body))
}
