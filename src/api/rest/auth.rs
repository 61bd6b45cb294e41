use axum::http::HeaderMap;
use tracing::warn;

use crate::error::AppError;
use crate::models::customer::CustomerId;
use crate::models::driver::DriverId;
use crate::service::{AdminHandle, CustomerHandle, DriverHandle};
use crate::state::AppState;

pub const ACCOUNT_ID_HEADER: &str = "x-account-id";
pub const PASSWORD_HEADER: &str = "x-password";
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::AuthenticationFailed)
}

fn account_credentials(headers: &HeaderMap) -> Result<(u32, &str), AppError> {
    let id = header(headers, ACCOUNT_ID_HEADER)?
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::AuthenticationFailed)?;
    let password = header(headers, PASSWORD_HEADER)?;
    Ok((id, password))
}

pub fn customer(state: &AppState, headers: &HeaderMap) -> Result<CustomerHandle, AppError> {
    let (id, password) = account_credentials(headers)?;
    state
        .service
        .authenticate_customer(CustomerId(id), password)
        .inspect_err(|_| warn!(customer_id = id, "customer authentication failed"))
}

pub fn driver(state: &AppState, headers: &HeaderMap) -> Result<DriverHandle, AppError> {
    let (id, password) = account_credentials(headers)?;
    state
        .service
        .authenticate_driver(DriverId(id), password)
        .inspect_err(|_| warn!(driver_id = id, "driver authentication failed"))
}

pub fn admin(state: &AppState, headers: &HeaderMap) -> Result<AdminHandle, AppError> {
    let password = header(headers, ADMIN_PASSWORD_HEADER)?;
    state
        .service
        .authenticate_admin(password)
        .inspect_err(|_| warn!("admin authentication failed"))
}
