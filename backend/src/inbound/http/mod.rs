//! HTTP inbound adapter exposing REST endpoints.

pub mod berths;
pub mod error;
pub mod health;
pub mod index;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod vessels;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by every body-accepting route.
///
/// Malformed bodies surface as `invalid_request` envelopes instead of
/// actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register every marina route on an actix service config.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use marina::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index::index)
        .service(vessels::create_vessel)
        .service(vessels::list_vessels)
        .service(vessels::get_vessel)
        .service(vessels::update_vessel)
        .service(vessels::delete_vessel)
        .service(berths::create_berth)
        .service(berths::list_berths)
        .service(berths::get_berth)
        .service(berths::delete_berth)
        .service(berths::assign_vessel)
        .service(berths::release_vessel);
}
