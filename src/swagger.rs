use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("luckywheel_session"))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::auto_login,
        handlers::auth::logout,
        handlers::player::get_status,
        handlers::wheel::get_prizes,
        handlers::wheel::spin,
        handlers::wheel::get_records,
        handlers::admin::login,
        handlers::admin::logout,
        handlers::admin::list_prizes,
        handlers::admin::create_prize,
        handlers::admin::update_prize,
        handlers::admin::delete_prize,
        handlers::admin::list_players,
        handlers::admin::update_player,
    ),
    components(
        schemas(
            AdminLoginRequest,
            AutoLoginResponse,
            CreatePrizeRequest,
            PaginationParams,
            PlayerAdminResponse,
            PlayerBrief,
            PlayerListQuery,
            PlayerStatusResponse,
            PrizeListQuery,
            PrizeResponse,
            SpinRecordQuery,
            SpinRecordResponse,
            SpinResponse,
            UpdatePlayerRequest,
            UpdatePrizeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Player session API"),
        (name = "player", description = "Player status API"),
        (name = "wheel", description = "Prize list and spin API"),
        (name = "admin", description = "Admin management API"),
    ),
    info(
        title = "Lucky Wheel Backend API",
        version = "1.0.0",
        description = "Promotional lucky wheel REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
