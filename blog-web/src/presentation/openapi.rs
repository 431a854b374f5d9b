use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::handlers::auth::CredentialsForm;
use crate::presentation::handlers::blog::PostForm;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register_form,
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login_form,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::blog::index,
        crate::presentation::handlers::blog::create_form,
        crate::presentation::handlers::blog::create,
        crate::presentation::handlers::blog::update_form,
        crate::presentation::handlers::blog::update,
        crate::presentation::handlers::blog::delete
    ),
    components(
        schemas(
            CredentialsForm,
            PostForm
        )
    ),
    tags(
        (name = "auth", description = "Registration and session endpoints"),
        (name = "blog", description = "Post pages and forms")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        openapi.components = Some(components);
    }
}
