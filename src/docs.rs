use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use pawhub_models::{
    AdminPrivilegesResponse, AdminProfile, CatalogEntry, ExpandRequest, ExpandResponse,
    LoginRequest, LoginResponse, MenuItem, MenuSection, MessageResponse, PermissionCheckRequest,
    PermissionCheckResponse, UpdatePrivilegesDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_admin,
        crate::modules::auth::controller::logout_admin,
        crate::modules::auth::controller::get_me,
        crate::modules::permissions::controller::reload_permissions,
        crate::modules::permissions::controller::check_permission,
        crate::modules::permissions::controller::get_menu,
        crate::modules::permissions::controller::get_catalog,
        crate::modules::permissions::controller::expand_privileges,
        crate::modules::admins::controller::get_admin_privileges,
        crate::modules::admins::controller::update_admin_privileges,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            MessageResponse,
            AdminProfile,
            AdminPrivilegesResponse,
            UpdatePrivilegesDto,
            PermissionCheckRequest,
            PermissionCheckResponse,
            ExpandRequest,
            ExpandResponse,
            CatalogEntry,
            MenuSection,
            MenuItem,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Administrator sessions"),
        (name = "Permissions", description = "Permission checks, navigation, and the permission catalog"),
        (name = "Administrators", description = "Administrator privilege management")
    ),
    info(
        title = "PawHub Admin API",
        version = "0.1.0",
        description = "Administration API for the PawHub pet community platform with role-based permissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
