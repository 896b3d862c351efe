use pawhub_auth::create_access_token;
use pawhub_core::{AppError, verify_password};
use pawhub_models::{AdminProfile, LoginRequest, LoginResponse};
use tracing::{info, instrument, warn};

use crate::metrics::track_admin_login;
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

pub struct AuthService;

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password".to_string())
}

impl AuthService {
    /// Verify credentials, issue an access token, and preload the
    /// administrator's expanded permissions so the first guarded request is a
    /// cache hit.
    #[instrument(skip(state, dto), fields(username = %dto.username))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let admin = match state.directory.find_by_username(&dto.username).await? {
            Some(admin) if admin.is_active => admin,
            Some(_) => {
                warn!("Login attempt for inactive administrator");
                track_admin_login(false);
                return Err(invalid_credentials());
            }
            None => {
                track_admin_login(false);
                return Err(invalid_credentials());
            }
        };

        if !verify_password(&dto.password, &admin.password_hash)? {
            track_admin_login(false);
            return Err(invalid_credentials());
        }

        let access_token = create_access_token(admin.id, &admin.username, &state.jwt_config)?;
        let resolved = state.permission_cache.preload(&admin).await;

        info!(admin_id = admin.id, "Administrator logged in");
        track_admin_login(true);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.jwt_config.access_token_expiry,
            admin: AdminProfile::new(&admin, &resolved),
        })
    }

    /// Drop the session's cached permissions.
    ///
    /// Tokens are stateless, so the token itself stays valid until it
    /// expires; the next request with it recomputes from the directory.
    #[instrument(skip(state, session), fields(admin_id = session.admin_id()))]
    pub async fn logout(state: &AppState, session: &AuthAdmin) {
        state.permission_cache.invalidate(session.admin_id()).await;
        info!("Administrator logged out");
    }
}
