use pawhub_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for administrator access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Administrator ID (subject claim)
    pub sub: String,
    pub username: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The administrator ID carried in `sub`.
    ///
    /// A token whose subject is not an ID is treated like any other invalid
    /// token.
    pub fn admin_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token subject".to_string()))
    }
}
