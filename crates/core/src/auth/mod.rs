mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{email_to_name, generate_session_id, generate_state};
pub use traits::{OidcProviderClient, Result, SessionRepository};
pub use types::{AuthFlowState, OidcClaims, OidcProvider, Session, SessionId};
pub use validation::validate_return_to;
