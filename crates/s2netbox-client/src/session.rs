//! Authenticated session state.

use serde::de::IgnoredAny;
use tracing::debug;

use crate::envelope::{self, Params, Reply};
use crate::error::S2NetboxError;
use crate::transport::Transport;

/// Credentials plus the session token granted by a successful login.
///
/// The token has a single writer: [`Session::login`]. Everything downstream
/// reads it immutably when building an envelope. There is no transition back
/// to the unauthenticated state — the vendor can invalidate a token
/// server-side, but that only ever shows up as a fault on a later command.
#[derive(Debug)]
pub struct Session {
    username: String,
    password: String,
    token: Option<String>,
}

impl Session {
    /// Create an unauthenticated session holding the credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: None,
        }
    }

    /// The granted session token, once logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Perform the login exchange and store the granted session id.
    ///
    /// The `Login` command is the one request issued without a session token.
    /// A fault, or a success reply without a usable session id, is fatal to
    /// the client and is never retried here.
    pub async fn login(&mut self, transport: &dyn Transport) -> Result<(), S2NetboxError> {
        let params = Params {
            username: Some(self.username.clone()),
            password: Some(self.password.clone()),
            ..Params::default()
        };
        let request = envelope::build("Login", None, Some(&params))?;

        debug!(username = %self.username, "logging in to NetBox API");
        let response = transport.send_command(&request).await?;
        let envelope = envelope::unwrap::<IgnoredAny>(&response)?;

        match envelope.reply {
            Reply::Success(_) => {}
            Reply::NotFound => {
                return Err(S2NetboxError::AuthFailed(
                    "login reported NOT FOUND".to_string(),
                ));
            }
            Reply::Fault { code, .. } => {
                return Err(S2NetboxError::AuthFailed(format!(
                    "login rejected with status {code}"
                )));
            }
        }

        match envelope.session_id {
            Some(id) if !id.is_empty() => {
                debug!("login granted a session");
                self.token = Some(id);
                Ok(())
            }
            _ => Err(S2NetboxError::AuthFailed(
                "login response carried no session id".to_string(),
            )),
        }
    }
}
