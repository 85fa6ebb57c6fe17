//! Authentication of the Matrix client.
//!
//! The first run logs in with the account password and persists the session.
//! Later runs restore the persisted session and skip the login.

use anyhow::Context;
use log::{debug, info};
use matrix_sdk::{Client, ruma::UserId};

use crate::matrix::{UserCredentials, session::SessionStore};

/// Display name of the device created by the password login.
const DEVICE_DISPLAY_NAME: &str = "alphabot";

/// Builds an authenticated client.
///
/// # Errors
///
/// Fails on an invalid user ID, an unreachable homeserver, a store that
/// cannot be opened with the passphrase or a rejected login.
pub async fn login(
    user_credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    let user_id = UserId::parse(&user_credentials.user_id)
        .with_context(|| format!("invalid user id {}", user_credentials.user_id))?;

    let client = Client::builder()
        .sqlite_store(
            store.sqlite_path(),
            Some(user_credentials.store_passphrase.as_str()),
        )
        .server_name(user_id.server_name())
        .build()
        .await
        .context("failed to build matrix client")?;

    match store.user_session() {
        Some(user_session) => {
            debug!("restoring session of {}", user_session.meta.user_id);
            client
                .restore_session(user_session.clone())
                .await
                .context("failed to restore matrix session")?;
            info!("restored session of {}", user_id);
        }
        None => {
            create_session(&client, user_credentials, store).await?;
            info!("logged in as {}", user_id);
        }
    }

    Ok(client)
}

/// Logs in with the password and persists the new session.
async fn create_session(
    client: &Client,
    user_credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<(), anyhow::Error> {
    let matrix_auth = client.matrix_auth();
    matrix_auth
        .login_username(&user_credentials.user_id, &user_credentials.password)
        .initial_device_display_name(DEVICE_DISPLAY_NAME)
        .send()
        .await
        .context("matrix login failed")?;

    let user_session = matrix_auth
        .session()
        .context("no session after a successful login")?;
    store.save_user_session(&user_session).await?;

    Ok(())
}
