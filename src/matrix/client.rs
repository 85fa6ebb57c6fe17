//! Matrix client wrapper used by the bot.
//!
//! [`MatrixClient`] hides the SDK behind the three things the bot needs:
//! logging in, receiving messages and replying to them.

use std::path::Path;

use log::{error, info, warn};
use matrix_sdk::{
    Client,
    ruma::{
        EventId, RoomId, UserId,
        events::room::message::{
            AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent,
        },
    },
};

use crate::matrix::{
    IncomingMessage, UserCredentials, login::login, session::SessionStore, sync::MatrixSync,
};

/// Authenticated Matrix client.
pub struct MatrixClient {
    matrix_sync: MatrixSync,
    client: Client,
}

impl MatrixClient {
    /// Creates a client, restoring the session stored in `data_path` or
    /// logging in with the password.
    ///
    /// # Errors
    ///
    /// Fails if `data_path` cannot be used or the login fails.
    pub async fn new(
        user_credentials: &UserCredentials,
        data_path: impl AsRef<Path>,
    ) -> Result<Self, anyhow::Error> {
        let store = SessionStore::open(data_path).await?;
        let client = login(user_credentials, &store).await?;
        let matrix_sync = MatrixSync::new(&client, &store);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Syncs until the sync loop fails, calling `on_message` for each
    /// incoming text message.
    pub async fn sync<F>(&self, on_message: F)
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(()) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }
    }

    /// Sends `body` as a plain text reply to `message`.
    ///
    /// Failures are logged, the reply is then lost.
    pub async fn send_reply(&self, message: &IncomingMessage, body: &str) {
        let (sender, event) = match (
            UserId::parse(&message.sender_id),
            EventId::parse(&message.event_id),
        ) {
            (Ok(sender), Ok(event)) => (sender, event),
            (Err(e), _) | (_, Err(e)) => {
                error!("cannot reply to {:?}: {}", message, e);
                return;
            }
        };

        let content = RoomMessageEventContent::text_plain(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.send(&message.room_id, content).await;
    }

    async fn send(&self, room_id: &str, content: RoomMessageEventContent) {
        let room_id = match RoomId::parse(room_id) {
            Ok(room_id) => room_id,
            Err(e) => {
                error!("invalid room id {}: {}", room_id, e);
                return;
            }
        };

        let Some(room) = self.client.get_room(&room_id) else {
            warn!("room {} is unknown, reply dropped", room_id);
            return;
        };

        if let Err(e) = room.send(content).await {
            error!("failed to send message to {}: {:?}", room_id, e);
        }
    }
}
