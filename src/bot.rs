//! Bot wiring the Matrix client to the command pipeline.
//!
//! Every incoming message is handled in its own task, so a slow alpha.tl
//! request never delays the sync loop or the other commands.
//!
//! ```text
//! Matrix Message → Commander::respond() → alpha.tl API → Reply
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::{
    alphatl::AlphaRequester,
    commands::{Commander, TeamCodeDirectory},
    config::Config,
    matrix::{IncomingMessage, MatrixClient, UserCredentials},
};

/// The running bot.
pub struct Bot {
    /// Matrix client receiving commands and sending replies
    matrix_client: Arc<MatrixClient>,

    /// Command parser and executor.
    ///
    /// Holds no mutable state and is shared by all message tasks.
    commander: Arc<Commander<AlphaRequester>>,
}

impl Bot {
    /// Creates the bot from its configuration.
    ///
    /// `data_path` holds the Matrix session and the SDK store.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the Matrix login fails.
    pub async fn new(config: Config, data_path: &str) -> Result<Self, anyhow::Error> {
        let requester = AlphaRequester::new(&config.alphatl.url, config.alphatl.timeout)?;

        let team_codes = TeamCodeDirectory::new(config.team_codes);
        info!("loaded {} team codes", team_codes.len());

        let commander = Arc::new(Commander::new(
            requester,
            team_codes,
            config.alphatl.tournament_id,
            config.bot.prefix,
        ));

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                    store_passphrase: config.matrix.store_passphrase,
                },
                data_path,
            )
            .await?,
        );

        Ok(Bot {
            matrix_client,
            commander,
        })
    }

    /// Runs the bot until the Matrix sync loop ends.
    pub async fn start(self) {
        let matrix_client = Arc::clone(&self.matrix_client);
        let commander = Arc::clone(&self.commander);

        let on_message = move |message: IncomingMessage| {
            Self::handle_matrix_message(
                message,
                Arc::clone(&matrix_client),
                Arc::clone(&commander),
            );
        };

        self.matrix_client.sync(on_message).await;
    }

    fn handle_matrix_message(
        message: IncomingMessage,
        matrix_client: Arc<MatrixClient>,
        commander: Arc<Commander<AlphaRequester>>,
    ) {
        tokio::spawn(async move {
            // Not a command
            let Some(reply) = commander.respond(&message.body).await else {
                return;
            };

            debug!("replying to {} in {}", message.event_id, message.room_id);
            matrix_client.send_reply(&message, &reply).await;
        });
    }
}
