//! # System Lifecycle
//!
//! [`UserSystem`] starts the user repository actor and wires the use cases
//! to its client.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` once the
//!    queued requests are drained
//! 3. **Await completion** - [`UserSystem::shutdown`] waits for the actor task
//!
//! Clones of [`UserClient`] handed out elsewhere keep the actor alive, so
//! drop them before calling `shutdown`.

use crate::clients::UserClient;
use crate::config::AppConfig;
use crate::model::UserEntity;
use crate::usecases::SignupUseCase;
use repository_framework::RepositoryActor;
use tokio::task::JoinHandle;
use tracing::info;

/// The running user repository and the use cases built on it.
pub struct UserSystem {
    pub user_client: UserClient,
    pub signup: SignupUseCase,
    handle: JoinHandle<()>,
}

impl UserSystem {
    /// Spawns the repository actor. Must be called inside a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (actor, client) = RepositoryActor::<UserEntity>::new(config.repository_buffer);
        let handle = tokio::spawn(actor.run());
        let user_client = UserClient::new(client);

        info!(environment = %config.environment, "User system started");
        Self {
            signup: SignupUseCase::new(user_client.clone()),
            user_client,
            handle,
        }
    }

    /// Drops the clients and waits for the actor to finish.
    pub async fn shutdown(self) {
        info!("Shutting down user system");
        drop(self.signup);
        drop(self.user_client);
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "User repository task failed");
        }
    }
}
