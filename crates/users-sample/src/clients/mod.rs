//! Domain repositories wrapping [`RepositoryClient`](repository_framework::RepositoryClient).

pub mod user_client;

pub use user_client::*;
