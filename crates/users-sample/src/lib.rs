//! # Users Sample Library
//!
//! A user registry built on `repository_framework`, exposed for the binary
//! and for integration testing.
//!
//! - **[model]**: [`UserEntity`](model::UserEntity), its props and validation rules.
//! - **[clients]**: [`UserClient`](clients::UserClient), the user repository.
//! - **[usecases]**: [`SignupUseCase`](usecases::SignupUseCase).
//! - **[lifecycle]**: [`UserSystem`](lifecycle::UserSystem) starts and stops the actor.
//! - **[config]**: [`AppConfig`](config::AppConfig) from defaults, TOML and `APP_` env.

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod testing;
pub mod usecases;
