//! # Users Sample
//!
//! Demonstrates the repository framework end to end:
//! 1. Loading [`AppConfig`] and setting up tracing.
//! 2. Starting the [`UserSystem`].
//! 3. Signing users up, including a rejected duplicate.
//! 4. Searching the registry with a filter, a sort and a page size.

use repository_framework::tracing::setup_tracing_with;
use repository_framework::{SearchParams, SearchProps, SearchableRepository};
use tracing::{error, info, Instrument};
use users_sample::config::AppConfig;
use users_sample::lifecycle::UserSystem;
use users_sample::usecases::SignupInput;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    setup_tracing_with(&config.log_filter);

    info!(port = config.port, environment = %config.environment, "Starting users sample");

    let system = UserSystem::new(&config);

    let people = [
        ("Ada Lovelace", "ada@example.com"),
        ("Grace Hopper", "grace@example.com"),
        ("Alan Turing", "alan@example.com"),
    ];
    for (name, email) in people {
        let input = SignupInput {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct horse battery staple".to_string(),
        };
        let output = system
            .signup
            .execute(input)
            .instrument(tracing::info_span!("user_creation"))
            .await?;
        info!(id = %output.id, name = %output.name, "User created successfully");
    }

    let duplicate = SignupInput {
        name: "Ada Again".to_string(),
        email: "ada@example.com".to_string(),
        password: "another password".to_string(),
    };
    match system.signup.execute(duplicate).await {
        Ok(output) => error!(id = %output.id, "Duplicate email was accepted"),
        Err(e) => info!(error = %e, "Duplicate signup rejected"),
    }

    let params: SearchParams = SearchProps::new()
        .filter("a")
        .sort("name")
        .sort_dir("asc")
        .per_page(2)
        .into();
    let page = system.user_client.search(params).await?;
    info!(
        total = page.total(),
        last_page = page.last_page(),
        "Search finished"
    );
    println!("{}", serde_json::to_string_pretty(&page.to_json(true)?)?);

    system.shutdown().await;
    info!("Application finished");
    Ok(())
}
