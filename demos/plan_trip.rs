//! Trip planning example.
//!
//! Logs in, creates a trip with two steps and records a shared spend.
//!
//! Run with: SEPTOTRIP_URL=https://api.septotrip.test cargo run --example plan_trip

use std::sync::Arc;

use rust_decimal::Decimal;
use septotrip::auth::MemoryTokenStore;
use septotrip::models::{LoginCredentials, NewSpend, NewStep, NewTrip};
use septotrip::{ClientConfig, SeptotripClient};

#[tokio::main]
async fn main() -> septotrip::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let email = std::env::var("SEPTOTRIP_EMAIL")
        .expect("SEPTOTRIP_EMAIL environment variable required");
    let password = std::env::var("SEPTOTRIP_PASSWORD")
        .expect("SEPTOTRIP_PASSWORD environment variable required");

    let client = SeptotripClient::initialize(
        ClientConfig::from_env()?,
        Arc::new(MemoryTokenStore::new()),
    )
    .await?;

    let login = client
        .users()
        .login(&LoginCredentials { email, password })
        .await?;
    println!("Logged in as {}", login.email);

    let trip = client
        .trips()
        .create(&NewTrip {
            name: "Iceland ring road".into(),
            description: Some("Ten days around the island".into()),
            start_date: None,
            end_date: None,
            is_public: false,
        })
        .await?;
    println!("Created trip {} ({})", trip.name, trip.id);

    for (name, latitude, longitude) in [("Reykjavik", 64.1466, -21.9426), ("Akureyri", 65.6835, -18.0878)] {
        let step = client
            .steps()
            .add(
                trip.id,
                &NewStep {
                    name: name.into(),
                    description: None,
                    latitude,
                    longitude,
                    start_date: None,
                    end_date: None,
                },
            )
            .await?;
        println!("  step {}: {}", step.order, step.name);
    }

    let spend = client
        .spends()
        .create(&NewSpend {
            trip_id: trip.id,
            title: "Car rental".into(),
            amount: Decimal::new(64900, 2),
            date: None,
            beneficiaries: vec![trip.author_id],
        })
        .await?;
    println!("Recorded spend {}: {}", spend.title, spend.amount);

    println!("\nDone!");
    Ok(())
}
