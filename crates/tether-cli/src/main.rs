//! Demo driver: fake runs completing in the background, observed through
//! handles and resolved structurally.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;
use tracing::info;

use tether_core::{
    InMemoryExecutor, InMemoryStatusStore, Key, Record, RunHandle, RunStatus, Value,
    resolve_to_statuses, resolve_to_values,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = InMemoryStatusStore::shared();
    let executor = Arc::new(InMemoryExecutor::new(store.clone()));

    // Three fake runs, finished by the "backend" after short delays.
    let fetch = store.create_run().await;
    let parse = store.create_run().await;
    let score = store.create_run().await;

    let backend = {
        let store = store.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(30)).await;
            store
                .set_status(
                    fetch,
                    RunStatus::Completed {
                        data: Some(json!({"bytes": 2048})),
                    },
                )
                .await?;

            sleep(Duration::from_millis(30)).await;
            store
                .set_status(
                    parse,
                    RunStatus::Completed {
                        data: Some(json!(["intro", "body", "outro"])),
                    },
                )
                .await?;

            sleep(Duration::from_millis(30)).await;
            store
                .set_status(
                    score,
                    RunStatus::Completed {
                        data: Some(json!(0.87)),
                    },
                )
                .await?;
            Ok::<_, tether_core::TetherError>(())
        })
    };

    let fetch = RunHandle::new(fetch, store.clone(), executor.clone());
    let parse = RunHandle::new(parse, store.clone(), executor.clone());
    let score = RunHandle::new(score, store.clone(), executor.clone());

    // A zero timeout on an unfinished run is a normal miss, not an error;
    // the handle stays usable.
    let early = fetch.wait(Some(Duration::ZERO)).await?;
    info!(got = early.is_some(), "peeked before completion");

    // Handles buried in a nested structure, one inside a record.
    let pipeline = Value::map([
        (Key::from("fetch"), fetch.into()),
        (
            Key::from("stages"),
            Value::List(vec![
                "tokenize".into(),
                parse.into(),
                Value::Record(Record::new(
                    "Scored",
                    vec![
                        ("model".into(), "v2".into()),
                        ("value".into(), score.into()),
                    ],
                )),
            ]),
        ),
    ]);

    let statuses = resolve_to_statuses(pipeline.clone()).await?;
    info!("statuses resolved");
    println!("statuses: {statuses:?}");

    let values = resolve_to_values(pipeline).await?;
    println!(
        "values: {}",
        values
            .to_json()
            .map(|j| j.to_string())
            .unwrap_or_else(|| format!("{values:?}"))
    );

    backend.await??;
    Ok(())
}
