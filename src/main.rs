//! `newrest` binary: in-memory person store behind the calculator and
//! person endpoints.
//!
//! Run with:
//!   NEWREST_LOG=debug cargo run -- --seed-demo
//!
//! Try:
//!   curl http://localhost:3000/calculator/sum/2/3
//!   curl http://localhost:3000/calculator/medium/2/4
//!   curl http://localhost:3000/person/pessoa
//!   curl -X POST http://localhost:3000/person/pessoa/cadastrar \
//!        -H 'content-type: application/json' \
//!        -d '{"firstName":"Ana","lastName":"Souza"}'
//!   curl -X DELETE http://localhost:3000/person/pessoa/deletar/1

use std::sync::Arc;

use clap::Parser;
use newrest::{Config, InMemoryPersonService, Person, Server, routes, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(&config)?;

    let service = if config.seed_demo {
        InMemoryPersonService::with_people(demo_people())
    } else {
        InMemoryPersonService::new()
    };
    info!(people = service.len(), "person store ready");

    let app = routes::app(Arc::new(service));
    Server::bind(config.bind)
        .max_body_bytes(config.max_body_bytes)
        .serve(app)
        .await?;
    Ok(())
}

fn demo_people() -> Vec<Person> {
    vec![
        Person {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            address: "Recife - Pernambuco - Brasil".into(),
            gender: "Female".into(),
        },
        Person {
            id: 2,
            first_name: "Bruno".into(),
            last_name: "Lima".into(),
            address: "Porto Alegre - Rio Grande do Sul - Brasil".into(),
            gender: "Male".into(),
        },
    ]
}
