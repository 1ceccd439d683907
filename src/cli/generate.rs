use super::GenerateArgs;
use crate::config::Config;
use crate::generator::{Collaborators, Generator};
use crate::llm::create_client;
use crate::model::GeneratorInput;
use crate::places::{create_place_source, create_review_source};
use crate::progress::ProgressRegistry;
use crate::routing::create_router;
use anyhow::Context;
use std::sync::Arc;
use uuid::Uuid;

pub async fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;

    let content = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file {}", args.request.display()))?;
    let mut input: GeneratorInput =
        serde_json::from_str(&content).context("Invalid request file")?;

    let progress = Arc::new(ProgressRegistry::new());
    let mut printer = None;
    if args.progress {
        let job_id = input
            .job_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        input.job_id = Some(job_id.clone());
        let mut rx = progress.subscribe(&job_id);
        printer = Some(tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                eprintln!("[progress] {}", msg);
            }
        }));
    }

    let collaborators = Collaborators {
        llm: create_client(&config),
        places: create_place_source(&config),
        reviews: create_review_source(&config),
    };
    let generator = Generator::new(collaborators, progress.clone(), &config);

    let job_id = input.job_id.clone();
    let result = generator.generate(input).await;

    if let Some(job_id) = job_id {
        progress.unsubscribe(&job_id);
    }
    if let Some(printer) = printer {
        let _ = printer.await;
    }

    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    // Routing is a separate concern downstream of the core: its failure is
    // reported as its own fatal category, after the itinerary was printed
    if args.route {
        let router = create_router(&config);
        let plan = router
            .route(&output.route_request)
            .await
            .context("Route computation failed")?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }

    Ok(())
}
