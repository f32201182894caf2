use clap::Parser;
use serp_check::preview::PreviewSnapshot;
use serp_check::{AnalysisOutcome, Serp};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    // Assemble the session builder from file config and flag overrides
    let mut builder = Serp::new();
    if let Some(path) = &args.config {
        builder = match builder.with_config_file(path) {
            Ok(builder) => builder,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return;
            }
        };
    }
    if let Some(api_url) = &args.api_url {
        builder = builder.with_api_url(api_url);
    }
    builder = builder.with_fresh_identity(args.reset_identity);

    let (mut session, mut previews) = match builder.start() {
        Ok(started) => started,
        Err(e) => {
            ::log::error!("Failed to start session: {}", e);
            return;
        }
    };

    // One-shot modes that skip the snippet workflow
    if args.check {
        match session.health().await {
            Ok(()) => println!("Server is healthy."),
            Err(e) => ::log::error!("Health check failed: {}", e),
        }
        return;
    }

    if let Some(raw_key) = &args.set_key {
        match session.set_api_key(raw_key).await {
            Ok(()) => println!("API key provisioned."),
            Err(e) => ::log::error!("Key provisioning failed: {}", e),
        }
        return;
    }

    // Apply the requested fields; each edit republishes the preview
    session.set_url(&args.url);
    session.set_keyword(&args.keyword);
    session.set_brand(&args.brand);
    if let Some(title) = &args.title {
        session.set_title(title);
    }
    if let Some(description) = &args.description {
        session.set_description(description);
    }

    if !args.no_extract {
        if let Err(e) = session.extract_metadata().await {
            ::log::error!("Extraction failed: {}", e);
            if let Some(message) = session.last_error() {
                println!("{}", message);
            }
            return;
        }
        // Manual fields win over extracted ones
        if let Some(title) = &args.title {
            session.set_title(title);
        }
        if let Some(description) = &args.description {
            session.set_description(description);
        }
    }

    // Show the most recent preview snapshot
    let mut latest = None;
    while let Ok(snapshot) = previews.try_recv() {
        latest = Some(snapshot);
    }
    if let Some(snapshot) = latest {
        print_preview(&snapshot);
    }

    if args.analyze {
        if !session.can_analyze() {
            ::log::error!("Cannot analyze: title and description are both required");
            return;
        }

        match session.analyze().await {
            AnalysisOutcome::Success { analysis } => {
                println!("\nResults\n-------");
                println!("{}", analysis);
            }
            AnalysisOutcome::Failure { kind, message } => {
                ::log::error!("Analysis failed ({:?}): {}", kind, message);
                println!("{}", message);
            }
        }
    }
}

/// Print a snapshot the way a search result lays it out
fn print_preview(snapshot: &PreviewSnapshot) {
    println!("Preview");
    println!("-------");
    println!("{}", snapshot.title);
    println!("{}", snapshot.display_url);
    println!("{}", snapshot.description);
}
