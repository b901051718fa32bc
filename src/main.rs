use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Command, PlaceArgs};
use windy_pinwheel::animation::{IntervalFrames, RotationAnimator, RotationState};
use windy_pinwheel::{PinwheelConfig, Query, WindOrchestrator, WindResolver, display, logging, web};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = PinwheelConfig::load_from_path(args.config.clone())?;
    logging::init(&config.logging, args.verbose)?;

    let resolver = Arc::new(
        WindResolver::from_config(&config).context("Failed to set up weather clients")?,
    );

    match args.cmd {
        Command::Wind { place, json } => {
            let query = to_query(&place)?;
            let result = resolver.resolve_wind(&query).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.location_name);
                println!("   💨 {} ({})", result.format_speed(), result.cardinal());
                println!("   🧭 {}", result.format_direction());
                println!("   📅 {}", query.date);
            }
            if result.failed {
                std::process::exit(1);
            }
        }
        Command::Spin { place, seconds } => {
            let query = to_query(&place)?;
            spin(resolver, query, &config, seconds).await?;
        }
        Command::Serve { port } => web::run(port, resolver).await?,
    }

    Ok(())
}

fn to_query(place: &PlaceArgs) -> Result<Query> {
    let query = place.to_query(Local::now().date_naive());
    query.validate()?;
    Ok(query)
}

async fn spin(
    resolver: Arc<WindResolver>,
    query: Query,
    config: &PinwheelConfig,
    seconds: Option<u64>,
) -> Result<()> {
    let orchestrator = WindOrchestrator::new(resolver, query);
    let animator = RotationAnimator::new(config.animation.rotation_factor);
    let handle = animator.start(
        IntervalFrames::new(config.animation.frames_per_second),
        orchestrator.speed(),
        RotationState::default(),
    );

    // one signal listener for the whole session
    let stop = async move {
        let deadline = async {
            match seconds {
                Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            () = deadline => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    };

    display::draw_until(
        &mut std::io::stdout(),
        &orchestrator.subscribe(),
        &handle.rotation(),
        Duration::from_millis(100),
        stop,
    )
    .await?;

    let last = handle.stop().await;
    tracing::debug!("Pinwheel stopped at {:.1}°", last.angle_deg);
    Ok(())
}
