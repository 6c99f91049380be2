use anyhow::Context;
use clap::Parser;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use waypoint_router::sdk::{
    config::ServiceConfig,
    console::{drain, parse_command, render_panel, search_event, Command, SearchCall, HELP},
    planner::{
        parse_coord, HeadlessSurface, PlannerEvent, PlannerSession, PresetPoint, Role,
        RouteCoordinator, SearchEvent,
    },
    routing::{Coord, RouteOptions, RoutingProvider, TomTomProvider},
    util::{
        log::init_logging,
        rate_limit::{tomtom_limiter, DEFAULT_REQUESTS_PER_SECOND},
    },
};

/// Plan a van route between two points with the TomTom routing API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start point as "lng,lat" (e.g. "106.845,-6.215")
    #[arg(long, value_parser = parse_coord, allow_hyphen_values = true)]
    start: Option<Coord>,

    /// Finish point as "lng,lat"
    #[arg(long, value_parser = parse_coord, allow_hyphen_values = true)]
    finish: Option<Coord>,

    /// Preset start point (A, B, C or D); takes precedence over --start
    #[arg(long)]
    preset: Option<PresetPoint>,

    /// Override the service base URL (also read from TOMTOM_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum requests per second sent to the service
    #[arg(long, default_value_t = DEFAULT_REQUESTS_PER_SECOND)]
    requests_per_second: u32,

    /// Print the final planner and map state as JSON on exit
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- 1. Service setup ---
    let mut config = ServiceConfig::from_env().context("Cannot configure the routing service")?;
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url)?;
    }
    log::info!("Using routing service at {}", config.base_url);
    let limiter = tomtom_limiter(cli.requests_per_second);
    let provider: Arc<dyn RoutingProvider> = Arc::new(
        TomTomProvider::new(&config, RouteOptions::default(), limiter)
            .context("Cannot build the HTTP client")?,
    );

    let surface = HeadlessSurface::new();
    let mut session = PlannerSession::new(
        RouteCoordinator::new(surface.adapters()),
        Arc::clone(&provider),
    );

    // --- 2. Waypoints given on the command line ---
    let start = cli.preset.map(PlannerEvent::from).or_else(|| {
        cli.start
            .map(|coord| PlannerEvent::WaypointSet { role: Role::Start, coord })
    });
    let finish = cli
        .finish
        .map(|coord| PlannerEvent::WaypointSet { role: Role::Finish, coord });
    for event in start.into_iter().chain(finish) {
        session.dispatch(event);
    }
    session.settle().await;
    println!("{}", render_panel(&surface));

    // --- 3. Interactive loop ---
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches: FuturesUnordered<SearchCall> = FuturesUnordered::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Help => println!("{}", HELP),
                    Command::Show => println!("{}", render_panel(&surface)),
                    Command::Search { role, query } => {
                        let provider = Arc::clone(&provider);
                        searches.push(
                            async move { (role, provider.search(&query).await) }.boxed(),
                        );
                    }
                    other => {
                        if let Some(event) = command_event(other) {
                            session.dispatch(event);
                            println!("{}", render_panel(&surface));
                        }
                    }
                }
            }
            Some((role, result)) = searches.next(), if !searches.is_empty() => {
                if let Some(event) = search_event(role, result) {
                    session.dispatch(event);
                    println!("{}", render_panel(&surface));
                }
            }
            true = session.poll_next(), if session.in_flight() > 0 => {
                println!("{}", render_panel(&surface));
            }
        }
    }

    // --- 4. Let pending calls land ---
    if session.in_flight() > 0 || !searches.is_empty() {
        drain(&mut session, &mut searches).await;
        println!("{}", render_panel(&surface));
    }

    // --- 5. Output final state ---
    if cli.json {
        let state = serde_json::json!({
            "planner": session.coordinator().snapshot(),
            "surface": surface.model(),
        });
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}

fn command_event(command: Command) -> Option<PlannerEvent> {
    match command {
        Command::Set { role, coord } => Some(PlannerEvent::WaypointSet { role, coord }),
        Command::Drag { role, coord } => Some(PlannerEvent::DragReposition { role, coord }),
        Command::Clear(role) => SearchEvent::ResultsCleared(role).into_planner_event(),
        Command::Preset(preset) => Some(preset.into()),
        Command::Search { .. } | Command::Show | Command::Help | Command::Quit => None,
    }
}
