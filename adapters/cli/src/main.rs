#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Ricochet game in the terminal.
//!
//! Two background threads feed a single channel: one forwards lines read
//! from standard input, the other reports elapsed wall time. The main thread
//! is the only one that touches the world.

mod engine;
mod input;
mod render;

use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Sender},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use ricochet_core::{Command, Event};
use ricochet_system_countdown::Config as CountdownConfig;
use ricochet_world::{Config, World, DEFAULT_TURN_BUDGET};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::engine::Engine;
use crate::input::{Input, HELP};

#[derive(Parser, Debug)]
#[command(name = "ricochet", about = "Bid, slide and race robots to their targets")]
struct Args {
    /// Start a game with this many players right away
    #[arg(short, long)]
    players: Option<u32>,

    /// RNG seed for robot placement and tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds each player has to finish a turn
    #[arg(long, default_value_t = DEFAULT_TURN_BUDGET)]
    turn_seconds: u32,

    /// Milliseconds between clock ticks
    #[arg(long, default_value_t = 100)]
    tick_millis: u64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "error")]
    log_level: LevelFilter,
}

/// Everything the main loop reacts to.
enum Message {
    Tick(Duration),
    Line(String),
    Closed,
}

/// Entry point for the Ricochet command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, turn_seconds = args.turn_seconds, "creating world");
    let world = World::with_config(Config::new(seed, args.turn_seconds));
    let mut engine = Engine::new(world, CountdownConfig::default());

    let (sender, receiver) = mpsc::channel();
    spawn_ticker(sender.clone(), Duration::from_millis(args.tick_millis.max(1)))?;
    spawn_reader(sender)?;

    println!("{HELP}");
    if let Some(player_count) = args.players {
        report(&engine.submit(Command::StartGame { player_count }));
        println!("{}", render::board(engine.world()));
    }

    for message in receiver {
        match message {
            Message::Tick(dt) => report(&engine.submit(Command::Tick { dt })),
            Message::Line(line) => match input::parse(&line) {
                Ok(None) => {}
                Ok(Some(Input::Quit)) => break,
                Ok(Some(Input::Help)) => println!("{HELP}"),
                Ok(Some(Input::Board)) => println!("{}", render::board(engine.world())),
                Ok(Some(Input::Scores)) => println!("{}", render::scores(engine.world())),
                Ok(Some(Input::Command(command))) => {
                    let moved = matches!(
                        command,
                        Command::StartGame { .. } | Command::Slide { .. } | Command::ManualRelocate { .. }
                    );
                    let events = engine.submit(command);
                    report(&events);
                    if moved && !rejected(&events) {
                        println!("{}", render::board(engine.world()));
                    }
                }
                Err(error) => {
                    warn!(%error, line = line.as_str(), "malformed input");
                    println!("{error}");
                }
            },
            Message::Closed => break,
        }
    }

    debug!("leaving main loop");
    Ok(())
}

fn report(events: &[Event]) {
    for line in events.iter().filter_map(render::describe) {
        println!("{line}");
    }
}

fn rejected(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::CommandRejected { .. }))
}

fn spawn_ticker(sender: Sender<Message>, interval: Duration) -> anyhow::Result<()> {
    let _ = thread::Builder::new()
        .name("ticker".to_owned())
        .spawn(move || {
            let mut last = Instant::now();
            loop {
                thread::sleep(interval);
                let now = Instant::now();
                if sender.send(Message::Tick(now - last)).is_err() {
                    break;
                }
                last = now;
            }
        })
        .context("failed to spawn ticker thread")?;
    Ok(())
}

fn spawn_reader(sender: Sender<Message>) -> anyhow::Result<()> {
    let _ = thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if sender.send(Message::Line(line)).is_err() {
                    return;
                }
            }
            let _ = sender.send(Message::Closed);
        })
        .context("failed to spawn input thread")?;
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
