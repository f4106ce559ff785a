//! 实例仿真
//!
//! 读取 JSON 实例，运行列车仿真，输出时刻表 JSON。遇到互相阻塞时
//! 重置并调整调度器后重试。

use clap::{Parser, ValueEnum};
use railsim_rs::dispatch::{Dispatcher, FirstFree, MinPenalty};
use railsim_rs::instance::Instance;
use railsim_rs::sim::{RunOutcome, SimConfig, SimError, SimTime};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DispatcherKind {
    FirstFree,
    MinPenalty,
}

#[derive(Debug, Parser)]
#[command(name = "rail-sim", about = "Run a train schedule instance through the event simulator")]
struct Args {
    /// Path to instance.json
    #[arg(long)]
    instance: PathBuf,

    /// Output schedule JSON file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output event trace JSON file
    #[arg(long)]
    trace_json: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DispatcherKind::FirstFree)]
    dispatcher: DispatcherKind,

    /// How many runs to try when trains block each other
    #[arg(long, default_value_t = 1)]
    attempts: u32,

    /// Retry interval for a blocked train (seconds)
    #[arg(long, default_value_t = 30)]
    retry_secs: u64,

    /// Status log interval (minutes of simulated time)
    #[arg(long, default_value_t = 10)]
    report_mins: u64,

    /// Abort when an event is scheduled past this many hours
    #[arg(long, default_value_t = 10)]
    max_hours: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let instance = match Instance::from_path(&args.instance) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    let config = SimConfig {
        retry_delay: SimTime::from_secs(args.retry_secs),
        report_interval: SimTime::from_mins(args.report_mins),
        max_time: SimTime::from_hours(args.max_hours),
    };
    let dispatcher: Box<dyn Dispatcher> = match args.dispatcher {
        DispatcherKind::FirstFree => Box::new(FirstFree::new()),
        DispatcherKind::MinPenalty => Box::new(MinPenalty),
    };
    let mut sim = instance.into_simulator(dispatcher, config);
    if args.trace_json.is_some() {
        sim = sim.with_viz();
    }

    let attempts = args.attempts.max(1);
    let mut result: Result<RunOutcome, SimError> = sim.run();
    for attempt in 2..=attempts {
        let Err(SimError::MutualBlocking(deadlock)) = &result else {
            break;
        };
        info!(
            attempt,
            "{}: {}/{} trains", deadlock.time, deadlock.completed, deadlock.total
        );
        let deadlock = deadlock.clone();
        sim.dispatcher_mut().on_deadlock(&deadlock);
        sim.reset();
        result = sim.run();
    }

    if let Some(path) = &args.trace_json {
        let events = sim.viz.as_ref().map(|v| v.events.as_slice()).unwrap_or(&[]);
        let raw = serde_json::to_string(events).expect("serialize trace");
        fs::write(path, raw).expect("write trace json");
        eprintln!("wrote trace events to {}", path.display());
    }

    match result {
        Ok(RunOutcome::Completed {
            score,
            completed,
            total,
            ..
        }) => {
            let raw = serde_json::to_string_pretty(&[sim.create_output()])
                .expect("serialize schedule");
            match &args.output {
                Some(path) => fs::write(path, raw).expect("write schedule json"),
                None => println!("{raw}"),
            }
            println!("done score={score:.2} completed={completed}/{total}");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Paused { .. }) => ExitCode::from(3),
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(d) = e.deadlock() {
                eprintln!("{}: {}/{} trains", d.time, d.completed, d.total);
            }
            ExitCode::from(2)
        }
    }
}
