//! 单线交会演示
//!
//! 两列对向列车争用一段单线；反向列车出发过早时触发互相阻塞。

use clap::Parser;
use railsim_rs::demo::{CrossingOpts, build_single_track_crossing};
use railsim_rs::dispatch::FirstFree;
use railsim_rs::sim::{SimConfig, SimTime};

#[derive(Debug, Parser)]
#[command(name = "crossing_demo", about = "单线交会仿真：东行/西行列车争用单线")]
struct Args {
    /// 资源追踪间隔（秒）
    #[arg(long, default_value_t = 30)]
    release_secs: u64,
    /// 每条区段运行时间（秒）
    #[arg(long, default_value_t = 60)]
    running_secs: u64,
    /// 西行列车出发时刻（秒）
    #[arg(long, default_value_t = 0)]
    opposing_start_secs: u64,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let opts = CrossingOpts {
        release_delay: SimTime::from_secs(args.release_secs),
        running_time: SimTime::from_secs(args.running_secs),
        opposing_start: SimTime::from_secs(args.opposing_start_secs),
    };

    let mut sim =
        build_single_track_crossing(&opts).into_simulator(FirstFree::new(), SimConfig::default());
    match sim.run() {
        Ok(outcome) => println!("done @ {}, {:?}", sim.now(), outcome),
        Err(e) => println!("failed @ {}: {}", sim.now(), e),
    }
}
