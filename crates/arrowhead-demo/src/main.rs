use anyhow::Result;

use arrowhead_engine::core::FrameScheduler;
use arrowhead_engine::device::GpuInit;
use arrowhead_engine::logging::{init_logging, LoggingConfig};
use arrowhead_engine::scene::{GeometryStore, SimulationConfig};
use arrowhead_engine::time::ClockConfig;
use arrowhead_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SimulationConfig::default();
    log::info!(
        "spinning at {} rad/s; hold {} to move down at {} units/s",
        config.turn_speed,
        config.movement_key,
        config.movement_speed
    );

    let scheduler = FrameScheduler::new(GeometryStore::arrow(), config, ClockConfig::default());

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), scheduler)
}
