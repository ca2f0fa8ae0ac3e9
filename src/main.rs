#[macro_use]
extern crate fomat_macros;
#[macro_use]
extern crate slog;
extern crate slog_scope;
extern crate time;
extern crate twilight;

use std::cell::Cell;
use std::rc::Rc;
use std::thread;

use twilight::command::{DefaultRunner, RunCommand};
use twilight::config::Config;
use twilight::errors::*;
use twilight::limelight::{LedMode, Limelight};
use twilight::navx::NavX;
use twilight::sim::{SimAhrs, SimLimelight};
use twilight::telemetry::{MemoryStore, TablePartition};
use twilight::{logging, util};

fn main() {
    if let Err(ref e) = run() {
        epintln!((util::error_trace(e)));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => util::load_config(path.trim())?,
        None => Config::default(),
    };

    let log = logging::build_logger(&config.logging)?;
    let _scope_guard = slog_scope::set_global_logger(log.clone());
    info!(log, "starting"; "table" => &config.limelight.table, "port" => ?config.navx.port);

    let store = Rc::new(MemoryStore::new());
    let mut camera = SimLimelight::new(TablePartition::new(store.clone(), &config.limelight.table));

    let idle_ticks = Rc::new(Cell::new(0u64));
    let idle_counter = idle_ticks.clone();
    let idle = RunCommand::new("idle", move || {
        idle_counter.set(idle_counter.get() + 1);
        trace!(slog_scope::logger(), "limelight idle");
    });
    let mut limelight = Limelight::new(store.clone(), &config.limelight.table, Box::new(idle), log.clone());
    if let Some(pipeline) = config.limelight.pipeline {
        limelight.set_pipeline(pipeline);
    }

    let mut navx: NavX<SimAhrs> = NavX::with_port(config.navx.port, log.clone())?;
    navx.driver_mut().yaw_rate = 45.0;
    navx.driver_mut().accel = [0.1, 0.0, 0.0];
    navx.zero_yaw();

    let dt = config.run.period_ms as f64 / 1000.0;
    let period = time::Duration::milliseconds(config.run.period_ms as i64);
    let mut last_tick = time::PreciseTime::now();
    let mut was_visible = false;
    let mut tick = 0;
    let mut idle_runner = DefaultRunner::new();

    while tick < config.run.iterations {
        let now = time::PreciseTime::now();
        if last_tick.to(now) < period {
            thread::sleep(std::time::Duration::from_millis(1));
            continue;
        }
        last_tick = now;
        tick += 1;

        camera.step(dt);
        navx.driver_mut().step(dt);

        idle_runner.tick(&mut limelight);

        let visible = limelight.target_visible();
        if visible != was_visible {
            limelight.set_led_mode(if visible { LedMode::On } else { LedMode::UsePipeline });
            if visible {
                limelight.take_snapshot();
            }
            was_visible = visible;
        }

        if tick == config.run.iterations / 2 {
            navx.driver_mut().yaw_rate = 0.0;
            navx.recalibrate_yaw();
        }

        pintln!("tick "(tick)
                " | target "(if visible { "yes" } else { "no " })
                " x "(limelight.x_offset())
                " area "(limelight.target_area())
                " | heading "(navx.heading())
                " angle "(navx.accumulated_angle())
                if navx.is_calibrating() { " (calibrating)" });
    }

    info!(log, "done";
          "ticks" => tick,
          "idle_ticks" => idle_ticks.get(),
          "accel_g" => navx.accel_magnitude());
    Ok(())
}
