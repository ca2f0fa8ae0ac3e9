//! Simulated hardware that mirrors what the real devices report.

use std::f64::consts::PI;

use errors::*;
use navx::{Ahrs, Port};
use telemetry::TablePartition;

/// Number of `step` calls a recalibration keeps the simulated sensor busy.
pub const CALIBRATION_STEPS: u32 = 10;

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

pub struct SimAhrs {
    pub port: Port,
    /// Commanded rotation rate, degrees per second.
    pub yaw_rate: f64,
    pub accel: [f32; 3],
    raw_angle: f64,
    yaw_offset: f64,
    calibrating_steps: u32,
}

impl SimAhrs {
    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.calibrating_steps > 0 {
            self.calibrating_steps -= 1;
            return;
        }
        self.raw_angle += self.yaw_rate * dt;
    }
}

impl Ahrs for SimAhrs {
    fn open(port: Port) -> Result<SimAhrs> {
        Ok(SimAhrs {
            port: port,
            yaw_rate: 0.0,
            accel: [0.0; 3],
            raw_angle: 0.0,
            yaw_offset: 0.0,
            calibrating_steps: 0,
        })
    }

    fn yaw(&self) -> f32 {
        wrap_degrees(self.raw_angle - self.yaw_offset) as f32
    }

    fn rate(&self) -> f64 {
        if self.calibrating_steps > 0 {
            0.0
        } else {
            self.yaw_rate
        }
    }

    fn angle(&self) -> f64 {
        self.raw_angle - self.yaw_offset
    }

    fn world_linear_accel_x(&self) -> f32 {
        self.accel[0]
    }

    fn world_linear_accel_y(&self) -> f32 {
        self.accel[1]
    }

    fn world_linear_accel_z(&self) -> f32 {
        self.accel[2]
    }

    fn zero_yaw(&mut self) {
        self.yaw_offset = self.raw_angle;
    }

    fn reset(&mut self) {
        self.raw_angle = 0.0;
        self.yaw_offset = 0.0;
        self.calibrating_steps = CALIBRATION_STEPS;
    }

    fn is_calibrating(&self) -> bool {
        self.calibrating_steps > 0
    }
}

/// Publishes a target sweeping back and forth across the camera's view.
pub struct SimLimelight {
    table: TablePartition,
    /// Seconds for one full sweep.
    pub period: f64,
    elapsed: f64,
}

impl SimLimelight {
    pub fn new(table: TablePartition) -> SimLimelight {
        SimLimelight {
            table: table,
            period: 4.0,
            elapsed: 0.0,
        }
    }

    pub fn step(&mut self, dt: f64) {
        self.elapsed += dt;
        let phase = (self.elapsed / self.period) * 2.0 * PI;
        let x = 32.0 * phase.sin();

        // Past the edge of the 27 degree half-width the target drops out.
        if x.abs() < 27.0 {
            self.table.set_number("tv", 1.0);
            self.table.set_number("tx", x);
            self.table.set_number("ty", 5.0 * phase.cos());
            self.table.set_number("ta", 10.0 + 5.0 * phase.cos().abs());
            self.table.set_number("ts", -45.0 + 30.0 * phase.sin());
        } else {
            self.table.set_number("tv", 0.0);
            self.table.set_number("tx", 0.0);
            self.table.set_number("ty", 0.0);
            self.table.set_number("ta", 0.0);
            self.table.set_number("ts", 0.0);
        }
    }
}
