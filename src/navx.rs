//! navX motion processor.
//!
//! `NavX` owns the one driver binding for the sensor. Build it once at
//! startup and pass it (or a reference to it) to whatever needs heading
//! or acceleration readings. Reads go straight to the driver.

use slog::{self, Logger};
use vecmath::{self, Vector3};

use errors::*;

/// The controller ports a navX board can be wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Port {
    /// SPI on the expansion port, where the board sits when plugged in directly.
    SpiMxp,
    SpiOnboardCs0,
    SpiOnboardCs1,
    SpiOnboardCs2,
    SpiOnboardCs3,
    I2cMxp,
    I2cOnboard,
    SerialMxp,
    SerialUsb,
}

impl Default for Port {
    fn default() -> Port {
        Port::SpiMxp
    }
}

/// Attitude and heading reference driver.
///
/// Angles are in degrees, accelerations in g.
pub trait Ahrs: Sized {
    fn open(port: Port) -> Result<Self>;

    /// Heading, range (-180, 180].
    fn yaw(&self) -> f32;

    /// Rate of change of heading in degrees per second.
    fn rate(&self) -> f64;

    /// Heading accumulated across full turns, without wrapping.
    fn angle(&self) -> f64;

    fn world_linear_accel_x(&self) -> f32;
    fn world_linear_accel_y(&self) -> f32;
    fn world_linear_accel_z(&self) -> f32;

    /// Offsets heading so the current orientation reads 0. Sampling continues.
    fn zero_yaw(&mut self);

    /// Recalibrates the yaw sensor. Sampling pauses while it runs.
    fn reset(&mut self);

    fn is_connected(&self) -> bool {
        true
    }

    fn is_calibrating(&self) -> bool {
        false
    }
}

pub struct NavX<A> {
    port: Port,
    motion: A,
    log: Logger,
}

impl<A: Ahrs> NavX<A> {
    /// Binds the driver to the default port.
    pub fn new<L>(log: L) -> Result<NavX<A>>
        where L: Into<Option<Logger>>
    {
        NavX::with_port(Port::default(), log)
    }

    pub fn with_port<L>(port: Port, log: L) -> Result<NavX<A>>
        where L: Into<Option<Logger>>
    {
        let log = log.into()
            .unwrap_or_else(|| Logger::root(slog::Discard, o!()))
            .new(o!("sensor" => "navx"));
        let motion = A::open(port)?;
        info!(log, "bound navx"; "port" => ?port);
        Ok(NavX {
            port: port,
            motion: motion,
            log: log,
        })
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// The bound driver, for driver-specific calls this type does not wrap.
    pub fn driver_mut(&mut self) -> &mut A {
        &mut self.motion
    }

    /// Rebinds the sensor to `port`, replacing the current driver.
    ///
    /// The new binding is opened before the old one is dropped. If it fails
    /// to open, the old binding stays in place.
    pub fn set_port(&mut self, port: Port) -> Result<()> {
        let motion = A::open(port)?;
        info!(self.log, "rebound navx"; "from" => ?self.port, "to" => ?port);
        self.motion = motion;
        self.port = port;
        Ok(())
    }

    /// Current heading. Range: (-180, 180] degrees.
    pub fn heading(&self) -> f32 {
        self.motion.yaw()
    }

    /// Degrees per second.
    pub fn heading_rate(&self) -> f64 {
        self.motion.rate()
    }

    /// Total heading in degrees, counting over-rotations.
    pub fn accumulated_angle(&self) -> f64 {
        self.motion.angle()
    }

    /// Forward-backward linear acceleration, in g.
    pub fn x_accel(&self) -> f32 {
        self.motion.world_linear_accel_x()
    }

    /// Left-right linear acceleration, in g.
    pub fn y_accel(&self) -> f32 {
        self.motion.world_linear_accel_y()
    }

    /// Up-down linear acceleration, in g.
    pub fn z_accel(&self) -> f32 {
        self.motion.world_linear_accel_z()
    }

    pub fn world_accel(&self) -> Vector3<f32> {
        [self.x_accel(), self.y_accel(), self.z_accel()]
    }

    /// Magnitude of the world-frame linear acceleration, in g.
    pub fn accel_magnitude(&self) -> f32 {
        vecmath::vec3_len(self.world_accel())
    }

    /// Makes the current heading read as 0 without recalibrating.
    ///
    /// Safe to call while moving.
    pub fn zero_yaw(&mut self) {
        info!(self.log, "zero yaw"; "heading" => self.motion.yaw());
        self.motion.zero_yaw();
    }

    /// Fully recalibrates the yaw sensor, which pauses sampling for a moment.
    ///
    /// Only call this while the robot is still.
    pub fn recalibrate_yaw(&mut self) {
        info!(self.log, "recalibrate yaw");
        self.motion.reset();
    }

    pub fn is_connected(&self) -> bool {
        self.motion.is_connected()
    }

    pub fn is_calibrating(&self) -> bool {
        self.motion.is_calibrating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports a heading derived from the port it was opened on, and refuses USB.
    struct PortEcho {
        port: Port,
        zeroed: bool,
        resets: u32,
    }

    impl Ahrs for PortEcho {
        fn open(port: Port) -> Result<Self> {
            if port == Port::SerialUsb {
                bail!(ErrorKind::PortUnavailable(port));
            }
            Ok(PortEcho {
                port: port,
                zeroed: false,
                resets: 0,
            })
        }

        fn yaw(&self) -> f32 {
            if self.zeroed { 0.0 } else { self.port as u8 as f32 * 10.0 }
        }

        fn rate(&self) -> f64 {
            1.5
        }

        fn angle(&self) -> f64 {
            370.0
        }

        fn world_linear_accel_x(&self) -> f32 {
            0.25
        }

        fn world_linear_accel_y(&self) -> f32 {
            -0.5
        }

        fn world_linear_accel_z(&self) -> f32 {
            1.0
        }

        fn zero_yaw(&mut self) {
            self.zeroed = true;
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn is_calibrating(&self) -> bool {
            self.resets > 0
        }
    }

    fn discard() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    #[test]
    fn binds_default_port() {
        let navx: NavX<PortEcho> = NavX::new(discard()).unwrap();
        assert_eq!(navx.port(), Port::SpiMxp);
        assert_eq!(navx.heading(), 0.0);
    }

    #[test]
    fn readings_pass_through() {
        let navx: NavX<PortEcho> = NavX::with_port(Port::I2cMxp, discard()).unwrap();
        assert_eq!(navx.heading(), Port::I2cMxp as u8 as f32 * 10.0);
        assert_eq!(navx.heading_rate(), 1.5);
        assert_eq!(navx.accumulated_angle(), 370.0);
        assert_eq!(navx.world_accel(), [0.25, -0.5, 1.0]);
        assert!((navx.accel_magnitude() - 1.3125f32.sqrt()).abs() < 1e-6);
        assert!(navx.is_connected());
    }

    #[test]
    fn set_port_replaces_driver_each_time() {
        let mut navx: NavX<PortEcho> = NavX::new(discard()).unwrap();
        navx.zero_yaw();
        assert_eq!(navx.heading(), 0.0);

        navx.set_port(Port::I2cOnboard).unwrap();
        assert_eq!(navx.port(), Port::I2cOnboard);
        assert_eq!(navx.heading(), Port::I2cOnboard as u8 as f32 * 10.0);

        navx.set_port(Port::SerialMxp).unwrap();
        assert_eq!(navx.port(), Port::SerialMxp);
        assert_eq!(navx.heading(), Port::SerialMxp as u8 as f32 * 10.0);
    }

    #[test]
    fn failed_rebind_keeps_old_driver() {
        let mut navx: NavX<PortEcho> = NavX::with_port(Port::I2cMxp, discard()).unwrap();

        match navx.set_port(Port::SerialUsb) {
            Err(Error(ErrorKind::PortUnavailable(Port::SerialUsb), _)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(navx.port(), Port::I2cMxp);
        assert_eq!(navx.heading(), Port::I2cMxp as u8 as f32 * 10.0);
    }

    #[test]
    fn recalibrate_resets_driver() {
        let mut navx: NavX<PortEcho> = NavX::new(discard()).unwrap();
        assert!(!navx.is_calibrating());
        navx.recalibrate_yaw();
        assert!(navx.is_calibrating());
    }

    #[test]
    fn port_names_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            port: Port,
        }
        let wrapper: Wrapper = ::toml::from_str("port = \"spi-onboard-cs2\"").unwrap();
        assert_eq!(wrapper.port, Port::SpiOnboardCs2);
    }
}
