//! Limelight vision camera, either processing targets or streaming as a
//! wide-angle driver camera.
//!
//! The camera publishes its measurements into its own partition of the
//! telemetry table and watches a handful of control entries in the same
//! partition. This type turns those entries into typed calls. Entry names
//! and value ranges follow the Limelight documentation
//! (<http://docs.limelightvision.io/en/latest/>).

use std::rc::Rc;

use slog::{self, Logger};

use command::{Command, Subsystem};
use errors::*;
use telemetry::{TablePartition, TelemetryStore};

const ENTRY_TARGET_VISIBLE: &str = "tv";
const ENTRY_TARGET_X: &str = "tx";
const ENTRY_TARGET_Y: &str = "ty";
const ENTRY_TARGET_AREA: &str = "ta";
const ENTRY_TARGET_SKEW: &str = "ts";
const ENTRY_CAMERA_MODE: &str = "camMode";
const ENTRY_LED_MODE: &str = "ledMode";
const ENTRY_STREAM_MODE: &str = "stream";
const ENTRY_PIPELINE: &str = "pipeline";
const ENTRY_SNAPSHOT: &str = "snapshot";

/// Turns a raw control entry into an integer mode code. Fractional and
/// non-finite values match no code.
fn decode_code(mode: &'static str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        bail!(ErrorKind::UnknownModeCode(mode, value));
    }
    Ok(value as i64)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedMode {
    /// Whatever the active pipeline configures.
    UsePipeline,
    Off,
    Blink,
    On,
}

impl LedMode {
    pub fn code(self) -> i64 {
        match self {
            LedMode::UsePipeline => 0,
            LedMode::Off => 1,
            LedMode::Blink => 2,
            LedMode::On => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<LedMode> {
        match code {
            0 => Ok(LedMode::UsePipeline),
            1 => Ok(LedMode::Off),
            2 => Ok(LedMode::Blink),
            3 => Ok(LedMode::On),
            _ => bail!(ErrorKind::UnknownModeCode("led mode", code as f64)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    VisionProcessing,
    /// Raises exposure and disables processing.
    DriverCamera,
}

impl CameraMode {
    pub fn code(self) -> i64 {
        match self {
            CameraMode::VisionProcessing => 0,
            CameraMode::DriverCamera => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<CameraMode> {
        match code {
            0 => Ok(CameraMode::VisionProcessing),
            1 => Ok(CameraMode::DriverCamera),
            _ => bail!(ErrorKind::UnknownModeCode("camera mode", code as f64)),
        }
    }
}

/// Picture-in-picture layout when a secondary camera is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMode {
    /// Side by side.
    Standard,
    /// Secondary stream inset in the corner of the primary.
    PipMain,
    /// Primary stream inset in the corner of the secondary.
    PipSecondary,
}

impl StreamMode {
    pub fn code(self) -> i64 {
        match self {
            StreamMode::Standard => 0,
            StreamMode::PipMain => 1,
            StreamMode::PipSecondary => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<StreamMode> {
        match code {
            0 => Ok(StreamMode::Standard),
            1 => Ok(StreamMode::PipMain),
            2 => Ok(StreamMode::PipSecondary),
            _ => bail!(ErrorKind::UnknownModeCode("stream mode", code as f64)),
        }
    }
}

pub struct Limelight {
    table: TablePartition,
    default_command: Box<dyn Command>,
    log: Logger,
}

impl Limelight {
    /// Binds to the camera's table partition and puts the camera in a known
    /// state: LEDs follow the pipeline, vision processing on, standard stream.
    ///
    /// `table_name` is the name set on the camera's configuration page, so
    /// several cameras can share one store.
    pub fn new<L>(store: Rc<dyn TelemetryStore>,
                  table_name: &str,
                  default_command: Box<dyn Command>,
                  log: L)
                  -> Limelight
        where L: Into<Option<Logger>>
    {
        let log = log.into()
            .unwrap_or_else(|| Logger::root(slog::Discard, o!()))
            .new(o!("limelight" => String::from(table_name)));

        let limelight = Limelight {
            table: TablePartition::new(store, table_name),
            default_command: default_command,
            log: log,
        };

        limelight.set_led_mode(LedMode::UsePipeline);
        limelight.set_camera_mode(CameraMode::VisionProcessing);
        limelight.set_stream_mode(StreamMode::Standard);
        limelight
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    fn entry_value(&self, key: &str) -> f64 {
        self.table.get_number(key, 0.0)
    }

    fn set_entry(&self, key: &str, value: i64) {
        debug!(self.log, "set entry"; "key" => key, "value" => value);
        self.table.set_number(key, value as f64);
    }

    /// Whether the camera has published a visibility reading at all.
    ///
    /// The getters below read 0 both before the camera reports and when it
    /// genuinely measures 0; this tells the two apart.
    pub fn is_publishing(&self) -> bool {
        self.table.contains(ENTRY_TARGET_VISIBLE)
    }

    pub fn target_visible(&self) -> bool {
        self.entry_value(ENTRY_TARGET_VISIBLE) == 1.0
    }

    /// Horizontal angle from the crosshair to the target. Range: (-27, 27) degrees.
    pub fn x_offset(&self) -> f64 {
        self.entry_value(ENTRY_TARGET_X)
    }

    /// Vertical angle from the crosshair to the target. Range: (-20.5, 20.5) degrees.
    pub fn y_offset(&self) -> f64 {
        self.entry_value(ENTRY_TARGET_Y)
    }

    /// Share of the image covered by the target. Range: (0, 100) percent.
    pub fn target_area(&self) -> f64 {
        self.entry_value(ENTRY_TARGET_AREA)
    }

    /// Rotation of the target in the image plane. Documented as (-90, 0)
    /// degrees, though the camera does not always stay inside that range.
    pub fn target_skew(&self) -> f64 {
        self.entry_value(ENTRY_TARGET_SKEW)
    }

    pub fn set_camera_mode(&self, mode: CameraMode) {
        self.set_entry(ENTRY_CAMERA_MODE, mode.code());
    }

    pub fn set_led_mode(&self, mode: LedMode) {
        self.set_entry(ENTRY_LED_MODE, mode.code());
    }

    pub fn set_stream_mode(&self, mode: StreamMode) {
        self.set_entry(ENTRY_STREAM_MODE, mode.code());
    }

    /// Selects a pipeline by the index shown on the configuration page.
    pub fn set_pipeline(&self, pipeline: u32) {
        self.set_entry(ENTRY_PIPELINE, pipeline as i64);
    }

    /// Asks the camera to save its current image and target data.
    pub fn take_snapshot(&self) {
        self.set_entry(ENTRY_SNAPSHOT, 1);
    }

    pub fn camera_mode(&self) -> Result<CameraMode> {
        CameraMode::from_code(decode_code("camera mode", self.entry_value(ENTRY_CAMERA_MODE))?)
    }

    pub fn led_mode(&self) -> Result<LedMode> {
        LedMode::from_code(decode_code("led mode", self.entry_value(ENTRY_LED_MODE))?)
    }

    pub fn stream_mode(&self) -> Result<StreamMode> {
        StreamMode::from_code(decode_code("stream mode", self.entry_value(ENTRY_STREAM_MODE))?)
    }
}

impl Subsystem for Limelight {
    fn name(&self) -> &str {
        self.table.name()
    }

    fn default_command(&mut self) -> Option<&mut dyn Command> {
        Some(&mut *self.default_command)
    }
}
