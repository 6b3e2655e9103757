//! RoombaDriver -- sends Open Interface commands over a [`Transport`].
//!
//! Every command method follows the same path: validate the arguments,
//! encode the frame with [`commands`](crate::commands), write it to the
//! transport. A command that fails validation writes nothing. All methods
//! return an [`ErrorSet`] so that every rejected field is reported at once.

use roomlib_core::error::{ErrorSet, Result};
use roomlib_core::transport::Transport;
use tracing::{debug, info, trace, warn};

use crate::bitfield::{Buttons, DigitalOutputs, Leds, Motors, SchedulingLeds};
use crate::commands;
use crate::motion::{Drive, DriveDirect, DrivePwm, PwmMotors};
use crate::note::Song;
use crate::schedule::{DateTime, Schedule};
use crate::validate::DIGIT_COUNT;

/// A robot reachable through one transport.
///
/// Constructed directly with [`RoombaDriver::new`] or through
/// [`RoombaBuilder`](crate::builder::RoombaBuilder). Methods take
/// `&mut self`, so at most one command is in flight per driver; share a
/// driver between tasks behind a `tokio::sync::Mutex`.
pub struct RoombaDriver<T: Transport = Box<dyn Transport>> {
    name: String,
    transport: T,
}

impl<T: Transport> RoombaDriver<T> {
    pub fn new(name: &str, transport: T) -> Self {
        RoombaDriver {
            name: name.to_string(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport without closing it.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Open the transport, closing it first if it is already open.
    ///
    /// Both the close and the open failure are reported when both happen.
    pub async fn connect(&mut self) -> Result<()> {
        debug!(name = %self.name, port = %self.transport.port(), "connecting");
        match self.transport.connect().await {
            Ok(()) => {
                info!(name = %self.name, port = %self.transport.port(), "connected");
                Ok(())
            }
            Err(errors) => {
                warn!(name = %self.name, error = %errors, "connect failed");
                Err(errors)
            }
        }
    }

    /// Release the transport. Does nothing if it is already closed.
    pub async fn finalize(&mut self) -> Result<()> {
        debug!(name = %self.name, "finalizing");
        self.transport.finalize().await
    }

    /// Write one encoded frame, or return the validation errors untouched.
    async fn send(&mut self, command: &'static str, frame: Result<Vec<u8>>) -> Result<()> {
        let frame = match frame {
            Ok(frame) => frame,
            Err(errors) => {
                debug!(name = %self.name, command, error = %errors, "command rejected");
                return Err(errors);
            }
        };
        trace!(name = %self.name, command, bytes = ?frame, "sending frame");
        self.transport.write(&frame).await.map_err(|e| {
            warn!(name = %self.name, command, error = %e, "write failed");
            ErrorSet::from(e)
        })
    }

    // ---------------------------------------------------------------
    // Mode commands
    // ---------------------------------------------------------------

    /// Start the Open Interface. The robot enters Passive mode.
    pub async fn start(&mut self) -> Result<()> {
        self.send("start", Ok(commands::cmd_start())).await
    }

    pub async fn safe(&mut self) -> Result<()> {
        self.send("safe", Ok(commands::cmd_safe())).await
    }

    pub async fn full(&mut self) -> Result<()> {
        self.send("full", Ok(commands::cmd_full())).await
    }

    /// Stop the robot by returning to Safe mode.
    pub async fn halt(&mut self) -> Result<()> {
        self.safe().await
    }

    pub async fn power(&mut self) -> Result<()> {
        self.send("power", Ok(commands::cmd_power())).await
    }

    /// Change the robot's baud rate. The transport keeps its own rate;
    /// reconnect at the new rate after 100 ms.
    pub async fn baud(&mut self, code: u8) -> Result<()> {
        self.send("baud", commands::cmd_baud(code)).await
    }

    // ---------------------------------------------------------------
    // Cleaning
    // ---------------------------------------------------------------

    pub async fn clean(&mut self) -> Result<()> {
        self.send("clean", Ok(commands::cmd_clean())).await
    }

    pub async fn spot(&mut self) -> Result<()> {
        self.send("spot", Ok(commands::cmd_spot())).await
    }

    pub async fn max(&mut self) -> Result<()> {
        self.send("max", Ok(commands::cmd_max())).await
    }

    pub async fn seek_dock(&mut self) -> Result<()> {
        self.send("seek_dock", Ok(commands::cmd_seek_dock())).await
    }

    pub async fn demo(&mut self, id: u8) -> Result<()> {
        self.send("demo", commands::cmd_demo(id)).await
    }

    pub async fn schedule(&mut self, schedule: &Schedule) -> Result<()> {
        self.send("schedule", commands::cmd_schedule(schedule)).await
    }

    pub async fn disable_schedule(&mut self) -> Result<()> {
        self.send("disable_schedule", Ok(commands::cmd_disable_schedule()))
            .await
    }

    pub async fn set_date_time(&mut self, time: DateTime) -> Result<()> {
        self.send("set_date_time", commands::cmd_set_date_time(time))
            .await
    }

    // ---------------------------------------------------------------
    // Actuators
    // ---------------------------------------------------------------

    /// Drive at `velocity` mm/s along `radius` mm.
    pub async fn drive(&mut self, velocity: i16, radius: i16) -> Result<()> {
        self.send("drive", commands::cmd_drive(Drive::new(velocity, radius)))
            .await
    }

    pub async fn drive_straight(&mut self, velocity: i16) -> Result<()> {
        self.send("drive", commands::cmd_drive(Drive::straight(velocity)))
            .await
    }

    pub async fn drive_direct(&mut self, right: i16, left: i16) -> Result<()> {
        let frame = commands::cmd_drive_direct(DriveDirect::new(right, left));
        self.send("drive_direct", frame).await
    }

    pub async fn drive_pwm(&mut self, right: i16, left: i16) -> Result<()> {
        let frame = commands::cmd_drive_pwm(DrivePwm::new(right, left));
        self.send("drive_pwm", frame).await
    }

    pub async fn motors(&mut self, motors: Motors) -> Result<()> {
        self.send("motors", Ok(commands::cmd_motors(motors))).await
    }

    pub async fn pwm_motors(&mut self, motors: PwmMotors) -> Result<()> {
        self.send("pwm_motors", commands::cmd_pwm_motors(motors))
            .await
    }

    pub async fn leds(&mut self, leds: Leds) -> Result<()> {
        self.send("leds", Ok(commands::cmd_leds(leds))).await
    }

    pub async fn scheduling_leds(&mut self, leds: SchedulingLeds) -> Result<()> {
        self.send("scheduling_leds", Ok(commands::cmd_scheduling_leds(leds)))
            .await
    }

    pub async fn digit_leds_raw(&mut self, digits: [u8; DIGIT_COUNT]) -> Result<()> {
        self.send("digit_leds_raw", commands::cmd_digit_leds_raw(digits))
            .await
    }

    /// Show up to four printable ASCII characters on the digit display.
    pub async fn digit_leds_ascii(&mut self, text: &str) -> Result<()> {
        self.send("digit_leds_ascii", commands::cmd_digit_leds_ascii(text))
            .await
    }

    pub async fn digital_output(&mut self, outputs: DigitalOutputs) -> Result<()> {
        self.send("digital_output", Ok(commands::cmd_digital_output(outputs)))
            .await
    }

    pub async fn send_ir(&mut self, value: u8) -> Result<()> {
        self.send("send_ir", Ok(commands::cmd_send_ir(value))).await
    }

    pub async fn buttons(&mut self, buttons: Buttons) -> Result<()> {
        self.send("buttons", Ok(commands::cmd_buttons(buttons))).await
    }

    // ---------------------------------------------------------------
    // Songs
    // ---------------------------------------------------------------

    /// Store `song` in its slot. Play it with [`play`](Self::play).
    pub async fn song(&mut self, song: &Song) -> Result<()> {
        self.send("song", commands::cmd_song(song)).await
    }

    pub async fn play(&mut self, slot: u8) -> Result<()> {
        self.send("play", commands::cmd_play(slot)).await
    }

    // ---------------------------------------------------------------
    // Sensor requests
    // ---------------------------------------------------------------

    pub async fn sensors(&mut self, packet_id: u8) -> Result<()> {
        self.send("sensors", commands::cmd_sensors(packet_id)).await
    }

    pub async fn query_list(&mut self, packet_ids: &[u8]) -> Result<()> {
        self.send("query_list", commands::cmd_query_list(packet_ids))
            .await
    }

    pub async fn stream(&mut self, packet_ids: &[u8]) -> Result<()> {
        self.send("stream", commands::cmd_stream(packet_ids)).await
    }

    pub async fn pause_stream(&mut self) -> Result<()> {
        self.send("pause_stream", Ok(commands::cmd_pause_stream()))
            .await
    }

    pub async fn resume_stream(&mut self) -> Result<()> {
        self.send("resume_stream", Ok(commands::cmd_resume_stream()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::schedule::Day;
    use roomlib_core::Error;
    use roomlib_test_harness::MockTransport;

    fn driver() -> RoombaDriver<MockTransport> {
        RoombaDriver::new("test", MockTransport::new())
    }

    #[tokio::test]
    async fn mode_commands_write_single_opcodes() {
        let mut robot = driver();
        robot.start().await.unwrap();
        robot.safe().await.unwrap();
        robot.full().await.unwrap();
        robot.halt().await.unwrap();
        robot.power().await.unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[vec![128], vec![131], vec![132], vec![131], vec![133]]
        );
    }

    #[tokio::test]
    async fn cleaning_commands() {
        let mut robot = driver();
        robot.clean().await.unwrap();
        robot.spot().await.unwrap();
        robot.max().await.unwrap();
        robot.seek_dock().await.unwrap();
        robot.demo(255).await.unwrap();
        assert_eq!(
            robot.transport().sent_bytes(),
            vec![135, 134, 136, 143, 136, 255]
        );
    }

    #[tokio::test]
    async fn drive_writes_frame() {
        let mut robot = driver();
        robot.drive(-200, 500).await.unwrap();
        robot.drive_straight(100).await.unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[
                vec![137, 0xFF, 0x38, 0x01, 0xF4],
                vec![137, 0x00, 0x64, 0x7F, 0xFF],
            ]
        );
    }

    #[tokio::test]
    async fn invalid_drive_writes_nothing() {
        let mut robot = driver();
        let errs = robot.drive(501, 0).await.unwrap_err();
        assert!(!errs.is_empty());
        assert!(robot.transport().sent_data().is_empty());
    }

    #[tokio::test]
    async fn drive_reports_every_invalid_field() {
        let mut robot = driver();
        let errs = robot.drive(600, 3000).await.unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(Error::is_invalid_argument));
        assert!(robot.transport().sent_data().is_empty());
    }

    #[tokio::test]
    async fn wheel_commands_send_right_first() {
        let mut robot = driver();
        robot.drive_direct(100, -100).await.unwrap();
        robot.drive_pwm(255, 0).await.unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[
                vec![145, 0x00, 0x64, 0xFF, 0x9C],
                vec![146, 0x00, 0xFF, 0x00, 0x00],
            ]
        );
        assert_eq!(robot.drive_pwm(256, -256).await.unwrap_err().len(), 2);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let mut robot = driver();
        robot.transport_mut().fail_next_write(Error::ConnectionLost);
        let errs = robot.start().await.unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs.iter().next(), Some(Error::ConnectionLost)));

        // The injected failure is one-shot.
        robot.start().await.unwrap();
        assert_eq!(robot.transport().sent_data(), &[vec![128]]);
    }

    #[tokio::test]
    async fn write_on_closed_transport_fails() {
        let mut robot = RoombaDriver::new("closed", MockTransport::disconnected());
        let errs = robot.safe().await.unwrap_err();
        assert!(matches!(errs.iter().next(), Some(Error::NotConnected)));
    }

    #[tokio::test]
    async fn song_then_play() {
        let mut robot = driver();
        let song = Song::new(2, vec![Note::new(72, 16), Note::new(76, 16)]);
        robot.song(&song).await.unwrap();
        robot.play(2).await.unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[vec![140, 2, 2, 72, 16, 76, 16], vec![141, 2]]
        );
    }

    #[tokio::test]
    async fn invalid_song_writes_nothing() {
        let mut robot = driver();
        let song = Song::new(5, vec![Note::new(10, 16)]);
        assert_eq!(robot.song(&song).await.unwrap_err().len(), 2);
        assert!(robot.play(4).await.is_err());
        assert!(robot.transport().sent_data().is_empty());
    }

    #[tokio::test]
    async fn sensor_requests() {
        let mut robot = driver();
        robot.sensors(7).await.unwrap();
        robot.query_list(&[7, 100]).await.unwrap();
        robot.stream(&[19]).await.unwrap();
        robot.pause_stream().await.unwrap();
        robot.resume_stream().await.unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[
                vec![142, 7],
                vec![149, 2, 7, 100],
                vec![148, 1, 19],
                vec![150, 0],
                vec![150, 1],
            ]
        );
    }

    #[tokio::test]
    async fn display_and_outputs() {
        let mut robot = driver();
        robot.digit_leds_ascii("Hi").await.unwrap();
        robot.digit_leds_raw([0x7F, 0, 0, 0x01]).await.unwrap();
        robot.motors(Motors::cleaning()).await.unwrap();
        robot.send_ir(42).await.unwrap();
        robot
            .digital_output(DigitalOutputs {
                output1: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            robot.transport().sent_data(),
            &[
                vec![164, b'H', b'i', b' ', b' '],
                vec![163, 0x7F, 0, 0, 0x01],
                vec![138, 0x07],
                vec![151, 42],
                vec![147, 0x02],
            ]
        );
    }

    #[tokio::test]
    async fn schedule_commands() {
        let mut robot = driver();
        robot.disable_schedule().await.unwrap();
        robot
            .set_date_time(DateTime::new(Day::Monday, 8, 30))
            .await
            .unwrap();
        let sent = robot.transport().sent_data();
        assert_eq!(sent[0].len(), 16);
        assert_eq!(sent[0][0], 167);
        assert_eq!(sent[1], vec![168, 1, 8, 30]);

        let bad = Schedule::disabled().with(Day::Tuesday, 24, 0);
        assert!(robot.schedule(&bad).await.is_err());
        assert_eq!(robot.transport().sent_data().len(), 2);
    }

    #[tokio::test]
    async fn connect_twice_aggregates_failures() {
        let mut robot = RoombaDriver::new("r", MockTransport::disconnected());
        robot.connect().await.unwrap();
        assert_eq!(robot.transport().open_count(), 1);

        robot
            .transport_mut()
            .fail_next_close(Error::Transport("close failed".into()));
        robot
            .transport_mut()
            .fail_next_open(Error::Transport("open failed".into()));
        let errs = robot.connect().await.unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(robot.transport().close_count(), 1);
        assert_eq!(robot.transport().open_count(), 2);
        let text = errs.to_string();
        assert!(text.contains("close failed"));
        assert!(text.contains("open failed"));
    }

    #[tokio::test]
    async fn finalize_closes_transport() {
        let mut robot = driver();
        robot.finalize().await.unwrap();
        assert!(!robot.transport().is_connected());
        robot.finalize().await.unwrap();
        assert_eq!(robot.transport().close_count(), 1);
    }

    #[tokio::test]
    async fn boxed_transport_driver() {
        let transport: Box<dyn Transport> = Box::new(MockTransport::new());
        let mut robot: RoombaDriver = RoombaDriver::new("boxed", transport);
        robot.start().await.unwrap();
        assert_eq!(robot.name(), "boxed");
        assert_eq!(robot.transport().port(), "mock0");
    }
}
