// roomlib test application -- CLI tool for sending Open Interface commands
// to a robot over a serial port, or to a mock transport that prints every
// frame instead.
//
// Usage:
//   roomlib-test-app --port /dev/ttyUSB0 demo
//   roomlib-test-app --port /dev/ttyUSB0 drive 200 500
//   roomlib-test-app --mock digits ROOM
//   roomlib-test-app --mock song 0 60:16 64:16 67:32
//   roomlib-test-app --port /dev/ttyUSB0 --baud 19200 dock

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roomlib::oi::{Note, Song};
use roomlib::{Error, RoombaBuilder, RoombaDriver, Transport};
use roomlib_test_harness::MockTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// roomlib test application -- drives an Open Interface robot from the
/// command line.
#[derive(Parser)]
#[command(name = "roomlib-test-app", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    /// Required unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// Serial baud rate.
    #[arg(long, default_value_t = roomlib::transport::DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Use a mock transport that prints each frame instead of a serial port.
    #[arg(long)]
    mock: bool,

    /// Robot name used in log output.
    #[arg(long, default_value = "roomba")]
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full mode, show "ABCD" on the display, then return to the dock.
    Demo,

    /// Drive at VELOCITY mm/s along RADIUS mm.
    Drive {
        #[arg(allow_hyphen_values = true)]
        velocity: i16,
        #[arg(allow_hyphen_values = true)]
        radius: i16,
    },

    /// Show up to four characters on the digit display.
    Digits { text: String },

    /// Store a song. Notes are NUMBER:DURATION, duration in 1/64 s.
    Song {
        slot: u8,
        #[arg(required = true, value_parser = parse_note)]
        notes: Vec<Note>,
    },

    /// Play a stored song.
    Play { slot: u8 },

    /// Seek the charging dock.
    Dock,

    /// Start a normal cleaning cycle.
    Clean,

    /// Stop the wheels and return to Safe mode.
    Stop,
}

/// Parse "60:16" into a note.
fn parse_note(s: &str) -> std::result::Result<Note, String> {
    let (number, duration) = s
        .split_once(':')
        .ok_or_else(|| format!("expected NUMBER:DURATION, got {s:?}"))?;
    let number = number
        .parse::<u8>()
        .map_err(|e| format!("invalid note number {number:?}: {e}"))?;
    let duration = duration
        .parse::<u8>()
        .map_err(|e| format!("invalid duration {duration:?}: {e}"))?;
    Ok(Note::new(number, duration))
}

// ---------------------------------------------------------------------------
// Mock transport that echoes frames
// ---------------------------------------------------------------------------

/// Prints every written frame, then hands it to a [`MockTransport`].
struct EchoTransport {
    inner: MockTransport,
}

#[async_trait]
impl Transport for EchoTransport {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn port(&self) -> &str {
        self.inner.port()
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    async fn open(&mut self) -> std::result::Result<(), Error> {
        self.inner.open().await
    }

    async fn close(&mut self) -> std::result::Result<(), Error> {
        self.inner.close().await
    }

    async fn write(&mut self, data: &[u8]) -> std::result::Result<(), Error> {
        self.inner.write(data).await?;
        println!("  TX: {}", format_frame(data));
        Ok(())
    }

    async fn read_byte(&mut self) -> std::result::Result<u8, Error> {
        self.inner.read_byte().await
    }
}

fn format_frame(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Driver construction
// ---------------------------------------------------------------------------

async fn create_driver(cli: &Cli) -> Result<RoombaDriver> {
    let builder = RoombaBuilder::new().name(&cli.name).baud_rate(cli.baud);

    if cli.mock {
        let mock = MockTransport::disconnected().with_identity(&cli.name, "mock0");
        let driver = builder
            .build_with_transport(Box::new(EchoTransport { inner: mock }))
            .await?;
        return Ok(driver);
    }

    let Some(port) = cli.port.as_deref() else {
        bail!("--port is required unless --mock is used");
    };
    let driver = builder
        .serial_port(port)
        .build()
        .await
        .with_context(|| format!("failed to connect to {port}"))?;
    Ok(driver)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_demo(robot: &mut RoombaDriver) -> Result<()> {
    robot.full().await?;
    robot.digit_leds_ascii("ABCD").await?;
    tokio::time::sleep(Duration::from_secs(2)).await;
    robot.safe().await?;
    robot.seek_dock().await?;
    Ok(())
}

async fn cmd_drive(robot: &mut RoombaDriver, velocity: i16, radius: i16) -> Result<()> {
    robot.safe().await?;
    robot
        .drive(velocity, radius)
        .await
        .context("drive rejected")?;
    Ok(())
}

async fn cmd_song(robot: &mut RoombaDriver, slot: u8, notes: &[Note]) -> Result<()> {
    let song = Song::new(slot, notes);
    robot.song(&song).await.context("song rejected")?;
    println!(
        "Stored {} notes in slot {} ({:.2} s)",
        song.notes.len(),
        slot,
        song.length().as_secs_f64()
    );
    Ok(())
}

async fn cmd_stop(robot: &mut RoombaDriver) -> Result<()> {
    robot.drive_straight(0).await?;
    robot.halt().await?;
    Ok(())
}

async fn run(robot: &mut RoombaDriver, command: &Command) -> Result<()> {
    robot.start().await?;
    match command {
        Command::Demo => cmd_demo(robot).await,
        Command::Drive { velocity, radius } => cmd_drive(robot, *velocity, *radius).await,
        Command::Digits { text } => {
            robot.safe().await?;
            robot.digit_leds_ascii(text).await?;
            Ok(())
        }
        Command::Song { slot, notes } => cmd_song(robot, *slot, notes).await,
        Command::Play { slot } => {
            robot.safe().await?;
            robot.play(*slot).await?;
            Ok(())
        }
        Command::Dock => Ok(robot.seek_dock().await?),
        Command::Clean => Ok(robot.clean().await?),
        Command::Stop => cmd_stop(robot).await,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(name = %cli.name, mock = cli.mock, port = ?cli.port, "starting");
    let mut robot = create_driver(&cli).await?;
    println!("Connected to {} on {}", robot.name(), robot.transport().port());

    let result = run(&mut robot, &cli.command).await;
    if let Err(errors) = robot.finalize().await {
        eprintln!("Warning: failed to close transport: {errors}");
    }
    result
}
