//! Basic Open Interface example.
//!
//! Wakes the robot, drives a short arc, plays a two-note song, and sends
//! it back to the dock.
//!
//! # Requirements
//!
//! - A Roomba 500/600 or Create 2 connected via a USB serial cable
//! - The serial port path adjusted for your system (e.g., `/dev/ttyUSB0`
//!   on Linux, `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p roomlib --example basic_drive
//! ```

use std::time::Duration;

use roomlib::oi::{Note, Song};
use roomlib::RoombaBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Adjust this to match your system's serial port.
    let serial_port = "/dev/ttyUSB0";

    println!("Connecting to robot on {}...", serial_port);

    let mut robot = RoombaBuilder::new()
        .name("example")
        .serial_port(serial_port)
        .baud_rate(115_200)
        .build()
        .await?;

    robot.start().await?;
    robot.safe().await?;
    robot.digit_leds_ascii("HI").await?;

    // Quarter circle to the left at 200 mm/s.
    robot.drive(200, 500).await?;
    tokio::time::sleep(Duration::from_millis(3900)).await;
    robot.drive_straight(0).await?;

    let song = Song::new(0, vec![Note::new(72, 16), Note::new(79, 32)]);
    robot.song(&song).await?;
    robot.play(0).await?;
    tokio::time::sleep(song.length()).await;

    robot.seek_dock().await?;
    robot.finalize().await?;

    println!("Done.");
    Ok(())
}
