//! Days, cleaning schedules, and the robot clock.

use std::fmt;

use crate::frame::pack_bits;

/// Day of the week, numbered the way the robot numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Wire value and bit position of this day.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Day> {
        Day::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// A set of days, packed as bit 0 = Sunday through bit 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Weekdays {
    days: [bool; 7],
}

impl Weekdays {
    pub const fn none() -> Self {
        Weekdays { days: [false; 7] }
    }

    pub const fn all() -> Self {
        Weekdays { days: [true; 7] }
    }

    pub fn with(mut self, day: Day) -> Self {
        self.days[day as usize] = true;
        self
    }

    pub fn contains(&self, day: Day) -> bool {
        self.days[day as usize]
    }

    pub fn bits(&self) -> u8 {
        pack_bits(&Day::ALL.map(|day| (self.contains(day), day.index())))
    }
}

impl FromIterator<Day> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        iter.into_iter().fold(Weekdays::none(), Weekdays::with)
    }
}

/// Start time of a scheduled cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScheduleTime {
    /// `0..=23`
    pub hour: u8,
    /// `0..=59`
    pub minute: u8,
}

impl ScheduleTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        ScheduleTime { hour, minute }
    }
}

/// Weekly cleaning schedule, one optional start time per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Schedule {
    days: [Option<ScheduleTime>; 7],
}

impl Schedule {
    /// A schedule with every day inactive.
    pub const fn disabled() -> Self {
        Schedule { days: [None; 7] }
    }

    /// Builder-style: clean on `day` at `hour:minute`.
    pub fn with(mut self, day: Day, hour: u8, minute: u8) -> Self {
        self.set(day, Some(ScheduleTime::new(hour, minute)));
        self
    }

    pub fn set(&mut self, day: Day, time: Option<ScheduleTime>) {
        self.days[day as usize] = time;
    }

    pub fn get(&self, day: Day) -> Option<ScheduleTime> {
        self.days[day as usize]
    }

    /// Active days with their start times, Sunday first.
    pub fn active(&self) -> impl Iterator<Item = (Day, ScheduleTime)> + '_ {
        Day::ALL
            .into_iter()
            .filter_map(move |day| self.get(day).map(|time| (day, time)))
    }

    pub fn is_disabled(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    pub fn weekdays(&self) -> Weekdays {
        self.active().map(|(day, _)| day).collect()
    }
}

/// Value for the robot's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub day: Day,
    /// `0..=23`
    pub hour: u8,
    /// `0..=59`
    pub minute: u8,
}

impl DateTime {
    pub const fn new(day: Day, hour: u8, minute: u8) -> Self {
        DateTime { day, hour, minute }
    }
}
