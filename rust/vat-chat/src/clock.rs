use chrono::{Local, NaiveTime, Timelike};

/// Source of the wall-clock time for "what time is it".
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// The local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// `H:M:S` without zero padding, e.g. `9:5:30`.
pub fn spoken_time(time: NaiveTime) -> String {
    format!("{}:{}:{}", time.hour(), time.minute(), time.second())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_not_padded() {
        let time = NaiveTime::from_hms_opt(9, 5, 30).unwrap();
        assert_eq!(spoken_time(time), "9:5:30");
        assert_eq!(spoken_time(FixedClock(time).now()), "9:5:30");
    }
}
