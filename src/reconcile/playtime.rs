use crate::Millis;

const MINUTE: Millis = 60 * 1000;
const HOUR: Millis = 60 * MINUTE;

/// Elapsed time at the table, displayed as whole hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlayTime(Millis);

impl PlayTime {
    /// Time from `start` to `end`; a clock that runs backwards reads as zero.
    pub fn between(start: Millis, end: Millis) -> Self {
        Self(end.saturating_sub(start).max(0))
    }
    pub fn millis(&self) -> Millis {
        self.0
    }
    pub fn hours(&self) -> i64 {
        self.0 / HOUR
    }
    /// Minutes past the whole hour.
    pub fn minutes(&self) -> i64 {
        (self.0 % HOUR) / MINUTE
    }
    pub fn total_minutes(&self) -> i64 {
        self.0 / MINUTE
    }
}

impl std::fmt::Display for PlayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

impl serde::Serialize for PlayTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
