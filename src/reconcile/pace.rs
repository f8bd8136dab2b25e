/// Heuristic for how many hands a table deals in a stretch of time.
///
/// Implementations must be non-decreasing in `minutes` for a fixed
/// player count.
pub trait Pace {
    fn hands(&self, players: usize, minutes: i64) -> u32;
}

/// Hands per hour at a live, hand-dealt table, by seated player count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Live;

impl Live {
    pub fn per_hour(players: usize) -> u32 {
        match players {
            0 => 0,
            1 | 2 => 60,
            3 => 50,
            4 => 45,
            5 => 40,
            6 => 35,
            7 => 32,
            8 => 30,
            9 => 28,
            _ => 25,
        }
    }
}

impl Pace for Live {
    fn hands(&self, players: usize, minutes: i64) -> u32 {
        let minutes = minutes.max(0) as u64;
        (minutes * Self::per_hour(players) as u64 / 60).min(u32::MAX as u64) as u32
    }
}
