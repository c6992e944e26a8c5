//! Randomized workflow parameters.
//!
//! Every draw takes the caller's RNG so a seeded `StdRng` reproduces a run.

use crate::tokens::SwapDirection;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const SWAP_COUNT: RangeInclusive<u32> = 3..=5;
pub const SWAP_AMOUNT: RangeInclusive<u64> = 100..=500;
pub const SWAP_PAUSE_MS: RangeInclusive<u64> = 10_000..=20_000;

pub const SEND_COUNT: RangeInclusive<u32> = 1..=3;
pub const SEND_PAUSE_MS: RangeInclusive<u64> = 5_000..=10_000;
pub const SEND_AMOUNT_MIN: f64 = 0.00001;
pub const SEND_AMOUNT_MAX: f64 = 0.00005;
pub const SEND_AMOUNT_DECIMALS: usize = 5;

/// Largest accepted startup delay bound, one day.
pub const MAX_START_DELAY_SECS: f64 = 86_400.0;

pub fn swap_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(SWAP_COUNT)
}

/// Whole tokens to swap.
pub fn swap_amount<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(SWAP_AMOUNT)
}

pub fn swap_direction<R: Rng + ?Sized>(rng: &mut R) -> SwapDirection {
    if rng.gen_bool(0.5) {
        SwapDirection::PingToPong
    } else {
        SwapDirection::PongToPing
    }
}

pub fn swap_pause<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(SWAP_PAUSE_MS))
}

pub fn send_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(SEND_COUNT)
}

/// Native amount as a decimal string with exactly five fractional digits.
pub fn send_amount<R: Rng + ?Sized>(rng: &mut R) -> String {
    let value = rng.gen_range(SEND_AMOUNT_MIN..=SEND_AMOUNT_MAX);
    format!("{:.*}", SEND_AMOUNT_DECIMALS, value)
}

pub fn send_pause<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(SEND_PAUSE_MS))
}

/// Uniform in `[0, max_secs]`, with the bound capped at
/// [`MAX_START_DELAY_SECS`]; zero when the bound is zero or not a number.
pub fn start_delay<R: Rng + ?Sized>(rng: &mut R, max_secs: f64) -> Duration {
    if max_secs.is_nan() || max_secs <= 0.0 {
        return Duration::ZERO;
    }
    let bound = max_secs.min(MAX_START_DELAY_SECS);
    Duration::from_secs_f64(rng.gen_range(0.0..=bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const DRAWS: usize = 2_000;

    #[test]
    fn counts_stay_in_range_and_cover_it() {
        let mut rng = StdRng::seed_from_u64(7);
        let swaps: HashSet<u32> = (0..DRAWS).map(|_| swap_count(&mut rng)).collect();
        let sends: HashSet<u32> = (0..DRAWS).map(|_| send_count(&mut rng)).collect();

        assert_eq!(swaps, HashSet::from([3, 4, 5]));
        assert_eq!(sends, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn swap_amount_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..DRAWS {
            assert!(SWAP_AMOUNT.contains(&swap_amount(&mut rng)));
        }
    }

    #[test]
    fn send_amount_has_five_decimals_in_range() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..DRAWS {
            let amount = send_amount(&mut rng);
            let (_, fraction) = amount.split_once('.').unwrap();
            assert_eq!(fraction.len(), 5, "{amount}");

            let value: f64 = amount.parse().unwrap();
            assert!((SEND_AMOUNT_MIN..=SEND_AMOUNT_MAX).contains(&value), "{amount}");
        }
    }

    #[test]
    fn pauses_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..DRAWS {
            let swap = swap_pause(&mut rng).as_millis() as u64;
            let send = send_pause(&mut rng).as_millis() as u64;
            assert!(SWAP_PAUSE_MS.contains(&swap));
            assert!(SEND_PAUSE_MS.contains(&send));
        }
    }

    #[test]
    fn start_delay_bounds() {
        let mut rng = StdRng::seed_from_u64(19);
        assert_eq!(start_delay(&mut rng, 0.0), Duration::ZERO);
        for _ in 0..DRAWS {
            assert!(start_delay(&mut rng, 60.0) <= Duration::from_secs(60));
        }
    }

    #[test]
    fn start_delay_caps_huge_bounds() {
        let mut rng = StdRng::seed_from_u64(29);
        let cap = Duration::from_secs_f64(MAX_START_DELAY_SECS);
        for _ in 0..100 {
            assert!(start_delay(&mut rng, 1e300) <= cap);
            assert!(start_delay(&mut rng, f64::INFINITY) <= cap);
        }
        assert_eq!(start_delay(&mut rng, f64::NAN), Duration::ZERO);
    }

    #[test]
    fn both_directions_occur() {
        let mut rng = StdRng::seed_from_u64(23);
        let seen: Vec<SwapDirection> = (0..DRAWS).map(|_| swap_direction(&mut rng)).collect();
        assert!(seen.contains(&SwapDirection::PingToPong));
        assert!(seen.contains(&SwapDirection::PongToPing));
    }
}
