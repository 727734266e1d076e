//! Daily deck selection.
//!
//! Phrases are split into three pools by mastery, each pool is shuffled with a
//! generator seeded from the day and the configured seed, and the pools are
//! concatenated unseen -> learning -> known up to the daily target.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::settings::clamp_daily_n;
use crate::types::Mastery;

/// A phrase eligible for today's deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCandidate<Id> {
    pub id: Id,
    pub mastery: Mastery,
}

/// Derive the generator seed for a day from `"{date}:{seed}"`.
pub fn seed_for_day(date: NaiveDate, seed: &str) -> u64 {
    let digest = Sha256::digest(format!("{}:{}", date.format("%Y-%m-%d"), seed).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Select the ordered phrase ids for a day's deck.
///
/// The result holds `min(clamp(daily_n), candidates.len())` ids. Candidate
/// order does not matter: pools are sorted by id before shuffling.
pub fn select_deck<Id>(
    candidates: &[DeckCandidate<Id>],
    date: NaiveDate,
    seed: &str,
    daily_n: u32,
) -> Vec<Id>
where
    Id: Ord + Clone,
{
    let mut pools: [Vec<Id>; 3] = Default::default();
    for candidate in candidates {
        let pool = match candidate.mastery {
            Mastery::Unseen => 0,
            Mastery::Learning => 1,
            Mastery::Known => 2,
        };
        pools[pool].push(candidate.id.clone());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_for_day(date, seed));
    for pool in pools.iter_mut() {
        pool.sort();
        pool.shuffle(&mut rng);
    }

    let target = clamp_daily_n(daily_n as i64) as usize;
    pools.into_iter().flatten().take(target).collect()
}
