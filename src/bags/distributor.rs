//! Dealing, passing and reshuffling bags.
//!
//! ## Deal
//!
//! At the start of every round each seat receives a fresh bag of exactly
//! `tokens_per_bag` tokens. Each bag's species mix is generated from a seed
//! derived from (bag id, bag index, game id, salt):
//!
//! 1. balanced base quota with the remainder rotated by bag index
//! 2. seeded jitter of -1/0/+1 per species, clamped to `0..=tokens_per_bag`
//! 3. single-unit corrections until the bag sums to `tokens_per_bag`
//! 4. if the species signature repeats an earlier bag of the deal, a bounded
//!    number of seeded one-unit swaps between species
//!
//! Uniqueness is best effort: after the retry budget a duplicate signature is
//! accepted. Bag sizes are always exact.
//!
//! ## Rotation
//!
//! When a cycle completes, remaining tokens move between seats, either by
//! passing each hand along the rotation direction or by pooling and
//! re-dealing every unplayed token. A rotation either completes or leaves
//! the snapshot untouched and returns an error.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::config::{RotationMode, RulesConfig};
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::core::seat::SeatId;
use crate::core::species::{Species, SpeciesCounts};
use crate::core::state::{Bag, GameSnapshot, Token};

/// Canonical species→count signature of a bag.
pub type Signature = SpeciesCounts;

/// Summary of a deal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealReport {
    /// Bags whose signature still repeats an earlier bag after all retries.
    pub duplicate_signatures: usize,
}

/// Deals and redistributes tokens.
pub struct BagDistributor<'a> {
    config: &'a RulesConfig,
}

impl<'a> BagDistributor<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig) -> Self {
        Self { config }
    }

    /// Replace every bag with a freshly dealt one, one per seat.
    pub fn deal(&self, snapshot: &mut GameSnapshot) -> DealReport {
        let game_id = snapshot.game.id;
        let salt = snapshot.game.seed_salt;
        let mut used: FxHashSet<Signature> = FxHashSet::default();
        let mut report = DealReport::default();
        let mut bags = Vec::with_capacity(snapshot.seat_count());

        for (index, seat) in SeatId::all(snapshot.seat_count()).enumerate() {
            let bag_id = snapshot.ids.next_bag();
            let mut rng = GameRng::for_bag(game_id, bag_id, index, salt);

            let (quota, unique) = bag_quota(
                &mut rng,
                self.config.tokens_per_bag,
                index,
                &used,
                self.config.uniqueness_retries,
            );
            if !unique {
                report.duplicate_signatures += 1;
                debug!(game = %game_id, bag = %bag_id, "bag signature repeats an earlier bag");
            }
            used.insert(quota);

            let mut species = expand(&quota);
            rng.shuffle(&mut species);

            let tokens = species
                .into_iter()
                .map(|s| Token::new(snapshot.ids.next_token(), s))
                .collect();

            bags.push(Bag {
                id: bag_id,
                owner: seat,
                tokens,
            });
        }

        snapshot.bags = bags;
        report
    }

    /// Redistribute remaining tokens according to the configured mode.
    pub fn rotate(&self, snapshot: &mut GameSnapshot) -> Result<(), EngineError> {
        match self.config.rotation_mode {
            RotationMode::Pass => Self::pass_hands(snapshot),
            RotationMode::Reshuffle => Self::reshuffle(snapshot),
        }
    }

    /// Move every bag to the next seat along the game's rotation direction.
    pub fn pass_hands(snapshot: &mut GameSnapshot) -> Result<(), EngineError> {
        let seat_count = snapshot.seat_count();
        let direction = snapshot.game.direction;
        ensure_one_bag_per_seat(&snapshot.bags, seat_count)?;

        let mut bags = snapshot.bags.clone();
        for bag in &mut bags {
            bag.owner = bag.owner.pass_target(seat_count, direction);
        }
        bags.sort_by_key(|b| b.owner);

        ensure_one_bag_per_seat(&bags, seat_count)?;

        snapshot.bags = bags;
        debug!(
            game = %snapshot.game.id,
            ?direction,
            tokens = snapshot.unplayed_total(),
            "hands passed"
        );
        Ok(())
    }

    /// Pool every unplayed token and deal them back out round-robin.
    pub fn reshuffle(snapshot: &mut GameSnapshot) -> Result<(), EngineError> {
        ensure_one_bag_per_seat(&snapshot.bags, snapshot.seat_count())?;
        let game = &snapshot.game;
        let mut rng = GameRng::for_reshuffle(game.id, game.round, game.turn, game.seed_salt);

        let mut bags = snapshot.bags.clone();
        bags.sort_by_key(|b| b.owner);
        let mut pool: Vec<Token> = bags.iter_mut().flat_map(|b| b.tokens.drain(..)).collect();
        let total = pool.len();
        rng.shuffle(&mut pool);

        let seat_count = bags.len();
        for (i, token) in pool.into_iter().enumerate() {
            bags[i % seat_count].tokens.push(token);
        }

        snapshot.bags = bags;
        debug!(game = %snapshot.game.id, tokens = total, "bags reshuffled");
        Ok(())
    }
}

/// Species quota for one bag, plus whether its signature is unique in `used`.
pub fn bag_quota(
    rng: &mut GameRng,
    tokens_per_bag: usize,
    index: usize,
    used: &FxHashSet<Signature>,
    retries: u32,
) -> (Signature, bool) {
    let species_count = Species::COUNT;
    let base = tokens_per_bag / species_count;
    let remainder = tokens_per_bag % species_count;
    let max = tokens_per_bag as i64;

    let mut quota = [0i64; Species::COUNT];
    for (s, q) in quota.iter_mut().enumerate() {
        let rotated = (s + species_count - index % species_count) % species_count;
        let extra = usize::from(rotated < remainder);
        let jitter = i64::from(rng.gen_range_i32(-1..=1));
        *q = ((base + extra) as i64 + jitter).clamp(0, max);
    }

    let mut total: i64 = quota.iter().sum();
    while total > max {
        let candidates: Vec<usize> = (0..species_count).filter(|&s| quota[s] > 0).collect();
        if let Some(&s) = rng.choose(&candidates) {
            quota[s] -= 1;
            total -= 1;
        }
    }
    while total < max {
        let candidates: Vec<usize> = (0..species_count).filter(|&s| quota[s] < max).collect();
        if let Some(&s) = rng.choose(&candidates) {
            quota[s] += 1;
            total += 1;
        }
    }

    let mut signature = to_signature(&quota);
    let mut attempts = 0;
    while used.contains(&signature) && attempts < retries && tokens_per_bag > 0 {
        attempts += 1;
        let donors: Vec<usize> = (0..species_count).filter(|&s| quota[s] > 0).collect();
        let Some(&from) = rng.choose(&donors) else {
            break;
        };
        let receivers: Vec<usize> = (0..species_count).filter(|&s| s != from).collect();
        let Some(&to) = rng.choose(&receivers) else {
            break;
        };
        quota[from] -= 1;
        quota[to] += 1;
        signature = to_signature(&quota);
    }

    let unique = !used.contains(&signature);
    (signature, unique)
}

fn to_signature(quota: &[i64; Species::COUNT]) -> Signature {
    let mut signature = [0u32; Species::COUNT];
    for (out, &q) in signature.iter_mut().zip(quota) {
        *out = q as u32;
    }
    signature
}

/// Expand a quota into a flat species list in canonical order.
fn expand(quota: &Signature) -> Vec<Species> {
    Species::ALL
        .iter()
        .flat_map(|&s| std::iter::repeat(s).take(quota[s.index()] as usize))
        .collect()
}

fn ensure_one_bag_per_seat(bags: &[Bag], seat_count: usize) -> Result<(), EngineError> {
    let mut owners: Vec<SeatId> = bags.iter().map(|b| b.owner).collect();
    owners.sort();
    let expected: Vec<SeatId> = SeatId::all(seat_count).collect();
    if owners == expected {
        Ok(())
    } else {
        Err(EngineError::Distribution(format!(
            "expected one bag per seat, found owners {owners:?}"
        )))
    }
}
