use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::constants::{uniform_range, HOME_WIN_SHARE, UNIFORM_BITS};
use crate::errors::{SimulationError, SimulationResult};
use crate::point_system::{Outcome, PointSystem};

/// Probability that an undecided game ends without a regulation winner.
///
/// Kept as an exact decimal. Draws are 53-bit integers `k`, and `k / 2^53 < p`
/// is decided by comparing `k` with `ceil(p * 2^53)`, so no binary rounding
/// of `p` ever happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TieProbability {
    value: BigDecimal,
    threshold: u64,
}

impl TieProbability {
    pub fn new(value: BigDecimal) -> SimulationResult<Self> {
        if value < BigDecimal::from(0) || value > BigDecimal::from(1) {
            return Err(SimulationError::InvalidProbability(value.to_string()));
        }
        let scaled = (value.clone() * BigDecimal::from(uniform_range()))
            .with_scale_round(0, RoundingMode::Ceiling);
        let threshold = scaled
            .to_u64()
            .ok_or_else(|| SimulationError::InvalidProbability(value.to_string()))?;
        Ok(TieProbability { value, threshold })
    }

    pub fn zero() -> Self {
        TieProbability {
            value: BigDecimal::from(0),
            threshold: 0,
        }
    }

    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// Number of 53-bit draws (out of 2^53) that count as a tie.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Whether the draw `k` in `[0, 2^53)` falls under the probability.
    pub fn covers(&self, draw: u64) -> bool {
        draw < self.threshold
    }
}

impl FromStr for TieProbability {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|_| SimulationError::InvalidProbability(s.to_string()))?;
        TieProbability::new(value)
    }
}

impl fmt::Display for TieProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Uniform integer in `[0, 2^53)`.
fn uniform_draw<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen::<u64>() >> (64 - UNIFORM_BITS)
}

/// Draws random outcomes for unplayed fixtures.
#[derive(Clone, Debug)]
pub struct OutcomeSampler {
    system: PointSystem,
    tie_probability: TieProbability,
}

impl OutcomeSampler {
    pub fn new(system: PointSystem, tie_probability: TieProbability) -> Self {
        OutcomeSampler {
            system,
            tie_probability,
        }
    }

    pub fn system(&self) -> PointSystem {
        self.system
    }

    pub fn tie_probability(&self) -> &TieProbability {
        &self.tie_probability
    }

    /// Sample one outcome. First draw decides tie-class vs regulation,
    /// second draw picks the side.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let tie_class = self.tie_probability.covers(uniform_draw(rng));
        let home_side = rng.gen::<f64>() < HOME_WIN_SHARE;

        if tie_class {
            self.system.tie_outcome(home_side)
        } else if home_side {
            Outcome::HomeWin
        } else {
            Outcome::AwayWin
        }
    }
}
