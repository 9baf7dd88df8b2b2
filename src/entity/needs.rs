//! Bounded needs that drive agent behavior
//!
//! A need is a scalar in [0, 1] where 1.0 is fully satisfied and 0.0 is
//! critical. Needs are stored as a fixed-size vector indexed by [`NeedType`];
//! action costs and passive decay are vectors of the same shape.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut};

/// Number of need kinds
pub const NEED_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedType {
    Bladder,
    Food,
    Sleep,
    Mood,
}

impl NeedType {
    pub const ALL: [NeedType; NEED_COUNT] = [
        NeedType::Bladder,
        NeedType::Food,
        NeedType::Sleep,
        NeedType::Mood,
    ];

    pub fn index(&self) -> usize {
        match self {
            NeedType::Bladder => 0,
            NeedType::Food => 1,
            NeedType::Sleep => 2,
            NeedType::Mood => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NeedType::Bladder => "bladder",
            NeedType::Food => "food",
            NeedType::Sleep => "sleep",
            NeedType::Mood => "mood",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bladder" => Some(NeedType::Bladder),
            "food" => Some(NeedType::Food),
            "sleep" => Some(NeedType::Sleep),
            "mood" => Some(NeedType::Mood),
            _ => None,
        }
    }
}

/// Saturate a value to the need range
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// One signed value per need kind
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NeedVector(pub [f32; NEED_COUNT]);

impl NeedVector {
    pub fn zero() -> Self {
        Self([0.0; NEED_COUNT])
    }

    pub fn splat(value: f32) -> Self {
        Self([value; NEED_COUNT])
    }

    /// Build a vector from (need, value) pairs; unnamed needs are zero
    pub fn from_pairs(pairs: &[(NeedType, f32)]) -> Self {
        let mut v = Self::zero();
        for &(need, value) in pairs {
            v[need] = value;
        }
        v
    }

    pub fn iter(&self) -> impl Iterator<Item = (NeedType, f32)> + '_ {
        NeedType::ALL.iter().map(move |&n| (n, self[n]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }
}

impl Index<NeedType> for NeedVector {
    type Output = f32;
    fn index(&self, need: NeedType) -> &f32 {
        &self.0[need.index()]
    }
}

impl IndexMut<NeedType> for NeedVector {
    fn index_mut(&mut self, need: NeedType) -> &mut f32 {
        &mut self.0[need.index()]
    }
}

impl Add for NeedVector {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for NeedVector {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl std::iter::Sum for NeedVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NeedVector::zero(), |acc, v| acc + v)
    }
}

/// An agent's current need levels, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs(NeedVector);

impl Default for Needs {
    fn default() -> Self {
        Self::satisfied()
    }
}

impl Needs {
    /// Every need fully satisfied
    pub fn satisfied() -> Self {
        Self(NeedVector::splat(1.0))
    }

    pub fn get(&self, need: NeedType) -> f32 {
        self.0[need]
    }

    /// Set a need level, saturating to [0, 1]
    pub fn set(&mut self, need: NeedType, value: f32) {
        self.0[need] = clamp_unit(value);
    }

    /// Add a signed delta to every need and saturate
    ///
    /// Passive decay and action costs both go through here.
    pub fn apply(&mut self, delta: &NeedVector) {
        for need in NeedType::ALL {
            self.0[need] = clamp_unit(self.0[need] + delta[need]);
        }
    }

    pub fn as_vector(&self) -> &NeedVector {
        &self.0
    }

    /// Lowest need and its level
    pub fn most_pressing(&self) -> (NeedType, f32) {
        let mut lowest = (NeedType::Bladder, self.get(NeedType::Bladder));
        for (need, level) in self.0.iter() {
            if level < lowest.1 {
                lowest = (need, level);
            }
        }
        lowest
    }
}
