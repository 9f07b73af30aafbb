//! Gamified level/XP progression derived from a user's review count.
//!
//! The engine is a pure function: the level is never persisted, so the
//! stored profile and the displayed level cannot drift apart. Thresholds are
//! inclusive lower bounds; reaching a threshold exactly means the tier has
//! just been entered.

/// Experience points awarded per submitted review.
pub const XP_PER_REVIEW: u64 = 10;

/// A single tier of the fixed progression ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTier {
    /// Tier number, 1-based.
    pub level: u8,
    /// Inclusive cumulative-XP threshold for entering this tier.
    pub required_xp: u64,
    /// Display label.
    pub label: &'static str,
    /// Badge asset name.
    pub icon: &'static str,
}

/// The fixed five-tier ladder.
pub const LEVEL_TABLE: [LevelTier; 5] = [
    LevelTier {
        level: 1,
        required_xp: 0,
        label: "Level 1",
        icon: "bronze",
    },
    LevelTier {
        level: 2,
        required_xp: 10,
        label: "Level 2",
        icon: "silver",
    },
    LevelTier {
        level: 3,
        required_xp: 50,
        label: "Level 3",
        icon: "gold",
    },
    LevelTier {
        level: 4,
        required_xp: 100,
        label: "Level 4",
        icon: "purple",
    },
    LevelTier {
        level: 5,
        required_xp: 1000,
        label: "Level 5",
        icon: "red",
    },
];

/// Derived progression state for a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    /// Current tier, in `[1, 5]`.
    pub level: u8,
    /// Cumulative experience points.
    pub current_xp: u64,
    /// XP still needed to enter the next tier; `0` at the maximum tier.
    pub xp_to_next_level: u64,
    /// Position between the current and next tier thresholds, in `[0, 100]`;
    /// fixed at `100` at the maximum tier.
    pub progress_percentage: f32,
}

impl Progression {
    /// Derive the progression state from a cumulative review count.
    ///
    /// Negative counts are treated as zero. The result is deterministic:
    /// equal counts always yield equal states.
    pub fn for_review_count(review_count: i64) -> Self {
        let reviews = u64::try_from(review_count).unwrap_or(0);
        let current_xp = reviews.saturating_mul(XP_PER_REVIEW);

        let tier = LEVEL_TABLE
            .iter()
            .rev()
            .find(|tier| current_xp >= tier.required_xp)
            .unwrap_or(&LEVEL_TABLE[0]);
        let next = LEVEL_TABLE.iter().find(|t| t.level > tier.level);

        match next {
            Some(next_tier) => {
                let span = next_tier.required_xp - tier.required_xp;
                let into = current_xp - tier.required_xp;
                #[allow(clippy::cast_precision_loss)]
                let percentage = (into as f32 / span as f32 * 100.0).clamp(0.0, 100.0);
                Self {
                    level: tier.level,
                    current_xp,
                    xp_to_next_level: next_tier.required_xp.saturating_sub(current_xp),
                    progress_percentage: percentage,
                }
            }
            None => Self {
                level: tier.level,
                current_xp,
                xp_to_next_level: 0,
                progress_percentage: 100.0,
            },
        }
    }

    /// The static tier ladder, for display alongside the derived state.
    pub fn tiers() -> &'static [LevelTier] {
        &LEVEL_TABLE
    }

    /// True when no further tier exists.
    pub fn at_max_level(&self) -> bool {
        self.xp_to_next_level == 0 && self.level == LEVEL_TABLE[LEVEL_TABLE.len() - 1].level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn zero_reviews_is_the_floor() {
        let p = Progression::for_review_count(0);
        assert_eq!(p.level, 1);
        assert_eq!(p.current_xp, 0);
        assert_eq!(p.xp_to_next_level, 10);
        assert!((p.progress_percentage - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn first_review_enters_level_two_exactly_at_threshold() {
        let p = Progression::for_review_count(1);
        assert_eq!(p.level, 2);
        assert_eq!(p.current_xp, 10);
        assert_eq!(p.xp_to_next_level, 40);
        // Just entered the tier: no progress towards the next one yet.
        assert!((p.progress_percentage - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hundred_reviews_caps_the_ladder() {
        let p = Progression::for_review_count(100);
        assert_eq!(p.level, 5);
        assert_eq!(p.current_xp, 1000);
        assert_eq!(p.xp_to_next_level, 0);
        assert!((p.progress_percentage - 100.0).abs() < f32::EPSILON);
        assert!(p.at_max_level());
    }

    #[rstest]
    #[case(-5, 1, 0)]
    #[case(2, 2, 20)]
    #[case(4, 2, 40)]
    #[case(5, 3, 50)]
    #[case(9, 3, 90)]
    #[case(10, 4, 100)]
    #[case(99, 4, 990)]
    #[case(250, 5, 2500)]
    fn levels_follow_inclusive_thresholds(
        #[case] reviews: i64,
        #[case] level: u8,
        #[case] xp: u64,
    ) {
        let p = Progression::for_review_count(reviews);
        assert_eq!(p.level, level);
        assert_eq!(p.current_xp, xp);
    }

    #[test]
    fn progress_interpolates_between_thresholds() {
        // 3 reviews = 30 XP, halfway between the 10 XP and 50 XP thresholds.
        let p = Progression::for_review_count(3);
        assert_eq!(p.level, 2);
        assert!((p.progress_percentage - 50.0).abs() < 0.001);
        assert_eq!(p.xp_to_next_level, 20);
    }

    #[test]
    fn level_is_monotonic_in_review_count() {
        let mut previous = 0;
        for reviews in 0..=150 {
            let level = Progression::for_review_count(reviews).level;
            assert!(level >= previous, "level dropped at {reviews} reviews");
            previous = level;
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(
            Progression::for_review_count(42),
            Progression::for_review_count(42)
        );
    }

    #[test]
    fn ladder_exposes_five_tiers() {
        let tiers = Progression::tiers();
        assert_eq!(tiers.len(), 5);
        assert!(tiers.windows(2).all(|w| w[0].required_xp < w[1].required_xp));
    }
}
