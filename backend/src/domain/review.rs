//! Review entity, sub-rating validation, and the optimistic like toggle.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors raised when building a review.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewValidationError {
    EmptyDescription,
    /// A sub-rating outside `(0, 5]`. Zero means "not rated" and is rejected.
    RatingOutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "review description must not be empty"),
            Self::RatingOutOfRange { field, value } => {
                write!(f, "{field} rating must be within (0, 5], got {value}")
            }
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// A single sub-rating in `(0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RatingScore(f32);

impl RatingScore {
    /// Validate and construct a score. Zero is "not rated" and is rejected.
    pub fn new(field: &'static str, value: f32) -> Result<Self, ReviewValidationError> {
        if !value.is_finite() || value <= 0.0 || value > 5.0 {
            return Err(ReviewValidationError::RatingOutOfRange { field, value });
        }
        Ok(Self(value))
    }

    /// The raw score value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// The three review dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubRatings {
    pub food: RatingScore,
    pub service: RatingScore,
    pub ambiance: RatingScore,
}

impl SubRatings {
    /// Validate and construct the rating triple.
    pub fn new(food: f32, service: f32, ambiance: f32) -> Result<Self, ReviewValidationError> {
        Ok(Self {
            food: RatingScore::new("food", food)?,
            service: RatingScore::new("service", service)?,
            ambiance: RatingScore::new("ambiance", ambiance)?,
        })
    }

    /// Arithmetic mean of the three dimensions.
    pub fn average(&self) -> f32 {
        (self.food.value() + self.service.value() + self.ambiance.value()) / 3.0
    }
}

/// Validated input for a new review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub restaurant_id: Uuid,
    pub author: UserId,
    pub description: String,
    pub ratings: SubRatings,
    pub photo_urls: Vec<String>,
    pub video_url: Option<String>,
}

impl ReviewDraft {
    /// Validate draft inputs. The description is trimmed and must be
    /// non-empty; media URLs are carried as provided.
    pub fn new(
        restaurant_id: Uuid,
        author: UserId,
        description: &str,
        ratings: SubRatings,
        photo_urls: Vec<String>,
        video_url: Option<String>,
    ) -> Result<Self, ReviewValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ReviewValidationError::EmptyDescription);
        }
        Ok(Self {
            restaurant_id,
            author,
            description: description.to_owned(),
            ratings,
            photo_urls,
            video_url,
        })
    }
}

/// A persisted review.
///
/// ## Invariants
/// - `average_rating` is the mean of the three sub-ratings, computed once at
///   creation and never recomputed.
/// - `likes` is derived from the liker set at read time; a freshly created
///   review has zero.
/// - Immutable after creation except for the liker set.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub author: UserId,
    pub description: String,
    pub ratings: SubRatings,
    pub average_rating: f32,
    pub likes: i64,
    pub photo_urls: Vec<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Materialize a draft into a new review with a fresh identity.
    pub fn create(draft: ReviewDraft, created_at: DateTime<Utc>) -> Self {
        let average_rating = draft.ratings.average();
        Self {
            id: Uuid::new_v4(),
            restaurant_id: draft.restaurant_id,
            author: draft.author,
            description: draft.description,
            ratings: draft.ratings,
            average_rating,
            likes: 0,
            photo_urls: draft.photo_urls,
            video_url: draft.video_url,
            created_at,
        }
    }
}

/// Authoritative like state of a review for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub count: i64,
}

impl LikeState {
    /// The state a toggle is expected to produce, before the store answers.
    pub fn toggled(self) -> Self {
        Self {
            liked: !self.liked,
            count: if self.liked {
                self.count.saturating_sub(1)
            } else {
                self.count.saturating_add(1)
            },
        }
    }
}

/// Two-phase optimistic like toggle.
///
/// Phase one flips the local state synchronously so the interface stays
/// responsive; phase two replaces it with the store's authoritative answer,
/// or rolls back to the pre-toggle state when the store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticLike {
    speculative: LikeState,
    rollback: LikeState,
}

impl OptimisticLike {
    /// Begin a toggle from the currently displayed state.
    pub fn begin(current: LikeState) -> Self {
        Self {
            speculative: current.toggled(),
            rollback: current,
        }
    }

    /// The state to display while the store call is in flight.
    pub fn speculative(&self) -> LikeState {
        self.speculative
    }

    /// Resolve with the authoritative outcome: `Some` replaces the guess,
    /// `None` (failure) restores the pre-toggle state.
    pub fn reconcile(self, authoritative: Option<LikeState>) -> LikeState {
        authoritative.unwrap_or(self.rollback)
    }
}

/// Outcome of a like toggle as reported to callers.
///
/// `success == false` leaves `liked`/`like_count` zeroed, mirroring a failed
/// or missing-review toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggleOutcome {
    pub success: bool,
    pub liked: bool,
    pub like_count: i64,
}

impl LikeToggleOutcome {
    /// A failed toggle.
    pub fn failure() -> Self {
        Self {
            success: false,
            liked: false,
            like_count: 0,
        }
    }

    /// A successful toggle with the authoritative state.
    pub fn from_state(state: LikeState) -> Self {
        Self {
            success: true,
            liked: state.liked,
            like_count: state.count,
        }
    }

    /// The authoritative state, when the toggle succeeded.
    pub fn state(&self) -> Option<LikeState> {
        self.success.then_some(LikeState {
            liked: self.liked,
            count: self.like_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ratings(food: f32, service: f32, ambiance: f32) -> SubRatings {
        SubRatings::new(food, service, ambiance).expect("valid ratings")
    }

    #[test]
    fn average_is_the_mean_of_the_three_dimensions() {
        assert!((ratings(4.0, 5.0, 3.0).average() - 4.0).abs() < f32::EPSILON);
    }

    #[rstest]
    #[case(0.0, 5.0, 5.0)]
    #[case(5.0, -1.0, 5.0)]
    #[case(5.0, 5.0, 5.1)]
    #[case(f32::NAN, 5.0, 5.0)]
    fn out_of_range_ratings_are_rejected(
        #[case] food: f32,
        #[case] service: f32,
        #[case] ambiance: f32,
    ) {
        assert!(matches!(
            SubRatings::new(food, service, ambiance),
            Err(ReviewValidationError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn draft_rejects_blank_description() {
        let err = ReviewDraft::new(
            Uuid::new_v4(),
            UserId::random(),
            "   ",
            ratings(4.0, 4.0, 4.0),
            Vec::new(),
            None,
        )
        .expect_err("blank description");
        assert_eq!(err, ReviewValidationError::EmptyDescription);
    }

    #[test]
    fn created_review_computes_average_once_and_starts_unliked() {
        let draft = ReviewDraft::new(
            Uuid::new_v4(),
            UserId::random(),
            "  Great noodles.  ",
            ratings(4.0, 5.0, 3.0),
            vec!["https://cdn.example/p1.jpg".to_owned()],
            None,
        )
        .expect("valid draft");
        let review = Review::create(draft, Utc::now());
        assert_eq!(review.description, "Great noodles.");
        assert!((review.average_rating - 4.0).abs() < f32::EPSILON);
        assert_eq!(review.likes, 0);
    }

    #[test]
    fn optimistic_toggle_speculates_and_confirms() {
        let toggle = OptimisticLike::begin(LikeState {
            liked: false,
            count: 5,
        });
        assert_eq!(
            toggle.speculative(),
            LikeState {
                liked: true,
                count: 6
            }
        );
        let authoritative = LikeState {
            liked: true,
            count: 6,
        };
        assert_eq!(toggle.reconcile(Some(authoritative)), authoritative);
    }

    #[test]
    fn optimistic_toggle_rolls_back_on_failure() {
        let before = LikeState {
            liked: true,
            count: 3,
        };
        let toggle = OptimisticLike::begin(before);
        assert_eq!(
            toggle.speculative(),
            LikeState {
                liked: false,
                count: 2
            }
        );
        assert_eq!(toggle.reconcile(None), before);
    }

    #[test]
    fn toggling_twice_returns_to_the_original_state() {
        let start = LikeState {
            liked: false,
            count: 5,
        };
        assert_eq!(start.toggled().toggled(), start);
    }
}
