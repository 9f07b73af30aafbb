//! Domain entities, validation, and use-case services.
//!
//! Types here are transport and storage agnostic. Inbound adapters parse
//! requests into these types; outbound adapters implement the port traits in
//! [`ports`]. Invariants and serialisation contracts are documented on each
//! type.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod events;
pub mod place_list;
pub mod place_list_service;
pub mod ports;
pub mod progression;
pub mod restaurant;
pub mod review;
pub mod review_service;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{AuthValidationError, LoginCredentials, SignupDetails, PASSWORD_MIN};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::events::{IdentityEvent, IdentityEvents};
pub use self::place_list::PlaceList;
pub use self::place_list_service::PlaceListService;
pub use self::progression::{LevelTier, Progression, LEVEL_TABLE, XP_PER_REVIEW};
pub use self::restaurant::Restaurant;
pub use self::review::{
    LikeState, LikeToggleOutcome, OptimisticLike, RatingScore, Review, ReviewDraft,
    ReviewValidationError, SubRatings,
};
pub use self::review_service::ReviewService;
pub use self::user::{
    DisplayName, EmailAddress, Handle, ProfileUpdate, User, UserId, UserValidationError,
};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
