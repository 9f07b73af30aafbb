//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; `diesel
//! print-schema` can regenerate them from a live database.

diesel::table! {
    /// Registered user profiles. The gamification level is intentionally
    /// absent: it is derived from `review_count` on every read.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        display_name -> Varchar,
        handle -> Varchar,
        review_count -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Password hashes for email/password accounts. Federated accounts have
    /// no row here.
    credentials (user_id) {
        user_id -> Uuid,
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Restaurant catalogue. Aggregates are maintained externally.
    restaurants (id) {
        id -> Uuid,
        name -> Varchar,
        address -> Varchar,
        categories -> Array<Text>,
        latitude -> Float8,
        longitude -> Float8,
        rating -> Float4,
        review_count -> Int8,
        image_path -> Varchar,
        opening_hours -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reviews. Immutable after creation except through `review_likes`.
    reviews (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        user_id -> Uuid,
        description -> Text,
        food_rating -> Float4,
        service_rating -> Float4,
        ambiance_rating -> Float4,
        average_rating -> Float4,
        photo_urls -> Array<Text>,
        video_url -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// The liker set. Like counts are derived from this table.
    review_likes (review_id, user_id) {
        review_id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Place lists; `owner_id` is unique so each user has at most one.
    place_lists (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        notes -> Text,
        is_public -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Place-list membership set.
    place_list_restaurants (place_list_id, restaurant_id) {
        place_list_id -> Uuid,
        restaurant_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(credentials -> users (user_id));
diesel::joinable!(reviews -> restaurants (restaurant_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(review_likes -> reviews (review_id));
diesel::joinable!(review_likes -> users (user_id));
diesel::joinable!(place_lists -> users (owner_id));
diesel::joinable!(place_list_restaurants -> place_lists (place_list_id));
diesel::joinable!(place_list_restaurants -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    credentials,
    restaurants,
    reviews,
    review_likes,
    place_lists,
    place_list_restaurants,
);
