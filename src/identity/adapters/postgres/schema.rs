//! Diesel schema for identity persistence.

diesel::table! {
    /// User accounts with credential digests.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Unique account name.
        #[max_length = 150]
        username -> Varchar,
        /// Unique email address.
        #[max_length = 254]
        email -> Varchar,
        /// SHA-256 digest of the account credential.
        #[max_length = 64]
        password_digest -> Varchar,
        /// Whether the account may authenticate.
        is_active -> Bool,
    }
}

diesel::table! {
    /// One-to-one profile records.
    profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Owning user identifier (unique).
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last bookkeeping timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, profiles);
