//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by username)
    pub const USERS: &str = "users";
}
