// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed user operations.
//!
//! Each user is one document in the `users` collection, keyed by username.
//! The workout history and current plan live on the user document and are
//! updated with read-modify-write transactions.

use std::sync::Arc;

use dashmap::DashMap;
use firestore::errors::FirestoreError;
use firestore::FirestoreConsistencySelector;
use serde_json::Value;

use crate::db::collections;
use crate::error::AppError;
use crate::models::workout::push_bounded;
use crate::models::{User, WorkoutHistoryEntry};

/// Attempts for a contended read-modify-write before giving up.
const MAX_TRANSACTION_ATTEMPTS: u32 = 3;

/// Storage backend behind [`FirestoreDb`].
#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    /// Process-local documents (tests and local runs)
    Memory(Arc<DashMap<String, User>>),
    /// No storage; every call fails
    Offline,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // Emulator: unauthenticated connection, no local credentials involved
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJneW1icm8ifQ."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create an in-process store with no external dependencies.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline_error() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by username.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(username)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(users) => Ok(users.get(username).map(|u| u.value().clone())),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Create a new user; fails with `Conflict` if the username is taken.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let taken = || AppError::Conflict(format!("Username '{}' already exists", user.username));

        match &self.backend {
            Backend::Firestore(client) => {
                let result: Result<User, FirestoreError> = client
                    .fluent()
                    .insert()
                    .into(collections::USERS)
                    .document_id(&user.username)
                    .object(user)
                    .execute()
                    .await;

                match result {
                    Ok(_) => Ok(()),
                    Err(FirestoreError::DataConflictError(_)) => Err(taken()),
                    Err(e) => Err(AppError::Database(e.to_string())),
                }
            }
            Backend::Memory(users) => match users.entry(user.username.clone()) {
                dashmap::mapref::entry::Entry::Occupied(_) => Err(taken()),
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(user.clone());
                    Ok(())
                }
            },
            Backend::Offline => Err(Self::offline_error()),
        }?;

        tracing::info!(username = %user.username, "Created user");
        Ok(())
    }

    /// Create or replace a user document.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&user.username)
                    .object(user)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(users) => {
                users.insert(user.username.clone(), user.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Append a workout to the user's history, keeping the newest entries.
    ///
    /// Returns the updated user; history is kept oldest first.
    pub async fn append_workout_history(
        &self,
        username: &str,
        entry: WorkoutHistoryEntry,
    ) -> Result<User, AppError> {
        let user = self
            .update_user(username, move |user| {
                push_bounded(&mut user.workout_history, entry.clone())
            })
            .await?;

        tracing::info!(
            username,
            history_len = user.workout_history.len(),
            "Workout history updated"
        );
        Ok(user)
    }

    /// Store the most recently generated workout plan.
    pub async fn set_current_workout_plan(
        &self,
        username: &str,
        plan: Value,
    ) -> Result<(), AppError> {
        self.update_user(username, move |user| {
            user.current_workout_plan = Some(plan.clone());
        })
        .await?;
        Ok(())
    }

    /// Read a user, apply `update`, and write it back atomically.
    ///
    /// Fails with `NotFound` if the user does not exist. Returns the user as
    /// written. Concurrent updates of one user are serialized; a transaction
    /// that loses a conflict is re-run on fresh data, so `update` may be
    /// called more than once.
    pub async fn update_user<F>(&self, username: &str, mut update: F) -> Result<User, AppError>
    where
        F: FnMut(&mut User),
    {
        let not_found = || AppError::NotFound(format!("User '{}' not found", username));

        match &self.backend {
            Backend::Firestore(client) => {
                let mut attempt = 1;
                loop {
                    match Self::update_in_transaction(client, username, &mut update).await {
                        Ok(Some(user)) => return Ok(user),
                        Ok(None) => return Err(not_found()),
                        Err(e) if attempt < MAX_TRANSACTION_ATTEMPTS => {
                            tracing::warn!(
                                username,
                                attempt,
                                error = %e,
                                "User update transaction failed, retrying"
                            );
                            attempt += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            Backend::Memory(users) => {
                // The entry guard holds the shard lock for the whole update
                let mut user = users.get_mut(username).ok_or_else(not_found)?;
                update(user.value_mut());
                Ok(user.value().clone())
            }
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// One read-modify-write attempt; `Ok(None)` if the user does not exist.
    async fn update_in_transaction<F>(
        client: &firestore::FirestoreDb,
        username: &str,
        update: &mut F,
    ) -> Result<Option<User>, AppError>
    where
        F: FnMut(&mut User),
    {
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Transactional read: the document stays locked until commit
        let reader = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );
        let current: Option<User> = match reader
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(username)
            .await
        {
            Ok(current) => current,
            Err(e) => {
                let _ = transaction.rollback().await;
                return Err(AppError::Database(format!(
                    "Failed to read user in transaction: {}",
                    e
                )));
            }
        };

        let Some(mut user) = current else {
            let _ = transaction.rollback().await;
            return Ok(None);
        };

        update(&mut user);

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(username)
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(Some(user))
    }
}
