//! Mock authentication and profile service.
//!
//! Authentication is intentionally shallow: any credentials are accepted,
//! there are no password hashes and no tokens. What this service does own
//! is account hydration - on login the customer's persisted orders,
//! notifications, and language preference are loaded from the store into
//! the in-memory account, and profile edits are persisted back.

use dabeeha_core::{Email, Language, UserId};

use crate::error::{AppError, Result};
use crate::models::{Notification, Order, User};
use crate::state::{Account, AppState};
use crate::store::keys;

/// Store key mapping an email to its user id.
fn email_index(email: &Email) -> String {
    format!("email:{email}")
}

/// Service for login, registration, and profile management.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Register a new customer.
    ///
    /// An email that is already registered simply logs in as that
    /// customer; credentials are not checked in this mocked flow.
    ///
    /// # Errors
    ///
    /// Returns a store error if persistence fails.
    pub async fn register(&self, name: &str, email: Email) -> Result<User> {
        if let Some(existing) = self.lookup(&email).await? {
            return self.hydrate(existing).await;
        }

        let user = User::new(name, email.clone());
        self.state.store().put(&keys::user(&user.id), &user).await?;
        self.state
            .store()
            .put(&email_index(&email), &user.id)
            .await?;

        self.state
            .insert_account(user.id.clone(), Account::new(user.clone()))
            .await;
        tracing::info!(user_id = %user.id, "customer registered");
        Ok(user)
    }

    /// Log a customer in by email, creating the account if it is new.
    ///
    /// # Errors
    ///
    /// Returns a store error if persistence fails.
    pub async fn login(&self, email: Email) -> Result<User> {
        match self.lookup(&email).await? {
            Some(user) => self.hydrate(user).await,
            // Mocked auth: an unknown email becomes a fresh customer named
            // after the mailbox.
            None => {
                let name = email
                    .as_str()
                    .split('@')
                    .next()
                    .unwrap_or("Customer")
                    .to_owned();
                self.register(&name, email).await
            }
        }
    }

    /// Log a customer out, dropping the in-memory account.
    pub async fn logout(&self, user_id: &UserId) {
        self.state.remove_account(user_id).await;
        tracing::info!(user_id = %user_id, "customer logged out");
    }

    /// Replace the customer's profile wholesale, keeping the id.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account or a store error if
    /// persistence fails.
    pub async fn update_profile(&self, user_id: &UserId, mut user: User) -> Result<User> {
        user.id = user_id.clone();

        let previous_email = self
            .state
            .mutate_account(user_id, |account| {
                let previous = account.user.email.clone();
                account.user = user.clone();
                previous
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

        self.state.store().put(&keys::user(user_id), &user).await?;
        if previous_email != user.email {
            self.state.store().delete(&email_index(&previous_email)).await?;
            self.state
                .store()
                .put(&email_index(&user.email), user_id)
                .await?;
        }
        Ok(user)
    }

    /// Persist the customer's language preference.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account or a store error if
    /// persistence fails.
    pub async fn set_language(&self, user_id: &UserId, language: Language) -> Result<()> {
        self.state
            .mutate_account(user_id, |account| account.language = language)
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;
        self.state
            .store()
            .put(&keys::language(user_id), &language)
            .await?;
        Ok(())
    }

    /// Find a persisted user by email.
    async fn lookup(&self, email: &Email) -> Result<Option<User>> {
        let Some(user_id) = self
            .state
            .store()
            .get::<UserId>(&email_index(email))
            .await?
        else {
            return Ok(None);
        };
        Ok(self.state.store().get::<User>(&keys::user(&user_id)).await?)
    }

    /// Load the customer's persisted documents into a fresh account.
    async fn hydrate(&self, user: User) -> Result<User> {
        let store = self.state.store();
        let orders = store
            .get::<Vec<Order>>(&keys::orders(&user.id))
            .await?
            .unwrap_or_default();
        let notifications = store
            .get::<Vec<Notification>>(&keys::notifications(&user.id))
            .await?
            .unwrap_or_default();
        let language = store
            .get::<Language>(&keys::language(&user.id))
            .await?
            .unwrap_or_default();

        let account = Account {
            user: user.clone(),
            cart: crate::models::Cart::new(),
            orders,
            notifications,
            language,
        };
        self.state.insert_account(user.id.clone(), account).await;
        tracing::info!(user_id = %user.id, "customer logged in");
        Ok(user)
    }
}
