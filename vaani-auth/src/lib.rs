//! Sign-in client and credential storage for Vaani-Nyay.
//!
//! [`AuthClient`] talks to the account service's register and login
//! endpoints. The returned [`Credentials`] go into a [`CredentialStore`]
//! picked once per session by the remember-me flag; reads go through the
//! same store, which drops tokens whose embedded expiry has passed.

mod api;
mod store;
mod token;

pub use api::{AuthApiError, AuthClient, Credentials, RegisterRequest, UserProfile};
pub use store::{CredentialStore, DurableStore, EphemeralStore, StoreError, store_for};
pub use token::AuthToken;
