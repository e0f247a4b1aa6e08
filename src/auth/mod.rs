//! Accounts and token-based access control.

pub mod password;
pub mod token;

pub use token::{Claims, TokenIssuer};

use crate::db::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username {0} is already taken")]
    UsernameTaken(String),
    #[error("{0}")]
    Validation(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}
