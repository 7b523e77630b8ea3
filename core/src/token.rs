// core/src/token.rs

//! Access-token issuance.
//!
//! The data layer only depends on [`TokenIssuer`]: given a user, return a
//! signed, time-bound bearer token string. [`JwtIssuer`] is the HS256
//! implementation used by the server.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::User;

pub const ACCESS_TOKEN_TYPE: &str = "access";

pub trait TokenIssuer: Send + Sync {
  fn issue_access_token(&self, user: &User) -> StoreResult<String>;
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
  pub token_type: String,
  pub user_id: i64,
  pub jti: String,
  pub iat: i64,
  pub exp: i64,
}

pub struct JwtIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  lifetime: Duration,
}

impl JwtIssuer {
  pub fn new(secret: &[u8], lifetime: Duration) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validation: Validation::default(),
      lifetime,
    }
  }

  /// Decodes a bearer token, checking signature, expiry and token type.
  #[instrument(name = "token::verify_access_token", skip_all, err(Display))]
  pub fn verify_access_token(&self, token: &str) -> StoreResult<AccessClaims> {
    let claims = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?.claims;
    if claims.token_type != ACCESS_TOKEN_TYPE {
      return Err(StoreError::Auth("Token has wrong type".to_string()));
    }
    Ok(claims)
  }
}

impl TokenIssuer for JwtIssuer {
  #[instrument(name = "token::issue_access_token", skip_all, fields(user_id = user.id))]
  fn issue_access_token(&self, user: &User) -> StoreResult<String> {
    let now = Utc::now();
    let claims = AccessClaims {
      token_type: ACCESS_TOKEN_TYPE.to_string(),
      user_id: user.id,
      jti: Uuid::new_v4().simple().to_string(),
      iat: now.timestamp(),
      exp: (now + self.lifetime).timestamp(),
    };
    let token = encode(&Header::default(), &claims, &self.encoding_key)?;
    debug!("Access token issued.");
    Ok(token)
  }
}
