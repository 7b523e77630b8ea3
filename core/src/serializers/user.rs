// core/src/serializers/user.rs

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, User};
use crate::serializers::check_required;
use crate::token::TokenIssuer;

/// `"{first} {last}"`, or the first five characters of the email when both
/// name fields are empty.
pub fn display_name(user: &User) -> String {
  if user.first_name.is_empty() && user.last_name.is_empty() {
    return user.email.chars().take(5).collect();
  }
  format!("{} {}", user.first_name, user.last_name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRepr {
  pub id: i64,
  // Same value as `id`; older clients read `_id`.
  #[serde(rename = "_id")]
  pub legacy_id: i64,
  pub username: String,
  pub email: String,
  pub name: String,
  #[serde(rename = "isAdmin")]
  pub is_admin: bool,
}

impl UserRepr {
  pub fn from_model(user: &User) -> Self {
    Self {
      id: user.id,
      legacy_id: user.id,
      username: user.username.clone(),
      email: user.email.clone(),
      name: display_name(user),
      is_admin: user.is_staff,
    }
  }
}

/// A user representation carrying a freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithTokenRepr {
  #[serde(flatten)]
  pub user: UserRepr,
  pub token: String,
}

impl UserWithTokenRepr {
  pub fn from_model(user: &User, issuer: &dyn TokenIssuer) -> StoreResult<Self> {
    Ok(Self {
      user: UserRepr::from_model(user),
      token: issuer.issue_access_token(user)?,
    })
  }
}

/// Sign-up payload. The email doubles as the username.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
  #[serde(default)]
  pub name: String,
  pub email: String,
  pub password: String,
}

impl RegisterInput {
  pub fn into_new_user(self) -> StoreResult<NewUser> {
    let email = self.email.trim().to_string();
    check_required("email", &email, 150)?;
    if !email.contains('@') {
      return Err(StoreError::validation("email", "Enter a valid email address."));
    }
    if self.password.is_empty() {
      return Err(StoreError::validation("password", "This field may not be blank."));
    }
    Ok(NewUser {
      username: email.clone(),
      email,
      first_name: self.name.trim().to_string(),
      last_name: String::new(),
      is_staff: false,
      password: self.password,
    })
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
  pub username: String,
  pub password: String,
}
