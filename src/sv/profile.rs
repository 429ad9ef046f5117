use sea_orm::SqlErr;
use serde::Deserialize;

use crate::{entity::profile, prelude::*};

const MAX_NAME_LEN: usize = 100;

/// Partial profile update. Missing fields stay as they are, blank ones are
/// cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
  pub full_name: Option<String>,
  pub avatar_url: Option<String>,
  pub email: Option<String>,
}

fn normalize(value: String) -> Option<String> {
  let value = value.trim();
  (!value.is_empty()).then(|| value.to_string())
}

fn valid_email(email: &str) -> bool {
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
    }
    None => false,
  }
}

impl ProfileUpdate {
  fn validate(&self) -> Result<()> {
    let name = self.full_name.as_deref().map(str::trim).unwrap_or_default();
    if name.chars().count() > MAX_NAME_LEN {
      return Err(Error::validation(format!(
        "`full_name` must be at most {MAX_NAME_LEN} characters"
      )));
    }

    let url = self.avatar_url.as_deref().map(str::trim).unwrap_or_default();
    if !url.is_empty()
      && !(url.starts_with("https://") || url.starts_with("http://"))
    {
      return Err(Error::validation("`avatar_url` must be an http(s) URL"));
    }

    let email = self.email.as_deref().map(str::trim).unwrap_or_default();
    if !email.is_empty() && !valid_email(email) {
      return Err(Error::validation("`email` is not a valid address"));
    }

    Ok(())
  }
}

pub struct Profile<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Profile<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Profile of `user_id`, created empty on first access.
  pub async fn get(&self, user_id: Uuid) -> Result<profile::Model> {
    if let Some(profile) =
      profile::Entity::find_by_id(user_id).one(self.db).await?
    {
      return Ok(profile);
    }

    let now = Utc::now().naive_utc();
    let profile = profile::ActiveModel {
      id: Set(user_id),
      full_name: Set(None),
      avatar_url: Set(None),
      email: Set(None),
      created_at: Set(now),
      updated_at: Set(now),
    };

    match profile.insert(self.db).await {
      Ok(profile) => Ok(profile),
      Err(err)
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
      {
        profile::Entity::find_by_id(user_id)
          .one(self.db)
          .await?
          .ok_or(Error::NotFound("Profile"))
      }
      Err(err) => Err(err.into()),
    }
  }

  pub async fn update(
    &self,
    user_id: Uuid,
    update: ProfileUpdate,
  ) -> Result<profile::Model> {
    update.validate()?;

    let current = self.get(user_id).await?;
    let mut model: profile::ActiveModel = current.into();

    if let Some(name) = update.full_name {
      model.full_name = Set(normalize(name));
    }
    if let Some(url) = update.avatar_url {
      model.avatar_url = Set(normalize(url));
    }
    if let Some(email) = update.email {
      model.email = Set(normalize(email));
    }
    model.updated_at = Set(Utc::now().naive_utc());

    let profile = model.update(self.db).await?;
    debug!("User {user_id} updated their profile");
    Ok(profile)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;

  #[tokio::test]
  async fn get_creates_empty_profile_once() {
    let db = setup_test_db().await;
    let sv = Profile::new(&db);
    let user = Uuid::new_v4();

    let first = sv.get(user).await.unwrap();
    assert_eq!(first.id, user);
    assert_eq!(first.full_name, None);

    let again = sv.get(user).await.unwrap();
    assert_eq!(again.created_at, first.created_at);
  }

  #[tokio::test]
  async fn update_is_partial_and_blank_clears() {
    let db = setup_test_db().await;
    let sv = Profile::new(&db);
    let user = Uuid::new_v4();

    let profile = sv
      .update(
        user,
        ProfileUpdate {
          full_name: Some("  Asha Rao ".into()),
          email: Some("asha@example.com".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
    assert_eq!(profile.email.as_deref(), Some("asha@example.com"));

    let profile = sv
      .update(
        user,
        ProfileUpdate { email: Some(" ".into()), ..Default::default() },
      )
      .await
      .unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
    assert_eq!(profile.email, None);
  }

  #[tokio::test]
  async fn update_rejects_bad_fields() {
    let db = setup_test_db().await;
    let sv = Profile::new(&db);
    let user = Uuid::new_v4();

    for update in [
      ProfileUpdate { email: Some("no-at-sign".into()), ..Default::default() },
      ProfileUpdate { email: Some("a@b@c.com".into()), ..Default::default() },
      ProfileUpdate {
        avatar_url: Some("ftp://x/y.png".into()),
        ..Default::default()
      },
      ProfileUpdate {
        full_name: Some("x".repeat(MAX_NAME_LEN + 1)),
        ..Default::default()
      },
    ] {
      let res = sv.update(user, update).await;
      assert!(matches!(res, Err(Error::Validation(_))));
    }

    assert_eq!(sv.get(user).await.unwrap().email, None);
  }
}
