use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use wayfarer_types::models::{AccountStatus, Role, User};

use crate::{Database, datetime_col, opt_datetime_col, uuid_col};

/// Result of attempting to insert a user. The UNIQUE(email) constraint is
/// the authority on duplicates, not the caller's existence check.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Inserted,
    DuplicateEmail,
}

impl Database {
    pub fn create_user(&self, user: &User) -> Result<CreateUserOutcome> {
        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO users (id, name, email, photo, role, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    user.id.to_string(),
                    user.name,
                    user.email,
                    user.photo,
                    user.role.as_str(),
                    user.status.map(|s| s.as_str()),
                    user.created_at.to_rfc3339(),
                    user.updated_at.map(|t| t.to_rfc3339()),
                ],
            );
            match result {
                Ok(_) => Ok(CreateUserOutcome::Inserted),
                Err(e) if is_unique_violation(&e) => Ok(CreateUserOutcome::DuplicateEmail),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
                    [email],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    pub fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
                    [id.to_string()],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {USER_COLS} FROM users"))?;
            let users = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }

    pub fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLS} FROM users WHERE role = ?1"))?;
            let users = stmt
                .query_map([role.as_str()], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }

    /// Single lookup filtered on role AND id, used by the public
    /// tour-guide-profile endpoint.
    pub fn get_user_by_role_and_id(&self, role: Role, id: &Uuid) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLS} FROM users WHERE role = ?1 AND id = ?2"),
                    params![role.as_str(), id.to_string()],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    /// Status-only update, leaving every other field untouched.
    pub fn set_user_status_by_email(&self, email: &str, status: AccountStatus) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE users SET status = ?1 WHERE email = ?2",
                params![status.as_str(), email],
            )?;
            Ok(n)
        })
    }

    /// Role promotion/demotion: sets the role, marks status verified, and
    /// stamps updated_at.
    pub fn set_user_role_by_id(
        &self,
        id: &Uuid,
        role: Role,
        updated_at: DateTime<Utc>,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE users SET role = ?1, status = 'verified', updated_at = ?2 WHERE id = ?3",
                params![role.as_str(), updated_at.to_rfc3339(), id.to_string()],
            )?;
            Ok(n)
        })
    }

    pub fn delete_user_by_id(&self, id: &Uuid) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM users WHERE id = ?1", [id.to_string()])?;
            Ok(n)
        })
    }
}

const USER_COLS: &str = "id, name, email, photo, role, status, created_at, updated_at";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(4)?;
    let status: Option<String> = row.get(5)?;
    Ok(User {
        id: uuid_col(0, row.get(0)?)?,
        name: row.get(1)?,
        email: row.get(2)?,
        photo: row.get(3)?,
        role: Role::parse(&role).unwrap_or(Role::User),
        status: status.as_deref().and_then(AccountStatus::parse),
        created_at: datetime_col(6, row.get(6)?)?,
        updated_at: opt_datetime_col(7, row.get(7)?)?,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(email: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: Some("Test".into()),
            email: email.into(),
            photo: None,
            role,
            status: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn duplicate_email_is_rejected_by_constraint() {
        let db = Database::open_in_memory().unwrap();
        let first = test_user("a@b.com", Role::User);
        let second = test_user("a@b.com", Role::User);

        assert_eq!(db.create_user(&first).unwrap(), CreateUserOutcome::Inserted);
        assert_eq!(
            db.create_user(&second).unwrap(),
            CreateUserOutcome::DuplicateEmail
        );

        // the original insert is the surviving record
        let stored = db.get_user_by_email("a@b.com").unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[test]
    fn status_update_touches_only_status() {
        let db = Database::open_in_memory().unwrap();
        let user = test_user("c@d.com", Role::User);
        db.create_user(&user).unwrap();

        let n = db
            .set_user_status_by_email("c@d.com", AccountStatus::Requested)
            .unwrap();
        assert_eq!(n, 1);

        let stored = db.get_user_by_email("c@d.com").unwrap().unwrap();
        assert_eq!(stored.status, Some(AccountStatus::Requested));
        assert_eq!(stored.name, user.name);
        assert_eq!(stored.role, Role::User);
    }

    #[test]
    fn role_promotion_marks_verified() {
        let db = Database::open_in_memory().unwrap();
        let user = test_user("e@f.com", Role::User);
        db.create_user(&user).unwrap();

        let n = db
            .set_user_role_by_id(&user.id, Role::TourGuide, Utc::now())
            .unwrap();
        assert_eq!(n, 1);

        let stored = db.get_user_by_id(&user.id).unwrap().unwrap();
        assert_eq!(stored.role, Role::TourGuide);
        assert_eq!(stored.status, Some(AccountStatus::Verified));
        assert!(stored.updated_at.is_some());
    }

    #[test]
    fn delete_missing_user_is_zero_effect() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.delete_user_by_id(&Uuid::new_v4()).unwrap(), 0);
    }

    #[test]
    fn role_filter_returns_only_guides() {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&test_user("g1@x.com", Role::TourGuide)).unwrap();
        db.create_user(&test_user("g2@x.com", Role::TourGuide)).unwrap();
        db.create_user(&test_user("u@x.com", Role::User)).unwrap();

        let guides = db.list_users_by_role(Role::TourGuide).unwrap();
        assert_eq!(guides.len(), 2);
        assert!(guides.iter().all(|u| u.role == Role::TourGuide));
    }
}
