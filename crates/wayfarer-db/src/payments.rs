use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use wayfarer_types::models::{Payment, PaymentStatus};

use crate::{Database, datetime_col, opt_uuid_col, uuid_col};

impl Database {
    pub fn create_payment(&self, payment: &Payment) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO payments
                 (id, email, tour_guide_email, package_id, package_title,
                  amount, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    payment.id.to_string(),
                    payment.email,
                    payment.tour_guide_email,
                    payment.package_id.map(|id| id.to_string()),
                    payment.package_title,
                    payment.amount,
                    payment.status.as_str(),
                    payment.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_payments_by_email(&self, email: &str) -> Result<Vec<Payment>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT {PAYMENT_COLS} FROM payments WHERE email = ?1"))?;
            let payments = stmt
                .query_map([email], payment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(payments)
        })
    }

    /// A guide's assigned tours: payments naming them as the guide.
    pub fn list_payments_by_guide_email(&self, email: &str) -> Result<Vec<Payment>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PAYMENT_COLS} FROM payments WHERE tour_guide_email = ?1"
            ))?;
            let payments = stmt
                .query_map([email], payment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(payments)
        })
    }

    pub fn get_payment_by_id(&self, id: &Uuid) -> Result<Option<Payment>> {
        self.with_conn(|conn| {
            let payment = conn
                .query_row(
                    &format!("SELECT {PAYMENT_COLS} FROM payments WHERE id = ?1"),
                    [id.to_string()],
                    payment_from_row,
                )
                .optional()?;
            Ok(payment)
        })
    }

    pub fn set_payment_status(&self, id: &Uuid, status: PaymentStatus) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE payments SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.to_string()],
            )?;
            Ok(n)
        })
    }

    pub fn delete_payment_by_id(&self, id: &Uuid) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM payments WHERE id = ?1", [id.to_string()])?;
            Ok(n)
        })
    }
}

const PAYMENT_COLS: &str =
    "id, email, tour_guide_email, package_id, package_title, amount, status, created_at";

fn payment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    let status: String = row.get(6)?;
    Ok(Payment {
        id: uuid_col(0, row.get(0)?)?,
        email: row.get(1)?,
        tour_guide_email: row.get(2)?,
        package_id: opt_uuid_col(3, row.get(3)?)?,
        package_title: row.get(4)?,
        amount: row.get(5)?,
        status: PaymentStatus::parse(&status).unwrap_or(PaymentStatus::Pending),
        created_at: datetime_col(7, row.get(7)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_payment(email: &str, guide: &str) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            email: email.into(),
            tour_guide_email: Some(guide.into()),
            package_id: None,
            package_title: Some("Alpine Adventure".into()),
            amount: 250.0,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn guide_sees_only_their_assignments() {
        let db = Database::open_in_memory().unwrap();
        db.create_payment(&test_payment("a@x.com", "g1@x.com")).unwrap();
        db.create_payment(&test_payment("b@x.com", "g1@x.com")).unwrap();
        db.create_payment(&test_payment("c@x.com", "g2@x.com")).unwrap();

        assert_eq!(db.list_payments_by_guide_email("g1@x.com").unwrap().len(), 2);
        assert_eq!(db.list_payments_by_guide_email("g2@x.com").unwrap().len(), 1);
    }

    #[test]
    fn status_transition_and_zero_effect_update() {
        let db = Database::open_in_memory().unwrap();
        let payment = test_payment("a@x.com", "g1@x.com");
        db.create_payment(&payment).unwrap();

        assert_eq!(
            db.set_payment_status(&payment.id, PaymentStatus::Approved).unwrap(),
            1
        );
        let stored = db.get_payment_by_id(&payment.id).unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Approved);

        // missing id matches nothing, not an error
        assert_eq!(
            db.set_payment_status(&Uuid::new_v4(), PaymentStatus::Rejected).unwrap(),
            0
        );
    }
}
