use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use wayfarer_types::models::Review;

use crate::{Database, datetime_col, uuid_col};

impl Database {
    pub fn create_review(&self, review: &Review) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO reviews
                 (id, package_title, tour_guide_name, tour_guide_email,
                  reviewer_name, reviewer_email, review, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    review.id.to_string(),
                    review.package_title,
                    review.tour_guide_name,
                    review.tour_guide_email,
                    review.reviewer_name,
                    review.reviewer_email,
                    review.review,
                    review.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_reviews(&self) -> Result<Vec<Review>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {REVIEW_COLS} FROM reviews"))?;
            let reviews = stmt
                .query_map([], review_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(reviews)
        })
    }

    pub fn get_review_by_id(&self, id: &Uuid) -> Result<Option<Review>> {
        self.with_conn(|conn| {
            let review = conn
                .query_row(
                    &format!("SELECT {REVIEW_COLS} FROM reviews WHERE id = ?1"),
                    [id.to_string()],
                    review_from_row,
                )
                .optional()?;
            Ok(review)
        })
    }
}

const REVIEW_COLS: &str = "id, package_title, tour_guide_name, tour_guide_email, \
     reviewer_name, reviewer_email, review, created_at";

fn review_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: uuid_col(0, row.get(0)?)?,
        package_title: row.get(1)?,
        tour_guide_name: row.get(2)?,
        tour_guide_email: row.get(3)?,
        reviewer_name: row.get(4)?,
        reviewer_email: row.get(5)?,
        review: row.get(6)?,
        created_at: datetime_col(7, row.get(7)?)?,
    })
}
