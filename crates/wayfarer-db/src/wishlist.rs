use anyhow::Result;
use rusqlite::params;
use uuid::Uuid;

use wayfarer_types::models::WishlistItem;

use crate::{Database, opt_uuid_col, uuid_col};

impl Database {
    pub fn create_wishlist_item(&self, item: &WishlistItem) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO wishlist (id, email, package_id, title, tour_type, price, photo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    item.id.to_string(),
                    item.email,
                    item.package_id.map(|id| id.to_string()),
                    item.title,
                    item.tour_type,
                    item.price,
                    item.photo,
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_wishlist_by_email(&self, email: &str) -> Result<Vec<WishlistItem>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, package_id, title, tour_type, price, photo
                 FROM wishlist WHERE email = ?1",
            )?;
            let items = stmt
                .query_map([email], wishlist_item_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(items)
        })
    }

    pub fn delete_wishlist_item_by_id(&self, id: &Uuid) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM wishlist WHERE id = ?1", [id.to_string()])?;
            Ok(n)
        })
    }
}

fn wishlist_item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WishlistItem> {
    Ok(WishlistItem {
        id: uuid_col(0, row.get(0)?)?,
        email: row.get(1)?,
        package_id: opt_uuid_col(2, row.get(2)?)?,
        title: row.get(3)?,
        tour_type: row.get(4)?,
        price: row.get(5)?,
        photo: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wishlist_is_scoped_to_email() {
        let db = Database::open_in_memory().unwrap();
        let item = WishlistItem {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            package_id: Some(Uuid::new_v4()),
            title: Some("Paris City Walk".into()),
            tour_type: Some("City".into()),
            price: Some(120.0),
            photo: None,
        };
        db.create_wishlist_item(&item).unwrap();

        assert_eq!(db.list_wishlist_by_email("a@b.com").unwrap().len(), 1);
        assert!(db.list_wishlist_by_email("other@b.com").unwrap().is_empty());
    }

    #[test]
    fn delete_missing_item_is_zero_effect() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.delete_wishlist_item_by_id(&Uuid::new_v4()).unwrap(), 0);
    }
}
