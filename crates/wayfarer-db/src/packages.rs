use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use wayfarer_types::models::Package;

use crate::{Database, uuid_col};

impl Database {
    pub fn create_package(&self, package: &Package) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO packages (id, title, tour_type, price, description, photo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    package.id.to_string(),
                    package.title,
                    package.tour_type,
                    package.price,
                    package.description,
                    package.photo,
                ],
            )?;
            Ok(())
        })
    }

    /// Filtered listing: optional case-insensitive substring match on title,
    /// optional exact tour_type match. Both absent means the full list.
    pub fn search_packages(
        &self,
        title_contains: Option<&str>,
        tour_type: Option<&str>,
    ) -> Result<Vec<Package>> {
        self.with_conn(|conn| {
            let mut sql = format!("SELECT {PACKAGE_COLS} FROM packages");
            let mut clauses: Vec<&str> = Vec::new();
            let mut params: Vec<&dyn rusqlite::types::ToSql> = Vec::new();

            if let Some(title) = &title_contains {
                clauses.push("instr(lower(title), lower(?1)) > 0");
                params.push(title);
            }
            if let Some(tour_type) = &tour_type {
                clauses.push(if params.is_empty() {
                    "tour_type = ?1"
                } else {
                    "tour_type = ?2"
                });
                params.push(tour_type);
            }
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }

            let mut stmt = conn.prepare(&sql)?;
            let packages = stmt
                .query_map(params.as_slice(), package_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(packages)
        })
    }

    pub fn get_package_by_id(&self, id: &Uuid) -> Result<Option<Package>> {
        self.with_conn(|conn| {
            let package = conn
                .query_row(
                    &format!("SELECT {PACKAGE_COLS} FROM packages WHERE id = ?1"),
                    [id.to_string()],
                    package_from_row,
                )
                .optional()?;
            Ok(package)
        })
    }

    pub fn delete_package_by_id(&self, id: &Uuid) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM packages WHERE id = ?1", [id.to_string()])?;
            Ok(n)
        })
    }
}

const PACKAGE_COLS: &str = "id, title, tour_type, price, description, photo";

fn package_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Package> {
    Ok(Package {
        id: uuid_col(0, row.get(0)?)?,
        title: row.get(1)?,
        tour_type: row.get(2)?,
        price: row.get(3)?,
        description: row.get(4)?,
        photo: row.get(5)?,
    })
}
