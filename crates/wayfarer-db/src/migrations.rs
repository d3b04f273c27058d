use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- UNIQUE(email) is what makes the registration check-then-insert
        -- safe under concurrency; the application-level existence check is
        -- advisory only.
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            name        TEXT,
            email       TEXT NOT NULL UNIQUE,
            photo       TEXT,
            role        TEXT NOT NULL DEFAULT 'user',
            status      TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS packages (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            tour_type   TEXT NOT NULL,
            price       REAL NOT NULL,
            description TEXT,
            photo       TEXT
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id               TEXT PRIMARY KEY,
            package_title    TEXT NOT NULL,
            tour_guide_name  TEXT,
            tour_guide_email TEXT,
            reviewer_name    TEXT,
            reviewer_email   TEXT NOT NULL,
            review           TEXT NOT NULL,
            created_at       TEXT NOT NULL
        );

        -- No foreign keys on purpose: wishlist and payment rows survive the
        -- package or user they reference (no cascade at this layer).
        CREATE TABLE IF NOT EXISTS wishlist (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL,
            package_id  TEXT,
            title       TEXT,
            tour_type   TEXT,
            price       REAL,
            photo       TEXT
        );

        CREATE TABLE IF NOT EXISTS payments (
            id               TEXT PRIMARY KEY,
            email            TEXT NOT NULL,
            tour_guide_email TEXT,
            package_id       TEXT,
            package_title    TEXT,
            amount           REAL NOT NULL,
            status           TEXT NOT NULL DEFAULT 'pending',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_wishlist_email
            ON wishlist(email);

        CREATE INDEX IF NOT EXISTS idx_payments_email
            ON payments(email);

        CREATE INDEX IF NOT EXISTS idx_payments_guide
            ON payments(tour_guide_email);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
