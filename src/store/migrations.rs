/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Merged songs, one row per (title, performer)
CREATE TABLE IF NOT EXISTS songs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    performer TEXT NOT NULL,
    chart_debut TEXT NOT NULL,
    peak_position INTEGER NOT NULL,
    time_on_chart INTEGER NOT NULL,
    UNIQUE (title, performer)
);

CREATE INDEX IF NOT EXISTS idx_songs_chart_order
    ON songs(peak_position ASC, chart_debut DESC);
"#;

const MIGRATION_002: &str = r#"
-- One row per successful load
CREATE TABLE IF NOT EXISTS catalog_loads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    loaded_at TEXT NOT NULL,
    record_count INTEGER NOT NULL
);
"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "songs",
        sql: MIGRATION_001,
    },
    Migration {
        version: 2,
        name: "catalog_loads",
        sql: MIGRATION_002,
    },
];
