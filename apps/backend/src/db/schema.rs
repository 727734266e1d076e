//! PostgreSQL schema definitions.
//!
//! Every statement is create-if-absent so the whole batch runs on each start.

pub const SCHEMA: &str = r#"
-- Phrase library
CREATE TABLE IF NOT EXISTS phrases (
    id UUID PRIMARY KEY,
    scene TEXT NOT NULL DEFAULT '',
    en TEXT NOT NULL,
    zh TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '',
    level TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Per-phrase learning progress
CREATE TABLE IF NOT EXISTS progress (
    phrase_id UUID PRIMARY KEY REFERENCES phrases(id),
    mastery INT NOT NULL DEFAULT 0,
    last_seen TIMESTAMPTZ,
    seen_count INT NOT NULL DEFAULT 0
);

-- Daily decks
CREATE TABLE IF NOT EXISTS decks (
    deck_date DATE NOT NULL,
    phrase_id UUID NOT NULL REFERENCES phrases(id),
    position INT NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'pending',
    result TEXT,
    PRIMARY KEY (deck_date, phrase_id)
);

-- Daily check-in summaries
CREATE TABLE IF NOT EXISTS checkins (
    check_date DATE PRIMARY KEY,
    target_n INT NOT NULL,
    done_n INT NOT NULL,
    is_completed BOOLEAN NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Key-value settings
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT
);

-- Indexes
CREATE UNIQUE INDEX IF NOT EXISTS idx_phrases_scene_en ON phrases(scene, en);
CREATE INDEX IF NOT EXISTS idx_phrases_created ON phrases(created_at);
CREATE INDEX IF NOT EXISTS idx_decks_date_status ON decks(deck_date, status);
"#;
