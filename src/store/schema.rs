use crate::club::Club;
use crate::club::Player;
use crate::session::Buyin;
use crate::session::Cashout;
use crate::session::Ledger;
use crate::session::Session;
use std::sync::Arc;
use tokio_postgres::Client;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

#[rustfmt::skip]
pub const PLAYERS:  &str = "players";
#[rustfmt::skip]
pub const CLUBS:    &str = "clubs";
#[rustfmt::skip]
pub const SESSIONS: &str = "sessions";
/// Players seated at a session, with or without buy-ins.
#[rustfmt::skip]
pub const SEATS:    &str = "seats";
#[rustfmt::skip]
pub const BUYINS:   &str = "buyins";
#[rustfmt::skip]
pub const CASHOUTS: &str = "cashouts";

/// Table metadata for the ledger tables.
///
/// Pure DDL; reads and writes live in the [`Store`](super::Store) impl.
pub trait Schema {
    fn name() -> &'static str;
    /// `CREATE TABLE IF NOT EXISTS` statement.
    fn creates() -> &'static str;
    /// `CREATE INDEX IF NOT EXISTS` statements, possibly empty.
    fn indices() -> &'static str;
}

impl Schema for Player {
    fn name() -> &'static str {
        PLAYERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            PLAYERS,
            " (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                email       TEXT
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_players_email ON ",
            PLAYERS,
            " (email);"
        )
    }
}

impl Schema for Club {
    fn name() -> &'static str {
        CLUBS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            CLUBS,
            " (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        ""
    }
}

impl Schema for Session {
    fn name() -> &'static str {
        SESSIONS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            SESSIONS,
            " (
                id          TEXT PRIMARY KEY,
                club_id     TEXT NOT NULL,
                start_time  BIGINT NOT NULL,
                kind        TEXT NOT NULL DEFAULT '',
                small_blind DOUBLE PRECISION NOT NULL DEFAULT 0,
                big_blind   DOUBLE PRECISION NOT NULL DEFAULT 0,
                ante        DOUBLE PRECISION,
                status      TEXT NOT NULL DEFAULT 'open'
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_sessions_club ON ",
            SESSIONS,
            " (club_id);"
        )
    }
}

impl Schema for Ledger {
    fn name() -> &'static str {
        SEATS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            SEATS,
            " (
                session_id  TEXT NOT NULL REFERENCES ",
            SESSIONS,
            "(id) ON DELETE CASCADE,
                player_id   TEXT NOT NULL,
                PRIMARY KEY (session_id, player_id)
            );"
        )
    }
    fn indices() -> &'static str {
        ""
    }
}

impl Schema for Buyin {
    fn name() -> &'static str {
        BUYINS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            BUYINS,
            " (
                id          TEXT PRIMARY KEY,
                session_id  TEXT NOT NULL REFERENCES ",
            SESSIONS,
            "(id) ON DELETE CASCADE,
                player_id   TEXT NOT NULL,
                amount      DOUBLE PRECISION NOT NULL,
                time        BIGINT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_buyins_session ON ",
            BUYINS,
            " (session_id);
             CREATE INDEX IF NOT EXISTS idx_buyins_player ON ",
            BUYINS,
            " (player_id);"
        )
    }
}

impl Schema for Cashout {
    fn name() -> &'static str {
        CASHOUTS
    }
    /// At most one cash-out per player per session.
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            CASHOUTS,
            " (
                id          TEXT PRIMARY KEY,
                session_id  TEXT NOT NULL REFERENCES ",
            SESSIONS,
            "(id) ON DELETE CASCADE,
                player_id   TEXT NOT NULL,
                stack_value DOUBLE PRECISION NOT NULL,
                cashout     DOUBLE PRECISION NOT NULL,
                time        BIGINT NOT NULL,
                UNIQUE (session_id, player_id)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_cashouts_session ON ",
            CASHOUTS,
            " (session_id);"
        )
    }
}

/// Establishes a database connection from `DB_URL`.
pub async fn db() -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").map_err(|_| anyhow::anyhow!("DB_URL must be set"))?;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates every ledger table and index that does not exist yet.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    for (name, creates, indices) in [
        (<Player as Schema>::name(), Player::creates(), Player::indices()),
        (<Club as Schema>::name(), Club::creates(), Club::indices()),
        (Session::name(), Session::creates(), Session::indices()),
        (Ledger::name(), Ledger::creates(), Ledger::indices()),
        (Buyin::name(), Buyin::creates(), Buyin::indices()),
        (Cashout::name(), Cashout::creates(), Cashout::indices()),
    ] {
        log::debug!("[schema] migrating {}", name);
        client.batch_execute(creates).await?;
        if !indices.is_empty() {
            client.batch_execute(indices).await?;
        }
    }
    Ok(())
}
