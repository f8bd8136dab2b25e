//! Persistent-store collaborator.
//!
//! The ledger never talks to storage directly; the [`Desk`](crate::desk::Desk)
//! fetches through a [`Store`], mutates in memory, then writes the single
//! changed record back. Conflict detection between concurrent writers is
//! left to the store.
//!
//! - [`Memory`] — JSON snapshot held in memory, used by the CLI and tests
//! - `Arc<tokio_postgres::Client>` — PostgreSQL tables (feature `database`)
mod memory;
pub use memory::*;

#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
mod schema;
#[cfg(feature = "database")]
pub use postgres::*;
#[cfg(feature = "database")]
pub use schema::*;

use crate::ID;
use crate::club::Club;
use crate::club::Player;
use crate::session::Cashout;
use crate::session::Session;
use std::collections::BTreeMap;

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn fetch_session(&self, id: &ID<Session>) -> anyhow::Result<Option<Session>>;
    async fn fetch_sessions(&self) -> anyhow::Result<BTreeMap<ID<Session>, Session>>;
    async fn fetch_players(&self) -> anyhow::Result<BTreeMap<ID<Player>, Player>>;
    async fn fetch_clubs(&self) -> anyhow::Result<BTreeMap<ID<Club>, Club>>;
    async fn persist_cashout(
        &self,
        session: &ID<Session>,
        id: &ID<Cashout>,
        cashout: &Cashout,
    ) -> anyhow::Result<()>;
    async fn delete_cashout(&self, session: &ID<Session>, id: &ID<Cashout>) -> anyhow::Result<()>;
    async fn delete_all_cashouts(&self, session: &ID<Session>) -> anyhow::Result<()>;
}
