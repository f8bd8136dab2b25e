use super::*;
use crate::session::Snapshot;
use std::sync::RwLock;

/// In-memory store over a [`Snapshot`]. Reads clone; writes hold the lock briefly.
#[derive(Debug, Default)]
pub struct Memory {
    snapshot: RwLock<Snapshot>,
}

impl From<Snapshot> for Memory {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

impl Memory {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = Snapshot::from_json(&json)?;
        log::info!(
            "[memory] loaded {} sessions, {} players from {}",
            snapshot.sessions.len(),
            snapshot.players.len(),
            path.display()
        );
        Ok(Self::from(snapshot))
    }
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = self.snapshot()?.to_json()?;
        std::fs::write(path, json)?;
        log::debug!("[memory] saved snapshot to {}", path.display());
        Ok(())
    }
    pub fn snapshot(&self) -> anyhow::Result<Snapshot> {
        self.read(|s| s.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> anyhow::Result<T> {
        self.snapshot
            .read()
            .map(|guard| f(&guard))
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))
    }
    fn write<T>(&self, f: impl FnOnce(&mut Snapshot) -> anyhow::Result<T>) -> anyhow::Result<T> {
        self.snapshot
            .write()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))
            .and_then(|mut guard| f(&mut guard))
    }
    fn session_mut<'a>(snapshot: &'a mut Snapshot, id: &ID<Session>) -> anyhow::Result<&'a mut Session> {
        snapshot
            .sessions
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("session {} not found", id))
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn fetch_session(&self, id: &ID<Session>) -> anyhow::Result<Option<Session>> {
        self.read(|s| s.sessions.get(id).cloned())
    }
    async fn fetch_sessions(&self) -> anyhow::Result<BTreeMap<ID<Session>, Session>> {
        self.read(|s| s.sessions.clone())
    }
    async fn fetch_players(&self) -> anyhow::Result<BTreeMap<ID<Player>, Player>> {
        self.read(|s| s.players.clone())
    }
    async fn fetch_clubs(&self) -> anyhow::Result<BTreeMap<ID<Club>, Club>> {
        self.read(|s| s.clubs.clone())
    }
    async fn persist_cashout(
        &self,
        session: &ID<Session>,
        id: &ID<Cashout>,
        cashout: &Cashout,
    ) -> anyhow::Result<()> {
        self.write(|s| {
            Self::session_mut(s, session)?
                .ledger_mut()
                .insert_cashout(id.clone(), cashout.clone())
                .map_err(anyhow::Error::from)
        })
    }
    async fn delete_cashout(&self, session: &ID<Session>, id: &ID<Cashout>) -> anyhow::Result<()> {
        self.write(|s| {
            let ledger = Self::session_mut(s, session)?.ledger_mut();
            let player = ledger
                .cashouts()
                .find(|(key, _)| *key == id)
                .map(|(_, c)| c.player().clone())
                .ok_or_else(|| anyhow::anyhow!("cash-out {} not found", id))?;
            ledger.remove_cashout(&player);
            Ok(())
        })
    }
    async fn delete_all_cashouts(&self, session: &ID<Session>) -> anyhow::Result<()> {
        self.write(|s| {
            Self::session_mut(s, session)?.ledger_mut().clear_cashouts();
            Ok(())
        })
    }
}
