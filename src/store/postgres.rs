use super::*;
use crate::session::Buyin;
use crate::session::Stakes;
use std::sync::Arc;
use tokio_postgres::Client;

#[async_trait::async_trait]
impl Store for Arc<Client> {
    async fn fetch_session(&self, id: &ID<Session>) -> anyhow::Result<Option<Session>> {
        Ok(hydrate(self, Some(id.as_str())).await?.remove(id))
    }
    async fn fetch_sessions(&self) -> anyhow::Result<BTreeMap<ID<Session>, Session>> {
        Ok(hydrate(self, None).await?)
    }
    async fn fetch_players(&self) -> anyhow::Result<BTreeMap<ID<Player>, Player>> {
        Ok(self
            .query(
                const_format::concatcp!("SELECT id, name, email FROM ", PLAYERS),
                &[],
            )
            .await?
            .into_iter()
            .map(|row| {
                let id = ID::from(row.get::<_, String>(0));
                let player = Player::new(id.clone(), row.get(1), row.get(2));
                (id, player)
            })
            .collect())
    }
    async fn fetch_clubs(&self) -> anyhow::Result<BTreeMap<ID<Club>, Club>> {
        Ok(self
            .query(const_format::concatcp!("SELECT id, name FROM ", CLUBS), &[])
            .await?
            .into_iter()
            .map(|row| {
                let id = ID::from(row.get::<_, String>(0));
                let club = Club::new(id.clone(), row.get(1));
                (id, club)
            })
            .collect())
    }
    async fn persist_cashout(
        &self,
        session: &ID<Session>,
        id: &ID<Cashout>,
        cashout: &Cashout,
    ) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                CASHOUTS,
                " (id, session_id, player_id, stack_value, cashout, time) VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            &[
                &id.as_str(),
                &session.as_str(),
                &cashout.player().as_str(),
                &cashout.stack_value(),
                &cashout.cashout(),
                &cashout.time(),
            ],
        )
        .await?;
        Ok(())
    }
    async fn delete_cashout(&self, session: &ID<Session>, id: &ID<Cashout>) -> anyhow::Result<()> {
        let n = self
            .execute(
                const_format::concatcp!(
                    "DELETE FROM ",
                    CASHOUTS,
                    " WHERE session_id = $1 AND id = $2"
                ),
                &[&session.as_str(), &id.as_str()],
            )
            .await?;
        match n {
            0 => Err(anyhow::anyhow!("cash-out {} not found", id)),
            _ => Ok(()),
        }
    }
    async fn delete_all_cashouts(&self, session: &ID<Session>) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", CASHOUTS, " WHERE session_id = $1"),
            &[&session.as_str()],
        )
        .await?;
        Ok(())
    }
}

/// Rebuilds sessions with their ledgers, optionally restricted to one id.
async fn hydrate(
    client: &Client,
    only: Option<&str>,
) -> Result<BTreeMap<ID<Session>, Session>, PgErr> {
    let mut sessions = client
        .query(
            const_format::concatcp!(
                "SELECT id, club_id, start_time, kind, small_blind, big_blind, ante, status FROM ",
                SESSIONS,
                " WHERE $1::TEXT IS NULL OR id = $1"
            ),
            &[&only],
        )
        .await?
        .into_iter()
        .map(|row| {
            let id = ID::<Session>::from(row.get::<_, String>(0));
            let stakes = Stakes::new(row.get(4), row.get(5), row.get(6));
            let session = Session::new(
                id.clone(),
                ID::from(row.get::<_, String>(1)),
                row.get(2),
                row.get::<_, &str>(3),
                stakes,
            );
            let closed = row.get::<_, &str>(7) == "close";
            (id, (session, closed))
        })
        .collect::<BTreeMap<_, _>>();
    for row in client
        .query(
            const_format::concatcp!(
                "SELECT session_id, player_id FROM ",
                SEATS,
                " WHERE $1::TEXT IS NULL OR session_id = $1"
            ),
            &[&only],
        )
        .await?
    {
        if let Some((session, _)) = sessions.get_mut(&ID::from(row.get::<_, &str>(0))) {
            session.ledger_mut().seat(ID::from(row.get::<_, &str>(1)));
        }
    }
    for row in client
        .query(
            const_format::concatcp!(
                "SELECT session_id, id, player_id, amount, time FROM ",
                BUYINS,
                " WHERE $1::TEXT IS NULL OR session_id = $1"
            ),
            &[&only],
        )
        .await?
    {
        if let Some((session, _)) = sessions.get_mut(&ID::from(row.get::<_, &str>(0))) {
            let buyin = Buyin::new(ID::from(row.get::<_, &str>(2)), row.get(3), row.get(4));
            session
                .ledger_mut()
                .insert_buyin(ID::from(row.get::<_, &str>(1)), buyin);
        }
    }
    for row in client
        .query(
            const_format::concatcp!(
                "SELECT session_id, id, player_id, stack_value, cashout, time FROM ",
                CASHOUTS,
                " WHERE $1::TEXT IS NULL OR session_id = $1"
            ),
            &[&only],
        )
        .await?
    {
        if let Some((session, _)) = sessions.get_mut(&ID::from(row.get::<_, &str>(0))) {
            let cashout = Cashout::new(
                ID::from(row.get::<_, &str>(2)),
                row.get(3),
                row.get(4),
                row.get(5),
            );
            session
                .ledger_mut()
                .restore_cashout(ID::from(row.get::<_, &str>(1)), cashout);
        }
    }
    Ok(sessions
        .into_iter()
        .map(|(id, (mut session, closed))| {
            if closed {
                session.close();
            }
            (id, session)
        })
        .collect())
}
