//! Ledger Server Binary
//!
//! Serves the cash-out board, cash-out mutations, and "my sessions" reports
//! over HTTP, backed by PostgreSQL.

use homegame::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    let client = store::db().await?;
    store::migrate(&client).await?;
    hosting::Server::run(client).await?;
    Ok(())
}
