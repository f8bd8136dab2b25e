//! Ledger Operator CLI
//!
//! Inspects and edits cash-outs in a JSON snapshot of the club store.
//! The operator acts as a system admin.

use clap::Parser;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;
use homegame::club::Viewer;
use homegame::confirm::Confirmation;
use homegame::desk::Desk;
use homegame::desk::Outcome;
use homegame::reconcile::CashoutForm;
use homegame::store::Memory;
use homegame::store::Store;
use homegame::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Cash-out desk over a club snapshot", long_about = None)]
struct Cli {
    #[arg(long, default_value = "snapshot.json")]
    snapshot: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Show the cash-out board of a session")]
    Board { session: String },
    #[command(about = "List every session played under an email", alias = "my")]
    Mine { email: String },
    #[command(about = "Record a player's cash-out")]
    Cashout {
        session: String,
        #[arg(long)]
        player: Option<String>,
        #[arg(long)]
        amount: Option<Money>,
        #[arg(long, help = "Actual stack value when the payout was miscalculated")]
        stack: Option<Money>,
    },
    #[command(about = "Reset one player's cash-out")]
    Reset { session: String, player: String },
    #[command(about = "Reset every cash-out in a session")]
    ResetAll { session: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    let cli = Cli::parse();
    let ref path = cli.snapshot;
    let desk = Desk::from(Memory::load(path)?);
    let ref admin = Viewer::admin();
    match cli.command {
        Command::Board { session } => {
            let view = desk.board(&ID::from(session), admin).await?;
            print!("{}", view);
        }
        Command::Mine { email } => {
            let report = desk.report(&email).await?;
            println!("{}", report);
            if !report.is_empty() {
                let net = format::signed_money(report.profit_loss());
                match report.profit_loss() < 0.0 {
                    true => println!("{}", net.red()),
                    false => println!("{}", net.green()),
                }
            }
        }
        Command::Cashout {
            session,
            player,
            amount,
            stack,
        } => {
            let ref id = ID::from(session);
            let player = match player {
                Some(player) => ID::from(player),
                None => {
                    let view = desk.board(id, admin).await?;
                    let names = view.eligible().iter().map(|r| r.name()).collect::<Vec<_>>();
                    if names.is_empty() {
                        println!("{}", "nobody left to cash out".yellow());
                        return Ok(());
                    }
                    let choice = Select::new()
                        .with_prompt("Player")
                        .items(names.as_slice())
                        .default(0)
                        .interact()?;
                    view.eligible()[choice].player().clone()
                }
            };
            let amount = match amount {
                Some(amount) => amount,
                None => Input::<Money>::new().with_prompt("Cashout amount").interact_text()?,
            };
            let form = CashoutForm {
                player_id: Some(player.clone()),
                amount: Some(amount),
                miscalculation: stack.is_some(),
                stack_value: stack,
            };
            let session = desk.record_cashout(id, admin, &form).await?;
            desk.store().save(path)?;
            if let Some(cashout) = session.ledger().cashout_of(&player) {
                let buyins = session.ledger().total_buyins(&player);
                let pnl = format::signed_money(cashout.stack_value() - buyins);
                println!("{} {}", "cashed out".green(), pnl.bold());
            }
        }
        Command::Reset { session, player } => {
            let ref id = ID::from(session);
            let ref player = ID::from(player);
            let players = desk.store().fetch_players().await?;
            let target = players
                .get(player)
                .ok_or_else(|| anyhow::anyhow!("player {} not found", player))?;
            let typed = Input::<String>::new()
                .with_prompt(Confirmation::player(target).prompt())
                .allow_empty(true)
                .interact_text()?;
            match desk.reset_cashout(id, admin, player, &typed).await? {
                Outcome::Applied(_) => {
                    desk.store().save(path)?;
                    println!("{} {}", "reset".green(), target);
                }
                Outcome::Unconfirmed => println!("{}", "not confirmed, nothing changed".yellow()),
            }
        }
        Command::ResetAll { session } => {
            let ref id = ID::from(session);
            let typed = Input::<String>::new()
                .with_prompt(Confirmation::All.prompt())
                .allow_empty(true)
                .interact_text()?;
            match desk.reset_all(id, admin, &typed).await? {
                Outcome::Applied(_) => {
                    desk.store().save(path)?;
                    println!("{}", "all cash-outs reset".green());
                }
                Outcome::Unconfirmed => println!("{}", "not confirmed, nothing changed".yellow()),
            }
        }
    }
    Ok(())
}
