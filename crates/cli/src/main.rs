//! Tradepost CLI - Command-line interface for the Tradepost daemon
//! Phase 4: User experience improvements

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9640";

#[derive(Parser)]
#[command(name = "tradepost")]
#[command(about = "Tradepost marketplace CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "TRADEPOST_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    /// Session token (from `tradepost login`)
    #[arg(long, env = "TRADEPOST_SESSION", global = true)]
    session: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        /// Username (up to 32 chars, letters, digits and underscores)
        username: String,

        /// Password (at least 8 chars)
        #[arg(short, long)]
        password: String,
    },

    /// Log in and print a session token
    Login {
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// List items for sale
    Items {
        /// Only items from this seller (user ID)
        #[arg(short, long)]
        seller: Option<String>,
    },

    /// Put an item up for sale
    Sell {
        /// Item name
        name: String,

        /// Price in whole currency units
        #[arg(short, long)]
        cost: i64,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Picture URL (repeatable)
        #[arg(long = "picture")]
        pictures: Vec<String>,

        /// Contact info shown to claimants
        #[arg(long, default_value = "")]
        contact: String,
    },

    /// Join an item's claim queue
    Claim {
        /// Item ID
        item_id: String,
    },

    /// Leave an item's claim queue
    Unclaim {
        /// Item ID
        item_id: String,
    },

    /// Show your position in an item's claim queue
    Position {
        /// Item ID
        item_id: String,
    },

    /// Show an item's full claim queue
    Queue {
        /// Item ID
        item_id: String,
    },

    /// Show daemon status
    Status,

    /// Run maintenance operations
    Maintenance {
        /// Force VACUUM even if not needed
        #[arg(long)]
        force_vacuum: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct ItemRow {
    id: String,
    name: String,
    cost: i64,
    seller_id: String,
    queue_length: u32,
}

#[derive(Deserialize, Tabled)]
struct QueueRow {
    position: u32,
    username: String,
    user_id: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn require_session(session: Option<String>) -> Result<String> {
    session.context("No session token. Run `tradepost login` and set TRADEPOST_SESSION, or pass --session")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signup { username, password } => {
            let params = json!({
                "username": username,
                "password": password,
            });

            let result = call_rpc(&cli.rpc_url, "user.create.v1", params).await?;

            println!("{}", "✓ Account created".green().bold());
            println!();
            println!("  {} {}", "User ID:".bold(), result["user"]["id"]);
            println!("  {} {}", "Username:".bold(), result["user"]["username"]);
        }

        Commands::Login { username, password } => {
            let params = json!({
                "username": username,
                "password": password,
            });

            let result = call_rpc(&cli.rpc_url, "session.login.v1", params).await?;
            let token = result["session"].as_str().unwrap_or("").to_string();

            println!("{}", "✓ Logged in".green().bold());
            println!();
            println!("  {} {}", "Session:".bold(), token);
            println!("  {} {}", "Expires at:".bold(), result["expires_at"]);
            println!();
            println!("  export TRADEPOST_SESSION={}", token);
        }

        Commands::Logout => {
            let session = require_session(cli.session)?;
            let params = json!({ "session": session });

            call_rpc(&cli.rpc_url, "session.logout.v1", params).await?;

            println!("{}", "✓ Logged out".green().bold());
        }

        Commands::Items { seller } => {
            let params = json!({ "seller_id": seller });

            let result = call_rpc(&cli.rpc_url, "item.list.v1", params).await?;
            let items: Vec<ItemRow> = serde_json::from_value(result["items"].clone())
                .context("Unexpected item list shape")?;

            if items.is_empty() {
                println!("{}", "No items for sale".yellow());
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }

        Commands::Sell {
            name,
            cost,
            description,
            pictures,
            contact,
        } => {
            let session = require_session(cli.session)?;
            let params = json!({
                "session": session,
                "name": name,
                "cost": cost,
                "description": description,
                "pictures": pictures,
                "contact": contact,
            });

            let result = call_rpc(&cli.rpc_url, "item.create.v1", params).await?;
            let item: ItemRow = serde_json::from_value(result["item"].clone())
                .context("Unexpected item shape")?;

            println!("{}", "✓ Item listed".green().bold());
            println!();

            let table = Table::new(vec![item]).to_string();
            println!("{}", table);
        }

        Commands::Claim { item_id } => {
            let session = require_session(cli.session)?;
            let params = json!({
                "session": session,
                "item_id": item_id,
            });

            let result = call_rpc(&cli.rpc_url, "item.claim.v1", params).await?;

            println!("{}", format!("✓ Claimed {}", item_id).green().bold());
            println!("  {} {}", "Queue position:".bold(), result["position"]);
        }

        Commands::Unclaim { item_id } => {
            let session = require_session(cli.session)?;
            let params = json!({
                "session": session,
                "item_id": item_id,
            });

            let result = call_rpc(&cli.rpc_url, "item.unclaim.v1", params).await?;

            if result["unclaimed"].as_bool().unwrap_or(false) {
                println!("{}", format!("✓ Left the queue for {}", item_id).green().bold());
            } else {
                println!("{}", "○ You were not in the queue".yellow());
            }
        }

        Commands::Position { item_id } => {
            let session = require_session(cli.session)?;
            let params = json!({
                "session": session,
                "item_id": item_id,
            });

            let result = call_rpc(&cli.rpc_url, "item.queue_position.v1", params).await?;
            let position = result["position"].as_u64().unwrap_or(0);

            if position == 0 {
                println!("{}", "○ Not in the queue".yellow());
            } else {
                println!("  {} {}", "Queue position:".bold(), position);
            }
        }

        Commands::Queue { item_id } => {
            let params = json!({ "item_id": item_id });

            let result = call_rpc(&cli.rpc_url, "item.queue.v1", params).await?;
            let claimants: Vec<QueueRow> = serde_json::from_value(result["claimants"].clone())
                .context("Unexpected queue shape")?;

            if claimants.is_empty() {
                println!("{}", "Queue is empty".yellow());
            } else {
                let table = Table::new(claimants).to_string();
                println!("{}", table);
            }
        }

        Commands::Status => {
            println!("{}", "Daemon Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Users:".bold(), stats["user_count"]);
                    println!("  {} {}", "Items:".bold(), stats["item_count"]);
                    println!("  {} {}", "Sessions:".bold(), stats["session_count"]);
                    println!("  {} {}", "Comments:".bold(), stats["comment_count"]);
                    println!();
                    let db_mb =
                        stats["db_size_bytes"].as_i64().unwrap_or(0) as f64 / (1024.0 * 1024.0);
                    println!("  {} {:.2} MB", "DB Size:".bold(), db_mb);
                    println!(
                        "  {} {:.1}%",
                        "Fragmentation:".bold(),
                        stats["fragmentation_percent"].as_f64().unwrap_or(0.0)
                    );
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }

        Commands::Maintenance { force_vacuum } => {
            println!("{}", "Running maintenance...".cyan().bold());
            println!();

            if force_vacuum {
                println!("  {} Force VACUUM enabled", "•".bold());
            }

            let params = json!({ "force_vacuum": force_vacuum });

            match call_rpc(&cli.rpc_url, "admin.maintenance.v1", params).await {
                Ok(result) => {
                    println!("  ✓ Maintenance completed");
                    println!();
                    if result["vacuum_run"].as_bool().unwrap_or(false) {
                        println!("  {} VACUUM executed", "✓".green());
                    } else {
                        println!("  ○ VACUUM skipped (not needed)");
                    }
                    println!(
                        "  {} {} expired sessions deleted",
                        "✓".green(),
                        result["sessions_deleted"]
                    );
                    println!(
                        "  {} {} orphaned comments deleted",
                        "✓".green(),
                        result["comments_deleted"]
                    );
                    println!();
                    let size_before_mb =
                        result["db_size_before"].as_i64().unwrap_or(0) as f64 / (1024.0 * 1024.0);
                    let size_after_mb =
                        result["db_size_after"].as_i64().unwrap_or(0) as f64 / (1024.0 * 1024.0);
                    println!(
                        "  {} {:.2} MB → {:.2} MB",
                        "DB Size:".bold(),
                        size_before_mb,
                        size_after_mb
                    );
                    let saved_mb = size_before_mb - size_after_mb;
                    if saved_mb > 0.0 {
                        println!("  {} {:.2} MB saved", "💾".bold(), saved_mb);
                    }
                }
                Err(e) => {
                    println!("  {} Maintenance failed: {}", "✗".red(), e);
                }
            }
        }
    }

    Ok(())
}
