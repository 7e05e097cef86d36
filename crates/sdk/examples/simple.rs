//! Simple SDK Example
//!
//! Walks through the claim-queue flow end to end.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package tradepost-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use anyhow::Result;
use tradepost_sdk::{CreateItemRequest, TradepostClient};

#[tokio::main]
async fn main() -> Result<()> {
    println!("Tradepost SDK - Simple Example");
    println!("==============================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = TradepostClient::connect("http://127.0.0.1:9640").await?;
    println!("   ✓ Connected\n");

    // Fresh username per run so the example can be re-run
    let username = format!("demo_{}", std::process::id());

    // 2. Create an account and log in
    println!("2. Creating account '{}'...", username);
    client.register(&username, "demo-password").await?;
    let login = client.login(&username, "demo-password").await?;
    println!("   ✓ Logged in as {}\n", login.user.username);

    // 3. Put an item up for sale
    println!("3. Listing an item...");
    let created = client
        .create_item(CreateItemRequest {
            session: login.session.clone(),
            name: "Road bike".to_string(),
            cost: 250,
            description: "Light frame, recently serviced".to_string(),
            pictures: vec![],
            contact: format!("{}@example.com", username),
        })
        .await?;

    println!("   ✓ Item listed:");
    println!("     - ID: {}", created.item.id);
    println!("     - Name: {}", created.item.name);
    println!("     - Cost: {}\n", created.item.cost);

    // 4. Claim it
    println!("4. Joining the claim queue...");
    let claim = client.claim(&login.session, &created.item.id).await?;
    println!("   ✓ Claimed at position {}\n", claim.position);

    // 5. Check the position and the full queue
    println!("5. Checking the queue...");
    let position = client
        .queue_position(&login.session, &created.item.id)
        .await?;
    println!("   ✓ Our position: {}", position.position);

    let queue = client.queue(&created.item.id).await?;
    println!("   ✓ Queue length: {}", queue.claimants.len());
    for entry in &queue.claimants {
        println!("     {}. {}", entry.position, entry.username);
    }
    println!();

    // 6. Release the claim
    println!("6. Leaving the queue...");
    let unclaim = client.unclaim(&login.session, &created.item.id).await?;
    if unclaim.unclaimed {
        println!("   ✓ Claim released");
    } else {
        println!("   ⚠ We were not in the queue");
    }

    // 7. Log out
    println!("7. Logging out...");
    client.logout(&login.session).await?;
    println!("   ✓ Session ended");

    println!("\n✓ Example completed successfully!");

    Ok(())
}
