use std::io;

use voicepulse::{ApiKey, VoicePulseClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("VOICEPULSE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOICEPULSE_API_KEY environment variable is required",
        )
    })?;

    let client = VoicePulseClient::connect(ApiKey::new(api_key)?).await?;

    let balance = client.get_balance().await?;
    println!("balance: {balance}");

    let user = client.get_user().await?;
    println!("account: {} <{}>", user.username, user.email);

    Ok(())
}
