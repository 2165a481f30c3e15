use std::io;

use voicepulse::{ApiKey, AreaCode, RateCenterName, StateCode, VoicePulseClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("VOICEPULSE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOICEPULSE_API_KEY environment variable is required",
        )
    })?;

    let client = VoicePulseClient::connect(ApiKey::new(api_key)?).await?;

    let state = StateCode::new("NJ")?;
    let area_codes = client.get_available_phone_number_area_codes(&state).await?;
    println!("area codes in NJ: {area_codes:?}");

    let area = AreaCode::new("201")?;
    let rate_centers = client
        .get_available_phone_number_rate_centers(&state, &area)
        .await?;
    for (rate_center, city) in &rate_centers {
        println!("{rate_center} ({city})");
    }

    if let Some(rate_center) = rate_centers.keys().next() {
        let numbers = client
            .get_available_phone_numbers(&state, &area, &RateCenterName::new(rate_center.as_str())?)
            .await?;
        println!("numbers in {rate_center}: {numbers:?}");
    }

    Ok(())
}
