use std::io;

use voicepulse::{ApiKey, DateRange, GenerateReport, ReportDate, ReportFilename, VoicePulseClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("VOICEPULSE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOICEPULSE_API_KEY environment variable is required",
        )
    })?;

    let client = VoicePulseClient::connect(ApiKey::new(api_key)?).await?;

    let request = GenerateReport::new(
        DateRange::new(ReportDate::new(2007, 3, 1)?, ReportDate::new(2007, 4, 2)?)?,
        ReportFilename::new("vpreport")?,
    );

    let filename = client.generate_report(&request).await?;
    println!("generated: {filename}");

    let url = client
        .get_report(&ReportFilename::new(filename.as_str())?)
        .await?;
    println!("download: {url}");

    Ok(())
}
