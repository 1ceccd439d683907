use super::ParseArgs;
use crate::agents::parse_tasks;
use crate::config::Config;
use crate::llm::create_client;
use anyhow::Context;

pub async fn execute(args: ParseArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;

    let location = match args.location.as_deref() {
        Some(s) => Some(parse_lat_lon(s).context("Invalid --location, expected \"lat,lon\"")?),
        None => None,
    };

    let llm = create_client(&config);
    let tasks = parse_tasks(llm.as_ref(), &args.text, args.city.as_deref(), location).await?;

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "tasks": tasks }))?);
    Ok(())
}

fn parse_lat_lon(s: &str) -> Option<(f64, f64)> {
    let (lat, lon) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}
