use std::fs;
use std::path::PathBuf;

use market::{BinanceClient, ClientConfig, Interval, KlineRequest, load_candles_csv, to_candles};
use replay::{ChartOptions, build_overlay};
use smc::{AnalysisEngine, Candle, IndicatorConfig, IndicatorProfileConfig, init_logging};

const USAGE: &str = "usage:
  cargo run -p replay --bin export_indicators -- <symbol> <interval:1m|5m|15m|1h|4h|1d|...> [limit] [output_json]
  cargo run -p replay --bin export_indicators -- --csv <csv_path> <symbol> <interval> [output_json]

env: SMC_CONFIG=<profile.yaml> SMC_CHART=<chart.yaml> SMC_BASE_URL=<url> SMC_PARQUET=1 SMC_LOG=<level>";

enum Source {
    Exchange { limit: u16 },
    Csv(PathBuf),
}

struct Args {
    source: Source,
    symbol: String,
    interval: Interval,
    output: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, Box<dyn std::error::Error>> {
    if args.get(1).map(String::as_str) == Some("--csv") {
        if args.len() < 5 {
            return Err("missing arguments".into());
        }
        return Ok(Args {
            source: Source::Csv(PathBuf::from(&args[2])),
            symbol: args[3].clone(),
            interval: Interval::parse(&args[4])?,
            output: args.get(5).map(PathBuf::from),
        });
    }

    if args.len() < 3 {
        return Err("missing arguments".into());
    }
    let limit = match args.get(3) {
        Some(v) => v.parse::<u16>()?,
        None => market::MAX_KLINE_LIMIT,
    };
    Ok(Args {
        source: Source::Exchange { limit },
        symbol: args[1].clone(),
        interval: Interval::parse(&args[2])?,
        output: args.get(4).map(PathBuf::from),
    })
}

async fn load_candles(args: &Args) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
    match &args.source {
        Source::Csv(path) => Ok(load_candles_csv(path)?),
        Source::Exchange { limit } => {
            let mut config = ClientConfig::default();
            if let Ok(base_url) = std::env::var("SMC_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            let client = BinanceClient::new(config)?;
            let request = KlineRequest::new(&args.symbol, args.interval).with_limit(*limit);
            let klines = client.fetch_klines(&request).await?;
            Ok(to_candles(&klines))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let interval_label = args.interval.as_str();
    let config = match std::env::var("SMC_CONFIG") {
        Ok(path) => IndicatorProfileConfig::from_file(path)?.resolve_for(&args.symbol, interval_label),
        Err(_) => IndicatorConfig::default(),
    };
    let options = match std::env::var("SMC_CHART") {
        Ok(path) => ChartOptions::from_file(path)?,
        Err(_) => ChartOptions::default(),
    };

    let candles = load_candles(&args).await?;
    let analysis = AnalysisEngine::new(config)?.analyze(&candles)?;
    let payload = build_overlay(&args.symbol, interval_label, &candles, &analysis, &options)?;

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "smc-overlay-{}-{}.json",
            args.symbol.to_ascii_lowercase(),
            interval_label
        ))
    });
    if let Some(parent) = output.parent().filter(|x| !x.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, serde_json::to_string_pretty(&payload)?)?;

    if std::env::var("SMC_PARQUET").is_ok_and(|v| v == "1") {
        let parquet = output.with_extension("parquet");
        analysis.write_parquet(&candles, &parquet)?;
        println!("parquet: {}", parquet.display());
    }

    let summary = payload.summary;
    println!(
        "exported {} candles ({} swings, {} bos, {} choch, {} gaps) to {}",
        summary.candles,
        summary.swing_highs + summary.swing_lows,
        summary.bullish_bos + summary.bearish_bos,
        summary.bullish_choch + summary.bearish_choch,
        summary.open_gaps + summary.mitigated_gaps,
        output.display()
    );
    Ok(())
}
