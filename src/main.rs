use clap::Parser;
use scan_ai_rust::{cli, client, config, error, flow, picker, terminal};
use cli::{Cli, Commands};
use client::HttpPredictionService;
use config::Config;
use error::Result;
use flow::{FlowOutcome, ImageSubmissionFlow};
use picker::{FolderPicker, MediaPicker, PathPicker, PickerOptions};
use terminal::{TerminalNotifier, TerminalRenderer};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Classify { image, folder, crop, no_edit, json } => {
            let picker: Box<dyn MediaPicker> = match image {
                Some(path) => Box::new(PathPicker::new(path)),
                None => Box::new(FolderPicker::new(folder.unwrap_or_else(|| ".".into()))),
            };
            let options = PickerOptions {
                allows_editing: !no_edit,
                crop,
                ..PickerOptions::default()
            };

            let config = effective_config(cli.endpoint.as_deref())?;
            let service = HttpPredictionService::from_config(&config)?;
            let mut flow = ImageSubmissionFlow::new(
                picker,
                service,
                TerminalRenderer::new(json),
                TerminalNotifier,
            )
            .with_options(options);

            let outcome = flow.select_image().await;
            drop(flow);

            match outcome {
                FlowOutcome::Succeeded(prediction) => {
                    if json {
                        println!("{}", serde_json::to_string(&prediction)?);
                    }
                }
                FlowOutcome::Cancelled => {
                    if !json {
                        println!("キャンセルしました");
                    }
                }
                FlowOutcome::Failed(reason) => {
                    eprintln!("  {}", reason);
                    std::process::exit(1);
                }
            }
        }

        Commands::Ping => {
            let config = effective_config(cli.endpoint.as_deref())?;
            let service = HttpPredictionService::from_config(&config)?;
            let root = service.settings().service_root();
            let status = service.health().await?;
            println!("✔ {} : {}", root, status.message);
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            // 環境変数・--endpoint による上書きは保存しない
            let mut config = Config::load_for_edit(&Config::config_path()?)?;

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.timeout_seconds = (seconds > 0).then_some(seconds);
                config.save()?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.upload.endpoint_url);
                println!("  フィールド名: {}", config.upload.field_name);
                println!("  ファイル名: {}", config.upload.file_name);
                println!("  MIMEタイプ: {}", config.upload.mime_type);
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// 設定ファイル < SCAN_AI_ENDPOINT < --endpoint
fn effective_config(endpoint: Option<&str>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(endpoint) = endpoint {
        config::validate_endpoint(endpoint)?;
        config.upload.endpoint_url = endpoint.to_string();
    }
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
