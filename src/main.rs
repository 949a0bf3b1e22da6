use clap::Parser;
use smm_panel::app::shell::{print_history, print_services, run_shell};
use smm_panel::core::pricing::format_cost;
use smm_panel::core::{ConfigProvider, OrderForm};
use smm_panel::utils::error::ErrorSeverity;
use smm_panel::utils::validation::{mask_secret, Validate};
use smm_panel::utils::logger;
use smm_panel::{build_session, CliConfig, Command, LocalStorage, PanelConfig, PanelError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting smm-panel");

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入被拒絕
            ErrorSeverity::Medium => 2,   // 外部端點錯誤
            ErrorSeverity::High => 1,     // 設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), PanelError> {
    let config = cli.resolve()?;

    // 驗證配置
    config.validate()?;
    log_config_summary(&config);

    let mut session = build_session(&config)?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Services => print_services(&session, &mut stdout)?,
        Command::Suggest { request } => {
            let suggestion = session.suggest(&request.join(" ")).await?;
            println!("🤖 Suggestion: {}", suggestion);
        }
        Command::Order {
            service,
            link,
            quantity,
            export,
            dry_run,
        } => {
            let form = OrderForm::new(service.as_str(), link.as_str(), *quantity);

            if *dry_run {
                tracing::info!("🔍 DRY RUN MODE - the order will not be sent");
                let prepared = session.prepare(&form)?;
                println!(
                    "Would send: action=add service={} link={} quantity={} (estimated cost {})",
                    prepared.request.service_id,
                    prepared.request.link,
                    prepared.request.quantity,
                    format_cost(prepared.estimated_cost)
                );
                return Ok(());
            }

            let record = session.submit(&form).await?;
            println!(
                "✅ Order {} placed: {} x{} for {} (cost {})",
                record.order_id,
                record.service,
                record.quantity,
                record.link,
                format_cost(record.cost)
            );
            print_history(&session, &mut stdout)?;

            if let Some(filename) = export {
                let path = session.export_csv(&storage, filename).await?;
                println!("📁 Order history saved to: {}", path);
            }
        }
        Command::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_shell(
                &mut session,
                &storage,
                config.export_filename(),
                stdin,
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}

fn log_config_summary(config: &PanelConfig) {
    tracing::info!("📋 Provider: {}", config.provider_name());
    tracing::info!(
        "🔗 Order endpoint: {}",
        config.provider_endpoint().unwrap_or("<not set>")
    );
    // 金鑰只顯示遮蔽後的樣子
    if let Some(key) = config.provider_key() {
        tracing::info!("🔑 Provider key: {}", mask_secret(key));
    }
    tracing::info!("🤖 Model: {} via {}", config.llm_model(), config.llm_endpoint());
    tracing::debug!("📁 Export directory: {}", config.output_path());
}
