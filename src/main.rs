use clap::Parser;
use plan_compare::app::session::run_session;
use plan_compare::core::ConfigProvider;
use plan_compare::utils::error::{CompareError, ErrorSeverity};
use plan_compare::utils::logger;
use plan_compare::utils::validation::validate_range;
use plan_compare::{
    render, source_from_config, Budget, CliConfig, ComparisonController, LoadStatus, LocalOutput,
};
use tokio::io::BufReader;

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 可重試 (reload)
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &CompareError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting plan-compare");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = cli.resolve().unwrap_or_else(|e| fail(&e));
    let range = config.budget_range();

    let initial = match cli.budget {
        Some(raw) => {
            let budget = Budget::try_from(raw).unwrap_or_else(|e| fail(&e));
            if let Err(e) = validate_range("--budget", budget.dollars(), range.min(), range.max()) {
                fail(&e);
            }
            Some(budget)
        }
        None => None,
    };

    let source = source_from_config(&config).unwrap_or_else(|e| fail(&e));
    let mut controller = ComparisonController::from_config(source, &config);
    if let Some(budget) = initial {
        controller.set_budget(budget);
    }

    let loaded = tokio::select! {
        status = controller.load() => Some(status),
        _ = tokio::signal::ctrl_c() => None,
    };
    let Some(status) = loaded else {
        controller.close();
        tracing::warn!("Interrupted before the catalog finished loading");
        std::process::exit(130);
    };

    if cli.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        if let Err(e) = run_session(&mut controller, stdin, &mut stdout, cli.format).await {
            fail(&e);
        }
        return Ok(());
    }

    if status == LoadStatus::Failed {
        let detail = controller.failure_detail().unwrap_or("unknown error");
        tracing::error!("❌ Catalog load failed: {}", detail);
        eprintln!("❌ Unable to load pricing data. Please reload.");
        eprintln!("💡 Check that the catalog source is reachable: {}", detail);
        std::process::exit(exit_code(ErrorSeverity::Medium));
    }

    let rendered =
        render(&controller.view(), controller.range(), cli.format).unwrap_or_else(|e| fail(&e));
    let destination = LocalOutput::new(cli.output.clone())
        .write(&rendered)
        .await
        .unwrap_or_else(|e| fail(&e));

    if destination != "stdout" {
        tracing::info!("📁 Comparison saved to: {}", destination);
    }
    controller.close();

    Ok(())
}
