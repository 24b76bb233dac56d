use clap::Parser;
use ist_time::config::cli::convert_each;
use ist_time::config::toml_config::JobConfig;
use ist_time::utils::error::{ErrorSeverity, IstError};
use ist_time::utils::{logger, validation::Validate};
use ist_time::{now_ist_iso, CliConfig, Command, FilePipeline, LocalStorage, NormalizeEngine};
use std::io::BufRead;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config.command) {
        tracing::error!(
            "❌ ist-time failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(command: Command) -> Result<(), IstError> {
    match command {
        Command::Now => {
            println!("{}", now_ist_iso());
            Ok(())
        }
        Command::Convert { values, strict } => convert(values, strict),
        Command::Normalize(args) => {
            let job = args.into_job_config();
            job.validate()?;
            run_job(LocalStorage::new("."), job)
        }
        Command::Job { config, dry_run } => {
            tracing::info!("📁 Loading configuration from: {}", config);
            let job = JobConfig::from_file(&config)?;
            job.validate()?;

            if dry_run {
                display_job_summary(&job);
                return Ok(());
            }

            // 相對路徑以設定檔所在目錄為準
            run_job(LocalStorage::for_config_file(&config), job)
        }
    }
}

fn convert(values: Vec<String>, strict: bool) -> Result<(), IstError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if values.is_empty() {
        convert_each(std::io::stdin().lock().lines(), &mut out, strict)?;
    } else {
        convert_each(values.into_iter().map(Ok), &mut out, strict)?;
    }

    Ok(())
}

fn run_job(storage: LocalStorage, job: JobConfig) -> Result<(), IstError> {
    tracing::info!("🚀 Running job '{}'", job.name());

    let pipeline = FilePipeline::new(storage, job);
    let engine = NormalizeEngine::new(pipeline);
    let report = engine.run()?;

    println!(
        "✅ {} records written to {} ({} converted, {} passed through, {} cleared, {} skipped)",
        report.records,
        report.output_path,
        report.stats.converted,
        report.stats.passed_through,
        report.stats.cleared,
        report.stats.skipped
    );

    Ok(())
}

fn display_job_summary(job: &JobConfig) {
    tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
    println!("Job:     {}", job.name());
    println!(
        "Input:   {} ({})",
        job.input.path,
        job.resolved_input_format().as_str()
    );
    println!("Fields:  {}", job.normalize.fields.join(", "));
    println!("Strict:  {}", job.is_strict());
    println!(
        "Output:  {} ({})",
        job.output.path,
        job.resolved_output_format().as_str()
    );
}
