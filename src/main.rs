use anyhow::Context;
use clap::Parser;
use jsx_lint_patch::utils::logger;
use jsx_lint_patch::{CliConfig, LocalStorage, PatchReport, Patcher};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let storage = if settings.atomic_write {
        LocalStorage::atomic()
    } else {
        LocalStorage::new()
    };
    let patcher = Patcher::new(storage, settings.rule.clone());
    let target = Path::new(&settings.target);

    let result = if config.dry_run {
        patcher.plan(target).map(|plan| plan.report)
    } else {
        patcher.fix(target)
    };

    match result {
        Ok(report) => {
            print_outcome(target, &report, config.dry_run);
            if config.json {
                let json =
                    serde_json::to_string_pretty(&report).context("serializing patch report")?;
                println!("{}", json);
            }
        }
        Err(e) => {
            tracing::error!("❌ Patching {} failed: {}", target.display(), e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_outcome(target: &Path, report: &PatchReport, dry_run: bool) {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());

    if dry_run {
        if report.bytes_differ() {
            println!("🔍 {} would be rewritten (dry run)", name);
        } else {
            println!("🔍 {} is already clean (dry run)", name);
        }
        return;
    }

    println!("✅ Fixed warnings in {}", name);
}
