//! TaskPlanner CLI entry point

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, error, info};

use taskplanner::cli::{Cli, Command, OutputFormat};
use taskplanner::config::Config;
use taskplanner::domain::{Priority, TaskPlan};
use taskplanner::llm::create_client;
use taskplanner::planning::{TaskPlanner, validate_goal};
use taskplanner::store::{PlanStore, StoredPlan};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("taskplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(provider = %config.llm.provider, "TaskPlanner loaded config");

    debug!(command = ?cli.command, "run: dispatching command");
    match cli.command {
        Command::Generate { goal, format, no_save } => cmd_generate(&config, &goal, format, no_save).await,
        Command::Plans { limit, format } => cmd_plans(&config, limit, format),
        Command::Show { id, format } => cmd_show(&config, &id, format),
    }
}

async fn cmd_generate(config: &Config, goal: &str, format: OutputFormat, no_save: bool) -> Result<()> {
    let goal = validate_goal(Some(goal))?;

    let llm = create_client(&config.llm)?;
    let planner = TaskPlanner::new(llm);
    let plan = planner.build_plan(&goal).await?;

    let id = if no_save {
        None
    } else {
        let store = PlanStore::open(&config.storage.plans_dir)?;
        Some(store.save(&plan)?.id)
    };

    match format {
        OutputFormat::Json => {
            let json = match &id {
                Some(id) => serde_json::to_string_pretty(&StoredPlan {
                    id: id.clone(),
                    plan,
                })?,
                None => serde_json::to_string_pretty(&plan)?,
            };
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_plan(&plan, None);
            if let Some(id) = id {
                println!("\n{} Saved plan: {}", "✓".green(), id.cyan());
            }
        }
    }
    Ok(())
}

fn cmd_plans(config: &Config, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let store = PlanStore::open(&config.storage.plans_dir)?;
    let mut plans = store.list()?;
    if let Some(limit) = limit {
        plans.truncate(limit);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
        OutputFormat::Text if plans.is_empty() => println!("No plans found"),
        OutputFormat::Text => {
            for stored in &plans {
                let plan = &stored.plan;
                println!(
                    "{}  {}  {} tasks, {} days  {}",
                    stored.id.cyan(),
                    plan.generated_at().format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    plan.task_count(),
                    plan.total_estimated_days(),
                    plan.goal()
                );
            }
        }
    }
    Ok(())
}

fn cmd_show(config: &Config, id: &str, format: OutputFormat) -> Result<()> {
    let store = PlanStore::open(&config.storage.plans_dir)?;
    let stored = store.get(id)?.ok_or_else(|| eyre::eyre!("Plan not found: {}", id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stored)?),
        OutputFormat::Text => print_plan(&stored.plan, Some(&stored.id)),
    }
    Ok(())
}

fn print_plan(plan: &TaskPlan, id: Option<&str>) {
    println!("{} {}", "Goal:".bold(), plan.goal());
    if let Some(id) = id {
        println!("{} {}", "Plan:".bold(), id.cyan());
    }
    println!(
        "{} {} tasks, {} days total, generated {}",
        "Summary:".bold(),
        plan.task_count(),
        plan.total_estimated_days(),
        plan.generated_at().format("%Y-%m-%d %H:%M UTC")
    );

    for task in plan.tasks() {
        let priority = match task.priority {
            Priority::High => "high".red(),
            Priority::Medium => "medium".yellow(),
            Priority::Low => "low".green(),
        };
        println!(
            "\n{:>3}. {} [{}] {} days, due {}",
            task.id,
            task.task_name.bold(),
            priority,
            task.estimated_days,
            task.deadline
        );
        println!("     {}", task.description);
        if !task.depends_on.is_empty() {
            let deps: Vec<String> = task.depends_on.iter().map(u32::to_string).collect();
            println!("     {} {}", "depends on:".dimmed(), deps.join(", "));
        }
    }
}
