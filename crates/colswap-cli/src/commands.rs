use std::time::Instant;

use colswap_core::Dataset;
use colswap_engine::{DatasetFormat, SwapOrchestrator, dataset_to_bytes, read_dataset};
use colswap_plan::{SwapConfig, SwapPlan, build, config_json_schema, load_config};
use tracing::{info, warn};

use crate::atomic::{write_bytes_atomic, write_json_atomic};
use crate::cli::{Cli, Command, InputArgs, SwapArgs, default_output_file};
use crate::error::CliError;

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Swap(args) => run_swap(args),
        Command::Validate(args) => run_validate(args),
        Command::Schema => run_schema(),
    }
}

fn run_swap(args: SwapArgs) -> Result<(), CliError> {
    let SwapArgs {
        input,
        output_file,
        seed,
        format,
        report,
    } = args;

    let timer = Instant::now();
    info!(event = "run_started", command = "swap");

    let mut config = load_input_config(&input)?;
    if let Some(seed) = seed {
        config.seed = Some(seed.into());
    }
    let (input_format, dataset) = load_input_dataset(&input)?;
    let plan = build_plan(&config, &dataset)?;

    let output_format = format
        .map(DatasetFormat::from)
        .unwrap_or_else(|| input_format.output());
    let output_file = output_file
        .or_else(|| plan.output_file().map(|path| path.to_path_buf()))
        .unwrap_or_else(|| default_output_file(output_format));

    let result = SwapOrchestrator::new(&plan).run(&dataset)?;

    let bytes = dataset_to_bytes(&result.dataset, output_format)?;
    write_bytes_atomic(&output_file, &bytes)?;
    info!(
        event = "output_written",
        path = %output_file.display(),
        bytes = bytes.len(),
        rows = result.dataset.len()
    );

    if let Some(report_path) = report {
        write_json_atomic(&report_path, &result.report)?;
        info!(event = "report_written", path = %report_path.display());
    }

    info!(
        event = "run_finished",
        status = "success",
        seed = result.report.seed,
        rows_permuted = result.report.rows_permuted_total(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

fn run_validate(args: InputArgs) -> Result<(), CliError> {
    let config = load_input_config(&args)?;
    let (_, dataset) = load_input_dataset(&args)?;
    let plan = build_plan(&config, &dataset)?;

    if plan.warnings().is_empty() {
        println!("configuration validated successfully");
    } else {
        println!("configuration validated with warnings:");
        for issue in plan.warnings() {
            println!("warning {} {}: {}", issue.code, issue.path, issue.message);
            if let Some(hint) = &issue.hint {
                println!("  hint: {hint}");
            }
        }
    }
    for group in plan.groups() {
        println!(
            "group {}: [{}] unit={} policy={}",
            group.name(),
            group.column_names().join(", "),
            group.unit(),
            group.policy()
        );
    }

    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = serde_json::to_string_pretty(&config_json_schema())?;
    println!("{schema}");
    Ok(())
}

fn load_input_config(input: &InputArgs) -> Result<SwapConfig, CliError> {
    let config = load_config(&input.config)?;
    info!(
        event = "config_loaded",
        path = %input.config.display(),
        groups = config.groups.len()
    );
    Ok(config)
}

fn load_input_dataset(input: &InputArgs) -> Result<(DatasetFormat, Dataset), CliError> {
    let format = DatasetFormat::from_path(&input.data)?;
    let dataset = read_dataset(&input.data, format)?;
    info!(
        event = "dataset_loaded",
        path = %input.data.display(),
        rows = dataset.len(),
        columns = dataset.schema().len()
    );
    Ok((format, dataset))
}

fn build_plan(config: &SwapConfig, dataset: &Dataset) -> Result<SwapPlan, CliError> {
    let plan = build(config, dataset.schema())?;
    for issue in plan.warnings() {
        warn!(
            event = "plan_warning",
            code = %issue.code,
            path = %issue.path,
            "{}",
            issue.message
        );
    }
    info!(
        event = "plan_built",
        groups = plan.groups().len(),
        seed = ?plan.seed()
    );
    Ok(plan)
}
