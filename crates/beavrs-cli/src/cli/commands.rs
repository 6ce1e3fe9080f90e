use super::CliError;
use anyhow::Context;
use beavrs_core::common::config::{ModelConfig, load_model_config};
use beavrs_core::control::{ControlBankAxials, control_bank_axials};
use beavrs_core::render::write_documents;
use beavrs_core::build_beavrs_model;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(clap::Args)]
pub(super) struct GenerateArgs {
    /// Model configuration JSON; defaults to the benchmark constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the documents are written into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write the per-position coolant index map
    #[arg(long)]
    coolant_map: bool,
}

#[derive(clap::Args)]
pub(super) struct ControlBanksArgs {
    /// Bank step position, 0 (all withdrawn) to 574 (all inserted)
    #[arg(long, allow_negative_numbers = true)]
    step: i64,

    /// Model configuration JSON supplying the step height and width
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the elevations as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<ModelConfig, CliError> {
    match path {
        Some(path) => {
            let config = load_model_config(path)?;
            info!(path = %path.display(), "loaded model configuration");
            Ok(config)
        }
        None => Ok(ModelConfig::default()),
    }
}

pub(super) fn run_generate_command(args: GenerateArgs) -> Result<i32, CliError> {
    let config = load_config(args.config.as_deref())?;
    let model = build_beavrs_model(&config)?;
    let written = write_documents(&model, &args.output_dir, args.coolant_map)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    info!(
        documents = written.len(),
        output_dir = %args.output_dir.display(),
        "generation complete"
    );
    Ok(0)
}

fn render_bank_table(axials: &ControlBankAxials) -> String {
    let mut content = format!("step {}\n", axials.step);
    for (label, bank) in axials.banks() {
        content.push_str(&format!(
            "bank {label}: steps {:>3}  bottom {:>10.5}  top {:>10.5}\n",
            bank.steps, bank.bottom, bank.top
        ));
    }
    content
}

pub(super) fn run_control_banks_command(args: ControlBanksArgs) -> Result<i32, CliError> {
    let config = load_config(args.config.as_deref())?;
    let axials = control_bank_axials(args.step, &config.axial)?;
    if args.json {
        let json = serde_json::to_string_pretty(&axials)
            .context("failed to serialize control bank elevations")?;
        println!("{json}");
    } else {
        print!("{}", render_bank_table(&axials));
    }
    Ok(0)
}

pub(super) fn run_config_command() -> Result<i32, CliError> {
    let json = serde_json::to_string_pretty(&ModelConfig::default())
        .context("failed to serialize the default configuration")?;
    println!("{json}");
    Ok(0)
}
