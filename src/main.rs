use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blendworker::domain::blend::PARAM_BLEND_SPEC;
use blendworker::{BlendWorker, LocalWorkerContext, Worker};

/// Run one alloy-blend optimization job locally
#[derive(Parser)]
#[command(name = "blendworker", version, about)]
struct Args {
    /// Job identifier
    #[arg(long, default_value = "local")]
    job_id: String,

    /// JSON file holding a full blend spec (defaults to the built-in
    /// sample problem)
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Additional job parameters as KEY=VALUE, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Core budget to request from the engine (defaults to the machine's
    /// available parallelism)
    #[arg(long)]
    cores: Option<usize>,

    /// Directory where artifacts are written (defaults to a process-scoped
    /// temp directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut parameters = HashMap::new();
    if let Some(path) = &args.spec {
        parameters.insert(
            PARAM_BLEND_SPEC.to_string(),
            std::fs::read_to_string(path)?,
        );
    }
    for pair in &args.params {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("parameter '{}' is not KEY=VALUE", pair))?;
        parameters.insert(key.to_string(), value.to_string());
    }

    let cores = args.cores.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    let output_dir = args.output_dir.unwrap_or_else(|| {
        std::env::temp_dir().join(format!("blendworker-{}", std::process::id()))
    });
    std::fs::create_dir_all(&output_dir)?;

    let mut ctx = LocalWorkerContext::new(output_dir, cores);
    let worker = BlendWorker::new();
    let status = worker.process(&mut ctx, &args.job_id, &parameters)?;

    println!("Status: {}", status);
    if let Some(effective) = ctx.effective_worker_cores_limit() {
        println!("Cores:  requested {}, effective {}", cores, effective);
    }
    if !ctx.solve_details().is_empty() {
        println!("Details:");
        for (key, value) in ctx.solve_details() {
            println!("  {} = {}", key, value);
        }
    }
    if !ctx.output_attachments().is_empty() {
        println!("Artifacts:");
        for (name, path) in ctx.output_attachments() {
            println!("  {} -> {}", name, path.display());
        }
    }
    Ok(())
}
