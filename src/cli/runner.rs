use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use tracing::debug;

use crate::model::LoggingListener;
use crate::runtime::AppContext;

use super::logging::init_logging;
use super::types::{Cli, Commands, DistanceArgs, OpsCommand};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|error| error.to_string())?;
        debug!(threads, "configured worker threads");
    }
    let app = AppContext::new();

    match cli.command {
        Commands::Info { input } => {
            let image = app
                .io_service()
                .read(&input)
                .map_err(|error| error.to_string())?;
            let summary = app.image_service().summarize(&image);
            print_json(&summary)?;
        }
        Commands::Distance(args) => {
            let mut image = app
                .io_service()
                .read(&args.input)
                .map_err(|error| error.to_string())?;
            image.hierarchy.add_listener(Arc::new(LoggingListener));
            let (op, params) = distance_invocation(&args);
            let output = app
                .ops_service()
                .execute(op, Some(&mut image), &params)
                .map_err(|error| error.to_string())?;
            app.io_service()
                .write(&args.output, &image)
                .map_err(|error| error.to_string())?;
            let measurements = output.and_then(|output| output.measurements);
            print_json(&json!({
                "status": "ok",
                "output": args.output,
                "measurements": measurements.map(|table| table.values),
            }))?;
        }
        Commands::Run {
            input,
            recipe,
            output,
            report,
        } => {
            let mut image = app
                .io_service()
                .read(&input)
                .map_err(|error| error.to_string())?;
            image.hierarchy.add_listener(Arc::new(LoggingListener));
            let spec = app
                .pipeline_service()
                .load_spec(&recipe)
                .map_err(|error| error.to_string())?;
            let run_report = app
                .pipeline_service()
                .run(&spec, &mut image)
                .map_err(|error| error.to_string())?;
            app.io_service()
                .write(&output, &image)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                app.pipeline_service()
                    .save_report(report_path, &run_report)
                    .map_err(|error| error.to_string())?;
            }
            print_json(&run_report)?;
        }
        Commands::Export {
            input,
            output,
            objects,
        } => {
            let image = app
                .io_service()
                .read(&input)
                .map_err(|error| error.to_string())?;
            app.io_service()
                .export(&output, &image, objects.map(Into::into))
                .map_err(|error| error.to_string())?;
            print_json(&json!({"status": "ok", "output": output}))?;
        }
        Commands::Ops { command } => match command {
            OpsCommand::List => {
                print_json(&app.ops_service().list())?;
            }
        },
    }

    Ok(())
}

fn distance_invocation(args: &DistanceArgs) -> (&'static str, Value) {
    let mut params = json!({
        "planes": if args.flatten { "flatten" } else { "matching" },
    });
    if !args.classes.is_empty() {
        params["classes"] = json!(args.classes);
    }
    if args.detections {
        ("distance.detections", params)
    } else {
        params["signed"] = json!(args.signed);
        ("distance.annotations", params)
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
