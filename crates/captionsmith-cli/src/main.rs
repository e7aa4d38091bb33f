//! captionsmith: replays recorded caption fragments through the synthesis pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use captionsmith_core::SynthesisConfig;
use captionsmith_runtime::{
    create_batch_report, to_json_envelope, to_srt, to_txt_report, SynthesisJob, Synthesizer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> PathBuf {
    std::env::var("CAPTIONSMITH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("captionsmith.json"))
}

fn print_usage() {
    println!("captionsmith: caption cleaning and narrative synthesis");
    println!();
    println!("Usage: captionsmith <command>");
    println!();
    println!("Commands:");
    println!("  synthesize <job.json>    Build a description record from recorded fragments");
    println!("  srt <job.json>           Render the detailed description as SRT cues");
    println!("  report <job.json>        Render a plain-text report");
    println!("  batch <job.json>...      Plain-text report over several jobs");
    println!("  clean <text> [prompt]    Clean one raw fragment");
    println!("  insights <caption>       Extract insights from a caption");
    println!("  help                     Show this help message");
}

/// Run a job file through a synthesizer configured from file, env and job.
fn run_job(path: &Path) -> anyhow::Result<(SynthesisJob, captionsmith_core::DescriptionRecord)> {
    let config = SynthesisConfig::load(&resolve_config_path())?.with_env_overrides()?;
    let job = SynthesisJob::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to load job {}: {}", path.display(), e))?;
    let config = job.apply_to(config);

    let synth = Synthesizer::new(config, Arc::new(job.generator()));
    let record = synth.describe(&[])?;
    info!(
        "Synthesized {} ({} chars, detailed={})",
        path.display(),
        record.detailed_description.chars().count(),
        record.has_detailed
    );
    Ok((job, record))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "synthesize" | "--synthesize" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: captionsmith synthesize <job.json>");
                std::process::exit(1);
            };
            let (job, record) = run_job(Path::new(path))?;
            println!("{}", to_json_envelope(&record, job.metadata.as_ref())?);
        }
        "srt" | "--srt" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: captionsmith srt <job.json>");
                std::process::exit(1);
            };
            let (_, record) = run_job(Path::new(path))?;
            let text = if record.has_detailed {
                &record.detailed_description
            } else {
                &record.caption
            };
            print!("{}", to_srt(text));
        }
        "report" | "--report" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: captionsmith report <job.json>");
                std::process::exit(1);
            };
            let (_, record) = run_job(Path::new(path))?;
            println!("{}", to_txt_report(&record, true));
        }
        "batch" | "--batch" => {
            if args.len() < 3 {
                eprintln!("Usage: captionsmith batch <job.json>...");
                std::process::exit(1);
            }
            let mut records = Vec::with_capacity(args.len() - 2);
            for path in &args[2..] {
                records.push(run_job(Path::new(path))?.1);
            }
            let report = create_batch_report(&records)?;
            info!(
                "Batch done: {} successful, {} failed",
                report.summary.successful, report.summary.failed
            );
            println!("{}", report.txt);
        }
        "clean" | "--clean" => {
            let Some(text) = args.get(2) else {
                eprintln!("Usage: captionsmith clean <text> [prompt]");
                std::process::exit(1);
            };
            let prompt = args.get(3).map(String::as_str).unwrap_or("");
            println!("{}", captionsmith_text::clean(text, prompt));
        }
        "insights" | "--insights" => {
            let caption = args[2..].join(" ");
            let insights = captionsmith_insight::extract_insights(&caption);
            println!("{}", serde_json::to_string_pretty(&insights)?);
        }
        "--help" | "-h" | "help" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown command: {}. Use 'captionsmith help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
