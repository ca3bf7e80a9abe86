// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod args;
mod filter;
mod report;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use kmp_model::ArtifactPool;
use kmp_printer::KotlinMetadataPrinter;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::args::{Args, Config};
use crate::filter::ClassNameFilter;
use crate::report::Report;

/// Print the artifacts of `pool` accepted by `filter`, as text or as a JSON report.
fn render(
    pool: &ArtifactPool,
    filter: Option<&ClassNameFilter>,
    config: &Config,
    input: &str,
) -> Result<String, eyre::Report> {
    let printer = KotlinMetadataPrinter::new(pool, config.printer.clone());
    let mut report = Report::new(input);
    let mut blobs = vec![];
    for artifact in pool
        .iter()
        .filter(|artifact| filter.is_none_or(|f| f.matches(&artifact.name)))
    {
        let printed = printer.print(artifact);
        report.record(artifact, printed.as_deref());
        blobs.extend(printed);
    }
    info!(
        "Printed {} of {} classes",
        blobs.len(),
        report.statistics.java.classes
    );

    if config.output.json {
        let mut json =
            serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
        json.push('\n');
        return Ok(json);
    }

    let classes = report.statistics.java.classes;
    if classes == 0 {
        info!("No classes found");
    } else if report.kotlin_metadata_count() == 0 {
        info!("No Kotlin metadata found in {classes} classes");
    }
    Ok(blobs.join(config.output.divider.as_str()))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), eyre::Report> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .wrap_err_with(|| format!("Unable to create output file {path:?}"))?;
            file.write_all(text.as_bytes())?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NONE)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_names(false)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber).unwrap_or_else(|e| {
        eprintln!("Unable to set configure logging: {e}");
        std::process::exit(1);
    });

    let config = args.load_config()?;
    let filter = args
        .filter
        .as_deref()
        .map(ClassNameFilter::parse)
        .transpose()?;

    let pool = ArtifactPool::load(&args.input)
        .wrap_err_with(|| format!("Failed printing Kotlin metadata of {:?}", args.input))?;
    let input = args
        .input
        .file_name()
        .map_or_else(|| args.input.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        });

    let text = render(&pool, filter.as_ref(), &config, &input)?;
    write_output(args.output.as_deref(), &text)
}
