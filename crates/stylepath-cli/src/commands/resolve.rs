use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use stylepath_core::{file_url, Config, Explanation, Importer};
use tracing::info;

/// JSON output of `stylepath resolve --json`.
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    ok: bool,
    specifier: &'a str,
    path: Option<PathBuf>,
    url: Option<String>,
    include_paths: Vec<PathBuf>,
}

/// Run the resolve command.
///
/// Prints the resolved `file:` URL, or exits with code 2 when no include
/// path has the specifier. With `explain`, prints the per-root trace.
pub fn run(config: &Config, specifier: &str, explain: bool, json: bool) -> Result<()> {
    let importer = Importer::new(config.include_paths.clone(), config.cwd.clone());
    info!(
        specifier,
        roots = config.include_paths.len(),
        "resolving specifier"
    );

    let resolved = if explain {
        let explanation = importer.explain(specifier).into_diagnostic()?;
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&explanation).into_diagnostic()?
            );
        } else {
            print_explain_human(&explanation);
        }
        explanation.resolved.is_some()
    } else {
        let path = importer.find_file(specifier).into_diagnostic()?;
        let url = path
            .as_deref()
            .map(file_url)
            .transpose()
            .into_diagnostic()?
            .map(|u| u.to_string());

        if json {
            let output = ResolveOutput {
                ok: path.is_some(),
                specifier,
                path: path.clone(),
                url: url.clone(),
                include_paths: importer.roots().collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).into_diagnostic()?
            );
        } else if let Some(url) = &url {
            println!("{url}");
        } else {
            eprintln!("No include path matched {specifier}");
        }
        path.is_some()
    };

    // Exit with code 2 if unresolved
    if !resolved {
        std::process::exit(2);
    }
    Ok(())
}

/// Print the explain result in human-readable format.
fn print_explain_human(explanation: &Explanation) {
    println!("Specifier: {}", explanation.specifier);
    match &explanation.url {
        Some(url) => println!("Resolved: {url}"),
        None => println!("Status: UNRESOLVED"),
    }

    for root in &explanation.roots {
        println!();
        println!("Root: {}", root.root.display());
        for (i, step) in root.trace.steps.iter().enumerate() {
            let status = if step.ok { "OK" } else { "FAIL" };
            println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);
            if let Some(path) = &step.path {
                println!("      path: {}", path.display());
            }
        }

        if root.resolved.is_none() && !root.trace.tried.is_empty() {
            println!("  Tried paths:");
            for path in &root.trace.tried {
                println!("    - {}", path.display());
            }
        }
    }
}
