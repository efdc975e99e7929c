// classdex/src/commands.rs

use anyhow::{
    Result,
    Context,
    anyhow
};
use std::{
    env,
    path::PathBuf
};
use crate::{
    loader::PathLoader,
    query,
    report,
    summary,
    util
};

pub fn run_cli() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let cmd = args.first().map(|s| s.as_str()).unwrap_or("help");
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };

    match cmd {
        "subclasses" => print_entries(rest, EntryKind::Subclasses)?,
        "annotated"  => print_entries(rest, EntryKind::Annotated)?,
        "package"    => print_entries(rest, EntryKind::Package)?,
        "summary"    => print_summary(rest)?,
        "report"     => print_report(rest)?,
        "help" | _   => print_help(),
    }
    Ok(())
}

enum EntryKind {
    Subclasses,
    Annotated,
    Package,
}

struct CliArgs {
    name: Option<String>,
    roots: Vec<PathBuf>,
    json: bool,
}

/// Hand-rolled flag parsing: one positional name, repeatable `--root`,
/// optional `--json`. Roots fall back to $CLASSDEX_PATH, then the cwd.
fn parse_args(rest: &[String]) -> Result<CliArgs> {
    let mut name = None;
    let mut roots = Vec::new();
    let mut json = false;

    let mut it = rest.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--root" => {
                let dir = it.next().ok_or_else(|| anyhow!("--root needs a directory"))?;
                roots.push(PathBuf::from(dir));
            }
            "--json" => json = true,
            other if name.is_none() => name = Some(other.to_string()),
            other => return Err(anyhow!("unexpected argument: {other}")),
        }
    }

    if roots.is_empty() {
        roots = roots_from_env()?;
    }
    Ok(CliArgs { name, roots, json })
}

fn roots_from_env() -> Result<Vec<PathBuf>> {
    if let Ok(path) = env::var("CLASSDEX_PATH") {
        let roots: Vec<PathBuf> = path
            .split(':')
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if !roots.is_empty() {
            return Ok(roots);
        }
    }
    Ok(vec![env::current_dir().context("failed to get current_dir")?])
}

fn print_entries(rest: &[String], kind: EntryKind) -> Result<()> {
    let args = parse_args(rest)?;
    let name = args
        .name
        .ok_or_else(|| anyhow!("missing type or package name"))?;
    let loader = PathLoader::new(args.roots);

    let entries = match kind {
        EntryKind::Subclasses => query::subclass_entries(&loader, &name)?,
        EntryKind::Annotated => query::annotated_entries(&loader, &name)?,
        EntryKind::Package => query::package_entries(&loader, &name)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&util::sorted(&entries))?);
    } else {
        for record in util::sorted(&entries) {
            println!("{record}");
        }
    }
    Ok(())
}

fn print_summary(rest: &[String]) -> Result<()> {
    let args = parse_args(rest)?;
    let name = args.name.ok_or_else(|| anyhow!("missing type name"))?;
    let loader = PathLoader::new(args.roots);

    match summary::type_summary(&loader, &name)? {
        Some(text) => println!("{text}"),
        None => println!("(no summary indexed for {name})"),
    }
    Ok(())
}

fn print_report(rest: &[String]) -> Result<()> {
    let args = parse_args(rest)?;
    let rep = report::build_report(&args.roots)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rep)?);
    } else {
        let out = PathBuf::from("SIDECAR_REPORT.md");
        report::write_report_markdown(&rep, &out)?;
        println!("Report written to {}", out.display());
    }
    Ok(())
}

fn print_help() {
    println!("classdex — query pre-built sidecar type indexes");
    println!();
    println!("USAGE:");
    println!("  classdex subclasses <fq-name>   list subclass index records");
    println!("  classdex annotated  <fq-name>   list annotation index records");
    println!("  classdex package    <package>   list package membership records");
    println!("  classdex summary    <fq-name>   print the indexed doc summary");
    println!("  classdex report                 summarize all sidecars under the roots");
    println!();
    println!("OPTIONS:");
    println!("  --root <dir>   add an index root (repeatable)");
    println!("  --json         machine output (entries and report)");
    println!();
    println!("Roots default to $CLASSDEX_PATH (colon-separated), then the current directory.");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/* ================================== Tests ================================== */
