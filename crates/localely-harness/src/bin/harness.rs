//! CLI entrypoint for the localely verification harness.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use localely_core::{CharClass, InputCode};
use localely_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, now_utc,
};
use localely_harness::verify::{self, STATUS_PASS};
use localely_harness::{ClassTableFixture, ConformanceReport};

/// Verification tooling for localely.
#[derive(Debug, Parser)]
#[command(name = "localely-harness")]
#[command(about = "Cross-check localely against the host C locale")]
struct Cli {
    /// Defaults to `self-test`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the self-test and print a one-line PASS/FAIL result.
    SelfTest,
    /// Full differential run with report and structured log output.
    Verify {
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Capture the host C-locale classification table as a JSON fixture.
    Capture {
        /// Output fixture path.
        #[arg(long)]
        output: PathBuf,
        /// Optional fixed timestamp string.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Check the classifier against a captured fixture (no locale access).
    CheckFixture {
        #[arg(long)]
        fixture: PathBuf,
    },
    /// Print the members of each class.
    Table {
        /// Restrict to one class (`isdigit` or `C_isdigit`).
        #[arg(long)]
        class: Option<CharClass>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::SelfTest) {
        Command::SelfTest => Ok(self_test()),
        Command::Verify {
            report,
            log,
            timestamp,
        } => run_verify(report.as_deref(), log.as_deref(), timestamp),
        Command::Capture { output, timestamp } => capture(&output, timestamp),
        Command::CheckFixture { fixture } => check_fixture(&fixture),
        Command::Table { class } => table(class),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn self_test() -> ExitCode {
    let r = verify::run_self_test();
    let verdict = if r == STATUS_PASS { "[PASS]" } else { "[FAIL]" };
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "Localely Unit Test Results: {r} {verdict}")
        .and_then(|()| stdout.flush())
        .is_err()
    {
        return ExitCode::from(2);
    }
    if r == STATUS_PASS {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_verify(
    report: Option<&Path>,
    log: Option<&Path>,
    timestamp: Option<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let run_id = format!("verify-{}", std::process::id());
    let mut emitter = match log {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            LogEmitter::to_file(path, &run_id)?
        }
        None => LogEmitter::to_buffer(&run_id),
    };

    let started = Instant::now();
    emitter.emit(LogLevel::Info, "verify_start")?;
    let rows = verify::differential_table()?;
    for row in &rows {
        let class: CharClass = row.class.parse()?;
        let mut entry = LogEntry::new("", LogLevel::Info, "class_result").with_class(class);
        if let Some(first) = row.mismatches.first() {
            entry = entry
                .with_outcome(Outcome::Fail)
                .with_input(first.input)
                .with_status_code(row.status_code)
                .with_details(serde_json::json!({
                    "mismatches": row.mismatches.len(),
                    "expected": first.expected,
                    "actual": first.actual,
                }));
            entry.level = LogLevel::Error;
        } else {
            entry = entry
                .with_outcome(Outcome::Pass)
                .with_details(serde_json::json!({ "members": row.members }));
        }
        emitter.emit_entry(entry)?;
    }

    let report_doc = ConformanceReport {
        title: String::from("localely Conformance Report"),
        reference: String::from("host libc, LC_ALL=C"),
        timestamp: timestamp.unwrap_or_else(now_utc),
        rows,
    };

    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.total(),
        report_doc.passed(),
        report_doc.failed()
    );

    let mut artifacts = Vec::new();
    if let Some(report_path) = report {
        if let Some(parent) = report_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        eprintln!("Writing report to {}", report_path.display());
        let markdown = report_doc.to_markdown();
        std::fs::write(report_path, &markdown)?;
        let json_path = report_path.with_extension("json");
        let json = report_doc.to_json();
        std::fs::write(&json_path, &json)?;

        let mut index = ArtifactIndex::new(&run_id);
        index.add_bytes(report_path.display().to_string(), "report_markdown", markdown.as_bytes());
        index.add_bytes(json_path.display().to_string(), "report_json", json.as_bytes());
        let index_path = report_path.with_extension("artifacts.json");
        std::fs::write(&index_path, index.to_json()?)?;
        artifacts.extend(index.artifacts.into_iter().map(|a| a.path));
        artifacts.push(index_path.display().to_string());
    }

    let outcome = if report_doc.all_passed() {
        Outcome::Pass
    } else {
        Outcome::Fail
    };
    emitter.emit_entry(
        LogEntry::new("", LogLevel::Info, "verify_end")
            .with_outcome(outcome)
            .with_status_code(report_doc.status_code())
            .with_duration_ms(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX))
            .with_artifacts(artifacts),
    )?;
    emitter.flush()?;

    if !report_doc.all_passed() {
        return Err(format!(
            "Conformance verification failed (status {})",
            report_doc.status_code()
        )
        .into());
    }
    Ok(ExitCode::SUCCESS)
}

fn capture(output: &Path, timestamp: Option<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let captured_at = timestamp.unwrap_or_else(now_utc);
    let fixture = ClassTableFixture::capture_host(&captured_at)?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, fixture.to_json()?)?;
    eprintln!("Captured {} class tables to {}", fixture.tables.len(), output.display());
    Ok(ExitCode::SUCCESS)
}

fn check_fixture(path: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    eprintln!("Checking classifier against {}", path.display());
    let fixture = ClassTableFixture::from_file(path)?;
    let checked = fixture.check()?;
    eprintln!("Fixture check passed: {checked} comparisons ({})", fixture.reference);
    Ok(ExitCode::SUCCESS)
}

fn table(class: Option<CharClass>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let classes = match class {
        Some(class) => vec![class],
        None => CharClass::ALL.to_vec(),
    };
    let mut stdout = std::io::stdout().lock();
    for class in classes {
        let members: Vec<String> = InputCode::all()
            .filter(|ch| class.matches(ch.get()))
            .filter_map(InputCode::as_byte)
            .map(render_byte)
            .collect();
        writeln!(stdout, "{:<9} {:>3}  {}", class.name(), members.len(), members.join(""))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn render_byte(b: u8) -> String {
    match b {
        b'\\' => "\\\\".to_string(),
        b' ' => "\\s".to_string(),
        b if b.is_ascii_graphic() => (b as char).to_string(),
        b => format!("\\x{b:02X}"),
    }
}
