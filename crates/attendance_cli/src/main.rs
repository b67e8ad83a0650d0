//! Command-line front end for the attendance store.
//!
//! # Responsibility
//! - Parse configuration (database path, logging) from args and env.
//! - Run exactly one store operation per invocation and print plain rows.
//!
//! # Invariants
//! - Output is tab-separated with no locale-specific formatting.
//! - Expected duplicates exit with status 1; unexpected errors with 2.

use attendance_core::{
    core_version, default_log_level, init_logging, AttendanceMark, AttendanceStatus,
    AttendanceStore, ClassId, MarkOutcome, ReportRow, REPORT_COLUMNS,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "attendance", version, about = "Class attendance records")]
struct Cli {
    /// Database file; created on first use.
    #[arg(long, env = "ATTENDANCE_DB", default_value = "attendance.db")]
    db: PathBuf,
    #[command(flatten)]
    logging: LoggingArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct LoggingArgs {
    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "ATTENDANCE_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "ATTENDANCE_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the schema.
    Init,
    #[command(subcommand)]
    Student(StudentCommand),
    #[command(subcommand)]
    Class(ClassCommand),
    /// Enroll a student in a class.
    Enroll { student_id: String, class_id: ClassId },
    /// List students enrolled in a class.
    Roster { class_id: ClassId },
    /// Record one status, e.g. `mark 1 2024-01-05 S1 present`.
    Mark {
        class_id: ClassId,
        date: String,
        student_id: String,
        status: String,
    },
    /// Record `STUDENT_ID=STATUS` pairs for a whole class on one date.
    MarkAll {
        class_id: ClassId,
        date: String,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Print attendance of a class between two dates (inclusive).
    Report {
        class_id: ClassId,
        start_date: String,
        end_date: String,
    },
}

#[derive(Debug, Subcommand)]
enum StudentCommand {
    Add { id: String, full_name: String },
    List,
    Rename { id: String, full_name: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum ClassCommand {
    Add { name: String },
    List,
    Rename { id: ClassId, name: String },
    Delete { id: ClassId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli.logging) {
        eprintln!("error: {err}");
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn start_logging(args: &LoggingArgs) -> Result<(), Box<dyn Error>> {
    let Some(log_dir) = args.log_dir.as_deref() else {
        return Ok(());
    };
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );
    Ok(())
}

/// Returns `Ok(false)` when the store rejected a duplicate.
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let mut store = AttendanceStore::open(&cli.db)?;

    let accepted = match cli.command {
        Command::Init => {
            store.initialize_schema()?;
            println!("initialized {}", cli.db.display());
            true
        }
        Command::Student(command) => run_student(&store, command)?,
        Command::Class(command) => run_class(&store, command)?,
        Command::Enroll {
            student_id,
            class_id,
        } => note_rejection(
            store.enroll_student(&student_id, class_id)?,
            "already enrolled, or unknown student/class",
        ),
        Command::Roster { class_id } => {
            for student in store.list_students_in_class(class_id)? {
                println!("{}\t{}", student.id, student.full_name);
            }
            true
        }
        Command::Mark {
            class_id,
            date,
            student_id,
            status,
        } => {
            let status = status.parse::<AttendanceStatus>()?;
            let outcome = store.mark_attendance(&student_id, class_id, &date, status)?;
            println!("{}", outcome_label(outcome));
            true
        }
        Command::MarkAll {
            class_id,
            date,
            entries,
        } => {
            let marks = entries
                .iter()
                .map(|entry| parse_mark(entry))
                .collect::<Result<Vec<_>, _>>()?;
            let outcomes = store.mark_attendance_batch(class_id, &date, &marks)?;
            println!("marked {}", outcomes.len());
            true
        }
        Command::Report {
            class_id,
            start_date,
            end_date,
        } => {
            let report = store.get_attendance_report(class_id, &start_date, &end_date)?;
            print_report(&report);
            true
        }
    };

    Ok(accepted)
}

fn run_student(store: &AttendanceStore, command: StudentCommand) -> Result<bool, Box<dyn Error>> {
    let accepted = match command {
        StudentCommand::Add { id, full_name } => {
            note_rejection(store.add_student(&id, &full_name)?, "student id already exists")
        }
        StudentCommand::List => {
            for student in store.list_students()? {
                println!("{}\t{}", student.id, student.full_name);
            }
            true
        }
        StudentCommand::Rename { id, full_name } => {
            store.update_student(&id, &full_name)?;
            true
        }
        StudentCommand::Delete { id } => {
            store.delete_student(&id)?;
            true
        }
    };
    Ok(accepted)
}

fn run_class(store: &AttendanceStore, command: ClassCommand) -> Result<bool, Box<dyn Error>> {
    let accepted = match command {
        ClassCommand::Add { name } => {
            note_rejection(store.add_class(&name)?, "class name already exists")
        }
        ClassCommand::List => {
            for class in store.list_classes()? {
                println!("{}\t{}", class.id, class.name);
            }
            true
        }
        ClassCommand::Rename { id, name } => {
            note_rejection(store.update_class(id, &name)?, "class name already exists")
        }
        ClassCommand::Delete { id } => {
            store.delete_class(id)?;
            true
        }
    };
    Ok(accepted)
}

fn note_rejection(accepted: bool, rejection: &str) -> bool {
    if !accepted {
        eprintln!("rejected: {rejection}");
    }
    accepted
}

fn parse_mark(entry: &str) -> Result<AttendanceMark, Box<dyn Error>> {
    let (student_id, status) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected STUDENT_ID=STATUS, got `{entry}`"))?;
    Ok(AttendanceMark::new(student_id, status.parse::<AttendanceStatus>()?))
}

fn outcome_label(outcome: MarkOutcome) -> &'static str {
    match outcome {
        MarkOutcome::Inserted => "recorded",
        MarkOutcome::Updated => "updated",
    }
}

fn print_report(report: &[ReportRow]) {
    println!("{}", REPORT_COLUMNS.join("\t"));
    for row in report {
        println!("{}", row.cells().join("\t"));
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_mark, Cli};
    use attendance_core::AttendanceStatus;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_mark_splits_id_and_status() {
        let mark = parse_mark("S1=late").unwrap();
        assert_eq!(mark.student_id, "S1");
        assert_eq!(mark.status, AttendanceStatus::Late);
        assert!(parse_mark("S1").is_err());
        assert!(parse_mark("S1=sick").is_err());
    }
}
