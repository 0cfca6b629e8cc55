//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rollcall_core` linkage.
//! - Exercise the native store end to end (`list`, `add`, `delete`).
//!
//! Configuration comes from `ROLLCALL_*` environment variables.

use rollcall_core::{
    init_logging, KvStudentRepository, RecordController, RollcallConfig, SqliteKvStore,
    StudentFields, StudentId,
};
use std::process::ExitCode;

const USAGE: &str = "usage: rollcall [ping | list | add <first> <last> <email> | delete <id>]";

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().map(String::as_str).unwrap_or("ping");
    if command == "ping" {
        println!("rollcall_core ping={}", rollcall_core::ping());
        println!("rollcall_core version={}", rollcall_core::core_version());
        return Ok(());
    }

    let config = RollcallConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let store = SqliteKvStore::open(&config.db_path).map_err(|err| err.to_string())?;
    let mut controller =
        RecordController::load(KvStudentRepository::with_key(store, config.storage_key));

    match (command, &args[1..]) {
        ("list", []) => {
            for student in controller.students() {
                println!(
                    "{}\t{}\t{}",
                    student.id,
                    student.full_name(),
                    student.fields.email
                );
            }
            Ok(())
        }
        ("add", [first_name, last_name, email]) => {
            let fields = StudentFields::new(first_name.as_str(), last_name.as_str(), email);
            let student = controller.add(&fields).map_err(|err| err.to_string())?;
            let json = serde_json::to_string(&student).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        ("delete", [id]) => {
            if controller
                .delete(&StudentId::from(id.as_str()))
                .map_err(|err| err.to_string())?
            {
                println!("deleted {id}");
                Ok(())
            } else {
                Err(format!("student not found: {id}"))
            }
        }
        _ => Err(USAGE.to_string()),
    }
}
