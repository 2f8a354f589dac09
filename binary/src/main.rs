use std::process::ExitCode;
use std::time::Instant;

use fahrplan::config::ScheduleConfig;
use fahrplan::csv_import::CsvImportOptions;
use fahrplan::{
    export_schedule_xml_to_file_path, import_schedule_csv_from_path, StandardSlugGenerator,
};

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config = match ScheduleConfig::from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading config '{config_path}': {e}");
            return ExitCode::FAILURE;
        }
    };
    let conference = match config.conference.conference() {
        Ok(conference) => conference,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut slugs = StandardSlugGenerator::new(&conference);
    let options = CsvImportOptions {
        default_recording_license: config.conference.license.clone(),
        verbose: false,
    };
    let now = Instant::now();
    let schedule =
        match import_schedule_csv_from_path(&config.source, conference, &mut slugs, &options) {
            Ok(schedule) => schedule,
            Err(e) => {
                eprintln!("Error importing '{}': {e}", config.source);
                return ExitCode::FAILURE;
            }
        };
    println!(
        "Imported {} events in {} room(s) from {} in {:#?}",
        schedule.event_count(),
        schedule.rooms().len(),
        config.source,
        now.elapsed()
    );

    if let Err(e) = export_schedule_xml_to_file_path(&schedule, &config.output) {
        eprintln!("Error writing '{}': {e}", config.output);
        return ExitCode::FAILURE;
    }
    println!("Wrote schedule to {}", config.output);
    ExitCode::SUCCESS
}
