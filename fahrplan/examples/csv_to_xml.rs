use std::time::Instant;

use fahrplan::config::ScheduleConfig;
use fahrplan::csv_import::CsvImportOptions;
use fahrplan::{
    export_schedule_xml_to_file_path, import_schedule_csv_from_path, StandardSlugGenerator,
};

/// Convert a CSV talk list into a Fahrplan XML file, driven by a JSON config
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = ScheduleConfig::from_path(config_path)?;
    let conference = config.conference.conference()?;

    let mut slugs = StandardSlugGenerator::new(&conference);
    let options = CsvImportOptions {
        default_recording_license: config.conference.license.clone(),
        verbose: true,
    };

    let now = Instant::now();
    let schedule =
        import_schedule_csv_from_path(&config.source, conference, &mut slugs, &options)?;
    println!(
        "Imported {} events in {:#?}",
        schedule.event_count(),
        now.elapsed()
    );

    export_schedule_xml_to_file_path(&schedule, &config.output)?;
    println!("Wrote {}", config.output);
    Ok(())
}
