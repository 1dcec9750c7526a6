//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::{self, Write};

    use impact_propagator::{Trajectory, TrajectorySample};

    pub const HEADER: &str = "time_s,x_m,y_m,z_m,vx_m_s,vy_m_s,vz_m_s,ax_m_s2,ay_m_s2,az_m_s2,altitude_km,speed_km_s";

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one propagated sample.
    #[derive(Debug, Clone, Copy)]
    pub struct Record<'a> {
        pub sample: &'a TrajectorySample,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let s = self.sample;
            let [x, y, z] = s.state.position_m;
            let [vx, vy, vz] = s.state.velocity_m_s;
            let [ax, ay, az] = s.acceleration_m_s2;
            writeln!(
                writer,
                "{:.3},{:.3},{:.3},{:.3},{:.6},{:.6},{:.6},{:.9},{:.9},{:.9},{:.6},{:.6}",
                s.time_s, x, y, z, vx, vy, vz, ax, ay, az, s.altitude_km, s.speed_km_s,
            )
        }
    }

    /// Header plus one row per recorded sample.
    pub fn write_trajectory(writer: &mut dyn Write, trajectory: &Trajectory) -> io::Result<()> {
        write_header(writer)?;
        for sample in &trajectory.samples {
            Record { sample }.write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod sidecar {
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    use chrono::{SecondsFormat, Utc};
    use impact_propagator::{TerminationRecord, Trajectory};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::writer_for_path;

    #[derive(Serialize)]
    struct Envelope<'a, T: Serialize> {
        kind: &'a str,
        generated_utc: String,
        report: &'a T,
    }

    fn now_utc() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Write `report` as pretty JSON wrapped with its kind and a generation timestamp.
    pub fn write_report<T: Serialize>(path: &Path, kind: &str, report: &T) -> io::Result<()> {
        let envelope = Envelope {
            kind,
            generated_utc: now_utc(),
            report,
        };
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, &envelope)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Per-minute snapshot kept in trajectory sidecars.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct MinuteSample {
        pub minute_index: usize,
        pub time_s: f64,
        pub altitude_km: f64,
        pub speed_km_s: f64,
    }

    #[derive(Serialize)]
    struct TrajectorySidecar<'a> {
        generated_utc: String,
        scenario: Option<&'a str>,
        timestep_s: Option<f64>,
        termination: &'a TerminationRecord,
        mass_kg: f64,
        initial_energy_j: f64,
        final_energy_j: f64,
        energy_drift: f64,
        samples: Vec<MinuteSample>,
    }

    /// Write `<stem>_summary.json` next to `output`, returning its path.
    pub fn write_trajectory_summary(
        output: &Path,
        scenario: Option<&str>,
        trajectory: &Trajectory,
    ) -> io::Result<PathBuf> {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        fs::create_dir_all(parent)?;

        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| *s != "-")
            .unwrap_or("trajectory");
        let path = parent.join(format!("{stem}_summary.json"));

        let timestep_s = match trajectory.samples.as_slice() {
            [first, second, ..] => Some(second.time_s - first.time_s),
            _ => None,
        };
        let sidecar = TrajectorySidecar {
            generated_utc: now_utc(),
            scenario,
            timestep_s,
            termination: &trajectory.termination,
            mass_kg: trajectory.mass_kg,
            initial_energy_j: trajectory.initial_energy_j,
            final_energy_j: trajectory.final_energy_j,
            energy_drift: trajectory.energy_drift(),
            samples: aggregate_minutes(trajectory),
        };
        to_writer_pretty(fs::File::create(&path)?, &sidecar)?;
        Ok(path)
    }

    /// Keep the last sample of every simulated minute.
    pub fn aggregate_minutes(trajectory: &Trajectory) -> Vec<MinuteSample> {
        let mut minutes: Vec<MinuteSample> = Vec::new();
        for sample in &trajectory.samples {
            let minute_index = (sample.time_s / 60.0).floor() as usize;
            let snapshot = MinuteSample {
                minute_index,
                time_s: sample.time_s,
                altitude_km: sample.altitude_km,
                speed_km_s: sample.speed_km_s,
            };
            match minutes.last_mut() {
                Some(last) if last.minute_index == minute_index => *last = snapshot,
                _ => minutes.push(snapshot),
            }
        }
        minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_propagator::propagate_orbit;

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let run = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 25).unwrap();
        let mut buffer = Vec::new();
        trajectory::write_trajectory(&mut buffer, &run).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(trajectory::HEADER));
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 25);
        assert!(rows[0].starts_with("0.000,0.000,10000000.000,0.000,3000.000000,"));
        assert_eq!(rows[0].split(',').count(), trajectory::HEADER.split(',').count());
    }

    #[test]
    fn minute_aggregation_keeps_last_sample_per_minute() {
        let run = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 300).unwrap();
        let minutes = sidecar::aggregate_minutes(&run);
        assert_eq!(minutes.len(), 3);
        assert_eq!(minutes[0].minute_index, 0);
        assert_eq!(minutes[0].time_s, 59.5);
        assert_eq!(minutes[2].time_s, 149.5);
    }

    #[test]
    fn report_sidecar_carries_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        sidecar::write_report(&path, "impact", &serde_json::json!({ "megatons": 1.5 })).unwrap();
        let value: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["kind"], "impact");
        assert_eq!(value["report"]["megatons"], 1.5);
        assert!(value["generated_utc"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn trajectory_summary_sits_next_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("orbit.csv");
        let run = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 10).unwrap();
        let summary = sidecar::write_trajectory_summary(&csv, Some("demo"), &run).unwrap();
        assert_eq!(summary, dir.path().join("orbit_summary.json"));
        let value: serde_json::Value =
            serde_json::from_reader(File::open(&summary).unwrap()).unwrap();
        assert_eq!(value["scenario"], "demo");
        assert_eq!(value["timestep_s"], 0.5);
        assert_eq!(value["termination"]["steps"], 10);
        assert_eq!(value["termination"]["crashed"], false);
    }
}
