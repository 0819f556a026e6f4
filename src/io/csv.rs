use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::state::KinematicState;

/// Write trajectory samples to CSV format.
///
/// Columns: time, x, y, z, vx, vy, vz, speed
pub fn write_samples<W: Write>(writer: &mut W, samples: &[KinematicState]) -> io::Result<()> {
    writeln!(writer, "time,x,y,z,vx,vy,vz,speed")?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.pos.x, s.pos.y, s.pos.z,
            s.vel.x, s.vel.y, s.vel.z,
            s.speed(),
        )?;
    }

    Ok(())
}

/// Write samples to a CSV file at the given path.
pub fn write_samples_file(path: impl AsRef<Path>, samples: &[KinematicState]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_samples(&mut file, samples)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = vec![
            KinematicState::new(Vector3::zeros(), Vector3::new(3.0, 4.0, 0.0)),
            KinematicState { time: 0.01, pos: Vector3::new(0.03, 0.04, 0.0), vel: Vector3::new(3.0, 3.9, 0.0) },
        ];

        let mut buf = Vec::new();
        write_samples(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,x,y,z,vx,vy,vz,speed");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "0.0000,0.0000,0.0000,0.0000,3.0000,4.0000,0.0000,5.0000");
        assert!(lines[2].starts_with("0.0100,0.0300,"));
    }
}
