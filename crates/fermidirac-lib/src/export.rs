//! CSV rendering of a single occupation curve.
//!
//! Rows carry the energy and occupation at six decimals followed by the
//! generating temperature and chemical potential:
//!
//! ```text
//! Energy (eV),Occupation f(E),Temperature (K),Mu (eV)
//! -1.000000,1.000000,300,0.5
//! ```

use std::io::Write;

use csv::WriterBuilder;

use crate::curve::OccupationCurve;
use crate::error::Result;

/// Header row of exported curves.
pub const CSV_HEADER: [&str; 4] = [
    "Energy (eV)",
    "Occupation f(E)",
    "Temperature (K)",
    "Mu (eV)",
];

/// Write `curve` as CSV to `writer`.
pub fn write_curve_csv<W: Write>(writer: W, curve: &OccupationCurve, mu: f64) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let temperature = curve.temperature().to_string();
    let mu = mu.to_string();
    for (energy, occupation) in curve.points() {
        csv_writer.write_record([
            format!("{energy:.6}"),
            format!("{occupation:.6}"),
            temperature.clone(),
            mu.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render `curve` as a CSV string.
pub fn curve_to_csv(curve: &OccupationCurve, mu: f64) -> Result<String> {
    let mut buffer = Vec::new();
    write_curve_csv(&mut buffer, curve, mu)?;
    let csv = String::from_utf8(buffer)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    Ok(csv)
}

/// Suggested download file name for a curve at `temperature`.
pub fn csv_filename(temperature: f64) -> String {
    format!("fermi_dirac_T{temperature}K.csv")
}
