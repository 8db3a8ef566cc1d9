use std::path::Path;

use lucky_core::{classify, FACES};

/// Every ordered pick of three distinct faces.
pub fn ordered_picks() -> Vec<[u8; 3]> {
    let mut out = Vec::with_capacity(120);
    for a in FACES {
        for b in FACES {
            for c in FACES {
                if a != b && b != c && a != c {
                    out.push([a, b, c]);
                }
            }
        }
    }
    out
}

/// Writes the scored table to `path`, returning the row count.
pub fn write_csv(path: &Path) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["first", "second", "third", "total", "pattern", "message"])?;
    let mut rows = 0;
    for picks in ordered_picks() {
        let result = classify(picks)?;
        wtr.write_record(&[
            result.numbers[0].to_string(),
            result.numbers[1].to_string(),
            result.numbers[2].to_string(),
            result.total.to_string(),
            result.pattern.to_string(),
            result.message(),
        ])?;
        rows += 1;
    }
    wtr.flush()?;
    Ok(rows)
}
