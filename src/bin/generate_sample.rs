use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (label, mean, std dev, samples)
    let columns: [(&str, f64, f64, usize); 4] = [
        ("Control", 50.0, 5.0, 40),
        ("Treatment_A", 56.0, 4.0, 35),
        ("Treatment_B", 47.0, 8.0, 40),
        ("Pilot", 60.0, 2.5, 12),
    ];
    let n_rows = columns.iter().map(|c| c.3).max().unwrap_or(0);

    let output_path = "sample_data.tsv";
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(columns.iter().map(|c| c.0))?;

    for row in 0..n_rows {
        let mut record: Vec<String> = columns
            .iter()
            .map(|&(_, mean, std_dev, len)| {
                if row >= len {
                    String::new()
                } else if row % 17 == 5 {
                    // A few malformed cells, as copied from a messy sheet.
                    "n/a".to_string()
                } else {
                    format!("{:.2}", rng.gauss(mean, std_dev))
                }
            })
            .collect();

        // Ragged tail: drop trailing blanks.
        while record.last().is_some_and(|c| c.is_empty()) {
            record.pop();
        }
        writer.write_record(&record)?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {} columns ({n_rows} rows max) to {output_path}",
        columns.len()
    );
    Ok(())
}
