use anyhow::{Context, Result};

use jiji_dashboard::data::loader::DATASET_PATH;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (make, models, base price in Naira for a new car)
const MAKES: &[(&str, &[&str], f64)] = &[
    ("Toyota", &["Camry", "Corolla", "Highlander", "RAV4", "Sienna"], 25_000_000.0),
    ("Honda", &["Accord", "Civic", "CR-V", "Pilot"], 22_000_000.0),
    ("Lexus", &["RX 350", "ES 350", "GX 460"], 45_000_000.0),
    ("Mercedes-Benz", &["C300", "E350", "GLK 350"], 50_000_000.0),
    ("Hyundai", &["Elantra", "Sonata", "Tucson"], 18_000_000.0),
    ("Kia", &["Rio", "Sorento", "Sportage"], 17_000_000.0),
    ("Ford", &["Edge", "Explorer", "Escape"], 24_000_000.0),
];

/// (condition, relative frequency, price multiplier)
const CONDITIONS: &[(&str, f64, f64)] = &[
    ("Foreign Used", 0.55, 0.75),
    ("Locally Used", 0.35, 0.5),
    ("Brand New", 0.10, 1.0),
];

const ROWS: usize = 600;
const NEWEST_YEAR: i64 = 2024;

fn pick_condition(rng: &mut SimpleRng) -> (&'static str, f64) {
    let mut roll = rng.next_f64();
    for &(name, freq, mult) in CONDITIONS {
        if roll < freq {
            return (name, mult);
        }
        roll -= freq;
    }
    let (name, _, mult) = CONDITIONS[0];
    (name, mult)
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args().nth(1).unwrap_or_else(|| DATASET_PATH.to_string());
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(["title", "make", "condition", "year", "price", "mileage"])?;

    for _ in 0..ROWS {
        let (make, models, base) = *rng.pick(MAKES);
        let model = rng.pick(models);
        let (condition, multiplier) = pick_condition(&mut rng);

        let year = if condition == "Brand New" {
            NEWEST_YEAR - rng.below(2) as i64
        } else {
            NEWEST_YEAR - 1 - rng.below(22) as i64
        };
        let age = (NEWEST_YEAR - year) as f64;

        // ~8% depreciation per year plus noise, rounded to the nearest 50k
        let price = base * multiplier * 0.92f64.powf(age) * rng.gauss(1.0, 0.12).max(0.4);
        let price = (price / 50_000.0).round() * 50_000.0;

        let mileage = if condition == "Brand New" {
            String::new()
        } else {
            let km = (age * 14_000.0 + rng.gauss(0.0, 12_000.0)).max(1_000.0);
            format!("{}", km.round() as i64)
        };

        writer.write_record([
            format!("{make} {model} {year}"),
            make.to_string(),
            condition.to_string(),
            year.to_string(),
            format!("{price:.0}"),
            mileage,
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    log::info!("Wrote {ROWS} listings to {output_path}");
    println!("Wrote {ROWS} listings to {output_path}");
    Ok(())
}
