use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

const ROWS: usize = 600;
const GENDERS: [&str; 2] = ["Female", "Male"];

/// One synthetic respondent, in the column order of the real survey export.
#[derive(Serialize)]
struct SurveyRow {
    id: usize,
    weight: Option<u32>,
    age: Option<u32>,
    gender: &'static str,
    work_sleep_hours: Option<f64>,
    depression: &'static str,
    anxiety_disorder: &'static str,
    lung_disease: &'static str,
    high_blood_pressure: &'static str,
    think_sleep_problem: &'static str,
    otc_meds_aid: &'static str,
    prescribed_meds_aid: &'static str,
    alcohol_aid: &'static str,
    eyemask_earplugs_aid: &'static str,
    melatonin_aid: &'static str,
}

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// "Yes" with probability `p_yes`; a few non-answers sprinkled in.
    fn yes_no(&mut self, p_yes: f64) -> &'static str {
        let roll = self.next_f64();
        if roll < 0.02 {
            "Don't Know"
        } else if roll < 0.03 {
            "Refused"
        } else if roll < 0.04 {
            ""
        } else if self.chance(p_yes) {
            "Yes"
        } else {
            "No"
        }
    }
}

fn respondent(id: usize, rng: &mut SimpleRng) -> SurveyRow {
    let gender = GENDERS[(rng.next_u64() % GENDERS.len() as u64) as usize];
    let base_weight = if gender == "Male" { 195.0 } else { 165.0 };
    let weight = rng.gauss(base_weight, 35.0).clamp(95.0, 400.0).round() as u32;
    let age = rng.gauss(48.0, 16.0).clamp(18.0, 90.0).round() as u32;
    let sleep = (rng.gauss(6.8, 1.1).clamp(3.0, 11.0) * 10.0).round() / 10.0;

    // shorter sleep and higher weight push the risk up
    let risk = ((7.0 - sleep) * 0.06 + (weight as f64 - 170.0) / 600.0).clamp(-0.1, 0.3);
    let perception = if sleep < 6.0 || rng.chance(risk.max(0.0)) {
        "Yes"
    } else if rng.chance(0.35) {
        "Maybe"
    } else {
        "No"
    };

    SurveyRow {
        id,
        weight: (!rng.chance(0.01)).then_some(weight),
        age: (!rng.chance(0.01)).then_some(age),
        gender,
        work_sleep_hours: (!rng.chance(0.01)).then_some(sleep),
        depression: rng.yes_no(0.18 + risk),
        anxiety_disorder: rng.yes_no(0.22 + risk),
        lung_disease: rng.yes_no(0.06 + age as f64 / 1500.0),
        high_blood_pressure: rng.yes_no(0.15 + age as f64 / 300.0 + risk),
        think_sleep_problem: perception,
        otc_meds_aid: rng.yes_no(0.12),
        prescribed_meds_aid: rng.yes_no(0.10 + risk / 2.0),
        alcohol_aid: rng.yes_no(0.08),
        eyemask_earplugs_aid: rng.yes_no(0.14),
        melatonin_aid: rng.yes_no(0.16),
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for id in 0..ROWS {
        writer
            .serialize(respondent(id, &mut rng))
            .with_context(|| format!("writing row {id}"))?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {ROWS} survey respondents to {}", output_path.display());
    Ok(())
}
