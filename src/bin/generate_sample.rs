use serde_json::json;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
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
}

/// Continuum plus a set of (wavelength, sigma, amplitude) lines; negative
/// amplitudes are absorption features.
fn generate_spectrum(
    wavelengths: &[f64],
    lines: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&w| {
            let signal: f64 = lines
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(w, mu, sigma, amp))
                .sum();
            1.0 + signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Wavelengths: 3800 → 7498 Angstrom, step 2
    let wavelengths: Vec<f64> = (0..1850).map(|i| 3800.0 + i as f64 * 2.0).collect();

    let targets: Vec<(&str, Vec<(f64, f64, f64)>)> = vec![
        (
            "g2_dwarf",
            vec![
                (3933.66, 3.0, -0.55), // Ca II K
                (3968.47, 3.0, -0.45), // Ca II H
                (4101.74, 4.0, -0.30), // H delta
                (4340.47, 4.0, -0.35), // H gamma
                (4861.33, 4.0, -0.40), // H beta
                (5175.0, 8.0, -0.25),  // Mg b blend
                (5893.0, 5.0, -0.35),  // Na D blend
                (6562.80, 4.0, -0.50), // H alpha
            ],
        ),
        (
            "hii_region",
            vec![
                (3727.4, 3.0, 0.9),   // [O II] blend
                (4861.33, 3.0, 0.6),  // H beta
                (4958.91, 3.0, 0.8),  // [O III]
                (5006.84, 3.0, 2.4),  // [O III]
                (6562.80, 3.0, 1.8),  // H alpha
                (6583.45, 3.0, 0.5),  // [N II]
                (6716.44, 3.0, 0.4),  // [S II]
            ],
        ),
        (
            "a0_star",
            vec![
                (4101.74, 8.0, -0.60),
                (4340.47, 8.0, -0.65),
                (4861.33, 8.0, -0.70),
                (6562.80, 8.0, -0.75),
            ],
        ),
    ];

    let noise = 0.02;
    let records: Vec<serde_json::Value> = targets
        .iter()
        .map(|(name, lines)| {
            let flux = generate_spectrum(&wavelengths, lines, noise, &mut rng);
            let error = vec![noise; wavelengths.len()];
            json!({
                "name": name,
                "x": wavelengths,
                "y": flux,
                "error": error,
                "x_unit": "Angstrom",
                "y_unit": "erg / (s cm2 Angstrom)",
            })
        })
        .collect();

    let output_path = "sample_spectra.json";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    serde_json::to_writer(file, &records).expect("Failed to write JSON");

    println!(
        "Wrote {} spectra ({} samples each) to {output_path}",
        records.len(),
        wavelengths.len()
    );
}
