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

    /// Uniform integer in `[0, n)`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (make, model, vehicle type, typical electric range in miles)
const MODELS: &[(&str, &str, &str, f64)] = &[
    ("TESLA", "MODEL 3", BEV, 230.0),
    ("TESLA", "MODEL Y", BEV, 280.0),
    ("TESLA", "MODEL S", BEV, 330.0),
    ("NISSAN", "LEAF", BEV, 110.0),
    ("CHEVROLET", "BOLT EV", BEV, 238.0),
    ("CHEVROLET", "VOLT", PHEV, 42.0),
    ("FORD", "MUSTANG MACH-E", BEV, 250.0),
    ("FORD", "FUSION", PHEV, 21.0),
    ("BMW", "I3", BEV, 115.0),
    ("BMW", "X5", PHEV, 30.0),
    ("KIA", "NIRO", PHEV, 26.0),
    ("TOYOTA", "PRIUS PRIME", PHEV, 25.0),
];

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// (county, city, utility, census tract base)
const PLACES: &[(&str, &str, &str, u64)] = &[
    ("King", "Seattle", "CITY OF SEATTLE", 53033000000),
    ("King", "Bellevue", "PUGET SOUND ENERGY INC", 53033020000),
    ("Snohomish", "Everett", "PUGET SOUND ENERGY INC", 53061040000),
    ("Pierce", "Tacoma", "CITY OF TACOMA", 53053060000),
    ("Clark", "Vancouver", "BONNEVILLE POWER ADMINISTRATION", 53011080000),
    ("Thurston", "Olympia", "PUGET SOUND ENERGY INC", 53067010000),
];

const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";
const NOT_RESEARCHED: &str = "Eligibility unknown as battery range has not been researched";
const NOT_ELIGIBLE: &str = "Not eligible due to low battery range";

const HEADER: &[&str] = &[
    "VIN (1-10)",
    "County",
    "City",
    "State",
    "Postal Code",
    "Model Year",
    "Make",
    "Model",
    "Electric Vehicle Type",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
    "Electric Range",
    "Base MSRP",
    "Legislative District",
    "DOL Vehicle ID",
    "Vehicle Location",
    "Electric Utility",
    "2020 Census Tract",
];

const ROWS: usize = 200;

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(HEADER).expect("Failed to write header");

    for row in 0..ROWS {
        let &(make, model, vehicle_type, typical_range) = rng.pick(MODELS);
        let &(county, city, utility, tract_base) = rng.pick(PLACES);
        let model_year = 2014 + rng.below(10) as u16;

        // Roughly one row in ten has an unresearched range, stored as 0;
        // a few leave the year or range blank entirely.
        let range_cell = if rng.below(10) == 0 {
            "0".to_string()
        } else if rng.below(25) == 0 {
            String::new()
        } else {
            let noisy = rng.gauss(typical_range, typical_range * 0.05);
            format!("{}", noisy.round().max(5.0) as u32)
        };
        let year_cell = if rng.below(40) == 0 {
            String::new()
        } else {
            model_year.to_string()
        };
        let cafv = match range_cell.as_str() {
            "0" | "" => NOT_RESEARCHED,
            r if r.parse::<u32>().unwrap_or(0) < 30 => NOT_ELIGIBLE,
            _ => ELIGIBLE,
        };

        let vin = format!("{:010X}", rng.next_u64() & 0xFF_FFFF_FFFF);
        let postal = (98001 + rng.below(900)).to_string();
        let district = (1 + rng.below(49)).to_string();
        let dol_id = (100_000_000 + rng.below(900_000_000)).to_string();
        let lon = -123.2 + rng.next_f64() * 1.6;
        let lat = 45.8 + rng.next_f64() * 2.8;
        let location = format!("POINT ({lon:.5} {lat:.5})");
        let tract = (tract_base + rng.below(9000)).to_string();

        writer
            .write_record([
                vin.as_str(),
                county,
                city,
                "WA",
                postal.as_str(),
                year_cell.as_str(),
                make,
                model,
                vehicle_type,
                cafv,
                range_cell.as_str(),
                "0",
                district.as_str(),
                dol_id.as_str(),
                location.as_str(),
                utility,
                tract.as_str(),
            ])
            .unwrap_or_else(|e| panic!("Failed to write row {row}: {e}"));
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {ROWS} vehicle records to {output_path}");
}
