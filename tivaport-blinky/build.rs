//! Build script for tivaport-blinky
//!
//! - Sets up linker search paths for memory.x
//! - Validates blinky.toml and compiles it into `config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    write_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated configuration values
struct BlinkyConfig {
    seed: u32,
    delay_cycles: u32,
    red: String,
    green: String,
    blue: String,
    threshold: u16,
    intensity: f64,
}

/// Validate blinky.toml at compile time
fn validate_config() -> BlinkyConfig {
    // Re-run if blinky.toml changes
    println!("cargo:rerun-if-changed=blinky.toml");

    let config_path = Path::new("blinky.toml");

    if !config_path.exists() {
        fail(
            "blinky.toml not found!",
            &["The firmware requires a blinky.toml configuration file.".to_string()],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read blinky.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in blinky.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    let seed = integer(&config, "rng", "seed", 0, u32::MAX as i64, &mut errors);
    let delay_cycles = integer(&config, "timing", "delay_cycles", 1, u32::MAX as i64, &mut errors);
    let threshold = integer(&config, "led", "threshold", 0, 32767, &mut errors);
    let intensity = float(&config, "led", "intensity", &mut errors);

    let red = pin(&config, "red", &mut errors);
    let green = pin(&config, "green", &mut errors);
    let blue = pin(&config, "blue", &mut errors);

    let names = [&red, &green, &blue];
    let bare: Vec<&str> = names.iter().map(|n| n.trim_start_matches('!')).collect();
    if bare[0] == bare[1] || bare[0] == bare[2] || bare[1] == bare[2] {
        errors.push("[led] red, green and blue must be different pins".to_string());
    }
    let inverted: Vec<bool> = names.iter().map(|n| n.starts_with('!')).collect();
    if inverted.iter().any(|&i| i != inverted[0]) {
        errors.push("[led] pins must all be active-high or all active-low".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid blinky.toml configuration", &errors);
    }

    println!("cargo:warning=blinky.toml validated successfully");

    BlinkyConfig {
        seed: seed as u32,
        delay_cycles: delay_cycles as u32,
        red,
        green,
        blue,
        threshold: threshold as u16,
        intensity,
    }
}

/// Emit the validated values as Rust constants
fn write_config(config: &BlinkyConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("config.rs")).unwrap();
    writeln!(f, "// Generated from blinky.toml by build.rs").unwrap();
    writeln!(f, "pub const RNG_SEED: u32 = {};", config.seed).unwrap();
    writeln!(f, "pub const DELAY_CYCLES: u32 = {};", config.delay_cycles).unwrap();
    writeln!(f, "pub const LED_RED: &str = {:?};", config.red).unwrap();
    writeln!(f, "pub const LED_GREEN: &str = {:?};", config.green).unwrap();
    writeln!(f, "pub const LED_BLUE: &str = {:?};", config.blue).unwrap();
    writeln!(f, "pub const LED_THRESHOLD: u16 = {};", config.threshold).unwrap();
    writeln!(f, "pub const LED_INTENSITY: f32 = {:?};", config.intensity as f32).unwrap();
}

/// Read an integer field and check its range
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Read a float field in 0.0-1.0 (integers accepted)
fn float(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> f64 {
    let value = match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Float(value)) => *value,
        Some(toml::Value::Integer(value)) => *value as f64,
        Some(_) => {
            errors.push(format!("[{}] {} must be a number", section, key));
            return 0.0;
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            return 0.0;
        }
    };
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("[{}] {} must be 0.0-1.0", section, key));
    }
    value
}

/// Read an LED pin name ("PF3" or "!PF3")
fn pin(config: &toml::Value, key: &str, errors: &mut Vec<String>) -> String {
    let name = match config.get("led").and_then(|s| s.get(key)) {
        Some(toml::Value::String(name)) => name.clone(),
        Some(_) => {
            errors.push(format!("[led] {} must be a string like \"PF3\"", key));
            return String::new();
        }
        None => {
            errors.push(format!("[led] missing '{}'", key));
            return String::new();
        }
    };

    let bare = name.trim_start_matches('!');
    let mut chars = bare.chars();
    let valid = bare.len() == 3
        && chars.next() == Some('P')
        && chars.next().is_some_and(|c| ('A'..='F').contains(&c))
        && chars.next().is_some_and(|c| ('0'..='7').contains(&c));
    if !valid {
        errors.push(format!(
            "[led] {} = \"{}\" is not a pin (expected PA0-PF7)",
            key, name
        ));
    }
    name
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.to_string()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
