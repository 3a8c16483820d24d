//! Build script for segclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time
//! - Generates the `CLOCK_CONFIG` constant and display pin selection

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// GPIOs taken by I2C0 (SDA, SCL)
const I2C_PINS: [u8; 2] = [16, 17];

/// Highest user GPIO on the RP2040
const MAX_GPIO: u8 = 29;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockToml {
    #[serde(default)]
    rtc: RtcSection,
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    clock: ClockSection,
    #[serde(default)]
    boot: BootSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RtcSection {
    address: u8,
    hour_mode: HourModeToml,
    i2c_frequency_hz: u32,
}

impl Default for RtcSection {
    fn default() -> Self {
        Self {
            address: 0x68,
            hour_mode: HourModeToml::TwentyFour,
            i2c_frequency_hz: 100_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum HourModeToml {
    #[serde(rename = "24h")]
    TwentyFour,
    #[serde(rename = "12h")]
    Twelve,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplaySection {
    brightness: u8,
    clk_pin: String,
    dio_pin: String,
    bit_delay_us: u32,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            brightness: 0x0F,
            clk_pin: "gpio4".into(),
            dio_pin: "gpio3".into(),
            bit_delay_us: 100,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ClockSection {
    refresh_interval_ms: u32,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BootSyncToml {
    Never,
    IfHalted,
    Always,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BootSection {
    sync: BootSyncToml,
    time: String,
}

impl Default for BootSection {
    fn default() -> Self {
        Self {
            sync: BootSyncToml::IfHalted,
            time: "00:06:30".into(),
        }
    }
}

/// Validated values ready for code generation
struct Validated {
    toml: ClockToml,
    clk_pin: u8,
    dio_pin: u8,
    boot_time: (u8, u8, u8),
}

/// Validate clock.toml configuration at compile time
fn validate_config() -> Validated {
    // Re-run if clock.toml changes
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the segclock-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and field types are checked by serde
    let config: ClockToml = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid clock.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    // [rtc]
    if !(0x08..=0x77).contains(&config.rtc.address) {
        errors.push(format!(
            "rtc.address: 0x{:02X} is outside the 7-bit range 0x08-0x77",
            config.rtc.address
        ));
    }
    if !(10_000..=400_000).contains(&config.rtc.i2c_frequency_hz) {
        errors.push(format!(
            "rtc.i2c_frequency_hz: {} must be 10000-400000",
            config.rtc.i2c_frequency_hz
        ));
    } else if config.rtc.i2c_frequency_hz > 100_000 {
        println!(
            "cargo:warning=rtc.i2c_frequency_hz {} exceeds the DS1307 limit of 100 kHz",
            config.rtc.i2c_frequency_hz
        );
    }

    // [display]
    if config.display.brightness > 0x0F {
        errors.push(format!(
            "display.brightness: {} must be 0-15",
            config.display.brightness
        ));
    }
    if !(1..=1000).contains(&config.display.bit_delay_us) {
        errors.push(format!(
            "display.bit_delay_us: {} must be 1-1000",
            config.display.bit_delay_us
        ));
    }
    let clk_pin = check_pin("display.clk_pin", &config.display.clk_pin, &mut errors);
    let dio_pin = check_pin("display.dio_pin", &config.display.dio_pin, &mut errors);
    if let (Some(clk), Some(dio)) = (clk_pin, dio_pin) {
        if clk == dio {
            errors.push(format!("display.clk_pin and display.dio_pin are both gpio{}", clk));
        }
    }

    // [clock]
    if !(100..=60_000).contains(&config.clock.refresh_interval_ms) {
        errors.push(format!(
            "clock.refresh_interval_ms: {} must be 100-60000",
            config.clock.refresh_interval_ms
        ));
    }

    // [boot]
    let boot_time = match parse_time(&config.boot.time) {
        Some(time) => Some(time),
        None => {
            errors.push(format!(
                "boot.time: '{}' is not a valid HH:MM:SS time",
                config.boot.time
            ));
            None
        }
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in clock.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");

    // All three are Some once errors is empty
    Validated {
        toml: config,
        clk_pin: clk_pin.unwrap(),
        dio_pin: dio_pin.unwrap(),
        boot_time: boot_time.unwrap(),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a "gpioN" pin name and check it is usable for the display
fn check_pin(key: &str, name: &str, errors: &mut Vec<String>) -> Option<u8> {
    let pin = name
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|&n| n <= MAX_GPIO);

    match pin {
        None => {
            errors.push(format!("{}: '{}' is not a pin name (gpio0-gpio29)", key, name));
            None
        }
        Some(n) if I2C_PINS.contains(&n) => {
            errors.push(format!("{}: gpio{} is reserved for the RTC I2C bus", key, n));
            None
        }
        Some(n) => Some(n),
    }
}

/// Parse "HH:MM:SS" in 24-hour form
fn parse_time(s: &str) -> Option<(u8, u8, u8)> {
    let mut parts = s.split(':');
    let h = parts.next()?.parse::<u8>().ok()?;
    let m = parts.next()?.parse::<u8>().ok()?;
    let sec = parts.next()?.parse::<u8>().ok()?;
    if parts.next().is_some() || h > 23 || m > 59 || sec > 59 {
        return None;
    }
    Some((h, m, sec))
}

/// Write `clock_config.rs` into OUT_DIR
fn generate_config(config: &Validated) {
    let toml = &config.toml;

    let hour_mode = match toml.rtc.hour_mode {
        HourModeToml::TwentyFour => "HourMode::TwentyFourHour",
        HourModeToml::Twelve => "HourMode::TwelveHour",
    };
    let boot_sync = match toml.boot.sync {
        BootSyncToml::Never => "BootSync::Never",
        BootSyncToml::IfHalted => "BootSync::IfHalted",
        BootSyncToml::Always => "BootSync::Always",
    };
    let brightness = toml.display.brightness;
    let (hours, minutes, seconds) = config.boot_time;

    let source = format!(
        "// Generated by build.rs from clock.toml\n\
        \n\
        /// Clock configuration baked in at build time\n\
        pub const CLOCK_CONFIG: ClockConfig = ClockConfig {{\n\
        \x20   rtc: RtcConfig {{\n\
        \x20       address: 0x{address:02X},\n\
        \x20       hour_mode: {hour_mode},\n\
        \x20       i2c_frequency_hz: {freq},\n\
        \x20   }},\n\
        \x20   display: DisplayConfig {{\n\
        \x20       brightness: Brightness::from_level({level}, {on}),\n\
        \x20       bit_delay_us: {bit_delay},\n\
        \x20   }},\n\
        \x20   refresh_interval_ms: {refresh},\n\
        \x20   boot_sync: {boot_sync},\n\
        \x20   boot_time: TimeOfDay {{\n\
        \x20       hours: {hours},\n\
        \x20       minutes: {minutes},\n\
        \x20       seconds: {seconds},\n\
        \x20   }},\n\
        }};\n\
        \n\
        /// Take the display (CLK, DIO) pins out of the peripherals\n\
        macro_rules! display_pins {{\n\
        \x20   ($p:expr) => {{\n\
        \x20       ($p.PIN_{clk}, $p.PIN_{dio})\n\
        \x20   }};\n\
        }}\n",
        address = toml.rtc.address,
        hour_mode = hour_mode,
        freq = toml.rtc.i2c_frequency_hz,
        level = brightness & 0x07,
        on = brightness & 0x08 != 0,
        bit_delay = toml.display.bit_delay_us,
        refresh = toml.clock.refresh_interval_ms,
        boot_sync = boot_sync,
        hours = hours,
        minutes = minutes,
        seconds = seconds,
        clk = config.clk_pin,
        dio = config.dio_pin,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("clock_config.rs"), source).unwrap();
}
