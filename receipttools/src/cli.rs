use std::{env, env::VarError};

/// Print the configuration environment variables that are safe to show
pub fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 7] = [
        "RUST_LOG",
        "VIPPS_BASE_URL",
        "VIPPS_PRODUCTION",
        "VIPPS_CLIENT_ID",
        "VIPPS_MERCHANT_SERIAL_NUMBER",
        "VIPPS_REDIRECT_URI",
        "VRS_STORAGE_FILE",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
