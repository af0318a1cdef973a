use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Variables de .env se inyectan como rustc-env para option_env! en config.rs
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // El entorno del proceso tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Firebase is not configured, the portal will start in demo mode. Copy .env.example to .env to connect a project.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in [
        "FIREBASE_API_KEY",
        "FIREBASE_AUTH_DOMAIN",
        "FIREBASE_PROJECT_ID",
        "FIRESTORE_BASE_URL",
        "STUDENTS_COLLECTION",
        "QR_ENDPOINT",
        "QR_SIZE",
        "QR_REFRESH_INTERVAL_SECONDS",
        "CLOCK_TICK_MS",
        "QR_UTC_OFFSET_MINUTES",
        "ENABLE_LOGGING",
        "ENVIRONMENT",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
