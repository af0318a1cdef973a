use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

const IST_OFFSET_SECONDS: i32 = 330 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub firebase: FirebaseConfig,
    pub firestore_base_url: String,
    pub students_collection: String,
    pub qr: QrConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            firebase: FirebaseConfig::default(),
            firestore_base_url: "https://firestore.googleapis.com/v1".to_string(),
            students_collection: "students".to_string(),
            qr: QrConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    pub endpoint: String,
    pub size: String,
    pub refresh_interval_seconds: u32,
    pub clock_tick_ms: u32,
    /// Offset fijo de la zona horaria del payload (Asia/Kolkata = +330)
    pub utc_offset_minutes: i32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            size: "200x200".to_string(),
            refresh_interval_seconds: 5 * 60,
            clock_tick_ms: 1000,
            utc_offset_minutes: 330,
        }
    }
}

impl QrConfig {
    pub fn refresh_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.refresh_interval_seconds))
    }

    pub fn refresh_interval_ms(&self) -> u32 {
        self.refresh_interval_seconds.saturating_mul(1000)
    }

    /// Offset fijo; cae a IST si el valor configurado está fuera de rango
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .or_else(|| FixedOffset::east_opt(IST_OFFSET_SECONDS))
            .unwrap_or_else(|| Utc.fix())
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            firebase: FirebaseConfig {
                api_key: option_env!("FIREBASE_API_KEY").unwrap_or("").to_string(),
                auth_domain: option_env!("FIREBASE_AUTH_DOMAIN").unwrap_or("").to_string(),
                project_id: option_env!("FIREBASE_PROJECT_ID").unwrap_or("").to_string(),
            },
            firestore_base_url: option_env!("FIRESTORE_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.firestore_base_url),
            students_collection: option_env!("STUDENTS_COLLECTION")
                .map(str::to_string)
                .unwrap_or(defaults.students_collection),
            qr: QrConfig {
                endpoint: option_env!("QR_ENDPOINT")
                    .map(str::to_string)
                    .unwrap_or(defaults.qr.endpoint),
                size: option_env!("QR_SIZE")
                    .map(str::to_string)
                    .unwrap_or(defaults.qr.size),
                refresh_interval_seconds: option_env!("QR_REFRESH_INTERVAL_SECONDS")
                    .unwrap_or("300").parse().unwrap_or(300),
                clock_tick_ms: option_env!("CLOCK_TICK_MS")
                    .unwrap_or("1000").parse().unwrap_or(1000),
                utc_offset_minutes: option_env!("QR_UTC_OFFSET_MINUTES")
                    .unwrap_or("330").parse().unwrap_or(330),
            },
        }
    }

    /// Sin proyecto Firebase se arranca con store en memoria e identidad demo
    pub fn is_demo_mode(&self) -> bool {
        self.firebase.project_id.trim().is_empty()
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_portal_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.qr.refresh_interval_seconds, 300);
        assert_eq!(config.qr.refresh_interval_ms(), 300_000);
        assert_eq!(config.qr.clock_tick_ms, 1000);
        assert_eq!(config.qr.size, "200x200");
        assert_eq!(config.students_collection, "students");
        assert!(config.is_demo_mode());
    }

    #[test]
    fn utc_offset_is_ist_by_default() {
        let offset = QrConfig::default().utc_offset();
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_ist() {
        let qr = QrConfig {
            utc_offset_minutes: 100_000,
            ..QrConfig::default()
        };
        assert_eq!(qr.utc_offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn project_id_disables_demo_mode() {
        let mut config = AppConfig::default();
        config.firebase.project_id = "gymi-gymi".to_string();
        assert!(!config.is_demo_mode());
    }
}
