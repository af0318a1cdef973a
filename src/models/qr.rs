// ============================================================================
// QR MODEL - Payload, formato de hora y próximo refresco
// ============================================================================

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Contenido codificado en la imagen QR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// `DD/MM/YYYY`
    pub date: String,
    /// `HH:MM:SS` (24h)
    pub time: String,
}

impl QrPayload {
    /// JSON compacto `{"date":..,"time":..}` que se envía al renderizador
    pub fn to_json(&self) -> String {
        // Dos campos String: la serialización no puede fallar
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"date":"{}","time":"{}"}}"#, self.date, self.time)
        })
    }
}

/// Genera el payload para `now` en la zona horaria fija `offset`.
/// No depende de la zona horaria del host.
pub fn generate_payload(now: DateTime<Utc>, offset: FixedOffset) -> QrPayload {
    QrPayload {
        date: format_date(now, offset),
        time: format_clock(now, offset),
    }
}

pub fn format_clock(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%H:%M:%S").to_string()
}

pub fn format_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%d/%m/%Y").to_string()
}

/// Próximo refresco estimado: valor derivado, nunca un timer propio
pub fn next_refresh_time(last_refreshed: DateTime<Utc>, interval: Duration) -> DateTime<Utc> {
    last_refreshed + interval
}

pub fn next_refresh_label(
    last_refreshed: Option<DateTime<Utc>>,
    interval: Duration,
    offset: FixedOffset,
) -> String {
    match last_refreshed {
        Some(last) => format_clock(next_refresh_time(last, interval), offset),
        None => "Soon".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn payload_is_rendered_in_ist() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let payload = generate_payload(now, ist());
        assert_eq!(payload.date, "01/01/2024");
        assert_eq!(payload.time, "05:30:00");
    }

    #[test]
    fn payload_rolls_over_the_date_line() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 19, 45, 7).unwrap();
        let payload = generate_payload(now, ist());
        assert_eq!(payload.date, "01/01/2026");
        assert_eq!(payload.time, "01:15:07");
    }

    #[test]
    fn payload_ignores_the_callers_offset() {
        let local = FixedOffset::west_opt(8 * 3600).unwrap();
        let as_local = local.with_ymd_and_hms(2024, 3, 10, 1, 2, 3).unwrap();
        let payload = generate_payload(as_local.with_timezone(&Utc), ist());
        // 01:02:03 -08:00 = 09:02:03Z = 14:32:03 IST
        assert_eq!(payload.date, "10/03/2024");
        assert_eq!(payload.time, "14:32:03");
    }

    #[test]
    fn payload_fields_have_fixed_width() {
        let offset = ist();
        let mut now = Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap();
        for _ in 0..500 {
            let payload = generate_payload(now, offset);
            let date: Vec<&str> = payload.date.split('/').collect();
            let time: Vec<&str> = payload.time.split(':').collect();
            assert_eq!(date.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![2, 2, 4]);
            assert_eq!(time.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![2, 2, 2]);
            assert!(payload.date.chars().all(|c| c.is_ascii_digit() || c == '/'));
            assert!(payload.time.chars().all(|c| c.is_ascii_digit() || c == ':'));
            now += Duration::minutes(97) + Duration::seconds(13);
        }
    }

    #[test]
    fn payload_json_keeps_date_then_time() {
        let payload = QrPayload {
            date: "16/10/2026".to_string(),
            time: "09:05:00".to_string(),
        };
        assert_eq!(payload.to_json(), r#"{"date":"16/10/2026","time":"09:05:00"}"#);
    }

    #[test]
    fn next_refresh_is_derived_from_last_refresh() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let label = next_refresh_label(Some(last), Duration::minutes(5), ist());
        assert_eq!(label, "05:35:00");
        assert_eq!(next_refresh_label(None, Duration::minutes(5), ist()), "Soon");
    }
}
