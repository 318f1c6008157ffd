//! Alert display formatting

use crate::models::Alert;

/// Format alerts, one per line with their creation date
pub fn format_alert_list(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.\n".to_string();
    }

    alerts
        .iter()
        .map(|a| format!("{}  {}\n", a.created_at.format("%Y-%m-%d %H:%M"), a.text))
        .collect()
}
