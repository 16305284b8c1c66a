use super::report::DesktopReport;
use crate::config::AppConfig;
use crate::report::ReportClient;
use std::path::PathBuf;
use std::sync::Mutex;
use tauri::State;

pub struct SettingsStore {
    path: PathBuf,
    config: Mutex<AppConfig>,
}

impl SettingsStore {
    pub fn new(path: PathBuf, config: AppConfig) -> Self {
        Self {
            path,
            config: Mutex::new(config),
        }
    }
}

#[tauri::command]
pub fn get_settings(store: State<'_, SettingsStore>) -> AppConfig {
    store
        .config
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Saves the settings file. A new endpoint or timeout applies to the next
/// report; the reply delay applies after restart.
#[tauri::command]
pub fn update_settings(
    store: State<'_, SettingsStore>,
    report: State<'_, DesktopReport>,
    config: AppConfig,
) -> Result<AppConfig, String> {
    let client = ReportClient::from_config(&config).map_err(|e| e.to_string())?;
    config.save(&store.path).map_err(|e| e.to_string())?;
    report.set_client(client);
    log::info!("settings updated, report endpoint: {}", config.report_endpoint);

    *store.config.lock().unwrap_or_else(|e| e.into_inner()) = config.clone();
    Ok(config)
}
