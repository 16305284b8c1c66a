pub mod chat;
pub mod config;
mod flight;
pub mod report;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use chat::controller::ChatController;
    use chat::simulator::RandomPicker;
    use commands::chat::EventPanel;
    use commands::report::EventReportView;
    use commands::settings::SettingsStore;
    use config::{AppConfig, CONFIG_FILE};
    use report::controller::ReportController;
    use report::ReportClient;
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let config_path = app.path().app_config_dir()?.join(CONFIG_FILE);
            let config = AppConfig::load(&config_path)?;
            log::info!("report endpoint: {}", config.report_endpoint);

            let handle = app.handle().clone();
            app.manage(ChatController::new(
                EventPanel::new(handle.clone()),
                RandomPicker::new(),
                config.reply_delay(),
            ));
            app.manage(ReportController::new(
                EventReportView::new(handle),
                ReportClient::from_config(&config)?,
            ));
            app.manage(SettingsStore::new(config_path, config));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::chat::submit_user_message,
            commands::chat::get_history,
            commands::report::submit_question,
            commands::report::open_document,
            commands::settings::get_settings,
            commands::settings::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
