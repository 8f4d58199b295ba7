mod app;
mod config;
mod data;
mod error;
mod estimator;
mod state;
mod ui;

use std::process::ExitCode;

use app::HousePriceApp;
use config::ArtifactPaths;
use eframe::egui;
use error::BootstrapError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Nothing works without the model, so any bootstrap failure ends the process.
    let artifacts = match data::bootstrap::bootstrap(&ArtifactPaths::default()) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            // Launched from a desktop shell, stderr is not visible.
            fatal_dialog(&e).show();
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(HousePriceApp::new(cc, artifacts)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated: {e}");
            ExitCode::FAILURE
        }
    }
}

fn fatal_description(e: &BootstrapError) -> String {
    format!("{e}\n\nThe application will now exit.")
}

fn fatal_dialog(e: &BootstrapError) -> rfd::MessageDialog {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(config::WINDOW_TITLE)
        .set_description(fatal_description(e))
        .set_buttons(rfd::MessageButtons::Ok)
}
