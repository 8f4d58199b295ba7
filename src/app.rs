use eframe::egui;

use crate::data::bootstrap::LoadedArtifacts;
use crate::state::AppState;
use crate::ui::form;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HousePriceApp {
    artifacts: LoadedArtifacts,
    pub state: AppState,
}

impl HousePriceApp {
    pub fn new(cc: &eframe::CreationContext<'_>, artifacts: LoadedArtifacts) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let state = AppState::new(&artifacts);
        Self { artifacts, state }
    }
}

impl eframe::App for HousePriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Bottom panel: status bar ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(format!(
                "{} reference listings loaded",
                self.state.reference_rows
            ));
        });

        // ---- Central panel: form ----
        let frame = egui::Frame::central_panel(&ctx.style())
            .fill(egui::Color32::BLACK);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let events = form::house_form(ui, &mut self.state);
            self.state.handle(events, &self.artifacts);
        });
    }
}
