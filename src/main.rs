use hayaoshi::gui::HayaoshiApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([440.0, 560.0])
            .with_title("Hayaoshi"),
        ..Default::default()
    };

    eframe::run_native("Hayaoshi", options, Box::new(|cc| Ok(Box::new(HayaoshiApp::new(cc)))))
}
