//! Record one filled rectangle and export it as a US Letter PDF.
//!
//! Run with: cargo run --example export_rectangle

use picture_pdf_core::{export_to_pdf, Color, PictureRecorder, Rect};

fn main() {
    env_logger::init();

    let mut recorder = PictureRecorder::new();
    recorder.set_fill_color(Color::rgb(0.2, 0.4, 0.8)).fill_rect(Rect {
        x: 72.0,
        y: 72.0,
        width: 468.0,
        height: 648.0,
    });
    let picture = recorder.finish();

    let bytes = export_to_pdf(Some(&picture), 612.0, 792.0).expect("export failed");
    std::fs::write("rectangle.pdf", &bytes).expect("could not write rectangle.pdf");
    log::info!("wrote rectangle.pdf ({} bytes)", bytes.len());
    println!("wrote rectangle.pdf ({} bytes)", bytes.len());
}
