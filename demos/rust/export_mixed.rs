//! Record paths, text and transforms, then export the picture as a PDF.
//!
//! Run with: cargo run --example export_mixed

use picture_pdf_core::{export_to_pdf, Color, Path, PictureRecorder, Rect, Transform};

fn main() {
    env_logger::init();

    let mut recorder = PictureRecorder::new();

    recorder.draw_text("picture-pdf demo", 72.0, 740.0, 18.0);

    // Page frame.
    recorder
        .set_stroke_color(Color::gray(0.0))
        .set_line_width(1.0)
        .stroke_rect(Rect {
            x: 72.0,
            y: 72.0,
            width: 468.0,
            height: 648.0,
        });

    // A filled triangle, drawn at half scale.
    let mut triangle = Path::new();
    triangle
        .move_to(300.0, 300.0)
        .line_to(400.0, 300.0)
        .line_to(350.0, 400.0)
        .close();
    recorder
        .save()
        .concat(Transform::scale(0.5, 0.5))
        .concat(Transform::translate(300.0, 300.0))
        .set_fill_color(Color::rgb(0.8, 0.2, 0.2))
        .fill_path(triangle)
        .restore();

    // A wavy stroked curve.
    let mut wave = Path::new();
    wave.move_to(100.0, 200.0)
        .cubic_to(180.0, 260.0, 260.0, 140.0, 340.0, 200.0)
        .cubic_to(420.0, 260.0, 460.0, 140.0, 512.0, 200.0);
    recorder
        .set_stroke_color(Color::rgb(0.1, 0.3, 0.7))
        .set_line_width(2.5)
        .stroke_path(wave);

    let picture = recorder.finish();
    log::info!("recorded {} commands", picture.command_count());

    let bytes = export_to_pdf(Some(&picture), 612.0, 792.0).expect("export failed");
    std::fs::write("mixed.pdf", &bytes).expect("could not write mixed.pdf");
    println!("wrote mixed.pdf ({} bytes)", bytes.len());
}
