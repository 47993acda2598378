use picture_pdf_core::{
    Color, DocumentInfo, Path, PdfDocument, Picture, PictureRecorder, Rect, Timestamp, Transform,
};

fn render(picture: &Picture) -> String {
    let info = DocumentInfo::new(
        "Replay Test",
        "picture-pdf tests",
        Timestamp {
            year: 2025,
            month: 3,
            day: 1,
            day_of_week: 6,
            hour: 12,
            minute: 0,
            second: 0,
            utc_offset_minutes: 0,
        },
    );
    let mut doc = PdfDocument::new(Vec::new(), info).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.draw_picture(picture).unwrap();
    doc.end_page().unwrap();
    String::from_utf8_lossy(&doc.close().unwrap()).into_owned()
}

#[test]
fn filled_rectangle_operators() {
    let mut rec = PictureRecorder::new();
    rec.fill_rect(Rect {
        x: 50.0,
        y: 50.0,
        width: 200.0,
        height: 100.0,
    });
    let out = render(&rec.finish());
    assert!(out.contains("50 50 200 100 re\nf\n"));
}

#[test]
fn stroked_rectangle_operators() {
    let mut rec = PictureRecorder::new();
    rec.stroke_rect(Rect {
        x: 10.0,
        y: 20.0,
        width: 30.0,
        height: 40.0,
    });
    let out = render(&rec.finish());
    assert!(out.contains("10 20 30 40 re\nS\n"));
}

#[test]
fn stroked_path_operators() {
    let mut path = Path::new();
    path.move_to(100.0, 200.0).line_to(300.0, 400.0);
    let mut rec = PictureRecorder::new();
    rec.stroke_path(path);
    let out = render(&rec.finish());
    assert!(out.contains("100 200 m\n"));
    assert!(out.contains("300 400 l\n"));
    assert!(out.contains("S\n"));
}

#[test]
fn cubic_segments_and_closed_subpaths() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0)
        .cubic_to(10.0, 20.0, 30.0, 40.0, 50.0, 60.0)
        .close();
    let mut rec = PictureRecorder::new();
    rec.fill_path(path);
    let out = render(&rec.finish());
    assert!(out.contains("10 20 30 40 50 60 c\n"));
    assert!(out.contains("h\n"));
    assert!(out.contains("f\n"));
}

#[test]
fn color_and_line_width_state() {
    let mut rec = PictureRecorder::new();
    rec.set_stroke_color(Color::rgb(1.0, 0.0, 0.0))
        .set_fill_color(Color::rgb(0.0, 0.5, 1.0))
        .set_line_width(2.5);
    let out = render(&rec.finish());
    assert!(out.contains("1 0 0 RG\n"));
    assert!(out.contains("0 0.5 1 rg\n"));
    assert!(out.contains("2.5 w\n"));
}

#[test]
fn text_runs_use_the_builtin_font() {
    let mut rec = PictureRecorder::new();
    rec.draw_text("Hello (PDF)", 72.0, 720.0, 14.0);
    let out = render(&rec.finish());
    assert!(out.contains("BT\n/F1 14 Tf\n72 720 Td\n(Hello \\(PDF\\)) Tj\nET\n"));
    assert!(out.contains("/BaseFont /Helvetica"));
}

#[test]
fn transforms_and_state_stay_balanced() {
    let mut rec = PictureRecorder::new();
    rec.save()
        .concat(Transform::scale(0.5, 0.5))
        .concat(Transform::translate(10.0, 20.0))
        .fill_rect(Rect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        })
        .restore();
    let out = render(&rec.finish());
    assert!(out.contains("q\n"));
    assert!(out.contains("0.5 0 0 0.5 0 0 cm\n"));
    assert!(out.contains("1 0 0 1 10 20 cm\n"));
    assert!(out.contains("Q\n"));

    let saves = out.matches("q\n").count();
    let restores = out.matches("Q\n").count();
    assert_eq!(saves, restores);
}

#[test]
fn empty_picture_yields_empty_content_stream() {
    let out = render(&PictureRecorder::new().finish());
    assert!(out.contains("/Length 0"));
}

#[test]
fn replay_preserves_recording_order() {
    let mut rec = PictureRecorder::new();
    rec.set_fill_color(Color::gray(0.9))
        .fill_rect(Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        })
        .draw_text("after", 5.0, 6.0, 12.0);
    let out = render(&rec.finish());

    let color_at = out.find("0.9 0.9 0.9 rg").unwrap();
    let rect_at = out.find("1 2 3 4 re").unwrap();
    let text_at = out.find("(after) Tj").unwrap();
    assert!(color_at < rect_at);
    assert!(rect_at < text_at);
}

#[test]
fn shared_clones_render_identically() {
    let mut rec = PictureRecorder::new();
    rec.fill_rect(Rect {
        x: 9.0,
        y: 9.0,
        width: 9.0,
        height: 9.0,
    });
    let original = rec.finish();
    let clone = original.clone();
    assert_eq!(render(&original), render(&clone));
}
