//! Integration tests for template construction and certificate layout.

use laurel_paint::{
    ApproximateTextMeasure, CUSTOM_FIELD_STEP, Canvas, CertificateRenderer, DrawCommand,
    FontSpec, GRADE_BADGE_OFFSET, RecipientFields, TemplateBuilder, TextMeasure, centered_x,
};

fn render(fields: &RecipientFields) -> Canvas {
    let template = TemplateBuilder::default().build();
    CertificateRenderer::new(&ApproximateTextMeasure).render(&template, fields)
}

fn text_y(canvas: &Canvas, prefix: &str) -> f32 {
    canvas
        .display_list()
        .texts()
        .find(|(_, _, text)| text.starts_with(prefix))
        .map(|(_, y, _)| y)
        .unwrap_or_else(|| panic!("no text starting with {prefix:?}"))
}

// ========== TemplateBuilder ==========

#[test]
fn test_template_is_deterministic() {
    let builder = TemplateBuilder::new(1400, 1000);
    assert_eq!(builder.build(), builder.build());
    assert_eq!(TemplateBuilder::default().build(), builder.build());
}

#[test]
fn test_template_scales_with_size() {
    let small = TemplateBuilder::new(800, 600).build();
    let large = TemplateBuilder::new(1600, 1200).build();
    assert_eq!(small.display_list().len(), large.display_list().len());
    assert_ne!(small, large);
}

#[test]
fn test_template_has_four_ornaments_and_two_diamonds() {
    let canvas = TemplateBuilder::default().build();
    let commands = canvas.display_list().commands();
    let ellipses = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
        .count();
    let diamonds = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Polygon { points, .. } if points.len() == 4))
        .count();
    // Each ornament is a filled ellipse plus its ring.
    assert_eq!(ellipses, 8);
    assert_eq!(diamonds, 2);
}

// ========== CertificateRenderer ==========

#[test]
fn test_every_centered_line_uses_measured_width() {
    let fields = RecipientFields::new("Alice Smith", "Physics 101", "2025-01-01");
    let canvas = render(&fields);
    for command in canvas.display_list().commands() {
        if let DrawCommand::Text { x, text, font, .. } = command {
            if matches!(text.as_str(), "Alice Smith" | "Physics 101" | "Date: 2025-01-01") {
                let width = ApproximateTextMeasure.text_width(text, *font);
                assert_eq!(*x, centered_x(canvas.width(), width), "{text}");
            }
        }
    }
}

#[test]
fn test_grade_shifts_date_by_fixed_offset() {
    let without = render(&RecipientFields::new("Alice", "Physics", "2025-01-01"));
    let with = render(&RecipientFields::new("Alice", "Physics", "2025-01-01").with_grade("A"));
    assert_eq!(
        text_y(&with, "Date:") - text_y(&without, "Date:"),
        GRADE_BADGE_OFFSET
    );
    assert!(with.display_list().texts().any(|(_, _, t)| t == "Grade: A"));
    assert!(!without.display_list().texts().any(|(_, _, t)| t.starts_with("Grade:")));
}

#[test]
fn test_badge_is_drawn_behind_its_label() {
    let canvas = render(&RecipientFields::new("Alice", "Physics", "today").with_grade("B+"));
    let commands = canvas.display_list().commands();
    let badge = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::RoundedRect { .. }))
        .expect("badge");
    let label = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Grade: B+"))
        .expect("label");
    assert!(badge < label);
}

#[test]
fn test_custom_fields_keep_order_and_advance() {
    let fields = RecipientFields::new("Alice", "Physics", "today")
        .with_custom_field("instructor", "Dr. Brown")
        .with_custom_field("hours", "40")
        .with_custom_field("location", "Room 12");
    let canvas = render(&fields);
    let custom: Vec<(f32, &str)> = canvas
        .display_list()
        .texts()
        .filter(|(_, _, t)| t.contains(": ") && !t.starts_with("Date") && !t.starts_with("Grade"))
        .map(|(_, y, t)| (y, t))
        .collect();
    assert_eq!(
        custom.iter().map(|(_, t)| *t).collect::<Vec<_>>(),
        vec!["instructor: Dr. Brown", "hours: 40", "location: Room 12"]
    );
    for pair in custom.windows(2) {
        assert_eq!(pair[1].0 - pair[0].0, CUSTOM_FIELD_STEP);
    }
}

#[test]
fn test_custom_fields_follow_the_badge_shift() {
    let plain = render(&RecipientFields::new("A", "B", "C").with_custom_field("k", "v"));
    let graded = render(
        &RecipientFields::new("A", "B", "C")
            .with_grade("A")
            .with_custom_field("k", "v"),
    );
    assert_eq!(text_y(&graded, "k: v") - text_y(&plain, "k: v"), GRADE_BADGE_OFFSET);
    assert!(text_y(&plain, "k: v") > text_y(&plain, "Date:"));
}

#[test]
fn test_long_names_overflow_instead_of_wrapping() {
    let name = "W".repeat(200);
    let canvas = render(&RecipientFields::new(name.as_str(), "B", "C"));
    let (x, _, _) = canvas
        .display_list()
        .texts()
        .find(|(_, _, t)| *t == name)
        .expect("name line");
    assert!(x < 0.0);
    let expected = ApproximateTextMeasure.text_width(&name, FontSpec::bold(60.0));
    assert_eq!(x, centered_x(1400, expected));
}

#[test]
fn test_renders_on_static_backdrop_size() {
    let backdrop = laurel_common::image::LoadedImage::new(900, 700, vec![255; 900 * 700 * 4])
        .expect("valid image");
    let template = Canvas::from_backdrop(&backdrop);
    let canvas = CertificateRenderer::new(&ApproximateTextMeasure)
        .render(&template, &RecipientFields::new("Ann", "Art", "May"));
    assert_eq!((canvas.width(), canvas.height()), (900, 700));
    assert_eq!(canvas.backdrop(), Some(&backdrop));
    let width = ApproximateTextMeasure.text_width("Ann", FontSpec::bold(60.0));
    let (x, _, _) = canvas
        .display_list()
        .texts()
        .find(|(_, _, t)| *t == "Ann")
        .expect("name line");
    assert_eq!(x, centered_x(900, width));
}
