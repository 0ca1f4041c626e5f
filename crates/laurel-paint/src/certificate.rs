//! Certificate layout for a single recipient.
//!
//! The renderer copies a template canvas and appends the recipient's text in
//! a fixed top-to-bottom order. Every line is horizontally centered using a
//! width measured with the font that will later rasterize it; vertical
//! positions are constants, except that a grade badge pushes the date line
//! and everything after it down by [`GRADE_BADGE_OFFSET`].

use crate::color::palette;
use crate::display_list::ShapePaint;
use crate::metrics::{FontSpec, TextMeasure, centered_x};
use crate::{Canvas, Color};

/// How far the date line and custom fields move down when a grade badge is
/// drawn.
pub const GRADE_BADGE_OFFSET: f32 = 70.0;

/// Vertical distance between consecutive custom-field lines.
pub const CUSTOM_FIELD_STEP: f32 = 34.0;

const TITLE: &str = "CERTIFICATE";
const SUBTITLE: &str = "OF ACHIEVEMENT";
const GREETING: &str = "This is to certify that";
const COMPLETION: &str = "has successfully completed the course";
const SEAL_TEXT: &str = "VERIFIED";
const SIGNATURE_CAPTIONS: [&str; 2] = ["Instructor", "Director"];

const TITLE_FONT: FontSpec = FontSpec::bold(72.0);
const SUBTITLE_FONT: FontSpec = FontSpec::regular(30.0);
const BODY_FONT: FontSpec = FontSpec::regular(32.0);
const NAME_FONT: FontSpec = FontSpec::bold(60.0);
const COURSE_FONT: FontSpec = FontSpec::bold(46.0);
const BADGE_FONT: FontSpec = FontSpec::bold(26.0);
const DATE_FONT: FontSpec = FontSpec::regular(26.0);
const CAPTION_FONT: FontSpec = FontSpec::regular(22.0);
const SEAL_FONT: FontSpec = FontSpec::bold(18.0);
const CUSTOM_FONT: FontSpec = FontSpec::regular(24.0);

const TITLE_Y: f32 = 105.0;
const TITLE_SHADOW: (f32, f32) = (3.0, 3.0);
const SUBTITLE_Y: f32 = 195.0;
const SUBTITLE_RULE_Y: f32 = 238.0;
const SUBTITLE_RULE_WIDTH: f32 = 180.0;
const GREETING_Y: f32 = 300.0;
const NAME_Y: f32 = 360.0;
const COMPLETION_Y: f32 = 460.0;
const COURSE_Y: f32 = 515.0;
/// Gap between a line's baseline and its underline.
const UNDERLINE_GAP: f32 = 14.0;
const UNDERLINE_WIDTH: f32 = 2.0;

const BADGE_Y: f32 = 605.0;
const BADGE_HEIGHT: f32 = 48.0;
const BADGE_PADDING: f32 = 28.0;

const DATE_Y: f32 = 630.0;
const CUSTOM_FIELDS_Y: f32 = 690.0;

/// Signature rules sit this far above the bottom edge.
const SIGNATURE_FROM_BOTTOM: f32 = 110.0;
/// Horizontal centers of the two signature rules, as fractions of the width.
const SIGNATURE_CENTERS: [f32; 2] = [0.25, 0.6];
const SIGNATURE_HALF_LENGTH: f32 = 140.0;
const CAPTION_GAP: f32 = 10.0;

/// Seal center distance from the right and bottom edges, clear of the
/// bottom-right ornament.
const SEAL_INSET: (f32, f32) = (210.0, 140.0);
const SEAL_RADIUS: f32 = 64.0;
const SEAL_RING_RADIUS: f32 = 54.0;

/// The field values for one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientFields {
    /// Recipient name.
    pub name: String,
    /// Course title.
    pub course: String,
    /// Completion date, rendered verbatim.
    pub date: String,
    /// Grade; `None` (or an empty string) means no badge.
    pub grade: Option<String>,
    /// Extra `key: value` lines, in the order they are stacked.
    pub custom: Vec<(String, String)>,
}

impl RecipientFields {
    /// Fields with no grade and no custom lines.
    #[must_use]
    pub fn new(name: impl Into<String>, course: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            course: course.into(),
            date: date.into(),
            grade: None,
            custom: Vec::new(),
        }
    }

    /// Set the grade.
    #[must_use]
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Append a custom field below the existing ones.
    #[must_use]
    pub fn with_custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.push((key.into(), value.into()));
        self
    }

    /// The grade, if it should produce a badge.
    #[must_use]
    pub fn badge_grade(&self) -> Option<&str> {
        self.grade.as_deref().filter(|grade| !grade.is_empty())
    }
}

/// Lays recipient text out over a template.
pub struct CertificateRenderer<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
}

impl<'a, M: TextMeasure + ?Sized> CertificateRenderer<'a, M> {
    /// Create a renderer measuring text with `measure`.
    #[must_use]
    pub const fn new(measure: &'a M) -> Self {
        Self { measure }
    }

    /// Draw `fields` over a copy of `template` and return the copy.
    #[must_use]
    pub fn render(&self, template: &Canvas, fields: &RecipientFields) -> Canvas {
        let mut canvas = template.clone();

        // Title, drawn twice: the translucent shadow first, then the ink.
        let title_x = self.centered(&canvas, TITLE, TITLE_FONT);
        canvas.text(
            title_x + TITLE_SHADOW.0,
            TITLE_Y + TITLE_SHADOW.1,
            TITLE,
            TITLE_FONT,
            palette::SHADOW,
        );
        canvas.text(title_x, TITLE_Y, TITLE, TITLE_FONT, palette::NAVY);

        self.centered_text(&mut canvas, SUBTITLE, SUBTITLE_Y, SUBTITLE_FONT, palette::GOLD_DARK);
        let rule_x = centered_x(canvas.width(), SUBTITLE_RULE_WIDTH);
        canvas.line(
            (rule_x, SUBTITLE_RULE_Y),
            (rule_x + SUBTITLE_RULE_WIDTH, SUBTITLE_RULE_Y),
            palette::NAVY,
            UNDERLINE_WIDTH,
        );

        self.centered_text(&mut canvas, GREETING, GREETING_Y, BODY_FONT, palette::SLATE);
        self.underlined_text(&mut canvas, &fields.name, NAME_Y, NAME_FONT, palette::CRIMSON);
        self.centered_text(&mut canvas, COMPLETION, COMPLETION_Y, SUBTITLE_FONT, palette::SLATE);
        self.underlined_text(&mut canvas, &fields.course, COURSE_Y, COURSE_FONT, palette::NAVY);

        let offset = match fields.badge_grade() {
            Some(grade) => {
                self.grade_badge(&mut canvas, grade);
                GRADE_BADGE_OFFSET
            }
            None => 0.0,
        };

        let date_line = format!("Date: {}", fields.date);
        self.centered_text(&mut canvas, &date_line, DATE_Y + offset, DATE_FONT, palette::GRAY);

        self.signatures(&mut canvas);
        self.seal(&mut canvas);

        let mut cursor_y = CUSTOM_FIELDS_Y + offset;
        for (key, value) in &fields.custom {
            let line = format!("{key}: {value}");
            self.centered_text(&mut canvas, &line, cursor_y, CUSTOM_FONT, palette::GRAY);
            cursor_y += CUSTOM_FIELD_STEP;
        }

        canvas
    }

    fn centered(&self, canvas: &Canvas, text: &str, font: FontSpec) -> f32 {
        centered_x(canvas.width(), self.measure.text_width(text, font))
    }

    fn centered_text(&self, canvas: &mut Canvas, text: &str, y: f32, font: FontSpec, color: Color) {
        let x = self.centered(canvas, text, font);
        canvas.text(x, y, text, font, color);
    }

    /// Draw a centered line with a rule exactly as wide as the text.
    fn underlined_text(&self, canvas: &mut Canvas, text: &str, y: f32, font: FontSpec, color: Color) {
        let width = self.measure.text_width(text, font);
        let x = centered_x(canvas.width(), width);
        canvas.text(x, y, text, font, color);
        let rule_y = y + font.size + UNDERLINE_GAP;
        canvas.line((x, rule_y), (x + width, rule_y), color, UNDERLINE_WIDTH);
    }

    fn grade_badge(&self, canvas: &mut Canvas, grade: &str) {
        let label = format!("Grade: {grade}");
        let text_width = self.measure.text_width(&label, BADGE_FONT);
        let badge_width = text_width + 2.0 * BADGE_PADDING;
        let badge_x = centered_x(canvas.width(), badge_width);
        canvas.rounded_rect(
            (badge_x, BADGE_Y),
            (badge_width, BADGE_HEIGHT),
            BADGE_HEIGHT / 2.0,
            ShapePaint::Fill(palette::GREEN),
        );
        let text_y = BADGE_Y + (BADGE_HEIGHT - BADGE_FONT.size) / 2.0;
        canvas.text(
            centered_x(canvas.width(), text_width),
            text_y,
            label,
            BADGE_FONT,
            Color::WHITE,
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn signatures(&self, canvas: &mut Canvas) {
        let width = canvas.width() as f32;
        let rule_y = canvas.height() as f32 - SIGNATURE_FROM_BOTTOM;
        for (fraction, caption) in SIGNATURE_CENTERS.into_iter().zip(SIGNATURE_CAPTIONS) {
            let center = width * fraction;
            canvas.line(
                (center - SIGNATURE_HALF_LENGTH, rule_y),
                (center + SIGNATURE_HALF_LENGTH, rule_y),
                palette::SLATE,
                UNDERLINE_WIDTH,
            );
            let caption_width = self.measure.text_width(caption, CAPTION_FONT);
            canvas.text(
                center - caption_width / 2.0,
                rule_y + CAPTION_GAP,
                caption,
                CAPTION_FONT,
                palette::SLATE,
            );
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn seal(&self, canvas: &mut Canvas) {
        let cx = canvas.width() as f32 - SEAL_INSET.0;
        let cy = canvas.height() as f32 - SEAL_INSET.1;
        canvas.ellipse(cx, cy, SEAL_RADIUS, SEAL_RADIUS, ShapePaint::Fill(palette::GOLD));
        canvas.ellipse(
            cx,
            cy,
            SEAL_RING_RADIUS,
            SEAL_RING_RADIUS,
            ShapePaint::Stroke {
                color: Color::WHITE,
                width: 2.0,
            },
        );
        let text_width = self.measure.text_width(SEAL_TEXT, SEAL_FONT);
        // Put the cap height, not the whole line box, on the center.
        let text_y = cy - SEAL_FONT.size * 0.64;
        canvas.text(cx - text_width / 2.0, text_y, SEAL_TEXT, SEAL_FONT, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::DrawCommand;
    use crate::{ApproximateTextMeasure, TemplateBuilder};

    fn render(fields: &RecipientFields) -> Canvas {
        let template = TemplateBuilder::default().build();
        CertificateRenderer::new(&ApproximateTextMeasure).render(&template, fields)
    }

    fn y_of(canvas: &Canvas, prefix: &str) -> Option<f32> {
        canvas
            .display_list()
            .texts()
            .find(|(_, _, text)| text.starts_with(prefix))
            .map(|(_, y, _)| y)
    }

    #[test]
    fn test_template_is_not_mutated() {
        let template = TemplateBuilder::default().build();
        let before = template.clone();
        let fields = RecipientFields::new("Ada", "Engines", "1843-10-01");
        let _certificate = CertificateRenderer::new(&ApproximateTextMeasure).render(&template, &fields);
        assert_eq!(template, before);
    }

    #[test]
    fn test_text_order_top_to_bottom() {
        let fields = RecipientFields::new("Ada", "Engines", "1843-10-01").with_grade("A");
        let canvas = render(&fields);
        let order: Vec<&str> = canvas.display_list().texts().map(|(_, _, t)| t).collect();
        assert_eq!(
            order,
            vec![
                "CERTIFICATE",
                "CERTIFICATE",
                "OF ACHIEVEMENT",
                "This is to certify that",
                "Ada",
                "has successfully completed the course",
                "Engines",
                "Grade: A",
                "Date: 1843-10-01",
                "Instructor",
                "Director",
                "VERIFIED",
            ]
        );
    }

    #[test]
    fn test_name_underline_matches_measured_width() {
        let canvas = render(&RecipientFields::new("Grace Hopper", "COBOL", "1959"));
        let width = ApproximateTextMeasure.text_width("Grace Hopper", NAME_FONT);
        let x = centered_x(canvas.width(), width);
        let rule_y = NAME_Y + NAME_FONT.size + UNDERLINE_GAP;
        assert!(canvas.display_list().commands().contains(&DrawCommand::Line {
            x1: x,
            y1: rule_y,
            x2: x + width,
            y2: rule_y,
            color: palette::CRIMSON,
            width: UNDERLINE_WIDTH,
        }));
    }

    #[test]
    fn test_empty_grade_draws_no_badge() {
        let fields = RecipientFields::new("Bob", "Math", "today").with_grade("");
        let canvas = render(&fields);
        assert_eq!(y_of(&canvas, "Grade:"), None);
        assert_eq!(y_of(&canvas, "Date:"), Some(DATE_Y));
        assert!(!canvas
            .display_list()
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::RoundedRect { .. })));
    }

    #[test]
    fn test_title_shadow_sits_behind_title() {
        let canvas = render(&RecipientFields::new("A", "B", "C"));
        let titles: Vec<(f32, f32)> = canvas
            .display_list()
            .texts()
            .filter(|(_, _, t)| *t == TITLE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(titles.len(), 2);
        assert!((titles[0].0 - titles[1].0 - TITLE_SHADOW.0).abs() < 1e-3);
        assert!((titles[0].1 - titles[1].1 - TITLE_SHADOW.1).abs() < 1e-3);
    }

    #[test]
    fn test_custom_fields_clear_the_signatures() {
        let fields = RecipientFields::new("Ada", "Engines", "1843-10-01")
            .with_grade("A")
            .with_custom_field("instructor", "Dr. Brown")
            .with_custom_field("hours", "40")
            .with_custom_field("location", "Room 12");
        let canvas = render(&fields);
        let rule_y = canvas.height() as f32 - SIGNATURE_FROM_BOTTOM;
        let last = y_of(&canvas, "location:").unwrap();
        assert!(last + CUSTOM_FONT.size < rule_y);

        let seal_top = canvas.height() as f32 - SEAL_INSET.1 - SEAL_RADIUS;
        assert!(y_of(&canvas, "Date:").unwrap() + DATE_FONT.size < seal_top);
    }
}
